//! Integration tests for the netmanip entity model.
//!
//! Every constructed entity must satisfy its structural invariants; every
//! constructor must refuse input that would break them.

use ndarray::{array, Array2};

use netmanip_core::{
    ManipulatedNetworkSet, ManipulatedSampleSet, NetError, Network, NetworkSample,
    SampleStatisticSet, StatisticSet, Variable, VariableMap,
};

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

fn ring(name: &str, n: usize, weight: f64) -> Network {
    let mut a = Array2::zeros((n, n));
    for i in 0..n {
        let j = (i + 1) % n;
        a[[i, j]] = weight;
        a[[j, i]] = weight;
    }
    Network::new(name, a).unwrap()
}

fn communities(n: usize) -> Variable {
    Variable::Text((0..n).map(|i| if i < n / 2 { "left".into() } else { "right".into() }).collect())
}

// ─────────────────────────────────────────────
// Network / sample invariants
// ─────────────────────────────────────────────

#[test]
fn node_variables_always_match_dimension() {
    for n in 1..8 {
        let net = ring("r", n, 1.0)
            .and_node_var("community", communities(n))
            .unwrap()
            .and_node_var("x", (0..n).map(|i| i as f64).collect::<Vec<_>>())
            .unwrap();
        for var in net.node_vars().values() {
            assert_eq!(var.len(), net.node_count());
        }
        if n > 1 {
            let cut = net.remove_nodes("cut", &[0]).unwrap();
            for var in cut.node_vars().values() {
                assert_eq!(var.len(), cut.node_count());
            }
        }
    }
}

#[test]
fn sample_members_share_dimension_and_variables() {
    let mut node_vars = VariableMap::new();
    node_vars.insert("community".into(), communities(6));
    let mut sample_vars = VariableMap::new();
    sample_vars.insert("group".into(), Variable::from(vec!["a", "a", "b"]));
    sample_vars.insert("age".into(), Variable::Numeric(vec![30.0, 41.0, 27.0]));

    let subjects = (0..3).map(|i| ring(&format!("s{i}"), 6, 1.0 + i as f64)).collect();
    let sample = NetworkSample::new(subjects, node_vars, sample_vars).unwrap();

    for subject in sample.subjects() {
        assert_eq!(subject.node_count(), sample.node_count());
        assert!(subject.node_var("community").is_ok());
    }
    for var in sample.sample_vars().values() {
        assert_eq!(var.len(), sample.len());
    }
    assert_eq!(sample.subject_names(), vec!["s0", "s1", "s2"]);
}

#[test]
fn broadcast_node_variable_of_wrong_length_fails() {
    let mut node_vars = VariableMap::new();
    node_vars.insert("community".into(), communities(5));
    let err = NetworkSample::new(vec![ring("s0", 6, 1.0)], node_vars, VariableMap::new()).unwrap_err();
    assert!(matches!(err, NetError::DimensionMismatch { expected: 6, got: 5, .. }));
}

// ─────────────────────────────────────────────
// Derived sets
// ─────────────────────────────────────────────

#[test]
fn manipulated_sample_set_requires_subject_order() {
    let sample = NetworkSample::from_subjects(vec![ring("s0", 3, 1.0), ring("s1", 3, 1.0)]).unwrap();
    let set = |subject: &Network| {
        ManipulatedNetworkSet::new(subject.clone(), vec![("1".into(), subject.remove_nodes("d", &[0]).unwrap())])
            .unwrap()
    };
    let in_order: Vec<_> = sample.subjects().iter().map(set).collect();
    let reversed: Vec<_> = in_order.iter().rev().cloned().collect();

    assert!(ManipulatedSampleSet::new(sample.clone(), in_order).is_ok());
    assert!(matches!(
        ManipulatedSampleSet::new(sample, reversed),
        Err(NetError::ContractViolation { .. })
    ));
}

#[test]
fn statistic_sets_keep_labels_and_variables() {
    let s1 = StatisticSet::new("s1", 6.0, vec![("1".into(), 4.0), ("2".into(), 2.0)]).unwrap();
    let s2 = StatisticSet::new("s2", 8.0, vec![("2".into(), 3.0)]).unwrap();
    let mut vars = VariableMap::new();
    vars.insert("group".into(), Variable::from(vec!["a", "b"]));

    let set = SampleStatisticSet::new(vec![s1, s2], vars).unwrap();
    assert_eq!(set.labels(), vec!["1", "2"]);
    assert_eq!(set.subjects()[1].difference("2"), Some(-5.0));
    assert!(set.sample_var("group").is_ok());
    assert_eq!(set.sample_var("sex"), Err(NetError::missing("sex")));
}

#[test]
fn sample_variables_cannot_shadow_row_columns() {
    for name in netmanip_core::RESERVED_SAMPLE_VARS {
        let mut vars = VariableMap::new();
        vars.insert(name.to_string(), Variable::Numeric(vec![99.0, 98.0]));

        let err = NetworkSample::new(
            vec![ring("s1", 3, 1.0), ring("s2", 3, 2.0)],
            VariableMap::new(),
            vars.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }), "{name}: {err}");
        assert!(err.to_string().contains(name));

        let subjects = vec![
            StatisticSet::new("s1", 10.0, vec![("x".into(), 7.0)]).unwrap(),
            StatisticSet::new("s2", 11.0, vec![("x".into(), 8.0)]).unwrap(),
        ];
        assert!(matches!(
            SampleStatisticSet::new(subjects, vars),
            Err(NetError::ContractViolation { .. })
        ));
    }
}

#[test]
fn serializes_network_to_json() {
    let net = Network::new("tiny", array![[0., 1.], [1., 0.]])
        .unwrap()
        .and_node_var("community", vec!["a", "b"])
        .unwrap();
    let json = serde_json::to_value(&net).unwrap();
    assert_eq!(json["name"], "tiny");
    assert_eq!(json["node_vars"]["community"]["kind"], "text");
}
