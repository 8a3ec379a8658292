//! Test procedures run on statistic sets produced by the engine.

use ndarray::Array2;
use netmanip_core::{Args, NetError, Network, NetworkSample, SampleStatisticSet, Variable, VariableMap};
use netmanip_engine::builtin::TotalWeight;
use netmanip_engine::{apply_manipulation, apply_statistic, Derived, ProcedureResult};
use netmanip_stats::{
    diff_test, group_diff_test, group_test, Correction, TestConfig, TestEngine, TestMethod,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NODES: usize = 12;

fn random_subject(name: String, rng: &mut StdRng) -> Network {
    let mut a = Array2::zeros((NODES, NODES));
    for i in 0..NODES {
        for j in (i + 1)..NODES {
            let w = rng.gen_range(0.5..1.5);
            a[[i, j]] = w;
            a[[j, i]] = w;
        }
    }
    Network::new(name, a).unwrap()
}

fn sample(subjects: usize, groups: Vec<&str>) -> NetworkSample {
    let mut rng = StdRng::seed_from_u64(7);
    let nets = (0..subjects)
        .map(|i| random_subject(format!("sub-{i:02}"), &mut rng))
        .collect();
    let mut vars = VariableMap::new();
    vars.insert("group".into(), Variable::from(groups));
    NetworkSample::new(nets, VariableMap::new(), vars).unwrap()
}

/// Label "10" weakens the 0–1 edge by 0.5 in both directions; label "5"
/// is a copy.
fn weaken_edge(net: &Network, _: &Args) -> ProcedureResult<Derived> {
    let mut weaker = net.adjacency().clone();
    weaker[[0, 1]] -= 0.5;
    weaker[[1, 0]] -= 0.5;
    Ok(vec![
        ("5".into(), net.renamed(format!("{}-copy", net.name()))),
        ("10".into(), net.with_adjacency(format!("{}-weak", net.name()), weaker)?),
    ])
}

fn measured(sample: &NetworkSample) -> SampleStatisticSet {
    let manip = apply_manipulation(sample, &weaken_edge, &Args::new()).unwrap();
    apply_statistic(&manip, &TotalWeight, &Args::new())
        .unwrap()
        .into_sample_statistic_set()
        .unwrap()
}

#[test]
fn systematic_decrease_is_detected() {
    let set = measured(&sample(20, vec!["a"; 20]));

    let table = diff_test(&set).unwrap();
    let hit = table.row("10").unwrap();
    assert!(hit.p_value < 0.05, "p = {}", hit.p_value);
    assert!((hit.estimate + 1.0).abs() < 1e-9);
    assert_eq!(hit.n1, 20);

    let miss = table.row("5").unwrap();
    assert!(miss.p_value >= 0.05, "p = {}", miss.p_value);
    assert_eq!(table.significant(0.05), vec!["10"]);

    let rank = TestEngine::new(TestConfig {
        method: TestMethod::RankBased,
        correction: Correction::Fdr,
        ..Default::default()
    });
    let table = rank.diff_test(&set).unwrap();
    assert!(table.row("10").unwrap().p_adjusted < 0.05);
    assert_eq!(table.row("5").unwrap().p_adjusted, 1.0);
}

#[test]
fn single_group_value_is_rejected() {
    let set = measured(&sample(6, vec!["ctrl"; 6]));
    for result in [group_test(&set, "group"), group_diff_test(&set, "group")] {
        assert_eq!(
            result.unwrap_err(),
            NetError::GroupConfiguration { variable: "group".into(), distinct: 1 }
        );
    }
}

#[test]
fn group_tests_run_on_two_groups() {
    let set = measured(&sample(8, vec!["a", "b", "a", "b", "a", "b", "a", "b"]));
    let table = group_diff_test(&set, "group").unwrap();
    // "5" leaves every subject unchanged
    let row = table.row("5").unwrap();
    assert_eq!((row.n1, row.n2), (4, Some(4)));
    assert_eq!((row.statistic, row.p_value), (0.0, 1.0));

    let table = group_test(&set, "group").unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.rows.iter().all(|r| (0.0..=1.0).contains(&r.p_value)));
}
