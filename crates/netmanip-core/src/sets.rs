//! Derived entities: manipulated sets and the statistic sets computed on
//! them.
//!
//! | Type                     | Built from                 | Holds                                 |
//! |--------------------------|----------------------------|---------------------------------------|
//! | [`ManipulatedNetworkSet`] | one [`Network`]            | original + label → derived network    |
//! | [`ManipulatedSampleSet`]  | one [`NetworkSample`]      | original sample + one set per subject |
//! | [`StatisticSet`]          | a `ManipulatedNetworkSet`  | original value + label → value        |
//! | [`SampleStatisticSet`]    | a `ManipulatedSampleSet`   | one `StatisticSet` per subject        |
//!
//! Labels keep the order the manipulation procedure produced them in.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{NetError, NetResult};
use crate::network::Network;
use crate::sample::NetworkSample;
use crate::variable::{self, Variable, VariableMap};

/// Reserved label of the unmanipulated network in messages and exports.
pub const ORIGINAL_LABEL: &str = "original";

/// Reject empty, blank or duplicate labels.
fn check_labels<'a>(context: &str, labels: impl Iterator<Item = &'a str>) -> NetResult<usize> {
    let mut seen = HashSet::new();
    for label in labels {
        if label.trim().is_empty() {
            return Err(NetError::contract(context, "labels must be non-empty strings"));
        }
        if label == ORIGINAL_LABEL {
            return Err(NetError::contract(context, format!("label '{ORIGINAL_LABEL}' is reserved")));
        }
        if !seen.insert(label) {
            return Err(NetError::contract(context, format!("duplicate label '{label}'")));
        }
    }
    if seen.is_empty() {
        return Err(NetError::contract(context, "procedure returned no derived networks"));
    }
    Ok(seen.len())
}

// ─────────────────────────────────────────────
// ManipulatedNetworkSet
// ─────────────────────────────────────────────

/// An original network and the networks a manipulation derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManipulatedNetworkSet {
    original: Network,
    derived: Vec<(String, Network)>,
}

impl ManipulatedNetworkSet {
    /// Wrap procedure output.
    ///
    /// Fails with `ContractViolation` when `derived` is empty or has blank
    /// or duplicate labels, and with `DimensionMismatch` when a derived
    /// network breaks the node-variable invariant.
    pub fn new(original: Network, derived: Vec<(String, Network)>) -> NetResult<Self> {
        let context = format!("manipulation of '{}'", original.name());
        check_labels(&context, derived.iter().map(|(l, _)| l.as_str()))?;
        for (label, net) in &derived {
            net.validate().map_err(|e| match e {
                NetError::DimensionMismatch { expected, got, .. } => NetError::dimension(
                    format!("{context}, label '{label}'"),
                    expected,
                    got,
                ),
                other => other,
            })?;
        }
        Ok(Self { original, derived })
    }

    pub fn original(&self) -> &Network {
        &self.original
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.derived.iter().map(|(l, _)| l.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&Network> {
        self.derived.iter().find(|(l, _)| l == label).map(|(_, n)| n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Network)> {
        self.derived.iter().map(|(l, n)| (l.as_str(), n))
    }

    pub fn len(&self) -> usize {
        self.derived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.derived.is_empty()
    }

    /// Give up ownership of the derived networks.
    pub fn into_parts(self) -> (Network, Vec<(String, Network)>) {
        (self.original, self.derived)
    }
}

// ─────────────────────────────────────────────
// ManipulatedSampleSet
// ─────────────────────────────────────────────

/// A sample and, per subject, the manipulated set derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManipulatedSampleSet {
    original: NetworkSample,
    subjects: Vec<ManipulatedNetworkSet>,
}

impl ManipulatedSampleSet {
    /// `subjects[i]` must be derived from `original.subjects()[i]`.
    pub fn new(original: NetworkSample, subjects: Vec<ManipulatedNetworkSet>) -> NetResult<Self> {
        if subjects.len() != original.len() {
            return Err(NetError::dimension("manipulated sample subjects", original.len(), subjects.len()));
        }
        for (set, subject) in subjects.iter().zip(original.subjects()) {
            if set.original().name() != subject.name() {
                return Err(NetError::contract(
                    "manipulated sample",
                    format!(
                        "subject order broken: expected '{}', found '{}'",
                        subject.name(),
                        set.original().name()
                    ),
                ));
            }
        }
        Ok(Self { original, subjects })
    }

    pub fn original(&self) -> &NetworkSample {
        &self.original
    }

    pub fn subjects(&self) -> &[ManipulatedNetworkSet] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

// ─────────────────────────────────────────────
// StatisticSet
// ─────────────────────────────────────────────

/// Statistic of the original network and of every derived network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticSet {
    name: String,
    original: f64,
    values: Vec<(String, f64)>,
}

impl StatisticSet {
    /// `name` is the name of the network the set was computed on.
    ///
    /// Every value must be finite and every label unique.
    pub fn new(name: impl Into<String>, original: f64, values: Vec<(String, f64)>) -> NetResult<Self> {
        let name = name.into();
        let context = format!("statistic set of '{name}'");
        if !original.is_finite() {
            return Err(NetError::contract(&context, format!("original value {original} is not a finite number")));
        }
        check_labels(&context, values.iter().map(|(l, _)| l.as_str()))?;
        if let Some((label, v)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(NetError::contract(
                &context,
                format!("value {v} for label '{label}' is not a finite number"),
            ));
        }
        Ok(Self { name, original, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original(&self) -> f64 {
        self.original
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(l, _)| l.as_str())
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.values.iter().find(|(l, _)| l == label).map(|(_, v)| *v)
    }

    /// Derived minus original for `label`.
    pub fn difference(&self, label: &str) -> Option<f64> {
        self.get(label).map(|v| v - self.original)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ─────────────────────────────────────────────
// SampleStatisticSet
// ─────────────────────────────────────────────

/// One [`StatisticSet`] per subject plus the sample variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleStatisticSet {
    subjects: Vec<StatisticSet>,
    sample_vars: VariableMap,
}

impl SampleStatisticSet {
    pub fn new(subjects: Vec<StatisticSet>, sample_vars: VariableMap) -> NetResult<Self> {
        if subjects.is_empty() {
            return Err(NetError::contract("sample statistic set", "at least one subject is required"));
        }
        variable::check_lengths(&sample_vars, subjects.len(), "sample")?;
        variable::check_sample_names(&sample_vars, "sample statistic set")?;
        Ok(Self { subjects, sample_vars })
    }

    pub fn subjects(&self) -> &[StatisticSet] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn sample_vars(&self) -> &VariableMap {
        &self.sample_vars
    }

    pub fn sample_var(&self, name: &str) -> NetResult<&Variable> {
        variable::lookup(&self.sample_vars, name)
    }

    /// Every label in order of first appearance across subjects.
    pub fn labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for set in &self.subjects {
            for label in set.labels() {
                if seen.insert(label) {
                    out.push(label.to_string());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn net(name: &str, n: usize) -> Network {
        Network::new(name, Array2::ones((n, n))).unwrap()
    }

    #[test]
    fn manipulated_set_rejects_duplicates_and_empty() {
        let err = ManipulatedNetworkSet::new(net("o", 2), vec![]).unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }));

        let err = ManipulatedNetworkSet::new(
            net("o", 2),
            vec![("a".into(), net("d1", 1)), ("a".into(), net("d2", 1))],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate label 'a'"));

        let err = ManipulatedNetworkSet::new(net("o", 2), vec![(" ".into(), net("d", 1))]).unwrap_err();
        assert!(matches!(err, NetError::ContractViolation { .. }));

        let err = ManipulatedNetworkSet::new(net("o", 2), vec![("original".into(), net("d", 1))]).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn manipulated_set_keeps_order() {
        let set = ManipulatedNetworkSet::new(
            net("o", 3),
            vec![("b".into(), net("d1", 2)), ("a".into(), net("d2", 2))],
        )
        .unwrap();
        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(set.get("a").unwrap().name(), "d2");
    }

    #[test]
    fn statistic_set_rejects_nan() {
        let err = StatisticSet::new("s", 1.0, vec![("a".into(), f64::NAN)]).unwrap_err();
        assert!(err.to_string().contains("label 'a'"));
        assert!(StatisticSet::new("s", f64::INFINITY, vec![("a".into(), 1.0)]).is_err());
    }

    #[test]
    fn difference_is_derived_minus_original() {
        let set = StatisticSet::new("s", 6.0, vec![("1".into(), 4.0)]).unwrap();
        assert_eq!(set.difference("1"), Some(-2.0));
        assert_eq!(set.difference("2"), None);
    }

    #[test]
    fn sample_labels_in_first_appearance_order() {
        let a = StatisticSet::new("s1", 0.0, vec![("x".into(), 1.0), ("y".into(), 1.0)]).unwrap();
        let b = StatisticSet::new("s2", 0.0, vec![("z".into(), 1.0), ("x".into(), 1.0)]).unwrap();
        let set = SampleStatisticSet::new(vec![a, b], VariableMap::new()).unwrap();
        assert_eq!(set.labels(), vec!["x", "y", "z"]);
    }

    #[test]
    fn sample_statistic_set_checks_variable_length() {
        let a = StatisticSet::new("s1", 0.0, vec![("x".into(), 1.0)]).unwrap();
        let mut vars = VariableMap::new();
        vars.insert("group".into(), Variable::from(vec!["a", "b"]));
        assert!(SampleStatisticSet::new(vec![a], vars).is_err());
    }
}
