//! [`NetworkSample`]: registered networks sharing one node set.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{NetError, NetResult};
use crate::network::Network;
use crate::variable::{self, Variable, VariableMap};

/// An ordered sample of subjects plus per-subject ("sample") variables.
///
/// Construction broadcasts the shared node variables onto every subject, so
/// all members carry the same node-variable names and all have the same
/// node count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSample {
    subjects: Vec<Network>,
    node_count: usize,
    sample_vars: VariableMap,
}

impl NetworkSample {
    /// Build a sample.
    ///
    /// - `subjects` must be non-empty, uniquely named and equally sized.
    /// - every column of `node_vars` must have one entry per node; it is
    ///   copied onto every subject, replacing a same-named subject variable.
    /// - every column of `sample_vars` must have one entry per subject, and
    ///   none may be named after a [`RESERVED_SAMPLE_VARS`](crate::variable::RESERVED_SAMPLE_VARS) column.
    pub fn new(
        subjects: Vec<Network>,
        node_vars: VariableMap,
        sample_vars: VariableMap,
    ) -> NetResult<Self> {
        let Some(first) = subjects.first() else {
            return Err(NetError::contract("network sample", "a sample needs at least one subject"));
        };
        let n = first.node_count();

        let mut seen = HashSet::with_capacity(subjects.len());
        for subject in &subjects {
            if subject.node_count() != n {
                return Err(NetError::dimension(
                    format!("subject '{}' node count", subject.name()),
                    n,
                    subject.node_count(),
                ));
            }
            if !seen.insert(subject.name()) {
                return Err(NetError::contract(
                    "network sample",
                    format!("duplicate subject name '{}'", subject.name()),
                ));
            }
        }

        variable::check_lengths(&node_vars, n, "sample node")?;
        variable::check_lengths(&sample_vars, subjects.len(), "sample")?;
        variable::check_sample_names(&sample_vars, "network sample")?;

        let subjects = subjects
            .into_iter()
            .map(|subject| {
                node_vars
                    .iter()
                    .try_fold(subject, |net, (name, var)| net.and_node_var(name.clone(), var.clone()))
            })
            .collect::<NetResult<Vec<_>>>()?;

        // Subject-local node variables must agree on names across the sample.
        let names: Vec<&String> = subjects[0].node_vars().keys().collect();
        for subject in &subjects[1..] {
            let other: Vec<&String> = subject.node_vars().keys().collect();
            if other != names {
                return Err(NetError::contract(
                    format!("subject '{}'", subject.name()),
                    "node-variable names differ from the first subject",
                ));
            }
        }

        Ok(Self { subjects, node_count: n, sample_vars })
    }

    /// Sample without node or sample variables.
    pub fn from_subjects(subjects: Vec<Network>) -> NetResult<Self> {
        Self::new(subjects, VariableMap::new(), VariableMap::new())
    }

    pub fn subjects(&self) -> &[Network] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn subject_names(&self) -> Vec<String> {
        self.subjects.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn sample_vars(&self) -> &VariableMap {
        &self.sample_vars
    }

    pub fn sample_var(&self, name: &str) -> NetResult<&Variable> {
        variable::lookup(&self.sample_vars, name)
    }

    pub fn numeric_sample_var(&self, name: &str) -> NetResult<&[f64]> {
        variable::numeric(&self.sample_vars, name)
    }
}
