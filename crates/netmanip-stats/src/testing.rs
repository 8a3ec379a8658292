//! The three test procedures over a [`SampleStatisticSet`].
//!
//! | Procedure         | Values per subject          | Test                      |
//! |-------------------|-----------------------------|---------------------------|
//! | `diff_test`       | derived[label] − original   | one-sample vs 0           |
//! | `group_test`      | derived[label]              | two-sample between groups |
//! | `group_diff_test` | derived[label] − original   | two-sample between groups |
//!
//! Rows follow the order in which labels first appear across subjects.
//! Non-finite or absent values are left out per label.

use std::collections::HashSet;

use netmanip_core::{NetError, NetResult, SampleStatisticSet, StatisticSet};
use tracing::{debug, info, instrument};

use crate::config::{LabelPolicy, TestConfig, TestMethod};
use crate::correction;
use crate::grouping::Groups;
use crate::location::{one_sample_t, student_t, welch_t};
use crate::rank::{rank_sum, signed_rank};
use crate::result::{Grouping, TestKind, TestOutcome, TestRow, TestTable};

/// Paired difference test with the default config.
pub fn diff_test(set: &SampleStatisticSet) -> NetResult<TestTable> {
    TestEngine::default().diff_test(set)
}

/// Between-group test on derived values with the default config.
pub fn group_test(set: &SampleStatisticSet, variable: &str) -> NetResult<TestTable> {
    TestEngine::default().group_test(set, variable)
}

/// Between-group test on per-subject differences with the default config.
pub fn group_diff_test(set: &SampleStatisticSet, variable: &str) -> NetResult<TestTable> {
    TestEngine::default().group_diff_test(set, variable)
}

fn derived(s: &StatisticSet, label: &str) -> Option<f64> {
    s.get(label)
}

fn difference(s: &StatisticSet, label: &str) -> Option<f64> {
    s.difference(label)
}

fn require(label: &str, available: usize) -> NetResult<()> {
    if available < 2 {
        return Err(NetError::InsufficientData {
            label: label.to_string(),
            available,
        });
    }
    Ok(())
}

/// Stateless runner holding only configuration.
#[derive(Debug, Clone, Default)]
pub struct TestEngine {
    pub config: TestConfig,
}

impl TestEngine {
    pub fn new(config: TestConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(TestConfig::from_env())
    }

    /// Per label, a two-sided one-sample test of derived − original against 0
    /// over the subjects carrying that label.
    #[instrument(skip_all, fields(subjects = set.len()))]
    pub fn diff_test(&self, set: &SampleStatisticSet) -> NetResult<TestTable> {
        let labels = self.labels(set)?;
        let mut rows = Vec::with_capacity(labels.len());
        for label in &labels {
            let values: Vec<f64> = set
                .subjects()
                .iter()
                .filter_map(|s| s.difference(label))
                .filter(|v| v.is_finite())
                .collect();
            require(label, values.len())?;
            let outcome = match self.config.method {
                TestMethod::Parametric => one_sample_t(&values)?,
                TestMethod::RankBased => signed_rank(&values)?,
            };
            debug!(label = %label, n = values.len(), p = outcome.p_value, "difference test");
            rows.push(row(label, outcome, values.len(), None));
        }
        Ok(self.finish(TestKind::Difference, None, rows))
    }

    /// Per label, a two-sided two-sample test of the derived values between
    /// the two groups of sample variable `variable`.
    #[instrument(skip_all, fields(subjects = set.len(), variable = %variable))]
    pub fn group_test(&self, set: &SampleStatisticSet, variable: &str) -> NetResult<TestTable> {
        self.between_groups(set, variable, TestKind::Group, derived)
    }

    /// Like [`group_test`](Self::group_test) on derived − original.
    #[instrument(skip_all, fields(subjects = set.len(), variable = %variable))]
    pub fn group_diff_test(&self, set: &SampleStatisticSet, variable: &str) -> NetResult<TestTable> {
        self.between_groups(set, variable, TestKind::GroupDifference, difference)
    }

    fn between_groups(
        &self,
        set: &SampleStatisticSet,
        variable: &str,
        kind: TestKind,
        value: fn(&StatisticSet, &str) -> Option<f64>,
    ) -> NetResult<TestTable> {
        let groups = Groups::resolve(set, variable)?;
        let labels = self.labels(set)?;

        let mut rows = Vec::with_capacity(labels.len());
        for label in &labels {
            let mut x = Vec::new();
            let mut y = Vec::new();
            for (subject, group) in set.subjects().iter().zip(&groups.membership) {
                let (Some(group), Some(v)) = (group, value(subject, label)) else {
                    continue;
                };
                if !v.is_finite() {
                    continue;
                }
                if *group == 0 {
                    x.push(v);
                } else {
                    y.push(v);
                }
            }
            require(label, x.len().min(y.len()))?;
            let outcome = self.two_sample(&x, &y)?;
            debug!(label = %label, n1 = x.len(), n2 = y.len(), p = outcome.p_value, "group test");
            rows.push(row(label, outcome, x.len(), Some(y.len())));
        }
        Ok(self.finish(kind, Some(groups.grouping), rows))
    }

    fn two_sample(&self, x: &[f64], y: &[f64]) -> NetResult<TestOutcome> {
        match self.config.method {
            TestMethod::Parametric if self.config.equal_variance => student_t(x, y),
            TestMethod::Parametric => welch_t(x, y),
            TestMethod::RankBased => rank_sum(x, y),
        }
    }

    /// Labels to test, after enforcing the label policy.
    fn labels(&self, set: &SampleStatisticSet) -> NetResult<Vec<String>> {
        let labels = set.labels();
        if self.config.label_policy == LabelPolicy::Identical {
            let reference: HashSet<&str> = set.subjects()[0].labels().collect();
            for subject in set.subjects() {
                let own: HashSet<&str> = subject.labels().collect();
                let stray = own
                    .symmetric_difference(&reference)
                    .copied()
                    .min()
                    .map(str::to_string);
                if let Some(label) = stray {
                    return Err(NetError::contract(
                        "identical label policy",
                        format!("subject '{}' disagrees on label '{label}'", subject.name()),
                    ));
                }
            }
        }
        Ok(labels)
    }

    fn finish(&self, kind: TestKind, grouping: Option<Grouping>, mut rows: Vec<TestRow>) -> TestTable {
        let p: Vec<f64> = rows.iter().map(|r| r.p_value).collect();
        for (row, adj) in rows.iter_mut().zip(correction::adjust(&p, self.config.correction)) {
            row.p_adjusted = adj;
        }
        info!(?kind, method = %self.config.method, labels = rows.len(), "test complete");
        TestTable {
            kind,
            method: self.config.method,
            correction: self.config.correction,
            grouping,
            rows,
        }
    }
}

fn row(label: &str, outcome: TestOutcome, n1: usize, n2: Option<usize>) -> TestRow {
    TestRow {
        label: label.to_string(),
        statistic: outcome.statistic,
        df: outcome.df,
        p_value: outcome.p_value,
        p_adjusted: outcome.p_value,
        n1,
        n2,
        estimate: outcome.estimate,
    }
}
