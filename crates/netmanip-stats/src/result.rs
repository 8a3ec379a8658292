//! Result types of the test procedures.

use serde::Serialize;

use crate::config::{Correction, TestMethod};

/// Outcome of one location test before it becomes a table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    /// t, V (signed-rank) or W (Mann–Whitney).
    pub statistic: f64,
    /// Degrees of freedom; `None` for rank tests.
    pub df: Option<f64>,
    pub p_value: f64,
    /// Mean (difference) for t tests, median (difference) for rank tests.
    pub estimate: f64,
}

/// Which of the three procedures produced a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Difference,
    Group,
    GroupDifference,
}

/// One row per manipulation label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRow {
    pub label: String,
    pub statistic: f64,
    pub df: Option<f64>,
    pub p_value: f64,
    pub p_adjusted: f64,
    /// Usable values in the first (or only) group.
    pub n1: usize,
    /// Usable values in the second group; `None` for the difference test.
    pub n2: Option<usize>,
    pub estimate: f64,
}

/// Ordered result table of one test procedure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestTable {
    pub kind: TestKind,
    pub method: TestMethod,
    pub correction: Correction,
    /// Grouping variable and its two values in comparison order.
    pub grouping: Option<Grouping>,
    pub rows: Vec<TestRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grouping {
    pub variable: String,
    pub levels: [String; 2],
}

impl TestTable {
    pub fn row(&self, label: &str) -> Option<&TestRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Labels whose adjusted p-value is below `alpha`.
    pub fn significant(&self, alpha: f64) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.p_adjusted < alpha)
            .map(|r| r.label.as_str())
            .collect()
    }
}
