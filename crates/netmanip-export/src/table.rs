//! Long-format rows for plotting and loading collaborators.
//!
//! | Input                  | Rows                                    | Count                 |
//! |------------------------|-----------------------------------------|-----------------------|
//! | `StatisticSet`         | `original` row, then one per label      | labels + 1            |
//! | `SampleStatisticSet`   | one per (subject, label)                | Σ labels per subject  |

use std::collections::BTreeMap;
use std::fmt;

pub use netmanip_core::ORIGINAL_LABEL;
use netmanip_core::{SampleStatisticSet, StatisticSet, VarValue};
use serde::Serialize;

/// A typed sample-variable cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<VarValue> for Cell {
    fn from(v: VarValue) -> Self {
        match v {
            VarValue::Number(x) => Self::Number(x),
            VarValue::Text(s) => Self::Text(s),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) if x.is_nan() => f.write_str("NA"),
            Self::Number(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticRow {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub subject: String,
    pub label: String,
    pub value: f64,
    pub original: f64,
    /// Sample variables of the subject, by name.
    #[serde(flatten)]
    pub vars: BTreeMap<String, Cell>,
}

/// Conversion of a statistic set into long-format rows.
pub trait ToTable {
    type Row;

    fn to_table(&self) -> Vec<Self::Row>;
}

impl ToTable for StatisticSet {
    type Row = StatisticRow;

    fn to_table(&self) -> Vec<StatisticRow> {
        let mut rows = Vec::with_capacity(self.len() + 1);
        rows.push(StatisticRow {
            label: ORIGINAL_LABEL.to_string(),
            value: self.original(),
        });
        rows.extend(self.iter().map(|(label, value)| StatisticRow {
            label: label.to_string(),
            value,
        }));
        rows
    }
}

impl ToTable for SampleStatisticSet {
    type Row = SampleRow;

    fn to_table(&self) -> Vec<SampleRow> {
        let mut rows = Vec::new();
        for (idx, set) in self.subjects().iter().enumerate() {
            let vars: BTreeMap<String, Cell> = self
                .sample_vars()
                .iter()
                .filter_map(|(name, var)| var.get(idx).map(|v| (name.clone(), Cell::from(v))))
                .collect();
            for (label, value) in set.iter() {
                rows.push(SampleRow {
                    subject: set.name().to_string(),
                    label: label.to_string(),
                    value,
                    original: set.original(),
                    vars: vars.clone(),
                });
            }
        }
        rows
    }
}

/// Rows of `set`.
pub fn to_table<T: ToTable + ?Sized>(set: &T) -> Vec<T::Row> {
    set.to_table()
}
