//! Typed variable columns shared by node and sample variables.
//!
//! A node variable has one entry per node; a sample variable has one entry
//! per subject. Numeric `NaN` marks a missing value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NetError, NetResult};

/// One variable column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Variable {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

/// A single cell of a [`Variable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl VarValue {
    /// `true` for a numeric `NaN`.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Number(v) if v.is_nan())
    }
}

impl Variable {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Text(_) => "text",
        }
    }

    /// Cell at `idx`, or `None` when out of range.
    pub fn get(&self, idx: usize) -> Option<VarValue> {
        match self {
            Self::Numeric(v) => v.get(idx).map(|x| VarValue::Number(*x)),
            Self::Text(v) => v.get(idx).map(|s| VarValue::Text(s.clone())),
        }
    }

    /// Keep only the entries at `keep`, in that order.
    pub fn select(&self, keep: &[usize]) -> Self {
        match self {
            Self::Numeric(v) => Self::Numeric(keep.iter().map(|&i| v[i]).collect()),
            Self::Text(v) => Self::Text(keep.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// Cell values rendered as grouping keys; missing cells yield `None`.
    pub fn keys(&self) -> Vec<Option<String>> {
        match self {
            Self::Numeric(v) => v
                .iter()
                .map(|x| if x.is_nan() { None } else { Some(x.to_string()) })
                .collect(),
            Self::Text(v) => v.iter().map(|s| Some(s.clone())).collect(),
        }
    }
}

impl From<Vec<f64>> for Variable {
    fn from(v: Vec<f64>) -> Self {
        Self::Numeric(v)
    }
}

impl From<Vec<String>> for Variable {
    fn from(v: Vec<String>) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<&str>> for Variable {
    fn from(v: Vec<&str>) -> Self {
        Self::Text(v.into_iter().map(str::to_string).collect())
    }
}

/// Name → column, iterated in name order.
pub type VariableMap = BTreeMap<String, Variable>;

/// Typed lookup of a numeric column.
pub fn numeric<'a>(vars: &'a VariableMap, name: &str) -> NetResult<&'a [f64]> {
    match vars.get(name) {
        Some(Variable::Numeric(v)) => Ok(v),
        Some(other) => Err(NetError::contract(
            format!("variable '{name}'"),
            format!("expected numeric, found {}", other.kind()),
        )),
        None => Err(NetError::missing(name)),
    }
}

/// Typed lookup of a text column.
pub fn text<'a>(vars: &'a VariableMap, name: &str) -> NetResult<&'a [String]> {
    match vars.get(name) {
        Some(Variable::Text(v)) => Ok(v),
        Some(other) => Err(NetError::contract(
            format!("variable '{name}'"),
            format!("expected text, found {}", other.kind()),
        )),
        None => Err(NetError::missing(name)),
    }
}

/// Untyped lookup.
pub fn lookup<'a>(vars: &'a VariableMap, name: &str) -> NetResult<&'a Variable> {
    vars.get(name).ok_or_else(|| NetError::missing(name))
}

/// Column names of long-format sample rows; sample variables may not use them.
pub const RESERVED_SAMPLE_VARS: [&str; 4] = ["subject", "label", "value", "original"];

/// Refuse sample variables whose names shadow a long-format column.
pub(crate) fn check_sample_names(vars: &VariableMap, context: &str) -> NetResult<()> {
    match vars.keys().find(|name| RESERVED_SAMPLE_VARS.contains(&name.as_str())) {
        Some(name) => Err(NetError::contract(
            context,
            format!("sample variable name '{name}' is reserved"),
        )),
        None => Ok(()),
    }
}

/// Check every column of `vars` has length `expected`.
pub(crate) fn check_lengths(vars: &VariableMap, expected: usize, owner: &str) -> NetResult<()> {
    for (name, var) in vars {
        if var.len() != expected {
            return Err(NetError::dimension(
                format!("{owner} variable '{name}'"),
                expected,
                var.len(),
            ));
        }
    }
    Ok(())
}
