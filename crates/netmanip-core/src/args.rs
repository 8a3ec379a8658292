//! Argument bag handed to manipulation and statistic procedures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NetError, NetResult};

/// Caller-supplied arguments keyed by name.
///
/// Values are JSON so a bag can be read from a config file or a CLI flag
/// unchanged. Typed getters fail with [`NetError::InvalidArgument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Args(Map<String, Value>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Parse a JSON object, e.g. `{"variable": "community"}`.
    pub fn from_json(src: &str) -> NetResult<Self> {
        match serde_json::from_str::<Value>(src) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(NetError::InvalidArgument {
                key: "<bag>".into(),
                reason: format!("expected a JSON object, got {other}"),
            }),
            Err(e) => Err(NetError::InvalidArgument { key: "<bag>".into(), reason: e.to_string() }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of `self` with every entry of `other` added (other wins).
    pub fn merged(&self, other: &Args) -> Self {
        let mut map = self.0.clone();
        map.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(map)
    }

    fn required(&self, key: &str) -> NetResult<&Value> {
        self.0.get(key).ok_or_else(|| NetError::InvalidArgument {
            key: key.into(),
            reason: "argument is required".into(),
        })
    }

    pub fn str_arg(&self, key: &str) -> NetResult<&str> {
        self.required(key)?.as_str().ok_or_else(|| wrong_type(key, "a string"))
    }

    pub fn f64_arg(&self, key: &str) -> NetResult<f64> {
        self.required(key)?.as_f64().ok_or_else(|| wrong_type(key, "a number"))
    }

    pub fn usize_arg(&self, key: &str) -> NetResult<usize> {
        self.required(key)?
            .as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| wrong_type(key, "a non-negative integer"))
    }

    pub fn f64_list_arg(&self, key: &str) -> NetResult<Vec<f64>> {
        let Value::Array(items) = self.required(key)? else {
            return Err(wrong_type(key, "a list of numbers"));
        };
        items
            .iter()
            .map(|v| v.as_f64().ok_or_else(|| wrong_type(key, "a list of numbers")))
            .collect()
    }

    pub fn optional_str(&self, key: &str) -> NetResult<Option<&str>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.str_arg(key).map(Some),
        }
    }

    pub fn optional_f64(&self, key: &str) -> NetResult<Option<f64>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.f64_arg(key).map(Some),
        }
    }
}

fn wrong_type(key: &str, expected: &str) -> NetError {
    NetError::InvalidArgument {
        key: key.into(),
        reason: format!("expected {expected}"),
    }
}
