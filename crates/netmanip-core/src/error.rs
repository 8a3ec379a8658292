use thiserror::Error;

/// Errors raised by entity construction, the engines and the test layer.
///
/// Every variant carries the label, subject or variable name it concerns.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetError {
    /// A manipulation or statistic procedure returned a value outside its
    /// contract (wrong shape, duplicate labels, non-numeric statistic).
    #[error("contract violation in {context}: {reason}")]
    ContractViolation { context: String, reason: String },

    /// A node-variable, sample-variable or adjacency dimension disagrees
    /// with the dimension it must match.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        got: usize,
    },

    #[error("missing variable: {name}")]
    MissingVariable { name: String },

    /// The grouping variable does not have exactly two distinct values.
    #[error("grouping variable '{variable}' must have exactly 2 distinct values, found {distinct}")]
    GroupConfiguration { variable: String, distinct: usize },

    /// Fewer than two usable values remain for a comparison.
    #[error("insufficient data for label '{label}': {available} usable value(s), need at least 2")]
    InsufficientData { label: String, available: usize },

    #[error("invalid argument '{key}': {reason}")]
    InvalidArgument { key: String, reason: String },

    #[error("unknown procedure: {0}")]
    UnknownProcedure(String),
}

impl NetError {
    pub fn contract(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    pub fn dimension(context: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            got,
        }
    }
}

pub type NetResult<T> = Result<T, NetError>;
