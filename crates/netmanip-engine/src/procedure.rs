//! Plugin contracts for user-supplied procedures.
//!
//! Both contracts are one-method traits. Any closure or function with the
//! matching signature implements them through the blanket impls below, so
//! procedures are passed around as values, never looked up by name except
//! through an explicit [`ProcedureRegistry`](crate::registry::ProcedureRegistry).
//!
//! ```rust
//! use netmanip_core::{Args, Network};
//! use netmanip_engine::{ProcedureResult, Statistic};
//!
//! fn total(net: &Network, _args: &Args) -> ProcedureResult<f64> {
//!     Ok(net.total_weight())
//! }
//!
//! let net = Network::from_rows("n", vec![vec![0., 1.], vec![1., 0.]]).unwrap();
//! assert_eq!(total.compute(&net, &Args::new()).unwrap(), 2.0);
//! ```

use netmanip_core::{Args, NetError, Network};
use thiserror::Error;

/// Failure reported by a procedure.
#[derive(Debug, Error)]
pub enum ProcedureError {
    /// The procedure hit a core error, e.g. a missing node variable.
    #[error(transparent)]
    Net(#[from] NetError),

    #[error("{0}")]
    Failed(String),
}

impl ProcedureError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

pub type ProcedureResult<T> = Result<T, ProcedureError>;

/// Output of a manipulation: labelled derived networks, in output order.
pub type Derived = Vec<(String, Network)>;

/// `Network × Args → label → Network`.
///
/// Must return a non-empty list with unique, non-blank labels. Derived
/// networks may have fewer nodes than the input.
pub trait Manipulation: Send + Sync {
    fn manipulate(&self, network: &Network, args: &Args) -> ProcedureResult<Derived>;
}

/// `Network × Args → number`.
///
/// Must return a finite real number.
pub trait Statistic: Send + Sync {
    fn compute(&self, network: &Network, args: &Args) -> ProcedureResult<f64>;
}

impl<F> Manipulation for F
where
    F: Fn(&Network, &Args) -> ProcedureResult<Derived> + Send + Sync,
{
    fn manipulate(&self, network: &Network, args: &Args) -> ProcedureResult<Derived> {
        self(network, args)
    }
}

impl<F> Statistic for F
where
    F: Fn(&Network, &Args) -> ProcedureResult<f64> + Send + Sync,
{
    fn compute(&self, network: &Network, args: &Args) -> ProcedureResult<f64> {
        self(network, args)
    }
}

/// Map a procedure failure onto the workspace error kinds.
///
/// Missing variables and bad arguments keep their kind so callers see the
/// offending name; anything else is a contract violation at `context`.
pub(crate) fn into_net_error(err: ProcedureError, context: &str) -> NetError {
    match err {
        ProcedureError::Net(e @ (NetError::MissingVariable { .. } | NetError::InvalidArgument { .. })) => e,
        ProcedureError::Net(other) => NetError::contract(context, other.to_string()),
        ProcedureError::Failed(msg) => NetError::contract(context, format!("procedure failed: {msg}")),
    }
}
