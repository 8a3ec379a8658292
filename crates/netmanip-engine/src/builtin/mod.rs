//! Ready-made procedures registered by
//! [`ProcedureRegistry::with_builtins`](crate::registry::ProcedureRegistry::with_builtins).

pub mod manipulations;
pub mod statistics;

pub use manipulations::{RemoveEachCommunity, RemoveEachNode, ThresholdProportional};
pub use statistics::{Density, GlobalEfficiency, MeanStrength, Modularity, TotalWeight};
