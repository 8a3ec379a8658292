//! # netmanip-core
//!
//! Entity model for samples of *registered* networks: graphs that share one
//! fixed node set, so node `i` means the same thing in every subject.
//!
//! ## Crate structure
//!
//! | Module       | Responsibility                                                  |
//! |--------------|-----------------------------------------------------------------|
//! | [`network`]  | [`Network`]: adjacency matrix + node variables                 |
//! | [`sample`]   | [`NetworkSample`]: equally-sized subjects + sample variables   |
//! | [`sets`]     | manipulated sets and the statistic sets computed on them        |
//! | [`variable`] | typed node/sample variable columns                              |
//! | [`args`]     | [`Args`]: argument bag handed to procedures                    |
//! | [`error`]    | [`NetError`]: every failure kind of the workspace              |
//!
//! All entities are value objects: built once by a validating constructor,
//! read through accessors, never mutated.
//!
//! ## Quick start
//!
//! ```rust
//! use netmanip_core::{Network, NetworkSample, Variable, VariableMap};
//! use ndarray::array;
//!
//! let a = Network::new("s1", array![[0., 1.], [1., 0.]]).unwrap();
//! let b = Network::new("s2", array![[0., 2.], [2., 0.]]).unwrap();
//!
//! let mut sample_vars = VariableMap::new();
//! sample_vars.insert("group".into(), Variable::from(vec!["ctrl", "case"]));
//!
//! let sample = NetworkSample::new(vec![a, b], VariableMap::new(), sample_vars).unwrap();
//! assert_eq!(sample.len(), 2);
//! assert_eq!(sample.node_count(), 2);
//! ```

pub mod args;
pub mod error;
pub mod network;
pub mod sample;
pub mod sets;
pub mod variable;

pub use args::Args;
pub use error::{NetError, NetResult};
pub use network::Network;
pub use sample::NetworkSample;
pub use sets::{
    ManipulatedNetworkSet, ManipulatedSampleSet, SampleStatisticSet, StatisticSet, ORIGINAL_LABEL,
};
pub use variable::{VarValue, Variable, VariableMap, RESERVED_SAMPLE_VARS};
