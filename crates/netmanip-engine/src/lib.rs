//! # netmanip-engine
//!
//! Runs user-supplied manipulation and statistic procedures over networks
//! and samples.
//!
//! ## Crate structure
//!
//! | Module           | Responsibility                                              |
//! |------------------|-------------------------------------------------------------|
//! | [`procedure`]    | [`Manipulation`] / [`Statistic`] contracts                   |
//! | [`manipulation`] | [`apply_manipulation`] and [`ManipulationEngine`]            |
//! | [`statistic`]    | [`apply_statistic`], [`apply_statistic_with`], [`StatisticEngine`] |
//! | [`pipeline`]     | [`Pipeline`], fused per-subject manipulate + measure         |
//! | [`registry`]     | [`ProcedureRegistry`], explicit name → procedure table       |
//! | [`builtin`]      | ready-made procedures                                       |
//! | [`config`]       | [`EngineConfig`] loaded from `NETMANIP_*` env vars           |
//!
//! ## Quick start
//!
//! ```rust
//! use ndarray::array;
//! use netmanip_core::{Args, Network};
//! use netmanip_engine::builtin::{RemoveEachNode, TotalWeight};
//! use netmanip_engine::{apply_manipulation, apply_statistic};
//!
//! let net = Network::new("path", array![
//!     [0., 1., 0., 0.],
//!     [1., 0., 1., 0.],
//!     [0., 1., 0., 1.],
//!     [0., 0., 1., 0.],
//! ]).unwrap();
//!
//! let manip = apply_manipulation(&net, &RemoveEachNode, &Args::new()).unwrap();
//! let stats = apply_statistic(&manip, &TotalWeight, &Args::new())
//!     .unwrap()
//!     .into_statistic_set()
//!     .unwrap();
//!
//! assert_eq!(stats.original(), 6.0);
//! assert_eq!(stats.get("2"), Some(2.0));
//! ```

pub mod builtin;
pub mod config;
pub mod manipulation;
pub mod pipeline;
pub mod procedure;
pub mod registry;
pub mod statistic;

pub use config::EngineConfig;
pub use manipulation::{apply_manipulation, Manipulable, Manipulated, ManipulationEngine};
pub use pipeline::Pipeline;
pub use procedure::{Derived, Manipulation, ProcedureError, ProcedureResult, Statistic};
pub use registry::ProcedureRegistry;
pub use statistic::{
    apply_statistic, apply_statistic_with, Measurable, Measured, StatisticEngine, SubjectContext,
};
