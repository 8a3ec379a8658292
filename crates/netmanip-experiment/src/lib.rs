//! # netmanip-experiment
//!
//! Synthetic two-group experiment for the manipulation → statistic → test
//! chain.
//!
//! Group `B` subjects have a weaker hub node than group `A`, so removing the
//! hub (label `"1"` of `remove_each_node`) changes a weight-based statistic
//! differently in the two groups and `group_diff_test` should flag it.

pub mod synthetic;

pub use synthetic::{synthetic_sample, SyntheticConfig};
