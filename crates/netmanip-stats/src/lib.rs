//! # netmanip-stats
//!
//! Hypothesis tests over the statistic sets of a manipulated sample.
//!
//! ## Crate structure
//!
//! | Module         | Responsibility                                                 |
//! |----------------|----------------------------------------------------------------|
//! | [`testing`]    | `diff_test`, `group_test`, `group_diff_test`, [`TestEngine`]   |
//! | [`location`]   | one-sample, Welch and Student t tests (`statrs` Student-t)     |
//! | [`rank`]       | Wilcoxon signed-rank and Mann–Whitney U                        |
//! | [`correction`] | Bonferroni and Benjamini–Hochberg adjustment                   |
//! | [`grouping`]   | two-level split of subjects by a sample variable               |
//! | [`result`]     | [`TestTable`] / [`TestRow`]                                    |
//! | [`config`]     | [`TestConfig`] loaded from `NETMANIP_*` env vars               |
//!
//! ## Usage
//!
//! ```rust
//! use netmanip_core::{SampleStatisticSet, StatisticSet, VariableMap};
//! use netmanip_stats::diff_test;
//!
//! let subjects = (0..4)
//!     .map(|i| {
//!         let base = 10.0 + i as f64;
//!         StatisticSet::new(format!("s{i}"), base, vec![("hub".into(), base - 2.0 - 0.1 * i as f64)])
//!     })
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! let set = SampleStatisticSet::new(subjects, VariableMap::new()).unwrap();
//!
//! let table = diff_test(&set).unwrap();
//! assert!(table.row("hub").unwrap().p_value < 0.05);
//! ```

pub mod config;
pub mod correction;
pub mod grouping;
pub mod location;
pub mod rank;
pub mod result;
pub mod testing;

pub use config::{Correction, LabelPolicy, TestConfig, TestMethod};
pub use grouping::Groups;
pub use result::{Grouping, TestKind, TestOutcome, TestRow, TestTable};
pub use testing::{diff_test, group_diff_test, group_test, TestEngine};
