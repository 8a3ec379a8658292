//! # netmanip-export
//!
//! Long-format tables of statistic sets and test results, written as CSV
//! or JSON.
//!
//! - [`table`]: [`to_table`] rows with the reserved `"original"` label
//! - [`writer`]: [`write_csv`], [`write_table_csv`], [`write_json`]
//! - [`error`]: [`ExportError`]

pub mod error;
pub mod table;
pub mod writer;

pub use error::{ExportError, ExportResult};
pub use table::{to_table, Cell, SampleRow, StatisticRow, ToTable, ORIGINAL_LABEL};
pub use writer::{write_csv, write_json, write_table_csv, CsvRecord};
