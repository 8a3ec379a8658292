//! CSV and JSON writers; CSV quoting follows RFC 4180 via the `csv` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use netmanip_core::RESERVED_SAMPLE_VARS;
use netmanip_stats::{TestRow, TestTable};
use serde::Serialize;
use tracing::debug;

use crate::error::ExportResult;
use crate::table::{SampleRow, StatisticRow};

/// A row type with a CSV rendering.
pub trait CsvRecord: Sized {
    /// Header columns for `rows`.
    fn columns(rows: &[Self]) -> Vec<String>;

    /// Field values in `columns` order.
    fn fields(&self, columns: &[String]) -> Vec<String>;
}

fn number(x: f64) -> String {
    if x.is_nan() {
        "NA".to_string()
    } else {
        x.to_string()
    }
}

fn optional<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl CsvRecord for StatisticRow {
    fn columns(_rows: &[Self]) -> Vec<String> {
        vec!["label".into(), "value".into()]
    }

    fn fields(&self, _columns: &[String]) -> Vec<String> {
        vec![self.label.clone(), number(self.value)]
    }
}

impl CsvRecord for SampleRow {
    /// Fixed columns followed by the sample variables of the first row.
    fn columns(rows: &[Self]) -> Vec<String> {
        let mut cols: Vec<String> = RESERVED_SAMPLE_VARS
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(first) = rows.first() {
            cols.extend(first.vars.keys().cloned());
        }
        cols
    }

    fn fields(&self, columns: &[String]) -> Vec<String> {
        let mut out = vec![
            self.subject.clone(),
            self.label.clone(),
            number(self.value),
            number(self.original),
        ];
        out.extend(
            columns
                .iter()
                .skip(RESERVED_SAMPLE_VARS.len())
                .map(|name| optional(self.vars.get(name))),
        );
        out
    }
}

impl CsvRecord for TestRow {
    fn columns(_rows: &[Self]) -> Vec<String> {
        ["label", "statistic", "df", "p_value", "p_adjusted", "n1", "n2", "estimate"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn fields(&self, _columns: &[String]) -> Vec<String> {
        vec![
            self.label.clone(),
            self.statistic.to_string(),
            optional(self.df),
            self.p_value.to_string(),
            self.p_adjusted.to_string(),
            self.n1.to_string(),
            optional(self.n2),
            number(self.estimate),
        ]
    }
}

/// Write `rows` with a header line to `path`.
pub fn write_csv<R: CsvRecord>(path: &Path, rows: &[R]) -> ExportResult<()> {
    let mut w = csv::Writer::from_path(path)?;

    let columns = R::columns(rows);
    w.write_record(&columns)?;
    for r in rows {
        w.write_record(r.fields(&columns))?;
    }

    w.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}

/// Write the rows of a test table.
pub fn write_table_csv(path: &Path, table: &TestTable) -> ExportResult<()> {
    write_csv(path, &table.rows)
}

/// Pretty-printed JSON of any row, row list or table.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ExportResult<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, value)?;
    writeln!(w)?;
    w.flush()?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_separators_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");
        let rows = vec![
            StatisticRow { label: "plain".into(), value: 1.0 },
            StatisticRow { label: "a,b".into(), value: 2.0 },
            StatisticRow { label: "say \"hi\"".into(), value: f64::NAN },
        ];
        write_csv(&path, &rows).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "label,value\nplain,1\n\"a,b\",2\n\"say \"\"hi\"\"\",NA\n"
        );
    }
}
