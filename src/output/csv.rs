//! CSV bout table writer.

use crate::bouts::Bout;
use crate::constants::{ARRAY_SEPARATOR, TIME_DECIMAL_PLACES};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::path::{Path, PathBuf};

/// One CSV row. Per-segment arrays are joined into a single cell.
#[derive(Debug, Serialize)]
struct BoutRow<'a> {
    file_index: usize,
    file_id: &'a str,
    date: String,
    day_index: u32,
    symbols: &'a str,
    segments: usize,
    durations: String,
    gaps: String,
    phrase_indices: String,
}

/// CSV format output writer.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvWriter {
    /// Create a new CSV writer.
    pub fn new(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path).map_err(|e| Error::CsvWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    fn csv_error(&self, source: csv::Error) -> Error {
        Error::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        // Header comes from the first serialized row.
        Ok(())
    }

    fn write_bout(&mut self, bout: &Bout) -> Result<()> {
        let row = BoutRow {
            file_index: bout.file_index,
            file_id: &bout.file_id,
            date: bout.date.format("%Y-%m-%d").to_string(),
            day_index: bout.day_index,
            symbols: &bout.symbols,
            segments: bout.len(),
            durations: join_times(&bout.durations),
            gaps: join_times(&bout.gaps),
            phrase_indices: join(&bout.phrase_indices),
        };
        self.writer
            .serialize(row)
            .map_err(|e| self.csv_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn join_times(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.TIME_DECIMAL_PLACES$}"))
        .collect::<Vec<_>>()
        .join(&ARRAY_SEPARATOR.to_string())
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&ARRAY_SEPARATOR.to_string())
}
