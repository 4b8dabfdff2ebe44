//! JSON output format writer.

use crate::bouts::Bout;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use crate::pipeline::ConversionSummary;
use crate::symbols::{Sentinels, SymbolEntry, SymbolTable};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON document structure.
#[derive(Debug, Serialize)]
pub struct BoutDocument<'a> {
    /// Onset/offset characters, if enabled.
    pub sentinels: Option<Sentinels>,
    /// Pruned symbol table rows.
    pub symbols: &'a [SymbolEntry],
    /// Run counters.
    pub summary: &'a ConversionSummary,
    /// Kept bouts.
    pub bouts: &'a [Bout],
}

/// Writer for the JSON bout document.
///
/// Bouts are collected and the whole document is written on finalize.
pub struct JsonWriter {
    bouts: Vec<Bout>,
    output_path: PathBuf,
    symbols: SymbolTable,
    summary: ConversionSummary,
}

impl JsonWriter {
    /// Create a new JSON writer.
    pub fn new(path: &Path, symbols: &SymbolTable, summary: &ConversionSummary) -> Self {
        Self {
            bouts: Vec::new(),
            output_path: path.to_path_buf(),
            symbols: symbols.clone(),
            summary: summary.clone(),
        }
    }
}

impl OutputWriter for JsonWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_bout(&mut self, bout: &Bout) -> Result<()> {
        self.bouts.push(bout.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let document = BoutDocument {
            sentinels: self.symbols.sentinels(),
            symbols: self.symbols.entries(),
            summary: &self.summary,
            bouts: &self.bouts,
        };

        let file = File::create(&self.output_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
