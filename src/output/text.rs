//! Plain text bout strings, one per line.

use crate::bouts::Bout;
use crate::error::Result;
use crate::output::OutputWriter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes each bout's symbol string on its own line.
pub struct TextWriter {
    writer: BufWriter<File>,
}

impl TextWriter {
    /// Create a new text writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl OutputWriter for TextWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_bout(&mut self, bout: &Bout) -> Result<()> {
        writeln!(self.writer, "{}", bout.symbols)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
