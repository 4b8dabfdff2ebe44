//! Output writer trait definition.

use crate::bouts::Bout;
use crate::error::Result;

/// Trait for writing bouts.
pub trait OutputWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single bout.
    fn write_bout(&mut self, bout: &Bout) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
