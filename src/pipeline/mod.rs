//! Conversion pipeline: per-file processing and the run driver.

mod coordinator;
mod options;
mod processor;

pub use coordinator::{Conversion, ConversionSummary, Converter, convert};
pub use options::ConversionOptions;
pub use processor::FileProcessor;
