//! Output format writers.

mod csv;
mod features;
mod json;
pub mod progress;
mod symbols;
mod text;
mod writer;

pub use self::csv::CsvWriter;
pub use features::{bout_features, write_feature_table};
pub use json::{BoutDocument, JsonWriter};
pub use symbols::write_symbol_table;
pub use text::TextWriter;
pub use writer::OutputWriter;

use crate::config::OutputFormat;
use crate::constants::output_files;
use crate::error::{Error, Result};
use crate::features::FeatureKind;
use crate::pipeline::Conversion;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for a bout output format.
pub fn output_file_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => output_files::TEXT,
        OutputFormat::Csv => output_files::CSV,
        OutputFormat::Json => output_files::JSON,
    }
}

/// File name for a per-segment feature table.
pub fn feature_file_name(kind: FeatureKind) -> String {
    format!("{}{kind}.csv", output_files::FEATURES_PREFIX)
}

/// Write every requested format plus `symbols.csv` into `output_dir`.
///
/// A `features_<kind>.csv` table is added for each feature kind carried
/// by at least one bout. Returns the paths written.
pub fn write_conversion(
    conversion: &Conversion,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(formats.len() + 1);
    for &format in formats {
        let path = output_dir.join(output_file_name(format));
        let mut writer: Box<dyn OutputWriter> = match format {
            OutputFormat::Text => Box::new(TextWriter::new(&path)?),
            OutputFormat::Csv => Box::new(CsvWriter::new(&path)?),
            OutputFormat::Json => Box::new(JsonWriter::new(
                &path,
                &conversion.symbols,
                &conversion.summary,
            )),
        };

        writer.write_header()?;
        for bout in &conversion.bouts {
            writer.write_bout(bout)?;
        }
        writer.finalize()?;

        info!("Wrote {} bout(s) to {}", conversion.bouts.len(), path.display());
        written.push(path);
    }

    let symbols_path = output_dir.join(output_files::SYMBOLS);
    write_symbol_table(&symbols_path, &conversion.symbols)?;
    written.push(symbols_path);

    for kind in [FeatureKind::Brainard, FeatureKind::Tchernichovski] {
        if !conversion
            .bouts
            .iter()
            .any(|bout| bout_features(bout, kind).is_some())
        {
            continue;
        }
        let path = output_dir.join(feature_file_name(kind));
        let rows = write_feature_table(&path, &conversion.bouts, kind)?;
        info!("Wrote {rows} {kind} feature row(s) to {}", path.display());
        written.push(path);
    }

    Ok(written)
}
