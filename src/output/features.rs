//! Per-segment feature table writer.

use crate::bouts::Bout;
use crate::error::{Error, Result};
use crate::features::{FeatureKind, FeatureMatrix};
use std::path::Path;

/// Feature matrix of `kind` carried by `bout`, if any.
pub fn bout_features(bout: &Bout, kind: FeatureKind) -> Option<&FeatureMatrix> {
    match kind {
        FeatureKind::Brainard => bout.brainard.as_ref(),
        FeatureKind::Tchernichovski => bout.tchernichovski.as_ref(),
    }
}

/// Write one row per bout segment with its `kind` features.
///
/// Columns are `bout,file_index,file_id,segment` followed by the feature
/// names in matrix row order. `bout` and `segment` are 1-based. Bouts
/// without a matrix of this kind are skipped. Returns the number of rows.
pub fn write_feature_table(path: &Path, bouts: &[Bout], kind: FeatureKind) -> Result<usize> {
    let csv_error = |source| Error::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    let mut header = vec!["bout", "file_index", "file_id", "segment"];
    header.extend_from_slice(kind.names());
    writer.write_record(&header).map_err(csv_error)?;

    let mut rows = 0;
    for (bout_number, bout) in bouts.iter().enumerate() {
        let Some(matrix) = bout_features(bout, kind) else {
            continue;
        };
        for col in 0..matrix.cols() {
            let mut record = vec![
                (bout_number + 1).to_string(),
                bout.file_index.to_string(),
                bout.file_id.clone(),
                (col + 1).to_string(),
            ];
            record.extend(
                (0..matrix.rows()).map(|row| matrix.get(row, col).unwrap_or(f64::NAN).to_string()),
            );
            writer.write_record(&record).map_err(csv_error)?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}
