//! Precomputed feature tables.
//!
//! Each annotated file has a headerless CSV table `<folder>/<stem>.csv` with
//! one row per feature (in [`FeatureKind::names`] order) and one column per
//! segment remaining after ignored labels are dropped.

use std::path::{Path, PathBuf};

use super::{FeatureKind, FeatureMatrix, FeatureSource};
use crate::annotation::Segment;
use crate::constants::features::TABLE_EXTENSION;
use crate::error::{Error, Result};

/// Feature source backed by per-file CSV tables.
#[derive(Debug, Clone)]
pub struct PrecomputedFeatureSource {
    folder: PathBuf,
    kind: FeatureKind,
}

impl PrecomputedFeatureSource {
    /// Create a source reading tables of `kind` from `folder`.
    pub fn new(folder: impl Into<PathBuf>, kind: FeatureKind) -> Self {
        Self {
            folder: folder.into(),
            kind,
        }
    }

    /// Table path for a file identifier.
    pub fn table_path(&self, file_id: &str) -> PathBuf {
        let stem = Path::new(file_id).file_stem().map_or_else(
            || std::borrow::Cow::Borrowed(file_id),
            |s| s.to_string_lossy(),
        );
        self.folder.join(format!("{stem}.{TABLE_EXTENSION}"))
    }
}

impl FeatureSource for PrecomputedFeatureSource {
    fn kind(&self) -> FeatureKind {
        self.kind
    }

    fn file_features(&self, file_id: &str, _segments: &[Segment]) -> Result<FeatureMatrix> {
        let path = self.table_path(file_id);
        read_feature_table(&path)
    }
}

/// Read a headerless numeric CSV table into a matrix.
pub fn read_feature_table(path: &Path) -> Result<FeatureMatrix> {
    let read_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::FeatureRead {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| read_error(Box::new(e)))?;

    let mut rows = Vec::new();
    for (line_num, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_error(Box::new(e)))?;
        let row = record
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|_| {
                    read_error(format!("line {}: '{field}' is not a number", line_num + 1).into())
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    FeatureMatrix::from_rows(rows)
}
