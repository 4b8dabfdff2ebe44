//! Feature extractor and per-file feature source traits.

use serde::Serialize;

use super::FeatureMatrix;
use crate::annotation::Segment;
use crate::constants::features::{BRAINARD_NAMES, TCHERNICHOVSKI_NAMES};
use crate::error::{Error, Result};

/// The two supported syllable feature layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Brainard-style features (7 rows).
    Brainard,
    /// Tchernichovski-style SAP features (16 rows).
    Tchernichovski,
}

impl FeatureKind {
    /// Feature names in matrix row order.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Self::Brainard => &BRAINARD_NAMES,
            Self::Tchernichovski => &TCHERNICHOVSKI_NAMES,
        }
    }

    /// Number of matrix rows.
    pub fn feature_count(self) -> usize {
        self.names().len()
    }

    /// Short lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brainard => "brainard",
            Self::Tchernichovski => "tchernichovski",
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mono audio samples for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

/// Computes one feature column per segment from a waveform.
pub trait FeatureExtractor {
    /// Layout of the returned matrix.
    fn kind(&self) -> FeatureKind;

    /// Compute a `feature_count x segments.len()` matrix.
    fn extract(&self, waveform: &Waveform, segments: &[Segment]) -> Result<FeatureMatrix>;
}

/// Produces the full feature matrix for one annotated file.
pub trait FeatureSource {
    /// Layout of the returned matrix.
    fn kind(&self) -> FeatureKind;

    /// Compute or load the matrix for `file_id`, one column per segment.
    fn file_features(&self, file_id: &str, segments: &[Segment]) -> Result<FeatureMatrix>;
}

/// Fetch a file's features and verify the matrix shape.
pub fn checked_file_features(
    source: &dyn FeatureSource,
    file_id: &str,
    segments: &[Segment],
) -> Result<FeatureMatrix> {
    let kind = source.kind();
    let matrix = source.file_features(file_id, segments)?;
    if matrix.rows() != kind.feature_count() || matrix.cols() != segments.len() {
        return Err(Error::FeatureShape {
            source_name: kind.as_str(),
            file_id: file_id.to_string(),
            rows: matrix.rows(),
            cols: matrix.cols(),
            expected_rows: kind.feature_count(),
            expected_cols: segments.len(),
        });
    }
    Ok(matrix)
}
