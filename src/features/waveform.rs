//! Waveform-backed feature source.
//!
//! Audio decoding stays with the caller: a [`WaveformLoader`] supplies each
//! file's samples and an injected [`FeatureExtractor`] turns them into a
//! feature matrix.

use super::{FeatureExtractor, FeatureKind, FeatureMatrix, FeatureSource, Waveform};
use crate::annotation::Segment;
use crate::error::Result;

/// Supplies the waveform for a file identifier.
///
/// Implemented for any `Fn(&str) -> Result<Waveform>`.
pub trait WaveformLoader {
    /// Load the waveform for `file_id`.
    fn load(&self, file_id: &str) -> Result<Waveform>;
}

impl<F> WaveformLoader for F
where
    F: Fn(&str) -> Result<Waveform>,
{
    fn load(&self, file_id: &str) -> Result<Waveform> {
        self(file_id)
    }
}

/// Feature source pairing a waveform loader with an extractor.
pub struct WaveformFeatureSource<L, E> {
    loader: L,
    extractor: E,
}

impl<L: WaveformLoader, E: FeatureExtractor> WaveformFeatureSource<L, E> {
    /// Create a source from a loader and an extractor.
    pub fn new(loader: L, extractor: E) -> Self {
        Self { loader, extractor }
    }
}

impl<L: WaveformLoader, E: FeatureExtractor> FeatureSource for WaveformFeatureSource<L, E> {
    fn kind(&self) -> FeatureKind {
        self.extractor.kind()
    }

    fn file_features(&self, file_id: &str, segments: &[Segment]) -> Result<FeatureMatrix> {
        let waveform = self.loader.load(file_id)?;
        self.extractor.extract(&waveform, segments)
    }
}
