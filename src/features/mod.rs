//! Acoustic feature collaborators.
//!
//! Feature values are computed elsewhere; this module only defines the
//! extractor contract, loads per-file matrices, and checks their shape.

mod matrix;
mod precomputed;
mod source;
mod waveform;

pub use matrix::FeatureMatrix;
pub use precomputed::{PrecomputedFeatureSource, read_feature_table};
pub use source::{
    FeatureExtractor, FeatureKind, FeatureSource, Waveform, checked_file_features,
};
pub use waveform::{WaveformFeatureSource, WaveformLoader};
