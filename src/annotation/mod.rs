//! Syllable annotation input.
//!
//! An annotation store maps file identifiers to per-file segment records
//! (label plus start/end times for every annotated syllable).

mod loader;
mod types;

pub use loader::{load_annotations, load_csv_annotations, load_json_annotations};
pub use types::{AnnotatedFile, AnnotationStore, Segment, SegmentRecord};
