//! Annotation store type definitions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One labeled syllable interval within a file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Syllable label.
    pub label: i64,
    /// Absolute start time in seconds.
    pub abs_start_time: f64,
    /// File-relative start time in seconds.
    pub start_time: f64,
    /// File-relative end time in seconds.
    pub end_time: f64,
}

impl Segment {
    /// Segment duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Midpoint of the segment in seconds.
    pub fn midpoint(&self) -> f64 {
        (self.start_time + self.end_time) / 2.0
    }
}

/// Segment data for one file as four aligned arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Syllable labels.
    pub labels: Vec<i64>,
    /// Absolute start times.
    pub abs_start_times: Vec<f64>,
    /// File-relative start times.
    pub start_times: Vec<f64>,
    /// File-relative end times.
    pub end_times: Vec<f64>,
}

impl SegmentRecord {
    /// Build a record from a list of segments.
    pub fn from_segments(segments: &[Segment]) -> Self {
        Self {
            labels: segments.iter().map(|s| s.label).collect(),
            abs_start_times: segments.iter().map(|s| s.abs_start_time).collect(),
            start_times: segments.iter().map(|s| s.start_time).collect(),
            end_times: segments.iter().map(|s| s.end_time).collect(),
        }
    }

    /// Number of segments, as given by the label array.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the record holds no segments.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append one segment to all four arrays.
    pub fn push(&mut self, segment: Segment) {
        self.labels.push(segment.label);
        self.abs_start_times.push(segment.abs_start_time);
        self.start_times.push(segment.start_time);
        self.end_times.push(segment.end_time);
    }

    /// Convert to segments, checking that the arrays are aligned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if the arrays differ in length or a
    /// segment ends before it starts.
    pub fn segments(&self, file_id: &str) -> Result<Vec<Segment>> {
        let n = self.labels.len();
        if self.abs_start_times.len() != n || self.start_times.len() != n || self.end_times.len() != n
        {
            return Err(Error::MalformedRecord {
                file_id: file_id.to_string(),
                message: format!(
                    "array lengths differ (labels {}, abs_start_times {}, start_times {}, end_times {})",
                    n,
                    self.abs_start_times.len(),
                    self.start_times.len(),
                    self.end_times.len()
                ),
            });
        }

        (0..n)
            .map(|i| {
                let segment = Segment {
                    label: self.labels[i],
                    abs_start_time: self.abs_start_times[i],
                    start_time: self.start_times[i],
                    end_time: self.end_times[i],
                };
                if segment.end_time < segment.start_time {
                    return Err(Error::MalformedRecord {
                        file_id: file_id.to_string(),
                        message: format!(
                            "segment {i} ends ({}) before it starts ({})",
                            segment.end_time, segment.start_time
                        ),
                    });
                }
                Ok(segment)
            })
            .collect()
    }
}

/// A file identifier with its segment record.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedFile {
    /// File identifier (usually the audio file name).
    pub id: String,
    /// Segment data.
    pub record: SegmentRecord,
}

/// Ordered collection of annotated files.
///
/// The order of `files` is the file sequence used for file indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    /// Files in processing order.
    pub files: Vec<AnnotatedFile>,
}

impl AnnotationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file at the end of the sequence.
    pub fn push(&mut self, id: impl Into<String>, record: SegmentRecord) {
        self.files.push(AnnotatedFile {
            id: id.into(),
            record,
        });
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store has no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over files in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, AnnotatedFile> {
        self.files.iter()
    }
}

impl FromIterator<(String, SegmentRecord)> for AnnotationStore {
    fn from_iter<I: IntoIterator<Item = (String, SegmentRecord)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(id, record)| AnnotatedFile { id, record })
                .collect(),
        }
    }
}
