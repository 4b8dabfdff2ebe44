//! Phrases: runs of consecutive same-label segments.

use crate::annotation::Segment;
use crate::error::{Error, Result};

/// A maximal run of consecutive segments sharing one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phrase {
    /// Label shared by the run.
    pub label: i64,
    /// Start of the first segment.
    pub start_time: f64,
    /// End of the last segment.
    pub end_time: f64,
}

impl Phrase {
    /// Whether a segment's midpoint lies strictly inside this phrase.
    ///
    /// Segments whose midpoint sits exactly on a phrase edge belong to no
    /// phrase.
    pub fn contains(&self, segment: &Segment) -> bool {
        let mid = segment.midpoint();
        mid > self.start_time && mid < self.end_time
    }

    /// Indices of the segments this phrase covers, in segment order.
    pub fn covered_segments<'a>(
        &'a self,
        segments: &'a [Segment],
    ) -> impl Iterator<Item = usize> + 'a {
        segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| self.contains(segment))
            .map(|(i, _)| i)
    }
}

/// Computes phrase boundaries for one file.
pub trait PhraseFinder {
    /// Phrases in temporal order for already-normalized segments.
    fn find_phrases(&self, file_id: &str, segments: &[Segment]) -> Result<Vec<Phrase>>;
}

/// Groups maximal runs of equal consecutive labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthPhrases;

impl PhraseFinder for RunLengthPhrases {
    fn find_phrases(&self, _file_id: &str, segments: &[Segment]) -> Result<Vec<Phrase>> {
        let mut phrases: Vec<Phrase> = Vec::new();
        for segment in segments {
            match phrases.last_mut() {
                Some(phrase) if phrase.label == segment.label => {
                    phrase.end_time = segment.end_time;
                }
                _ => phrases.push(Phrase {
                    label: segment.label,
                    start_time: segment.start_time,
                    end_time: segment.end_time,
                }),
            }
        }
        Ok(phrases)
    }
}

/// Reject phrase lists that are not well-formed intervals in time order.
pub fn validate_phrases(file_id: &str, phrases: &[Phrase]) -> Result<()> {
    for (i, phrase) in phrases.iter().enumerate() {
        if !(phrase.start_time.is_finite() && phrase.end_time.is_finite())
            || phrase.end_time < phrase.start_time
        {
            return Err(Error::PhraseBoundaries {
                file_id: file_id.to_string(),
                reason: format!(
                    "phrase {i} spans {} to {}",
                    phrase.start_time, phrase.end_time
                ),
            });
        }
        if i > 0 && phrase.start_time < phrases[i - 1].start_time {
            return Err(Error::PhraseBoundaries {
                file_id: file_id.to_string(),
                reason: format!("phrase {i} starts before phrase {}", i - 1),
            });
        }
    }
    Ok(())
}
