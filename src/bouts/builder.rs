//! Bout candidate accumulator.

use super::Phrase;
use crate::annotation::Segment;

/// A bout under construction.
///
/// Holds the phrases seen so far and the segments they cover, each tagged
/// with the 1-based position of its phrase within the bout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoutBuilder {
    phrase_labels: Vec<i64>,
    segment_indices: Vec<usize>,
    phrase_indices: Vec<u32>,
    phrase_count: u32,
}

impl BoutBuilder {
    /// Start a bout with its first phrase.
    pub fn start(phrase: &Phrase, segments: &[Segment]) -> Self {
        let mut builder = Self::default();
        builder.push_phrase(phrase, segments);
        builder
    }

    /// Append the next phrase and the segments it covers.
    pub fn push_phrase(&mut self, phrase: &Phrase, segments: &[Segment]) {
        self.phrase_count += 1;
        self.phrase_labels.push(phrase.label);
        for index in phrase.covered_segments(segments) {
            self.segment_indices.push(index);
            self.phrase_indices.push(self.phrase_count);
        }
    }

    /// Number of distinct phrase indices among captured segments.
    ///
    /// Phrases that captured no segment do not count.
    pub fn distinct_phrases(&self) -> usize {
        let mut indices = self.phrase_indices.clone();
        indices.dedup();
        indices.len()
    }

    /// Labels of every phrase appended, in order.
    pub fn phrase_labels(&self) -> &[i64] {
        &self.phrase_labels
    }

    /// Indices (into the file's segments) of captured segments.
    pub fn segment_indices(&self) -> &[usize] {
        &self.segment_indices
    }

    /// 1-based phrase position of each captured segment.
    pub fn phrase_indices(&self) -> &[u32] {
        &self.phrase_indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(label: i64, start: f64, end: f64) -> Segment {
        Segment {
            label,
            abs_start_time: start,
            start_time: start,
            end_time: end,
        }
    }

    fn phrase(label: i64, start: f64, end: f64) -> Phrase {
        Phrase {
            label,
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn test_phrase_indices_increment_per_phrase() {
        let segments = vec![seg(1, 0.0, 0.1), seg(1, 0.2, 0.3), seg(2, 0.4, 0.5)];
        let mut builder = BoutBuilder::start(&phrase(1, 0.0, 0.3), &segments);
        builder.push_phrase(&phrase(2, 0.4, 0.5), &segments);

        assert_eq!(builder.segment_indices(), &[0, 1, 2]);
        assert_eq!(builder.phrase_indices(), &[1, 1, 2]);
        assert_eq!(builder.phrase_labels(), &[1, 2]);
        assert_eq!(builder.distinct_phrases(), 2);
    }

    #[test]
    fn test_empty_phrase_not_counted() {
        let segments = vec![seg(1, 0.0, 0.1)];
        let mut builder = BoutBuilder::start(&phrase(1, 0.0, 0.1), &segments);
        // Zero-length phrase covers nothing.
        builder.push_phrase(&phrase(3, 0.5, 0.5), &segments);

        assert_eq!(builder.phrase_labels().len(), 2);
        assert_eq!(builder.distinct_phrases(), 1);
    }
}
