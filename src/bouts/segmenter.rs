//! Gap-threshold bout segmentation.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::{Bout, BoutBuilder, FileFeatures, Phrase, SourceFile};
use crate::annotation::Segment;
use crate::constants::symbols::{OFFSET_VALUE, ONSET_VALUE};
use crate::symbols::SymbolTable;

/// Bouts and bookkeeping produced by one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileBouts {
    /// Accepted bouts in time order.
    pub bouts: Vec<Bout>,
    /// Label values (and sentinel values) occurring in accepted bouts.
    pub seen: BTreeSet<i64>,
    /// Candidates discarded by the minimum-phrase filter.
    pub rejected: usize,
    /// Phrases whose label had no symbol.
    pub unknown_labels: usize,
}

/// Groups a file's phrases into bouts.
///
/// Consecutive phrases stay in one bout while the silence between them is
/// at most `max_separation` seconds. A finished bout is kept only if its
/// segments span at least `min_phrases` distinct phrases.
#[derive(Debug, Clone, Copy)]
pub struct BoutSegmenter<'a> {
    table: &'a SymbolTable,
    max_separation: f64,
    min_phrases: u32,
}

impl<'a> BoutSegmenter<'a> {
    /// Create a segmenter encoding with `table`.
    pub fn new(table: &'a SymbolTable, max_separation: f64, min_phrases: u32) -> Self {
        Self {
            table,
            max_separation,
            min_phrases,
        }
    }

    /// Segment one file.
    ///
    /// `phrases` must be in temporal order and derived from `segments`.
    pub fn segment_file(
        &self,
        source: &SourceFile,
        segments: &[Segment],
        phrases: &[Phrase],
        features: &FileFeatures,
    ) -> FileBouts {
        let mut out = FileBouts::default();
        let mut current: Option<BoutBuilder> = None;
        let mut previous: Option<&Phrase> = None;

        for phrase in phrases {
            if !self.table.contains(phrase.label) {
                warn!(
                    "{}: label {} at {:.3}s has no symbol; bout strings for this file are unreliable",
                    source.id, phrase.label, phrase.start_time
                );
                out.unknown_labels += 1;
            }

            current = match (current.take(), previous) {
                (Some(mut bout), Some(prev))
                    if phrase.start_time - prev.end_time <= self.max_separation =>
                {
                    bout.push_phrase(phrase, segments);
                    Some(bout)
                }
                (finished, _) => {
                    if let Some(bout) = finished {
                        self.flush(&bout, segments, features, source, &mut out);
                    }
                    Some(BoutBuilder::start(phrase, segments))
                }
            };
            previous = Some(phrase);
        }

        if let Some(bout) = current {
            self.flush(&bout, segments, features, source, &mut out);
        }

        out
    }

    fn flush(
        &self,
        builder: &BoutBuilder,
        segments: &[Segment],
        features: &FileFeatures,
        source: &SourceFile,
        out: &mut FileBouts,
    ) {
        let distinct = builder.distinct_phrases();
        if distinct == 0 || distinct < self.min_phrases as usize {
            debug!(
                "{}: discarding bout with {} phrase(s) (minimum {})",
                source.id, distinct, self.min_phrases
            );
            out.rejected += 1;
            return;
        }

        let bout = Bout::align(builder, segments, self.table, features, source);
        debug!(
            "{}: bout {} with {} segment(s) over {} phrase(s)",
            source.id,
            bout.symbols,
            bout.len(),
            distinct
        );

        // Labels of captured segments only, so every kept row shows up in a string.
        out.seen.extend(
            builder
                .segment_indices()
                .iter()
                .map(|&index| segments[index].label),
        );
        if self.table.sentinels().is_some() {
            out.seen.insert(ONSET_VALUE);
            out.seen.insert(OFFSET_VALUE);
        }
        out.bouts.push(bout);
    }
}
