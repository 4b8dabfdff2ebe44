//! Run-level conversion driver.

use std::collections::BTreeSet;
use std::path::Path;

use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ConversionOptions;
use super::processor::FileProcessor;
use crate::annotation::AnnotationStore;
use crate::bouts::{
    Bout, BoutSegmenter, PhraseFinder, RunLengthPhrases, SourceFile, assign_day_indices,
};
use crate::error::Result;
use crate::features::{FeatureKind, FeatureSource, PrecomputedFeatureSource};
use crate::output::progress::inc_progress;
use crate::symbols::SymbolTable;
use crate::utils::date::file_date;

/// Counters describing one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Files in the annotation store.
    pub files_total: usize,
    /// Files that were segmented successfully.
    pub files_converted: usize,
    /// Files skipped because their date was on the ignore list.
    pub files_skipped: usize,
    /// Files that failed and contributed nothing.
    pub files_failed: usize,
    /// Bouts kept.
    pub bouts_accepted: usize,
    /// Bouts discarded by the minimum-phrase filter.
    pub bouts_rejected: usize,
    /// Phrases whose label had no symbol.
    pub unknown_labels: usize,
    /// Distinct recording days among kept bouts.
    pub days: usize,
}

/// Output of a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Kept bouts in file order, then time order.
    pub bouts: Vec<Bout>,
    /// Symbol table restricted to values used by kept bouts.
    pub symbols: SymbolTable,
    /// Run counters.
    pub summary: ConversionSummary,
}

/// Converts an annotation store into bouts.
///
/// Phrase finding defaults to [`RunLengthPhrases`]. Feature sources are
/// created from the folders named in the options and can be replaced with
/// [`Converter::with_feature_source`].
pub struct Converter {
    options: ConversionOptions,
    phrase_finder: Box<dyn PhraseFinder>,
    brainard: Option<Box<dyn FeatureSource>>,
    tchernichovski: Option<Box<dyn FeatureSource>>,
}

impl Converter {
    /// Create a converter for `options`.
    pub fn new(options: ConversionOptions) -> Self {
        let brainard = folder_source(options.brainard_dir.as_deref(), FeatureKind::Brainard);
        let tchernichovski = folder_source(
            options.tchernichovski_dir.as_deref(),
            FeatureKind::Tchernichovski,
        );

        Self {
            options,
            phrase_finder: Box::new(RunLengthPhrases),
            brainard,
            tchernichovski,
        }
    }

    /// Replace the phrase finder.
    #[must_use]
    pub fn with_phrase_finder(mut self, finder: impl PhraseFinder + 'static) -> Self {
        self.phrase_finder = Box::new(finder);
        self
    }

    /// Install a feature source in the slot matching its kind.
    #[must_use]
    pub fn with_feature_source(mut self, source: impl FeatureSource + 'static) -> Self {
        match source.kind() {
            FeatureKind::Brainard => self.brainard = Some(Box::new(source)),
            FeatureKind::Tchernichovski => self.tchernichovski = Some(Box::new(source)),
        }
        self
    }

    /// Options this converter runs with.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Full symbol table for `store`, before pruning.
    ///
    /// Uses the explicit syllable list when one is configured.
    pub fn symbol_table(&self, store: &AnnotationStore) -> Result<SymbolTable> {
        let options = &self.options;
        match &options.syllables {
            Some(syllables) => SymbolTable::build(
                syllables.iter().copied(),
                &options.rules,
                options.sentinels,
            ),
            None => SymbolTable::discover(store, &options.rules, options.sentinels),
        }
    }

    /// Run the conversion.
    ///
    /// Invalid options or an unbuildable symbol table abort the run. A file
    /// that fails on its own is logged and contributes nothing.
    pub fn convert(
        &self,
        store: &AnnotationStore,
        progress: Option<&ProgressBar>,
    ) -> Result<Conversion> {
        self.options.validate()?;
        let table = self.symbol_table(store)?;
        info!(
            "Symbol table has {} row(s) for {} file(s)",
            table.len(),
            store.len()
        );

        let processor = FileProcessor {
            rules: &self.options.rules,
            phrase_finder: self.phrase_finder.as_ref(),
            brainard: self.brainard.as_deref(),
            tchernichovski: self.tchernichovski.as_deref(),
            segmenter: BoutSegmenter::new(
                &table,
                self.options.max_separation,
                self.options.min_phrases,
            ),
        };

        let mut summary = ConversionSummary {
            files_total: store.len(),
            ..ConversionSummary::default()
        };
        let mut bouts = Vec::new();
        let mut seen = BTreeSet::new();

        for (position, file) in store.iter().enumerate() {
            let result = file_date(&file.id).and_then(|date| {
                if self.options.ignore_dates.contains(&date) {
                    return Ok(None);
                }
                let source = SourceFile {
                    index: position + 1,
                    id: file.id.clone(),
                    date,
                };
                processor.process(file, &source).map(Some)
            });

            match result {
                Ok(Some(file_bouts)) => {
                    debug!(
                        "{}: {} bout(s) kept, {} discarded",
                        file.id,
                        file_bouts.bouts.len(),
                        file_bouts.rejected
                    );
                    summary.files_converted += 1;
                    summary.bouts_rejected += file_bouts.rejected;
                    summary.unknown_labels += file_bouts.unknown_labels;
                    seen.extend(file_bouts.seen);
                    bouts.extend(file_bouts.bouts);
                }
                Ok(None) => {
                    debug!("{}: skipped, date is ignored", file.id);
                    summary.files_skipped += 1;
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", file.id);
                    summary.files_failed += 1;
                }
            }

            inc_progress(progress);
        }

        summary.days = assign_day_indices(&mut bouts);
        summary.bouts_accepted = bouts.len();
        let symbols = table.prune(&seen);

        info!(
            "{} bout(s) over {} day(s); {} file(s) failed, {} skipped",
            summary.bouts_accepted, summary.days, summary.files_failed, summary.files_skipped
        );

        Ok(Conversion {
            bouts,
            symbols,
            summary,
        })
    }
}

/// Convert `store` with default collaborators and no progress reporting.
pub fn convert(store: &AnnotationStore, options: ConversionOptions) -> Result<Conversion> {
    Converter::new(options).convert(store, None)
}

fn folder_source(folder: Option<&Path>, kind: FeatureKind) -> Option<Box<dyn FeatureSource>> {
    let folder = folder?;
    if !folder.is_dir() {
        warn!(
            "{kind} feature folder {} not found; {kind} features disabled",
            folder.display()
        );
        return None;
    }
    Some(Box::new(PrecomputedFeatureSource::new(folder, kind)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::annotation::{Segment, SegmentRecord};
    use crate::constants::symbols::{OFFSET_VALUE, ONSET_VALUE};
    use crate::error::Error;
    use crate::features::FeatureMatrix;

    fn record(segments: &[(i64, f64, f64)]) -> SegmentRecord {
        let segments: Vec<Segment> = segments
            .iter()
            .map(|&(label, start, end)| Segment {
                label,
                abs_start_time: start,
                start_time: start,
                end_time: end,
            })
            .collect();
        SegmentRecord::from_segments(&segments)
    }

    fn store() -> AnnotationStore {
        let mut store = AnnotationStore::new();
        store.push(
            "bird_20200501_0700.wav",
            record(&[(1, 0.0, 0.1), (1, 0.2, 0.3), (2, 0.4, 0.5)]),
        );
        store.push("bird_20200503_0700.wav", record(&[(3, 0.0, 0.1)]));
        store
    }

    #[test]
    fn test_convert_assigns_day_indices_and_file_indices() {
        let conversion = convert(&store(), ConversionOptions::default()).unwrap();
        assert_eq!(conversion.bouts.len(), 2);
        assert_eq!(conversion.bouts[0].file_index, 1);
        assert_eq!(conversion.bouts[1].file_index, 2);
        assert_eq!(conversion.bouts[0].day_index, 1);
        assert_eq!(conversion.bouts[1].day_index, 2);
        assert_eq!(conversion.summary.days, 2);
    }

    #[test]
    fn test_pruned_table_matches_kept_bouts() {
        let options = ConversionOptions {
            min_phrases: 2,
            ..ConversionOptions::default()
        };
        let conversion = convert(&store(), options).unwrap();
        let values: Vec<i64> = conversion.symbols.entries().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![ONSET_VALUE, OFFSET_VALUE, 1, 2]);
        assert_eq!(conversion.summary.bouts_rejected, 1);
    }

    #[test]
    fn test_ignored_date_skips_file() {
        let options = ConversionOptions {
            ignore_dates: vec![chrono::NaiveDate::from_ymd_opt(2020, 5, 1).unwrap()],
            ..ConversionOptions::default()
        };
        let conversion = convert(&store(), options).unwrap();
        assert_eq!(conversion.bouts.len(), 1);
        assert_eq!(conversion.bouts[0].file_index, 2);
        assert_eq!(conversion.bouts[0].day_index, 1);
        assert_eq!(conversion.summary.files_skipped, 1);
    }

    #[test]
    fn test_file_without_date_fails_alone() {
        let mut store = store();
        store.push("nodate.wav", record(&[(1, 0.0, 0.1)]));
        let conversion = convert(&store, ConversionOptions::default()).unwrap();
        assert_eq!(conversion.summary.files_failed, 1);
        assert_eq!(conversion.bouts.len(), 2);
    }

    #[test]
    fn test_bad_rules_abort_run() {
        let options = ConversionOptions {
            rules: crate::labels::LabelRules {
                ignore: vec![1],
                joins: vec![vec![1, 2]],
                include_zero: false,
            },
            ..ConversionOptions::default()
        };
        assert!(matches!(
            convert(&store(), options),
            Err(Error::OverlappingLabelGroups { .. })
        ));
    }

    struct WrongShape;

    impl FeatureSource for WrongShape {
        fn kind(&self) -> FeatureKind {
            FeatureKind::Brainard
        }

        fn file_features(&self, _file_id: &str, _segments: &[Segment]) -> Result<FeatureMatrix> {
            Ok(FeatureMatrix::zeros(1, 1))
        }
    }

    #[test]
    fn test_feature_shape_mismatch_fails_file() {
        let conversion = Converter::new(ConversionOptions::default())
            .with_feature_source(WrongShape)
            .convert(&store(), None)
            .unwrap();
        assert!(conversion.bouts.is_empty());
        assert_eq!(conversion.summary.files_failed, 2);
        assert!(conversion.symbols.is_empty());
    }

    #[test]
    fn test_missing_feature_folder_disables_source() {
        let options = ConversionOptions {
            brainard_dir: Some("/nonexistent/songbouts/brainard".into()),
            ..ConversionOptions::default()
        };
        let conversion = convert(&store(), options).unwrap();
        assert_eq!(conversion.bouts.len(), 2);
        assert!(conversion.bouts[0].brainard.is_none());
    }
}
