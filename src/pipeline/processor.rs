//! Single file processing.

use tracing::debug;

use crate::annotation::AnnotatedFile;
use crate::bouts::{
    BoutSegmenter, FileBouts, FileFeatures, PhraseFinder, SourceFile, validate_phrases,
};
use crate::error::Result;
use crate::features::{FeatureSource, checked_file_features};
use crate::labels::{LabelRules, normalize_segments};

/// Collaborators shared by every file of a run.
pub struct FileProcessor<'a> {
    /// Label rules applied before phrase finding.
    pub rules: &'a LabelRules,
    /// Phrase boundary collaborator.
    pub phrase_finder: &'a dyn PhraseFinder,
    /// Brainard-style feature source, if enabled.
    pub brainard: Option<&'a dyn FeatureSource>,
    /// Tchernichovski-style feature source, if enabled.
    pub tchernichovski: Option<&'a dyn FeatureSource>,
    /// Bout state machine.
    pub segmenter: BoutSegmenter<'a>,
}

impl FileProcessor<'_> {
    /// Normalize, phrase, extract features for, and segment one file.
    ///
    /// Any error means the file contributes nothing.
    pub fn process(&self, file: &AnnotatedFile, source: &SourceFile) -> Result<FileBouts> {
        let segments = normalize_segments(file.record.segments(&file.id)?, self.rules);
        debug!(
            "{}: {} of {} segment(s) after label rules",
            file.id,
            segments.len(),
            file.record.len()
        );

        let phrases = self.phrase_finder.find_phrases(&file.id, &segments)?;
        validate_phrases(&file.id, &phrases)?;

        let features = FileFeatures {
            brainard: self
                .brainard
                .map(|s| checked_file_features(s, &file.id, &segments))
                .transpose()?,
            tchernichovski: self
                .tchernichovski
                .map(|s| checked_file_features(s, &file.id, &segments))
                .transpose()?,
        };

        Ok(self
            .segmenter
            .segment_file(source, &segments, &phrases, &features))
    }
}
