//! Conversion options.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::constants::symbols::{DEFAULT_OFFSET, DEFAULT_ONSET};
use crate::constants::{DEFAULT_MAX_SEPARATION, DEFAULT_MIN_PHRASES};
use crate::error::{Error, Result};
use crate::labels::LabelRules;
use crate::symbols::Sentinels;

/// Everything that controls one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    /// Recording dates whose files are skipped entirely.
    pub ignore_dates: Vec<NaiveDate>,
    /// Ignore list, join groups, and zero handling.
    pub rules: LabelRules,
    /// Minimum distinct phrases for a bout to be kept.
    pub min_phrases: u32,
    /// Largest silent gap (seconds) between phrases of one bout.
    pub max_separation: f64,
    /// Onset/offset characters, or `None` to emit bare strings.
    pub sentinels: Option<Sentinels>,
    /// Fixed syllable list; labels are discovered from the data when unset.
    pub syllables: Option<Vec<i64>>,
    /// Folder enabling Brainard-style features.
    pub brainard_dir: Option<PathBuf>,
    /// Folder enabling Tchernichovski-style features.
    pub tchernichovski_dir: Option<PathBuf>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            ignore_dates: Vec::new(),
            rules: LabelRules::default(),
            min_phrases: DEFAULT_MIN_PHRASES,
            max_separation: DEFAULT_MAX_SEPARATION,
            sentinels: Some(Sentinels {
                onset: DEFAULT_ONSET,
                offset: DEFAULT_OFFSET,
            }),
            syllables: None,
            brainard_dir: None,
            tchernichovski_dir: None,
        }
    }
}

impl ConversionOptions {
    /// Check options that would make the whole run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.min_phrases == 0 {
            return Err(Error::ConfigValidation {
                message: "min_phrases must be at least 1".to_string(),
            });
        }

        if !self.max_separation.is_finite() || self.max_separation < 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_separation must be a non-negative number of seconds, got {}",
                    self.max_separation
                ),
            });
        }

        self.rules.validate()
    }
}
