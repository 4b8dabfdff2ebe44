//! Configuration type definitions.

use crate::constants::symbols::{DEFAULT_OFFSET, DEFAULT_ONSET};
use crate::constants::{DEFAULT_MAX_SEPARATION, DEFAULT_MIN_PHRASES};
use crate::labels::LabelRules;
use crate::pipeline::ConversionOptions;
use crate::symbols::Sentinels;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion defaults.
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Conversion defaults, overridable per run from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Largest gap in seconds between phrases of one bout.
    pub max_separation: f64,

    /// Minimum distinct phrases per bout.
    pub min_phrases: u32,

    /// Keep label 0 as a real syllable.
    pub include_zero: bool,

    /// Labels removed before segmentation.
    pub ignore_entries: Vec<i64>,

    /// Groups of labels merged into their first member.
    pub join_entries: Vec<Vec<i64>>,

    /// Recording days to skip (`YYYY-MM-DD`).
    pub ignore_dates: Vec<NaiveDate>,

    /// Wrap bout strings in onset/offset characters.
    pub sentinels: bool,

    /// Onset character.
    pub onset_symbol: char,

    /// Offset character.
    pub offset_symbol: char,

    /// Fixed syllable list (discovered from data when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syllables: Option<Vec<i64>>,

    /// Brainard feature table folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brainard_dir: Option<PathBuf>,

    /// Tchernichovski feature table folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tchernichovski_dir: Option<PathBuf>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_separation: DEFAULT_MAX_SEPARATION,
            min_phrases: DEFAULT_MIN_PHRASES,
            include_zero: false,
            ignore_entries: Vec::new(),
            join_entries: Vec::new(),
            ignore_dates: Vec::new(),
            sentinels: true,
            onset_symbol: DEFAULT_ONSET,
            offset_symbol: DEFAULT_OFFSET,
            syllables: None,
            brainard_dir: None,
            tchernichovski_dir: None,
        }
    }
}

impl ConversionConfig {
    /// Conversion options described by this section.
    pub fn to_options(&self) -> ConversionOptions {
        ConversionOptions {
            ignore_dates: self.ignore_dates.clone(),
            rules: LabelRules {
                ignore: self.ignore_entries.clone(),
                joins: self.join_entries.clone(),
                include_zero: self.include_zero,
            },
            min_phrases: self.min_phrases,
            max_separation: self.max_separation,
            sentinels: self.sentinels.then_some(Sentinels {
                onset: self.onset_symbol,
                offset: self.offset_symbol,
            }),
            syllables: self.syllables.clone(),
            brainard_dir: self.brainard_dir.clone(),
            tchernichovski_dir: self.tchernichovski_dir.clone(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Bout output formats.
    pub formats: Vec<OutputFormat>,

    /// Output directory (default: `bouts` next to the annotation store).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Text],
            dir: None,
        }
    }
}

/// Supported bout output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One bout string per line.
    Text,
    /// One row per bout with joined arrays.
    Csv,
    /// Full document with symbol table and summary.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
