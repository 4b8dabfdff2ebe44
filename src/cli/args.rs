//! CLI argument definitions.

use super::validators::{
    JoinGroup, parse_date_arg, parse_join_group, parse_seconds, parse_symbol,
};
use crate::config::{ConversionConfig, OutputFormat};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Convert bird song annotations into symbolic bout sequences.
#[derive(Debug, Parser)]
#[command(name = "songbouts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "SONGBOUTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors; hide progress.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Segment annotations into bouts and write them out.
    Convert(ConvertArgs),
    /// Print the symbol table that a conversion would start from.
    Symbols(SymbolsArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Label and symbol options shared by `convert` and `symbols`.
#[derive(Debug, Clone, Default, Args)]
pub struct RuleArgs {
    /// Labels to drop (comma-separated).
    #[arg(long = "ignore", value_delimiter = ',', allow_negative_numbers = true)]
    pub ignore_entries: Vec<i64>,

    /// Labels to merge into the first one, e.g. `--join 5,6,7` (repeatable).
    #[arg(long = "join", value_parser = parse_join_group)]
    pub join_entries: Vec<JoinGroup>,

    /// Treat label 0 as a syllable.
    #[arg(long)]
    pub include_zero: bool,

    /// Exclude label 0 even if the config file includes it.
    #[arg(long, conflicts_with = "include_zero")]
    pub no_include_zero: bool,

    /// Fixed syllable list instead of labels found in the data.
    #[arg(long, value_delimiter = ',', env = "SONGBOUTS_SYLLABLES")]
    pub syllables: Option<Vec<i64>>,

    /// Emit bout strings without onset/offset characters.
    #[arg(long)]
    pub no_sentinels: bool,

    /// Onset character.
    #[arg(long, value_parser = parse_symbol, env = "SONGBOUTS_ONSET")]
    pub onset: Option<char>,

    /// Offset character.
    #[arg(long, value_parser = parse_symbol, env = "SONGBOUTS_OFFSET")]
    pub offset: Option<char>,
}

impl RuleArgs {
    /// Apply these flags on top of configured defaults.
    pub fn apply(&self, conversion: &mut ConversionConfig) {
        if !self.ignore_entries.is_empty() {
            conversion.ignore_entries.clone_from(&self.ignore_entries);
        }
        if !self.join_entries.is_empty() {
            conversion.join_entries = self.join_entries.iter().map(|g| g.0.clone()).collect();
        }
        if self.include_zero {
            conversion.include_zero = true;
        } else if self.no_include_zero {
            conversion.include_zero = false;
        }
        if self.syllables.is_some() {
            conversion.syllables.clone_from(&self.syllables);
        }
        if self.no_sentinels {
            conversion.sentinels = false;
        }
        if let Some(onset) = self.onset {
            conversion.onset_symbol = onset;
        }
        if let Some(offset) = self.offset {
            conversion.offset_symbol = offset;
        }
    }
}

/// Arguments for the convert command.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Annotation store (.json or .csv).
    pub annotations: PathBuf,

    /// Output directory (default: `bouts` next to the annotation store).
    #[arg(short, long, env = "SONGBOUTS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output formats (comma-separated: text,csv,json).
    #[arg(short, long, value_delimiter = ',', env = "SONGBOUTS_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Largest gap in seconds between phrases of one bout.
    #[arg(short = 's', long, value_parser = parse_seconds, env = "SONGBOUTS_MAX_SEPARATION")]
    pub max_separation: Option<f64>,

    /// Minimum distinct phrases per bout.
    #[arg(short = 'm', long, value_parser = clap::value_parser!(u32).range(1..),
          env = "SONGBOUTS_MIN_PHRASES")]
    pub min_phrases: Option<u32>,

    /// Recording days to skip (comma-separated YYYY-MM-DD).
    #[arg(long = "ignore-date", value_delimiter = ',', value_parser = parse_date_arg)]
    pub ignore_dates: Vec<NaiveDate>,

    /// Folder of Brainard feature tables.
    #[arg(long, env = "SONGBOUTS_BRAINARD_DIR")]
    pub brainard_dir: Option<PathBuf>,

    /// Folder of Tchernichovski feature tables.
    #[arg(long, env = "SONGBOUTS_TCHERNICHOVSKI_DIR")]
    pub tchernichovski_dir: Option<PathBuf>,

    /// Label and symbol options.
    #[command(flatten)]
    pub rules: RuleArgs,

    /// Hide the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl ConvertArgs {
    /// Apply these flags on top of configured defaults.
    pub fn apply(&self, conversion: &mut ConversionConfig) {
        if let Some(max_separation) = self.max_separation {
            conversion.max_separation = max_separation;
        }
        if let Some(min_phrases) = self.min_phrases {
            conversion.min_phrases = min_phrases;
        }
        if !self.ignore_dates.is_empty() {
            conversion.ignore_dates.clone_from(&self.ignore_dates);
        }
        if self.brainard_dir.is_some() {
            conversion.brainard_dir.clone_from(&self.brainard_dir);
        }
        if self.tchernichovski_dir.is_some() {
            conversion
                .tchernichovski_dir
                .clone_from(&self.tchernichovski_dir);
        }
        self.rules.apply(conversion);
    }
}

/// Arguments for the symbols command.
#[derive(Debug, Args)]
pub struct SymbolsArgs {
    /// Annotation store (.json or .csv).
    pub annotations: PathBuf,

    /// Label and symbol options.
    #[command(flatten)]
    pub rules: RuleArgs,
}
