//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "songbouts";

/// Default maximum silent gap (seconds) between phrases of one bout.
pub const DEFAULT_MAX_SEPARATION: f64 = 0.5;

/// Default minimum number of distinct phrases for a bout to be kept.
pub const DEFAULT_MIN_PHRASES: u32 = 1;

/// Symbol table constants.
pub mod symbols {
    /// Ordered alphabet from which label characters are drawn positionally.
    pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

    /// Reserved label value standing for song onset.
    pub const ONSET_VALUE: i64 = -1_000_000_000;

    /// Reserved label value standing for song offset.
    pub const OFFSET_VALUE: i64 = 1_000_000_000;

    /// Default onset sentinel character.
    pub const DEFAULT_ONSET: char = '<';

    /// Default offset sentinel character.
    pub const DEFAULT_OFFSET: char = '>';

    /// Character emitted for a label missing from the symbol table.
    pub const UNKNOWN_SYMBOL: char = '?';
}

/// Acoustic feature layouts.
pub mod features {
    /// Brainard-style syllable features, in matrix row order.
    pub const BRAINARD_NAMES: [&str; 7] = [
        "duration",
        "fundamental_frequency",
        "amplitude",
        "spectral_entropy",
        "temporal_entropy",
        "spectro_temporal_entropy",
        "mean_frequency",
    ];

    /// Tchernichovski-style (SAP) syllable features, in matrix row order.
    pub const TCHERNICHOVSKI_NAMES: [&str; 16] = [
        "duration",
        "mean_amplitude",
        "mean_pitch",
        "mean_fm",
        "mean_am",
        "mean_entropy",
        "mean_pitch_goodness",
        "mean_frequency",
        "var_amplitude",
        "var_pitch",
        "var_fm",
        "var_am",
        "var_entropy",
        "var_pitch_goodness",
        "var_frequency",
        "max_pitch_goodness",
    ];

    /// Extension of precomputed per-file feature tables.
    pub const TABLE_EXTENSION: &str = "csv";
}

/// Output file names.
pub mod output_files {
    /// One bout string per line.
    pub const TEXT: &str = "bouts.txt";
    /// Bout table.
    pub const CSV: &str = "bouts.csv";
    /// Full JSON document.
    pub const JSON: &str = "bouts.json";
    /// Pruned symbol table.
    pub const SYMBOLS: &str = "symbols.csv";
    /// Prefix of per-segment feature tables (`features_<kind>.csv`).
    pub const FEATURES_PREFIX: &str = "features_";
    /// Default output directory.
    pub const DEFAULT_OUTPUT_DIR: &str = "bouts";
}

/// Separator for per-segment arrays inside a single CSV cell.
pub const ARRAY_SEPARATOR: char = ';';

/// Decimal places for times written to text outputs.
pub const TIME_DECIMAL_PLACES: usize = 4;
