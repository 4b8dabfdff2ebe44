//! Error types for songbouts.

/// Result type alias for songbouts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for songbouts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Join groups overlap each other or the ignore list.
    #[error("label {label} appears in both {first} and {second}")]
    OverlappingLabelGroups {
        /// The label found in two places.
        label: i64,
        /// Description of the first group containing the label.
        first: String,
        /// Description of the second group containing the label.
        second: String,
    },

    /// More distinct labels than printable symbols.
    #[error("symbol table needs {needed} characters but only {available} are available")]
    SymbolAlphabetExhausted {
        /// Number of entries requiring a character.
        needed: usize,
        /// Size of the symbol alphabet.
        available: usize,
    },

    /// A sentinel character collides with another table character.
    #[error("symbol '{symbol}' is assigned to both {first} and {second}")]
    SymbolCollision {
        /// The duplicated character.
        symbol: char,
        /// First owner of the character.
        first: String,
        /// Second owner of the character.
        second: String,
    },

    /// Annotation store does not exist.
    #[error("annotation file does not exist: {path}")]
    AnnotationNotFound {
        /// Path to the missing annotation file.
        path: std::path::PathBuf,
    },

    /// Annotation store extension is not recognised.
    #[error("unsupported annotation format: {path} (expected .json or .csv)")]
    UnsupportedAnnotationFormat {
        /// Path to the annotation file.
        path: std::path::PathBuf,
    },

    /// Failed to parse the annotation store.
    #[error("failed to parse annotation file '{path}'")]
    AnnotationParse {
        /// Path to the annotation file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A file's segment record is internally inconsistent.
    #[error("malformed segment record for '{file_id}': {message}")]
    MalformedRecord {
        /// File identifier.
        file_id: String,
        /// Description of the inconsistency.
        message: String,
    },

    /// No calendar date could be derived from a file identifier.
    #[error("no recording date found in file name '{file_id}'")]
    FileDateMissing {
        /// File identifier.
        file_id: String,
    },

    /// Invalid date string.
    #[error("invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Offending value.
        value: String,
    },

    /// Phrase data for a file could not be derived.
    #[error("phrase boundaries unavailable for '{file_id}': {reason}")]
    PhraseBoundaries {
        /// File identifier.
        file_id: String,
        /// Description of the failure.
        reason: String,
    },

    /// Feature source returned a matrix of the wrong shape.
    #[error(
        "{source_name} features for '{file_id}' have shape {rows}x{cols}, expected {expected_rows}x{expected_cols}"
    )]
    FeatureShape {
        /// Name of the feature source.
        source_name: &'static str,
        /// File identifier.
        file_id: String,
        /// Rows returned.
        rows: usize,
        /// Columns returned.
        cols: usize,
        /// Rows expected.
        expected_rows: usize,
        /// Columns expected.
        expected_cols: usize,
    },

    /// Failed to read a per-file feature table.
    #[error("failed to read feature input '{path}'")]
    FeatureRead {
        /// Path to the feature input.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Feature extraction failed.
    #[error("feature extraction failed: {reason}")]
    FeatureExtraction {
        /// Description of the failure.
        reason: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write CSV output.
    #[error("failed to write CSV output '{path}'")]
    CsvWrite {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
