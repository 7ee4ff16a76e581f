//! Error types for fientesia.

/// Result type alias for fientesia operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for fientesia.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Data directory could not be determined.
    #[error("could not determine data directory for this platform")]
    DataDirNotFound,

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

    /// Forecast output has fewer values than the positional contract requires.
    #[error("model output has {actual} values, expected at least {expected}")]
    Shape {
        /// Minimum number of values required.
        expected: usize,
        /// Number of values received.
        actual: usize,
    },

    /// A forecast value is NaN or infinite.
    #[error("non-finite {variable} reading at horizon {horizon}: {value}")]
    NonFiniteReading {
        /// Variable name (temperature, humidity, nh3, co).
        variable: &'static str,
        /// Horizon label (1h, 6h, 24h).
        horizon: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Sequence window has the wrong dimensions.
    #[error("invalid sequence shape: {message}")]
    SequenceShape {
        /// Description of the mismatch.
        message: String,
    },

    /// Failed to read sequence file.
    #[error("failed to read sequence file '{path}'")]
    SequenceRead {
        /// Path to the sequence file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse sequence file.
    #[error("failed to parse sequence file '{path}' (expected an array or an object with 'sequence')")]
    SequenceParse {
        /// Path to the sequence file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read scaler parameters.
    #[error("failed to read scaler file '{path}'")]
    ScalerRead {
        /// Path to the scaler file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse scaler parameters.
    #[error("failed to parse scaler file '{path}'")]
    ScalerParse {
        /// Path to the scaler file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read recorded model output.
    #[error("failed to read model output '{path}'")]
    ModelOutputRead {
        /// Path to the model output file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse recorded model output.
    #[error("failed to parse model output '{path}'")]
    ModelOutputParse {
        /// Path to the model output file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Classifier returned no scores.
    #[error("classifier returned no class scores")]
    EmptyClassification,

    /// Classifier returned a label outside the known catalogue.
    #[error("unknown droppings class '{label}'")]
    UnknownClass {
        /// Unrecognised label.
        label: String,
    },

    /// Failed to read history file.
    #[error("failed to read history file '{path}'")]
    HistoryRead {
        /// Path to the history file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse history file.
    #[error("failed to parse history file '{path}'")]
    HistoryParse {
        /// Path to the history file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write history file.
    #[error("failed to write history file '{path}'")]
    HistoryWrite {
        /// Path to the history file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a JSON document.
    #[error("failed to serialize JSON output")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write CSV output.
    #[error("failed to write CSV output")]
    CsvWrite {
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
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

    /// A tensor dump was requested without scaler parameters.
    #[error("no scaler configured; pass --scaler or set sequence.scaler")]
    NoScaler,

    /// No input files were found.
    #[error("no input files found")]
    NoInputFiles,
}

impl Error {
    /// Short `snake_case` identifier used in machine-readable output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Shape { .. } => "shape_error",
            Self::NonFiniteReading { .. } => "non_finite_reading",
            Self::SequenceShape { .. } => "bad_shape",
            Self::Inference { .. } => "inference_error",
            Self::EmptyClassification | Self::UnknownClass { .. } => "classification_error",
            Self::ConfigValidation { .. } => "validation_error",
            _ => "error",
        }
    }
}
