//! @ai:module:intent Define error types for behavior execution, aggregation and persistence
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all harness operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error(
        "Behavior '{name}': provide either a single label or one label per sample \
         (got {labels} labels for {samples} samples)"
    )]
    InvalidLabelCount {
        name: String,
        labels: usize,
        samples: usize,
    },

    #[error("Behavior '{name}' has already been run")]
    AlreadyRan { name: String },

    #[error("The test pack has already been run")]
    TestPackAlreadyRan,

    #[error("Performer is already fitted")]
    AlreadyFitted,

    #[error("Behavior '{name}' has no prediction function bound")]
    MissingPredictFn { name: String },

    #[error("Prediction function failed for behavior '{name}': {source}")]
    Prediction {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Behavior '{name}': expected {expected} predictions, got {actual}")]
    PredictionCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Output of type 'Span' requires at least 3 elements, got {len} instead")]
    MalformedSpan { len: usize },

    #[error("Expected span prediction to be a tuple or a 'Span', got '{found}'")]
    UnsupportedSpanFormat { found: String },

    #[error("Expected token prediction to be an integer or a 'Token', got '{found}'")]
    UnsupportedTokenFormat { found: String },

    #[error("Unsupported {task} prediction: '{found}'")]
    UnsupportedPrediction { task: String, found: String },

    #[error("Behavior name '{name}' does not yield a usable record file name")]
    InvalidRecordName { name: String },

    #[error("Behaviors {names:?} would all be saved as record '{stem}'")]
    RecordNameClash { stem: String, names: Vec<String> },

    #[error("Behavior(s) {names:?} already present in set")]
    DuplicateBehavior { names: Vec<String> },

    #[error(
        "The number of prediction functions provided ({functions}) differs from \
         the number of behaviors found ({records})"
    )]
    PredictionFunctionCountMismatch { functions: usize, records: usize },

    #[error("Success metric '{metric}' is not defined for {task} outputs")]
    UnsupportedSuccessMetric { metric: String, task: String },
}

pub type Result<T> = std::result::Result<T, Error>;
