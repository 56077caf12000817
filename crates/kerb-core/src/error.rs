//! Error types for kerb

use thiserror::Error;

/// The main error type for kerb operations
#[derive(Debug, Error)]
pub enum KerbError {
    #[error("Corridor not found: {0}")]
    CorridorNotFound(String),

    #[error("Segment not found: {0}")]
    SegmentNotFound(String),

    #[error("Intersection not found: {0}")]
    IntersectionNotFound(String),

    #[error("Duplicate segment id: {0}")]
    DuplicateSegmentId(String),

    #[error("Duplicate corridor name: {0}")]
    DuplicateCorridorName(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid width for '{id}': must be positive, got {value}")]
    InvalidWidth { id: String, value: f32 },

    #[error("Invalid length for '{id}': must be positive, got {value}")]
    InvalidLength { id: String, value: f32 },

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Index {index} out of bounds for corridor with {len} segments")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid content reference: {0}")]
    InvalidContentRef(String),

    #[error("Unknown striping pattern: {0}")]
    UnknownStripingPattern(String),

    #[error("Mismatched array lengths: {left} has {left_len}, {right} has {right_len}")]
    MismatchedArrays {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },

    #[error("Corridor '{0}' is already attached to an intersection")]
    CorridorAlreadyAttached(String),

    #[error("Nothing to detach: {0}")]
    NothingToDetach(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),
}

/// Result type alias for kerb operations
pub type Result<T> = std::result::Result<T, KerbError>;

impl From<toml::de::Error> for KerbError {
    fn from(err: toml::de::Error) -> Self {
        KerbError::TomlParseError(err.to_string())
    }
}

impl From<serde_json::Error> for KerbError {
    fn from(err: serde_json::Error) -> Self {
        KerbError::JsonParseError(err.to_string())
    }
}
