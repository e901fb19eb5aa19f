//! Error types for lrcsync.

use thiserror::Error;

/// Library-level error type for lrcsync operations.
///
/// None of the transcript conditions are fatal. Parsers catch
/// `MalformedTimecode` and degrade the entry, sessions turn
/// `UnresolvedMediaSource` into an inline notice, and the offset mapper
/// turns `OutOfRangeOffset` into a default cursor.
#[derive(Error, Debug)]
pub enum LrcsyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed timecode: {0}")]
    MalformedTimecode(String),

    #[error("Media source not found: {0}")]
    UnresolvedMediaSource(String),

    #[error("Source offset out of range: {0}")]
    OutOfRangeOffset(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for lrcsync operations.
pub type Result<T> = std::result::Result<T, LrcsyncError>;
