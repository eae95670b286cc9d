//! Error types for rendering and export

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing or exporting an artifact
#[derive(Error, Debug)]
pub enum Error {
    /// Non-positive size or module count, or a size too small for the margin
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The encoder produced no module grid
    #[error("QR encoding unavailable: {0}")]
    EncodingUnavailable(String),

    /// The logo could not be loaded or decoded. Never fatal to a generate call.
    #[error("Failed to decode logo: {0}")]
    LogoDecode(String),

    /// Writing the artifact to its destination failed
    #[error("Export failed: {0}")]
    Export(String),

    /// A configuration file could not be read or parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}
