//! Error types for the QR state engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the QR state engine
#[derive(Error, Debug)]
pub enum Error {
    /// Failure inside the persisted state store backend
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// A stored document could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The renderer backend rejected an update or export
    #[error("Rendering failed: {0}")]
    Render(String),

    /// The host could not report an active tab URL
    #[error("Active tab unavailable: {0}")]
    TabUnavailable(String),

    /// The host clipboard rejected the write
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// The store worker has shut down and can no longer answer requests
    #[error("State store is closed")]
    StoreClosed,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
