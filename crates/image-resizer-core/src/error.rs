use thiserror::Error;

use crate::imaging::BackendError;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the image-resizer library.
///
/// Per-file failures during a run never surface here; they are reported
/// through the activity log instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the image backend
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Background resize worker died before reporting
    #[error("Resize worker failed: {0}")]
    Worker(String),
}
