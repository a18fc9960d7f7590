//! Errors reported by collaborators.

use thiserror::Error;

/// Errors that can occur while looking something up for the renderer.
///
/// The renderer never surfaces these; a failed lookup leaves the original
/// text in place.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The requested file, repository or resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(String),

    /// A local I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data could not be decoded.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The collaborator is not available.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}
