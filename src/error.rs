//! Error types for editor operations
//!
//! The engine has no fatal paths: recognized failure conditions degrade to a
//! no-op or clamped input. These types cover the collaborator boundaries
//! where a caller still wants to know what went wrong.

use thiserror::Error;

/// Errors surfaced by editor operations
#[derive(Error, Debug)]
pub enum EditorError {
    /// The bitmap source could not resolve a handle to an image
    #[error("Bitmap unavailable: {0}")]
    BitmapUnavailable(String),

    /// The rasterization collaborator failed to produce a cropped bitmap
    #[error("Rasterization failed: {0}")]
    Rasterization(anyhow::Error),

    /// A source handle was not in a format this implementation understands
    #[error("Unsupported source format: {0}")]
    UnsupportedSource(String),
}

/// Result type alias for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
