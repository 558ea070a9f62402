//! Custom error types for imgtransform.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the imgtransform library.
#[derive(Error, Debug)]
pub enum Error {
    /// The source image is missing, unreadable, or not a decodable image.
    #[error("failed to decode image from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image file.
    #[error("failed to save image to {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pixel buffer and array shapes disagree.
    #[error("pixel shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

/// Result type alias for imgtransform operations.
pub type Result<T> = std::result::Result<T, Error>;
