//! Error types for image tagging.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the user by the editor and the sidecar format.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The decoded image has no pixels.
    #[error("image {path} is empty")]
    EmptyImage { path: PathBuf },

    /// An operation needs an open image.
    #[error("no image is open")]
    NoImage,

    /// Failed to read an existing sidecar file.
    #[error("failed to read annotations from {path}: {source}")]
    SidecarRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the sidecar file.
    #[error("failed to save annotations to {path}: {source}")]
    SidecarWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sidecar line is not four non-negative numbers.
    #[error("line {line}: {reason}")]
    SidecarParse { line: usize, reason: String },
}

/// Result type alias for image tagging operations.
pub type Result<T> = std::result::Result<T, Error>;
