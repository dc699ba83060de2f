//! Metadata of the image being annotated

use std::path::PathBuf;

use super::geometry::ImageSize;

/// A loaded raster file: where it came from and how big it is
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub size: ImageSize,
}

impl ImageInfo {
    pub fn new(path: impl Into<PathBuf>, size: ImageSize) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// File name for display, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
