//! Decoded image type for the canvas

use std::path::Path;

use image::RgbaImage;

use crate::domain::{ImageInfo, ImageSize};
use crate::error::{Error, Result};

/// Decode a raster file into RGBA pixels.
///
/// Fails without side effects, so callers can keep their current image.
pub fn decode(path: &Path) -> Result<(RgbaImage, ImageSize)> {
    let rgba = image::open(path)
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let size = ImageSize::new(rgba.width(), rgba.height()).ok_or_else(|| Error::EmptyImage {
        path: path.to_path_buf(),
    })?;
    log::debug!(
        "Decoded {}: {}x{} pixels",
        path.display(),
        size.width(),
        size.height()
    );
    Ok((rgba, size))
}

/// A loaded image with a display handle for the canvas
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub size: ImageSize,
    pub handle: cosmic::widget::image::Handle,
}

impl LoadedImage {
    /// Wrap decoded pixels in a display handle
    pub fn new(info: &ImageInfo, rgba: RgbaImage) -> Self {
        let handle = cosmic::widget::image::Handle::from_rgba(
            rgba.width(),
            rgba.height(),
            rgba.into_vec(),
        );
        Self {
            size: info.size,
            handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        RgbaImage::new(100, 50).save(&path).unwrap();

        let (rgba, size) = decode(&path).unwrap();
        assert_eq!((size.width(), size.height()), (100, 50));
        assert_eq!(rgba.dimensions(), (100, 50));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(decode(&path), Err(Error::ImageLoad { .. })));
    }

    #[test]
    fn test_decode_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(decode(&dir.path().join("missing.png")).is_err());
    }
}
