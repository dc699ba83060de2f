//! Image loading module
//!
//! This module contains:
//! - Raster decoding and the canvas image type (image.rs)

pub mod image;
