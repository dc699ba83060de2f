//! Pure domain types with minimal dependencies
//!
//! This module contains the geometry shared by the editor, the canvas
//! widget and the sidecar format. Types here have no framework
//! dependencies (cosmic, iced, etc.).

pub mod geometry;
pub mod image_info;
pub mod selection;
pub mod viewport;

pub use geometry::*;
pub use image_info::*;
pub use selection::*;
pub use viewport::*;
