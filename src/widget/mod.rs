//! Custom widgets for the tagging window

pub mod box_canvas;
pub mod toolbar;
