//! Message types for the tagging session
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - CanvasEvent enum for pointer input translated by the canvas widget

use std::path::PathBuf;

// ============================================================================
// Canvas Types
// ============================================================================

/// Pointer input from the box canvas.
///
/// Positions are in image pixel space except where noted; the canvas widget
/// applies the viewport before publishing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// Left button pressed at an image position
    Press(f32, f32),
    /// Pointer moved while the left button is held
    Drag(f32, f32),
    /// Left button released
    Release,
    /// Right-button pan by a widget-space delta
    PanBy(f32, f32),
    /// Wheel step at a widget position
    Zoom { x: f32, y: f32, zoom_in: bool },
    /// Canvas laid out at a new logical size
    Resized(f32, f32),
}

// ============================================================================
// File Types
// ============================================================================

/// Opening images and saving their annotations
#[derive(Debug, Clone)]
pub enum FileMsg {
    /// Show the open dialog
    Open,
    /// Dialog finished; `None` when cancelled
    Picked(Option<PathBuf>),
    /// Write the sidecar of the current image
    Save,
}

// ============================================================================
// Edit Types
// ============================================================================

/// Selection and clipboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMsg {
    /// Delete the selected boxes
    DeleteSelected,
    /// Abort the current drag, or drop the selection when idle
    Cancel,
    SelectAll,
    Copy,
    Cut,
    Paste,
}

// ============================================================================
// View Types
// ============================================================================

/// Viewport commands from the toolbar and keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMsg {
    /// Fit the image to the canvas
    Fit,
    ZoomIn,
    ZoomOut,
}

// ============================================================================
// Main Message Enum
// ============================================================================

/// Messages for tagging session interactions
#[derive(Debug, Clone)]
pub enum Msg {
    /// Pointer input on the canvas
    Canvas(CanvasEvent),
    /// File workflow messages
    File(FileMsg),
    /// Box editing messages
    Edit(EditMsg),
    /// Viewport messages
    View(ViewMsg),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl Msg {
    // File shortcuts
    pub fn open() -> Self {
        Self::File(FileMsg::Open)
    }
    pub fn picked(path: Option<PathBuf>) -> Self {
        Self::File(FileMsg::Picked(path))
    }
    pub fn save() -> Self {
        Self::File(FileMsg::Save)
    }

    // Edit shortcuts
    pub fn delete_selected() -> Self {
        Self::Edit(EditMsg::DeleteSelected)
    }
    pub fn cancel() -> Self {
        Self::Edit(EditMsg::Cancel)
    }
    pub fn select_all() -> Self {
        Self::Edit(EditMsg::SelectAll)
    }
    pub fn copy() -> Self {
        Self::Edit(EditMsg::Copy)
    }
    pub fn cut() -> Self {
        Self::Edit(EditMsg::Cut)
    }
    pub fn paste() -> Self {
        Self::Edit(EditMsg::Paste)
    }

    // View shortcuts
    pub fn fit() -> Self {
        Self::View(ViewMsg::Fit)
    }
    pub fn zoom_in() -> Self {
        Self::View(ViewMsg::ZoomIn)
    }
    pub fn zoom_out() -> Self {
        Self::View(ViewMsg::ZoomOut)
    }
}
