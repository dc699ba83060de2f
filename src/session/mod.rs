//! Tagging session management module
//!
//! This module contains:
//! - Box storage and the editor state machine
//! - Message types for canvas, edit, file and view interactions
//! - Message handlers and keyboard shortcuts

pub mod editor;
pub mod handlers;
pub mod messages;
pub mod shortcuts;
pub mod state;
