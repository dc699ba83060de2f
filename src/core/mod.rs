//! Core application module
//!
//! This module contains the Cosmic Application implementation and its
//! entry point.

pub mod app;
