//! Configuration persistence for image tagger settings

use std::path::PathBuf;

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::iced::Color;
use serde::{Deserialize, Serialize};

use crate::domain::ZoomLimits;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BoxColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl From<BoxColor> for Color {
    fn from(c: BoxColor) -> Self {
        Color::from_rgb(c.r, c.g, c.b)
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, CosmicConfigEntry)]
#[version = 1]
pub struct TaggerConfig {
    /// Outline of committed boxes
    pub box_color: BoxColor,
    /// Outline of selected boxes and the rubber band
    pub selected_color: BoxColor,
    /// Grip square size in logical pixels
    pub handle_size: f32,
    /// Zoom factor per wheel step
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Save the current boxes before opening another image
    pub autosave: bool,
    /// Directory the open dialog starts in
    #[serde(default)]
    pub last_directory: Option<PathBuf>,
}

impl TaggerConfig {
    /// Configuration ID for cosmic-config
    pub const ID: &'static str = "io.github.imagetagger";

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => match Self::get_entry(&config) {
                Ok(entry) => entry,
                Err((errs, entry)) => {
                    log::warn!("Error loading config, using defaults: {:?}", errs);
                    entry
                }
            },
            Err(err) => {
                log::warn!("Could not create config handler: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => {
                if let Err(err) = self.write_entry(&config) {
                    log::error!("Failed to save config: {:?}", err);
                }
            }
            Err(err) => {
                log::error!("Could not create config handler for saving: {:?}", err);
            }
        }
    }

    /// Zoom limits, repaired if the stored values are unusable
    pub fn zoom_limits(&self) -> ZoomLimits {
        let defaults = ZoomLimits::default();
        let step = if self.zoom_step.is_finite() && self.zoom_step > 1.0 {
            self.zoom_step
        } else {
            defaults.step
        };
        let (min, max) = if self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom {
            (self.min_zoom, self.max_zoom)
        } else {
            (defaults.min, defaults.max)
        };
        ZoomLimits { step, min, max }
    }
}

impl Default for TaggerConfig {
    fn default() -> Self {
        let zoom = ZoomLimits::default();
        Self {
            // Red outlines, blue when selected
            box_color: BoxColor::rgb(0.9, 0.1, 0.1),
            selected_color: BoxColor::rgb(0.1, 0.45, 0.95),
            handle_size: 8.0,
            zoom_step: zoom.step,
            min_zoom: zoom.min,
            max_zoom: zoom.max,
            autosave: true,
            last_directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zoom_limits() {
        assert_eq!(TaggerConfig::default().zoom_limits(), ZoomLimits::default());
    }

    #[test]
    fn test_bad_zoom_values_fall_back() {
        let config = TaggerConfig {
            zoom_step: 0.5,
            min_zoom: 4.0,
            max_zoom: 2.0,
            ..TaggerConfig::default()
        };
        assert_eq!(config.zoom_limits(), ZoomLimits::default());

        let config = TaggerConfig {
            zoom_step: 1.25,
            min_zoom: 0.5,
            max_zoom: 8.0,
            ..TaggerConfig::default()
        };
        let limits = config.zoom_limits();
        assert_eq!((limits.step, limits.min, limits.max), (1.25, 0.5, 8.0));
    }
}
