//! Configuration types for linkpeek
//!
//! Defines:
//! - `Settings` - Global application settings (`.linkpeek/config.toml`)
//! - Related sub-sections

use linkpeek_core::DistanceUnits;
use serde::{Deserialize, Serialize};

/// Application settings (.linkpeek/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Behavior settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Whether the account is logged in (enables the watch menu item)
    #[serde(default)]
    pub logged_in: bool,

    /// Send places interaction events for previews opened from the map
    #[serde(default = "default_true")]
    pub places_analytics: bool,

    /// Language code of the default wiki
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            logged_in: false,
            places_analytics: true,
            language: default_language(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Units for the places distance label
    #[serde(default)]
    pub distance_units: DistanceUnits,

    /// Show the summary thumbnail line
    #[serde(default = "default_true")]
    pub show_thumbnails: bool,

    /// Preferred preview dialog width in columns
    #[serde(default = "default_dialog_width")]
    pub dialog_width: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            distance_units: DistanceUnits::default(),
            show_thumbnails: true,
            dialog_width: default_dialog_width(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_dialog_width() -> u16 {
    64
}
