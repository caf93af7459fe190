//! Puzzle tuning settings
//!
//! Read from a JSON file natively and from LocalStorage in the browser.
//! Missing fields fall back to the compiled-in constants.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gauge gained per second while every target is lit
    pub gauge_fill_rate: f64,
    /// Gauge lost per second while a target is dark
    pub gauge_decay_rate: f64,
    /// Seconds between a clear and the next level
    pub clear_delay: f64,
    /// Max cell interactions per beam per pass
    pub interaction_budget: u32,
    /// Start from the first level again after the last one
    pub loop_levels: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gauge_fill_rate: GAUGE_FILL_RATE,
            gauge_decay_rate: GAUGE_DECAY_RATE,
            clear_delay: CLEAR_DELAY,
            interaction_budget: INTERACTION_BUDGET,
            loop_levels: false,
        }
    }
}

impl Settings {
    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Serialized form used for storage
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self)
            .inspect_err(|e| log::warn!("Failed to serialize settings: {e}"))
            .ok()
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "beam_puzzle_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Load settings from a JSON file, defaults if it can't be read
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "gauge_fill_rate": 2.0 }"#);
        assert_eq!(settings.gauge_fill_rate, 2.0);
        assert_eq!(settings.gauge_decay_rate, GAUGE_DECAY_RATE);
        assert_eq!(settings.interaction_budget, INTERACTION_BUDGET);
    }

    #[test]
    fn test_stored_form_reloads() {
        let settings = Settings {
            loop_levels: true,
            clear_delay: 0.5,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("[1, 2"), Settings::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(std::path::Path::new("/nonexistent/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
