//! Player preferences
//!
//! Persisted in LocalStorage as JSON. Unknown or missing fields fall back to
//! defaults so older saves keep loading.

use serde::{Deserialize, Serialize};

/// LocalStorage key
pub const STORAGE_KEY: &str = "rock_raft_settings";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence music without losing the volume level
    pub muted: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.7,
            muted: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Volume to hand to the audio element
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.music_volume.clamp(0.0, 1.0)
        }
    }

    /// Parse stored JSON, falling back to defaults on garbage
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring stored settings: {}", err);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage, or defaults when nothing is stored
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = local_storage()
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
        match stored {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = local_storage() else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(STORAGE_KEY, &json).is_err() {
                    log::warn!("Settings not saved: storage refused the write");
                }
            }
            Err(err) => log::warn!("Settings not saved: {}", err),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} store on native, using defaults", STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"muted": true}"#);
        assert!(settings.muted);
        assert_eq!(settings.music_volume, Settings::default().music_volume);
        assert!(!settings.show_fps);
    }

    #[test]
    fn test_garbage_json_falls_back_to_default() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_storage_key_is_namespaced() {
        assert_eq!(STORAGE_KEY, "rock_raft_settings");
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            music_volume: 1.5,
            ..Settings::default()
        };
        assert_eq!(settings.effective_music_volume(), 1.0);
        settings.muted = true;
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_serialized_settings_load_back() {
        let settings = Settings {
            music_volume: 0.25,
            muted: true,
            show_fps: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
