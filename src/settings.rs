//! Player preferences
//!
//! Persisted in LocalStorage, separate from tuning.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Next preset in the Low -> Medium -> High cycle
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Upper bound on segments projected per frame
    pub fn max_draw_distance(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 200,
            QualityPreset::High => 300,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Show speed / distance / time
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            show_hud: true,
        }
    }
}

impl Settings {
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Draw distance after applying the quality cap
    pub fn effective_draw_distance(&self, requested: usize) -> usize {
        requested.min(self.quality.max_draw_distance()).max(1)
    }

    /// Step to the next quality preset and return it
    pub fn cycle_quality(&mut self) -> QualityPreset {
        self.quality = self.quality.next();
        self.quality
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "retro_racer_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
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

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native runs have no storage; always the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_caps_draw_distance() {
        let low = Settings::from_preset(QualityPreset::Low);
        assert_eq!(low.effective_draw_distance(300), 100);
        let high = Settings::from_preset(QualityPreset::High);
        assert_eq!(high.effective_draw_distance(250), 250);
        assert_eq!(high.effective_draw_distance(0), 1);
    }

    #[test]
    fn test_cycle_quality_wraps_and_recaps() {
        let mut settings = Settings::from_preset(QualityPreset::Medium);
        assert_eq!(settings.effective_draw_distance(300), 200);
        assert_eq!(settings.cycle_quality(), QualityPreset::High);
        assert_eq!(settings.effective_draw_distance(300), 300);
        assert_eq!(settings.cycle_quality(), QualityPreset::Low);
        assert_eq!(settings.effective_draw_distance(300), 100);
        assert_eq!(settings.cycle_quality(), QualityPreset::Medium);
    }

    #[test]
    fn test_settings_json_defaults_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "Low" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.show_hud);
    }
}
