//! Device-class presets and player preferences
//!
//! Preferences are persisted as JSON in LocalStorage on the web.

use serde::{Deserialize, Serialize};

/// Speed preset chosen once per match from the viewport size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DevicePreset {
    /// Small (phone-sized) viewport
    Compact,
    #[default]
    Standard,
}

impl DevicePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevicePreset::Compact => "Compact",
            DevicePreset::Standard => "Standard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" | "mobile" => Some(DevicePreset::Compact),
            "standard" | "desktop" => Some(DevicePreset::Standard),
            _ => None,
        }
    }

    /// Preset for a viewport width in CSS pixels
    pub fn for_viewport(width: f64, compact_breakpoint_px: u32) -> Self {
        if width <= compact_breakpoint_px as f64 {
            DevicePreset::Compact
        } else {
            DevicePreset::Standard
        }
    }

    /// Vertical (and initial horizontal) speed at match start
    pub fn initial_speed_y(&self) -> f32 {
        match self {
            DevicePreset::Compact => -2.0,
            DevicePreset::Standard => -1.0,
        }
    }

    /// Opponent paddle step per frame
    pub fn ai_speed(&self) -> f32 {
        match self {
            DevicePreset::Compact => 3.0,
            DevicePreset::Standard => 3.0,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Force a preset instead of detecting it from the viewport
    #[serde(default)]
    pub preset_override: Option<DevicePreset>,
    /// Viewports at or below this width use the compact preset
    pub compact_breakpoint_px: u32,
    /// Hide the cursor over the playfield once the paddle is being steered
    pub hide_cursor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset_override: None,
            compact_breakpoint_px: 600,
            hide_cursor: true,
        }
    }
}

impl Settings {
    /// Preset to use for the next match
    pub fn resolve_preset(&self, viewport_width: f64) -> DevicePreset {
        self.preset_override
            .unwrap_or_else(|| DevicePreset::for_viewport(viewport_width, self.compact_breakpoint_px))
    }

    /// Media query matching the compact breakpoint
    pub fn compact_media_query(&self) -> String {
        format!("(max-width: {}px)", self.compact_breakpoint_px)
    }

    /// Cycle Auto -> Compact -> Standard -> Auto
    pub fn cycle_preset_override(&mut self) -> Option<DevicePreset> {
        self.preset_override = match self.preset_override {
            None => Some(DevicePreset::Compact),
            Some(DevicePreset::Compact) => Some(DevicePreset::Standard),
            Some(DevicePreset::Standard) => None,
        };
        self.preset_override
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "duel_pong_settings";

    /// Parse stored settings, falling back to defaults on bad data
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

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

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("Settings key {} is browser-only, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        assert_eq!(DevicePreset::Compact.initial_speed_y(), -2.0);
        assert_eq!(DevicePreset::Compact.ai_speed(), 3.0);
        assert_eq!(DevicePreset::Standard.initial_speed_y(), -1.0);
        assert_eq!(DevicePreset::Standard.ai_speed(), 3.0);
    }

    #[test]
    fn test_viewport_breakpoint() {
        assert_eq!(DevicePreset::for_viewport(375.0, 600), DevicePreset::Compact);
        assert_eq!(DevicePreset::for_viewport(600.0, 600), DevicePreset::Compact);
        assert_eq!(DevicePreset::for_viewport(1280.0, 600), DevicePreset::Standard);
    }

    #[test]
    fn test_override_wins() {
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_preset(320.0), DevicePreset::Compact);

        settings.preset_override = Some(DevicePreset::Standard);
        assert_eq!(settings.resolve_preset(320.0), DevicePreset::Standard);
    }

    #[test]
    fn test_cycle_override() {
        let mut settings = Settings::default();
        assert_eq!(settings.cycle_preset_override(), Some(DevicePreset::Compact));
        assert_eq!(settings.cycle_preset_override(), Some(DevicePreset::Standard));
        assert_eq!(settings.cycle_preset_override(), None);
    }

    #[test]
    fn test_json_roundtrip_and_fallback() {
        let mut settings = Settings::default();
        settings.preset_override = Some(DevicePreset::Compact);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);

        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(DevicePreset::from_str("Mobile"), Some(DevicePreset::Compact));
        assert_eq!(DevicePreset::from_str("standard"), Some(DevicePreset::Standard));
        assert_eq!(DevicePreset::from_str("huge"), None);
        assert_eq!(DevicePreset::Compact.as_str(), "Compact");
    }

    #[test]
    fn test_media_query() {
        assert_eq!(Settings::default().compact_media_query(), "(max-width: 600px)");
    }
}
