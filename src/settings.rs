//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{BACKGROUND_BUILDING_COUNT, BUILDING_COUNT, MIN_BUILDING_COUNT};

/// How window (floor, room) pairs map onto a building's light cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LightIndexing {
    /// Every window reads its own cell
    #[default]
    PerRoom,
    /// Every window on a floor shares one cell (classic look)
    Legacy,
}

impl LightIndexing {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightIndexing::PerRoom => "PerRoom",
            LightIndexing::Legacy => "Legacy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "perroom" | "per-room" | "room" => Some(LightIndexing::PerRoom),
            "legacy" | "classic" => Some(LightIndexing::Legacy),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === City ===
    /// Decorative buildings behind the playfield
    pub background_buildings: usize,
    /// Collidable buildings (at least 4)
    pub buildings: usize,

    // === Visuals ===
    /// Window light layout
    pub light_indexing: LightIndexing,
    /// Dashed aim line while dragging
    pub trajectory_preview: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_buildings: BACKGROUND_BUILDING_COUNT,
            buildings: BUILDING_COUNT,
            light_indexing: LightIndexing::PerRoom,
            trajectory_preview: true,
        }
    }
}

impl Settings {
    /// Clamp values that would break city generation
    pub fn sanitized(mut self) -> Self {
        if self.buildings < MIN_BUILDING_COUNT {
            log::warn!(
                "Settings: {} buildings is too few, using {}",
                self.buildings,
                MIN_BUILDING_COUNT
            );
            self.buildings = MIN_BUILDING_COUNT;
        }
        self
    }

    /// Parse settings JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "gorillas_settings";

    /// Apply `key=value` overrides from a URL query string
    ///
    /// Recognised keys: `buildings`, `background`, `lights`, `preview`.
    /// Returns whether any override was applied.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let mut applied = false;
        let pairs = query.trim_start_matches('?').split('&').filter(|p| !p.is_empty());
        for pair in pairs {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let ok = match key {
                "buildings" => value.parse().map(|n| self.buildings = n).is_ok(),
                "background" => value.parse().map(|n| self.background_buildings = n).is_ok(),
                "lights" => LightIndexing::from_str(value)
                    .map(|mode| self.light_indexing = mode)
                    .is_some(),
                "preview" => match value {
                    "on" | "true" | "1" => {
                        self.trajectory_preview = true;
                        true
                    }
                    "off" | "false" | "0" => {
                        self.trajectory_preview = false;
                        true
                    }
                    _ => false,
                },
                _ => {
                    log::debug!("Ignoring unknown option {:?}", key);
                    continue;
                }
            };
            if ok {
                applied = true;
            } else {
                log::warn!("Ignoring bad value for {}: {:?}", key, value);
            }
        }

        if applied {
            *self = self.clone().sanitized();
            log::info!(
                "Settings overridden: {} buildings, {} background, lights {}, preview {}",
                self.buildings,
                self.background_buildings,
                self.light_indexing.as_str(),
                self.trajectory_preview
            );
        }
        applied
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
