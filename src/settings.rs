//! Display settings and preferences
//!
//! Persisted separately from profiles under their own storage key.

use serde::{Deserialize, Serialize};

use crate::consts::{AVAILABLE_PREVIEW_CHARS, PREPARED_PREVIEW_CHARS, SETTINGS_KEY};
use crate::persistence::{Storage, load_json, save_json};
use crate::selection::{Filter, SortMethod};

/// User display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sort applied when the app opens and after a filter reset
    pub default_sort: SortMethod,
    /// Description preview length on available cards
    pub available_preview_chars: usize,
    /// Description preview length on prepared cards
    pub prepared_preview_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_sort: SortMethod::None,
            available_preview_chars: AVAILABLE_PREVIEW_CHARS,
            prepared_preview_chars: PREPARED_PREVIEW_CHARS,
        }
    }
}

impl Settings {
    /// Starting filter implied by these settings
    pub fn default_filter(&self) -> Filter {
        Filter {
            sort: self.default_sort,
            ..Default::default()
        }
    }

    /// Load settings, falling back to defaults when missing or corrupt
    pub fn load(storage: &impl Storage) -> Self {
        match load_json(storage, SETTINGS_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) {
        match save_json(storage, SETTINGS_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_missing_settings_use_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            default_sort: SortMethod::Level,
            available_preview_chars: 80,
            ..Default::default()
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set(SETTINGS_KEY, r#"{"default_sort": "alpha"}"#).unwrap();

        let settings = Settings::load(&storage);
        assert_eq!(settings.default_sort, SortMethod::Alpha);
        assert_eq!(settings.prepared_preview_chars, PREPARED_PREVIEW_CHARS);
        assert_eq!(settings.default_filter().sort, SortMethod::Alpha);
    }
}
