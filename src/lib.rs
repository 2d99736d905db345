//! Spellbook - browse a spell catalog and track prepared spells
//!
//! Core modules:
//! - `catalog`: Immutable spell records, dataset normalization
//! - `selection`: Filter/search/sort state and the prepared/ignored sets
//! - `view`: Pure projection of the selection onto the catalog
//! - `profiles`: Named, persisted selection snapshots
//! - `persistence`: Key-value storage backends
//! - `app`: Facade wiring everything together with save-on-change

pub mod app;
pub mod catalog;
pub mod error;
pub mod persistence;
pub mod profiles;
pub mod selection;
pub mod settings;
pub mod view;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::Spellbook;
pub use catalog::{Catalog, SpellRecord, level_to_number};
pub use error::{CatalogError, ProfileError, StorageError};
pub use profiles::{Profile, ProfileStore};
pub use selection::{Filter, FilterPatch, SelectionEngine, SelectionState, Selector, SortMethod};
pub use settings::Settings;
pub use view::{CardsView, SelectionView, SpellCard, compute_view, project_cards};

/// Application constants
pub mod consts {
    /// Storage key holding the JSON profile list
    pub const PROFILES_KEY: &str = "spellbook_profiles";
    /// Storage key holding the active profile name
    pub const ACTIVE_PROFILE_KEY: &str = "spellbook_active_profile";
    /// Storage key holding display settings
    pub const SETTINGS_KEY: &str = "spellbook_settings";

    /// Profile seeded on first run
    pub const DEFAULT_PROFILE_NAME: &str = "Default";

    /// Numeric level for labels that are neither numbered nor cantrips
    pub const UNKNOWN_LEVEL: u32 = 100;

    /// Description preview lengths (characters)
    pub const AVAILABLE_PREVIEW_CHARS: usize = 140;
    pub const PREPARED_PREVIEW_CHARS: usize = 120;
}

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
