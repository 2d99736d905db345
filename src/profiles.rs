//! Named profiles of prepared spells
//!
//! Each profile stores a prepared list and its "not counted" subset. One
//! profile is active at a time; activating it swaps the engine's selection
//! wholesale while leaving filter, search, sort and expansion untouched.
//!
//! The full profile list is rewritten on every change. A failed write is
//! logged and the in-memory list stays authoritative until the next load.

use serde::{Deserialize, Serialize};

use crate::consts::{ACTIVE_PROFILE_KEY, DEFAULT_PROFILE_NAME, PROFILES_KEY};
use crate::error::ProfileError;
use crate::persistence::{Storage, load_json, save_json};
use crate::selection::{SelectionEngine, SelectionState};

/// A stored selection snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub prepared: Vec<String>,
    #[serde(default)]
    pub ignored: Vec<String>,
}

impl Profile {
    /// Profile with nothing prepared
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prepared: Vec::new(),
            ignored: Vec::new(),
        }
    }

    pub fn state(&self) -> SelectionState {
        SelectionState::from_lists(self.prepared.iter().cloned(), self.ignored.iter().cloned())
    }
}

/// Ordered profile list (creation order) plus the active profile
pub struct ProfileStore<S: Storage> {
    storage: S,
    profiles: Vec<Profile>,
    active: usize,
}

impl<S: Storage> ProfileStore<S> {
    /// Read saved profiles, seeding a single "Default" profile when none
    /// exist or the stored data is unreadable. The remembered active
    /// profile is restored if it still exists, otherwise the first one is.
    pub fn load(storage: S) -> Self {
        let stored: Vec<Profile> = load_json(&storage, PROFILES_KEY).unwrap_or_default();
        let profiles = sanitize(stored);

        let mut store = Self {
            storage,
            profiles,
            active: 0,
        };

        if store.profiles.is_empty() {
            log::info!("No profiles found, creating {DEFAULT_PROFILE_NAME:?}");
            store.profiles.push(Profile::empty(DEFAULT_PROFILE_NAME));
            store.persist();
        } else {
            log::info!("Loaded {} profiles", store.profiles.len());
        }

        let remembered: Option<String> = load_json(&store.storage, ACTIVE_PROFILE_KEY);
        if let Some(index) = remembered.and_then(|name| store.position(&name)) {
            store.active = index;
        }
        log::info!("Active profile: {:?}", store.active().name);
        store
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Never true once loaded
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn active(&self) -> &Profile {
        &self.profiles[self.active]
    }

    pub fn active_name(&self) -> &str {
        &self.active().name
    }

    /// Selection stored in the active profile
    pub fn active_state(&self) -> SelectionState {
        self.active().state()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == name)
    }

    /// Make `name` active and load its selection into `engine`
    pub fn activate(&mut self, name: &str, engine: &mut SelectionEngine) -> Result<(), ProfileError> {
        let index = self
            .position(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;
        self.switch_to(index, engine);
        Ok(())
    }

    /// Append an empty profile and switch to it
    pub fn create(&mut self, name: &str, engine: &mut SelectionEngine) -> Result<(), ProfileError> {
        let name = name.trim();
        if name.is_empty() || self.position(name).is_some() {
            return Err(ProfileError::DuplicateName(name.to_string()));
        }

        self.profiles.push(Profile::empty(name));
        log::info!("Created profile {name:?}");
        self.persist();
        self.switch_to(self.profiles.len() - 1, engine);
        Ok(())
    }

    /// Remove a profile and switch to whichever profile is now first
    pub fn delete(&mut self, name: &str, engine: &mut SelectionEngine) -> Result<(), ProfileError> {
        if self.profiles.len() <= 1 {
            return Err(ProfileError::LastProfile);
        }
        let index = self
            .position(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;

        self.profiles.remove(index);
        log::info!("Deleted profile {name:?}");
        self.persist();
        self.switch_to(0, engine);
        Ok(())
    }

    /// Copy the engine's selection into the active profile and write it out
    pub fn save(&mut self, state: &SelectionState) {
        let profile = &mut self.profiles[self.active];
        profile.prepared = state.prepared_list();
        profile.ignored = state.ignored_list();
        self.persist();
    }

    fn switch_to(&mut self, index: usize, engine: &mut SelectionEngine) {
        self.active = index;
        engine.replace_selection(self.active_state());
        let name = &self.profiles[self.active].name;
        if let Err(e) = save_json(&mut self.storage, ACTIVE_PROFILE_KEY, name) {
            log::warn!("Failed to remember active profile: {e}");
        }
        log::info!("Switched to profile {name:?}");
    }

    fn persist(&mut self) {
        match save_json(&mut self.storage, PROFILES_KEY, &self.profiles) {
            Ok(()) => log::debug!("Profiles saved ({} entries)", self.profiles.len()),
            Err(e) => log::warn!("Failed to save profiles: {e}"),
        }
    }
}

/// Trim stored names the way `create` does, then drop blank or repeated ones
fn sanitize(stored: Vec<Profile>) -> Vec<Profile> {
    let mut profiles: Vec<Profile> = Vec::with_capacity(stored.len());
    for mut profile in stored {
        profile.name = profile.name.trim().to_string();
        if profile.name.is_empty() || profiles.iter().any(|p| p.name == profile.name) {
            log::warn!("Dropping invalid stored profile {:?}", profile.name);
            continue;
        }
        profiles.push(profile);
    }
    profiles
}
