//! Application facade
//!
//! Startup order: catalog (supplied) → settings → profiles → engine seeded
//! from the active profile. Every call that changes the prepared or
//! ignored set writes the active profile back immediately; filter and
//! expansion changes never touch storage.

use crate::catalog::Catalog;
use crate::error::ProfileError;
use crate::persistence::Storage;
use crate::profiles::ProfileStore;
use crate::selection::{FilterPatch, SelectionEngine, Selector, SortMethod};
use crate::settings::Settings;
use crate::view::{CardsView, SelectionView, project_cards};

pub struct Spellbook<S: Storage> {
    catalog: Catalog,
    engine: SelectionEngine,
    profiles: ProfileStore<S>,
    settings: Settings,
}

impl<S: Storage> Spellbook<S> {
    /// Restore settings and profiles from `storage` and activate the
    /// remembered profile
    pub fn open(catalog: Catalog, storage: S) -> Self {
        let settings = Settings::load(&storage);
        let profiles = ProfileStore::load(storage);

        let mut engine = SelectionEngine::with_filter(settings.default_filter());
        engine.replace_selection(profiles.active_state());

        log::info!(
            "Spellbook ready: {} spells, profile {:?}",
            catalog.len(),
            profiles.active_name()
        );

        Self {
            catalog,
            engine,
            profiles,
            settings,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn profiles(&self) -> &ProfileStore<S> {
        &self.profiles
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_storage(self) -> S {
        self.profiles.into_storage()
    }

    /// Replace and persist display settings. The new default sort takes
    /// effect at the next filter reset.
    pub fn set_settings(&mut self, settings: Settings) {
        settings.save(self.profiles.storage_mut());
        self.engine.set_baseline(settings.default_filter());
        self.settings = settings;
    }

    // === Filters (never persisted) ===

    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.engine.set_filter(patch);
    }

    pub fn set_class_filter(&mut self, class: impl Into<Selector>) {
        self.engine.set_class_filter(class);
    }

    pub fn set_min_level(&mut self, level: impl Into<Selector>) {
        self.engine.set_min_level(level);
    }

    pub fn set_max_level(&mut self, level: impl Into<Selector>) {
        self.engine.set_max_level(level);
    }

    pub fn set_sort_method(&mut self, sort: SortMethod) {
        self.engine.set_sort_method(sort);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.engine.set_search_term(term);
    }

    pub fn reset_filter(&mut self) {
        self.engine.reset_filter();
    }

    pub fn toggle_expanded(&mut self, name: &str) -> bool {
        self.engine.toggle_expanded(name)
    }

    // === Selection (saved on change) ===

    pub fn prepare(&mut self, name: &str) -> bool {
        let changed = self.engine.prepare(name);
        self.save_if(changed);
        changed
    }

    pub fn unprepare(&mut self, name: &str) -> bool {
        let changed = self.engine.unprepare(name);
        self.save_if(changed);
        changed
    }

    pub fn toggle_prepared(&mut self, name: &str) -> bool {
        let prepared = self.engine.toggle_prepared(name);
        self.save_if(true);
        prepared
    }

    pub fn set_ignored(&mut self, name: &str, ignored: bool) -> bool {
        let changed = self.engine.set_ignored(name, ignored);
        self.save_if(changed);
        changed
    }

    fn save_if(&mut self, changed: bool) {
        if changed {
            self.profiles.save(self.engine.state());
        }
    }

    // === Profiles ===

    pub fn activate_profile(&mut self, name: &str) -> Result<(), ProfileError> {
        self.profiles.activate(name, &mut self.engine)
    }

    pub fn create_profile(&mut self, name: &str) -> Result<(), ProfileError> {
        self.profiles.create(name, &mut self.engine)
    }

    pub fn delete_profile(&mut self, name: &str) -> Result<(), ProfileError> {
        self.profiles.delete(name, &mut self.engine)
    }

    // === Projection ===

    pub fn view(&self) -> SelectionView<'_> {
        self.engine.compute_view(&self.catalog)
    }

    pub fn cards(&self) -> CardsView {
        project_cards(&self.catalog, &self.engine, &self.settings)
    }
}
