//! Selection state and the mutations allowed on it
//!
//! The one hard rule: every ignored name is also a prepared name. All
//! mutation goes through [`SelectionEngine`] so the rule cannot be broken.

use std::collections::{BTreeSet, HashSet};

use super::filter::{Filter, FilterPatch, Selector, SortMethod};
use crate::catalog::Catalog;
use crate::view::{SelectionView, compute_view};

/// Persistable part of the selection (what a profile stores)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    prepared: BTreeSet<String>,
    ignored: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored lists, dropping ignores that are not prepared
    pub fn from_lists<P, I>(prepared: P, ignored: I) -> Self
    where
        P: IntoIterator<Item = String>,
        I: IntoIterator<Item = String>,
    {
        let prepared: BTreeSet<String> = prepared.into_iter().collect();
        let ignored = ignored
            .into_iter()
            .filter(|name| prepared.contains(name))
            .collect();
        Self { prepared, ignored }
    }

    pub fn prepared(&self) -> &BTreeSet<String> {
        &self.prepared
    }

    pub fn ignored(&self) -> &BTreeSet<String> {
        &self.ignored
    }

    pub fn is_prepared(&self, name: &str) -> bool {
        self.prepared.contains(name)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    /// Prepared spells that count against the total
    pub fn prepared_count(&self) -> usize {
        self.prepared.difference(&self.ignored).count()
    }

    pub fn prepared_list(&self) -> Vec<String> {
        self.prepared.iter().cloned().collect()
    }

    pub fn ignored_list(&self) -> Vec<String> {
        self.ignored.iter().cloned().collect()
    }
}

/// Owns the selection plus transient filter and expansion state
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    state: SelectionState,
    filter: Filter,
    /// Filter restored by `reset_filter`
    baseline: Filter,
    expanded: HashSet<String>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose filter starts (and resets) to `filter`
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter: filter.clone(),
            baseline: filter,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    // === Filter/search/sort ===

    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filter.apply(patch);
        log::debug!("Filter now {:?}", self.filter);
    }

    pub fn set_class_filter(&mut self, class: impl Into<Selector>) {
        self.set_filter(FilterPatch {
            class: Some(class.into()),
            ..Default::default()
        });
    }

    pub fn set_min_level(&mut self, level: impl Into<Selector>) {
        self.set_filter(FilterPatch {
            min_level: Some(level.into()),
            ..Default::default()
        });
    }

    pub fn set_max_level(&mut self, level: impl Into<Selector>) {
        self.set_filter(FilterPatch {
            max_level: Some(level.into()),
            ..Default::default()
        });
    }

    pub fn set_sort_method(&mut self, sort: SortMethod) {
        self.set_filter(FilterPatch {
            sort: Some(sort),
            ..Default::default()
        });
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.set_filter(FilterPatch {
            search: Some(term.into()),
            ..Default::default()
        });
    }

    /// Change the filter `reset_filter` restores; the current filter stays
    pub fn set_baseline(&mut self, filter: Filter) {
        self.baseline = filter;
    }

    /// Back to the starting filter (navigation away and back)
    pub fn reset_filter(&mut self) {
        self.filter = self.baseline.clone();
    }

    // === Prepared / ignored ===

    /// Mark a spell prepared. Returns true if the selection changed.
    pub fn prepare(&mut self, name: &str) -> bool {
        let changed = self.state.prepared.insert(name.to_string());
        if changed {
            log::debug!("Prepared {name:?}");
        }
        changed
    }

    /// Unmark a spell, clearing its ignore flag too. Returns true if the
    /// selection changed.
    pub fn unprepare(&mut self, name: &str) -> bool {
        let changed = self.state.prepared.remove(name);
        self.state.ignored.remove(name);
        if changed {
            log::debug!("Unprepared {name:?}");
        }
        changed
    }

    /// Flip prepared status. Returns the new status.
    pub fn toggle_prepared(&mut self, name: &str) -> bool {
        if self.state.is_prepared(name) {
            self.unprepare(name);
            false
        } else {
            self.prepare(name);
            true
        }
    }

    /// Set the "not counted" flag of a prepared spell. Unprepared names are
    /// ignored. Returns true if the selection changed.
    pub fn set_ignored(&mut self, name: &str, ignored: bool) -> bool {
        if !self.state.is_prepared(name) {
            return false;
        }
        let changed = if ignored {
            self.state.ignored.insert(name.to_string())
        } else {
            self.state.ignored.remove(name)
        };
        if changed {
            log::debug!("{name:?} counted: {}", !ignored);
        }
        changed
    }

    /// Swap in a whole selection (profile activation)
    pub fn replace_selection(&mut self, state: SelectionState) {
        self.state = state;
    }

    pub fn is_prepared(&self, name: &str) -> bool {
        self.state.is_prepared(name)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.state.is_ignored(name)
    }

    pub fn prepared_count(&self) -> usize {
        self.state.prepared_count()
    }

    // === Expansion ===

    /// Flip a card's detail expansion. Returns the new status.
    pub fn toggle_expanded(&mut self, name: &str) -> bool {
        if self.expanded.remove(name) {
            false
        } else {
            self.expanded.insert(name.to_string());
            true
        }
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.contains(name)
    }

    // === Projection ===

    pub fn compute_view<'a>(&self, catalog: &'a Catalog) -> SelectionView<'a> {
        compute_view(catalog, &self.state, &self.filter)
    }
}
