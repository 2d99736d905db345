//! Selection engine
//!
//! Owns everything the user can change about the spell lists:
//! - Filter/search/sort parameters (transient, never persisted)
//! - Prepared set and its "not counted" subset (persisted per profile)
//! - Card expansion flags (UI only)

pub mod engine;
pub mod filter;

pub use engine::{SelectionEngine, SelectionState};
pub use filter::{Filter, FilterPatch, Selector, SortMethod, compare_names};
