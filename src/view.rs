//! View projection
//!
//! Pure functions from (catalog, selection, filter) to the two spell lists
//! and the prepared counter. Nothing here mutates state; renderers call it
//! after every change and decide for themselves what to redraw.

use serde::Serialize;

use crate::catalog::{Catalog, SpellRecord};
use crate::selection::{Filter, SelectionEngine, SelectionState};
use crate::settings::Settings;

/// Ordered lists produced by one projection
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionView<'a> {
    /// Catalog records passing class, level and search predicates
    pub available: Vec<&'a SpellRecord>,
    /// Every prepared record, regardless of filters
    pub prepared: Vec<&'a SpellRecord>,
    /// Prepared records minus the ones marked "not counted"
    pub prepared_count: usize,
}

/// Project the selection onto the catalog.
///
/// Prepared spells stay in `available` when they pass the filters. Both
/// lists use the same sort method.
pub fn compute_view<'a>(
    catalog: &'a Catalog,
    state: &SelectionState,
    filter: &Filter,
) -> SelectionView<'a> {
    let mut available: Vec<&SpellRecord> = catalog.iter().filter(|s| filter.matches(s)).collect();
    let mut prepared: Vec<&SpellRecord> = catalog
        .iter()
        .filter(|s| state.is_prepared(&s.name))
        .collect();

    filter.sort.sort(&mut available);
    filter.sort.sort(&mut prepared);

    SelectionView {
        available,
        prepared,
        prepared_count: state.prepared_count(),
    }
}

/// Expanded card details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellDetails {
    pub school: String,
    /// "Yes" or "No"
    pub ritual: String,
    pub classes: String,
    pub actions: String,
    pub attack_save: String,
    pub damage: String,
    pub description: String,
}

/// Render-ready card for one spell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellCard {
    pub name: String,
    pub level_label: String,
    /// "Level • type • classes"
    pub meta: String,
    pub preview: String,
    pub prepared: bool,
    pub ignored: bool,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<SpellDetails>,
}

/// Both card columns plus the counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardsView {
    pub available: Vec<SpellCard>,
    pub prepared: Vec<SpellCard>,
    pub prepared_count: usize,
    pub counter_label: String,
}

/// Decorate a projection with per-card display data
pub fn project_cards(catalog: &Catalog, engine: &SelectionEngine, settings: &Settings) -> CardsView {
    let view = engine.compute_view(catalog);
    let card = |spell: &SpellRecord, preview_chars: usize| -> SpellCard {
        let expanded = engine.is_expanded(&spell.name);
        SpellCard {
            name: spell.name.clone(),
            level_label: capitalize(&spell.level),
            meta: meta_line(spell),
            preview: preview(&spell.description, preview_chars),
            prepared: engine.is_prepared(&spell.name),
            ignored: engine.is_ignored(&spell.name),
            expanded,
            details: expanded.then(|| details(spell)),
        }
    };

    CardsView {
        available: view
            .available
            .iter()
            .map(|s| card(s, settings.available_preview_chars))
            .collect(),
        prepared: view
            .prepared
            .iter()
            .map(|s| card(s, settings.prepared_preview_chars))
            .collect(),
        prepared_count: view.prepared_count,
        counter_label: format!("Prepared: {}", view.prepared_count),
    }
}

fn details(spell: &SpellRecord) -> SpellDetails {
    SpellDetails {
        school: spell.school.clone().unwrap_or_default(),
        ritual: if spell.ritual { "Yes" } else { "No" }.to_string(),
        classes: spell.classes.join(", "),
        actions: spell.casting_time.clone().unwrap_or_default(),
        attack_save: spell.attack_save.clone().unwrap_or_default(),
        damage: spell.damage.clone().unwrap_or_default(),
        description: spell.description.clone(),
    }
}

fn meta_line(spell: &SpellRecord) -> String {
    let mut meta = capitalize(&spell.level);
    if let Some(type_line) = &spell.type_line {
        meta.push_str(" • ");
        meta.push_str(type_line);
    }
    if !spell.classes.is_empty() {
        meta.push_str(" • ");
        meta.push_str(&spell.classes.join(", "));
    }
    meta
}

/// Uppercase the first character, leave the rest alone
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First `max_chars` characters, with "..." appended when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SortMethod;

    fn names(spells: &[&SpellRecord]) -> Vec<String> {
        spells.iter().map(|s| s.name.clone()).collect()
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            SpellRecord::new("Fly", "3").with_classes(["Wizard"]),
            SpellRecord::new("Light", "cantrip").with_classes(["Cleric", "Wizard"]),
            SpellRecord::new("Ray", "1").with_classes(["Sorcerer"]),
        ])
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        let state = SelectionState::from_lists(vec!["Ghost".to_string()], Vec::new());
        let view = compute_view(&catalog, &state, &Filter::default());
        assert!(view.available.is_empty());
        assert!(view.prepared.is_empty());
        // Count tracks names, not catalog hits
        assert_eq!(view.prepared_count, 1);

        let view = compute_view(&catalog, &SelectionState::new(), &Filter::default());
        assert_eq!(view.prepared_count, 0);
    }

    #[test]
    fn test_prepared_ignores_filters_but_shares_sort() {
        let catalog = sample_catalog();
        let state = SelectionState::from_lists(
            vec!["Fly".to_string(), "Light".to_string(), "Ray".to_string()],
            vec!["Ray".to_string()],
        );
        let filter = Filter {
            class: "Wizard".into(),
            sort: SortMethod::Level,
            ..Default::default()
        };

        let view = compute_view(&catalog, &state, &filter);
        assert_eq!(names(&view.available), vec!["Light", "Fly"]);
        assert_eq!(names(&view.prepared), vec!["Light", "Ray", "Fly"]);
        assert_eq!(view.prepared_count, 2);
    }

    #[test]
    fn test_prepared_spells_stay_available() {
        let catalog = sample_catalog();
        let state = SelectionState::from_lists(vec!["Fly".to_string()], Vec::new());
        let view = compute_view(&catalog, &state, &Filter::default());
        assert_eq!(names(&view.available), vec!["Fly", "Light", "Ray"]);
    }

    #[test]
    fn test_capitalize_and_preview() {
        assert_eq!(capitalize("cantrip"), "Cantrip");
        assert_eq!(capitalize(""), "");
        assert_eq!(preview("short", 140), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ééé", 2), "éé...");
    }

    #[test]
    fn test_cards_show_details_only_when_expanded() {
        let catalog = Catalog::new(vec![
            SpellRecord::new("Alarm", "1st-level")
                .with_type("Abjuration ritual")
                .with_classes(["Wizard", "Ranger"])
                .with_description("Sets an alarm"),
        ]);
        let mut engine = SelectionEngine::new();
        let settings = Settings::default();

        let cards = project_cards(&catalog, &engine, &settings);
        let card = &cards.available[0];
        assert_eq!(card.meta, "1st-level • Abjuration ritual • Wizard, Ranger");
        assert!(card.details.is_none());
        assert_eq!(cards.counter_label, "Prepared: 0");

        engine.toggle_expanded("Alarm");
        engine.prepare("Alarm");
        let cards = project_cards(&catalog, &engine, &settings);
        let details = cards.available[0].details.as_ref().unwrap();
        assert_eq!(details.school, "Abjuration");
        assert_eq!(details.ritual, "Yes");
        assert_eq!(details.classes, "Wizard, Ranger");
        assert!(cards.prepared[0].prepared);
        assert_eq!(cards.counter_label, "Prepared: 1");
    }
}
