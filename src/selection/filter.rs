//! Filter, search and sort parameters

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::catalog::{SpellRecord, level_to_number};

/// Sentinel accepted for "no restriction" in every selector
pub const ALL: &str = "all";

/// A dropdown-style selector: either everything or one specific value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn as_str(&self) -> &str {
        match self {
            Selector::All => ALL,
            Selector::Only(value) => value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        if value == ALL {
            Selector::All
        } else {
            Selector::Only(value.to_string())
        }
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        if value == ALL {
            Selector::All
        } else {
            Selector::Only(value)
        }
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::All => ALL.to_string(),
            Selector::Only(value) => value,
        }
    }
}

/// Ordering applied to both spell lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    /// Catalog order
    #[default]
    None,
    Alpha,
    /// Numeric level, then name
    Level,
}

impl SortMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMethod::None => "none",
            SortMethod::Alpha => "alpha",
            SortMethod::Level => "level",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(SortMethod::None),
            "alpha" => Some(SortMethod::Alpha),
            "level" => Some(SortMethod::Level),
            _ => None,
        }
    }

    /// Comparator for this method, `None` when catalog order is kept
    pub fn comparator(&self) -> Option<fn(&SpellRecord, &SpellRecord) -> Ordering> {
        match self {
            SortMethod::None => None,
            SortMethod::Alpha => Some(by_name),
            SortMethod::Level => Some(by_level),
        }
    }

    /// Stable in-place sort of a record list
    pub fn sort(&self, spells: &mut [&SpellRecord]) {
        if let Some(cmp) = self.comparator() {
            spells.sort_by(|a, b| cmp(a, b));
        }
    }
}

fn by_name(a: &SpellRecord, b: &SpellRecord) -> Ordering {
    compare_names(&a.name, &b.name)
}

fn by_level(a: &SpellRecord, b: &SpellRecord) -> Ordering {
    a.level_number()
        .cmp(&b.level_number())
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Multi-level sort key: base letters, then accents, then case
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    /// Lowercased letters with combining marks stripped
    base: String,
    /// Marks attached to each base character
    accents: Vec<Vec<char>>,
    /// Per base character; lowercase sorts first
    upper: Vec<bool>,
}

fn collation_key(name: &str) -> CollationKey {
    let mut key = CollationKey {
        base: String::with_capacity(name.len()),
        accents: Vec::new(),
        upper: Vec::new(),
    };
    for c in name.nfd() {
        if is_combining_mark(c) {
            if let Some(marks) = key.accents.last_mut() {
                marks.push(c);
            }
            continue;
        }
        key.base.extend(c.to_lowercase());
        key.accents.push(Vec::new());
        key.upper.push(c.is_uppercase());
    }
    key
}

/// Dictionary-style name ordering.
///
/// Accents and case only break ties between names with the same base
/// letters, so "Éclair" sorts among the e's and "apple" precedes "Apple".
/// Exact bytes decide anything still equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Active filter/search/sort parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub class: Selector,
    pub min_level: Selector,
    pub max_level: Selector,
    pub search: String,
    pub sort: SortMethod,
}

/// Partial filter update; `None` fields are left as they are
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPatch {
    pub class: Option<Selector>,
    pub min_level: Option<Selector>,
    pub max_level: Option<Selector>,
    pub search: Option<String>,
    pub sort: Option<SortMethod>,
}

impl Filter {
    /// Merge the fields present in `patch`
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(class) = patch.class {
            self.class = class;
        }
        if let Some(min_level) = patch.min_level {
            self.min_level = min_level;
        }
        if let Some(max_level) = patch.max_level {
            self.max_level = max_level;
        }
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }

    /// Class, level range and search predicates combined
    pub fn matches(&self, spell: &SpellRecord) -> bool {
        self.matches_class(spell) && self.matches_level(spell) && self.matches_search(spell)
    }

    pub fn matches_class(&self, spell: &SpellRecord) -> bool {
        match &self.class {
            Selector::All => true,
            Selector::Only(class) => spell.has_class(class),
        }
    }

    pub fn matches_level(&self, spell: &SpellRecord) -> bool {
        let level = spell.level_number();
        let above_min = match &self.min_level {
            Selector::All => true,
            Selector::Only(min) => level >= level_to_number(min),
        };
        let below_max = match &self.max_level {
            Selector::All => true,
            Selector::Only(max) => level <= level_to_number(max),
        };
        above_min && below_max
    }

    /// Case-insensitive substring search over name and description
    pub fn matches_search(&self, spell: &SpellRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let haystack = format!("{} {}", spell.name, spell.description).to_lowercase();
        haystack.contains(&self.search.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(spells: &[&'a SpellRecord]) -> Vec<&'a str> {
        spells.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_level_range() {
        let spells = [
            SpellRecord::new("A", "cantrip"),
            SpellRecord::new("B", "1"),
            SpellRecord::new("C", "2"),
            SpellRecord::new("D", "9"),
        ];
        let filter = Filter {
            min_level: "1".into(),
            max_level: "2".into(),
            ..Default::default()
        };

        let kept: Vec<_> = spells.iter().filter(|s| filter.matches(s)).collect();
        assert_eq!(names(&kept), vec!["B", "C"]);
    }

    #[test]
    fn test_open_ended_range_keeps_unknown_levels() {
        let odd = SpellRecord::new("Odd", "special");
        let filter = Filter {
            min_level: "3".into(),
            ..Default::default()
        };
        assert!(filter.matches(&odd));

        let capped = Filter {
            max_level: "9".into(),
            ..Default::default()
        };
        assert!(!capped.matches(&odd));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let spells = [
            SpellRecord::new("Fireball", "3").with_description("A bright streak"),
            SpellRecord::new("Light", "cantrip").with_description("a fire spell"),
            SpellRecord::new("Frost", "1").with_description("cold"),
        ];
        let filter = Filter {
            search: "FIRE".to_string(),
            ..Default::default()
        };

        let kept: Vec<_> = spells.iter().filter(|s| filter.matches(s)).collect();
        assert_eq!(names(&kept), vec!["Fireball", "Light"]);
    }

    #[test]
    fn test_class_filter_excludes_classless() {
        let classless = SpellRecord::new("Orphan", "1");
        let wizard = SpellRecord::new("Shield", "1").with_classes(["Wizard"]);

        let any = Filter::default();
        assert!(any.matches(&classless));

        let only_wizard = Filter {
            class: "Wizard".into(),
            ..Default::default()
        };
        assert!(!only_wizard.matches(&classless));
        assert!(only_wizard.matches(&wizard));
    }

    #[test]
    fn test_unknown_class_matches_nothing() {
        let wizard = SpellRecord::new("Shield", "1").with_classes(["Wizard"]);
        let filter = Filter {
            class: "Bard-ish".into(),
            ..Default::default()
        };
        assert!(!filter.matches(&wizard));
    }

    #[test]
    fn test_sort_by_level_then_name() {
        let spells = [
            SpellRecord::new("Light", "cantrip"),
            SpellRecord::new("Fly", "3"),
            SpellRecord::new("Ray", "1"),
        ];
        let mut refs: Vec<_> = spells.iter().collect();
        SortMethod::Level.sort(&mut refs);
        assert_eq!(names(&refs), vec!["Light", "Ray", "Fly"]);
    }

    #[test]
    fn test_sort_alpha_ignores_case() {
        let spells = [
            SpellRecord::new("banishment", "4"),
            SpellRecord::new("Aid", "2"),
            SpellRecord::new("Counterspell", "3"),
        ];
        let mut refs: Vec<_> = spells.iter().collect();
        SortMethod::Alpha.sort(&mut refs);
        assert_eq!(names(&refs), vec!["Aid", "banishment", "Counterspell"]);

        let mut unsorted: Vec<_> = spells.iter().collect();
        SortMethod::None.sort(&mut unsorted);
        assert_eq!(names(&unsorted), vec!["banishment", "Aid", "Counterspell"]);
    }

    #[test]
    fn test_sort_alpha_folds_accents_and_puts_lowercase_first() {
        let spells = [
            SpellRecord::new("Zephyr", "1"),
            SpellRecord::new("Éclair", "1"),
            SpellRecord::new("apple", "1"),
            SpellRecord::new("Apple", "1"),
        ];
        let mut refs: Vec<_> = spells.iter().collect();
        SortMethod::Alpha.sort(&mut refs);
        assert_eq!(names(&refs), vec!["apple", "Apple", "Éclair", "Zephyr"]);
    }

    #[test]
    fn test_compare_names_accent_breaks_ties() {
        assert_eq!(compare_names("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_names("Ébauche", "ecrire"), Ordering::Less);
        assert_eq!(compare_names("Aid", "Aid"), Ordering::Equal);
    }

    #[test]
    fn test_search_keeps_whitespace_in_term() {
        let fireball = SpellRecord::new("Fireball", "3").with_description("A bright streak");
        let light = SpellRecord::new("Light", "cantrip").with_description("a fire spell");
        let filter = Filter {
            search: "fire ".to_string(),
            ..Default::default()
        };
        assert!(!filter.matches(&fireball));
        assert!(filter.matches(&light));
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let mut filter = Filter {
            search: "fire".to_string(),
            ..Default::default()
        };
        filter.apply(FilterPatch {
            sort: Some(SortMethod::Alpha),
            ..Default::default()
        });
        assert_eq!(filter.search, "fire");
        assert_eq!(filter.sort, SortMethod::Alpha);
    }

    #[test]
    fn test_selector_serde() {
        let json = serde_json::to_string(&Filter::default()).unwrap();
        assert!(json.contains(r#""class":"all""#));

        let filter: Filter = serde_json::from_str(r#"{"class": "Cleric", "sort": "level"}"#).unwrap();
        assert_eq!(filter.class, Selector::Only("Cleric".to_string()));
        assert!(filter.min_level.is_all());
        assert_eq!(filter.sort, SortMethod::Level);
    }

    #[test]
    fn test_sort_method_from_str() {
        assert_eq!(SortMethod::from_str("Alpha"), Some(SortMethod::Alpha));
        assert_eq!(SortMethod::from_str("random"), None);
    }
}
