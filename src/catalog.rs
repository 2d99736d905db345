//! Spell catalog
//!
//! An immutable, ordered collection of spell records loaded once at startup.
//! Raw dataset entries use inconsistent field names for the same concept;
//! they are normalized here so the rest of the crate sees a single shape.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::UNKNOWN_LEVEL;
use crate::error::CatalogError;

/// A single normalized spell record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellRecord {
    /// Unique, case-sensitive key used for all set membership
    pub name: String,
    /// Level label, e.g. "3rd-level", "1", "Cantrip"
    pub level: String,
    pub classes: Vec<String>,
    pub description: String,
    /// Free-form type line, e.g. "Evocation cantrip"
    #[serde(rename = "type")]
    pub type_line: Option<String>,
    pub school: Option<String>,
    pub ritual: bool,
    pub casting_time: Option<String>,
    pub attack_save: Option<String>,
    pub damage: Option<String>,
}

impl SpellRecord {
    /// Create a bare record with no classes or description
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            classes: Vec::new(),
            description: String::new(),
            type_line: None,
            school: None,
            ritual: false,
            casting_time: None,
            attack_save: None,
            damage: None,
        }
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_type(mut self, type_line: impl Into<String>) -> Self {
        let type_line = type_line.into();
        if self.school.is_none() {
            self.school = first_word(&type_line);
        }
        self.ritual = self.ritual || mentions_ritual(&type_line);
        self.type_line = Some(type_line);
        self
    }

    /// Numeric level used for range filtering and sorting
    pub fn level_number(&self) -> u32 {
        level_to_number(&self.level)
    }

    /// Whether the record is usable by the given class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Map a level label to a sortable number.
///
/// The first run of ASCII digits wins ("3rd-level" -> 3). Labels without
/// digits that mention "cantrip" (any case) map to 0. Anything else maps to
/// [`UNKNOWN_LEVEL`] so it sorts after every real level.
pub fn level_to_number(label: &str) -> u32 {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if !digits.is_empty() {
        // A run too long for u32 is still a number, just a very large one
        return digits.parse().unwrap_or(u32::MAX);
    }
    if label.to_lowercase().contains("cantrip") {
        return 0;
    }
    UNKNOWN_LEVEL
}

/// Dataset entry as found on disk, before normalization
#[derive(Debug, Deserialize)]
struct RawSpellRecord {
    name: String,
    #[serde(default)]
    level: Value,
    #[serde(default)]
    classes: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    type_line: Option<String>,
    #[serde(default)]
    school: Option<String>,
    #[serde(default)]
    ritual: Value,
    #[serde(default)]
    casting_time: Option<String>,
    #[serde(default)]
    actions: Option<String>,
    #[serde(default)]
    attack_roll: Option<String>,
    #[serde(default)]
    save: Option<String>,
    #[serde(default, rename = "attack/save")]
    attack_or_save: Option<String>,
    #[serde(default)]
    damage: Option<String>,
    #[serde(default, rename = "damage/effect")]
    damage_effect: Option<String>,
}

impl From<RawSpellRecord> for SpellRecord {
    fn from(raw: RawSpellRecord) -> Self {
        let type_line = non_empty(raw.type_line);
        let school = non_empty(raw.school).or_else(|| type_line.as_deref().and_then(first_word));
        let ritual = is_truthy(&raw.ritual)
            || type_line.as_deref().map(mentions_ritual).unwrap_or(false);

        Self {
            name: raw.name,
            level: level_label(&raw.level),
            classes: raw.classes.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            type_line,
            school,
            ritual,
            casting_time: non_empty(raw.casting_time).or_else(|| non_empty(raw.actions)),
            attack_save: non_empty(raw.attack_roll)
                .or_else(|| non_empty(raw.save))
                .or_else(|| non_empty(raw.attack_or_save)),
            damage: non_empty(raw.damage).or_else(|| non_empty(raw.damage_effect)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn first_word(text: &str) -> Option<String> {
    text.split(' ').next().filter(|w| !w.is_empty()).map(str::to_string)
}

fn mentions_ritual(type_line: &str) -> bool {
    type_line.to_lowercase().contains("ritual")
}

/// Levels show up as strings or bare numbers in the wild
fn level_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Immutable, ordered spell collection
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    spells: Vec<SpellRecord>,
}

impl Catalog {
    /// Build a catalog, keeping the first record for any repeated name
    pub fn new(spells: Vec<SpellRecord>) -> Self {
        let mut seen = HashSet::new();
        let spells = spells
            .into_iter()
            .filter(|spell| {
                let fresh = seen.insert(spell.name.clone());
                if !fresh {
                    log::warn!("Duplicate spell {:?} dropped from catalog", spell.name);
                }
                fresh
            })
            .collect();
        Self { spells }
    }

    /// Parse and normalize a JSON array of dataset entries
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawSpellRecord> = serde_json::from_str(json)?;
        let catalog = Self::new(raw.into_iter().map(SpellRecord::from).collect());
        log::info!("Loaded {} spells", catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Records in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &SpellRecord> {
        self.spells.iter()
    }

    pub fn spells(&self) -> &[SpellRecord] {
        &self.spells
    }

    pub fn get(&self, name: &str) -> Option<&SpellRecord> {
        self.spells.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Distinct class names across the catalog, sorted
    pub fn class_options(&self) -> Vec<String> {
        self.spells
            .iter()
            .flat_map(|s| s.classes.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct level labels ordered by numeric level, then label
    pub fn level_options(&self) -> Vec<String> {
        self.spells
            .iter()
            .map(|s| (s.level_number(), s.level.clone()))
            .filter(|(_, label)| !label.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|(_, label)| label)
            .collect()
    }
}
