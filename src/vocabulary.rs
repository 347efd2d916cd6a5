//! # Vocabulary Module
//!
//! Default vocabulary tables for the unit and form readers. These are plain
//! values handed to the readers at construction time; callers wanting a
//! different vocabulary build their own map or set and pass it in.

use std::collections::{HashMap, HashSet};

use crate::tokens::UnitKind;

/// Default unit-name to [`UnitKind`] mappings
pub fn default_units() -> HashMap<String, UnitKind> {
    let mappings: &[(&str, UnitKind)] = &[
        // Volume units
        ("tsp", UnitKind::Teaspoon),
        ("t.", UnitKind::Teaspoon),
        ("t", UnitKind::Teaspoon),
        ("teaspoon", UnitKind::Teaspoon),
        ("teaspoons", UnitKind::Teaspoon),
        ("tbl", UnitKind::Tablespoon),
        ("tbsp.", UnitKind::Tablespoon),
        ("tbsp", UnitKind::Tablespoon),
        ("tablespoon", UnitKind::Tablespoon),
        ("tablespoons", UnitKind::Tablespoon),
        ("cup", UnitKind::Cup),
        ("cups", UnitKind::Cup),
        ("c.", UnitKind::Cup),
        ("c", UnitKind::Cup),
        ("ml", UnitKind::Milliliter),
        ("milliliter", UnitKind::Milliliter),
        ("milliliters", UnitKind::Milliliter),
        ("l", UnitKind::Liter),
        ("liter", UnitKind::Liter),
        ("liters", UnitKind::Liter),
        ("litre", UnitKind::Liter),
        ("litres", UnitKind::Liter),
        // Weight units
        ("gram", UnitKind::Gram),
        ("grams", UnitKind::Gram),
        ("g.", UnitKind::Gram),
        ("g", UnitKind::Gram),
        ("kg", UnitKind::Kilogram),
        ("kilogram", UnitKind::Kilogram),
        ("kilograms", UnitKind::Kilogram),
        ("ounce", UnitKind::Ounce),
        ("ounces", UnitKind::Ounce),
        ("oz", UnitKind::Ounce),
        ("oz.", UnitKind::Ounce),
        ("lb", UnitKind::Pound),
        ("lbs", UnitKind::Pound),
        ("pound", UnitKind::Pound),
        ("pounds", UnitKind::Pound),
        // Specialized units
        ("handful", UnitKind::Handful),
        ("pinch", UnitKind::Pinch),
        ("pinches", UnitKind::Pinch),
        ("can", UnitKind::Can),
        ("cans", UnitKind::Can),
    ];

    mappings
        .iter()
        .map(|(name, kind)| (name.to_string(), *kind))
        .collect()
}

/// Default set of known preparation forms
pub fn default_forms() -> HashSet<String> {
    ["grated", "chopped", "drained", "shredded"]
        .iter()
        .map(|form| form.to_string())
        .collect()
}
