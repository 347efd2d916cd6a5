//! # Sanitization Module
//!
//! Normalization applied to a raw ingredient line before it is parsed.
//! Each rule is a plain `&str -> String` transform; the parser applies its
//! configured rules in order.
//!
//! ```rust
//! use ingredient_templates::sanitization::{default_rules, sanitize};
//!
//! let rules = default_rules();
//! assert_eq!(sanitize("1 ½ Cups Flour (sifted)", &rules), "1 1/2 cups flour ");
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

lazy_static! {
    static ref EXTRANEOUS_SPACES_REGEX: Regex =
        Regex::new(r"[ ]{2,}").expect("extraneous spaces regex should be valid");
    static ref RANGE_REGEX: Regex = Regex::new(r"(?P<lower>\d) to (?P<upper>\d)")
        .expect("range substitution regex should be valid");
    static ref BRACKETED_TEXT_REGEX: Regex =
        Regex::new(r"\(.*?\)").expect("bracketed text regex should be valid");
    static ref ALTERNATE_INGREDIENTS_REGEX: Regex =
        Regex::new(r" or .*").expect("alternate ingredients regex should be valid");
}

/// Unicode vulgar fractions and their ASCII spelling
const UNICODE_FRACTIONS: [(char, &str); 19] = [
    ('¼', "1/4"),
    ('½', "1/2"),
    ('¾', "3/4"),
    ('⅐', "1/7"),
    ('⅑', "1/9"),
    ('⅒', "1/10"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
    ('↉', "0/3"),
];

/// A single normalization step
pub trait SanitizationRule: fmt::Debug + Send + Sync {
    fn apply(&self, input: &str) -> String;
}

/// Collapses runs of spaces into one
#[derive(Debug, Clone, Default)]
pub struct RemoveExtraneousSpaces;

impl SanitizationRule for RemoveExtraneousSpaces {
    fn apply(&self, input: &str) -> String {
        EXTRANEOUS_SPACES_REGEX.replace_all(input, " ").into_owned()
    }
}

/// Rewrites "1 to 2" as "1-2"
///
/// A digit can close one range and open the next ("1 to 2 to 3"), so
/// replacement repeats until the text stops changing.
#[derive(Debug, Clone, Default)]
pub struct RangeSubstitution;

impl SanitizationRule for RangeSubstitution {
    fn apply(&self, input: &str) -> String {
        let mut output = input.to_string();

        while RANGE_REGEX.is_match(&output) {
            output = RANGE_REGEX
                .replace_all(&output, "${lower}-${upper}")
                .into_owned();
        }

        output
    }
}

/// Drops parenthesized asides
#[derive(Debug, Clone, Default)]
pub struct RemoveBracketedText;

impl SanitizationRule for RemoveBracketedText {
    fn apply(&self, input: &str) -> String {
        BRACKETED_TEXT_REGEX.replace_all(input, "").into_owned()
    }
}

/// Drops everything from " or " onwards
#[derive(Debug, Clone, Default)]
pub struct RemoveAlternateIngredients;

impl SanitizationRule for RemoveAlternateIngredients {
    fn apply(&self, input: &str) -> String {
        ALTERNATE_INGREDIENTS_REGEX.replace(input, "").into_owned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplaceUnicodeFractions;

impl SanitizationRule for ReplaceUnicodeFractions {
    fn apply(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for c in input.chars() {
            match UNICODE_FRACTIONS.iter().find(|(glyph, _)| *glyph == c) {
                Some((_, replacement)) => output.push_str(replacement),
                None => output.push(c),
            }
        }

        output
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvertToLowerCase;

impl SanitizationRule for ConvertToLowerCase {
    fn apply(&self, input: &str) -> String {
        input.to_lowercase()
    }
}

/// The standard pipeline, in application order
pub fn default_rules() -> Vec<Arc<dyn SanitizationRule>> {
    vec![
        Arc::new(RemoveExtraneousSpaces),
        Arc::new(RangeSubstitution),
        Arc::new(RemoveBracketedText),
        Arc::new(RemoveAlternateIngredients),
        Arc::new(ReplaceUnicodeFractions),
        Arc::new(RemoveExtraneousSpaces),
        Arc::new(ConvertToLowerCase),
    ]
}

/// Apply `rules` to `input` in order
pub fn sanitize(input: &str, rules: &[Arc<dyn SanitizationRule>]) -> String {
    rules
        .iter()
        .fold(input.to_string(), |text, rule| rule.apply(&text))
}
