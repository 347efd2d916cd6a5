//! # Token Data Model
//!
//! Typed tokens extracted from an ingredient line by the token readers.
//!
//! ## Core Concepts
//!
//! - **Literal**: separator text taken verbatim from a template
//! - **Amount**: a quantity, either a decimal literal, a (mixed) fraction, or
//!   a range whose bounds are both literals or both fractions
//! - **Unit**: the raw unit text plus the [`UnitKind`] it resolved to
//! - **Form**: a known preparation form ("grated", "chopped", ...)
//! - **Ingredient**: the ingredient name
//!
//! Amounts render to canonical strings through [`Display`](fmt::Display):
//!
//! ```rust
//! use ingredient_templates::tokens::{Amount, Fraction};
//! use rust_decimal::Decimal;
//!
//! let amount = Amount::fractional_range(
//!     Fraction::new(None, Decimal::ONE, Decimal::from(4)),
//!     Fraction::new(None, Decimal::ONE, Decimal::from(3)),
//! );
//! assert_eq!(amount.to_string(), "1/4-1/3");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token read from the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Template separator text
    Literal(String),
    /// A parsed quantity
    Amount(Amount),
    /// A unit of measurement
    Unit { raw: String, kind: UnitKind },
    /// A preparation form
    Form(String),
    /// The ingredient name
    Ingredient(String),
}

impl Token {
    pub fn literal(value: &str) -> Self {
        Token::Literal(value.to_string())
    }

    pub fn unit(raw: &str, kind: UnitKind) -> Self {
        Token::Unit {
            raw: raw.to_string(),
            kind,
        }
    }

    pub fn form(value: &str) -> Self {
        Token::Form(value.to_string())
    }

    pub fn ingredient(value: &str) -> Self {
        Token::Ingredient(value.to_string())
    }

    /// Short name of the token variant, used in logs
    pub fn type_name(&self) -> &'static str {
        match self {
            Token::Literal(_) => "literal",
            Token::Amount(_) => "amount",
            Token::Unit { .. } => "unit",
            Token::Form(_) => "form",
            Token::Ingredient(_) => "ingredient",
        }
    }
}

/// A parsed quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Amount {
    /// Decimal amount (e.g. "2", "1.5", ".5")
    Literal(Decimal),
    /// Fractional amount (e.g. "1/2", "2 1/4")
    Fraction(Fraction),
    /// Range of amounts (e.g. "1-2", "1/4-1/3")
    Range(RangeBounds),
}

impl Amount {
    pub fn literal(value: Decimal) -> Self {
        Amount::Literal(value)
    }

    pub fn fraction(fraction: Fraction) -> Self {
        Amount::Fraction(fraction)
    }

    pub fn literal_range(lower: Decimal, upper: Decimal) -> Self {
        Amount::Range(RangeBounds::Literal { lower, upper })
    }

    pub fn fractional_range(lower: Fraction, upper: Fraction) -> Self {
        Amount::Range(RangeBounds::Fractional { lower, upper })
    }

    pub fn as_literal(&self) -> Option<Decimal> {
        match self {
            Amount::Literal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_fraction(&self) -> Option<&Fraction> {
        match self {
            Amount::Fraction(fraction) => Some(fraction),
            _ => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Literal(value) => write!(f, "{value}"),
            Amount::Fraction(fraction) => write!(f, "{fraction}"),
            Amount::Range(range) => write!(f, "{range}"),
        }
    }
}

/// A fraction with an optional whole-number component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub whole: Option<Decimal>,
    pub numerator: Decimal,
    pub denominator: Decimal,
}

impl Fraction {
    pub fn new(whole: Option<Decimal>, numerator: Decimal, denominator: Decimal) -> Self {
        Self {
            whole,
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.whole {
            Some(whole) => write!(f, "{} {}/{}", whole, self.numerator, self.denominator),
            None => write!(f, "{}/{}", self.numerator, self.denominator),
        }
    }
}

/// Bounds of a range amount. Both bounds always share a shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeBounds {
    Literal { lower: Decimal, upper: Decimal },
    Fractional { lower: Fraction, upper: Fraction },
}

impl fmt::Display for RangeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBounds::Literal { lower, upper } => write!(f, "{lower}-{upper}"),
            RangeBounds::Fractional { lower, upper } => write!(f, "{lower}-{upper}"),
        }
    }
}

/// Unit kinds the unit reader can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    // Volume units
    Teaspoon,
    Tablespoon,
    Cup,
    Milliliter,
    Liter,

    // Weight units
    Gram,
    Kilogram,
    Ounce,
    Pound,

    // Specialized units
    Handful,
    Pinch,
    Can,

    /// Not present in the unit vocabulary
    Unknown,
}

impl UnitKind {
    pub fn is_known(&self) -> bool {
        *self != UnitKind::Unknown
    }
}
