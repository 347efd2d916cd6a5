//! # Token Readers Module
//!
//! Readers consume characters from an [`InputBuffer`] and produce a typed
//! [`Token`], or fail without a token.
//!
//! | Reader | Scans | Resolution |
//! |---|---|---|
//! | [`AmountReader`] | digits, `-`, `/`, `.` and internal spaces | amount grammar |
//! | [`UnitReader`] | letters and `.` | unit vocabulary, `Unknown` when absent |
//! | [`FormReader`] | letters, stopping at the first known form | form vocabulary |
//! | [`IngredientReader`] | letters, whitespace, `-` | trimmed, non-empty |
//! | [`LiteralReader`] | exact template text | char-by-char equality |
//!
//! Readers are looked up by placeholder name through a [`TokenReaderFactory`].

use log::trace;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::amount_grammar::{parse_amount, scan_raw_amount};
use crate::input_buffer::InputBuffer;
use crate::tokens::{Token, UnitKind};
use crate::vocabulary::{default_forms, default_units};

/// Reads a single token from the buffer
pub trait TokenReader: fmt::Debug + Send + Sync {
    /// Placeholder name this reader is registered under (e.g. `"amount"`)
    fn token_type(&self) -> &str;

    /// Attempt to read a token at the cursor. Returns `None` on failure;
    /// characters consumed before failing are not restored.
    fn read_token(&self, buffer: &mut InputBuffer) -> Option<Token>;
}

/// Reads amounts such as "2", "1 1/2" or "1/4-1/3"
#[derive(Debug, Clone, Default)]
pub struct AmountReader;

impl TokenReader for AmountReader {
    fn token_type(&self) -> &str {
        "amount"
    }

    fn read_token(&self, buffer: &mut InputBuffer) -> Option<Token> {
        let raw_amount = scan_raw_amount(buffer);
        if raw_amount.is_empty() {
            return None;
        }

        parse_amount(&raw_amount).map(Token::Amount)
    }
}

/// Reads units and resolves them against a unit vocabulary
#[derive(Debug, Clone)]
pub struct UnitReader {
    units: HashMap<String, UnitKind>,
}

impl UnitReader {
    pub fn new(units: HashMap<String, UnitKind>) -> Self {
        Self { units }
    }

    fn unit_kind(&self, raw_unit: &str) -> UnitKind {
        self.units
            .get(raw_unit)
            .copied()
            .unwrap_or(UnitKind::Unknown)
    }
}

impl Default for UnitReader {
    fn default() -> Self {
        Self::new(default_units())
    }
}

impl TokenReader for UnitReader {
    fn token_type(&self) -> &str {
        "unit"
    }

    fn read_token(&self, buffer: &mut InputBuffer) -> Option<Token> {
        let mut raw_unit = String::new();

        while buffer.is_letter() || buffer.matches(|c| c == '.') {
            raw_unit.push(buffer.next().ok()?);
        }

        if raw_unit.is_empty() {
            return None;
        }

        let kind = self.unit_kind(&raw_unit);
        Some(Token::Unit {
            raw: raw_unit,
            kind,
        })
    }
}

/// Reads preparation forms such as "grated" or "chopped"
///
/// Letters are accumulated until the text read so far is a known form; the
/// first match wins, even when a longer form would also match.
#[derive(Debug, Clone)]
pub struct FormReader {
    forms: HashSet<String>,
}

impl FormReader {
    pub fn new(forms: HashSet<String>) -> Self {
        Self { forms }
    }
}

impl Default for FormReader {
    fn default() -> Self {
        Self::new(default_forms())
    }
}

impl TokenReader for FormReader {
    fn token_type(&self) -> &str {
        "form"
    }

    fn read_token(&self, buffer: &mut InputBuffer) -> Option<Token> {
        let mut raw_form = String::new();

        while buffer.is_letter() {
            raw_form.push(buffer.next().ok()?);

            if self.forms.contains(&raw_form) {
                return Some(Token::Form(raw_form));
            }
        }

        trace!("No known form matched '{}'", raw_form);
        None
    }
}

/// Reads ingredient names
#[derive(Debug, Clone, Default)]
pub struct IngredientReader;

impl TokenReader for IngredientReader {
    fn token_type(&self) -> &str {
        "ingredient"
    }

    fn read_token(&self, buffer: &mut InputBuffer) -> Option<Token> {
        let mut raw_ingredient = String::new();

        while buffer.is_letter() || buffer.is_whitespace() || buffer.matches(|c| c == '-') {
            raw_ingredient.push(buffer.next().ok()?);
        }

        let ingredient = raw_ingredient.trim();
        if ingredient.is_empty() {
            return None;
        }

        Some(Token::ingredient(ingredient))
    }
}

/// Reads a fixed piece of template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralReader {
    value: String,
}

impl LiteralReader {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl TokenReader for LiteralReader {
    fn token_type(&self) -> &str {
        "literal"
    }

    fn read_token(&self, buffer: &mut InputBuffer) -> Option<Token> {
        for c in self.value.chars() {
            if !buffer.try_consume(c) {
                return None;
            }
        }

        Some(Token::literal(&self.value))
    }
}

/// Looks up token readers by placeholder name
#[derive(Debug, Clone)]
pub struct TokenReaderFactory {
    readers: Vec<Arc<dyn TokenReader>>,
}

impl TokenReaderFactory {
    pub fn new(readers: Vec<Arc<dyn TokenReader>>) -> Self {
        Self { readers }
    }

    /// Register an additional reader. Earlier registrations win on lookup.
    pub fn with_reader<R>(mut self, reader: R) -> Self
    where
        R: TokenReader + 'static,
    {
        self.readers.push(Arc::new(reader));
        self
    }

    /// The reader registered for `token_type`, if any
    pub fn get(&self, token_type: &str) -> Option<Arc<dyn TokenReader>> {
        self.readers
            .iter()
            .find(|reader| reader.token_type() == token_type)
            .cloned()
    }

    pub fn token_types(&self) -> Vec<&str> {
        self.readers.iter().map(|reader| reader.token_type()).collect()
    }
}

impl Default for TokenReaderFactory {
    /// Amount, unit, form and ingredient readers with the default vocabulary
    fn default() -> Self {
        Self::new(vec![
            Arc::new(AmountReader),
            Arc::new(UnitReader::default()),
            Arc::new(FormReader::default()),
            Arc::new(IngredientReader),
        ])
    }
}
