//! # Template Module
//!
//! A template describes one accepted ingredient-line shape, written as literal
//! text interspersed with `{token_type}` placeholders:
//!
//! ```text
//! {amount} {unit} {form} {ingredient}
//! ```
//!
//! Compilation splits the definition into alternating literal and placeholder
//! segments. Literal segments are kept even when empty, so a definition with
//! `k` placeholders always compiles to `2k + 1` readers. Placeholders resolve
//! through a [`TokenReaderFactory`]; a placeholder with no registered reader
//! is a configuration error.
//!
//! Matching runs the readers in order against a caller-owned buffer and
//! classifies the outcome as a [`MatchKind`]. The buffer is not rewound here;
//! strategies reset it before each attempt.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::errors::ParserError;
use crate::input_buffer::InputBuffer;
use crate::token_readers::{LiteralReader, TokenReader, TokenReaderFactory};
use crate::tokens::Token;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{(?P<token_type>[a-z]+)\}").expect("placeholder regex should be valid");
}

/// Stock template definitions
pub mod definitions {
    pub const AMOUNT_UNIT_FORM_INGREDIENT: &str = "{amount} {unit} {form} {ingredient}";
    pub const AMOUNT_UNIT_INGREDIENT: &str = "{amount} {unit} {ingredient}";
    pub const AMOUNT_UNIT_NO_SPACE_INGREDIENT: &str = "{amount}{unit} {ingredient}";
    pub const INGREDIENT_AMOUNT_UNIT: &str = "{ingredient}: {amount} {unit}";
    pub const AMOUNT_INGREDIENT_FORM: &str = "{amount} {ingredient}, {form}";
    pub const AMOUNT_UNIT_INGREDIENT_FORM: &str = "{amount} {unit} {ingredient}, {form}";
    pub const AMOUNT_UNIT_OF_FORM_INGREDIENT: &str = "{amount} {unit} of {form} {ingredient}";
    pub const UNIT_OF_FORM_INGREDIENT: &str = "{unit} of {form} {ingredient}";
    pub const INGREDIENT: &str = "{ingredient}";
    pub const AMOUNT_INGREDIENT: &str = "{amount} {ingredient}";
}

/// Stock templates in the order they are attempted
pub const DEFAULT_TEMPLATE_DEFINITIONS: [&str; 10] = [
    definitions::AMOUNT_UNIT_FORM_INGREDIENT,
    definitions::AMOUNT_UNIT_INGREDIENT,
    definitions::AMOUNT_UNIT_NO_SPACE_INGREDIENT,
    definitions::INGREDIENT_AMOUNT_UNIT,
    definitions::AMOUNT_INGREDIENT_FORM,
    definitions::AMOUNT_UNIT_INGREDIENT_FORM,
    definitions::AMOUNT_UNIT_OF_FORM_INGREDIENT,
    definitions::UNIT_OF_FORM_INGREDIENT,
    definitions::INGREDIENT,
    definitions::AMOUNT_INGREDIENT,
];

/// Classification of a single template attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// The first reader failed
    NoMatch,
    /// Some readers succeeded before one failed
    PartialMatch,
    /// Every reader succeeded
    FullMatch,
}

/// Outcome of running a template's readers over a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMatch {
    pub kind: MatchKind,
    /// Tokens read up to the first failing reader
    pub tokens: Vec<Token>,
}

impl TemplateMatch {
    pub fn is_full(&self) -> bool {
        self.kind == MatchKind::FullMatch
    }
}

/// A template attempt retained by a strategy for selection
#[derive(Debug, Clone)]
pub struct MatchCandidate<'t> {
    pub template: &'t Template,
    pub result: TemplateMatch,
}

/// A compiled template
#[derive(Debug, Clone)]
pub struct Template {
    definition: String,
    readers: Vec<Arc<dyn TokenReader>>,
}

impl Template {
    /// Compile `definition` against the readers registered in `factory`
    pub fn compile(definition: &str, factory: &TokenReaderFactory) -> Result<Self, ParserError> {
        let mut readers: Vec<Arc<dyn TokenReader>> = Vec::new();
        let mut literal_start = 0;

        for captures in PLACEHOLDER_REGEX.captures_iter(definition) {
            let (Some(placeholder), Some(token_type)) = (captures.get(0), captures.name("token_type"))
            else {
                continue;
            };

            readers.push(Arc::new(LiteralReader::new(
                &definition[literal_start..placeholder.start()],
            )));

            let reader = factory
                .get(token_type.as_str())
                .ok_or_else(|| ParserError::UnknownTokenType {
                    token_type: token_type.as_str().to_string(),
                    definition: definition.to_string(),
                })?;
            readers.push(reader);

            literal_start = placeholder.end();
        }

        readers.push(Arc::new(LiteralReader::new(&definition[literal_start..])));

        Ok(Self {
            definition: definition.to_string(),
            readers,
        })
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Number of compiled readers, literal segments included
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// Run every reader in order from the buffer's current position
    pub fn try_read_tokens(&self, buffer: &mut InputBuffer) -> TemplateMatch {
        let mut tokens = Vec::with_capacity(self.readers.len());

        for reader in &self.readers {
            match reader.read_token(buffer) {
                Some(token) => {
                    trace!("Reader '{}' produced a {} token", reader.token_type(), token.type_name());
                    tokens.push(token);
                }
                None => {
                    trace!(
                        "Reader '{}' failed at position {} of '{}'",
                        reader.token_type(),
                        buffer.position(),
                        self.definition
                    );
                    let kind = if tokens.is_empty() {
                        MatchKind::NoMatch
                    } else {
                        MatchKind::PartialMatch
                    };
                    return TemplateMatch { kind, tokens };
                }
            }
        }

        TemplateMatch {
            kind: MatchKind::FullMatch,
            tokens,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition)
    }
}

/// Compile a list of definitions, failing on the first invalid one
pub fn compile_all<S>(definitions: &[S], factory: &TokenReaderFactory) -> Result<Vec<Template>, ParserError>
where
    S: AsRef<str>,
{
    definitions
        .iter()
        .map(|definition| Template::compile(definition.as_ref(), factory))
        .collect()
}
