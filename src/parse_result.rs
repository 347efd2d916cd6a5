//! # Parse Result Module
//!
//! The outcome of parsing one ingredient line. A failed parse is an ordinary
//! value: `details` is `None` and the metadata lists every template that was
//! attempted.

use serde::{Deserialize, Serialize};

use crate::template::{MatchCandidate, MatchKind};
use crate::tokens::Token;

/// Structured fields extracted from an ingredient line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDetails {
    pub amount: Option<String>,
    pub unit: Option<String>,
    pub form: Option<String>,
    pub ingredient: Option<String>,
}

impl IngredientDetails {
    /// Project a token list onto the four output fields
    ///
    /// Literal tokens never touch the output. Amounts are rendered to their
    /// canonical string form.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut details = Self::default();

        for token in tokens {
            match token {
                Token::Literal(_) => {}
                Token::Amount(amount) => details.amount = Some(amount.to_string()),
                Token::Unit { raw, .. } => details.unit = Some(raw.clone()),
                Token::Form(form) => details.form = Some(form.clone()),
                Token::Ingredient(ingredient) => details.ingredient = Some(ingredient.clone()),
            }
        }

        details
    }
}

/// Diagnostics describing how a result was reached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMetadata {
    /// Definition of the winning template
    pub template: Option<String>,
    /// Tokens read by the winning template
    pub tokens: Vec<Token>,
    pub match_kind: Option<MatchKind>,
    /// Every template definition attempted, in order
    pub attempted_templates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    pub details: Option<IngredientDetails>,
    pub metadata: ParseMetadata,
}

impl ParseResult {
    /// Successful result built from the winning candidate
    pub fn matched(candidate: MatchCandidate<'_>, attempted_templates: Vec<String>) -> Self {
        let details = IngredientDetails::from_tokens(&candidate.result.tokens);

        Self {
            success: true,
            details: Some(details),
            metadata: ParseMetadata {
                template: Some(candidate.template.definition().to_string()),
                tokens: candidate.result.tokens,
                match_kind: Some(candidate.result.kind),
                attempted_templates,
            },
        }
    }

    pub fn failed(attempted_templates: Vec<String>) -> Self {
        Self {
            success: false,
            details: None,
            metadata: ParseMetadata {
                attempted_templates,
                ..ParseMetadata::default()
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn amount(&self) -> Option<&str> {
        self.details.as_ref()?.amount.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.details.as_ref()?.unit.as_deref()
    }

    pub fn form(&self) -> Option<&str> {
        self.details.as_ref()?.form.as_deref()
    }

    pub fn ingredient(&self) -> Option<&str> {
        self.details.as_ref()?.ingredient.as_deref()
    }
}
