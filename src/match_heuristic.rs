//! # Match Heuristic Module
//!
//! Heuristics score competing template matches and pick a winner. Selection
//! is the arg-max of the score; on ties the first candidate encountered wins,
//! so template order stays meaningful.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::ParserError;
use crate::template::MatchCandidate;
use crate::tokens::Token;

/// Per-token weight used by [`MatchHeuristic::WeightedTokenSum`]
pub type TokenWeight = Arc<dyn Fn(&Token) -> Decimal + Send + Sync>;

/// Scoring function over candidate matches
#[derive(Clone)]
pub enum MatchHeuristic {
    /// Score is the number of matched tokens
    GreatestTokenCount,
    /// Score is the sum of a per-token weight
    WeightedTokenSum(TokenWeight),
}

impl MatchHeuristic {
    pub fn weighted<F>(weight: F) -> Self
    where
        F: Fn(&Token) -> Decimal + Send + Sync + 'static,
    {
        MatchHeuristic::WeightedTokenSum(Arc::new(weight))
    }

    /// Weighted sum using [`default_token_weight`]
    pub fn default_weighted() -> Self {
        Self::weighted(default_token_weight)
    }

    pub fn score(&self, tokens: &[Token]) -> Decimal {
        match self {
            MatchHeuristic::GreatestTokenCount => Decimal::from(tokens.len()),
            MatchHeuristic::WeightedTokenSum(weight) => tokens.iter().map(|token| weight(token)).sum(),
        }
    }

    /// Pick the highest scoring candidate, keeping the earliest on ties
    pub fn select<'t>(&self, candidates: Vec<MatchCandidate<'t>>) -> Option<MatchCandidate<'t>> {
        let mut best: Option<(Decimal, MatchCandidate<'t>)> = None;

        for candidate in candidates {
            let score = self.score(&candidate.result.tokens);
            let is_better = match &best {
                Some((best_score, _)) => score > *best_score,
                None => true,
            };
            if is_better {
                best = Some((score, candidate));
            }
        }

        best.map(|(_, candidate)| candidate)
    }
}

impl Default for MatchHeuristic {
    fn default() -> Self {
        MatchHeuristic::GreatestTokenCount
    }
}

impl fmt::Debug for MatchHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchHeuristic::GreatestTokenCount => write!(f, "GreatestTokenCount"),
            MatchHeuristic::WeightedTokenSum(_) => write!(f, "WeightedTokenSum(..)"),
        }
    }
}

impl From<HeuristicOption> for MatchHeuristic {
    fn from(option: HeuristicOption) -> Self {
        match option {
            HeuristicOption::GreatestTokenCount => MatchHeuristic::GreatestTokenCount,
            HeuristicOption::WeightedTokenSum => MatchHeuristic::default_weighted(),
        }
    }
}

/// Weights favouring informative tokens
///
/// Literal text is worth 0.1 per character, an unresolved unit counts
/// against the match and an ingredient name counts double.
pub fn default_token_weight(token: &Token) -> Decimal {
    match token {
        Token::Literal(text) => Decimal::new(1, 1) * Decimal::from(text.chars().count()),
        Token::Amount(_) => Decimal::ONE,
        Token::Unit { kind, .. } if kind.is_known() => Decimal::ONE,
        Token::Unit { .. } => Decimal::NEGATIVE_ONE,
        Token::Form(_) => Decimal::ONE,
        Token::Ingredient(_) => Decimal::TWO,
    }
}

/// Heuristic selection as it appears in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicOption {
    #[default]
    GreatestTokenCount,
    WeightedTokenSum,
}

impl fmt::Display for HeuristicOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicOption::GreatestTokenCount => write!(f, "greatest-token-count"),
            HeuristicOption::WeightedTokenSum => write!(f, "weighted-token-sum"),
        }
    }
}

impl FromStr for HeuristicOption {
    type Err = ParserError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "greatesttokencount" => Ok(HeuristicOption::GreatestTokenCount),
            "weightedtokensum" => Ok(HeuristicOption::WeightedTokenSum),
            _ => Err(ParserError::InvalidConfiguration(format!(
                "unknown match heuristic '{value}'"
            ))),
        }
    }
}
