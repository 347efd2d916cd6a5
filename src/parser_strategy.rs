//! # Parser Strategy Module
//!
//! Strategies decide which template attempt wins a parse.
//!
//! - [`FirstFullMatchStrategy`]: the first template that fully matches
//! - [`BestFullMatchStrategy`]: the best full match according to a heuristic
//! - [`BestPartialMatchStrategy`]: the first full match if any, otherwise
//!   the best partial match according to a heuristic
//!
//! Every template attempt runs inside its own uncommitted checkpoint, so each
//! template reads from the position the parse started at.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::ParserError;
use crate::input_buffer::InputBuffer;
use crate::match_heuristic::MatchHeuristic;
use crate::parse_result::ParseResult;
use crate::template::{MatchCandidate, MatchKind, Template, TemplateMatch};

/// Template selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyOption {
    #[default]
    FirstFullMatch,
    BestFullMatch,
    BestPartialMatch,
}

impl fmt::Display for StrategyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyOption::FirstFullMatch => write!(f, "first-full-match"),
            StrategyOption::BestFullMatch => write!(f, "best-full-match"),
            StrategyOption::BestPartialMatch => write!(f, "best-partial-match"),
        }
    }
}

impl FromStr for StrategyOption {
    type Err = ParserError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "firstfullmatch" => Ok(StrategyOption::FirstFullMatch),
            "bestfullmatch" => Ok(StrategyOption::BestFullMatch),
            "bestpartialmatch" => Ok(StrategyOption::BestPartialMatch),
            _ => Err(ParserError::InvalidConfiguration(format!(
                "unknown parser strategy '{value}'"
            ))),
        }
    }
}

/// A template selection policy
pub trait ParserStrategy: fmt::Debug + Send + Sync {
    /// Whether this strategy implements `option`
    fn handles(&self, option: StrategyOption) -> bool;

    /// Attempt `templates` against the buffer and build the result
    fn parse(&self, buffer: &mut InputBuffer, templates: &[Template]) -> ParseResult;
}

/// Attempt one template from the buffer's current position, then rewind
fn attempt(buffer: &mut InputBuffer, template: &Template) -> TemplateMatch {
    let mut checkpoint = buffer.checkpoint();
    let result = template.try_read_tokens(&mut checkpoint);

    debug!(
        "Template '{}' -> {:?} with {} tokens",
        template.definition(),
        result.kind,
        result.tokens.len()
    );
    result
}

fn definitions(templates: &[Template]) -> Vec<String> {
    templates
        .iter()
        .map(|template| template.definition().to_string())
        .collect()
}

/// Returns the first full match in template order
#[derive(Debug, Clone, Default)]
pub struct FirstFullMatchStrategy;

impl ParserStrategy for FirstFullMatchStrategy {
    fn handles(&self, option: StrategyOption) -> bool {
        option == StrategyOption::FirstFullMatch
    }

    fn parse(&self, buffer: &mut InputBuffer, templates: &[Template]) -> ParseResult {
        let mut attempted = Vec::new();

        for template in templates {
            attempted.push(template.definition().to_string());
            let result = attempt(buffer, template);

            if result.is_full() {
                debug!("First full match: '{}'", template.definition());
                return ParseResult::matched(MatchCandidate { template, result }, attempted);
            }
        }

        ParseResult::failed(attempted)
    }
}

/// Returns the best full match according to a heuristic
#[derive(Debug, Clone, Default)]
pub struct BestFullMatchStrategy {
    heuristic: MatchHeuristic,
}

impl BestFullMatchStrategy {
    pub fn new(heuristic: MatchHeuristic) -> Self {
        Self { heuristic }
    }
}

impl ParserStrategy for BestFullMatchStrategy {
    fn handles(&self, option: StrategyOption) -> bool {
        option == StrategyOption::BestFullMatch
    }

    fn parse(&self, buffer: &mut InputBuffer, templates: &[Template]) -> ParseResult {
        let candidates: Vec<MatchCandidate> = templates
            .iter()
            .map(|template| MatchCandidate {
                template,
                result: attempt(buffer, template),
            })
            .filter(|candidate| candidate.result.is_full())
            .collect();

        debug!("{} full matches to select from", candidates.len());

        match self.heuristic.select(candidates) {
            Some(best) => ParseResult::matched(best, definitions(templates)),
            None => ParseResult::failed(definitions(templates)),
        }
    }
}

/// Returns the first full match, or else the best partial match
#[derive(Debug, Clone, Default)]
pub struct BestPartialMatchStrategy {
    heuristic: MatchHeuristic,
}

impl BestPartialMatchStrategy {
    pub fn new(heuristic: MatchHeuristic) -> Self {
        Self { heuristic }
    }
}

impl ParserStrategy for BestPartialMatchStrategy {
    fn handles(&self, option: StrategyOption) -> bool {
        option == StrategyOption::BestPartialMatch
    }

    fn parse(&self, buffer: &mut InputBuffer, templates: &[Template]) -> ParseResult {
        let mut attempted = Vec::new();
        let mut partial_matches = Vec::new();

        for template in templates {
            attempted.push(template.definition().to_string());
            let result = attempt(buffer, template);

            match result.kind {
                MatchKind::FullMatch => {
                    debug!("Full match short-circuits partial selection: '{}'", template.definition());
                    return ParseResult::matched(MatchCandidate { template, result }, attempted);
                }
                MatchKind::PartialMatch => partial_matches.push(MatchCandidate { template, result }),
                MatchKind::NoMatch => {}
            }
        }

        debug!("{} partial matches to select from", partial_matches.len());

        match self.heuristic.select(partial_matches) {
            Some(best) => ParseResult::matched(best, attempted),
            None => ParseResult::failed(attempted),
        }
    }
}

/// Resolves a [`StrategyOption`] to a registered strategy
#[derive(Debug, Clone)]
pub struct StrategyFactory {
    strategies: Vec<Arc<dyn ParserStrategy>>,
}

impl StrategyFactory {
    /// The three built-in strategies, best-match ones using `heuristic`
    pub fn new(heuristic: MatchHeuristic) -> Self {
        Self::with_strategies(vec![
            Arc::new(FirstFullMatchStrategy),
            Arc::new(BestFullMatchStrategy::new(heuristic.clone())),
            Arc::new(BestPartialMatchStrategy::new(heuristic)),
        ])
    }

    pub fn with_strategies(strategies: Vec<Arc<dyn ParserStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn get(&self, option: StrategyOption) -> Result<Arc<dyn ParserStrategy>, ParserError> {
        self.strategies
            .iter()
            .find(|strategy| strategy.handles(option))
            .cloned()
            .ok_or(ParserError::StrategyNotFound(option))
    }
}

impl Default for StrategyFactory {
    fn default() -> Self {
        Self::new(MatchHeuristic::default())
    }
}
