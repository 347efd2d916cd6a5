//! # Ingredient Parser Module
//!
//! Entry point for parsing ingredient lines. An [`IngredientParser`] owns its
//! compiled templates, a selection strategy and the sanitization rules applied
//! before each parse. It is immutable once built and can be shared across
//! threads; every call gets its own [`InputBuffer`].
//!
//! ```rust
//! use ingredient_templates::ingredient_parser::IngredientParser;
//!
//! let parser = IngredientParser::builder()
//!     .with_default_configuration()
//!     .build()
//!     .unwrap();
//!
//! let result = parser.parse_ingredient("2 cups grated cheese").unwrap();
//! assert_eq!(result.amount(), Some("2"));
//! assert_eq!(result.unit(), Some("cups"));
//! ```

use log::{debug, info};
use std::sync::Arc;

use crate::config::ParserConfig;
use crate::errors::ParserError;
use crate::input_buffer::InputBuffer;
use crate::match_heuristic::MatchHeuristic;
use crate::parse_result::ParseResult;
use crate::parser_strategy::{ParserStrategy, StrategyFactory, StrategyOption};
use crate::sanitization::{default_rules, sanitize, SanitizationRule};
use crate::template::{compile_all, Template, DEFAULT_TEMPLATE_DEFINITIONS};
use crate::token_readers::TokenReaderFactory;

/// Parses raw ingredient lines into structured results
#[derive(Debug, Clone)]
pub struct IngredientParser {
    templates: Vec<Template>,
    strategy: Arc<dyn ParserStrategy>,
    sanitization_rules: Vec<Arc<dyn SanitizationRule>>,
}

impl IngredientParser {
    pub fn builder() -> IngredientParserBuilder {
        IngredientParserBuilder::default()
    }

    /// Build a parser with the default readers from a [`ParserConfig`]
    pub fn from_config(config: &ParserConfig) -> Result<Self, ParserError> {
        let rules = if config.sanitize {
            default_rules()
        } else {
            Vec::new()
        };

        Self::builder()
            .with_template_definitions(config.templates.as_slice())
            .with_token_reader_factory(TokenReaderFactory::default())
            .with_strategy_option(config.strategy, MatchHeuristic::from(config.heuristic))
            .with_sanitization_rules(rules)
            .build()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Parse a raw ingredient line
    ///
    /// A line no template matches yields an unsuccessful [`ParseResult`],
    /// not an error. Only empty input is rejected.
    pub fn parse_ingredient(&self, raw_ingredient: &str) -> Result<ParseResult, ParserError> {
        if raw_ingredient.trim().is_empty() {
            return Err(ParserError::InvalidInput(
                "an ingredient must be provided".to_string(),
            ));
        }

        let sanitized = sanitize(raw_ingredient, &self.sanitization_rules);
        debug!("Sanitized '{}' -> '{}'", raw_ingredient, sanitized);

        let mut buffer = InputBuffer::new(&sanitized);
        let result = self.strategy.parse(&mut buffer, &self.templates);

        debug!(
            "Parsed '{}' with template {:?} (success: {})",
            raw_ingredient, result.metadata.template, result.success
        );
        Ok(result)
    }

    /// Parse a raw ingredient line, keeping only successful results
    pub fn try_parse_ingredient(&self, raw_ingredient: &str) -> Option<ParseResult> {
        self.parse_ingredient(raw_ingredient)
            .ok()
            .filter(ParseResult::is_success)
    }
}

#[derive(Debug, Clone)]
enum StrategySelection {
    Instance(Arc<dyn ParserStrategy>),
    Resolve(StrategyOption, MatchHeuristic),
}

/// Builder for [`IngredientParser`]
///
/// Templates, a token reader factory and a strategy are required. Sanitization
/// rules are optional; without them raw input is parsed as given.
#[derive(Debug, Clone, Default)]
pub struct IngredientParserBuilder {
    template_definitions: Option<Vec<String>>,
    token_reader_factory: Option<TokenReaderFactory>,
    strategy: Option<StrategySelection>,
    sanitization_rules: Vec<Arc<dyn SanitizationRule>>,
}

impl IngredientParserBuilder {
    pub fn with_template_definitions<S>(mut self, definitions: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        self.template_definitions = Some(
            definitions
                .iter()
                .map(|definition| definition.as_ref().to_string())
                .collect(),
        );
        self
    }

    pub fn with_token_reader_factory(mut self, factory: TokenReaderFactory) -> Self {
        self.token_reader_factory = Some(factory);
        self
    }

    pub fn with_parser_strategy<S>(mut self, strategy: S) -> Self
    where
        S: ParserStrategy + 'static,
    {
        self.strategy = Some(StrategySelection::Instance(Arc::new(strategy)));
        self
    }

    /// Resolve the strategy for `option` through a [`StrategyFactory`] at build time
    pub fn with_strategy_option(mut self, option: StrategyOption, heuristic: MatchHeuristic) -> Self {
        self.strategy = Some(StrategySelection::Resolve(option, heuristic));
        self
    }

    pub fn with_sanitization_rules(mut self, rules: Vec<Arc<dyn SanitizationRule>>) -> Self {
        self.sanitization_rules = rules;
        self
    }

    /// Stock templates, default readers, first-full-match selection and the
    /// default sanitization pipeline
    pub fn with_default_configuration(self) -> Self {
        self.with_template_definitions(&DEFAULT_TEMPLATE_DEFINITIONS)
            .with_token_reader_factory(TokenReaderFactory::default())
            .with_strategy_option(StrategyOption::default(), MatchHeuristic::default())
            .with_sanitization_rules(default_rules())
    }

    pub fn build(self) -> Result<IngredientParser, ParserError> {
        let definitions = self.template_definitions.ok_or_else(|| {
            ParserError::InvalidConfiguration("templates must be configured".to_string())
        })?;
        if definitions.is_empty() {
            return Err(ParserError::InvalidConfiguration(
                "at least one template must be configured".to_string(),
            ));
        }

        let factory = self.token_reader_factory.ok_or_else(|| {
            ParserError::InvalidConfiguration("a token reader factory must be configured".to_string())
        })?;

        let strategy = match self.strategy {
            Some(StrategySelection::Instance(strategy)) => strategy,
            Some(StrategySelection::Resolve(option, heuristic)) => {
                StrategyFactory::new(heuristic).get(option)?
            }
            None => {
                return Err(ParserError::InvalidConfiguration(
                    "a parser strategy must be configured".to_string(),
                ))
            }
        };

        let templates = compile_all(definitions.as_slice(), &factory)?;

        info!(
            "Built ingredient parser with {} templates, strategy {:?} and {} sanitization rules",
            templates.len(),
            strategy,
            self.sanitization_rules.len()
        );

        Ok(IngredientParser {
            templates,
            strategy,
            sanitization_rules: self.sanitization_rules,
        })
    }
}
