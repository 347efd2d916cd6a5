//! # Parser Configuration Module
//!
//! Serializable parser settings with sensible defaults and environment
//! overrides:
//!
//! | Variable | Field | Example |
//! |---|---|---|
//! | `INGREDIENT_PARSER_STRATEGY` | `strategy` | `best-full-match` |
//! | `INGREDIENT_PARSER_HEURISTIC` | `heuristic` | `weighted-token-sum` |
//! | `INGREDIENT_PARSER_SANITIZE` | `sanitize` | `false` |
//! | `INGREDIENT_PARSER_TEMPLATES` | `templates` | `{amount} {ingredient};{ingredient}` |

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::ParserError;
use crate::match_heuristic::HeuristicOption;
use crate::parser_strategy::StrategyOption;
use crate::template::DEFAULT_TEMPLATE_DEFINITIONS;

pub const STRATEGY_ENV: &str = "INGREDIENT_PARSER_STRATEGY";
pub const HEURISTIC_ENV: &str = "INGREDIENT_PARSER_HEURISTIC";
pub const SANITIZE_ENV: &str = "INGREDIENT_PARSER_SANITIZE";
pub const TEMPLATES_ENV: &str = "INGREDIENT_PARSER_TEMPLATES";

/// Settings used to build an [`IngredientParser`](crate::ingredient_parser::IngredientParser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Template definitions in the order they are attempted
    pub templates: Vec<String>,
    pub strategy: StrategyOption,
    /// Heuristic used by the best-match strategies
    pub heuristic: HeuristicOption,
    /// Whether the default sanitization pipeline runs before parsing
    pub sanitize: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATE_DEFINITIONS
                .iter()
                .map(|definition| definition.to_string())
                .collect(),
            strategy: StrategyOption::default(),
            heuristic: HeuristicOption::default(),
            sanitize: true,
        }
    }
}

impl ParserConfig {
    /// Defaults overlaid with the `INGREDIENT_PARSER_*` environment variables
    pub fn from_env() -> Result<Self, ParserError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ParserError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(strategy) = lookup(STRATEGY_ENV) {
            config.strategy = strategy.trim().parse()?;
        }

        if let Some(heuristic) = lookup(HEURISTIC_ENV) {
            config.heuristic = heuristic.trim().parse()?;
        }

        if let Some(sanitize) = lookup(SANITIZE_ENV) {
            config.sanitize = parse_flag(&sanitize)?;
        }

        if let Some(templates) = lookup(TEMPLATES_ENV) {
            let templates: Vec<String> = templates
                .split(';')
                .map(str::trim)
                .filter(|definition| !definition.is_empty())
                .map(String::from)
                .collect();

            if templates.is_empty() {
                warn!("{} is set but lists no templates, keeping defaults", TEMPLATES_ENV);
            } else {
                config.templates = templates;
            }
        }

        if config.strategy == StrategyOption::FirstFullMatch
            && config.heuristic != HeuristicOption::default()
        {
            warn!("Heuristic {} is ignored by the {} strategy", config.heuristic, config.strategy);
        }

        debug!("Parser configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool, ParserError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ParserError::InvalidConfiguration(format!(
            "'{other}' is not a valid value for {SANITIZE_ENV}"
        ))),
    }
}
