//! # Ingredient Templates
//!
//! Parses free-text recipe ingredient lines ("1 cup grated cheese") into
//! amount, unit, form and ingredient fields by matching them against
//! parameterized templates ("{amount} {unit} {form} {ingredient}").

pub mod amount_grammar;
pub mod config;
pub mod errors;
pub mod ingredient_parser;
pub mod input_buffer;
pub mod match_heuristic;
pub mod parse_result;
pub mod parser_rule;
pub mod parser_strategy;
pub mod sanitization;
pub mod template;
pub mod token_readers;
pub mod tokens;
pub mod vocabulary;
