//! # Parser Error Types Module
//!
//! This module defines the error taxonomy shared by the template engine.
//! Failing to match an ingredient line is not an error: it is reported as a
//! failed [`ParseResult`](crate::parse_result::ParseResult). The variants
//! below cover protocol misuse and invalid static configuration only.

use crate::input_buffer::BufferError;
use crate::parser_strategy::StrategyOption;

/// Errors raised while configuring or driving an ingredient parser
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParserError {
    /// A required piece of configuration was missing or malformed
    #[error("invalid parser configuration: {0}")]
    InvalidConfiguration(String),

    /// A template placeholder has no registered token reader
    #[error("no token reader registered for '{{{token_type}}}' in template '{definition}'")]
    UnknownTokenType {
        token_type: String,
        definition: String,
    },

    /// No registered strategy handles the requested selection policy
    #[error("no parser strategy found that can handle {0}")]
    StrategyNotFound(StrategyOption),

    /// The raw ingredient was empty
    #[error("input is not able to be parsed: {0}")]
    InvalidInput(String),

    /// Buffer protocol violation
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
