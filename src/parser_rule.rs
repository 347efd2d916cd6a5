//! # Parser Rule Module
//!
//! Small combinators for expressing grammars over an [`InputBuffer`].
//!
//! - [`ConditionRule`] checks a predicate and yields no token
//! - [`TokenRule`] delegates to a read function that may yield a token
//! - [`SequenceRule`] runs rules in order, failing as soon as one fails, and
//!   maps the collected tokens into a single result
//!
//! Sequences are assembled with [`ParserRuleBuilder`]:
//!
//! ```rust
//! use ingredient_templates::input_buffer::InputBuffer;
//! use ingredient_templates::parser_rule::{ParserRule, ParserRuleBuilder, RuleResult};
//!
//! fn digit(buffer: &mut InputBuffer) -> Option<u32> {
//!     let c = buffer.peek().ok()?.to_digit(10)?;
//!     buffer.next().ok()?;
//!     Some(c)
//! }
//!
//! let sum = ParserRuleBuilder::new()
//!     .token(digit)
//!     .condition(|buffer| buffer.try_consume('+'))
//!     .token(digit)
//!     .map(|tokens| Some(tokens.iter().sum()))
//!     .build()
//!     .unwrap();
//!
//! let mut buffer = InputBuffer::new("1+2");
//! assert_eq!(sum.execute(&mut buffer), RuleResult::Succeeded(Some(3)));
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::errors::ParserError;
use crate::input_buffer::InputBuffer;

/// Outcome of executing a rule against a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResult<T> {
    /// The rule did not match
    Failed,
    /// The rule matched, optionally yielding a token
    Succeeded(Option<T>),
}

impl<T> RuleResult<T> {
    pub fn succeeded(&self) -> bool {
        matches!(self, RuleResult::Succeeded(_))
    }

    /// The yielded token, if the rule matched and produced one
    pub fn into_token(self) -> Option<T> {
        match self {
            RuleResult::Succeeded(token) => token,
            RuleResult::Failed => None,
        }
    }
}

/// A rule that can be applied to an [`InputBuffer`]
pub trait ParserRule<T> {
    fn execute(&self, buffer: &mut InputBuffer) -> RuleResult<T>;
}

/// Boxed rule that can live in a shared rule table
pub type BoxedRule<T> = Box<dyn ParserRule<T> + Send + Sync>;

/// Maps the tokens collected by a sequence into its result
pub type TokenMapper<T> = Box<dyn Fn(Vec<T>) -> Option<T> + Send + Sync>;

/// Succeeds without a token when the condition holds
///
/// Whatever the condition consumes stays consumed, so conditions built on
/// `try_consume` advance the buffer.
pub struct ConditionRule<F> {
    condition: F,
}

impl<F> ConditionRule<F>
where
    F: Fn(&mut InputBuffer) -> bool,
{
    pub fn new(condition: F) -> Self {
        Self { condition }
    }
}

impl<T, F> ParserRule<T> for ConditionRule<F>
where
    F: Fn(&mut InputBuffer) -> bool,
{
    fn execute(&self, buffer: &mut InputBuffer) -> RuleResult<T> {
        if (self.condition)(buffer) {
            RuleResult::Succeeded(None)
        } else {
            RuleResult::Failed
        }
    }
}

/// Succeeds with a token when the read function returns one
pub struct TokenRule<T, F> {
    read: F,
    _token: PhantomData<fn() -> T>,
}

impl<T, F> TokenRule<T, F>
where
    F: Fn(&mut InputBuffer) -> Option<T>,
{
    pub fn new(read: F) -> Self {
        Self {
            read,
            _token: PhantomData,
        }
    }
}

impl<T, F> ParserRule<T> for TokenRule<T, F>
where
    F: Fn(&mut InputBuffer) -> Option<T>,
{
    fn execute(&self, buffer: &mut InputBuffer) -> RuleResult<T> {
        match (self.read)(buffer) {
            Some(token) => RuleResult::Succeeded(Some(token)),
            None => RuleResult::Failed,
        }
    }
}

/// Runs inner rules in order; all must succeed
///
/// A failing inner rule aborts the sequence with no partial output. The
/// sequence does not rewind the buffer itself; callers wanting backtracking
/// wrap execution in a checkpoint.
pub struct SequenceRule<T> {
    rules: Vec<BoxedRule<T>>,
    mapper: TokenMapper<T>,
}

impl<T> ParserRule<T> for SequenceRule<T> {
    fn execute(&self, buffer: &mut InputBuffer) -> RuleResult<T> {
        let mut tokens = Vec::new();

        for rule in &self.rules {
            match rule.execute(buffer) {
                RuleResult::Failed => return RuleResult::Failed,
                RuleResult::Succeeded(Some(token)) => tokens.push(token),
                RuleResult::Succeeded(None) => {}
            }
        }

        match (self.mapper)(tokens) {
            Some(token) => RuleResult::Succeeded(Some(token)),
            None => RuleResult::Failed,
        }
    }
}

impl<T> fmt::Debug for SequenceRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceRule")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`SequenceRule`]
pub struct ParserRuleBuilder<T> {
    rules: Vec<BoxedRule<T>>,
    mapper: Option<TokenMapper<T>>,
}

impl<T: 'static> Default for ParserRuleBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> ParserRuleBuilder<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mapper: None,
        }
    }

    /// Append a [`ConditionRule`]
    pub fn condition<F>(self, condition: F) -> Self
    where
        F: Fn(&mut InputBuffer) -> bool + Send + Sync + 'static,
    {
        self.rule(ConditionRule::new(condition))
    }

    /// Append a [`TokenRule`]
    pub fn token<F>(self, read: F) -> Self
    where
        F: Fn(&mut InputBuffer) -> Option<T> + Send + Sync + 'static,
    {
        self.rule(TokenRule::new(read))
    }

    /// Append any rule
    pub fn rule<R>(mut self, rule: R) -> Self
    where
        R: ParserRule<T> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Set the mapper applied to the collected tokens on success.
    /// Returning `None` from the mapper fails the sequence.
    pub fn map<M>(mut self, mapper: M) -> Self
    where
        M: Fn(Vec<T>) -> Option<T> + Send + Sync + 'static,
    {
        self.mapper = Some(Box::new(mapper));
        self
    }

    pub fn build(self) -> Result<SequenceRule<T>, ParserError> {
        if self.rules.is_empty() {
            return Err(ParserError::InvalidConfiguration(
                "one or more rules must be configured".to_string(),
            ));
        }

        let mapper = self.mapper.ok_or_else(|| {
            ParserError::InvalidConfiguration("a mapper must be configured".to_string())
        })?;

        Ok(SequenceRule {
            rules: self.rules,
            mapper,
        })
    }
}
