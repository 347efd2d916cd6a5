//! # Amount Grammar Module
//!
//! Recursive-descent parser with backtracking for ingredient amounts:
//!
//! ```text
//! amount   := range | fraction | literal
//! range    := fraction '-' fraction | literal '-' literal   (spaces allowed around '-')
//! fraction := literal (' ' | '-') literal '/' literal | literal '/' literal
//! literal  := digits with at most one decimal point
//! ```
//!
//! Each alternative runs inside its own checkpoint that is only committed on
//! success, so a failed alternative rewinds before the next one is tried.
//! The whole raw amount must be consumed for a parse to succeed.
//!
//! ```rust
//! use ingredient_templates::amount_grammar::parse_amount;
//!
//! assert_eq!(parse_amount("1/4-1/3").unwrap().to_string(), "1/4-1/3");
//! assert_eq!(parse_amount("2 1/2").unwrap().to_string(), "2 1/2");
//! assert!(parse_amount("1/3-1").is_none());
//! ```

use lazy_static::lazy_static;
use log::trace;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::input_buffer::InputBuffer;
use crate::parser_rule::{ParserRule, ParserRuleBuilder, SequenceRule};
use crate::tokens::{Amount, Fraction};

lazy_static! {
    // amount = range | fraction | literal
    static ref AMOUNT_RULES: Vec<SequenceRule<Amount>> = vec![
        // Range e.g. 1-4, ensuring all input is consumed
        ParserRuleBuilder::new()
            .token(range)
            .condition(|buffer| !buffer.has_next())
            .map(single)
            .build()
            .expect("range amount rule should be valid"),
        // Fraction e.g. 1/2
        ParserRuleBuilder::new()
            .token(fraction)
            .condition(|buffer| !buffer.has_next())
            .map(single)
            .build()
            .expect("fraction amount rule should be valid"),
        // Literal e.g. 2
        ParserRuleBuilder::new()
            .token(literal)
            .condition(|buffer| !buffer.has_next())
            .map(single)
            .build()
            .expect("literal amount rule should be valid"),
    ];

    // range = fraction-fraction | literal-literal
    static ref RANGE_RULES: Vec<SequenceRule<Amount>> = vec![
        // Fractional range e.g. 1/4-1/3
        ParserRuleBuilder::new()
            .token(fraction)
            .condition(|buffer| buffer.optionally_consume(' '))
            .condition(|buffer| buffer.try_consume('-'))
            .condition(|buffer| buffer.optionally_consume(' '))
            .token(fraction)
            .map(|tokens| {
                let [lower, upper] = fractions(tokens)?;
                Some(Amount::fractional_range(lower, upper))
            })
            .build()
            .expect("fractional range rule should be valid"),
        // Literal range e.g. 1-2
        ParserRuleBuilder::new()
            .token(literal)
            .condition(|buffer| buffer.optionally_consume(' '))
            .condition(|buffer| buffer.try_consume('-'))
            .condition(|buffer| buffer.optionally_consume(' '))
            .token(literal)
            .map(|tokens| {
                let [lower, upper] = literals::<2>(tokens)?;
                Some(Amount::literal_range(lower, upper))
            })
            .build()
            .expect("literal range rule should be valid"),
    ];

    // fraction = literal-literal/literal | literal literal/literal | literal/literal
    static ref FRACTION_RULES: Vec<SequenceRule<Amount>> = vec![
        // Mixed number e.g. 1 1/2 or 1-1/2
        ParserRuleBuilder::new()
            .token(literal)
            .condition(|buffer| buffer.try_consume(' ') || buffer.try_consume('-'))
            .token(literal)
            .condition(|buffer| buffer.try_consume('/'))
            .token(literal)
            .map(|tokens| {
                let [whole, numerator, denominator] = literals::<3>(tokens)?;
                Some(Amount::fraction(Fraction::new(Some(whole), numerator, denominator)))
            })
            .build()
            .expect("mixed fraction rule should be valid"),
        // Standard fraction e.g. 1/2
        ParserRuleBuilder::new()
            .token(literal)
            .condition(|buffer| buffer.try_consume('/'))
            .token(literal)
            .map(|tokens| {
                let [numerator, denominator] = literals::<2>(tokens)?;
                Some(Amount::fraction(Fraction::new(None, numerator, denominator)))
            })
            .build()
            .expect("fraction rule should be valid"),
    ];
}

/// Parse a complete raw amount string
///
/// Returns `None` when no alternative matches or characters are left over.
pub fn parse_amount(raw_amount: &str) -> Option<Amount> {
    if raw_amount.is_empty() {
        return None;
    }

    let mut buffer = InputBuffer::new(raw_amount);
    let amount = first_match(&AMOUNT_RULES, &mut buffer);

    trace!("Parsed raw amount '{}' -> {:?}", raw_amount, amount);
    amount
}

/// Whether `c` can appear inside a raw amount
pub fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '/' || c == '.'
}

/// Scan the raw amount substring at the cursor
///
/// A space is kept as an internal separator ("1 1/2", "1/4 - 1/3") only
/// when the character after it is again an amount character. Any other
/// whitespace, or a space followed by text, ends the amount.
pub fn scan_raw_amount(buffer: &mut InputBuffer) -> String {
    let mut raw_amount = String::new();

    while buffer.has_next() && next_character_is_valid(buffer) {
        if let Ok(c) = buffer.next() {
            raw_amount.push(c);
        }
    }

    raw_amount
}

fn next_character_is_valid(buffer: &InputBuffer) -> bool {
    if buffer.matches(is_amount_char) {
        return true;
    }

    buffer.matches(|c| c == ' ')
        && buffer
            .peek_ahead(1, 1)
            .first()
            .is_some_and(|&c| is_amount_char(c))
}

fn range(buffer: &mut InputBuffer) -> Option<Amount> {
    first_match(&RANGE_RULES, buffer)
}

fn fraction(buffer: &mut InputBuffer) -> Option<Amount> {
    first_match(&FRACTION_RULES, buffer)
}

fn literal(buffer: &mut InputBuffer) -> Option<Amount> {
    let mut digits = String::new();
    let mut seen_decimal_point = false;

    while buffer.is_digit() || buffer.matches(|c| c == '.') {
        let c = buffer.next().ok()?;
        if c == '.' {
            // Only a single decimal point is accepted
            if seen_decimal_point {
                return None;
            }
            seen_decimal_point = true;
        }
        digits.push(c);
    }

    parse_decimal(&digits).map(Amount::literal)
}

fn parse_decimal(digits: &str) -> Option<Decimal> {
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = if digits.starts_with('.') {
        format!("0{digits}")
    } else {
        digits.to_string()
    };

    Decimal::from_str(normalized.trim_end_matches('.')).ok()
}

/// Try each rule in order inside its own checkpoint, keeping the first match
fn first_match(rules: &[SequenceRule<Amount>], buffer: &mut InputBuffer) -> Option<Amount> {
    for rule in rules {
        let mut checkpoint = buffer.checkpoint();
        if let Some(amount) = rule.execute(&mut checkpoint).into_token() {
            checkpoint.commit();
            return Some(amount);
        }
    }

    None
}

fn single(tokens: Vec<Amount>) -> Option<Amount> {
    let [amount]: [Amount; 1] = tokens.try_into().ok()?;
    Some(amount)
}

fn literals<const N: usize>(tokens: Vec<Amount>) -> Option<[Decimal; N]> {
    let values = tokens
        .iter()
        .map(Amount::as_literal)
        .collect::<Option<Vec<_>>>()?;
    values.try_into().ok()
}

fn fractions(tokens: Vec<Amount>) -> Option<[Fraction; 2]> {
    let values = tokens
        .iter()
        .map(|token| token.as_fraction().cloned())
        .collect::<Option<Vec<_>>>()?;
    values.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::RangeBounds;
    use rstest::rstest;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[rstest]
    #[case("2", "2")]
    #[case("1.5", "1.5")]
    #[case("0.25", "0.25")]
    #[case(".5", "0.5")]
    #[case("3.", "3")]
    fn test_literal_amounts(#[case] raw: &str, #[case] expected: &str) {
        let amount = parse_amount(raw).unwrap();
        assert_eq!(amount, Amount::literal(d(expected)));
        assert_eq!(amount.to_string(), expected);
    }

    #[test]
    fn test_simple_fraction() {
        let amount = parse_amount("1/2").unwrap();
        assert_eq!(
            amount,
            Amount::fraction(Fraction::new(None, d("1"), d("2")))
        );
    }

    #[rstest]
    #[case("1 1/2")]
    #[case("1-1/2")]
    fn test_mixed_fraction(#[case] raw: &str) {
        let amount = parse_amount(raw).unwrap();
        assert_eq!(
            amount,
            Amount::fraction(Fraction::new(Some(d("1")), d("1"), d("2")))
        );
        assert_eq!(amount.to_string(), "1 1/2");
    }

    #[rstest]
    #[case("1-2")]
    #[case("1 - 2")]
    #[case("1 -2")]
    fn test_literal_range(#[case] raw: &str) {
        let amount = parse_amount(raw).unwrap();
        assert_eq!(amount, Amount::literal_range(d("1"), d("2")));
        assert_eq!(amount.to_string(), "1-2");
    }

    #[rstest]
    #[case("1/4-1/3")]
    #[case("1/4 - 1/3")]
    fn test_fractional_range(#[case] raw: &str) {
        let amount = parse_amount(raw).unwrap();
        match amount {
            Amount::Range(RangeBounds::Fractional { ref lower, ref upper }) => {
                assert_eq!(*lower, Fraction::new(None, d("1"), d("4")));
                assert_eq!(*upper, Fraction::new(None, d("1"), d("3")));
            }
            other => panic!("Expected fractional range, got {other:?}"),
        }
        assert_eq!(amount.to_string(), "1/4-1/3");
    }

    #[test]
    fn test_mixed_fraction_range() {
        let amount = parse_amount("1 1/2-2 1/2").unwrap();
        assert_eq!(
            amount,
            Amount::fractional_range(
                Fraction::new(Some(d("1")), d("1"), d("2")),
                Fraction::new(Some(d("2")), d("1"), d("2")),
            )
        );
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("test")]
    #[case("1..2")]
    #[case("1.2.3")]
    #[case("1/")]
    #[case("1/t")]
    #[case("1-t")]
    #[case("1-1/")]
    #[case("1/3-1")]
    #[case("1 15")]
    #[case("2 ")]
    fn test_invalid_amounts(#[case] raw: &str) {
        assert!(parse_amount(raw).is_none(), "'{raw}' should not parse");
    }

    #[rstest]
    #[case("1 cup", "1", " cup")]
    #[case("1 1/2 cups", "1 1/2", " cups")]
    #[case("1/4 - 1/3 cup", "1/4 - 1/3", " cup")]
    #[case("16oz", "16", "oz")]
    #[case("test", "", "test")]
    #[case("2 ", "2", " ")]
    #[case("1\t1/2 cup", "1", "\t1/2 cup")]
    #[case("1\u{a0}1/2 cup", "1", "\u{a0}1/2 cup")]
    fn test_scan_raw_amount(#[case] input: &str, #[case] raw: &str, #[case] rest: &str) {
        let mut buffer = InputBuffer::new(input);
        assert_eq!(scan_raw_amount(&mut buffer), raw);
        assert_eq!(buffer.remaining(), rest);
    }

    #[test]
    fn test_failed_parse_leaves_no_checkpoints() {
        let mut buffer = InputBuffer::new("1/3-1");
        assert!(first_match(&AMOUNT_RULES, &mut buffer).is_none());
        assert_eq!(buffer.position(), 0);
        assert_eq!(buffer.checkpoint_depth(), 0);
    }
}
