//! # Property Tests
//!
//! Properties that must hold for arbitrary input: checkpoint rollback,
//! amount rendering round trips, match classification and deterministic
//! parsing.

use ingredient_templates::amount_grammar::parse_amount;
use ingredient_templates::ingredient_parser::IngredientParser;
use ingredient_templates::input_buffer::InputBuffer;
use ingredient_templates::template::{
    compile_all, MatchKind, DEFAULT_TEMPLATE_DEFINITIONS,
};
use ingredient_templates::token_readers::TokenReaderFactory;
use ingredient_templates::tokens::{Amount, Fraction};
use proptest::prelude::*;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
enum BufferOp {
    Next,
    Peek,
    TryConsume(char),
    OptionallyConsume(char),
}

fn buffer_op() -> impl Strategy<Value = BufferOp> {
    prop_oneof![
        Just(BufferOp::Next),
        Just(BufferOp::Peek),
        prop::char::range('0', '9').prop_map(BufferOp::TryConsume),
        prop::sample::select(vec![' ', '-', '/']).prop_map(BufferOp::OptionallyConsume),
    ]
}

fn decimal() -> impl Strategy<Value = Decimal> {
    (0i64..10_000, 0u32..3).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn fraction() -> impl Strategy<Value = Fraction> {
    (prop::option::of(decimal()), decimal(), decimal())
        .prop_map(|(whole, numerator, denominator)| Fraction::new(whole, numerator, denominator))
}

fn amount() -> impl Strategy<Value = Amount> {
    prop_oneof![
        decimal().prop_map(Amount::literal),
        fraction().prop_map(Amount::fraction),
        (decimal(), decimal()).prop_map(|(lower, upper)| Amount::literal_range(lower, upper)),
        (fraction(), fraction()).prop_map(|(lower, upper)| Amount::fractional_range(lower, upper)),
    ]
}

proptest! {
    #[test]
    fn uncommitted_checkpoint_restores_position(
        input in "[0-9 /.a-z-]{0,24}",
        skip in 0usize..8,
        ops in prop::collection::vec(buffer_op(), 0..16),
    ) {
        let mut buffer = InputBuffer::new(&input);
        for _ in 0..skip {
            if buffer.next().is_err() {
                break;
            }
        }
        let before = buffer.position();

        {
            let mut checkpoint = buffer.checkpoint();
            for op in &ops {
                match op {
                    BufferOp::Next => { let _ = checkpoint.next(); }
                    BufferOp::Peek => { let _ = checkpoint.peek(); }
                    BufferOp::TryConsume(c) => { checkpoint.try_consume(*c); }
                    BufferOp::OptionallyConsume(c) => { checkpoint.optionally_consume(*c); }
                }
            }
        }

        prop_assert_eq!(buffer.position(), before);
        prop_assert_eq!(buffer.checkpoint_depth(), 0);
    }

    #[test]
    fn rendered_amounts_parse_back(amount in amount()) {
        let rendered = amount.to_string();
        let parsed = parse_amount(&rendered);
        prop_assert_eq!(parsed, Some(amount), "rendered as '{}'", rendered);
    }

    #[test]
    fn match_kind_agrees_with_token_count(input in "[0-9 /a-z,:-]{0,30}") {
        let templates = compile_all(&DEFAULT_TEMPLATE_DEFINITIONS, &TokenReaderFactory::default()).unwrap();

        for template in &templates {
            let mut buffer = InputBuffer::new(&input);
            let result = template.try_read_tokens(&mut buffer);

            prop_assert_eq!(result.kind == MatchKind::NoMatch, result.tokens.is_empty());
            if result.kind == MatchKind::FullMatch {
                prop_assert_eq!(result.tokens.len(), template.reader_count());
            } else {
                prop_assert!(result.tokens.len() < template.reader_count());
            }
        }
    }

    #[test]
    fn parsing_is_deterministic(input in "[0-9A-Za-z ()/,.-]{0,40}") {
        let parser = IngredientParser::builder()
            .with_default_configuration()
            .build()
            .unwrap();

        prop_assert_eq!(parser.parse_ingredient(&input), parser.parse_ingredient(&input));
    }
}
