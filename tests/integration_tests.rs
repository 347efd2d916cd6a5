//! # Integration Tests
//!
//! End-to-end parsing of ingredient lines through the public API, from
//! hand-written template lists up to the stock configuration run against
//! ingredient lines taken from real recipes.

use ingredient_templates::errors::ParserError;
use ingredient_templates::ingredient_parser::IngredientParser;
use ingredient_templates::input_buffer::InputBuffer;
use ingredient_templates::match_heuristic::MatchHeuristic;
use ingredient_templates::parse_result::ParseResult;
use ingredient_templates::parser_strategy::{
    BestFullMatchStrategy, FirstFullMatchStrategy, StrategyOption,
};
use ingredient_templates::template::{definitions, MatchKind, Template};
use ingredient_templates::token_readers::TokenReaderFactory;
use rstest::rstest;

fn parser(definitions: &[&str], option: StrategyOption) -> IngredientParser {
    IngredientParser::builder()
        .with_template_definitions(definitions)
        .with_token_reader_factory(TokenReaderFactory::default())
        .with_strategy_option(option, MatchHeuristic::GreatestTokenCount)
        .build()
        .unwrap()
}

fn assert_fields(
    result: &ParseResult,
    amount: Option<&str>,
    unit: Option<&str>,
    form: Option<&str>,
    ingredient: Option<&str>,
) {
    assert!(result.is_success(), "expected a match, got {result:?}");
    assert_eq!(result.amount(), amount, "amount");
    assert_eq!(result.unit(), unit, "unit");
    assert_eq!(result.form(), form, "form");
    assert_eq!(result.ingredient(), ingredient, "ingredient");
}

#[test]
fn test_unknown_unit_is_kept() {
    let parser = parser(&[definitions::AMOUNT_UNIT_INGREDIENT], StrategyOption::FirstFullMatch);
    let result = parser.parse_ingredient("1 bag vegan sausages").unwrap();

    assert_fields(&result, Some("1"), Some("bag"), None, Some("vegan sausages"));
    assert_eq!(result.metadata.match_kind, Some(MatchKind::FullMatch));
}

#[test]
fn test_fractional_range_amount() {
    let parser = parser(&[definitions::AMOUNT_UNIT_INGREDIENT], StrategyOption::FirstFullMatch);
    let result = parser.parse_ingredient("1/4-1/3 cup milk").unwrap();

    assert_fields(&result, Some("1/4-1/3"), Some("cup"), None, Some("milk"));
}

#[test]
fn test_first_full_match_keeps_template_order() {
    let parser = parser(
        &[definitions::AMOUNT_UNIT_INGREDIENT, definitions::AMOUNT_UNIT_FORM_INGREDIENT],
        StrategyOption::FirstFullMatch,
    );
    let result = parser.parse_ingredient("2 cups grated cheese").unwrap();

    assert_fields(&result, Some("2"), Some("cups"), None, Some("grated cheese"));
    assert_eq!(
        result.metadata.template.as_deref(),
        Some(definitions::AMOUNT_UNIT_INGREDIENT)
    );
}

#[test]
fn test_best_full_match_prefers_more_tokens() {
    let parser = parser(
        &[definitions::AMOUNT_UNIT_INGREDIENT, definitions::AMOUNT_UNIT_FORM_INGREDIENT],
        StrategyOption::BestFullMatch,
    );
    let result = parser.parse_ingredient("2 cups grated cheese").unwrap();

    assert_fields(&result, Some("2"), Some("cups"), Some("grated"), Some("cheese"));
    assert_eq!(
        result.metadata.template.as_deref(),
        Some(definitions::AMOUNT_UNIT_FORM_INGREDIENT)
    );
}

#[test]
fn test_missing_amount_never_fully_matches() {
    let factory = TokenReaderFactory::default();

    for definition in [definitions::AMOUNT_UNIT_INGREDIENT, definitions::AMOUNT_UNIT_FORM_INGREDIENT] {
        let template = Template::compile(definition, &factory).unwrap();
        let mut buffer = InputBuffer::new("test cups carrot");
        let result = template.try_read_tokens(&mut buffer);
        assert_ne!(result.kind, MatchKind::FullMatch);
    }

    let parser = parser(&[definitions::AMOUNT_UNIT_INGREDIENT], StrategyOption::FirstFullMatch);
    let result = parser.parse_ingredient("test cups carrot").unwrap();
    assert!(!result.is_success());
    assert_eq!(
        result.metadata.attempted_templates,
        vec![definitions::AMOUNT_UNIT_INGREDIENT]
    );
}

#[test]
fn test_strategy_instance_can_be_injected() {
    let parser = IngredientParser::builder()
        .with_template_definitions(&[definitions::AMOUNT_INGREDIENT, definitions::INGREDIENT])
        .with_token_reader_factory(TokenReaderFactory::default())
        .with_parser_strategy(FirstFullMatchStrategy)
        .build()
        .unwrap();

    let result = parser.parse_ingredient("freshly ground black pepper").unwrap();
    assert_fields(&result, None, None, None, Some("freshly ground black pepper"));
}

#[test]
fn test_best_partial_match_falls_back_to_partial() {
    let parser = parser(
        &["{amount} {unit}: {ingredient}", "{amount} {unit} {form}: {ingredient}"],
        StrategyOption::BestPartialMatch,
    );
    let result = parser.parse_ingredient("2 cups grated cheese").unwrap();

    assert!(result.is_success());
    assert_eq!(result.metadata.match_kind, Some(MatchKind::PartialMatch));
    assert_eq!(result.form(), Some("grated"));
    assert_eq!(result.ingredient(), None);
}

#[test]
fn test_invalid_configuration_fails_fast() {
    let result = IngredientParser::builder()
        .with_template_definitions(&["{amount} {colour} {ingredient}"])
        .with_token_reader_factory(TokenReaderFactory::default())
        .with_parser_strategy(BestFullMatchStrategy::new(MatchHeuristic::default()))
        .build();

    assert_eq!(
        result.unwrap_err(),
        ParserError::UnknownTokenType {
            token_type: "colour".to_string(),
            definition: "{amount} {colour} {ingredient}".to_string(),
        }
    );
}

fn real_data_parser() -> IngredientParser {
    IngredientParser::builder()
        .with_default_configuration()
        .with_strategy_option(StrategyOption::BestFullMatch, MatchHeuristic::default_weighted())
        .build()
        .unwrap()
}

#[rstest]
#[case("1 Tbsp Olive Oil", Some("1"), Some("tbsp"), None, "olive oil")]
#[case("2 Avocados", Some("2"), None, None, "avocados")]
#[case("1 Full Recipe Vegan Taco Meat", Some("1"), None, None, "full recipe vegan taco meat")]
#[case("1 cup chopped red onion (about 1 small red onion)", Some("1"), Some("cup"), Some("chopped"), "red onion")]
#[case("1 red bell pepper, chopped", Some("1"), None, Some("chopped"), "red bell pepper")]
#[case("1/2 Onion (Chopped)", Some("1/2"), None, None, "onion")]
#[case("5 to 6 ounces baby spinach (about 5 cups, packed)", Some("5-6"), Some("ounces"), None, "baby spinach")]
#[case("¼ teaspoon Frontier Co-op Ground Cinnamon", Some("1/4"), Some("teaspoon"), None, "frontier co-op ground cinnamon")]
#[case("Handful of chopped cilantro, for garnishing", None, Some("handful"), Some("chopped"), "cilantro")]
#[case("Sea Salt and Black Pepper (To Taste)", None, None, None, "sea salt and black pepper")]
#[case("1 can (15 ounces) black beans, drained and rinsed, or 1 ½ cups cooked black beans", Some("1"), Some("can"), Some("drained"), "black beans")]
#[case("16oz (450g) Tortilla Chips", Some("16"), Some("oz"), None, "tortilla chips")]
#[case("8 whole wheat tortillas (about 8” in diameter)", Some("8"), None, None, "whole wheat tortillas")]
#[case("½ teaspoon salt, to taste", Some("1/2"), Some("teaspoon"), None, "salt")]
#[case("Freshly ground black pepper, to taste", None, None, None, "freshly ground black pepper")]
#[case("1 cup shredded Monterey Jack cheese, divided", Some("1"), Some("cup"), Some("shredded"), "monterey jack cheese")]
#[case("2 cups homemade enchilada sauce", Some("2"), Some("cups"), None, "homemade enchilada sauce")]
#[case("1/4 tsp Cayenne Pepper", Some("1/4"), Some("tsp"), None, "cayenne pepper")]
#[case("1/4 tsp Chili Flakes", Some("1/4"), Some("tsp"), None, "chili flakes")]
#[case("1/2 tsp Cumin", Some("1/2"), Some("tsp"), None, "cumin")]
#[case("2 Tbsp Water", Some("2"), Some("tbsp"), None, "water")]
#[case("1 Full Recipe Pico De Gallo", Some("1"), None, None, "full recipe pico de gallo")]
#[case("1 Full Recipe Vegan Nacho Cheese", Some("1"), None, None, "full recipe vegan nacho cheese")]
#[case("1 Tbsp Fresh Lime Juice", Some("1"), Some("tbsp"), None, "fresh lime juice")]
#[case("Fresh Cilantro", None, None, None, "fresh cilantro")]
#[case("2 tablespoons olive oil", Some("2"), Some("tablespoons"), None, "olive oil")]
#[case("1 teaspoon Frontier Co-op Ground Cumin", Some("1"), Some("teaspoon"), None, "frontier co-op ground cumin")]
fn test_real_recipe_ingredients(
    #[case] raw: &str,
    #[case] amount: Option<&str>,
    #[case] unit: Option<&str>,
    #[case] form: Option<&str>,
    #[case] ingredient: &str,
) {
    let result = real_data_parser().parse_ingredient(raw).unwrap();
    assert_fields(&result, amount, unit, form, Some(ingredient));
}

#[test]
fn test_unlisted_unit_folds_into_ingredient() {
    // "bunch" is not a known unit, so the unit penalty makes the
    // amount-ingredient reading score higher
    let result = real_data_parser()
        .parse_ingredient(
            "1 bunch of broccoli or 1 small head of cauliflower (about 1 pound), florets removed and sliced into small, bite-sized pieces",
        )
        .unwrap();

    assert_fields(&result, Some("1"), None, None, Some("bunch of broccoli"));
    assert_eq!(result.metadata.match_kind, Some(MatchKind::FullMatch));
    assert_eq!(
        result.metadata.template.as_deref(),
        Some(definitions::AMOUNT_INGREDIENT)
    );
}

#[test]
fn test_can_size_before_unit_is_unsupported() {
    let result = real_data_parser()
        .parse_ingredient("1 15oz (425g) Can Black Beans (Drained)")
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(result.metadata.attempted_templates.len(), 10);
}
