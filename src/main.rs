use anyhow::{Context, Result};
use ingredient_templates::config::ParserConfig;
use ingredient_templates::ingredient_parser::IngredientParser;
use log::{info, warn};
use serde_json::json;
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = ParserConfig::from_env().context("invalid parser configuration")?;
    let parser = IngredientParser::from_config(&config).context("failed to build parser")?;

    info!(
        "Starting ingredient parser with strategy {} and {} templates",
        config.strategy,
        config.templates.len()
    );

    let args: Vec<String> = env::args().skip(1).collect();
    let lines: Vec<String> = if args.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("failed to read ingredients from stdin")?
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        args
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in &lines {
        let output = match parser.parse_ingredient(line) {
            Ok(result) => json!({ "input": line, "result": result }),
            Err(e) => {
                warn!("Skipping '{}': {}", line, e);
                json!({ "input": line, "error": e.to_string() })
            }
        };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    }

    Ok(())
}
