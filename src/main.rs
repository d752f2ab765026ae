//! selector - evaluate message selectors from the command line

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use selector::expression::Expression;
use selector::sql::Parser;
use selector::{BoolOrNone, Selector, Value};
use std::collections::HashMap;
use std::io::{self, BufRead};

/// Compile a message selector and evaluate it against message properties
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Selector expression, e.g. "color = 'red' AND weight > 10"
    expression: String,

    /// Message property as name=value; value uses selector literal syntax
    #[arg(short, long = "property", value_name = "NAME=VALUE")]
    property: Vec<String>,

    /// Read one JSON object of properties per line from stdin
    #[arg(long)]
    stdin: bool,

    /// Print the canonical form of the compiled selector
    #[arg(long)]
    show: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let selector = Selector::compile(&args.expression)
        .with_context(|| format!("Failed to compile selector {:?}", args.expression))?;

    if args.show {
        println!("{}", selector);
    }

    if args.stdin {
        let stdin = io::stdin();
        for (number, line) in stdin.lock().lines().enumerate() {
            let line = line.context("Failed to read from stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            let properties: HashMap<String, Value> = serde_json::from_str(&line)
                .with_context(|| format!("Invalid properties on line {}", number + 1))?;
            println!("{}", result_str(selector.eval(&properties)));
        }
        return Ok(());
    }

    let properties = args
        .property
        .iter()
        .map(String::as_str)
        .map(parse_property)
        .collect::<Result<HashMap<_, _>>>()?;
    println!("{}", result_str(selector.eval(&properties)));

    Ok(())
}

/// Split `name=value` and convert the value
fn parse_property(property: &str) -> Result<(String, Value)> {
    let (name, value) = property
        .split_once('=')
        .ok_or_else(|| anyhow!("Property {:?} is not of the form NAME=VALUE", property))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Property {:?} has an empty name", property));
    }
    Ok((name.to_string(), parse_property_value(value)))
}

/// Read a value as a selector literal; anything else is taken as raw text
fn parse_property_value(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::String(text.to_string());
    }
    if trimmed.eq_ignore_ascii_case("NULL") {
        return Value::Unknown;
    }

    match Parser::new(trimmed).and_then(|mut parser| parser.parse()) {
        Ok(Expression::Literal(value)) => value,
        Ok(Expression::UnaryArithmetic { op, operand }) => match *operand {
            Expression::Literal(value) if value.is_numeric() => op.apply(value),
            _ => Value::String(text.to_string()),
        },
        _ => Value::String(text.to_string()),
    }
}

fn result_str(result: BoolOrNone) -> &'static str {
    match result {
        BoolOrNone::True => "true",
        BoolOrNone::False => "false",
        BoolOrNone::Unknown => "unknown",
    }
}
