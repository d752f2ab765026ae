//! Example demonstrating selector compilation and evaluation

use selector::{compile, Value};
use std::collections::HashMap;

fn main() -> anyhow::Result<()> {
    println!("Message Selector Demo");
    println!("=====================");

    // Properties of one message
    let mut message: HashMap<String, Value> = HashMap::new();
    message.insert("color".into(), Value::from("red"));
    message.insert("weight".into(), Value::Exact(2500));
    message.insert("price".into(), Value::Inexact(9.99));
    message.insert("JMSType".into(), Value::from("car.order"));

    // Example 1: Basic selectors
    println!("\n1. Basic Selectors");
    println!("------------------");

    for text in [
        "color = 'red'",
        "weight > 3000",
        "price * 2 < 20",
        "JMSType LIKE 'car.%'",
        "color IN ('green', 'blue')",
    ] {
        let selector = compile(text)?;
        println!("{:<30} => {:?}", text, selector.eval(&message));
    }

    // Example 2: Missing properties are unknown
    println!("\n2. Unknown Handling");
    println!("-------------------");

    for text in [
        "size > 10",
        "size > 10 OR color = 'red'",
        "size > 10 AND color = 'red'",
        "size IS NULL",
        "NOT size > 10",
    ] {
        let selector = compile(text)?;
        println!(
            "{:<30} => {:?} (matches: {})",
            text,
            selector.eval(&message),
            selector.matches(&message)
        );
    }

    // Example 3: Canonical form
    println!("\n3. Canonical Form");
    println!("-----------------");

    let selector = compile("a = 1 AND (b > 2 OR c IS NULL) AND s NOT LIKE 'x!%' ESCAPE '!'")?;
    println!("{}", selector.to_text());

    // Example 4: Errors
    println!("\n4. Compile Errors");
    println!("-----------------");

    for text in ["a = ", "x = 9223372036854775808", "s LIKE 'a' ESCAPE 'ab'", "a = 1 b"] {
        match compile(text) {
            Ok(selector) => println!("{:<30} => compiled as {}", text, selector),
            Err(e) => println!("{:<30} => {} ({:?})", text, e, e.kind),
        }
    }

    Ok(())
}
