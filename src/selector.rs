//! Compiled selectors.
//!
//! A [`Selector`] is parsed once and then evaluated any number of times,
//! possibly from several threads at once, against message properties.

use crate::env::Env;
use crate::error::{ParseError, ParseResult};
use crate::expression::{evaluate_expression, Expression};
use crate::sql::Parser;
use crate::value::BoolOrNone;
use log::{debug, trace};
use std::fmt;
use std::str::FromStr;

/// A parsed, immutable selector expression
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    expression: Expression,
}

impl Selector {
    /// Parse selector text; empty or blank text selects every message
    pub fn compile(text: &str) -> ParseResult<Self> {
        let result = Parser::new(text).and_then(|mut parser| parser.parse());
        match result {
            Ok(expression) => {
                debug!("Compiled selector {:?} as {}", text, expression);
                Ok(Selector { expression })
            }
            Err(e) => {
                debug!("Failed to compile selector {:?}: {}", text, e);
                Err(e)
            }
        }
    }

    /// True only when the selector evaluates to TRUE
    pub fn matches<E: Env + ?Sized>(&self, env: &E) -> bool {
        self.eval(env).is_true()
    }

    /// Evaluate with three-valued logic
    pub fn eval<E: Env + ?Sized>(&self, env: &E) -> BoolOrNone {
        let result = evaluate_expression(&self.expression, env);
        trace!("Selector {} evaluated to {:?}", self.expression, result);
        result
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Canonical text; compiling it again gives an equivalent selector
    pub fn to_text(&self) -> String {
        self.expression.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::compile(s)
    }
}

/// Compile selector text
pub fn compile(text: &str) -> ParseResult<Selector> {
    Selector::compile(text)
}
