//! Selector expression trees and their evaluation.
//!
//! This module provides:
//! - The expression AST built by the parser
//! - Operators for comparison and arithmetic
//! - LIKE pattern compilation
//! - Three-valued evaluation against a property environment

pub mod eval;
pub mod expr;
pub mod operator;
pub mod pattern;

pub use eval::{evaluate_expression, ExpressionEvaluator};
pub use expr::{BoolExpression, Expression};
pub use operator::{
    ArithmeticOperator, ComparisonOperator, UnaryArithmeticOperator, UnaryBooleanOperator,
};
pub use pattern::{like_to_regex, LikePattern};
