//! Expression AST definitions.
//!
//! Two node families mirror the two kinds of result: [`Expression`] nodes
//! produce a [`Value`], [`BoolExpression`] nodes produce a
//! [`BoolOrNone`](crate::value::BoolOrNone). A boolean node used where a
//! value is expected is wrapped in [`Expression::Bool`]. Trees are immutable
//! once the parser has built them.

use crate::expression::operator::{
    ArithmeticOperator, ComparisonOperator, UnaryArithmeticOperator, UnaryBooleanOperator,
};
use crate::expression::pattern::LikePattern;
use crate::sql::lexer::{is_identifier_part, is_identifier_start};
use crate::sql::token::Token;
use crate::value::Value;
use std::fmt;

/// Value-producing expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value, resolved at parse time
    Literal(Value),

    /// Message property looked up in the environment
    Identifier(String),

    /// Binary arithmetic
    Arithmetic {
        op: ArithmeticOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Unary arithmetic
    UnaryArithmetic {
        op: UnaryArithmeticOperator,
        operand: Box<Expression>,
    },

    /// Boolean node in value position
    Bool(Box<BoolExpression>),
}

/// Boolean-producing expression node
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExpression {
    Comparison {
        op: ComparisonOperator,
        left: Expression,
        right: Expression,
    },

    Or(Expression, Expression),

    And(Expression, Expression),

    /// NOT, IS NULL and IS NOT NULL
    Unary {
        op: UnaryBooleanOperator,
        operand: Expression,
    },

    Like {
        operand: Expression,
        pattern: LikePattern,
    },

    Between {
        operand: Expression,
        lower: Expression,
        upper: Expression,
    },

    In {
        operand: Expression,
        list: Vec<Expression>,
    },

    NotIn {
        operand: Expression,
        list: Vec<Expression>,
    },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Create an identifier expression
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// Create a binary arithmetic expression
    pub fn arithmetic(op: ArithmeticOperator, left: Expression, right: Expression) -> Self {
        Expression::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a negation expression
    pub fn negate(operand: Expression) -> Self {
        Expression::UnaryArithmetic {
            op: UnaryArithmeticOperator::Negate,
            operand: Box::new(operand),
        }
    }
}

impl From<BoolExpression> for Expression {
    fn from(expr: BoolExpression) -> Self {
        Expression::Bool(Box::new(expr))
    }
}

impl BoolExpression {
    pub fn comparison(op: ComparisonOperator, left: Expression, right: Expression) -> Self {
        BoolExpression::Comparison { op, left, right }
    }

    pub fn unary(op: UnaryBooleanOperator, operand: Expression) -> Self {
        BoolExpression::Unary { op, operand }
    }

    pub fn not(operand: Expression) -> Self {
        Self::unary(UnaryBooleanOperator::Not, operand)
    }
}

/// Write an identifier so that it lexes back as the same identifier
fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars();
    let plain = chars.next().map_or(false, is_identifier_start)
        && chars.all(is_identifier_part)
        && Token::keyword_from_str(name).is_none();
    if plain {
        write!(f, "{}", name)
    } else {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, list: &[Expression]) -> fmt::Result {
    for (i, item) in list.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Canonical, fully parenthesized selector text
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Identifier(name) => write_identifier(f, name),
            Expression::Arithmetic { op, left, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
            Expression::UnaryArithmetic { op, operand } => write!(f, "({}{})", op.as_str(), operand),
            Expression::Bool(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for BoolExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolExpression::Comparison { op, left, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
            BoolExpression::Or(left, right) => write!(f, "({} OR {})", left, right),
            BoolExpression::And(left, right) => write!(f, "({} AND {})", left, right),
            BoolExpression::Unary { op, operand } => match op {
                UnaryBooleanOperator::Not => write!(f, "(NOT {})", operand),
                _ => write!(f, "({} {})", operand, op.as_str()),
            },
            BoolExpression::Like { operand, pattern } => {
                write!(f, "({} LIKE {})", operand, pattern)
            }
            BoolExpression::Between {
                operand,
                lower,
                upper,
            } => write!(f, "({} BETWEEN {} AND {})", operand, lower, upper),
            BoolExpression::In { operand, list } => {
                write!(f, "({} IN (", operand)?;
                write_list(f, list)?;
                write!(f, "))")
            }
            BoolExpression::NotIn { operand, list } => {
                write!(f, "({} NOT IN (", operand)?;
                write_list(f, list)?;
                write!(f, "))")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let expr = Expression::arithmetic(
            ArithmeticOperator::Add,
            Expression::identifier("a"),
            Expression::literal(1i64),
        );
        assert!(matches!(expr, Expression::Arithmetic { .. }));

        let expr: Expression = BoolExpression::not(Expression::literal(true)).into();
        assert!(matches!(expr, Expression::Bool(_)));
    }

    #[test]
    fn test_display_value_nodes() {
        assert_eq!(Expression::literal("it's").to_string(), "'it''s'");
        assert_eq!(Expression::literal(2.5).to_string(), "2.5");
        assert_eq!(Expression::identifier("a.b").to_string(), "a.b");
        assert_eq!(Expression::identifier("my prop").to_string(), "\"my prop\"");
        assert_eq!(Expression::identifier("and").to_string(), "\"and\"");
        assert_eq!(
            Expression::negate(Expression::identifier("x")).to_string(),
            "(-x)"
        );
        assert_eq!(
            Expression::arithmetic(
                ArithmeticOperator::Mul,
                Expression::identifier("x"),
                Expression::literal(-3i64)
            )
            .to_string(),
            "(x * -3)"
        );
    }

    #[test]
    fn test_display_bool_nodes() {
        let cmp = BoolExpression::comparison(
            ComparisonOperator::Ne,
            Expression::identifier("a"),
            Expression::literal(1i64),
        );
        assert_eq!(cmp.to_string(), "(a <> 1)");

        let is_null = BoolExpression::unary(UnaryBooleanOperator::IsNull, Expression::identifier("a"));
        assert_eq!(is_null.to_string(), "(a IS NULL)");

        let not = BoolExpression::not(cmp.into());
        assert_eq!(not.to_string(), "(NOT (a <> 1))");

        let between = BoolExpression::Between {
            operand: Expression::identifier("n"),
            lower: Expression::literal(1i64),
            upper: Expression::literal(5i64),
        };
        assert_eq!(between.to_string(), "(n BETWEEN 1 AND 5)");

        let not_in = BoolExpression::NotIn {
            operand: Expression::identifier("c"),
            list: vec![Expression::literal("a"), Expression::literal("b")],
        };
        assert_eq!(not_in.to_string(), "(c NOT IN ('a', 'b'))");

        let like = BoolExpression::Like {
            operand: Expression::identifier("s"),
            pattern: LikePattern::new("x%", None).unwrap(),
        };
        assert_eq!(like.to_string(), "(s LIKE 'x%')");
    }
}
