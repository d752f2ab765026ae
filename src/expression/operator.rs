//! Operator definitions for selector expressions.
//!
//! Operators are stateless: the node holding an operator supplies its
//! operands at evaluation time.

use crate::value::{BoolOrNone, Value};

/// Relational operators producing a three-valued result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl ComparisonOperator {
    /// Compare two already evaluated operands; an unknown operand yields unknown
    pub fn apply(&self, left: &Value, right: &Value) -> BoolOrNone {
        if left.is_unknown() || right.is_unknown() {
            return BoolOrNone::Unknown;
        }
        match self {
            ComparisonOperator::Eq => left.sql_eq(right),
            ComparisonOperator::Ne => left.sql_ne(right),
            ComparisonOperator::Lt => left.sql_lt(right),
            ComparisonOperator::Gt => left.sql_gt(right),
            ComparisonOperator::Le => left.sql_le(right),
            ComparisonOperator::Ge => left.sql_ge(right),
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Ge => ">=",
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOperator {
    /// Unknown propagation is left to the value arithmetic
    pub fn apply(&self, left: Value, right: Value) -> Value {
        match self {
            ArithmeticOperator::Add => left + right,
            ArithmeticOperator::Sub => left - right,
            ArithmeticOperator::Mul => left * right,
            ArithmeticOperator::Div => left / right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
        }
    }
}

/// Unary operators with a boolean result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryBooleanOperator {
    Not,
    IsNull,
    IsNotNull,
}

impl UnaryBooleanOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryBooleanOperator::Not => "NOT",
            UnaryBooleanOperator::IsNull => "IS NULL",
            UnaryBooleanOperator::IsNotNull => "IS NOT NULL",
        }
    }
}

/// Unary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryArithmeticOperator {
    Negate,
}

impl UnaryArithmeticOperator {
    pub fn apply(&self, operand: Value) -> Value {
        match self {
            UnaryArithmeticOperator::Negate => -operand,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryArithmeticOperator::Negate => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_with_unknown() {
        for op in [
            ComparisonOperator::Eq,
            ComparisonOperator::Ne,
            ComparisonOperator::Lt,
            ComparisonOperator::Ge,
        ] {
            assert_eq!(op.apply(&Value::Unknown, &Value::Exact(1)), BoolOrNone::Unknown);
            assert_eq!(op.apply(&Value::Exact(1), &Value::Unknown), BoolOrNone::Unknown);
        }
    }

    #[test]
    fn test_comparison_operators() {
        let one = Value::Exact(1);
        let two = Value::Inexact(2.0);
        assert_eq!(ComparisonOperator::Lt.apply(&one, &two), BoolOrNone::True);
        assert_eq!(ComparisonOperator::Gt.apply(&one, &two), BoolOrNone::False);
        assert_eq!(ComparisonOperator::Ne.apply(&one, &two), BoolOrNone::True);
        assert_eq!(ComparisonOperator::Le.apply(&two, &two), BoolOrNone::True);
    }

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(
            ArithmeticOperator::Sub.apply(Value::Exact(5), Value::Exact(7)),
            Value::Exact(-2)
        );
        assert_eq!(
            ArithmeticOperator::Div.apply(Value::Inexact(1.0), Value::Exact(4)),
            Value::Inexact(0.25)
        );
        assert_eq!(
            ArithmeticOperator::Add.apply(Value::Unknown, Value::Exact(4)),
            Value::Unknown
        );
        assert_eq!(
            UnaryArithmeticOperator::Negate.apply(Value::Exact(3)),
            Value::Exact(-3)
        );
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(ComparisonOperator::Eq.as_str(), "=");
        assert_eq!(ComparisonOperator::Ne.as_str(), "<>");
        assert_eq!(ArithmeticOperator::Mul.as_str(), "*");
        assert_eq!(UnaryBooleanOperator::Not.as_str(), "NOT");
        assert_eq!(UnaryBooleanOperator::IsNotNull.as_str(), "IS NOT NULL");
        assert_eq!(UnaryArithmeticOperator::Negate.as_str(), "-");
    }
}
