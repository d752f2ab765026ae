//! Expression evaluation implementation.

use crate::env::Env;
use crate::expression::{BoolExpression, Expression, UnaryBooleanOperator};
use crate::value::{BoolOrNone, Value};

/// Evaluator for expressions against one set of message properties
pub struct ExpressionEvaluator<'a, E: Env + ?Sized> {
    env: &'a E,
}

impl<'a, E: Env + ?Sized> ExpressionEvaluator<'a, E> {
    /// Create a new evaluator over an environment
    pub fn new(env: &'a E) -> Self {
        Self { env }
    }

    /// Evaluate an expression to a value
    pub fn evaluate(&self, expr: &Expression) -> Value {
        match expr {
            Expression::Literal(value) => value.clone(),

            Expression::Identifier(name) => self.env.value(name),

            Expression::Arithmetic { op, left, right } => {
                op.apply(self.evaluate(left), self.evaluate(right))
            }

            Expression::UnaryArithmetic { op, operand } => op.apply(self.evaluate(operand)),

            Expression::Bool(expr) => self.evaluate_predicate(expr).into(),
        }
    }

    /// Evaluate an expression as a boolean; non-boolean values are unknown
    pub fn evaluate_bool(&self, expr: &Expression) -> BoolOrNone {
        match expr {
            Expression::Bool(expr) => self.evaluate_predicate(expr),
            _ => match self.evaluate(expr) {
                Value::Boolean(b) => BoolOrNone::from(b),
                _ => BoolOrNone::Unknown,
            },
        }
    }

    /// Evaluate a boolean node
    pub fn evaluate_predicate(&self, expr: &BoolExpression) -> BoolOrNone {
        match expr {
            BoolExpression::Comparison { op, left, right } => {
                let left = self.evaluate(left);
                if left.is_unknown() {
                    return BoolOrNone::Unknown;
                }
                op.apply(&left, &self.evaluate(right))
            }

            BoolExpression::Or(left, right) => {
                let left = self.evaluate_bool(left);
                if left == BoolOrNone::True {
                    return BoolOrNone::True;
                }
                left.or(self.evaluate_bool(right))
            }

            BoolExpression::And(left, right) => {
                let left = self.evaluate_bool(left);
                if left == BoolOrNone::False {
                    return BoolOrNone::False;
                }
                left.and(self.evaluate_bool(right))
            }

            BoolExpression::Unary { op, operand } => match op {
                UnaryBooleanOperator::Not => !self.evaluate_bool(operand),
                UnaryBooleanOperator::IsNull => self.evaluate(operand).is_unknown().into(),
                UnaryBooleanOperator::IsNotNull => (!self.evaluate(operand).is_unknown()).into(),
            },

            BoolExpression::Like { operand, pattern } => match self.evaluate(operand) {
                Value::String(s) => pattern.is_match(&s).into(),
                _ => BoolOrNone::Unknown,
            },

            BoolExpression::Between {
                operand,
                lower,
                upper,
            } => {
                let value = self.evaluate(operand);
                let lower = self.evaluate(lower);
                let upper = self.evaluate(upper);
                if value.is_unknown() || lower.is_unknown() || upper.is_unknown() {
                    return BoolOrNone::Unknown;
                }
                value.sql_ge(&lower).and(value.sql_le(&upper))
            }

            BoolExpression::In { operand, list } => self.evaluate_in(operand, list),

            BoolExpression::NotIn { operand, list } => self.evaluate_not_in(operand, list),
        }
    }

    /// Any match is true; otherwise an unknown element makes the result unknown
    fn evaluate_in(&self, operand: &Expression, list: &[Expression]) -> BoolOrNone {
        let value = self.evaluate(operand);
        if value.is_unknown() {
            return BoolOrNone::Unknown;
        }

        let mut result = BoolOrNone::False;
        for item in list {
            let item = self.evaluate(item);
            if item.is_unknown() {
                result = BoolOrNone::Unknown;
                continue;
            }
            if value.sql_eq(&item).is_true() {
                return BoolOrNone::True;
            }
        }
        result
    }

    /// Any match is false. An element of an incompatible kind is a definite
    /// non-match unless an unknown element was already seen.
    fn evaluate_not_in(&self, operand: &Expression, list: &[Expression]) -> BoolOrNone {
        let value = self.evaluate(operand);
        if value.is_unknown() {
            return BoolOrNone::Unknown;
        }

        let mut result = BoolOrNone::True;
        for item in list {
            let item = self.evaluate(item);
            if item.is_unknown() {
                result = BoolOrNone::Unknown;
                continue;
            }
            if result != BoolOrNone::Unknown && !value.comparable_with(&item) {
                result = BoolOrNone::False;
                continue;
            }
            if value.sql_eq(&item).is_true() {
                return BoolOrNone::False;
            }
        }
        result
    }
}

/// Helper function to evaluate an expression as a boolean against an environment
pub fn evaluate_expression<E: Env + ?Sized>(expr: &Expression, env: &E) -> BoolOrNone {
    ExpressionEvaluator::new(env).evaluate_bool(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{ArithmeticOperator, ComparisonOperator, LikePattern};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn id(name: &str) -> Expression {
        Expression::identifier(name)
    }

    fn unknown() -> Expression {
        Expression::literal(Value::Unknown)
    }

    #[test]
    fn test_literal_and_identifier_evaluation() {
        let props = env(&[("a", Value::Exact(1))]);
        let evaluator = ExpressionEvaluator::new(&props);

        assert_eq!(evaluator.evaluate(&Expression::literal("x")), Value::from("x"));
        assert_eq!(evaluator.evaluate(&id("a")), Value::Exact(1));
        assert_eq!(evaluator.evaluate(&id("missing")), Value::Unknown);
    }

    #[test]
    fn test_boolean_view_of_values() {
        let props = env(&[("flag", Value::Boolean(true)), ("n", Value::Exact(1))]);
        let evaluator = ExpressionEvaluator::new(&props);

        assert_eq!(evaluator.evaluate_bool(&id("flag")), BoolOrNone::True);
        assert_eq!(evaluator.evaluate_bool(&id("n")), BoolOrNone::Unknown);
        assert_eq!(evaluator.evaluate_bool(&id("missing")), BoolOrNone::Unknown);
    }

    #[test]
    fn test_unknown_boolean_in_value_position() {
        let props = env(&[]);
        let evaluator = ExpressionEvaluator::new(&props);
        let cmp: Expression =
            BoolExpression::comparison(ComparisonOperator::Eq, id("a"), Expression::literal(1i64))
                .into();

        assert_eq!(evaluator.evaluate(&cmp), Value::Unknown);
        let sum = Expression::arithmetic(ArithmeticOperator::Add, cmp, Expression::literal(1i64));
        assert_eq!(evaluator.evaluate(&sum), Value::Unknown);
    }

    #[test]
    fn test_or_and_truth_tables() {
        let props = env(&[]);
        let evaluator = ExpressionEvaluator::new(&props);
        let t = || Expression::literal(true);
        let f = || Expression::literal(false);

        let cases = [
            (BoolExpression::Or(unknown(), t()), BoolOrNone::True),
            (BoolExpression::Or(unknown(), f()), BoolOrNone::Unknown),
            (BoolExpression::Or(f(), f()), BoolOrNone::False),
            (BoolExpression::And(unknown(), f()), BoolOrNone::False),
            (BoolExpression::And(unknown(), t()), BoolOrNone::Unknown),
            (BoolExpression::And(t(), t()), BoolOrNone::True),
            (BoolExpression::not(unknown()), BoolOrNone::Unknown),
            (BoolExpression::not(f()), BoolOrNone::True),
        ];
        for (expr, expected) in cases {
            assert_eq!(evaluator.evaluate_predicate(&expr), expected, "{}", expr);
        }
    }

    #[test]
    fn test_is_null_is_never_unknown() {
        let props = env(&[("a", Value::Exact(1))]);
        let evaluator = ExpressionEvaluator::new(&props);

        for operand in [id("a"), id("missing"), unknown(), Expression::literal("s")] {
            for op in [UnaryBooleanOperator::IsNull, UnaryBooleanOperator::IsNotNull] {
                let result = evaluator.evaluate_predicate(&BoolExpression::unary(op, operand.clone()));
                assert!(!result.is_unknown());
            }
        }
        let is_null = BoolExpression::unary(UnaryBooleanOperator::IsNull, id("missing"));
        assert_eq!(evaluator.evaluate_predicate(&is_null), BoolOrNone::True);
    }

    #[test]
    fn test_like() {
        let props = env(&[("s", Value::from("hello")), ("n", Value::Exact(5))]);
        let evaluator = ExpressionEvaluator::new(&props);
        let like = |operand| BoolExpression::Like {
            operand,
            pattern: LikePattern::new("he%o", None).unwrap(),
        };

        assert_eq!(evaluator.evaluate_predicate(&like(id("s"))), BoolOrNone::True);
        assert_eq!(evaluator.evaluate_predicate(&like(id("n"))), BoolOrNone::Unknown);
        assert_eq!(evaluator.evaluate_predicate(&like(id("none"))), BoolOrNone::Unknown);
    }

    #[test]
    fn test_between() {
        let props = env(&[("n", Value::Exact(5)), ("s", Value::from("x"))]);
        let evaluator = ExpressionEvaluator::new(&props);
        let between = |operand, lower: f64, upper: i64| BoolExpression::Between {
            operand,
            lower: Expression::literal(lower),
            upper: Expression::literal(upper),
        };

        assert_eq!(evaluator.evaluate_predicate(&between(id("n"), 1.5, 5)), BoolOrNone::True);
        assert_eq!(evaluator.evaluate_predicate(&between(id("n"), 5.5, 9)), BoolOrNone::False);
        assert_eq!(evaluator.evaluate_predicate(&between(id("x"), 1.0, 9)), BoolOrNone::Unknown);
        assert_eq!(evaluator.evaluate_predicate(&between(id("s"), 1.0, 9)), BoolOrNone::Unknown);
    }

    #[test]
    fn test_in_list() {
        let props = env(&[("x", Value::from("b"))]);
        let evaluator = ExpressionEvaluator::new(&props);
        let in_list = |list| BoolExpression::In {
            operand: id("x"),
            list,
        };

        let found = in_list(vec![Expression::literal("a"), Expression::literal("b")]);
        assert_eq!(evaluator.evaluate_predicate(&found), BoolOrNone::True);

        let missing = in_list(vec![Expression::literal("a"), Expression::literal(1i64)]);
        assert_eq!(evaluator.evaluate_predicate(&missing), BoolOrNone::False);

        let with_unknown = in_list(vec![unknown(), Expression::literal("c")]);
        assert_eq!(evaluator.evaluate_predicate(&with_unknown), BoolOrNone::Unknown);

        let match_beats_unknown = in_list(vec![unknown(), Expression::literal("b")]);
        assert_eq!(evaluator.evaluate_predicate(&match_beats_unknown), BoolOrNone::True);

        let unknown_operand = BoolExpression::In {
            operand: id("y"),
            list: vec![Expression::literal("b")],
        };
        assert_eq!(evaluator.evaluate_predicate(&unknown_operand), BoolOrNone::Unknown);
    }

    #[test]
    fn test_not_in_list() {
        let props = env(&[("x", Value::from("c")), ("n", Value::Exact(2))]);
        let evaluator = ExpressionEvaluator::new(&props);
        let not_in = |operand, list| BoolExpression::NotIn { operand, list };

        let absent = not_in(id("x"), vec![Expression::literal("a"), Expression::literal("b")]);
        assert_eq!(evaluator.evaluate_predicate(&absent), BoolOrNone::True);

        let present = not_in(id("x"), vec![Expression::literal("c")]);
        assert_eq!(evaluator.evaluate_predicate(&present), BoolOrNone::False);

        let numeric_match = not_in(id("n"), vec![Expression::literal(2.0)]);
        assert_eq!(evaluator.evaluate_predicate(&numeric_match), BoolOrNone::False);

        let with_unknown = not_in(id("x"), vec![unknown(), Expression::literal("a")]);
        assert_eq!(evaluator.evaluate_predicate(&with_unknown), BoolOrNone::Unknown);

        let unknown_operand = not_in(id("y"), vec![Expression::literal("a")]);
        assert_eq!(evaluator.evaluate_predicate(&unknown_operand), BoolOrNone::Unknown);
    }

    #[test]
    fn test_not_in_incompatible_kinds() {
        let props = env(&[("x", Value::from("c"))]);
        let evaluator = ExpressionEvaluator::new(&props);
        let not_in = |list| BoolExpression::NotIn {
            operand: id("x"),
            list,
        };

        // An incompatible element is a definite non-match
        let incompatible = not_in(vec![Expression::literal(1i64), Expression::literal("a")]);
        assert_eq!(evaluator.evaluate_predicate(&incompatible), BoolOrNone::False);

        // ...but it does not override an unknown seen earlier
        let unknown_first = not_in(vec![unknown(), Expression::literal(1i64)]);
        assert_eq!(evaluator.evaluate_predicate(&unknown_first), BoolOrNone::Unknown);

        // ...and a later unknown still downgrades the result
        let unknown_later = not_in(vec![Expression::literal(1i64), unknown()]);
        assert_eq!(evaluator.evaluate_predicate(&unknown_later), BoolOrNone::Unknown);

        // A real match is still false
        let matched = not_in(vec![Expression::literal(true), Expression::literal("c")]);
        assert_eq!(evaluator.evaluate_predicate(&matched), BoolOrNone::False);
    }

    #[test]
    fn test_evaluate_expression_helper() {
        let props = env(&[("a", Value::Exact(3))]);
        let expr: Expression = BoolExpression::comparison(
            ComparisonOperator::Gt,
            Expression::arithmetic(ArithmeticOperator::Mul, id("a"), Expression::literal(2i64)),
            Expression::literal(5i64),
        )
        .into();
        assert_eq!(evaluate_expression(&expr, &props), BoolOrNone::True);
    }
}
