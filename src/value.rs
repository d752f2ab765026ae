//! Values produced by selector evaluation and the three-valued boolean.
//!
//! Relational functions never fail: comparing an unknown value, or values of
//! incompatible kinds, yields [`BoolOrNone::Unknown`]. Arithmetic on anything
//! but numbers yields [`Value::Unknown`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Not, Sub};

/// Kinds of values a selector can see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Unknown,
    Boolean,
    String,
    Exact,
    Inexact,
}

/// A message property value or the result of evaluating an expression.
///
/// Variant order matters for untagged deserialization: JSON integers must be
/// tried as `Exact` before falling back to `Inexact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Unknown,
    Boolean(bool),
    Exact(i64),
    Inexact(f64),
    String(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Unknown => ValueKind::Unknown,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::Exact(_) => ValueKind::Exact,
            Value::Inexact(_) => ValueKind::Inexact,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Exact(_) | Value::Inexact(_))
    }

    pub fn same_kind(&self, other: &Value) -> bool {
        self.kind() == other.kind()
    }

    /// Whether the two values may be compared at all
    pub fn comparable_with(&self, other: &Value) -> bool {
        !self.is_unknown()
            && !other.is_unknown()
            && (self.same_kind(other) || (self.is_numeric() && other.is_numeric()))
    }

    /// Order two values, `None` when they are unknown, incompatible or NaN
    pub fn sql_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Exact(a), Value::Exact(b)) => Some(a.cmp(b)),
            (Value::Exact(a), Value::Inexact(b)) => (*a as f64).partial_cmp(b),
            (Value::Inexact(a), Value::Exact(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Inexact(a), Value::Inexact(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn relation<F>(&self, other: &Value, test: F) -> BoolOrNone
    where
        F: FnOnce(Ordering) -> bool,
    {
        match self.sql_cmp(other) {
            Some(ordering) => BoolOrNone::from(test(ordering)),
            None => BoolOrNone::Unknown,
        }
    }

    pub fn sql_eq(&self, other: &Value) -> BoolOrNone {
        self.relation(other, |o| o == Ordering::Equal)
    }

    pub fn sql_ne(&self, other: &Value) -> BoolOrNone {
        self.relation(other, |o| o != Ordering::Equal)
    }

    pub fn sql_lt(&self, other: &Value) -> BoolOrNone {
        self.relation(other, |o| o == Ordering::Less)
    }

    pub fn sql_gt(&self, other: &Value) -> BoolOrNone {
        self.relation(other, |o| o == Ordering::Greater)
    }

    pub fn sql_le(&self, other: &Value) -> BoolOrNone {
        self.relation(other, |o| o != Ordering::Greater)
    }

    pub fn sql_ge(&self, other: &Value) -> BoolOrNone {
        self.relation(other, |o| o != Ordering::Less)
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Exact(i) => Some(*i as f64),
            Value::Inexact(f) => Some(*f),
            _ => None,
        }
    }

    /// Apply an arithmetic operator, checked on exact pairs and IEEE otherwise
    fn arithmetic<I, F>(self, rhs: Value, exact: I, inexact: F) -> Value
    where
        I: FnOnce(i64, i64) -> Option<i64>,
        F: FnOnce(f64, f64) -> f64,
    {
        match (&self, &rhs) {
            (Value::Exact(a), Value::Exact(b)) => exact(*a, *b).map_or(Value::Unknown, Value::Exact),
            _ => match (self.as_f64(), rhs.as_f64()) {
                (Some(a), Some(b)) => Value::Inexact(inexact(a, b)),
                _ => Value::Unknown,
            },
        }
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        self.arithmetic(rhs, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        self.arithmetic(rhs, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        self.arithmetic(rhs, i64::checked_mul, |a, b| a * b)
    }
}

impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        // checked_div is None for a zero divisor and for MIN / -1
        self.arithmetic(rhs, i64::checked_div, |a, b| a / b)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        match self {
            Value::Exact(i) => i.checked_neg().map_or(Value::Unknown, Value::Exact),
            Value::Inexact(f) => Value::Inexact(-f),
            _ => Value::Unknown,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Exact(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Inexact(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<BoolOrNone> for Value {
    fn from(b: BoolOrNone) -> Self {
        match b {
            BoolOrNone::True => Value::Boolean(true),
            BoolOrNone::False => Value::Boolean(false),
            BoolOrNone::Unknown => Value::Unknown,
        }
    }
}

/// Renders the value in selector literal syntax
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unknown => write!(f, "NULL"),
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
            Value::Exact(i) => write!(f, "{}", i),
            Value::Inexact(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// Three-valued boolean used throughout evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOrNone {
    True,
    False,
    Unknown,
}

impl BoolOrNone {
    /// Only `True` counts as a match
    pub fn is_true(self) -> bool {
        self == BoolOrNone::True
    }

    pub fn is_unknown(self) -> bool {
        self == BoolOrNone::Unknown
    }

    pub fn and(self, other: BoolOrNone) -> BoolOrNone {
        match (self, other) {
            (BoolOrNone::False, _) | (_, BoolOrNone::False) => BoolOrNone::False,
            (BoolOrNone::True, BoolOrNone::True) => BoolOrNone::True,
            _ => BoolOrNone::Unknown,
        }
    }

    pub fn or(self, other: BoolOrNone) -> BoolOrNone {
        match (self, other) {
            (BoolOrNone::True, _) | (_, BoolOrNone::True) => BoolOrNone::True,
            (BoolOrNone::False, BoolOrNone::False) => BoolOrNone::False,
            _ => BoolOrNone::Unknown,
        }
    }
}

impl From<bool> for BoolOrNone {
    fn from(b: bool) -> Self {
        if b {
            BoolOrNone::True
        } else {
            BoolOrNone::False
        }
    }
}

impl Not for BoolOrNone {
    type Output = BoolOrNone;

    fn not(self) -> BoolOrNone {
        match self {
            BoolOrNone::True => BoolOrNone::False,
            BoolOrNone::False => BoolOrNone::True,
            BoolOrNone::Unknown => BoolOrNone::Unknown,
        }
    }
}
