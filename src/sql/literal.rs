//! Resolution of numeric literal tokens into values.

use thiserror::Error;

/// Why a numeric literal could not be resolved
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralError {
    #[error("integer literal too big")]
    IntegerTooBig,

    #[error("invalid integer literal")]
    InvalidInteger,

    #[error("floating literal overflow/underflow")]
    FloatRange,

    #[error("invalid floating literal")]
    InvalidFloat,
}

/// Magnitude of `i64::MIN`, only reachable through a negated literal
const MIN_MAGNITUDE: u64 = i64::MAX as u64 + 1;

fn strip_separators(text: &str, suffixes: &[char]) -> String {
    text.trim_end_matches(|c| suffixes.contains(&c))
        .chars()
        .filter(|&c| c != '_')
        .collect()
}

/// Resolve an exact numeric token, applying a fused leading minus.
///
/// Decimal literals must fit in the positive `i64` range, except that
/// `-9223372036854775808` resolves to `i64::MIN`. Hex, binary and octal
/// literals may use the full 64 bits, read as two's complement.
pub fn parse_exact_numeric(text: &str, negate: bool) -> Result<i64, LiteralError> {
    let digits = strip_separators(text, &['l', 'L']);

    let (radix, body) = match digits.get(..2) {
        Some("0x") | Some("0X") => (16, &digits[2..]),
        Some("0b") | Some("0B") => (2, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };

    let value = u64::from_str_radix(body, radix).map_err(|e| match e.kind() {
        std::num::IntErrorKind::PosOverflow => LiteralError::IntegerTooBig,
        _ => LiteralError::InvalidInteger,
    })?;

    if radix != 10 || value <= i64::MAX as u64 {
        let signed = value as i64;
        return Ok(if negate { signed.wrapping_neg() } else { signed });
    }

    if negate && value == MIN_MAGNITUDE {
        return Ok(i64::MIN);
    }

    Err(LiteralError::IntegerTooBig)
}

/// Resolve an approximate numeric token.
///
/// Results that overflow to infinity, or underflow to zero from a non-zero
/// mantissa, are rejected.
pub fn parse_approx_numeric(text: &str) -> Result<f64, LiteralError> {
    let digits = strip_separators(text, &['f', 'F', 'd', 'D']);
    let value: f64 = digits.parse().map_err(|_| LiteralError::InvalidFloat)?;

    if value.is_infinite() {
        return Err(LiteralError::FloatRange);
    }

    if value == 0.0 {
        let mantissa = digits.split(|c| c == 'e' || c == 'E').next().unwrap_or("");
        if mantissa.chars().any(|c| matches!(c, '1'..='9')) {
            return Err(LiteralError::FloatRange);
        }
    }

    Ok(value)
}
