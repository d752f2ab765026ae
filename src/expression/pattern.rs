//! Translation of `LIKE` patterns into anchored regular expressions.

use regex::Regex;
use std::fmt;

/// Translate a `LIKE` pattern into an anchored regular expression.
///
/// `%` matches any sequence and `_` any single character. The escape
/// character makes the following character literal; a trailing escape
/// character is itself literal.
pub fn like_to_regex(pattern: &str, escape: Option<char>) -> String {
    let mut anchored = String::from("^(?s:");
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        if Some(ch) == escape {
            let literal = chars.next().unwrap_or(ch);
            anchored.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
            continue;
        }
        match ch {
            '%' => anchored.push_str(".*"),
            '_' => anchored.push('.'),
            _ => anchored.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
        }
    }

    anchored.push_str(")$");
    anchored
}

/// A `LIKE` pattern compiled once, when the selector is parsed
#[derive(Debug, Clone)]
pub struct LikePattern {
    pattern: String,
    escape: Option<char>,
    regex: Regex,
}

impl LikePattern {
    pub fn new(pattern: impl Into<String>, escape: Option<char>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let regex = Regex::new(&like_to_regex(&pattern, escape))?;
        Ok(Self {
            pattern,
            escape,
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    /// The anchored regular expression the pattern was compiled to
    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.escape == other.escape
    }
}

/// Renders `'pattern'` with an optional `ESCAPE 'c'` clause
impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.pattern().replace('\'', "''"))?;
        if let Some(escape) = self.escape() {
            let escape = escape.to_string();
            write!(f, " ESCAPE '{}'", escape.replace('\'', "''"))?;
        }
        Ok(())
    }
}
