// Selector tokens for lexical analysis

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals, holding their source text
    Identifier(String),
    String(String),
    ExactNumeric(String),
    ApproxNumeric(String),

    // Keywords
    Null,
    True,
    False,
    Not,
    And,
    Or,
    Between,
    Like,
    In,
    Is,
    Escape,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // Special
    Eof,
}

impl Token {
    /// Convert a word to a keyword token if it matches, ignoring ASCII case
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s.to_ascii_uppercase().as_str() {
            "NULL" => Some(Token::Null),
            "TRUE" => Some(Token::True),
            "FALSE" => Some(Token::False),
            "NOT" => Some(Token::Not),
            "AND" => Some(Token::And),
            "OR" => Some(Token::Or),
            "BETWEEN" => Some(Token::Between),
            "LIKE" => Some(Token::Like),
            "IN" => Some(Token::In),
            "IS" => Some(Token::Is),
            "ESCAPE" => Some(Token::Escape),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Identifier(s)
            | Token::String(s)
            | Token::ExactNumeric(s)
            | Token::ApproxNumeric(s) => return write!(f, "{}", s),
            Token::Null => "NULL",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::Not => "NOT",
            Token::And => "AND",
            Token::Or => "OR",
            Token::Between => "BETWEEN",
            Token::Like => "LIKE",
            Token::In => "IN",
            Token::Is => "IS",
            Token::Escape => "ESCAPE",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Equal => "=",
            Token::NotEqual => "<>",
            Token::Less => "<",
            Token::Greater => ">",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Comma => ",",
            Token::Eof => "end of input",
        };
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Token::keyword_from_str("LIKE"), Some(Token::Like));
        assert_eq!(Token::keyword_from_str("like"), Some(Token::Like));
        assert_eq!(Token::keyword_from_str("nUlL"), Some(Token::Null));
        assert_eq!(Token::keyword_from_str("select"), None);
        // Only ASCII letters fold; dotless i stays part of an identifier
        assert_eq!(Token::keyword_from_str("\u{131}n"), None);
        assert_eq!(Token::keyword_from_str("\u{131}s"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::NotEqual.to_string(), "<>");
        assert_eq!(Token::ExactNumeric("0x1F".to_string()).to_string(), "0x1F");
        assert_eq!(Token::Eof.to_string(), "end of input");
    }
}
