// Selector lexer - tokenizes selector expressions

use super::token::Token;
use crate::error::{ErrorKind, ParseError, ParseResult};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Lexer {
            input,
            position: 0,
            current_char,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let ch = match self.current_char {
            Some(ch) => ch,
            None => return Ok(Token::Eof),
        };

        let token = match ch {
            '+' => {
                self.advance();
                Token::Plus
            }
            '-' => {
                self.advance();
                Token::Minus
            }
            '*' => {
                self.advance();
                Token::Star
            }
            '/' => {
                self.advance();
                Token::Slash
            }
            '=' => {
                self.advance();
                Token::Equal
            }
            '<' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::LessEqual
                } else if self.current_char == Some('>') {
                    self.advance();
                    Token::NotEqual
                } else {
                    Token::Less
                }
            }
            '>' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::GreaterEqual
                } else {
                    Token::Greater
                }
            }
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            '\'' => self.read_string()?,
            '"' => self.read_quoted_identifier()?,
            '.' if self.peek().map_or(false, |c| c.is_ascii_digit()) => self.read_number()?,
            c if c.is_ascii_digit() => self.read_number()?,
            c if is_identifier_start(c) => self.read_identifier(),
            c => {
                return Err(ParseError::new(
                    ErrorKind::Lexical,
                    c.to_string(),
                    "illegal character",
                ))
            }
        };

        Ok(token)
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.current_char {
            if is_identifier_part(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let identifier = self.text_from(start);
        Token::keyword_from_str(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Read a quoted identifier (e.g., "my property"), never a keyword
    fn read_quoted_identifier(&mut self) -> ParseResult<Token> {
        let start = self.position;
        let identifier = self.read_quoted('"').ok_or_else(|| {
            ParseError::new(
                ErrorKind::Lexical,
                self.text_from(start),
                "unterminated quoted identifier",
            )
        })?;
        Ok(Token::Identifier(identifier))
    }

    /// Read a string literal
    fn read_string(&mut self) -> ParseResult<Token> {
        let start = self.position;
        let string = self.read_quoted('\'').ok_or_else(|| {
            ParseError::new(ErrorKind::Lexical, self.text_from(start), "unterminated string")
        })?;
        Ok(Token::String(string))
    }

    /// Read text between `quote` characters, a doubled quote standing for one
    fn read_quoted(&mut self, quote: char) -> Option<String> {
        self.advance(); // Skip opening quote
        let mut text = String::new();

        while let Some(ch) = self.current_char {
            self.advance();
            if ch != quote {
                text.push(ch);
            } else if self.current_char == Some(quote) {
                text.push(quote);
                self.advance();
            } else {
                return Some(text);
            }
        }

        None
    }

    /// Consume digits accepted by `is_digit`, allowing `_` separators
    fn read_digits(&mut self, is_digit: fn(char) -> bool) -> usize {
        let mut digits = 0;
        while let Some(ch) = self.current_char {
            if is_digit(ch) {
                digits += 1;
            } else if ch != '_' {
                break;
            }
            self.advance();
        }
        digits
    }

    fn numeric_error(&self, start: usize, message: &str) -> ParseError {
        ParseError::new(ErrorKind::Lexical, self.text_from(start), message)
    }

    /// Read an exact (integer) or approximate (floating) numeric literal
    fn read_number(&mut self) -> ParseResult<Token> {
        let start = self.position;

        if self.current_char == Some('0') {
            let radix_digit: Option<fn(char) -> bool> = match self.peek() {
                Some('x') | Some('X') => Some(is_hex_digit),
                Some('b') | Some('B') => Some(is_binary_digit),
                _ => None,
            };
            if let Some(is_digit) = radix_digit {
                self.advance();
                self.advance();
                if self.read_digits(is_digit) == 0 {
                    return Err(self.numeric_error(start, "malformed integer literal"));
                }
                self.skip_suffix(&['l', 'L']);
                return Ok(Token::ExactNumeric(self.text_from(start)));
            }
        }

        self.read_digits(is_decimal_digit);

        let mut approximate = false;
        if self.current_char == Some('.') {
            approximate = true;
            self.advance();
            self.read_digits(is_decimal_digit);
        }

        if matches!(self.current_char, Some('e') | Some('E')) {
            approximate = true;
            self.advance();
            if matches!(self.current_char, Some('+') | Some('-')) {
                self.advance();
            }
            if self.read_digits(is_decimal_digit) == 0 {
                return Err(self.numeric_error(start, "malformed exponent"));
            }
        }

        if approximate {
            self.skip_suffix(&['f', 'F', 'd', 'D']);
            Ok(Token::ApproxNumeric(self.text_from(start)))
        } else {
            self.skip_suffix(&['l', 'L']);
            Ok(Token::ExactNumeric(self.text_from(start)))
        }
    }

    fn skip_suffix(&mut self, suffixes: &[char]) {
        if let Some(ch) = self.current_char {
            if suffixes.contains(&ch) {
                self.advance();
            }
        }
    }

    /// Tokenize the entire input, ending with `Token::Eof`
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }
}

fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn is_binary_digit(c: char) -> bool {
    c == '0' || c == '1'
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit() || c == '.'
}
