// Selector parser - converts tokens to an expression tree

use super::lexer::Lexer;
use super::literal::{parse_approx_numeric, parse_exact_numeric, LiteralError};
use super::token::Token;
use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::expression::{
    ArithmeticOperator, BoolExpression, ComparisonOperator, Expression, LikePattern,
    UnaryBooleanOperator,
};
use crate::value::Value;
use log::trace;

/// Deepest nesting of parentheses, NOT and unary signs accepted
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(selector: &str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(selector);
        let tokens = lexer.tokenize()?;
        Ok(Parser {
            tokens,
            position: 0,
            depth: 0,
        })
    }

    /// Parse a complete selector; empty input is the literal TRUE
    pub fn parse(&mut self) -> ParseResult<Expression> {
        if self.match_token(&Token::Eof) {
            return Ok(Expression::literal(true));
        }

        let expr = self.parse_or()?;

        if !self.match_token(&Token::Eof) {
            return Err(self.error("extra input"));
        }

        Ok(expr)
    }

    /// Parse OR expression
    fn parse_or(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and()?;

        while self.match_token(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = BoolExpression::Or(left, right).into();
        }

        Ok(left)
    }

    /// Parse AND expression
    fn parse_and(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_comparison()?;

        while self.match_token(&Token::And) {
            self.advance();
            let right = self.parse_comparison()?;
            left = BoolExpression::And(left, right).into();
        }

        Ok(left)
    }

    /// Parse comparison expression, including NOT and the special forms
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        if self.match_token(&Token::Not) {
            self.advance();
            let operand = self.nested(Self::parse_comparison)?;
            return Ok(BoolExpression::not(operand).into());
        }

        let left = self.parse_addition()?;

        match self.current_token() {
            Token::Is => {
                self.advance();
                let op = match self.current_token() {
                    Token::Null => UnaryBooleanOperator::IsNull,
                    Token::Not if self.peek_token() == Token::Null => {
                        self.advance();
                        UnaryBooleanOperator::IsNotNull
                    }
                    Token::Not => {
                        self.advance();
                        return Err(self.error("expected NULL or NOT NULL after IS"));
                    }
                    _ => return Err(self.error("expected NULL or NOT NULL after IS")),
                };
                self.advance();
                return Ok(BoolExpression::unary(op, left).into());
            }
            // A NOT here can only negate LIKE, BETWEEN or IN
            Token::Not => {
                self.advance();
                return self.parse_special_comparison(left, true);
            }
            Token::Like | Token::Between | Token::In => {
                return self.parse_special_comparison(left, false);
            }
            _ => {}
        }

        // Standard comparison operators
        let op = match self.current_token() {
            Token::Equal => ComparisonOperator::Eq,
            Token::NotEqual => ComparisonOperator::Ne,
            Token::Less => ComparisonOperator::Lt,
            Token::Greater => ComparisonOperator::Gt,
            Token::LessEqual => ComparisonOperator::Le,
            Token::GreaterEqual => ComparisonOperator::Ge,
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_addition()?;
        Ok(BoolExpression::comparison(op, left, right).into())
    }

    /// Parse LIKE, BETWEEN and IN, optionally negated
    fn parse_special_comparison(&mut self, operand: Expression, negated: bool) -> ParseResult<Expression> {
        let expr = match self.current_token() {
            Token::Like => {
                self.advance();
                let pattern = self.parse_like_pattern()?;
                BoolExpression::Like { operand, pattern }
            }
            Token::Between => {
                self.advance();
                let lower = self.parse_addition()?;
                self.expect_token(Token::And, "expected AND after BETWEEN")?;
                let upper = self.parse_addition()?;
                BoolExpression::Between {
                    operand,
                    lower,
                    upper,
                }
            }
            Token::In => {
                self.advance();
                self.expect_token(Token::LeftParen, "missing '(' after IN")?;
                let list = self.parse_expression_list()?;
                self.expect_token(Token::RightParen, "missing ',' or ')' after IN")?;
                // NOT IN has its own evaluation rules, so it is not wrapped in NOT
                return Ok(if negated {
                    BoolExpression::NotIn { operand, list }
                } else {
                    BoolExpression::In { operand, list }
                }
                .into());
            }
            _ => return Err(self.error("expected LIKE, IN or BETWEEN")),
        };

        if negated {
            Ok(BoolExpression::not(expr.into()).into())
        } else {
            Ok(expr.into())
        }
    }

    /// Parse the string literal after LIKE and an optional ESCAPE clause
    fn parse_like_pattern(&mut self) -> ParseResult<LikePattern> {
        let pattern = match self.current_token() {
            Token::String(s) => s,
            _ => return Err(self.error("expected string after LIKE")),
        };
        self.advance();

        let escape = if self.match_token(&Token::Escape) {
            self.advance();
            let escape = match self.current_token() {
                Token::String(s) => s,
                _ => return Err(self.error("expected string after ESCAPE")),
            };
            let mut chars = escape.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => {
                    return Err(self.error_of(
                        ErrorKind::Escape,
                        "single character string required after ESCAPE",
                    ))
                }
            };
            if ch == '%' || ch == '_' {
                return Err(self.error_of(
                    ErrorKind::Escape,
                    "'%' and '_' are not allowed as ESCAPE characters",
                ));
            }
            self.advance();
            Some(ch)
        } else {
            None
        };

        let pattern = LikePattern::new(pattern, escape)
            .map_err(|e| self.error(format!("invalid LIKE pattern: {}", e)))?;
        trace!("LIKE {} compiled to {}", pattern, pattern.as_regex());
        Ok(pattern)
    }

    /// Parse addition/subtraction expression
    fn parse_addition(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplication()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => ArithmeticOperator::Add,
                Token::Minus => ArithmeticOperator::Sub,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplication()?;
            left = Expression::arithmetic(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplication/division expression
    fn parse_multiplication(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => ArithmeticOperator::Mul,
                Token::Slash => ArithmeticOperator::Div,
                _ => break,
            };
            self.advance();

            let right = self.parse_unary()?;
            left = Expression::arithmetic(op, left, right);
        }

        Ok(left)
    }

    /// Parse unary expression
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        match self.current_token() {
            Token::LeftParen => {
                self.advance();
                let expr = self.nested(Self::parse_or)?;
                self.expect_token(Token::RightParen, "missing ')' after '('")?;
                Ok(expr)
            }
            // Unary plus is a no-op
            Token::Plus => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            Token::Minus => {
                self.advance();
                // A negative integer literal is read in one piece so that
                // i64::MIN never has to exist as a positive value
                if let Token::ExactNumeric(text) = self.current_token() {
                    let literal = self.exact_literal(&text, true)?;
                    self.advance();
                    return Ok(literal);
                }
                let operand = self.nested(Self::parse_unary)?;
                Ok(Expression::negate(operand))
            }
            _ => self.parse_primary(),
        }
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let expr = match self.current_token() {
            Token::Identifier(name) => Expression::identifier(name),
            Token::String(s) => Expression::literal(s),
            Token::True => Expression::literal(true),
            Token::False => Expression::literal(false),
            Token::ExactNumeric(text) => self.exact_literal(&text, false)?,
            Token::ApproxNumeric(text) => match parse_approx_numeric(&text) {
                Ok(value) => Expression::literal(value),
                Err(e) => return Err(self.literal_error(e)),
            },
            _ => return Err(self.error("expected literal or identifier")),
        };
        self.advance();
        Ok(expr)
    }

    fn exact_literal(&self, text: &str, negate: bool) -> ParseResult<Expression> {
        parse_exact_numeric(text, negate)
            .map(|i| Expression::literal(Value::Exact(i)))
            .map_err(|e| self.literal_error(e))
    }

    fn literal_error(&self, error: LiteralError) -> ParseError {
        let kind = match error {
            LiteralError::IntegerTooBig | LiteralError::FloatRange => ErrorKind::LiteralRange,
            LiteralError::InvalidInteger | LiteralError::InvalidFloat => ErrorKind::Lexical,
        };
        self.error_of(kind, error.to_string())
    }

    /// Parse a non-empty, comma separated list of additive expressions
    fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut expressions = vec![];

        loop {
            expressions.push(self.parse_addition()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
            self.advance();
        }

        Ok(expressions)
    }

    // Helper methods

    /// Run a parse step one nesting level deeper, failing past the limit
    fn nested<T>(&mut self, parse: fn(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error("expression nested too deeply"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Get current token
    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .cloned()
            .unwrap_or(Token::Eof)
    }

    /// Look one token past the current one
    fn peek_token(&self) -> Token {
        self.tokens
            .get(self.position + 1)
            .cloned()
            .unwrap_or(Token::Eof)
    }

    /// Advance to next token, never past the end
    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, token: &Token) -> bool {
        self.tokens.get(self.position).unwrap_or(&Token::Eof) == token
    }

    /// Expect a specific token, failing with `message` otherwise
    fn expect_token(&mut self, token: Token, message: &str) -> ParseResult<()> {
        if self.match_token(&token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Syntax error at the current token
    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.current_token().to_string(), message)
    }

    fn error_of(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(kind, self.current_token().to_string(), message)
    }
}
