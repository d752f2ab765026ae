// SQL module - selector lexing, literal conversion and parsing

pub mod lexer;
pub mod literal;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use literal::{parse_approx_numeric, parse_exact_numeric, LiteralError};
pub use parser::Parser;
pub use token::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_module_imports() {
        let tokens = Lexer::new("a").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Identifier("a".to_string()), Token::Eof]);
        assert!(Parser::new("a = 1").unwrap().parse().is_ok());
    }
}
