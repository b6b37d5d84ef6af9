//! Lexer implementation using logos

mod token;

pub use token::{LexError, Token};

use crate::ast::Span;
use crate::error::{CompileError, Result};
use logos::Logos;

/// Tokenize source code
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(LexError::InvalidCharacter) => {
                return Err(CompileError::lexer(
                    format!("invalid character: {:?}", lexer.slice()),
                    span,
                ));
            }
            Err(LexError::IntegerOutOfRange) => {
                return Err(CompileError::lexer(
                    format!("integer literal out of range: {}", lexer.slice()),
                    span,
                ));
            }
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(tokenize("   \t\t\n\n\r\n   ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_call() {
        assert_eq!(
            kinds("(add 1 2.5)"),
            vec![
                Token::LParen,
                Token::Symbol("add".to_string()),
                Token::Int(1),
                Token::Double(2.5),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_let_section() {
        assert_eq!(
            kinds("((let (x 10)) x)"),
            vec![
                Token::LParen,
                Token::LParen,
                Token::Let,
                Token::LParen,
                Token::Symbol("x".to_string()),
                Token::Int(10),
                Token::RParen,
                Token::RParen,
                Token::Symbol("x".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("(neg 12)").unwrap();
        assert_eq!(tokens[0].1, Span::new(0, 1)); // "("
        assert_eq!(tokens[1].1, Span::new(1, 4)); // "neg"
        assert_eq!(tokens[2].1, Span::new(5, 7)); // "12"
        assert_eq!(tokens[3].1, Span::new(7, 8)); // ")"
    }

    #[test]
    fn test_tokenize_negative_literal_adjacent_to_paren() {
        assert_eq!(
            kinds("(abs -3)"),
            vec![
                Token::LParen,
                Token::Symbol("abs".to_string()),
                Token::Int(-3),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_invalid_character() {
        let err = tokenize("(add 1 #)").unwrap_err();
        assert!(err.message().contains("invalid character"));
        assert_eq!(err.span(), Some(Span::new(7, 8)));
    }

    #[test]
    fn test_tokenize_integer_out_of_range() {
        let err = tokenize("(add 99999999999999999999 1)").unwrap_err();
        assert_eq!(err.message(), "integer literal out of range: 99999999999999999999");
        assert_eq!(err.span(), Some(Span::new(5, 25)));
    }

    #[test]
    fn test_tokenize_skips_comments() {
        assert_eq!(kinds("; nothing here\n7 ; seven"), vec![Token::Int(7)]);
    }
}
