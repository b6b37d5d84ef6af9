//! Token definitions

use logos::Logos;

/// Why a stretch of source did not form a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    InvalidCharacter,
    /// Digits that do not fit in an `i64`
    IntegerOutOfRange,
}

/// CI LISP token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r";[^\n]*")]
pub enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("let")]
    Let,

    // Literals
    #[regex(r"[+-]?[0-9]+\.[0-9]*", |lex| lex.slice().parse::<f64>().ok(), priority = 3)]
    Double(f64),

    #[regex(r"[+-]?[0-9]+", |lex| lex.slice().parse::<i64>().map_err(|_| LexError::IntegerOutOfRange), priority = 2)]
    Int(i64),

    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Symbol(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Let => write!(f, "let"),
            Token::Int(n) => write!(f, "{n}"),
            Token::Double(x) => write!(f, "{x:?}"),
            Token::Symbol(s) => write!(f, "{s}"),
        }
    }
}
