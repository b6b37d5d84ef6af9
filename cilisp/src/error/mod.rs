//! Error types and reporting

use crate::ast::Span;
use crate::interp::{EvalError, Warning};
use std::io;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CompileError>;

/// Failure while turning source text into a program
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lexer error at {span}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span}: {message}")]
    Parser { message: String, span: Span },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexer { span, .. } => Some(*span),
            Self::Parser { span, .. } => Some(*span),
            Self::Io { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Lexer { message, .. } => message,
            Self::Parser { message, .. } => message,
            Self::Io { message } => message,
        }
    }
}

impl From<io::Error> for CompileError {
    fn from(err: io::Error) -> Self {
        CompileError::io_error(err.to_string())
    }
}

/// Any failure that stops a program from producing a value
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Compile(e) => e.span(),
            Error::Eval(e) => e.span(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Error::Compile(e) => e.message().to_string(),
            Error::Eval(e) => e.to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Error::Compile(CompileError::Lexer { .. }) => "Lexer",
            Error::Compile(CompileError::Parser { .. }) => "Parser",
            Error::Compile(CompileError::Io { .. }) => "IO",
            Error::Eval(_) => "Evaluation",
        }
    }
}

/// Report error with ariadne
pub fn report_error(filename: &str, source: &str, error: &Error) -> io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let kind = error.kind();
    if let Some(span) = error.span() {
        Report::build(ReportKind::Error, (filename, span.start..span.end))
            .with_message(format!("{kind} error"))
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    } else {
        Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{kind} error: {}", error.message()))
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

/// Report a recoverable evaluation warning with ariadne
pub fn report_warning(filename: &str, source: &str, warning: &Warning) -> io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let span = warning.span.unwrap_or_default();
    let mut report = Report::build(ReportKind::Warning, (filename, span.start..span.end))
        .with_message(&warning.message);
    if warning.span.is_some() {
        report = report.with_label(
            Label::new((filename, span.start..span.end))
                .with_message(format!("{:?}", warning.kind))
                .with_color(Color::Yellow),
        );
    }
    report.finish().eprint((filename, Source::from(source)))
}
