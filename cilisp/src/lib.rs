//! CI LISP interpreter library
//!
//! Prefix-notation arithmetic with lexically scoped `let` bindings, evaluated
//! over an arena tree with Int/Double typed numbers.

pub mod ast;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod util;

pub use ast::{Program, Sexpr, Span, Spanned};
pub use error::{CompileError, Error, Result};
pub use interp::{EvalError, Evaluation, Number, Warning};

/// Result of evaluating one top-level expression
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Location of the expression in the source
    pub span: Span,
    pub value: Number,
    pub warnings: Vec<Warning>,
}

/// Tokenize and parse `source`
pub fn compile(source: &str) -> Result<Program> {
    let tokens = lexer::tokenize(source)?;
    parser::parse(tokens)
}

/// Lower and evaluate a single top-level expression
pub fn eval_expr(expr: &Spanned<Sexpr>) -> std::result::Result<Outcome, EvalError> {
    let ast = ast::lower(expr);
    let Evaluation { value, warnings } = interp::eval(&ast)?;
    Ok(Outcome {
        span: expr.span,
        value,
        warnings,
    })
}

/// Evaluate every top-level expression of `source` in order.
///
/// Stops at the first fatal error; warnings never stop evaluation.
pub fn run_source(source: &str) -> std::result::Result<Vec<Outcome>, Error> {
    let program = compile(source)?;
    program
        .exprs
        .iter()
        .map(|expr| eval_expr(expr).map_err(Error::from))
        .collect()
}
