//! Syntax tree produced by the parser

use super::{Span, Spanned};
use crate::interp::Number;
use serde::{Deserialize, Serialize};

/// One parsed s-expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sexpr {
    Number(Number),
    Symbol(String),
    /// `(func operand...)`
    Call {
        func: Spanned<String>,
        operands: Vec<Spanned<Sexpr>>,
    },
    /// `((let (name value)...) body)`
    Scope {
        bindings: Vec<LetBinding>,
        body: Box<Spanned<Sexpr>>,
    },
}

impl Drop for Sexpr {
    /// Frees nested children from a worklist so dropping a deep tree does
    /// not recurse once per level.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr, &mut pending);
        }
    }
}

/// Move the direct children of `expr` into `out`, leaving it childless
fn detach_children(expr: &mut Sexpr, out: &mut Vec<Sexpr>) {
    match expr {
        Sexpr::Call { operands, .. } => {
            out.extend(operands.drain(..).map(|operand| operand.node));
        }
        Sexpr::Scope { bindings, body } => {
            out.extend(bindings.drain(..).map(|binding| binding.value.node));
            out.push(std::mem::replace(
                &mut body.node,
                Sexpr::Symbol(String::new()),
            ));
        }
        Sexpr::Number(_) | Sexpr::Symbol(_) => {}
    }
}

/// `(name value)` inside a `let` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetBinding {
    pub name: String,
    pub value: Spanned<Sexpr>,
    pub span: Span,
}

/// Top-level expressions of one source file, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub exprs: Vec<Spanned<Sexpr>>,
}
