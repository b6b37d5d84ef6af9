//! Evaluation diagnostics: recoverable warnings and fatal errors

use crate::ast::{NodeId, Span};
use std::fmt;
use thiserror::Error;

/// Recoverable problem found while building or evaluating a tree
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
    pub span: Option<Span>,
}

/// Kinds of warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Fewer operands than the operator needs
    TooFewOperands,
    /// Operands past the operator's arity were dropped
    ExtraOperands,
    /// Symbol not bound in any enclosing scope
    UndefinedSymbol,
    /// Division or remainder by zero
    DivisionByZero,
    /// Name bound twice in the same `let`
    DuplicateBinding,
    /// Binding whose value depends on itself
    CyclicBinding,
}

impl Warning {
    pub fn too_few_operands(func: &str, expected: usize, got: usize, fallback: &str) -> Self {
        Warning {
            kind: WarningKind::TooFewOperands,
            message: format!(
                "{func} called with {got} operand(s), needs {expected}! {fallback} returned"
            ),
            span: None,
        }
    }

    pub fn extra_operands(func: &str, expected: usize, got: usize) -> Self {
        Warning {
            kind: WarningKind::ExtraOperands,
            message: format!(
                "{func} called with extra (ignored) operands: uses {expected}, got {got}"
            ),
            span: None,
        }
    }

    pub fn undefined_symbol(name: &str) -> Self {
        Warning {
            kind: WarningKind::UndefinedSymbol,
            message: format!("undefined symbol \"{name}\" evaluated! nan returned"),
            span: None,
        }
    }

    pub fn division_by_zero(func: &str) -> Self {
        Warning {
            kind: WarningKind::DivisionByZero,
            message: format!("{func}: division by zero! nan returned"),
            span: None,
        }
    }

    pub fn duplicate_binding(name: &str) -> Self {
        Warning {
            kind: WarningKind::DuplicateBinding,
            message: format!("multiple (ignored) definitions of {name}: first definition kept"),
            span: None,
        }
    }

    pub fn cyclic_binding(name: &str) -> Self {
        Warning {
            kind: WarningKind::CyclicBinding,
            message: format!("symbol \"{name}\" depends on its own value! nan returned"),
            span: None,
        }
    }

    /// Attach the location of the offending node
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WARNING: {}", self.message)
    }
}

/// Warning collector threaded through evaluation
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// Fatal evaluation failure. Nothing computed before it is trusted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("no expression to evaluate")]
    MissingRoot,

    #[error("node {0} is not part of the tree")]
    MissingNode(NodeId),

    #[error("node {0} was re-entered while it was being evaluated")]
    Reentered(NodeId),

    #[error("call to unknown function `{name}` at {span}: user-defined functions are not supported{hint}")]
    UnknownFunction {
        name: String,
        span: Span,
        hint: String,
    },
}

impl EvalError {
    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::UnknownFunction { span, .. } => Some(*span),
            EvalError::MissingRoot | EvalError::MissingNode(_) | EvalError::Reentered(_) => None,
        }
    }
}

/// Result type for evaluation
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_operands_message() {
        let w = Warning::too_few_operands("sub", 2, 1, "nan");
        assert_eq!(w.kind, WarningKind::TooFewOperands);
        assert_eq!(w.message, "sub called with 1 operand(s), needs 2! nan returned");
    }

    #[test]
    fn test_extra_operands_message() {
        let w = Warning::extra_operands("neg", 1, 3);
        assert_eq!(w.kind, WarningKind::ExtraOperands);
        assert!(w.message.contains("neg"));
        assert!(w.message.contains("ignored"));
    }

    #[test]
    fn test_undefined_symbol_names_symbol() {
        let w = Warning::undefined_symbol("radius");
        assert_eq!(w.kind, WarningKind::UndefinedSymbol);
        assert!(w.message.contains("\"radius\""));
    }

    #[test]
    fn test_warning_at_attaches_span() {
        let w = Warning::division_by_zero("div").at(Span::new(3, 9));
        assert_eq!(w.span, Some(Span::new(3, 9)));
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::duplicate_binding("x");
        assert_eq!(
            format!("{w}"),
            "WARNING: multiple (ignored) definitions of x: first definition kept"
        );
    }

    #[test]
    fn test_diagnostics_collects_in_order() {
        let mut diags = Diagnostics::new();
        diags.warn(Warning::undefined_symbol("a"));
        diags.warn(Warning::division_by_zero("div"));
        let kinds: Vec<_> = diags.warnings().iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::UndefinedSymbol, WarningKind::DivisionByZero]);
        assert_eq!(diags.into_warnings().len(), 2);
    }

    #[test]
    fn test_unknown_function_display() {
        let err = EvalError::UnknownFunction {
            name: "ad".to_string(),
            span: Span::new(1, 3),
            hint: "\n  hint: did you mean `add`?".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("`ad`"));
        assert!(text.contains("did you mean `add`"));
        assert_eq!(err.span(), Some(Span::new(1, 3)));
    }

    #[test]
    fn test_missing_node_has_no_span() {
        assert_eq!(EvalError::MissingNode(NodeId(7)).span(), None);
        assert_eq!(EvalError::MissingRoot.to_string(), "no expression to evaluate");
    }
}
