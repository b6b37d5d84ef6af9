//! Tree-walking evaluator

use super::builtins::{self, Reporter};
use super::error::{Diagnostics, EvalError, EvalResult, Warning};
use super::value::Number;
use crate::ast::{Ast, BUILTIN_NAMES, Func, NodeId, NodeKind, Span, SymbolTable};
use crate::util::{find_similar_name, format_suggestion_hint};

/// Stack growth parameters for deeply nested trees
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// Maximum edit distance for "did you mean" hints
const SUGGESTION_THRESHOLD: usize = 2;

/// Evaluation state of one node
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Unevaluated,
    InProgress,
    Evaluated(Number),
}

/// Counters for observing how much work an evaluation did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Builtin applications
    pub builtin_calls: usize,
    /// Nodes answered from the memo table
    pub memo_hits: usize,
}

/// Outcome of evaluating a tree: its value plus every warning raised
/// while building and evaluating it, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: Number,
    pub warnings: Vec<Warning>,
}

/// Evaluate the root of `ast`
pub fn eval(ast: &Ast) -> EvalResult<Evaluation> {
    let mut interp = Interpreter::new(ast);
    let value = interp.run()?;
    Ok(interp.into_evaluation(value))
}

/// Evaluator over one tree.
///
/// Each node is evaluated at most once; later visits are answered from the
/// memo table, so a bound expression referenced many times is computed once.
pub struct Interpreter<'ast> {
    ast: &'ast Ast,
    memo: Vec<Slot>,
    diags: Diagnostics,
    stats: EvalStats,
}

impl<'ast> Interpreter<'ast> {
    pub fn new(ast: &'ast Ast) -> Self {
        Interpreter {
            ast,
            memo: vec![Slot::Unevaluated; ast.len()],
            diags: Diagnostics::new(),
            stats: EvalStats::default(),
        }
    }

    /// Evaluate the tree's root
    pub fn run(&mut self) -> EvalResult<Number> {
        let root = self.ast.root().ok_or(EvalError::MissingRoot)?;
        self.eval_node(root)
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    pub fn warnings(&self) -> &[Warning] {
        self.diags.warnings()
    }

    /// Package `value` with construction and evaluation warnings
    pub fn into_evaluation(self, value: Number) -> Evaluation {
        let mut warnings = self.ast.warnings().to_vec();
        warnings.extend(self.diags.into_warnings());
        Evaluation { value, warnings }
    }

    /// Evaluate a node with automatic stack growth for deep nesting
    pub fn eval_node(&mut self, id: NodeId) -> EvalResult<Number> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(id))
    }

    fn eval_inner(&mut self, id: NodeId) -> EvalResult<Number> {
        let ast = self.ast;
        let node = ast.get(id).ok_or(EvalError::MissingNode(id))?;

        match self.memo[id.index()] {
            Slot::Evaluated(value) => {
                self.stats.memo_hits += 1;
                return Ok(value);
            }
            Slot::InProgress => return Err(EvalError::Reentered(id)),
            Slot::Unevaluated => {}
        }

        let value = match &node.kind {
            NodeKind::Number(n) => return Ok(*n),
            NodeKind::Symbol(name) => {
                self.memo[id.index()] = Slot::InProgress;
                self.eval_symbol(id, name, node.span)?
            }
            NodeKind::Scope { table, body } => {
                self.memo[id.index()] = Slot::InProgress;
                self.eval_scope(id, table, *body)?
            }
            NodeKind::Call { func, operands } => {
                self.memo[id.index()] = Slot::InProgress;
                self.eval_call(func, operands, node.span)?
            }
        };

        self.memo[id.index()] = Slot::Evaluated(value);
        Ok(value)
    }

    fn eval_symbol(&mut self, id: NodeId, name: &str, span: Span) -> EvalResult<Number> {
        let Some(binding) = self.ast.resolve(id, name) else {
            self.diags.warn(Warning::undefined_symbol(name).at(span));
            return Ok(Number::nan());
        };

        if matches!(self.memo.get(binding.value.index()), Some(Slot::InProgress)) {
            self.diags.warn(Warning::cyclic_binding(name).at(span));
            return Ok(Number::nan());
        }

        tracing::debug!(symbol = name, value = %binding.value, "resolved symbol");
        self.eval_node(binding.value)
    }

    fn eval_scope(&mut self, id: NodeId, table: &SymbolTable, body: NodeId) -> EvalResult<Number> {
        tracing::debug!(scope = %id, bindings = table.len(), "entering scope");
        self.eval_node(body)
    }

    /// Resolve operands left to right, then apply the builtin
    fn eval_call(&mut self, func: &Func, operands: &[NodeId], span: Span) -> EvalResult<Number> {
        let Some(builtin) = builtins::lookup(func) else {
            let name = func.name();
            let suggestion = find_similar_name(name, &BUILTIN_NAMES, SUGGESTION_THRESHOLD);
            return Err(EvalError::UnknownFunction {
                name: name.to_string(),
                span,
                hint: format_suggestion_hint(suggestion),
            });
        };

        let mut args = Vec::with_capacity(operands.len());
        for &operand in operands {
            args.push(self.eval_node(operand)?);
        }

        self.stats.builtin_calls += 1;
        tracing::trace!(func = func.name(), ?args, "applying builtin");
        let mut reporter = Reporter::new(func.name(), span, &mut self.diags);
        Ok(builtin(&args, &mut reporter))
    }
}
