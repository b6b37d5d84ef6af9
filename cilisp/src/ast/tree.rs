//! Arena-allocated evaluation tree
//!
//! Nodes live in one `Vec` owned by [`Ast`] and refer to each other by
//! [`NodeId`]. A child records its parent's id; the arena alone owns nodes.

use super::{Binding, Span, SymbolTable};
use crate::interp::{Number, Warning};
use std::fmt;

/// Index of a node in its [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Built-in operator named in function position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Func {
    Neg,
    Abs,
    Add,
    Sub,
    Mult,
    Div,
    Remainder,
    Exp,
    Exp2,
    Pow,
    Log,
    Sqrt,
    Cbrt,
    Hypot,
    Max,
    Min,
    /// Any other name. Calling one is a fatal error.
    Custom(String),
}

/// Source names of every builtin
pub const BUILTIN_NAMES: [&str; 16] = [
    "neg",
    "abs",
    "add",
    "sub",
    "mult",
    "div",
    "remainder",
    "exp",
    "exp2",
    "pow",
    "log",
    "sqrt",
    "cbrt",
    "hypot",
    "max",
    "min",
];

impl Func {
    pub fn from_name(name: &str) -> Func {
        match name {
            "neg" => Func::Neg,
            "abs" => Func::Abs,
            "add" => Func::Add,
            "sub" => Func::Sub,
            "mult" => Func::Mult,
            "div" => Func::Div,
            "remainder" => Func::Remainder,
            "exp" => Func::Exp,
            "exp2" => Func::Exp2,
            "pow" => Func::Pow,
            "log" => Func::Log,
            "sqrt" => Func::Sqrt,
            "cbrt" => Func::Cbrt,
            "hypot" => Func::Hypot,
            "max" => Func::Max,
            "min" => Func::Min,
            other => Func::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Func::Neg => "neg",
            Func::Abs => "abs",
            Func::Add => "add",
            Func::Sub => "sub",
            Func::Mult => "mult",
            Func::Div => "div",
            Func::Remainder => "remainder",
            Func::Exp => "exp",
            Func::Exp2 => "exp2",
            Func::Pow => "pow",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
            Func::Cbrt => "cbrt",
            Func::Hypot => "hypot",
            Func::Max => "max",
            Func::Min => "min",
            Func::Custom(name) => name,
        }
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Number(Number),
    Call { func: Func, operands: Vec<NodeId> },
    Symbol(String),
    /// `let` scope: bindings visible to `body` and to the bound values
    Scope { table: SymbolTable, body: NodeId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Syntactic parent, set once when the parent is built
    pub parent: Option<NodeId>,
    pub span: Span,
}

/// A complete tree ready for evaluation
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    /// Problems found while building, e.g. duplicate bindings
    warnings: Vec<Warning>,
}

impl Ast {
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Nearest strict ancestor of `id` that is a scope
    pub fn enclosing_scope(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.parent;
        while let Some(ancestor) = current {
            let node = self.get(ancestor)?;
            if matches!(node.kind, NodeKind::Scope { .. }) {
                return Some(ancestor);
            }
            current = node.parent;
        }
        None
    }

    /// Resolve `name` as seen from node `from`: the nearest enclosing
    /// scope's table first, then each scope further out.
    pub fn resolve(&self, from: NodeId, name: &str) -> Option<&Binding> {
        let mut scope = self.enclosing_scope(from);
        while let Some(id) = scope {
            if let Some(Node {
                kind: NodeKind::Scope { table, .. },
                ..
            }) = self.get(id)
            {
                if let Some(binding) = table.lookup(name) {
                    return Some(binding);
                }
            }
            scope = self.enclosing_scope(id);
        }
        None
    }
}

/// Bottom-up constructor for [`Ast`]. Children are built first; building
/// their parent links them to it.
///
/// Ids passed back in should come from this builder and be given one parent
/// each. A foreign id does not panic; evaluation reports it as a missing node.
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
    warnings: Vec<Warning>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            span,
        });
        id
    }

    /// Link `child` under `parent`. An id this builder never issued is
    /// left dangling and surfaces as a missing node when evaluated.
    fn adopt(&mut self, child: NodeId, parent: NodeId) {
        match self.nodes.get_mut(child.index()) {
            Some(node) => {
                debug_assert!(node.parent.is_none(), "node {child} already has a parent");
                node.parent = Some(parent);
            }
            None => tracing::debug!(child = %child, "operand is not part of this tree"),
        }
    }

    pub fn number(&mut self, value: Number, span: Span) -> NodeId {
        self.push(NodeKind::Number(value), span)
    }

    pub fn symbol(&mut self, name: impl Into<String>, span: Span) -> NodeId {
        self.push(NodeKind::Symbol(name.into()), span)
    }

    pub fn call(&mut self, func: Func, operands: Vec<NodeId>, span: Span) -> NodeId {
        let id = self.push(
            NodeKind::Call {
                func,
                operands: operands.clone(),
            },
            span,
        );
        for operand in operands {
            self.adopt(operand, id);
        }
        id
    }

    /// Build a scope over `body`. Bindings are inserted in order; a repeated
    /// name is dropped with a warning and the first definition stays.
    pub fn scope(&mut self, bindings: Vec<Binding>, body: NodeId, span: Span) -> NodeId {
        let mut table = SymbolTable::new();
        let mut values = Vec::with_capacity(bindings.len());
        for binding in bindings {
            values.push(binding.value);
            if let Err(warning) = table.insert(binding) {
                tracing::debug!("{}", warning.message);
                self.warnings.push(warning);
            }
        }

        let id = self.push(NodeKind::Scope { table, body }, span);
        self.adopt(body, id);
        for value in values {
            self.adopt(value, id);
        }
        id
    }

    pub fn finish(self, root: NodeId) -> Ast {
        Ast {
            nodes: self.nodes,
            root: Some(root),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(b: &mut AstBuilder, n: i64) -> NodeId {
        b.number(Number::int(n as f64), Span::default())
    }

    fn bind(id: &str, value: NodeId) -> Binding {
        Binding {
            id: id.to_string(),
            value,
            span: Span::default(),
        }
    }

    // ====================================================================
    // Func names
    // ====================================================================

    #[test]
    fn test_func_name_roundtrip() {
        for name in BUILTIN_NAMES {
            let func = Func::from_name(name);
            assert!(!matches!(func, Func::Custom(_)), "{name} should be builtin");
            assert_eq!(func.name(), name);
        }
    }

    #[test]
    fn test_unknown_func_is_custom() {
        assert_eq!(Func::from_name("frobnicate"), Func::Custom("frobnicate".to_string()));
        assert_eq!(Func::from_name("Add"), Func::Custom("Add".to_string()));
    }

    // ====================================================================
    // Construction
    // ====================================================================

    #[test]
    fn test_call_sets_operand_parents() {
        let mut b = AstBuilder::new();
        let two = int(&mut b, 2);
        let three = int(&mut b, 3);
        let call = b.call(Func::Add, vec![two, three], Span::default());
        let ast = b.finish(call);

        assert_eq!(ast.root(), Some(call));
        assert_eq!(ast.get(two).and_then(|n| n.parent), Some(call));
        assert_eq!(ast.get(three).and_then(|n| n.parent), Some(call));
        assert_eq!(ast.get(call).and_then(|n| n.parent), None);
        assert_eq!(ast.len(), 3);
    }

    #[test]
    fn test_scope_adopts_body_and_values() {
        let mut b = AstBuilder::new();
        let ten = int(&mut b, 10);
        let x = b.symbol("x", Span::default());
        let scope = b.scope(vec![bind("x", ten)], x, Span::default());
        let ast = b.finish(scope);

        assert_eq!(ast.get(ten).and_then(|n| n.parent), Some(scope));
        assert_eq!(ast.get(x).and_then(|n| n.parent), Some(scope));
        assert!(ast.warnings().is_empty());
    }

    #[test]
    fn test_scope_duplicate_binding_warns() {
        let mut b = AstBuilder::new();
        let one = int(&mut b, 1);
        let two = int(&mut b, 2);
        let x = b.symbol("x", Span::default());
        let scope = b.scope(vec![bind("x", one), bind("x", two)], x, Span::default());
        let ast = b.finish(scope);

        assert_eq!(ast.warnings().len(), 1);
        assert_eq!(ast.resolve(x, "x").map(|b| b.value), Some(one));
    }

    // ====================================================================
    // Resolution
    // ====================================================================

    #[test]
    fn test_enclosing_scope_skips_calls() {
        let mut b = AstBuilder::new();
        let x = b.symbol("x", Span::default());
        let call = b.call(Func::Neg, vec![x], Span::default());
        let five = int(&mut b, 5);
        let scope = b.scope(vec![bind("x", five)], call, Span::default());
        let ast = b.finish(scope);

        assert_eq!(ast.enclosing_scope(x), Some(scope));
        assert_eq!(ast.enclosing_scope(call), Some(scope));
        assert_eq!(ast.enclosing_scope(scope), None);
    }

    #[test]
    fn test_resolve_walks_outward() {
        // ((let (x 10)) ((let (y 5)) (add x y)))
        let mut b = AstBuilder::new();
        let x = b.symbol("x", Span::default());
        let y = b.symbol("y", Span::default());
        let add = b.call(Func::Add, vec![x, y], Span::default());
        let five = int(&mut b, 5);
        let inner = b.scope(vec![bind("y", five)], add, Span::default());
        let ten = int(&mut b, 10);
        let outer = b.scope(vec![bind("x", ten)], inner, Span::default());
        let ast = b.finish(outer);

        assert_eq!(ast.resolve(x, "x").map(|b| b.value), Some(ten));
        assert_eq!(ast.resolve(y, "y").map(|b| b.value), Some(five));
        assert!(ast.resolve(x, "z").is_none());
    }

    #[test]
    fn test_resolve_inner_shadows_outer() {
        let mut b = AstBuilder::new();
        let x = b.symbol("x", Span::default());
        let one = int(&mut b, 1);
        let inner = b.scope(vec![bind("x", one)], x, Span::default());
        let ten = int(&mut b, 10);
        let outer = b.scope(vec![bind("x", ten)], inner, Span::default());
        let ast = b.finish(outer);

        assert_eq!(ast.resolve(x, "x").map(|b| b.value), Some(one));
    }

    #[test]
    fn test_binding_value_sees_sibling() {
        // ((let (a 1) (b a)) b)
        let mut b = AstBuilder::new();
        let one = int(&mut b, 1);
        let a_ref = b.symbol("a", Span::default());
        let body = b.symbol("b", Span::default());
        let scope = b.scope(vec![bind("a", one), bind("b", a_ref)], body, Span::default());
        let ast = b.finish(scope);

        assert_eq!(ast.resolve(a_ref, "a").map(|b| b.value), Some(one));
    }

    #[test]
    fn test_default_ast_has_no_root() {
        let ast = Ast::default();
        assert!(ast.root().is_none());
        assert!(ast.is_empty());
        assert!(ast.get(NodeId(0)).is_none());
    }
}
