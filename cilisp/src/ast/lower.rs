//! Lowering from the parsed syntax tree into the evaluation arena

use super::{Ast, AstBuilder, Binding, Func, NodeId, Sexpr, Spanned};

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Build the arena for one top-level expression
pub fn lower(expr: &Spanned<Sexpr>) -> Ast {
    let mut builder = AstBuilder::new();
    let root = lower_expr(&mut builder, expr);
    builder.finish(root)
}

fn lower_expr(builder: &mut AstBuilder, expr: &Spanned<Sexpr>) -> NodeId {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || match &expr.node {
        Sexpr::Number(n) => builder.number(*n, expr.span),
        Sexpr::Symbol(name) => builder.symbol(name.as_str(), expr.span),
        Sexpr::Call { func, operands } => {
            let operands = operands
                .iter()
                .map(|operand| lower_expr(builder, operand))
                .collect();
            builder.call(Func::from_name(&func.node), operands, expr.span)
        }
        Sexpr::Scope { bindings, body } => {
            let bindings = bindings
                .iter()
                .map(|binding| Binding {
                    id: binding.name.clone(),
                    value: lower_expr(builder, &binding.value),
                    span: binding.span,
                })
                .collect();
            let body = lower_expr(builder, body);
            builder.scope(bindings, body, expr.span)
        }
    })
}
