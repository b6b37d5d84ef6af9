//! Built-in operators
//!
//! Every builtin receives its operands already resolved to numbers and
//! always produces a number. Bad operand counts and domain problems are
//! reported through the [`Reporter`] and answered with a sentinel.

use super::error::{Diagnostics, Warning};
use super::value::Number;
use crate::ast::{Func, Span};

/// Builtin function type
pub type BuiltinFn = fn(&[Number], &mut Reporter<'_>) -> Number;

/// Warning channel for one call, stamping each warning with the call site
pub struct Reporter<'a> {
    func: &'a str,
    span: Span,
    diags: &'a mut Diagnostics,
}

impl<'a> Reporter<'a> {
    pub fn new(func: &'a str, span: Span, diags: &'a mut Diagnostics) -> Self {
        Reporter { func, span, diags }
    }

    fn warn(&mut self, warning: Warning) {
        self.diags.warn(warning.at(self.span));
    }

    /// The leading `n` operands of a fixed-arity operator. Extras are
    /// dropped with a warning; a shortfall warns and yields `None`.
    fn fixed<'n>(&mut self, args: &'n [Number], n: usize) -> Option<&'n [Number]> {
        if args.len() < n {
            self.warn(Warning::too_few_operands(self.func, n, args.len(), "nan"));
            return None;
        }
        if args.len() > n {
            self.warn(Warning::extra_operands(self.func, n, args.len()));
        }
        Some(&args[..n])
    }

    /// Report an empty operand list answered with `identity`
    fn empty(&mut self, identity: &str) {
        self.warn(Warning::too_few_operands(self.func, 1, 0, identity));
    }
}

/// Implementation of `func`, or `None` for names that are not builtins
pub fn lookup(func: &Func) -> Option<BuiltinFn> {
    let builtin: BuiltinFn = match func {
        Func::Neg => builtin_neg,
        Func::Abs => builtin_abs,
        Func::Add => builtin_add,
        Func::Sub => builtin_sub,
        Func::Mult => builtin_mult,
        Func::Div => builtin_div,
        Func::Remainder => builtin_remainder,
        Func::Exp => builtin_exp,
        Func::Exp2 => builtin_exp2,
        Func::Pow => builtin_pow,
        Func::Log => builtin_log,
        Func::Sqrt => builtin_sqrt,
        Func::Cbrt => builtin_cbrt,
        Func::Hypot => builtin_hypot,
        Func::Max => builtin_max,
        Func::Min => builtin_min,
        Func::Custom(_) => return None,
    };
    Some(builtin)
}

fn all_int(args: &[Number]) -> bool {
    args.iter().all(Number::is_int)
}

// ============ Sign ============

fn builtin_neg(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[x]) = r.fixed(args, 1) else {
        return Number::nan();
    };
    if x.is_int() {
        Number::int(-x.value)
    } else {
        Number::double(-x.value)
    }
}

fn builtin_abs(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[x]) = r.fixed(args, 1) else {
        return Number::nan();
    };
    Number {
        ty: x.ty,
        value: x.value.abs(),
    }
}

// ============ Arithmetic ============

fn builtin_add(args: &[Number], r: &mut Reporter<'_>) -> Number {
    if args.is_empty() {
        r.empty("0");
        return Number::int(0.0);
    }
    let sum = args.iter().map(|n| n.value).sum();
    Number::promote(sum, all_int(args))
}

fn builtin_sub(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[a, b]) = r.fixed(args, 2) else {
        return Number::nan();
    };
    Number::promote(a.value - b.value, a.is_int() && b.is_int())
}

fn builtin_mult(args: &[Number], r: &mut Reporter<'_>) -> Number {
    if args.is_empty() {
        r.empty("1");
        return Number::int(1.0);
    }
    let product = args.iter().map(|n| n.value).product();
    Number::promote(product, all_int(args))
}

/// Int over Int truncates toward zero; anything else is a Double quotient
fn builtin_div(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[a, b]) = r.fixed(args, 2) else {
        return Number::nan();
    };
    if b.value == 0.0 {
        r.warn(Warning::division_by_zero(r.func));
        return Number::nan();
    }
    let quotient = a.value / b.value;
    if a.is_int() && b.is_int() {
        Number::int(quotient.trunc())
    } else {
        Number::double(quotient)
    }
}

/// Remainder with the sign normalized to be non-negative
fn builtin_remainder(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[a, b]) = r.fixed(args, 2) else {
        return Number::nan();
    };
    if b.value == 0.0 {
        r.warn(Warning::division_by_zero(r.func));
        return Number::nan();
    }
    let mut rem = a.value % b.value;
    if rem < 0.0 {
        rem += b.value.abs();
    }
    Number::promote(rem, a.is_int() && b.is_int())
}

// ============ Powers and logarithms ============

fn builtin_exp(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[x]) = r.fixed(args, 1) else {
        return Number::nan();
    };
    Number::double(x.value.exp())
}

fn builtin_exp2(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[x]) = r.fixed(args, 1) else {
        return Number::nan();
    };
    Number::promote(x.value.exp2(), x.is_int())
}

fn builtin_pow(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[base, exponent]) = r.fixed(args, 2) else {
        return Number::nan();
    };
    Number::promote(
        base.value.powf(exponent.value),
        base.is_int() && exponent.is_int(),
    )
}

fn builtin_log(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[x]) = r.fixed(args, 1) else {
        return Number::nan();
    };
    Number::double(x.value.ln())
}

fn builtin_sqrt(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[x]) = r.fixed(args, 1) else {
        return Number::nan();
    };
    Number::double(x.value.sqrt())
}

fn builtin_cbrt(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some(&[x]) = r.fixed(args, 1) else {
        return Number::nan();
    };
    Number::double(x.value.cbrt())
}

/// Square root of the sum of squares of any number of operands
fn builtin_hypot(args: &[Number], r: &mut Reporter<'_>) -> Number {
    if args.is_empty() {
        r.empty("0.0");
        return Number::double(0.0);
    }
    let sum: f64 = args.iter().map(|n| n.value * n.value).sum();
    Number::double(sum.sqrt())
}

// ============ Extrema ============
//
// The winning operand is returned as-is, keeping its own type.

fn builtin_max(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some((&first, rest)) = args.split_first() else {
        r.empty("nan");
        return Number::nan();
    };
    rest.iter()
        .fold(first, |best, &n| if n.value > best.value { n } else { best })
}

fn builtin_min(args: &[Number], r: &mut Reporter<'_>) -> Number {
    let Some((&first, rest)) = args.split_first() else {
        r.empty("nan");
        return Number::nan();
    };
    rest.iter()
        .fold(first, |best, &n| if n.value < best.value { n } else { best })
}
