//! Evaluation of the arena tree
//!
//! Numbers carry an `Int`/`Double` tag through every builtin. Recoverable
//! problems (bad operand counts, undefined symbols, division by zero) become
//! warnings and a NaN result; only structural failures abort evaluation.

pub mod builtins;
mod error;
mod eval;
mod value;

pub use error::{Diagnostics, EvalError, EvalResult, Warning, WarningKind};
pub use eval::{EvalStats, Evaluation, Interpreter, eval};
pub use value::{INTEGRAL_EPSILON, NumType, Number, is_integral};
