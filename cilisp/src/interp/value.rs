//! Numeric values produced by evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Results closer than this to a whole number are treated as integral
pub const INTEGRAL_EPSILON: f64 = 1e-6;

/// Declared kind of a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumType {
    Int,
    Double,
}

/// Tagged scalar: the result of evaluating any node.
///
/// An `Int` always holds a whole `value`. A `Double` holding NaN is the
/// "no meaningful result" sentinel produced by recoverable failures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Number {
    pub ty: NumType,
    pub value: f64,
}

impl Number {
    /// Int tagged number, rounding away sub-epsilon noise. Negative zero
    /// becomes zero.
    pub fn int(value: f64) -> Self {
        Number {
            ty: NumType::Int,
            value: value.round() + 0.0,
        }
    }

    pub fn double(value: f64) -> Self {
        Number {
            ty: NumType::Double,
            value,
        }
    }

    /// The NaN sentinel
    pub fn nan() -> Self {
        Number::double(f64::NAN)
    }

    pub fn is_int(&self) -> bool {
        self.ty == NumType::Int
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    /// Tag `value` as `Int` when every contributing operand was `Int` and
    /// the value is integral, `Double` otherwise.
    pub fn promote(value: f64, all_int: bool) -> Self {
        if all_int && is_integral(value) {
            Number::int(value)
        } else {
            Number::double(value)
        }
    }
}

/// Whether `x` is a whole number up to [`INTEGRAL_EPSILON`]
pub fn is_integral(x: f64) -> bool {
    x.is_finite() && (x - x.round()).abs() < INTEGRAL_EPSILON
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            NumType::Int => write!(f, "Integer : {:.0}", self.value),
            NumType::Double => write!(f, "Double : {:.6}", self.value),
        }
    }
}

impl PartialEq for Number {
    /// Same kind and same value, with NaN equal to NaN so the sentinel
    /// compares equal to itself.
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && (self.value == other.value || (self.value.is_nan() && other.value.is_nan()))
    }
}
