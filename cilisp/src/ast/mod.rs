//! Syntax and evaluation trees

mod lower;
mod sexpr;
mod span;
mod table;
mod tree;

pub use lower::lower;
pub use sexpr::*;
pub use span::*;
pub use table::*;
pub use tree::*;
