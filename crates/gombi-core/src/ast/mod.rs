//! Abstract Syntax Tree (AST) for propositional formulas
//!
//! Terms are immutable once built. Simplification produces a new tree.

pub mod nodes;
pub mod simplify;

pub use nodes::{Term, Value};
