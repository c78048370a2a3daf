//! Grammars built on gombi-parser
//!
//! Each grammar rule is a plain function from a cursor to a parse result, so
//! rules can refer to each other recursively through [`gombi_parser::Parser::new`].

pub mod calc;
pub mod prop;

pub use calc::{expression, ArithmeticError, Outcome};
pub use prop::{formula, KEYWORDS};
