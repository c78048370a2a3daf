//! Propositional formulas with variables and equations
//!
//! Formulas are parsed with the combinators of `gombi_parser`, then
//! simplified under an [`Environment`] of variable bindings:
//!
//! ```
//! use gombi_core::{parse_formula, Environment};
//!
//! let parsed = parse_formula("NOT a AND b").unwrap();
//! let env = Environment::new().with_binding("a", false);
//! assert_eq!(parsed.value.to_string(), "((NOT a) AND b)");
//! assert_eq!(parsed.value.simplify(&env).to_string(), "b");
//! ```

pub mod ast;
pub mod engine;
pub mod environment;
pub mod parser;

// Test utilities (available in tests and with the `testing` feature)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use ast::{Term, Value};
pub use engine::{
    evaluate_expression, parse_formula, parse_formula_file, parse_formula_from, Parsed,
};
pub use environment::{Environment, EnvironmentError, EnvironmentWarning, LoadedEnvironment};
pub use parser::ArithmeticError;

use gombi_parser::InputError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not parse input")]
    Unparseable,

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Input(#[from] InputError),
}

pub type Result<T> = std::result::Result<T, Error>;
