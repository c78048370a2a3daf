//! Term simplification
//!
//! Substitutes bound variables and removes redundant sub-formulas. Every
//! rewrite replaces a node by one of its simplified children or by a literal,
//! so simplification visits each node at most once and always terminates.

use super::nodes::{Term, Value};
use crate::environment::Environment;

impl Term {
    /// Simplify the term under `env`.
    ///
    /// The result is a fixed point: simplifying it again under the same
    /// environment yields an equal term.
    pub fn simplify(&self, env: &Environment) -> Term {
        match self {
            Term::Value(_) => self.clone(),

            Term::Identifier(name) => match env.get(name) {
                Some(value) => Term::Value(value.clone()),
                None => self.clone(),
            },

            Term::Equation { left, right } => {
                let left = left.simplify(env);
                let right = right.simplify(env);
                if left == right {
                    Term::bool(true)
                } else if left.is_value() && right.is_value() {
                    Term::bool(false)
                } else {
                    Term::equation(left, right)
                }
            }

            // Double negation is dropped: this is classical logic
            Term::Not(arg) => match arg.simplify(env) {
                Term::Value(Value::Bool(b)) => Term::bool(!b),
                Term::Not(inner) => *inner,
                arg => Term::not(arg),
            },

            Term::And { left, right } => {
                let left = left.simplify(env);
                match left.as_bool() {
                    Some(false) => return left,
                    Some(true) => return right.simplify(env),
                    None => {}
                }
                let right = right.simplify(env);
                match right.as_bool() {
                    Some(false) => right,
                    Some(true) => left,
                    None => Term::and(left, right),
                }
            }

            Term::Or { left, right } => {
                let left = left.simplify(env);
                match left.as_bool() {
                    Some(true) => return left,
                    Some(false) => return right.simplify(env),
                    None => {}
                }
                let right = right.simplify(env);
                match right.as_bool() {
                    Some(true) => right,
                    Some(false) => left,
                    None => Term::or(left, right),
                }
            }
        }
    }
}
