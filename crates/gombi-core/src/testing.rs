//! Test utilities and helper functions for gombi-core tests

use crate::ast::{Term, Value};
use crate::environment::Environment;

/// Build an environment from literal bindings
pub fn env(bindings: &[(&str, Value)]) -> Environment {
    bindings
        .iter()
        .map(|(name, value)| (*name, value.clone()))
        .collect()
}

/// Parse a formula that must be consumed completely
///
/// # Panics
/// If the text does not parse or leaves trailing input.
pub fn parse_ok(text: &str) -> Term {
    let parsed = crate::parse_formula(text)
        .unwrap_or_else(|err| panic!("failed to parse {:?}: {}", text, err));
    assert!(
        !parsed.has_remaining(),
        "trailing input {:?} after parsing {:?}",
        parsed.remaining,
        text
    );
    parsed.value
}
