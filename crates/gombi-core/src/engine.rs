use crate::ast::Term;
use crate::parser::{calc, prop};
use crate::{Error, Result};
use gombi_parser::{expect_spaces, ArrayInput, Cursor, ParseResult, Source, StreamInput};
use std::path::Path;

/// A successful top-level parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    /// Unconsumed text after the parsed value, without leading whitespace
    pub remaining: String,
}

impl<T> Parsed<T> {
    /// Check if the parser stopped before the end of the input
    pub fn has_remaining(&self) -> bool {
        !self.remaining.is_empty()
    }
}

/// Parse a formula from text
pub fn parse_formula(text: &str) -> Result<Parsed<Term>> {
    parse_formula_from(ArrayInput::cursor(text))
}

/// Parse a formula from any input source
pub fn parse_formula_from<S: Source + 'static>(input: Cursor<S>) -> Result<Parsed<Term>> {
    let parsed = finish(prop::formula().parse(input))?;
    tracing::debug!(
        formula = %parsed.value,
        nodes = parsed.value.size(),
        remaining = parsed.remaining.len(),
        "parsed formula"
    );
    Ok(parsed)
}

/// Parse a formula from a file, reading it lazily
pub fn parse_formula_file(path: impl AsRef<Path>) -> Result<Parsed<Term>> {
    parse_formula_from(StreamInput::open(path)?)
}

/// Parse and evaluate an arithmetic expression
pub fn evaluate_expression(text: &str) -> Result<Parsed<i64>> {
    let Parsed { value, remaining } = finish(calc::expression().parse(ArrayInput::cursor(text)))?;
    let value = value?;
    tracing::debug!(value, remaining = remaining.len(), "evaluated expression");
    Ok(Parsed { value, remaining })
}

fn finish<S: Source + 'static, T>(result: ParseResult<S, T>) -> Result<Parsed<T>> {
    match result {
        ParseResult::Success { value, remaining } => {
            let remaining = expect_spaces().parse(remaining).remaining().rest();
            Ok(Parsed { value, remaining })
        }
        ParseResult::Failure { remaining } => {
            tracing::debug!(at = ?remaining, "input did not parse");
            Err(Error::Unparseable)
        }
    }
}
