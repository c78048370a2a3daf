//! Grammar for integer arithmetic
//!
//! ```text
//! Number       := [0-9]+
//! Multiplicand := Number | "(" Expression ")"
//! Addend       := Multiplicand (("*" | "/") Multiplicand)*
//! Expression   := Addend (("+" | "-") Addend)*
//! ```
//!
//! Operators are binary and left-associative. The repetitions are folded
//! from the first operand with [`Parser::bind`] and
//! [`Parser::repeat_and_fold_left`], so no rule needs left recursion.
//!
//! Evaluation happens while parsing. A failed operation does not stop the
//! parse; its error is carried through the rest of the fold.

use gombi_parser::{
    expect_number, expect_token, maybe_spaces_before, Cursor, Pair, ParseResult, Parser, Source,
};
use thiserror::Error;

/// Arithmetic failure while evaluating an expression
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Division by zero")]
    DivisionByZero,
}

/// Value of a (sub)expression
pub type Outcome = Result<i64, ArithmeticError>;

/// Parser for a complete arithmetic expression
pub fn expression<S: Source + 'static>() -> Parser<S, Outcome> {
    Parser::new(parse_expression::<S>)
}

/// `Expression := Addend (("+" | "-") Addend)*`
pub fn parse_expression<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Outcome> {
    Parser::new(parse_addend::<S>)
        .bind(|first: Outcome| {
            expect_token("+")
                .or_else(expect_token("-"))
                .and_then(Parser::new(parse_addend::<S>))
                .repeat_and_fold_left(first, add)
        })
        .parse(input)
}

/// `Addend := Multiplicand (("*" | "/") Multiplicand)*`
pub fn parse_addend<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Outcome> {
    Parser::new(parse_multiplicand::<S>)
        .bind(|first: Outcome| {
            expect_token("*")
                .or_else(expect_token("/"))
                .and_then(Parser::new(parse_multiplicand::<S>))
                .repeat_and_fold_left(first, multiply)
        })
        .parse(input)
}

/// `Multiplicand := Number | "(" Expression ")"`
pub fn parse_multiplicand<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Outcome> {
    let parenthesized = expect_token("(")
        .and_then(Parser::new(parse_expression::<S>))
        .and_then(expect_token(")"))
        .first()
        .second();

    Parser::new(parse_number::<S>)
        .convert(Ok)
        .or_else(parenthesized)
        .parse(input)
}

/// A decimal literal. Literals that do not fit in an `i64` do not parse.
pub fn parse_number<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, i64> {
    maybe_spaces_before(expect_number().try_convert(|digits: String| digits.parse::<i64>().ok()))
        .parse(input)
}

fn add(lhs: Outcome, Pair { first: operator, second: rhs }: Pair<String, Outcome>) -> Outcome {
    let (lhs, rhs) = (lhs?, rhs?);
    let sum = if operator == "+" {
        lhs.checked_add(rhs)
    } else {
        lhs.checked_sub(rhs)
    };
    sum.ok_or(ArithmeticError::Overflow)
}

fn multiply(lhs: Outcome, Pair { first: operator, second: rhs }: Pair<String, Outcome>) -> Outcome {
    let (lhs, rhs) = (lhs?, rhs?);
    if operator == "*" {
        return lhs.checked_mul(rhs).ok_or(ArithmeticError::Overflow);
    }
    if rhs == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    // i64::MIN / -1
    lhs.checked_div(rhs).ok_or(ArithmeticError::Overflow)
}
