//! Grammar for propositional formulas
//!
//! ```text
//! Or       := And ("OR" And)*
//! And      := Not ("AND" Not)*
//! Not      := "NOT"* Equation
//! Equation := Atom ("=" Atom)?
//! Atom     := Value | Ident | "(" Or ")"
//! Value    := Bool | String
//! Bool     := "TRUE" | "FALSE"
//! String   := '"' ( '\"' | [^"] )* '"'
//! Ident    := [A-Za-z_][A-Za-z0-9_]* except keywords
//! ```
//!
//! No rule is left-recursive and the alternatives of every choice start with
//! different tokens, which committed choice requires. Keywords are recognized
//! by parsing a whole identifier and comparing it, so `TRUEfoo` is an
//! identifier and not `TRUE` followed by `foo`.
//!
//! Operator chains are read in a loop and nested to the right afterwards, so
//! `a AND b AND c` is `a AND (b AND c)` and long chains need no recursion.
//! Only parentheses nest the parser.

use crate::ast::{Term, Value};
use gombi_parser::{
    expect_code_point, expect_code_point_not, expect_identifier, expect_keyword, expect_token,
    maybe_spaces_before, Cursor, Pair, ParseResult, Parser, Source,
};

/// Reserved words of the formula language
pub const KEYWORDS: [&str; 5] = ["TRUE", "FALSE", "NOT", "AND", "OR"];

/// Parser for a complete formula. The grammar is built once per call.
pub fn formula<S: Source + 'static>() -> Parser<S, Term> {
    Parser::recursive(|formula| {
        let atom = atom_rule(formula);
        chain_rule("OR", chain_rule("AND", not_rule(equation_rule(atom))))
    })
}

/// `Or := And ("OR" And)*`
pub fn parse_or<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Term> {
    formula().parse(input)
}

/// `And := Not ("AND" Not)*`
pub fn parse_and<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Term> {
    // parentheses reopen the full grammar
    chain_rule("AND", not_rule(equation_rule(atom_rule(formula())))).parse(input)
}

/// `Not := "NOT"* Equation`. An even number of `NOT`s cancels out.
pub fn parse_not<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Term> {
    not_rule(equation_rule(atom_rule(formula()))).parse(input)
}

/// `Equation := Atom ("=" Atom)?`
pub fn parse_equation<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Term> {
    equation_rule(atom_rule(formula())).parse(input)
}

/// `Atom := Value | Ident | "(" Or ")"`
pub fn parse_atom<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Term> {
    atom_rule(formula()).parse(input)
}

/// `Value := Bool | String`
pub fn parse_value<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, Value> {
    value_rule().parse(input)
}

/// `Bool := "TRUE" | "FALSE"`
pub fn parse_bool<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, bool> {
    bool_rule().parse(input)
}

/// A double-quoted string. Inside it only `\"` is an escape; any other
/// backslash is an ordinary character.
pub fn parse_string<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, String> {
    string_rule().parse(input)
}

/// An identifier that is not a keyword.
///
/// A word that matches a keyword except for letter case is accepted, with a
/// warning, since it is most likely a mistyped keyword.
pub fn parse_ident<S: Source + 'static>(input: Cursor<S>) -> ParseResult<S, String> {
    ident_rule().parse(input)
}

/// `operand (keyword operand)*`, nested to the right
fn chain_rule<S: Source + 'static>(keyword: &str, operand: Parser<S, Term>) -> Parser<S, Term> {
    let join: fn(Term, Term) -> Term = if keyword == "AND" { Term::and } else { Term::or };
    operand
        .clone()
        .and_then(expect_keyword(keyword).and_then(operand).second().repeated())
        .convert(move |Pair { first, second }| nest_right(first, second, join))
}

fn nest_right(first: Term, rest: Vec<Term>, join: fn(Term, Term) -> Term) -> Term {
    let mut operands = rest.into_iter().rev();
    match operands.next() {
        Some(last) => join(first, operands.fold(last, |right, left| join(left, right))),
        None => first,
    }
}

fn not_rule<S: Source + 'static>(equation: Parser<S, Term>) -> Parser<S, Term> {
    expect_keyword("NOT")
        .repeat_and_fold_left(false, |negate, _| !negate)
        .and_then(equation)
        .convert(|Pair { first: negate, second: term }| {
            if negate {
                Term::not(term)
            } else {
                term
            }
        })
}

fn equation_rule<S: Source + 'static>(atom: Parser<S, Term>) -> Parser<S, Term> {
    atom.clone()
        .and_then(expect_token("=").and_then(atom).second().optional())
        .convert(|Pair { first, second }| match second {
            Some(right) => Term::equation(first, right),
            None => first,
        })
}

fn atom_rule<S: Source + 'static>(formula: Parser<S, Term>) -> Parser<S, Term> {
    let parenthesized = expect_token("(")
        .and_then(formula)
        .and_then(expect_token(")"))
        .first()
        .second();

    value_rule()
        .convert(Term::Value)
        .or_else(ident_rule().convert(Term::Identifier))
        .or_else(parenthesized)
}

fn value_rule<S: Source + 'static>() -> Parser<S, Value> {
    maybe_spaces_before(
        bool_rule()
            .convert(Value::Bool)
            .or_else(string_rule().convert(Value::Str)),
    )
}

fn bool_rule<S: Source + 'static>() -> Parser<S, bool> {
    maybe_spaces_before(expect_identifier().try_convert(|text| match text.as_str() {
        "TRUE" => Some(true),
        "FALSE" => Some(false),
        _ => None,
    }))
}

fn string_rule<S: Source + 'static>() -> Parser<S, String> {
    let escaped_quote = expect_code_point('\\')
        .and_then(expect_code_point('"'))
        .second();
    let character = escaped_quote.or_else(expect_code_point_not(&['"']));
    let contents = character.repeat_and_fold_left(String::new(), |mut text, code_point| {
        text.push(code_point);
        text
    });

    expect_code_point('"')
        .and_then(contents)
        .second()
        .and_then(expect_code_point('"'))
        .first()
}

fn ident_rule<S: Source + 'static>() -> Parser<S, String> {
    maybe_spaces_before(expect_identifier().try_convert(|text: String| {
        if KEYWORDS.contains(&text.as_str()) {
            return None;
        }
        if let Some(keyword) = KEYWORDS.iter().find(|k| k.eq_ignore_ascii_case(&text)) {
            tracing::warn!(
                identifier = %text,
                keyword = %keyword,
                "identifier differs from a keyword only in case; keywords are upper case"
            );
        }
        Some(text)
    }))
}
