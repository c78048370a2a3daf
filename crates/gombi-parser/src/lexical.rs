//! Lexical primitives
//!
//! Token parsers built from [`expect_several`]. Every token-level parser of a
//! grammar is expected to be wrapped in [`maybe_spaces_before`], which makes
//! whitespace between tokens implicit.

use super::combinator::{expect_several, expect_string, Parser};
use super::input::Source;

/// `[A-Za-z_]`
pub fn is_identifier_start(code_point: char) -> bool {
    code_point.is_ascii_alphabetic() || code_point == '_'
}

/// `[A-Za-z0-9_]`
pub fn is_identifier_char(code_point: char) -> bool {
    is_identifier_start(code_point) || is_digit(code_point)
}

/// `[0-9]`
pub fn is_digit(code_point: char) -> bool {
    code_point.is_ascii_digit()
}

/// `[ \t\r\n]`
pub fn is_space(code_point: char) -> bool {
    matches!(code_point, ' ' | '\t' | '\r' | '\n')
}

/// Parse `[A-Za-z_][A-Za-z0-9_]*`
pub fn expect_identifier<S: Source + 'static>() -> Parser<S, String> {
    expect_several(is_identifier_start, is_identifier_char)
}

/// Parse `[0-9]+` as text. Conversion to a number is up to the caller.
pub fn expect_number<S: Source + 'static>() -> Parser<S, String> {
    expect_several(is_digit, is_digit)
}

/// Parse `[ \t\r\n]*`. Always succeeds, with empty text if there is no space.
pub fn expect_spaces<S: Source + 'static>() -> Parser<S, String> {
    expect_several(is_space, is_space)
        .optional()
        .convert(Option::unwrap_or_default)
}

/// Skip any whitespace, then run `parser`
pub fn maybe_spaces_before<S: Source + 'static, T: 'static>(parser: Parser<S, T>) -> Parser<S, T> {
    expect_spaces().and_then(parser).second()
}

/// Skip any whitespace, then match the literal `text`.
///
/// Only suitable for punctuation. A literal match of a word also accepts a
/// prefix of a longer identifier; use [`expect_keyword`] for words.
pub fn expect_token<S: Source + 'static>(text: &str) -> Parser<S, String> {
    maybe_spaces_before(expect_string(text))
}

/// Skip any whitespace, then match a whole identifier equal to `keyword`.
///
/// `TRUEfoo` is one identifier, so `expect_keyword("TRUE")` rejects it where
/// `expect_token("TRUE")` would match its first four characters.
pub fn expect_keyword<S: Source + 'static>(keyword: &str) -> Parser<S, String> {
    let keyword = keyword.to_string();
    maybe_spaces_before(expect_identifier().try_convert(move |identifier| {
        (identifier == keyword).then_some(identifier)
    }))
}
