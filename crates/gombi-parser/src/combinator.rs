//! Parser combinators
//!
//! A [`Parser`] is a pure function from a [`Cursor`] to a [`ParseResult`].
//! Parsers carry no state between invocations and are composed by the methods
//! below into larger parsers.
//!
//! Alternation is committed choice: [`Parser::or_else`] takes the first
//! alternative that matches and never tries a later one, even if it would
//! match more. Grammars built from these combinators must not be
//! left-recursive, and the alternatives of a choice must have disjoint first
//! sets.

use super::input::{ArrayInput, Cursor, Source};
use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Outcome of running a parser
pub enum ParseResult<S, T> {
    /// The parser matched
    Success {
        /// The parsed value
        value: T,
        /// Input after the match
        remaining: Cursor<S>,
    },
    /// The parser did not match
    Failure {
        /// The input the parser was given, unchanged
        remaining: Cursor<S>,
    },
}

impl<S: Source, T> ParseResult<S, T> {
    /// Check if the parse succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// The parsed value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure { .. } => None,
        }
    }

    /// Consume the result, keeping only the parsed value
    pub fn into_value(self) -> Option<T> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure { .. } => None,
        }
    }

    /// The input left after this parse
    pub fn remaining(&self) -> &Cursor<S> {
        match self {
            ParseResult::Success { remaining, .. } | ParseResult::Failure { remaining } => {
                remaining
            }
        }
    }

    /// Map the value of a successful parse
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<S, U> {
        match self {
            ParseResult::Success { value, remaining } => ParseResult::Success {
                value: f(value),
                remaining,
            },
            ParseResult::Failure { remaining } => ParseResult::Failure { remaining },
        }
    }
}

impl<S: Source, T: fmt::Debug> fmt::Debug for ParseResult<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseResult::Success { value, remaining } => f
                .debug_struct("Success")
                .field("value", value)
                .field("remaining", remaining)
                .finish(),
            ParseResult::Failure { remaining } => f
                .debug_struct("Failure")
                .field("remaining", remaining)
                .finish(),
        }
    }
}

/// The result of sequencing two parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair<A, B> {
    /// Result of the first parser
    pub first: A,
    /// Result of the second parser
    pub second: B,
}

impl<A, B> Pair<A, B> {
    /// Create a new pair
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Keep the first component
    pub fn into_first(self) -> A {
        self.first
    }

    /// Keep the second component
    pub fn into_second(self) -> B {
        self.second
    }
}

type ParseFn<S, T> = dyn Fn(Cursor<S>) -> ParseResult<S, T>;

/// A composable parser producing values of type `T` from input `S`
pub struct Parser<S, T> {
    run: Rc<ParseFn<S, T>>,
}

impl<S, T> Clone for Parser<S, T> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<S, T> fmt::Debug for Parser<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parser")
    }
}

impl<S: Source + 'static, T: 'static> Parser<S, T> {
    /// Wrap a parsing function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Cursor<S>) -> ParseResult<S, T> + 'static,
    {
        Self { run: Rc::new(f) }
    }

    /// Run the parser
    pub fn parse(&self, input: Cursor<S>) -> ParseResult<S, T> {
        (self.run)(input)
    }

    /// Run this parser, then `next` on what remains. Yields both results.
    ///
    /// If either side fails the whole sequence fails without consuming input.
    pub fn and_then<U: 'static>(self, next: Parser<S, U>) -> Parser<S, Pair<T, U>> {
        Parser::new(move |input: Cursor<S>| match self.parse(input.clone()) {
            ParseResult::Success {
                value: first,
                remaining,
            } => match next.parse(remaining) {
                ParseResult::Success {
                    value: second,
                    remaining,
                } => ParseResult::Success {
                    value: Pair { first, second },
                    remaining,
                },
                ParseResult::Failure { .. } => ParseResult::Failure { remaining: input },
            },
            ParseResult::Failure { .. } => ParseResult::Failure { remaining: input },
        })
    }

    /// Committed choice: try this parser, and only if it fails try
    /// `alternative` on the same input.
    pub fn or_else(self, alternative: Parser<S, T>) -> Parser<S, T> {
        Parser::new(move |input: Cursor<S>| match self.parse(input.clone()) {
            success @ ParseResult::Success { .. } => success,
            ParseResult::Failure { .. } => alternative.parse(input),
        })
    }

    /// Apply `f` to the value of a successful parse
    pub fn convert<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<S, U> {
        Parser::new(move |input: Cursor<S>| self.parse(input).map(&f))
    }

    /// Apply `f` to the value of a successful parse, failing without
    /// consuming input when `f` rejects the value
    pub fn try_convert<U: 'static>(self, f: impl Fn(T) -> Option<U> + 'static) -> Parser<S, U> {
        Parser::new(move |input: Cursor<S>| match self.parse(input.clone()) {
            ParseResult::Success { value, remaining } => match f(value) {
                Some(value) => ParseResult::Success { value, remaining },
                None => ParseResult::Failure { remaining: input },
            },
            ParseResult::Failure { .. } => ParseResult::Failure { remaining: input },
        })
    }

    /// Match zero or one time. `None` means nothing was parsed and no input
    /// was consumed.
    pub fn optional(self) -> Parser<S, Option<T>> {
        Parser::new(move |input: Cursor<S>| match self.parse(input.clone()) {
            ParseResult::Success { value, remaining } => ParseResult::Success {
                value: Some(value),
                remaining,
            },
            ParseResult::Failure { .. } => ParseResult::Success {
                value: None,
                remaining: input,
            },
        })
    }

    /// Match zero or more times, collecting the results in order. Never fails.
    pub fn repeated(self) -> Parser<S, Vec<T>> {
        self.fold_with(Vec::new, |mut values, value| {
            values.push(value);
            values
        })
    }

    /// Like [`Parser::repeated`], but fails if there is no match at all
    pub fn once_or_more(self) -> Parser<S, Vec<T>> {
        let repeated = self.repeated();
        Parser::new(move |input: Cursor<S>| match repeated.parse(input.clone()) {
            ParseResult::Success { value, remaining } if !value.is_empty() => {
                ParseResult::Success { value, remaining }
            }
            _ => ParseResult::Failure { remaining: input },
        })
    }

    /// Match zero or more times, folding each result into an accumulator
    /// that starts at `seed`. Never fails.
    ///
    /// A match that consumes no input is folded once and ends the repetition.
    pub fn repeat_and_fold_left<A, F>(self, seed: A, combine: F) -> Parser<S, A>
    where
        A: Clone + 'static,
        F: Fn(A, T) -> A + 'static,
    {
        self.fold_with(move || seed.clone(), combine)
    }

    fn fold_with<A, I, F>(self, init: I, combine: F) -> Parser<S, A>
    where
        A: 'static,
        I: Fn() -> A + 'static,
        F: Fn(A, T) -> A + 'static,
    {
        Parser::new(move |input: Cursor<S>| {
            let mut accumulator = init();
            let mut cursor = input;
            loop {
                match self.parse(cursor.clone()) {
                    ParseResult::Success { value, remaining } => {
                        accumulator = combine(accumulator, value);
                        let progressed = remaining.offset() > cursor.offset();
                        cursor = remaining;
                        if !progressed {
                            break;
                        }
                    }
                    ParseResult::Failure { .. } => break,
                }
            }
            ParseResult::Success {
                value: accumulator,
                remaining: cursor,
            }
        })
    }

    /// Build the next parser from this parser's result and run it on what
    /// remains
    pub fn bind<U: 'static>(self, next: impl Fn(T) -> Parser<S, U> + 'static) -> Parser<S, U> {
        Parser::new(move |input: Cursor<S>| match self.parse(input.clone()) {
            ParseResult::Success { value, remaining } => match next(value).parse(remaining) {
                success @ ParseResult::Success { .. } => success,
                ParseResult::Failure { .. } => ParseResult::Failure { remaining: input },
            },
            ParseResult::Failure { .. } => ParseResult::Failure { remaining: input },
        })
    }

    /// Build a parser that refers to itself.
    ///
    /// `build` receives a handle that runs the finished parser, so a grammar
    /// with nested rules is put together once rather than on every nested
    /// call. The handle holds the parser weakly and fails once the returned
    /// parser and all its clones are gone.
    pub fn recursive(build: impl FnOnce(Parser<S, T>) -> Parser<S, T>) -> Parser<S, T> {
        let slot: Rc<OnceCell<Weak<ParseFn<S, T>>>> = Rc::new(OnceCell::new());
        let handle = {
            let slot = Rc::clone(&slot);
            Parser::new(move |input: Cursor<S>| match slot.get().and_then(Weak::upgrade) {
                Some(run) => run(input),
                None => ParseResult::Failure { remaining: input },
            })
        };
        let parser = build(handle);
        let _ = slot.set(Rc::downgrade(&parser.run));
        parser
    }
}

impl<S: Source + 'static, A: 'static, B: 'static> Parser<S, Pair<A, B>> {
    /// Keep the first component of a sequenced result
    pub fn first(self) -> Parser<S, A> {
        self.convert(Pair::into_first)
    }

    /// Keep the second component of a sequenced result
    pub fn second(self) -> Parser<S, B> {
        self.convert(Pair::into_second)
    }
}

impl<T: 'static> Parser<ArrayInput, T> {
    /// Run the parser over an in-memory string
    pub fn parse_text(&self, text: &str) -> ParseResult<ArrayInput, T> {
        self.parse(Cursor::from_text(text))
    }
}

/// Always succeed with `value`, consuming nothing
pub fn succeed<S: Source + 'static, T: Clone + 'static>(value: T) -> Parser<S, T> {
    Parser::new(move |input: Cursor<S>| ParseResult::Success {
        value: value.clone(),
        remaining: input,
    })
}

/// Always fail
pub fn fail<S: Source + 'static, T: 'static>() -> Parser<S, T> {
    Parser::new(|input: Cursor<S>| ParseResult::Failure { remaining: input })
}

/// Match exactly the code point `expected`
pub fn expect_code_point<S: Source + 'static>(expected: char) -> Parser<S, char> {
    Parser::new(move |input: Cursor<S>| {
        if !input.is_exhausted() && input.current() == expected {
            ParseResult::Success {
                value: expected,
                remaining: input.advance(),
            }
        } else {
            ParseResult::Failure { remaining: input }
        }
    })
}

/// Match any single code point that is not in `excluded`
pub fn expect_code_point_not<S: Source + 'static>(excluded: &[char]) -> Parser<S, char> {
    let excluded = excluded.to_vec();
    Parser::new(move |input: Cursor<S>| {
        let current = input.current();
        if input.is_exhausted() || excluded.contains(&current) {
            ParseResult::Failure { remaining: input }
        } else {
            ParseResult::Success {
                value: current,
                remaining: input.advance(),
            }
        }
    })
}

/// Match the code points of `expected` in order
pub fn expect_code_points<S: Source + 'static>(expected: &[char]) -> Parser<S, Vec<char>> {
    let expected = expected.to_vec();
    Parser::new(move |input: Cursor<S>| {
        let mut cursor = input.clone();
        for &code_point in &expected {
            if cursor.is_exhausted() || cursor.current() != code_point {
                return ParseResult::Failure { remaining: input };
            }
            cursor = cursor.advance();
        }
        ParseResult::Success {
            value: expected.clone(),
            remaining: cursor,
        }
    })
}

/// Match the text `expected`, producing it as the result
pub fn expect_string<S: Source + 'static>(expected: &str) -> Parser<S, String> {
    let code_points: Vec<char> = expected.chars().collect();
    expect_code_points(&code_points).convert(|code_points| code_points.into_iter().collect())
}

/// Match one code point satisfying `is_first`, then greedily every following
/// code point satisfying `is_later`. Fails only if the first code point does
/// not satisfy `is_first`.
pub fn expect_several<S, F, L>(is_first: F, is_later: L) -> Parser<S, String>
where
    S: Source + 'static,
    F: Fn(char) -> bool + 'static,
    L: Fn(char) -> bool + 'static,
{
    Parser::new(move |input: Cursor<S>| {
        let first = input.current();
        if input.is_exhausted() || !is_first(first) {
            return ParseResult::Failure { remaining: input };
        }
        let mut text = String::from(first);
        let mut cursor = input.advance();
        while !cursor.is_exhausted() && is_later(cursor.current()) {
            text.push(cursor.current());
            cursor = cursor.advance();
        }
        ParseResult::Success {
            value: text,
            remaining: cursor,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StreamInput;

    fn text<T: 'static>(parser: &Parser<ArrayInput, T>, input: &str) -> Option<(T, String)> {
        match parser.parse_text(input) {
            ParseResult::Success { value, remaining } => Some((value, remaining.rest())),
            ParseResult::Failure { remaining } => {
                assert_eq!(remaining.offset(), 0, "failure must not consume input");
                None
            }
        }
    }

    #[test]
    fn test_expect_code_point() {
        let parser = expect_code_point('a');
        assert_eq!(text(&parser, "abc"), Some(('a', "bc".to_string())));
        assert_eq!(text(&parser, "bc"), None);
        assert_eq!(text(&parser, ""), None);
    }

    #[test]
    fn test_expect_code_point_never_matches_past_end() {
        let parser = expect_code_point(crate::input::END_OF_INPUT);
        assert_eq!(text(&parser, ""), None);
    }

    #[test]
    fn test_expect_code_points_all_or_nothing() {
        let parser = expect_code_points(&['a', 'b']);
        assert_eq!(text(&parser, "abc"), Some((vec!['a', 'b'], "c".to_string())));
        assert_eq!(text(&parser, "ac"), None);
        assert_eq!(text(&parser, "a"), None);
    }

    #[test]
    fn test_expect_string_consumes_everything() {
        let result = expect_string::<ArrayInput>("熊猫").parse_text("熊猫");
        assert!(result.is_success());
        assert!(result.remaining().is_exhausted());
        assert_eq!(result.into_value(), Some("熊猫".to_string()));
    }

    #[test]
    fn test_expect_string_empty() {
        assert_eq!(text(&expect_string(""), "x"), Some((String::new(), "x".to_string())));
    }

    #[test]
    fn test_expect_code_point_not() {
        let parser = expect_code_point_not(&['"']);
        assert_eq!(text(&parser, "x\""), Some(('x', "\"".to_string())));
        assert_eq!(text(&parser, "\"x"), None);
        assert_eq!(text(&parser, ""), None);
    }

    #[test]
    fn test_expect_several_maximal_munch() {
        let parser = expect_several(
            |c: char| c.is_ascii_alphabetic(),
            |c: char| c.is_ascii_alphanumeric(),
        );
        assert_eq!(text(&parser, "abc12 rest"), Some(("abc12".to_string(), " rest".to_string())));
        assert_eq!(text(&parser, "1abc"), None);
    }

    #[test]
    fn test_expect_several_first_only_checked_by_is_first() {
        let parser = expect_several(|c| c == '-', |c: char| c.is_ascii_digit());
        assert_eq!(text(&parser, "-12x"), Some(("-12".to_string(), "x".to_string())));
        assert_eq!(text(&parser, "-"), Some(("-".to_string(), String::new())));
    }

    #[test]
    fn test_and_then_pairs_results() {
        let parser = expect_code_point('a').and_then(expect_code_point('b'));
        assert_eq!(text(&parser, "abc"), Some((Pair::new('a', 'b'), "c".to_string())));
    }

    #[test]
    fn test_and_then_failure_restores_input() {
        let parser = expect_code_point('a').and_then(expect_code_point('b'));
        assert_eq!(text(&parser, "ac"), None);
        assert_eq!(text(&parser, "xb"), None);
    }

    #[test]
    fn test_first_and_second() {
        let both = || expect_code_point('a').and_then(expect_code_point('b'));
        assert_eq!(text(&both().first(), "ab"), Some(('a', String::new())));
        assert_eq!(text(&both().second(), "ab"), Some(('b', String::new())));
    }

    #[test]
    fn test_or_else_is_committed_choice() {
        let parser = expect_string("A").or_else(expect_string("B"));
        assert_eq!(text(&parser, "AC"), Some(("A".to_string(), "C".to_string())));
        assert_eq!(text(&parser, "BC"), Some(("B".to_string(), "C".to_string())));
        assert_eq!(text(&parser, "C"), None);
    }

    #[test]
    fn test_or_else_first_match_wins_over_longer() {
        let parser = expect_string("A").or_else(expect_string("AB"));
        assert_eq!(text(&parser, "AB"), Some(("A".to_string(), "B".to_string())));
    }

    #[test]
    fn test_convert() {
        let parser = expect_code_point('7').convert(|c| c.to_digit(10));
        assert_eq!(text(&parser, "7"), Some((Some(7), String::new())));
        assert_eq!(text(&parser, "8"), None);
    }

    #[test]
    fn test_try_convert_rejection_restores_input() {
        let parser = expect_string("ab").try_convert(|s| (s != "ab").then_some(s));
        assert_eq!(text(&parser, "abc"), None);
    }

    #[test]
    fn test_optional_distinguishes_nothing_from_empty() {
        let parser = expect_string("x").optional();
        assert_eq!(text(&parser, "xy"), Some((Some("x".to_string()), "y".to_string())));
        assert_eq!(text(&parser, "y"), Some((None, "y".to_string())));

        let empty = expect_string("").optional();
        assert_eq!(text(&empty, "y"), Some((Some(String::new()), "y".to_string())));
    }

    #[test]
    fn test_repeated() {
        let parser = expect_code_point('A').repeated();
        assert_eq!(text(&parser, "AAABCD"), Some((vec!['A'; 3], "BCD".to_string())));
        assert_eq!(text(&parser, "B"), Some((vec![], "B".to_string())));
        assert_eq!(text(&parser, ""), Some((vec![], String::new())));
    }

    #[test]
    fn test_repeated_stops_on_empty_match() {
        let parser = expect_code_point('A').optional().repeated();
        assert_eq!(text(&parser, "AAB"), Some((vec![Some('A'), Some('A'), None], "B".to_string())));
    }

    #[test]
    fn test_once_or_more() {
        let parser = expect_code_point('A').once_or_more();
        assert_eq!(text(&parser, "AAB"), Some((vec!['A', 'A'], "B".to_string())));
        assert_eq!(text(&parser, "B"), None);
    }

    #[test]
    fn test_repeat_and_fold_left() {
        let digit = expect_several(|c: char| c.is_ascii_digit(), |_| false)
            .and_then(expect_code_point(',').optional())
            .first();
        let sum = digit.repeat_and_fold_left(100u32, |acc, d| acc + d.parse::<u32>().unwrap_or(0));
        assert_eq!(text(&sum, "1,2,3;"), Some((106, ";".to_string())));
        assert_eq!(text(&sum, ";"), Some((100, ";".to_string())));
    }

    #[test]
    fn test_bind_uses_first_result() {
        let word = || {
            expect_several(|c: char| c.is_ascii_alphabetic(), |c: char| c.is_ascii_alphabetic())
        };
        let doubled = word()
            .and_then(expect_code_point(' '))
            .first()
            .bind(|first: String| expect_string(&first));
        assert_eq!(text(&doubled, "abc abc!"), Some(("abc".to_string(), "!".to_string())));
        assert_eq!(text(&doubled, "abc abd"), None);
    }

    #[test]
    fn test_recursive_nesting() {
        let nested = Parser::recursive(|nested| {
            expect_code_point('(')
                .and_then(nested)
                .and_then(expect_code_point(')'))
                .first()
                .second()
                .convert(|depth: usize| depth + 1)
                .or_else(expect_code_point('x').convert(|_| 0))
        });
        assert_eq!(text(&nested, "((x))!"), Some((2, "!".to_string())));
        assert_eq!(text(&nested, "x"), Some((0, String::new())));
        assert_eq!(text(&nested, "((x)"), None);
    }

    #[test]
    fn test_succeed_and_fail() {
        assert_eq!(text(&succeed(5), "x"), Some((5, "x".to_string())));
        assert_eq!(text(&fail::<_, ()>(), "x"), None);
    }

    #[test]
    fn test_parsers_run_over_stream_input() {
        let parser = expect_string("ab").and_then(expect_code_point('c').repeated());
        let result = parser.parse(StreamInput::cursor("abccd".chars()));
        let remaining = result.remaining().rest();
        let value = result.into_value();
        assert_eq!(value, Some(Pair::new("ab".to_string(), vec!['c', 'c'])));
        assert_eq!(remaining, "d");
    }

    #[test]
    fn test_stream_failure_leaves_input_replayable() {
        let parser = expect_string("abx").or_else(expect_string("abc"));
        let result = parser.parse(StreamInput::cursor("abc".chars()));
        assert_eq!(result.value(), Some(&"abc".to_string()));
        assert!(result.remaining().is_exhausted());
    }
}
