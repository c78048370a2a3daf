//! Property-based tests for the combinator algebra
//!
//! Every law is checked over both input sources so that the array and stream
//! implementations stay interchangeable.

use gombi_parser::{
    expect_code_point, expect_identifier, expect_spaces, expect_string, ArrayInput, Cursor,
    ParseResult, Parser, Source, StreamInput,
};
use proptest::prelude::*;

fn outcome<S: Source, T>(result: ParseResult<S, T>) -> (Option<T>, usize, String) {
    let offset = result.remaining().offset();
    let rest = result.remaining().rest();
    (result.into_value(), offset, rest)
}

fn on_both<T: 'static, F>(build: F, text: &str) -> (Option<T>, usize, String)
where
    T: PartialEq + std::fmt::Debug,
    F: Fn() -> (Parser<ArrayInput, T>, Parser<StreamInput<std::vec::IntoIter<char>>, T>),
{
    let (array, stream) = build();
    let from_array = outcome(array.parse(ArrayInput::cursor(text)));
    let chars: Vec<char> = text.chars().collect();
    let from_stream = outcome(stream.parse(StreamInput::cursor(chars.into_iter())));
    assert_eq!(from_array, from_stream, "array and stream inputs disagree on {text:?}");
    from_array
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_expect_string_matches_its_own_text(text in "\\PC{0,8}", suffix in "\\PC{0,4}") {
        let input = format!("{}{}", text, suffix);
        let (value, offset, rest) =
            on_both(|| (expect_string(&text), expect_string(&text)), &input);
        prop_assert_eq!(value, Some(text.clone()));
        prop_assert_eq!(offset, text.chars().count());
        prop_assert_eq!(rest, suffix);
    }

    #[test]
    fn prop_failure_consumes_nothing(input in "[a-c ]{0,8}") {
        let build = || {
            (
                expect_string("ab").and_then(expect_string("c")).first(),
                expect_string("ab").and_then(expect_string("c")).first(),
            )
        };
        let (value, offset, rest) = on_both(build, &input);
        if value.is_none() {
            prop_assert_eq!(offset, 0);
            prop_assert_eq!(rest, input);
        } else {
            prop_assert!(input.starts_with("abc"));
        }
    }

    #[test]
    fn prop_fold_left_never_fails(input in "[ab]{0,12}") {
        fn count<S: Source + 'static>() -> Parser<S, usize> {
            expect_code_point('a').repeat_and_fold_left(0usize, |n, _| n + 1)
        }
        let (value, offset, _) = on_both(|| (count(), count()), &input);
        let leading = input.chars().take_while(|&c| c == 'a').count();
        prop_assert_eq!(value, Some(leading));
        prop_assert_eq!(offset, leading);
    }

    #[test]
    fn prop_repeated_terminates_on_empty_matches(input in "[a ]{0,12}") {
        fn build<S: Source + 'static>() -> Parser<S, Vec<String>> {
            expect_spaces().repeated()
        }
        let (value, _, _) = on_both(|| (build(), build()), &input);
        prop_assert!(value.is_some());
    }

    #[test]
    fn prop_or_else_commits_to_first_match(word in "[a-z]{1,6}", tail in "[a-z]{0,3}") {
        let input = format!("{}{}", word, tail);
        let build = || {
            let prefix = word.clone();
            (
                expect_string(&prefix).or_else(expect_identifier()),
                expect_string(&prefix).or_else(expect_identifier()),
            )
        };
        let (value, _, rest) = on_both(build, &input);
        prop_assert_eq!(value, Some(word.clone()));
        prop_assert_eq!(rest, tail);
    }

    #[test]
    fn prop_optional_always_succeeds(input in "[xy]{0,4}") {
        fn build<S: Source + 'static>() -> Parser<S, Option<char>> {
            expect_code_point('x').optional()
        }
        let (value, offset, _) = on_both(|| (build(), build()), &input);
        let expected = input.starts_with('x').then_some('x');
        prop_assert_eq!(value, Some(expected));
        prop_assert_eq!(offset, usize::from(expected.is_some()));
    }
}

#[test]
fn test_cursor_offsets_agree() {
    let array = Cursor::from_text("熊猫ab");
    let stream = StreamInput::cursor("熊猫ab".chars());
    assert_eq!(array.advance().advance().offset(), 2);
    assert_eq!(stream.advance().advance().offset(), 2);
    assert_eq!(array.advance().advance().rest(), stream.advance().advance().rest());
}
