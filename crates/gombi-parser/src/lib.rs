//! Parser combinators over lazily advancing code-point inputs
//!
//! The crate has three layers. [`input`] provides positional views over
//! in-memory text or a one-pass stream. [`combinator`] defines the
//! [`Parser`] type and the algebra for composing parsers: sequencing,
//! committed choice, repetition, folding and monadic binding. [`lexical`]
//! builds identifier, number and whitespace tokens on top.
//!
//! ```
//! use gombi_parser::{expect_identifier, expect_token, maybe_spaces_before, ArrayInput, Parser};
//!
//! let assignment: Parser<ArrayInput, String> = maybe_spaces_before(expect_identifier())
//!     .and_then(expect_token("="))
//!     .first();
//! let result = assignment.parse_text("  answer = 42");
//! assert_eq!(result.value(), Some(&"answer".to_string()));
//! assert_eq!(result.remaining().rest(), " 42");
//! ```

#![warn(missing_docs)]

pub mod combinator;
pub mod input;
pub mod lexical;

pub use combinator::{
    expect_code_point, expect_code_point_not, expect_code_points, expect_several, expect_string,
    fail, succeed, Pair, ParseResult, Parser,
};
pub use input::{ArrayInput, Cursor, InputError, ReaderChars, Source, StreamInput, END_OF_INPUT};
pub use lexical::{
    expect_identifier, expect_keyword, expect_number, expect_spaces, expect_token,
    maybe_spaces_before,
};
