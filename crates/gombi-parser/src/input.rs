//! Input sources for parsers
//!
//! A parser never sees a string directly. It sees a [`Cursor`], a position in
//! a lazily advancing sequence of code points. Two sources are provided:
//! [`ArrayInput`] over an in-memory text and [`StreamInput`] over a one-pass
//! pull source such as a file.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Code point reported when no input remains
pub const END_OF_INPUT: char = '\0';

/// Input error
#[derive(Error, Debug)]
pub enum InputError {
    /// The input file could not be opened
    #[error("Cannot open input {path}: {source}")]
    Open {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// A view of the input at one position.
///
/// Views are never mutated. Advancing produces a new view (or `None` once the
/// source is exhausted), so any earlier view stays valid.
pub trait Source: Clone {
    /// The code point at this position
    fn current_code_point(&self) -> char;

    /// Everything after the current code point, or `None` if nothing remains
    fn remaining_input(&self) -> Option<Self>;
}

/// A position in the input, which may be past the end.
///
/// The cursor counts the code points consumed since it was created, which
/// lets repetition combinators notice a match that made no progress.
#[derive(Clone)]
pub struct Cursor<S> {
    view: Option<S>,
    offset: usize,
}

impl<S: Source> Cursor<S> {
    /// Create a cursor at the given view
    pub fn at(view: S) -> Self {
        Self::from_view(Some(view))
    }

    /// Create a cursor with nothing remaining
    pub fn exhausted() -> Self {
        Self::from_view(None)
    }

    /// Wrap the result of [`Source::remaining_input`]
    pub fn from_view(view: Option<S>) -> Self {
        Self { view, offset: 0 }
    }

    /// The current code point, or [`END_OF_INPUT`] if nothing remains
    pub fn current(&self) -> char {
        self.view
            .as_ref()
            .map_or(END_OF_INPUT, Source::current_code_point)
    }

    /// The cursor one code point further. Stays exhausted once exhausted.
    pub fn advance(&self) -> Self {
        match &self.view {
            Some(view) => Self {
                view: view.remaining_input(),
                offset: self.offset + 1,
            },
            None => self.clone(),
        }
    }

    /// Number of code points consumed since this cursor's origin
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Check if nothing remains
    pub fn is_exhausted(&self) -> bool {
        self.view.is_none()
    }

    /// The underlying view, if any
    pub fn view(&self) -> Option<&S> {
        self.view.as_ref()
    }

    /// Collect the unconsumed text from this position on
    pub fn rest(&self) -> String {
        let mut text = String::new();
        let mut cursor = self.clone();
        while !cursor.is_exhausted() {
            text.push(cursor.current());
            cursor = cursor.advance();
        }
        text
    }
}

impl Cursor<ArrayInput> {
    /// Create a cursor over an in-memory string
    pub fn from_text(text: &str) -> Self {
        ArrayInput::cursor(text)
    }
}

impl<S: Source> fmt::Debug for Cursor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exhausted() {
            write!(f, "Cursor(<end> @ {})", self.offset)
        } else {
            write!(f, "Cursor({:?} @ {})", self.current(), self.offset)
        }
    }
}

/// Restartable input over a fixed sequence of code points.
///
/// Every view shares the same backing array, so advancing is O(1) and any
/// earlier view can be advanced again independently.
#[derive(Debug, Clone)]
pub struct ArrayInput {
    text: Rc<[char]>,
    position: usize,
}

impl ArrayInput {
    /// Create a cursor at the start of `text`. Empty text yields an
    /// exhausted cursor.
    pub fn cursor(text: &str) -> Cursor<Self> {
        let text: Rc<[char]> = text.chars().collect();
        if text.is_empty() {
            Cursor::exhausted()
        } else {
            Cursor::at(Self { text, position: 0 })
        }
    }

    /// Offset of this view in code points
    pub fn position(&self) -> usize {
        self.position
    }

    /// Text from this view to the end
    pub fn rest(&self) -> String {
        self.text.get(self.position..).unwrap_or_default().iter().collect()
    }
}

impl Source for ArrayInput {
    fn current_code_point(&self) -> char {
        self.text.get(self.position).copied().unwrap_or(END_OF_INPUT)
    }

    fn remaining_input(&self) -> Option<Self> {
        if self.position + 1 >= self.text.len() {
            return None;
        }
        Some(Self {
            text: Rc::clone(&self.text),
            position: self.position + 1,
        })
    }
}

/// One-pass input over a pull source of code points.
///
/// The source is read one code point ahead so that exhaustion is known. The
/// next view is read on first request and memoized in the node, so every
/// holder of a view sees the same continuation and the source is pulled only
/// once per position.
pub struct StreamInput<I: Iterator<Item = char>> {
    node: Rc<StreamNode<I>>,
}

struct StreamNode<I: Iterator<Item = char>> {
    code_point: char,
    next: OnceCell<Option<StreamInput<I>>>,
    source: Rc<RefCell<I>>,
}

impl<I: Iterator<Item = char>> StreamInput<I> {
    /// Create a cursor reading from `source`, pulling the first code point
    /// eagerly
    pub fn cursor(source: I) -> Cursor<Self> {
        Cursor::from_view(Self::pull(Rc::new(RefCell::new(source))))
    }

    fn pull(source: Rc<RefCell<I>>) -> Option<Self> {
        let code_point = source.borrow_mut().next()?;
        Some(Self {
            node: Rc::new(StreamNode {
                code_point,
                next: OnceCell::new(),
                source,
            }),
        })
    }
}

impl<R: BufRead> StreamInput<ReaderChars<R>> {
    /// Create a cursor over a buffered reader
    pub fn from_reader(reader: R) -> Cursor<Self> {
        Self::cursor(ReaderChars::new(reader))
    }
}

impl StreamInput<ReaderChars<BufReader<File>>> {
    /// Open a file and create a cursor over its contents
    pub fn open(path: impl AsRef<Path>) -> Result<Cursor<Self>, InputError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<I: Iterator<Item = char>> Drop for StreamNode<I> {
    // Unlink the chain in a loop. The derived drop would recurse once per code point.
    fn drop(&mut self) {
        let mut next = self.next.take().flatten();
        while let Some(StreamInput { node }) = next {
            next = match Rc::try_unwrap(node) {
                Ok(mut node) => node.next.take().flatten(),
                Err(_) => None,
            };
        }
    }
}

impl<I: Iterator<Item = char>> Clone for StreamInput<I> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<I: Iterator<Item = char>> Source for StreamInput<I> {
    fn current_code_point(&self) -> char {
        self.node.code_point
    }

    fn remaining_input(&self) -> Option<Self> {
        self.node
            .next
            .get_or_init(|| Self::pull(Rc::clone(&self.node.source)))
            .clone()
    }
}

impl<I: Iterator<Item = char>> fmt::Debug for StreamInput<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamInput")
            .field("code_point", &self.node.code_point)
            .field("next_read", &self.node.next.get().is_some())
            .finish()
    }
}

/// Decodes code points from a buffered reader one line at a time.
///
/// Invalid UTF-8 is replaced with U+FFFD. A read error ends the stream.
pub struct ReaderChars<R> {
    reader: R,
    pending: std::vec::IntoIter<char>,
    done: bool,
}

impl<R: BufRead> ReaderChars<R> {
    /// Create a decoder over `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new().into_iter(),
            done: false,
        }
    }

    fn refill(&mut self) {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => self.done = true,
            Ok(_) => {
                let chars: Vec<char> = String::from_utf8_lossy(&line).chars().collect();
                self.pending = chars.into_iter();
            }
            Err(err) => {
                tracing::warn!(error = %err, "input stream read failed, treating as end of input");
                self.done = true;
            }
        }
    }
}

impl<R: BufRead> Iterator for ReaderChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(ch) = self.pending.next() {
                return Some(ch);
            }
            if self.done {
                return None;
            }
            self.refill();
        }
    }
}
