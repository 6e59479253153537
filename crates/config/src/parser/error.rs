//! Parse error types.
//!
//! Invariants:
//! - Errors carry the offending key (when one was scanned), never value bytes.
//!   Values are usually secrets and must not reach logs or stderr.

use std::fmt;
use thiserror::Error;

/// What went wrong while scanning an env file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A key or value is not UTF-8 on a platform whose environment is Unicode.
    /// Never produced on Unix.
    InvalidUtf8,
    /// End of buffer while scanning a key.
    UnterminatedKey,
    /// A line starts with `=`.
    EmptyKey,
    /// Something other than `=` follows the key.
    MissingEquals,
    /// End of buffer right after a backslash in a quoted value.
    UnterminatedEscape,
    /// Backslash followed by a byte outside `n r t \ ' "`.
    InvalidEscape,
    /// End of buffer before the closing quote.
    UnterminatedQuote,
    /// Non-comment bytes after a closing quote on the same line.
    TrailingCharactersAfterQuote,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ParseErrorKind::InvalidUtf8 => "invalid UTF-8",
            ParseErrorKind::UnterminatedKey => "unexpected end of file while reading key",
            ParseErrorKind::EmptyKey => "empty key",
            ParseErrorKind::MissingEquals => "missing '='",
            ParseErrorKind::UnterminatedEscape => "unexpected end of file after escape character",
            ParseErrorKind::InvalidEscape => "invalid escape character",
            ParseErrorKind::UnterminatedQuote => "missing closing quote",
            ParseErrorKind::TrailingCharactersAfterQuote => {
                "unexpected characters after closing quote"
            }
        };
        f.write_str(message)
    }
}

/// A fatal syntax error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{} on line {line}", key_context(.key.as_deref()))]
pub struct ParseError {
    kind: ParseErrorKind,
    key: Option<String>,
    offset: usize,
    line: usize,
}

fn key_context(key: Option<&str>) -> String {
    match key {
        Some(key) => format!(" at key \"{}\"", key),
        None => String::new(),
    }
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        key: Option<String>,
        offset: usize,
        line: usize,
    ) -> Self {
        Self {
            kind,
            key,
            offset,
            line,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The key being parsed when the error occurred, if one had been scanned.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Byte offset into the buffer where the error was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number of [`offset`](Self::offset).
    pub fn line(&self) -> usize {
        self.line
    }
}
