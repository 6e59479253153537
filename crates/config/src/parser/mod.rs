//! Env file parser.
//!
//! Responsibilities:
//! - Turn a raw env file buffer into an ordered sequence of `KEY=VALUE` assignments.
//! - Decode quoted values (`'...'` or `"..."`) with backslash escapes.
//! - Strip comments and trailing whitespace from unquoted values.
//!
//! Does NOT handle:
//! - Reading the file from disk (see `loader`).
//! - Writing assignments into the process environment (see `apply`).
//! - Variable interpolation, multi-line values, or duplicate-key detection.
//!
//! Invariants:
//! - Single forward pass; the cursor never rewinds.
//! - The first error ends the sequence. `Parser` is fused after it.
//! - Keys are never empty and never contain `=`, whitespace, CR or LF.
//! - Errors never include value bytes.

mod cursor;
mod error;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::iter::FusedIterator;

use cursor::{Cursor, is_blank, is_inline_space, is_newline};
pub use error::{ParseError, ParseErrorKind};

/// One parsed `key=value` pair, in file order.
///
/// Keys and values are raw bytes from the file, as the OS environment takes
/// them. They are not required to be UTF-8 on Unix.
#[derive(Clone, PartialEq, Eq)]
pub struct Assignment {
    key: OsString,
    value: OsString,
}

impl Assignment {
    pub fn new(key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &OsStr {
        &self.key
    }

    pub fn value(&self) -> &OsStr {
        &self.value
    }

    pub fn into_parts(self) -> (OsString, OsString) {
        (self.key, self.value)
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assignment")
            .field("key", &self.key)
            .field(
                "value",
                &format_args!("<redacted {} bytes>", self.value.as_encoded_bytes().len()),
            )
            .finish()
    }
}

/// Parse a whole buffer into assignments.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered. No partial result is returned.
pub fn parse(input: &[u8]) -> Result<Vec<Assignment>, ParseError> {
    Parser::new(input).collect()
}

/// Parse a text buffer into assignments. See [`parse`].
pub fn parse_str(input: &str) -> Result<Vec<Assignment>, ParseError> {
    Parser::new(input.as_bytes()).collect()
}

/// Lazy assignment iterator over an in-memory buffer.
///
/// Yields `Ok(Assignment)` in file order, or a single `Err` after which it
/// yields `None` forever.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            done: false,
        }
    }

    fn error(&self, kind: ParseErrorKind, key: Option<&[u8]>, offset: usize) -> ParseError {
        ParseError::new(
            kind,
            key.map(|key| String::from_utf8_lossy(key).into_owned()),
            offset,
            self.cursor.line_at(offset),
        )
    }

    /// Line-level loop: skip blanks and comments, then parse one assignment.
    fn next_assignment(&mut self) -> Result<Option<Assignment>, ParseError> {
        loop {
            self.cursor.skip_while(is_blank);
            match self.cursor.peek() {
                None => return Ok(None),
                Some(b'#') => self.cursor.skip_until(is_newline),
                Some(_) => {
                    let assignment = self.assignment()?;
                    // Drops a trailing comment left over by value parsing.
                    self.cursor.skip_until(is_newline);
                    return Ok(Some(assignment));
                }
            }
        }
    }

    fn assignment(&mut self) -> Result<Assignment, ParseError> {
        let start = self.cursor.pos();
        self.cursor
            .skip_until(|b| b == b'=' || is_inline_space(b) || is_newline(b));
        let key = self.cursor.slice(start, self.cursor.pos());

        if self.cursor.is_eof() {
            return Err(self.error(ParseErrorKind::UnterminatedKey, Some(key), self.cursor.pos()));
        }
        if key.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyKey, None, start));
        }

        self.cursor.skip_while(is_inline_space);
        if self.cursor.peek() != Some(b'=') {
            return Err(self.error(ParseErrorKind::MissingEquals, Some(key), self.cursor.pos()));
        }
        self.cursor.bump();
        self.cursor.skip_while(is_inline_space);

        let value_start = self.cursor.pos();
        let value = match self.cursor.peek() {
            Some(quote @ (b'"' | b'\'')) => self.quoted_value(key, quote)?,
            _ => self.unquoted_value(),
        };

        let name = self.os_string(key.to_vec(), key, start)?;
        let value = self.os_string(value, key, value_start)?;
        Ok(Assignment { key: name, value })
    }

    fn quoted_value(&mut self, key: &[u8], quote: u8) -> Result<Vec<u8>, ParseError> {
        self.cursor.bump();
        let mut value = Vec::new();
        let mut run_start = self.cursor.pos();

        loop {
            match self.cursor.peek() {
                None => {
                    return Err(self.error(
                        ParseErrorKind::UnterminatedQuote,
                        Some(key),
                        self.cursor.pos(),
                    ));
                }
                Some(b'\\') => {
                    let escape_at = self.cursor.pos();
                    value.extend_from_slice(self.cursor.slice(run_start, escape_at));
                    self.cursor.bump();
                    let Some(byte) = self.cursor.peek() else {
                        return Err(self.error(
                            ParseErrorKind::UnterminatedEscape,
                            Some(key),
                            escape_at,
                        ));
                    };
                    let Some(decoded) = decode_escape(byte) else {
                        return Err(self.error(ParseErrorKind::InvalidEscape, Some(key), escape_at));
                    };
                    value.push(decoded);
                    self.cursor.bump();
                    run_start = self.cursor.pos();
                }
                Some(byte) if byte == quote => {
                    value.extend_from_slice(self.cursor.slice(run_start, self.cursor.pos()));
                    self.cursor.bump();
                    break;
                }
                Some(_) => self.cursor.bump(),
            }
        }

        self.cursor.skip_while(is_inline_space);
        match self.cursor.peek() {
            None | Some(b'#' | b'\r' | b'\n') => Ok(value),
            Some(_) => Err(self.error(
                ParseErrorKind::TrailingCharactersAfterQuote,
                Some(key),
                self.cursor.pos(),
            )),
        }
    }

    /// Everything up to `#` or end of line, with trailing spaces and tabs trimmed.
    fn unquoted_value(&mut self) -> Vec<u8> {
        let start = self.cursor.pos();
        self.cursor.skip_until(|b| b == b'#' || is_newline(b));
        let value = self.cursor.slice(start, self.cursor.pos());
        let end = value
            .iter()
            .rposition(|&b| !is_inline_space(b))
            .map_or(0, |last| last + 1);
        value[..end].to_vec()
    }

    /// Every byte sequence is a valid OS string on Unix.
    #[cfg(unix)]
    fn os_string(
        &self,
        bytes: Vec<u8>,
        _key: &[u8],
        _offset: usize,
    ) -> Result<OsString, ParseError> {
        use std::os::unix::ffi::OsStringExt;

        Ok(OsString::from_vec(bytes))
    }

    /// Elsewhere the environment is Unicode, so keys and values must be UTF-8.
    #[cfg(not(unix))]
    fn os_string(
        &self,
        bytes: Vec<u8>,
        key: &[u8],
        offset: usize,
    ) -> Result<OsString, ParseError> {
        String::from_utf8(bytes)
            .map(OsString::from)
            .map_err(|_| self.error(ParseErrorKind::InvalidUtf8, Some(key), offset))
    }
}

fn decode_escape(byte: u8) -> Option<u8> {
    match byte {
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        _ => None,
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Assignment, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_assignment() {
            Ok(Some(assignment)) => Some(Ok(assignment)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Parser<'_> {}
