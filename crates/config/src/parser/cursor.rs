//! Forward-only cursor over a raw byte buffer.
//!
//! Invariants:
//! - `pos` only ever increases and never exceeds the buffer length.
//! - No encoding is assumed. Every delimiter the parser looks for is ASCII.

/// Space or tab. Used for every skip that must not cross a line.
pub(super) fn is_inline_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

/// Carriage return or line feed.
pub(super) fn is_newline(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}

/// Any whitespace the line-level loop skips between assignments.
pub(super) fn is_blank(byte: u8) -> bool {
    is_inline_space(byte) || is_newline(byte)
}

pub(super) struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    pub(super) fn pos(&self) -> usize {
        self.pos
    }

    pub(super) fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(super) fn bump(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Advance while `pred` holds for the current byte.
    pub(super) fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(byte) = self.peek() {
            if !pred(byte) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Advance up to, but not past, the first byte matching `pred`.
    pub(super) fn skip_until(&mut self, pred: impl Fn(u8) -> bool) {
        self.skip_while(|byte| !pred(byte));
    }

    pub(super) fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.src[start..end]
    }

    /// 1-based line number of `offset`.
    pub(super) fn line_at(&self, offset: usize) -> usize {
        line_number(self.src, offset)
    }
}

/// LF, CRLF and a lone CR each end one line.
pub(super) fn line_number(bytes: &[u8], offset: usize) -> usize {
    let end = offset.min(bytes.len());
    let breaks = bytes[..end]
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count();
    breaks + 1
}
