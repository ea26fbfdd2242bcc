//! Character cursor over the query text.
//!
//! The grammar is dynamic, so there is no separate token stream: transforms,
//! expression forms and operator lookup all work on the remaining input at
//! the cursor. Positions are byte offsets and always sit on a char boundary.

use yamp_ir::Span;

#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Roll back to an earlier position (speculative lookahead).
    pub fn reset(&mut self, pos: usize) {
        debug_assert!(pos <= self.source.len() && self.source.is_char_boundary(pos));
        self.pos = pos;
    }

    /// Input not yet consumed.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The char after the next one.
    pub fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume and return the next char.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `c` if it is next.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Skip `len` bytes; clamped to the end of input.
    pub fn advance(&mut self, len: usize) {
        let target = (self.pos + len).min(self.source.len());
        debug_assert!(self.source.is_char_boundary(target));
        self.pos = target;
    }

    /// Consume chars while `pred` holds and return them.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.source[start..self.pos]
    }

    /// Span from `start` to the current position.
    #[inline]
    pub fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }

    /// Span of the next char (empty at end of input).
    pub fn peek_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8);
        Span::from_range(self.pos..self.pos + len)
    }
}
