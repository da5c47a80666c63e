//! Byte cursor over source text.
//!
//! Positions are byte offsets into the original `&str`. Reads past the end
//! return `0`, so byte-class predicates stop there without a bounds check
//! at the call site.

pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// Byte at the current position, `0` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte one past the current position, `0` past EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.src.as_bytes().get(pos).copied().unwrap_or(0)
    }

    /// Character at the current position.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.src.len());
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = self.current_char().map_or(1, char::len_utf8);
        self.advance_n(width);
    }

    /// Move back (or forward) to an earlier position.
    #[inline]
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.src.len());
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed text.
    #[inline]
    pub fn rest(&self) -> &'a str {
        self.src.get(self.pos..).unwrap_or("")
    }

    /// Source text between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.src.get(start..self.pos).unwrap_or("")
    }

    /// Advance while `pred` holds for the current byte.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance past ASCII whitespace, newlines included.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// Advance past plain string content to the next `"` or `\`.
    ///
    /// Returns the skipped text. At EOF the cursor is at the end and the
    /// whole remainder is returned.
    pub fn skip_to_string_delim(&mut self) -> &'a str {
        let start = self.pos;
        match memchr::memchr2(b'"', b'\\', self.rest().as_bytes()) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.src.len(),
        }
        self.slice_from(start)
    }
}
