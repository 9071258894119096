//! Byte cursor over one source line.
//!
//! Lookahead past the end of the line yields `0`, which never matches any
//! byte the scanners look for, so bounded lookahead needs no explicit length
//! checks.

#[derive(Clone, Copy, Debug)]
pub(crate) struct LineCursor<'src> {
    text: &'src str,
    pos: usize,
}

impl<'src> LineCursor<'src> {
    pub(crate) fn new(text: &'src str, pos: usize) -> Self {
        LineCursor { text, pos }
    }

    #[inline]
    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eol(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.peek(0)
    }

    #[inline]
    pub(crate) fn peek(&self, offset: usize) -> u8 {
        self.text
            .as_bytes()
            .get(self.pos + offset)
            .copied()
            .unwrap_or(0)
    }

    /// Line text from the cursor to the end.
    #[inline]
    pub(crate) fn rest(&self) -> &'src str {
        self.text.get(self.pos..).unwrap_or("")
    }

    /// Character starting at the cursor.
    pub(crate) fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Offset from the cursor of the first byte at or after `from` that fails
    /// `pred`, or the distance to end of line.
    pub(crate) fn run_end(&self, from: usize, pred: impl Fn(u8) -> bool) -> usize {
        let bytes = self.text.as_bytes();
        let mut index = self.pos + from;
        while index < bytes.len() && pred(bytes[index]) {
            index += 1;
        }
        index - self.pos
    }

    /// Absolute index of the last byte of the character starting at absolute
    /// `index`. Positions inside or past the line map to themselves.
    pub(crate) fn char_last_byte(&self, index: usize) -> usize {
        self.text
            .get(index..)
            .and_then(|rest| rest.chars().next())
            .map_or(index, |c| index + c.len_utf8() - 1)
    }
}

#[inline]
pub(crate) fn is_space(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0x0B
}

#[inline]
pub(crate) fn is_binary_digit(c: u8) -> bool {
    c == b'0' || c == b'1'
}

#[inline]
pub(crate) fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[inline]
pub(crate) fn is_identifier_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Digit run predicate allowing the `'` separator.
#[inline]
pub(crate) fn with_separator(pred: fn(u8) -> bool) -> impl Fn(u8) -> bool {
    move |c| c == b'\'' || pred(c)
}
