//! Tokens produced by the lexer.

use std::fmt;

use crate::{Lexeme, SourceLocation};

/// A lexeme, where it starts, and the exact text it covers.
///
/// `text` borrows the classified source line; tokens never own text.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<'src> {
    pub lexeme: Lexeme,
    pub location: SourceLocation,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// Returned for positions past the end of the stream.
    pub const INVALID: Token<'static> = Token {
        lexeme: Lexeme::INVALID,
        location: SourceLocation::INVALID,
        text: "",
    };

    #[inline]
    pub const fn new(lexeme: Lexeme, location: SourceLocation, text: &'src str) -> Self {
        Token {
            lexeme,
            location,
            text,
        }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.lexeme.is_valid()
    }

    /// Location of the column just past the token's last character.
    #[inline]
    pub fn end_column(&self) -> u32 {
        let len = u32::try_from(self.text.len()).unwrap_or(u32::MAX);
        self.location.column.saturating_add(len)
    }

    /// Whether `next` starts exactly where this token ends on the same line.
    #[inline]
    pub fn is_adjacent_to(&self, next: &Token<'_>) -> bool {
        self.location.line == next.location.line && self.end_column() == next.location.column
    }
}

impl Default for Token<'_> {
    fn default() -> Self {
        Token::INVALID
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} @ {:?}", self.lexeme, self.text, self.location)
    }
}

/// Stable index of a token inside [`Tokens`](crate::Tokens).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenId(u32);

impl TokenId {
    /// # Panics
    /// Panics if `index` exceeds `u32::MAX`.
    #[inline]
    #[track_caller]
    pub fn new(index: usize) -> Self {
        TokenId(
            u32::try_from(index)
                .unwrap_or_else(|_| panic!("token index {index} exceeds u32::MAX")),
        )
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
