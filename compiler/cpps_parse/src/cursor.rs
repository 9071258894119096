//! Token cursor for navigating the token stream.

use cpps_ir::{Lexeme, SourceLocation, Token, TokenId, Tokens};

/// Saved cursor position for speculative parsing.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Checkpoint(usize);

/// Forward-only view over [`Tokens`] with arbitrary rewind.
///
/// Reads past the end yield [`Token::INVALID`], so productions can probe
/// freely without bounds checks.
pub struct Cursor<'a, 'src> {
    tokens: &'a Tokens<'src>,
    pos: usize,
}

impl<'a, 'src> Cursor<'a, 'src> {
    pub fn new(tokens: &'a Tokens<'src>) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub fn current(&self) -> Token<'src> {
        self.tokens.at(self.pos)
    }

    #[inline]
    pub fn current_id(&self) -> TokenId {
        TokenId::new(self.pos)
    }

    #[inline]
    pub fn lexeme(&self) -> Lexeme {
        self.current().lexeme
    }

    /// Token `offset` places ahead of the current one.
    #[inline]
    pub fn peek(&self, offset: usize) -> Token<'src> {
        self.tokens.at(self.pos + offset)
    }

    /// The last consumed token, or [`Token::INVALID`] at the start.
    #[inline]
    pub fn previous(&self) -> Token<'src> {
        match self.pos.checked_sub(1) {
            Some(index) => self.tokens.at(index),
            None => Token::INVALID,
        }
    }

    /// Whether the current token is `lexeme`.
    #[inline]
    pub fn check(&self, lexeme: impl Into<Lexeme>) -> bool {
        self.lexeme() == lexeme.into()
    }

    /// Consume the current token and return its id.
    #[inline]
    pub fn advance(&mut self) -> TokenId {
        let id = self.current_id();
        if !self.is_at_end() {
            self.pos += 1;
        }
        id
    }

    /// Consume the current token if it is `lexeme`.
    pub fn eat(&mut self, lexeme: impl Into<Lexeme>) -> Option<TokenId> {
        if self.check(lexeme) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Where a diagnosis about the current position belongs: the current
    /// token, or the last one once the stream is exhausted.
    pub fn location(&self) -> SourceLocation {
        if self.is_at_end() {
            self.tokens
                .as_slice()
                .last()
                .map_or(SourceLocation::INVALID, |token| token.location)
        } else {
            self.current().location
        }
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    #[inline]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.0 <= self.tokens.len());
        self.pos = checkpoint.0;
    }
}
