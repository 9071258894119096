//! Token stream with per-line lookup.
//!
//! Tokens arrive from the lexer in source order. On construction the stream
//! builds two side tables:
//!
//! - `sparse`: one slot per line up to the highest line seen, holding either
//!   an index into `dense` or [`NO_LINE`].
//! - `dense`: one token range per line that has tokens.
//!
//! Per-line queries are two array lookups. The index is immutable once built.

use std::ops::{Index, Range};

use crate::{Comment, Token, TokenId};

const NO_LINE: u32 = u32::MAX;

/// Immutable token stream produced by the lexer.
#[derive(Clone, Default, Debug)]
pub struct Tokens<'src> {
    tokens: Vec<Token<'src>>,
    comments: Vec<Comment>,
    sparse: Vec<u32>,
    dense: Vec<Range<usize>>,
}

impl<'src> Tokens<'src> {
    /// Index `tokens`, which must be in non-decreasing line order.
    pub fn new(tokens: Vec<Token<'src>>, comments: Vec<Comment>) -> Self {
        let line_count = tokens
            .last()
            .map_or(0, |token| token.location.line as usize + 1);
        let mut sparse = vec![NO_LINE; line_count];
        let mut dense: Vec<Range<usize>> = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let line = token.location.line as usize;
            debug_assert!(
                dense.last().map_or(true, |range| {
                    tokens[range.start].location.line as usize <= line
                }),
                "tokens must arrive in line order"
            );
            if sparse[line] == NO_LINE {
                sparse[line] = u32::try_from(dense.len()).unwrap_or(NO_LINE);
                dense.push(index..index + 1);
            } else if let Some(range) = dense.last_mut() {
                range.end = index + 1;
            }
        }

        Tokens {
            tokens,
            comments,
            sparse,
            dense,
        }
    }

    /// Highest line holding a token, plus one.
    #[inline]
    pub fn lines(&self) -> usize {
        self.sparse.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    /// Token at `index`, or [`Token::INVALID`] past the end.
    #[inline]
    pub fn at(&self, index: usize) -> Token<'src> {
        self.tokens.get(index).copied().unwrap_or(Token::INVALID)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    fn range_of(&self, line: usize) -> Option<&Range<usize>> {
        match self.sparse.get(line) {
            Some(&slot) if slot != NO_LINE => self.dense.get(slot as usize),
            _ => None,
        }
    }

    /// Whether `line` holds at least one token.
    #[inline]
    pub fn exists(&self, line: usize) -> bool {
        self.range_of(line).is_some()
    }

    /// Number of tokens on `line`.
    #[inline]
    pub fn len_on(&self, line: usize) -> usize {
        self.range_of(line).map_or(0, ExactSizeIterator::len)
    }

    /// Tokens on `line`; empty for lines without tokens.
    pub fn on(&self, line: usize) -> &[Token<'src>] {
        match self.range_of(line) {
            Some(range) => &self.tokens[range.clone()],
            None => &[],
        }
    }

    /// The `index`-th token on `line`.
    pub fn at_line(&self, line: usize, index: usize) -> Option<&Token<'src>> {
        self.on(line).get(index)
    }

    #[inline]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

impl<'src> Index<usize> for Tokens<'src> {
    type Output = Token<'src>;

    fn index(&self, index: usize) -> &Token<'src> {
        &self.tokens[index]
    }
}

impl<'src> Index<TokenId> for Tokens<'src> {
    type Output = Token<'src>;

    fn index(&self, id: TokenId) -> &Token<'src> {
        &self.tokens[id.index()]
    }
}

impl<'a, 'src> IntoIterator for &'a Tokens<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests;
