//! Comments collected alongside tokens.

use crate::SourceLocation;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommentKind {
    /// `// ...` to end of line.
    Line,
    /// `/* ... */`, possibly spanning lines.
    Block,
}

/// A comment and the locations of its first and last characters.
///
/// A block comment spanning several lines keeps the concatenation of its line
/// fragments as `text`; `end` points at the `/` of the closing `*/`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub text: String,
    pub begin: SourceLocation,
    pub end: SourceLocation,
    pub kind: CommentKind,
}
