//! Core data types for the cpps front end.
//!
//! - [`SourceLocation`] line/column positions
//! - [`Lexeme`] packed token categories and the grammar tables behind them
//! - [`Token`], [`TokenId`] and the per-line [`Tokens`] index
//! - [`Comment`]s collected by the lexer
//! - [`Source`] classified input lines
//! - [`Arena`], [`Node`] and [`node_variant!`] for CST storage

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod arena;
mod comment;
pub mod lexeme;
mod location;
mod source;
mod token;
mod tokens;

pub use arena::{Address, Alternative, Arena, BumpAllocator, Node, Release};
pub use comment::{Comment, CommentKind};
pub use lexeme::{
    BooleanLiteral, FunctionModifier, Keyword, Lexeme, LexemeKind, LexemeValue,
    ParameterModifier, PointerLiteral, Punctuator,
};
pub use location::SourceLocation;
pub use source::{Line, LineKind, Source};
pub use token::{Token, TokenId};
pub use tokens::Tokens;

#[cfg(target_pointer_width = "64")]
static_assert_size!(Token<'static>, 32);
