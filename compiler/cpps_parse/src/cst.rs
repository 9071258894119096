//! Concrete syntax tree.
//!
//! Every node lives in the [`TranslationUnit`]'s arena and is reached through
//! an owning [`Node`] handle. Fields that may hold one of several node kinds
//! (or a raw token) are tagged enums generated by
//! [`node_variant!`](cpps_ir::node_variant), each with an `Empty` default.
//! Raw tokens are stored as [`TokenId`](cpps_ir::TokenId)s into the
//! [`Tokens`](cpps_ir::Tokens) the tree was parsed from.

mod declaration;
mod expression;
mod identifier;
mod statement;

use cpps_ir::{Arena, Node};

pub use declaration::{
    Declaration, DeclarationType, FunctionSignature, ParameterDeclaration,
    ParameterDeclarationList, Returns,
};
pub use expression::{
    BasicExpression, BinaryExpression, BinaryTerm, Expression, ExpressionList, ExpressionTerm,
    Operand, PostfixExpression, PostfixTerm, PrefixExpression, PrimaryExpression,
};
pub use identifier::{
    Identifier, IdentifierExpression, QualifiedIdentifier, QualifiedTerm, UnqualifiedIdentifier,
};
pub use statement::{
    CompoundStatement, ExpressionStatement, IterationKind, IterationStatement, ReturnStatement,
    SelectionStatement, Statement, StatementKind,
};

/// Arena block size for one translation unit.
pub const TRANSLATION_UNIT_BLOCK_CAPACITY: usize = 1024 * 500;

pub type CstArena = Arena<TRANSLATION_UNIT_BLOCK_CAPACITY>;

/// Root of a parsed input.
///
/// `declarations` is declared before `arena` so every handle is dropped
/// before the storage it points into.
#[derive(Debug, Default)]
pub struct TranslationUnit {
    pub declarations: Vec<Node<Declaration>>,
    pub arena: CstArena,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a handle owned by this unit.
    #[inline]
    pub fn get<T: 'static>(&self, node: &Node<T>) -> &T {
        self.arena.get(node)
    }

    /// Top-level declarations in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.declarations.iter().map(|node| self.arena.get(node))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }
}
