use cpps_ir::{node_variant, Node, ParameterModifier, SourceLocation, TokenId};
use smallvec::SmallVec;

use super::{Declaration, IdentifierExpression};
use crate::Precedence;

node_variant! {
    /// One side of a binary operator: a basic expression, or a chain at a
    /// looser level.
    pub enum Operand {
        Basic(Node<BasicExpression>),
        Binary(Node<BinaryExpression>),
    }
}

#[derive(Debug)]
pub struct Expression {
    pub root: Operand,
}

#[derive(Debug)]
pub struct BinaryTerm {
    pub op: TokenId,
    pub operand: Operand,
}

/// `first (op operand)+` where every `op` belongs to `precedence`.
///
/// Chains are left-associative. A level without any operator is not
/// materialised; its operand is used directly.
#[derive(Debug)]
pub struct BinaryExpression {
    pub precedence: Precedence,
    pub first: Operand,
    pub terms: Vec<BinaryTerm>,
}

/// Leading `!`, `+` and `-`.
#[derive(Debug, Default)]
pub struct PrefixExpression {
    pub ops: SmallVec<[TokenId; 2]>,
}

/// A postfix operator, call, subscript or member access.
#[derive(Debug)]
pub struct PostfixTerm {
    pub op: TokenId,
    /// Member after `.`.
    pub identifier_expression: Option<Node<IdentifierExpression>>,
    /// Arguments of `(` or `[`.
    pub expressions: Option<ExpressionList>,
    /// The matching `)` or `]`.
    pub close_op: Option<TokenId>,
}

#[derive(Debug, Default)]
pub struct PostfixExpression {
    pub terms: Vec<PostfixTerm>,
}

#[derive(Debug)]
pub struct BasicExpression {
    pub prefix: PrefixExpression,
    pub primary: Node<PrimaryExpression>,
    pub postfix: PostfixExpression,
}

node_variant! {
    pub enum PrimaryExpression {
        /// Literal, identifier or keyword token.
        Token(TokenId),
        /// `( expression-list )`
        ExpressionList(Node<ExpressionList>),
        IdentifierExpression(Node<IdentifierExpression>),
        /// Unnamed function.
        Declaration(Node<Declaration>),
    }
}

#[derive(Debug)]
pub struct ExpressionTerm {
    pub expression: Node<Expression>,
    pub modifier: ParameterModifier,
}

#[derive(Debug)]
pub struct ExpressionList {
    pub terms: Vec<ExpressionTerm>,
    pub open_location: SourceLocation,
    pub close_location: SourceLocation,
}

impl ExpressionList {
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
