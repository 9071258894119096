use cpps_ir::{node_variant, Node, SourceLocation, TokenId};
use smallvec::SmallVec;

/// `const-opt identifier`. Keywords are accepted as identifiers so that
/// fundamental type names (`int`, `void`) parse as identifier expressions.
#[derive(Debug)]
pub struct UnqualifiedIdentifier {
    pub identifier: TokenId,
    pub const_identifier: Option<TokenId>,
}

/// One `::`-separated segment. The first segment has no scope token.
#[derive(Debug)]
pub struct QualifiedTerm {
    pub scope: Option<TokenId>,
    pub identifier: Node<UnqualifiedIdentifier>,
}

/// `a::b::c`, always at least two terms.
#[derive(Debug, Default)]
pub struct QualifiedIdentifier {
    pub terms: SmallVec<[QualifiedTerm; 2]>,
}

node_variant! {
    pub enum Identifier {
        Unqualified(Node<UnqualifiedIdentifier>),
        Qualified(Node<QualifiedIdentifier>),
    }
}

#[derive(Debug)]
pub struct IdentifierExpression {
    pub identifier: Identifier,
    /// Location of the first token.
    pub location: SourceLocation,
}
