use cpps_ir::{node_variant, Node, ParameterModifier, SourceLocation, TokenId};

use super::{IdentifierExpression, Statement, UnqualifiedIdentifier};

node_variant! {
    pub enum DeclarationType {
        FunctionSignature(Node<FunctionSignature>),
        IdentifierExpression(Node<IdentifierExpression>),
    }
}

/// `identifier? : type (= statement)? ;?`
///
/// Unnamed declarations appear at expression scope, where only functions
/// are allowed.
#[derive(Debug)]
pub struct Declaration {
    pub identifier: Option<Node<UnqualifiedIdentifier>>,
    pub ty: DeclarationType,
    /// The `*` of a pointer object declaration.
    pub pointer_declaration: Option<TokenId>,
    pub initializer: Option<Node<Statement>>,
    /// First token: the identifier, or the `:` of an unnamed declaration.
    pub start_location: SourceLocation,
    /// Last token consumed by the declaration.
    pub end_location: SourceLocation,
    pub equal_location: Option<SourceLocation>,
}

impl Declaration {
    #[inline]
    pub fn location(&self) -> SourceLocation {
        self.start_location
    }

    pub fn is_function(&self) -> bool {
        self.ty.is::<Node<FunctionSignature>>()
    }
}

node_variant! {
    /// Function results: nothing, a single type, or named out parameters.
    pub enum Returns {
        IdentifierExpression(Node<IdentifierExpression>),
        ParameterDeclarationList(Node<ParameterDeclarationList>),
    }
}

#[derive(Debug)]
pub struct FunctionSignature {
    pub parameters: ParameterDeclarationList,
    pub returns: Returns,
    pub throws: bool,
}

#[derive(Debug)]
pub struct ParameterDeclarationList {
    pub parameters: Vec<Node<ParameterDeclaration>>,
    pub open_parenthesis_location: SourceLocation,
    pub close_parenthesis_location: SourceLocation,
}

impl ParameterDeclarationList {
    #[inline]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[derive(Debug)]
pub struct ParameterDeclaration {
    pub declaration: Node<Declaration>,
    /// Explicit, or `in` for parameters and `out` for named returns.
    pub modifier: ParameterModifier,
    pub location: SourceLocation,
}
