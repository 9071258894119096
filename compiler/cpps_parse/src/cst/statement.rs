use cpps_ir::{node_variant, Node, SourceLocation, TokenId};

use super::{Declaration, Expression};

node_variant! {
    pub enum StatementKind {
        Declaration(Node<Declaration>),
        Compound(Node<CompoundStatement>),
        Expression(Node<ExpressionStatement>),
        Iteration(Node<IterationStatement>),
        Return(Node<ReturnStatement>),
        Selection(Node<SelectionStatement>),
    }
}

#[derive(Debug)]
pub struct Statement {
    pub kind: StatementKind,
}

/// `{ statement* }`
#[derive(Debug)]
pub struct CompoundStatement {
    pub statements: Vec<Node<Statement>>,
    /// The `=` of a function body when it shares the line with `{`.
    pub open_brace_location: SourceLocation,
    pub close_brace_location: SourceLocation,
}

impl CompoundStatement {
    #[inline]
    pub fn location(&self) -> SourceLocation {
        self.open_brace_location
    }
}

#[derive(Debug)]
pub struct ExpressionStatement {
    pub expression: Node<Expression>,
    pub has_semicolon: bool,
}

#[derive(Debug)]
pub struct ReturnStatement {
    pub return_token: TokenId,
    pub expression: Option<Node<Expression>>,
}

/// `if constexpr? expression { } (else { })?`
#[derive(Debug)]
pub struct SelectionStatement {
    pub if_token: TokenId,
    pub constexpr_token: Option<TokenId>,
    pub condition: Node<Expression>,
    pub then_branch: Node<CompoundStatement>,
    pub else_branch: Option<Node<CompoundStatement>>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IterationKind {
    /// `while expression { }`
    While,
    /// `do { } while expression ;`
    DoWhile,
}

#[derive(Debug)]
pub struct IterationStatement {
    pub kind: IterationKind,
    /// `while` or `do`.
    pub keyword: TokenId,
    pub condition: Node<Expression>,
    pub body: Node<CompoundStatement>,
}
