//! Parser tests.
//!
//! - `declarations`: named and unnamed declarations, signatures, parameters
//! - `expressions`: precedence, prefix, postfix and primary forms
//! - `statements`: compound, return, expression and control-flow statements
//! - `diagnostics`: reported messages, locations and follow-on filtering

#![allow(clippy::unwrap_used, clippy::expect_used)]


use cpps_diagnostic::testing::assert_no_diagnosis;
use cpps_diagnostic::Diagnosis;
use cpps_ir::{Node, Source, TokenId, Tokens};

use crate::cst::{
    Declaration, Expression, ExpressionStatement, Identifier, IdentifierExpression, Operand,
    PrimaryExpression, Statement, UnqualifiedIdentifier,
};
use crate::{parse_with_options, ParseOptions, TranslationUnit};

/// Everything a parse produced, kept together so token ids stay resolvable.
struct Parsed {
    tokens: Tokens<'static>,
    unit: TranslationUnit,
    diagnosis: Diagnosis,
}

impl Parsed {
    fn text(&self, id: TokenId) -> &'static str {
        self.tokens[id].text
    }

    fn get<T: 'static>(&self, node: &Node<T>) -> &T {
        self.unit.get(node)
    }

    fn declaration(&self, index: usize) -> &Declaration {
        self.get(&self.unit.declarations[index])
    }

    fn unqualified_text(&self, node: &Node<UnqualifiedIdentifier>) -> &'static str {
        self.text(self.get(node).identifier)
    }

    /// Source text of an identifier expression, `::`-joined when qualified.
    fn identifier_text(&self, node: &Node<IdentifierExpression>) -> String {
        match &self.get(node).identifier {
            Identifier::Unqualified(unqualified) => self.unqualified_text(unqualified).to_string(),
            Identifier::Qualified(qualified) => self
                .get(qualified)
                .terms
                .iter()
                .map(|term| self.unqualified_text(&term.identifier))
                .collect::<Vec<_>>()
                .join("::"),
            Identifier::Empty => String::new(),
        }
    }

    fn declaration_name(&self, declaration: &Declaration) -> &'static str {
        self.unqualified_text(declaration.identifier.as_ref().expect("named declaration"))
    }

    /// The statement of a declaration's initializer.
    fn initializer<'p>(&'p self, declaration: &'p Declaration) -> &'p Statement {
        self.get(declaration.initializer.as_ref().expect("initializer"))
    }

    /// The expression of a declaration initialized by an expression
    /// statement.
    fn initializer_expression<'p>(&'p self, declaration: &'p Declaration) -> &'p Expression {
        let statement = self.initializer(declaration);
        let expression_statement: &Node<ExpressionStatement> =
            statement.kind.get().expect("expression statement");
        self.get(&self.get(expression_statement).expression)
    }

    /// The primary of an operand that is a plain basic expression.
    fn primary<'p>(&'p self, operand: &'p Operand) -> &'p PrimaryExpression {
        let Operand::Basic(basic) = operand else {
            panic!("expected a basic expression, got {operand:?}");
        };
        self.get(&self.get(basic).primary)
    }

    /// Text of a primary that is a single token or identifier.
    fn primary_text(&self, operand: &Operand) -> String {
        match self.primary(operand) {
            PrimaryExpression::Token(id) => self.text(*id).to_string(),
            PrimaryExpression::IdentifierExpression(identifier) => {
                self.identifier_text(identifier)
            }
            other => panic!("expected a token or identifier primary, got {other:?}"),
        }
    }
}

fn parse_lines_with(lines: &[&'static str], options: ParseOptions) -> Parsed {
    let source = Source::from(lines);
    let mut diagnosis = Diagnosis::new();
    let tokens = cpps_lexer::lex(&mut diagnosis, &source);
    let unit = parse_with_options(&mut diagnosis, &tokens, options);
    Parsed {
        tokens,
        unit,
        diagnosis,
    }
}

fn parse_lines(lines: &[&'static str]) -> Parsed {
    parse_lines_with(lines, ParseOptions::default())
}

fn parse_source(line: &'static str) -> Parsed {
    parse_lines(&[line])
}

/// Parse and require a clean diagnosis.
fn parse_ok(lines: &[&'static str]) -> Parsed {
    let parsed = parse_lines(lines);
    assert_no_diagnosis(&parsed.diagnosis);
    parsed
}
