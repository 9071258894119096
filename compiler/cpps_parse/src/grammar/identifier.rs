use cpps_ir::{Keyword, Lexeme, Node, Punctuator};

use crate::cst::{
    Identifier, IdentifierExpression, QualifiedIdentifier, QualifiedTerm, UnqualifiedIdentifier,
};
use crate::Parser;

/// Identifiers and keywords both name things; keywords spell the
/// fundamental types.
pub(crate) fn is_identifier_like(lexeme: Lexeme) -> bool {
    lexeme.is_identifier() || lexeme.is::<Keyword>()
}

impl Parser<'_, '_> {
    /// `const? identifier`
    ///
    /// Fails when the identifier is followed by `<`; template argument lists
    /// are not supported.
    pub(crate) fn parse_unqualified_identifier(&mut self) -> Option<Node<UnqualifiedIdentifier>> {
        let checkpoint = self.cursor.checkpoint();

        let const_identifier = if self.cursor.check(Keyword::Const)
            && is_identifier_like(self.cursor.peek(1).lexeme)
        {
            Some(self.cursor.advance())
        } else {
            None
        };

        if !is_identifier_like(self.cursor.lexeme())
            || self.cursor.peek(1).lexeme == Punctuator::Less
        {
            self.cursor.restore(checkpoint);
            return None;
        }
        let identifier = self.cursor.advance();

        Some(self.create(UnqualifiedIdentifier {
            identifier,
            const_identifier,
        }))
    }

    /// `unqualified-identifier (:: unqualified-identifier)+`
    fn parse_qualified_identifier(&mut self) -> Option<Node<QualifiedIdentifier>> {
        let checkpoint = self.cursor.checkpoint();

        let first = self.parse_unqualified_identifier()?;
        if !self.cursor.check(Punctuator::DoubleColon) {
            drop(first.destroy(&mut self.unit.arena));
            self.cursor.restore(checkpoint);
            return None;
        }

        let mut qualified = QualifiedIdentifier::default();
        qualified.terms.push(QualifiedTerm {
            scope: None,
            identifier: first,
        });

        while let Some(scope) = self.cursor.eat(Punctuator::DoubleColon) {
            let Some(identifier) = self.parse_unqualified_identifier() else {
                self.cursor.restore(checkpoint);
                return None;
            };
            qualified.terms.push(QualifiedTerm {
                scope: Some(scope),
                identifier,
            });
        }

        Some(self.create(qualified))
    }

    /// Qualified or unqualified identifier, located at its first token.
    pub(crate) fn parse_identifier_expression(&mut self) -> Option<Node<IdentifierExpression>> {
        let location = self.cursor.current().location;

        let identifier = match self.parse_qualified_identifier() {
            Some(qualified) => Identifier::from(qualified),
            None => Identifier::from(self.parse_unqualified_identifier()?),
        };

        Some(self.create(IdentifierExpression {
            identifier,
            location,
        }))
    }
}
