use cpps_ir::{Keyword, Node, ParameterModifier, Punctuator, SourceLocation};

use crate::cst::{
    Declaration, DeclarationType, FunctionSignature, ParameterDeclaration,
    ParameterDeclarationList, Returns,
};
use crate::{message, Parser};

impl Parser<'_, '_> {
    /// `unqualified-identifier unnamed-declaration`
    ///
    /// Speculative: on failure the cursor is rewound to the identifier.
    pub(crate) fn parse_declaration(
        &mut self,
        must_end_with_semicolon: bool,
    ) -> Option<Node<Declaration>> {
        if self.cursor.is_at_end() {
            return None;
        }

        let checkpoint = self.cursor.checkpoint();
        let start_location = self.cursor.current().location;

        let identifier = self.parse_unqualified_identifier()?;
        let Some(declaration) =
            self.parse_unnamed_declaration(start_location, must_end_with_semicolon)
        else {
            self.cursor.restore(checkpoint);
            return None;
        };

        self.node_mut(&declaration).identifier = Some(identifier);
        Some(declaration)
    }

    /// ```text
    /// : function-signature = statement
    /// : *? identifier-expression = statement
    /// : *? identifier-expression ;
    /// ```
    pub(crate) fn parse_unnamed_declaration(
        &mut self,
        start_location: SourceLocation,
        must_end_with_semicolon: bool,
    ) -> Option<Node<Declaration>> {
        self.cursor.eat(Punctuator::Colon)?;

        let mut pointer_declaration = None;
        let ty = if let Some(signature) = self.parse_function_signature() {
            DeclarationType::from(signature)
        } else if let Some(star) = self.cursor.eat(Punctuator::Multiply) {
            pointer_declaration = Some(star);
            DeclarationType::from(self.parse_identifier_expression()?)
        } else {
            // TODO: deduced types (`x: = 0`) once initializer-driven typing exists.
            DeclarationType::from(self.parse_identifier_expression()?)
        };
        let is_function = ty.is::<Node<FunctionSignature>>();

        let mut equal_location = None;
        let mut initializer = None;

        if self.cursor.check(Punctuator::Assignment) {
            let equal = self.cursor.location();
            self.cursor.advance();
            equal_location = Some(equal);

            let errors = self.diagnosis.error_count();
            match self.parse_statement(must_end_with_semicolon, equal) {
                Some(statement) => initializer = Some(statement),
                None => {
                    self.follow_on(errors, message::ILL_FORMED_INITIALIZER, equal);
                    return None;
                }
            }
        } else if is_function {
            self.error(message::MISSING_EQUAL_BEFORE_FUNCTION_BODY, start_location);
            return None;
        } else if self.cursor.eat(Punctuator::Semicolon).is_none() && must_end_with_semicolon {
            self.error(message::MISSING_SEMICOLON_AT_END_OF_DECLARATION, start_location);
            return None;
        }

        let end_location = self.cursor.previous().location;

        Some(self.create(Declaration {
            identifier: None,
            ty,
            pointer_declaration,
            initializer,
            start_location,
            end_location,
            equal_location,
        }))
    }

    /// `parameter-declaration-list throws? (-> returns)?`
    fn parse_function_signature(&mut self) -> Option<Node<FunctionSignature>> {
        let checkpoint = self.cursor.checkpoint();

        let Some(parameters) = self.parse_parameter_declaration_list(false) else {
            self.cursor.restore(checkpoint);
            return None;
        };

        let throws = self.cursor.eat(Keyword::Throws).is_some();

        let mut returns = Returns::Empty;
        if self.cursor.eat(Punctuator::Arrow).is_some() {
            let errors = self.diagnosis.error_count();
            if let Some(ty) = self.parse_identifier_expression() {
                returns = Returns::from(ty);
            } else if let Some(list) = self.parse_parameter_declaration_list(true) {
                returns = Returns::from(self.create(list));
            } else {
                let location = self.cursor.location();
                self.follow_on(errors, message::MISSING_FUNCTION_RETURN_AFTER_ARROW, location);
                self.cursor.restore(checkpoint);
                return None;
            }
        }

        Some(self.create(FunctionSignature {
            parameters,
            returns,
            throws,
        }))
    }

    /// `( (parameter-declaration (, parameter-declaration)*)? )`
    ///
    /// With `returns` set the list names the results of a function.
    fn parse_parameter_declaration_list(
        &mut self,
        returns: bool,
    ) -> Option<ParameterDeclarationList> {
        let checkpoint = self.cursor.checkpoint();
        let open_parenthesis_location = self.cursor.location();
        self.cursor.eat(Punctuator::OpenParenthesis)?;

        let errors = self.diagnosis.error_count();
        let mut parameters = Vec::new();

        while let Some(parameter) = self.parse_parameter_declaration(returns) {
            parameters.push(parameter);

            if self.cursor.check(Punctuator::CloseParenthesis) {
                break;
            }
            if self.cursor.eat(Punctuator::Comma).is_none() {
                let location = self.cursor.location();
                self.error(message::MISSING_COMMA_BETWEEN_PARAMETER_DECLARATIONS, location);
                self.cursor.restore(checkpoint);
                return None;
            }
        }

        let close_parenthesis_location = self.cursor.location();
        if self.cursor.eat(Punctuator::CloseParenthesis).is_none() {
            self.follow_on(
                errors,
                message::MISSING_CLOSE_PARENTHESIS_IN_PARAMETER_LIST,
                close_parenthesis_location,
            );
            self.cursor.restore(checkpoint);
            return None;
        }

        Some(ParameterDeclarationList {
            parameters,
            open_parenthesis_location,
            close_parenthesis_location,
        })
    }

    /// `parameter-modifier? declaration`
    ///
    /// The modifier defaults to `in`, or `out` for a named result. A result
    /// can only be `out` or `forward`.
    fn parse_parameter_declaration(
        &mut self,
        returns: bool,
    ) -> Option<Node<ParameterDeclaration>> {
        let checkpoint = self.cursor.checkpoint();
        let start = self.cursor.current();

        let mut modifier = if returns {
            ParameterModifier::Out
        } else {
            ParameterModifier::In
        };

        if let Some(explicit) = start.lexeme.get::<ParameterModifier>() {
            let allowed = !returns
                || matches!(explicit, ParameterModifier::Out | ParameterModifier::Forward);
            if !allowed {
                self.error(message::invalid_return_modifier(explicit), start.location);
                return None;
            }
            modifier = explicit;
            self.cursor.advance();
        }

        let Some(declaration) = self.parse_declaration(false) else {
            self.cursor.restore(checkpoint);
            return None;
        };

        Some(self.create(ParameterDeclaration {
            declaration,
            modifier,
            location: start.location,
        }))
    }
}
