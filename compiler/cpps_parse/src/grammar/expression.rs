//! Expressions.
//!
//! Binary operators are parsed by one precedence-climbing loop over the
//! [`Precedence`] table. Each level is a left-associative chain; a level
//! with no operator collapses to its operand, so `a + b * c` produces an
//! additive chain whose second operand is a multiplicative chain, and `a`
//! alone produces just a basic expression.

use cpps_ir::{
    Keyword, Lexeme, Node, ParameterModifier, Punctuator, SourceLocation, Token, TokenId,
};
use cpps_stack::ensure_sufficient_stack;

use crate::cst::{
    BasicExpression, BinaryExpression, BinaryTerm, Declaration, Expression, ExpressionList,
    ExpressionTerm, FunctionSignature, Operand, ParameterDeclarationList, PostfixExpression,
    PostfixTerm, PrefixExpression, PrimaryExpression,
};
use crate::{message, Parser, Precedence};

fn is_prefix_operator(lexeme: Lexeme) -> bool {
    lexeme == Punctuator::Not || lexeme == Punctuator::Plus || lexeme == Punctuator::Minus
}

/// Tokens that stand on their own as a primary expression.
fn is_primary_token(lexeme: Lexeme) -> bool {
    lexeme.is_literal() || lexeme.is_identifier() || lexeme.is::<Keyword>()
}

impl Parser<'_, '_> {
    /// A full expression, or `None` with the cursor untouched.
    ///
    /// With `allow_relational` unset, `<` `>` `<=` `>=` end the expression
    /// instead of continuing it.
    pub(crate) fn parse_expression(&mut self, allow_relational: bool) -> Option<Node<Expression>> {
        ensure_sufficient_stack(|| {
            let checkpoint = self.cursor.checkpoint();
            match self.parse_binary_expression(Precedence::Assignment, allow_relational) {
                Some(root) => Some(self.create(Expression { root })),
                None => {
                    self.cursor.restore(checkpoint);
                    None
                }
            }
        })
    }

    /// Level of the binary operator at the cursor, if any.
    fn binary_operator(&self, allow_relational: bool) -> Option<Precedence> {
        Precedence::of(self.cursor.lexeme(), allow_relational)
    }

    /// Operand chains at `min` or tighter.
    fn parse_binary_expression(
        &mut self,
        min: Precedence,
        allow_relational: bool,
    ) -> Option<Operand> {
        let mut lhs = Operand::from(self.parse_basic_expression()?);

        while let Some(level) = self
            .binary_operator(allow_relational)
            .filter(|&level| level >= min)
        {
            let mut terms = Vec::new();

            while self.binary_operator(allow_relational) == Some(level) {
                let op_token = self.cursor.current();
                let op = self.cursor.advance();
                let errors = self.diagnosis.error_count();

                let operand = match level.tighter() {
                    Some(tighter) => self.parse_binary_expression(tighter, allow_relational),
                    None => self.parse_basic_expression().map(Operand::from),
                };
                let Some(operand) = operand else {
                    let location = self.cursor.location();
                    self.follow_on(
                        errors,
                        message::invalid_expression_after(op_token.text),
                        location,
                    );
                    return None;
                };

                terms.push(BinaryTerm { op, operand });
            }

            lhs = Operand::from(self.create(BinaryExpression {
                precedence: level,
                first: lhs,
                terms,
            }));
        }

        Some(lhs)
    }

    /// `prefix-operator* primary-expression postfix-expression`
    fn parse_basic_expression(&mut self) -> Option<Node<BasicExpression>> {
        let checkpoint = self.cursor.checkpoint();

        let mut prefix = PrefixExpression::default();
        while is_prefix_operator(self.cursor.lexeme()) {
            prefix.ops.push(self.cursor.advance());
        }

        let Some(primary) = self.parse_primary_expression() else {
            self.cursor.restore(checkpoint);
            return None;
        };
        let Some(postfix) = self.parse_postfix_expression() else {
            self.cursor.restore(checkpoint);
            return None;
        };

        Some(self.create(BasicExpression {
            prefix,
            primary,
            postfix,
        }))
    }

    // === Primary ===

    /// ```text
    /// identifier-expression
    /// literal | identifier | keyword
    /// ( expression-list )
    /// unnamed-declaration
    /// ```
    fn parse_primary_expression(&mut self) -> Option<Node<PrimaryExpression>> {
        if let Some(identifier) = self.parse_identifier_expression() {
            return Some(self.create(PrimaryExpression::from(identifier)));
        }

        if is_primary_token(self.cursor.lexeme()) {
            let token = self.cursor.advance();
            return Some(self.create(PrimaryExpression::from(token)));
        }

        if self.cursor.check(Punctuator::OpenParenthesis) {
            return self.parse_parenthesized_expression();
        }

        self.parse_unnamed_function_expression()
    }

    /// `( expression-list )`
    fn parse_parenthesized_expression(&mut self) -> Option<Node<PrimaryExpression>> {
        let checkpoint = self.cursor.checkpoint();
        let open_location = self.cursor.location();
        self.cursor.advance();

        let errors = self.diagnosis.error_count();
        let Some(mut expressions) = self.parse_expression_list(open_location) else {
            let location = self.cursor.location();
            self.follow_on(errors, message::UNEXPECTED_TEXT_AFTER_OPEN_PARENTHESIS, location);
            self.cursor.restore(checkpoint);
            return None;
        };

        if !self.cursor.check(Punctuator::CloseParenthesis) {
            let location = self.cursor.location();
            self.error(message::UNEXPECTED_TEXT_AFTER_EXPRESSION_LIST, location);
            self.cursor.restore(checkpoint);
            return None;
        }
        expressions.close_location = self.cursor.location();
        self.cursor.advance();

        let list = self.create(expressions);
        Some(self.create(PrimaryExpression::from(list)))
    }

    /// An unnamed declaration at expression scope. Only functions with at
    /// most a single result are accepted.
    fn parse_unnamed_function_expression(&mut self) -> Option<Node<PrimaryExpression>> {
        let checkpoint = self.cursor.checkpoint();
        let start_location = self.cursor.location();

        let Some(declaration) = self.parse_unnamed_declaration(start_location, true) else {
            self.cursor.restore(checkpoint);
            return None;
        };

        if let Some((text, location)) = self.unnamed_function_error(&declaration) {
            self.error(text, location);
            self.cursor.restore(checkpoint);
            return None;
        }

        Some(self.create(PrimaryExpression::from(declaration)))
    }

    fn unnamed_function_error(
        &self,
        declaration: &Node<Declaration>,
    ) -> Option<(&'static str, SourceLocation)> {
        let declaration = self.node(declaration);
        let Some(signature) = declaration.ty.get::<Node<FunctionSignature>>() else {
            return Some((
                message::UNNAMED_DECLARATION_MUST_BE_FUNCTION,
                declaration.location(),
            ));
        };
        let returns = &self.node(signature).returns;
        let list = returns.get::<Node<ParameterDeclarationList>>()?;
        Some((
            message::UNNAMED_FUNCTION_CANNOT_RETURN_MULTIPLE_VALUES,
            self.node(list).open_parenthesis_location,
        ))
    }

    // === Postfix ===

    /// Whether the current token continues a postfix chain.
    ///
    /// `++ -- * & ~` must touch the preceding token, and `* & ~` are binary
    /// or prefix when an identifier or `(` follows them.
    fn at_postfix_operator(&self) -> bool {
        let current = self.cursor.current();
        let Some(punctuator) = current.lexeme.get::<Punctuator>() else {
            return false;
        };
        let adjacent = self.cursor.previous().is_adjacent_to(&current);

        match punctuator {
            Punctuator::OpenBracket | Punctuator::OpenParenthesis | Punctuator::Dot => true,
            Punctuator::PlusPlus | Punctuator::MinusMinus => adjacent,
            Punctuator::Multiply | Punctuator::Ampersand | Punctuator::Tilde => {
                let next = self.cursor.peek(1).lexeme;
                adjacent && next != Punctuator::OpenParenthesis && !next.is_identifier()
            }
            _ => false,
        }
    }

    /// ```text
    /// postfix-operator
    /// [ expression-list ]
    /// ( expression-list? )
    /// . identifier-expression
    /// ```
    fn parse_postfix_expression(&mut self) -> Option<PostfixExpression> {
        let mut postfix = PostfixExpression::default();

        while self.at_postfix_operator() {
            let op_token = self.cursor.current();
            let mut term = PostfixTerm {
                op: self.cursor.advance(),
                identifier_expression: None,
                expressions: None,
                close_op: None,
            };

            match op_token.lexeme.get::<Punctuator>() {
                Some(Punctuator::OpenBracket) => {
                    let (expressions, close_op) =
                        self.parse_postfix_list(op_token, Punctuator::CloseBracket)?;
                    term.expressions = Some(expressions);
                    term.close_op = Some(close_op);
                }
                Some(Punctuator::OpenParenthesis) => {
                    let (expressions, close_op) =
                        self.parse_postfix_list(op_token, Punctuator::CloseParenthesis)?;
                    term.expressions = Some(expressions);
                    term.close_op = Some(close_op);
                }
                Some(Punctuator::Dot) => {
                    let Some(member) = self.parse_identifier_expression() else {
                        self.error(message::DOT_MUST_BE_FOLLOWED_BY_MEMBER_NAME, op_token.location);
                        return None;
                    };
                    term.identifier_expression = Some(member);
                }
                _ => {}
            }

            postfix.terms.push(term);
        }

        Some(postfix)
    }

    /// Arguments of a call or subscript opened by `open`, through `close`.
    fn parse_postfix_list(
        &mut self,
        open: Token<'_>,
        close: Punctuator,
    ) -> Option<(ExpressionList, TokenId)> {
        let subscript = close == Punctuator::CloseBracket;
        let errors = self.diagnosis.error_count();

        let Some(mut expressions) = self.parse_expression_list(open.location) else {
            let text = if subscript {
                message::SUBSCRIPT_EXPRESSION_EMPTY
            } else {
                message::UNEXPECTED_TEXT_AFTER_EXPRESSION_LIST
            };
            self.follow_on(errors, text, open.location);
            return None;
        };

        if subscript && expressions.is_empty() {
            self.error(message::SUBSCRIPT_EXPRESSION_EMPTY, open.location);
            return None;
        }

        let close_location = self.cursor.location();
        let Some(close_op) = self.cursor.eat(close) else {
            let text = if subscript {
                message::UNEXPECTED_TEXT_BRACKET_NOT_MATCHED
            } else {
                message::UNEXPECTED_TEXT_PARENTHESIS_NOT_MATCHED
            };
            self.error(text, close_location);
            return None;
        };
        expressions.close_location = close_location;

        Some((expressions, close_op))
    }

    // === Expression lists ===

    /// `out` and `move` mark an argument; anything else passes `in`.
    fn parse_argument_modifier(&mut self) -> ParameterModifier {
        match self.cursor.lexeme().get::<ParameterModifier>() {
            Some(modifier @ (ParameterModifier::Out | ParameterModifier::Move)) => {
                self.cursor.advance();
                modifier
            }
            _ => ParameterModifier::In,
        }
    }

    /// `(modifier? expression (, modifier? expression)*)?`
    ///
    /// The list may be empty. `None` when an argument is malformed. The
    /// close location is set to the token the list stopped at; callers
    /// check that it is the expected closing token.
    fn parse_expression_list(&mut self, open_location: SourceLocation) -> Option<ExpressionList> {
        let mut terms = Vec::new();

        let start = self.cursor.checkpoint();
        let errors = self.diagnosis.error_count();
        let modifier = self.parse_argument_modifier();

        match self.parse_expression(true) {
            Some(expression) => terms.push(ExpressionTerm {
                expression,
                modifier,
            }),
            None if self.diagnosis.error_count() > errors => return None,
            None => self.cursor.restore(start),
        }

        while !terms.is_empty() && self.cursor.eat(Punctuator::Comma).is_some() {
            let errors = self.diagnosis.error_count();
            let modifier = self.parse_argument_modifier();
            let Some(expression) = self.parse_expression(true) else {
                let location = self.cursor.location();
                self.follow_on(errors, message::INVALID_TEXT_IN_EXPRESSION_LIST, location);
                return None;
            };
            terms.push(ExpressionTerm {
                expression,
                modifier,
            });
        }

        Some(ExpressionList {
            terms,
            open_location,
            close_location: self.cursor.location(),
        })
    }
}
