use cpps_ir::{Keyword, LexemeValue, Node, Punctuator, SourceLocation};
use cpps_stack::ensure_sufficient_stack;

use crate::cst::{
    CompoundStatement, Expression, ExpressionStatement, IterationKind, IterationStatement,
    ReturnStatement, SelectionStatement, Statement, StatementKind,
};
use crate::{message, Parser};

type Alternative<'a, 'src> = fn(&mut Parser<'a, 'src>, bool, SourceLocation) -> Option<StatementKind>;

impl<'a, 'src> Parser<'a, 'src> {
    /// One statement. `equal_location` is the `=` of an enclosing
    /// declaration, [`SourceLocation::INVALID`] elsewhere.
    ///
    /// Alternatives are tried in order: selection, return, iteration,
    /// compound, declaration, expression.
    pub(crate) fn parse_statement(
        &mut self,
        must_end_with_semicolon: bool,
        equal_location: SourceLocation,
    ) -> Option<Node<Statement>> {
        let alternatives: [Alternative<'a, 'src>; 6] = [
            |parser, _, _| parser.parse_selection_statement().map(StatementKind::from),
            |parser, _, _| parser.parse_return_statement().map(StatementKind::from),
            |parser, _, _| parser.parse_iteration_statement().map(StatementKind::from),
            |parser, _, equal| parser.parse_compound_statement(equal).map(StatementKind::from),
            |parser, must_end, _| parser.parse_declaration(must_end).map(StatementKind::from),
            |parser, must_end, _| {
                parser
                    .parse_expression_statement(must_end)
                    .map(StatementKind::from)
            },
        ];

        ensure_sufficient_stack(|| {
            let checkpoint = self.cursor.checkpoint();
            let errors = self.diagnosis.error_count();

            for alternative in alternatives {
                if let Some(kind) = alternative(self, must_end_with_semicolon, equal_location) {
                    return Some(self.create(Statement { kind }));
                }
                // A committed alternative already explained the failure.
                if self.failed_with_errors(errors) {
                    break;
                }
            }

            self.cursor.restore(checkpoint);
            None
        })
    }

    /// `{ statement* }`
    fn parse_compound_statement(
        &mut self,
        equal_location: SourceLocation,
    ) -> Option<Node<CompoundStatement>> {
        let open = self.cursor.current();
        if open.lexeme != Punctuator::OpenBrace {
            return None;
        }
        let checkpoint = self.cursor.checkpoint();
        self.cursor.advance();

        let open_brace_location =
            if equal_location.has_line() && equal_location.line == open.location.line {
                equal_location
            } else {
                open.location
            };

        let mut statements = Vec::new();
        while !self.cursor.check(Punctuator::CloseBrace) {
            let errors = self.diagnosis.error_count();
            let Some(statement) = self.parse_statement(true, SourceLocation::INVALID) else {
                let location = self.cursor.location();
                self.follow_on(
                    errors,
                    message::INVALID_STATEMENT_IN_COMPOUND_STATEMENT,
                    location,
                );
                self.cursor.restore(checkpoint);
                return None;
            };
            statements.push(statement);
        }

        let close_brace_location = self.cursor.location();
        self.cursor.advance();

        Some(self.create(CompoundStatement {
            statements,
            open_brace_location,
            close_brace_location,
        }))
    }

    /// `expression ;?`
    fn parse_expression_statement(
        &mut self,
        must_end_with_semicolon: bool,
    ) -> Option<Node<ExpressionStatement>> {
        let checkpoint = self.cursor.checkpoint();
        let expression = self.parse_expression(true)?;

        let has_semicolon = self.cursor.eat(Punctuator::Semicolon).is_some();
        if !has_semicolon && must_end_with_semicolon {
            let location = self.cursor.location();
            self.error(message::MISSING_SEMICOLON_AT_END_OF_STATEMENT, location);
            self.cursor.restore(checkpoint);
            return None;
        }

        Some(self.create(ExpressionStatement {
            expression,
            has_semicolon,
        }))
    }

    /// `return expression? ;`
    fn parse_return_statement(&mut self) -> Option<Node<ReturnStatement>> {
        let checkpoint = self.cursor.checkpoint();
        let return_token = self.cursor.eat(Keyword::Return)?;

        if self.cursor.eat(Punctuator::Semicolon).is_some() {
            return Some(self.create(ReturnStatement {
                return_token,
                expression: None,
            }));
        }

        let errors = self.diagnosis.error_count();
        let Some(expression) = self.parse_expression(true) else {
            let location = self.cursor.location();
            self.follow_on(errors, message::INVALID_RETURN_EXPRESSION, location);
            self.cursor.restore(checkpoint);
            return None;
        };

        if self.cursor.eat(Punctuator::Semicolon).is_none() {
            let location = self.cursor.location();
            self.error(message::MISSING_SEMICOLON_AT_END_OF_STATEMENT, location);
            self.cursor.restore(checkpoint);
            return None;
        }

        Some(self.create(ReturnStatement {
            return_token,
            expression: Some(expression),
        }))
    }

    /// `if constexpr? expression compound-statement (else compound-statement)?`
    fn parse_selection_statement(&mut self) -> Option<Node<SelectionStatement>> {
        let checkpoint = self.cursor.checkpoint();
        let if_token = self.cursor.eat(Keyword::If)?;
        let constexpr_token = self.cursor.eat(Keyword::Constexpr);

        let parsed = self.parse_condition(Keyword::If).and_then(|condition| {
            let then_branch = self.parse_branch(Keyword::If)?;
            let else_branch = match self.cursor.eat(Keyword::Else) {
                Some(_) => Some(self.parse_branch(Keyword::Else)?),
                None => None,
            };
            Some((condition, then_branch, else_branch))
        });
        let Some((condition, then_branch, else_branch)) = parsed else {
            self.cursor.restore(checkpoint);
            return None;
        };

        Some(self.create(SelectionStatement {
            if_token,
            constexpr_token,
            condition,
            then_branch,
            else_branch,
        }))
    }

    /// `while expression compound-statement` or
    /// `do compound-statement while expression ;`
    fn parse_iteration_statement(&mut self) -> Option<Node<IterationStatement>> {
        let checkpoint = self.cursor.checkpoint();

        let parsed = if let Some(keyword) = self.cursor.eat(Keyword::While) {
            self.parse_condition(Keyword::While).and_then(|condition| {
                let body = self.parse_branch(Keyword::While)?;
                Some((IterationKind::While, keyword, condition, body))
            })
        } else {
            let keyword = self.cursor.eat(Keyword::Do)?;
            self.parse_do_while_tail().map(|(condition, body)| {
                (IterationKind::DoWhile, keyword, condition, body)
            })
        };

        let Some((kind, keyword, condition, body)) = parsed else {
            self.cursor.restore(checkpoint);
            return None;
        };

        Some(self.create(IterationStatement {
            kind,
            keyword,
            condition,
            body,
        }))
    }

    /// Everything after `do`.
    fn parse_do_while_tail(&mut self) -> Option<(Node<Expression>, Node<CompoundStatement>)> {
        let body = self.parse_branch(Keyword::Do)?;

        if self.cursor.eat(Keyword::While).is_none() {
            let location = self.cursor.location();
            self.error(message::MISSING_WHILE_AFTER_DO_BODY, location);
            return None;
        }
        let condition = self.parse_condition(Keyword::While)?;

        if self.cursor.eat(Punctuator::Semicolon).is_none() {
            let location = self.cursor.location();
            self.error(message::MISSING_SEMICOLON_AT_END_OF_STATEMENT, location);
            return None;
        }

        Some((condition, body))
    }

    /// The controlling expression after `keyword`.
    fn parse_condition(&mut self, keyword: Keyword) -> Option<Node<Expression>> {
        let errors = self.diagnosis.error_count();
        let condition = self.parse_expression(true);
        if condition.is_none() {
            let location = self.cursor.location();
            self.follow_on(
                errors,
                message::invalid_expression_after(keyword.as_str()),
                location,
            );
        }
        condition
    }

    /// The compound statement a control keyword requires.
    fn parse_branch(&mut self, keyword: Keyword) -> Option<Node<CompoundStatement>> {
        let errors = self.diagnosis.error_count();
        let branch = self.parse_compound_statement(SourceLocation::INVALID);
        if branch.is_none() {
            let location = self.cursor.location();
            self.follow_on(
                errors,
                message::missing_compound_statement_after(keyword),
                location,
            );
        }
        branch
    }
}
