//! Recursive descent parser for cpps.
//!
//! Walks a [`Tokens`] stream and builds a [`TranslationUnit`] whose nodes
//! live in the unit's arena. Malformed input never aborts: productions return
//! `None`, and the first production to notice a problem reports it to the
//! shared [`Diagnosis`].

pub mod cst;
mod cursor;
mod grammar;
mod options;
mod precedence;

pub use cst::TranslationUnit;
pub use cursor::{Checkpoint, Cursor};
pub use options::ParseOptions;
pub use precedence::Precedence;

use cpps_diagnostic::{Diagnosis, Entry};
use cpps_ir::{Node, SourceLocation, Tokens};
use tracing::{debug, trace};

/// Diagnosis texts reported by the parser.
pub mod message {
    use cpps_ir::{Keyword, ParameterModifier};

    pub const DOT_MUST_BE_FOLLOWED_BY_MEMBER_NAME: &str =
        "'.' must be followed by a valid member name";
    pub const EXPECTED_DECLARATION: &str = "expected a declaration";
    pub const ILL_FORMED_INITIALIZER: &str = "ill-formed initializer";
    pub const INVALID_RETURN_EXPRESSION: &str = "invalid return expression";
    pub const INVALID_STATEMENT_IN_COMPOUND_STATEMENT: &str =
        "invalid statement in compound-statement";
    pub const INVALID_TEXT_IN_EXPRESSION_LIST: &str = "invalid text in expression list";
    pub const MISSING_CLOSE_PARENTHESIS_IN_PARAMETER_LIST: &str =
        "missing close parenthesis in parameter list";
    pub const MISSING_COMMA_BETWEEN_PARAMETER_DECLARATIONS: &str =
        "missing comma between parameter declarations";
    pub const MISSING_EQUAL_BEFORE_FUNCTION_BODY: &str = "missing = before function body";
    pub const MISSING_FUNCTION_RETURN_AFTER_ARROW: &str = "missing function return after ->";
    pub const MISSING_SEMICOLON_AT_END_OF_DECLARATION: &str =
        "missing ';' at end of the declaration";
    pub const MISSING_SEMICOLON_AT_END_OF_STATEMENT: &str =
        "missing ';' at the end of the statement";
    pub const MISSING_WHILE_AFTER_DO_BODY: &str = "missing 'while' after do body";
    pub const SUBSCRIPT_EXPRESSION_EMPTY: &str = "subscript expression [ ] must not be empty";
    pub const UNEXPECTED_TEXT_AFTER_EXPRESSION_LIST: &str =
        "unexpected text after expression-list";
    pub const UNEXPECTED_TEXT_AFTER_OPEN_PARENTHESIS: &str =
        "unexpected text - ( is not followed by an expression-list";
    pub const UNEXPECTED_TEXT_BRACKET_NOT_MATCHED: &str =
        "unexpected text - [ is not properly matched by ]";
    pub const UNEXPECTED_TEXT_PARENTHESIS_NOT_MATCHED: &str =
        "unexpected text - ( is not properly matched by )";
    pub const UNNAMED_DECLARATION_MUST_BE_FUNCTION: &str =
        "an unnamed declaration at expression scope must be a function";
    pub const UNNAMED_FUNCTION_CANNOT_RETURN_MULTIPLE_VALUES: &str =
        "an unnamed function at expression scope currently cannot return multiple values";

    pub fn invalid_expression_after(token: &str) -> String {
        format!("invalid expression after {token}")
    }

    pub fn invalid_return_modifier(modifier: ParameterModifier) -> String {
        format!("a return value cannot be '{modifier}'")
    }

    pub fn missing_compound_statement_after(keyword: Keyword) -> String {
        format!("missing compound-statement after {keyword}")
    }
}

/// Parser state.
pub struct Parser<'a, 'src> {
    cursor: Cursor<'a, 'src>,
    diagnosis: &'a mut Diagnosis,
    unit: TranslationUnit,
    options: ParseOptions,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub fn new(diagnosis: &'a mut Diagnosis, tokens: &'a Tokens<'src>, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            diagnosis,
            unit: TranslationUnit::new(),
            options,
        }
    }

    /// Parse top-level declarations until the tokens run out or one fails.
    pub fn parse(mut self) -> TranslationUnit {
        while !self.cursor.is_at_end() {
            let errors = self.diagnosis.error_count();
            trace!(pos = self.cursor.position(), "parse_declaration");
            match self.parse_declaration(true) {
                Some(declaration) => self.unit.declarations.push(declaration),
                None => {
                    let location = self.cursor.location();
                    self.follow_on(errors, message::EXPECTED_DECLARATION, location);
                    break;
                }
            }
        }

        debug!(
            declarations = self.unit.len(),
            errors = self.diagnosis.error_count(),
            "parse"
        );
        self.unit
    }

    // === Arena ===

    #[inline]
    fn create<T: 'static>(&mut self, value: T) -> Node<T> {
        Node::create(&mut self.unit.arena, value)
    }

    #[inline]
    fn node<T: 'static>(&self, node: &Node<T>) -> &T {
        self.unit.get(node)
    }

    #[inline]
    fn node_mut<T: 'static>(&mut self, node: &Node<T>) -> &mut T {
        self.unit.arena.get_mut(node)
    }

    // === Diagnostics ===

    fn error(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.diagnosis.error(Entry::new(message).at(location));
    }

    /// Report a wrapping production's failure, unless filtering is on and an
    /// inner production already reported something since `errors_before`.
    fn follow_on(
        &mut self,
        errors_before: usize,
        message: impl Into<String>,
        location: SourceLocation,
    ) {
        if !self.failed_with_errors(errors_before) {
            self.error(message, location);
        }
    }

    /// Whether an error was reported since `errors_before` and follow-on
    /// diagnoses are filtered.
    #[inline]
    fn failed_with_errors(&self, errors_before: usize) -> bool {
        self.options.filter_follow_on && self.diagnosis.error_count() > errors_before
    }
}

/// Parse `tokens` with the default options.
pub fn parse(diagnosis: &mut Diagnosis, tokens: &Tokens<'_>) -> TranslationUnit {
    parse_with_options(diagnosis, tokens, ParseOptions::default())
}

pub fn parse_with_options(
    diagnosis: &mut Diagnosis,
    tokens: &Tokens<'_>,
    options: ParseOptions,
) -> TranslationUnit {
    Parser::new(diagnosis, tokens, options).parse()
}

#[cfg(test)]
mod tests;
