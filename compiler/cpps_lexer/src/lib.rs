//! Lexer for the cpps front end.
//!
//! Turns the cpps lines of a classified [`Source`] into a [`Tokens`] stream.
//! Scanning is a hand-written dispatch on the current byte:
//!
//! - punctuator families resolve the longest match with at most two bytes of
//!   lookahead (`>>=` before `>>` before `>=` before `>`)
//! - character, number and string literals are scanned next, in that order
//! - a run of identifier characters is checked against the keyword-like
//!   tables, then falls back to an identifier
//!
//! Malformed input is reported to the [`Diagnosis`] and scanning always moves
//! forward by at least one character, so one bad token never stops the rest
//! of the line from being lexed. Block comments may span lines.

mod cursor;
mod keywords;

use cpps_diagnostic::{Diagnosis, Entry};
use cpps_ir::{
    Comment, CommentKind, Lexeme, LexemeKind, LineKind, Punctuator, Source, SourceLocation, Token,
    Tokens,
};
use tracing::{debug, trace};

use cursor::{
    is_binary_digit, is_identifier_continue, is_identifier_start, is_space, with_separator,
    LineCursor,
};

/// Diagnosis texts reported by the lexer.
pub mod message {
    pub const BINARY_LITERAL_INVALID_FORMAT: &str =
        "binary literal cannot be empty, 0b (or 0B) must be followed by binary digits";
    pub const CHARACTER_LITERAL_EMPTY: &str = "empty character constant";
    pub const CHARACTER_LITERAL_MISSING_CLOSING_QUOTE: &str =
        "character literal is missing its closing '";
    pub const HEXADECIMAL_LITERAL_INVALID_FORMAT: &str =
        "hexadecimal literal cannot be empty, 0x (or 0X) must be followed by hexadecimal digits";
    pub const STRING_LITERAL_MISSING_CLOSING_QUOTE: &str =
        "string literal is missing its closing \"";

    pub fn floating_literal_invalid_format(text: &str) -> String {
        format!(
            "floating point literal {text} fractional part cannot be empty \
             (if floating point was intended, use .0)"
        )
    }

    pub fn unexpected_character(c: char) -> String {
        format!("unexpected text '{c}'")
    }

    pub fn universal_character_name_invalid_format(u: char, digits: usize) -> String {
        format!(
            "invalid universal character name (\\{u} must be followed by {digits} hexadecimal digits)"
        )
    }
}

/// Lex every cpps line of `source`.
pub fn lex<'src>(diagnosis: &mut Diagnosis, source: &Source<'src>) -> Tokens<'src> {
    Lexer::new(diagnosis, source).lex()
}

/// Single-use scanner over one [`Source`].
pub struct Lexer<'a, 'src> {
    diagnosis: &'a mut Diagnosis,
    source: &'a Source<'src>,
    tokens: Vec<Token<'src>>,
    comments: Vec<Comment>,
    in_comment: bool,
    line: usize,
    cursor: LineCursor<'src>,
}

impl<'a, 'src> Lexer<'a, 'src> {
    pub fn new(diagnosis: &'a mut Diagnosis, source: &'a Source<'src>) -> Self {
        Lexer {
            diagnosis,
            source,
            tokens: Vec::new(),
            comments: Vec::new(),
            in_comment: false,
            line: 0,
            cursor: LineCursor::new("", 0),
        }
    }

    pub fn lex(mut self) -> Tokens<'src> {
        if !self.source.has_cpps() {
            return Tokens::default();
        }

        let source = self.source;
        for (index, line) in source.lines().iter().enumerate() {
            if line.kind != LineKind::Cpps {
                continue;
            }
            self.line = index;
            self.lex_line(line.text);
        }

        if self.in_comment {
            debug!(line = self.line, "block comment still open at end of input");
        }
        debug!(
            tokens = self.tokens.len(),
            comments = self.comments.len(),
            "lex"
        );
        Tokens::new(self.tokens, self.comments)
    }

    fn lex_line(&mut self, text: &'src str) {
        let start = if self.in_comment {
            0
        } else {
            LineCursor::new(text, 0).run_end(0, is_space)
        };
        self.cursor = LineCursor::new(text, start);
        let before = self.tokens.len();

        while !self.cursor.is_eol() {
            let consumed = if self.in_comment {
                self.lex_in_comment()
            } else {
                self.lex_out_comment()
            };
            self.cursor.advance(consumed.max(1));
        }

        trace!(line = self.line, tokens = self.tokens.len() - before, "line");
    }

    // === Locations and output ===

    fn location_at(&self, column: usize) -> SourceLocation {
        SourceLocation::from_indices(self.line, column)
    }

    fn location(&self) -> SourceLocation {
        self.location_at(self.cursor.pos())
    }

    fn error_at(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.diagnosis.error(Entry::new(message).at(location));
    }

    /// Emit a token covering `size` bytes from the cursor; returns `size`.
    fn add_token(&mut self, size: usize, lexeme: impl Into<Lexeme>) -> usize {
        let start = self.cursor.pos();
        let end = (start + size).min(self.cursor.len());
        let text = self.cursor.text().get(start..end).unwrap_or("");
        self.tokens
            .push(Token::new(lexeme.into(), self.location(), text));
        size
    }

    /// `long` when the next byte is `next`, otherwise `short`.
    fn add_either(&mut self, next: u8, long: Punctuator, short: Punctuator) -> usize {
        if self.cursor.peek(1) == next {
            self.add_token(2, long)
        } else {
            self.add_token(1, short)
        }
    }

    // === Comments ===

    fn lex_in_comment(&mut self) -> usize {
        let rest = self.cursor.rest();
        let Some(comment) = self.comments.last_mut() else {
            self.in_comment = false;
            return 0;
        };
        match rest.find("*/") {
            Some(index) => {
                comment.text.push_str(&rest[..index + 2]);
                comment.end = SourceLocation::from_indices(self.line, self.cursor.pos() + index + 1);
                self.in_comment = false;
                index + 2
            }
            None => {
                comment.text.push_str(rest);
                rest.len()
            }
        }
    }

    fn begin_block_comment(&mut self) -> usize {
        self.comments.push(Comment {
            text: "/*".to_string(),
            begin: self.location(),
            end: SourceLocation::INVALID,
            kind: CommentKind::Block,
        });
        self.in_comment = true;
        2
    }

    fn add_line_comment(&mut self) -> usize {
        let rest = self.cursor.rest();
        self.comments.push(Comment {
            text: rest.to_string(),
            begin: self.location(),
            end: self.location_at(self.cursor.len() - 1),
            kind: CommentKind::Line,
        });
        rest.len()
    }

    // === Dispatch ===

    fn lex_out_comment(&mut self) -> usize {
        use Punctuator as P;

        let peek1 = self.cursor.peek(1);
        let peek2 = self.cursor.peek(2);
        match self.cursor.current() {
            // &&= && &= &
            b'&' => match (peek1, peek2) {
                (b'&', b'=') => self.add_token(3, P::LogicalAndEqual),
                (b'&', _) => self.add_token(2, P::LogicalAnd),
                _ => self.add_either(b'=', P::AmpersandEqual, P::Ampersand),
            },
            b'=' => self.add_either(b'=', P::CompareEqual, P::Assignment),
            b'^' => self.add_either(b'=', P::CaretEqual, P::Caret),
            b'}' => self.add_token(1, P::CloseBrace),
            b']' => self.add_token(1, P::CloseBracket),
            b')' => self.add_token(1, P::CloseParenthesis),
            b':' => self.add_either(b':', P::DoubleColon, P::Colon),
            b',' => self.add_token(1, P::Comma),
            b'$' => self.add_token(1, P::Dollar),
            // ... .
            b'.' => {
                if peek1 == b'.' && peek2 == b'.' {
                    self.add_token(3, P::Ellipsis)
                } else {
                    self.add_token(1, P::Dot)
                }
            }
            // >>= >> >= >
            b'>' => match (peek1, peek2) {
                (b'>', b'=') => self.add_token(3, P::RightShiftEqual),
                (b'>', _) => self.add_token(2, P::RightShift),
                _ => self.add_either(b'=', P::GreaterEqual, P::Greater),
            },
            // <<= << <=> <= <
            b'<' => match (peek1, peek2) {
                (b'<', b'=') => self.add_token(3, P::LeftShiftEqual),
                (b'<', _) => self.add_token(2, P::LeftShift),
                (b'=', b'>') => self.add_token(3, P::Spaceship),
                (b'=', _) => self.add_token(2, P::LessEqual),
                _ => self.add_token(1, P::Less),
            },
            // -- -= -> -
            b'-' => match peek1 {
                b'-' => self.add_token(2, P::MinusMinus),
                b'=' => self.add_token(2, P::MinusEqual),
                b'>' => self.add_token(2, P::Arrow),
                _ => self.add_token(1, P::Minus),
            },
            b'%' => self.add_either(b'=', P::ModuloEqual, P::Modulo),
            b'*' => self.add_either(b'=', P::MultiplyEqual, P::Multiply),
            b'!' => self.add_either(b'=', P::CompareNotEqual, P::Not),
            b'{' => self.add_token(1, P::OpenBrace),
            b'[' => self.add_token(1, P::OpenBracket),
            b'(' => self.add_token(1, P::OpenParenthesis),
            // ||= || |= |
            b'|' => match (peek1, peek2) {
                (b'|', b'=') => self.add_token(3, P::LogicalOrEqual),
                (b'|', _) => self.add_token(2, P::LogicalOr),
                _ => self.add_either(b'=', P::PipeEqual, P::Pipe),
            },
            // ++ += +
            b'+' => {
                if peek1 == b'+' {
                    self.add_token(2, P::PlusPlus)
                } else {
                    self.add_either(b'=', P::PlusEqual, P::Plus)
                }
            }
            b'?' => self.add_token(1, P::QuestionMark),
            b';' => self.add_token(1, P::Semicolon),
            // /* // /= /
            b'/' => match peek1 {
                b'*' => self.begin_block_comment(),
                b'/' => self.add_line_comment(),
                _ => self.add_either(b'=', P::SlashEqual, P::Slash),
            },
            b'~' => self.add_either(b'=', P::TildeEqual, P::Tilde),
            _ => self.lex_other(),
        }
    }

    fn lex_other(&mut self) -> usize {
        if let Some(consumed) = self
            .lex_character_literal()
            .or_else(|| self.lex_number_literal())
            .or_else(|| self.lex_string_literal())
            .or_else(|| self.lex_word())
        {
            return consumed;
        }

        if is_space(self.cursor.current()) {
            return 1;
        }

        let c = self.cursor.current_char().unwrap_or('\u{fffd}');
        self.error_at(message::unexpected_character(c), self.location());
        c.len_utf8()
    }

    // === Numbers ===

    /// `0b`/`0x` prefixed, decimal and floating literals; `'` separates
    /// digits.
    fn lex_number_literal(&mut self) -> Option<usize> {
        let current = self.cursor.current();

        if current == b'0' {
            match self.cursor.peek(1) {
                b'b' | b'B' => {
                    return Some(self.lex_prefixed(
                        is_binary_digit,
                        LexemeKind::BinaryLiteral,
                        message::BINARY_LITERAL_INVALID_FORMAT,
                    ));
                }
                b'x' | b'X' => {
                    return Some(self.lex_prefixed(
                        |c| c.is_ascii_hexdigit(),
                        LexemeKind::HexadecimalLiteral,
                        message::HEXADECIMAL_LITERAL_INVALID_FORMAT,
                    ));
                }
                _ => {}
            }
        } else if !current.is_ascii_digit() {
            return None;
        }

        let digits = with_separator(|c| c.is_ascii_digit());
        let offset = self.cursor.run_end(1, &digits);
        if self.cursor.peek(offset) != b'.' {
            return Some(self.add_token(offset, LexemeKind::DecimalLiteral));
        }

        let offset = offset + 1;
        if !self.cursor.peek(offset).is_ascii_digit() {
            let start = self.cursor.pos();
            let text = self.cursor.text().get(start..start + offset).unwrap_or("");
            self.error_at(
                message::floating_literal_invalid_format(text),
                self.location(),
            );
            return Some(offset);
        }

        let end = self.cursor.run_end(offset, &digits);
        Some(self.add_token(end, LexemeKind::FloatingLiteral))
    }

    /// A two-character prefix followed by at least one digit of `digit`.
    /// Without a digit, reports `message` and skips only the `0`.
    fn lex_prefixed(&mut self, digit: fn(u8) -> bool, kind: LexemeKind, message: &str) -> usize {
        if digit(self.cursor.peek(2)) {
            let end = self.cursor.run_end(3, with_separator(digit));
            self.add_token(end, kind)
        } else {
            self.error_at(message, self.location());
            1
        }
    }

    // === Character and string literals ===

    /// Offset of the first character after an optional `u`/`u8` prefix and
    /// the opening `quote`.
    fn quote_begin_offset(&self, quote: u8) -> Option<usize> {
        match (self.cursor.current(), self.cursor.peek(1), self.cursor.peek(2)) {
            (c, _, _) if c == quote => Some(1),
            (b'u', c, _) if c == quote => Some(2),
            (b'u', b'8', c) if c == quote => Some(3),
            _ => None,
        }
    }

    fn lex_character_literal(&mut self) -> Option<usize> {
        let offset = self.quote_begin_offset(b'\'')?;

        if self.cursor.peek(offset) == b'\'' {
            self.error_at(message::CHARACTER_LITERAL_EMPTY, self.location());
            return Some(offset + 1);
        }

        let end = self.character_end(offset, b'\'').map(|index| index + 1);
        Some(self.add_quoted(end, b'\'', LexemeKind::CharacterLiteral))
    }

    fn lex_string_literal(&mut self) -> Option<usize> {
        let mut offset = self.quote_begin_offset(b'"')?;
        let start = self.cursor.pos();

        let end = loop {
            if self.cursor.peek(offset) == b'"' || start + offset >= self.cursor.len() {
                break Some(start + offset);
            }
            match self.character_end(offset, b'"') {
                Some(index) => offset = index - start + 1,
                None => break None,
            }
        };
        Some(self.add_quoted(end, b'"', LexemeKind::StringLiteral))
    }

    /// Emit a quoted literal closing at absolute index `end`. A missing or
    /// wrong closing quote is reported and the rest of the line becomes the
    /// literal.
    fn add_quoted(&mut self, end: Option<usize>, quote: u8, kind: LexemeKind) -> usize {
        let start = self.cursor.pos();
        let len = self.cursor.len();
        let closed = match end {
            Some(end) if end < len => {
                if self.cursor.text().as_bytes()[end] == quote {
                    Some(end)
                } else {
                    self.report_missing_quote(quote, self.location_at(end));
                    None
                }
            }
            _ => {
                let line = u32::try_from(self.line).unwrap_or(SourceLocation::INVALID_INDEX);
                self.report_missing_quote(quote, SourceLocation::line_only(line));
                None
            }
        };
        match closed {
            Some(end) => self.add_token(end - start + 1, kind),
            None => self.add_token(len - start, kind),
        }
    }

    fn report_missing_quote(&mut self, quote: u8, location: SourceLocation) {
        let message = if quote == b'\'' {
            message::CHARACTER_LITERAL_MISSING_CLOSING_QUOTE
        } else {
            message::STRING_LITERAL_MISSING_CLOSING_QUOTE
        };
        self.error_at(message, location);
    }

    /// Absolute index of the last byte of the literal element at `offset`: a
    /// universal character name, an escape sequence or a plain character.
    fn character_end(&mut self, offset: usize, quote: u8) -> Option<usize> {
        self.universal_character_end(offset)
            .or_else(|| self.escape_sequence_end(offset))
            .or_else(|| self.basic_character_end(offset, quote))
    }

    /// `\u` + 4 or `\U` + 8 hex digits. A wrong count is reported but the
    /// digits found are still consumed.
    fn universal_character_end(&mut self, offset: usize) -> Option<usize> {
        if self.cursor.peek(offset) != b'\\' {
            return None;
        }
        let u = self.cursor.peek(offset + 1);
        let required = match u {
            b'u' => 4,
            b'U' => 8,
            _ => return None,
        };

        let first = offset + 2;
        let mut count = 0;
        while count < required && self.cursor.peek(first + count).is_ascii_hexdigit() {
            count += 1;
        }

        if count != required {
            let location = self.location_at(self.cursor.pos() + offset);
            self.error_at(
                message::universal_character_name_invalid_format(char::from(u), required),
                location,
            );
        }

        Some(self.cursor.pos() + first + count - 1)
    }

    /// `\x` + hex digits, or `\` + any single character.
    fn escape_sequence_end(&self, offset: usize) -> Option<usize> {
        if self.cursor.peek(offset) != b'\\' {
            return None;
        }
        if self.cursor.peek(offset + 1) == b'x' {
            let end = self.cursor.run_end(offset + 2, |c| c.is_ascii_hexdigit());
            return (self.cursor.pos() + end < self.cursor.len())
                .then(|| self.cursor.pos() + end - 1);
        }
        Some(self.cursor.char_last_byte(self.cursor.pos() + offset + 1))
    }

    fn basic_character_end(&self, offset: usize, quote: u8) -> Option<usize> {
        let c = self.cursor.peek(offset);
        (c != quote && c != b'\\').then(|| self.cursor.char_last_byte(self.cursor.pos() + offset))
    }

    // === Words ===

    fn lex_word(&mut self) -> Option<usize> {
        if !is_identifier_start(self.cursor.current()) {
            return None;
        }
        let end = self.cursor.run_end(1, is_identifier_continue);
        let start = self.cursor.pos();
        let word = self.cursor.text().get(start..start + end).unwrap_or("");
        let lexeme = keywords::lookup(word).unwrap_or(Lexeme::IDENTIFIER);
        Some(self.add_token(end, lexeme))
    }
}
