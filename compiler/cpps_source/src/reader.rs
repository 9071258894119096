//! Line-by-line classifier.
//!
//! Each line is tried as, in order: empty, preprocessor directive, the start
//! of a cpps definition, an `import`, and finally comment-or-C++. A cpps
//! definition starts with `identifier :` outside any C++ brace scope and
//! runs until a `;` at brace depth zero or the `}` that returns to it.

use bitflags::bitflags;
use cpps_diagnostic::{Diagnosis, Entry};
use cpps_ir::{LineKind, Source, SourceLocation};
use tracing::{debug, trace};

use crate::ReadError;

/// Diagnosis texts reported while classifying.
pub mod message {
    pub const END_NOT_FOUND: &str = "source end not found";
    pub const UNEXPECTED_CLOSE_BRACE: &str = "unexpected }";
    pub const UNREADABLE_LINE: &str = "source line is unreadable";

    pub fn unexpected_char_after_cpps_definition(c: char) -> String {
        format!("unexpected char '{c}'- after cpps definition closing ; or }}")
    }
}

bitflags! {
    /// Lexical state carried from one line to the next.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    struct ReaderState: u8 {
        /// Inside a `/* */` comment.
        const IN_COMMENT = 1 << 0;
        /// Inside a `"` string literal of C++ code.
        const IN_STRING_LITERAL = 1 << 1;
    }
}

/// Classifies the lines of one input into a [`Source`].
pub struct SourceReader<'a, 'src> {
    diagnosis: &'a mut Diagnosis,
    lines: std::slice::Split<'src, u8, fn(&u8) -> bool>,
    source: Source<'src>,
    state: ReaderState,
    brace_depth: usize,
    /// Current line, untrimmed.
    raw: &'src str,
    /// Byte offset of the first non-space character of `raw`.
    indent: usize,
    unreadable: usize,
}

fn is_newline(byte: &u8) -> bool {
    *byte == b'\n'
}

fn is_space(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0x0B
}

/// Whether `line` opens with an identifier followed by a single `:`.
fn starts_with_identifier_colon(line: &str) -> bool {
    let bytes = line.as_bytes();
    match bytes.first() {
        Some(&c) if c.is_ascii_alphabetic() || c == b'_' => {}
        _ => return false,
    }
    let mut i = bytes
        .iter()
        .position(|&c| !(c.is_ascii_alphanumeric() || c == b'_'))
        .unwrap_or(bytes.len());
    while i < bytes.len() && is_space(bytes[i]) {
        i += 1;
    }
    bytes.get(i) == Some(&b':') && bytes.get(i + 1) != Some(&b':')
}

impl<'a, 'src> SourceReader<'a, 'src> {
    pub fn new(diagnosis: &'a mut Diagnosis, text: &'src str) -> Self {
        Self::from_bytes(diagnosis, text.as_bytes())
    }

    /// Read raw bytes; lines that are not UTF-8 are reported as unreadable.
    pub fn from_bytes(diagnosis: &'a mut Diagnosis, bytes: &'src [u8]) -> Self {
        // A trailing newline does not start another line.
        let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        let mut lines = bytes.split(is_newline as fn(&u8) -> bool);
        if bytes.is_empty() {
            lines.next();
        }
        SourceReader {
            diagnosis,
            lines,
            source: Source::new(),
            state: ReaderState::empty(),
            brace_depth: 0,
            raw: "",
            indent: 0,
            unreadable: 0,
        }
    }

    pub fn read(mut self) -> Result<Source<'src>, ReadError> {
        let mut open_definition = None;

        while self.next_line() {
            let _ = self.read_as_empty()
                || self.read_as_preprocessor()
                || self.read_as_cpps(&mut open_definition)
                || self.read_as_import()
                || self.read_as_comment_or_cpp();
        }

        debug!(
            lines = self.source.len(),
            cpp = self.source.has_cpp(),
            cpps = self.source.has_cpps(),
            "classified source"
        );

        if self.unreadable > 0 {
            return Err(ReadError::Unreadable {
                count: self.unreadable,
            });
        }
        if let Some(line) = open_definition {
            self.error(message::END_NOT_FOUND, SourceLocation::from_indices(line, 0));
            return Err(ReadError::EndNotFound { line });
        }
        Ok(self.source)
    }

    // === Lines ===

    /// Advance to the next readable line. Unreadable lines are reported and
    /// kept as empty C++ lines so line numbers stay aligned.
    fn next_line(&mut self) -> bool {
        loop {
            let Some(bytes) = self.lines.next() else {
                self.raw = "";
                self.indent = 0;
                return false;
            };
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
            if let Ok(text) = std::str::from_utf8(bytes) {
                self.raw = text;
                self.indent = text.bytes().position(|c| !is_space(c)).unwrap_or(text.len());
                return true;
            }
            let location = SourceLocation::from_indices(self.source.len(), 0);
            self.diagnosis
                .error(Entry::new(message::UNREADABLE_LINE).at(location));
            self.unreadable += 1;
            self.source.add("", LineKind::Cpp);
        }
    }

    /// Current line without its leading whitespace.
    fn line(&self) -> &'src str {
        self.raw.get(self.indent..).unwrap_or("")
    }

    fn add_current_line(&mut self, kind: LineKind) {
        trace!(line = self.source.len(), kind = kind.name(), "classify");
        self.source.add(self.raw, kind);
    }

    /// Location of byte `index` of the trimmed line `line`.
    fn location(&self, line: usize, index: usize) -> SourceLocation {
        SourceLocation::from_indices(line, self.indent + index)
    }

    fn error(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.diagnosis.error(Entry::new(message).at(location));
    }

    // === Classifiers ===

    fn read_as_empty(&mut self) -> bool {
        if !self.line().is_empty() {
            return false;
        }
        self.add_current_line(LineKind::Empty);
        true
    }

    fn read_as_preprocessor(&mut self) -> bool {
        if !self.line().starts_with('#') {
            return false;
        }
        self.add_current_line(LineKind::Preprocessor);
        while self.line().trim_end().ends_with('\\') && self.next_line() {
            self.add_current_line(LineKind::Preprocessor);
        }
        true
    }

    /// A cpps definition, possibly spanning lines. Sets `open_definition` to
    /// its first line when the input ends before the definition closes.
    fn read_as_cpps(&mut self, open_definition: &mut Option<usize>) -> bool {
        if self.state.contains(ReaderState::IN_COMMENT)
            || self.brace_depth != 0
            || !starts_with_identifier_colon(self.line())
        {
            return false;
        }

        let first = self.source.len();
        self.add_current_line(LineKind::Cpps);
        self.source.cppsify();

        loop {
            if self.scan_cpps_line() {
                return true;
            }
            if !self.next_line() {
                *open_definition = Some(first);
                return true;
            }
            self.add_current_line(LineKind::Cpps);
        }
    }

    /// Track braces and comments over the current cpps line. Returns whether
    /// the definition ended on it.
    fn scan_cpps_line(&mut self) -> bool {
        let line_index = self.source.len() - 1;
        let bytes = self.line().as_bytes();
        let mut found_end = false;
        let mut in_string = false;
        let mut previous = b' ';
        let mut i = 0;

        while i < bytes.len() {
            let current = bytes[i];

            if self.state.contains(ReaderState::IN_COMMENT) {
                if previous == b'*' && current == b'/' {
                    self.state.remove(ReaderState::IN_COMMENT);
                    previous = b' ';
                    i += 1;
                    continue;
                }
            } else if in_string {
                match current {
                    b'\\' => i += 1,
                    b'"' => in_string = false,
                    _ => {}
                }
            } else if found_end {
                let rest = &bytes[i..];
                if rest.starts_with(b"//") {
                    break;
                }
                let closed_comment = rest.starts_with(b"/*")
                    && rest.get(2..).is_some_and(|tail| {
                        tail.windows(2).any(|pair| pair == b"*/")
                    });
                if closed_comment {
                    self.state.insert(ReaderState::IN_COMMENT);
                    previous = b' ';
                    i += 2;
                    continue;
                }
                if !is_space(current) {
                    let c = self
                        .line()
                        .get(i..)
                        .and_then(|rest| rest.chars().next())
                        .unwrap_or(char::from(current));
                    self.error(
                        message::unexpected_char_after_cpps_definition(c),
                        self.location(line_index, i),
                    );
                    break;
                }
            } else {
                match current {
                    b'{' => self.brace_depth += 1,
                    b'}' => {
                        if self.brace_depth == 0 {
                            self.error(
                                message::UNEXPECTED_CLOSE_BRACE,
                                self.location(line_index, i),
                            );
                        } else {
                            self.brace_depth -= 1;
                            found_end = self.brace_depth == 0;
                        }
                    }
                    b';' => found_end = self.brace_depth == 0,
                    b'"' => in_string = true,
                    b'*' if previous == b'/' => {
                        self.state.insert(ReaderState::IN_COMMENT);
                        previous = b' ';
                        i += 1;
                        continue;
                    }
                    b'/' if previous == b'/' => break,
                    _ => {}
                }
            }

            previous = current;
            i += 1;
        }

        found_end
    }

    fn read_as_import(&mut self) -> bool {
        if !self.line().starts_with("import") {
            return false;
        }
        self.add_current_line(LineKind::Import);
        true
    }

    /// Anything else: a comment-only line or C++ code. C++ braces are counted
    /// so that `label:` inside a C++ body is not taken for cpps.
    fn read_as_comment_or_cpp(&mut self) -> bool {
        let line_index = self.source.len();
        let bytes = self.line().as_bytes();
        let mut i = 0;

        let at_comment_start = !self
            .state
            .intersects(ReaderState::IN_COMMENT | ReaderState::IN_STRING_LITERAL)
            && bytes.first() == Some(&b'/');
        if at_comment_start {
            match bytes.get(1) {
                Some(b'/') => {
                    self.add_current_line(LineKind::Comment);
                    return true;
                }
                Some(b'*') => match self.line()[2..].find("*/") {
                    Some(end) => i = end + 4,
                    None => {
                        self.state.insert(ReaderState::IN_COMMENT);
                        self.add_current_line(LineKind::Comment);
                        return true;
                    }
                },
                _ => {}
            }
        }

        let mut comment_only = true;
        let mut previous = b' ';
        while i < bytes.len() {
            let current = bytes[i];

            if self.state.contains(ReaderState::IN_COMMENT) {
                if previous == b'*' && current == b'/' {
                    self.state.remove(ReaderState::IN_COMMENT);
                    previous = b' ';
                    i += 1;
                    continue;
                }
            } else {
                comment_only = false;
                let in_string = self.state.contains(ReaderState::IN_STRING_LITERAL);
                let single_quoted = previous == b'\'' && bytes.get(i + 1) == Some(&b'\'');

                match current {
                    b'"' if previous != b'\\' && (in_string || previous != b'\'') => {
                        self.state.toggle(ReaderState::IN_STRING_LITERAL);
                    }
                    b'{' if !in_string && !single_quoted => self.brace_depth += 1,
                    b'}' if !in_string && !single_quoted => {
                        if self.brace_depth == 0 {
                            self.error(
                                message::UNEXPECTED_CLOSE_BRACE,
                                self.location(line_index, i),
                            );
                        } else {
                            self.brace_depth -= 1;
                        }
                    }
                    b'*' if !in_string && previous == b'/' => {
                        self.state.insert(ReaderState::IN_COMMENT);
                        previous = b' ';
                        i += 1;
                        continue;
                    }
                    b'/' if !in_string && previous == b'/' => break,
                    _ => {}
                }
            }

            previous = current;
            i += 1;
        }

        let kind = if comment_only {
            LineKind::Comment
        } else {
            LineKind::Cpp
        };
        self.add_current_line(kind);
        true
    }
}

#[cfg(test)]
mod tests;
