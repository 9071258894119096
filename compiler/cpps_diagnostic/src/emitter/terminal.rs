//! Terminal emitter.
//!
//! ```text
//! main.cpps:1:16: error: subscript expression [ ] must not be empty
//!    1 | my_var: int = a[];
//!      |                ^
//! ```

use std::io::{self, Write};

use super::DiagnosisEmitter;
use crate::{Entry, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color=` flag.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Human-readable emitter.
///
/// Locations print one-based, the way editors count. With source lines
/// attached, each located entry is followed by the offending line and a
/// caret under the column.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    path: Option<String>,
    lines: Vec<&'src str>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            path: None,
            lines: Vec::new(),
        }
    }

    /// Prefix every located entry with `path`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Source lines used for snippets.
    #[must_use]
    pub fn with_source(mut self, lines: impl IntoIterator<Item = &'src str>) -> Self {
        self.lines = lines.into_iter().collect();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, entry: &Entry) {
        let mut prefix = self.path.clone().unwrap_or_default();
        if let Some(location) = entry.location.filter(|l| l.has_line()) {
            if !prefix.is_empty() {
                prefix.push(':');
            }
            prefix.push_str(&(u64::from(location.line) + 1).to_string());
            if location.has_column() {
                prefix.push(':');
                prefix.push_str(&(u64::from(location.column) + 1).to_string());
            }
        }
        if !prefix.is_empty() {
            self.write_colored(&prefix, colors::BOLD);
            let _ = write!(self.writer, ": ");
        }
    }

    fn write_snippet(&mut self, entry: &Entry) {
        let Some(location) = entry.location.filter(|l| l.has_line()) else {
            return;
        };
        let Some(text) = self.lines.get(location.line as usize).copied() else {
            return;
        };
        let number = (u64::from(location.line) + 1).to_string();
        let gutter = " ".repeat(number.len());

        self.write_colored(&format!("{number:>4} | "), colors::GUTTER);
        let _ = writeln!(self.writer, "{text}");
        if location.has_column() {
            self.write_colored(&format!("{gutter:>4} | "), colors::GUTTER);
            let pad = " ".repeat(location.column as usize);
            let _ = write!(self.writer, "{pad}");
            self.write_colored("^", colors::ERROR);
            let _ = writeln!(self.writer);
        }
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosisEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, severity: Severity, entry: &Entry) {
        self.write_header(entry);
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&severity.to_string(), color);
        let _ = writeln!(self.writer, ": {}", entry.message);

        self.write_snippet(entry);

        if let Some(fix) = &entry.fix_message {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {fix}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        let mut parts = Vec::new();
        if error_count > 0 {
            parts.push(format!("{error_count} error{}", plural_s(error_count)));
        }
        if warning_count > 0 {
            parts.push(format!("{warning_count} warning{}", plural_s(warning_count)));
        }
        let _ = writeln!(self.writer, "{} emitted", parts.join(" and "));
    }
}
