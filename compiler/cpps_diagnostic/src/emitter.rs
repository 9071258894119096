//! Diagnosis emitters.
//!
//! - Terminal: human-readable, optionally coloured, with a source snippet
//! - JSON: machine-readable, one object per entry
//!
//! Each emitter implements [`DiagnosisEmitter`].

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::{Diagnosis, Entry, Severity};

/// Trait for writing diagnoses in some output format.
pub trait DiagnosisEmitter {
    fn emit(&mut self, severity: Severity, entry: &Entry);

    /// Emit every entry, errors first.
    fn emit_all(&mut self, diagnosis: &Diagnosis) {
        for (severity, entry) in diagnosis.entries() {
            self.emit(severity, entry);
        }
    }

    fn flush(&mut self);

    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Escape a string for JSON output.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}
