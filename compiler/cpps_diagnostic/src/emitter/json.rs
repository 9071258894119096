//! JSON emitter.
//!
//! Output is an array of objects shaped as
//! `{"severity", "message", "fixMessage", "location": {"line", "column"}}`.
//! Absent fix messages and locations are `null`; an invalid column is `null`.

use std::io::Write;

use cpps_ir::SourceLocation;

use super::{escape_json, DiagnosisEmitter};
use crate::{Entry, Severity};

pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "]");
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_location(&mut self, location: Option<SourceLocation>) {
        match location {
            Some(location) if location.has_line() => {
                let _ = write!(self.writer, "{{\"line\":{},\"column\":", location.line);
                if location.has_column() {
                    let _ = write!(self.writer, "{}}}", location.column);
                } else {
                    let _ = write!(self.writer, "null}}");
                }
            }
            _ => {
                let _ = write!(self.writer, "null");
            }
        }
    }
}

impl<W: Write> DiagnosisEmitter for JsonEmitter<W> {
    fn emit(&mut self, severity: Severity, entry: &Entry) {
        if !self.first {
            let _ = write!(self.writer, ",");
        }
        self.first = false;

        let _ = write!(
            self.writer,
            "{{\"severity\":\"{severity}\",\"message\":\"{}\",\"fixMessage\":",
            escape_json(&entry.message)
        );
        match &entry.fix_message {
            Some(fix) => {
                let _ = write!(self.writer, "\"{}\"", escape_json(fix));
            }
            None => {
                let _ = write!(self.writer, "null");
            }
        }
        let _ = write!(self.writer, ",\"location\":");
        self.write_location(entry.location);
        let _ = write!(self.writer, "}}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // Consumers count the array themselves.
    }
}

#[cfg(test)]
mod tests;
