use std::fmt;

use cpps_ir::SourceLocation;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One reported problem.
///
/// `location` may name a line without a column when the problem concerns the
/// whole line.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Entry {
    pub message: String,
    pub fix_message: Option<String>,
    pub location: Option<SourceLocation>,
}

impl Entry {
    pub fn new(message: impl Into<String>) -> Self {
        Entry {
            message: message.into(),
            fix_message: None,
            location: None,
        }
    }

    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach a whole-line location.
    #[must_use]
    pub fn at_line(self, line: u32) -> Self {
        self.at(SourceLocation::line_only(line))
    }

    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix_message = Some(fix.into());
        self
    }
}

impl From<&str> for Entry {
    fn from(message: &str) -> Self {
        Entry::new(message)
    }
}

impl From<String> for Entry {
    fn from(message: String) -> Self {
        Entry::new(message)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location {
            write!(f, "{location}: ")?;
        }
        f.write_str(&self.message)?;
        if let Some(fix) = &self.fix_message {
            write!(f, " (fix: {fix})")?;
        }
        Ok(())
    }
}

/// Append-only error and warning lists, in report order.
#[derive(Clone, Default, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnosis {
    errors: Vec<Entry>,
    warnings: Vec<Entry>,
}

impl Diagnosis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, entry: impl Into<Entry>) {
        self.errors.push(entry.into());
    }

    pub fn warning(&mut self, entry: impl Into<Entry>) {
        self.warnings.push(entry.into());
    }

    #[inline]
    pub fn errors(&self) -> &[Entry] {
        &self.errors
    }

    #[inline]
    pub fn warnings(&self) -> &[Entry] {
        &self.warnings
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No errors and no warnings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Errors then warnings, each tagged with its severity.
    pub fn entries(&self) -> impl Iterator<Item = (Severity, &Entry)> {
        self.errors
            .iter()
            .map(|entry| (Severity::Error, entry))
            .chain(self.warnings.iter().map(|entry| (Severity::Warning, entry)))
    }
}
