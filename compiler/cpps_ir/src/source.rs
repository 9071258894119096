//! Classified source lines.
//!
//! A cpps translation unit is an ordinary C++ file with cpps declaration
//! blocks embedded in it. Classification tags every line so the lexer only
//! scans `Cpps` lines and the generator passes the rest through.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// Plain C++ code.
    Cpp,
    /// Part of a cpps declaration block.
    Cpps,
    Comment,
    Empty,
    Import,
    Preprocessor,
}

impl LineKind {
    pub const fn name(self) -> &'static str {
        match self {
            LineKind::Cpp => "cpp",
            LineKind::Cpps => "cpps",
            LineKind::Comment => "comment",
            LineKind::Empty => "empty",
            LineKind::Import => "import",
            LineKind::Preprocessor => "preprocessor",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Line<'src> {
    pub text: &'src str,
    pub kind: LineKind,
}

/// The classified lines of one input.
#[derive(Clone, Default, Debug)]
pub struct Source<'src> {
    lines: Vec<Line<'src>>,
    has_cpp: bool,
    has_cpps: bool,
}

impl<'src> Source<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &'src str, kind: LineKind) {
        self.has_cpp |= matches!(kind, LineKind::Cpp | LineKind::Preprocessor);
        self.has_cpps |= kind == LineKind::Cpps;
        self.lines.push(Line { text, kind });
    }

    /// Re-tag the run of comment and empty lines directly before the last
    /// line as cpps, so leading commentary travels with its block.
    pub fn cppsify(&mut self) {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return;
        };
        for line in self.lines[..last].iter_mut().rev() {
            if !matches!(line.kind, LineKind::Comment | LineKind::Empty) {
                break;
            }
            line.kind = LineKind::Cpps;
            self.has_cpps = true;
        }
    }

    /// Whether any line is plain C++ or a preprocessor directive.
    #[inline]
    pub fn has_cpp(&self) -> bool {
        self.has_cpp
    }

    #[inline]
    pub fn has_cpps(&self) -> bool {
        self.has_cpps
    }

    #[inline]
    pub fn lines(&self) -> &[Line<'src>] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of line `index`, empty when out of range.
    pub fn text(&self, index: usize) -> &'src str {
        self.lines.get(index).map_or("", |line| line.text)
    }
}

impl<'src> FromIterator<(&'src str, LineKind)> for Source<'src> {
    fn from_iter<I: IntoIterator<Item = (&'src str, LineKind)>>(iter: I) -> Self {
        let mut source = Source::new();
        for (text, kind) in iter {
            source.add(text, kind);
        }
        source
    }
}

/// All lines tagged as cpps.
impl<'src> From<&[&'src str]> for Source<'src> {
    fn from(lines: &[&'src str]) -> Self {
        lines.iter().map(|&text| (text, LineKind::Cpps)).collect()
    }
}
