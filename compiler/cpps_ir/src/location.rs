//! Line/column source locations.
//!
//! Both axes are zero-based. `u32::MAX` on either axis marks it invalid, which
//! lets diagnostics point at a whole line without a column.

use std::fmt;

/// A zero-based `(line, column)` position in the classified source.
///
/// Layout: 8 bytes. Ordering is line-major, so locations sort in reading
/// order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

crate::static_assert_size!(SourceLocation, 8);

impl SourceLocation {
    /// Sentinel for an invalid axis.
    pub const INVALID_INDEX: u32 = u32::MAX;

    /// A location with neither axis valid.
    pub const INVALID: SourceLocation = SourceLocation {
        line: Self::INVALID_INDEX,
        column: Self::INVALID_INDEX,
    };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        SourceLocation { line, column }
    }

    /// A location that names a line but no column.
    #[inline]
    pub const fn line_only(line: u32) -> Self {
        SourceLocation {
            line,
            column: Self::INVALID_INDEX,
        }
    }

    /// Build from `usize` indices, saturating at the invalid sentinel.
    #[inline]
    pub fn from_indices(line: usize, column: usize) -> Self {
        SourceLocation {
            line: u32::try_from(line).unwrap_or(Self::INVALID_INDEX),
            column: u32::try_from(column).unwrap_or(Self::INVALID_INDEX),
        }
    }

    #[inline]
    pub const fn has_line(self) -> bool {
        self.line != Self::INVALID_INDEX
    }

    #[inline]
    pub const fn has_column(self) -> bool {
        self.column != Self::INVALID_INDEX
    }

    /// Both axes are valid.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.has_line() && self.has_column()
    }

    /// Same line, column shifted right by `n`.
    #[inline]
    #[must_use]
    pub const fn shifted(self, n: u32) -> Self {
        SourceLocation {
            line: self.line,
            column: self.column.saturating_add(n),
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.has_line(), self.has_column()) {
            (true, true) => write!(f, "{}, {}", self.line, self.column),
            (true, false) => write!(f, "{}", self.line),
            _ => f.write_str("invalid"),
        }
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{self}}}")
    }
}

#[cfg(test)]
mod tests;
