use thiserror::Error;

/// A source that could not be classified.
///
/// Every variant is also reported to the [`Diagnosis`](cpps_diagnostic::Diagnosis)
/// with its location; this type only tells the caller to stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("source end not found: the cpps definition starting on line {} is never closed", .line + 1)]
    EndNotFound { line: usize },

    #[error("{count} source line(s) are not valid UTF-8")]
    Unreadable { count: usize },
}
