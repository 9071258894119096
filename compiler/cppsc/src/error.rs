use std::io;
use std::path::PathBuf;

use cpps_source::ReadError;
use thiserror::Error;

/// Process-level failures. Malformed cpps is never one of these; it is
/// reported through the diagnosis instead.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Classify(#[from] ReadError),

    #[error("{0}")]
    Usage(String),
}

impl DriverError {
    /// A read failure with a message fit for the terminal.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DriverError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        DriverError::Usage(message.into())
    }

    /// Whether the usage text should be shown along with the error.
    pub fn is_usage(&self) -> bool {
        matches!(self, DriverError::Usage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_message_names_path() {
        let error = DriverError::read(
            "main.cpps",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(error.to_string(), "cannot read 'main.cpps': no such file");
        assert!(!error.is_usage());
    }

    #[test]
    fn test_classify_is_transparent() {
        let error = DriverError::from(ReadError::EndNotFound { line: 2 });
        assert_eq!(
            error.to_string(),
            "source end not found: the cpps definition starting on line 3 is never closed"
        );
    }

    #[test]
    fn test_usage() {
        let error = DriverError::usage("missing file");
        assert!(error.is_usage());
        assert_eq!(error.to_string(), "missing file");
    }
}
