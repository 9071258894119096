//! Assertions over a [`Diagnosis`] for use in tests across the workspace.

use crate::{Diagnosis, Entry};

fn listing(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| format!("  {entry}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[track_caller]
pub fn assert_no_errors(diagnosis: &Diagnosis) {
    assert!(
        !diagnosis.has_errors(),
        "expected no errors, got {}:\n{}",
        diagnosis.error_count(),
        listing(diagnosis.errors())
    );
}

#[track_caller]
pub fn assert_no_warnings(diagnosis: &Diagnosis) {
    assert!(
        diagnosis.warnings().is_empty(),
        "expected no warnings, got {}:\n{}",
        diagnosis.warning_count(),
        listing(diagnosis.warnings())
    );
}

#[track_caller]
pub fn assert_no_diagnosis(diagnosis: &Diagnosis) {
    assert_no_errors(diagnosis);
    assert_no_warnings(diagnosis);
}

/// Error messages in report order.
pub fn error_messages(diagnosis: &Diagnosis) -> Vec<&str> {
    diagnosis
        .errors()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_diagnosis_passes() {
        assert_no_diagnosis(&Diagnosis::new());
    }

    #[test]
    #[should_panic(expected = "expected no errors, got 1")]
    fn test_error_fails() {
        let mut diagnosis = Diagnosis::new();
        diagnosis.error("unexpected }");
        assert_no_errors(&diagnosis);
    }

    #[test]
    fn test_error_messages() {
        let mut diagnosis = Diagnosis::new();
        diagnosis.error("a");
        diagnosis.error("b");
        assert_eq!(error_messages(&diagnosis), vec!["a", "b"]);
    }
}
