//! Diagnosis collection for the cpps front end.
//!
//! Every stage (source classification, lexing, parsing) reports problems by
//! appending [`Entry`]s to a shared [`Diagnosis`]. Nothing aborts on
//! malformed input; callers inspect the diagnosis once the stage is done.
//!
//! ```text
//! let mut diagnosis = Diagnosis::new();
//! diagnosis.error(Entry::new("missing ';' at end of the declaration").at(location));
//! if diagnosis.has_errors() { ... }
//! ```
//!
//! Output formats live in [`emitter`].

mod diagnosis;
pub mod emitter;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use diagnosis::{Diagnosis, Entry, Severity};
