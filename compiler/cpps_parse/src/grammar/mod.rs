//! Grammar productions.
//!
//! Each module extends [`Parser`](crate::Parser) with the productions for one
//! family of constructs:
//!
//! - [`declaration`]: named and unnamed declarations, function signatures,
//!   parameter lists
//! - [`expression`]: the precedence-climbing binary loop, prefix, primary and
//!   postfix forms, expression lists
//! - [`identifier`]: unqualified and qualified identifiers
//! - [`statement`]: compound, expression, return, selection and iteration
//!   statements
//!
//! Every production returns `None` on failure and leaves the cursor where it
//! started. Whether a failure was also reported depends on the production:
//! trial alternatives fail silently, committed ones report.

mod declaration;
mod expression;
mod identifier;
mod statement;
