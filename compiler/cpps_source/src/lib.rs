//! Source classification for cpps.
//!
//! A cpps file is ordinary C++ with cpps declarations mixed in. Before
//! lexing, every line is tagged with a [`LineKind`](cpps_ir::LineKind) so the
//! lexer only sees cpps lines and the generator can pass the rest through.

mod error;
mod reader;

pub use error::ReadError;
pub use reader::{message, SourceReader};
