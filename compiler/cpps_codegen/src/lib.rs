//! C++ output for mixed cpps sources.
//!
//! # Architecture
//!
//! ```text
//! Source + Tokens + TranslationUnit
//!        ↓
//!    Generator        (walks classified lines, block by block)
//!        ↓
//!   SourcePrinter     (writes text to any io::Write)
//! ```
//!
//! Plain C++, comments, imports and preprocessor lines are passed through
//! unchanged. Cpps blocks are located and matched with their declarations;
//! lowering those declarations to C++ is not done yet, so each block is
//! reported as a warning and left out of the output.

mod generator;
mod printer;

pub use generator::{message, CppsBlock, Generator, GeneratorOptions};
pub use printer::SourcePrinter;
