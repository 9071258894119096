#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use cpps_diagnostic::testing::{assert_no_diagnosis, assert_no_errors};
use pretty_assertions::assert_eq;

use LineKind::{Cpp, Cpps, Empty, Preprocessor};

struct Generated {
    output: String,
    blocks: Vec<CppsBlock>,
    diagnosis: Diagnosis,
}

fn generate_with(lines: &[(&'static str, LineKind)], options: GeneratorOptions) -> Generated {
    let source: Source<'static> = lines.iter().copied().collect();
    let mut diagnosis = Diagnosis::new();
    let tokens = cpps_lexer::lex(&mut diagnosis, &source);
    let unit = cpps_parse::parse(&mut diagnosis, &tokens);
    assert_no_errors(&diagnosis);

    let mut printer = SourcePrinter::new(Vec::new());
    let blocks = Generator::new(&mut diagnosis, &source, &tokens, &unit, &mut printer, options)
        .generate()
        .expect("in-memory output");
    Generated {
        output: String::from_utf8(printer.into_inner()).unwrap(),
        blocks,
        diagnosis,
    }
}

fn generate(lines: &[(&'static str, LineKind)]) -> Generated {
    generate_with(lines, GeneratorOptions::default())
}

const MIXED: &[(&str, LineKind)] = &[
    ("#include <iostream>", Preprocessor),
    ("", Empty),
    ("main: () -> int = {", Cpps),
    ("  return 0;", Cpps),
    ("}", Cpps),
    ("int y;", Cpp),
];

// === Passthrough ===

#[test]
fn test_plain_cpp_is_copied() {
    let generated = generate(&[
        ("#include <vector>", Preprocessor),
        ("int main() {", Cpp),
        ("}", Cpp),
    ]);
    assert_eq!(generated.output, "#include <vector>\nint main() {\n}\n");
    assert!(generated.blocks.is_empty());
    assert_no_diagnosis(&generated.diagnosis);
}

#[test]
fn test_empty_source() {
    let generated = generate(&[]);
    assert_eq!(generated.output, "");
    assert!(generated.blocks.is_empty());
}

// === Cpps blocks ===

#[test]
fn test_block_is_left_out_with_line_directive() {
    let generated = generate(MIXED);
    assert_eq!(generated.output, "#include <iostream>\n\n#line 6\nint y;\n");
}

#[test]
fn test_block_without_line_directives() {
    let generated = generate_with(MIXED, GeneratorOptions::plain());
    assert_eq!(generated.output, "#include <iostream>\n\nint y;\n");
}

#[test]
fn test_block_contents() {
    let generated = generate(MIXED);
    assert_eq!(
        generated.blocks,
        vec![CppsBlock {
            lines: 2..=4,
            declarations: 1,
            tokens: 12,
        }]
    );
}

#[test]
fn test_block_is_reported() {
    let generated = generate(MIXED);
    let warnings = generated.diagnosis.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, message::CPPS_BLOCK_NOT_LOWERED);
    assert_eq!(warnings[0].location, Some(SourceLocation::line_only(2)));
}

#[test]
fn test_leading_and_trailing_blocks() {
    let generated = generate(&[
        ("a: int = 1;", Cpps),
        ("b: int = 2;", Cpps),
        ("int c;", Cpp),
        ("d: int;", Cpps),
    ]);
    assert_eq!(generated.output, "#line 3\nint c;\n");
    let ranges: Vec<_> = generated.blocks.iter().map(|b| b.lines.clone()).collect();
    assert_eq!(ranges, vec![0..=1, 3..=3]);
    let declarations: Vec<_> = generated.blocks.iter().map(|b| b.declarations).collect();
    assert_eq!(declarations, vec![2, 1]);
    assert_eq!(generated.diagnosis.warning_count(), 2);
}

// === Output errors ===

struct ClosedOutput;

impl io::Write for ClosedOutput {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_is_returned() {
    let source: Source<'static> = [("int x;", Cpp)].into_iter().collect();
    let tokens = Tokens::default();
    let unit = TranslationUnit::new();
    let mut diagnosis = Diagnosis::new();
    let mut printer = SourcePrinter::new(ClosedOutput);

    let result = Generator::new(
        &mut diagnosis,
        &source,
        &tokens,
        &unit,
        &mut printer,
        GeneratorOptions::default(),
    )
    .generate();
    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
}
