#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use cpps_diagnostic::testing::{assert_no_diagnosis, error_messages};
use pretty_assertions::assert_eq;

fn kinds(source: &Source<'_>) -> Vec<LineKind> {
    source.lines().iter().map(|line| line.kind).collect()
}

fn read_ok(text: &str) -> Source<'_> {
    let mut diagnosis = Diagnosis::new();
    let source = SourceReader::new(&mut diagnosis, text).read().unwrap();
    assert_no_diagnosis(&diagnosis);
    source
}

// === Simple lines ===

#[test]
fn test_empty_input() {
    let source = read_ok("");
    assert!(source.is_empty());
    assert!(!source.has_cpp());
    assert!(!source.has_cpps());
}

#[test]
fn test_trailing_newline_is_not_a_line() {
    assert_eq!(read_ok("int x;\n").len(), 1);
    assert_eq!(read_ok("int x;\n\n").len(), 2);
}

#[test]
fn test_cpp_lines() {
    let source = read_ok("#include <vector>\n\nint main() {\n    return 0;\n}");
    assert_eq!(
        kinds(&source),
        [
            LineKind::Preprocessor,
            LineKind::Empty,
            LineKind::Cpp,
            LineKind::Cpp,
            LineKind::Cpp,
        ]
    );
    assert!(source.has_cpp());
    assert!(!source.has_cpps());
}

#[test]
fn test_preprocessor_continuation() {
    let source = read_ok("#define TWICE(x) \\\n    ((x) + \\  \n     (x))\nint y;");
    assert_eq!(
        kinds(&source),
        [
            LineKind::Preprocessor,
            LineKind::Preprocessor,
            LineKind::Preprocessor,
            LineKind::Cpp,
        ]
    );
}

#[test]
fn test_import_and_comments() {
    let source = read_ok("import std;\n// note\n/* block */\n  /* open\n still */");
    assert_eq!(
        kinds(&source),
        [
            LineKind::Import,
            LineKind::Comment,
            LineKind::Comment,
            LineKind::Comment,
            LineKind::Comment,
        ]
    );
}

#[test]
fn test_code_after_block_comment_is_cpp() {
    let source = read_ok("/* note */ int x;");
    assert_eq!(kinds(&source), [LineKind::Cpp]);
}

#[test]
fn test_crlf_line_endings() {
    let source = read_ok("x: int;\r\nint y;\r\n");
    assert_eq!(source.text(0), "x: int;");
    assert_eq!(kinds(&source), [LineKind::Cpps, LineKind::Cpp]);
}

// === Cpps definitions ===

#[test]
fn test_single_line_definition() {
    let source = read_ok("my_var: int;");
    assert_eq!(kinds(&source), [LineKind::Cpps]);
    assert!(source.has_cpps());
}

#[test]
fn test_multi_line_definition() {
    let source = read_ok("main: () -> int = {\n    x: int = 1;\n\n    return x;\n}\nint after;");
    assert_eq!(
        kinds(&source),
        [
            LineKind::Cpps,
            LineKind::Cpps,
            LineKind::Cpps,
            LineKind::Cpps,
            LineKind::Cpps,
            LineKind::Cpp,
        ]
    );
}

#[test]
fn test_leading_comments_join_definition() {
    let source = read_ok("int a;\n// about f\n\nf: () = { }\n");
    assert_eq!(
        kinds(&source),
        [LineKind::Cpp, LineKind::Cpps, LineKind::Cpps, LineKind::Cpps]
    );
}

#[test]
fn test_scope_resolution_is_not_a_definition() {
    let source = read_ok("std::vector<int> v;");
    assert_eq!(kinds(&source), [LineKind::Cpp]);
}

#[test]
fn test_label_inside_cpp_body_is_not_a_definition() {
    let source = read_ok("void f() {\nlabel: return;\n}");
    assert_eq!(kinds(&source), [LineKind::Cpp, LineKind::Cpp, LineKind::Cpp]);
}

#[test]
fn test_braces_in_cpp_strings_do_not_count() {
    let source = read_ok("const char* s = \"{\";\nchar c = '{';\nx: int;");
    assert_eq!(kinds(&source), [LineKind::Cpp, LineKind::Cpp, LineKind::Cpps]);
}

#[test]
fn test_semicolon_inside_cpps_string() {
    let source = read_ok("s: std::string = \"a;b\";");
    assert_eq!(kinds(&source), [LineKind::Cpps]);
}

#[test]
fn test_definition_with_comments() {
    let source = read_ok("f: () = { // opens\n    /* ; } */\n}\n");
    assert_eq!(kinds(&source), [LineKind::Cpps, LineKind::Cpps, LineKind::Cpps]);
}

#[test]
fn test_trailing_comment_after_definition() {
    let source = read_ok("x: int; // counter\ny: int; /* closed */");
    assert_eq!(kinds(&source), [LineKind::Cpps, LineKind::Cpps]);
}

// === Diagnoses ===

#[test]
fn test_unexpected_text_after_definition() {
    let mut diagnosis = Diagnosis::new();
    let source = SourceReader::new(&mut diagnosis, "  x: int; y").read().unwrap();

    assert_eq!(kinds(&source), [LineKind::Cpps]);
    assert_eq!(
        error_messages(&diagnosis),
        [message::unexpected_char_after_cpps_definition('y')]
    );
    assert_eq!(diagnosis.errors()[0].location, Some(SourceLocation::new(0, 10)));
}

#[test]
fn test_unexpected_close_brace() {
    let mut diagnosis = Diagnosis::new();
    let source = SourceReader::new(&mut diagnosis, "int x; }").read().unwrap();

    assert_eq!(kinds(&source), [LineKind::Cpp]);
    assert_eq!(error_messages(&diagnosis), [message::UNEXPECTED_CLOSE_BRACE]);
    assert_eq!(diagnosis.errors()[0].location, Some(SourceLocation::new(0, 7)));
}

#[test]
fn test_end_not_found() {
    let mut diagnosis = Diagnosis::new();
    let result = SourceReader::new(&mut diagnosis, "int a;\nf: () = {\n    x: int;").read();

    assert_eq!(result.unwrap_err(), ReadError::EndNotFound { line: 1 });
    assert_eq!(error_messages(&diagnosis), [message::END_NOT_FOUND]);
    assert_eq!(diagnosis.errors()[0].location, Some(SourceLocation::new(1, 0)));
}

#[test]
fn test_unreadable_line() {
    let mut diagnosis = Diagnosis::new();
    let bytes: &[u8] = b"x: int;\n\xff\xfe bad\ny: int;\n";
    let result = SourceReader::from_bytes(&mut diagnosis, bytes).read();

    assert_eq!(result.unwrap_err(), ReadError::Unreadable { count: 1 });
    assert_eq!(error_messages(&diagnosis), [message::UNREADABLE_LINE]);
    assert_eq!(diagnosis.errors()[0].location, Some(SourceLocation::new(1, 0)));
}

#[test]
fn test_error_display() {
    assert_eq!(
        ReadError::EndNotFound { line: 4 }.to_string(),
        "source end not found: the cpps definition starting on line 5 is never closed"
    );
}
