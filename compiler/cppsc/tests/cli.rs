//! End-to-end runs of the driver commands over in-memory and on-disk inputs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use cpps_diagnostic::emitter::ColorMode;
use cppsc::commands::{run, run_on, Outcome, Streams};
use cppsc::{Command, DriverError, DriverOptions, OutputFormat};
use pretty_assertions::assert_eq;

struct Run {
    result: Result<Outcome, DriverError>,
    out: String,
    err: String,
}

fn options(command: Command) -> DriverOptions {
    let mut options = DriverOptions::new(command, "main.cpps");
    options.color = ColorMode::Never;
    options
}

fn run_text(options: &DriverOptions, text: &str) -> Run {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = run_on(
        options,
        text.as_bytes(),
        &mut Streams {
            out: &mut out,
            err: &mut err,
            err_is_tty: false,
        },
    );
    Run {
        result,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

const PROGRAM: &str = "#include <cstdio>\nmain: () -> int = {\n  return 0;\n}\nint y;\n";

// === check ===

#[test]
fn test_check_clean() {
    let run = run_text(&options(Command::Check), PROGRAM);
    assert_eq!(run.result.unwrap(), Outcome::default());
    assert_eq!(run.out, "");
    assert_eq!(run.err, "");
}

#[test]
fn test_check_reports_with_snippet() {
    let run = run_text(&options(Command::Check), "my_var: int = a[];\n");
    let outcome = run.result.unwrap();
    assert_eq!(outcome.errors, 1);
    assert!(!outcome.is_success());

    let mut lines = run.err.lines();
    assert_eq!(
        lines.next(),
        Some("main.cpps:1:16: error: subscript expression [ ] must not be empty")
    );
    assert_eq!(lines.next(), Some("   1 | my_var: int = a[];"));
    assert_eq!(lines.next(), Some(format!("     | {}^", " ".repeat(15)).as_str()));
    assert_eq!(lines.next(), Some("1 error emitted"));
}

#[test]
fn test_check_json() {
    let mut options = options(Command::Check);
    options.format = OutputFormat::Json;
    let run = run_text(&options, "x: int = ;\n");
    assert_eq!(run.result.unwrap().errors, 1);
    assert_eq!(
        run.err,
        "[{\"severity\":\"error\",\"message\":\"ill-formed initializer\",\
         \"fixMessage\":null,\"location\":{\"line\":0,\"column\":7}}]\n"
    );
}

#[test]
fn test_verbatim_reports_more() {
    let text = "x: int = a +;\n";
    let filtered = run_text(&options(Command::Check), text).result.unwrap();

    let mut verbatim = options(Command::Check);
    verbatim.parse = cpps_parse::ParseOptions::verbatim();
    let verbatim = run_text(&verbatim, text).result.unwrap();

    assert_eq!(filtered.errors, 1);
    assert_eq!(verbatim.errors, 3);
}

#[test]
fn test_unclosed_definition_stops_early() {
    let run = run_text(&options(Command::Check), "f: () = {\n  g();\n");
    assert!(matches!(run.result, Err(DriverError::Classify(_))));
    assert!(run.err.contains("error: source end not found"));
}

// === lex and parse ===

#[test]
fn test_lex_listing() {
    let run = run_text(&options(Command::Lex), "x: int = 1;\n");
    assert_eq!(
        run.out,
        "6 tokens, 0 comments\n\
         line 1:\n  \
         1:1 Identifier x\n  \
         1:2 Punctuator :\n  \
         1:4 Keyword int\n  \
         1:8 Punctuator =\n  \
         1:10 DecimalLiteral 1\n  \
         1:11 Punctuator ;\n"
    );
}

#[test]
fn test_lex_skips_cpp_lines() {
    let run = run_text(&options(Command::Lex), PROGRAM);
    assert!(run.out.starts_with("12 tokens, 0 comments\nline 2:\n"));
    assert!(!run.out.contains("line 1:"));
    assert!(!run.out.contains("line 5:"));
}

#[test]
fn test_parse_listing() {
    let run = run_text(&options(Command::Parse), "f: () = {}\nx: int;\n");
    assert_eq!(
        run.out,
        "2 declarations\n  f: function 1:1-1:10\n  x: object 2:1-2:7\n"
    );
    assert!(run.result.unwrap().is_success());
}

// === generate ===

#[test]
fn test_generate_to_output_stream() {
    let run = run_text(&options(Command::Generate), PROGRAM);
    let outcome = run.result.unwrap();
    assert_eq!(outcome, Outcome { errors: 0, warnings: 1 });
    assert_eq!(run.out, "#include <cstdio>\n#line 5\nint y;\n");
    assert!(run.err.contains("main.cpps:2: warning: cpps declarations are not lowered"));
}

#[test]
fn test_generate_skips_inputs_with_errors() {
    let run = run_text(&options(Command::Generate), "int a;\nx: int = a[];\n");
    assert_eq!(run.result.unwrap().errors, 1);
    assert_eq!(run.out, "");
}

#[test]
fn test_generate_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("main.cpp");
    let mut options = options(Command::Generate);
    options.output = Some(output.clone());
    options.generate = cpps_codegen::GeneratorOptions::plain();

    let run = run_text(&options, PROGRAM);
    assert!(run.result.unwrap().is_success());
    assert_eq!(run.out, "");
    assert_eq!(
        std::fs::read_to_string(output).unwrap(),
        "#include <cstdio>\nint y;\n"
    );
}

// === files ===

#[test]
fn test_run_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.cpps");
    std::fs::write(&path, "x: int = 1;\n").unwrap();

    let options = DriverOptions::new(Command::Check, &path);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = run(
        &options,
        &mut Streams {
            out: &mut out,
            err: &mut err,
            err_is_tty: false,
        },
    )
    .unwrap();
    assert!(outcome.is_success());
}

#[test]
fn test_run_missing_file() {
    let options = DriverOptions::new(Command::Check, PathBuf::from("does/not/exist.cpps"));
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = run(
        &options,
        &mut Streams {
            out: &mut out,
            err: &mut err,
            err_is_tty: false,
        },
    );
    let Err(DriverError::Read { path, .. }) = result else {
        panic!("expected a read error, got {result:?}");
    };
    assert_eq!(path, PathBuf::from("does/not/exist.cpps"));
}
