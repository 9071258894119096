#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn parse(args: &[&str]) -> Result<DriverOptions, DriverError> {
    DriverOptions::from_args(args.iter().copied())
}

fn usage(args: &[&str]) -> String {
    let error = parse(args).expect_err("usage error");
    assert!(error.is_usage());
    error.to_string()
}

// === Commands ===

#[test]
fn test_commands() {
    for command in [Command::Lex, Command::Parse, Command::Check, Command::Generate] {
        let options = parse(&[command.name(), "main.cpps"]).unwrap();
        assert_eq!(options.command, command);
        assert_eq!(options.path, PathBuf::from("main.cpps"));
    }
}

#[test]
fn test_defaults() {
    let options = parse(&["check", "main.cpps"]).unwrap();
    assert_eq!(options, DriverOptions::new(Command::Check, "main.cpps"));
    assert!(options.parse.filter_follow_on);
    assert!(options.generate.emit_line_directives);
}

// === Flags ===

#[test]
fn test_flags_in_any_position() {
    let options = parse(&["check", "--json", "main.cpps", "--verbatim", "--color=never"]).unwrap();
    assert_eq!(options.format, OutputFormat::Json);
    assert_eq!(options.parse, ParseOptions::verbatim());
    assert_eq!(options.color, ColorMode::Never);
}

#[test]
fn test_generate_output() {
    let options = parse(&["generate", "main.cpps", "-o", "main.cpp", "--no-line-directives"]).unwrap();
    assert_eq!(options.output, Some(PathBuf::from("main.cpp")));
    assert_eq!(options.generate, GeneratorOptions::plain());
}

// === Usage errors ===

#[test]
fn test_usage_errors() {
    assert_eq!(usage(&[]), "missing command");
    assert_eq!(usage(&["build", "main.cpps"]), "unknown command 'build'");
    assert_eq!(usage(&["check"]), "missing file: cppsc check <file.cpps>");
    assert_eq!(usage(&["check", "a.cpps", "b.cpps"]), "unexpected argument 'b.cpps'");
    assert_eq!(usage(&["check", "--fast", "a.cpps"]), "unknown option '--fast'");
    assert_eq!(usage(&["generate", "a.cpps", "-o"]), "-o needs a path");
    assert_eq!(
        usage(&["check", "a.cpps", "-o", "a.cpp"]),
        "-o is only valid with generate, not check"
    );
    assert_eq!(
        usage(&["check", "a.cpps", "--color=red"]),
        "invalid --color value 'red' (expected auto, always or never)"
    );
}
