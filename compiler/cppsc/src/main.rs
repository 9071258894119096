//! cppsc: the cpps front end driver.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use cppsc::commands::{self, Streams};
use cppsc::DriverOptions;

fn main() -> ExitCode {
    cppsc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {
            print_usage();
            return ExitCode::FAILURE;
        }
        Some("help" | "--help" | "-h") => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Some("version" | "--version" | "-V") => {
            println!("cppsc {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Some(_) => {}
    }

    let options = match DriverOptions::from_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let stderr = io::stderr();
    let err_is_tty = stderr.is_terminal();
    let mut out = io::stdout().lock();
    let mut err = stderr.lock();
    let mut streams = Streams {
        out: &mut out,
        err: &mut err,
        err_is_tty,
    };

    match commands::run(&options, &mut streams) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            let _ = writeln!(streams.err, "error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("cppsc: the cpps front end");
    println!();
    println!("Usage: cppsc <command> <file.cpps> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>        Print the tokens and comments of every cpps line");
    println!("  parse <file>      Print every top-level declaration");
    println!("  check <file>      Report diagnoses only");
    println!("  generate <file>   Write C++ output");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!();
    println!("Options:");
    println!("  --json                   Write diagnoses as JSON");
    println!("  --color=<mode>           auto (default), always or never");
    println!("  --verbatim               Also report follow-on diagnoses");
    println!("  -o <path>                Output file for generate");
    println!("  --no-line-directives     Omit #line markers from generate output");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=<filter>        Enable tracing, e.g. RUST_LOG=cpps_parse=trace");
}
