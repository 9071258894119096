//! Command handlers for the cppsc CLI.
//!
//! Every command runs the whole front end, prints its own output to the
//! output stream, then writes the diagnosis to the diagnostics stream.
//! `lex` and `parse` print whatever was recovered even when errors were
//! reported; `generate` writes nothing for an input with errors.

mod debug;
mod generate;

use std::io::Write;

use cpps_diagnostic::emitter::{DiagnosisEmitter, JsonEmitter, TerminalEmitter};

use crate::{read_source, Command, DriverError, DriverOptions, Frontend, OutputFormat};

/// Where a command writes.
pub struct Streams<'a> {
    /// Command output: token and declaration listings, generated C++.
    pub out: &'a mut dyn Write,
    /// Diagnoses.
    pub err: &'a mut dyn Write,
    /// Whether `err` is a terminal, for `--color=auto`.
    pub err_is_tty: bool,
}

/// Counts from a finished command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub errors: usize,
    pub warnings: usize,
}

impl Outcome {
    #[inline]
    pub fn is_success(self) -> bool {
        self.errors == 0
    }
}

/// Read `options.path` and run the command on it.
pub fn run(options: &DriverOptions, streams: &mut Streams<'_>) -> Result<Outcome, DriverError> {
    let bytes = read_source(&options.path)?;
    run_on(options, &bytes, streams)
}

/// Run the command on in-memory file contents.
pub fn run_on(
    options: &DriverOptions,
    bytes: &[u8],
    streams: &mut Streams<'_>,
) -> Result<Outcome, DriverError> {
    let mut frontend = Frontend::run(bytes, options.parse);

    match options.command {
        Command::Lex => debug::print_tokens(&frontend, streams.out)?,
        Command::Parse => debug::print_declarations(&frontend, streams.out)?,
        Command::Check => {}
        Command::Generate => generate::generate(options, &mut frontend, streams.out)?,
    }

    emit_diagnosis(options, &frontend, streams);

    if let Some(error) = frontend.read_error.take() {
        return Err(error.into());
    }
    Ok(Outcome {
        errors: frontend.diagnosis.error_count(),
        warnings: frontend.diagnosis.warning_count(),
    })
}

fn emit_diagnosis(options: &DriverOptions, frontend: &Frontend<'_>, streams: &mut Streams<'_>) {
    let diagnosis = &frontend.diagnosis;
    match options.format {
        OutputFormat::Terminal => {
            let mut emitter =
                TerminalEmitter::with_color_mode(&mut *streams.err, options.color, streams.err_is_tty)
                    .with_path(options.path.display().to_string())
                    .with_source(frontend.lines());
            emitter.emit_all(diagnosis);
            emitter.emit_summary(diagnosis.error_count(), diagnosis.warning_count());
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(&mut *streams.err);
            emitter.begin();
            emitter.emit_all(diagnosis);
            emitter.end();
            emitter.flush();
        }
    }
}
