use std::path::PathBuf;

use cpps_codegen::GeneratorOptions;
use cpps_diagnostic::emitter::ColorMode;
use cpps_parse::ParseOptions;

use crate::DriverError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the tokens and comments of every cpps line.
    Lex,
    /// Print every top-level declaration.
    Parse,
    /// Report the diagnosis only.
    Check,
    /// Write C++ output.
    Generate,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "lex" => Some(Command::Lex),
            "parse" => Some(Command::Parse),
            "check" => Some(Command::Check),
            "generate" => Some(Command::Generate),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Command::Lex => "lex",
            Command::Parse => "parse",
            Command::Check => "check",
            Command::Generate => "generate",
        }
    }
}

/// How diagnoses are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverOptions {
    pub command: Command,
    pub path: PathBuf,
    /// Destination of `generate`; standard output when absent.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: ColorMode,
    pub parse: ParseOptions,
    pub generate: GeneratorOptions,
}

impl DriverOptions {
    pub fn new(command: Command, path: impl Into<PathBuf>) -> Self {
        DriverOptions {
            command,
            path: path.into(),
            output: None,
            format: OutputFormat::default(),
            color: ColorMode::default(),
            parse: ParseOptions::default(),
            generate: GeneratorOptions::default(),
        }
    }

    /// Parse `<command> <file> [options]`, without the program name.
    ///
    /// Flags may appear before or after the file.
    pub fn from_args<I, S>(args: I) -> Result<Self, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let mut args = args.iter().map(S::as_ref);

        let name = args.next().ok_or_else(|| DriverError::usage("missing command"))?;
        let command = Command::parse(name)
            .ok_or_else(|| DriverError::usage(format!("unknown command '{name}'")))?;

        let mut path = None;
        let mut options = DriverOptions::new(command, PathBuf::new());

        while let Some(arg) = args.next() {
            if arg == "-o" {
                let output = args
                    .next()
                    .ok_or_else(|| DriverError::usage("-o needs a path"))?;
                options.output = Some(PathBuf::from(output));
            } else if arg == "--json" {
                options.format = OutputFormat::Json;
            } else if arg == "--verbatim" {
                options.parse = ParseOptions::verbatim();
            } else if arg == "--no-line-directives" {
                options.generate = GeneratorOptions::plain();
            } else if let Some(value) = arg.strip_prefix("--color=") {
                options.color = ColorMode::parse(value).ok_or_else(|| {
                    DriverError::usage(format!(
                        "invalid --color value '{value}' (expected auto, always or never)"
                    ))
                })?;
            } else if arg.starts_with('-') {
                return Err(DriverError::usage(format!("unknown option '{arg}'")));
            } else if path.is_none() {
                path = Some(PathBuf::from(arg));
            } else {
                return Err(DriverError::usage(format!("unexpected argument '{arg}'")));
            }
        }

        if options.output.is_some() && command != Command::Generate {
            return Err(DriverError::usage(format!(
                "-o is only valid with generate, not {}",
                command.name()
            )));
        }

        options.path = path.ok_or_else(|| {
            DriverError::usage(format!("missing file: cppsc {} <file.cpps>", command.name()))
        })?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests;
