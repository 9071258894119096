use std::io::{self, Write};

use cpps_codegen::{Generator, GeneratorOptions, SourcePrinter};
use cpps_diagnostic::Diagnosis;
use cpps_ir::{Source, Tokens};
use cpps_parse::TranslationUnit;
use tracing::debug;

use crate::{DriverError, DriverOptions, Frontend};

/// Write C++ to `-o` or to `out`. Inputs with errors produce no output.
pub(super) fn generate(
    options: &DriverOptions,
    frontend: &mut Frontend<'_>,
    out: &mut dyn Write,
) -> Result<(), DriverError> {
    let Frontend {
        diagnosis,
        source,
        tokens,
        unit,
        ..
    } = frontend;
    let Some(source) = source.as_ref() else {
        return Ok(());
    };
    if diagnosis.has_errors() {
        debug!(errors = diagnosis.error_count(), "skipping generation");
        return Ok(());
    }

    match &options.output {
        Some(path) => {
            let mut buffer = Vec::new();
            write_output(diagnosis, source, tokens, unit, options.generate, &mut buffer)?;
            std::fs::write(path, buffer).map_err(|error| DriverError::Write {
                path: path.clone(),
                source: error,
            })?;
        }
        None => write_output(diagnosis, source, tokens, unit, options.generate, out)?,
    }
    Ok(())
}

fn write_output<W: Write>(
    diagnosis: &mut Diagnosis,
    source: &Source<'_>,
    tokens: &Tokens<'_>,
    unit: &TranslationUnit,
    options: GeneratorOptions,
    out: W,
) -> io::Result<()> {
    let mut printer = SourcePrinter::new(out);
    let blocks = Generator::new(diagnosis, source, tokens, unit, &mut printer, options).generate()?;
    debug!(blocks = blocks.len(), "generated");
    Ok(())
}
