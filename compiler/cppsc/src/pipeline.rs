use std::path::Path;

use cpps_diagnostic::Diagnosis;
use cpps_ir::{Source, Tokens};
use cpps_parse::{ParseOptions, TranslationUnit};
use cpps_source::{ReadError, SourceReader};
use tracing::debug;

use crate::DriverError;

/// Read a whole file as bytes; classification decides what is readable.
pub fn read_source(path: &Path) -> Result<Vec<u8>, DriverError> {
    std::fs::read(path).map_err(|source| DriverError::read(path, source))
}

/// Everything the front end produced for one input.
///
/// Classification failures stop the pipeline early; `source` is `None`
/// then and the diagnosis says why.
pub struct Frontend<'src> {
    pub diagnosis: Diagnosis,
    pub source: Option<Source<'src>>,
    pub tokens: Tokens<'src>,
    pub unit: TranslationUnit,
    /// Why classification stopped, if it did.
    pub read_error: Option<ReadError>,
}

impl<'src> Frontend<'src> {
    /// Classify, lex and parse `bytes`.
    pub fn run(bytes: &'src [u8], options: ParseOptions) -> Self {
        let mut diagnosis = Diagnosis::new();

        let source = match SourceReader::from_bytes(&mut diagnosis, bytes).read() {
            Ok(source) => source,
            Err(error) => {
                debug!(%error, "classification failed");
                return Frontend {
                    diagnosis,
                    source: None,
                    tokens: Tokens::default(),
                    unit: TranslationUnit::new(),
                    read_error: Some(error),
                };
            }
        };

        let tokens = cpps_lexer::lex(&mut diagnosis, &source);
        let unit = cpps_parse::parse_with_options(&mut diagnosis, &tokens, options);
        debug!(
            lines = source.len(),
            tokens = tokens.len(),
            declarations = unit.len(),
            errors = diagnosis.error_count(),
            "frontend"
        );

        Frontend {
            diagnosis,
            source: Some(source),
            tokens,
            unit,
            read_error: None,
        }
    }

    /// Source line texts, for diagnosis snippets.
    pub fn lines(&self) -> Vec<&'src str> {
        self.source
            .as_ref()
            .map(|source| source.lines().iter().map(|line| line.text).collect())
            .unwrap_or_default()
    }
}
