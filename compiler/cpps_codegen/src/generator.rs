use std::io;
use std::ops::RangeInclusive;

use cpps_diagnostic::{Diagnosis, Entry};
use cpps_ir::{LineKind, Source, SourceLocation, Tokens};
use cpps_parse::TranslationUnit;
use tracing::{debug, trace};

use crate::SourcePrinter;

/// Diagnosis texts reported by the generator.
pub mod message {
    pub const CPPS_BLOCK_NOT_LOWERED: &str = "cpps declarations are not lowered to C++ yet";
}

/// Generator configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Write `#line N` where passthrough resumes after a cpps block, so C++
    /// compiler messages keep pointing at the original file.
    pub emit_line_directives: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            emit_line_directives: true,
        }
    }
}

impl GeneratorOptions {
    /// Output without `#line` markers.
    pub fn plain() -> Self {
        GeneratorOptions {
            emit_line_directives: false,
        }
    }
}

/// A run of consecutive cpps lines and what was parsed from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CppsBlock {
    pub lines: RangeInclusive<usize>,
    /// Top-level declarations starting inside the block.
    pub declarations: usize,
    pub tokens: usize,
}

pub struct Generator<'a, 'src, W: io::Write> {
    diagnosis: &'a mut Diagnosis,
    source: &'a Source<'src>,
    tokens: &'a Tokens<'src>,
    unit: &'a TranslationUnit,
    printer: &'a mut SourcePrinter<W>,
    options: GeneratorOptions,
}

impl<'a, 'src, W: io::Write> Generator<'a, 'src, W> {
    pub fn new(
        diagnosis: &'a mut Diagnosis,
        source: &'a Source<'src>,
        tokens: &'a Tokens<'src>,
        unit: &'a TranslationUnit,
        printer: &'a mut SourcePrinter<W>,
        options: GeneratorOptions,
    ) -> Self {
        Generator {
            diagnosis,
            source,
            tokens,
            unit,
            printer,
            options,
        }
    }

    /// Write the output and return the cpps blocks that were left out of it.
    ///
    /// Each left-out block is also reported as a warning at its first line.
    pub fn generate(&mut self) -> io::Result<Vec<CppsBlock>> {
        let blocks = self.cpps_blocks();
        for block in &blocks {
            trace!(
                first = block.lines.start(),
                last = block.lines.end(),
                declarations = block.declarations,
                tokens = block.tokens,
                "cpps block"
            );
            let line = SourceLocation::from_indices(*block.lines.start(), 0).line;
            self.diagnosis
                .warning(Entry::new(message::CPPS_BLOCK_NOT_LOWERED).at_line(line));
        }

        for (index, line) in self.source.lines().iter().enumerate() {
            if line.kind == LineKind::Cpps {
                continue;
            }
            if self.options.emit_line_directives && self.printer.is_out_of_step(index) {
                self.printer.print_line_directive(index)?;
            }
            self.printer.print(line.text, index)?;
        }
        self.printer.flush()?;

        debug!(
            lines = self.source.len(),
            blocks = blocks.len(),
            declarations = self.unit.len(),
            written = self.printer.lines_written(),
            "generate"
        );
        Ok(blocks)
    }

    fn cpps_blocks(&self) -> Vec<CppsBlock> {
        let mut blocks = Vec::new();
        let mut first = None;

        let lines = self.source.lines();
        for (index, line) in lines.iter().enumerate() {
            match (line.kind == LineKind::Cpps, first) {
                (true, None) => first = Some(index),
                (false, Some(start)) => {
                    let last = index - 1;
                    blocks.push(self.block(start..=last));
                    first = None;
                }
                _ => {}
            }
        }
        if let Some(start) = first {
            let last = lines.len() - 1;
            blocks.push(self.block(start..=last));
        }
        blocks
    }

    fn block(&self, lines: RangeInclusive<usize>) -> CppsBlock {
        let declarations = self
            .unit
            .declarations()
            .filter(|declaration| {
                usize::try_from(declaration.start_location.line)
                    .is_ok_and(|line| lines.contains(&line))
            })
            .count();
        let tokens = lines.clone().map(|line| self.tokens.len_on(line)).sum();
        CppsBlock {
            lines,
            declarations,
            tokens,
        }
    }
}

#[cfg(test)]
mod tests;
