use std::io;

/// Writes generated text line by line.
///
/// Every printed line is tagged with the source line it came from, which
/// lets the printer tell when output stops following the input.
pub struct SourcePrinter<W: io::Write> {
    out: W,
    /// Source line expected to be printed next, if anything was printed.
    next_line: Option<usize>,
    lines_written: usize,
}

impl<W: io::Write> SourcePrinter<W> {
    pub fn new(out: W) -> Self {
        SourcePrinter {
            out,
            next_line: None,
            lines_written: 0,
        }
    }

    /// Print `text` for source line `line`, followed by a newline.
    pub fn print(&mut self, text: &str, line: usize) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.next_line = Some(line + 1);
        self.lines_written += 1;
        Ok(())
    }

    /// Print a `#line` marker so that the next printed line maps back to
    /// source line `line` (0-based) in compiler messages.
    pub fn print_line_directive(&mut self, line: usize) -> io::Result<()> {
        writeln!(self.out, "#line {}", line + 1)?;
        self.next_line = Some(line);
        self.lines_written += 1;
        Ok(())
    }

    /// Whether printing `line` now would not directly follow what was
    /// printed before.
    pub fn is_out_of_step(&self, line: usize) -> bool {
        self.next_line.map_or(line != 0, |next| next != line)
    }

    #[inline]
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
