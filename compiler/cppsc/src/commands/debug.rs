//! `lex` and `parse`: listings for inspecting the front end.

use std::io::{self, Write};

use cpps_ir::{LexemeKind, Source, SourceLocation};

use crate::Frontend;

/// `line:column`, one-based like editor positions.
fn position(location: SourceLocation) -> String {
    format!(
        "{}:{}",
        u64::from(location.line) + 1,
        u64::from(location.column) + 1
    )
}

/// Tokens grouped by line, then comments.
pub(super) fn print_tokens(frontend: &Frontend<'_>, out: &mut dyn Write) -> io::Result<()> {
    let tokens = &frontend.tokens;
    writeln!(out, "{} tokens, {} comments", tokens.len(), tokens.comments().len())?;

    let lines = frontend.source.as_ref().map_or(0, Source::len);
    for line in 0..lines {
        let on_line = tokens.on(line);
        if on_line.is_empty() {
            continue;
        }
        writeln!(out, "line {}:", line + 1)?;
        for token in on_line {
            let kind = token.lexeme.kind().map_or("invalid", LexemeKind::name);
            writeln!(out, "  {} {kind} {}", position(token.location), token.text)?;
        }
    }

    for comment in tokens.comments() {
        writeln!(
            out,
            "comment {}-{}: {}",
            position(comment.begin),
            position(comment.end),
            comment.text
        )?;
    }
    Ok(())
}

/// One line per top-level declaration: name, kind and span.
pub(super) fn print_declarations(frontend: &Frontend<'_>, out: &mut dyn Write) -> io::Result<()> {
    let unit = &frontend.unit;
    writeln!(out, "{} declarations", unit.len())?;

    for declaration in unit.declarations() {
        let name = declaration
            .identifier
            .as_ref()
            .map_or("<unnamed>", |identifier| {
                frontend.tokens[unit.get(identifier).identifier].text
            });
        let kind = if declaration.is_function() {
            "function"
        } else {
            "object"
        };
        writeln!(
            out,
            "  {name}: {kind} {}-{}",
            position(declaration.start_location),
            position(declaration.end_location)
        )?;
    }
    Ok(())
}
