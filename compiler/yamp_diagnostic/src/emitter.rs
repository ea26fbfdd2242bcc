//! Plain-text rendering of diagnostics.
//!
//! ```text
//! error[E1002]: expected expression after `+`
//!  --> 1:3
//!   |
//! 1 | 2+
//!   |   ^ expected expression
//! ```

use std::fmt::Write;

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

/// Render `diagnostic` against the query text it was produced for.
pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}[{}]: {}",
        diagnostic.severity, diagnostic.code, diagnostic.message
    );

    if !diagnostic.labels.is_empty() {
        let table = LineOffsetTable::build(source);
        for label in &diagnostic.labels {
            let start = label.span.start as usize;
            let (line, col) = table.offset_to_line_col(source, start);
            let text = table.line_text(source, line);
            let gutter = line.to_string().len();
            let width = (label.span.len() as usize).max(1);
            let pad = " ".repeat(gutter);

            let _ = writeln!(out, "{pad}--> {line}:{col}");
            let _ = writeln!(out, "{pad} |");
            let _ = writeln!(out, "{line} | {text}");
            let _ = write!(
                out,
                "{pad} | {}{}",
                " ".repeat(col - 1),
                "^".repeat(width)
            );
            if label.message.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, " {}", label.message);
            }
        }
    }

    for note in &diagnostic.notes {
        let _ = writeln!(out, "  = note: {note}");
    }
    out
}

#[cfg(test)]
mod tests;
