//! Diagnostic rendering for human-readable terminal output.

use crate::diagnostic::Diagnostic;
use anvil_source::SourceDb;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[E101]: expected ';'
///   --> designs/adder.v:10:5
///    |
/// 10 | input a, b
///    |           ^
///    = help: add ';' after the last identifier
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        // Header line: severity[CODE]: message
        out.push_str(&format!(
            "{}[{}]: {}\n",
            diag.severity, diag.code, diag.message
        ));

        // Location line with source excerpt and underline
        if !diag.primary_span.is_dummy() {
            let resolved = source_db.resolve_span(diag.primary_span);
            out.push_str(&format!("  --> {resolved}\n"));

            let file = source_db.get_file(diag.primary_span.file);
            let (line, col) = file.line_col(diag.primary_span.start);
            let line_num = format!("{line}");
            let padding = " ".repeat(line_num.len());

            let line_content = get_source_line(&file.content, diag.primary_span.start);

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            let span_len = (diag.primary_span.end - diag.primary_span.start).max(1) as usize;
            let carets = "^".repeat(span_len);
            let col_padding = " ".repeat((col as usize).saturating_sub(1));
            out.push_str(&format!("{padding} | {col_padding}{carets}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

/// Extracts the line of source code containing the given byte offset.
///
/// The offset is clamped to the nearest preceding character boundary, so a
/// span that lands inside a multi-byte character still renders rather than
/// panicking.
fn get_source_line(content: &str, byte_offset: u32) -> &str {
    let mut offset = (byte_offset as usize).min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    let start = content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    let end = content[offset..]
        .find('\n')
        .map_or(content.len(), |pos| offset + pos);
    &content[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_error_with_span() {
        let mut source_db = SourceDb::new();
        let file_id = source_db.add_source("adder.v", "input a, b\n".to_string());

        let code = DiagnosticCode::new(Category::Error, 101);
        let span = anvil_source::Span::new(file_id, 10, 11);
        let diag = Diagnostic::error(code, "expected ';'", span);

        let renderer = TerminalRenderer::new(false);
        let output = renderer.render(&diag, &source_db);

        assert!(output.contains("error[E101]: expected ';'"));
        assert!(output.contains("--> adder.v:1:11"));
        assert!(output.contains("input a, b"));
        assert!(output.contains("^"));
    }

    #[test]
    fn render_warning_with_notes() {
        let source_db = SourceDb::new();
        let code = DiagnosticCode::new(Category::Warning, 201);
        let diag = Diagnostic::warning(code, "no candidates for type 'XOR3'", anvil_source::Span::DUMMY)
            .with_note("gate 'g7' will be left unmapped")
            .with_help("add a cell of type 'XOR3' to the library");

        let renderer = TerminalRenderer::new(false);
        let output = renderer.render(&diag, &source_db);

        assert!(output.contains("warning[W201]: no candidates for type 'XOR3'"));
        assert!(output.contains("= note: gate 'g7' will be left unmapped"));
        assert!(output.contains("= help: add a cell of type 'XOR3' to the library"));
    }

    #[test]
    fn render_span_inside_multibyte_char() {
        let mut source_db = SourceDb::new();
        let file_id = source_db.add_source("n.v", "wire é;\n".to_string());

        // 'é' occupies bytes 5..7; a span starting at byte 6 is inside it.
        let code = DiagnosticCode::new(Category::Error, 101);
        let span = anvil_source::Span::new(file_id, 6, 7);
        let diag = Diagnostic::error(code, "unrecognized character", span);

        let renderer = TerminalRenderer::new(false);
        let output = renderer.render(&diag, &source_db);
        assert!(output.contains("wire é;"));
    }

    #[test]
    fn render_dummy_span_no_source() {
        let source_db = SourceDb::new();
        let code = DiagnosticCode::new(Category::Search, 301);
        let diag = Diagnostic::note(code, "iteration 100: best cost 3.5");

        let renderer = TerminalRenderer::new(false);
        let output = renderer.render(&diag, &source_db);

        assert!(output.contains("note[S301]: iteration 100: best cost 3.5"));
        assert!(!output.contains("-->"));
    }
}
