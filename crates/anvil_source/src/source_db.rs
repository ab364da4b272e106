//! Central database of the source files loaded for one run.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// The source database, owning all loaded source text and resolving
/// [`FileId`] + byte offsets to line/column coordinates for diagnostics.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Loads a source file from the filesystem and returns its [`FileId`].
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        let id = FileId::from_raw(self.files.len() as u32);
        let file = SourceFile::new(id, path.to_path_buf(), content);
        self.files.push(file);
        Ok(id)
    }

    /// Adds a source file from an in-memory string (useful for tests).
    ///
    /// The `name` parameter is used as the file path in diagnostics.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        let file = SourceFile::new(id, name.into(), content);
        self.files.push(file);
        id
    }

    /// Returns the [`SourceFile`] for the given [`FileId`].
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` is invalid.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Resolves a [`Span`] to human-readable line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the source text corresponding to a [`Span`].
    pub fn snippet(&self, span: Span) -> &str {
        let file = self.get_file(span.file);
        file.snippet(span.start, span.end)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get_source() {
        let mut db = SourceDb::new();
        let id = db.add_source("netlist.v", "module top ();\nendmodule\n".to_string());
        let file = db.get_file(id);
        assert_eq!(file.path, PathBuf::from("netlist.v"));
        assert!(file.content.starts_with("module"));
    }

    #[test]
    fn ids_are_sequential() {
        let mut db = SourceDb::new();
        let a = db.add_source("a.v", String::new());
        let b = db.add_source("b.v", String::new());
        assert_eq!(a.as_raw(), 0);
        assert_eq!(b.as_raw(), 1);
    }

    #[test]
    fn resolve_span_coordinates() {
        let mut db = SourceDb::new();
        let id = db.add_source("n.v", "module top ();\n  wire w;\nendmodule\n".to_string());
        // "wire" starts at byte 17 (line 2, col 3)
        let span = Span::new(id, 17, 21);
        let resolved = db.resolve_span(span);
        assert_eq!(resolved.start_line, 2);
        assert_eq!(resolved.start_col, 3);
        assert_eq!(format!("{resolved}"), "n.v:2:3");
    }

    #[test]
    fn snippet_returns_span_text() {
        let mut db = SourceDb::new();
        let id = db.add_source("n.v", "AND2 g1 (a, b, y);".to_string());
        let span = Span::new(id, 5, 7);
        assert_eq!(db.snippet(span), "g1");
    }

    #[test]
    fn load_file_missing_is_error() {
        let mut db = SourceDb::new();
        let result = db.load_file(Path::new("/nonexistent/netlist.v"));
        assert!(result.is_err());
    }
}
