//! The accumulator behind every reporting seam in the tool.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Collects diagnostics from the parser, the writer, and the optimizer.
///
/// One sink is created per run and lent to every component that can report
/// a problem; components emit and keep going, and the driver decides at
/// stage boundaries (after parsing, after the search) whether errors make
/// the run unviable. The error count is a separate atomic so those
/// `has_errors` checks never contend with an emitting thread. Shared by
/// reference: parallel oracle evaluation, if added, emits into the same
/// sink without coordination.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.diagnostics.lock().unwrap().push(diag);
    }

    /// Returns `true` if any error-severity diagnostic has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Returns the number of error-severity diagnostics recorded so far.
    ///
    /// Counts across the whole run; draining with [`take_all`](Self::take_all)
    /// does not reset it.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Drains the accumulated diagnostics, leaving the sink empty.
    ///
    /// The driver drains at stage boundaries so each rendering pass shows
    /// only what the stage produced.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap())
    }

    /// Returns a snapshot of the accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
