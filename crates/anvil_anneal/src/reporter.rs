//! Incremental persistence of the best mapping found so far.

use anvil_netlist::{write_netlist_file, Mapping, Netlist};
use std::io;
use std::path::PathBuf;

/// Errors from persisting an improvement.
///
/// Persistence failures are reported and ignored by the optimizer; a full
/// disk must not abort a long search.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The status file could not be written.
    #[error("failed to write status file: {0}")]
    Status(io::Error),

    /// The mapped netlist could not be written.
    #[error("failed to write netlist file: {0}")]
    Netlist(io::Error),
}

/// Receives each new best mapping as the search progresses.
///
/// Called whenever the best cost improves, once for the initial baseline,
/// and once more when the search ends.
pub trait ProgressReporter {
    /// Persists the given best mapping and its cost.
    fn report(&self, netlist: &Netlist, mapping: &Mapping, cost: f64) -> Result<(), ReportError>;
}

/// A [`ProgressReporter`] writing a status file and the mapped netlist.
///
/// The status file is truncated and rewritten as a single `cost =<value>`
/// line on every report, so external monitors can poll it for the current
/// best. The netlist file holds the serialized best mapping; note the
/// writer warns into its own sink for unmapped gates, so the reporter
/// borrows one.
pub struct FileReporter<'a> {
    status_path: PathBuf,
    netlist_path: PathBuf,
    sink: &'a anvil_diagnostics::DiagnosticSink,
}

impl<'a> FileReporter<'a> {
    /// Creates a reporter writing the status line to `status_path` and the
    /// best mapped netlist to `netlist_path`.
    pub fn new(
        status_path: impl Into<PathBuf>,
        netlist_path: impl Into<PathBuf>,
        sink: &'a anvil_diagnostics::DiagnosticSink,
    ) -> Self {
        Self {
            status_path: status_path.into(),
            netlist_path: netlist_path.into(),
            sink,
        }
    }
}

impl ProgressReporter for FileReporter<'_> {
    fn report(&self, netlist: &Netlist, mapping: &Mapping, cost: f64) -> Result<(), ReportError> {
        std::fs::write(&self.status_path, format!("cost ={cost}\n")).map_err(ReportError::Status)?;
        write_netlist_file(netlist, mapping, &self.netlist_path, self.sink)
            .map_err(ReportError::Netlist)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_diagnostics::DiagnosticSink;
    use anvil_netlist::parse;
    use anvil_source::FileId;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("anvil_reporter_{name}_{}", std::process::id()))
    }

    #[test]
    fn writes_status_line_and_netlist() {
        let sink = DiagnosticSink::new();
        let netlist = parse(
            "module m ();\ninput a;\noutput y;\nINV g1 (a, y);\nendmodule\n",
            FileId::from_raw(0),
            &sink,
        );
        let mut mapping = Mapping::new();
        mapping.assign("g1", "INV_X2");

        let status = scratch("status.txt");
        let out = scratch("mapped.v");
        let reporter = FileReporter::new(&status, &out, &sink);
        reporter.report(&netlist, &mapping, 3.5).unwrap();

        assert_eq!(std::fs::read_to_string(&status).unwrap(), "cost =3.5\n");
        assert!(std::fs::read_to_string(&out).unwrap().contains("INV_X2 g1"));

        // A later report truncates rather than appends.
        reporter.report(&netlist, &mapping, 2.0).unwrap();
        assert_eq!(std::fs::read_to_string(&status).unwrap(), "cost =2\n");

        let _ = std::fs::remove_file(&status);
        let _ = std::fs::remove_file(&out);
    }

    #[test]
    fn unwritable_path_is_report_error() {
        let sink = DiagnosticSink::new();
        let netlist = parse(
            "module m ();\ninput a;\noutput y;\nendmodule\n",
            FileId::from_raw(0),
            &sink,
        );
        let reporter = FileReporter::new("/nonexistent/dir/status.txt", "/nonexistent/dir/out.v", &sink);
        let err = reporter.report(&netlist, &Mapping::new(), 1.0).unwrap_err();
        assert!(matches!(err, ReportError::Status(_)));
    }
}
