//! Cost oracle backed by an external estimator process.

use crate::oracle::{CostOracle, OracleError};
use anvil_diagnostics::DiagnosticSink;
use anvil_netlist::{write_netlist_file, Mapping, Netlist};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// How often a running estimator is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A [`CostOracle`] that shells out to an opaque estimator binary.
///
/// Each evaluation serializes the mapped netlist to `netlist_path`, runs
///
/// ```text
/// <estimator> -library <library_path> -netlist <netlist_path> -output <result_path>
/// ```
///
/// and reads the cost back from the first line of `result_path`. The child's
/// stdout and stderr are discarded so estimator chatter never interleaves
/// with the tool's own output. With a timeout configured, a child that
/// overruns it is killed and reaped.
pub struct ProcessOracle<'a> {
    estimator: PathBuf,
    library_path: PathBuf,
    netlist_path: PathBuf,
    result_path: PathBuf,
    timeout: Option<Duration>,
    sink: &'a DiagnosticSink,
}

impl<'a> ProcessOracle<'a> {
    /// Creates an oracle invoking `estimator` against the given library,
    /// using `netlist_path` and `result_path` as scratch files.
    pub fn new(
        estimator: impl Into<PathBuf>,
        library_path: impl Into<PathBuf>,
        netlist_path: impl Into<PathBuf>,
        result_path: impl Into<PathBuf>,
        sink: &'a DiagnosticSink,
    ) -> Self {
        Self {
            estimator: estimator.into(),
            library_path: library_path.into(),
            netlist_path: netlist_path.into(),
            result_path: result_path.into(),
            timeout: None,
            sink,
        }
    }

    /// Sets a per-evaluation deadline for the estimator process.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn wait_for_exit(&self, child: &mut Child) -> Result<ExitStatus, OracleError> {
        let Some(limit) = self.timeout else {
            return child
                .wait()
                .map_err(|e| OracleError::ProcessFailure(e.to_string()));
        };
        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(e) => return Err(OracleError::ProcessFailure(e.to_string())),
            }
            if started.elapsed() >= limit {
                // Best-effort kill; the child may have exited in between.
                let _ = child.kill();
                let _ = child.wait();
                return Err(OracleError::Timeout(limit));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl CostOracle for ProcessOracle<'_> {
    fn evaluate(&self, netlist: &Netlist, mapping: &Mapping) -> Result<f64, OracleError> {
        write_netlist_file(netlist, mapping, &self.netlist_path, self.sink).map_err(|e| {
            OracleError::ProcessFailure(format!(
                "failed to write {}: {e}",
                self.netlist_path.display()
            ))
        })?;

        let mut child = Command::new(&self.estimator)
            .arg("-library")
            .arg(&self.library_path)
            .arg("-netlist")
            .arg(&self.netlist_path)
            .arg("-output")
            .arg(&self.result_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                OracleError::ProcessFailure(format!(
                    "failed to spawn {}: {e}",
                    self.estimator.display()
                ))
            })?;

        let status = self.wait_for_exit(&mut child)?;
        if !status.success() {
            return Err(OracleError::ProcessFailure(format!(
                "{} exited with {status}",
                self.estimator.display()
            )));
        }

        let text = std::fs::read_to_string(&self.result_path).map_err(|e| {
            OracleError::MalformedOutput(format!(
                "failed to read {}: {e}",
                self.result_path.display()
            ))
        })?;
        parse_cost(&text)
    }
}

/// Extracts the cost from estimator result text.
///
/// Only the first line is inspected; the cost is whatever follows the first
/// `=`. A missing `=`, an unparsable number, or a negative or non-finite
/// value is malformed output.
pub fn parse_cost(text: &str) -> Result<f64, OracleError> {
    let line = text.lines().next().unwrap_or("");
    let value = line
        .split_once('=')
        .ok_or_else(|| OracleError::MalformedOutput(format!("no '=' in first line {line:?}")))?
        .1
        .trim();
    let cost: f64 = value
        .parse()
        .map_err(|_| OracleError::MalformedOutput(format!("not a number: {value:?}")))?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(OracleError::MalformedOutput(format!(
            "cost out of range: {cost}"
        )));
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvil_netlist::parse;
    use anvil_source::FileId;

    #[test]
    fn parse_cost_basic() {
        assert_eq!(parse_cost("cost =3.5\n").unwrap(), 3.5);
        assert_eq!(parse_cost("cost = 12\nsecond line ignored").unwrap(), 12.0);
        assert_eq!(parse_cost("total area=0.0").unwrap(), 0.0);
    }

    #[test]
    fn parse_cost_uses_first_equals_only() {
        // Everything after the first '=' is the value, even another '='.
        assert!(parse_cost("a=b=c").is_err());
    }

    #[test]
    fn parse_cost_rejects_missing_equals() {
        assert!(matches!(
            parse_cost("3.5\n"),
            Err(OracleError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_cost(""),
            Err(OracleError::MalformedOutput(_))
        ));
    }

    #[test]
    fn parse_cost_rejects_garbage_and_out_of_range() {
        assert!(parse_cost("cost =abc").is_err());
        assert!(parse_cost("cost =-1.0").is_err());
        assert!(parse_cost("cost =inf").is_err());
        assert!(parse_cost("cost =NaN").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn slow_estimator_is_killed_on_timeout() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir();
        let script = dir.join(format!("anvil_slow_estimator_{}.sh", std::process::id()));
        std::fs::write(&script, "#!/bin/sh\nsleep 30\n").unwrap();
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();

        let sink = DiagnosticSink::new();
        let oracle = ProcessOracle::new(
            &script,
            dir.join("lib.json"),
            dir.join(format!("anvil_timeout_netlist_{}.v", std::process::id())),
            dir.join(format!("anvil_timeout_result_{}.txt", std::process::id())),
            &sink,
        )
        .with_timeout(Duration::from_millis(100));

        let netlist = parse(
            "module m ();\ninput a;\noutput y;\nINV g1 (a, y);\nendmodule\n",
            FileId::from_raw(0),
            &sink,
        );
        let mut mapping = Mapping::new();
        mapping.assign("g1", "INV_X1");

        let started = Instant::now();
        let err = oracle.evaluate(&netlist, &mapping).unwrap_err();
        assert!(matches!(err, OracleError::Timeout(_)));
        // The child was killed, not waited out.
        assert!(started.elapsed() < Duration::from_secs(10));

        let _ = std::fs::remove_file(&script);
    }

    #[test]
    fn missing_estimator_is_process_failure() {
        let sink = DiagnosticSink::new();
        let dir = std::env::temp_dir();
        let oracle = ProcessOracle::new(
            "/nonexistent/estimator-binary",
            dir.join("lib.json"),
            dir.join("anvil_oracle_test_netlist.v"),
            dir.join("anvil_oracle_test_result.txt"),
            &sink,
        );
        let netlist = parse(
            "module m ();\ninput a;\noutput y;\nINV g1 (a, y);\nendmodule\n",
            FileId::from_raw(0),
            &sink,
        );
        let mut mapping = Mapping::new();
        mapping.assign("g1", "INV_X1");
        let err = oracle.evaluate(&netlist, &mapping).unwrap_err();
        assert!(matches!(err, OracleError::ProcessFailure(_)));
    }
}
