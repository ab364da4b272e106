//! The cost oracle contract: an abstracted, possibly-failing evaluator.

use anvil_netlist::{Mapping, Netlist};
use std::time::Duration;

/// Errors an oracle evaluation can fail with.
///
/// None of these are fatal during search; the optimizer maps a failed
/// evaluation to `f64::INFINITY`, biasing acceptance away from the failing
/// mapping without aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The estimator process could not be spawned or exited unsuccessfully.
    #[error("cost estimator process failed: {0}")]
    ProcessFailure(String),

    /// The estimator's result file was absent or did not contain a valid cost.
    #[error("malformed cost estimator output: {0}")]
    MalformedOutput(String),

    /// The estimator did not finish within the configured time limit.
    #[error("cost estimator timed out after {0:?}")]
    Timeout(Duration),
}

/// An opaque evaluator scoring a fully mapped netlist.
///
/// The cost is a finite non-negative scalar; lower is better. The optimizer
/// never inspects cost semantics, only orders values. Each evaluation is
/// expensive (in production: spawning and waiting on an external process
/// plus file I/O) and is modeled as a blocking call with no implicit
/// caching.
pub trait CostOracle {
    /// Scores the netlist under the given gate-to-cell mapping.
    fn evaluate(&self, netlist: &Netlist, mapping: &Mapping) -> Result<f64, OracleError>;
}
