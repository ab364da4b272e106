//! Simulated annealing search over gate-to-cell mappings.
//!
//! The [`Annealer`] consumes a read-only netlist, candidate index, and
//! [`CostOracle`], and produces a best-effort [`Mapping`] under a
//! wall-clock budget. Each iteration proposes a single-gate reassignment,
//! scores current and neighbor mappings through the oracle, and accepts or
//! rejects the move with the Metropolis criterion. Oracle failures degrade
//! to worst-case cost so a flaky external evaluation never discards hours
//! of progress; improvements are persisted through a [`ProgressReporter`]
//! as soon as they are found.

#![warn(missing_docs)]

pub mod annealer;
pub mod oracle;
pub mod process;
pub mod reporter;

pub use annealer::{initial_mapping, AnnealOutcome, AnnealParams, Annealer};
pub use oracle::{CostOracle, OracleError};
pub use process::ProcessOracle;
pub use reporter::{FileReporter, ProgressReporter, ReportError};
