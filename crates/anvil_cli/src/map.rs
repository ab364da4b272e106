//! `anvil map` — the annealing search pipeline.
//!
//! The full pipeline:
//!
//! 1. Resolve configuration (`--config`, `./anvil.toml`, or defaults)
//! 2. Load the cell library and build the candidate index
//! 3. Load and parse the netlist; refuse to run on parse errors
//! 4. Wire up the process-backed cost oracle and file reporter
//! 5. Run the annealing search until the wall-clock budget expires
//! 6. Render diagnostics and print the best cost

use std::error::Error;
use std::time::Duration;

use anvil_anneal::{AnnealParams, Annealer, FileReporter, ProcessOracle};
use anvil_diagnostics::DiagnosticSink;
use anvil_source::SourceDb;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::pipeline::{load_candidates, load_netlist, render_diagnostics, resolve_config};
use crate::{GlobalArgs, MapArgs};

/// Runs the `anvil map` command.
///
/// Returns exit code 0 on a completed search, 1 when the inputs are
/// unusable (parse errors, unreadable library).
pub fn run(args: &MapArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let config = resolve_config(global)?;

    let (library, index) = load_candidates(&args.library)?;

    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let netlist = load_netlist(&args.netlist, &mut source_db, &sink)?;

    if sink.has_errors() {
        render_diagnostics(&sink.take_all(), &source_db, global);
        return Ok(1);
    }

    if !global.quiet {
        eprintln!(
            "   Mapping {} ({} gates) against {} cells ({} types)",
            netlist.name,
            netlist.gate_count(),
            library.len(),
            index.type_count()
        );
    }

    let params = AnnealParams {
        initial_temp: config.anneal.initial_temp,
        cooling: config.anneal.cooling,
        time_limit: Duration::from_secs(args.time_limit.unwrap_or(config.anneal.time_limit_secs)),
    };
    let seed = args.seed.or(config.anneal.seed);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut oracle = ProcessOracle::new(
        &args.estimator,
        &args.library,
        &args.candidate_file,
        &args.result_file,
        &sink,
    );
    if let Some(secs) = config.anneal.oracle_timeout_secs {
        oracle = oracle.with_timeout(Duration::from_secs(secs));
    }

    let reporter = FileReporter::new(&config.output.status_file, &args.output, &sink);

    // Surface pre-search warnings before the long-running loop starts.
    render_diagnostics(&sink.take_all(), &source_db, global);

    let mut annealer = Annealer::new(&netlist, &index, &oracle, &reporter, &sink, params, rng);
    let outcome = annealer.optimize();

    render_diagnostics(&sink.take_all(), &source_db, global);

    if !global.quiet {
        eprintln!(
            "   Finished after {} iterations: best cost {}, netlist written to {}",
            outcome.iterations, outcome.cost, args.output
        );
    }
    Ok(0)
}
