//! `anvil check` — input validation without optimization.
//!
//! Parses the netlist and cell library, reports a summary of the design and
//! the candidate coverage per gate type, and exits nonzero when the inputs
//! would be rejected by `anvil map`.

use std::collections::BTreeMap;
use std::error::Error;

use anvil_diagnostics::DiagnosticSink;
use anvil_source::SourceDb;

use crate::pipeline::{load_candidates, load_netlist, render_diagnostics};
use crate::{CheckArgs, GlobalArgs};

/// Runs the `anvil check` command.
///
/// Returns exit code 0 when the inputs are usable, 1 otherwise. Gate types
/// with no library candidates are reported but do not fail the check; they
/// mirror the warn-and-skip behavior of the search.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    let (library, index) = load_candidates(&args.library)?;

    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let netlist = load_netlist(&args.netlist, &mut source_db, &sink)?;

    // Gate count per functional type, in sorted order for stable output.
    let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for gate in &netlist.gates {
        *type_counts.entry(gate.cell_type.as_str()).or_default() += 1;
    }

    if !global.quiet {
        eprintln!(
            "   Checking {}: {} inputs, {} outputs, {} wires, {} gates",
            netlist.name,
            netlist.inputs.len(),
            netlist.outputs.len(),
            netlist.wires.len(),
            netlist.gate_count()
        );
        eprintln!(
            "   Library: {} cells, {} functional types",
            library.len(),
            index.type_count()
        );
        for (ty, count) in &type_counts {
            match index.candidates(ty) {
                Some(cells) => {
                    eprintln!("   {ty}: {count} gate(s), {} candidate cell(s)", cells.len())
                }
                None => eprintln!("   {ty}: {count} gate(s), no candidate cells"),
            }
        }
    }

    render_diagnostics(&sink.diagnostics(), &source_db, global);

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}
