//! Canonicalizing netlist writer.
//!
//! Serializes a [`Netlist`] with a gate-to-cell [`Mapping`] applied. Output
//! is canonical and deterministic: ports are the de-duplicated union of
//! input and output declarations in sorted order, the wire set is
//! (declared wires plus signals referenced only by gates) minus inputs and
//! outputs, and gates appear in netlist order. Writing the same netlist and
//! mapping twice yields byte-identical text.

use crate::mapping::Mapping;
use crate::netlist::Netlist;
use anvil_diagnostics::code::{Category, DiagnosticCode};
use anvil_diagnostics::{Diagnostic, DiagnosticSink};
use anvil_source::Span;
use std::collections::BTreeSet;
use std::io;
use std::path::Path;

/// Renders the netlist with the given mapping to a string.
///
/// A gate with no entry in the mapping is reported to the sink as a warning
/// and skipped; serialization continues.
pub fn render_netlist(netlist: &Netlist, mapping: &Mapping, sink: &DiagnosticSink) -> String {
    let inputs: BTreeSet<&str> = netlist.inputs.iter().map(String::as_str).collect();
    let outputs: BTreeSet<&str> = netlist.outputs.iter().map(String::as_str).collect();

    // Wires: declared wires plus every signal a gate touches, minus ports.
    let mut wires: BTreeSet<&str> = netlist.wires.iter().map(String::as_str).collect();
    for gate in &netlist.gates {
        for input in &gate.inputs {
            wires.insert(input);
        }
        wires.insert(&gate.output);
    }
    let wires: BTreeSet<&str> = wires
        .into_iter()
        .filter(|s| !inputs.contains(s) && !outputs.contains(s))
        .collect();

    let ports: BTreeSet<&str> = inputs.union(&outputs).copied().collect();

    let mut out = String::new();
    out.push_str(&format!("module {} (", netlist.name));
    push_joined(&mut out, &ports);
    out.push_str(");\n");

    // Declaration lines are omitted when empty; ` input ;` would not
    // re-parse.
    if !inputs.is_empty() {
        out.push_str(" input ");
        push_joined(&mut out, &inputs);
        out.push_str(";\n");
    }

    if !outputs.is_empty() {
        out.push_str(" output ");
        push_joined(&mut out, &outputs);
        out.push_str(";\n");
    }

    if !wires.is_empty() {
        out.push_str(" wire ");
        push_joined(&mut out, &wires);
        out.push_str(";\n");
    }

    for gate in &netlist.gates {
        let cell = match mapping.get(&gate.name) {
            Some(cell) => cell,
            None => {
                sink.emit(Diagnostic::warning(
                    DiagnosticCode::new(Category::Warning, 210),
                    format!("gate '{}' has no cell assignment; skipped", gate.name),
                    Span::DUMMY,
                ));
                continue;
            }
        };
        out.push_str(&format!(" {} {} (", cell, gate.name));
        for input in &gate.inputs {
            out.push_str(input);
            out.push_str(", ");
        }
        out.push_str(&gate.output);
        out.push_str(");\n");
    }

    out.push_str("endmodule\n");
    out
}

/// Renders the netlist and writes it to the given path.
pub fn write_netlist_file(
    netlist: &Netlist,
    mapping: &Mapping,
    path: &Path,
    sink: &DiagnosticSink,
) -> io::Result<()> {
    let text = render_netlist(netlist, mapping, sink);
    std::fs::write(path, text)
}

fn push_joined(out: &mut String, names: &BTreeSet<&str>) {
    let mut first = true;
    for name in names {
        if !first {
            out.push_str(", ");
        }
        out.push_str(name);
        first = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use anvil_source::FileId;

    fn sample_netlist() -> Netlist {
        let sink = DiagnosticSink::new();
        parse(
            "module adder (a, b, y);\n\
             input a, b;\n\
             output y;\n\
             wire w1;\n\
             AND2 g1 (a, b, w1);\n\
             INV g2 (w1, y);\n\
             endmodule\n",
            FileId::from_raw(0),
            &sink,
        )
    }

    fn sample_mapping() -> Mapping {
        let mut m = Mapping::new();
        m.assign("g1", "AND2_X1");
        m.assign("g2", "INV_X2");
        m
    }

    #[test]
    fn renders_mapped_cells() {
        let sink = DiagnosticSink::new();
        let text = render_netlist(&sample_netlist(), &sample_mapping(), &sink);
        assert!(text.contains(" AND2_X1 g1 (a, b, w1);\n"));
        assert!(text.contains(" INV_X2 g2 (w1, y);\n"));
        assert!(text.starts_with("module adder (a, b, y);\n"));
        assert!(text.ends_with("endmodule\n"));
    }

    #[test]
    fn writer_is_idempotent() {
        let sink = DiagnosticSink::new();
        let netlist = sample_netlist();
        let mapping = sample_mapping();
        let first = render_netlist(&netlist, &mapping, &sink);
        let second = render_netlist(&netlist, &mapping, &sink);
        assert_eq!(first, second);
    }

    #[test]
    fn unmapped_gate_skipped_with_warning() {
        let sink = DiagnosticSink::new();
        let mut mapping = Mapping::new();
        mapping.assign("g1", "AND2_X1");
        let text = render_netlist(&sample_netlist(), &mapping, &sink);
        assert!(text.contains("AND2_X1 g1"));
        assert!(!text.contains("g2"));
        assert!(!sink.has_errors());
        assert!(sink
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("g2") && d.message.contains("skipped")));
    }

    #[test]
    fn implicit_wires_included_declared_ports_excluded() {
        let sink = DiagnosticSink::new();
        // w2 is used by gates but never declared.
        let netlist = parse(
            "module m ();\ninput a;\noutput y;\nINV g1 (a, w2);\nINV g2 (w2, y);\nendmodule\n",
            FileId::from_raw(0),
            &sink,
        );
        let mut mapping = Mapping::new();
        mapping.assign("g1", "INV_X1");
        mapping.assign("g2", "INV_X1");
        let text = render_netlist(&netlist, &mapping, &sink);
        assert!(text.contains(" wire w2;\n"));
    }

    #[test]
    fn portless_module_round_trips() {
        let sink = DiagnosticSink::new();
        let netlist = parse("module m ();\nendmodule\n", FileId::from_raw(0), &sink);
        let text = render_netlist(&netlist, &Mapping::new(), &sink);
        assert!(!text.contains("input"));
        assert!(!text.contains("output"));

        let reparsed = parse(&text, FileId::from_raw(1), &sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(reparsed.name, "m");
    }

    #[test]
    fn no_wire_line_when_no_wires() {
        let sink = DiagnosticSink::new();
        let netlist = parse(
            "module m ();\ninput a;\noutput y;\nINV g1 (a, y);\nendmodule\n",
            FileId::from_raw(0),
            &sink,
        );
        let mut mapping = Mapping::new();
        mapping.assign("g1", "INV_X1");
        let text = render_netlist(&netlist, &mapping, &sink);
        assert!(!text.contains("wire"));
    }

    #[test]
    fn duplicate_declarations_deduplicated() {
        let sink = DiagnosticSink::new();
        let netlist = parse(
            "module m ();\ninput a;\ninput a;\noutput y;\nwire w1;\nwire w1;\n\
             INV g1 (a, w1);\nINV g2 (w1, y);\nendmodule\n",
            FileId::from_raw(0),
            &sink,
        );
        let mut mapping = Mapping::new();
        mapping.assign("g1", "INV_X1");
        mapping.assign("g2", "INV_X1");
        let text = render_netlist(&netlist, &mapping, &sink);
        assert!(text.contains(" input a;\n"));
        assert!(text.contains(" wire w1;\n"));
    }

    #[test]
    fn round_trip_preserves_content() {
        let sink = DiagnosticSink::new();
        let original = sample_netlist();
        let text = render_netlist(&original, &sample_mapping(), &sink);

        let reparsed = parse(&text, FileId::from_raw(1), &sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());

        assert_eq!(reparsed.name, original.name);

        let ports = |v: &[String]| -> BTreeSet<String> { v.iter().cloned().collect() };
        assert_eq!(ports(&reparsed.inputs), ports(&original.inputs));
        assert_eq!(ports(&reparsed.outputs), ports(&original.outputs));
        assert_eq!(ports(&reparsed.wires), ports(&original.wires));

        // Gate structure survives; cell types are now the mapped cells.
        assert_eq!(reparsed.gates.len(), original.gates.len());
        for (re, orig) in reparsed.gates.iter().zip(original.gates.iter()) {
            assert_eq!(re.name, orig.name);
            assert_eq!(re.inputs, orig.inputs);
            assert_eq!(re.output, orig.output);
        }
        assert_eq!(reparsed.gates[0].cell_type, "AND2_X1");
    }
}
