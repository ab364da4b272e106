//! Structural netlist records: gates with typed functions and named signals.

use serde::{Deserialize, Serialize};

/// One gate instance in a netlist.
///
/// A gate has a functional type (e.g., `"AND2"`, `"INV"`) that determines
/// which library cells can implement it, an ordered list of input signal
/// names, and exactly one output signal name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Instance name, unique within the netlist.
    pub name: String,
    /// Functional type; must match a cell type in the library to be mappable.
    pub cell_type: String,
    /// Input signal names, in port order.
    pub inputs: Vec<String>,
    /// Output signal name.
    pub output: String,
}

/// An immutable structural description of one module.
///
/// Signal declarations keep their source order; gate order is preserved so
/// that serialization is deterministic. The netlist is loaded once and held
/// read-only for the lifetime of an optimization run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Netlist {
    /// The module name.
    pub name: String,
    /// Declared input signals.
    pub inputs: Vec<String>,
    /// Declared output signals.
    pub outputs: Vec<String>,
    /// Declared internal wire signals.
    pub wires: Vec<String>,
    /// Gate instances, in declaration order.
    pub gates: Vec<Gate>,
}

impl Netlist {
    /// Creates an empty netlist with the given module name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the number of gate instances.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_netlist_is_empty() {
        let nl = Netlist::new("top");
        assert_eq!(nl.name, "top");
        assert_eq!(nl.gate_count(), 0);
        assert!(nl.inputs.is_empty());
    }

    #[test]
    fn gate_order_preserved() {
        let mut nl = Netlist::new("top");
        for i in 0..4 {
            nl.gates.push(Gate {
                name: format!("g{i}"),
                cell_type: "INV".to_string(),
                inputs: vec![format!("a{i}")],
                output: format!("y{i}"),
            });
        }
        let names: Vec<_> = nl.gates.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["g0", "g1", "g2", "g3"]);
    }
}
