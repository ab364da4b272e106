//! The gate-to-cell assignment mutated by the optimizer.

use std::collections::HashMap;

/// An assignment from gate names to the library cell implementing each gate.
///
/// The optimizer maintains the invariant that the assigned cell's type
/// always equals the gate's functional type. A gate with no eligible cells
/// simply has no entry; the writer reports and skips such gates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    assignments: HashMap<String, String>,
}

impl Mapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell assigned to the given gate, if any.
    pub fn get(&self, gate: &str) -> Option<&str> {
        self.assignments.get(gate).map(String::as_str)
    }

    /// Assigns a cell to a gate, replacing any previous assignment.
    pub fn assign(&mut self, gate: impl Into<String>, cell: impl Into<String>) {
        self.assignments.insert(gate.into(), cell.into());
    }

    /// Returns the number of assigned gates.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` if no gate has an assignment.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates over (gate name, cell name) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(g, c)| (g.as_str(), c.as_str()))
    }
}
