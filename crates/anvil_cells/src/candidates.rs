//! Derived index from gate functional type to eligible cell names.

use crate::cell::CellLibrary;
use std::collections::HashMap;

/// A read-only mapping from gate functional type to the ordered list of
/// library cells implementing that type.
///
/// Built once from the [`CellLibrary`]; library order is preserved within
/// each group, so the first candidate of a type is deterministic and the
/// optimizer's baseline mapping is reproducible. Lookup of an absent type
/// yields `None`; callers warn and leave that gate unmapped rather than
/// aborting the run.
#[derive(Clone, Debug, Default)]
pub struct CandidateIndex {
    by_type: HashMap<String, Vec<String>>,
}

impl CandidateIndex {
    /// Builds the index by grouping library cells by functional type.
    pub fn build(library: &CellLibrary) -> Self {
        let mut by_type: HashMap<String, Vec<String>> = HashMap::new();
        for cell in library.iter() {
            by_type
                .entry(cell.cell_type.clone())
                .or_default()
                .push(cell.name.clone());
        }
        Self { by_type }
    }

    /// Returns the candidate cell names for the given type, in library order.
    pub fn candidates(&self, cell_type: &str) -> Option<&[String]> {
        self.by_type.get(cell_type).map(Vec::as_slice)
    }

    /// Returns the number of distinct functional types in the index.
    pub fn type_count(&self) -> usize {
        self.by_type.len()
    }
}
