//! Immutable records of physical cell alternatives.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One physical cell implementation in the library.
///
/// A cell implements the logic function named by `cell_type` and carries
/// the numeric attributes extracted from its library record, in record
/// order. Cells are immutable after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell name, unique within a library.
    pub name: String,
    /// Functional class (e.g., `"AND2"`, `"INV"`).
    pub cell_type: String,
    /// Float attributes, in record order.
    pub float_attrs: Vec<f64>,
    /// Integer attributes, in record order.
    pub int_attrs: Vec<i64>,
}

/// A set of cells with unique names.
///
/// Loaded once by the library loader and held read-only for the lifetime
/// of an optimization run.
#[derive(Clone, Debug, Default)]
pub struct CellLibrary {
    cells: Vec<Cell>,
    by_name: HashMap<String, usize>,
}

impl CellLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell, preserving insertion order.
    ///
    /// Returns `false` (and leaves the library unchanged) if a cell with
    /// the same name is already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.by_name.contains_key(&cell.name) {
            return false;
        }
        self.by_name.insert(cell.name.clone(), self.cells.len());
        self.cells.push(cell);
        true
    }

    /// Returns the cell with the given name, if present.
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.by_name.get(name).map(|&idx| &self.cells[idx])
    }

    /// Iterates over cells in insertion (library) order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the number of cells in the library.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the library contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
