//! JSON cell library record loader.
//!
//! The library document has the shape
//! `{ "cells": [ { "cell_name": ..., "cell_type": ..., ... } ] }`.
//! Attribute keys are classified by a suffix convention: keys ending in
//! `_f` parse their value as a float, keys ending in `_i` as an integer;
//! all other keys are ignored for numeric extraction. Both string and
//! numeric JSON values are accepted. Any load failure is fatal since the
//! cell library is a primary input.

use crate::cell::{Cell, CellLibrary};
use serde_json::Value;
use std::path::Path;

/// Errors that can occur when loading or parsing a cell library.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// An I/O error occurred while reading the library file.
    #[error("failed to read cell library: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON content could not be parsed.
    #[error("failed to parse cell library JSON: {0}")]
    Json(String),

    /// A required field is missing or has the wrong shape.
    #[error("cell record {index}: missing or invalid field '{field}'")]
    MissingField {
        /// Index of the record in the `cells` array.
        index: usize,
        /// The missing field name.
        field: &'static str,
    },

    /// An attribute value could not be parsed as the type its suffix implies.
    #[error("cell '{cell}': attribute '{key}' has non-numeric value '{value}'")]
    MalformedAttribute {
        /// The cell the attribute belongs to.
        cell: String,
        /// The attribute key.
        key: String,
        /// The offending value text.
        value: String,
    },

    /// Two cells in the library share a name.
    #[error("duplicate cell name '{0}'")]
    DuplicateCell(String),
}

/// Loads a cell library from a JSON file.
pub fn load_library(path: &Path) -> Result<CellLibrary, LibraryError> {
    let content = std::fs::read_to_string(path)?;
    parse_library(&content)
}

/// Parses a cell library from a JSON string.
pub fn parse_library(content: &str) -> Result<CellLibrary, LibraryError> {
    let doc: Value = serde_json::from_str(content).map_err(|e| LibraryError::Json(e.to_string()))?;

    let records = doc
        .get("cells")
        .and_then(Value::as_array)
        .ok_or(LibraryError::MissingField {
            index: 0,
            field: "cells",
        })?;

    let mut library = CellLibrary::new();
    for (index, record) in records.iter().enumerate() {
        let cell = parse_cell(index, record)?;
        let name = cell.name.clone();
        if !library.insert(cell) {
            return Err(LibraryError::DuplicateCell(name));
        }
    }
    Ok(library)
}

fn parse_cell(index: usize, record: &Value) -> Result<Cell, LibraryError> {
    let obj = record.as_object().ok_or(LibraryError::MissingField {
        index,
        field: "cell record",
    })?;

    let name = obj
        .get("cell_name")
        .and_then(Value::as_str)
        .ok_or(LibraryError::MissingField {
            index,
            field: "cell_name",
        })?
        .to_string();

    let cell_type = obj
        .get("cell_type")
        .and_then(Value::as_str)
        .ok_or(LibraryError::MissingField {
            index,
            field: "cell_type",
        })?
        .to_string();

    let mut float_attrs = Vec::new();
    let mut int_attrs = Vec::new();

    // Record order is preserved by the JSON map, so attribute lists keep
    // the order the record declares them in.
    for (key, value) in obj {
        if key == "cell_name" || key == "cell_type" {
            continue;
        }
        if key.ends_with("_f") {
            float_attrs.push(parse_float(&name, key, value)?);
        } else if key.ends_with("_i") {
            int_attrs.push(parse_int(&name, key, value)?);
        }
    }

    Ok(Cell {
        name,
        cell_type,
        float_attrs,
        int_attrs,
    })
}

fn parse_float(cell: &str, key: &str, value: &Value) -> Result<f64, LibraryError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| LibraryError::MalformedAttribute {
        cell: cell.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_int(cell: &str, key: &str, value: &Value) -> Result<i64, LibraryError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    };
    parsed.ok_or_else(|| LibraryError::MalformedAttribute {
        cell: cell.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}
