//! Cell library model, JSON record loader, and candidate index.
//!
//! A [`CellLibrary`] is a set of physical cell alternatives, each tagged
//! with a functional type and numeric attributes. The [`CandidateIndex`] is
//! derived from the library once and maps each functional type to its
//! ordered list of eligible cell names; it is read-only for the remainder
//! of a run.

#![warn(missing_docs)]

pub mod candidates;
pub mod cell;
pub mod loader;

pub use candidates::CandidateIndex;
pub use cell::{Cell, CellLibrary};
pub use loader::{load_library, parse_library, LibraryError};
