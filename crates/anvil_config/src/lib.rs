//! Loading and validation of the optional `anvil.toml` configuration.
//!
//! The configuration controls the annealing schedule, wall-clock budget,
//! RNG seed, and output paths. Every field has a default, so a missing
//! configuration file is not an error; a present but malformed one is.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{AnnealSettings, OutputSettings, ToolConfig};
