//! Configuration types deserialized from `anvil.toml`.

use serde::Deserialize;

/// The top-level tool configuration parsed from `anvil.toml`.
///
/// Both tables are optional; defaults reproduce the tool's built-in
/// behavior (3-hour budget, T0 = 1000, cooling rate 0.95).
#[derive(Debug, Default, Deserialize)]
pub struct ToolConfig {
    /// Annealing schedule and budget settings.
    #[serde(default)]
    pub anneal: AnnealSettings,
    /// Output path settings.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Annealing schedule and budget settings from the `[anneal]` table.
#[derive(Debug, Deserialize)]
pub struct AnnealSettings {
    /// Initial temperature `T0`.
    #[serde(default = "default_initial_temp")]
    pub initial_temp: f64,
    /// Geometric cooling rate applied every iteration.
    #[serde(default = "default_cooling")]
    pub cooling: f64,
    /// Wall-clock search budget in seconds.
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,
    /// RNG seed; omit for a nondeterministic run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Per-call cost estimator timeout in seconds; omit for no timeout.
    #[serde(default)]
    pub oracle_timeout_secs: Option<u64>,
}

/// Output path settings from the `[output]` table.
#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    /// Path of the single-line best-cost status file.
    #[serde(default = "default_status_file")]
    pub status_file: String,
}

fn default_initial_temp() -> f64 {
    1000.0
}

fn default_cooling() -> f64 {
    0.95
}

fn default_time_limit_secs() -> u64 {
    3 * 60 * 60
}

fn default_status_file() -> String {
    "cost_output.txt".to_string()
}

impl Default for AnnealSettings {
    fn default() -> Self {
        Self {
            initial_temp: default_initial_temp(),
            cooling: default_cooling(),
            time_limit_secs: default_time_limit_secs(),
            seed: None,
            oracle_timeout_secs: None,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            status_file: default_status_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.anneal.initial_temp, 1000.0);
        assert_eq!(config.anneal.cooling, 0.95);
        assert_eq!(config.anneal.time_limit_secs, 10800);
        assert!(config.anneal.seed.is_none());
        assert_eq!(config.output.status_file, "cost_output.txt");
    }
}
