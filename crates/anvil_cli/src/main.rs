//! Anvil CLI — the command-line interface for the Anvil technology mapper.
//!
//! Provides `anvil map` for running the annealing search over gate-to-cell
//! mappings, and `anvil check` for validating a netlist and cell library
//! without running the optimizer.

#![warn(missing_docs)]

mod check;
mod map;
mod pipeline;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Anvil — simulated-annealing technology mapping.
#[derive(Parser, Debug)]
#[command(name = "anvil", version, about = "Anvil Technology Mapper")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output, including search progress notes.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `anvil.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the annealing search and write the best mapped netlist.
    Map(MapArgs),
    /// Validate a netlist and cell library without optimizing.
    Check(CheckArgs),
}

/// Arguments for the `anvil map` subcommand.
#[derive(Parser, Debug)]
pub struct MapArgs {
    /// Input gate-level netlist file.
    pub netlist: String,

    /// Cell library JSON file.
    pub library: String,

    /// Cost estimator executable.
    pub estimator: String,

    /// Path for the best mapped netlist.
    #[arg(short, long, default_value = "mapped_netlist.v")]
    pub output: String,

    /// Scratch path for the candidate netlist handed to the estimator.
    #[arg(long, default_value = "candidate_netlist.v")]
    pub candidate_file: String,

    /// Scratch path the estimator writes its result to.
    #[arg(long, default_value = "estimator_result.txt")]
    pub result_file: String,

    /// Wall-clock search budget in seconds (overrides the config file).
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// RNG seed for a reproducible run (overrides the config file).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `anvil check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Input gate-level netlist file.
    pub netlist: String,

    /// Cell library JSON file.
    pub library: String,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print search progress notes.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Map(ref args) => map::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Rough terminal detection — checks if stdout is a terminal.
fn atty_is_terminal() -> bool {
    // Use a simple heuristic: check the TERM env var.
    // In a real build we'd use the `is-terminal` crate, but this is
    // sufficient for now.
    std::env::var("TERM").is_ok()
}
