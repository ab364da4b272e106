//! Shared input loading and diagnostic rendering for the subcommands.

use std::error::Error;
use std::path::Path;

use anvil_cells::{load_library, CandidateIndex, CellLibrary};
use anvil_config::{load_config, ToolConfig};
use anvil_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer,
};
use anvil_netlist::{parse, Netlist};
use anvil_source::SourceDb;

use crate::GlobalArgs;

/// Resolves the tool configuration.
///
/// An explicit `--config` path must exist and parse; otherwise `anvil.toml`
/// in the current directory is used when present, and built-in defaults
/// when not.
pub fn resolve_config(global: &GlobalArgs) -> Result<ToolConfig, Box<dyn Error>> {
    if let Some(path) = &global.config {
        return Ok(load_config(Path::new(path))?);
    }
    let default = Path::new("anvil.toml");
    if default.is_file() {
        return Ok(load_config(default)?);
    }
    Ok(ToolConfig::default())
}

/// Loads and parses the netlist file, recording diagnostics in the sink.
pub fn load_netlist(
    path: &str,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Result<Netlist, Box<dyn Error>> {
    let file_id = source_db
        .load_file(Path::new(path))
        .map_err(|e| format!("failed to read {path}: {e}"))?;
    let content = source_db.get_file(file_id).content.clone();
    Ok(parse(&content, file_id, sink))
}

/// Loads the cell library and builds the candidate index.
pub fn load_candidates(path: &str) -> Result<(CellLibrary, CandidateIndex), Box<dyn Error>> {
    let library = load_library(Path::new(path))?;
    let index = CandidateIndex::build(&library);
    Ok((library, index))
}

/// Renders accumulated diagnostics to stderr.
///
/// Errors always print; warnings are suppressed under `--quiet`; notes
/// (search progress) only print under `--verbose`.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    source_db: &SourceDb,
    global: &GlobalArgs,
) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        let show = match diag.severity {
            Severity::Error => true,
            Severity::Warning => !global.quiet,
            Severity::Note => global.verbose,
        };
        if show {
            eprintln!("{}", renderer.render(diag, source_db));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let global = GlobalArgs {
            config: Some("/nonexistent/anvil.toml".to_string()),
            ..quiet_global()
        };
        assert!(resolve_config(&global).is_err());
    }

    #[test]
    fn absent_config_falls_back_to_defaults() {
        let config = resolve_config(&quiet_global()).unwrap();
        assert_eq!(config.anneal.initial_temp, 1000.0);
    }

    #[test]
    fn missing_netlist_file_is_an_error() {
        let mut source_db = SourceDb::new();
        let sink = DiagnosticSink::new();
        assert!(load_netlist("/nonexistent/design.v", &mut source_db, &sink).is_err());
    }

    #[test]
    fn missing_library_file_is_an_error() {
        assert!(load_candidates("/nonexistent/cells.json").is_err());
    }
}
