//! Diagnostic creation, severity management, and rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity
//! levels, diagnostic codes, and optional source spans. The thread-safe
//! [`DiagnosticSink`] accumulates diagnostics during a run. It is the log
//! sink injected into the parser, the writer, and the optimizer, so library
//! code never prints or terminates the process. [`DiagnosticRenderer`]
//! implementations format accumulated diagnostics for terminal output.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
