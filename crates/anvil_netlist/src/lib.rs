//! Gate-level netlist model, text parser, and canonicalizing writer.
//!
//! The netlist text format has four statement kinds: a module header with a
//! port list, `input`/`output`/`wire` declarations (comma-separated
//! identifiers terminated by `;`, possibly spanning several lines), and gate
//! instantiations `<type> <name> ( <sig0>, ..., <sigN> );` where the last
//! signal is the gate's output. The same convention is used by the
//! [`writer`], which additionally canonicalizes port and wire sets so that
//! serialization is deterministic.

#![warn(missing_docs)]

pub mod lexer;
pub mod mapping;
pub mod netlist;
pub mod parser;
pub mod token;
pub mod writer;

pub use mapping::Mapping;
pub use netlist::{Gate, Netlist};
pub use parser::parse;
pub use token::{Token, TokenKind};
pub use writer::{render_netlist, write_netlist_file};
