//! Recursive descent parser for the netlist text format.
//!
//! The [`NetlistParser`] consumes a token stream produced by the lexer and
//! builds a [`Netlist`]. Each of the four statement kinds has an explicit
//! parsing rule; declarations may span multiple lines until their
//! terminating `;`. Errors are reported to the diagnostic sink and recovery
//! skips to the next `;`, so one malformed statement does not poison the
//! rest of the module.

use crate::lexer::lex;
use crate::netlist::{Gate, Netlist};
use crate::token::{Token, TokenKind};
use anvil_diagnostics::code::{Category, DiagnosticCode};
use anvil_diagnostics::{Diagnostic, DiagnosticSink};
use anvil_source::{FileId, Span};
use std::collections::HashSet;

/// Parses netlist source text into a [`Netlist`].
///
/// Parse errors are emitted to the sink; the returned netlist contains
/// whatever was recovered. Callers treat `sink.has_errors()` after parsing
/// as a fatal load failure. Post-parse validation problems (undeclared gate
/// inputs, duplicate gate outputs) are emitted as warnings only.
pub fn parse(source: &str, file: FileId, sink: &DiagnosticSink) -> Netlist {
    let tokens = lex(source, file, sink);
    let mut parser = NetlistParser {
        tokens,
        pos: 0,
        source,
        sink,
    };
    let netlist = parser.parse_module();
    validate(&netlist, sink);
    netlist
}

struct NetlistParser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
    sink: &'src DiagnosticSink,
}

impl<'src> NetlistParser<'src> {
    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &'src str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(&format!("expected {what}"), self.current_span());
            false
        }
    }

    /// Expects and returns an identifier, or `None` with an error emitted.
    fn expect_ident(&mut self, what: &str) -> Option<String> {
        if self.at(TokenKind::Identifier) {
            let text = self.current_text().to_string();
            self.advance();
            Some(text)
        } else {
            self.error(&format!("expected {what}"), self.current_span());
            None
        }
    }

    fn error(&self, msg: &str, span: Span) {
        self.sink.emit(Diagnostic::error(
            DiagnosticCode::new(Category::Error, 110),
            msg,
            span,
        ));
    }

    /// Error recovery: skips tokens up to and including the next `;`.
    fn recover_to_semicolon(&mut self) {
        while !self.at_eof() && !self.at(TokenKind::Endmodule) {
            if self.eat(TokenKind::Semicolon) {
                return;
            }
            self.advance();
        }
    }

    // ========================================================================
    // Statement rules
    // ========================================================================

    fn parse_module(&mut self) -> Netlist {
        let mut netlist = Netlist::default();

        if !self.expect(TokenKind::Module, "`module`") {
            self.recover_to_semicolon();
        }
        if let Some(name) = self.expect_ident("module name") {
            netlist.name = name;
        }

        // Header port list. The names here are informational; the
        // input/output declarations in the body are authoritative.
        if self.eat(TokenKind::LeftParen) {
            if !self.at(TokenKind::RightParen) {
                self.parse_ident_list();
            }
            self.expect(TokenKind::RightParen, "`)`");
        }
        self.expect(TokenKind::Semicolon, "`;` after module header");

        while !self.at_eof() && !self.at(TokenKind::Endmodule) {
            match self.current() {
                TokenKind::Input => {
                    self.advance();
                    let names = self.parse_ident_list();
                    self.expect(TokenKind::Semicolon, "`;` after input declaration");
                    netlist.inputs.extend(names);
                }
                TokenKind::Output => {
                    self.advance();
                    let names = self.parse_ident_list();
                    self.expect(TokenKind::Semicolon, "`;` after output declaration");
                    netlist.outputs.extend(names);
                }
                TokenKind::Wire => {
                    self.advance();
                    let names = self.parse_ident_list();
                    self.expect(TokenKind::Semicolon, "`;` after wire declaration");
                    netlist.wires.extend(names);
                }
                TokenKind::Identifier => {
                    if let Some(gate) = self.parse_gate() {
                        netlist.gates.push(gate);
                    }
                }
                _ => {
                    self.error(
                        &format!("expected statement, found {:?}", self.current()),
                        self.current_span(),
                    );
                    self.advance();
                    self.recover_to_semicolon();
                }
            }
        }

        if !self.eat(TokenKind::Endmodule) {
            self.sink.emit(Diagnostic::error(
                DiagnosticCode::new(Category::Error, 111),
                "missing `endmodule`",
                self.current_span(),
            ));
        }

        netlist
    }

    /// Parses a comma-separated identifier list (at least one identifier).
    fn parse_ident_list(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(name) = self.expect_ident("identifier") {
            names.push(name);
        }
        while self.eat(TokenKind::Comma) {
            if let Some(name) = self.expect_ident("identifier") {
                names.push(name);
            } else {
                break;
            }
        }
        names
    }

    /// Parses a gate instantiation: `<type> <name> ( <sig0>, ..., <sigN> );`
    ///
    /// The last signal is the gate's output; all preceding signals are inputs.
    fn parse_gate(&mut self) -> Option<Gate> {
        let start_span = self.current_span();
        let cell_type = self.current_text().to_string();
        self.advance();

        let name = match self.expect_ident("gate instance name") {
            Some(name) => name,
            None => {
                self.recover_to_semicolon();
                return None;
            }
        };

        if !self.expect(TokenKind::LeftParen, "`(`") {
            self.recover_to_semicolon();
            return None;
        }

        let mut signals = self.parse_ident_list();

        if !self.expect(TokenKind::RightParen, "`)`") {
            self.recover_to_semicolon();
            return None;
        }
        self.expect(TokenKind::Semicolon, "`;` after gate instantiation");

        if signals.is_empty() {
            self.sink.emit(Diagnostic::error(
                DiagnosticCode::new(Category::Error, 112),
                format!("gate '{name}' has no connections"),
                start_span,
            ));
            return None;
        }

        let output = signals.pop().unwrap();
        Some(Gate {
            name,
            cell_type,
            inputs: signals,
            output,
        })
    }
}

/// Post-parse validation: warns about gate inputs that are not declared as
/// an input, output, or wire, and about duplicate gate output names.
///
/// These are assumed invariants of well-formed netlists, but legacy inputs
/// violating them still load; the problems are surfaced as warnings.
fn validate(netlist: &Netlist, sink: &DiagnosticSink) {
    let declared: HashSet<&str> = netlist
        .inputs
        .iter()
        .chain(netlist.outputs.iter())
        .chain(netlist.wires.iter())
        .map(String::as_str)
        .collect();

    let gate_outputs: HashSet<&str> = netlist.gates.iter().map(|g| g.output.as_str()).collect();

    let mut seen_outputs = HashSet::new();
    for gate in &netlist.gates {
        for input in &gate.inputs {
            // A signal driven by another gate counts as declared even when
            // the wire declaration was omitted.
            if !declared.contains(input.as_str()) && !gate_outputs.contains(input.as_str()) {
                sink.emit(Diagnostic::warning(
                    DiagnosticCode::new(Category::Warning, 203),
                    format!(
                        "gate '{}' input '{}' is not a declared input, output, or wire",
                        gate.name, input
                    ),
                    Span::DUMMY,
                ));
            }
        }
        if !seen_outputs.insert(gate.output.as_str()) {
            sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Warning, 204),
                format!(
                    "signal '{}' is driven by more than one gate",
                    gate.output
                ),
                Span::DUMMY,
            ));
        }
    }
}
