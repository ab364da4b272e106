//! Token types for the netlist lexer.
//!
//! Defines the [`TokenKind`] enum covering the netlist format's keywords and
//! punctuation, plus the [`Token`] struct pairing a token kind with its
//! source [`Span`].

use anvil_source::Span;
use serde::{Deserialize, Serialize};

/// A netlist token kind.
///
/// Identifier text is not stored in the token; it is retrieved from the
/// source text using the token's span.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    // === Keywords ===
    /// `module`
    Module,
    /// `endmodule`
    Endmodule,
    /// `input`
    Input,
    /// `output`
    Output,
    /// `wire`
    Wire,

    /// An identifier (signal, gate instance, or gate/cell type name).
    Identifier,

    // === Punctuation ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,

    /// A lexing error (reported via the diagnostic sink).
    Error,
    /// End of input. Always the last token in a stream.
    Eof,
}

/// A token with its source location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The byte range of this token in the source file.
    pub span: Span,
}

/// Looks up a keyword token for the given identifier text.
///
/// Keywords are case-sensitive and must appear in lowercase. Returns `None`
/// for ordinary identifiers.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    match text {
        "module" => Some(TokenKind::Module),
        "endmodule" => Some(TokenKind::Endmodule),
        "input" => Some(TokenKind::Input),
        "output" => Some(TokenKind::Output),
        "wire" => Some(TokenKind::Wire),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_recognized() {
        assert_eq!(lookup_keyword("module"), Some(TokenKind::Module));
        assert_eq!(lookup_keyword("endmodule"), Some(TokenKind::Endmodule));
        assert_eq!(lookup_keyword("input"), Some(TokenKind::Input));
        assert_eq!(lookup_keyword("output"), Some(TokenKind::Output));
        assert_eq!(lookup_keyword("wire"), Some(TokenKind::Wire));
    }

    #[test]
    fn keywords_case_sensitive() {
        assert_eq!(lookup_keyword("Module"), None);
        assert_eq!(lookup_keyword("WIRE"), None);
    }

    #[test]
    fn identifiers_not_keywords() {
        assert_eq!(lookup_keyword("AND2"), None);
        assert_eq!(lookup_keyword("g1"), None);
        assert_eq!(lookup_keyword("module_sel"), None);
    }
}
