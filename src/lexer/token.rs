//! Token types for property selectors.

use logos::Logos;
use std::fmt;

/// Byte range of a token in its source.
pub type Span = std::ops::Range<usize>;

/// The kind of a lexical token in a property selector.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Property name, e.g. `users`.
    #[regex("[a-z][a-zA-Z0-9_]*")]
    Identifier,

    /// Result label, e.g. `@admins`.
    #[regex("@[a-z][a-zA-Z0-9_]*")]
    Alias,

    #[token("=")]
    Eq,

    /// A single space; selectors allow at most one around `=`.
    #[token(" ")]
    Space,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Alias => write!(f, "alias"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::Space => write!(f, "space"),
        }
    }
}

/// A lexical token with its kind and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the source slice covered by this token.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}
