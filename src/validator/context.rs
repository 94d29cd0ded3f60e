//! Path tracking for error reporting.

use smol_str::SmolStr;
use std::fmt;

/// Token every validation path starts with.
pub const ROOT_TOKEN: &str = "root";

/// Immutable, append-only trail of selection tokens.
///
/// Extending a context borrows its parent instead of copying it, so sibling
/// branches share their common prefix and each context lives exactly as long
/// as the recursion frame that created it.
#[derive(Debug, Clone)]
pub struct PathContext<'p> {
    token: SmolStr,
    parent: Option<&'p PathContext<'p>>,
}

impl<'p> PathContext<'p> {
    /// Creates a context holding a single token.
    pub fn new(token: impl Into<SmolStr>) -> Self {
        Self {
            token: token.into(),
            parent: None,
        }
    }

    /// Creates the context every validation starts from.
    pub fn root() -> Self {
        Self::new(ROOT_TOKEN)
    }

    /// Returns a new context with `token` appended.
    pub fn extend(&'p self, token: impl Into<SmolStr>) -> PathContext<'p> {
        PathContext {
            token: token.into(),
            parent: Some(self),
        }
    }

    /// The last token of the path.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Number of tokens in the path.
    pub fn depth(&self) -> usize {
        self.parent.map_or(1, |parent| parent.depth() + 1)
    }

    /// Tokens from root to this context.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = Vec::with_capacity(self.depth());
        let mut current = Some(self);
        while let Some(ctx) = current {
            tokens.push(ctx.token.as_str());
            current = ctx.parent;
        }
        tokens.reverse();
        tokens
    }

    /// Tokens joined by `.`.
    pub fn render(&self) -> String {
        self.tokens().join(".")
    }
}

impl fmt::Display for PathContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
