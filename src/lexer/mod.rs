//! Lexing and parsing of top-level property selectors.
//!
//! A top-level query key is either a plain root property name or an aliased
//! form `property = @alias`, requesting the property under a caller-chosen
//! result label. At most one space is allowed on each side of `=`.

pub mod token;

use logos::Logos;
use token::{Span, Token, TokenKind};

/// Result of lexing a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    pub tokens: Vec<Token>,
    /// Span of the first unrecognized input, if any. Lexing stops there.
    pub error: Option<Span>,
}

/// Splits a selector into tokens.
pub fn tokenize(source: &str) -> LexerResult {
    let mut tokens = Vec::new();
    for (kind, span) in TokenKind::lexer(source).spanned() {
        match kind {
            Ok(kind) => tokens.push(Token::new(kind, span)),
            Err(()) => {
                return LexerResult {
                    tokens,
                    error: Some(span),
                };
            }
        }
    }
    LexerResult {
        tokens,
        error: None,
    }
}

/// A parsed `property = @alias` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasedSelector<'a> {
    /// The root property being requested.
    pub property: &'a str,
    /// The result label, without its `@`.
    pub alias: &'a str,
}

/// Parses an aliased selector, returning `None` if `source` is not one.
pub fn parse_aliased(source: &str) -> Option<AliasedSelector<'_>> {
    let lexed = tokenize(source);
    if lexed.error.is_some() {
        return None;
    }

    let mut tokens = lexed.tokens.iter().peekable();
    let property = tokens.next().filter(|t| t.kind == TokenKind::Identifier)?;
    tokens.next_if(|t| t.kind == TokenKind::Space);
    tokens.next().filter(|t| t.kind == TokenKind::Eq)?;
    tokens.next_if(|t| t.kind == TokenKind::Space);
    let alias = tokens.next().filter(|t| t.kind == TokenKind::Alias)?;
    if tokens.next().is_some() {
        return None;
    }

    Some(AliasedSelector {
        property: property.slice(source),
        alias: &alias.slice(source)[1..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_aliased_selector() {
        let result = tokenize("users = @admins");
        assert!(result.error.is_none());
        let kinds: Vec<_> = result.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::Eq,
                TokenKind::Space,
                TokenKind::Alias,
            ]
        );
    }

    #[test]
    fn tokenize_stops_at_unrecognized_input() {
        let result = tokenize("users#x");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.error, Some(5..6));
    }

    #[test]
    fn uppercase_leading_name_is_not_an_identifier() {
        let result = tokenize("Users");
        assert!(result.error.is_some());
    }

    #[test]
    fn parse_with_and_without_spaces() {
        for source in ["users=@u", "users =@u", "users= @u", "users = @u"] {
            let selector = parse_aliased(source).unwrap();
            assert_eq!(selector.property, "users");
            assert_eq!(selector.alias, "u");
        }
    }

    #[test]
    fn parse_keeps_identifier_characters() {
        let selector = parse_aliased("birth_Date2 = @born_on").unwrap();
        assert_eq!(selector.property, "birth_Date2");
        assert_eq!(selector.alias, "born_on");
    }

    #[test]
    fn parse_rejects_malformed_selectors() {
        for source in [
            "",
            "users",
            "wrongProp",
            "users = admins",
            "users = @Admins",
            "Users = @admins",
            "users  = @admins",
            "users =  @admins",
            "users = @admins extra",
            "users = @a = @b",
            "= @admins",
            "users\t= @admins",
            "@admins = users",
        ] {
            assert!(parse_aliased(source).is_none(), "{source:?} should not parse");
        }
    }
}
