//! Simple-selector parsing and matching for component-scoped queries.
//!
//! Supports compound simple selectors (`tag`, `.class`, `#id`, `[attr]`,
//! `[attr=value]`, `*`) and comma-separated lists of them. Combinators
//! (descendant/child) are not supported: scoped queries already run over one
//! component's subtree, so a flat compound is all lifecycle scripts need.

use logos::Logos;

use super::node::ElementData;

/// Selector token produced by the lexer.
///
/// Token priority in logos is determined by longest match first, then
/// earlier-defined variants. Quoted strings are defined before `Ident` so
/// `[k="v"]` lexes its value as one token.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Identifier: tag names, class names, attribute names/values.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// Whitespace (kept as a token: it would mean a descendant combinator,
    /// which this engine rejects rather than silently mis-matching).
    #[regex(r"[ \t\n\r\f]+")]
    Whitespace,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `,`
    #[token(",")]
    Comma,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `=`
    #[token("=")]
    Equals,
}

/// Errors from selector parsing.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected input in selector: {0:?}")]
    Unexpected(String),
    #[error("combinators are not supported in scoped queries: {0:?}")]
    UnsupportedCombinator(String),
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}

/// One simple selector within a compound.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// Type selector: matches the element's tag name.
    Tag(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector: `[name]` or `[name=value]`.
    Attr {
        name: String,
        value: Option<String>,
    },
}

/// A compound selector: simple selectors that must all match one element,
/// e.g. `button.primary[disabled]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub parts: Vec<SelectorPart>,
}

impl Compound {
    /// Whether this compound matches the element.
    pub fn matches(&self, el: &ElementData) -> bool {
        self.parts.iter().all(|part| match part {
            SelectorPart::Tag(tag) => el.tag == *tag,
            SelectorPart::Universal => true,
            SelectorPart::Class(class) => el.has_class(class),
            SelectorPart::Id(id) => el.attr("id") == Some(id.as_str()),
            SelectorPart::Attr { name, value: None } => el.has_attr(name),
            SelectorPart::Attr {
                name,
                value: Some(v),
            } => el.attr(name) == Some(v.as_str()),
        })
    }
}

/// A parsed selector list: comma-separated compound alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub compounds: Vec<Compound>,
}

impl SelectorList {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let tokens: Vec<(Token, String)> = Token::lexer(input)
            .spanned()
            .map(|(result, span)| {
                let text = input[span].to_string();
                match result {
                    Ok(token) => Ok((token, text)),
                    Err(()) => Err(SelectorError::Unexpected(text)),
                }
            })
            .collect::<Result<_, _>>()?;

        let mut compounds = Vec::new();
        let mut current: Vec<SelectorPart> = Vec::new();
        let mut after_part = false;
        let mut iter = tokens.into_iter().peekable();

        while let Some((token, text)) = iter.next() {
            match token {
                Token::Whitespace => {
                    // Whitespace between two simple selectors would be a
                    // descendant combinator.
                    if after_part
                        && iter
                            .peek()
                            .is_some_and(|(next, _)| !matches!(next, Token::Comma | Token::Whitespace))
                    {
                        return Err(SelectorError::UnsupportedCombinator(input.to_string()));
                    }
                }
                Token::Comma => {
                    if current.is_empty() {
                        return Err(SelectorError::Empty);
                    }
                    compounds.push(Compound {
                        parts: std::mem::take(&mut current),
                    });
                    after_part = false;
                }
                Token::Ident => {
                    if after_part {
                        return Err(SelectorError::Unexpected(text));
                    }
                    current.push(SelectorPart::Tag(text.to_ascii_lowercase()));
                    after_part = true;
                }
                Token::Star => {
                    current.push(SelectorPart::Universal);
                    after_part = true;
                }
                Token::Dot => match iter.next() {
                    Some((Token::Ident, class)) => {
                        current.push(SelectorPart::Class(class));
                        after_part = true;
                    }
                    other => {
                        return Err(SelectorError::Unexpected(
                            other.map(|(_, t)| t).unwrap_or_default(),
                        ))
                    }
                },
                Token::Hash => match iter.next() {
                    Some((Token::Ident, id)) => {
                        current.push(SelectorPart::Id(id));
                        after_part = true;
                    }
                    other => {
                        return Err(SelectorError::Unexpected(
                            other.map(|(_, t)| t).unwrap_or_default(),
                        ))
                    }
                },
                Token::BracketOpen => {
                    let name = match iter.next() {
                        Some((Token::Ident, name)) => name,
                        Some((_, text)) => return Err(SelectorError::Unexpected(text)),
                        None => return Err(SelectorError::UnterminatedAttribute),
                    };
                    let value = match iter.next() {
                        Some((Token::BracketClose, _)) => None,
                        Some((Token::Equals, _)) => {
                            let value = match iter.next() {
                                Some((Token::Ident, v)) => v,
                                Some((Token::StringLiteral | Token::StringLiteralSingle, v)) => {
                                    v[1..v.len() - 1].to_string()
                                }
                                Some((_, text)) => return Err(SelectorError::Unexpected(text)),
                                None => return Err(SelectorError::UnterminatedAttribute),
                            };
                            match iter.next() {
                                Some((Token::BracketClose, _)) => {}
                                Some((_, text)) => return Err(SelectorError::Unexpected(text)),
                                None => return Err(SelectorError::UnterminatedAttribute),
                            }
                            Some(value)
                        }
                        Some((_, text)) => return Err(SelectorError::Unexpected(text)),
                        None => return Err(SelectorError::UnterminatedAttribute),
                    };
                    current.push(SelectorPart::Attr { name, value });
                    after_part = true;
                }
                Token::Equals | Token::BracketClose
                | Token::StringLiteral | Token::StringLiteralSingle => {
                    return Err(SelectorError::Unexpected(text));
                }
            }
        }

        if current.is_empty() {
            return Err(SelectorError::Empty);
        }
        compounds.push(Compound { parts: current });
        Ok(Self { compounds })
    }

    /// Whether any compound in the list matches the element.
    pub fn matches(&self, el: &ElementData) -> bool {
        self.compounds.iter().any(|c| c.matches(el))
    }
}
