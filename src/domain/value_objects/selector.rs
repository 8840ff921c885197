//! Selector value object - the subset of CSS selectors the widgets use
//!
//! Supported grammar:
//!
//! ```text
//! list      := complex ("," complex)*
//! complex   := compound (combinator compound)*
//! combinator:= whitespace | ">"
//! compound  := (ident | "*")? ("#" ident | "." ident | "[" ident ("=" value)? "]")*
//! ```
//!
//! Selectors are parsed once when the page is mounted; the in-memory document
//! matches them structurally and the browser host passes the source text
//! straight to `querySelectorAll`.

use std::fmt;

use logos::Logos;

use crate::domain::errors::DomainError;

#[derive(Logos, Debug, Clone, PartialEq)]
enum Token {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"-?[A-Za-z_][A-Za-z0-9_-]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"#[A-Za-z0-9_-]+", |lex| lex.slice()[1..].to_string())]
    Hash(String),

    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    #[regex(r"'[^']*'", |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Str(String),

    #[token(".")]
    Dot,

    #[token("*")]
    Star,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("=")]
    Equals,

    #[token(">")]
    Greater,

    #[token(",")]
    Comma,
}

/// Relationship between two compounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// `a b` - any ancestor
    Descendant,
    /// `a > b` - direct parent
    Child,
}

/// `[name]` or `[name=value]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeMatch {
    pub name: String,
    pub value: Option<String>,
}

/// Conditions on a single element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeMatch>,
}

/// Read access to an element tree, enough to evaluate a selector
pub trait ElementView {
    type Node: Copy;

    fn tag(&self, node: Self::Node) -> &str;
    fn has_class(&self, node: Self::Node, class: &str) -> bool;
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    /// Whether `node` satisfies every condition of this compound
    pub fn matches<V: ElementView>(&self, view: &V, node: V::Node) -> bool {
        if let Some(tag) = &self.tag {
            if !view.tag(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if view.attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| view.has_class(node, c)) {
            return false;
        }
        self.attributes.iter().all(|attr| match (&attr.value, view.attribute(node, &attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

impl ComplexSelector {
    fn matches<V: ElementView>(&self, view: &V, node: V::Node) -> bool {
        let last = self.compounds.len() - 1;
        self.compounds[last].matches(view, node) && self.matches_left_of(view, last, node)
    }

    /// `compounds[index]` already matched `node`; check everything to its left
    fn matches_left_of<V: ElementView>(&self, view: &V, index: usize, node: V::Node) -> bool {
        if index == 0 {
            return true;
        }
        let wanted = &self.compounds[index - 1];
        match self.combinators[index - 1] {
            Combinator::Child => match view.parent(node) {
                Some(parent) => {
                    wanted.matches(view, parent) && self.matches_left_of(view, index - 1, parent)
                }
                None => false,
            },
            Combinator::Descendant => {
                let mut ancestor = view.parent(node);
                while let Some(candidate) = ancestor {
                    if wanted.matches(view, candidate)
                        && self.matches_left_of(view, index - 1, candidate)
                    {
                        return true;
                    }
                    ancestor = view.parent(candidate);
                }
                false
            }
        }
    }
}

/// A parsed selector list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

impl Selector {
    /// Parse selector text
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer(input);
        while let Some(token) = lexer.next() {
            match token {
                Ok(token) => tokens.push(token),
                Err(()) => {
                    return Err(DomainError::selector(
                        input,
                        format!("unexpected character at {}", lexer.span().start),
                    ))
                }
            }
        }

        let alternatives = Parser { tokens, pos: 0, input }.parse_list()?;
        Ok(Self {
            source: input.trim().to_string(),
            alternatives,
        })
    }

    /// The selector text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `node` matches any alternative of the list
    pub fn matches<V: ElementView>(&self, view: &V, node: V::Node) -> bool {
        self.alternatives.iter().any(|c| c.matches(view, node))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    input: &'a str,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> DomainError {
        DomainError::selector(self.input, reason)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Skip whitespace, reporting whether any was there
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek() == Some(&Token::Whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(&mut self) -> Result<Vec<ComplexSelector>, DomainError> {
        let mut list = Vec::new();
        loop {
            self.skip_whitespace();
            list.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.bump() {
                None => return Ok(list),
                Some(Token::Comma) => continue,
                Some(other) => return Err(self.error(format!("unexpected {:?}", other))),
            }
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, DomainError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(Token::Comma) => break,
                Some(Token::Greater) => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(other) => return Err(self.error(format!("unexpected {:?}", other))),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, DomainError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some(Token::Ident(name)) => {
                compound.tag = Some(name.to_ascii_lowercase());
                self.pos += 1;
            }
            Some(Token::Star) => {
                universal = true;
                self.pos += 1;
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some(Token::Hash(id)) => {
                    compound.id = Some(id.clone());
                    self.pos += 1;
                }
                Some(Token::Dot) => {
                    self.pos += 1;
                    match self.bump() {
                        Some(Token::Ident(class)) => compound.classes.push(class),
                        _ => return Err(self.error("expected class name after '.'")),
                    }
                }
                Some(Token::LBracket) => {
                    self.pos += 1;
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() && !universal {
            return Err(self.error("expected a selector"));
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<AttributeMatch, DomainError> {
        self.skip_whitespace();
        let name = match self.bump() {
            Some(Token::Ident(name)) => name,
            _ => return Err(self.error("expected attribute name")),
        };
        self.skip_whitespace();

        let value = match self.bump() {
            Some(Token::RBracket) => return Ok(AttributeMatch { name, value: None }),
            Some(Token::Equals) => {
                self.skip_whitespace();
                match self.bump() {
                    Some(Token::Str(value)) | Some(Token::Ident(value)) => value,
                    _ => return Err(self.error("expected attribute value")),
                }
            }
            _ => return Err(self.error("expected ']' or '='")),
        };

        self.skip_whitespace();
        match self.bump() {
            Some(Token::RBracket) => Ok(AttributeMatch {
                name,
                value: Some(value),
            }),
            _ => Err(self.error("expected ']'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_forms() {
        for text in [
            ".hero",
            "#mobile-menu-toggle",
            "a",
            "*",
            ".nav-menu a",
            ".campaign-nav .carousel-prev",
            ".newsletter-form form",
            "ul > li.active",
            ".ranking-tab[data-tab=\"gift\"]",
            "[data-tab=gift]",
            ".slide, .tab",
        ] {
            let selector = Selector::parse(text).unwrap();
            assert_eq!(selector.as_str(), text);
        }
    }

    #[test]
    fn test_parse_structure() {
        let selector = Selector::parse("  .nav-menu  >  a.link[href] ").unwrap();
        assert_eq!(selector.as_str(), ".nav-menu  >  a.link[href]");
        assert_eq!(selector.alternatives.len(), 1);

        let complex = &selector.alternatives[0];
        assert_eq!(complex.combinators, vec![Combinator::Child]);
        assert_eq!(complex.compounds[0].classes, vec!["nav-menu".to_string()]);
        assert_eq!(complex.compounds[1].tag.as_deref(), Some("a"));
        assert_eq!(complex.compounds[1].attributes[0].name, "href");
        assert_eq!(complex.compounds[1].attributes[0].value, None);
    }

    #[test]
    fn test_parse_list_with_whitespace() {
        let selector = Selector::parse(".a .b , .c").unwrap();
        assert_eq!(selector.alternatives.len(), 2);
        assert_eq!(
            selector.alternatives[0].combinators,
            vec![Combinator::Descendant]
        );
    }

    #[test]
    fn test_parse_errors() {
        for text in ["", "   ", ".", "a >", ", a", "[data-tab", "a!b", "#", ".a..b"] {
            assert!(
                matches!(Selector::parse(text), Err(DomainError::InvalidSelector { .. })),
                "{:?} should not parse",
                text
            );
        }
    }

    #[test]
    fn test_from_str() {
        let selector: Selector = ".hero".parse().unwrap();
        assert_eq!(selector.to_string(), ".hero");
    }
}
