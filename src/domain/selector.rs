//! Compound selectors used to locate elements.
//!
//! Supports the subset the enhancement layer relies on: type, `#id`,
//! `.class`, `[attr]`, `[attr="v"]`, `[attr^="v"]` and `:not(simple)`,
//! combined into comma-separated lists. There are no combinators; queries
//! are scoped to a root element instead.
//!
//! # Example
//! ```
//! use site_enhance::domain::selector::SelectorList;
//!
//! let list: SelectorList = "a[href], button:not([disabled])".parse().unwrap();
//! assert_eq!(list.len(), 2);
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a selector string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,
    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },
    #[error("expected an identifier at offset {offset}")]
    MissingIdent { offset: usize },
    #[error("unterminated attribute selector starting at offset {offset}")]
    UnterminatedAttribute { offset: usize },
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("unsupported pseudo-class at offset {offset}")]
    UnsupportedPseudo { offset: usize },
}

/// Read-only view of an element, enough to evaluate a selector.
pub trait ElementView {
    /// Lower-case tag name.
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Attribute comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

/// A single simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simple {
    Tag(String),
    Id(String),
    Class(String),
    Attr { name: String, op: AttrOp },
}

impl Simple {
    fn matches<E: ElementView + ?Sized>(&self, element: &E) -> bool {
        match self {
            Simple::Tag(tag) => element.tag().eq_ignore_ascii_case(tag),
            Simple::Id(id) => element.attribute("id") == Some(id.as_str()),
            Simple::Class(class) => element.has_class(class),
            Simple::Attr { name, op } => match (element.attribute(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(value), AttrOp::Equals(expected)) => value == expected,
                (Some(value), AttrOp::Prefix(prefix)) => value.starts_with(prefix.as_str()),
            },
        }
    }
}

impl fmt::Display for Simple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Simple::Tag(tag) => write!(f, "{tag}"),
            Simple::Id(id) => write!(f, "#{id}"),
            Simple::Class(class) => write!(f, ".{class}"),
            Simple::Attr { name, op } => match op {
                AttrOp::Exists => write!(f, "[{name}]"),
                AttrOp::Equals(v) => write!(f, "[{name}=\"{v}\"]"),
                AttrOp::Prefix(v) => write!(f, "[{name}^=\"{v}\"]"),
            },
        }
    }
}

/// Simple selectors that must all match, plus negated ones that must not.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    parts: Vec<Simple>,
    negations: Vec<Simple>,
}

impl Compound {
    pub fn matches<E: ElementView + ?Sized>(&self, element: &E) -> bool {
        self.parts.iter().all(|s| s.matches(element))
            && !self.negations.iter().any(|s| s.matches(element))
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            write!(f, "*")?;
        }
        for part in &self.parts {
            write!(f, "{part}")?;
        }
        for negation in &self.negations {
            write!(f, ":not({negation})")?;
        }
        Ok(())
    }
}

/// Comma-separated list of compound selectors; matches if any member does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(Vec<Compound>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse_list()
    }

    pub fn matches<E: ElementView + ?Sized>(&self, element: &E) -> bool {
        self.0.iter().any(|c| c.matches(element))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(SelectorError::Unexpected {
                found,
                offset: self.pos,
            }),
            None => Err(SelectorError::MissingIdent { offset: self.pos }),
        }
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut compounds = Vec::new();
        loop {
            self.skip_ws();
            if self.peek().is_none() {
                break;
            }
            compounds.push(self.parse_compound()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.bump();
                }
                Some(found) => {
                    return Err(SelectorError::Unexpected {
                        found,
                        offset: self.pos,
                    })
                }
            }
        }
        if compounds.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(SelectorList(compounds))
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let start = self.pos;

        if self.peek() == Some('*') {
            self.bump();
        } else if self.peek().is_some_and(is_ident_char) {
            compound.parts.push(Simple::Tag(self.ident()?.to_ascii_lowercase()));
        }

        loop {
            match self.peek() {
                Some(':') => {
                    let offset = self.pos;
                    self.bump();
                    if !self.input[self.pos..].starts_with("not(") {
                        return Err(SelectorError::UnsupportedPseudo { offset });
                    }
                    self.pos += "not(".len();
                    self.skip_ws();
                    let negated = self.parse_simple()?;
                    self.skip_ws();
                    self.expect(')')?;
                    compound.negations.push(negated);
                }
                Some('#' | '.' | '[') => compound.parts.push(self.parse_simple()?),
                _ => break,
            }
        }

        if self.pos == start {
            return match self.peek() {
                Some(found) => Err(SelectorError::Unexpected {
                    found,
                    offset: self.pos,
                }),
                None => Err(SelectorError::MissingIdent { offset: self.pos }),
            };
        }
        Ok(compound)
    }

    fn parse_simple(&mut self) -> Result<Simple, SelectorError> {
        match self.peek() {
            Some('#') => {
                self.bump();
                Ok(Simple::Id(self.ident()?))
            }
            Some('.') => {
                self.bump();
                Ok(Simple::Class(self.ident()?))
            }
            Some('[') => self.parse_attr(),
            Some(c) if is_ident_char(c) => Ok(Simple::Tag(self.ident()?.to_ascii_lowercase())),
            Some(found) => Err(SelectorError::Unexpected {
                found,
                offset: self.pos,
            }),
            None => Err(SelectorError::MissingIdent { offset: self.pos }),
        }
    }

    fn parse_attr(&mut self) -> Result<Simple, SelectorError> {
        let open = self.pos;
        self.bump();
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();
        let op = match self.peek() {
            Some(']') => AttrOp::Exists,
            Some('=') => {
                self.bump();
                AttrOp::Equals(self.attr_value()?)
            }
            Some('^') => {
                self.bump();
                self.expect('=')?;
                AttrOp::Prefix(self.attr_value()?)
            }
            Some(found) => {
                return Err(SelectorError::Unexpected {
                    found,
                    offset: self.pos,
                })
            }
            None => return Err(SelectorError::UnterminatedAttribute { offset: open }),
        };
        self.skip_ws();
        match self.bump() {
            Some(']') => Ok(Simple::Attr { name, op }),
            _ => Err(SelectorError::UnterminatedAttribute { offset: open }),
        }
    }

    fn attr_value(&mut self) -> Result<String, SelectorError> {
        self.skip_ws();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let open = self.pos;
                self.bump();
                let rest = &self.input[self.pos..];
                let end = rest
                    .find(quote)
                    .ok_or(SelectorError::UnterminatedString { offset: open })?;
                let value = rest[..end].to_owned();
                self.pos += end + quote.len_utf8();
                Ok(value)
            }
            _ => self.ident(),
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(SelectorError::MissingIdent { offset: start });
        }
        Ok(self.input[start..self.pos].to_owned())
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct Fake {
        tag: &'static str,
        classes: Vec<&'static str>,
        attrs: BTreeMap<&'static str, &'static str>,
    }

    impl Fake {
        fn new(tag: &'static str) -> Self {
            Self {
                tag,
                classes: Vec::new(),
                attrs: BTreeMap::new(),
            }
        }

        fn class(mut self, class: &'static str) -> Self {
            self.classes.push(class);
            self
        }

        fn attr(mut self, name: &'static str, value: &'static str) -> Self {
            self.attrs.insert(name, value);
            self
        }
    }

    impl ElementView for Fake {
        fn tag(&self) -> &str {
            self.tag
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(&class)
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.get(name).copied()
        }
    }

    #[test]
    fn test_compound_with_id_and_class() {
        let list = SelectorList::parse(".c-nav#main-nav").unwrap();
        let nav = Fake::new("nav").class("c-nav").attr("id", "main-nav");
        let other = Fake::new("nav").class("c-nav");
        assert!(list.matches(&nav));
        assert!(!list.matches(&other));
    }

    #[test]
    fn test_negated_attribute() {
        let list = SelectorList::parse("button:not([disabled])").unwrap();
        assert!(list.matches(&Fake::new("button")));
        assert!(!list.matches(&Fake::new("button").attr("disabled", "")));
        assert!(!list.matches(&Fake::new("a")));
    }

    #[test]
    fn test_prefix_and_quoted_values() {
        let list = SelectorList::parse(r##"a[href^="#"], [data-avoid-layout='true']"##).unwrap();
        assert!(list.matches(&Fake::new("a").attr("href", "#top")));
        assert!(!list.matches(&Fake::new("a").attr("href", "/about")));
        assert!(list.matches(&Fake::new("div").attr("data-avoid-layout", "true")));
    }

    #[test]
    fn test_negative_tabindex_excluded() {
        let list = SelectorList::parse(r#"[tabindex]:not([tabindex^="-"])"#).unwrap();
        assert!(list.matches(&Fake::new("div").attr("tabindex", "0")));
        assert!(list.matches(&Fake::new("div").attr("tabindex", "3")));
        assert!(!list.matches(&Fake::new("div").attr("tabindex", "-1")));
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let list = SelectorList::parse("IMG").unwrap();
        assert!(list.matches(&Fake::new("img")));
    }

    #[test]
    fn test_display_round_trips() {
        let source = r#"a[href], .card:not([data-x="1"])"#;
        let list = SelectorList::parse(source).unwrap();
        let again = SelectorList::parse(&list.to_string()).unwrap();
        assert_eq!(list, again);
    }

    #[test]
    fn test_errors() {
        assert_eq!(SelectorList::parse("  "), Err(SelectorError::Empty));
        assert_eq!(
            SelectorList::parse("a:hover"),
            Err(SelectorError::UnsupportedPseudo { offset: 1 })
        );
        assert_eq!(
            SelectorList::parse("[href"),
            Err(SelectorError::UnterminatedAttribute { offset: 0 })
        );
        assert_eq!(
            SelectorList::parse(r#"[href="x]"#),
            Err(SelectorError::UnterminatedString { offset: 6 })
        );
        assert!(matches!(
            SelectorList::parse("nav > a"),
            Err(SelectorError::Unexpected { found: '>', .. })
        ));
    }
}
