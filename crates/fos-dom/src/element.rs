//! Element Query
//!
//! Compound selectors (`tag#id.class[attr="value"]`) and comma-separated
//! selector lists, enough for `querySelector`, `matches` and `closest`.
//! Combinators and pseudo-classes are not supported.

use crate::{DomError, DomResult, ElementData};
use std::str::FromStr;

/// Anything that can decide whether an element matches
pub trait ElementMatcher {
    fn matches(&self, element: &ElementData) -> bool;
}

/// Attribute condition inside a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatcher {
    /// `[name]`
    Exists(String),
    /// `[name="value"]`
    Equals(String, String),
}

impl AttrMatcher {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists(name) => element.has_attr(name),
            Self::Equals(name, value) => element.get_attr(name) == Some(value.as_str()),
        }
    }
}

/// A compound selector. An empty selector matches every element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatcher>,
}

impl Selector {
    /// Universal selector (`*`)
    pub fn any() -> Self {
        Self::default()
    }

    /// Type selector
    pub fn tag(tag: &str) -> Self {
        Self { tag: Some(tag.to_ascii_lowercase()), ..Self::default() }
    }

    /// Class selector
    pub fn class(class: &str) -> Self {
        Self::any().with_class(class)
    }

    /// ID selector
    pub fn id(id: &str) -> Self {
        Self { id: Some(id.to_string()), ..Self::default() }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Add `[name]`
    pub fn with_attr(mut self, name: &str) -> Self {
        self.attrs.push(AttrMatcher::Exists(name.to_ascii_lowercase()));
        self
    }

    /// Add `[name="value"]`
    pub fn with_attr_eq(mut self, name: &str, value: &str) -> Self {
        self.attrs.push(AttrMatcher::Equals(name.to_ascii_lowercase(), value.to_string()));
        self
    }

    /// Parse a single compound selector
    pub fn parse(input: &str) -> DomResult<Self> {
        CompoundParser::new(input).parse()
    }
}

impl ElementMatcher for Selector {
    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !element.is(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| element.has_class(c))
            && self.attrs.iter().all(|a| a.matches(element))
    }
}

/// Comma-separated selector list; matches when any member matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList(Vec<Selector>);

impl SelectorList {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self(selectors)
    }

    /// Parse `a, b, c`
    pub fn parse(input: &str) -> DomResult<Self> {
        if input.trim().is_empty() {
            return Err(invalid(input, "empty selector"));
        }
        input
            .split(',')
            .map(Selector::parse)
            .collect::<DomResult<Vec<_>>>()
            .map(Self)
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }
}

impl ElementMatcher for SelectorList {
    fn matches(&self, element: &ElementData) -> bool {
        self.0.iter().any(|s| s.matches(element))
    }
}

impl From<Selector> for SelectorList {
    fn from(selector: Selector) -> Self {
        Self(vec![selector])
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn invalid(selector: &str, reason: &str) -> DomError {
    DomError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

struct CompoundParser<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> CompoundParser<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, rest: source.trim() }
    }

    fn ident(&mut self) -> DomResult<&'a str> {
        let end = self.rest.find(|c: char| !is_ident_char(c)).unwrap_or(self.rest.len());
        if end == 0 {
            return Err(invalid(self.source, "expected identifier"));
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(ident)
    }

    fn parse(mut self) -> DomResult<Selector> {
        if self.rest.is_empty() {
            return Err(invalid(self.source, "empty selector"));
        }
        let mut selector = Selector::any();

        if let Some(rest) = self.rest.strip_prefix('*') {
            self.rest = rest;
        } else if self.rest.starts_with(is_ident_char) {
            selector.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        while let Some(c) = self.rest.chars().next() {
            self.rest = &self.rest[c.len_utf8()..];
            match c {
                '#' => selector.id = Some(self.ident()?.to_string()),
                '.' => selector.classes.push(self.ident()?.to_string()),
                '[' => selector.attrs.push(self.attribute()?),
                c if c.is_whitespace() => {
                    return Err(invalid(self.source, "combinators are not supported"));
                }
                _ => return Err(invalid(self.source, "unexpected character")),
            }
        }
        Ok(selector)
    }

    fn attribute(&mut self) -> DomResult<AttrMatcher> {
        self.rest = self.rest.trim_start();
        let name = self.ident()?.to_ascii_lowercase();
        self.rest = self.rest.trim_start();

        if let Some(rest) = self.rest.strip_prefix(']') {
            self.rest = rest;
            return Ok(AttrMatcher::Exists(name));
        }
        let Some(rest) = self.rest.strip_prefix('=') else {
            return Err(invalid(self.source, "expected '=' or ']'"));
        };
        self.rest = rest.trim_start();

        let value = match self.rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &self.rest[1..];
                let end = body
                    .find(quote)
                    .ok_or_else(|| invalid(self.source, "unterminated string"))?;
                self.rest = &body[end + 1..];
                body[..end].to_string()
            }
            _ => self.ident()?.to_string(),
        };

        self.rest = self.rest.trim_start();
        match self.rest.strip_prefix(']') {
            Some(rest) => {
                self.rest = rest;
                Ok(AttrMatcher::Equals(name, value))
            }
            None => Err(invalid(self.source, "unterminated attribute selector")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
        let mut elem = ElementData::new(tag);
        for (name, value) in attrs {
            elem.set_attr(name, *value);
        }
        elem
    }

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse(r#"input[type="email"]"#).unwrap();
        assert_eq!(sel, Selector::tag("input").with_attr_eq("type", "email"));

        let sel = Selector::parse("a.nav#home[data-x]").unwrap();
        assert!(sel.matches(&element("a", &[("class", "nav x"), ("id", "home"), ("data-x", "")])));
        assert!(!sel.matches(&element("a", &[("class", "nav"), ("id", "home")])));
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let sel = Selector::parse("MAIN").unwrap();
        assert!(sel.matches(&element("main", &[])));
    }

    #[test]
    fn test_unquoted_and_single_quoted_values() {
        let a = Selector::parse("input[name=cpf]").unwrap();
        let b = Selector::parse("input[name='cpf']").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_selector_list() {
        let list = SelectorList::parse("input[required], .button-enviar").unwrap();
        assert_eq!(list.selectors().len(), 2);
        assert!(list.matches(&element("button", &[("class", "button-enviar")])));
        assert!(list.matches(&element("input", &[("required", "")])));
        assert!(!list.matches(&element("select", &[("required", "")])));
    }

    #[test]
    fn test_universal_attribute() {
        let sel = Selector::parse("[required]").unwrap();
        assert!(sel.matches(&element("textarea", &[("required", "")])));
        assert!(sel.matches(&element("select", &[("required", "required")])));
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(SelectorList::parse("").is_err());
        assert!(Selector::parse("[name").is_err());
        assert!(Selector::parse("[name=\"x]").is_err());
        assert!(Selector::parse("div span").is_err());
        assert!(Selector::parse("div > span").is_err());
    }
}
