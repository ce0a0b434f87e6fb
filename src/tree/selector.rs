// Wed Oct 14 2026 - Alex

use crate::tree::{NodeId, TreeError};
use std::borrow::Cow;
use std::fmt;

/// What the matcher needs to know about an element. The synthetic document
/// root reports no tag and therefore never matches.
pub trait ElementView {
    fn tag_name(&self, node: NodeId) -> Option<&str>;
    fn attribute(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>>;
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn parent_element(&self, node: NodeId) -> Option<NodeId>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self, TreeError> {
        let mut parser = SelectorParser::new(source);
        let selectors = parser.parse_list()?;
        Ok(Self {
            source: source.to_string(),
            selectors,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(view, node))
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// A complex selector: compounds joined by combinators, matched right to left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
    // combinators[i] sits between compounds[i] and compounds[i + 1]
    combinators: Vec<Combinator>,
}

impl Selector {
    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn combinators(&self) -> &[Combinator] {
        &self.combinators
    }

    pub fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.match_at(view, node, n - 1),
        }
    }

    fn match_at<V: ElementView + ?Sized>(&self, view: &V, node: NodeId, index: usize) -> bool {
        if !self.compounds[index].matches(view, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => view
                .parent_element(node)
                .map_or(false, |parent| self.match_at(view, parent, index - 1)),
            Combinator::Descendant => {
                let mut current = view.parent_element(node);
                while let Some(ancestor) = current {
                    if self.match_at(view, ancestor, index - 1) {
                        return true;
                    }
                    current = view.parent_element(ancestor);
                }
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeMatch>,
}

impl Compound {
    pub fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        let tag = match view.tag_name(node) {
            Some(tag) => tag,
            None => return false,
        };

        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if !self.ids.is_empty() {
            let id = view.attribute(node, "id");
            if !self.ids.iter().all(|want| id.as_deref() == Some(want.as_str())) {
                return false;
            }
        }

        self.classes.iter().all(|class| view.has_class(node, class))
            && self.attributes.iter().all(|attr| attr.matches(view, node))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch {
    pub name: String,
    pub value: Option<String>,
}

impl AttributeMatch {
    fn matches<V: ElementView + ?Sized>(&self, view: &V, node: NodeId) -> bool {
        match (view.attribute(node, &self.name), &self.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected.as_str(),
        }
    }
}

struct SelectorParser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse_list(&mut self) -> Result<Vec<Selector>, TreeError> {
        let mut selectors = vec![self.parse_selector()?];

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                    selectors.push(self.parse_selector()?);
                }
                Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
            }
        }

        Ok(selectors)
    }

    fn parse_selector(&mut self) -> Result<Selector, TreeError> {
        self.skip_whitespace();
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    combinators.push(Combinator::Child);
                }
                Some(_) if had_whitespace => combinators.push(Combinator::Descendant),
                Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
            }
            compounds.push(self.parse_compound()?);
        }

        Ok(Selector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, TreeError> {
        let start = self.pos;
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.ids.push(self.parse_ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("unsupported token '{}'", c)),
                None => self.error("expected a selector"),
            });
        }

        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<AttributeMatch, TreeError> {
        self.skip_whitespace();
        let name = self.parse_ident()?;
        self.skip_whitespace();

        let value = if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_whitespace();
            let value = match self.peek() {
                Some(quote @ ('"' | '\'')) => self.parse_quoted(quote)?,
                _ => self.parse_ident()?,
            };
            self.skip_whitespace();
            Some(value)
        } else {
            None
        };

        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(AttributeMatch { name, value })
            }
            _ => Err(self.error("expected ']'")),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, TreeError> {
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.error("unterminated string"))
    }

    fn parse_ident(&mut self) -> Result<String, TreeError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_ident_char(c)) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, reason: impl Into<String>) -> TreeError {
        TreeError::invalid_selector(
            self.source,
            format!("{} at position {}", reason.into(), self.pos),
        )
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound_parts() {
        let list = SelectorList::parse("input#email.wide.required[type=text]").unwrap();
        assert_eq!(list.selectors().len(), 1);

        let compound = &list.selectors()[0].compounds()[0];
        assert_eq!(compound.tag.as_deref(), Some("input"));
        assert_eq!(compound.ids, vec!["email".to_string()]);
        assert_eq!(compound.classes, vec!["wide".to_string(), "required".to_string()]);
        assert_eq!(compound.attributes[0].name, "type");
        assert_eq!(compound.attributes[0].value.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_combinators_and_lists() {
        let list = SelectorList::parse(".form > .row input, textarea").unwrap();
        assert_eq!(list.selectors().len(), 2);
        assert_eq!(
            list.selectors()[0].combinators(),
            &[Combinator::Child, Combinator::Descendant]
        );
        assert_eq!(list.selectors()[1].compounds()[0].tag.as_deref(), Some("textarea"));
    }

    #[test]
    fn test_parse_quoted_attribute() {
        let list = SelectorList::parse("[data-label='a, b' ]").unwrap();
        let attr = &list.selectors()[0].compounds()[0].attributes[0];
        assert_eq!(attr.value.as_deref(), Some("a, b"));
    }

    #[test]
    fn test_parse_rejects_unsupported_syntax() {
        assert!(SelectorList::parse("").is_err());
        assert!(SelectorList::parse("input:checked").is_err());
        assert!(SelectorList::parse("a + b").is_err());
        assert!(SelectorList::parse("[name").is_err());
        assert!(SelectorList::parse(".a,").is_err());
        assert!(SelectorList::parse("[x='open]").is_err());
    }
}
