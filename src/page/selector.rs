//! The small CSS selector subset the page script relies on.
//!
//! Supported forms, optionally comma-separated:
//! `#id`, `.class`, `.class:hover`, `.class > *`.

use std::str::FromStr;

use super::element::ElementId;
use super::{Document, PageError};

#[derive(Debug, Clone, PartialEq)]
enum Simple {
    Id(String),
    Class(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Compound {
    simple: Simple,
    hover: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Selector {
    Compound(Compound),
    ChildrenOf(Compound),
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(Vec<Selector>);

impl Compound {
    fn parse(s: &str, original: &str) -> Result<Self, PageError> {
        let invalid = || PageError::InvalidSelector(original.to_string());

        let (base, hover) = match s.split_once(':') {
            Some((base, "hover")) => (base, true),
            Some(_) => return Err(invalid()),
            None => (s, false),
        };

        let simple = if let Some(id) = base.strip_prefix('#') {
            Simple::Id(id.to_string())
        } else if let Some(class) = base.strip_prefix('.') {
            Simple::Class(class.to_string())
        } else {
            return Err(invalid());
        };

        let name = match &simple {
            Simple::Id(name) | Simple::Class(name) => name,
        };
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(Self { simple, hover })
    }

    fn matches(&self, doc: &Document, id: ElementId) -> bool {
        let el = doc.get(id);
        let simple = match &self.simple {
            Simple::Id(name) => el.id() == Some(name.as_str()),
            Simple::Class(name) => el.has_class(name),
        };
        simple && (!self.hover || el.is_hovered())
    }
}

impl FromStr for SelectorList {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut selectors = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let selector = match part.split_once('>') {
                Some((parent, child)) if child.trim() == "*" => {
                    Selector::ChildrenOf(Compound::parse(parent.trim(), s)?)
                }
                Some(_) => return Err(PageError::InvalidSelector(s.to_string())),
                None => Selector::Compound(Compound::parse(part, s)?),
            };
            selectors.push(selector);
        }
        Ok(Self(selectors))
    }
}

impl SelectorList {
    pub fn matches(&self, doc: &Document, id: ElementId) -> bool {
        self.0.iter().any(|selector| match selector {
            Selector::Compound(compound) => compound.matches(doc, id),
            Selector::ChildrenOf(parent) => doc
                .get(id)
                .parent()
                .is_some_and(|p| parent.matches(doc, p)),
        })
    }
}
