//! Lookup keys and the rule each locator kind matches recorded elements with.

use super::DriftKind;
use crate::classifier::{CssSelector, XPathExpr, classify_css_selector, classify_xpath};
use crate::error::HealError;
use mendpath_common::protocol::{CLASS, ID, NAME, TEXT};
use mendpath_common::{Element, Locator};

/// How a recorded element is compared against the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Exact equality on one attribute.
    Equals(&'static str),
    /// `class` contains the key as a whitespace-delimited token.
    ClassToken,
    /// Case-insensitive tag equality.
    Tag,
    /// Descriptive `text`, or identifying `text` of an `a` element.
    LinkText,
    /// Case-insensitive substring of the absolute path.
    PathContains,
    /// Case-insensitive prefix of the path.
    PathStartsWith,
}

/// What to search the expected state for, derived from one locator.
#[derive(Debug, Clone)]
pub struct Lookup<'l> {
    key: &'l str,
    /// The value as the test wrote it; differs from `key` for XPath.
    queried: &'l str,
    folded_key: String,
    rule: Rule,
    drift: DriftKind,
    described_as: &'static str,
}

impl<'l> Lookup<'l> {
    fn new(key: &'l str, rule: Rule, drift: DriftKind, described_as: &'static str) -> Self {
        Self {
            key,
            queried: key,
            folded_key: key.to_lowercase(),
            rule,
            drift,
            described_as,
        }
    }

    fn queried_as(mut self, raw: &'l str) -> Self {
        self.queried = raw;
        self
    }

    fn id(key: &'l str) -> Self {
        Self::new(key, Rule::Equals(ID), DriftKind::Id, "id")
    }

    fn tag(key: &'l str) -> Self {
        Self::new(key, Rule::Tag, DriftKind::Tag, "tag")
    }

    /// Classifies the locator and derives its key.
    ///
    /// Fails only for CSS selectors and XPath expressions outside the
    /// supported subset.
    pub fn from_locator(locator: &'l Locator) -> Result<Self, HealError> {
        let lookup = match locator {
            Locator::Id(id) => Self::id(id),
            Locator::ClassName(class) => {
                Self::new(class, Rule::ClassToken, DriftKind::Class, "CSS class")
            }
            Locator::Name(name) => Self::new(name, Rule::Equals(NAME), DriftKind::Name, "name"),
            Locator::LinkText(text) => {
                Self::new(text, Rule::LinkText, DriftKind::LinkText, "link text")
            }
            Locator::TagName(tag) => Self::tag(tag),
            Locator::CssSelector(raw) => match classify_css_selector(raw)? {
                CssSelector::Id(id) => Self::id(id),
                CssSelector::Tag(tag) => Self::tag(tag),
                CssSelector::Class(class) => {
                    Self::new(class, Rule::ClassToken, DriftKind::CssClass, "CSS selector")
                }
                CssSelector::Empty => {
                    Self::new("", Rule::ClassToken, DriftKind::CssClass, "CSS selector")
                }
            },
            Locator::XPath(raw) => match classify_xpath(raw)? {
                XPathExpr::Anywhere(fragment) => {
                    Self::new(fragment, Rule::PathContains, DriftKind::XPath, "XPath")
                        .queried_as(raw)
                }
                XPathExpr::FromRoot(prefix) => {
                    Self::new(prefix, Rule::PathStartsWith, DriftKind::XPath, "XPath")
                        .queried_as(raw)
                }
                XPathExpr::Empty => Self::new("", Rule::PathContains, DriftKind::XPath, "XPath"),
            },
        };
        Ok(lookup)
    }

    pub fn key(&self) -> &str {
        self.key
    }

    /// The value reported back in warnings and diagnostics.
    pub fn queried(&self) -> &str {
        self.queried
    }

    /// An empty key never matches anything.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    pub fn drift(&self) -> DriftKind {
        self.drift
    }

    /// How the locator is named in diagnostics, e.g. "CSS class".
    pub fn described_as(&self) -> &'static str {
        self.described_as
    }

    pub fn matches(&self, element: &Element) -> bool {
        if self.is_empty() {
            return false;
        }
        match self.rule {
            Rule::Equals(attribute) => element
                .attribute(attribute)
                .is_some_and(|value| value == self.key),
            Rule::ClassToken => element
                .attribute(CLASS)
                .is_some_and(|value| value.split_whitespace().any(|token| token == self.key)),
            Rule::Tag => element.element_type().eq_ignore_ascii_case(self.key),
            Rule::LinkText => {
                element.attributes.get(TEXT).is_some_and(|t| t == self.key)
                    || (element
                        .identifying_attributes
                        .get(TEXT)
                        .is_some_and(|t| t == self.key)
                        && element.element_type().eq_ignore_ascii_case("a"))
            }
            Rule::PathContains => element
                .path()
                .to_xpath()
                .to_lowercase()
                .contains(&self.folded_key),
            Rule::PathStartsWith => element
                .path()
                .to_string()
                .to_lowercase()
                .starts_with(&self.folded_key),
        }
    }
}
