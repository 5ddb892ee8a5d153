//! Selector Classification
//!
//! Decides whether a CSS selector or XPath expression lies in the subset the
//! healer can honour against a recorded snapshot. This is a gate, not a parser:
//! anything that would need compound matching is rejected so that a heal never
//! claims a match whose semantics were not checked.
//!
//! Supported CSS: `#id`, `.class`, `tag`.
//! Supported XPath: `//tag[n]/...` (anywhere) and `/tag[n]/...` (from root).

use crate::error::HealError;
use regex::Regex;
use std::sync::LazyLock;

/// Characters that may not appear in the literal of a `#id` or `.class` selector.
/// Covers combinators, groups, pseudo-classes and chained `#`/`.` parts.
static CSS_LITERAL_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:+~,.#\s"\[*]"#).unwrap());

/// Characters that indicate predicates, unions or axes in an XPath expression.
static XPATH_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:+\s"|'@*]"#).unwrap());

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap());

/// A CSS selector within the supported subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssSelector<'a> {
    /// The empty selector. Never matches.
    Empty,
    /// `#literal`
    Id(&'a str),
    /// `.literal`
    Class(&'a str),
    /// A bare tag name.
    Tag(&'a str),
}

/// An XPath expression within the supported subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XPathExpr<'a> {
    /// The empty expression (or a lone `/` / `//`). Never matches.
    Empty,
    /// `//expr`: carries `/expr`, matched as a substring of a recorded path.
    Anywhere(&'a str),
    /// `/expr`: carries `expr`, matched as a prefix of a recorded path.
    FromRoot(&'a str),
}

/// Combinators and attribute selectors need compound matching.
fn is_complex_css_selector(raw: &str) -> bool {
    raw.chars().any(char::is_whitespace) || raw.contains('[')
}

pub fn classify_css_selector(raw: &str) -> Result<CssSelector<'_>, HealError> {
    if raw.is_empty() {
        return Ok(CssSelector::Empty);
    }
    if is_complex_css_selector(raw) {
        return Err(HealError::unsupported(
            raw,
            "combinators and attribute selectors are not supported",
        ));
    }

    if let Some(id) = raw.strip_prefix('#') {
        if CSS_LITERAL_FORBIDDEN.is_match(id) {
            return Err(HealError::unsupported(raw, "only simple id selectors are supported"));
        }
        return Ok(CssSelector::Id(id));
    }

    if let Some(class) = raw.strip_prefix('.') {
        if CSS_LITERAL_FORBIDDEN.is_match(class) {
            return Err(HealError::unsupported(
                raw,
                "only a single simple class selector is supported",
            ));
        }
        return Ok(CssSelector::Class(class));
    }

    if TAG_NAME.is_match(raw) {
        Ok(CssSelector::Tag(raw))
    } else {
        Err(HealError::unsupported(raw, "only simple tag selectors are supported"))
    }
}

pub fn is_unsupported_css_selector(raw: &str) -> bool {
    classify_css_selector(raw).is_err()
}

pub fn classify_xpath(raw: &str) -> Result<XPathExpr<'_>, HealError> {
    if raw.is_empty() {
        return Ok(XPathExpr::Empty);
    }
    if XPATH_FORBIDDEN.is_match(raw) {
        return Err(HealError::unsupported(
            raw,
            "attribute predicates, functions, unions and axes are not supported",
        ));
    }

    if let Some(rest) = raw.strip_prefix("//") {
        if rest.is_empty() {
            return Ok(XPathExpr::Empty);
        }
        // keep the slash so `//div[1]` cannot match inside `subdiv[1]`
        return Ok(XPathExpr::Anywhere(&raw[1..]));
    }

    if let Some(rest) = raw.strip_prefix('/') {
        if rest.is_empty() {
            return Ok(XPathExpr::Empty);
        }
        return Ok(XPathExpr::FromRoot(rest));
    }

    Err(HealError::unsupported(
        raw,
        "relative XPath expressions are not supported",
    ))
}

pub fn is_unsupported_xpath(raw: &str) -> bool {
    classify_xpath(raw).is_err()
}
