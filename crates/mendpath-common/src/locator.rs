use serde::{Deserialize, Serialize};
use std::fmt;

/// How a test addresses an element.
///
/// This is decided once, where the caller's query enters the healer; nothing
/// downstream inspects driver-specific locator types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Locator {
    Id(String),
    ClassName(String),
    Name(String),
    LinkText(String),
    CssSelector(String),
    #[serde(rename = "xpath")]
    XPath(String),
    TagName(String),
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self::ClassName(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Self::LinkText(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::CssSelector(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }

    pub fn tag_name(value: impl Into<String>) -> Self {
        Self::TagName(value.into())
    }

    pub fn kind(&self) -> LocatorKind {
        match self {
            Self::Id(_) => LocatorKind::Id,
            Self::ClassName(_) => LocatorKind::ClassName,
            Self::Name(_) => LocatorKind::Name,
            Self::LinkText(_) => LocatorKind::LinkText,
            Self::CssSelector(_) => LocatorKind::CssSelector,
            Self::XPath(_) => LocatorKind::XPath,
            Self::TagName(_) => LocatorKind::TagName,
        }
    }

    /// Raw string the locator carries.
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::ClassName(v)
            | Self::Name(v)
            | Self::LinkText(v)
            | Self::CssSelector(v)
            | Self::XPath(v)
            | Self::TagName(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    Id,
    ClassName,
    Name,
    LinkText,
    CssSelector,
    #[serde(rename = "xpath")]
    XPath,
    TagName,
}

impl LocatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ClassName => "class name",
            Self::Name => "name",
            Self::LinkText => "link text",
            Self::CssSelector => "css selector",
            Self::XPath => "xpath",
            Self::TagName => "tag name",
        }
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_value() {
        let locator = Locator::css("#special-button");
        assert_eq!(locator.kind(), LocatorKind::CssSelector);
        assert_eq!(locator.value(), "#special-button");
        assert_eq!(locator.to_string(), "css selector '#special-button'");
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Locator::xpath("//div[1]")).unwrap();
        assert_eq!(json, r#"{"by":"xpath","value":"//div[1]"}"#);

        let parsed: Locator = serde_json::from_str(r#"{"by":"link_text","value":"Home"}"#).unwrap();
        assert_eq!(parsed, Locator::link_text("Home"));
    }
}
