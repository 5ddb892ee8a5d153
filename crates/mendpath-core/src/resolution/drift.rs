use mendpath_common::LocatorKind;
use mendpath_common::protocol::{CLASS, ID, NAME, PATH, TEXT, TYPE};

/// Attribute category a heal compensated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriftKind {
    Id,
    Class,
    /// Class matched through a `.class` CSS selector.
    CssClass,
    Name,
    LinkText,
    Tag,
    XPath,
}

impl DriftKind {
    /// Human label used in warnings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "HTML id attribute",
            Self::Class | Self::CssClass => "HTML class attribute",
            Self::Name => "HTML name attribute",
            Self::LinkText => "link text",
            Self::Tag => "HTML tag attribute",
            Self::XPath => "xpath",
        }
    }

    /// Attribute read from the actual element to report its current value.
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Id => ID,
            Self::Class | Self::CssClass => CLASS,
            Self::Name => NAME,
            Self::LinkText => TEXT,
            Self::Tag => TYPE,
            Self::XPath => PATH,
        }
    }

    /// Locator kind to suggest when telling the user how to update the test.
    pub fn suggested_locator(&self) -> LocatorKind {
        match self {
            Self::Id => LocatorKind::Id,
            Self::Class => LocatorKind::ClassName,
            Self::CssClass => LocatorKind::CssSelector,
            Self::Name => LocatorKind::Name,
            Self::LinkText => LocatorKind::LinkText,
            Self::Tag => LocatorKind::TagName,
            Self::XPath => LocatorKind::XPath,
        }
    }
}
