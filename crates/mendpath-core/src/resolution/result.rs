use mendpath_common::{ElementPath, Locator};

/// Outcome of a heal attempt that did not abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// Retry against the live page at this structural path.
    Redirect(ElementPath),

    /// Even the golden master has no matching element.
    NotFound,
}

impl Relocation {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    pub fn path(&self) -> Option<&ElementPath> {
        match self {
            Self::Redirect(path) => Some(path),
            Self::NotFound => None,
        }
    }

    /// Driver-native locator to retry with.
    pub fn to_locator(&self) -> Option<Locator> {
        self.path().map(|p| Locator::XPath(p.to_xpath()))
    }
}
