use crate::error::DriverError;
use async_trait::async_trait;
use mendpath_common::Locator;
use serde::{Deserialize, Serialize};

/// Opaque reference to a live element, as handed out by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// The browser automation capability the healer sits in front of.
///
/// Implementations translate [`Locator`]s into their native lookup. Healing
/// only ever issues `Locator::XPath` with an absolute structural path.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Find the first element matching `locator`.
    ///
    /// Must report a plain miss as [`DriverError::NotFound`].
    async fn find_element(&mut self, locator: &Locator) -> Result<ElementHandle, DriverError>;

    /// Find every element matching `locator`. An empty list is a miss.
    async fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementHandle>, DriverError> {
        match self.find_element(locator).await {
            Ok(handle) => Ok(vec![handle]),
            Err(DriverError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
