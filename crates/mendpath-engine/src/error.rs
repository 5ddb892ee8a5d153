use mendpath_common::Locator;
use mendpath_core::HealError;
use thiserror::Error;

/// Errors reported by a [`Driver`](crate::Driver).
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// The driver looked and found nothing. Healing only kicks in for this one.
    #[error("No such element: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, Error)]
pub enum HealingError {
    /// Neither the live page nor the golden master yielded the element.
    #[error("No element found for {0}")]
    NotFound(Locator),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Heal(#[from] HealError),
}
