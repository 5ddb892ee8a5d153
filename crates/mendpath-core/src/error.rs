use thiserror::Error;

/// Conditions that abort a single heal attempt.
///
/// A plain miss is not an error: it is reported as
/// [`Relocation::NotFound`](crate::Relocation::NotFound).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealError {
    /// The locator uses selector syntax outside the supported subset.
    #[error("Unsupported selector '{selector}': {reason}")]
    UnsupportedSelector {
        selector: String,
        reason: &'static str,
    },

    /// There is no golden master to look the old element up in.
    #[error("No expected state to find the old element in")]
    MissingBaseline,
}

impl HealError {
    pub(crate) fn unsupported(selector: &str, reason: &'static str) -> Self {
        Self::UnsupportedSelector {
            selector: selector.to_string(),
            reason,
        }
    }
}
