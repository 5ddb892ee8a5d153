//! Heal Resolution
//!
//! Maps a broken locator to a structural path using two snapshots:
//!
//! 1. Derive the lookup key from the locator (classifying CSS/XPath first).
//! 2. Take the first element of the expected state, in document order, whose
//!    relevant attribute matches the key.
//! 3. Confirm the element still exists in the actual state (same retest id).
//! 4. Emit one warning describing the drift and redirect to where that element
//!    lives now, so the redirect always exists in the actual state.
//!
//! There is no scoring: ties go to the element recorded first.

use super::lookup::Lookup;
use super::result::Relocation;
use crate::error::HealError;
use crate::formatter;
use crate::warning::{CallSite, CallSiteProvider, QualifiedWarning, WarningSink};
use mendpath_common::{Locator, SnapshotTree};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Heals locators against one pair of snapshots.
///
/// Read-only over both trees; a `Healer` can be shared freely between threads.
pub struct Healer<'a> {
    expected: &'a SnapshotTree,
    actual: &'a SnapshotTree,
    sink: Option<&'a dyn WarningSink>,
    call_sites: Option<&'a dyn CallSiteProvider>,
}

impl<'a> Healer<'a> {
    /// Fails with [`HealError::MissingBaseline`] if there is no expected state.
    pub fn new(
        expected: Option<&'a SnapshotTree>,
        actual: &'a SnapshotTree,
    ) -> Result<Self, HealError> {
        let expected = expected.ok_or(HealError::MissingBaseline)?;
        Ok(Self {
            expected,
            actual,
            sink: None,
            call_sites: None,
        })
    }

    pub fn with_sink(mut self, sink: &'a dyn WarningSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_call_sites(mut self, provider: &'a dyn CallSiteProvider) -> Self {
        self.call_sites = Some(provider);
        self
    }

    pub fn heal(&self, locator: &Locator) -> Result<Relocation, HealError> {
        let lookup = Lookup::from_locator(locator)?;

        if lookup.is_empty() {
            debug!("Not healing {}: empty lookup key", locator);
            return Ok(Relocation::NotFound);
        }

        let Some(expected) = self.expected.iter().find(|e| lookup.matches(e)) else {
            warn!(
                "{}",
                formatter::not_found_message(lookup.described_as(), lookup.queried())
            );
            return Ok(Relocation::NotFound);
        };

        let Some(actual) = self.actual.find_by_retest_id(expected.retest_id()) else {
            warn!(
                "Element '{}' matching {} exists in the Golden Master but not in the current state.",
                expected.retest_id(),
                locator
            );
            return Ok(Relocation::NotFound);
        };

        let drift = lookup.drift();
        let warning = QualifiedWarning {
            element: actual.detached(),
            attribute_label: drift.label().to_string(),
            queried: lookup.queried().to_string(),
            actual_value: actual.attribute(drift.attribute()).map(Cow::into_owned),
            retest_id: actual.retest_id().to_string(),
            path: actual.path().clone(),
            call_site: self.call_site(),
        };

        for line in formatter::drift_report(&warning, drift) {
            warn!("{}", line);
        }
        if let Some(sink) = self.sink {
            sink.accept(warning);
        }

        Ok(Relocation::Redirect(actual.path().clone()))
    }

    fn call_site(&self) -> Option<CallSite> {
        let provider = self.call_sites?;
        match provider.call_site() {
            Ok(site) => Some(site),
            Err(e) => {
                warn!("Could not retrieve the call site of the locator: {}", e);
                None
            }
        }
    }
}

/// One-shot heal without a call-site provider.
pub fn resolve(
    locator: &Locator,
    expected: &SnapshotTree,
    actual: &SnapshotTree,
    sink: Option<&dyn WarningSink>,
) -> Result<Relocation, HealError> {
    let healer = Healer::new(Some(expected), actual)?;
    match sink {
        Some(sink) => healer.with_sink(sink).heal(locator),
        None => healer.heal(locator),
    }
}
