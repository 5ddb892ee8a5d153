//! Driver wrapper that heals broken locators.
//!
//! Every lookup goes to the live driver first. Only when the driver reports a
//! plain miss does the wrapper consult the golden master, and then it makes
//! exactly one retry by structural path.

use crate::backend::{Driver, ElementHandle};
use crate::config::HealingConfig;
use crate::error::{DriverError, HealingError};
use mendpath_common::{Locator, SnapshotTree};
use mendpath_core::{CallSiteProvider, HealError, Healer, WarningSink};
use std::sync::Arc;
use tracing::{debug, info};

pub struct HealingDriver<D> {
    driver: D,
    config: HealingConfig,
    expected: Option<Arc<SnapshotTree>>,
    actual: Arc<SnapshotTree>,
    warnings: Option<Arc<dyn WarningSink>>,
    call_sites: Option<Arc<dyn CallSiteProvider>>,
}

impl<D: Driver> HealingDriver<D> {
    pub fn new(driver: D, config: HealingConfig) -> Self {
        Self {
            driver,
            config,
            expected: None,
            actual: Arc::new(SnapshotTree::default()),
            warnings: None,
            call_sites: None,
        }
    }

    pub fn with_warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.warnings = Some(sink);
        self
    }

    pub fn with_call_sites(mut self, provider: Arc<dyn CallSiteProvider>) -> Self {
        self.call_sites = Some(provider);
        self
    }

    /// Replace the snapshot pair, typically after each check of the page.
    pub fn update_states(&mut self, expected: Option<Arc<SnapshotTree>>, actual: Arc<SnapshotTree>) {
        self.expected = expected;
        self.actual = actual;
    }

    pub fn last_expected_state(&self) -> Option<&SnapshotTree> {
        self.expected.as_deref()
    }

    pub fn last_actual_state(&self) -> &SnapshotTree {
        &self.actual
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_inner(self) -> D {
        self.driver
    }

    pub async fn find_element(&mut self, locator: &Locator) -> Result<ElementHandle, HealingError> {
        match self.driver.find_element(locator).await {
            Ok(handle) => return Ok(handle),
            Err(DriverError::NotFound(reason)) => {
                debug!("Driver found no element for {}: {}", locator, reason);
            }
            Err(e) => return Err(e.into()),
        }

        let Some(redirect) = self.redirect_for(locator)? else {
            return Err(HealingError::NotFound(locator.clone()));
        };

        match self.driver.find_element(&redirect).await {
            Ok(handle) => Ok(handle),
            Err(DriverError::NotFound(_)) => Err(HealingError::NotFound(locator.clone())),
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`find_element`](Self::find_element), but a miss is an empty list.
    pub async fn find_elements(
        &mut self,
        locator: &Locator,
    ) -> Result<Vec<ElementHandle>, HealingError> {
        let found = self.driver.find_elements(locator).await?;
        if !found.is_empty() {
            return Ok(found);
        }

        match self.redirect_for(locator)? {
            Some(redirect) => Ok(self.driver.find_elements(&redirect).await?),
            None => Ok(Vec::new()),
        }
    }

    fn redirect_for(&self, locator: &Locator) -> Result<Option<Locator>, HealError> {
        if !self.config.enabled {
            debug!("Healing disabled; not looking up {}", locator);
            return Ok(None);
        }

        info!("Attempting to heal {}", locator);
        let mut healer = Healer::new(self.expected.as_deref(), &self.actual)?;
        if let Some(sink) = self.warnings.as_deref() {
            healer = healer.with_sink(sink);
        }
        if let Some(provider) = self.call_sites.as_deref() {
            healer = healer.with_call_sites(provider);
        }

        Ok(healer.heal(locator)?.to_locator())
    }
}
