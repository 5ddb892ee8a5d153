use async_trait::async_trait;
use mendpath_common::protocol::{CLASS, ID};
use mendpath_common::{Element, ElementPath, IdentifyingAttributes, Locator, SnapshotTree};
use mendpath_core::{CallSite, CollectingSink, FixedCallSite, HealError};
use mendpath_engine::config::HealingConfig;
use mendpath_engine::{Driver, DriverError, ElementHandle, HealingDriver, HealingError};
use std::collections::HashMap;
use std::sync::Arc;

/// Driver that answers from a fixed table and records every query.
#[derive(Default)]
struct MockDriver {
    elements: HashMap<Locator, ElementHandle>,
    queries: Vec<Locator>,
    broken: bool,
}

impl MockDriver {
    fn with(mut self, locator: Locator, id: &str) -> Self {
        self.elements.insert(locator, ElementHandle::new(id));
        self
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn find_element(&mut self, locator: &Locator) -> Result<ElementHandle, DriverError> {
        self.queries.push(locator.clone());
        if self.broken {
            return Err(DriverError::Backend("connection reset".to_string()));
        }
        self.elements
            .get(locator)
            .cloned()
            .ok_or_else(|| DriverError::NotFound(locator.to_string()))
    }
}

fn make_element(retest_id: &str, path: &str, tag: &str) -> Element {
    let path: ElementPath = path.parse().unwrap();
    Element::new(retest_id, IdentifyingAttributes::new(path, tag))
}

fn golden_master() -> Arc<SnapshotTree> {
    Arc::new(SnapshotTree::new(vec![
        make_element("html", "HTML[1]", "HTML").with_child(
            make_element("submit", "HTML[1]/DIV[1]", "DIV")
                .with_attribute(ID, "special-button")
                .with_attribute(CLASS, "pure-button"),
        ),
    ]))
}

fn healing_driver(driver: MockDriver) -> HealingDriver<MockDriver> {
    let mut healing = HealingDriver::new(driver, HealingConfig::default());
    healing.update_states(Some(golden_master()), golden_master());
    healing
}

#[tokio::test]
async fn test_direct_hit_skips_healing() {
    let driver = MockDriver::default().with(Locator::id("special-button"), "live-1");
    let sink = Arc::new(CollectingSink::new());
    let mut healing = healing_driver(driver).with_warning_sink(sink.clone());

    let handle = healing.find_element(&Locator::id("special-button")).await.unwrap();
    assert_eq!(handle, ElementHandle::new("live-1"));
    assert_eq!(healing.driver().queries.len(), 1);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_broken_id_is_redirected_by_xpath() {
    let driver = MockDriver::default().with(Locator::xpath("/HTML[1]/DIV[1]"), "live-2");
    let sink = Arc::new(CollectingSink::new());
    let mut healing = healing_driver(driver)
        .with_warning_sink(sink.clone())
        .with_call_sites(Arc::new(FixedCallSite(CallSite::new("tests/shop.rs", 12))));

    let handle = healing.find_element(&Locator::css("#special-button")).await.unwrap();
    assert_eq!(handle.id(), "live-2");
    assert_eq!(
        healing.driver().queries,
        vec![Locator::css("#special-button"), Locator::xpath("/HTML[1]/DIV[1]")]
    );

    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].attribute_label, "HTML id attribute");
    assert_eq!(warnings[0].call_site, Some(CallSite::new("tests/shop.rs", 12)));
}

#[tokio::test]
async fn test_no_match_in_golden_master() {
    let mut healing = healing_driver(MockDriver::default());

    let result = healing.find_element(&Locator::class_name("special-class")).await;
    assert!(matches!(result, Err(HealingError::NotFound(ref l)) if *l == Locator::class_name("special-class")));
    assert_eq!(healing.driver().queries.len(), 1);
}

#[tokio::test]
async fn test_redirect_missing_on_live_page() {
    let mut healing = healing_driver(MockDriver::default());

    let result = healing.find_element(&Locator::class_name("pure-button")).await;
    assert!(matches!(result, Err(HealingError::NotFound(_))));
    assert_eq!(healing.driver().queries.len(), 2);
}

#[tokio::test]
async fn test_unsupported_selector_propagates() {
    let mut healing = healing_driver(MockDriver::default());

    let result = healing.find_element(&Locator::css(".btn-primary[disabled]")).await;
    assert!(matches!(
        result,
        Err(HealingError::Heal(HealError::UnsupportedSelector { .. }))
    ));
}

#[tokio::test]
async fn test_missing_baseline_propagates() {
    let mut healing = HealingDriver::new(MockDriver::default(), HealingConfig::default());
    healing.update_states(None, golden_master());

    let result = healing.find_element(&Locator::id("special-button")).await;
    assert!(matches!(
        result,
        Err(HealingError::Heal(HealError::MissingBaseline))
    ));
}

#[tokio::test]
async fn test_healing_disabled() {
    let driver = MockDriver::default().with(Locator::xpath("/HTML[1]/DIV[1]"), "live-2");
    let mut healing = HealingDriver::new(driver, HealingConfig { enabled: false });
    healing.update_states(Some(golden_master()), golden_master());

    let result = healing.find_element(&Locator::id("special-button")).await;
    assert!(matches!(result, Err(HealingError::NotFound(_))));
    assert_eq!(healing.driver().queries.len(), 1);
}

#[tokio::test]
async fn test_driver_failure_is_not_healed() {
    let driver = MockDriver {
        broken: true,
        ..Default::default()
    };
    let mut healing = healing_driver(driver);

    let result = healing.find_element(&Locator::id("special-button")).await;
    assert!(matches!(
        result,
        Err(HealingError::Driver(DriverError::Backend(_)))
    ));
    assert_eq!(healing.into_inner().queries.len(), 1);
}

#[tokio::test]
async fn test_find_elements_heals_empty_result() {
    let driver = MockDriver::default().with(Locator::xpath("/HTML[1]/DIV[1]"), "live-2");
    let mut healing = healing_driver(driver);

    let found = healing.find_elements(&Locator::tag_name("div")).await.unwrap();
    assert_eq!(found, vec![ElementHandle::new("live-2")]);

    let none = healing.find_elements(&Locator::tag_name("table")).await.unwrap();
    assert!(none.is_empty());
}
