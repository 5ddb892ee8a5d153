//! Drift warnings and where they go.

use mendpath_common::{Element, ElementPath};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;
use std::sync::Mutex;
use thiserror::Error;

/// Source location of the locator call that broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    /// Test (or test class) containing the call, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            test: None,
            file: file.into(),
            line,
        }
    }

    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test = Some(test.into());
        self
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl From<&Location<'_>> for CallSite {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CallSiteError {
    #[error("no test found in the calling context")]
    NotFound,

    #[error("call site lookup failed: {0}")]
    Lookup(String),
}

/// Finds out where the failing locator call came from.
///
/// Purely diagnostic: a failing provider never changes a heal result.
pub trait CallSiteProvider: Send + Sync {
    fn call_site(&self) -> Result<CallSite, CallSiteError>;
}

/// Provider that always reports the same location.
#[derive(Debug, Clone)]
pub struct FixedCallSite(pub CallSite);

impl CallSiteProvider for FixedCallSite {
    fn call_site(&self) -> Result<CallSite, CallSiteError> {
        Ok(self.0.clone())
    }
}

/// Record of one successful heal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedWarning {
    /// Counterpart of the matched element in the actual state, without children.
    pub element: Element,

    /// Which attribute category drifted, e.g. "HTML id attribute".
    pub attribute_label: String,

    /// The value the locator asked for.
    pub queried: String,

    /// The value the same element carries in the actual state, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,

    pub retest_id: String,

    /// Path the caller should retry with.
    pub path: ElementPath,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_site: Option<CallSite>,
}

/// Receives the warning of a successful heal.
pub trait WarningSink: Send + Sync {
    fn accept(&self, warning: QualifiedWarning);
}

impl<F> WarningSink for F
where
    F: Fn(QualifiedWarning) + Send + Sync,
{
    fn accept(&self, warning: QualifiedWarning) {
        self(warning)
    }
}

/// Sink that keeps every warning in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<QualifiedWarning>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<QualifiedWarning> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drains collected warnings.
    pub fn take(&self) -> Vec<QualifiedWarning> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<QualifiedWarning>> {
        self.warnings.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl WarningSink for CollectingSink {
    fn accept(&self, warning: QualifiedWarning) {
        self.lock().push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mendpath_common::IdentifyingAttributes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn warning() -> QualifiedWarning {
        let path: ElementPath = "html[1]/button[1]".parse().unwrap();
        QualifiedWarning {
            element: Element::new("btn", IdentifyingAttributes::new(path.clone(), "button")),
            attribute_label: "HTML id attribute".to_string(),
            queried: "old".to_string(),
            actual_value: Some("new".to_string()),
            retest_id: "btn".to_string(),
            path,
            call_site: Some(CallSite::new("tests/login.rs", 42)),
        }
    }

    #[test]
    fn test_closure_sink() {
        let count = AtomicUsize::new(0);
        let sink = |_: QualifiedWarning| {
            count.fetch_add(1, Ordering::SeqCst);
        };
        sink.accept(warning());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_collecting_sink_take() {
        let sink = CollectingSink::new();
        sink.accept(warning());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_call_site_display_and_location() {
        let site = CallSite::new("tests/login.rs", 42).with_test("login_works");
        assert_eq!(site.to_string(), "tests/login.rs:42");

        let here = CallSite::from(Location::caller());
        assert!(here.file.ends_with("warning.rs"));
    }

    #[test]
    fn test_warning_serializes_camel_case() {
        let json = serde_json::to_value(warning()).unwrap();
        assert_eq!(json["attributeLabel"], "HTML id attribute");
        assert_eq!(json["actualValue"], "new");
        assert_eq!(json["path"], "html[1]/button[1]");
        assert_eq!(json["callSite"]["line"], 42);
    }
}
