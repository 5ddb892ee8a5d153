//! Self-healing element lookup.
//!
//! When a locator no longer finds anything on the live page, the healer looks
//! the element up in the persisted golden master (the expected state), checks
//! that the same element still exists in the latest capture (the actual state)
//! and hands back a structural path the caller can retry with.

pub mod classifier;
pub mod error;
pub mod formatter;
pub mod resolution;
pub mod warning;

pub use classifier::{
    CssSelector, XPathExpr, classify_css_selector, classify_xpath, is_unsupported_css_selector,
    is_unsupported_xpath,
};
pub use error::HealError;
pub use resolution::{DriftKind, Healer, Relocation, resolve};
pub use warning::{
    CallSite, CallSiteError, CallSiteProvider, CollectingSink, FixedCallSite, QualifiedWarning,
    WarningSink,
};
