//! Snapshot Conversion
//!
//! The page-side extraction script returns one JSON object keyed by element
//! path, in document order:
//!
//! ```json
//! {
//!   "//html[1]": { "tagName": "html", "text": "" },
//!   "//html[1]/body[1]": { "tagName": "body", "class": "home" },
//!   "//html[1]/body[1]/a[1]": { "tagName": "a", "text": "Docs", "href": "/docs" }
//! }
//! ```
//!
//! This module turns that object into a [`SnapshotTree`], lifting identifying
//! attributes out of the raw map and filtering the rest through the configured
//! [`AttributePolicy`].

use crate::config::AttributePolicy;
use mendpath_common::protocol::{CLASS, ID, NAME, TEXT};
use mendpath_common::{Element, ElementPath, IdentifyingAttributes, PathParseError, SnapshotTree};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

const TAG_NAME: &str = "tagName";

/// Captured attributes that become identifying attributes.
const IDENTIFYING: &[&str] = &[ID, CLASS, NAME, TEXT];

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("captured snapshot must be a JSON object keyed by element path")]
    NotAnObject,

    #[error("invalid element path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: PathParseError,
    },

    #[error("attributes of '{0}' must be a JSON object")]
    InvalidAttributes(String),
}

pub fn snapshot_from_capture(
    capture: &Value,
    policy: &AttributePolicy,
) -> Result<SnapshotTree, CaptureError> {
    let entries = capture.as_object().ok_or(CaptureError::NotAnObject)?;

    // Entries arrive in pre-order, so the open ancestors form a stack.
    let mut open: Vec<Element> = Vec::new();
    let mut roots = Vec::new();

    for (raw_path, raw_attributes) in entries {
        let path: ElementPath = raw_path.parse().map_err(|source| CaptureError::InvalidPath {
            path: raw_path.clone(),
            source,
        })?;
        let attributes = raw_attributes
            .as_object()
            .ok_or_else(|| CaptureError::InvalidAttributes(raw_path.clone()))?;

        while let Some(top) = open.last() {
            if top.path().is_ancestor_of(&path) {
                break;
            }
            if let Some(done) = open.pop() {
                attach(&mut open, &mut roots, done);
            }
        }
        open.push(to_element(path, attributes, policy));
    }

    while let Some(done) = open.pop() {
        attach(&mut open, &mut roots, done);
    }

    let tree = SnapshotTree::new(roots);
    debug!("Converted capture into snapshot of {} elements", tree.len());
    Ok(tree)
}

fn attach(open: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}

fn to_element(path: ElementPath, captured: &Map<String, Value>, policy: &AttributePolicy) -> Element {
    let tag = captured
        .get(TAG_NAME)
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| path.tag().map(str::to_lowercase))
        .unwrap_or_default();

    let mut identifying = IdentifyingAttributes::new(path, tag);
    for key in IDENTIFYING {
        if let Some(value) = captured.get(*key).and_then(scalar_to_string)
            && !value.is_empty()
        {
            identifying = identifying.with(*key, value);
        }
    }

    let retest_id = retest_id_for(&identifying);
    let mut element = Element::new(retest_id, identifying);

    for (name, value) in captured {
        if name == TAG_NAME || IDENTIFYING.contains(&name.as_str()) || !policy.retains(name) {
            continue;
        }
        if let Some(value) = scalar_to_string(value) {
            element.attributes.insert(name.clone(), value);
        }
    }

    element
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Fresh captures have no golden-master ids; derive one from the path alone.
///
/// Nothing that can drift between captures (id, class, text) goes into it, so
/// the same element keeps its retest id while its attributes change.
fn retest_id_for(identifying: &IdentifyingAttributes) -> String {
    let slug: String = identifying
        .element_type
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(24)
        .collect::<String>()
        .to_lowercase();

    let digest = Sha256::digest(identifying.path.to_string().to_lowercase().as_bytes());
    format!("{}-{}", slug, &hex::encode(digest)[..12])
}
