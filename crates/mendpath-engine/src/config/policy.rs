//! Which descriptive HTML attributes a captured snapshot keeps.
//!
//! ```yaml
//! htmlAttributes: all          # keep everything
//! htmlAttributes:              # keep only these
//!   - href
//!   - title
//! htmlAttributes:              # (null) keep none
//! ```

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

const HTML_ATTRIBUTES_KEY: &str = "htmlAttributes";
const ALL_VALUE: &str = "all";

/// Attributes kept when no policy is configured.
pub const DEFAULT_HTML_ATTRIBUTES: &[&str] = &[
    "alt",
    "aria-label",
    "checked",
    "disabled",
    "href",
    "placeholder",
    "read-only",
    "role",
    "shown",
    "src",
    "title",
    "value",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributePolicy {
    /// Retain every attribute.
    All,
    /// Retain exactly these attribute names.
    Only(BTreeSet<String>),
}

impl AttributePolicy {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn retains(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Explicit names, or `None` for [`AttributePolicy::All`].
    pub fn names(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::All => None,
            Self::Only(names) => Some(names),
        }
    }
}

impl Default for AttributePolicy {
    fn default() -> Self {
        Self::only(DEFAULT_HTML_ATTRIBUTES.iter().copied())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPolicy {
    Keyword(String),
    Names(Vec<String>),
}

impl<'de> Deserialize<'de> for AttributePolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<RawPolicy>::deserialize(deserializer)? {
            None => Ok(Self::Only(BTreeSet::new())),
            Some(RawPolicy::Names(names)) => Ok(Self::only(names)),
            Some(RawPolicy::Keyword(keyword)) if keyword == ALL_VALUE => Ok(Self::All),
            Some(RawPolicy::Keyword(keyword)) => Err(D::Error::custom(format!(
                "'{}' is an invalid value for '{}'.",
                keyword, HTML_ATTRIBUTES_KEY
            ))),
        }
    }
}

impl Serialize for AttributePolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL_VALUE),
            Self::Only(names) => {
                let mut seq = serializer.serialize_seq(Some(names.len()))?;
                for name in names {
                    seq.serialize_element(name)?;
                }
                seq.end()
            }
        }
    }
}

/// Contents of an attributes file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributesConfig {
    #[serde(rename = "htmlAttributes", default)]
    pub html_attributes: AttributePolicy,
}
