use crate::error::PathParseError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identifying attribute holding the structural path.
pub const PATH: &str = "path";
/// Identifying attribute holding the tag name.
pub const TYPE: &str = "type";
pub const ID: &str = "id";
pub const CLASS: &str = "class";
pub const NAME: &str = "name";
pub const TEXT: &str = "text";

/// Custom deserializer for maps that filters out null values.
/// Snapshots written by the page-side extraction carry `null` for attributes
/// the element does not have.
fn deserialize_nullable_string_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let map: BTreeMap<String, Option<String>> = BTreeMap::deserialize(deserializer)?;
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| v.map(|val| (k, val)))
        .collect())
}

/// One step of a structural path: a tag and its 1-based index among
/// same-tag siblings.
///
/// Tags compare case-insensitively, as HTML tag names do: `DIV[1]` equals
/// `div[1]`.
#[derive(Debug, Clone)]
pub struct PathSegment {
    pub tag: String,
    pub index: u32,
}

impl PathSegment {
    pub fn new(tag: impl Into<String>, index: u32) -> Self {
        Self {
            tag: tag.into(),
            index,
        }
    }
}

impl PartialEq for PathSegment {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.tag.eq_ignore_ascii_case(&other.tag)
    }
}

impl Eq for PathSegment {}

impl Hash for PathSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.tag.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        self.index.hash(state);
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.tag, self.index)
    }
}

impl FromStr for PathSegment {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PathParseError::EmptySegment);
        }

        let Some(open) = s.find('[') else {
            // `div` is shorthand for `div[1]`
            return Ok(Self::new(s, 1));
        };

        let tag = &s[..open];
        if tag.is_empty() {
            return Err(PathParseError::MissingTag(s.to_string()));
        }

        let inner = s[open + 1..]
            .strip_suffix(']')
            .ok_or_else(|| PathParseError::Unclosed(s.to_string()))?;
        let index: u32 = inner
            .parse()
            .map_err(|_| PathParseError::InvalidIndex(s.to_string()))?;
        if index == 0 {
            return Err(PathParseError::InvalidIndex(s.to_string()));
        }

        Ok(Self::new(tag, index))
    }
}

/// Structural position of an element, rooted at the document.
///
/// Rendered without a leading slash (`HTML[1]/DIV[3]/DIV[3]`), parsed with or
/// without one (`/html[1]/div[3]`, `//html[1]/div[3]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElementPath {
    segments: Vec<PathSegment>,
}

impl ElementPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Tag of the last segment, i.e. of the element itself.
    pub fn tag(&self) -> Option<&str> {
        self.segments.last().map(|s| s.tag.as_str())
    }

    pub fn parent(&self) -> Option<ElementPath> {
        let (_, init) = self.segments.split_last()?;
        Some(Self::new(init.to_vec()))
    }

    /// Returns a child path one level below this one.
    pub fn child(&self, tag: impl Into<String>, index: u32) -> ElementPath {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::new(tag, index));
        Self::new(segments)
    }

    /// True if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &ElementPath) -> bool {
        self.segments.len() < other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a == b)
    }

    /// Absolute XPath addressing this element, e.g. `/HTML[1]/DIV[3]`.
    pub fn to_xpath(&self) -> String {
        format!("/{}", self)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for ElementPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(PathParseError::Empty);
        }
        let segments = trimmed
            .split('/')
            .map(PathSegment::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(segments))
    }
}

impl Serialize for ElementPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElementPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Attributes that identify an element in the golden master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifyingAttributes {
    pub path: ElementPath,

    #[serde(rename = "type")]
    pub element_type: String,

    /// `id`, `class`, `name`, `text` and any other identifying values.
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
}

impl IdentifyingAttributes {
    pub fn new(path: ElementPath, element_type: impl Into<String>) -> Self {
        Self {
            path,
            element_type: element_type.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Looks up an identifying attribute. `path` and `type` are answered from
    /// the dedicated fields.
    pub fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            PATH => Some(Cow::Owned(self.path.to_string())),
            TYPE => Some(Cow::Borrowed(self.element_type.as_str())),
            _ => self.values.get(key).map(|v| Cow::Borrowed(v.as_str())),
        }
    }
}

/// A recorded UI element. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub retest_id: String,

    pub identifying_attributes: IdentifyingAttributes,

    #[serde(default, deserialize_with = "deserialize_nullable_string_map")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(retest_id: impl Into<String>, identifying: IdentifyingAttributes) -> Self {
        Self {
            retest_id: retest_id.into(),
            identifying_attributes: identifying,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn retest_id(&self) -> &str {
        &self.retest_id
    }

    pub fn path(&self) -> &ElementPath {
        &self.identifying_attributes.path
    }

    pub fn element_type(&self) -> &str {
        &self.identifying_attributes.element_type
    }

    /// Identifying value if present, otherwise the descriptive one.
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, str>> {
        self.identifying_attributes
            .get(key)
            .or_else(|| self.attributes.get(key).map(|v| Cow::Borrowed(v.as_str())))
    }

    /// Copy of this element without its subtree.
    pub fn detached(&self) -> Element {
        Element {
            retest_id: self.retest_id.clone(),
            identifying_attributes: self.identifying_attributes.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }
}

/// A whole page captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTree {
    #[serde(default)]
    elements: Vec<Element>,
}

impl SnapshotTree {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Top-level elements.
    pub fn roots(&self) -> &[Element] {
        &self.elements
    }

    /// All elements in recorded document order (depth-first, pre-order).
    pub fn iter(&self) -> Elements<'_> {
        Elements {
            stack: self.elements.iter().rev().collect(),
        }
    }

    /// Number of elements at every depth.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn find_by_retest_id(&self, retest_id: &str) -> Option<&Element> {
        self.iter().find(|e| e.retest_id == retest_id)
    }
}

impl<'a> IntoIterator for &'a SnapshotTree {
    type Item = &'a Element;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a [`SnapshotTree`].
pub struct Elements<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(retest_id: &str, path: &str) -> Element {
        let path: ElementPath = path.parse().unwrap();
        let tag = path.tag().unwrap().to_string();
        Element::new(retest_id, IdentifyingAttributes::new(path, tag))
    }

    #[test]
    fn test_path_roundtrip_forms() {
        let path: ElementPath = "HTML[1]/DIV[3]/DIV[3]".parse().unwrap();
        assert_eq!(path.to_string(), "HTML[1]/DIV[3]/DIV[3]");
        assert_eq!(path.to_xpath(), "/HTML[1]/DIV[3]/DIV[3]");

        let absolute: ElementPath = "//html[1]/body[1]".parse().unwrap();
        assert_eq!(absolute.to_string(), "html[1]/body[1]");
    }

    #[test]
    fn test_path_segment_without_index() {
        let path: ElementPath = "html/body/div[2]".parse().unwrap();
        assert_eq!(path.to_string(), "html[1]/body[1]/div[2]");
        assert_eq!(path.tag(), Some("div"));
    }

    #[test]
    fn test_path_parse_errors() {
        assert_eq!("".parse::<ElementPath>(), Err(PathParseError::Empty));
        assert_eq!("//".parse::<ElementPath>(), Err(PathParseError::Empty));
        assert_eq!(
            "html[1]//div[1]".parse::<ElementPath>(),
            Err(PathParseError::EmptySegment)
        );
        assert!(matches!(
            "html[0]".parse::<ElementPath>(),
            Err(PathParseError::InvalidIndex(_))
        ));
        assert!(matches!(
            "html[1".parse::<ElementPath>(),
            Err(PathParseError::Unclosed(_))
        ));
        assert!(matches!(
            "[1]".parse::<ElementPath>(),
            Err(PathParseError::MissingTag(_))
        ));
    }

    #[test]
    fn test_is_ancestor_of() {
        let html: ElementPath = "html[1]".parse().unwrap();
        let div: ElementPath = "HTML[1]/div[2]".parse().unwrap();
        assert!(html.is_ancestor_of(&div));
        assert!(!div.is_ancestor_of(&html));
        assert!(!div.is_ancestor_of(&div));
        assert_eq!(div.parent(), Some(html));
    }

    #[test]
    fn test_path_equality_ignores_tag_case() {
        let upper: ElementPath = "HTML[1]/DIV[3]".parse().unwrap();
        let lower: ElementPath = "//html[1]/div[3]".parse().unwrap();
        assert_eq!(upper, lower);
        assert_ne!(upper, "html[1]/div[2]".parse::<ElementPath>().unwrap());

        let mut seen = std::collections::HashSet::new();
        seen.insert(upper);
        assert!(seen.contains(&lower));
        // display keeps the recorded spelling
        assert_eq!(lower.to_string(), "html[1]/div[3]");
    }

    #[test]
    fn test_attribute_prefers_identifying() {
        let path: ElementPath = "html[1]/a[1]".parse().unwrap();
        let identifying = IdentifyingAttributes::new(path, "a").with(TEXT, "Home");
        let element = Element::new("a-1", identifying)
            .with_attribute(TEXT, "Start page")
            .with_attribute("title", "Go home");

        assert_eq!(element.attribute(TEXT).as_deref(), Some("Home"));
        assert_eq!(element.attribute("title").as_deref(), Some("Go home"));
        assert_eq!(element.attribute(TYPE).as_deref(), Some("a"));
        assert_eq!(element.attribute(PATH).as_deref(), Some("html[1]/a[1]"));
        assert!(element.attribute(ID).is_none());
    }

    #[test]
    fn test_tree_iterates_in_document_order() {
        let tree = SnapshotTree::new(vec![
            element("html", "html[1]")
                .with_child(
                    element("head", "html[1]/head[1]").with_child(element("title", "html[1]/head[1]/title[1]")),
                )
                .with_child(element("body", "html[1]/body[1]")),
        ]);

        let order: Vec<&str> = tree.iter().map(|e| e.retest_id()).collect();
        assert_eq!(order, vec!["html", "head", "title", "body"]);
        assert_eq!(tree.len(), 4);
        assert_eq!(
            tree.find_by_retest_id("title").map(|e| e.path().to_string()),
            Some("html[1]/head[1]/title[1]".to_string())
        );
        assert!(tree.find_by_retest_id("missing").is_none());
    }

    #[test]
    fn test_element_json_shape() {
        let json = r#"{
            "retestId": "submit",
            "identifyingAttributes": {
                "path": "html[1]/body[1]/button[1]",
                "type": "button",
                "id": "submit"
            },
            "attributes": { "text": "Send", "title": null }
        }"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.retest_id(), "submit");
        assert_eq!(element.element_type(), "button");
        assert_eq!(element.attribute(ID).as_deref(), Some("submit"));
        assert_eq!(element.attributes.len(), 1);
        assert!(element.children.is_empty());
    }
}
