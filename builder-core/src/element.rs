//! Page elements - the building blocks of a page tree.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel target id that addresses a page's root list in move operations.
pub const ROOT_TARGET: &str = "root";

/// Unique identifier for an element.
///
/// Generated ids look like `el-<uuid>`; ids supplied by callers are kept
/// verbatim as long as they stay unique across all pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("el-{}", Uuid::new_v4().simple()))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a moved element should be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MoveTarget {
    /// The current page's root list.
    Root,
    /// The child list of the given element.
    Element(ElementId),
}

impl From<String> for MoveTarget {
    fn from(target: String) -> Self {
        if target == ROOT_TARGET {
            Self::Root
        } else {
            Self::Element(ElementId(target))
        }
    }
}

impl From<&str> for MoveTarget {
    fn from(target: &str) -> Self {
        Self::from(target.to_string())
    }
}

impl From<MoveTarget> for String {
    fn from(target: MoveTarget) -> Self {
        match target {
            MoveTarget::Root => ROOT_TARGET.to_string(),
            MoveTarget::Element(id) => id.0,
        }
    }
}

/// The component type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Generic flex container.
    Container,
    /// Paragraph text.
    Text,
    /// Page heading.
    Heading,
    /// Clickable button.
    Button,
    /// Image.
    Image,
    /// Form wrapper.
    Form,
    /// Form input field.
    Input,
    /// Navigation bar.
    Navbar,
    /// Horizontal slide strip.
    Carousel,
    /// Page section.
    Section,
    /// Page footer.
    Footer,
}

impl ElementKind {
    /// Every element kind, in palette order.
    pub const ALL: [Self; 11] = [
        Self::Container,
        Self::Section,
        Self::Text,
        Self::Heading,
        Self::Button,
        Self::Image,
        Self::Navbar,
        Self::Form,
        Self::Input,
        Self::Carousel,
        Self::Footer,
    ];

    /// The wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Button => "button",
            Self::Image => "image",
            Self::Form => "form",
            Self::Input => "input",
            Self::Navbar => "navbar",
            Self::Carousel => "carousel",
            Self::Section => "section",
            Self::Footer => "footer",
        }
    }

    /// Human-readable label shown in the component palette.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Text => "Text",
            Self::Heading => "Heading",
            Self::Button => "Button",
            Self::Image => "Image",
            Self::Form => "Form",
            Self::Input => "Input",
            Self::Navbar => "Navbar",
            Self::Carousel => "Carousel",
            Self::Section => "Section",
            Self::Footer => "Footer",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single style entry: either a plain CSS value or a responsive
/// sub-mapping keyed by an `@breakpoint` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Plain CSS value such as `"16px"`.
    Value(String),
    /// Nested property overrides for one breakpoint.
    Responsive(BTreeMap<String, String>),
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

/// CSS-like style properties of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styles(BTreeMap<String, StyleValue>);

impl Styles {
    /// Create an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a style map from `(property, value)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs
            .iter()
            .map(|(property, value)| ((*property).to_string(), StyleValue::from(*value)))
            .collect()
    }

    /// Get a style entry.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.0.get(property)
    }

    /// Get a plain style value, ignoring responsive sub-mappings.
    #[must_use]
    pub fn value(&self, property: &str) -> Option<&str> {
        match self.0.get(property) {
            Some(StyleValue::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Set a style entry, replacing any previous value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(property.into(), value.into());
    }

    /// Set one property inside the responsive sub-mapping for `breakpoint`
    /// (stored under the `@breakpoint` key).
    pub fn set_responsive(
        &mut self,
        breakpoint: &str,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        let key = format!("@{}", breakpoint.trim_start_matches('@'));
        let entry = self
            .0
            .entry(key)
            .or_insert_with(|| StyleValue::Responsive(BTreeMap::new()));
        if let StyleValue::Value(_) = entry {
            *entry = StyleValue::Responsive(BTreeMap::new());
        }
        if let StyleValue::Responsive(map) = entry {
            map.insert(property.into(), value.into());
        }
    }

    /// Remove a style entry.
    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.0.remove(property)
    }

    /// Merge `other` into this map key-wise. Keys present in `other`
    /// overwrite; every other existing key is preserved.
    pub fn merge(&mut self, other: Styles) {
        self.0.extend(other.0);
    }

    /// Number of top-level style entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no style entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over style entries in property order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Styles {
    type Item = (&'a String, &'a StyleValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for Styles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(property, value)| (property.into(), value.into()))
                .collect(),
        )
    }
}

/// HTML attributes an element may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    /// Link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Image source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Image alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Input placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Input type (`text`, `email`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Form field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Accessible label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    /// ARIA role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Attributes {
    /// Merge the attributes set in `other`; unset ones are left alone.
    pub fn merge(&mut self, other: Attributes) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.href, other.href);
        take(&mut self.src, other.src);
        take(&mut self.alt, other.alt);
        take(&mut self.placeholder, other.placeholder);
        take(&mut self.input_type, other.input_type);
        take(&mut self.name, other.name);
        take(&mut self.aria_label, other.aria_label);
        take(&mut self.role, other.role);
    }

    /// Check if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An element together with its whole subtree.
///
/// This is the value form used to hand subtrees into the store and to read
/// them back out; inside a page elements live flattened in an
/// [`crate::ElementForest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Component type.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Style properties.
    #[serde(default)]
    pub styles: Styles,
    /// Ordered children.
    #[serde(default)]
    pub children: Vec<Element>,
    /// HTML attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Raw CSS appended for this element.
    #[serde(rename = "customCSS", default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// Raw script attached to this element.
    #[serde(rename = "customJS", default, skip_serializing_if = "Option::is_none")]
    pub custom_js: Option<String>,
}

impl Element {
    /// Create a new element of the given kind with a fresh id.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            content: None,
            styles: Styles::new(),
            children: Vec::new(),
            attributes: None,
            custom_css: None,
            custom_js: None,
        }
    }

    /// Set the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Replace the styles.
    #[must_use]
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Set a single style property.
    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Self {
        self.styles.set(property, value);
        self
    }

    /// Set the attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Collect the ids of this element and all descendants in pre-order.
    #[must_use]
    pub fn subtree_ids(&self) -> Vec<ElementId> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            ids.push(element.id.clone());
            stack.extend(element.children.iter().rev());
        }
        ids
    }

    /// Return a copy of this subtree where every element has a fresh id.
    #[must_use]
    pub fn with_fresh_ids(&self) -> Self {
        Self {
            id: ElementId::new(),
            kind: self.kind,
            content: self.content.clone(),
            styles: self.styles.clone(),
            children: self.children.iter().map(Self::with_fresh_ids).collect(),
            attributes: self.attributes.clone(),
            custom_css: self.custom_css.clone(),
            custom_js: self.custom_js.clone(),
        }
    }
}

impl Drop for Element {
    // Nested children are released from an explicit stack so arbitrarily
    // deep trees do not exhaust the call stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Partial update applied by [`crate::BuilderStore::update_element`].
///
/// The id and the children of an element are not patchable; use the move,
/// add and delete operations for structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// New component type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    /// New text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Style entries merged key-wise into the existing styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,
    /// Attributes merged field-wise into the existing attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// New custom CSS.
    #[serde(rename = "customCSS", default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// New custom script.
    #[serde(rename = "customJS", default, skip_serializing_if = "Option::is_none")]
    pub custom_js: Option<String>,
}

impl ElementPatch {
    /// A patch that only merges styles.
    #[must_use]
    pub fn styles(styles: Styles) -> Self {
        Self {
            styles: Some(styles),
            ..Self::default()
        }
    }

    /// A patch that only sets content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}
