//! Selector, XPath and snapshot synthesis.
//!
//! Pure functions of the tree at call time. Nothing is cached, so a DOM
//! change between two calls is reflected in the second result.

// ============================================================================
// Imports
// ============================================================================

use std::time::{SystemTime, UNIX_EPOCH};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::dom::{ComputedStyle, Document, ElementTree, Rect};
use crate::error::{Error, Result};
use crate::identifiers::NodeId;

// ============================================================================
// Attributes
// ============================================================================

/// Attribute name/value pairs in document order.
///
/// Serializes as a JSON object that keeps that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Value of an attribute, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of attributes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attribute names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// InspectedElement
// ============================================================================

/// Snapshot of one element at the moment it was hovered or clicked.
///
/// `element` is a handle for host follow-up only; the inspector does not
/// keep it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectedElement {
    /// DOM tag name (`DIV`, `BUTTON`).
    pub tag_name: String,
    /// Synthesized CSS selector.
    pub selector: String,
    /// Synthesized XPath.
    pub xpath: String,
    /// Rendered text.
    pub inner_text: Option<String>,
    /// Child markup.
    #[serde(rename = "innerHTML")]
    pub inner_html: Option<String>,
    /// Live value, inputs only.
    pub value: Option<String>,
    /// Viewport-relative geometry.
    pub bounding_rect: Rect,
    /// Resolved style.
    pub computed_style: ComputedStyle,
    /// Attributes in document order.
    pub attributes: Attributes,
    /// Class names.
    pub class_list: Vec<String>,
    /// `id`, when non-empty.
    pub id: Option<String>,
    /// Document URL.
    pub url: String,
    /// Capture time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Handle to the inspected element.
    pub element: NodeId,
}

impl InspectedElement {
    /// Lower-case tag name.
    #[must_use]
    pub fn tag(&self) -> String {
        self.tag_name.to_ascii_lowercase()
    }

    /// `"<width> × <height>"`, rounded to whole pixels.
    #[must_use]
    pub fn dimensions(&self) -> String {
        format!(
            "{} × {}",
            self.bounding_rect.width.round(),
            self.bounding_rect.height.round()
        )
    }

    /// Serializes the snapshot for a host message bridge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// Selector / XPath
// ============================================================================

/// Builds a CSS selector that locates `node`.
///
/// An element with an id yields `#id`. Otherwise each level from the root
/// down contributes `tag.class1.class2`, plus `:nth-child(k)` when its
/// parent has more than one child, joined with `" > "`.
#[must_use]
pub fn generate_selector<T: ElementTree + ?Sized>(tree: &T, node: NodeId) -> String {
    if let Some(id) = tree.element_id(node) {
        return format!("#{id}");
    }

    let mut path = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        let mut step = tree.tag_name(id).to_ascii_lowercase();

        let classes = tree.class_list(id);
        if !classes.is_empty() {
            step.push('.');
            step.push_str(&classes.join("."));
        }

        let parent = tree.parent(id);
        if let Some(parent) = parent {
            let siblings = tree.children(parent);
            if siblings.len() > 1
                && let Some(index) = siblings.iter().position(|&sibling| sibling == id)
            {
                step.push_str(&format!(":nth-child({})", index + 1));
            }
        }

        path.push(step);
        current = parent;
    }

    path.reverse();
    path.join(" > ")
}

/// Builds an absolute XPath for `node`.
///
/// An element with an id yields `//*[@id="id"]`. Otherwise each level is
/// `tag` or `tag[n]`, where `n` counts same-tag siblings up to and
/// including the element and is only written when greater than one.
#[must_use]
pub fn generate_xpath<T: ElementTree + ?Sized>(tree: &T, node: NodeId) -> String {
    if let Some(id) = tree.element_id(node) {
        return format!("//*[@id=\"{id}\"]");
    }

    let mut path = Vec::new();
    let mut current = Some(node);

    while let Some(id) = current {
        let tag = tree.tag_name(id);
        let parent = tree.parent(id);

        let ordinal = match parent {
            Some(parent) => {
                1 + tree
                    .children(parent)
                    .into_iter()
                    .take_while(|&sibling| sibling != id)
                    .filter(|&sibling| tree.tag_name(sibling) == tag)
                    .count()
            }
            None => 1,
        };

        let tag = tag.to_ascii_lowercase();
        if ordinal > 1 {
            path.push(format!("{tag}[{ordinal}]"));
        } else {
            path.push(tag);
        }
        current = parent;
    }

    path.reverse();
    format!("/{}", path.join("/"))
}

/// Collects the element's attributes in document order.
#[must_use]
pub fn get_element_attributes<T: ElementTree + ?Sized>(tree: &T, node: NodeId) -> Attributes {
    Attributes(tree.attributes(node))
}

/// Captures a full snapshot of `node`.
#[must_use]
pub fn create_inspected_element<D: Document + ?Sized>(doc: &D, node: NodeId) -> InspectedElement {
    InspectedElement {
        tag_name: doc.tag_name(node),
        selector: generate_selector(doc, node),
        xpath: generate_xpath(doc, node),
        inner_text: Some(doc.inner_text(node)),
        inner_html: Some(doc.inner_html(node)),
        value: doc.input_value(node),
        bounding_rect: doc.bounding_rect(node),
        computed_style: doc.computed_style(node),
        attributes: get_element_attributes(doc, node),
        class_list: doc.class_list(node),
        id: doc.element_id(node),
        url: doc.url(),
        timestamp: now_millis(),
        element: node,
    }
}

/// Returns `true` if any selector matches. Unparseable selectors never match.
pub fn matches_any_selector<D, S>(doc: &D, node: NodeId, selectors: &[S]) -> bool
where
    D: Document + ?Sized,
    S: AsRef<str>,
{
    matches_any_selector_with(doc, node, selectors, |selector, err| {
        trace!(selector, error = %err, "Skipping invalid selector");
    })
}

/// [`matches_any_selector`] reporting each unparseable selector to
/// `on_invalid` before skipping it.
pub(crate) fn matches_any_selector_with<D, S, F>(
    doc: &D,
    node: NodeId,
    selectors: &[S],
    mut on_invalid: F,
) -> bool
where
    D: Document + ?Sized,
    S: AsRef<str>,
    F: FnMut(&str, &Error),
{
    selectors.iter().any(|selector| {
        let selector = selector.as_ref();
        doc.matches(node, selector).unwrap_or_else(|err| {
            on_invalid(selector, &err);
            false
        })
    })
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

// ============================================================================
// Tests
// ============================================================================
