//! Host document interface.
//!
//! The inspector never owns a real DOM. It talks to the page through the
//! [`Document`] trait, which a host implements over whatever live element
//! tree it has (a browser DOM bridge, a webview, a test fixture).
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ElementTree`] | Read-only structure: parents, children, tags, attributes |
//! | [`Document`] | Geometry, styles, hit testing, mutation, listener registration |
//! | [`MemoryDocument`] | Arena-backed reference implementation |
//! | [`SelectorList`] | Parsed CSS selector used by the default `matches` (`selectors` crate) |

// ============================================================================
// Submodules
// ============================================================================

/// In-memory reference document.
pub mod memory;

/// CSS selector parsing and matching.
pub mod selector;

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identifiers::NodeId;

// ============================================================================
// Re-exports
// ============================================================================

pub use memory::MemoryDocument;
pub use selector::SelectorList;

// ============================================================================
// Rect
// ============================================================================

/// Viewport-relative bounding rectangle of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its origin and size.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if the point lies inside the rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom exclusive, so empty
    /// rectangles contain nothing.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

// ============================================================================
// ComputedStyle
// ============================================================================

/// Snapshot of an element's resolved style properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputedStyle(BTreeMap<String, String>);

impl ComputedStyle {
    /// Creates an empty style snapshot.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a property value, or `""` if the property is not set.
    #[must_use]
    pub fn get(&self, property: &str) -> &str {
        self.0.get(property).map(String::as_str).unwrap_or_default()
    }

    /// Sets a property value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    /// Number of properties in the snapshot.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no properties are set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ComputedStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// EventKind
// ============================================================================

/// Document-level events the inspector subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer movement.
    MouseMove,
    /// Primary button click.
    Click,
    /// Key press.
    KeyDown,
}

impl EventKind {
    /// All kinds, in subscription order.
    pub const ALL: [EventKind; 3] = [EventKind::MouseMove, EventKind::Click, EventKind::KeyDown];

    /// Returns the DOM event type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::MouseMove => "mousemove",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
        }
    }
}

// ============================================================================
// ElementTree
// ============================================================================

/// Read-only view of an element tree.
///
/// Only element nodes are visible: `children` and `parent` skip text and
/// document nodes, like `children` / `parentElement` in the DOM.
pub trait ElementTree {
    /// Parent element, or `None` for the root element.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Tag name in its DOM form (upper-case for HTML elements).
    fn tag_name(&self, node: NodeId) -> String;

    /// All attributes in document attribute order.
    fn attributes(&self, node: NodeId) -> Vec<(String, String)>;

    /// Value of one attribute. Names compare case-insensitively.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.attributes(node)
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// The element's `id`, if present and non-empty.
    fn element_id(&self, node: NodeId) -> Option<String> {
        self.attribute(node, "id").filter(|id| !id.is_empty())
    }

    /// Returns `true` if the element renders its own text. Used by `:empty`.
    fn has_text(&self, _node: NodeId) -> bool {
        false
    }

    /// Class names from the `class` attribute.
    fn class_list(&self, node: NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Document
// ============================================================================

/// A live, mutable document the inspector can observe and decorate.
///
/// Mutation methods are infallible: unknown node handles are ignored, so a
/// page that changes under the inspector degrades instead of failing.
pub trait Document: ElementTree {
    /// The root (`<html>`) element.
    fn document_element(&self) -> Option<NodeId>;

    /// The `<head>` element.
    fn head(&self) -> Option<NodeId>;

    /// The `<body>` element.
    fn body(&self) -> Option<NodeId>;

    /// Current document URL.
    fn url(&self) -> String;

    /// Topmost element at a viewport point.
    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId>;

    /// Current bounding rectangle.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Current resolved style.
    fn computed_style(&self, node: NodeId) -> ComputedStyle;

    /// Rendered text content.
    fn inner_text(&self, node: NodeId) -> String;

    /// Serialized markup of the element's children.
    fn inner_html(&self, node: NodeId) -> String;

    /// Current value for input elements, `None` otherwise.
    fn input_value(&self, node: NodeId) -> Option<String>;

    /// First connected element with the given id.
    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Tests the element against a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`](crate::Error::InvalidSelector) if
    /// the selector cannot be parsed.
    fn matches(&self, node: NodeId, selector: &str) -> Result<bool> {
        let list = SelectorList::parse(selector)?;
        Ok(list.matches(self, node))
    }

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Appends `child` to `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Removes a node and its subtree from the document. The host may
    /// release them, so the handles can stop resolving.
    fn remove_node(&mut self, node: NodeId);

    /// Sets an attribute value.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Replaces the node's content with a single text run.
    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Sets an inline style property. An empty value removes it.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Registers the host-side listener for an event kind.
    fn add_event_listener(&mut self, kind: EventKind, capture: bool);

    /// Unregisters the host-side listener for an event kind.
    fn remove_event_listener(&mut self, kind: EventKind, capture: bool);
}

// ============================================================================
// Tests
// ============================================================================
