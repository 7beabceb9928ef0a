//! In-memory reference document.
//!
//! [`MemoryDocument`] is a small arena-backed element tree that implements
//! [`Document`] completely: hit testing, inline and computed styles,
//! selector queries and listener bookkeeping. Headless hosts, tests and
//! benchmarks drive the inspector against it.
//!
//! Layout is explicit. A node's rectangle is whatever [`MemoryDocument::set_rect`]
//! assigned, otherwise it is read from the inline `left`/`top`/`width`/`height`
//! pixel styles. Stylesheets are stored as text and never interpreted.
//!
//! Removed subtrees are released and their slots reused. A [`NodeId`] packs
//! the slot index (low 32 bits) with the slot generation (high 32 bits), so
//! handles to released nodes stop resolving instead of aliasing new ones.
//!
//! # Example
//!
//! ```ignore
//! use devlens_inspector::{Document, MemoryDocument, Rect};
//!
//! let mut doc = MemoryDocument::new("https://example.com/")?;
//! let body = doc.body().unwrap();
//! let button = doc.append_new(body, "button")?;
//! doc.set_rect(button, Rect::new(10.0, 10.0, 80.0, 24.0))?;
//!
//! assert_eq!(doc.element_from_point(20.0, 20.0), Some(button));
//! ```

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashSet;
use url::Url;

use crate::dom::{ComputedStyle, Document, ElementTree, EventKind, Rect, SelectorList};
use crate::error::{Error, Result};
use crate::identifiers::NodeId;

// ============================================================================
// Types
// ============================================================================

/// Arena slot. `data` is `None` while the slot is on the free list.
#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

/// Storage for one element.
#[derive(Debug, Clone, Default)]
struct NodeData {
    /// Upper-case tag name.
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Text run rendered before the children.
    text: String,
    /// Live `value` property for inputs.
    value: Option<String>,
    /// Explicit layout rectangle.
    layout: Option<Rect>,
    /// Host-resolved style, overlaid by inline styles.
    computed: ComputedStyle,
    inline: Vec<(String, String)>,
}

// ============================================================================
// MemoryDocument
// ============================================================================

/// Arena-backed element tree with `<html>`, `<head>` and `<body>`.
///
/// [`Document::remove_node`] releases the whole subtree. Stale [`NodeId`]s
/// then resolve to nothing, and every operation on them is ignored.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    url: Url,
    slots: Vec<Slot>,
    /// Released slot indices, reused last-in first-out.
    free: Vec<u32>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    listeners: FxHashSet<(EventKind, bool)>,
}

// ============================================================================
// MemoryDocument - Constructors
// ============================================================================

impl MemoryDocument {
    /// Creates an empty document at the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL cannot be parsed.
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self::with_url(Url::parse(url)?))
    }

    /// Creates an empty document at an already parsed URL.
    #[must_use]
    pub fn with_url(url: Url) -> Self {
        let mut doc = Self {
            url,
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0),
            head: NodeId::new(0),
            body: NodeId::new(0),
            listeners: FxHashSet::default(),
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.head);
        doc.append_child(doc.root, doc.body);
        doc
    }
}

// ============================================================================
// MemoryDocument - Building
// ============================================================================

impl MemoryDocument {
    /// Creates an element and appends it to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `parent` is unknown.
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> Result<NodeId> {
        self.node(parent).ok_or(Error::node_not_found(parent))?;
        let child = self.create_element(tag);
        self.append_child(parent, child);
        Ok(child)
    }

    /// Assigns an explicit layout rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `node` is unknown.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) -> Result<()> {
        self.node_mut(node)?.layout = Some(rect);
        Ok(())
    }

    /// Sets a resolved (non-inline) style property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `node` is unknown.
    pub fn set_computed_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        self.node_mut(node)?.computed.set(property, value);
        Ok(())
    }

    /// Sets the live `value` of an input element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] if `node` is unknown.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.node_mut(node)?.value = Some(value.to_string());
        Ok(())
    }

    /// Replaces the document URL.
    pub fn set_location(&mut self, url: Url) {
        self.url = url;
    }
}

// ============================================================================
// MemoryDocument - Queries
// ============================================================================

impl MemoryDocument {
    /// The parsed document URL.
    #[inline]
    #[must_use]
    pub fn location(&self) -> &Url {
        &self.url
    }

    /// Returns an inline style property, if set.
    #[must_use]
    pub fn inline_style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node)?
            .inline
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the node's own text run.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|data| data.text.as_str())
    }

    /// Returns `true` if the node is attached under the root element.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.node(id).and_then(|data| data.parent);
        }
        false
    }

    /// First connected element matching the selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] if the selector cannot be parsed.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(self.root)
            .into_iter()
            .find(|&node| list.matches(self, node)))
    }

    /// All connected elements matching the selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] if the selector cannot be parsed.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(self.root)
            .into_iter()
            .filter(|&node| list.matches(self, node))
            .collect())
    }

    /// Returns `true` if a listener for `kind` is registered.
    #[must_use]
    pub fn has_listener(&self, kind: EventKind, capture: bool) -> bool {
        self.listeners.contains(&(kind, capture))
    }

    /// Number of registered listeners.
    #[inline]
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Arena size: live nodes plus released slots awaiting reuse.
    #[inline]
    #[must_use]
    pub fn arena_len(&self) -> usize {
        self.slots.len()
    }

    /// Number of live nodes, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

// ============================================================================
// MemoryDocument - Internals
// ============================================================================

impl MemoryDocument {
    fn node(&self, id: NodeId) -> Option<&NodeData> {
        let (index, generation) = unpack(id);
        self.slots
            .get(index)
            .filter(|slot| slot.generation == generation)?
            .data
            .as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        let (index, generation) = unpack(id);
        self.slots
            .get_mut(index)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.data.as_mut())
            .ok_or(Error::node_not_found(id))
    }

    /// Frees `node` and everything under it. The caller detaches first.
    fn release(&mut self, node: NodeId) {
        for id in self.descendants(node) {
            let (index, _) = unpack(id);
            if let Some(slot) = self.slots.get_mut(index) {
                slot.data = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
    }

    /// `node` and everything under it, pre-order.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(data) = self.node(id) else {
                continue;
            };
            out.push(id);
            stack.extend(data.children.iter().rev().copied());
        }
        out
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|data| data.parent);
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).and_then(|data| data.parent) else {
            return;
        };
        if let Ok(parent_data) = self.node_mut(parent) {
            parent_data.children.retain(|&child| child != node);
        }
        if let Ok(data) = self.node_mut(node) {
            data.parent = None;
        }
    }

    /// Not rendered, or excluded from pointer targeting.
    fn is_hit_testable(&self, node: NodeId) -> bool {
        let mut pointer_events = None;
        let mut current = Some(node);
        while let Some(id) = current {
            if self.inline_style(id, "display") == Some("none") {
                return false;
            }
            if pointer_events.is_none() {
                pointer_events = self.inline_style(id, "pointer-events");
            }
            current = self.node(id).and_then(|data| data.parent);
        }
        pointer_events != Some("none")
    }

    /// Nearest inline `z-index` on the node or an ancestor.
    fn stacking_level(&self, node: NodeId) -> i64 {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(level) = self
                .inline_style(id, "z-index")
                .and_then(|value| value.trim().parse::<i64>().ok())
            {
                return level;
            }
            current = self.node(id).and_then(|data| data.parent);
        }
        0
    }

    fn serialize_into(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.node(node) else {
            return;
        };
        let tag = data.tag.to_ascii_lowercase();
        out.push('<');
        out.push_str(&tag);
        for (name, value) in &data.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value).replace('"', "&quot;"));
            out.push('"');
        }
        out.push('>');
        out.push_str(&escape_html(&data.text));
        for &child in &data.children {
            self.serialize_into(child, out);
        }
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
    }
}

fn pack(index: u32, generation: u32) -> NodeId {
    NodeId::new((u64::from(generation) << 32) | u64::from(index))
}

fn unpack(id: NodeId) -> (usize, u32) {
    let raw = id.get();
    ((raw & u64::from(u32::MAX)) as usize, (raw >> 32) as u32)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Parses `"12px"` / `"12"` into pixels.
fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse()
        .ok()
}

// ============================================================================
// ElementTree
// ============================================================================

impl ElementTree for MemoryDocument {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.node(node)
            .map(|data| data.tag.clone())
            .unwrap_or_default()
    }

    fn attributes(&self, node: NodeId) -> Vec<(String, String)> {
        self.node(node)
            .map(|data| data.attributes.clone())
            .unwrap_or_default()
    }

    fn has_text(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|data| !data.text.is_empty())
    }
}

// ============================================================================
// Document
// ============================================================================

impl Document for MemoryDocument {
    fn document_element(&self) -> Option<NodeId> {
        Some(self.root)
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn url(&self) -> String {
        self.url.to_string()
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let mut topmost: Option<(i64, NodeId)> = None;
        for node in self.descendants(self.root) {
            if !self.bounding_rect(node).contains(x, y) || !self.is_hit_testable(node) {
                continue;
            }
            let level = self.stacking_level(node);
            // Later in tree order paints on top at equal level.
            if topmost.is_none_or(|(best, _)| level >= best) {
                topmost = Some((level, node));
            }
        }
        topmost.map(|(_, node)| node)
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        let Some(data) = self.node(node) else {
            return Rect::default();
        };
        if let Some(rect) = data.layout {
            return rect;
        }
        let px = |property: &str| {
            self.inline_style(node, property)
                .and_then(parse_px)
                .unwrap_or(0.0)
        };
        Rect::new(px("left"), px("top"), px("width"), px("height"))
    }

    fn computed_style(&self, node: NodeId) -> ComputedStyle {
        let Some(data) = self.node(node) else {
            return ComputedStyle::new();
        };
        let mut style = data.computed.clone();
        for (property, value) in &data.inline {
            style.set(property.clone(), value.clone());
        }
        style
    }

    fn inner_text(&self, node: NodeId) -> String {
        let Some(data) = self.node(node) else {
            return String::new();
        };
        let mut text = data.text.clone();
        for &child in &data.children {
            text.push_str(&self.inner_text(child));
        }
        text
    }

    fn inner_html(&self, node: NodeId) -> String {
        let Some(data) = self.node(node) else {
            return String::new();
        };
        let mut html = escape_html(&data.text);
        for &child in &data.children {
            self.serialize_into(child, &mut html);
        }
        html
    }

    fn input_value(&self, node: NodeId) -> Option<String> {
        let data = self.node(node)?;
        if data.tag != "INPUT" {
            return None;
        }
        Some(
            data.value
                .clone()
                .or_else(|| self.attribute(node, "value"))
                .unwrap_or_default(),
        )
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&node| self.attribute(node, "id").as_deref() == Some(id))
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let data = NodeData {
            tag: tag.to_ascii_uppercase(),
            ..NodeData::default()
        };
        if let Some(index) = self.free.pop()
            && let Some(slot) = self.slots.get_mut(index as usize)
        {
            slot.data = Some(data);
            return pack(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            data: Some(data),
        });
        pack(index, 0)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none()
            || self.node(child).is_none()
            || self.is_ancestor_or_self(child, parent)
        {
            return;
        }
        self.detach(child);
        if let Ok(data) = self.node_mut(child) {
            data.parent = Some(parent);
        }
        if let Ok(data) = self.node_mut(parent) {
            data.children.push(child);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        if node == self.root || self.node(node).is_none() {
            return;
        }
        self.detach(node);
        self.release(node);
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Ok(data) = self.node_mut(node) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        match data.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.attributes.push((name, value.to_string())),
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        let children = match self.node_mut(node) {
            Ok(data) => {
                data.text = text.to_string();
                std::mem::take(&mut data.children)
            }
            Err(_) => return,
        };
        for child in children {
            if let Ok(data) = self.node_mut(child) {
                data.parent = None;
            }
            self.release(child);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Ok(data) = self.node_mut(node) else {
            return;
        };
        let position = data.inline.iter().position(|(name, _)| name == property);
        match (position, value.is_empty()) {
            (Some(index), true) => {
                data.inline.remove(index);
            }
            (Some(index), false) => data.inline[index].1 = value.to_string(),
            (None, false) => data.inline.push((property.to_string(), value.to_string())),
            (None, true) => {}
        }
    }

    fn add_event_listener(&mut self, kind: EventKind, capture: bool) {
        self.listeners.insert((kind, capture));
    }

    fn remove_event_listener(&mut self, kind: EventKind, capture: bool) {
        self.listeners.remove(&(kind, capture));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> MemoryDocument {
        MemoryDocument::new("https://example.com/page?q=1").unwrap()
    }

    #[test]
    fn test_skeleton() {
        let doc = doc();
        let root = doc.document_element().unwrap();
        let head = doc.head().unwrap();
        let body = doc.body().unwrap();
        assert_eq!(doc.tag_name(root), "HTML");
        assert_eq!(doc.children(root), vec![head, body]);
        assert_eq!(doc.parent(body), Some(root));
        assert_eq!(doc.parent(root), None);
        assert_eq!(doc.url(), "https://example.com/page?q=1");
    }

    #[test]
    fn test_invalid_url() {
        let err = MemoryDocument::new("::nope").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_append_new_unknown_parent() {
        let mut doc = doc();
        let err = doc.append_new(NodeId::new(999), "div").unwrap_err();
        assert!(err.is_node_error());
    }

    #[test]
    fn test_hit_testing_prefers_later_tree_order() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let under = doc.append_new(body, "div").unwrap();
        let over = doc.append_new(body, "div").unwrap();
        doc.set_rect(under, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        doc.set_rect(over, Rect::new(50.0, 50.0, 100.0, 100.0)).unwrap();

        assert_eq!(doc.element_from_point(10.0, 10.0), Some(under));
        assert_eq!(doc.element_from_point(60.0, 60.0), Some(over));
        assert_eq!(doc.element_from_point(500.0, 500.0), None);
    }

    #[test]
    fn test_hit_testing_respects_z_index() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let raised = doc.append_new(body, "div").unwrap();
        let later = doc.append_new(body, "div").unwrap();
        doc.set_rect(raised, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        doc.set_rect(later, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        doc.set_style(raised, "z-index", "10");

        assert_eq!(doc.element_from_point(5.0, 5.0), Some(raised));
    }

    #[test]
    fn test_hit_testing_skips_hidden_and_transparent() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let base = doc.append_new(body, "div").unwrap();
        let layer = doc.append_new(body, "div").unwrap();
        let inner = doc.append_new(layer, "span").unwrap();
        for node in [base, layer, inner] {
            doc.set_rect(node, Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
        }
        assert_eq!(doc.element_from_point(1.0, 1.0), Some(inner));

        doc.set_style(layer, "pointer-events", "none");
        assert_eq!(doc.element_from_point(1.0, 1.0), Some(base));

        doc.set_style(inner, "pointer-events", "auto");
        assert_eq!(doc.element_from_point(1.0, 1.0), Some(inner));

        doc.set_style(layer, "display", "none");
        assert_eq!(doc.element_from_point(1.0, 1.0), Some(base));

        doc.set_style(layer, "display", "");
        doc.set_style(layer, "pointer-events", "");
        assert_eq!(doc.element_from_point(1.0, 1.0), Some(inner));
    }

    #[test]
    fn test_geometry_from_inline_styles() {
        let mut doc = doc();
        let node = doc.create_element("div");
        doc.set_style(node, "left", "12px");
        doc.set_style(node, "top", "8.5px");
        doc.set_style(node, "width", "40px");
        doc.set_style(node, "height", "20px");
        assert_eq!(doc.bounding_rect(node), Rect::new(12.0, 8.5, 40.0, 20.0));
    }

    #[test]
    fn test_computed_style_overlays_inline() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let node = doc.append_new(body, "div").unwrap();
        doc.set_computed_style(node, "border-radius", "6px").unwrap();
        doc.set_computed_style(node, "color", "red").unwrap();
        doc.set_style(node, "color", "blue");

        let style = doc.computed_style(node);
        assert_eq!(style.get("border-radius"), "6px");
        assert_eq!(style.get("color"), "blue");
    }

    #[test]
    fn test_text_and_markup() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let card = doc.append_new(body, "div").unwrap();
        doc.set_text_content(card, "Hi ");
        let strong = doc.append_new(card, "b").unwrap();
        doc.set_attribute(strong, "title", "a \"quote\"");
        doc.set_text_content(strong, "there & you");

        assert_eq!(doc.inner_text(card), "Hi there & you");
        assert_eq!(
            doc.inner_html(card),
            "Hi <b title=\"a &quot;quote&quot;\">there &amp; you</b>"
        );
    }

    #[test]
    fn test_input_value() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let input = doc.append_new(body, "input").unwrap();
        let div = doc.append_new(body, "div").unwrap();
        doc.set_attribute(input, "value", "initial");

        assert_eq!(doc.input_value(input).as_deref(), Some("initial"));
        doc.set_value(input, "typed").unwrap();
        assert_eq!(doc.input_value(input).as_deref(), Some("typed"));
        assert_eq!(doc.input_value(div), None);
    }

    #[test]
    fn test_remove_detaches() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let node = doc.append_new(body, "div").unwrap();
        doc.set_attribute(node, "id", "gone");
        assert_eq!(doc.get_element_by_id("gone"), Some(node));

        doc.remove_node(node);
        assert!(!doc.is_connected(node));
        assert_eq!(doc.get_element_by_id("gone"), None);
        assert!(doc.children(body).is_empty());
    }

    #[test]
    fn test_removed_slots_are_reused_with_fresh_handles() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let old = doc.append_new(body, "div").unwrap();
        let old_child = doc.append_new(old, "span").unwrap();
        let slots = doc.arena_len();

        doc.remove_node(old);
        assert_eq!(doc.node_count(), slots - 2);

        let fresh = doc.append_new(body, "p").unwrap();
        let fresh_child = doc.append_new(fresh, "b").unwrap();
        assert_eq!(doc.arena_len(), slots);
        assert_eq!(doc.node_count(), slots);
        for stale in [old, old_child] {
            assert_ne!(fresh, stale);
            assert_ne!(fresh_child, stale);
            assert_eq!(doc.tag_name(stale), "");
            assert_eq!(doc.parent(stale), None);
        }

        doc.set_attribute(old, "id", "stale");
        doc.append_child(old, fresh_child);
        assert_eq!(doc.get_element_by_id("stale"), None);
        assert_eq!(doc.parent(fresh_child), Some(fresh));
        assert!(doc.append_new(old_child, "i").unwrap_err().is_node_error());
    }

    #[test]
    fn test_replaced_text_releases_children() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let card = doc.append_new(body, "div").unwrap();
        let inner = doc.append_new(card, "b").unwrap();
        doc.append_new(inner, "i").unwrap();
        let live = doc.node_count();

        doc.set_text_content(card, "plain");
        assert_eq!(doc.node_count(), live - 2);
        assert_eq!(doc.tag_name(inner), "");
    }

    #[test]
    fn test_root_is_never_released() {
        let mut doc = doc();
        let root = doc.document_element().unwrap();
        doc.remove_node(root);
        assert_eq!(doc.tag_name(root), "HTML");
        assert!(doc.is_connected(doc.body().unwrap()));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let outer = doc.append_new(body, "div").unwrap();
        let inner = doc.append_new(outer, "div").unwrap();
        doc.append_child(inner, outer);
        assert_eq!(doc.parent(outer), Some(body));
    }

    #[test]
    fn test_query_selector() {
        let mut doc = doc();
        let body = doc.body().unwrap();
        let first = doc.append_new(body, "p").unwrap();
        let second = doc.append_new(body, "p").unwrap();
        doc.set_attribute(second, "class", "note");

        assert_eq!(doc.query_selector("p").unwrap(), Some(first));
        assert_eq!(doc.query_selector("p.note").unwrap(), Some(second));
        assert_eq!(doc.query_selector_all("body > p").unwrap(), vec![first, second]);
        assert!(doc.query_selector("p[").is_err());
    }

    #[test]
    fn test_listeners() {
        let mut doc = doc();
        doc.add_event_listener(EventKind::Click, true);
        doc.add_event_listener(EventKind::Click, true);
        assert_eq!(doc.listener_count(), 1);
        assert!(doc.has_listener(EventKind::Click, true));
        assert!(!doc.has_listener(EventKind::Click, false));

        doc.remove_event_listener(EventKind::Click, true);
        assert_eq!(doc.listener_count(), 0);
    }
}
