//! Inspection engine.
//!
//! An [`Inspector`] owns a host [`Document`] and moves between two states:
//!
//! | State | Overlay nodes | Listeners | Stylesheet |
//! |-------|---------------|-----------|------------|
//! | Inactive | none | none | none |
//! | Active | root, highlight box, crosshair bars, label (while hovering) | capture phase | injected |
//!
//! The host forwards capture-phase events to [`Inspector::handle_mouse_move`],
//! [`Inspector::handle_click`] and [`Inspector::handle_key_down`] and then
//! honours the propagation flags the inspector set.
//!
//! # Example
//!
//! ```ignore
//! use devlens_inspector::{Inspector, MemoryDocument, PartialInspectorConfig, PointerEvent};
//!
//! let doc = MemoryDocument::new("https://example.com/")?;
//! let config = PartialInspectorConfig::new()
//!     .on_element_click(|element| println!("{}", element.selector));
//!
//! let mut inspector = Inspector::new(doc, &config);
//! inspector.activate();
//! inspector.handle_click(&mut PointerEvent::new(120.0, 48.0));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::dom::{Document, EventKind, Rect};
use crate::identifiers::{InspectorId, NodeId};

use super::config::{InspectorConfig, LabelPosition, PartialInspectorConfig};
use super::event::{KeyEvent, PointerEvent};
use super::styles::{
    CROSSHAIR_CLASS, CROSSHAIR_HORIZONTAL_CLASS, CROSSHAIR_VERTICAL_CLASS, HIGHLIGHT_CLASS,
    LABEL_CLASS, MARKER_ATTRIBUTE, OVERLAY_CLASS, STYLE_ELEMENT_ID, build_stylesheet,
    inject_styles, remove_styles,
};
use super::synth::{InspectedElement, create_inspected_element, matches_any_selector_with};

// ============================================================================
// Constants
// ============================================================================

/// Approximate rendered label height used when placing it above an element.
const LABEL_HEIGHT: f64 = 24.0;

// ============================================================================
// DeactivateHandle
// ============================================================================

/// Requests deactivation from inside a callback.
///
/// Callbacks run while the inspector is mutably borrowed, so they cannot
/// call [`Inspector::deactivate`] directly. A request is honoured as soon as
/// the current event handler returns.
#[derive(Debug, Clone)]
pub struct DeactivateHandle {
    requested: Arc<AtomicBool>,
}

impl DeactivateHandle {
    /// Asks the inspector to deactivate after the current handler.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Returns `true` if a request is pending.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

// ============================================================================
// Overlay Nodes
// ============================================================================

/// Nodes built on activation and removed on deactivation.
#[derive(Debug, Clone, Copy)]
struct OverlayNodes {
    root: NodeId,
    highlight: NodeId,
    /// Vertical and horizontal bars.
    crosshair: Option<(NodeId, NodeId)>,
}

// ============================================================================
// Inspector
// ============================================================================

/// Element inspector bound to one host document.
pub struct Inspector<D: Document> {
    id: InspectorId,
    document: D,
    config: InspectorConfig,
    active: bool,
    click_count: u32,
    /// Lookup handle only.
    highlighted: Option<NodeId>,
    overlay: Option<OverlayNodes>,
    label: Option<NodeId>,
    /// Every node this instance created and has not removed yet.
    owned: FxHashSet<NodeId>,
    deactivate_requested: Arc<AtomicBool>,
}

impl<D: Document + fmt::Debug> fmt::Debug for Inspector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("id", &self.id)
            .field("active", &self.active)
            .field("click_count", &self.click_count)
            .field("highlighted", &self.highlighted)
            .field("config", &self.config)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Inspector - Construction
// ============================================================================

impl<D: Document> Inspector<D> {
    /// Creates an inactive inspector, merging `config` over the defaults.
    #[must_use]
    pub fn new(document: D, config: &PartialInspectorConfig) -> Self {
        Self {
            id: InspectorId::generate(),
            document,
            config: InspectorConfig::merged(config),
            active: false,
            click_count: 0,
            highlighted: None,
            overlay: None,
            label: None,
            owned: FxHashSet::default(),
            deactivate_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Consumes the inspector and returns the document.
    ///
    /// Call [`deactivate`](Self::deactivate) first to leave no overlay behind.
    #[must_use]
    pub fn into_document(self) -> D {
        self.document
    }
}

// ============================================================================
// Inspector - Accessors
// ============================================================================

impl<D: Document> Inspector<D> {
    /// Instance id, also written into the marker attribute of owned nodes.
    #[inline]
    #[must_use]
    pub fn id(&self) -> InspectorId {
        self.id
    }

    /// Returns `true` while active.
    #[inline]
    #[must_use]
    pub fn is_inspector_active(&self) -> bool {
        self.active
    }

    /// Merged configuration in effect.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Clicks processed since the last activation.
    #[inline]
    #[must_use]
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Element currently highlighted.
    #[inline]
    #[must_use]
    pub fn highlighted_element(&self) -> Option<NodeId> {
        self.highlighted
    }

    /// Overlay root while active with the overlay enabled.
    #[inline]
    #[must_use]
    pub fn overlay_root(&self) -> Option<NodeId> {
        self.overlay.map(|overlay| overlay.root)
    }

    /// The host document.
    #[inline]
    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The host document, mutably.
    #[inline]
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Handle for requesting deactivation from a callback.
    #[must_use]
    pub fn deactivate_handle(&self) -> DeactivateHandle {
        DeactivateHandle {
            requested: Arc::clone(&self.deactivate_requested),
        }
    }
}

// ============================================================================
// Inspector - Lifecycle
// ============================================================================

impl<D: Document> Inspector<D> {
    /// Starts inspecting. No-op while already active.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }

        self.click_count = 0;
        self.deactivate_requested.store(false, Ordering::Release);
        self.inject_inspector_styles();
        self.create_overlay();
        for kind in EventKind::ALL {
            self.document.add_event_listener(kind, true);
        }
        self.active = true;

        debug!(
            inspector_id = %self.id,
            overlay = self.overlay.is_some(),
            "Inspector activated"
        );
        (self.config.on_activate)();
    }

    /// Stops inspecting and removes everything the inspector added.
    /// No-op while inactive.
    pub fn deactivate(&mut self) {
        self.shutdown("requested");
    }

    /// Activates when inactive, deactivates when active.
    pub fn toggle(&mut self) {
        if self.active {
            self.shutdown("toggled");
        } else {
            self.activate();
        }
    }

    /// Merges `partial` over the current configuration.
    ///
    /// While active the stylesheet is rebuilt so visual changes apply
    /// immediately.
    pub fn update_config(&mut self, partial: &PartialInspectorConfig) {
        self.config.apply(partial);
        if self.active {
            self.inject_inspector_styles();
        }
        debug!(inspector_id = %self.id, active = self.active, "Inspector config updated");
    }

    fn shutdown(&mut self, reason: &'static str) {
        if !self.active {
            return;
        }

        for kind in EventKind::ALL {
            self.document.remove_event_listener(kind, true);
        }
        self.clear_highlight();
        self.remove_overlay();
        remove_styles(&mut self.document, STYLE_ELEMENT_ID);
        self.owned.clear();
        self.deactivate_requested.store(false, Ordering::Release);
        self.active = false;

        debug!(
            inspector_id = %self.id,
            reason,
            clicks = self.click_count,
            "Inspector deactivated"
        );
        (self.config.on_deactivate)();
    }

    fn honor_deactivate_request(&mut self) {
        if self.deactivate_requested.swap(false, Ordering::AcqRel) {
            self.shutdown("callback");
        }
    }
}

// ============================================================================
// Inspector - Event Handlers
// ============================================================================

impl<D: Document> Inspector<D> {
    /// Pointer movement: moves the crosshair and highlights the element
    /// under the cursor.
    pub fn handle_mouse_move(&mut self, event: &PointerEvent) {
        if !self.active {
            return;
        }

        self.move_crosshair(event.client_x, event.client_y);

        let target = self
            .resolve_target(event.client_x, event.client_y)
            .filter(|&node| self.should_inspect(node));

        match target {
            Some(node) => {
                self.clear_highlight();
                let snapshot = create_inspected_element(&self.document, node);
                self.highlight_element(node, &snapshot);
                trace!(
                    inspector_id = %self.id,
                    node = %node,
                    selector = %snapshot.selector,
                    "Hovering element"
                );
                (self.config.on_element_hover)(&snapshot);
            }
            None => self.clear_highlight(),
        }

        self.honor_deactivate_request();
    }

    /// Click: reports the element under the cursor.
    ///
    /// Propagation and the default action are suppressed first, per
    /// configuration, whether or not an element qualifies.
    pub fn handle_click(&mut self, event: &mut PointerEvent) {
        if !self.active {
            return;
        }

        if self.config.behavior.stop_propagation {
            event.stop_propagation();
        }
        if self.config.behavior.prevent_default {
            event.prevent_default();
        }

        if let Some(node) = self.resolve_target(event.client_x, event.client_y)
            && self.should_inspect(node)
        {
            self.process_click(node);
        }

        self.honor_deactivate_request();
    }

    /// Key press: a capture key ends inspection.
    pub fn handle_key_down(&mut self, event: &mut KeyEvent) {
        if !self.active {
            return;
        }

        if self
            .config
            .behavior
            .capture_keys
            .iter()
            .any(|key| *key == event.key)
        {
            event.prevent_default();
            event.stop_propagation();
            self.shutdown("capture key");
        }
    }

    fn process_click(&mut self, node: NodeId) {
        self.click_count += 1;
        let snapshot = create_inspected_element(&self.document, node);

        debug!(
            inspector_id = %self.id,
            selector = %snapshot.selector,
            clicks = self.click_count,
            "Element clicked"
        );
        (self.config.on_element_click)(&snapshot);

        let behavior = &self.config.behavior;
        if behavior.auto_deactivate && f64::from(self.click_count) >= behavior.click_threshold {
            self.shutdown("click threshold");
        }
    }
}

// ============================================================================
// Inspector - Targeting
// ============================================================================

impl<D: Document> Inspector<D> {
    /// Topmost page element at a point, never one of the inspector's own.
    fn resolve_target(&mut self, x: f64, y: f64) -> Option<NodeId> {
        let mut node = self.document.element_from_point(x, y)?;

        if self.is_inspector_node(node) {
            node = self.element_beneath_inspector(x, y)?;
        }

        while self.is_inspector_node(node) {
            node = self.document.parent(node)?;
        }
        Some(node)
    }

    /// Owned by this instance, or marked by any inspector instance.
    fn is_inspector_node(&self, node: NodeId) -> bool {
        self.owned.contains(&node) || self.document.attribute(node, MARKER_ATTRIBUTE).is_some()
    }

    /// Resolves the point with every inspector node pointer-transparent.
    ///
    /// Owned nodes are switched off together. Nodes of other instances are
    /// unknown up front, so they are peeled one hit at a time.
    fn element_beneath_inspector(&mut self, x: f64, y: f64) -> Option<NodeId> {
        let mut transparent: Vec<NodeId> = self.owned.iter().copied().collect();
        for &node in &transparent {
            self.document.set_style(node, "pointer-events", "none");
        }

        let mut beneath = self.document.element_from_point(x, y);
        while let Some(node) = beneath
            && self.is_inspector_node(node)
            && !transparent.contains(&node)
        {
            self.document.set_style(node, "pointer-events", "none");
            transparent.push(node);
            beneath = self.document.element_from_point(x, y);
        }

        for &node in &transparent {
            self.document.set_style(node, "pointer-events", "");
        }
        beneath
    }

    /// Root and body are never inspected. Exclusion wins over inclusion; a
    /// non-empty include list must match.
    fn should_inspect(&self, node: NodeId) -> bool {
        if Some(node) == self.document.body() || Some(node) == self.document.document_element() {
            return false;
        }

        let behavior = &self.config.behavior;
        if self.matches_filter(node, &behavior.exclude_selectors) {
            return false;
        }

        behavior.include_selectors.is_empty()
            || self.matches_filter(node, &behavior.include_selectors)
    }

    /// Include/exclude test. Skipped selectors are logged against this
    /// instance.
    fn matches_filter(&self, node: NodeId, selectors: &[String]) -> bool {
        matches_any_selector_with(&self.document, node, selectors, |selector, err| {
            trace!(
                inspector_id = %self.id,
                selector,
                error = %err,
                "Skipping invalid selector"
            );
        })
    }
}

// ============================================================================
// Inspector - Overlay
// ============================================================================

impl<D: Document> Inspector<D> {
    fn inject_inspector_styles(&mut self) {
        let css = build_stylesheet(&self.config.styles);
        inject_styles(&mut self.document, &css, STYLE_ELEMENT_ID);
    }

    fn create_owned(&mut self, class: &str) -> NodeId {
        let node = self.document.create_element("div");
        self.document.set_attribute(node, "class", class);
        self.document
            .set_attribute(node, MARKER_ATTRIBUTE, &self.id.to_string());
        self.owned.insert(node);
        node
    }

    fn create_overlay(&mut self) {
        if !self.config.styles.overlay.enabled {
            return;
        }

        let root = self.create_owned(OVERLAY_CLASS);

        let highlight = self.create_owned(HIGHLIGHT_CLASS);
        self.document.set_style(highlight, "display", "none");
        self.document.append_child(root, highlight);

        let crosshair = if self.config.styles.crosshair.enabled {
            let vertical = self.create_owned(&format!("{CROSSHAIR_CLASS} {CROSSHAIR_VERTICAL_CLASS}"));
            let horizontal =
                self.create_owned(&format!("{CROSSHAIR_CLASS} {CROSSHAIR_HORIZONTAL_CLASS}"));
            self.document.append_child(root, vertical);
            self.document.append_child(root, horizontal);
            Some((vertical, horizontal))
        } else {
            None
        };

        if let Some(body) = self.document.body() {
            self.document.append_child(body, root);
        }

        trace!(inspector_id = %self.id, root = %root, "Overlay created");
        self.overlay = Some(OverlayNodes {
            root,
            highlight,
            crosshair,
        });
    }

    fn remove_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            self.document.remove_node(overlay.root);
            self.owned.remove(&overlay.root);
            self.owned.remove(&overlay.highlight);
            if let Some((vertical, horizontal)) = overlay.crosshair {
                self.owned.remove(&vertical);
                self.owned.remove(&horizontal);
            }
            trace!(inspector_id = %self.id, root = %overlay.root, "Overlay removed");
        }
    }

    fn move_crosshair(&mut self, x: f64, y: f64) {
        if !self.config.styles.crosshair.enabled {
            return;
        }
        if let Some((vertical, horizontal)) = self.overlay.and_then(|overlay| overlay.crosshair) {
            self.document.set_style(vertical, "left", &format!("{x}px"));
            self.document.set_style(horizontal, "top", &format!("{y}px"));
        }
    }

    fn highlight_element(&mut self, node: NodeId, snapshot: &InspectedElement) {
        self.highlighted = Some(node);

        let Some(overlay) = self.overlay else {
            return;
        };

        let rect = snapshot.bounding_rect;
        let highlight = overlay.highlight;
        self.document.set_style(highlight, "display", "block");
        self.document.set_style(highlight, "top", &format!("{}px", rect.top()));
        self.document.set_style(highlight, "left", &format!("{}px", rect.left()));
        self.document.set_style(highlight, "width", &format!("{}px", rect.width));
        self.document.set_style(highlight, "height", &format!("{}px", rect.height));
        self.document.set_style(
            highlight,
            "border-radius",
            snapshot.computed_style.get("border-radius"),
        );

        if self.config.styles.label.enabled {
            self.create_floating_label(snapshot);
        }
    }

    fn clear_highlight(&mut self) {
        if let Some(overlay) = self.overlay {
            self.document.set_style(overlay.highlight, "display", "none");
        }
        self.highlighted = None;

        if let Some(label) = self.label.take() {
            self.document.remove_node(label);
            self.owned.remove(&label);
        }
    }

    fn create_floating_label(&mut self, snapshot: &InspectedElement) {
        let label_styles = &self.config.styles.label;
        let text = match &label_styles.custom_template {
            Some(template) => template(snapshot),
            None => snapshot.tag(),
        };
        let (top, left) = label_origin(
            snapshot.bounding_rect,
            label_styles.position,
            label_styles.offset,
        );

        let label = self.create_owned(LABEL_CLASS);
        self.document.set_text_content(label, &text);
        self.document.set_style(label, "top", &format!("{top}px"));
        self.document.set_style(label, "left", &format!("{left}px"));
        if let Some(body) = self.document.body() {
            self.document.append_child(body, label);
        }
        self.label = Some(label);
    }
}

/// Top-left corner of the floating label.
///
/// A label that would start above the viewport moves below the element.
fn label_origin(rect: Rect, position: LabelPosition, offset: f64) -> (f64, f64) {
    let (top, left) = match position {
        LabelPosition::Top => (rect.top() - offset - LABEL_HEIGHT, rect.left()),
        LabelPosition::Bottom => (rect.bottom() + offset, rect.left()),
        LabelPosition::Left => (rect.top(), rect.left() - offset),
        LabelPosition::Right => (rect.top(), rect.right() + offset),
    };

    if top < 0.0 {
        (rect.bottom() + offset, left)
    } else {
        (top, left)
    }
}

// ============================================================================
// Tests
// ============================================================================
