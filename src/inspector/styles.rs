//! Inspector stylesheet synthesis and injection.
//!
//! One `<style>` element, found by id, carries every overlay rule. Layering
//! is fixed relative to the configured base z-index:
//!
//! | Layer | z-index |
//! |-------|---------|
//! | Backdrop | `z` |
//! | Crosshair, highlight box | `z + 1` |
//! | Floating label | `z + 2` |

// ============================================================================
// Imports
// ============================================================================

use tracing::trace;

use crate::dom::Document;
use crate::identifiers::NodeId;

use super::config::InspectorStyles;

// ============================================================================
// Constants
// ============================================================================

/// `id` of the injected `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "devlens-inspector-styles";

/// Backdrop class.
pub const OVERLAY_CLASS: &str = "devlens-inspector-overlay";

/// Class shared by both crosshair bars.
pub const CROSSHAIR_CLASS: &str = "devlens-inspector-crosshair";

/// Vertical crosshair bar class.
pub const CROSSHAIR_VERTICAL_CLASS: &str = "devlens-inspector-crosshair-vertical";

/// Horizontal crosshair bar class.
pub const CROSSHAIR_HORIZONTAL_CLASS: &str = "devlens-inspector-crosshair-horizontal";

/// Highlight box class.
pub const HIGHLIGHT_CLASS: &str = "devlens-inspector-highlight-overlay";

/// Floating label class.
pub const LABEL_CLASS: &str = "devlens-inspector-label";

/// Attribute set on every inspector-owned node; the value is the owner's id.
pub const MARKER_ATTRIBUTE: &str = "data-devlens-inspector";

// ============================================================================
// Stylesheet
// ============================================================================

/// Renders the overlay stylesheet for the given styles.
#[must_use]
pub fn build_stylesheet(styles: &InspectorStyles) -> String {
    let crosshair = &styles.crosshair;
    let highlight = &styles.highlight;
    let label = &styles.label;
    let overlay = &styles.overlay;
    let base = overlay.z_index;

    format!(
        r#".{OVERLAY_CLASS} {{
  position: fixed !important;
  top: 0 !important;
  left: 0 !important;
  width: 100vw !important;
  height: 100vh !important;
  background-color: {overlay_bg} !important;
  pointer-events: none !important;
  z-index: {z0} !important;
  cursor: {cursor} !important;
}}

.{CROSSHAIR_CLASS} {{
  position: fixed !important;
  background-color: {crosshair_color} !important;
  opacity: {crosshair_opacity} !important;
  pointer-events: none !important;
  z-index: {z1} !important;
}}

.{CROSSHAIR_VERTICAL_CLASS} {{
  width: {crosshair_width}px !important;
  height: 100vh !important;
}}

.{CROSSHAIR_HORIZONTAL_CLASS} {{
  width: 100vw !important;
  height: {crosshair_width}px !important;
}}

.{HIGHLIGHT_CLASS} {{
  position: fixed !important;
  pointer-events: none !important;
  z-index: {z1} !important;
  border: {border_width}px {border_style} {border_color} !important;
  background-color: {highlight_bg} !important;
  border-radius: {highlight_radius};
  box-sizing: border-box !important;
  transition: all 0.1s ease-out !important;
}}

.{LABEL_CLASS} {{
  position: fixed !important;
  background-color: {label_bg} !important;
  color: {label_color} !important;
  padding: {label_padding} !important;
  border-radius: {label_radius} !important;
  font-size: {label_font_size} !important;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif !important;
  white-space: nowrap !important;
  z-index: {z2} !important;
  pointer-events: none !important;
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.2) !important;
}}
"#,
        overlay_bg = overlay.background_color,
        z0 = base,
        z1 = base + 1.0,
        z2 = base + 2.0,
        cursor = styles.cursor,
        crosshair_color = crosshair.color,
        crosshair_opacity = crosshair.opacity,
        crosshair_width = crosshair.width,
        border_width = highlight.border_width,
        border_style = highlight.border_style,
        border_color = highlight.border_color,
        highlight_bg = highlight.background_color,
        highlight_radius = highlight.border_radius,
        label_bg = label.background_color,
        label_color = label.text_color,
        label_padding = label.padding,
        label_radius = label.border_radius,
        label_font_size = label.font_size,
    )
}

// ============================================================================
// Injection
// ============================================================================

/// Inserts `css` as a `<style id="{id}">` element, replacing any element
/// already carrying that id.
pub fn inject_styles<D: Document + ?Sized>(doc: &mut D, css: &str, id: &str) -> NodeId {
    remove_styles(doc, id);

    let style = doc.create_element("style");
    doc.set_attribute(style, "id", id);
    doc.set_text_content(style, css);

    if let Some(container) = doc.head().or_else(|| doc.document_element()) {
        doc.append_child(container, style);
    }

    trace!(id, node = %style, "Injected stylesheet");
    style
}

/// Removes the element with the given id. Returns `true` if one existed.
pub fn remove_styles<D: Document + ?Sized>(doc: &mut D, id: &str) -> bool {
    match doc.get_element_by_id(id) {
        Some(existing) => {
            doc.remove_node(existing);
            trace!(id, node = %existing, "Removed stylesheet");
            true
        }
        None => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
