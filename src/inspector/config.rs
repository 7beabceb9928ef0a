//! Inspector configuration and deep merging.
//!
//! A host supplies a [`PartialInspectorConfig`] (built in code or decoded
//! from JSON). It is merged leaf-by-leaf over the documented defaults into an
//! [`InspectorConfig`]; every color and number passes through the
//! sanitizers on the way in.
//!
//! # Example
//!
//! ```ignore
//! use devlens_inspector::{InspectorConfig, PartialBehavior, PartialInspectorConfig};
//!
//! let partial = PartialInspectorConfig::new()
//!     .on_element_click(|element| println!("{}", element.selector))
//!     .with_behavior(PartialBehavior {
//!         click_threshold: Some(3.into()),
//!         ..Default::default()
//!     });
//!
//! let config = InspectorConfig::merged(&partial);
//! assert_eq!(config.behavior.click_threshold, 3.0);
//! assert!(config.styles.crosshair.enabled);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

use super::sanitize::{NumberValue, sanitize_color, sanitize_number};
use super::synth::InspectedElement;

// ============================================================================
// Callback Types
// ============================================================================

/// Callback receiving an element snapshot.
pub type ElementCallback = Arc<dyn Fn(&InspectedElement) + Send + Sync>;

/// Callback for activation state changes.
pub type LifecycleCallback = Arc<dyn Fn() + Send + Sync>;

/// Produces floating label text for an element snapshot.
pub type LabelTemplate = Arc<dyn Fn(&InspectedElement) -> String + Send + Sync>;

// ============================================================================
// Defaults
// ============================================================================

const DEFAULT_CROSSHAIR_COLOR: &str = "#ff0000";
const DEFAULT_CROSSHAIR_WIDTH: f64 = 2.0;
const DEFAULT_CROSSHAIR_OPACITY: f64 = 0.5;

const DEFAULT_HIGHLIGHT_BORDER_COLOR: &str = "red";
const DEFAULT_HIGHLIGHT_BORDER_WIDTH: f64 = 2.0;
const DEFAULT_HIGHLIGHT_BACKGROUND: &str = "rgba(255, 0, 0, 0.1)";

const DEFAULT_LABEL_BACKGROUND: &str = "#ff0000";
const DEFAULT_LABEL_TEXT_COLOR: &str = "#ffffff";
const DEFAULT_LABEL_OFFSET: f64 = 8.0;

const DEFAULT_OVERLAY_BACKGROUND: &str = "rgba(0, 0, 0, 0.1)";
const DEFAULT_OVERLAY_Z_INDEX: f64 = 999_999.0;

const DEFAULT_CLICK_THRESHOLD: f64 = 1.0;

/// Accepted range for the crosshair line width.
pub const CROSSHAIR_WIDTH_RANGE: (f64, f64) = (1.0, 10.0);
/// Accepted range for the crosshair opacity.
pub const CROSSHAIR_OPACITY_RANGE: (f64, f64) = (0.0, 1.0);
/// Accepted range for the highlight border width.
pub const HIGHLIGHT_BORDER_WIDTH_RANGE: (f64, f64) = (1.0, 20.0);
/// Accepted range for the label offset.
pub const LABEL_OFFSET_RANGE: (f64, f64) = (0.0, 100.0);
/// Accepted range for the overlay z-index.
pub const OVERLAY_Z_INDEX_RANGE: (f64, f64) = (1.0, 9_999_999.0);
/// Accepted range for the auto-deactivation click threshold.
pub const CLICK_THRESHOLD_RANGE: (f64, f64) = (1.0, 100.0);

fn noop_element() -> ElementCallback {
    Arc::new(|_| {})
}

fn noop_lifecycle() -> LifecycleCallback {
    Arc::new(|| {})
}

// ============================================================================
// InspectorConfig
// ============================================================================

/// Fully merged inspector configuration.
#[derive(Clone)]
pub struct InspectorConfig {
    /// Invoked when a qualifying element is clicked.
    pub on_element_click: ElementCallback,
    /// Invoked when a qualifying element is hovered.
    pub on_element_hover: ElementCallback,
    /// Invoked after activation.
    pub on_activate: LifecycleCallback,
    /// Invoked after deactivation.
    pub on_deactivate: LifecycleCallback,
    /// Visual settings.
    pub styles: InspectorStyles,
    /// Interaction settings.
    pub behavior: InspectorBehavior,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            on_element_click: noop_element(),
            on_element_hover: noop_element(),
            on_activate: noop_lifecycle(),
            on_deactivate: noop_lifecycle(),
            styles: InspectorStyles::default(),
            behavior: InspectorBehavior::default(),
        }
    }
}

impl fmt::Debug for InspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectorConfig")
            .field("styles", &self.styles)
            .field("behavior", &self.behavior)
            .finish_non_exhaustive()
    }
}

impl InspectorConfig {
    /// Merges a partial configuration over the documented defaults.
    #[must_use]
    pub fn merged(partial: &PartialInspectorConfig) -> Self {
        let mut config = Self::default();
        config.apply(partial);
        config
    }

    /// Merges a partial configuration over the current values.
    ///
    /// Omitted leaves keep their current value. Invalid colors and numbers
    /// fall back to the documented default, not the current value.
    pub fn apply(&mut self, partial: &PartialInspectorConfig) {
        if let Some(callback) = &partial.on_element_click {
            self.on_element_click = Arc::clone(callback);
        }
        if let Some(callback) = &partial.on_element_hover {
            self.on_element_hover = Arc::clone(callback);
        }
        if let Some(callback) = &partial.on_activate {
            self.on_activate = Arc::clone(callback);
        }
        if let Some(callback) = &partial.on_deactivate {
            self.on_deactivate = Arc::clone(callback);
        }
        if let Some(styles) = &partial.styles {
            self.styles.apply(styles);
        }
        if let Some(behavior) = &partial.behavior {
            self.behavior.apply(behavior);
        }
    }
}

// ============================================================================
// Style Groups
// ============================================================================

/// Visual settings.
#[derive(Debug, Clone)]
pub struct InspectorStyles {
    /// Cursor-following crosshair bars.
    pub crosshair: CrosshairStyles,
    /// Box drawn over the hovered element.
    pub highlight: HighlightStyles,
    /// Floating label next to the highlight.
    pub label: LabelStyles,
    /// CSS cursor while inspecting.
    pub cursor: String,
    /// Dimming backdrop.
    pub overlay: OverlayStyles,
}

impl Default for InspectorStyles {
    fn default() -> Self {
        Self {
            crosshair: CrosshairStyles::default(),
            highlight: HighlightStyles::default(),
            label: LabelStyles::default(),
            cursor: "crosshair".to_string(),
            overlay: OverlayStyles::default(),
        }
    }
}

impl InspectorStyles {
    fn apply(&mut self, partial: &PartialStyles) {
        if let Some(crosshair) = &partial.crosshair {
            self.crosshair.apply(crosshair);
        }
        if let Some(highlight) = &partial.highlight {
            self.highlight.apply(highlight);
        }
        if let Some(label) = &partial.label {
            self.label.apply(label);
        }
        merge_value(&mut self.cursor, &partial.cursor);
        if let Some(overlay) = &partial.overlay {
            self.overlay.apply(overlay);
        }
    }
}

/// Crosshair settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairStyles {
    /// Draw the crosshair bars.
    pub enabled: bool,
    /// Bar color.
    pub color: String,
    /// Bar thickness in pixels, `[1, 10]`.
    pub width: f64,
    /// Bar opacity, `[0, 1]`.
    pub opacity: f64,
}

impl Default for CrosshairStyles {
    fn default() -> Self {
        Self {
            enabled: true,
            color: DEFAULT_CROSSHAIR_COLOR.to_string(),
            width: DEFAULT_CROSSHAIR_WIDTH,
            opacity: DEFAULT_CROSSHAIR_OPACITY,
        }
    }
}

impl CrosshairStyles {
    fn apply(&mut self, partial: &PartialCrosshair) {
        merge_value(&mut self.enabled, &partial.enabled);
        merge_color(&mut self.color, &partial.color, DEFAULT_CROSSHAIR_COLOR);
        merge_number(
            &mut self.width,
            &partial.width,
            CROSSHAIR_WIDTH_RANGE,
            DEFAULT_CROSSHAIR_WIDTH,
        );
        merge_number(
            &mut self.opacity,
            &partial.opacity,
            CROSSHAIR_OPACITY_RANGE,
            DEFAULT_CROSSHAIR_OPACITY,
        );
    }
}

/// Highlight box settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightStyles {
    /// Border color.
    pub border_color: String,
    /// Border width in pixels, `[1, 20]`.
    pub border_width: f64,
    /// CSS border style (`solid`, `dashed`, ...).
    pub border_style: String,
    /// Fill color.
    pub background_color: String,
    /// CSS border radius. Replaced by the target's own radius while highlighting.
    pub border_radius: String,
}

impl Default for HighlightStyles {
    fn default() -> Self {
        Self {
            border_color: DEFAULT_HIGHLIGHT_BORDER_COLOR.to_string(),
            border_width: DEFAULT_HIGHLIGHT_BORDER_WIDTH,
            border_style: "solid".to_string(),
            background_color: DEFAULT_HIGHLIGHT_BACKGROUND.to_string(),
            border_radius: "0".to_string(),
        }
    }
}

impl HighlightStyles {
    fn apply(&mut self, partial: &PartialHighlight) {
        merge_color(
            &mut self.border_color,
            &partial.border_color,
            DEFAULT_HIGHLIGHT_BORDER_COLOR,
        );
        merge_number(
            &mut self.border_width,
            &partial.border_width,
            HIGHLIGHT_BORDER_WIDTH_RANGE,
            DEFAULT_HIGHLIGHT_BORDER_WIDTH,
        );
        merge_value(&mut self.border_style, &partial.border_style);
        merge_color(
            &mut self.background_color,
            &partial.background_color,
            DEFAULT_HIGHLIGHT_BACKGROUND,
        );
        merge_value(&mut self.border_radius, &partial.border_radius);
    }
}

/// Side of the highlighted element the label is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LabelPosition {
    /// Above the element (default).
    #[default]
    Top,
    /// Below the element.
    Bottom,
    /// Left of the element.
    Left,
    /// Right of the element.
    Right,
}

impl LabelPosition {
    /// Returns the position name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LabelPosition::Top => "top",
            LabelPosition::Bottom => "bottom",
            LabelPosition::Left => "left",
            LabelPosition::Right => "right",
        }
    }
}

impl From<String> for LabelPosition {
    /// Unknown names fall back to [`LabelPosition::Top`].
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "bottom" => LabelPosition::Bottom,
            "left" => LabelPosition::Left,
            "right" => LabelPosition::Right,
            _ => LabelPosition::Top,
        }
    }
}

/// Floating label settings.
#[derive(Clone)]
pub struct LabelStyles {
    /// Show the label.
    pub enabled: bool,
    /// Label fill color.
    pub background_color: String,
    /// Label text color.
    pub text_color: String,
    /// CSS font size.
    pub font_size: String,
    /// CSS padding.
    pub padding: String,
    /// CSS border radius.
    pub border_radius: String,
    /// Anchor side.
    pub position: LabelPosition,
    /// Gap between element and label in pixels, `[0, 100]`.
    pub offset: f64,
    /// Hint for templates: include the selector.
    pub show_selector: bool,
    /// Hint for templates: include the dimensions.
    pub show_dimensions: bool,
    /// Label text producer. `None` shows the lower-case tag name.
    pub custom_template: Option<LabelTemplate>,
}

impl Default for LabelStyles {
    fn default() -> Self {
        Self {
            enabled: true,
            background_color: DEFAULT_LABEL_BACKGROUND.to_string(),
            text_color: DEFAULT_LABEL_TEXT_COLOR.to_string(),
            font_size: "12px".to_string(),
            padding: "4px 8px".to_string(),
            border_radius: "4px".to_string(),
            position: LabelPosition::Top,
            offset: DEFAULT_LABEL_OFFSET,
            show_selector: true,
            show_dimensions: true,
            custom_template: None,
        }
    }
}

impl fmt::Debug for LabelStyles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelStyles")
            .field("enabled", &self.enabled)
            .field("background_color", &self.background_color)
            .field("text_color", &self.text_color)
            .field("font_size", &self.font_size)
            .field("padding", &self.padding)
            .field("border_radius", &self.border_radius)
            .field("position", &self.position)
            .field("offset", &self.offset)
            .field("show_selector", &self.show_selector)
            .field("show_dimensions", &self.show_dimensions)
            .field("custom_template", &self.custom_template.is_some())
            .finish()
    }
}

impl LabelStyles {
    fn apply(&mut self, partial: &PartialLabel) {
        merge_value(&mut self.enabled, &partial.enabled);
        merge_color(
            &mut self.background_color,
            &partial.background_color,
            DEFAULT_LABEL_BACKGROUND,
        );
        merge_color(
            &mut self.text_color,
            &partial.text_color,
            DEFAULT_LABEL_TEXT_COLOR,
        );
        merge_value(&mut self.font_size, &partial.font_size);
        merge_value(&mut self.padding, &partial.padding);
        merge_value(&mut self.border_radius, &partial.border_radius);
        merge_value(&mut self.position, &partial.position);
        merge_number(
            &mut self.offset,
            &partial.offset,
            LABEL_OFFSET_RANGE,
            DEFAULT_LABEL_OFFSET,
        );
        merge_value(&mut self.show_selector, &partial.show_selector);
        merge_value(&mut self.show_dimensions, &partial.show_dimensions);
        if let Some(template) = &partial.custom_template {
            self.custom_template = Some(Arc::clone(template));
        }
    }
}

/// Backdrop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyles {
    /// Create the overlay nodes at all. Without them nothing is drawn.
    pub enabled: bool,
    /// Backdrop color.
    pub background_color: String,
    /// Base stacking level, `[1, 9999999]`.
    pub z_index: f64,
}

impl Default for OverlayStyles {
    fn default() -> Self {
        Self {
            enabled: true,
            background_color: DEFAULT_OVERLAY_BACKGROUND.to_string(),
            z_index: DEFAULT_OVERLAY_Z_INDEX,
        }
    }
}

impl OverlayStyles {
    fn apply(&mut self, partial: &PartialOverlay) {
        merge_value(&mut self.enabled, &partial.enabled);
        merge_color(
            &mut self.background_color,
            &partial.background_color,
            DEFAULT_OVERLAY_BACKGROUND,
        );
        merge_number(
            &mut self.z_index,
            &partial.z_index,
            OVERLAY_Z_INDEX_RANGE,
            DEFAULT_OVERLAY_Z_INDEX,
        );
    }
}

// ============================================================================
// Behavior
// ============================================================================

/// Interaction settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectorBehavior {
    /// Stop click propagation to page listeners.
    pub stop_propagation: bool,
    /// Suppress the click's default action.
    pub prevent_default: bool,
    /// Deactivate once `click_threshold` clicks were processed.
    pub auto_deactivate: bool,
    /// Clicks before auto-deactivation, `[1, 100]`.
    pub click_threshold: f64,
    /// Elements matching any of these are never inspected.
    pub exclude_selectors: Vec<String>,
    /// When non-empty, only matching elements are inspected.
    pub include_selectors: Vec<String>,
    /// Key values that end inspection.
    pub capture_keys: Vec<String>,
}

impl Default for InspectorBehavior {
    fn default() -> Self {
        Self {
            stop_propagation: true,
            prevent_default: true,
            auto_deactivate: true,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            exclude_selectors: Vec::new(),
            include_selectors: vec!["*".to_string()],
            capture_keys: vec!["Escape".to_string()],
        }
    }
}

impl InspectorBehavior {
    fn apply(&mut self, partial: &PartialBehavior) {
        merge_value(&mut self.stop_propagation, &partial.stop_propagation);
        merge_value(&mut self.prevent_default, &partial.prevent_default);
        merge_value(&mut self.auto_deactivate, &partial.auto_deactivate);
        merge_number(
            &mut self.click_threshold,
            &partial.click_threshold,
            CLICK_THRESHOLD_RANGE,
            DEFAULT_CLICK_THRESHOLD,
        );
        merge_value(&mut self.exclude_selectors, &partial.exclude_selectors);
        merge_value(&mut self.include_selectors, &partial.include_selectors);
        merge_value(&mut self.capture_keys, &partial.capture_keys);
    }
}

// ============================================================================
// Merge Helpers
// ============================================================================

fn merge_value<T: Clone>(target: &mut T, input: &Option<T>) {
    if let Some(value) = input {
        *target = value.clone();
    }
}

fn merge_color(target: &mut String, input: &Option<String>, default_color: &str) {
    if let Some(color) = input {
        *target = sanitize_color(color, default_color);
    }
}

fn merge_number(target: &mut f64, input: &Option<NumberValue>, range: (f64, f64), default_value: f64) {
    if let Some(value) = input {
        *target = sanitize_number(value.clone(), range.0, range.1, default_value);
    }
}

// ============================================================================
// PartialInspectorConfig
// ============================================================================

/// User-supplied configuration. Every leaf is optional.
///
/// Deserializes from camelCase JSON; callbacks and the label template can
/// only be set in code.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialInspectorConfig {
    /// Click callback.
    #[serde(skip)]
    pub on_element_click: Option<ElementCallback>,
    /// Hover callback.
    #[serde(skip)]
    pub on_element_hover: Option<ElementCallback>,
    /// Activation callback.
    #[serde(skip)]
    pub on_activate: Option<LifecycleCallback>,
    /// Deactivation callback.
    #[serde(skip)]
    pub on_deactivate: Option<LifecycleCallback>,
    /// Visual overrides.
    pub styles: Option<PartialStyles>,
    /// Interaction overrides.
    pub behavior: Option<PartialBehavior>,
}

impl fmt::Debug for PartialInspectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialInspectorConfig")
            .field("on_element_click", &self.on_element_click.is_some())
            .field("on_element_hover", &self.on_element_hover.is_some())
            .field("on_activate", &self.on_activate.is_some())
            .field("on_deactivate", &self.on_deactivate.is_some())
            .field("styles", &self.styles)
            .field("behavior", &self.behavior)
            .finish()
    }
}

impl PartialInspectorConfig {
    /// Creates an empty partial configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a partial configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the text is not valid
    /// JSON or a field has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a partial configuration from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if a field has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Sets the click callback.
    #[must_use]
    pub fn on_element_click(
        mut self,
        callback: impl Fn(&InspectedElement) + Send + Sync + 'static,
    ) -> Self {
        self.on_element_click = Some(Arc::new(callback));
        self
    }

    /// Sets the hover callback.
    #[must_use]
    pub fn on_element_hover(
        mut self,
        callback: impl Fn(&InspectedElement) + Send + Sync + 'static,
    ) -> Self {
        self.on_element_hover = Some(Arc::new(callback));
        self
    }

    /// Sets the activation callback.
    #[must_use]
    pub fn on_activate(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_activate = Some(Arc::new(callback));
        self
    }

    /// Sets the deactivation callback.
    #[must_use]
    pub fn on_deactivate(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_deactivate = Some(Arc::new(callback));
        self
    }

    /// Sets the label template.
    #[must_use]
    pub fn with_label_template(
        mut self,
        template: impl Fn(&InspectedElement) -> String + Send + Sync + 'static,
    ) -> Self {
        self.styles
            .get_or_insert_with(PartialStyles::default)
            .label
            .get_or_insert_with(PartialLabel::default)
            .custom_template = Some(Arc::new(template));
        self
    }

    /// Sets the visual overrides.
    #[must_use]
    pub fn with_styles(mut self, styles: PartialStyles) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Sets the interaction overrides.
    #[must_use]
    pub fn with_behavior(mut self, behavior: PartialBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }
}

/// Visual overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialStyles {
    /// Crosshair overrides.
    pub crosshair: Option<PartialCrosshair>,
    /// Highlight overrides.
    pub highlight: Option<PartialHighlight>,
    /// Label overrides.
    pub label: Option<PartialLabel>,
    /// Cursor override.
    pub cursor: Option<String>,
    /// Backdrop overrides.
    pub overlay: Option<PartialOverlay>,
}

/// Crosshair overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialCrosshair {
    pub enabled: Option<bool>,
    pub color: Option<String>,
    pub width: Option<NumberValue>,
    pub opacity: Option<NumberValue>,
}

/// Highlight overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialHighlight {
    pub border_color: Option<String>,
    pub border_width: Option<NumberValue>,
    pub border_style: Option<String>,
    pub background_color: Option<String>,
    pub border_radius: Option<String>,
}

/// Label overrides.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialLabel {
    pub enabled: Option<bool>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub font_size: Option<String>,
    pub padding: Option<String>,
    pub border_radius: Option<String>,
    pub position: Option<LabelPosition>,
    pub offset: Option<NumberValue>,
    pub show_selector: Option<bool>,
    pub show_dimensions: Option<bool>,
    #[serde(skip)]
    pub custom_template: Option<LabelTemplate>,
}

impl fmt::Debug for PartialLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialLabel")
            .field("enabled", &self.enabled)
            .field("background_color", &self.background_color)
            .field("text_color", &self.text_color)
            .field("position", &self.position)
            .field("offset", &self.offset)
            .field("custom_template", &self.custom_template.is_some())
            .finish_non_exhaustive()
    }
}

/// Backdrop overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialOverlay {
    pub enabled: Option<bool>,
    pub background_color: Option<String>,
    pub z_index: Option<NumberValue>,
}

/// Interaction overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialBehavior {
    pub stop_propagation: Option<bool>,
    pub prevent_default: Option<bool>,
    pub auto_deactivate: Option<bool>,
    pub click_threshold: Option<NumberValue>,
    pub exclude_selectors: Option<Vec<String>>,
    pub include_selectors: Option<Vec<String>>,
    pub capture_keys: Option<Vec<String>>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InspectorConfig::default();
        assert!(config.styles.crosshair.enabled);
        assert_eq!(config.styles.crosshair.color, "#ff0000");
        assert_eq!(config.styles.crosshair.width, 2.0);
        assert_eq!(config.styles.crosshair.opacity, 0.5);
        assert_eq!(config.styles.highlight.border_color, "red");
        assert_eq!(config.styles.highlight.border_style, "solid");
        assert_eq!(config.styles.label.position, LabelPosition::Top);
        assert_eq!(config.styles.label.offset, 8.0);
        assert!(config.styles.label.custom_template.is_none());
        assert_eq!(config.styles.cursor, "crosshair");
        assert_eq!(config.styles.overlay.z_index, 999_999.0);
        assert!(config.behavior.auto_deactivate);
        assert_eq!(config.behavior.click_threshold, 1.0);
        assert!(config.behavior.exclude_selectors.is_empty());
        assert_eq!(config.behavior.include_selectors, vec!["*"]);
        assert_eq!(config.behavior.capture_keys, vec!["Escape"]);
    }

    #[test]
    fn test_empty_partial_yields_defaults() {
        let config = InspectorConfig::merged(&PartialInspectorConfig::new());
        assert_eq!(config.styles.crosshair, CrosshairStyles::default());
        assert_eq!(config.behavior, InspectorBehavior::default());
    }

    #[test]
    fn test_nested_groups_merge_field_by_field() {
        let partial = PartialInspectorConfig::new().with_styles(PartialStyles {
            crosshair: Some(PartialCrosshair {
                color: Some("#00ff00".into()),
                ..Default::default()
            }),
            ..Default::default()
        });

        let config = InspectorConfig::merged(&partial);
        assert_eq!(config.styles.crosshair.color, "#00ff00");
        assert!(config.styles.crosshair.enabled);
        assert_eq!(config.styles.crosshair.width, 2.0);
        assert_eq!(config.styles.crosshair.opacity, 0.5);
        assert_eq!(config.styles.highlight, HighlightStyles::default());
    }

    #[test]
    fn test_numbers_are_clamped_and_colors_sanitized() {
        let partial = PartialInspectorConfig::new()
            .with_styles(PartialStyles {
                crosshair: Some(PartialCrosshair {
                    width: Some(500.into()),
                    opacity: Some("x".into()),
                    color: Some("#zzzzzz".into()),
                    ..Default::default()
                }),
                overlay: Some(PartialOverlay {
                    z_index: Some(0.into()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .with_behavior(PartialBehavior {
                click_threshold: Some(1000.into()),
                ..Default::default()
            });

        let config = InspectorConfig::merged(&partial);
        assert_eq!(config.styles.crosshair.width, 10.0);
        assert_eq!(config.styles.crosshair.opacity, 0.5);
        assert_eq!(config.styles.crosshair.color, "#ff0000");
        assert_eq!(config.styles.overlay.z_index, 1.0);
        assert_eq!(config.behavior.click_threshold, 100.0);
    }

    #[test]
    fn test_apply_keeps_current_values() {
        let mut config = InspectorConfig::merged(&PartialInspectorConfig::new().with_behavior(
            PartialBehavior {
                click_threshold: Some(5.into()),
                ..Default::default()
            },
        ));

        config.apply(&PartialInspectorConfig::new().with_behavior(PartialBehavior {
            auto_deactivate: Some(false),
            ..Default::default()
        }));

        assert_eq!(config.behavior.click_threshold, 5.0);
        assert!(!config.behavior.auto_deactivate);
    }

    #[test]
    fn test_list_fields_are_copied() {
        let partial = PartialInspectorConfig::new().with_behavior(PartialBehavior {
            exclude_selectors: Some(vec![".ad".into()]),
            ..Default::default()
        });
        let config = InspectorConfig::merged(&partial);
        drop(partial);
        assert_eq!(config.behavior.exclude_selectors, vec![".ad"]);
    }

    #[test]
    fn test_from_json() {
        let partial = PartialInspectorConfig::from_json(
            r##"{
                "styles": {
                    "crosshair": { "enabled": false, "width": "4" },
                    "label": { "position": "bottom", "offset": null },
                    "overlay": { "zIndex": 50 }
                },
                "behavior": {
                    "clickThreshold": 2,
                    "excludeSelectors": [".ads"],
                    "captureKeys": ["Escape", "q"]
                }
            }"##,
        )
        .unwrap();

        let config = InspectorConfig::merged(&partial);
        assert!(!config.styles.crosshair.enabled);
        assert_eq!(config.styles.crosshair.width, 4.0);
        assert_eq!(config.styles.label.position, LabelPosition::Bottom);
        assert_eq!(config.styles.label.offset, 8.0);
        assert_eq!(config.styles.overlay.z_index, 50.0);
        assert_eq!(config.behavior.click_threshold, 2.0);
        assert_eq!(config.behavior.exclude_selectors, vec![".ads"]);
        assert_eq!(config.behavior.capture_keys, vec!["Escape", "q"]);
    }

    #[test]
    fn test_unknown_label_position_falls_back_to_top() {
        let partial =
            PartialInspectorConfig::from_json(r#"{"styles":{"label":{"position":"middle"}}}"#)
                .unwrap();
        let config = InspectorConfig::merged(&partial);
        assert_eq!(config.styles.label.position, LabelPosition::Top);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = PartialInspectorConfig::from_json(r#"{"behavior": {"captureKeys": "Escape"}}"#)
            .unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_label_template_builder() {
        let partial = PartialInspectorConfig::new().with_label_template(|el| el.selector.clone());
        let config = InspectorConfig::merged(&partial);
        assert!(config.styles.label.custom_template.is_some());
        assert!(config.styles.label.enabled);
    }
}
