//! Inspector module.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Inspector`] | Activation state machine bound to a host document |
//! | [`InspectorConfig`] | Merged configuration with callbacks |
//! | [`PartialInspectorConfig`] | User-supplied overrides, JSON-decodable |
//! | [`InspectedElement`] | Snapshot handed to hover and click callbacks |
//! | [`PointerEvent`] / [`KeyEvent`] | Events forwarded by the host |
//!
//! # Example
//!
//! ```ignore
//! use devlens_inspector::{Inspector, Key, KeyEvent, MemoryDocument, PartialInspectorConfig};
//!
//! let config = PartialInspectorConfig::from_json(r#"{"behavior":{"clickThreshold":3}}"#)?
//!     .on_element_click(|element| println!("{} {}", element.selector, element.xpath));
//!
//! let mut inspector = Inspector::new(MemoryDocument::new("https://example.com/")?, &config);
//! inspector.activate();
//! inspector.handle_key_down(&mut KeyEvent::from(Key::Escape));
//! assert!(!inspector.is_inspector_active());
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Configuration tree and deep merge.
pub mod config;

/// Inspection state machine.
pub mod engine;

/// Host event types.
pub mod event;

/// Color and number sanitizers.
pub mod sanitize;

/// Overlay stylesheet.
pub mod styles;

/// Selector, XPath and snapshot synthesis.
pub mod synth;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{
    CrosshairStyles, ElementCallback, HighlightStyles, InspectorBehavior, InspectorConfig,
    InspectorStyles, LabelPosition, LabelStyles, LabelTemplate, LifecycleCallback,
    OverlayStyles, PartialBehavior, PartialCrosshair, PartialHighlight, PartialInspectorConfig,
    PartialLabel, PartialOverlay, PartialStyles,
};
pub use engine::{DeactivateHandle, Inspector};
pub use event::{Key, KeyEvent, PointerEvent};
pub use sanitize::{NumberValue, sanitize_color, sanitize_number};
pub use synth::{
    Attributes, InspectedElement, create_inspected_element, generate_selector, generate_xpath,
    get_element_attributes, matches_any_selector,
};
