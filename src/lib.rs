//! DevLens Inspector - Framework-agnostic element inspection engine.
//!
//! This library turns a live document into an inspectable surface: a
//! crosshair follows the pointer, the element under it is outlined and
//! labelled, and a click hands the host a snapshot with a synthesized CSS
//! selector and XPath.
//!
//! # Architecture
//!
//! The engine never owns a real DOM:
//!
//! - **Host**: implements [`Document`] over its element tree and forwards
//!   capture-phase pointer and key events
//! - **Engine**: [`Inspector`] decides what to highlight, draws its overlay
//!   through the same trait, and reports elements through callbacks
//!
//! Key design principles:
//!
//! - Overlay nodes exist only while active and are tracked by identity
//! - The inspector never inspects its own nodes
//! - Configuration is sanitized on merge and never fails
//! - Element handles are lookup keys, never retained references
//!
//! # Quick Start
//!
//! ```no_run
//! use devlens_inspector::{
//!     Document, Inspector, MemoryDocument, PartialInspectorConfig, PointerEvent, Rect, Result,
//! };
//!
//! fn main() -> Result<()> {
//!     let mut doc = MemoryDocument::new("https://example.com/")?;
//!     let body = doc.body().expect("body");
//!     let button = doc.append_new(body, "button")?;
//!     doc.set_rect(button, Rect::new(10.0, 10.0, 80.0, 24.0))?;
//!
//!     let config = PartialInspectorConfig::new()
//!         .on_element_click(|element| println!("{}", element.selector));
//!
//!     let mut inspector = Inspector::new(doc, &config);
//!     inspector.activate();
//!     inspector.handle_click(&mut PointerEvent::new(20.0, 20.0));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dom`] | Host document traits and [`MemoryDocument`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`inspector`] | Engine, configuration, synthesis helpers |
//!
//! # Helpers
//!
//! The synthesis and sanitizing functions are public for hosts that build
//! their own tooling: [`generate_selector`], [`generate_xpath`],
//! [`get_element_attributes`], [`create_inspected_element`],
//! [`matches_any_selector`], [`sanitize_color`], [`sanitize_number`].

// ============================================================================
// Modules
// ============================================================================

/// Host document interface.
///
/// - [`Document`] - Live document the inspector observes and decorates
/// - [`MemoryDocument`] - In-memory implementation
/// - [`SelectorList`] - CSS selector matching
pub mod dom;

/// Error types and result aliases.
///
/// Fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for nodes and inspector instances.
pub mod identifiers;

/// Inspection engine and its building blocks.
///
/// Start with [`Inspector::new`].
pub mod inspector;

// ============================================================================
// Re-exports
// ============================================================================

// Document types
pub use dom::{ComputedStyle, Document, ElementTree, EventKind, MemoryDocument, Rect, SelectorList};

// Inspector types
pub use inspector::{
    Attributes, CrosshairStyles, DeactivateHandle, HighlightStyles, InspectedElement, Inspector,
    InspectorBehavior, InspectorConfig, InspectorStyles, Key, KeyEvent, LabelPosition,
    LabelStyles, NumberValue, OverlayStyles, PartialBehavior, PartialCrosshair, PartialHighlight,
    PartialInspectorConfig, PartialLabel, PartialOverlay, PartialStyles, PointerEvent,
};

// Helper functions
pub use inspector::{
    create_inspected_element, generate_selector, generate_xpath, get_element_attributes,
    matches_any_selector, sanitize_color, sanitize_number,
};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{InspectorId, NodeId};
