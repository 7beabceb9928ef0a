//! Pointer and keyboard events delivered by the host.
//!
//! The host forwards capture-phase events into the inspector and then
//! honours the flags the inspector set on them.
//!
//! # Example
//!
//! ```ignore
//! use devlens_inspector::{Key, KeyEvent, PointerEvent};
//!
//! let mut click = PointerEvent::new(120.0, 48.0);
//! inspector.handle_click(&mut click);
//! if click.is_propagation_stopped() {
//!     // do not dispatch to page listeners
//! }
//!
//! inspector.handle_key_down(&mut KeyEvent::from(Key::Escape));
//! ```

// ============================================================================
// Key
// ============================================================================

/// Common non-printable keys, by their DOM `key` value.
///
/// Printable keys are plain strings in [`KeyEvent::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key
    Escape,
    /// Enter/Return key
    Enter,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Space bar
    Space,
}

impl Key {
    /// Returns the DOM `key` value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Key::Escape => "Escape",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Space => " ",
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.as_str().to_string()
    }
}

// ============================================================================
// Dispatch Flags
// ============================================================================

/// Propagation / default-action state shared by all event types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DispatchFlags {
    propagation_stopped: bool,
    default_prevented: bool,
}

// ============================================================================
// PointerEvent
// ============================================================================

/// A pointer move or click at viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Viewport x coordinate.
    pub client_x: f64,
    /// Viewport y coordinate.
    pub client_y: f64,
    flags: DispatchFlags,
}

impl PointerEvent {
    /// Creates an event at the given viewport point.
    #[inline]
    #[must_use]
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            flags: DispatchFlags::default(),
        }
    }

    /// Stops the event reaching page listeners.
    #[inline]
    pub fn stop_propagation(&mut self) {
        self.flags.propagation_stopped = true;
    }

    /// Suppresses the event's default action.
    #[inline]
    pub fn prevent_default(&mut self) {
        self.flags.default_prevented = true;
    }

    /// Returns `true` once propagation was stopped.
    #[inline]
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.flags.propagation_stopped
    }

    /// Returns `true` once the default action was suppressed.
    #[inline]
    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.flags.default_prevented
    }
}

// ============================================================================
// KeyEvent
// ============================================================================

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// DOM `key` value (`"Escape"`, `"a"`).
    pub key: String,
    flags: DispatchFlags,
}

impl KeyEvent {
    /// Creates a key event for a DOM `key` value.
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            flags: DispatchFlags::default(),
        }
    }

    /// Stops the event reaching page listeners.
    #[inline]
    pub fn stop_propagation(&mut self) {
        self.flags.propagation_stopped = true;
    }

    /// Suppresses the event's default action.
    #[inline]
    pub fn prevent_default(&mut self) {
        self.flags.default_prevented = true;
    }

    /// Returns `true` once propagation was stopped.
    #[inline]
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.flags.propagation_stopped
    }

    /// Returns `true` once the default action was suppressed.
    #[inline]
    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.flags.default_prevented
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

// ============================================================================
// Tests
// ============================================================================
