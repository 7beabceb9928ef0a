//! Error types for the element inspector.
//!
//! The inspection engine itself never fails: duplicate activation is a no-op
//! and malformed configuration falls back to defaults. Errors only surface
//! from the helpers a host calls directly.
//!
//! # Usage
//!
//! ```ignore
//! use devlens_inspector::{MemoryDocument, Result};
//!
//! fn example() -> Result<()> {
//!     let doc = MemoryDocument::new("https://example.com/")?;
//!     let card = doc.query_selector("main > .card")?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Selector | [`Error::InvalidSelector`] |
//! | Document | [`Error::NodeNotFound`] |
//! | External | [`Error::InvalidUrl`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::NodeId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Selector Errors
    // ========================================================================
    /// CSS selector could not be parsed.
    ///
    /// Filtering treats these as non-matching; only direct queries report them.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector text as supplied.
        selector: String,
        /// What the parser rejected.
        message: String,
    },

    // ========================================================================
    // Document Errors
    // ========================================================================
    /// Node handle does not refer to a node in the document.
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// The unknown node handle.
        node_id: NodeId,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// Document URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an invalid selector error.
    #[inline]
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Creates a node not found error.
    #[inline]
    pub fn node_not_found(node_id: NodeId) -> Self {
        Self::NodeNotFound { node_id }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a selector parse error.
    #[inline]
    #[must_use]
    pub fn is_selector_error(&self) -> bool {
        matches!(self, Self::InvalidSelector { .. })
    }

    /// Returns `true` if this error refers to a missing node.
    #[inline]
    #[must_use]
    pub fn is_node_error(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_selector("div[", "unterminated attribute selector");
        assert_eq!(
            err.to_string(),
            "Invalid selector 'div[': unterminated attribute selector"
        );
    }

    #[test]
    fn test_node_not_found_display() {
        let err = Error::node_not_found(NodeId::new(42));
        assert_eq!(err.to_string(), "Node not found: 42");
    }

    #[test]
    fn test_predicates() {
        let selector_err = Error::invalid_selector("::", "empty");
        let node_err = Error::node_not_found(NodeId::new(1));

        assert!(selector_err.is_selector_error());
        assert!(!selector_err.is_node_error());
        assert!(node_err.is_node_error());
        assert!(!node_err.is_selector_error());
    }

    #[test]
    fn test_from_url_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
