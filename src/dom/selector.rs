//! CSS selector parsing and matching.
//!
//! Parsing and matching are done by the `selectors` crate, the engine
//! behind `scraper`. This module supplies the glue: a selector
//! implementation with plain string atoms, and an element view over any
//! [`ElementTree`].
//!
//! | Syntax | Example |
//! |--------|---------|
//! | Type / universal | `div`, `*` |
//! | Id / class | `#main`, `.card.active` |
//! | Attribute | `[data-test]`, `[type="submit"]`, `[class~=x]`, `[lang|=en]`, `[href^=https]` |
//! | Structural | `:nth-child(2n+1)`, `:nth-last-of-type(1)`, `:first-child`, `:only-child`, `:empty`, `:root` |
//! | Negation | `:not(.hidden)` |
//! | Combinators | `a b`, `a > b`, `a + b`, `a ~ b` |
//! | Lists | `header, footer` |
//!
//! State pseudo-classes such as `:hover` and all pseudo-elements are parse
//! errors: the tree has no interaction state to match them against.
//!
//! # Example
//!
//! ```ignore
//! use devlens_inspector::SelectorList;
//!
//! let list = SelectorList::parse("main > .card:nth-child(2)")?;
//! assert!(list.matches(&doc, card));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};

use cssparser::{ParseError, ParserInput, ToCss};
use precomputed_hash::PrecomputedHash;
use rustc_hash::FxHasher;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::context::{MatchingContext, MatchingMode, QuirksMode};
use selectors::matching::{self, ElementSelectorFlags};
use selectors::parser::{self, SelectorParseErrorKind};
use selectors::{Element, OpaqueElement};

use crate::dom::ElementTree;
use crate::error::{Error, Result};
use crate::identifiers::NodeId;

// ============================================================================
// Constants
// ============================================================================

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

// ============================================================================
// SelectorList
// ============================================================================

/// A parsed, comma-separated selector list.
pub struct SelectorList {
    source: String,
    selectors: parser::SelectorList<InspectorSelectors>,
}

impl SelectorList {
    /// Parses a selector list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] for empty input, unsupported
    /// pseudo-classes, pseudo-elements, or malformed syntax.
    pub fn parse(selector: &str) -> Result<Self> {
        let mut input = ParserInput::new(selector);
        let mut css = cssparser::Parser::new(&mut input);
        match parser::SelectorList::parse(&SelectorParser, &mut css) {
            Ok(selectors) => Ok(Self {
                source: selector.to_string(),
                selectors,
            }),
            Err(err) => Err(Error::invalid_selector(selector, describe(&err))),
        }
    }

    /// Returns `true` if any selector in the list matches the element.
    pub fn matches<T: ElementTree + ?Sized>(&self, tree: &T, node: NodeId) -> bool {
        let mut context =
            MatchingContext::new(MatchingMode::Normal, None, None, QuirksMode::NoQuirks);
        matching::matches_selector_list(&self.selectors, &TreeElement { tree, node }, &mut context)
    }

    /// The selector text as supplied.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectorList").field(&self.source).finish()
    }
}

fn describe(err: &ParseError<'_, SelectorParseErrorKind<'_>>) -> String {
    format!("{:?} at column {}", err.kind, err.location.column)
}

// ============================================================================
// Selector Implementation
// ============================================================================

/// String atom used for every name and value in a parsed selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
struct CssString(String);

impl From<&str> for CssString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for CssString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CssString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ToCss for CssString {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        cssparser::serialize_identifier(&self.0, dest)
    }
}

impl PrecomputedHash for CssString {
    fn precomputed_hash(&self) -> u32 {
        let mut hasher = FxHasher::default();
        self.0.hash(&mut hasher);
        hasher.finish() as u32
    }
}

/// No non-tree-structural pseudo-class is supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PseudoClass {}

impl ToCss for PseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl parser::NonTSPseudoClass for PseudoClass {
    type Impl = InspectorSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }

    fn has_zero_specificity(&self) -> bool {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PseudoElement {}

impl ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl parser::PseudoElement for PseudoElement {
    type Impl = InspectorSelectors;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InspectorSelectors;

impl parser::SelectorImpl for InspectorSelectors {
    type ExtraMatchingData = ();
    type AttrValue = CssString;
    type Identifier = CssString;
    type ClassName = CssString;
    type PartName = CssString;
    type LocalName = CssString;
    type NamespaceUrl = CssString;
    type NamespacePrefix = CssString;
    type BorrowedNamespaceUrl = CssString;
    type BorrowedLocalName = CssString;
    type NonTSPseudoClass = PseudoClass;
    type PseudoElement = PseudoElement;
}

/// Parser with the crate defaults: unknown pseudo-classes, pseudo-elements
/// and namespace prefixes are errors.
struct SelectorParser;

impl<'i> parser::Parser<'i> for SelectorParser {
    type Impl = InspectorSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

// ============================================================================
// TreeElement
// ============================================================================

/// One element of an [`ElementTree`], as the matcher sees it.
struct TreeElement<'a, T: ?Sized> {
    tree: &'a T,
    node: NodeId,
}

impl<T: ?Sized> Clone for TreeElement<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for TreeElement<'_, T> {}

impl<T: ?Sized> fmt::Debug for TreeElement<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeElement({})", self.node)
    }
}

impl<'a, T: ElementTree + ?Sized> TreeElement<'a, T> {
    fn at(&self, node: NodeId) -> Self {
        Self {
            tree: self.tree,
            node,
        }
    }

    /// Parent's children and this element's index among them.
    fn siblings(&self) -> Option<(Vec<NodeId>, usize)> {
        let parent = self.tree.parent(self.node)?;
        let siblings = self.tree.children(parent);
        let index = siblings.iter().position(|&sibling| sibling == self.node)?;
        Some((siblings, index))
    }
}

impl<T: ElementTree + ?Sized> Element for TreeElement<'_, T> {
    type Impl = InspectorSelectors;

    // Identity is only consulted for `:scope` and nth-index caches, and
    // matching here sets neither.
    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(&self.node)
    }

    fn parent_element(&self) -> Option<Self> {
        self.tree.parent(self.node).map(|parent| self.at(parent))
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let (siblings, index) = self.siblings()?;
        let previous = index.checked_sub(1)?;
        Some(self.at(siblings[previous]))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let (siblings, index) = self.siblings()?;
        siblings.get(index + 1).map(|&next| self.at(next))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, local_name: &CssString) -> bool {
        self.tree
            .tag_name(self.node)
            .eq_ignore_ascii_case(&local_name.0)
    }

    fn has_namespace(&self, ns: &CssString) -> bool {
        ns.0.is_empty() || ns.0 == HTML_NAMESPACE
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.tree
            .tag_name(self.node)
            .eq_ignore_ascii_case(&other.tree.tag_name(other.node))
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&CssString>,
        local_name: &CssString,
        operation: &AttrSelectorOperation<&CssString>,
    ) -> bool {
        if let NamespaceConstraint::Specific(url) = ns
            && !url.0.is_empty()
        {
            return false;
        }
        self.tree
            .attribute(self.node, &local_name.0)
            .is_some_and(|value| operation.eval_str(&value))
    }

    fn match_non_ts_pseudo_class<F>(
        &self,
        pc: &PseudoClass,
        _context: &mut MatchingContext<'_, InspectorSelectors>,
        _flags_setter: &mut F,
    ) -> bool
    where
        F: FnMut(&Self, ElementSelectorFlags),
    {
        match *pc {}
    }

    fn match_pseudo_element(
        &self,
        pe: &PseudoElement,
        _context: &mut MatchingContext<'_, InspectorSelectors>,
    ) -> bool {
        match *pe {}
    }

    fn is_link(&self) -> bool {
        false
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(&self, id: &CssString, case_sensitivity: CaseSensitivity) -> bool {
        self.tree
            .element_id(self.node)
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &CssString, case_sensitivity: CaseSensitivity) -> bool {
        !name.0.is_empty()
            && self
                .tree
                .class_list(self.node)
                .iter()
                .any(|class| case_sensitivity.eq(class.as_bytes(), name.0.as_bytes()))
    }

    fn exported_part(&self, _name: &CssString) -> Option<CssString> {
        None
    }

    fn imported_part(&self, _name: &CssString) -> Option<CssString> {
        None
    }

    fn is_part(&self, _name: &CssString) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.tree.children(self.node).is_empty() && !self.tree.has_text(self.node)
    }

    fn is_root(&self) -> bool {
        self.tree.parent(self.node).is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, MemoryDocument};

    fn fixture() -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new("https://example.com/").unwrap();
        let body = doc.body().unwrap();
        let list = doc.append_new(body, "ul").unwrap();
        doc.set_attribute(list, "class", "menu main");
        let mut items = Vec::new();
        for i in 0..4 {
            let item = doc.append_new(list, "li").unwrap();
            doc.set_attribute(item, "data-index", &i.to_string());
            items.push(item);
        }
        doc.set_attribute(items[1], "id", "second");
        doc.set_attribute(items[2], "lang", "en-US");
        (doc, items)
    }

    fn matches(doc: &MemoryDocument, node: NodeId, selector: &str) -> bool {
        SelectorList::parse(selector).unwrap().matches(doc, node)
    }

    #[test]
    fn test_type_and_universal() {
        let (doc, items) = fixture();
        assert!(matches(&doc, items[0], "li"));
        assert!(matches(&doc, items[0], "LI"));
        assert!(matches(&doc, items[0], "*"));
        assert!(!matches(&doc, items[0], "div"));
    }

    #[test]
    fn test_id_and_class() {
        let (doc, items) = fixture();
        let list = doc.parent(items[0]).unwrap();
        assert!(matches(&doc, items[1], "#second"));
        assert!(matches(&doc, list, "ul.menu.main"));
        assert!(!matches(&doc, list, ".menu.other"));
    }

    #[test]
    fn test_attribute_operators() {
        let (doc, items) = fixture();
        assert!(matches(&doc, items[0], "[data-index]"));
        assert!(matches(&doc, items[0], "[data-index=\"0\"]"));
        assert!(matches(&doc, items[3], "[data-index='3']"));
        assert!(matches(&doc, items[2], "[lang|=en]"));
        assert!(matches(&doc, items[2], "[lang^=en]"));
        assert!(matches(&doc, items[2], "[lang$=US]"));
        assert!(matches(&doc, items[2], "[lang*=n-U]"));
        assert!(matches(&doc, items[2], "[LANG=en-US]"));
        let list = doc.parent(items[0]).unwrap();
        assert!(matches(&doc, list, "[class~=main]"));
        assert!(!matches(&doc, list, "[class~=mai]"));
    }

    #[test]
    fn test_structural_pseudo_classes() {
        let (doc, items) = fixture();
        assert!(matches(&doc, items[0], "li:first-child"));
        assert!(matches(&doc, items[3], "li:last-child"));
        assert!(matches(&doc, items[1], ":nth-child(2)"));
        assert!(matches(&doc, items[0], ":nth-child(odd)"));
        assert!(matches(&doc, items[1], ":nth-child(even)"));
        assert!(matches(&doc, items[2], ":nth-child(2n+1)"));
        assert!(matches(&doc, items[1], ":nth-child(-n+2)"));
        assert!(!matches(&doc, items[2], ":nth-child(-n+2)"));
        assert!(matches(&doc, items[2], ":nth-last-child(2)"));
        assert!(matches(&doc, items[3], "li:nth-of-type(4)"));
        assert!(!matches(&doc, items[0], ":only-child"));
        assert!(matches(&doc, items[0], ":empty"));
        assert!(matches(&doc, doc.document_element().unwrap(), ":root"));
        assert!(!matches(&doc, items[0], ":root"));
    }

    #[test]
    fn test_extreme_nth_arguments_never_match() {
        let (doc, items) = fixture();
        for selector in [
            ":nth-child(-n-2147483647)",
            ":nth-last-child(-n-2147483647)",
            ":nth-child(2147483647n-2147483647)",
            ":nth-child(-n-9223372036854775807)",
        ] {
            for &item in &items {
                let matched =
                    SelectorList::parse(selector).is_ok_and(|list| list.matches(&doc, item));
                assert!(!matched, "{selector} matched {item}");
            }
        }
    }

    #[test]
    fn test_empty_counts_text_and_children() {
        let (mut doc, items) = fixture();
        doc.set_text_content(items[0], "label");
        assert!(!matches(&doc, items[0], ":empty"));
        assert!(!matches(&doc, doc.parent(items[0]).unwrap(), ":empty"));
    }

    #[test]
    fn test_combinators() {
        let (doc, items) = fixture();
        assert!(matches(&doc, items[0], "body > ul > li"));
        assert!(matches(&doc, items[0], "html li"));
        assert!(!matches(&doc, items[0], "body > li"));
        assert!(matches(&doc, items[2], "#second + li"));
        assert!(!matches(&doc, items[3], "#second + li"));
        assert!(matches(&doc, items[3], "#second ~ li"));
        assert!(!matches(&doc, items[0], "#second ~ li"));
    }

    #[test]
    fn test_negation_and_lists() {
        let (doc, items) = fixture();
        assert!(matches(&doc, items[0], "li:not(#second)"));
        assert!(!matches(&doc, items[1], "li:not(#second):not([lang])"));
        assert!(!matches(&doc, items[2], "li:not(#second):not([lang])"));
        assert!(matches(&doc, items[1], "div, #second"));
    }

    #[test]
    fn test_escaped_identifier() {
        let mut doc = MemoryDocument::new("https://example.com/").unwrap();
        let body = doc.body().unwrap();
        let node = doc.append_new(body, "div").unwrap();
        doc.set_attribute(node, "class", "md:flex");
        assert!(matches(&doc, node, ".md\\:flex"));
    }

    #[test]
    fn test_invalid_selectors() {
        for selector in ["", "   ", "div[", "div >", ">> a", "a::before", ":hover", ":nth-child(x)", "a,", "(div)"] {
            let err = SelectorList::parse(selector).unwrap_err();
            assert!(err.is_selector_error(), "expected error for {selector:?}");
        }
    }

    #[test]
    fn test_keeps_source_text() {
        let list = SelectorList::parse("main > .card").unwrap();
        assert_eq!(list.as_str(), "main > .card");
        assert_eq!(format!("{list:?}"), "SelectorList(\"main > .card\")");
    }
}
