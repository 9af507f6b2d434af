#![forbid(unsafe_code)]

//! Element tree with IDs, classes, attributes, and ordered traversal.
//!
//! An [`Element`] is a node the host framework created and owns. Binding
//! adapters receive `&Element` references and run pure queries against them:
//! identity ([`id`](Element::id)), marker classes ([`has_class`](Element::has_class)),
//! string attributes ([`attr`](Element::attr)), and descendant iteration
//! ([`descendants`](Element::descendants)).
//!
//! # Invariants
//!
//! 1. [`descendants`](Element::descendants) yields document order (pre-order,
//!    depth-first), excluding the element itself.
//! 2. Class and attribute lookups are exact string matches.
//! 3. Nothing in this crate mutates an element after the host builds it.

use ahash::AHashMap;

/// A node in the host framework's element tree.
///
/// Built with the consuming builder methods, mirroring how the host stamps
/// out markup:
///
/// ```
/// use weft_dom::Element;
///
/// let el = Element::new("div")
///     .with_id("gauge-1")
///     .with_class("weft-gauge-container")
///     .with_attr("data-initial-value", "3.5");
/// assert_eq!(el.id(), Some("gauge-1"));
/// assert!(el.has_class("weft-gauge-container"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: AHashMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the stable ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a class. Duplicate classes are kept as-is; matching is by
    /// exact string, so duplicates are harmless.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set a string attribute, replacing any previous value for the name.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Stable ID, if the host assigned one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the element carries the given class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Direct children, in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// All descendants in document order (pre-order DFS), excluding `self`.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Document-order iterator over an element's descendants.
///
/// Returned by [`Element::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    // Reversed so pop() yields the leftmost pending node.
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        Element::new("body")
            .with_child(
                Element::new("div").with_id("a").with_child(
                    Element::new("span")
                        .with_id("a1")
                        .with_class("weft-dial-container"),
                ),
            )
            .with_child(
                Element::new("div")
                    .with_id("b")
                    .with_class("weft-dial-container"),
            )
    }

    #[test]
    fn builder_sets_fields() {
        let el = Element::new("div")
            .with_id("x")
            .with_class("c1")
            .with_class("c2")
            .with_attr("data-initial-value", "7");
        assert_eq!(el.tag(), "div");
        assert_eq!(el.id(), Some("x"));
        assert!(el.has_class("c1"));
        assert!(el.has_class("c2"));
        assert!(!el.has_class("c3"));
        assert_eq!(el.attr("data-initial-value"), Some("7"));
        assert_eq!(el.attr("missing"), None);
    }

    #[test]
    fn attr_overwrite_replaces() {
        let el = Element::new("div")
            .with_attr("k", "old")
            .with_attr("k", "new");
        assert_eq!(el.attr("k"), Some("new"));
    }

    #[test]
    fn id_absent_by_default() {
        assert_eq!(Element::new("div").id(), None);
    }

    #[test]
    fn descendants_document_order() {
        let root = tree();
        let ids: Vec<_> = root.descendants().filter_map(Element::id).collect();
        assert_eq!(ids, ["a", "a1", "b"]);
    }

    #[test]
    fn descendants_excludes_self() {
        let root = tree();
        assert!(root.descendants().all(|el| el.id() != root.id()));
    }

    #[test]
    fn descendants_of_leaf_is_empty() {
        assert_eq!(Element::new("span").descendants().count(), 0);
    }

    #[test]
    fn class_match_is_exact() {
        let el = Element::new("div").with_class("weft-dial-container");
        assert!(!el.has_class("weft-dial"));
        assert!(!el.has_class("dial-container"));
    }
}
