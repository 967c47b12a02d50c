//! The document: a `<body>` root plus element lookup.

use crate::element::Element;
use crate::selector::Selector;

/// A page document.
///
/// `Document` is a handle like [`Element`]: clones share the same tree.
#[derive(Debug, Clone)]
pub struct Document {
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document with a `<body>` root content area.
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    /// Creates a detached element owned by no one until appended.
    pub fn create_element(&self, tag: &str) -> Element {
        Element::new(tag)
    }

    /// Returns the root content area.
    pub fn body(&self) -> Element {
        self.body.clone()
    }

    /// Returns the element with the given `id`, if it is in the document.
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.body.find_inclusive(&Selector::Id(id.to_string()))
    }

    /// Returns the first element matching `selector`, including `<body>`.
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        self.body.find_inclusive(&Selector::parse(selector)?)
    }

    /// Returns `true` if `element` is attached to this document.
    pub fn contains(&self, element: &Element) -> bool {
        self.body.is_inclusive_ancestor_of(element)
    }

    /// Serializes the document body to HTML.
    pub fn to_html(&self) -> String {
        self.body.outer_html()
    }
}
