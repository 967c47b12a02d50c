//! Elements and nodes.
//!
//! An [`Element`] is a shared handle to one node of the tree: cloning the
//! handle never copies the node. Parents own their children; children keep a
//! weak back-reference to their parent, so a detached subtree is freed once
//! the last handle to it goes away.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use formkit_core::{FormkitError, FormkitResult};

use crate::event::Event;
use crate::html::{escape_html, is_void_element, render_attrs};
use crate::selector::Selector;

/// The callback type for event listeners.
pub type Listener = Arc<dyn Fn(&mut Event) + Send + Sync>;

/// Identifies a registered listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// A child of an element: either another element or a run of text.
#[derive(Debug, Clone)]
pub enum Node {
    /// An element node.
    Element(Element),
    /// A text node.
    Text(String),
}

struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    value: String,
    children: Vec<Node>,
    parent: Option<Weak<RwLock<ElementData>>>,
    listeners: Vec<(ListenerId, String, Listener)>,
}

/// A handle to an element in the in-memory DOM.
#[derive(Clone)]
pub struct Element {
    inner: Arc<RwLock<ElementData>>,
}

impl Element {
    /// Creates a new, detached element. The tag name is lowercased.
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ElementData {
                tag: tag.to_ascii_lowercase(),
                attributes: Vec::new(),
                value: String::new(),
                children: Vec::new(),
                parent: None,
                listeners: Vec::new(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ElementData> {
        self.inner.read().expect("element lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, ElementData> {
        self.inner.write().expect("element lock poisoned")
    }

    /// Returns `true` if both handles refer to the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the (lowercase) tag name.
    pub fn tag_name(&self) -> String {
        self.read().tag.clone()
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Sets an attribute, replacing any previous value in place.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut data = self.write();
        if let Some(entry) = data.attributes.iter_mut().find(|(k, _)| k == name) {
            entry.1 = value;
        } else {
            data.attributes.push((name.to_string(), value));
        }
    }

    /// Returns the value of an attribute, if set.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.read()
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    /// Removes an attribute. Returns `true` if it was present.
    pub fn remove_attribute(&self, name: &str) -> bool {
        let mut data = self.write();
        let len_before = data.attributes.len();
        data.attributes.retain(|(k, _)| k != name);
        data.attributes.len() < len_before
    }

    /// Returns the `id` attribute, if set.
    pub fn id(&self) -> Option<String> {
        self.attribute("id")
    }

    // ── Class list ───────────────────────────────────────────────────

    /// Returns the tokens of the `class` attribute.
    pub fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    /// Adds a class to the class list. Adding a present class is a no-op.
    pub fn add_class(&self, class: &str) {
        let mut classes = self.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self.set_attribute("class", classes.join(" "));
    }

    /// Removes a class from the class list. Returns `true` if it was present.
    pub fn remove_class(&self, class: &str) -> bool {
        let mut classes = self.classes();
        let len_before = classes.len();
        classes.retain(|c| c != class);
        let removed = classes.len() < len_before;
        if self.attribute("class").is_some() {
            self.set_attribute("class", classes.join(" "));
        }
        removed
    }

    /// Toggles a class. Returns `true` if the class is present afterwards.
    pub fn toggle_class(&self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.add_class(class);
            true
        }
    }

    // ── Form control value ───────────────────────────────────────────

    /// Sets the current value of a form control.
    pub fn set_value(&self, value: impl Into<String>) {
        self.write().value = value.into();
    }

    /// Returns the current value of a form control.
    pub fn value(&self) -> String {
        self.read().value.clone()
    }

    // ── Tree ─────────────────────────────────────────────────────────

    /// Returns the parent element, if attached.
    pub fn parent(&self) -> Option<Self> {
        let weak = self.read().parent.clone()?;
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Returns `true` if `self` is `other` or one of its ancestors.
    pub fn is_inclusive_ancestor_of(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Appends `child` as the last child.
    ///
    /// A child that is already attached somewhere is moved, not copied.
    ///
    /// # Errors
    ///
    /// Returns [`FormkitError::HierarchyRequest`] if `child` is this element
    /// or one of its ancestors.
    pub fn append_child(&self, child: &Self) -> FormkitResult<()> {
        if child.is_inclusive_ancestor_of(self) {
            return Err(FormkitError::HierarchyRequest(format!(
                "cannot append <{}> into itself or its descendant <{}>",
                child.tag_name(),
                self.tag_name()
            )));
        }
        child.remove();
        child.write().parent = Some(Arc::downgrade(&self.inner));
        self.write().children.push(Node::Element(child.clone()));
        Ok(())
    }

    /// Appends a text node as the last child.
    pub fn append_text(&self, text: impl Into<String>) {
        self.write().children.push(Node::Text(text.into()));
    }

    /// Detaches this element from its parent. Detached elements are unaffected.
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent
                .write()
                .children
                .retain(|node| !matches!(node, Node::Element(e) if e.ptr_eq(self)));
        }
        self.write().parent = None;
    }

    /// Returns the element children, in order.
    pub fn children(&self) -> Vec<Self> {
        self.read()
            .children
            .iter()
            .filter_map(|node| match node {
                Node::Element(e) => Some(e.clone()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// Returns all child nodes, in order.
    pub fn child_nodes(&self) -> Vec<Node> {
        self.read().children.clone()
    }

    /// Replaces all children with a single text node.
    ///
    /// An empty string leaves the element without children.
    pub fn set_text_content(&self, text: impl Into<String>) {
        let text = text.into();
        let old = {
            let mut data = self.write();
            let old = std::mem::take(&mut data.children);
            if !text.is_empty() {
                data.children.push(Node::Text(text));
            }
            old
        };
        for node in old {
            if let Node::Element(e) = node {
                e.write().parent = None;
            }
        }
    }

    /// Returns the concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in self.child_nodes() {
            match node {
                Node::Text(t) => out.push_str(&t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Returns `true` if this element matches `selector`.
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id().as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.has_class(class),
            Selector::Tag(tag) => self.read().tag == *tag,
        }
    }

    /// Depth-first search over this element and its descendants.
    pub(crate) fn find_inclusive(&self, selector: &Selector) -> Option<Self> {
        if self.matches(selector) {
            return Some(self.clone());
        }
        self.find_descendant(selector)
    }

    fn find_descendant(&self, selector: &Selector) -> Option<Self> {
        self.children()
            .into_iter()
            .find_map(|child| child.find_inclusive(selector))
    }

    /// Returns the first descendant whose `id` equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Self> {
        self.find_descendant(&Selector::Id(id.to_string()))
    }

    /// Returns the first descendant matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Option<Self> {
        self.find_descendant(&Selector::parse(selector)?)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Registers a listener for events of `event_type`.
    pub fn add_event_listener<F>(&self, event_type: &str, listener: F) -> ListenerId
    where
        F: Fn(&mut Event) + Send + Sync + 'static,
    {
        let id = ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed));
        self.write()
            .listeners
            .push((id, event_type.to_string(), Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `true` if it was registered here.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut data = self.write();
        let len_before = data.listeners.len();
        data.listeners.retain(|(lid, _, _)| *lid != id);
        data.listeners.len() < len_before
    }

    /// Returns the number of listeners registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.read()
            .listeners
            .iter()
            .filter(|(_, t, _)| t == event_type)
            .count()
    }

    /// Dispatches `event` to the listeners of this element, in registration
    /// order.
    ///
    /// Returns `false` if a listener cancelled the default action, mirroring
    /// the browser's `dispatchEvent`.
    pub fn dispatch_event(&self, event: &mut Event) -> bool {
        // Listeners may touch this element, so run them with no lock held.
        let listeners: Vec<Listener> = self
            .read()
            .listeners
            .iter()
            .filter(|(_, t, _)| t == event.event_type())
            .map(|(_, _, l)| Arc::clone(l))
            .collect();

        event.set_target(self.clone());
        tracing::trace!(
            event_type = event.event_type(),
            listeners = listeners.len(),
            "dispatching event"
        );
        for listener in listeners {
            listener(event);
        }
        !event.default_prevented()
    }

    // ── Serialization ────────────────────────────────────────────────

    /// Serializes this element and its subtree to HTML.
    ///
    /// Form control values are state, not markup, and are not serialized.
    pub fn outer_html(&self) -> String {
        let (tag, attrs, children) = {
            let data = self.read();
            (data.tag.clone(), render_attrs(&data.attributes), data.children.clone())
        };
        if is_void_element(&tag) {
            return format!("<{tag}{attrs}>");
        }
        let mut out = format!("<{tag}{attrs}>");
        for node in children {
            match node {
                Node::Text(t) => out.push_str(&escape_html(&t)),
                Node::Element(e) => out.push_str(&e.outer_html()),
            }
        }
        out.push_str(&format!("</{tag}>"));
        out
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.read();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("attributes", &data.attributes)
            .field("children", &data.children.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn test_new_element_lowercases_tag() {
        let el = Element::new("DIV");
        assert_eq!(el.tag_name(), "div");
        assert!(el.parent().is_none());
        assert!(el.children().is_empty());
    }

    #[test]
    fn test_attributes() {
        let el = Element::new("input");
        el.set_attribute("name", "email");
        el.set_attribute("type", "text");
        el.set_attribute("type", "email");
        assert_eq!(el.attribute("type").as_deref(), Some("email"));
        assert_eq!(el.outer_html(), r#"<input name="email" type="email">"#);
        assert!(el.remove_attribute("name"));
        assert!(!el.remove_attribute("name"));
        assert_eq!(el.attribute("name"), None);
    }

    #[test]
    fn test_class_list() {
        let el = Element::new("div");
        assert!(!el.has_class("show"));
        el.add_class("toast");
        el.add_class("show");
        el.add_class("show");
        assert_eq!(el.classes(), vec!["toast", "show"]);
        assert!(el.remove_class("show"));
        assert!(!el.remove_class("show"));
        assert_eq!(el.attribute("class").as_deref(), Some("toast"));
        assert!(el.toggle_class("show"));
        assert!(!el.toggle_class("show"));
    }

    #[test]
    fn test_remove_class_without_attribute_adds_nothing() {
        let el = Element::new("div");
        assert!(!el.remove_class("show"));
        assert_eq!(el.attribute("class"), None);
    }

    #[test]
    fn test_value_is_live() {
        let input = Element::new("input");
        assert_eq!(input.value(), "");
        input.set_value("a@b.com");
        assert_eq!(input.value(), "a@b.com");
        input.set_value("c@d.com");
        assert_eq!(input.value(), "c@d.com");
    }

    #[test]
    fn test_append_child_sets_parent_and_order() {
        let parent = Element::new("form");
        let a = Element::new("h1");
        let b = Element::new("button");
        parent.append_child(&a).unwrap();
        parent.append_child(&b).unwrap();
        let children = parent.children();
        assert_eq!(children.len(), 2);
        assert!(children[0].ptr_eq(&a));
        assert!(children[1].ptr_eq(&b));
        assert!(a.parent().unwrap().ptr_eq(&parent));
    }

    #[test]
    fn test_append_child_moves_attached_node() {
        let first = Element::new("div");
        let second = Element::new("div");
        let input = Element::new("input");
        first.append_child(&input).unwrap();
        second.append_child(&input).unwrap();
        assert!(first.children().is_empty());
        assert_eq!(second.children().len(), 1);
        assert!(input.parent().unwrap().ptr_eq(&second));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let outer = Element::new("div");
        let inner = Element::new("div");
        outer.append_child(&inner).unwrap();
        assert!(matches!(
            inner.append_child(&outer),
            Err(FormkitError::HierarchyRequest(_))
        ));
        assert!(matches!(
            outer.append_child(&outer),
            Err(FormkitError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn test_remove_detaches() {
        let parent = Element::new("div");
        let child = Element::new("span");
        parent.append_child(&child).unwrap();
        child.remove();
        assert!(parent.children().is_empty());
        assert!(child.parent().is_none());
        child.remove();
    }

    #[test]
    fn test_text_content() {
        let el = Element::new("label");
        el.set_text_content("email");
        assert_eq!(el.text_content(), "email");

        let wrapper = Element::new("div");
        wrapper.append_child(&el).unwrap();
        wrapper.append_text("!");
        assert_eq!(wrapper.text_content(), "email!");

        wrapper.set_text_content("replaced");
        assert_eq!(wrapper.text_content(), "replaced");
        assert!(wrapper.children().is_empty());
        assert!(el.parent().is_none());

        wrapper.set_text_content("");
        assert!(wrapper.child_nodes().is_empty());
    }

    #[test]
    fn test_find_by_id_and_query_selector() {
        let body = Element::new("body");
        let wrapper = Element::new("div");
        let toast = Element::new("div");
        toast.set_attribute("id", "toast");
        toast.add_class("toast");
        body.append_child(&wrapper).unwrap();
        wrapper.append_child(&toast).unwrap();

        assert!(body.find_by_id("toast").unwrap().ptr_eq(&toast));
        assert!(body.query_selector(".toast").unwrap().ptr_eq(&toast));
        assert!(body.query_selector("div").unwrap().ptr_eq(&wrapper));
        assert!(body.find_by_id("missing").is_none());
        assert!(body.query_selector("").is_none());
        // Searches descendants only.
        assert!(body.query_selector("body").is_none());
    }

    #[test]
    fn test_dispatch_event_runs_matching_listeners_in_order() {
        let form = Element::new("form");
        let calls = Arc::new(RwLock::new(Vec::new()));

        let c1 = Arc::clone(&calls);
        form.add_event_listener("submit", move |_| c1.write().unwrap().push(1));
        let c2 = Arc::clone(&calls);
        form.add_event_listener("submit", move |_| c2.write().unwrap().push(2));
        let c3 = Arc::clone(&calls);
        form.add_event_listener("click", move |_| c3.write().unwrap().push(3));

        let mut event = Event::new("submit");
        assert!(form.dispatch_event(&mut event));
        assert_eq!(*calls.read().unwrap(), vec![1, 2]);
        assert!(event.target().unwrap().ptr_eq(&form));
    }

    #[test]
    fn test_dispatch_event_reports_prevented_default() {
        let form = Element::new("form");
        form.add_event_listener("submit", Event::prevent_default);
        let mut event = Event::new("submit");
        assert!(!form.dispatch_event(&mut event));
        assert!(event.default_prevented());
    }

    #[test]
    fn test_listener_may_touch_its_element() {
        let form = Element::new("form");
        let handle = form.clone();
        form.add_event_listener("submit", move |_| handle.add_class("submitted"));
        form.dispatch_event(&mut Event::new("submit"));
        assert!(form.has_class("submitted"));
    }

    #[test]
    fn test_remove_event_listener() {
        let form = Element::new("form");
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let id = form.add_event_listener("submit", move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(form.listener_count("submit"), 1);
        assert!(form.remove_event_listener(id));
        assert!(!form.remove_event_listener(id));
        form.dispatch_event(&mut Event::new("submit"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_outer_html_escapes() {
        let div = Element::new("div");
        div.set_attribute("title", r#"say "hi""#);
        div.set_text_content(r#"{"email":"a<b"}"#);
        assert_eq!(
            div.outer_html(),
            r#"<div title="say &quot;hi&quot;">{&quot;email&quot;:&quot;a&lt;b&quot;}</div>"#
        );
    }
}
