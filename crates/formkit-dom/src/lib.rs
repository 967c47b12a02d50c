//! # formkit-dom
//!
//! A small in-memory Document Object Model. Forms are composed out of
//! [`Element`] handles, mounted into a [`Document`], and driven through
//! [`Event`] dispatch, the same way page scripts drive a browser DOM.
//!
//! Element handles are cheap to clone and thread-safe, so a deferred task can
//! hold on to an element and mutate it later.
//!
//! ```
//! use formkit_dom::{Document, Event};
//!
//! let doc = Document::new();
//! let form = doc.create_element("form");
//! form.add_event_listener("submit", |event: &mut Event| event.prevent_default());
//! doc.body().append_child(&form).unwrap();
//!
//! let mut submit = Event::new("submit");
//! assert!(!form.dispatch_event(&mut submit));
//! assert_eq!(doc.to_html(), "<body><form></form></body>");
//! ```

// significant_drop_tightening: element guards are scoped by hand around
// listener invocation, the lint misreads the clones taken under them.
#![allow(clippy::significant_drop_tightening)]

pub mod document;
pub mod element;
pub mod event;
pub mod html;
pub mod selector;

pub use document::Document;
pub use element::{Element, ListenerId, Node};
pub use event::Event;
pub use selector::Selector;
