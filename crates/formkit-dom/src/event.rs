//! DOM events.

use std::fmt;

use crate::element::Element;

/// An event dispatched to an [`Element`].
///
/// Events do not bubble: only listeners registered on the dispatch target
/// run. Listeners receive the event mutably so they can cancel its default
/// action.
pub struct Event {
    event_type: String,
    default_prevented: bool,
    target: Option<Element>,
}

impl Event {
    /// Creates an event of the given type (e.g. `"submit"`).
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            default_prevented: false,
            target: None,
        }
    }

    /// Returns the event type.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Cancels the default action associated with the event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` once a listener called [`prevent_default`](Self::prevent_default).
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Returns the element the event was dispatched to, once dispatched.
    pub const fn target(&self) -> Option<&Element> {
        self.target.as_ref()
    }

    pub(crate) fn set_target(&mut self, target: Element) {
        self.target = Some(target);
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("default_prevented", &self.default_prevented)
            .field("target", &self.target.as_ref().map(Element::tag_name))
            .finish()
    }
}
