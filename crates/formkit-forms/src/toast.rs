//! Transient submission feedback.
//!
//! A [`Toast`] flashes text in a notification element: [`Toast::show`] adds
//! the show class and replaces the text, then schedules a tokio task that
//! removes the class again after the hide delay. Each toast tracks one
//! pending hide; showing again aborts it, so only the latest show's hide
//! fires.

use std::sync::Mutex;
use std::time::Duration;

use formkit_core::{FormkitError, FormkitResult, Settings};
use formkit_dom::{Document, Element};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
enum ToastTarget {
    Element(Element),
    Lookup { document: Document, id: String },
}

impl ToastTarget {
    fn resolve(&self) -> Option<Element> {
        match self {
            Self::Element(element) => Some(element.clone()),
            Self::Lookup { document, id } => document.get_element_by_id(id),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Element(element) => format!("<{}>", element.tag_name()),
            Self::Lookup { id, .. } => format!("#{id}"),
        }
    }
}

/// A notification element used to flash submission results.
#[derive(Debug)]
pub struct Toast {
    target: ToastTarget,
    show_class: String,
    hide_after: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Toast {
    fn with_target(target: ToastTarget) -> Self {
        let defaults = Settings::default();
        Self {
            target,
            hide_after: defaults.toast_hide_after(),
            show_class: defaults.toast_show_class,
            pending: Mutex::new(None),
        }
    }

    /// A toast that looks its element up by `id` in `document` each time it
    /// shows or hides.
    pub fn by_id(document: &Document, id: impl Into<String>) -> Self {
        Self::with_target(ToastTarget::Lookup {
            document: document.clone(),
            id: id.into(),
        })
    }

    /// A toast bound to an explicit element.
    pub fn element(element: Element) -> Self {
        Self::with_target(ToastTarget::Element(element))
    }

    /// A toast configured from settings: id, show class, and hide delay.
    pub fn from_settings(document: &Document, settings: &Settings) -> Self {
        Self::by_id(document, settings.toast_id.as_str())
            .with_show_class(settings.toast_show_class.as_str())
            .with_hide_after(settings.toast_hide_after())
    }

    /// Sets the class that makes the element visible.
    #[must_use]
    pub fn with_show_class(mut self, class: impl Into<String>) -> Self {
        self.show_class = class.into();
        self
    }

    /// Sets the delay before the element is hidden again.
    #[must_use]
    pub fn with_hide_after(mut self, delay: Duration) -> Self {
        self.hide_after = delay;
        self
    }

    /// Returns the show class.
    pub fn show_class(&self) -> &str {
        &self.show_class
    }

    /// Returns the hide delay.
    pub const fn hide_after(&self) -> Duration {
        self.hide_after
    }

    /// Resolves the notification element.
    ///
    /// # Errors
    ///
    /// Returns [`FormkitError::ElementNotFound`] if the element is not in
    /// the document.
    pub fn resolve(&self) -> FormkitResult<Element> {
        self.target
            .resolve()
            .ok_or_else(|| FormkitError::ElementNotFound(self.target.describe()))
    }

    /// Shows `text` and schedules the hide.
    ///
    /// Must be called from within a tokio runtime. Nothing is modified when
    /// the runtime or the element is missing.
    pub fn show(&self, text: &str) -> FormkitResult<()> {
        let runtime = Handle::try_current().map_err(|e| {
            FormkitError::Scheduler(format!("cannot schedule toast hide: {e}"))
        })?;
        let element = self.resolve()?;

        element.add_class(&self.show_class);
        element.set_text_content(text);

        let target = self.target.clone();
        let class = self.show_class.clone();
        let delay = self.hide_after;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(element) = target.resolve() {
                element.remove_class(&class);
                tracing::debug!(target_element = %target.describe(), "toast hidden");
            } else {
                tracing::warn!(
                    target_element = %target.describe(),
                    "toast element disappeared before it could be hidden"
                );
            }
        });

        let previous = self
            .pending
            .lock()
            .expect("toast lock poisoned")
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
        Ok(())
    }

    /// Returns `true` while a hide is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .expect("toast lock poisoned")
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        if let Some(task) = self
            .pending
            .get_mut()
            .map_or_else(|poisoned| poisoned.into_inner().take(), Option::take)
        {
            task.abort();
        }
    }
}
