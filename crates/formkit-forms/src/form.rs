//! Forms.
//!
//! A [`Form`] owns a title, an ordered list of [`Field`]s, and one `<form>`
//! container element. [`Form::render`] composes
//!
//! ```text
//! <form><h1>title</h1> field containers... <button type="submit">Submit</button></form>
//! ```
//!
//! appends it to the document's mount point and binds the submit listener.
//! Submitting prevents the default navigation, collects one
//! [`FieldEntry`] per field, and flashes the entries in the form's
//! [`Toast`].

use std::fmt;
use std::sync::{Arc, RwLock};

use formkit_core::logging::form_span;
use formkit_core::{FormkitError, FormkitResult, Settings};
use formkit_dom::{Document, Element, Event, ListenerId};

use crate::field::Field;
use crate::form_data::{FieldEntry, FormData};
use crate::toast::Toast;

/// State shared between the form and its submit listener.
struct FormState {
    title: String,
    settings: Settings,
    fields: RwLock<Vec<Field>>,
    toast: RwLock<Option<Arc<Toast>>>,
}

impl FormState {
    fn collect(&self) -> FormData {
        self.fields
            .read()
            .expect("form fields lock poisoned")
            .iter()
            .map(|field| FieldEntry::new(field.name(), field.value()))
            .collect()
    }

    fn submit(&self, event: &mut Event) -> FormkitResult<FormData> {
        event.prevent_default();

        let data = self.collect();
        tracing::debug!(form = %self.title, entries = data.len(), "collected form data");

        let toast = self
            .toast
            .read()
            .expect("form toast lock poisoned")
            .clone()
            .ok_or_else(|| {
                FormkitError::ElementNotFound(format!(
                    "#{} (form \"{}\" has not been rendered)",
                    self.settings.toast_id, self.title
                ))
            })?;
        toast.show(&data.toast_text())?;
        Ok(data)
    }
}

/// A titled collection of fields that renders into a document.
pub struct Form {
    element: Element,
    listener: Option<ListenerId>,
    state: Arc<FormState>,
}

impl Form {
    /// Creates an empty form with default settings.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_settings(title, &Settings::default())
    }

    /// Creates an empty form that reads mount point, labels, and toast
    /// configuration from `settings`.
    pub fn with_settings(title: impl Into<String>, settings: &Settings) -> Self {
        Self {
            element: Element::new("form"),
            listener: None,
            state: Arc::new(FormState {
                title: title.into(),
                settings: settings.clone(),
                fields: RwLock::new(Vec::new()),
                toast: RwLock::new(None),
            }),
        }
    }

    /// Uses `toast` for submission feedback instead of looking the
    /// notification element up at render time.
    ///
    /// Passing the same `Arc<Toast>` to several forms makes them share one
    /// pending hide.
    #[must_use]
    pub fn with_toast(self, toast: impl Into<Arc<Toast>>) -> Self {
        *self.state.toast.write().expect("form toast lock poisoned") = Some(toast.into());
        self
    }

    /// Returns the form title.
    pub fn title(&self) -> &str {
        &self.state.title
    }

    /// Returns the `<form>` container element.
    pub const fn element(&self) -> &Element {
        &self.element
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.state.fields.read().expect("form fields lock poisoned").len()
    }

    /// Returns `true` if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the field names in insertion order.
    pub fn field_names(&self) -> Vec<String> {
        self.state
            .fields
            .read()
            .expect("form fields lock poisoned")
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    }

    /// Returns the rendered input of the first field named `name`.
    pub fn input(&self, name: &str) -> Option<Element> {
        self.state
            .fields
            .read()
            .expect("form fields lock poisoned")
            .iter()
            .find(|field| field.name() == name)
            .and_then(|field| field.input().cloned())
    }

    /// Returns the current values without submitting.
    pub fn data(&self) -> FormData {
        self.state.collect()
    }

    /// Appends a field and returns the form for chaining.
    ///
    /// Accepts a [`Field`], its [`FieldOptions`](crate::FieldOptions), or a
    /// declarative `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Returns [`FormkitError::InvalidField`] if `field` cannot be turned
    /// into a field. The field list is left untouched.
    pub fn add_field<F>(&mut self, field: F) -> FormkitResult<&mut Self>
    where
        F: TryInto<Field>,
        FormkitError: From<F::Error>,
    {
        let field: Field = field.try_into()?;
        tracing::info!(form = %self.state.title, "Added field {} to form", field.name());
        self.state
            .fields
            .write()
            .expect("form fields lock poisoned")
            .push(field);
        Ok(self)
    }

    /// Composes the form and appends it to the document's mount point.
    ///
    /// Rendering again rebuilds the container's content; the submit listener
    /// is only bound once.
    ///
    /// # Errors
    ///
    /// Returns [`FormkitError::ElementNotFound`] if the mount point is not in
    /// the document, or [`FormkitError::HierarchyRequest`] if it lies inside
    /// this form. Nothing is modified in either case.
    pub fn render(&mut self, document: &Document) -> FormkitResult<()> {
        let span = form_span(&self.state.title);
        let _guard = span.enter();
        let settings = &self.state.settings;

        let mount = document
            .query_selector(&settings.mount_selector)
            .ok_or_else(|| FormkitError::ElementNotFound(settings.mount_selector.clone()))?;
        if self.element.is_inclusive_ancestor_of(&mount) {
            return Err(FormkitError::HierarchyRequest(format!(
                "mount point `{}` is inside form \"{}\"",
                settings.mount_selector, self.state.title
            )));
        }

        self.element.set_text_content("");

        let heading = document.create_element(&settings.title_tag);
        heading.set_text_content(self.state.title.as_str());
        self.element.append_child(&heading)?;

        {
            let mut fields = self.state.fields.write().expect("form fields lock poisoned");
            for field in fields.iter_mut() {
                let container = field.render_with_class(&settings.field_container_class)?;
                self.element.append_child(&container)?;
            }
        }

        let button = document.create_element("button");
        button.set_attribute("type", "submit");
        button.set_text_content(settings.submit_label.as_str());
        self.element.append_child(&button)?;

        if self.listener.is_none() {
            // The element is owned by the document, so the listener must not
            // keep the form state alive.
            let state = Arc::downgrade(&self.state);
            self.listener = Some(self.element.add_event_listener("submit", move |event| {
                let Some(state) = state.upgrade() else {
                    event.prevent_default();
                    tracing::debug!("submit on a dropped form ignored");
                    return;
                };
                if let Err(err) = state.submit(event) {
                    tracing::error!(form = %state.title, error = %err, "form submission failed");
                }
            }));
        }

        {
            let mut toast = self.state.toast.write().expect("form toast lock poisoned");
            if toast.is_none() {
                *toast = Some(Arc::new(Toast::from_settings(document, settings)));
            }
        }

        mount.append_child(&self.element)?;
        tracing::info!(fields = self.len(), mount = %settings.mount_selector, "rendered form");
        Ok(())
    }

    /// Handles a submission and returns the collected data.
    ///
    /// This is what the bound submit listener runs; calling it directly
    /// makes the result and any failure observable.
    ///
    /// # Errors
    ///
    /// Returns [`FormkitError::ElementNotFound`] if the notification element
    /// is missing, or [`FormkitError::Scheduler`] outside a tokio runtime.
    /// The event's default is prevented either way.
    pub fn submit(&self, event: &mut Event) -> FormkitResult<FormData> {
        self.state.submit(event)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("title", &self.state.title)
            .field("fields", &self.field_names())
            .field("rendered", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldOptions;

    fn field(name: &str, input_type: &str) -> Field {
        Field::new(FieldOptions::new(name, input_type, name))
    }

    fn page() -> (Document, Element) {
        let doc = Document::new();
        let toast = doc.create_element("div");
        toast.set_attribute("id", "toast");
        doc.body().append_child(&toast).unwrap();
        (doc, toast)
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = Form::new("Signup");
        assert_eq!(form.title(), "Signup");
        assert!(form.is_empty());
        assert_eq!(form.element().tag_name(), "form");
        assert!(form.element().children().is_empty());
    }

    #[test]
    fn test_add_field_chains_and_keeps_order() {
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email"))
            .unwrap()
            .add_field(field("password", "password"))
            .unwrap()
            .add_field(field("email", "email"))
            .unwrap();
        assert_eq!(form.field_names(), vec!["email", "password", "email"]);
    }

    #[test]
    fn test_add_field_from_options_and_json() {
        let mut form = Form::new("Signup");
        form.add_field(FieldOptions::new("email", "email", "Email"))
            .unwrap()
            .add_field(serde_json::json!({"name": "age", "type": "number", "label": "Age"}))
            .unwrap();
        assert_eq!(form.field_names(), vec!["email", "age"]);
    }

    #[test]
    fn test_add_non_field_fails_without_mutation() {
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email")).unwrap();

        let err = form
            .add_field(serde_json::json!("not a field"))
            .unwrap_err();
        assert!(matches!(err, FormkitError::InvalidField(_)));
        assert_eq!(form.field_names(), vec!["email"]);
    }

    #[test]
    fn test_render_structure() {
        let (doc, _) = page();
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email"))
            .unwrap()
            .add_field(field("password", "password"))
            .unwrap();
        form.render(&doc).unwrap();

        let children = form.element().children();
        assert_eq!(children.len(), 4);
        assert_eq!(children[0].tag_name(), "h1");
        assert_eq!(children[0].text_content(), "Signup");
        assert!(children[1].has_class("field-container"));
        assert!(children[2].has_class("field-container"));
        assert_eq!(children[3].tag_name(), "button");
        assert_eq!(children[3].attribute("type").as_deref(), Some("submit"));
        assert_eq!(children[3].text_content(), "Submit");

        assert!(form.element().parent().unwrap().ptr_eq(&doc.body()));
        assert_eq!(form.element().listener_count("submit"), 1);
    }

    #[test]
    fn test_render_without_fields() {
        let (doc, _) = page();
        let mut form = Form::new("Empty");
        form.render(&doc).unwrap();
        assert_eq!(
            form.element().outer_html(),
            r#"<form><h1>Empty</h1><button type="submit">Submit</button></form>"#
        );
    }

    #[test]
    fn test_render_missing_mount_point() {
        let doc = Document::new();
        let settings = Settings {
            mount_selector: "#app".to_string(),
            ..Settings::default()
        };
        let mut form = Form::with_settings("Signup", &settings);
        form.add_field(field("email", "email")).unwrap();

        match form.render(&doc) {
            Err(FormkitError::ElementNotFound(what)) => assert_eq!(what, "#app"),
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
        assert!(form.element().children().is_empty());
        assert_eq!(form.element().listener_count("submit"), 0);
    }

    #[test]
    fn test_render_uses_settings() {
        let doc = Document::new();
        let app = doc.create_element("main");
        app.set_attribute("id", "app");
        doc.body().append_child(&app).unwrap();

        let settings = Settings {
            mount_selector: "#app".to_string(),
            title_tag: "h2".to_string(),
            submit_label: "Send".to_string(),
            field_container_class: "row".to_string(),
            ..Settings::default()
        };
        let mut form = Form::with_settings("Contact", &settings);
        form.add_field(field("email", "email")).unwrap();
        form.render(&doc).unwrap();

        assert!(form.element().parent().unwrap().ptr_eq(&app));
        assert_eq!(
            form.element().outer_html(),
            concat!(
                r#"<form><h2>Contact</h2>"#,
                r#"<div class="row"><label>email</label><input name="email" type="email"></div>"#,
                r#"<button type="submit">Send</button></form>"#
            )
        );
    }

    #[test]
    fn test_rerender_rebuilds_and_binds_once() {
        let (doc, _) = page();
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email")).unwrap();
        form.render(&doc).unwrap();
        form.render(&doc).unwrap();

        assert_eq!(form.element().children().len(), 3);
        assert_eq!(form.element().listener_count("submit"), 1);
        // Still mounted once.
        assert_eq!(doc.body().children().len(), 2);
    }

    #[test]
    fn test_render_rejects_mount_point_inside_form() {
        let doc = Document::new();
        let slot = doc.create_element("section");
        slot.add_class("slot");
        doc.body().append_child(&slot).unwrap();

        let settings = Settings {
            mount_selector: ".slot".to_string(),
            field_container_class: "slot".to_string(),
            ..Settings::default()
        };
        let mut form = Form::with_settings("Signup", &settings);
        form.add_field(field("email", "email")).unwrap();
        form.render(&doc).unwrap();
        assert!(form.element().parent().unwrap().ptr_eq(&slot));

        // Now the first `.slot` in the document is the form's own field container.
        slot.remove_class("slot");
        let err = form.render(&doc).unwrap_err();
        assert!(matches!(err, FormkitError::HierarchyRequest(_)));
        assert!(doc.contains(form.element()));
        assert_eq!(form.element().children().len(), 3);
    }

    #[test]
    fn test_dropping_form_and_document_frees_toast() {
        let (doc, _) = page();
        let toast = Arc::new(Toast::by_id(&doc, "toast"));
        let weak = Arc::downgrade(&toast);

        let mut form = Form::new("Signup").with_toast(toast);
        form.add_field(field("email", "email")).unwrap();
        form.render(&doc).unwrap();
        assert!(weak.upgrade().is_some());

        drop(form);
        drop(doc);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_submit_after_form_dropped_is_ignored() {
        let (doc, toast) = page();
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email")).unwrap();
        form.render(&doc).unwrap();

        let element = form.element().clone();
        drop(form);

        let mut event = Event::new("submit");
        assert!(!element.dispatch_event(&mut event));
        assert!(!toast.has_class("show"));
        assert!(doc.contains(&element));
    }

    #[test]
    fn test_input_lookup_and_data() {
        let (doc, _) = page();
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email")).unwrap();
        assert!(form.input("email").is_none());

        form.render(&doc).unwrap();
        form.input("email").unwrap().set_value("a@b.com");
        assert!(form.input("missing").is_none());
        assert_eq!(form.data().to_json().unwrap(), r#"[{"email":"a@b.com"}]"#);
    }

    #[test]
    fn test_submit_before_render_reports_missing_toast() {
        let form = Form::new("Signup");
        let mut event = Event::new("submit");
        let err = form.submit(&mut event).unwrap_err();
        assert!(matches!(err, FormkitError::ElementNotFound(_)));
        assert!(event.default_prevented());
    }

    #[tokio::test]
    async fn test_submit_without_toast_element() {
        let doc = Document::new();
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email")).unwrap();
        form.render(&doc).unwrap();

        let mut event = Event::new("submit");
        match form.submit(&mut event) {
            Err(FormkitError::ElementNotFound(what)) => assert_eq!(what, "#toast"),
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
        assert!(event.default_prevented());
    }

    #[tokio::test]
    async fn test_submit_collects_and_shows() {
        let (doc, toast) = page();
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email"))
            .unwrap()
            .add_field(field("password", "password"))
            .unwrap();
        form.render(&doc).unwrap();
        form.input("email").unwrap().set_value("a@b.com");
        form.input("password").unwrap().set_value("secret");

        let mut event = Event::new("submit");
        let data = form.submit(&mut event).unwrap();
        assert!(event.default_prevented());
        assert_eq!(
            data.to_json().unwrap(),
            r#"[{"email":"a@b.com"},{"password":"secret"}]"#
        );
        assert!(toast.has_class("show"));
        assert_eq!(
            toast.text_content(),
            r#"{"email":"a@b.com"},{"password":"secret"}"#
        );
    }

    #[tokio::test]
    async fn test_injected_toast_is_used() {
        let doc = Document::new();
        let flash = doc.create_element("p");
        let mut form = Form::new("Signup").with_toast(Toast::element(flash.clone()));
        form.add_field(field("email", "email")).unwrap();
        form.render(&doc).unwrap();

        form.submit(&mut Event::new("submit")).unwrap();
        assert!(flash.has_class("show"));
        assert_eq!(flash.text_content(), r#"{"email":""}"#);
    }

    #[test]
    fn test_debug_output() {
        let mut form = Form::new("Signup");
        form.add_field(field("email", "email")).unwrap();
        let debug = format!("{form:?}");
        assert!(debug.contains("Signup"));
        assert!(debug.contains("email"));
    }
}
