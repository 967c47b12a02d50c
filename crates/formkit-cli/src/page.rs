//! The host page a form is rendered into.

use formkit_core::{FormkitResult, Settings};
use formkit_dom::{Document, Selector};
use formkit_forms::FieldOptions;

/// Builds an empty page: the configured mount point (created inside
/// `<body>` unless it is `<body>` itself) followed by the toast element.
pub fn bootstrap(settings: &Settings) -> FormkitResult<Document> {
    let document = Document::new();
    let body = document.body();

    match Selector::parse(&settings.mount_selector) {
        Some(Selector::Tag(tag)) if tag == "body" => {}
        Some(Selector::Tag(tag)) => body.append_child(&document.create_element(&tag))?,
        Some(Selector::Id(id)) => {
            let mount = document.create_element("main");
            mount.set_attribute("id", id);
            body.append_child(&mount)?;
        }
        Some(Selector::Class(class)) => {
            let mount = document.create_element("div");
            mount.add_class(&class);
            body.append_child(&mount)?;
        }
        // Left for Form::render to report.
        None => {}
    }

    let toast = document.create_element("div");
    toast.set_attribute("id", settings.toast_id.as_str());
    body.append_child(&toast)?;

    Ok(document)
}

/// The fields of the signup demo form.
pub fn signup_fields() -> Vec<FieldOptions> {
    vec![
        FieldOptions::new("email", "email", "email"),
        FieldOptions::new("password", "password", "password"),
    ]
}
