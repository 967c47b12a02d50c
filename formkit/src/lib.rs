//! # formkit
//!
//! Builds forms out of labelled input fields, renders them into an
//! in-memory document, and reports submissions through a toast element
//! that hides itself after a delay.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on the
//! individual crates for finer-grained control.
//!
//! ```
//! use formkit::prelude::*;
//!
//! let document = Document::new();
//! let toast = document.create_element("div");
//! toast.set_attribute("id", "toast");
//! document.body().append_child(&toast).unwrap();
//!
//! let mut form = Form::new("Signup");
//! form.add_field(FieldOptions::new("email", "email", "email"))
//!     .unwrap()
//!     .add_field(FieldOptions::new("password", "password", "password"))
//!     .unwrap();
//! form.render(&document).unwrap();
//! assert_eq!(form.len(), 2);
//! ```

/// Errors, settings, settings loading and logging setup.
pub use formkit_core as core;

/// The in-memory document: elements, events and selectors.
pub use formkit_dom as dom;

/// Fields, forms, submitted data and the toast notification.
#[cfg(feature = "forms")]
pub use formkit_forms as forms;

/// The `formkit` command.
#[cfg(feature = "cli")]
pub use formkit_cli as cli;

// Third-party re-exports
pub use serde_json;
pub use tokio;
pub use tracing;

/// Convenience re-exports of the most commonly used types.
pub mod prelude {
    pub use formkit_core::{FormkitError, FormkitResult, Settings};
    pub use formkit_dom::{Document, Element, Event, Selector};

    #[cfg(feature = "forms")]
    pub use formkit_forms::{Field, FieldEntry, FieldOptions, Form, FormData, Toast};
}
