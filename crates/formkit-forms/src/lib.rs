//! # formkit-forms
//!
//! Forms for formkit. A [`Form`] owns an ordered list of [`Field`]s, renders
//! itself into a [`Document`](formkit_dom::Document), and on submission
//! collects one [`FieldEntry`] per field and flashes them in a [`Toast`].
//!
//! ```
//! use formkit_dom::Document;
//! use formkit_forms::{Field, FieldOptions, Form};
//!
//! # fn main() -> formkit_core::FormkitResult<()> {
//! let doc = Document::new();
//! let mut form = Form::new("Signup");
//! form.add_field(Field::new(FieldOptions::new("email", "email", "email")))?
//!     .add_field(Field::new(FieldOptions::new("password", "password", "password")))?;
//! form.render(&doc)?;
//! assert_eq!(form.element().children().len(), 4);
//! # Ok(())
//! # }
//! ```

pub mod field;
pub mod form;
pub mod form_data;
pub mod toast;

pub use field::{Field, FieldOptions};
pub use form::Form;
pub use form_data::{FieldEntry, FormData};
pub use toast::Toast;
