//! Form fields.
//!
//! A [`Field`] is one labelled input. Rendering produces
//! `<div class="field-container"><label>..</label><input name=.. type=..></div>`
//! and every render allocates a fresh `<input>`; [`Field::value`] always reads
//! the input of the most recent render.

use formkit_core::{FormkitError, FormkitResult};
use formkit_dom::Element;
use serde::{Deserialize, Serialize};

/// Class put on field containers unless a form overrides it.
pub const DEFAULT_CONTAINER_CLASS: &str = "field-container";

/// The declarative description of a field.
///
/// The input type is stored verbatim and serialized under the key `type`, so
/// fields can be declared as `{"name": "email", "type": "email", "label": "Email"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// The field name, used as the input `name` and as the submission key.
    pub name: String,
    /// The input type (e.g. "email", "password"). Not checked.
    #[serde(rename = "type")]
    pub input_type: String,
    /// The label text shown next to the input.
    pub label: String,
}

impl FieldOptions {
    /// Creates field options.
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            label: label.into(),
        }
    }
}

/// A single labelled input within a form.
#[derive(Debug)]
pub struct Field {
    options: FieldOptions,
    input: Option<Element>,
}

impl Field {
    /// Creates a field from its options. Nothing is rendered yet.
    pub const fn new(options: FieldOptions) -> Self {
        Self {
            options,
            input: None,
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.options.name
    }

    /// Returns the input type.
    pub fn input_type(&self) -> &str {
        &self.options.input_type
    }

    /// Returns the label text.
    pub fn label(&self) -> &str {
        &self.options.label
    }

    /// Returns the options this field was built from.
    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Renders the field into a new, detached container element.
    pub fn render(&mut self) -> FormkitResult<Element> {
        self.render_with_class(DEFAULT_CONTAINER_CLASS)
    }

    pub(crate) fn render_with_class(&mut self, container_class: &str) -> FormkitResult<Element> {
        let container = Element::new("div");
        container.add_class(container_class);

        let label = Element::new("label");
        label.set_text_content(self.options.label.as_str());

        let input = Element::new("input");
        input.set_attribute("name", self.options.name.as_str());
        input.set_attribute("type", self.options.input_type.as_str());

        container.append_child(&label)?;
        container.append_child(&input)?;

        self.input = Some(input);
        Ok(container)
    }

    /// Returns the input of the most recent render, if any.
    pub const fn input(&self) -> Option<&Element> {
        self.input.as_ref()
    }

    /// Returns the current value of the input, or an empty string before the
    /// first render.
    pub fn value(&self) -> String {
        self.input.as_ref().map(Element::value).unwrap_or_default()
    }
}

impl From<FieldOptions> for Field {
    fn from(options: FieldOptions) -> Self {
        Self::new(options)
    }
}

impl TryFrom<serde_json::Value> for Field {
    type Error = FormkitError;

    /// Builds a field from a declarative JSON value.
    ///
    /// Anything other than an object with string `name`, `type`, and `label`
    /// keys is rejected with [`FormkitError::InvalidField`].
    fn try_from(value: serde_json::Value) -> FormkitResult<Self> {
        if !value.is_object() {
            return Err(FormkitError::InvalidField(format!(
                "You tried to add something that is not a field: {value}"
            )));
        }
        let options: FieldOptions = serde_json::from_value(value).map_err(|e| {
            FormkitError::InvalidField(format!(
                "You tried to add something that is not a field: {e}"
            ))
        })?;
        Ok(Self::new(options))
    }
}
