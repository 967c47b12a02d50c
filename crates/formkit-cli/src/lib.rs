//! # formkit-cli
//!
//! The `formkit` command. It bootstraps a page, builds a form (the signup
//! form unless fields are given), renders it, types the given values into
//! the inputs, and optionally submits it, printing the page and the toast.
//!
//! ```text
//! formkit --set email=a@b.com --set password=secret --submit --wait
//! ```

pub mod args;
pub mod page;

use std::fmt;
use std::time::Duration;

use formkit_core::{FormkitError, FormkitResult, Settings};
use formkit_dom::Event;
use formkit_forms::{Form, FormData};

pub use args::Cli;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct Report {
    /// The page HTML right after rendering (and submitting, if asked).
    pub html: String,
    /// The submitted data, if `--submit` was given.
    pub submission: Option<FormData>,
    /// The toast text right after submitting.
    pub toast_text: String,
    /// Whether the toast was visible right after submitting.
    pub toast_visible: bool,
    /// Whether the toast was still visible after waiting, if `--wait` was given.
    pub toast_visible_after_wait: Option<bool>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.html)?;
        if let Some(data) = &self.submission {
            let json = data.to_json().map_err(|_| fmt::Error)?;
            writeln!(f, "submitted: {json}")?;
            let state = if self.toast_visible { "visible" } else { "hidden" };
            writeln!(f, "toast ({state}): {}", self.toast_text)?;
        }
        if let Some(visible) = self.toast_visible_after_wait {
            let state = if visible { "visible" } else { "hidden" };
            writeln!(f, "toast after delay: {state}")?;
        }
        Ok(())
    }
}

/// Runs the command with already-loaded settings.
///
/// Must run inside a tokio runtime when `cli.submit` is set.
pub async fn run(cli: &Cli, settings: &Settings) -> FormkitResult<Report> {
    let document = page::bootstrap(settings)?;

    let mut form = Form::with_settings(cli.title.as_str(), settings);
    let fields = if cli.fields.is_empty() {
        page::signup_fields()
    } else {
        cli.fields.clone()
    };
    for field in fields {
        form.add_field(field)?;
    }
    form.render(&document)?;

    for (name, value) in &cli.values {
        form.input(name)
            .ok_or_else(|| FormkitError::ElementNotFound(format!("input[name={name}]")))?
            .set_value(value.as_str());
    }

    let submission = if cli.submit {
        Some(form.submit(&mut Event::new("submit"))?)
    } else {
        None
    };

    let toast = document
        .get_element_by_id(&settings.toast_id)
        .ok_or_else(|| FormkitError::ElementNotFound(format!("#{}", settings.toast_id)))?;

    let mut report = Report {
        html: document.to_html(),
        submission,
        toast_text: toast.text_content(),
        toast_visible: toast.has_class(&settings.toast_show_class),
        toast_visible_after_wait: None,
    };

    if cli.wait && cli.submit {
        tracing::info!(delay_ms = settings.toast_hide_after_ms, "waiting for the toast to hide");
        tokio::time::sleep(settings.toast_hide_after() + Duration::from_millis(10)).await;
        report.toast_visible_after_wait = Some(toast.has_class(&settings.toast_show_class));
    }

    Ok(report)
}
