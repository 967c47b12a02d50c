//! Settings for the formkit form builder.
//!
//! [`Settings`] holds every knob a rendered form reads: where it mounts,
//! which element acts as the toast, how long the toast stays visible, and
//! the fixed labels and class names used while composing the DOM. The
//! defaults reproduce the classic signup page behaviour.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The complete set of formkit settings.
///
/// # Examples
///
/// ```
/// use formkit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.toast_id, "toast");
/// assert_eq!(settings.toast_hide_after_ms, 5000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or filter directive (e.g. "info", "formkit_forms=debug").
    pub log_level: String,

    // ── Mounting ─────────────────────────────────────────────────────

    /// Selector of the element rendered forms are appended to.
    pub mount_selector: String,
    /// Tag of the heading element showing the form title.
    pub title_tag: String,
    /// Text of the submit button.
    pub submit_label: String,
    /// Class put on every field container.
    pub field_container_class: String,

    // ── Toast ────────────────────────────────────────────────────────

    /// Identifier of the notification element.
    pub toast_id: String,
    /// Class that makes the notification element visible.
    pub toast_show_class: String,
    /// Delay before the notification is hidden again, in milliseconds.
    pub toast_hide_after_ms: u64,
}

impl Settings {
    /// Returns the toast hide delay as a [`Duration`].
    pub const fn toast_hide_after(&self) -> Duration {
        Duration::from_millis(self.toast_hide_after_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            mount_selector: "body".to_string(),
            title_tag: "h1".to_string(),
            submit_label: "Submit".to_string(),
            field_container_class: "field-container".to_string(),
            toast_id: "toast".to_string(),
            toast_show_class: "show".to_string(),
            toast_hide_after_ms: 5000,
        }
    }
}
