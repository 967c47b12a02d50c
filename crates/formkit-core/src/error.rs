//! Core error types for the formkit workspace.
//!
//! [`FormkitError`] covers the single domain error of the form builder
//! (an invalid field handed to a form) together with the conditions that
//! surface from the DOM, the deferred toast hide, and settings loading.

use thiserror::Error;

/// The primary error type for formkit.
///
/// Each variant maps to a short machine-readable code via
/// [`FormkitError::code`], which is what the CLI prints next to the message.
#[derive(Error, Debug)]
pub enum FormkitError {
    // ── Forms ────────────────────────────────────────────────────────

    /// Something that is not a field was handed to a form.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    // ── DOM ──────────────────────────────────────────────────────────

    /// A mount point or notification target could not be located.
    #[error("Target element not found: {0}")]
    ElementNotFound(String),

    /// An insertion would make a node its own ancestor.
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),

    // ── Scheduling ───────────────────────────────────────────────────

    /// A deferred action could not be scheduled.
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormkitError {
    /// Returns a short, stable code naming the error category.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidField(_) => "invalid_field",
            Self::ElementNotFound(_) => "not_found",
            Self::HierarchyRequest(_) => "hierarchy_request",
            Self::Scheduler(_) => "scheduler",
            Self::ConfigurationError(_) => "configuration",
            Self::SerializationError(_) => "serialization",
            Self::IoError(_) => "io",
        }
    }
}

impl From<std::convert::Infallible> for FormkitError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl From<serde_json::Error> for FormkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormkitError>`.
pub type FormkitResult<T> = Result<T, FormkitError>;
