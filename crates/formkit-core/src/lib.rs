//! # formkit-core
//!
//! Core types for the formkit workspace. This crate has no formkit
//! dependencies and provides the foundation for the DOM and forms crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Form builder settings with defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FormkitError, FormkitResult};
pub use settings::Settings;
