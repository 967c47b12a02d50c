//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use formkit_core::{settings_loader, FormkitResult, Settings};
use formkit_forms::FieldOptions;

/// Render a form into an in-memory page and optionally simulate a submission.
#[derive(Debug, Clone, Parser)]
#[command(name = "formkit", version, about)]
pub struct Cli {
    /// Settings file (TOML, or JSON when the name ends in `.json`).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Form title.
    #[arg(long, default_value = "Signup")]
    pub title: String,

    /// Field to add; repeatable. Without any, the signup fields are used.
    #[arg(long = "field", value_name = "NAME[:TYPE[:LABEL]]", value_parser = parse_field)]
    pub fields: Vec<FieldOptions>,

    /// Value typed into a rendered input; repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,

    /// Dispatch a submit event after filling the inputs.
    #[arg(long)]
    pub submit: bool,

    /// Wait for the toast to hide before printing the final state.
    #[arg(long, requires = "submit")]
    pub wait: bool,
}

impl Cli {
    /// Loads settings from `--config` (plus environment overrides), or from
    /// the environment alone.
    pub fn load_settings(&self) -> FormkitResult<Settings> {
        match &self.config {
            Some(path) => settings_loader::from_file_with_env(path),
            None => Ok(settings_loader::from_env()),
        }
    }
}

/// Parses `NAME[:TYPE[:LABEL]]`. The type defaults to `text` and the label
/// to the name.
pub fn parse_field(arg: &str) -> Result<FieldOptions, String> {
    let mut parts = arg.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(format!("field `{arg}` has no name"));
    }
    let input_type = parts.next().filter(|t| !t.is_empty()).unwrap_or("text");
    let label = parts.next().filter(|l| !l.is_empty()).unwrap_or(name);
    Ok(FieldOptions::new(name, input_type, label))
}

/// Parses `NAME=VALUE`. The value may itself contain `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))?;
    if name.is_empty() {
        return Err(format!("assignment `{arg}` has no name"));
    }
    Ok((name.to_string(), value.to_string()))
}
