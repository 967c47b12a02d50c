//! Simple selectors used to locate elements.

use std::fmt;

/// A single simple selector: `#id`, `.class`, or a tag name.
///
/// # Examples
///
/// ```
/// use formkit_dom::Selector;
///
/// assert_eq!(Selector::parse("#toast"), Some(Selector::Id("toast".into())));
/// assert_eq!(Selector::parse(".show"), Some(Selector::Class("show".into())));
/// assert_eq!(Selector::parse("BODY"), Some(Selector::Tag("body".into())));
/// assert_eq!(Selector::parse("  "), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches the element whose `id` attribute equals the value.
    Id(String),
    /// Matches elements whose class list contains the value.
    Class(String),
    /// Matches elements with this (lowercase) tag name.
    Tag(String),
}

impl Selector {
    /// Parses a selector string. Returns `None` for empty or compound input.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || input.contains(char::is_whitespace) {
            return None;
        }
        let selector = if let Some(id) = input.strip_prefix('#') {
            Self::Id(id.to_string())
        } else if let Some(class) = input.strip_prefix('.') {
            Self::Class(class.to_string())
        } else {
            Self::Tag(input.to_ascii_lowercase())
        };
        match &selector {
            Self::Id(s) | Self::Class(s) if s.is_empty() => None,
            _ => Some(selector),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Tag(tag) => write!(f, "{tag}"),
        }
    }
}
