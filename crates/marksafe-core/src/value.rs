//! Runtime values passed between field reads and the renderer.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{MarksafeError, Result};
use crate::policy::TagPolicy;

const MAX_LOCALE_LEN: usize = 35;

/// Locale tag such as `en` or `fr-FR`, supplied explicitly on reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() || tag.len() > MAX_LOCALE_LEN {
            return Err(MarksafeError::Configuration(format!(
                "invalid locale length: {tag:?}"
            )));
        }
        let well_formed = tag
            .split(['-', '_'])
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
        if !well_formed {
            return Err(MarksafeError::Configuration(format!("invalid locale: {tag:?}")));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Locale {
    type Err = MarksafeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Field content as read from a record.
///
/// `Plain` comes from undeclared fields and is never rendered. `Configured`
/// carries the shared policy of the field's declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupValue {
    Plain(String),
    Configured { text: String, policy: Arc<TagPolicy> },
}

impl MarkupValue {
    pub fn plain(text: impl Into<String>) -> Self {
        MarkupValue::Plain(text.into())
    }

    pub fn configured(text: impl Into<String>, policy: Arc<TagPolicy>) -> Self {
        MarkupValue::Configured {
            text: text.into(),
            policy,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            MarkupValue::Plain(text) | MarkupValue::Configured { text, .. } => text,
        }
    }

    pub fn policy(&self) -> Option<&Arc<TagPolicy>> {
        match self {
            MarkupValue::Plain(_) => None,
            MarkupValue::Configured { policy, .. } => Some(policy),
        }
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    pub fn into_text(self) -> String {
        match self {
            MarkupValue::Plain(text) | MarkupValue::Configured { text, .. } => text,
        }
    }
}

impl From<String> for MarkupValue {
    fn from(text: String) -> Self {
        MarkupValue::Plain(text)
    }
}

impl From<&str> for MarkupValue {
    fn from(text: &str) -> Self {
        MarkupValue::Plain(text.to_string())
    }
}

/// HTML that may be emitted without further escaping.
///
/// This is a capability marker: only the render pipeline should construct it,
/// after conversion, sanitization and link marking have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Caller vouches that `html` went through the sanitizer.
    #[doc(hidden)]
    pub fn assume_sanitized(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of rendering a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Pipeline ran; safe for direct output.
    Markup(SafeHtml),
    /// Passed through untouched (blank text or undeclared field); still needs
    /// escaping by the host.
    Raw(String),
}

impl Rendered {
    pub fn as_str(&self) -> &str {
        match self {
            Rendered::Markup(html) => html.as_str(),
            Rendered::Raw(text) => text,
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, Rendered::Markup(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Rendered::Markup(html) => html.into_string(),
            Rendered::Raw(text) => text,
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
