//! Raw markup declaration as written by the host or read from config.

use marksafe_core::Dialect;

/// Unvalidated `{markup, allow, deny}` options for one or more fields.
///
/// Tokens stay as strings until resolution so that typos surface as
/// configuration errors at declaration time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupDeclaration {
    pub markup: Option<String>,
    /// `None` means allow everything.
    pub allow: Option<Vec<String>>,
    pub deny: Vec<String>,
}

impl MarkupDeclaration {
    /// Declaration without a dialect; resolving it fails until `markup` is set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textile() -> Self {
        Self::new().markup(Dialect::Textile.as_str())
    }

    pub fn markdown() -> Self {
        Self::new().markup(Dialect::Markdown.as_str())
    }

    pub fn markup(mut self, dialect: impl Into<String>) -> Self {
        self.markup = Some(dialect.into());
        self
    }

    pub fn allow<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    pub fn deny<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny = tokens.into_iter().map(Into::into).collect();
        self
    }
}
