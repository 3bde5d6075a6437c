//! Markdown via `pulldown-cmark`.
//!
//! Raw HTML in the source is emitted as-is; the sanitizer decides what stays.

use pulldown_cmark::{html, Options, Parser};

use marksafe_core::error::{MarksafeError, Result};
use marksafe_core::Dialect;

use super::MarkupEngine;

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownEngine;

impl MarkdownEngine {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupEngine for MarkdownEngine {
    fn supports(&self, dialect: Dialect) -> bool {
        dialect == Dialect::Markdown
    }

    fn convert(&self, text: &str, dialect: Dialect) -> Result<String> {
        if !self.supports(dialect) {
            return Err(MarksafeError::UnsupportedDialect(format!(
                "markdown engine cannot render {dialect}"
            )));
        }

        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);

        let parser = Parser::new_ext(text, options);

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}
