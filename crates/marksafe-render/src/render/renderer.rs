use std::sync::Arc;

use marksafe_core::error::Result;
use marksafe_core::{MarkupValue, Rendered, SafeHtml, TagPolicy};

use crate::engine::{EngineSet, MarkupEngine, TextileOptions};
use crate::sanitize::{AmmoniaSanitizer, HtmlSanitizer, LinkMarker, NofollowLinks};

/// Runs the three collaborators in a fixed order.
///
/// Stage order is load-bearing: sanitizing after conversion filters anything
/// the engine let through, and link marking after sanitizing only touches
/// anchors that survived.
#[derive(Clone)]
pub struct MarkupRenderer {
    engine: Arc<dyn MarkupEngine>,
    sanitizer: Arc<dyn HtmlSanitizer>,
    links: Arc<dyn LinkMarker>,
}

impl MarkupRenderer {
    pub fn new(
        engine: Arc<dyn MarkupEngine>,
        sanitizer: Arc<dyn HtmlSanitizer>,
        links: Arc<dyn LinkMarker>,
    ) -> Self {
        Self {
            engine,
            sanitizer,
            links,
        }
    }

    /// Textile + Markdown engines, ammonia, nofollow marking.
    pub fn standard(textile: TextileOptions) -> Self {
        Self::new(
            Arc::new(EngineSet::standard(textile)),
            Arc::new(AmmoniaSanitizer::new()),
            Arc::new(NofollowLinks::new()),
        )
    }

    pub fn sanitizer(&self) -> &Arc<dyn HtmlSanitizer> {
        &self.sanitizer
    }

    /// Blank text and plain values come back as `Rendered::Raw`, unchanged.
    pub fn render(&self, value: &MarkupValue) -> Result<Rendered> {
        if value.is_blank() {
            return Ok(Rendered::Raw(value.text().to_string()));
        }
        match value {
            MarkupValue::Plain(text) => Ok(Rendered::Raw(text.clone())),
            MarkupValue::Configured { text, policy } => {
                self.render_with(text, policy).map(Rendered::Markup)
            }
        }
    }

    pub fn render_with(&self, text: &str, policy: &TagPolicy) -> Result<SafeHtml> {
        let dialect = policy.dialect();

        let html = self.engine.convert(text, dialect)?;
        tracing::trace!(%dialect, bytes = html.len(), "markup converted");

        let cleaned = self.sanitizer.sanitize(&html, policy.permitted_tags())?;
        tracing::trace!(policy = %policy.key(), bytes = cleaned.len(), "html sanitized");

        let marked = if policy.mark_links_untrusted() {
            self.links.mark_untrusted(&cleaned)?
        } else {
            cleaned
        };

        Ok(SafeHtml::assume_sanitized(marked.trim().to_string()))
    }
}
