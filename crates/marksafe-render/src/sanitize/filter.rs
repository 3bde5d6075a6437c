use std::collections::{BTreeSet, HashSet};

use marksafe_core::error::Result;

use super::HtmlSanitizer;

/// Baseline vocabulary for `allow: all` declarations.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "strong", "em", "b", "i", "p", "code", "pre", "tt", "samp", "kbd", "var", "sub", "sup",
    "dfn", "cite", "big", "small", "address", "hr", "br", "div", "span", "h1", "h2", "h3",
    "h4", "h5", "h6", "ul", "ol", "li", "dl", "dt", "dd", "abbr", "acronym", "a", "img",
    "blockquote", "del", "ins",
];

/// `HtmlSanitizer` backed by `ammonia`.
///
/// Attribute rules are ammonia's defaults. Content-dropping is disabled so a
/// stripped `<script>` leaves its text behind as escaped text, and ammonia's
/// own `rel` handling is off because link marking is a separate stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoniaSanitizer;

impl AmmoniaSanitizer {
    pub fn new() -> Self {
        Self
    }
}

impl HtmlSanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str, permitted: &BTreeSet<String>) -> Result<String> {
        let tags: HashSet<&str> = permitted.iter().map(String::as_str).collect();

        let mut builder = ammonia::Builder::default();
        builder
            .tags(tags)
            .clean_content_tags(HashSet::new())
            .link_rel(None)
            .strip_comments(true);

        Ok(builder.clean(html).to_string())
    }

    fn default_vocabulary(&self) -> BTreeSet<String> {
        super::default_vocabulary()
    }
}
