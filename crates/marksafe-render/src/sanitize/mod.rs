//! Sanitization collaborators (tag filter + untrusted-link marker).
//!
//! Both run on engine output only, after conversion. The filter unwraps any
//! element outside the permitted set; the marker then touches only anchors
//! that survived the filter.

pub mod filter;
pub mod links;

use std::collections::BTreeSet;

use marksafe_core::error::Result;

pub use filter::{AmmoniaSanitizer, DEFAULT_ALLOWED_TAGS};
pub use links::NofollowLinks;

/// Tag filter over rendered HTML.
pub trait HtmlSanitizer: Send + Sync {
    /// Keep only `permitted` elements; children of stripped elements stay.
    fn sanitize(&self, html: &str, permitted: &BTreeSet<String>) -> Result<String>;

    /// Baseline tag set used when a declaration allows everything.
    fn default_vocabulary(&self) -> BTreeSet<String>;
}

/// Post-processor that marks every anchor as not editorially endorsed.
pub trait LinkMarker: Send + Sync {
    fn mark_untrusted(&self, html: &str) -> Result<String>;
}

/// Vocabulary of the bundled sanitizer.
pub fn default_vocabulary() -> BTreeSet<String> {
    DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect()
}
