use std::sync::OnceLock;

use regex::{Captures, NoExpand, Regex};

use marksafe_core::error::{MarksafeError, Result};

use super::LinkMarker;

const NOFOLLOW: &str = "nofollow";

static ANCHOR_OPEN: OnceLock<Regex> = OnceLock::new();
static REL_ATTR: OnceLock<Regex> = OnceLock::new();

/// Adds `rel="nofollow"` to every `<a>` start tag.
///
/// Input is sanitizer output, so attribute values are always double-quoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NofollowLinks;

impl NofollowLinks {
    pub fn new() -> Self {
        Self
    }
}

impl LinkMarker for NofollowLinks {
    fn mark_untrusted(&self, html: &str) -> Result<String> {
        let anchor = compiled(&ANCHOR_OPEN, r#"<a((?:\s+[^\s="'>/]+(?:="[^"]*")?)*)\s*/?>"#)?;
        let rel = compiled(&REL_ATTR, r#"\srel="([^"]*)""#)?;

        let out = anchor.replace_all(html, |caps: &Captures| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            match rel.captures(attrs) {
                Some(existing) => {
                    let values = existing.get(1).map_or("", |m| m.as_str());
                    if values.split_whitespace().any(|v| v == NOFOLLOW) {
                        return caps[0].to_string();
                    }
                    let merged = if values.is_empty() {
                        NOFOLLOW.to_string()
                    } else {
                        format!("{values} {NOFOLLOW}")
                    };
                    let replacement = format!(" rel=\"{merged}\"");
                    let attrs = rel.replace(attrs, NoExpand(&replacement));
                    format!("<a{attrs}>")
                }
                None => format!("<a{attrs} rel=\"{NOFOLLOW}\">"),
            }
        });
        Ok(out.into_owned())
    }
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern)
        .map_err(|e| MarksafeError::Sanitizer(format!("link pattern failed to compile: {e}")))?;
    Ok(cell.get_or_init(|| re))
}
