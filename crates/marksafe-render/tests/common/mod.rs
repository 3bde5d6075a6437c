#![allow(dead_code)]

use regex::Regex;

/// True if `html` contains at least one start tag named `tag`.
pub fn has_tag(html: &str, tag: &str) -> bool {
    let re = Regex::new(&format!(r"<{}[\s>/]", regex::escape(tag))).unwrap();
    re.is_match(html)
}

pub fn has_any_tag(html: &str, tags: &[&str]) -> bool {
    tags.iter().any(|t| has_tag(html, t))
}

/// Drop whitespace between tags so block output compares on structure only.
pub fn compact(html: &str) -> String {
    let re = Regex::new(r">\s+<").unwrap();
    re.replace_all(html.trim(), "><").into_owned()
}
