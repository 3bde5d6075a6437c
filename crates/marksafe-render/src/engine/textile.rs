//! Textile subset converter.
//!
//! Block rules (blocks are separated by blank lines):
//! - `p.`, `h1.`..`h6.`, `bq.`, `bc.` signatures;
//! - `* item` / `# item` lists;
//! - blocks opening with a block-level HTML tag pass through untouched;
//! - anything else is a paragraph, single newlines become `<br />`.
//!
//! Inline rules run on text with every HTML tag (raw or generated) stashed
//! behind a private-use placeholder, so quotes and phrase markers inside tags
//! are never rewritten. `@code@` spans are stashed whole before anything
//! else, so their contents stay literal.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use marksafe_core::error::{MarksafeError, Result};
use marksafe_core::Dialect;

use super::MarkupEngine;

pub const DEFAULT_MAX_INPUT_BYTES: usize = 256 * 1024;

const STASH_OPEN: char = '\u{E000}';
const STASH_CLOSE: char = '\u{E001}';

// Phrase markers, longest first so `**` wins over `*`.
const PHRASES: &[(&str, &str)] = &[
    ("**", "b"),
    ("__", "i"),
    ("*", "strong"),
    ("_", "em"),
    ("+", "ins"),
    ("^", "sup"),
    ("~", "sub"),
];

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextileOptions {
    /// Wrap runs of capitals in `<span class="caps">`.
    pub span_caps: bool,
    pub max_input_bytes: usize,
}

impl Default for TextileOptions {
    fn default() -> Self {
        Self {
            span_caps: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextileEngine {
    options: TextileOptions,
}

impl TextileEngine {
    pub fn new(options: TextileOptions) -> Self {
        Self { options }
    }

    fn block(&self, block: &str, p: &Patterns) -> String {
        if p.html_block.is_match(block) {
            return block.to_string();
        }

        if let Some(caps) = p.signature.captures(block) {
            let sig = caps.get(1).map_or("p", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            return match sig {
                "bc" => format!("<pre><code>{}</code></pre>", escape_text(body)),
                "bq" => format!(
                    "<blockquote>\n<p>{}</p>\n</blockquote>",
                    self.inline(body, true, p)
                ),
                "p" => format!("<p>{}</p>", self.inline(body, true, p)),
                heading => format!("<{heading}>{}</{heading}>", self.inline(body, true, p)),
            };
        }

        if let Some(list) = self.list(block, p) {
            return list;
        }

        format!("<p>{}</p>", self.inline(block, true, p))
    }

    /// Flat `*` / `#` list; every line must carry the same bullet.
    fn list(&self, block: &str, p: &Patterns) -> Option<String> {
        let mut bullet = None;
        let mut items = Vec::new();
        for line in block.lines() {
            let caps = p.list_item.captures(line)?;
            let mark = caps.get(1)?.as_str();
            match bullet {
                None => bullet = Some(mark.to_string()),
                Some(ref b) if b != mark => return None,
                Some(_) => {}
            }
            let body = caps.get(2).map_or("", |m| m.as_str());
            items.push(format!("<li>{}</li>", self.inline(body, false, p)));
        }
        let tag = if bullet.as_deref() == Some("#") { "ol" } else { "ul" };
        Some(format!("<{tag}>\n{}\n</{tag}>", items.join("\n")))
    }

    fn inline(&self, text: &str, line_breaks: bool, p: &Patterns) -> String {
        let mut stash = Stash::default();

        let s = stash_code(text, p, &mut stash);
        let s = p.raw_tag.replace_all(&s, |c: &Captures| stash.put(&c[0]));
        let s = escape_inline(&s, p);

        let s = p.image.replace_all(&s, |c: &Captures| {
            let pre = c.get(1).map_or("", |m| m.as_str());
            let src = c.get(2).map_or("", |m| m.as_str());
            let alt = c.get(3).map_or("", |m| m.as_str());
            let img = format!(
                "<img src=\"{}\" alt=\"{}\" />",
                attr_value(src),
                attr_value(alt)
            );
            let html = match c.get(4) {
                Some(href) => format!("<a href=\"{}\">{img}</a>", attr_value(href.as_str())),
                None => img,
            };
            format!("{pre}{}", stash.put(html))
        });

        let s = p.link.replace_all(&s, |c: &Captures| {
            let label = c.get(1).map_or("", |m| m.as_str());
            let href = c.get(2).map_or("", |m| m.as_str());
            let open = stash.put(format!("<a href=\"{}\">", attr_value(href)));
            let close = stash.put("</a>");
            format!("{open}{label}{close}")
        });

        let mut s = s.into_owned();
        for (re, tag) in &p.phrases {
            s = apply_phrase(s, re, tag, &mut stash);
        }
        s = apply_phrase(s, &p.deleted, "del", &mut stash);

        let mut s = glyphs(&s, p);

        if self.options.span_caps {
            s = p
                .caps
                .replace_all(&s, |c: &Captures| {
                    let open = stash.put("<span class=\"caps\">");
                    let close = stash.put("</span>");
                    format!("{open}{}{close}", &c[1])
                })
                .into_owned();
        }

        if line_breaks {
            s = s.replace('\n', "<br />\n");
        }

        stash.restore(&s, p)
    }
}

impl MarkupEngine for TextileEngine {
    fn supports(&self, dialect: Dialect) -> bool {
        dialect == Dialect::Textile
    }

    fn convert(&self, text: &str, dialect: Dialect) -> Result<String> {
        if !self.supports(dialect) {
            return Err(MarksafeError::UnsupportedDialect(format!(
                "textile engine cannot render {dialect}"
            )));
        }
        if text.len() > self.options.max_input_bytes {
            return Err(MarksafeError::MarkupEngine(format!(
                "input is {} bytes, limit is {}",
                text.len(),
                self.options.max_input_bytes
            )));
        }

        let p = patterns()?;
        let text: String = text
            .replace("\r\n", "\n")
            .chars()
            .filter(|c| *c != STASH_OPEN && *c != STASH_CLOSE)
            .collect();

        let blocks: Vec<String> = p
            .blank_line
            .split(&text)
            .map(|b| b.trim_matches('\n').trim_end())
            .filter(|b| !b.trim().is_empty())
            .map(|b| self.block(b, p))
            .collect();

        tracing::trace!(blocks = blocks.len(), "textile converted");
        Ok(blocks.join("\n"))
    }
}

/// Placeholder store for HTML fragments.
#[derive(Default)]
struct Stash(Vec<String>);

impl Stash {
    fn put(&mut self, html: impl Into<String>) -> String {
        let idx = self.0.len();
        self.0.push(html.into());
        format!("{STASH_OPEN}{idx}{STASH_CLOSE}")
    }

    fn restore(&self, text: &str, p: &Patterns) -> String {
        p.placeholder
            .replace_all(text, |c: &Captures| {
                c.get(1)
                    .and_then(|m| m.as_str().parse::<usize>().ok())
                    .and_then(|idx| self.0.get(idx))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Replace until no marker pair is left; boundaries are consumed by each
/// match so adjacent phrases need another pass.
fn apply_phrase(mut s: String, re: &Regex, tag: &str, stash: &mut Stash) -> String {
    loop {
        let replaced = re.replace_all(&s, |c: &Captures| {
            let pre = c.get(1).map_or("", |m| m.as_str());
            let body = c.get(2).map_or("", |m| m.as_str());
            let post = c.get(3).map_or("", |m| m.as_str());
            let open = stash.put(format!("<{tag}>"));
            let close = stash.put(format!("</{tag}>"));
            format!("{pre}{open}{body}{close}{post}")
        });
        let next = match replaced {
            Cow::Owned(next) => next,
            Cow::Borrowed(_) => break,
        };
        s = next;
    }
    s
}

/// `@...@` spans become escaped `<code>` fragments in the stash.
fn stash_code(text: &str, p: &Patterns, stash: &mut Stash) -> String {
    let mut s = text.to_string();
    loop {
        let replaced = p.code.replace_all(&s, |c: &Captures| {
            let pre = c.get(1).map_or("", |m| m.as_str());
            let body = c.get(2).map_or("", |m| m.as_str());
            let post = c.get(3).map_or("", |m| m.as_str());
            let html = stash.put(format!("<code>{}</code>", escape_text(body)));
            format!("{pre}{html}{post}")
        });
        let next = match replaced {
            Cow::Owned(next) => next,
            Cow::Borrowed(_) => break,
        };
        s = next;
    }
    s
}

/// `&` not starting an entity, `<` and `>` left over after tags were stashed.
fn escape_inline(s: &str, p: &Patterns) -> String {
    p.ampersand
        .replace_all(s, |c: &Captures| match c.get(1) {
            Some(_) => c[0].to_string(),
            None => "&amp;".to_string(),
        })
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Text was already entity-escaped; only quotes still need it.
fn attr_value(s: &str) -> String {
    s.replace('"', "&quot;")
}

/// Typographic replacements: curly quotes, dashes, ellipsis, marks.
fn glyphs(s: &str, p: &Patterns) -> String {
    let s = s.replace("...", "\u{2026}").replace(" -- ", " \u{2014} ");
    let s = s.replace("--", "\u{2014}").replace(" - ", " \u{2013} ");
    let s = p.marks.replace_all(&s, |c: &Captures| {
        match c.get(1).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
            Some("c") => "\u{a9}",
            Some("r") => "\u{ae}",
            _ => "\u{2122}",
        }
    });

    let mut out = String::with_capacity(s.len() + 16);
    let mut prev: Option<char> = None;
    for ch in s.chars() {
        let opens = prev.map_or(true, |c| {
            c.is_whitespace()
                || matches!(c, '(' | '[' | '{' | STASH_CLOSE | '\u{2014}' | '\u{2013}')
        });
        match ch {
            '"' if opens => out.push('\u{201c}'),
            '"' => out.push('\u{201d}'),
            '\'' if opens => out.push('\u{2018}'),
            '\'' => out.push('\u{2019}'),
            other => out.push(other),
        }
        prev = Some(ch);
    }
    out
}

struct Patterns {
    blank_line: Regex,
    signature: Regex,
    list_item: Regex,
    html_block: Regex,
    raw_tag: Regex,
    ampersand: Regex,
    image: Regex,
    link: Regex,
    code: Regex,
    phrases: Vec<(Regex, &'static str)>,
    deleted: Regex,
    marks: Regex,
    caps: Regex,
    placeholder: Regex,
}

impl Patterns {
    fn compile() -> std::result::Result<Self, regex::Error> {
        let mut phrases = Vec::with_capacity(PHRASES.len());
        for (marker, tag) in PHRASES {
            let m = regex::escape(marker);
            let first = regex::escape(&marker[..1]);
            let pattern = format!(
                r"(^|[^\w{first}])(?:{m})([^\s{first}](?:[^{first}]*?[^\s{first}])?)(?:{m})($|[^\w{first}])"
            );
            phrases.push((Regex::new(&pattern)?, *tag));
        }

        Ok(Self {
            blank_line: Regex::new(r"\n[ \t]*\n\s*")?,
            signature: Regex::new(r"^(h[1-6]|bq|bc|p)\.\s+([\s\S]*)$")?,
            list_item: Regex::new(r"^([*#])\s+(.*)$")?,
            html_block: Regex::new(
                r"^<(?:div|pre|table|ul|ol|dl|blockquote|h[1-6]|p|hr|section|article|aside|header|footer|nav|figure|form)[\s>/]",
            )?,
            raw_tag: Regex::new(
                r#"<!--[\s\S]*?-->|</?[A-Za-z][A-Za-z0-9-]*(?:\s+[^\s=<>"'/]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'<>=`]+))?)*\s*/?>"#,
            )?,
            ampersand: Regex::new(r"&(#[0-9]+;|#[xX][0-9A-Fa-f]+;|[A-Za-z][A-Za-z0-9]*;)?")?,
            image: Regex::new(&format!(
                r#"(^|[\s(>{STASH_CLOSE}])!([^\s!()"<>]+)(?:\(([^)"]*)\))?!(?::([^\s<>"]*[^\s<>".,;:!?)\]']))?"#
            ))?,
            link: Regex::new(r#""([^"\n]+?)":([^\s<>"]*[^\s<>".,;:!?)\]'])"#)?,
            code: Regex::new(r"(^|[^\w@])@([^\s@](?:[^@\n]*?[^\s@])?)@($|[^\w@])")?,
            phrases,
            deleted: Regex::new(r"(^|[\s(])-([^\s-](?:[^-\n]*?[^\s-])?)-($|[\s).,;:!?])")?,
            marks: Regex::new(r"(?i)\((c|r|tm)\)")?,
            caps: Regex::new(r"\b([A-Z][A-Z0-9]{2,})\b")?,
            placeholder: Regex::new(&format!(r"{STASH_OPEN}([0-9]+){STASH_CLOSE}"))?,
        })
    }
}

fn patterns() -> Result<&'static Patterns> {
    if let Some(p) = PATTERNS.get() {
        return Ok(p);
    }
    let compiled = Patterns::compile().map_err(|e| {
        MarksafeError::MarkupEngine(format!("textile pattern failed to compile: {e}"))
    })?;
    Ok(PATTERNS.get_or_init(|| compiled))
}
