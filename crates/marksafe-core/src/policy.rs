//! Markup policy primitives.
//!
//! A declaration names a dialect plus allow/deny lists of capabilities. After
//! normalization it becomes a `PolicyKey`; the render crate expands that key
//! into a `TagPolicy` holding the concrete permitted-tag set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{MarksafeError, Result};

/// Tag that triggers untrusted-link marking when permitted.
pub const ANCHOR_TAG: &str = "a";

/// Lightweight markup syntax accepted by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Textile,
    Markdown,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Textile => "textile",
            Dialect::Markdown => "markdown",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = MarksafeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "textile" => Ok(Dialect::Textile),
            "markdown" => Ok(Dialect::Markdown),
            other => Err(MarksafeError::Configuration(format!(
                "unknown markup dialect: {other} (expected textile or markdown)"
            ))),
        }
    }
}

/// Named category of HTML constructs a policy may permit or deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// `i` and `em`.
    Emphasis,
    /// `a`, always marked `rel="nofollow"`.
    Links,
    /// `img`.
    Images,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::Emphasis, Capability::Links, Capability::Images];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Emphasis => "emphasis",
            Capability::Links => "links",
            Capability::Images => "images",
        }
    }

    /// HTML tags this capability stands for.
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Capability::Emphasis => &["i", "em"],
            Capability::Links => &[ANCHOR_TAG],
            Capability::Images => &["img"],
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = MarksafeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "emphasis" => Ok(Capability::Emphasis),
            "links" => Ok(Capability::Links),
            "images" => Ok(Capability::Images),
            other => Err(MarksafeError::Configuration(format!(
                "unknown markup capability: {other} (expected emphasis, links or images)"
            ))),
        }
    }
}

/// Expand a capability set into its tag names.
pub fn tags_for<'a>(caps: impl IntoIterator<Item = &'a Capability>) -> BTreeSet<&'static str> {
    caps.into_iter().flat_map(|c| c.tags().iter().copied()).collect()
}

/// Normalized allow list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Allow {
    /// Whole vocabulary, minus whatever is denied.
    All,
    /// Exactly these capabilities; deny is ignored.
    Only(BTreeSet<Capability>),
}

/// Normalized declaration: dialect plus sorted allow/deny sets.
///
/// Two declarations with equal keys must share one `TagPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyKey {
    dialect: Dialect,
    allow: Allow,
    deny: BTreeSet<Capability>,
}

impl PolicyKey {
    pub fn new(dialect: Dialect, allow: Allow, deny: BTreeSet<Capability>) -> Self {
        Self { dialect, allow, deny }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
    pub fn allow(&self) -> &Allow {
        &self.allow
    }
    pub fn deny(&self) -> &BTreeSet<Capability> {
        &self.deny
    }
}

impl fmt::Display for PolicyKey {
    /// `textile=>+emphasis+links`, `textile=>+all-images`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<String> = match &self.allow {
            Allow::All => vec!["+all".to_string()],
            Allow::Only(caps) => caps.iter().map(|c| format!("+{c}")).collect(),
        };
        tokens.extend(self.deny.iter().map(|c| format!("-{c}")));
        tokens.sort();
        write!(f, "{}=>{}", self.dialect, tokens.concat())
    }
}

/// Resolved, immutable policy for one normalized declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPolicy {
    key: PolicyKey,
    permitted_tags: BTreeSet<String>,
    mark_links_untrusted: bool,
}

impl TagPolicy {
    /// Link marking is derived from the tag set, never passed in.
    pub fn new(key: PolicyKey, permitted_tags: BTreeSet<String>) -> Self {
        let mark_links_untrusted = permitted_tags.contains(ANCHOR_TAG);
        Self {
            key,
            permitted_tags,
            mark_links_untrusted,
        }
    }

    pub fn key(&self) -> &PolicyKey {
        &self.key
    }
    pub fn dialect(&self) -> Dialect {
        self.key.dialect
    }
    pub fn permitted_tags(&self) -> &BTreeSet<String> {
        &self.permitted_tags
    }
    pub fn permits(&self, tag: &str) -> bool {
        self.permitted_tags.contains(tag)
    }
    pub fn mark_links_untrusted(&self) -> bool {
        self.mark_links_untrusted
    }
}
