//! Declaration normalization and tag-set expansion.
//!
//! Resolution rules:
//! - `allow` omitted, or exactly `[all]` => whole vocabulary minus `deny`.
//! - otherwise exactly the tags of the allowed capabilities; `all` mixed with
//!   capabilities contributes no tags, and `deny` is validated but has no
//!   effect.

use std::collections::BTreeSet;
use std::sync::Arc;

use marksafe_core::error::{MarksafeError, Result};
use marksafe_core::policy::tags_for;
use marksafe_core::{Allow, Capability, Dialect, PolicyKey, TagPolicy};

use super::declaration::MarkupDeclaration;

const ALLOW_ALL_TOKEN: &str = "all";

/// Turns declarations into policies against a fixed tag vocabulary.
#[derive(Debug, Clone)]
pub struct PolicyResolver {
    vocabulary: Arc<BTreeSet<String>>,
}

impl PolicyResolver {
    pub fn new(vocabulary: BTreeSet<String>) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
        }
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    /// Normalize and expand in one step.
    pub fn resolve(&self, decl: &MarkupDeclaration) -> Result<TagPolicy> {
        let key = normalize(decl)?;
        Ok(self.build(key))
    }

    /// Expand an already-normalized key. Infallible.
    pub fn build(&self, key: PolicyKey) -> TagPolicy {
        let permitted: BTreeSet<String> = match key.allow() {
            Allow::All => {
                let denied = tags_for(key.deny());
                self.vocabulary
                    .iter()
                    .filter(|tag| !denied.contains(tag.as_str()))
                    .cloned()
                    .collect()
            }
            Allow::Only(caps) => tags_for(caps).into_iter().map(str::to_string).collect(),
        };
        TagPolicy::new(key, permitted)
    }
}

/// Validate tokens and produce the cache key for a declaration.
pub fn normalize(decl: &MarkupDeclaration) -> Result<PolicyKey> {
    let dialect: Dialect = decl
        .markup
        .as_deref()
        .ok_or_else(|| MarksafeError::Configuration("must define markup option".into()))?
        .parse()?;

    let deny = parse_capabilities(&decl.deny, "deny")?;

    let allow = match &decl.allow {
        None => Allow::All,
        Some(tokens) if !tokens.is_empty() && tokens.iter().all(|t| t == ALLOW_ALL_TOKEN) => {
            Allow::All
        }
        Some(tokens) => {
            let caps: Vec<String> = tokens
                .iter()
                .filter(|t| *t != ALLOW_ALL_TOKEN)
                .cloned()
                .collect();
            Allow::Only(parse_capabilities(&caps, "allow")?)
        }
    };

    if matches!(allow, Allow::Only(_)) && !deny.is_empty() {
        tracing::warn!(
            %dialect,
            deny = ?deny,
            "deny ignored because an explicit allow list was given"
        );
    }

    Ok(PolicyKey::new(dialect, allow, deny))
}

fn parse_capabilities(raw: &[String], option: &str) -> Result<BTreeSet<Capability>> {
    raw.iter()
        .map(|token| {
            token.parse::<Capability>().map_err(|_| {
                MarksafeError::Configuration(format!("invalid {option} entry: {token}"))
            })
        })
        .collect()
}
