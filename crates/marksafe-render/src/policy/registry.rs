use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use marksafe_core::error::Result;
use marksafe_core::{PolicyKey, TagPolicy};

use super::declaration::MarkupDeclaration;
use super::resolver::{normalize, PolicyResolver};
use crate::sanitize::default_vocabulary;

static GLOBAL: OnceLock<Arc<PolicyRegistry>> = OnceLock::new();

/// Policy cache: `PolicyKey -> Arc<TagPolicy>`.
///
/// - At most one policy per key; the entry API holds the shard lock while the
///   policy is built, so concurrent first access cannot store two instances.
/// - No eviction. Keys come from startup declarations.
pub struct PolicyRegistry {
    resolver: PolicyResolver,
    policies: DashMap<PolicyKey, Arc<TagPolicy>>,
}

impl PolicyRegistry {
    pub fn new(resolver: PolicyResolver) -> Self {
        Self {
            resolver,
            policies: DashMap::new(),
        }
    }

    pub fn with_vocabulary(vocabulary: BTreeSet<String>) -> Self {
        Self::new(PolicyResolver::new(vocabulary))
    }

    /// Process-wide registry over the default vocabulary.
    /// Built on first use and kept until exit.
    pub fn global() -> Arc<PolicyRegistry> {
        let registry =
            GLOBAL.get_or_init(|| Arc::new(PolicyRegistry::with_vocabulary(default_vocabulary())));
        Arc::clone(registry)
    }

    pub fn resolver(&self) -> &PolicyResolver {
        &self.resolver
    }

    pub fn get_or_create(&self, decl: &MarkupDeclaration) -> Result<Arc<TagPolicy>> {
        let key = normalize(decl)?;
        if let Some(hit) = self.policies.get(&key) {
            return Ok(Arc::clone(hit.value()));
        }

        let entry = self.policies.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(key = %key, "markup policy created");
            Arc::new(self.resolver.build(key))
        });
        Ok(Arc::clone(entry.value()))
    }

    pub fn get(&self, key: &PolicyKey) -> Option<Arc<TagPolicy>> {
        self.policies.get(key).map(|r| Arc::clone(r.value()))
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
