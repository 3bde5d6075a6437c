use std::sync::Arc;

use dashmap::DashMap;

use marksafe_core::error::{MarksafeError, Result};
use marksafe_core::{Dialect, Locale, MarkupValue, TagPolicy};

use super::record::Record;
use crate::policy::{MarkupDeclaration, PolicyRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FieldKey {
    entity: String,
    field: String,
}

impl FieldKey {
    fn new(entity: &str, field: &str) -> Self {
        Self {
            entity: entity.to_string(),
            field: field.to_string(),
        }
    }
}

/// Binding table: `(entity, field) -> policy`.
///
/// Written while models are declared, read on every field access.
pub struct FieldBindings {
    registry: Arc<PolicyRegistry>,
    bindings: DashMap<FieldKey, Arc<TagPolicy>>,
}

impl FieldBindings {
    pub fn new(registry: Arc<PolicyRegistry>) -> Self {
        Self {
            registry,
            bindings: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &Arc<PolicyRegistry> {
        &self.registry
    }

    /// Resolve `decl` once and bind it to every field in `fields`.
    pub fn declare<I, S>(
        &self,
        entity: &str,
        fields: I,
        decl: &MarkupDeclaration,
    ) -> Result<Arc<TagPolicy>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if entity.trim().is_empty() {
            return Err(MarksafeError::Configuration("entity name must not be empty".into()));
        }
        let fields: Vec<S> = fields.into_iter().collect();
        if fields.is_empty() {
            return Err(MarksafeError::Configuration(format!(
                "no fields given for entity {entity}"
            )));
        }
        if fields.iter().any(|f| f.as_ref().trim().is_empty()) {
            return Err(MarksafeError::Configuration(format!(
                "empty field name for entity {entity}"
            )));
        }

        let policy = self.registry.get_or_create(decl)?;

        for field in &fields {
            let field = field.as_ref();
            let previous = self
                .bindings
                .insert(FieldKey::new(entity, field), Arc::clone(&policy));
            match previous {
                Some(old) if !Arc::ptr_eq(&old, &policy) => tracing::debug!(
                    entity,
                    field,
                    from = %old.key(),
                    to = %policy.key(),
                    "markup field redeclared"
                ),
                _ => tracing::debug!(
                    entity,
                    field,
                    policy = %policy.key(),
                    "markup field declared"
                ),
            }
        }
        Ok(policy)
    }

    /// Same as `declare` with the dialect forced to Textile.
    pub fn declare_textile<I, S>(
        &self,
        entity: &str,
        fields: I,
        decl: &MarkupDeclaration,
    ) -> Result<Arc<TagPolicy>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.declare(entity, fields, &decl.clone().markup(Dialect::Textile.as_str()))
    }

    /// Same as `declare` with the dialect forced to Markdown.
    pub fn declare_markdown<I, S>(
        &self,
        entity: &str,
        fields: I,
        decl: &MarkupDeclaration,
    ) -> Result<Arc<TagPolicy>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.declare(entity, fields, &decl.clone().markup(Dialect::Markdown.as_str()))
    }

    pub fn policy_for(&self, entity: &str, field: &str) -> Option<Arc<TagPolicy>> {
        self.bindings
            .get(&FieldKey::new(entity, field))
            .map(|r| Arc::clone(r.value()))
    }

    pub fn is_declared(&self, entity: &str, field: &str) -> bool {
        self.bindings.contains_key(&FieldKey::new(entity, field))
    }

    /// Wrap text as it would be read from `entity.field`.
    pub fn wrap(&self, entity: &str, field: &str, text: impl Into<String>) -> MarkupValue {
        match self.policy_for(entity, field) {
            Some(policy) => MarkupValue::configured(text, policy),
            None => MarkupValue::plain(text),
        }
    }

    /// Read `field` from `record`, attaching the bound policy if any.
    pub fn read(
        &self,
        record: &Record,
        field: &str,
        locale: Option<&Locale>,
    ) -> Option<MarkupValue> {
        let text = record.raw(field, locale)?;
        Some(self.wrap(record.entity(), field, text))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
