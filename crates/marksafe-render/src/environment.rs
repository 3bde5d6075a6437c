//! Host-facing wiring of registry, bindings and renderer.
//!
//! Build one environment at startup (from code or from a config file), declare
//! markup fields on it, then share it via `Arc` and call `render_markup` at
//! presentation time.

use std::sync::Arc;

use marksafe_core::error::{MarksafeError, Result};
use marksafe_core::{Locale, MarkupValue, Rendered, TagPolicy};

use crate::binding::{FieldBindings, Record};
use crate::config::MarkupConfig;
use crate::engine::TextileOptions;
use crate::policy::{MarkupDeclaration, PolicyRegistry};
use crate::render::MarkupRenderer;

#[derive(Clone)]
pub struct MarkupEnvironment {
    bindings: Arc<FieldBindings>,
    renderer: MarkupRenderer,
}

impl MarkupEnvironment {
    pub fn new(registry: Arc<PolicyRegistry>, renderer: MarkupRenderer) -> Self {
        Self {
            bindings: Arc::new(FieldBindings::new(registry)),
            renderer,
        }
    }

    /// Standard renderer with a private registry over its sanitizer's vocabulary.
    pub fn standard(textile: TextileOptions) -> Self {
        let renderer = MarkupRenderer::standard(textile);
        let registry = PolicyRegistry::with_vocabulary(renderer.sanitizer().default_vocabulary());
        Self::new(Arc::new(registry), renderer)
    }

    /// Standard renderer sharing the process-wide registry.
    pub fn global(textile: TextileOptions) -> Self {
        Self::new(PolicyRegistry::global(), MarkupRenderer::standard(textile))
    }

    /// Build from config and declare every listed field.
    /// Returns Result so a bad declaration stops startup instead of panicking.
    pub fn from_config(cfg: &MarkupConfig) -> Result<Self> {
        let env = Self::standard(cfg.render.textile_options());
        for entity in &cfg.entities {
            for field in &entity.fields {
                env.declare_markup_field(&entity.name, &field.names, &field.declaration())
                    .map_err(|e| {
                        MarksafeError::Configuration(format!(
                            "declaration failed (entity={}, fields={:?}): {e}",
                            entity.name, field.names
                        ))
                    })?;
            }
        }
        tracing::debug!(
            fields = env.bindings.len(),
            policies = env.bindings.registry().len(),
            "markup environment ready"
        );
        Ok(env)
    }

    pub fn bindings(&self) -> &Arc<FieldBindings> {
        &self.bindings
    }

    pub fn renderer(&self) -> &MarkupRenderer {
        &self.renderer
    }

    pub fn declare_markup_field<I, S>(
        &self,
        entity: &str,
        fields: I,
        decl: &MarkupDeclaration,
    ) -> Result<Arc<TagPolicy>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.bindings.declare(entity, fields, decl)
    }

    pub fn render_markup(&self, value: &MarkupValue) -> Result<Rendered> {
        self.renderer.render(value)
    }

    /// Read and render in one step. `None` when the record has no such value.
    pub fn render_field(
        &self,
        record: &Record,
        field: &str,
        locale: Option<&Locale>,
    ) -> Result<Option<Rendered>> {
        match self.bindings.read(record, field, locale) {
            Some(value) => self.renderer.render(&value).map(Some),
            None => Ok(None),
        }
    }
}
