//! Markup engines (text -> HTML).
//!
//! Engines are pure: no I/O, no shared state. Their output is untrusted and
//! always goes through the sanitizer before reaching a host.

pub mod markdown;
pub mod textile;

use std::collections::BTreeMap;
use std::sync::Arc;

use marksafe_core::error::{MarksafeError, Result};
use marksafe_core::Dialect;

pub use markdown::MarkdownEngine;
pub use textile::{TextileEngine, TextileOptions};

/// Converts markup in some dialect into (unsanitized) HTML.
pub trait MarkupEngine: Send + Sync {
    fn supports(&self, dialect: Dialect) -> bool;

    /// Fails with `UnsupportedDialect` for dialects it does not handle and
    /// `MarkupEngine` for input it cannot convert.
    fn convert(&self, text: &str, dialect: Dialect) -> Result<String>;
}

/// Registry of engines keyed by dialect.
#[derive(Default, Clone)]
pub struct EngineSet {
    engines: BTreeMap<Dialect, Arc<dyn MarkupEngine>>,
}

impl EngineSet {
    pub fn new() -> Self {
        Self {
            engines: BTreeMap::new(),
        }
    }

    /// Textile and Markdown engines with the given Textile options.
    pub fn standard(textile: TextileOptions) -> Self {
        let mut set = Self::new();
        set.register(Dialect::Textile, Arc::new(TextileEngine::new(textile)));
        set.register(Dialect::Markdown, Arc::new(MarkdownEngine::new()));
        set
    }

    pub fn register(&mut self, dialect: Dialect, engine: Arc<dyn MarkupEngine>) {
        self.engines.insert(dialect, engine);
    }

    pub fn registered_dialects(&self) -> Vec<Dialect> {
        self.engines.keys().copied().collect()
    }
}

impl MarkupEngine for EngineSet {
    fn supports(&self, dialect: Dialect) -> bool {
        self.engines.contains_key(&dialect)
    }

    fn convert(&self, text: &str, dialect: Dialect) -> Result<String> {
        let engine = self.engines.get(&dialect).ok_or_else(|| {
            MarksafeError::UnsupportedDialect(format!("no engine registered for {dialect}"))
        })?;
        engine.convert(text, dialect)
    }
}
