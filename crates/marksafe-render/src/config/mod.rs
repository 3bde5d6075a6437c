//! Declaration config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use marksafe_core::error::{MarksafeError, Result};

pub use schema::{EntityConfig, FieldConfig, MarkupConfig, RenderSection, Tokens};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<MarkupConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        MarksafeError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MarkupConfig> {
    let cfg: MarkupConfig = serde_yaml::from_str(s)
        .map_err(|e| MarksafeError::Configuration(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
