use serde::Deserialize;

use marksafe_core::error::{MarksafeError, Result};

use crate::engine::textile::{TextileOptions, DEFAULT_MAX_INPUT_BYTES};
use crate::policy::MarkupDeclaration;

const MAX_INPUT_BYTES_CEILING: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkupConfig {
    pub version: u32,

    #[serde(default)]
    pub render: RenderSection,

    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

impl MarkupConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MarksafeError::UnsupportedVersion);
        }

        self.render.validate()?;

        for entity in &self.entities {
            entity.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSection {
    #[serde(default)]
    pub span_caps: bool,

    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            span_caps: false,
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl RenderSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_INPUT_BYTES_CEILING).contains(&self.max_input_bytes) {
            return Err(MarksafeError::Configuration(format!(
                "render.max_input_bytes must be between 1 and {MAX_INPUT_BYTES_CEILING}"
            )));
        }
        Ok(())
    }

    pub fn textile_options(&self) -> TextileOptions {
        TextileOptions {
            span_caps: self.span_caps,
            max_input_bytes: self.max_input_bytes,
        }
    }
}

fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl EntityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MarksafeError::Configuration("entities[].name must not be empty".into()));
        }
        for field in &self.fields {
            if field.names.is_empty() {
                return Err(MarksafeError::Configuration(format!(
                    "entity {}: fields[].names must not be empty",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// One declaration applied to one or more fields.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub names: Vec<String>,
    #[serde(default)]
    pub markup: Option<String>,
    #[serde(default)]
    pub allow: Option<Tokens>,
    #[serde(default)]
    pub deny: Option<Tokens>,
}

impl FieldConfig {
    pub fn declaration(&self) -> MarkupDeclaration {
        MarkupDeclaration {
            markup: self.markup.clone(),
            allow: self.allow.clone().map(Tokens::into_vec),
            deny: self.deny.clone().map(Tokens::into_vec).unwrap_or_default(),
        }
    }
}

/// `allow: emphasis` or `allow: [emphasis, links]`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Tokens {
    One(String),
    Many(Vec<String>),
}

impl Tokens {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Tokens::One(t) => vec![t],
            Tokens::Many(ts) => ts,
        }
    }
}
