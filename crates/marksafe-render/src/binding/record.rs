use std::collections::HashMap;

use marksafe_core::Locale;

/// In-memory record: plain text per field, optionally per locale.
///
/// Base values and localized values live side by side; a localized read never
/// falls back to the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entity: String,
    base: HashMap<String, String>,
    localized: HashMap<(String, Locale), String>,
}

impl Record {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            base: HashMap::new(),
            localized: HashMap::new(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn write(&mut self, field: impl Into<String>, text: impl Into<String>) {
        self.base.insert(field.into(), text.into());
    }

    pub fn write_localized(
        &mut self,
        field: impl Into<String>,
        locale: &Locale,
        text: impl Into<String>,
    ) {
        self.localized
            .insert((field.into(), locale.clone()), text.into());
    }

    /// Stored text for `field`, from the base value when `locale` is `None`.
    pub fn raw(&self, field: &str, locale: Option<&Locale>) -> Option<&str> {
        match locale {
            None => self.base.get(field).map(String::as_str),
            Some(locale) => self
                .localized
                .get(&(field.to_string(), locale.clone()))
                .map(String::as_str),
        }
    }

    /// Locales that have a value for `field`.
    pub fn locales(&self, field: &str) -> Vec<&Locale> {
        let mut out: Vec<&Locale> = self
            .localized
            .keys()
            .filter(|(f, _)| f == field)
            .map(|(_, l)| l)
            .collect();
        out.sort();
        out
    }
}
