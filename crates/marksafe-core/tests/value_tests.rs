#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeSet;
use std::sync::Arc;

use marksafe_core::{Allow, Dialect, Locale, MarkupValue, PolicyKey, Rendered, SafeHtml, TagPolicy};

fn policy() -> Arc<TagPolicy> {
    let key = PolicyKey::new(Dialect::Textile, Allow::All, BTreeSet::new());
    Arc::new(TagPolicy::new(key, BTreeSet::new()))
}

#[test]
fn locale_validation() {
    assert_eq!(Locale::new("fr-FR").unwrap().as_str(), "fr-FR");
    assert!(Locale::new("en").is_ok());
    assert!(Locale::new("zh_Hant").is_ok());

    assert!(Locale::new("").is_err());
    assert!(Locale::new("fr--FR").is_err());
    assert!(Locale::new("fr FR").is_err());
    assert!(Locale::new("x".repeat(40)).is_err());
}

#[test]
fn plain_value_has_no_policy() {
    let v = MarkupValue::from("hello");
    assert!(v.policy().is_none());
    assert_eq!(v.text(), "hello");
}

#[test]
fn configured_value_shares_policy() {
    let p = policy();
    let v = MarkupValue::configured("_hi_", Arc::clone(&p));
    assert!(Arc::ptr_eq(v.policy().unwrap(), &p));
    assert_eq!(v.into_text(), "_hi_");
}

#[test]
fn blank_detection() {
    assert!(MarkupValue::plain("").is_blank());
    assert!(MarkupValue::configured(" \n\t", policy()).is_blank());
    assert!(!MarkupValue::plain(" x ").is_blank());
}

#[test]
fn rendered_safety_flag() {
    let safe = Rendered::Markup(SafeHtml::assume_sanitized("<em>x</em>".into()));
    assert!(safe.is_safe());
    assert_eq!(safe.as_str(), "<em>x</em>");

    let raw = Rendered::Raw("<b>".into());
    assert!(!raw.is_safe());
    assert_eq!(raw.to_string(), "<b>");
}
