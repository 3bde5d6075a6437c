#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use marksafe_core::error::ErrorCode;
use marksafe_core::Dialect;
use marksafe_render::config::{self, Tokens};
use marksafe_render::MarkupEnvironment;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
entities:
  - name: "post"
    fields:
      - names: [body]
        markup: textile
        alow: [emphasis] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIGURATION");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(cfg.entities.is_empty());
    assert!(!cfg.render.span_caps);
}

#[test]
fn wrong_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::UnsupportedVersion);
}

#[test]
fn render_limits_are_validated() {
    let bad = r#"
version: 1
render:
  max_input_bytes: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Configuration);
}

#[test]
fn single_token_or_list() {
    let s = r#"
version: 1
entities:
  - name: post
    fields:
      - names: [title, description]
        markup: textile
        allow: emphasis
      - names: [body]
        markup: textile
        deny: [images, links]
"#;
    let cfg = config::load_from_str(s).expect("must parse");
    let fields = &cfg.entities[0].fields;
    assert_eq!(fields[0].allow, Some(Tokens::One("emphasis".into())));
    assert_eq!(fields[0].declaration().allow, Some(vec!["emphasis".to_string()]));
    assert_eq!(fields[1].declaration().deny, vec!["images".to_string(), "links".to_string()]);
    assert_eq!(fields[1].declaration().allow, None);
}

#[test]
fn environment_from_config_declares_fields() {
    let s = r#"
version: 1
render:
  span_caps: false
  max_input_bytes: 4096
entities:
  - name: post
    fields:
      - names: [title, description]
        markup: textile
        allow: [emphasis, links]
      - names: [notes]
        markup: markdown
  - name: comment
    fields:
      - names: [body]
        markup: textile
        allow: [links, emphasis]
"#;
    let cfg = config::load_from_str(s).unwrap();
    let env = MarkupEnvironment::from_config(&cfg).unwrap();

    let b = env.bindings();
    assert_eq!(b.len(), 4);
    assert_eq!(b.registry().len(), 2);
    assert_eq!(b.policy_for("post", "notes").unwrap().dialect(), Dialect::Markdown);
    assert!(std::sync::Arc::ptr_eq(
        &b.policy_for("post", "title").unwrap(),
        &b.policy_for("comment", "body").unwrap(),
    ));
}

#[test]
fn bad_declaration_in_config_fails_startup() {
    let s = r#"
version: 1
entities:
  - name: post
    fields:
      - names: [body]
        allow: [emphasis]
"#;
    let cfg = config::load_from_str(s).unwrap();
    let err = MarkupEnvironment::from_config(&cfg).err().expect("must fail");
    assert_eq!(err.code(), ErrorCode::Configuration);
    assert!(err.to_string().contains("must define markup option"));
}

#[test]
fn missing_file_is_internal_error() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Internal);
}
