#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use common::{compact, has_any_tag, has_tag};
use marksafe_core::error::{ErrorCode, MarksafeError, Result};
use marksafe_core::{Dialect, MarkupValue, Rendered};
use marksafe_render::engine::{EngineSet, MarkupEngine, TextileEngine, TextileOptions};
use marksafe_render::sanitize::{AmmoniaSanitizer, NofollowLinks};
use marksafe_render::{MarkupDeclaration, MarkupEnvironment, MarkupRenderer};
use pretty_assertions::assert_eq;

const SCRIPT: &str = "I am <script>function();</script> a nice person";

/// Environment with one `post.body` field declared with `decl`.
fn env_with(decl: MarkupDeclaration) -> MarkupEnvironment {
    let env = MarkupEnvironment::standard(TextileOptions::default());
    env.declare_markup_field("post", ["body"], &decl).unwrap();
    env
}

fn render(env: &MarkupEnvironment, text: &str) -> String {
    let value = env.bindings().wrap("post", "body", text);
    let out = env.render_markup(&value).unwrap();
    assert!(out.is_safe());
    out.into_string()
}

fn assert_sanitizes_bad_html(env: &MarkupEnvironment) {
    let out = render(env, SCRIPT);
    assert!(!has_tag(&out, "script"));
    assert!(out.contains("I am function(); a nice person"));

    let out = render(env, "A sentence with a LOUD work");
    assert!(!has_tag(&out, "span"));
    assert!(!out.contains("class=\"caps\""));
}

#[test]
fn emphasis_only() {
    let env = env_with(MarkupDeclaration::textile().allow(["emphasis"]));
    assert_sanitizes_bad_html(&env);

    assert!(has_tag(&render(&env, "some _nice_ text"), "em"));
    assert!(!has_any_tag(&render(&env, "some *strong* text"), &["strong", "b"]));
    assert!(!has_any_tag(&render(&env, "Paragraph 1\n\nParagraph 2"), &["p", "br"]));
    assert!(!has_any_tag(&render(&env, "* this\n* is a\n* list"), &["ul", "li"]));
    assert!(!has_tag(&render(&env, "This is an !/image.jpg!"), "img"));
    assert!(!has_tag(&render(&env, "this is a \"link\":http://example.com"), "a"));
    assert!(!has_any_tag(&render(&env, "<sup>Arbitrary</sup> <div>tags</div>"), &["sup", "div"]));

    assert_eq!(render(&env, "My name is \"James\""), "My name is \u{201c}James\u{201d}");
    assert_eq!(render(&env, "some _nice_ text"), "some <em>nice</em> text");
}

#[test]
fn all_mixed_with_emphasis_is_emphasis_only() {
    let env = env_with(MarkupDeclaration::textile().allow(["all", "emphasis"]));
    let out = render(&env, "*strong* _em_ !/i.jpg!");
    assert!(!has_any_tag(&out, &["strong", "img", "p"]));
    assert_eq!(out, "strong <em>em</em>");

    let policy = env.bindings().policy_for("post", "body").unwrap();
    let direct = env.renderer().render_with("*strong* _em_ !/i.jpg!", &policy).unwrap();
    assert_eq!(direct.as_str(), out);
}

#[test]
fn links_only() {
    let env = env_with(MarkupDeclaration::textile().allow(["links"]));
    assert_sanitizes_bad_html(&env);

    assert!(!has_tag(&render(&env, "some _nice_ text"), "em"));
    assert!(!has_any_tag(&render(&env, "some *strong* text"), &["strong", "b"]));
    assert!(!has_any_tag(&render(&env, "Paragraph 1\n\nParagraph 2"), &["p", "br"]));
    assert!(!has_tag(&render(&env, "This is an !/image.jpg!"), "img"));
    assert!(!has_any_tag(&render(&env, "<sup>Arbitrary</sup> <div>tags</div>"), &["sup", "div"]));

    assert_eq!(
        render(&env, "this is a \"link\":http://example.com"),
        "this is a <a href=\"http://example.com\" rel=\"nofollow\">link</a>"
    );
}

#[test]
fn emphasis_and_links() {
    let env = env_with(MarkupDeclaration::textile().allow(["emphasis", "links"]));
    assert_sanitizes_bad_html(&env);

    assert!(has_tag(&render(&env, "some _nice_ text"), "em"));
    assert!(!has_any_tag(&render(&env, "some *strong* text"), &["strong", "b"]));
    assert!(!has_any_tag(&render(&env, "* this\n* is a\n* list"), &["ul", "li"]));
    assert!(!has_tag(&render(&env, "This is an !/image.jpg!"), "img"));

    let out = render(&env, "\"This\":http://example.com is _great_");
    assert_eq!(
        out,
        "<a href=\"http://example.com\" rel=\"nofollow\">This</a> is <em>great</em>"
    );
}

#[test]
fn everything_but_images() {
    let env = env_with(MarkupDeclaration::textile().deny(["images"]));
    assert_sanitizes_bad_html(&env);

    assert!(has_tag(&render(&env, "some _nice_ text"), "em"));
    assert!(has_tag(&render(&env, "some *strong* text"), "strong"));
    assert!(!has_tag(&render(&env, "This is an !/image.jpg!"), "img"));
    assert_eq!(compact(&render(&env, "Some\n\ntext")), "<p>Some</p><p>text</p>");
    assert_eq!(
        compact(&render(&env, "* this\n* is a\n* list")),
        "<ul><li>this</li><li>is a</li><li>list</li></ul>"
    );

    let link = render(&env, "this is a \"link\":http://example.com");
    assert!(link.contains("<a href=\"http://example.com\" rel=\"nofollow\">link</a>"));

    let mixed = render(&env, "Some <span>arbitrary</span> _mixed_ <a href='url'>tags</a>.");
    assert!(mixed.contains("<span>arbitrary</span>"));
    assert!(mixed.contains("<em>mixed</em>"));
    assert!(mixed.contains("<a href=\"url\" rel=\"nofollow\">tags</a>"));
}

#[test]
fn full_markup() {
    let env = env_with(MarkupDeclaration::textile());
    assert_sanitizes_bad_html(&env);

    assert!(has_tag(&render(&env, "some _nice_ text"), "em"));
    assert!(has_tag(&render(&env, "some *strong* text"), "strong"));
    assert!(has_tag(&render(&env, "This is an !/image.jpg!"), "img"));
    assert!(has_tag(&render(&env, "this is a \"link\":http://example.com"), "a"));
    assert_eq!(render(&env, "My name is \"James\""), "<p>My name is \u{201c}James\u{201d}</p>");
    assert_eq!(
        render(&env, SCRIPT),
        "<p>I am function(); a nice person</p>"
    );
}

#[test]
fn markdown_field() {
    let env = env_with(MarkupDeclaration::markdown().allow(["emphasis", "links"]));
    assert_eq!(render(&env, "some _nice_ text"), "some <em>nice</em> text");
    assert_eq!(
        render(&env, "this is a [link](http://example.com)"),
        "this is a <a href=\"http://example.com\" rel=\"nofollow\">link</a>"
    );
    let out = render(&env, SCRIPT);
    assert!(!has_tag(&out, "script"));
    assert!(out.contains("a nice person"));
}

#[test]
fn plain_values_pass_through_unchanged() {
    let env = env_with(MarkupDeclaration::textile());
    for text in ["_hello_ <script>x</script>", "  padded  ", "a & b"] {
        let out = env.render_markup(&MarkupValue::from(text)).unwrap();
        assert_eq!(out, Rendered::Raw(text.to_string()));
    }

    let undeclared = env.bindings().wrap("post", "title", "*not* rendered");
    assert_eq!(
        env.render_markup(&undeclared).unwrap().as_str(),
        "*not* rendered"
    );
}

#[test]
fn blank_input_is_returned_as_is() {
    let env = env_with(MarkupDeclaration::textile());
    for text in ["", "   ", "\n\n"] {
        let value = env.bindings().wrap("post", "body", text);
        assert_eq!(env.render_markup(&value).unwrap(), Rendered::Raw(text.to_string()));
    }
}

struct BrokenEngine;

impl MarkupEngine for BrokenEngine {
    fn supports(&self, _dialect: Dialect) -> bool {
        true
    }

    fn convert(&self, _text: &str, _dialect: Dialect) -> Result<String> {
        Err(MarksafeError::MarkupEngine("unbalanced input".into()))
    }
}

fn renderer_with(engine: Arc<dyn MarkupEngine>) -> MarkupRenderer {
    MarkupRenderer::new(engine, Arc::new(AmmoniaSanitizer::new()), Arc::new(NofollowLinks::new()))
}

#[test]
fn engine_failure_propagates() {
    let env = env_with(MarkupDeclaration::textile());
    let value = env.bindings().wrap("post", "body", "text");

    let err = renderer_with(Arc::new(BrokenEngine))
        .render(&value)
        .expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::MarkupEngine);
}

#[test]
fn missing_engine_is_unsupported_dialect() {
    let env = env_with(MarkupDeclaration::markdown());
    let value = env.bindings().wrap("post", "body", "text");

    let mut engines = EngineSet::new();
    engines.register(Dialect::Textile, Arc::new(TextileEngine::default()));
    assert_eq!(engines.registered_dialects(), vec![Dialect::Textile]);

    let err = renderer_with(Arc::new(engines))
        .render(&value)
        .expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::UnsupportedDialect);
}

#[test]
fn links_are_not_marked_when_anchors_are_denied() {
    let env = env_with(MarkupDeclaration::textile().deny(["links"]));
    let out = render(&env, "this is a \"link\":http://example.com");
    assert!(!has_tag(&out, "a"));
    assert!(!out.contains("nofollow"));
    assert_eq!(out, "<p>this is a link</p>");
}
