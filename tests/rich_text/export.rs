//! Export tests for the Rich Text format (AST → JSON).

use crate::common::*;
use serde_json::json;
use slack_gfm::ast::nodes::{Block, Inline, Link};
use slack_gfm::{render_rich_text, ConvertError, RichTextSerializer};

#[test]
fn document_wraps_in_rich_text_block() {
    let value = render_rich_text(&doc(vec![para(vec![text("hi")])])).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "rich_text",
            "elements": [{
                "type": "rich_text_section",
                "elements": [{"type": "text", "text": "hi"}]
            }]
        })
    );
}

#[test]
fn style_chain_collapses_onto_leaves() {
    let value = render_rich_text(&doc(vec![para(vec![strike(vec![
        bold(vec![text("a")]),
        text("b"),
    ])])]))
    .unwrap();
    assert_eq!(
        value["elements"][0]["elements"],
        json!([
            {"type": "text", "text": "a", "style": {"bold": true, "strike": true}},
            {"type": "text", "text": "b", "style": {"strike": true}}
        ])
    );
}

#[test]
fn labeled_and_bare_links() {
    let value = render_rich_text(&doc(vec![para(vec![
        link("https://a.example", Some("a")),
        link("https://b.example", None),
    ])]))
    .unwrap();
    assert_eq!(
        value["elements"][0]["elements"],
        json!([
            {"type": "link", "url": "https://a.example", "text": "a"},
            {"type": "link", "url": "https://b.example"}
        ])
    );
}

#[test]
fn styled_link_carries_flags() {
    let value = render_rich_text(&doc(vec![para(vec![bold(vec![link(
        "https://x.example",
        Some("x"),
    )])])]))
    .unwrap();
    assert_eq!(
        value["elements"][0]["elements"][0],
        json!({
            "type": "link",
            "url": "https://x.example",
            "text": "x",
            "style": {"bold": true}
        })
    );
}

#[test]
fn empty_link_url_is_render_error_in_strict_serializer() {
    let document = doc(vec![para(vec![Inline::Link(Link {
        url: String::new(),
        children: vec![text("broken")],
    })])]);
    let err = RichTextSerializer::new().serialize(&document).unwrap_err();
    assert!(matches!(err, ConvertError::Render { .. }));
}

#[test]
fn horizontal_rule_degrades_to_text_section() {
    let value = render_rich_text(&doc(vec![Block::HorizontalRule])).unwrap();
    assert_eq!(
        value["elements"][0],
        json!({
            "type": "rich_text_section",
            "elements": [{"type": "text", "text": "---"}]
        })
    );
}

#[test]
fn table_degrades_to_monospace_preformatted() {
    use slack_gfm::ast::nodes::Table;
    let value = render_rich_text(&doc(vec![Block::Table(Table {
        header: vec![vec![text("name")], vec![text("n")]],
        rows: vec![vec![vec![text("alpha")], vec![text("1")]]],
        alignments: vec![None, None],
    })]))
    .unwrap();
    let rendered = value["elements"][0]["elements"][0]["text"].as_str().unwrap();
    assert_eq!(rendered, "name   n\n-----  -\nalpha  1");
    assert_eq!(value["elements"][0]["type"], json!("rich_text_preformatted"));
}
