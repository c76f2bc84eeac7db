//! Round-trip tests: parsing Rich Text JSON and re-rendering it yields a
//! structurally equal value for every payload the parser accepts (up to
//! the canonical style-flag collapse).

use serde_json::{json, Value};
use slack_gfm::{parse_rich_text, render_rich_text};

fn assert_fixed_point(value: Value) {
    let doc = parse_rich_text(&value).expect("parse should succeed");
    let rendered = render_rich_text(&doc).expect("render should succeed");
    assert_eq!(rendered, value);
}

fn block(element: Value) -> Value {
    json!({"type": "rich_text", "elements": [element]})
}

#[test]
fn plain_and_styled_sections() {
    assert_fixed_point(block(json!({
        "type": "rich_text_section",
        "elements": [{"type": "text", "text": "hello world"}]
    })));
    assert_fixed_point(block(json!({
        "type": "rich_text_section",
        "elements": [
            {"type": "text", "text": "a", "style": {"bold": true}},
            {"type": "text", "text": "b", "style": {"italic": true, "strike": true}},
            {"type": "text", "text": "c", "style": {"code": true}},
            {"type": "text", "text": "d", "style": {"bold": true, "code": true}}
        ]
    })));
}

#[test]
fn newlines_inside_sections_are_preserved() {
    assert_fixed_point(block(json!({
        "type": "rich_text_section",
        "elements": [{"type": "text", "text": "line one\nline two"}]
    })));
}

#[test]
fn links_with_styles_and_labels() {
    assert_fixed_point(block(json!({
        "type": "rich_text_section",
        "elements": [
            {"type": "link", "url": "https://example.com", "text": "docs"},
            {"type": "text", "text": " "},
            {"type": "link", "url": "https://bare.example"},
            {"type": "text", "text": " "},
            {"type": "link", "url": "https://styled.example", "text": "s", "style": {"bold": true}}
        ]
    })));
}

#[test]
fn mentions_broadcasts_emoji_dates() {
    assert_fixed_point(block(json!({
        "type": "rich_text_section",
        "elements": [
            {"type": "user", "user_id": "U1"},
            {"type": "channel", "channel_id": "C2"},
            {"type": "usergroup", "usergroup_id": "S3"},
            {"type": "broadcast", "range": "everyone"},
            {"type": "emoji", "name": "tada", "unicode": "1f389"},
            {"type": "date", "timestamp": 1700000000, "format": "{date}", "fallback": "then"}
        ]
    })));
}

#[test]
fn preformatted_quote_and_lists() {
    assert_fixed_point(block(json!({
        "type": "rich_text_preformatted",
        "elements": [{"type": "text", "text": "fn main() {}"}]
    })));
    assert_fixed_point(block(json!({
        "type": "rich_text_quote",
        "elements": [
            {"type": "text", "text": "quoted "},
            {"type": "user", "user_id": "U1"}
        ]
    })));
    assert_fixed_point(block(json!({
        "type": "rich_text_list",
        "style": "bullet",
        "elements": [
            {"type": "rich_text_section", "elements": [{"type": "text", "text": "one"}]},
            {"type": "rich_text_section", "elements": [{"type": "text", "text": "two"}]}
        ]
    })));
    assert_fixed_point(block(json!({
        "type": "rich_text_list",
        "style": "ordered",
        "elements": [
            {"type": "rich_text_section", "elements": [{"type": "text", "text": "one"}]}
        ]
    })));
}

#[test]
fn multi_block_document() {
    assert_fixed_point(json!({
        "type": "rich_text",
        "elements": [
            {
                "type": "rich_text_section",
                "elements": [{"type": "text", "text": "intro"}]
            },
            {
                "type": "rich_text_preformatted",
                "elements": [{"type": "text", "text": "code here"}]
            },
            {
                "type": "rich_text_section",
                "elements": [{"type": "text", "text": "outro"}]
            }
        ]
    }));
}
