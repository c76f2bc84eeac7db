//! Round-trip tests: AST → GFM → AST is a fixed point for everything GFM
//! can express, and Rich Text → GFM → Rich Text preserves the payload.

use crate::common::*;
use serde_json::json;
use slack_gfm::ast::nodes::{
    Alignment, Block, Broadcast, BroadcastRange, DateTimestamp, Document, Inline, Table,
};
use slack_gfm::{gfm_to_rich_text, parse_gfm, render_gfm, rich_text_to_gfm, ConvertOptions};

fn assert_fixed_point(document: Document) {
    let gfm = render_gfm(&document).expect("render should succeed");
    let reparsed = parse_gfm(&gfm).expect("reparse should succeed");
    assert_eq!(document, reparsed, "not a fixed point; rendered:\n{gfm}");
}

#[test]
fn paragraphs_and_styles() {
    assert_fixed_point(doc(vec![para(vec![text("plain words")])]));
    assert_fixed_point(doc(vec![para(vec![bold(vec![text("b")])])]));
    assert_fixed_point(doc(vec![para(vec![italic(vec![text("i")])])]));
    assert_fixed_point(doc(vec![para(vec![strike(vec![text("s")])])]));
    assert_fixed_point(doc(vec![para(vec![code("let x = 1;")])]));
}

#[test]
fn nested_styles_keep_their_nesting() {
    assert_fixed_point(doc(vec![para(vec![bold(vec![italic(vec![text(
        "bold italic",
    )])])])]));
    assert_fixed_point(doc(vec![para(vec![italic(vec![bold(vec![text(
        "italic bold",
    )])])])]));
    assert_fixed_point(doc(vec![para(vec![strike(vec![bold(vec![text(
        "gone strong",
    )])])])]));
}

#[test]
fn block_constructs() {
    assert_fixed_point(doc(vec![heading(2, vec![text("Title")])]));
    assert_fixed_point(doc(vec![code_block("fn main() {}", Some("rust"))]));
    assert_fixed_point(doc(vec![code_block("line one\nline two", None)]));
    assert_fixed_point(doc(vec![Block::HorizontalRule]));
    assert_fixed_point(doc(vec![quote(vec![para(vec![text("wisdom")])])]));
    assert_fixed_point(doc(vec![quote(vec![
        para(vec![text("first")]),
        para(vec![text("second")]),
    ])]));
    assert_fixed_point(doc(vec![
        para(vec![text("before")]),
        para(vec![text("after")]),
    ]));
}

#[test]
fn lists_flat_and_nested() {
    assert_fixed_point(doc(vec![list(
        false,
        1,
        vec![item(vec![text("one")]), item(vec![text("two")])],
    )]));
    assert_fixed_point(doc(vec![list(
        true,
        3,
        vec![item(vec![text("three")]), item(vec![text("four")])],
    )]));

    let mut outer = item(vec![text("outer")]);
    outer
        .children
        .push(list(false, 1, vec![item(vec![text("inner")])]));
    assert_fixed_point(doc(vec![list(false, 1, vec![outer])]));
}

#[test]
fn links_and_mentions() {
    assert_fixed_point(doc(vec![para(vec![link(
        "https://example.com",
        Some("docs"),
    )])]));
    assert_fixed_point(doc(vec![para(vec![user("U1", None)])]));
    assert_fixed_point(doc(vec![para(vec![user("U1", Some("john"))])]));
    assert_fixed_point(doc(vec![para(vec![Inline::Broadcast(Broadcast {
        range: BroadcastRange::Here,
    })])]));
    assert_fixed_point(doc(vec![para(vec![Inline::DateTimestamp(DateTimestamp {
        timestamp: 1392734382,
        format: Some("{date_short}".into()),
        fallback: Some("Feb 18, 2014".into()),
    })])]));
}

#[test]
fn tables_round_trip() {
    assert_fixed_point(doc(vec![Block::Table(Table {
        header: vec![vec![text("name")], vec![text("count")]],
        rows: vec![
            vec![vec![text("alpha")], vec![text("1")]],
            vec![vec![text("beta")], vec![text("2")]],
        ],
        alignments: vec![Some(Alignment::Left), Some(Alignment::Right)],
    })]));
}

#[test]
fn rich_text_round_trip_with_mentions() {
    let original = json!({
        "type": "rich_text",
        "elements": [{
            "type": "rich_text_section",
            "elements": [
                {"type": "text", "text": "Hi "},
                {"type": "user", "user_id": "U1"}
            ]
        }]
    });
    let gfm = rich_text_to_gfm(&original, &ConvertOptions::default()).unwrap();
    assert_eq!(gfm, "Hi [U1](slack://user?id=U1)");
    let back = gfm_to_rich_text(&gfm, &ConvertOptions::default()).unwrap();
    assert_eq!(back, original);
}

#[test]
fn rich_text_round_trip_with_team_scoped_mentions() {
    let original = json!({
        "type": "rich_text",
        "elements": [{
            "type": "rich_text_section",
            "elements": [{"type": "user", "user_id": "U7"}]
        }]
    });
    let options = ConvertOptions {
        team_id: Some("T3".to_string()),
        ..ConvertOptions::default()
    };
    let gfm = rich_text_to_gfm(&original, &options).unwrap();
    assert!(gfm.contains("team=T3&id=U7"));
    // The name-less, team-scoped link still restores the bare mention.
    let back = gfm_to_rich_text(&gfm, &ConvertOptions::default()).unwrap();
    assert_eq!(back, original);
}
