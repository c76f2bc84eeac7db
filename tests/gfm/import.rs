//! Import tests for the GFM format (GFM → AST, GFM → Rich Text).

use crate::common::*;
use serde_json::json;
use slack_gfm::ast::nodes::{Alignment, Block, Inline};
use slack_gfm::{gfm_to_rich_text, parse_gfm, ConvertOptions};

#[test]
fn block_structure() {
    let gfm = "# Title\n\nBody.\n\n---\n\n> quoted\n\n- a\n- b";
    let doc = parse_gfm(gfm).unwrap();
    assert_eq!(doc.blocks.len(), 5);
    assert!(matches!(doc.blocks[0], Block::Heading(_)));
    assert!(matches!(doc.blocks[1], Block::Paragraph(_)));
    assert!(matches!(doc.blocks[2], Block::HorizontalRule));
    assert!(matches!(doc.blocks[3], Block::Quote(_)));
    assert!(matches!(doc.blocks[4], Block::List(_)));
}

#[test]
fn emphasis_maps_to_wrappers() {
    let doc = parse_gfm("**bold** *italic* ~~gone~~ `code`").unwrap();
    let Block::Paragraph(p) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(p.children[0], bold(vec![text("bold")]));
    assert_eq!(p.children[2], italic(vec![text("italic")]));
    assert_eq!(p.children[4], strike(vec![text("gone")]));
    assert_eq!(p.children[6], code("code"));
}

#[test]
fn deep_links_in_any_parameter_order() {
    let doc = parse_gfm("[@john](slack://user?name=john&id=U1&team=T9)").unwrap();
    let Block::Paragraph(p) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(p.children[0], user("U1", Some("john")));
}

#[test]
fn ordinary_links_stay_links() {
    let doc = parse_gfm("[docs](https://docs.rs)").unwrap();
    let Block::Paragraph(p) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(p.children[0], link("https://docs.rs", Some("docs")));
}

#[test]
fn table_with_alignments() {
    let doc = parse_gfm("| l | r |\n|:--|--:|\n| 1 | 2 |").unwrap();
    let Block::Table(table) = &doc.blocks[0] else {
        panic!("expected table");
    };
    assert_eq!(table.header, vec![vec![text("l")], vec![text("r")]]);
    assert_eq!(table.rows, vec![vec![vec![text("1")], vec![text("2")]]]);
    assert_eq!(
        table.alignments,
        vec![Some(Alignment::Left), Some(Alignment::Right)]
    );
}

#[test]
fn gfm_to_rich_text_basics() {
    let value = gfm_to_rich_text("**Hello**", &ConvertOptions::default()).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "rich_text",
            "elements": [{
                "type": "rich_text_section",
                "elements": [{"type": "text", "text": "Hello", "style": {"bold": true}}]
            }]
        })
    );
}

#[test]
fn gfm_to_rich_text_restores_mentions() {
    let value = gfm_to_rich_text(
        "[@john](slack://user?id=U123ABC&name=john)",
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(
        value["elements"][0]["elements"][0],
        json!({"type": "user", "user_id": "U123ABC"})
    );
}

#[test]
fn code_block_to_preformatted_without_trailing_newline() {
    let value = gfm_to_rich_text("```\nxyz\n```", &ConvertOptions::default()).unwrap();
    assert_eq!(
        value["elements"][0],
        json!({
            "type": "rich_text_preformatted",
            "elements": [{"type": "text", "text": "xyz"}]
        })
    );
}

#[test]
fn unknown_html_degrades_without_error() {
    let doc = parse_gfm("<marquee>old web</marquee>").unwrap();
    let Block::Paragraph(p) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    match &p.children[0] {
        Inline::Text(t) => assert!(t.content.contains("marquee")),
        other => panic!("expected raw text, got {other:?}"),
    }
}
