//! Export tests for the GFM format (AST / Rich Text → GFM).

use crate::common::*;
use serde_json::json;
use slack_gfm::ast::nodes::{Broadcast, BroadcastRange, DateTimestamp, Emoji, Inline};
use slack_gfm::{render_gfm, rich_text_to_gfm, ConvertOptions, GfmOptions, GfmSerializer};

#[test]
fn rich_text_with_mention_and_no_team() {
    let rich_text = json!({
        "type": "rich_text",
        "elements": [{
            "type": "rich_text_section",
            "elements": [
                {"type": "text", "text": "Hi "},
                {"type": "user", "user_id": "U1"}
            ]
        }]
    });
    let gfm = rich_text_to_gfm(&rich_text, &ConvertOptions::default()).unwrap();
    assert_eq!(gfm, "Hi [U1](slack://user?id=U1)");
}

#[test]
fn mapped_mention_with_team_id() {
    let rich_text = json!({
        "type": "rich_text",
        "elements": [{
            "type": "rich_text_section",
            "elements": [{"type": "user", "user_id": "U1"}]
        }]
    });
    let options = ConvertOptions {
        team_id: Some("T9".to_string()),
        user_map: [("U1".to_string(), "john".to_string())].into(),
        ..ConvertOptions::default()
    };
    let gfm = rich_text_to_gfm(&rich_text, &options).unwrap();
    assert_eq!(gfm, "[@john](slack://user?team=T9&id=U1&name=john)");
}

#[test]
fn team_id_always_pairs_with_id() {
    let document = doc(vec![para(vec![user("U1", None)])]);

    let with_team = GfmSerializer::new(GfmOptions {
        team_id: Some("T9".into()),
        lenient: false,
    })
    .serialize(&document)
    .unwrap();
    assert!(with_team.contains("team=T9&id=U1"));

    let without_team = render_gfm(&document).unwrap();
    assert!(without_team.contains("id=U1"));
    assert!(!without_team.contains("team="));
}

#[test]
fn preformatted_trailing_newline_renders_once() {
    let rich_text = json!({
        "type": "rich_text",
        "elements": [{
            "type": "rich_text_preformatted",
            "elements": [{"type": "text", "text": "xyz\n"}]
        }]
    });
    let gfm = rich_text_to_gfm(&rich_text, &ConvertOptions::default()).unwrap();
    assert_eq!(gfm, "```\nxyz\n```");
}

#[test]
fn preformatted_urls_lose_their_brackets() {
    let rich_text = json!({
        "type": "rich_text",
        "elements": [{
            "type": "rich_text_preformatted",
            "elements": [{"type": "text", "text": "fetch <https://example.com>"}]
        }]
    });
    let gfm = rich_text_to_gfm(&rich_text, &ConvertOptions::default()).unwrap();
    assert_eq!(gfm, "```\nfetch https://example.com\n```");
    assert!(!gfm.contains('<'));
}

#[test]
fn quote_and_list_render_shapes() {
    let rich_text = json!({
        "type": "rich_text",
        "elements": [
            {
                "type": "rich_text_quote",
                "elements": [{"type": "text", "text": "wise"}]
            },
            {
                "type": "rich_text_list",
                "style": "ordered",
                "elements": [
                    {"type": "rich_text_section", "elements": [{"type": "text", "text": "one"}]},
                    {"type": "rich_text_section", "elements": [{"type": "text", "text": "two"}]}
                ]
            }
        ]
    });
    let gfm = rich_text_to_gfm(&rich_text, &ConvertOptions::default()).unwrap();
    assert_eq!(gfm, "> wise\n\n1. one\n2. two");
}

#[test]
fn broadcast_emoji_and_date() {
    let document = doc(vec![para(vec![
        Inline::Broadcast(Broadcast {
            range: BroadcastRange::Everyone,
        }),
        text(" "),
        Inline::Emoji(Emoji {
            name: "wave".into(),
            unicode: Some("👋".into()),
        }),
        text(" "),
        Inline::DateTimestamp(DateTimestamp {
            timestamp: 1700000000,
            format: None,
            fallback: None,
        }),
    ])]);
    let gfm = render_gfm(&document).unwrap();
    // Emoji renders by name even when the unicode form is known; a date
    // without fallback shows the raw timestamp.
    assert_eq!(
        gfm,
        "[@everyone](slack://broadcast?range=everyone) :wave: \
         [1700000000](slack://date?ts=1700000000)"
    );
}

#[test]
fn document_has_no_trailing_newline() {
    let document = doc(vec![
        para(vec![text("a")]),
        code_block("b", None),
        para(vec![text("c")]),
    ]);
    let gfm = render_gfm(&document).unwrap();
    assert_eq!(gfm, "a\n\n```\nb\n```\n\nc");
    assert!(!gfm.ends_with('\n'));
}

#[test]
fn heading_levels_clamp() {
    let gfm = render_gfm(&doc(vec![heading(3, vec![text("Three")])])).unwrap();
    assert_eq!(gfm, "### Three");
}

#[test]
fn nested_list_blocks_indent_under_item() {
    let mut deep = item(vec![text("outer")]);
    deep.children
        .push(list(false, 1, vec![item(vec![text("inner")])]));
    let gfm = render_gfm(&doc(vec![list(false, 1, vec![deep])])).unwrap();
    assert_eq!(gfm, "- outer\n  - inner");
}
