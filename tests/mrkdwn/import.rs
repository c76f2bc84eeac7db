//! Import tests for the mrkdwn format (mrkdwn → AST → GFM).
//!
//! Most cases assert the GFM output of the full migration path, the way
//! the converter is actually used; a few check the intermediate AST.

use slack_gfm::ast::nodes::{Block, BroadcastRange, Inline};
use slack_gfm::{mrkdwn_to_gfm, parse_mrkdwn, ConvertError, ConvertOptions};

fn to_gfm(mrkdwn: &str) -> String {
    mrkdwn_to_gfm(mrkdwn, &ConvertOptions::default()).expect("conversion should succeed")
}

#[test]
fn plain_text_passes_through() {
    assert_eq!(to_gfm("Hello world"), "Hello world");
}

#[test]
fn bold_italic_strike_markers() {
    assert_eq!(to_gfm("*Hello*"), "**Hello**");
    assert_eq!(to_gfm("_Hello_"), "_Hello_");
    assert_eq!(to_gfm("~Hello~"), "~~Hello~~");
}

#[test]
fn combined_styles_outer_marker_wins() {
    assert_eq!(to_gfm("*_bold italic_*"), "**_bold italic_**");
}

#[test]
fn single_newline_becomes_space() {
    assert_eq!(to_gfm("line one\nline two"), "line one line two");
    assert_eq!(to_gfm("para one\n\npara two"), "para one\n\npara two");
}

#[test]
fn user_mention_with_name() {
    assert_eq!(
        to_gfm("<@U123ABC|john>"),
        "[@john](slack://user?id=U123ABC&name=john)"
    );
}

#[test]
fn user_mention_mapped_via_options() {
    let options = ConvertOptions {
        user_map: [("U123ABC".to_string(), "john".to_string())].into(),
        ..ConvertOptions::default()
    };
    let gfm = mrkdwn_to_gfm("<@U123ABC>", &options).unwrap();
    assert_eq!(gfm, "[@john](slack://user?id=U123ABC&name=john)");
}

#[test]
fn channel_and_usergroup_mentions() {
    assert_eq!(
        to_gfm("<#C042|general>"),
        "[#general](slack://channel?id=C042&name=general)"
    );
    assert_eq!(
        to_gfm("<!subteam^S99|oncall>"),
        "[@oncall](slack://usergroup?id=S99&name=oncall)"
    );
}

#[test]
fn broadcast_becomes_deep_link() {
    assert_eq!(
        to_gfm("hello <!channel>"),
        "hello [@channel](slack://broadcast?range=channel)"
    );
}

#[test]
fn broadcast_ast_carries_range() {
    let doc = parse_mrkdwn("hello <!channel>").unwrap();
    let Block::Paragraph(p) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    match &p.children[1] {
        Inline::Broadcast(b) => assert_eq!(b.range, BroadcastRange::Channel),
        other => panic!("expected broadcast, got {other:?}"),
    }
}

#[test]
fn date_marker_renders_fallback() {
    assert_eq!(
        to_gfm("<!date^1392734382^{date_short}|Feb 18, 2014>"),
        "[Feb 18, 2014](slack://date?ts=1392734382&format=%7Bdate_short%7D)"
    );
}

#[test]
fn links_with_and_without_labels() {
    assert_eq!(
        to_gfm("<https://example.com|Example>"),
        "[Example](https://example.com)"
    );
    assert_eq!(
        to_gfm("<https://example.com>"),
        "[https://example.com](https://example.com)"
    );
    assert_eq!(to_gfm("<mailto:a@b.c>"), "[mailto:a@b.c](mailto:a@b.c)");
}

#[test]
fn angle_stripping_inside_fence() {
    assert_eq!(
        to_gfm("```\n<https://example.com>\n```"),
        "```\nhttps://example.com\n```"
    );
}

#[test]
fn fence_language_survives() {
    assert_eq!(to_gfm("```rust\nfn x() {}\n```"), "```rust\nfn x() {}\n```");
}

#[test]
fn styles_are_inert_inside_fence() {
    assert_eq!(to_gfm("```\n*not bold*\n```"), "```\n*not bold*\n```");
}

#[test]
fn quote_lines_join_and_reprefix() {
    assert_eq!(to_gfm("&gt; one\n&gt; two"), "> one\n> two");
    assert_eq!(to_gfm("> spaced form"), "> spaced form");
}

#[test]
fn bullet_and_ordered_lists() {
    assert_eq!(to_gfm("• one\n• two"), "- one\n- two");
    assert_eq!(to_gfm("* one\n* two"), "- one\n- two");
    assert_eq!(to_gfm("4. four\n5. five"), "4. four\n5. five");
}

#[test]
fn escapes_yield_literal_characters() {
    assert_eq!(to_gfm(r"\*literal\*"), "\\*literal\\*");
}

#[test]
fn unmatched_markers_degrade_to_text() {
    assert_eq!(to_gfm("3 * 4 = 12"), "3 \\* 4 = 12");
}

#[test]
fn emoji_shortcodes() {
    assert_eq!(to_gfm("ship it :rocket:"), "ship it :rocket:");
}

#[test]
fn unterminated_fence_is_error_in_strict_mode() {
    let options = ConvertOptions {
        strict: true,
        ..ConvertOptions::default()
    };
    let err = mrkdwn_to_gfm("```\nno closing fence", &options).unwrap_err();
    assert!(matches!(err, ConvertError::Parse { .. }));
}

#[test]
fn unterminated_fence_degrades_in_default_mode() {
    let gfm = to_gfm("```\nno closing fence");
    assert!(gfm.contains("no closing fence"));
}

#[test]
fn invalid_broadcast_is_error_in_strict_mode() {
    let options = ConvertOptions {
        strict: true,
        ..ConvertOptions::default()
    };
    let err = mrkdwn_to_gfm("<!fanfare>", &options).unwrap_err();
    assert!(matches!(err, ConvertError::Parse { .. }));
}

/// Migration invariant: no platform meta-markers survive into GFM.
#[test]
fn no_meta_markers_in_output() {
    let mrkdwn = "*hi* <@U1|jo>, see <#C2|gen> and <https://example.com|this>\n\
                  &gt; quoted <!here>\n\n\
                  ```\n<https://inner.example.com>\n```\n\
                  • item <!subteam^S1>\n";
    let gfm = to_gfm(mrkdwn);
    for marker in ["<@", "<#", "<!", "<http"] {
        assert!(
            !gfm.contains(marker),
            "output still contains {marker:?}: {gfm}"
        );
    }
}
