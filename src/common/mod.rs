//! Format-agnostic helpers shared by the codecs.

pub mod links;

use crate::ast::nodes::Inline;

/// Flatten inline nodes to their plain-text content.
///
/// Used wherever a format needs a bare string out of rich content: link
/// labels in Rich Text, preformatted blocks, table cells in monospaced
/// fallbacks. Style wrappers contribute their children, links contribute
/// their label (or URL when unlabeled), mentions contribute their
/// canonical ID.
pub fn flatten_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push_str(&t.content),
            Inline::Code(c) => out.push_str(&c.content),
            Inline::Bold(n) => out.push_str(&flatten_inlines(&n.children)),
            Inline::Italic(n) => out.push_str(&flatten_inlines(&n.children)),
            Inline::Strikethrough(n) => out.push_str(&flatten_inlines(&n.children)),
            Inline::Link(link) => {
                if link.children.is_empty() {
                    out.push_str(&link.url);
                } else {
                    out.push_str(&flatten_inlines(&link.children));
                }
            }
            Inline::UserMention(m) => out.push_str(&m.user_id),
            Inline::ChannelMention(m) => out.push_str(&m.channel_id),
            Inline::UsergroupMention(m) => out.push_str(&m.usergroup_id),
            Inline::Broadcast(b) => {
                out.push('@');
                out.push_str(b.range.as_str());
            }
            Inline::Emoji(e) => {
                out.push(':');
                out.push_str(&e.name);
                out.push(':');
            }
            Inline::DateTimestamp(d) => match &d.fallback {
                Some(fallback) => out.push_str(fallback),
                None => out.push_str(&d.timestamp.to_string()),
            },
        }
    }
    out
}

/// URL schemes the platform wraps in angle brackets.
pub const URL_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

/// Whether a string starts with a recognized URL scheme.
pub fn has_url_scheme(s: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| s.starts_with(scheme))
}

/// Strip angle brackets around URLs in a text run: `<https://x>` becomes
/// `https://x`. Non-URL angle content is left untouched.
pub fn strip_angle_urls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if has_url_scheme(&after[..close]) => {
                out.push_str(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
