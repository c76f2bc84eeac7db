//! Treeviz formatter for AST nodes
//!
//! Treeviz is a visual representation of the AST for debugging: one node
//! per line, structure drawn with `├─`/`└─` connectors, text payloads
//! truncated so a large document still fits on a screen.
//!
//! Example:
//!
//! ```text
//! Document
//! ├─ Paragraph
//! │  ├─ Text "Hi "
//! │  └─ UserMention U1
//! └─ CodeBlock (rust, 13 bytes)
//! ```
//!
//! Printing is pure and side-effect-free; it is also what the lenient
//! serializers substitute for a subtree they cannot render.

use crate::ast::nodes::{Block, Document, Inline, ListItem};
use crate::error::ConvertError;
use crate::format::Format;

const TEXT_PREVIEW_LIMIT: usize = 30;

/// Render a document as a connector tree.
pub fn to_treeviz_str(doc: &Document) -> String {
    let mut out = String::from("Document\n");
    format_blocks(&doc.blocks, "", &mut out);
    out.pop();
    out
}

/// Render a single block subtree.
pub fn block_to_treeviz(block: &Block) -> String {
    let mut out = String::new();
    format_block(block, "", true, &mut out);
    out.pop();
    out
}

/// Render a single inline subtree.
pub fn inline_to_treeviz(inline: &Inline) -> String {
    let mut out = String::new();
    format_inline(inline, "", true, &mut out);
    out.pop();
    out
}

fn format_blocks(blocks: &[Block], prefix: &str, out: &mut String) {
    for (index, block) in blocks.iter().enumerate() {
        format_block(block, prefix, index == blocks.len() - 1, out);
    }
}

fn format_block(block: &Block, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });

    match block {
        Block::Paragraph(p) => {
            out.push_str(&format!("{prefix}{connector} Paragraph\n"));
            format_inlines(&p.children, &child_prefix, out);
        }
        Block::Heading(h) => {
            out.push_str(&format!("{prefix}{connector} Heading {}\n", h.level));
            format_inlines(&h.children, &child_prefix, out);
        }
        Block::CodeBlock(code) => {
            let language = code.language.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "{prefix}{connector} CodeBlock ({language}, {} bytes)\n",
                code.content.len()
            ));
        }
        Block::Quote(q) => {
            out.push_str(&format!("{prefix}{connector} Quote\n"));
            format_blocks(&q.children, &child_prefix, out);
        }
        Block::List(list) => {
            let style = if list.ordered { "ordered" } else { "bullet" };
            out.push_str(&format!(
                "{prefix}{connector} List ({style}, {} items)\n",
                list.items.len()
            ));
            for (index, item) in list.items.iter().enumerate() {
                format_list_item(item, &child_prefix, index == list.items.len() - 1, out);
            }
        }
        Block::HorizontalRule => {
            out.push_str(&format!("{prefix}{connector} HorizontalRule\n"));
        }
        Block::Table(table) => {
            out.push_str(&format!(
                "{prefix}{connector} Table ({} columns, {} rows)\n",
                table.header.len().max(
                    table
                        .rows
                        .iter()
                        .map(Vec::len)
                        .max()
                        .unwrap_or(0)
                ),
                table.rows.len()
            ));
        }
    }
}

fn format_list_item(item: &ListItem, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    out.push_str(&format!("{prefix}{connector} Item\n"));
    let block_count = item.children.len();
    for (index, inline) in item.content.iter().enumerate() {
        let last = index == item.content.len() - 1 && block_count == 0;
        format_inline(inline, &child_prefix, last, out);
    }
    format_blocks(&item.children, &child_prefix, out);
}

fn format_inlines(inlines: &[Inline], prefix: &str, out: &mut String) {
    for (index, inline) in inlines.iter().enumerate() {
        format_inline(inline, prefix, index == inlines.len() - 1, out);
    }
}

fn format_inline(inline: &Inline, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });

    match inline {
        Inline::Text(t) => {
            out.push_str(&format!(
                "{prefix}{connector} Text {}\n",
                preview(&t.content)
            ));
        }
        Inline::Bold(b) => {
            out.push_str(&format!("{prefix}{connector} Bold\n"));
            format_inlines(&b.children, &child_prefix, out);
        }
        Inline::Italic(i) => {
            out.push_str(&format!("{prefix}{connector} Italic\n"));
            format_inlines(&i.children, &child_prefix, out);
        }
        Inline::Strikethrough(s) => {
            out.push_str(&format!("{prefix}{connector} Strikethrough\n"));
            format_inlines(&s.children, &child_prefix, out);
        }
        Inline::Code(c) => {
            out.push_str(&format!(
                "{prefix}{connector} Code {}\n",
                preview(&c.content)
            ));
        }
        Inline::Link(link) => {
            out.push_str(&format!("{prefix}{connector} Link {}\n", link.url));
            format_inlines(&link.children, &child_prefix, out);
        }
        Inline::UserMention(m) => {
            out.push_str(&format!(
                "{prefix}{connector} UserMention {}{}\n",
                m.user_id,
                name_suffix(m.username.as_deref())
            ));
        }
        Inline::ChannelMention(m) => {
            out.push_str(&format!(
                "{prefix}{connector} ChannelMention {}{}\n",
                m.channel_id,
                name_suffix(m.channel_name.as_deref())
            ));
        }
        Inline::UsergroupMention(m) => {
            out.push_str(&format!(
                "{prefix}{connector} UsergroupMention {}{}\n",
                m.usergroup_id,
                name_suffix(m.usergroup_name.as_deref())
            ));
        }
        Inline::Broadcast(b) => {
            out.push_str(&format!("{prefix}{connector} Broadcast @{}\n", b.range.as_str()));
        }
        Inline::Emoji(e) => {
            out.push_str(&format!("{prefix}{connector} Emoji :{}:\n", e.name));
        }
        Inline::DateTimestamp(d) => {
            out.push_str(&format!(
                "{prefix}{connector} DateTimestamp {}\n",
                d.timestamp
            ));
        }
    }
}

fn name_suffix(name: Option<&str>) -> String {
    match name {
        Some(name) => format!(" ({name})"),
        None => String::new(),
    }
}

fn preview(text: &str) -> String {
    let escaped = text.replace('\n', "\\n");
    let truncated: String = escaped.chars().take(TEXT_PREVIEW_LIMIT).collect();
    if truncated.len() < escaped.len() {
        format!("{truncated:?}…")
    } else {
        format!("{truncated:?}")
    }
}

/// Treeviz as a registry format (serialize-only).
#[derive(Debug)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Debug tree visualization of the AST"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(to_treeviz_str(doc))
    }
}
