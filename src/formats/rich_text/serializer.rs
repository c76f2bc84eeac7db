//! Rich Text serialization (AST → JSON).
//!
//! The interesting part is the style collapse: nested style wrappers
//! accumulate into per-leaf boolean flags, so `Strikethrough[Bold[Text]]`
//! becomes a single `text` element with `{"strike": true, "bold": true}`,
//! and a wrapper spanning several leaf runs stamps its flag onto each.

use crate::ast::nodes::{
    Block, CodeBlock, Document, Inline, Link, List, Paragraph, Quote, Table,
};
use crate::common::flatten_inlines;
use crate::error::ConvertError;
use crate::formats::treeviz::inline_to_treeviz;
use serde_json::{json, Map, Value};

/// Render a document to a Rich Text JSON value (strict mode).
pub fn render_rich_text(doc: &Document) -> Result<Value, ConvertError> {
    RichTextSerializer::new().serialize(doc)
}

/// Per-leaf style flags accumulated while descending wrapper chains.
#[derive(Debug, Clone, Copy, Default)]
struct StyleFlags {
    bold: bool,
    italic: bool,
    strike: bool,
}

impl StyleFlags {
    fn any(&self) -> bool {
        self.bold || self.italic || self.strike
    }
}

/// AST → Rich Text JSON serializer.
pub struct RichTextSerializer {
    lenient: bool,
}

impl RichTextSerializer {
    pub fn new() -> Self {
        RichTextSerializer { lenient: false }
    }

    /// In lenient mode an invalid subtree is replaced by its printable
    /// tree form instead of failing the whole render.
    pub fn lenient() -> Self {
        RichTextSerializer { lenient: true }
    }

    pub fn serialize(&self, doc: &Document) -> Result<Value, ConvertError> {
        let elements = doc
            .blocks
            .iter()
            .map(|block| self.render_block(block))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({"type": "rich_text", "elements": elements}))
    }

    fn render_block(&self, block: &Block) -> Result<Value, ConvertError> {
        match block {
            Block::Paragraph(p) => self.render_section(p, StyleFlags::default()),
            // Rich Text has no headings; a heading becomes a bold section.
            Block::Heading(h) => self.render_section(
                &Paragraph {
                    children: h.children.clone(),
                },
                StyleFlags {
                    bold: true,
                    ..StyleFlags::default()
                },
            ),
            Block::CodeBlock(code) => Ok(render_preformatted(code)),
            Block::Quote(quote) => self.render_quote(quote),
            Block::List(list) => self.render_list(list),
            Block::HorizontalRule => Ok(json!({
                "type": "rich_text_section",
                "elements": [{"type": "text", "text": "---"}]
            })),
            Block::Table(table) => Ok(json!({
                "type": "rich_text_preformatted",
                "elements": [{"type": "text", "text": table_plain_text(table)}]
            })),
        }
    }

    fn render_section(
        &self,
        paragraph: &Paragraph,
        flags: StyleFlags,
    ) -> Result<Value, ConvertError> {
        let elements = self.render_inlines(&paragraph.children, flags)?;
        Ok(json!({"type": "rich_text_section", "elements": elements}))
    }

    fn render_quote(&self, quote: &Quote) -> Result<Value, ConvertError> {
        let mut elements = Vec::new();
        for (index, child) in quote.children.iter().enumerate() {
            if index > 0 {
                elements.push(json!({"type": "text", "text": "\n"}));
            }
            match child {
                Block::Paragraph(p) => {
                    elements.extend(self.render_inlines(&p.children, StyleFlags::default())?);
                }
                // Non-paragraph blocks inside a quote degrade to their
                // plain text; Rich Text quotes hold inline content only.
                other => elements.push(json!({"type": "text", "text": block_plain_text(other)})),
            }
        }
        Ok(json!({"type": "rich_text_quote", "elements": elements}))
    }

    fn render_list(&self, list: &List) -> Result<Value, ConvertError> {
        let style = if list.ordered { "ordered" } else { "bullet" };
        let mut elements = Vec::new();
        for item in &list.items {
            let item_elements = self.render_inlines(&item.content, StyleFlags::default())?;
            elements.push(json!({"type": "rich_text_section", "elements": item_elements}));
        }
        Ok(json!({"type": "rich_text_list", "style": style, "elements": elements}))
    }

    fn render_inlines(
        &self,
        inlines: &[Inline],
        flags: StyleFlags,
    ) -> Result<Vec<Value>, ConvertError> {
        let mut out = Vec::new();
        for inline in inlines {
            match inline {
                Inline::Text(t) => out.push(text_element(&t.content, flags, false)),
                Inline::Code(c) => out.push(text_element(&c.content, flags, true)),
                Inline::Bold(b) => out.extend(self.render_inlines(
                    &b.children,
                    StyleFlags {
                        bold: true,
                        ..flags
                    },
                )?),
                Inline::Italic(i) => out.extend(self.render_inlines(
                    &i.children,
                    StyleFlags {
                        italic: true,
                        ..flags
                    },
                )?),
                Inline::Strikethrough(s) => out.extend(self.render_inlines(
                    &s.children,
                    StyleFlags {
                        strike: true,
                        ..flags
                    },
                )?),
                Inline::Link(link) => out.push(self.render_link(link, flags)?),
                Inline::UserMention(m) => {
                    out.push(json!({"type": "user", "user_id": m.user_id}));
                }
                Inline::ChannelMention(m) => {
                    out.push(json!({"type": "channel", "channel_id": m.channel_id}));
                }
                Inline::UsergroupMention(m) => {
                    out.push(json!({"type": "usergroup", "usergroup_id": m.usergroup_id}));
                }
                Inline::Broadcast(b) => {
                    out.push(json!({"type": "broadcast", "range": b.range.as_str()}));
                }
                Inline::Emoji(e) => {
                    let mut elem = Map::new();
                    elem.insert("type".to_string(), json!("emoji"));
                    elem.insert("name".to_string(), json!(e.name));
                    if let Some(unicode) = &e.unicode {
                        elem.insert("unicode".to_string(), json!(unicode));
                    }
                    out.push(Value::Object(elem));
                }
                Inline::DateTimestamp(d) => {
                    let mut elem = Map::new();
                    elem.insert("type".to_string(), json!("date"));
                    elem.insert("timestamp".to_string(), json!(d.timestamp));
                    if let Some(format) = &d.format {
                        elem.insert("format".to_string(), json!(format));
                    }
                    if let Some(fallback) = &d.fallback {
                        elem.insert("fallback".to_string(), json!(fallback));
                    }
                    out.push(Value::Object(elem));
                }
            }
        }
        Ok(out)
    }

    fn render_link(&self, link: &Link, flags: StyleFlags) -> Result<Value, ConvertError> {
        if link.url.is_empty() {
            if self.lenient {
                return Ok(text_element(
                    &inline_to_treeviz(&Inline::Link(link.clone())),
                    flags,
                    false,
                ));
            }
            return Err(ConvertError::render("link URL is empty").with_element("Link"));
        }
        let mut elem = Map::new();
        elem.insert("type".to_string(), json!("link"));
        elem.insert("url".to_string(), json!(link.url));
        if !link.children.is_empty() {
            elem.insert("text".to_string(), json!(flatten_inlines(&link.children)));
        }
        if let Some(style) = style_object(flags, false) {
            elem.insert("style".to_string(), style);
        }
        Ok(Value::Object(elem))
    }
}

impl Default for RichTextSerializer {
    fn default() -> Self {
        RichTextSerializer::new()
    }
}

fn render_preformatted(code: &CodeBlock) -> Value {
    // The platform displays preformatted blocks without a trailing
    // newline; emitting one produces a blank line in the client.
    let content = code.content.trim_end_matches('\n');
    json!({
        "type": "rich_text_preformatted",
        "elements": [{"type": "text", "text": content}]
    })
}

fn text_element(text: &str, flags: StyleFlags, code: bool) -> Value {
    let mut elem = Map::new();
    elem.insert("type".to_string(), json!("text"));
    elem.insert("text".to_string(), json!(text));
    if let Some(style) = style_object(flags, code) {
        elem.insert("style".to_string(), style);
    }
    Value::Object(elem)
}

/// Build a style object containing only the flags that are set, or `None`
/// when there are none (so unstyled text stays a bare text element).
fn style_object(flags: StyleFlags, code: bool) -> Option<Value> {
    if !flags.any() && !code {
        return None;
    }
    let mut style = Map::new();
    if flags.bold {
        style.insert("bold".to_string(), json!(true));
    }
    if flags.italic {
        style.insert("italic".to_string(), json!(true));
    }
    if flags.strike {
        style.insert("strike".to_string(), json!(true));
    }
    if code {
        style.insert("code".to_string(), json!(true));
    }
    Some(Value::Object(style))
}

fn block_plain_text(block: &Block) -> String {
    match block {
        Block::Paragraph(p) => flatten_inlines(&p.children),
        Block::Heading(h) => flatten_inlines(&h.children),
        Block::CodeBlock(code) => code.content.clone(),
        Block::Quote(q) => q
            .children
            .iter()
            .map(block_plain_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Block::List(list) => list
            .items
            .iter()
            .map(|item| flatten_inlines(&item.content))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::HorizontalRule => "---".to_string(),
        Block::Table(table) => table_plain_text(table),
    }
}

/// Lay a table out as aligned monospaced text, the usual fallback for
/// clients without table support.
fn table_plain_text(table: &Table) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    if !table.header.is_empty() {
        rows.push(table.header.iter().map(|c| flatten_inlines(c)).collect());
    }
    for row in &table.rows {
        rows.push(row.iter().map(|c| flatten_inlines(c)).collect());
    }
    if rows.is_empty() {
        return String::new();
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(columns, String::new());
    }
    let widths: Vec<usize> = (0..columns)
        .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
        .collect();

    let mut lines = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
        if index == 0 && !table.header.is_empty() {
            lines.push(
                widths
                    .iter()
                    .map(|&w| "-".repeat(w))
                    .collect::<Vec<_>>()
                    .join("  "),
            );
        }
    }
    lines.join("\n")
}
