//! GFM serialization (AST → GFM export)
//!
//! A visitor walk over the AST that owns every emitted byte — no external
//! formatter, so the output discipline is enforced here: blocks joined by
//! one blank line, no trailing newline on the document, exactly one
//! newline between code content and its closing fence, `> ` on every
//! quoted line, deep links with a fixed query order.
//!
//! Italic is emitted as `_…_` so that bold-over-italic becomes `**_…_**`,
//! which GFM parsers re-read with the same nesting (`***…***` flips it).

use crate::ast::nodes::{
    Alignment, Block, CodeBlock, Document, Heading, Inline, Link, List, Quote, Table,
};
use crate::common::links;
use crate::error::ConvertError;
use crate::formats::treeviz::inline_to_treeviz;

/// Renderer configuration, passed explicitly; there is no global state.
#[derive(Debug, Clone, Default)]
pub struct GfmOptions {
    /// When set, mention deep links carry `team=<id>` before `id=`.
    pub team_id: Option<String>,
    /// Replace invalid subtrees with their printable form instead of
    /// failing the render.
    pub lenient: bool,
}

/// Render a document to GFM with default options.
pub fn render_gfm(doc: &Document) -> Result<String, ConvertError> {
    GfmSerializer::new(GfmOptions::default()).serialize(doc)
}

/// AST → GFM serializer.
pub struct GfmSerializer {
    options: GfmOptions,
}

impl GfmSerializer {
    pub fn new(options: GfmOptions) -> Self {
        GfmSerializer { options }
    }

    pub fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        let blocks = doc
            .blocks
            .iter()
            .map(|block| self.render_block(block))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(blocks.join("\n\n"))
    }

    fn render_block(&self, block: &Block) -> Result<String, ConvertError> {
        match block {
            Block::Paragraph(p) => self.render_inlines(&p.children),
            Block::Heading(h) => self.render_heading(h),
            Block::CodeBlock(code) => Ok(render_code_block(code)),
            Block::Quote(quote) => self.render_quote(quote),
            Block::List(list) => self.render_list(list),
            Block::HorizontalRule => Ok("---".to_string()),
            Block::Table(table) => self.render_table(table),
        }
    }

    fn render_heading(&self, heading: &Heading) -> Result<String, ConvertError> {
        let level = heading.level.clamp(1, 6) as usize;
        Ok(format!("{} {}", "#".repeat(level), self.render_inlines(&heading.children)?))
    }

    fn render_quote(&self, quote: &Quote) -> Result<String, ConvertError> {
        let rendered = quote
            .children
            .iter()
            .map(|child| Ok(prefix_quote(&self.render_block(child)?)))
            .collect::<Result<Vec<_>, ConvertError>>()?;
        // A lone `>` line keeps consecutive blocks distinct inside the quote.
        Ok(rendered.join("\n>\n"))
    }

    fn render_list(&self, list: &List) -> Result<String, ConvertError> {
        let mut lines = Vec::new();
        for (index, item) in list.items.iter().enumerate() {
            let prefix = if list.ordered {
                format!("{}. ", list.start as usize + index)
            } else {
                "- ".to_string()
            };
            // Continuation lines are indented to the item's content
            // column so they stay inside the item when re-parsed.
            let indent = " ".repeat(prefix.len());

            let mut body = self.render_inlines(&item.content)?;
            for child in &item.children {
                body.push('\n');
                body.push_str(&self.render_block(child)?);
            }

            for (line_index, line) in body.split('\n').enumerate() {
                if line_index == 0 {
                    lines.push(format!("{prefix}{line}"));
                } else if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{indent}{line}"));
                }
            }
        }
        Ok(lines.join("\n"))
    }

    fn render_table(&self, table: &Table) -> Result<String, ConvertError> {
        let mut lines = Vec::new();

        if !table.header.is_empty() {
            let cells = table
                .header
                .iter()
                .map(|cell| self.render_inlines(cell))
                .collect::<Result<Vec<_>, _>>()?;
            lines.push(format!("| {} |", cells.join(" | ")));

            let columns = table.header.len().max(table.alignments.len());
            let separators = (0..columns)
                .map(|i| match table.alignments.get(i).copied().flatten() {
                    Some(Alignment::Left) => ":---",
                    Some(Alignment::Center) => ":---:",
                    Some(Alignment::Right) => "---:",
                    None => "---",
                })
                .collect::<Vec<_>>();
            lines.push(format!("| {} |", separators.join(" | ")));
        }

        for row in &table.rows {
            let cells = row
                .iter()
                .map(|cell| self.render_inlines(cell))
                .collect::<Result<Vec<_>, _>>()?;
            lines.push(format!("| {} |", cells.join(" | ")));
        }

        Ok(lines.join("\n"))
    }

    fn render_inlines(&self, inlines: &[Inline]) -> Result<String, ConvertError> {
        let mut out = String::new();
        for inline in inlines {
            out.push_str(&self.render_inline(inline)?);
        }
        Ok(out)
    }

    fn render_inline(&self, inline: &Inline) -> Result<String, ConvertError> {
        let team_id = self.options.team_id.as_deref();
        Ok(match inline {
            Inline::Text(t) => escape_text(&t.content),
            Inline::Bold(b) => format!("**{}**", self.render_inlines(&b.children)?),
            Inline::Italic(i) => format!("_{}_", self.render_inlines(&i.children)?),
            Inline::Strikethrough(s) => format!("~~{}~~", self.render_inlines(&s.children)?),
            Inline::Code(c) => format!("`{}`", c.content.replace('`', "\\`")),
            Inline::Link(link) => self.render_link(link)?,
            Inline::UserMention(m) => {
                let display = match &m.username {
                    Some(name) => format!("@{name}"),
                    None => m.user_id.clone(),
                };
                let url = links::user_link(&m.user_id, m.username.as_deref(), team_id);
                format!("[{display}]({url})")
            }
            Inline::ChannelMention(m) => {
                let display = match &m.channel_name {
                    Some(name) => format!("#{name}"),
                    None => m.channel_id.clone(),
                };
                let url = links::channel_link(&m.channel_id, m.channel_name.as_deref(), team_id);
                format!("[{display}]({url})")
            }
            Inline::UsergroupMention(m) => {
                let display = match &m.usergroup_name {
                    Some(name) => format!("@{name}"),
                    None => m.usergroup_id.clone(),
                };
                let url =
                    links::usergroup_link(&m.usergroup_id, m.usergroup_name.as_deref(), team_id);
                format!("[{display}]({url})")
            }
            Inline::Broadcast(b) => {
                format!("[@{}]({})", b.range.as_str(), links::broadcast_link(b.range))
            }
            Inline::Emoji(e) => format!(":{}:", e.name),
            Inline::DateTimestamp(d) => {
                let display = d
                    .fallback
                    .clone()
                    .unwrap_or_else(|| d.timestamp.to_string());
                let url = links::date_link(d.timestamp, d.format.as_deref());
                format!("[{display}]({url})")
            }
        })
    }

    fn render_link(&self, link: &Link) -> Result<String, ConvertError> {
        if link.url.is_empty() {
            if self.options.lenient {
                return Ok(inline_to_treeviz(&Inline::Link(link.clone())));
            }
            return Err(ConvertError::render("link URL is empty").with_element("Link"));
        }
        let label = if link.children.is_empty() {
            link.url.clone()
        } else {
            self.render_inlines(&link.children)?
        };
        let url = link.url.replace('(', "%28").replace(')', "%29");
        Ok(format!("[{label}]({url})"))
    }
}

fn render_code_block(code: &CodeBlock) -> String {
    let language = code.language.as_deref().unwrap_or("");
    if code.content.is_empty() {
        return format!("```{language}\n```");
    }
    let mut out = format!("```{language}\n");
    out.push_str(&code.content);
    if !code.content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("```");
    out
}

/// Prefix every line of a rendered block with `> ` (bare `>` on empties).
fn prefix_quote(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape characters Markdown would otherwise interpret.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '*' | '_' | '`' | '~' | '[' | ']' | '(' | ')' | '#' | '+' | '-' | '.' | '!'
                | '|'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
