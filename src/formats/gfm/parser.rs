//! GFM parsing (GFM → AST import)
//!
//! Converts GitHub Flavored Markdown to the common AST.
//! Pipeline: GFM string → Comrak AST → AST
//!
//! Block and inline tokenization is comrak's job; the work here is mapping
//! its node kinds onto ours and recognizing `slack://` deep links, which
//! come back as mention nodes instead of plain links. Well-formed GFM
//! never fails to parse: constructs with no AST counterpart degrade to
//! paragraphs of raw text.

use crate::ast::nodes::{
    Alignment, Block, Bold, Code, CodeBlock, Document, Heading, Inline, Italic, Link, List,
    ListItem, Paragraph, Quote, Strikethrough, Table, Text,
};
use crate::common::{flatten_inlines, links};
use crate::error::ConvertError;
use comrak::nodes::{AstNode, NodeValue, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a GFM string into a document.
pub fn parse_gfm(source: &str) -> Result<Document, ConvertError> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let blocks = blocks_from_children(root.children())?;
    Ok(Document { blocks })
}

fn default_comrak_options() -> ComrakOptions {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

fn blocks_from_children<'a>(
    children: impl Iterator<Item = &'a AstNode<'a>>,
) -> Result<Vec<Block>, ConvertError> {
    let mut blocks = Vec::new();
    for child in children {
        if let Some(block) = block_from_node(child)? {
            blocks.push(block);
        }
    }
    Ok(blocks)
}

fn block_from_node<'a>(node: &'a AstNode<'a>) -> Result<Option<Block>, ConvertError> {
    let node_data = node.data.borrow();

    let block = match &node_data.value {
        NodeValue::Paragraph => Some(Block::Paragraph(Paragraph {
            children: collect_inlines(node)?,
        })),

        NodeValue::Heading(heading) => Some(Block::Heading(Heading {
            level: heading.level,
            children: collect_inlines(node)?,
        })),

        NodeValue::CodeBlock(code_block) => {
            let language = if code_block.info.is_empty() {
                None
            } else {
                Some(code_block.info.clone())
            };
            // Comrak literals end with the newline before the closing
            // fence; that newline is fence syntax, not content.
            let content = code_block
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code_block.literal)
                .to_string();
            Some(Block::CodeBlock(CodeBlock { content, language }))
        }

        NodeValue::BlockQuote => Some(Block::Quote(Quote {
            children: blocks_from_children(node.children())?,
        })),

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, comrak::nodes::ListType::Ordered);
            let start = if ordered { list.start.max(1) as u32 } else { 1 };

            let mut items = Vec::new();
            for child in node.children() {
                let task = match &child.data.borrow().value {
                    NodeValue::Item(_) => None,
                    NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
                    _ => continue,
                };
                items.push(list_item_from_node(child, task)?);
            }

            Some(Block::List(List {
                ordered,
                start,
                items,
            }))
        }

        NodeValue::ThematicBreak => Some(Block::HorizontalRule),

        NodeValue::Table(table) => Some(Block::Table(table_from_node(node, &table.alignments)?)),

        // Raw HTML has no AST counterpart; keep its text.
        NodeValue::HtmlBlock(html) => Some(Block::Paragraph(Paragraph {
            children: vec![Inline::text(html.literal.trim_end_matches('\n'))],
        })),

        _ => None,
    };

    Ok(block)
}

/// Build a list item: paragraph inlines become the item content, any other
/// block stays a nested block. A task item gets its checkbox as a text
/// prefix.
fn list_item_from_node<'a>(
    node: &'a AstNode<'a>,
    task: Option<bool>,
) -> Result<ListItem, ConvertError> {
    let mut content: Vec<Inline> = Vec::new();
    let mut children = Vec::new();

    for child in node.children() {
        let is_paragraph = matches!(child.data.borrow().value, NodeValue::Paragraph);
        if is_paragraph && content.is_empty() && children.is_empty() {
            content = collect_inlines(child)?;
        } else if let Some(block) = block_from_node(child)? {
            children.push(block);
        }
    }

    if let Some(checked) = task {
        let checkbox = if checked { "[x] " } else { "[ ] " };
        content.insert(0, Inline::text(checkbox));
    }

    Ok(ListItem { content, children })
}

fn table_from_node<'a>(
    node: &'a AstNode<'a>,
    alignments: &[TableAlignment],
) -> Result<Table, ConvertError> {
    let mut table = Table {
        alignments: alignments
            .iter()
            .map(|alignment| match alignment {
                TableAlignment::Left => Some(Alignment::Left),
                TableAlignment::Center => Some(Alignment::Center),
                TableAlignment::Right => Some(Alignment::Right),
                TableAlignment::None => None,
            })
            .collect(),
        ..Table::default()
    };

    for row_node in node.children() {
        let header = match &row_node.data.borrow().value {
            NodeValue::TableRow(header) => *header,
            _ => continue,
        };
        let mut cells = Vec::new();
        for cell_node in row_node.children() {
            if matches!(cell_node.data.borrow().value, NodeValue::TableCell) {
                cells.push(collect_inlines(cell_node)?);
            }
        }
        if header {
            table.header = cells;
        } else {
            table.rows.push(cells);
        }
    }

    Ok(table)
}

/// Collect the inline children of a node.
fn collect_inlines<'a>(node: &'a AstNode<'a>) -> Result<Vec<Inline>, ConvertError> {
    let mut inlines = Vec::new();
    for child in node.children() {
        collect_inline_node(child, &mut inlines)?;
    }
    Ok(inlines)
}

fn collect_inline_node<'a>(
    node: &'a AstNode<'a>,
    inlines: &mut Vec<Inline>,
) -> Result<(), ConvertError> {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => inlines.push(Inline::Text(Text {
            content: text.clone(),
        })),

        NodeValue::Strong => inlines.push(Inline::Bold(Bold {
            children: collect_inlines(node)?,
        })),

        NodeValue::Emph => inlines.push(Inline::Italic(Italic {
            children: collect_inlines(node)?,
        })),

        NodeValue::Strikethrough => inlines.push(Inline::Strikethrough(Strikethrough {
            children: collect_inlines(node)?,
        })),

        NodeValue::Code(code) => inlines.push(Inline::Code(Code {
            content: code.literal.clone(),
        })),

        NodeValue::Link(link) => {
            let children = collect_inlines(node)?;
            inlines.push(link_inline(&link.url, children));
        }

        // Images degrade to links labeled with their alt text.
        NodeValue::Image(link) => {
            let children = collect_inlines(node)?;
            inlines.push(Inline::Link(Link {
                url: link.url.clone(),
                children,
            }));
        }

        NodeValue::SoftBreak | NodeValue::LineBreak => inlines.push(Inline::text("\n")),

        NodeValue::HtmlInline(html) => inlines.push(Inline::text(html.clone())),

        _ => {}
    }

    Ok(())
}

/// Turn a link into the right inline: deep links become mention nodes,
/// everything else stays a link.
fn link_inline(url: &str, children: Vec<Inline>) -> Inline {
    if url.starts_with("slack://") {
        let label = flatten_inlines(&children);
        if let Some(node) = links::parse_deep_link(url, &label) {
            return node;
        }
    }
    Inline::Link(Link {
        url: url.to_string(),
        children,
    })
}
