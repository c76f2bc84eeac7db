//! Visitor infrastructure for AST transformation.
//!
//! Visitors take nodes by value and return the (possibly rewritten) node.
//! The default methods delegate to the `walk_*` functions, which rebuild
//! each parent from its visited children depth-first, left-to-right. A
//! visitor that passes nodes through unchanged simply moves them; nothing
//! forces a reallocation. Replacements are not re-visited.

use crate::ast::nodes::{Block, Document, Inline, ListItem};
use crate::error::ConvertError;

/// An AST transformer. Override the methods for the nodes you care about;
/// unhandled nodes are walked structurally. Visitors may carry mutable
/// accumulator state (counters, collected features, lookup maps).
pub trait Visitor {
    fn visit_document(&mut self, doc: Document) -> Result<Document, ConvertError> {
        walk_document(self, doc)
    }

    fn visit_block(&mut self, block: Block) -> Result<Block, ConvertError> {
        walk_block(self, block)
    }

    fn visit_list_item(&mut self, item: ListItem) -> Result<ListItem, ConvertError> {
        walk_list_item(self, item)
    }

    fn visit_inline(&mut self, inline: Inline) -> Result<Inline, ConvertError> {
        walk_inline(self, inline)
    }
}

/// Transform a document with the given visitor.
pub fn transform_document<V: Visitor + ?Sized>(
    visitor: &mut V,
    doc: Document,
) -> Result<Document, ConvertError> {
    visitor.visit_document(doc)
}

/// Visit every block of a document in source order.
pub fn walk_document<V: Visitor + ?Sized>(
    visitor: &mut V,
    doc: Document,
) -> Result<Document, ConvertError> {
    let blocks = doc
        .blocks
        .into_iter()
        .map(|block| visitor.visit_block(block))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Document { blocks })
}

/// Rebuild a block from its visited children.
pub fn walk_block<V: Visitor + ?Sized>(
    visitor: &mut V,
    block: Block,
) -> Result<Block, ConvertError> {
    match block {
        Block::Paragraph(mut node) => {
            node.children = walk_inlines(visitor, node.children)?;
            Ok(Block::Paragraph(node))
        }
        Block::Heading(mut node) => {
            node.children = walk_inlines(visitor, node.children)?;
            Ok(Block::Heading(node))
        }
        // Code blocks carry no children.
        Block::CodeBlock(node) => Ok(Block::CodeBlock(node)),
        Block::Quote(mut node) => {
            node.children = node
                .children
                .into_iter()
                .map(|child| visitor.visit_block(child))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Block::Quote(node))
        }
        Block::List(mut node) => {
            node.items = node
                .items
                .into_iter()
                .map(|item| visitor.visit_list_item(item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Block::List(node))
        }
        Block::HorizontalRule => Ok(Block::HorizontalRule),
        Block::Table(mut node) => {
            node.header = node
                .header
                .into_iter()
                .map(|cell| walk_inlines(visitor, cell))
                .collect::<Result<Vec<_>, _>>()?;
            node.rows = node
                .rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| walk_inlines(visitor, cell))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Block::Table(node))
        }
    }
}

/// Rebuild a list item from its visited content and nested blocks.
pub fn walk_list_item<V: Visitor + ?Sized>(
    visitor: &mut V,
    mut item: ListItem,
) -> Result<ListItem, ConvertError> {
    item.content = walk_inlines(visitor, item.content)?;
    item.children = item
        .children
        .into_iter()
        .map(|child| visitor.visit_block(child))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(item)
}

/// Rebuild an inline from its visited children. Leaf inlines pass through.
pub fn walk_inline<V: Visitor + ?Sized>(
    visitor: &mut V,
    inline: Inline,
) -> Result<Inline, ConvertError> {
    match inline {
        Inline::Bold(mut node) => {
            node.children = walk_inlines(visitor, node.children)?;
            Ok(Inline::Bold(node))
        }
        Inline::Italic(mut node) => {
            node.children = walk_inlines(visitor, node.children)?;
            Ok(Inline::Italic(node))
        }
        Inline::Strikethrough(mut node) => {
            node.children = walk_inlines(visitor, node.children)?;
            Ok(Inline::Strikethrough(node))
        }
        Inline::Link(mut node) => {
            node.children = walk_inlines(visitor, node.children)?;
            Ok(Inline::Link(node))
        }
        leaf => Ok(leaf),
    }
}

fn walk_inlines<V: Visitor + ?Sized>(
    visitor: &mut V,
    inlines: Vec<Inline>,
) -> Result<Vec<Inline>, ConvertError> {
    inlines
        .into_iter()
        .map(|inline| visitor.visit_inline(inline))
        .collect()
}
