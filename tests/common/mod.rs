//! Shared builders for AST fixtures used across the format tests.

#![allow(dead_code)]

use slack_gfm::ast::nodes::{
    Block, Bold, Code, CodeBlock, Document, Heading, Inline, Italic, Link, List, ListItem,
    Paragraph, Quote, Strikethrough, Text, UserMention,
};

pub fn doc(blocks: Vec<Block>) -> Document {
    Document { blocks }
}

pub fn para(children: Vec<Inline>) -> Block {
    Block::Paragraph(Paragraph { children })
}

pub fn heading(level: u8, children: Vec<Inline>) -> Block {
    Block::Heading(Heading { level, children })
}

pub fn quote(children: Vec<Block>) -> Block {
    Block::Quote(Quote { children })
}

pub fn code_block(content: &str, language: Option<&str>) -> Block {
    Block::CodeBlock(CodeBlock {
        content: content.to_string(),
        language: language.map(str::to_string),
    })
}

pub fn list(ordered: bool, start: u32, items: Vec<ListItem>) -> Block {
    Block::List(List {
        ordered,
        start,
        items,
    })
}

pub fn item(content: Vec<Inline>) -> ListItem {
    ListItem {
        content,
        children: Vec::new(),
    }
}

pub fn text(content: &str) -> Inline {
    Inline::Text(Text {
        content: content.to_string(),
    })
}

pub fn bold(children: Vec<Inline>) -> Inline {
    Inline::Bold(Bold { children })
}

pub fn italic(children: Vec<Inline>) -> Inline {
    Inline::Italic(Italic { children })
}

pub fn strike(children: Vec<Inline>) -> Inline {
    Inline::Strikethrough(Strikethrough { children })
}

pub fn code(content: &str) -> Inline {
    Inline::Code(Code {
        content: content.to_string(),
    })
}

pub fn link(url: &str, label: Option<&str>) -> Inline {
    Inline::Link(Link {
        url: url.to_string(),
        children: label.map(|l| vec![text(l)]).unwrap_or_default(),
    })
}

pub fn user(id: &str, name: Option<&str>) -> Inline {
    Inline::UserMention(UserMention {
        user_id: id.to_string(),
        username: name.map(str::to_string),
    })
}
