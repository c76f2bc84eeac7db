//! Core data structures for the common message AST.
//!
//! Every conversion in this crate pivots through this tree: a decoder
//! (Rich Text, mrkdwn, GFM) produces a [`Document`], transformers rewrite
//! it, and an encoder consumes it. Nodes are plain owned data; rewrites
//! build new nodes rather than mutating shared state.

/// Root node containing all content blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A block-level node. Blocks appear as children of a [`Document`], a
/// [`Quote`], or a [`ListItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    CodeBlock(CodeBlock),
    Quote(Quote),
    List(List),
    HorizontalRule,
    Table(Table),
}

/// A paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub children: Vec<Inline>,
}

/// A heading with level 1 to 6.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<Inline>,
}

/// A code block. `content` is the final text, verbatim; code blocks never
/// carry inline children.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub content: String,
    pub language: Option<String>,
}

/// A block quote.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Quote {
    pub children: Vec<Block>,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    /// Starting number for ordered lists.
    pub start: u32,
    pub items: Vec<ListItem>,
}

/// A list item: leading inline content, optionally followed by nested
/// blocks (continuation paragraphs, nested lists, code).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub content: Vec<Inline>,
    pub children: Vec<Block>,
}

/// A table. A GFM-only construct: Rich Text and mrkdwn have no table
/// syntax, so encoders for those formats degrade it to monospaced text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
    pub alignments: Vec<Option<Alignment>>,
}

/// Column alignment of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// An inline-level node. Inlines appear inside paragraphs, headings, list
/// item content, style wrappers and link labels.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(Text),
    Bold(Bold),
    Italic(Italic),
    Strikethrough(Strikethrough),
    Code(Code),
    Link(Link),
    UserMention(UserMention),
    ChannelMention(ChannelMention),
    UsergroupMention(UsergroupMention),
    Broadcast(Broadcast),
    Emoji(Emoji),
    DateTimestamp(DateTimestamp),
}

impl Inline {
    /// Convenience constructor for plain text.
    pub fn text(content: impl Into<String>) -> Inline {
        Inline::Text(Text {
            content: content.into(),
        })
    }
}

/// Plain text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub content: String,
}

/// Bold wrapper.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bold {
    pub children: Vec<Inline>,
}

/// Italic wrapper.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Italic {
    pub children: Vec<Inline>,
}

/// Strikethrough wrapper.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Strikethrough {
    pub children: Vec<Inline>,
}

/// Inline code span. `content` is verbatim; no children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Code {
    pub content: String,
}

/// A hyperlink. `children` is the visible label; when empty, renderers
/// display the URL itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub children: Vec<Inline>,
}

/// A user mention. `user_id` is the canonical ID (`U…`); the display name
/// is advisory and usually filled in by a transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct UserMention {
    pub user_id: String,
    pub username: Option<String>,
}

/// A channel mention (`C…`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMention {
    pub channel_id: String,
    pub channel_name: Option<String>,
}

/// A usergroup mention (`S…`).
#[derive(Debug, Clone, PartialEq)]
pub struct UsergroupMention {
    pub usergroup_id: String,
    pub usergroup_name: Option<String>,
}

/// A broadcast meta-mention (`@here`, `@channel`, `@everyone`).
#[derive(Debug, Clone, PartialEq)]
pub struct Broadcast {
    pub range: BroadcastRange,
}

/// The three valid broadcast ranges. Anything else is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastRange {
    Here,
    Channel,
    Everyone,
}

impl BroadcastRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastRange::Here => "here",
            BroadcastRange::Channel => "channel",
            BroadcastRange::Everyone => "everyone",
        }
    }

    pub fn parse(value: &str) -> Option<BroadcastRange> {
        match value {
            "here" => Some(BroadcastRange::Here),
            "channel" => Some(BroadcastRange::Channel),
            "everyone" => Some(BroadcastRange::Everyone),
            _ => None,
        }
    }
}

/// An emoji by name, with an optional unicode rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Emoji {
    pub name: String,
    pub unicode: Option<String>,
}

/// A date/time reference with an optional format string and fallback text.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimestamp {
    pub timestamp: i64,
    pub format: Option<String>,
    pub fallback: Option<String>,
}
