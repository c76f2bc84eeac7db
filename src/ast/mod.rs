pub mod nodes;
pub mod visitor;

pub use nodes::{
    Alignment, Block, Bold, Broadcast, BroadcastRange, ChannelMention, Code, CodeBlock,
    DateTimestamp, Document, Emoji, Heading, Inline, Italic, Link, List, ListItem, Paragraph,
    Quote, Strikethrough, Table, Text, UserMention, UsergroupMention,
};
pub use visitor::{transform_document, walk_block, walk_document, walk_inline, Visitor};
