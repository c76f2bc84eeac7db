//! mrkdwn parsing (tokens → AST).
//!
//! The parser is a linear pass over the token stream. Paragraph boundaries
//! are blank lines; a single newline inside a paragraph becomes a space
//! (the platform joins such lines when displaying). Style markers open a
//! wrapper when a matching closer exists later in the run and degrade to
//! literal text otherwise; when bold and italic both fit, the outer marker
//! wins.

use crate::ast::nodes::{
    Block, Bold, Broadcast, ChannelMention, Code, CodeBlock, DateTimestamp, Document, Emoji,
    Inline, Italic, Link, List, ListItem, Paragraph, Quote, Strikethrough, Text, UserMention,
    UsergroupMention,
};
use crate::error::ConvertError;
use crate::formats::mrkdwn::tokenizer::{Token, Tokenizer};

/// Parse mrkdwn text into a document.
pub fn parse_mrkdwn(text: &str) -> Result<Document, ConvertError> {
    let tokens = Tokenizer::new(text).tokenize()?;
    parse_tokens(&tokens)
}

fn parse_tokens(tokens: &[Token]) -> Result<Document, ConvertError> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            Token::FenceOpen => {
                let (block, consumed) = parse_fence(&tokens[i..]);
                blocks.push(block);
                i += consumed;
            }
            Token::QuoteMarker => {
                let (block, consumed) = parse_quote(&tokens[i..]);
                blocks.push(block);
                i += consumed;
            }
            Token::ListMarker { ordered, .. } => {
                let (block, consumed) = parse_list(&tokens[i..], *ordered);
                blocks.push(block);
                i += consumed;
            }
            Token::Newline | Token::BlankLine => {
                i += 1;
            }
            _ => {
                let (block, consumed) = parse_paragraph(&tokens[i..]);
                if let Some(block) = block {
                    blocks.push(block);
                }
                i += consumed;
            }
        }
    }

    Ok(Document { blocks })
}

/// Collect fence content into a code block. The tokenizer guarantees the
/// closing fence exists. A bare alphanumeric first line is the language.
fn parse_fence(tokens: &[Token]) -> (Block, usize) {
    let mut i = 1;
    let mut content = String::new();
    // Inside a fence the tokenizer emits literal text only.
    while i < tokens.len() {
        match &tokens[i] {
            Token::FenceClose => {
                i += 1;
                break;
            }
            Token::Text(text) => {
                content.push_str(text);
                i += 1;
            }
            _ => i += 1,
        }
    }

    let mut language = None;
    if let Some((first, remainder)) = content.split_once('\n') {
        if !first.is_empty() && first.chars().all(|c| c.is_ascii_alphanumeric()) {
            language = Some(first.to_string());
            content = remainder.to_string();
        }
    }

    // The newline after the opening fence and the one before the closing
    // fence are delimiter syntax, not content.
    if let Some(rest) = content.strip_prefix('\n') {
        content = rest.to_string();
    }
    if let Some(rest) = content.strip_suffix('\n') {
        content = rest.to_string();
    }

    (Block::CodeBlock(CodeBlock { content, language }), i)
}

/// Collect consecutive quoted lines into one quote block. Line breaks
/// inside the quote stay literal so the renderer can re-prefix each line.
fn parse_quote(tokens: &[Token]) -> (Block, usize) {
    let mut i = 1;
    let mut inline_tokens: Vec<Token> = Vec::new();

    while i < tokens.len() {
        match &tokens[i] {
            Token::QuoteMarker => {
                i += 1;
            }
            Token::BlankLine => {
                i += 1;
                break;
            }
            Token::Newline => {
                if matches!(tokens.get(i + 1), Some(Token::QuoteMarker)) {
                    inline_tokens.push(Token::Text("\n".to_string()));
                    i += 1;
                } else {
                    i += 1;
                    break;
                }
            }
            Token::FenceOpen | Token::ListMarker { .. } => break,
            other => {
                inline_tokens.push(other.clone());
                i += 1;
            }
        }
    }

    let paragraph = Paragraph {
        children: parse_inline_tokens(&inline_tokens),
    };
    (
        Block::Quote(Quote {
            children: vec![Block::Paragraph(paragraph)],
        }),
        i,
    )
}

/// Group consecutive items of the same marker kind into one list. An
/// indented line after a newline is a continuation of the previous item.
fn parse_list(tokens: &[Token], ordered: bool) -> (Block, usize) {
    let mut i = 0;
    let mut items = Vec::new();
    let mut start = 1;

    if let Some(Token::ListMarker {
        number: Some(number),
        ..
    }) = tokens.first()
    {
        if ordered {
            start = *number;
        }
    }

    while i < tokens.len() {
        match &tokens[i] {
            Token::ListMarker {
                ordered: marker_ordered,
                ..
            } if *marker_ordered == ordered => {
                i += 1;
            }
            _ => break,
        }

        let mut item_tokens: Vec<Token> = Vec::new();
        while i < tokens.len() {
            match &tokens[i] {
                Token::Newline => {
                    // Indented continuation lines belong to this item.
                    if let Some(Token::Text(text)) = tokens.get(i + 1) {
                        if text.starts_with(' ') || text.starts_with('\t') {
                            item_tokens.push(Token::Text(format!(" {}", text.trim_start())));
                            i += 2;
                            continue;
                        }
                    }
                    i += 1;
                    break;
                }
                Token::BlankLine => {
                    i += 1;
                    break;
                }
                Token::ListMarker { .. } => break,
                other => {
                    item_tokens.push(other.clone());
                    i += 1;
                }
            }
        }

        if !item_tokens.is_empty() {
            items.push(ListItem {
                content: parse_inline_tokens(&item_tokens),
                children: Vec::new(),
            });
        }
    }

    (
        Block::List(List {
            ordered,
            start,
            items,
        }),
        i,
    )
}

/// Collect a paragraph: inline tokens up to a blank line or the start of a
/// different block. Single newlines become spaces.
fn parse_paragraph(tokens: &[Token]) -> (Option<Block>, usize) {
    let mut i = 0;
    let mut inline_tokens: Vec<Token> = Vec::new();

    while i < tokens.len() {
        match &tokens[i] {
            Token::FenceOpen | Token::QuoteMarker | Token::ListMarker { .. } => break,
            Token::BlankLine => {
                i += 1;
                break;
            }
            Token::Newline => {
                if i + 1 >= tokens.len() {
                    i += 1;
                    break;
                }
                if matches!(
                    tokens[i + 1],
                    Token::FenceOpen | Token::QuoteMarker | Token::ListMarker { .. }
                ) {
                    i += 1;
                    break;
                }
                inline_tokens.push(Token::Text(" ".to_string()));
                i += 1;
            }
            other => {
                inline_tokens.push(other.clone());
                i += 1;
            }
        }
    }

    if inline_tokens.is_empty() {
        return (None, i.max(1));
    }

    let paragraph = Paragraph {
        children: parse_inline_tokens(&inline_tokens),
    };
    (Some(Block::Paragraph(paragraph)), i)
}

fn parse_inline_tokens(tokens: &[Token]) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            Token::Text(text) => {
                if !text.is_empty() {
                    inlines.push(Inline::Text(Text {
                        content: text.clone(),
                    }));
                }
                i += 1;
            }
            Token::InlineCode(content) => {
                inlines.push(Inline::Code(Code {
                    content: content.clone(),
                }));
                i += 1;
            }
            Token::Link { url, label } => {
                let children = match label {
                    Some(label) => vec![Inline::text(label.clone())],
                    None => Vec::new(),
                };
                inlines.push(Inline::Link(Link {
                    url: url.clone(),
                    children,
                }));
                i += 1;
            }
            Token::UserMention { id, name } => {
                inlines.push(Inline::UserMention(UserMention {
                    user_id: id.clone(),
                    username: name.clone(),
                }));
                i += 1;
            }
            Token::ChannelMention { id, name } => {
                inlines.push(Inline::ChannelMention(ChannelMention {
                    channel_id: id.clone(),
                    channel_name: name.clone(),
                }));
                i += 1;
            }
            Token::UsergroupMention { id, name } => {
                inlines.push(Inline::UsergroupMention(UsergroupMention {
                    usergroup_id: id.clone(),
                    usergroup_name: name.clone(),
                }));
                i += 1;
            }
            Token::Broadcast(range) => {
                inlines.push(Inline::Broadcast(Broadcast { range: *range }));
                i += 1;
            }
            Token::Emoji(name) => {
                inlines.push(Inline::Emoji(Emoji {
                    name: name.clone(),
                    unicode: None,
                }));
                i += 1;
            }
            Token::Date {
                timestamp,
                format,
                fallback,
            } => {
                inlines.push(Inline::DateTimestamp(DateTimestamp {
                    timestamp: *timestamp,
                    format: format.clone(),
                    fallback: fallback.clone(),
                }));
                i += 1;
            }
            marker @ (Token::BoldMarker | Token::ItalicMarker | Token::StrikeMarker) => {
                match find_closing_marker(tokens, i + 1, marker) {
                    Some(closing) => {
                        let children = parse_inline_tokens(&tokens[i + 1..closing]);
                        inlines.push(wrap_marker(marker, children));
                        i = closing + 1;
                    }
                    None => {
                        // Unmatched marker degrades to its literal character.
                        inlines.push(Inline::text(marker_literal(marker)));
                        i += 1;
                    }
                }
            }
            // Structural tokens have all been consumed by the block layer.
            _ => i += 1,
        }
    }

    inlines
}

fn find_closing_marker(tokens: &[Token], from: usize, marker: &Token) -> Option<usize> {
    (from..tokens.len()).find(|&i| &tokens[i] == marker)
}

fn wrap_marker(marker: &Token, children: Vec<Inline>) -> Inline {
    match marker {
        Token::BoldMarker => Inline::Bold(Bold { children }),
        Token::ItalicMarker => Inline::Italic(Italic { children }),
        _ => Inline::Strikethrough(Strikethrough { children }),
    }
}

fn marker_literal(marker: &Token) -> &'static str {
    match marker {
        Token::BoldMarker => "*",
        Token::ItalicMarker => "_",
        _ => "~",
    }
}
