//! Rich Text parsing (JSON → AST).
//!
//! Accepts either a full `{"type": "rich_text", "elements": [...]}` block
//! or a bare elements array. Shape problems at the top level are
//! validation errors; unknown element types inside are parse errors with
//! the element, its index, and its parent kind attached.

use crate::ast::nodes::{
    Block, Bold, Broadcast, BroadcastRange, ChannelMention, Code, CodeBlock, DateTimestamp,
    Document, Emoji, Inline, Italic, Link, List, ListItem, Paragraph, Quote, Strikethrough, Text,
    UserMention, UsergroupMention,
};
use crate::common::strip_angle_urls;
use crate::error::ConvertError;
use serde_json::Value;

/// Parse a Rich Text JSON value into a document.
pub fn parse_rich_text(value: &Value) -> Result<Document, ConvertError> {
    let elements = block_elements(value)?;
    let blocks = elements
        .iter()
        .enumerate()
        .map(|(position, element)| parse_block_element(element, position))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Document { blocks })
}

fn block_elements(value: &Value) -> Result<&Vec<Value>, ConvertError> {
    match value {
        Value::Array(elements) => Ok(elements),
        Value::Object(map) => {
            if let Some(kind) = map.get("type").and_then(Value::as_str) {
                if kind != "rich_text" {
                    return Err(
                        ConvertError::parse(format!("unknown element type: {kind}"))
                            .with_element(kind)
                            .with_parent("root"),
                    );
                }
            }
            match map.get("elements") {
                Some(Value::Array(elements)) => Ok(elements),
                Some(_) => Err(ConvertError::validation("'elements' must be an array")
                    .with_parent("rich_text")),
                None => Err(ConvertError::validation("missing 'elements' array")
                    .with_parent("rich_text")),
            }
        }
        _ => Err(ConvertError::validation(
            "rich text input must be an object or an elements array",
        )),
    }
}

fn element_type(element: &Value) -> &str {
    element.get("type").and_then(Value::as_str).unwrap_or("")
}

fn child_elements(element: &Value) -> &[Value] {
    element
        .get("elements")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn parse_block_element(element: &Value, position: usize) -> Result<Block, ConvertError> {
    match element_type(element) {
        "rich_text_section" => Ok(Block::Paragraph(Paragraph {
            children: parse_inline_elements(child_elements(element), "rich_text_section")?,
        })),
        "rich_text_list" => parse_list(element),
        "rich_text_preformatted" => Ok(Block::CodeBlock(CodeBlock {
            content: preformatted_text(child_elements(element))?,
            language: None,
        })),
        "rich_text_quote" => {
            let paragraph = Paragraph {
                children: parse_inline_elements(child_elements(element), "rich_text_quote")?,
            };
            Ok(Block::Quote(Quote {
                children: vec![Block::Paragraph(paragraph)],
            }))
        }
        other => Err(
            ConvertError::parse(format!("unknown element type: {other}"))
                .with_element(if other.is_empty() { "<missing>" } else { other })
                .with_position(position)
                .with_parent("Document"),
        ),
    }
}

fn parse_list(element: &Value) -> Result<Block, ConvertError> {
    let style = element.get("style").and_then(Value::as_str).unwrap_or("bullet");
    let ordered = style == "ordered";

    // List items are rich_text_sections; `indent` and `border` attributes
    // are accepted but normalized away (the AST has no indent levels).
    let mut items = Vec::new();
    for child in child_elements(element) {
        if element_type(child) == "rich_text_section" {
            items.push(ListItem {
                content: parse_inline_elements(child_elements(child), "rich_text_list")?,
                children: Vec::new(),
            });
        }
    }

    Ok(Block::List(List {
        ordered,
        start: 1,
        items,
    }))
}

/// Flatten preformatted elements to plain text: links contribute their
/// label or URL, mentions their ID, and angle brackets around URLs in text
/// runs are stripped.
fn preformatted_text(elements: &[Value]) -> Result<String, ConvertError> {
    let mut content = String::new();
    for (position, element) in elements.iter().enumerate() {
        match element_type(element) {
            "text" => {
                let text = element.get("text").and_then(Value::as_str).unwrap_or("");
                content.push_str(&strip_angle_urls(text));
            }
            "link" => {
                let url = element.get("url").and_then(Value::as_str).unwrap_or("");
                match element.get("text").and_then(Value::as_str) {
                    Some(text) => content.push_str(text),
                    None => content.push_str(url),
                }
            }
            "user" => {
                content.push_str(element.get("user_id").and_then(Value::as_str).unwrap_or(""));
            }
            "channel" => {
                content.push_str(
                    element
                        .get("channel_id")
                        .and_then(Value::as_str)
                        .unwrap_or(""),
                );
            }
            "usergroup" => {
                content.push_str(
                    element
                        .get("usergroup_id")
                        .and_then(Value::as_str)
                        .unwrap_or(""),
                );
            }
            "emoji" => {
                let name = element.get("name").and_then(Value::as_str).unwrap_or("");
                content.push(':');
                content.push_str(name);
                content.push(':');
            }
            "broadcast" => {
                let range = element.get("range").and_then(Value::as_str).unwrap_or("");
                content.push('@');
                content.push_str(range);
            }
            other => {
                return Err(
                    ConvertError::parse(format!("unknown element type: {other}"))
                        .with_element(if other.is_empty() { "<missing>" } else { other })
                        .with_position(position)
                        .with_parent("rich_text_preformatted"),
                );
            }
        }
    }
    Ok(content)
}

fn parse_inline_elements(elements: &[Value], parent: &str) -> Result<Vec<Inline>, ConvertError> {
    elements
        .iter()
        .enumerate()
        .map(|(position, element)| parse_inline_element(element, position, parent))
        .collect()
}

fn parse_inline_element(
    element: &Value,
    position: usize,
    parent: &str,
) -> Result<Inline, ConvertError> {
    match element_type(element) {
        "text" => {
            let content = element
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let style = element.get("style");
            let base = if style_flag(style, "code") {
                Inline::Code(Code { content })
            } else {
                Inline::Text(Text { content })
            };
            Ok(wrap_styles(base, style))
        }
        "link" => {
            let url = element
                .get("url")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            if url.is_empty() {
                return Err(ConvertError::parse("link element has no url")
                    .with_element("link")
                    .with_position(position)
                    .with_parent(parent));
            }
            let children = match element.get("text").and_then(Value::as_str) {
                Some(text) if !text.is_empty() => vec![Inline::text(text)],
                _ => Vec::new(),
            };
            // Style flags wrap the link node itself, so a styled link
            // survives a render/parse cycle intact.
            Ok(wrap_styles(
                Inline::Link(Link { url, children }),
                element.get("style"),
            ))
        }
        "user" => Ok(Inline::UserMention(UserMention {
            user_id: required_id(element, "user_id", position, parent)?,
            username: None,
        })),
        "channel" => Ok(Inline::ChannelMention(ChannelMention {
            channel_id: required_id(element, "channel_id", position, parent)?,
            channel_name: None,
        })),
        "usergroup" => Ok(Inline::UsergroupMention(UsergroupMention {
            usergroup_id: required_id(element, "usergroup_id", position, parent)?,
            usergroup_name: None,
        })),
        "broadcast" => {
            let range = element.get("range").and_then(Value::as_str).unwrap_or("");
            match BroadcastRange::parse(range) {
                Some(range) => Ok(Inline::Broadcast(Broadcast { range })),
                None => Err(
                    ConvertError::parse(format!("unrecognized broadcast range: {range:?}"))
                        .with_element("broadcast")
                        .with_position(position)
                        .with_parent(parent),
                ),
            }
        }
        "emoji" => Ok(Inline::Emoji(Emoji {
            name: element
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            unicode: element
                .get("unicode")
                .and_then(Value::as_str)
                .map(str::to_string),
        })),
        "date" => {
            let timestamp = match element.get("timestamp") {
                Some(Value::Number(n)) => n.as_i64(),
                Some(Value::String(s)) => s.parse::<i64>().ok(),
                _ => None,
            };
            let timestamp = timestamp.ok_or_else(|| {
                ConvertError::parse("date element has no usable timestamp")
                    .with_element("date")
                    .with_position(position)
                    .with_parent(parent)
            })?;
            Ok(Inline::DateTimestamp(DateTimestamp {
                timestamp,
                format: element
                    .get("format")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                fallback: element
                    .get("fallback")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }))
        }
        other => Err(
            ConvertError::parse(format!("unknown element type: {other}"))
                .with_element(if other.is_empty() { "<missing>" } else { other })
                .with_position(position)
                .with_parent(parent),
        ),
    }
}

fn required_id(
    element: &Value,
    field: &str,
    position: usize,
    parent: &str,
) -> Result<String, ConvertError> {
    match element.get(field).and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ConvertError::parse(format!("mention element has no {field}"))
            .with_element(element_type(element))
            .with_position(position)
            .with_parent(parent)),
    }
}

fn style_flag(style: Option<&Value>, key: &str) -> bool {
    style
        .and_then(|s| s.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Wrap a node in style wrappers per its style flags. Wrapping order is
/// bold, then italic, then strikethrough, which puts strikethrough
/// outermost: `Strikethrough ⊃ Italic ⊃ Bold ⊃ Code/Text`.
fn wrap_styles(node: Inline, style: Option<&Value>) -> Inline {
    let mut node = node;
    if style_flag(style, "bold") {
        node = Inline::Bold(Bold {
            children: vec![node],
        });
    }
    if style_flag(style, "italic") {
        node = Inline::Italic(Italic {
            children: vec![node],
        });
    }
    if style_flag(style, "strike") {
        node = Inline::Strikethrough(Strikethrough {
            children: vec![node],
        });
    }
    node
}
