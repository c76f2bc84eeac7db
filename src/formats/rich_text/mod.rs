//! Rich Text format (Slack's structured JSON message format).
//!
//! Pipeline: JSON value → AST (parser) and AST → JSON value (serializer).
//! The raw JSON is inspected exactly once, at the parser boundary; past it,
//! everything works on the typed AST.

pub mod parser;
pub mod serializer;

pub use parser::parse_rich_text;
pub use serializer::{render_rich_text, RichTextSerializer};

use crate::ast::Document;
use crate::error::ConvertError;
use crate::format::Format;

/// Rich Text as a registry format. The string representation is the JSON
/// text of a `rich_text` block.
#[derive(Debug)]
pub struct RichTextFormat;

impl Format for RichTextFormat {
    fn name(&self) -> &str {
        "rich-text"
    }

    fn description(&self) -> &str {
        "Slack Rich Text JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        let value: serde_json::Value = serde_json::from_str(source)
            .map_err(|e| ConvertError::validation(format!("invalid JSON: {e}")))?;
        parse_rich_text(&value)
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        let value = render_rich_text(doc)?;
        serde_json::to_string(&value)
            .map_err(|e| ConvertError::render(format!("JSON serialization failed: {e}")))
    }
}
