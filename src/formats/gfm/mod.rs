//! GitHub Flavored Markdown format.
//!
//! Parsing delegates block and inline tokenization to comrak; rendering is
//! a hand-written visitor walk so the crate controls every emitted byte.

pub mod parser;
pub mod serializer;

pub use parser::parse_gfm;
pub use serializer::{render_gfm, GfmOptions, GfmSerializer};

use crate::ast::Document;
use crate::error::ConvertError;
use crate::format::Format;

/// GFM as a registry format.
#[derive(Debug, Default)]
pub struct GfmFormat {
    options: GfmOptions,
}

impl GfmFormat {
    pub fn new(options: GfmOptions) -> Self {
        GfmFormat { options }
    }

    /// Emit mention deep links scoped to the given team.
    pub fn with_team_id(team_id: impl Into<String>) -> Self {
        GfmFormat {
            options: GfmOptions {
                team_id: Some(team_id.into()),
                lenient: false,
            },
        }
    }
}

impl Format for GfmFormat {
    fn name(&self) -> &str {
        "gfm"
    }

    fn description(&self) -> &str {
        "GitHub Flavored Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        parse_gfm(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        GfmSerializer::new(self.options.clone()).serialize(doc)
    }
}
