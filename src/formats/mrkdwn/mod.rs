//! mrkdwn format (Slack's legacy inline text format).
//!
//! Pipeline: mrkdwn string → token stream (state machine) → AST.
//! Parse-only: mrkdwn is a migration source, never a render target.

pub mod parser;
pub mod tokenizer;

pub use parser::parse_mrkdwn;
pub use tokenizer::{Token, Tokenizer};

use crate::ast::Document;
use crate::error::ConvertError;
use crate::format::Format;

/// mrkdwn as a registry format.
#[derive(Debug)]
pub struct MrkdwnFormat;

impl Format for MrkdwnFormat {
    fn name(&self) -> &str {
        "mrkdwn"
    }

    fn description(&self) -> &str {
        "Slack mrkdwn text"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mrkdwn"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        parse_mrkdwn(source)
    }
}
