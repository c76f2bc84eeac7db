//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing documents.

use crate::ast::Document;
use crate::error::ConvertError;

/// Trait for message formats
///
/// Implementors provide conversion between a string representation and the
/// common Document AST. Formats can support parsing, serialization, or both
/// (mrkdwn, for example, is parse-only: it is a migration source, never a
/// target).
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, ConvertError> {
///         // Parse source to Document
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync + std::fmt::Debug {
    /// The name of this format (e.g., "rich-text", "mrkdwn", "gfm")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns a validation error.
    /// Formats that support parsing should override this method.
    fn parse(&self, _source: &str) -> Result<Document, ConvertError> {
        Err(ConvertError::validation(format!(
            "format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    ///
    /// Default implementation returns a validation error.
    /// Formats that support serialization should override this method.
    fn serialize(&self, _doc: &Document) -> Result<String, ConvertError> {
        Err(ConvertError::validation(format!(
            "format '{}' does not support serialization",
            self.name()
        )))
    }
}
