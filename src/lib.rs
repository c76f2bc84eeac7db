//! Conversion between Slack message formats and GitHub Flavored Markdown
//!
//! ```text
//! This crate converts between three representations of short-form
//! formatted text: Slack Rich Text (structured JSON), Slack mrkdwn
//! (the legacy inline format), and GitHub Flavored Markdown.
//! Supported directions are Rich Text ↔ GFM (round-trip) and
//! mrkdwn → GFM (one-way migration).
//! ```
//!
//! Architecture
//!
//! ```text
//! Every conversion pivots through a common AST (./ast/nodes.rs); no
//! format ever talks to another format directly. Decoders produce a
//! Document, transformers (./transforms.rs) rewrite it, encoders
//! consume it. This keeps the format code focused on its own syntax
//! while the interesting logic — ID mapping, style normalization —
//! is written once against the AST.
//!
//! The file structure:
//! .
//! ├── error.rs                # ConvertError taxonomy
//! ├── format.rs               # Format trait definition
//! ├── registry.rs             # FormatRegistry for discovery and selection
//! ├── formats
//! │   ├── rich_text           # JSON ↔ AST
//! │   ├── mrkdwn              # tokenizer + parser (parse-only)
//! │   ├── gfm                 # comrak parse, hand-written render
//! │   └── treeviz             # debug AST printer
//! ├── ast                     # nodes + transform visitor
//! ├── common                  # flattening, deep-link helpers
//! └── transforms.rs           # IdMapper, CallbackMapper
//! ```
//!
//! Library choices
//!
//! ```text
//! GFM block/inline tokenization is comrak's job; writing a Markdown
//! parser is not this crate's business. Rendering, however, is done
//! by hand: the platform cares about exact bytes (fence newline
//! placement, no trailing newline, deep-link query order) and a
//! general-purpose formatter does not owe us any of that. mrkdwn has
//! no grammar to delegate to, so its tokenizer lives here.
//!
//! This is a pure library: no I/O, no environment access, no global
//! state. Renderer configuration travels in explicit option structs.
//! All operations are synchronous and deterministic; callers may run
//! conversions concurrently without coordination.
//! ```

pub mod ast;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod transforms;

pub use ast::visitor::{transform_document, Visitor};
pub use ast::{Block, Document, Inline};
pub use error::{ConvertError, ErrorContext};
pub use format::Format;
pub use formats::gfm::{parse_gfm, render_gfm, GfmOptions, GfmSerializer};
pub use formats::mrkdwn::parse_mrkdwn;
pub use formats::rich_text::{parse_rich_text, render_rich_text, RichTextSerializer};
pub use formats::treeviz::to_treeviz_str;
pub use registry::FormatRegistry;
pub use transforms::{apply_id_mappings, CallbackMapper, IdMapper, IdMappings};

use ast::nodes::{Paragraph, Text};
use serde_json::Value;
use std::collections::HashMap;

/// Options for the top-level conversion calls.
///
/// The default is best-effort: a failed decode degrades to a single
/// paragraph holding the raw input, and a failed render substitutes the
/// offending subtree's printable form. Set `strict` to propagate errors
/// instead.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Team ID for mention deep links (`team=` before `id=`).
    pub team_id: Option<String>,
    /// Propagate errors instead of degrading.
    pub strict: bool,
    /// User ID → username map applied before rendering.
    pub user_map: HashMap<String, String>,
    /// Channel ID → channel name map applied before rendering.
    pub channel_map: HashMap<String, String>,
    /// Usergroup ID → usergroup name map applied before rendering.
    pub usergroup_map: HashMap<String, String>,
}

impl ConvertOptions {
    fn mappings(&self) -> IdMappings {
        IdMappings {
            users: self.user_map.clone(),
            channels: self.channel_map.clone(),
            usergroups: self.usergroup_map.clone(),
        }
    }

    fn gfm_options(&self) -> GfmOptions {
        GfmOptions {
            team_id: self.team_id.clone(),
            lenient: !self.strict,
        }
    }
}

/// Convert Slack Rich Text JSON to GitHub Flavored Markdown.
///
/// Mentions and broadcasts become links with `slack://` URLs so that no
/// information is lost and [`gfm_to_rich_text`] can reverse the trip.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use slack_gfm::{rich_text_to_gfm, ConvertOptions};
///
/// let rich_text = json!({
///     "type": "rich_text",
///     "elements": [{
///         "type": "rich_text_section",
///         "elements": [
///             {"type": "text", "text": "Hi "},
///             {"type": "user", "user_id": "U1"}
///         ]
///     }]
/// });
/// let gfm = rich_text_to_gfm(&rich_text, &ConvertOptions::default()).unwrap();
/// assert_eq!(gfm, "Hi [U1](slack://user?id=U1)");
/// ```
pub fn rich_text_to_gfm(value: &Value, options: &ConvertOptions) -> Result<String, ConvertError> {
    let doc = match parse_rich_text(value) {
        Ok(doc) => doc,
        Err(err) if !options.strict => degraded_input(&err, value.to_string()),
        Err(err) => return Err(err),
    };
    let doc = apply_id_mappings(doc, &options.mappings())?;
    GfmSerializer::new(options.gfm_options()).serialize(&doc)
}

/// Convert GitHub Flavored Markdown to Slack Rich Text JSON.
///
/// Recognizes `slack://` deep links and restores them as Rich Text user,
/// channel, usergroup and broadcast elements.
pub fn gfm_to_rich_text(gfm: &str, options: &ConvertOptions) -> Result<Value, ConvertError> {
    let doc = match parse_gfm(gfm) {
        Ok(doc) => doc,
        Err(err) if !options.strict => degraded_input(&err, gfm.to_string()),
        Err(err) => return Err(err),
    };
    let doc = apply_id_mappings(doc, &options.mappings())?;
    let serializer = if options.strict {
        RichTextSerializer::new()
    } else {
        RichTextSerializer::lenient()
    };
    serializer.serialize(&doc)
}

/// Convert Slack mrkdwn to GitHub Flavored Markdown.
///
/// The migration path for legacy messages. Note the whitespace
/// convention: a single newline inside an mrkdwn paragraph becomes a
/// space (Rich Text, by contrast, preserves it).
///
/// # Example
///
/// ```
/// use slack_gfm::{mrkdwn_to_gfm, ConvertOptions};
///
/// let gfm = mrkdwn_to_gfm("*Hello* <@U123|john>", &ConvertOptions::default()).unwrap();
/// assert_eq!(gfm, "**Hello** [@john](slack://user?id=U123&name=john)");
/// ```
pub fn mrkdwn_to_gfm(mrkdwn: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
    let doc = match parse_mrkdwn(mrkdwn) {
        Ok(doc) => doc,
        Err(err) if !options.strict => degraded_input(&err, mrkdwn.to_string()),
        Err(err) => return Err(err),
    };
    let doc = apply_id_mappings(doc, &options.mappings())?;
    GfmSerializer::new(options.gfm_options()).serialize(&doc)
}

/// Best-effort fallback: keep the raw input as a single paragraph.
fn degraded_input(err: &ConvertError, raw: String) -> Document {
    tracing::warn!(error = %err, "decode failed, wrapping raw input");
    Document {
        blocks: vec![Block::Paragraph(Paragraph {
            children: vec![Inline::Text(Text { content: raw })],
        })],
    }
}
