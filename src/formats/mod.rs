//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the common AST and the concrete message representations.

pub mod gfm;
pub mod mrkdwn;
pub mod rich_text;
pub mod treeviz;

pub use gfm::GfmFormat;
pub use mrkdwn::MrkdwnFormat;
pub use rich_text::RichTextFormat;
pub use treeviz::TreevizFormat;
