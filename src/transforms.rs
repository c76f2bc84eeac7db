//! AST transformers.
//!
//! The platform's structured payloads carry entity IDs, not names; these
//! visitors decorate mention nodes with display names before rendering.
//! `IdMapper` works from static maps, `CallbackMapper` from caller-supplied
//! functions (an API lookup, a cache). Both leave non-matching nodes
//! untouched and never reorder anything.

use crate::ast::nodes::{ChannelMention, Document, Inline, UserMention, UsergroupMention};
use crate::ast::visitor::{transform_document, walk_inline, Visitor};
use crate::error::ConvertError;
use serde_json::Value;
use std::collections::HashMap;

/// ID → display-name maps for the three mention kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdMappings {
    pub users: HashMap<String, String>,
    pub channels: HashMap<String, String>,
    pub usergroups: HashMap<String, String>,
}

impl IdMappings {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.channels.is_empty() && self.usergroups.is_empty()
    }

    /// Build mappings from a JSON object of the shape
    /// `{"users": {...}, "channels": {...}, "usergroups": {...}}`.
    ///
    /// Every value must be a string; anything else is rejected here, at
    /// the boundary, rather than surfacing later inside a render.
    pub fn from_value(value: &Value) -> Result<Self, ConvertError> {
        let Value::Object(map) = value else {
            return Err(ConvertError::validation("mappings must be a JSON object"));
        };
        let mut mappings = IdMappings::default();
        for (key, table) in map {
            let target = match key.as_str() {
                "users" => &mut mappings.users,
                "channels" => &mut mappings.channels,
                "usergroups" => &mut mappings.usergroups,
                other => {
                    return Err(ConvertError::validation(format!(
                        "unknown mapping kind: {other}"
                    ))
                    .with_element(other));
                }
            };
            let Value::Object(entries) = table else {
                return Err(
                    ConvertError::validation(format!("mapping '{key}' must be an object"))
                        .with_element(key),
                );
            };
            for (id, name) in entries {
                match name {
                    Value::String(name) => {
                        target.insert(id.clone(), name.clone());
                    }
                    other => {
                        return Err(ConvertError::validation(format!(
                            "mapping value for {id:?} must be a string, got {other}"
                        ))
                        .with_element(id)
                        .with_parent(key));
                    }
                }
            }
        }
        Ok(mappings)
    }
}

/// Visitor that fills mention display names from ID maps.
pub struct IdMapper {
    mappings: IdMappings,
}

impl IdMapper {
    pub fn new(mappings: IdMappings) -> Self {
        IdMapper { mappings }
    }
}

impl Visitor for IdMapper {
    fn visit_inline(&mut self, inline: Inline) -> Result<Inline, ConvertError> {
        match inline {
            Inline::UserMention(mut m) => {
                if let Some(name) = self.mappings.users.get(&m.user_id) {
                    m.username = Some(name.clone());
                }
                Ok(Inline::UserMention(m))
            }
            Inline::ChannelMention(mut m) => {
                if let Some(name) = self.mappings.channels.get(&m.channel_id) {
                    m.channel_name = Some(name.clone());
                }
                Ok(Inline::ChannelMention(m))
            }
            Inline::UsergroupMention(mut m) => {
                if let Some(name) = self.mappings.usergroups.get(&m.usergroup_id) {
                    m.usergroup_name = Some(name.clone());
                }
                Ok(Inline::UsergroupMention(m))
            }
            other => walk_inline(self, other),
        }
    }
}

/// Apply ID mappings to a document.
pub fn apply_id_mappings(doc: Document, mappings: &IdMappings) -> Result<Document, ConvertError> {
    if mappings.is_empty() {
        return Ok(doc);
    }
    let mut mapper = IdMapper::new(mappings.clone());
    transform_document(&mut mapper, doc)
}

type UserCallback = Box<dyn FnMut(UserMention) -> Result<UserMention, ConvertError>>;
type ChannelCallback = Box<dyn FnMut(ChannelMention) -> Result<ChannelMention, ConvertError>>;
type UsergroupCallback = Box<dyn FnMut(UsergroupMention) -> Result<UsergroupMention, ConvertError>>;

/// Visitor that rewrites mention nodes through caller-supplied callbacks.
///
/// Callback failures surface as transform errors naming the node kind.
#[derive(Default)]
pub struct CallbackMapper {
    user_callback: Option<UserCallback>,
    channel_callback: Option<ChannelCallback>,
    usergroup_callback: Option<UsergroupCallback>,
}

impl CallbackMapper {
    pub fn new() -> Self {
        CallbackMapper::default()
    }

    pub fn on_user(
        mut self,
        callback: impl FnMut(UserMention) -> Result<UserMention, ConvertError> + 'static,
    ) -> Self {
        self.user_callback = Some(Box::new(callback));
        self
    }

    pub fn on_channel(
        mut self,
        callback: impl FnMut(ChannelMention) -> Result<ChannelMention, ConvertError> + 'static,
    ) -> Self {
        self.channel_callback = Some(Box::new(callback));
        self
    }

    pub fn on_usergroup(
        mut self,
        callback: impl FnMut(UsergroupMention) -> Result<UsergroupMention, ConvertError> + 'static,
    ) -> Self {
        self.usergroup_callback = Some(Box::new(callback));
        self
    }
}

impl Visitor for CallbackMapper {
    fn visit_inline(&mut self, inline: Inline) -> Result<Inline, ConvertError> {
        match inline {
            Inline::UserMention(m) => match &mut self.user_callback {
                Some(callback) => callback(m)
                    .map(Inline::UserMention)
                    .map_err(|e| callback_error("UserMention", e)),
                None => Ok(Inline::UserMention(m)),
            },
            Inline::ChannelMention(m) => match &mut self.channel_callback {
                Some(callback) => callback(m)
                    .map(Inline::ChannelMention)
                    .map_err(|e| callback_error("ChannelMention", e)),
                None => Ok(Inline::ChannelMention(m)),
            },
            Inline::UsergroupMention(m) => match &mut self.usergroup_callback {
                Some(callback) => callback(m)
                    .map(Inline::UsergroupMention)
                    .map_err(|e| callback_error("UsergroupMention", e)),
                None => Ok(Inline::UsergroupMention(m)),
            },
            other => walk_inline(self, other),
        }
    }
}

fn callback_error(node_kind: &str, err: ConvertError) -> ConvertError {
    ConvertError::transform(format!("callback failed: {}", err.message()))
        .with_element(node_kind)
}
