//! Deep-link helpers for platform entity references.
//!
//! Mentions have no GFM syntax, so they travel as ordinary links with a
//! `slack://` URL carrying the entity kind and its query parameters. This
//! module owns both directions: building the URLs with a fixed parameter
//! order (`team`, then `id`, then `name` — kept deterministic so emitted
//! documents are byte-stable) and parsing them back into mention nodes.
//!
//! Parsers accept query parameters in any order and ignore unknown ones.

use crate::ast::nodes::{
    Broadcast, BroadcastRange, ChannelMention, DateTimestamp, Inline, UserMention,
    UsergroupMention,
};
use url::form_urlencoded;
use url::Url;

/// The URL scheme used for entity deep links.
pub const DEEP_LINK_SCHEME: &str = "slack";

/// Build a `slack://user` deep link.
pub fn user_link(user_id: &str, username: Option<&str>, team_id: Option<&str>) -> String {
    entity_link("user", team_id, user_id, username)
}

/// Build a `slack://channel` deep link.
pub fn channel_link(channel_id: &str, channel_name: Option<&str>, team_id: Option<&str>) -> String {
    entity_link("channel", team_id, channel_id, channel_name)
}

/// Build a `slack://usergroup` deep link.
pub fn usergroup_link(
    usergroup_id: &str,
    usergroup_name: Option<&str>,
    team_id: Option<&str>,
) -> String {
    entity_link("usergroup", team_id, usergroup_id, usergroup_name)
}

/// Build a `slack://broadcast` deep link.
pub fn broadcast_link(range: BroadcastRange) -> String {
    format!("slack://broadcast?range={}", range.as_str())
}

/// Build a `slack://date` deep link.
pub fn date_link(timestamp: i64, format: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("ts", &timestamp.to_string());
    if let Some(format) = format {
        query.append_pair("format", format);
    }
    format!("slack://date?{}", query.finish())
}

fn entity_link(entity: &str, team_id: Option<&str>, id: &str, name: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(team) = team_id {
        query.append_pair("team", team);
    }
    query.append_pair("id", id);
    if let Some(name) = name {
        query.append_pair("name", name);
    }
    format!("slack://{entity}?{}", query.finish())
}

/// Parse a deep-link URL back into a mention node.
///
/// `label` is the flattened link label; it supplies the display name when
/// no `name` parameter is present, and the fallback text for date links.
/// Returns `None` when the URL is not a recognized deep link, in which
/// case the caller keeps it as a plain link.
pub fn parse_deep_link(url: &str, label: &str) -> Option<Inline> {
    let parsed = Url::parse(url).ok()?;
    if parsed.scheme() != DEEP_LINK_SCHEME {
        return None;
    }
    let entity = parsed.host_str()?;

    let mut id = None;
    let mut name = None;
    let mut range = None;
    let mut ts = None;
    let mut format = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "id" => id = Some(value.into_owned()),
            "name" => name = Some(value.into_owned()),
            "range" => range = Some(value.into_owned()),
            // Older payloads used `type` for the broadcast range.
            "type" => {
                if range.is_none() {
                    range = Some(value.into_owned());
                }
            }
            "ts" => ts = Some(value.into_owned()),
            "format" => format = Some(value.into_owned()),
            _ => {}
        }
    }

    match entity {
        "user" => {
            let user_id = id?;
            let username = name.or_else(|| label_name(label, '@', &user_id));
            Some(Inline::UserMention(UserMention { user_id, username }))
        }
        "channel" => {
            let channel_id = id?;
            let channel_name = name.or_else(|| label_name(label, '#', &channel_id));
            Some(Inline::ChannelMention(ChannelMention {
                channel_id,
                channel_name,
            }))
        }
        "usergroup" => {
            let usergroup_id = id?;
            let usergroup_name = name.or_else(|| label_name(label, '@', &usergroup_id));
            Some(Inline::UsergroupMention(UsergroupMention {
                usergroup_id,
                usergroup_name,
            }))
        }
        "broadcast" => BroadcastRange::parse(range.as_deref()?)
            .map(|range| Inline::Broadcast(Broadcast { range })),
        "date" => {
            let timestamp = ts?.parse::<i64>().ok()?;
            let fallback = if label.is_empty() {
                None
            } else {
                Some(label.to_string())
            };
            Some(Inline::DateTimestamp(DateTimestamp {
                timestamp,
                format,
                fallback,
            }))
        }
        _ => None,
    }
}

/// Derive a display name from the visible label: strip the sigil and
/// reject labels that are just the ID echoed back.
fn label_name(label: &str, sigil: char, id: &str) -> Option<String> {
    let trimmed = label.strip_prefix(sigil).unwrap_or(label);
    if trimmed.is_empty() || trimmed == id {
        None
    } else if label.starts_with(sigil) {
        Some(trimmed.to_string())
    } else {
        None
    }
}
