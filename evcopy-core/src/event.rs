//! Event and tag types as served by the tribe events REST API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A tag from `/tribe/events/v1/tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTag {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

impl EventTag {
    /// Name matches case-insensitively, slug matches exactly.
    pub fn matches(&self, marker: &str) -> bool {
        self.name.to_lowercase() == marker.to_lowercase() || self.slug == marker
    }
}

/// A tag as embedded in an event. Only `id` is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl TagRef {
    pub fn is_marker(&self, marker: &str) -> bool {
        self.slug.as_deref() == Some(marker)
            || self
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase() == marker.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImage {
    pub id: u64,
    pub url: String,
}

/// Venue or organizer reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub slug: String,

    /// HTML as stored by WordPress. Sanitize before showing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub start_date: String,
    pub end_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "image", skip_serializing_if = "Option::is_none")]
    pub image: Option<EventImage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagRef>>,

    #[serde(default, deserialize_with = "entity", skip_serializing_if = "Option::is_none")]
    pub venue: Option<EntityRef>,

    #[serde(default, deserialize_with = "entity", skip_serializing_if = "Option::is_none")]
    pub organizer: Option<EntityRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_id_lineage: Option<Vec<String>>,

    /// Every other field the server sent, kept so a copy can carry it over.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Event {
    pub fn start(&self) -> Option<NaiveDateTime> {
        parse_local_datetime(&self.start_date)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        parse_local_datetime(&self.end_date)
    }
}

/// Parse the API's zone-less date-times ("2024-01-05 18:00:00" or "2024-01-05T18:00:00").
pub fn parse_local_datetime(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

// The API says "no image" with `false` and "no venue" with `[]`.

fn image<'de, D>(deserializer: D) -> Result<Option<EventImage>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(value) => EventImage::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn entity<'de, D>(deserializer: D) -> Result<Option<EntityRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(None),
        Some(Value::Array(items)) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        Some(value) => value,
    };

    EntityRef::deserialize(value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}
