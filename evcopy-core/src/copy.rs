//! Turning a template event into a creation payload.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::Event;

/// Tag that marks template events; never inherited by a copy.
pub const TEMPLATE_MARKER: &str = "template";

const COPY_SUFFIX: &str = " (Copy)";

/// Keys the payload sets itself; a value of the same name in the source is dropped.
const PAYLOAD_KEYS: &[&str] = &["status"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePolicy {
    #[default]
    Unchanged,
    AppendCopy,
}

impl TitlePolicy {
    fn apply(self, title: &str) -> String {
        match self {
            TitlePolicy::Unchanged => title.to_string(),
            TitlePolicy::AppendCopy => format!("{title}{COPY_SUFFIX}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPolicy {
    pub title: TitlePolicy,
}

/// New schedule and visibility for a copy. Dates are `YYYY-MM-DD`, times `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCopyRequest {
    pub new_start_date: String,
    pub new_start_time: String,
    pub new_end_date: String,
    pub new_end_time: String,
    pub is_public: bool,
}

impl EventCopyRequest {
    /// Names of the fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("start date", &self.new_start_date),
            ("start time", &self.new_start_time),
            ("end date", &self.new_end_date),
            ("end time", &self.new_end_time),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Publish,
    Private,
}

impl EventStatus {
    pub fn from_public(is_public: bool) -> Self {
        if is_public {
            EventStatus::Publish
        } else {
            EventStatus::Private
        }
    }
}

/// Body for `POST /tribe/events/v1/events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEventPayload {
    /// Carried over from the source event
    #[serde(flatten)]
    pub carried: serde_json::Map<String, Value>,

    pub title: String,
    pub slug: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub start_date: String,
    pub end_date: String,
    pub status: EventStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub tags: Vec<u64>,
    pub venue: Option<u64>,
    pub organizer: Option<u64>,
}

pub fn build_copy_payload(
    source: &Event,
    request: &EventCopyRequest,
    policy: &CopyPolicy,
) -> CreateEventPayload {
    let mut carried = source.extra.clone();
    for key in PAYLOAD_KEYS {
        carried.remove(*key);
    }

    let tags = source
        .tags
        .iter()
        .flatten()
        .filter(|tag| !tag.is_marker(TEMPLATE_MARKER))
        .map(|tag| tag.id)
        .collect();

    CreateEventPayload {
        carried,
        title: policy.title.apply(&source.title),
        slug: copy_slug(&source.slug, &request.new_start_date),
        description: source.description.clone(),
        url: source.url.clone(),
        start_date: join_date_time(&request.new_start_date, &request.new_start_time),
        end_date: join_date_time(&request.new_end_date, &request.new_end_time),
        status: EventStatus::from_public(request.is_public),
        image: source.image.as_ref().map(|image| image.url.clone()),
        tags,
        venue: source.venue.map(|v| v.id),
        organizer: source.organizer.map(|o| o.id),
    }
}

/// `2024-03-10` + `19:00` → `2024-03-10T19:00:00`
pub fn join_date_time(date: &str, time: &str) -> String {
    format!("{date}T{time}:00")
}

/// Whitespace runs become a single hyphen, then the new start date is appended.
pub fn copy_slug(slug: &str, start_date: &str) -> String {
    let base = slug.split_whitespace().collect::<Vec<_>>().join("-");

    // Leading/trailing whitespace still counts as a run
    let lead = if slug.starts_with(char::is_whitespace) { "-" } else { "" };
    let trail = if slug.ends_with(char::is_whitespace) && !base.is_empty() {
        "-"
    } else {
        ""
    };

    format!("{lead}{base}{trail}-{start_date}")
}

/// Values the copy form starts with: the source's own schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDefaults {
    pub start_date: String,
    pub start_time: String,
    pub end_time: String,
}

impl CopyDefaults {
    pub fn from_event(source: &Event) -> Option<Self> {
        let start = source.start()?;
        let end = source.end()?;

        Some(CopyDefaults {
            start_date: start.date().format("%Y-%m-%d").to_string(),
            start_time: format!("{:02}:{:02}", start.hour(), start.minute()),
            end_time: format!("{:02}:{:02}", end.hour(), end.minute()),
        })
    }
}
