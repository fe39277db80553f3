//! HTTP client for the tribe events REST API.

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::copy::CreateEventPayload;
use crate::credentials::Credential;
use crate::error::{EvCopyError, EvCopyResult};
use crate::event::{Event, EventTag};

pub const DEFAULT_BASE_URL: &str = "https://skos.studio/wp-json";

const TAGS_PATH: &str = "/tribe/events/v1/tags";
const EVENTS_PATH: &str = "/tribe/events/v1/events";

/// Lower bound for event listings; far enough back to mean "every event ever created".
pub const STARTS_AFTER: &str = "1980-01-01";

/// Outcome of a gateway call. Without a complete credential no request is made.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    NotReady,
    Ready(T),
}

impl<T> Fetch<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Fetch::Ready(value) => Some(value),
            Fetch::NotReady => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Fetch::Ready(_))
    }
}

// Response envelopes. A missing list means an empty one.

#[derive(Deserialize)]
struct TagsEnvelope {
    #[serde(default)]
    tags: Vec<EventTag>,
}

#[derive(Deserialize)]
struct EventsEnvelope {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl Gateway {
    pub fn new(credential: Credential) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, credential)
    }

    pub fn with_base_url(base_url: impl Into<String>, credential: Credential) -> Self {
        Gateway {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// GET /tribe/events/v1/tags
    pub async fn list_tags(&self) -> EvCopyResult<Fetch<Vec<EventTag>>> {
        if !self.credential.is_complete() {
            return Ok(Fetch::NotReady);
        }

        let envelope: TagsEnvelope = self.read(TAGS_PATH.to_string()).await?;
        Ok(Fetch::Ready(envelope.tags))
    }

    /// GET /tribe/events/v1/events filtered by tag ids
    pub async fn list_events(&self, tag_ids: &[u64]) -> EvCopyResult<Fetch<Vec<Event>>> {
        if !self.credential.is_complete() {
            return Ok(Fetch::NotReady);
        }

        let path = format!(
            "{EVENTS_PATH}?starts_after={STARTS_AFTER}&tags={}",
            join_ids(tag_ids)
        );
        let envelope: EventsEnvelope = self.read(path).await?;
        Ok(Fetch::Ready(envelope.events))
    }

    /// POST /tribe/events/v1/events
    ///
    /// Returns the event as the server stored it, which may differ from the payload.
    pub async fn create_event(&self, payload: &CreateEventPayload) -> EvCopyResult<Fetch<Event>> {
        if !self.credential.is_complete() {
            return Ok(Fetch::NotReady);
        }

        let resp = self
            .http
            .post(format!("{}{}", self.base_url, EVENTS_PATH))
            .basic_auth(&self.credential.username, Some(&self.credential.password))
            .json(payload)
            .send()
            .await?;

        let status = resp.status().as_u16();
        tracing::debug!(method = "POST", path = EVENTS_PATH, status, "events API");

        let body = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(create_error(status, &body));
        }

        decode(&body).map(Fetch::Ready)
    }

    async fn read<T: DeserializeOwned>(&self, path: String) -> EvCopyResult<T> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .basic_auth(&self.credential.username, Some(&self.credential.password))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status().as_u16();
        tracing::debug!(method = "GET", path = %path, status, "events API");

        check_read_status(status)?;

        let body = resp.text().await?;
        decode(&body)
    }
}

/// 401 is a credential problem; every other non-2xx is a fetch failure.
pub fn check_read_status(status: u16) -> EvCopyResult<()> {
    match status {
        200..=299 => Ok(()),
        401 => Err(EvCopyError::Auth),
        status => Err(EvCopyError::Fetch { status }),
    }
}

/// Prefer the server's own `message`, fall back to the status code.
fn create_error(status: u16, body: &str) -> EvCopyError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => EvCopyError::Create(message),
        None => EvCopyError::Create(format!("Failed to create event: {status}")),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> EvCopyResult<T> {
    serde_json::from_str(body).map_err(|e| EvCopyError::Schema(e.to_string()))
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
