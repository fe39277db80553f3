//! Session state: the template events visible with the current credentials.
//!
//! ```text
//! Idle ──credentials──▶ Loading ──ok──▶ Ready
//!                          │    ──401─▶ AuthFailed
//!                          │    ──err─▶ Failed
//! any ──incomplete credentials──▶ Idle
//! ```
//!
//! Results are tagged with the credential that produced them; a result that
//! arrives after the credential changed is dropped.

use crate::credentials::Credential;
use crate::error::{EvCopyError, EvCopyResult};
use crate::event::Event;
use crate::gateway::{Fetch, Gateway};
use crate::tags::resolve_tag_ids;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Idle,
    Loading,
    Ready,
    AuthFailed(String),
    Failed(String),
}

/// Handed out when a fetch starts, handed back with its result.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    credential: Credential,
    generation: u64,
}

impl FetchTicket {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    credential: Credential,
    generation: u64,
    state: CatalogState,
    events: Vec<Event>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Complete credentials move to Loading (also out of a failed state),
    /// anything less moves to Idle.
    pub fn set_credentials(&mut self, credential: &Credential) {
        if *credential != self.credential {
            self.generation += 1;
            self.events.clear();
            self.credential = credential.clone();
        }

        self.state = if credential.is_complete() {
            CatalogState::Loading
        } else {
            CatalogState::Idle
        };
    }

    /// Start a fetch with the current credential. None while Idle.
    pub fn begin(&mut self) -> Option<FetchTicket> {
        if !self.credential.is_complete() {
            self.state = CatalogState::Idle;
            return None;
        }

        self.generation += 1;
        self.state = CatalogState::Loading;

        Some(FetchTicket {
            credential: self.credential.clone(),
            generation: self.generation,
        })
    }

    /// Apply a fetch result. Returns false when the result was stale and ignored.
    pub fn complete(&mut self, ticket: FetchTicket, result: EvCopyResult<Fetch<Vec<Event>>>) -> bool {
        if ticket.credential != self.credential || ticket.generation != self.generation {
            tracing::debug!("discarding stale catalog result");
            return false;
        }

        self.state = match result {
            Ok(Fetch::Ready(events)) => {
                tracing::info!(count = events.len(), "template events loaded");
                self.events = events;
                CatalogState::Ready
            }
            Ok(Fetch::NotReady) => CatalogState::Idle,
            Err(EvCopyError::Auth) => {
                tracing::warn!("events API rejected credentials");
                CatalogState::AuthFailed(EvCopyError::Auth.to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading template events failed");
                CatalogState::Failed(e.to_string())
            }
        };

        true
    }

    /// Fetch tags, resolve the marker tags, then fetch the tagged events.
    pub async fn refresh(&mut self, base_url: &str, markers: &[String]) -> &CatalogState {
        let Some(ticket) = self.begin() else {
            return &self.state;
        };

        let gateway = Gateway::with_base_url(base_url, ticket.credential().clone());
        let result = load_templates(&gateway, markers).await;
        self.complete(ticket, result);

        &self.state
    }
}

/// The two dependent requests behind a catalog refresh.
pub async fn load_templates(gateway: &Gateway, markers: &[String]) -> EvCopyResult<Fetch<Vec<Event>>> {
    let Fetch::Ready(tags) = gateway.list_tags().await? else {
        return Ok(Fetch::NotReady);
    };

    let tag_ids = resolve_tag_ids(&tags, markers)?;
    tracing::debug!(?tag_ids, "resolved template tags");

    gateway.list_events(&tag_ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn creds() -> Credential {
        Credential::new("editor", "hunter2")
    }

    fn event(id: u64) -> Event {
        serde_json::from_value(json!({
            "id": id,
            "title": "Monthly Meetup",
            "slug": "monthly-meetup",
            "start_date": "2024-01-05 18:00:00",
            "end_date": "2024-01-05 20:00:00",
        }))
        .unwrap()
    }

    #[test]
    fn starts_idle() {
        let catalog = Catalog::new();
        assert_eq!(catalog.state(), &CatalogState::Idle);
        assert!(catalog.events().is_empty());
    }

    #[test]
    fn credentials_drive_idle_and_loading() {
        let mut catalog = Catalog::new();

        catalog.set_credentials(&Credential::new("editor", ""));
        assert_eq!(catalog.state(), &CatalogState::Idle);

        catalog.set_credentials(&creds());
        assert_eq!(catalog.state(), &CatalogState::Loading);

        catalog.set_credentials(&Credential::new("", "hunter2"));
        assert_eq!(catalog.state(), &CatalogState::Idle);
    }

    #[test]
    fn successful_fetch_is_ready() {
        let mut catalog = Catalog::new();
        catalog.set_credentials(&creds());

        let ticket = catalog.begin().unwrap();
        assert!(catalog.complete(ticket, Ok(Fetch::Ready(vec![event(1), event(2)]))));

        assert_eq!(catalog.state(), &CatalogState::Ready);
        assert_eq!(catalog.find(2).map(|e| e.id), Some(2));
        assert!(catalog.find(3).is_none());
    }

    #[test]
    fn auth_and_other_failures_are_distinct() {
        let mut catalog = Catalog::new();
        catalog.set_credentials(&creds());

        let ticket = catalog.begin().unwrap();
        catalog.complete(ticket, Err(EvCopyError::Auth));
        assert!(matches!(catalog.state(), CatalogState::AuthFailed(_)));

        let ticket = catalog.begin().unwrap();
        catalog.complete(ticket, Err(EvCopyError::Fetch { status: 500 }));
        assert_eq!(
            catalog.state(),
            &CatalogState::Failed("Failed to fetch from events API: 500".into())
        );
    }

    #[test]
    fn resupplying_credentials_after_failure_reloads() {
        let mut catalog = Catalog::new();
        catalog.set_credentials(&creds());
        let ticket = catalog.begin().unwrap();
        catalog.complete(ticket, Err(EvCopyError::Auth));

        catalog.set_credentials(&Credential::new("editor", "correct-horse"));
        assert_eq!(catalog.state(), &CatalogState::Loading);
    }

    #[test]
    fn begin_without_credentials_is_none() {
        let mut catalog = Catalog::new();
        assert!(catalog.begin().is_none());
        assert_eq!(catalog.state(), &CatalogState::Idle);
    }

    #[test]
    fn stale_result_after_credential_change_is_dropped() {
        let mut catalog = Catalog::new();
        catalog.set_credentials(&creds());
        let ticket = catalog.begin().unwrap();

        // Password changed while the request was in flight
        catalog.set_credentials(&Credential::new("editor", "new-password"));

        assert!(!catalog.complete(ticket, Ok(Fetch::Ready(vec![event(1)]))));
        assert_eq!(catalog.state(), &CatalogState::Loading);
        assert!(catalog.events().is_empty());
    }

    #[test]
    fn superseded_fetch_is_dropped() {
        let mut catalog = Catalog::new();
        catalog.set_credentials(&creds());
        let first = catalog.begin().unwrap();
        let second = catalog.begin().unwrap();

        assert!(!catalog.complete(first, Err(EvCopyError::Auth)));
        assert!(catalog.complete(second, Ok(Fetch::Ready(vec![event(1)]))));
        assert_eq!(catalog.state(), &CatalogState::Ready);
    }
}
