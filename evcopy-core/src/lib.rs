//! Core of evcopy: copy template events on a WordPress site running the
//! tribe events REST API.
//!
//! - `credentials`: the saved username/password
//! - `gateway`: the three REST calls
//! - `catalog`: template events for the current session
//! - `copy`: building the creation payload from a template

pub mod catalog;
pub mod config;
pub mod copy;
pub mod credentials;
pub mod description;
pub mod error;
pub mod event;
pub mod gateway;
pub mod tags;

pub use catalog::{Catalog, CatalogState};
pub use copy::{CopyDefaults, CopyPolicy, CreateEventPayload, EventCopyRequest, build_copy_payload};
pub use credentials::{Credential, CredentialStore};
pub use error::{EvCopyError, EvCopyResult};
pub use event::{Event, EventTag};
pub use gateway::{Fetch, Gateway};
