//! Config, saved credentials and the template catalog for one CLI invocation.

use anyhow::Result;
use evcopy_core::config::EvCopyConfig;
use evcopy_core::gateway::DEFAULT_BASE_URL;
use evcopy_core::{Catalog, CatalogState, Credential, CredentialStore, Event, Gateway};

use crate::utils::tui::create_spinner;

pub struct Session {
    pub config: EvCopyConfig,
    pub store: CredentialStore,
    catalog: Catalog,
}

impl Session {
    pub fn load() -> Result<Self> {
        let config = EvCopyConfig::load()?;
        let store = CredentialStore::open_default(config.empty_field_policy)?;

        Ok(Session {
            config,
            store,
            catalog: Catalog::new(),
        })
    }

    pub fn credential(&self) -> &Credential {
        self.store.get()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn gateway(&self) -> Gateway {
        Gateway::with_base_url(DEFAULT_BASE_URL, self.store.get().clone())
    }

    pub fn require_login(&self) -> Result<()> {
        if !self.store.get().is_complete() {
            anyhow::bail!(
                "Not logged in.\n\n\
                Log in with:\n  \
                evcopy login"
            );
        }
        Ok(())
    }

    /// Fetch template events with the saved credentials.
    pub async fn load_catalog(&mut self) -> &CatalogState {
        self.catalog.set_credentials(self.store.get());

        let spinner = create_spinner("Loading template events...".to_string());
        self.catalog
            .refresh(DEFAULT_BASE_URL, &self.config.template_tags)
            .await;
        spinner.finish_and_clear();

        self.catalog.state()
    }

    /// Template events, or an error explaining why there are none to show.
    pub async fn templates(&mut self) -> Result<&[Event]> {
        self.require_login()?;

        let state = self.load_catalog().await.clone();

        match state {
            CatalogState::Ready => Ok(self.catalog.events()),
            CatalogState::AuthFailed(_) => anyhow::bail!(
                "Invalid credentials for {}.\n\n\
                Log in again with:\n  \
                evcopy login",
                self.store.get().username
            ),
            CatalogState::Failed(message) => anyhow::bail!("Connection error: {message}"),
            CatalogState::Idle | CatalogState::Loading => anyhow::bail!("Not logged in."),
        }
    }

    pub async fn template(&mut self, id: u64) -> Result<Event> {
        let markers = self.config.template_tags.join(", ");
        let events = self.templates().await?;

        events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Event {id} is not a template event (tagged {markers}).\n\
                    See `evcopy list` for available events."
                )
            })
    }
}
