use anyhow::Result;
use evcopy_core::CatalogState;
use owo_colors::OwoColorize;

use crate::session::Session;
use crate::utils::prompt::{prompt_password, prompt_text};

pub async fn run(session: &mut Session, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt_text("Username")?,
    };
    let password = prompt_password("Password")?;

    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Both username and password are required.");
    }

    session.store.set(&username, &password)?;
    tracing::debug!(path = %session.store.path().display(), "saved credentials");

    let state = session.load_catalog().await.clone();

    match state {
        CatalogState::Ready => {}
        CatalogState::AuthFailed(_) => anyhow::bail!(
            "Invalid credentials for {username}.\n\n\
            Check the username and application password, then run `evcopy login` again."
        ),
        CatalogState::Failed(message) => {
            anyhow::bail!("Saved credentials, but the site could not be reached: {message}")
        }
        CatalogState::Idle | CatalogState::Loading => anyhow::bail!("Not logged in."),
    }

    let count = session.catalog().events().len();

    println!("Logged in as {}", username.green());
    println!("Found {count} template event(s). Run `evcopy list` to see them.");

    Ok(())
}
