use anyhow::Result;
use evcopy_core::CatalogState;
use owo_colors::OwoColorize;

use crate::session::Session;

pub async fn run(session: &mut Session) -> Result<()> {
    if !session.credential().is_complete() {
        println!("Not logged in. Run `evcopy login`.");
        return Ok(());
    }

    let username = session.credential().username.clone();
    let state = session.load_catalog().await.clone();

    match state {
        CatalogState::Ready => {
            println!("{} Logged in as {}", "✓".green(), username.green());
        }
        CatalogState::AuthFailed(_) => {
            println!("{} Authentication failed for {}", "✗".red(), username.red());
            println!("   Invalid credentials");
        }
        CatalogState::Failed(message) => {
            println!("{} Logged in as {}", "✗".red(), username.red());
            println!("   Connection error: {message}");
        }
        CatalogState::Idle | CatalogState::Loading => {
            println!("Not logged in. Run `evcopy login`.");
        }
    }

    println!(
        "   {}",
        format!("Credentials: {}", session.store.path().display()).dimmed()
    );

    Ok(())
}
