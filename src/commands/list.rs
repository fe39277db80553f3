use anyhow::Result;

use crate::render::Render;
use crate::session::Session;

pub async fn run(session: &mut Session) -> Result<()> {
    let markers = session.config.template_tags.join("\" or \"");
    let events = session.templates().await?;

    if events.is_empty() {
        println!("No events found with \"{markers}\" tags.");
        return Ok(());
    }

    for event in events {
        println!("{}", event.render());
    }

    Ok(())
}
