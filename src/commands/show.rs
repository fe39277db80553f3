use anyhow::Result;
use evcopy_core::description;
use owo_colors::OwoColorize;

use crate::render::render_date_time;
use crate::session::Session;

const DESCRIPTION_WIDTH: usize = 76;

pub async fn run(session: &mut Session, id: u64) -> Result<()> {
    let event = session.template(id).await?;

    println!("{}\n", event.title.bold());
    println!("   {} {}", "Start:".green(), render_date_time(&event.start_date));
    println!("   {} {}", "End:  ".red(), render_date_time(&event.end_date));

    if let Some(html) = event.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!("\n{}", "Description".bold());
        for line in description::to_plain_text(html, DESCRIPTION_WIDTH)?.lines() {
            println!("   {line}");
        }
    }

    if let Some(url) = &event.url {
        println!("\n{} {}", "Event link:".bold(), url);
    }

    println!(
        "\n{}",
        format!("Copy it with: evcopy copy {} --date YYYY-MM-DD", event.id).dimmed()
    );

    Ok(())
}
