use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use evcopy_core::copy::{CopyDefaults, CopyPolicy, EventCopyRequest, build_copy_payload};
use evcopy_core::{EvCopyError, Fetch};
use owo_colors::OwoColorize;

use crate::render::{Render, render_date_time};
use crate::session::Session;
use crate::utils::prompt::confirm;
use crate::utils::tui::create_spinner;

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Id of the template event (see `evcopy list`)
    pub id: u64,

    /// Date of the new event (YYYY-MM-DD). Defaults to the template's date
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<String>,

    /// Start time (HH:MM). Defaults to the template's start time
    #[arg(short, long, value_parser = parse_time)]
    pub start: Option<String>,

    /// End time (HH:MM). Defaults to the template's end time
    #[arg(short, long, value_parser = parse_time)]
    pub end: Option<String>,

    /// End date, for events running past midnight. Defaults to --date
    #[arg(long, value_parser = parse_date)]
    pub end_date: Option<String>,

    /// Only visible to logged-in users
    #[arg(long)]
    pub private: bool,

    /// Print the payload instead of creating the event
    #[arg(long)]
    pub dry_run: bool,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn run(session: &mut Session, args: CopyArgs) -> Result<()> {
    let source = session.template(args.id).await?;
    let request = build_request(&args, CopyDefaults::from_event(&source));

    let missing = request.missing_fields();
    if !missing.is_empty() {
        anyhow::bail!(
            "Missing {} for the new event.\n\
            Pass them with --date, --start and --end.",
            missing.join(", ")
        );
    }

    let policy = CopyPolicy {
        title: session.config.title_policy,
    };
    let payload = build_copy_payload(&source, &request, &policy);

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}\n", payload.render());

    if !args.yes && !confirm("Create this event?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let spinner = create_spinner("Creating event...".to_string());
    let result = session.gateway().create_event(&payload).await;
    spinner.finish_and_clear();

    let created = match result {
        Ok(Fetch::Ready(event)) => event,
        Ok(Fetch::NotReady) => anyhow::bail!("Not logged in. Run `evcopy login`."),
        Err(EvCopyError::Create(message)) => {
            anyhow::bail!("Could not copy event: {message}")
        }
        Err(e) => return Err(e).context("Could not copy event"),
    };

    tracing::info!(id = created.id, slug = %created.slug, "event created");

    println!("{}", "Event successfully copied!".green());
    println!("   Title: {}", created.title);
    println!("   Start: {}", render_date_time(&created.start_date));
    println!("   End:   {}", render_date_time(&created.end_date));

    Ok(())
}

/// Flags win; anything not given comes from the template's own schedule.
fn build_request(args: &CopyArgs, defaults: Option<CopyDefaults>) -> EventCopyRequest {
    let defaults = defaults.unwrap_or(CopyDefaults {
        start_date: String::new(),
        start_time: String::new(),
        end_time: String::new(),
    });

    let new_start_date = args.date.clone().unwrap_or(defaults.start_date);
    let new_end_date = args.end_date.clone().unwrap_or_else(|| new_start_date.clone());

    EventCopyRequest {
        new_start_time: args.start.clone().unwrap_or(defaults.start_time),
        new_end_time: args.end.clone().unwrap_or(defaults.end_time),
        new_start_date,
        new_end_date,
        is_public: !args.private,
    }
}

/// Normalized to YYYY-MM-DD
fn parse_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("Invalid date '{s}'. Expected YYYY-MM-DD"))
}

/// Normalized to HH:MM
fn parse_time(s: &str) -> Result<String, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| format!("Invalid time '{s}'. Expected HH:MM (24-hour)"))
}
