//! Colored terminal rendering for evcopy-core types.

use chrono::NaiveDateTime;
use evcopy_core::Event;
use evcopy_core::copy::{CreateEventPayload, EventStatus};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let when = self
            .start()
            .map(|start| format_short(&start))
            .unwrap_or_else(|| self.start_date.clone());

        format!(
            "{} {} {}",
            format!("#{}", self.id).dimmed(),
            self.title.bold(),
            when.dimmed()
        )
    }
}

impl Render for EventStatus {
    fn render(&self) -> String {
        match self {
            EventStatus::Publish => "public".green().to_string(),
            EventStatus::Private => "private".yellow().to_string(),
        }
    }
}

impl Render for CreateEventPayload {
    fn render(&self) -> String {
        format!(
            "{}\n   {} {}\n   {} {}\n   {} {}",
            self.title.bold(),
            "Start:".dimmed(),
            render_date_time(&self.start_date),
            "End:  ".dimmed(),
            render_date_time(&self.end_date),
            "As:   ".dimmed(),
            self.status.render()
        )
    }
}

/// "Friday, January 5, 2024 at 06:00 PM", or the raw value if it doesn't parse.
pub fn render_date_time(value: &str) -> String {
    match evcopy_core::event::parse_local_datetime(value) {
        Some(dt) => format_long(&dt),
        None => value.to_string(),
    }
}

fn format_long(dt: &NaiveDateTime) -> String {
    dt.format("%A, %B %-d, %Y at %I:%M %p").to_string()
}

fn format_short(dt: &NaiveDateTime) -> String {
    dt.format("%a %Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dates() {
        assert_eq!(
            render_date_time("2024-01-05 18:00:00"),
            "Friday, January 5, 2024 at 06:00 PM"
        );
        assert_eq!(
            render_date_time("2024-03-10T19:00:00"),
            "Sunday, March 10, 2024 at 07:00 PM"
        );
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(render_date_time("soon"), "soon");
    }
}
