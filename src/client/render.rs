//! Terminal rendering of the directory page.

use std::time::Instant;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use time::{macros::format_description, OffsetDateTime};

use super::view::{DirectoryView, StatusKind};
use crate::users::User;

pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// `Jan 5, 2025, 14:03` style, in UTC.
pub fn format_created_at(ts: OffsetDateTime) -> String {
    let fmt = format_description!("[month repr:short] [day padding:none], [year], [hour]:[minute]");
    ts.format(&fmt).unwrap_or_else(|_| ts.to_string())
}

pub fn users_table(users: &[User]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Email", "City", "Country", "Created At"]);
    for u in users {
        table.add_row(vec![
            u.id.to_string(),
            u.name.clone(),
            u.email.clone(),
            u.city.clone(),
            u.country.clone(),
            format_created_at(u.created_at),
        ]);
    }
    table
}

/// Full page: header, stats, status line, then the list or its placeholder.
pub fn render_page(view: &DirectoryView, api_status: &str, now: Instant) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Employee Management System".bold()));
    out.push_str(&format!("{}\n\n", format!("API: {api_status}").dimmed()));

    let stats = view.stats();
    out.push_str(&format!(
        "{} Total Users   {} Countries   {} Cities\n\n",
        stats.total.to_string().cyan(),
        stats.countries.to_string().cyan(),
        stats.cities.to_string().cyan(),
    ));

    if let Some(status) = view.status(now) {
        let line = match status.kind {
            StatusKind::Success => status.text.green(),
            StatusKind::Error => status.text.red(),
        };
        out.push_str(&format!("{line}\n\n"));
    }

    if view.is_loading() {
        out.push_str("All Users\nLoading users...\n");
    } else if view.users().is_empty() {
        out.push_str("All Users\nNo users found. Add some users using the form above.\n");
    } else {
        out.push_str(&format!("All Users ({})\n", view.users().len()));
        out.push_str(&format!("{}\n", users_table(view.users())));
    }
    out
}
