//! Formatting helper functions for the progress MCP server
//!
//! This module turns tracker state into the plain-text tool responses.

use crate::notify::Alert;
use crate::tracker::{DATE_FMT, Item, ProgressReport, Settings, WeeklyView};

/// Format items into a display string
///
/// # Arguments
/// * `items` - Items to format, already filtered
///
/// # Returns
/// Formatted string representation of the items
pub fn format_items(items: &[&Item]) -> String {
    if items.is_empty() {
        return "No items found".to_string();
    }

    let mut result = format!("Found {} item(s):\n\n", items.len());
    for item in items {
        let due = item.due_text();
        result.push_str(&format!(
            "- [{}] {} (status: {}, done: {}, weight: {:.2}, est: {:.1}h, due: {})\n",
            item.id(),
            item.name(),
            item.status(),
            if item.is_done() { "yes" } else { "no" },
            item.weight(),
            item.est_hours(),
            if due.is_empty() { "none" } else { &due },
        ));
        if !item.tags().is_empty() {
            result.push_str(&format!("  Tags: {}\n", item.tags_text()));
        }
    }
    result
}

/// Progress label, preceded by the goal text when one is set
pub fn format_progress(report: &ProgressReport, settings: &Settings) -> String {
    if settings.goal_text.trim().is_empty() {
        report.to_string()
    } else {
        format!("Goal: {}\n{}", settings.goal_text.trim(), report)
    }
}

const WEEKLY_LEGEND: &str =
    "Legend: overdue = past due, today, tomorrow, soon = 2-3 days, later = 4+ days";

/// Seven day columns with their due items
pub fn format_weekly(view: &WeeklyView) -> String {
    let mut result = format!("Due this week: {} item(s)\n", view.entry_count());
    for day in &view.days {
        result.push_str(&format!(
            "\n{} {}\n",
            day.date.format("%a"),
            day.date.format(DATE_FMT)
        ));
        if day.entries.is_empty() {
            result.push_str("  (nothing due)\n");
            continue;
        }
        for entry in &day.entries {
            result.push_str(&format!(
                "  - {} [{}] {}",
                entry.name, entry.status, entry.urgency
            ));
            for tag in &entry.tags {
                result.push_str(&format!(" #{}", tag));
            }
            result.push('\n');
        }
    }
    result.push_str(&format!("\n{}", WEEKLY_LEGEND));
    result
}

pub fn format_tags(options: &[String], settings: &Settings) -> String {
    format!(
        "Filter options: {}\nActive filter: {}",
        options.join(", "),
        settings.filter_tag
    )
}

pub fn format_settings(settings: &Settings) -> String {
    let on_off = |b: bool| if b { "on" } else { "off" };
    let mut result = String::new();
    result.push_str(&format!("Dark mode: {}\n", on_off(settings.dark_mode)));
    result.push_str(&format!(
        "Sort: {} ({})\n",
        settings.sort_key,
        if settings.sort_ascending { "ascending" } else { "descending" }
    ));
    result.push_str(&format!("Progress mode: {}\n", settings.progress_mode));
    result.push_str(&format!(
        "Notifications: {} (horizon {} day(s))\n",
        on_off(settings.notify_enabled),
        settings.notify_days
    ));
    result.push_str(&format!("Tag filter: {}\n", settings.filter_tag));
    if !settings.goal_text.is_empty() {
        result.push_str(&format!("Goal: {}\n", settings.goal_text));
    }
    if !settings.goal_image_path.is_empty() {
        result.push_str(&format!("Goal image: {}\n", settings.goal_image_path));
    }
    result
}

/// Pending alerts, newest last, plus the current banner
pub fn format_alerts(alerts: &[Alert], banner: Option<&str>) -> String {
    if alerts.is_empty() {
        return match banner {
            Some(b) => format!("No new alerts\nBanner: {}", b),
            None => "No new alerts".to_string(),
        };
    }
    let mut result = format!("{} alert(s):\n", alerts.len());
    for alert in alerts {
        for msg in alert.messages() {
            result.push_str(&format!("- {}\n", msg));
        }
    }
    result
}
