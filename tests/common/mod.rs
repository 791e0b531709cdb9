//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use progress_mcp::TrackerServerHandler;
use progress_mcp::tracker::{DATE_FMT, local_date_today};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a test handler with autosave into a temporary directory
pub fn get_test_handler() -> (TrackerServerHandler, TempDir) {
    let dir = TempDir::new().unwrap();
    let handler = TrackerServerHandler::new(data_path(&dir), true);
    (handler, dir)
}

/// Path of the working file inside a test directory
pub fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("progress_data.json")
}

/// Extract the item handle from an add_item response
/// Response format: "Item #<n> added: <name>"
pub fn extract_id_from_response(response: &str) -> String {
    response
        .split_whitespace()
        .find(|word| word.starts_with('#'))
        .unwrap_or("")
        .to_string()
}

/// Date `days` from today as YYYY-MM-DD
pub fn days_from_today(days: i64) -> String {
    (local_date_today() + Duration::days(days))
        .format(DATE_FMT)
        .to_string()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Add an item with only a name and optional extras
pub async fn add(
    handler: &TrackerServerHandler,
    name: &str,
    weight: Option<f64>,
    due: Option<String>,
    tags: Option<&str>,
) -> String {
    let response = handler
        .handle_add_item(
            name.to_string(),
            weight,
            due,
            None,
            tags.map(str::to_string),
            None,
            None,
        )
        .await
        .unwrap();
    extract_id_from_response(&response)
}
