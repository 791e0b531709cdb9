//! Parameter parsing helpers for the progress MCP server
//!
//! Tool arguments arrive as strings; these turn them into domain values or
//! an INVALID_PARAMS error carrying a public message.

use crate::tracker::{ItemId, ItemStatus, ProgressMode, SortKey, parse_due_date};
use chrono::NaiveDate;
use mcp_attr::Result as McpResult;
use std::fmt::Display;

/// Build an INVALID_PARAMS error whose message is shown to the client
pub fn invalid_params(message: impl Display) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message.to_string(), true)
}

/// Parse an item handle, `#3` or `3`
pub fn parse_item_id(id_str: &str) -> McpResult<ItemId> {
    id_str.parse::<ItemId>().map_err(invalid_params)
}

pub fn parse_status(status_str: &str) -> McpResult<ItemStatus> {
    status_str.parse::<ItemStatus>().map_err(invalid_params)
}

pub fn parse_mode(mode_str: &str) -> McpResult<ProgressMode> {
    mode_str.parse::<ProgressMode>().map_err(invalid_params)
}

pub fn parse_sort_key(key_str: &str) -> McpResult<SortKey> {
    key_str.parse::<SortKey>().map_err(invalid_params)
}

/// Parse an optional due date; empty text means "no due date"
pub fn parse_due(date_str: &str) -> McpResult<Option<NaiveDate>> {
    parse_due_date(date_str).map_err(invalid_params)
}

/// Parse sort direction: `asc`/`ascending` or `desc`/`descending`
pub fn parse_direction(dir_str: &str) -> McpResult<bool> {
    match dir_str.trim().to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(true),
        "desc" | "descending" => Ok(false),
        _ => Err(invalid_params(format!(
            "Invalid sort direction '{}'. Use 'asc' or 'desc'",
            dir_str
        ))),
    }
}
