//! MCP tool handlers for the progress server
//!
//! This module contains the implementation of all MCP tool handlers,
//! grouped by the part of the session they touch.

pub mod items;
pub mod notifications;
pub mod persistence;
pub mod settings;
pub mod views;
