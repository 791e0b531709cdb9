//! Progress Tracker MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for tracking
//! weighted assignments and tasks. Items carry a weight, estimated hours, a
//! due date, a status and tags; the server reports an aggregate completion
//! percentage under one of three weighting modes, a seven-day due view and
//! deduplicated deadline alerts.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TrackerServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `tracker` module - Items, progress, sorting, tags, weekly view
//! - **Persistence Layer**: `codec` and `storage` modules - JSON document, CSV, autosave
//!
//! # Example
//!
//! ```no_run
//! use progress_mcp::TrackerServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TrackerServerHandler::new("progress_data.json", true);
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod notify;
pub mod storage;
pub mod tracker;
pub mod validation;

use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

// Re-export commonly used types
pub use error::{TrackerError, ValidationError};
pub use notify::{Alert, AlertSink, LogSink};
pub use storage::Storage;
pub use tracker::{Item, ItemId, ItemStatus, ProgressMode, Session, Settings, SortKey, TagFilter};

/// MCP Server handler for progress tracking
///
/// Owns the shared session and the working file. Every successful mutation is
/// autosaved to the working file when autosave is enabled.
pub struct TrackerServerHandler {
    pub(crate) session: Arc<Mutex<Session>>,
    pub(crate) storage: Storage,
}

impl TrackerServerHandler {
    /// Create a new handler, loading the working file if it exists
    ///
    /// # Arguments
    /// * `storage_path` - Path to the working JSON document
    /// * `autosave` - Write the working file after every change
    ///
    /// A working file that cannot be loaded is reported and the session
    /// starts empty.
    ///
    /// # Example
    /// ```no_run
    /// # use progress_mcp::TrackerServerHandler;
    /// let handler = TrackerServerHandler::new("progress_data.json", false);
    /// ```
    pub fn new(storage_path: impl AsRef<Path>, autosave: bool) -> Self {
        let storage = Storage::new(storage_path, autosave);
        let mut session = Session::new();

        match storage.load() {
            Ok(Some(doc)) => {
                if let Err(e) = session.load_document(doc) {
                    warn!(
                        "Could not load {}: {}. Starting empty",
                        storage.file_path().display(),
                        e
                    );
                }
            }
            Ok(None) => info!(
                "No data file at {}, starting empty",
                storage.file_path().display()
            ),
            Err(e) => warn!(
                "Could not load {}: {}. Starting empty",
                storage.file_path().display(),
                e
            ),
        }

        Self {
            session: Arc::new(Mutex::new(session)),
            storage,
        }
    }

    /// Shared handle to the session, for the deadline scheduler
    pub fn session(&self) -> Arc<Mutex<Session>> {
        Arc::clone(&self.session)
    }

    /// Write the working file if autosave is on
    fn autosave(&self) {
        if !self.storage.autosave_enabled() {
            return;
        }
        let doc = self.session.lock().unwrap().to_document();
        self.storage.autosave(&doc);
    }
}

/// Progress tracker for weighted assignments and tasks.
///
/// Each item has a name, a weight (> 0), estimated hours (>= 0), an optional due date (YYYY-MM-DD),
/// a status and comma-separated tags. Item handles look like #1, #2, #3.
///
/// Key concepts:
/// - **Statuses**: Not started, In progress, Blocked, Done (done and "Done" always agree)
/// - **Progress modes**: Weighted (all items by weight), Unweighted (item count), Hours-weighted (estimated hours)
/// - **Tag filter**: "All" or one tag; limits list, weekly view, alerts and the unweighted/hours modes
/// - **Sort keys**: Due Date, Name, Weight, Estimate, Done, Status
/// - **Alerts**: Overdue and soon-due items are announced once per session; see notifications
#[mcp_server]
impl McpServer for TrackerServerHandler {
    /// **Add**: Track a new assignment or task.
    /// **Defaults**: weight 1, no due date, 0 estimated hours, status "Not started".
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn add_item(
        &self,
        /// Name (required, non-empty)
        name: String,
        /// Weight, greater than 0 (default 1)
        weight: Option<f64>,
        /// Due date YYYY-MM-DD (optional)
        due: Option<String>,
        /// Estimated hours, 0 or more (default 0)
        est_hours: Option<f64>,
        /// Comma or semicolon separated tags (optional)
        tags: Option<String>,
        /// Status: Not started/In progress/Blocked/Done (optional)
        status: Option<String>,
        /// Already finished (optional)
        done: Option<bool>,
    ) -> McpResult<String> {
        self.handle_add_item(name, weight, due, est_hours, tags, status, done)
            .await
    }

    /// **Edit**: Change one or more fields of an item. All changes apply together or not at all.
    /// **Tip**: Use ""(empty string) for `due` to remove the deadline, or for `tags` to clear them.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_item(
        &self,
        /// Item handle, e.g. "#3"
        id: String,
        /// New name (optional)
        name: Option<String>,
        /// Mark done or not done (optional)
        done: Option<bool>,
        /// New weight, greater than 0 (optional)
        weight: Option<f64>,
        /// Due date YYYY-MM-DD, ""=clear (optional)
        due: Option<String>,
        /// Estimated hours, 0 or more (optional)
        est_hours: Option<f64>,
        /// Status: Not started/In progress/Blocked/Done (optional)
        status: Option<String>,
        /// Tags, ""=clear (optional)
        tags: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_item(id, name, done, weight, due, est_hours, status, tags)
            .await
    }

    /// **Delete**: Remove an item permanently.
    #[tool]
    async fn remove_item(
        &self,
        /// Item handle, e.g. "#3"
        id: String,
    ) -> McpResult<String> {
        self.handle_remove_item(id).await
    }

    /// **Delete all**: Remove every item. Settings are kept. Cannot be undone.
    #[tool]
    async fn clear_items(&self) -> McpResult<String> {
        self.handle_clear_items().await
    }

    /// **Review**: List items in the current sort order, limited to the active tag filter.
    #[tool]
    async fn list_items(
        &self,
        /// true = ignore the tag filter (optional)
        all: Option<bool>,
        /// Only items with this status (optional)
        status: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_items(all, status).await
    }

    /// **Progress**: Completion percentage, done/total, hours and nearest due date.
    #[tool]
    async fn progress(&self) -> McpResult<String> {
        self.handle_progress().await
    }

    /// **Week**: Not-done items due in the next seven days, grouped by day with urgency.
    #[tool]
    async fn weekly(
        &self,
        /// First day YYYY-MM-DD (default today)
        start: Option<String>,
    ) -> McpResult<String> {
        self.handle_weekly(start).await
    }

    /// **Tags**: Tags in use (filter options) and the active filter.
    #[tool]
    async fn tags(&self) -> McpResult<String> {
        self.handle_tags().await
    }

    /// **Settings**: Show the current settings.
    #[tool]
    async fn settings(&self) -> McpResult<String> {
        self.handle_settings().await
    }

    /// **Configure**: Change settings. Nothing changes if any value is invalid.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_settings(
        &self,
        /// Dark theme preference (optional)
        dark_mode: Option<bool>,
        /// Sort key: Due Date/Name/Weight/Estimate/Done/Status (optional)
        sort_key: Option<String>,
        /// Sort direction: asc/desc (optional)
        sort_direction: Option<String>,
        /// Progress mode: Weighted/Unweighted/Hours-weighted (optional)
        progress_mode: Option<String>,
        /// Deadline alerts on/off (optional)
        notify_enabled: Option<bool>,
        /// Alert horizon in days, 0-365 (optional)
        notify_days: Option<u32>,
        /// Tag to filter by, "All" for no filter (optional)
        filter_tag: Option<String>,
        /// Goal text (optional)
        goal_text: Option<String>,
        /// Goal image path, ""=clear (optional)
        goal_image_path: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_settings(
            dark_mode,
            sort_key,
            sort_direction,
            progress_mode,
            notify_enabled,
            notify_days,
            filter_tag,
            goal_text,
            goal_image_path,
        )
        .await
    }

    /// **Import CSV**: Add items from a CSV file (columns name,done,weight,due,est_hours,status,tags; only name required).
    #[tool]
    async fn import_csv(
        &self,
        /// Path of the CSV file
        path: String,
        /// true = delete current items first (default false)
        replace: Option<bool>,
    ) -> McpResult<String> {
        self.handle_import_csv(path, replace).await
    }

    /// **Export CSV**: Write all items to a CSV file.
    #[tool]
    async fn export_csv(
        &self,
        /// Path of the CSV file to write
        path: String,
    ) -> McpResult<String> {
        self.handle_export_csv(path).await
    }

    /// **Save as**: Write settings and items to a JSON file.
    #[tool]
    async fn save_as(
        &self,
        /// Path of the JSON file to write
        path: String,
    ) -> McpResult<String> {
        self.handle_save_as(path).await
    }

    /// **Load**: Replace settings and items with a saved JSON file.
    #[tool]
    async fn load(
        &self,
        /// Path of the JSON file to read
        path: String,
    ) -> McpResult<String> {
        self.handle_load(path).await
    }

    /// **Alerts**: Deadline alerts raised since the last call.
    #[tool]
    async fn notifications(&self) -> McpResult<String> {
        self.handle_notifications().await
    }

    /// **Check now**: Scan for overdue and soon-due items immediately.
    #[tool]
    async fn check_deadlines(&self) -> McpResult<String> {
        self.handle_check_deadlines().await
    }
}
