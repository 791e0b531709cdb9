//! Read-only view handlers: progress, weekly buckets and tags

use crate::TrackerServerHandler;
use crate::formatting;
use crate::tracker::local_date_today;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TrackerServerHandler {
    /// **Progress**: Completion percentage under the active mode, hours, nearest due date.
    pub async fn handle_progress(&self) -> McpResult<String> {
        let session = self.session.lock().unwrap();
        let report = session.progress();
        Ok(formatting::format_progress(&report, session.settings()))
    }

    /// **Week**: Not-done items due today through the next six days, by day.
    /// Optional `start` (YYYY-MM-DD) replaces today.
    pub async fn handle_weekly(&self, start: Option<String>) -> McpResult<String> {
        let today = match start.as_deref().map(validation::parse_due).transpose()? {
            Some(Some(date)) => date,
            Some(None) | None => local_date_today(),
        };

        let session = self.session.lock().unwrap();
        let view = session.weekly(today);
        Ok(formatting::format_weekly(&view))
    }

    /// **Tags**: Filter options ("All" first) and the active filter.
    pub async fn handle_tags(&self) -> McpResult<String> {
        let session = self.session.lock().unwrap();
        let options = session.filter_options();
        Ok(formatting::format_tags(&options, session.settings()))
    }
}
