//! Deadline notification handlers

use crate::TrackerServerHandler;
use crate::formatting;
use crate::tracker::local_date_today;
use mcp_attr::Result as McpResult;

impl TrackerServerHandler {
    /// **Alerts**: Deadline alerts raised since the last call, plus the current banner.
    pub async fn handle_notifications(&self) -> McpResult<String> {
        let mut session = self.session.lock().unwrap();
        let alerts = session.take_alerts();
        Ok(formatting::format_alerts(&alerts, session.banner()))
    }

    /// **Check now**: Run the deadline scan immediately instead of waiting for the next tick.
    pub async fn handle_check_deadlines(&self) -> McpResult<String> {
        let mut session = self.session.lock().unwrap();
        if !session.settings().notify_enabled {
            return Ok("Notifications are disabled".to_string());
        }
        if session.check_deadlines(local_date_today()).is_none() {
            return Ok("No new deadlines".to_string());
        }
        // Report everything still pending, including scheduler alerts not yet read
        let alerts = session.take_alerts();
        Ok(formatting::format_alerts(&alerts, session.banner()))
    }
}
