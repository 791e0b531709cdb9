//! Settings handlers for the progress MCP server

use crate::TrackerServerHandler;
use crate::formatting;
use crate::tracker::{MAX_NOTIFY_DAYS, SettingsUpdate, TagFilter};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TrackerServerHandler {
    /// **Settings**: Show sort, progress mode, notifications, tag filter and goal.
    pub async fn handle_settings(&self) -> McpResult<String> {
        let session = self.session.lock().unwrap();
        Ok(formatting::format_settings(session.settings()))
    }

    /// **Configure**: Change one or more settings. Nothing changes if any value is invalid.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_settings(
        &self,
        dark_mode: Option<bool>,
        sort_key: Option<String>,
        sort_direction: Option<String>,
        progress_mode: Option<String>,
        notify_enabled: Option<bool>,
        notify_days: Option<u32>,
        filter_tag: Option<String>,
        goal_text: Option<String>,
        goal_image_path: Option<String>,
    ) -> McpResult<String> {
        if let Some(days) = notify_days
            && days > MAX_NOTIFY_DAYS
        {
            bail_public!(
                _,
                "Notification horizon must be between 0 and {} days (got {})",
                MAX_NOTIFY_DAYS,
                days
            );
        }

        let update = SettingsUpdate {
            dark_mode,
            sort_key: sort_key
                .as_deref()
                .map(validation::parse_sort_key)
                .transpose()?,
            sort_ascending: sort_direction
                .as_deref()
                .map(validation::parse_direction)
                .transpose()?,
            progress_mode: progress_mode
                .as_deref()
                .map(validation::parse_mode)
                .transpose()?,
            notify_enabled,
            notify_days,
            filter_tag: filter_tag.map(|t| t.parse::<TagFilter>().unwrap_or_default()),
            goal_text,
            goal_image_path: goal_image_path.map(|p| p.trim().to_string()),
        };
        if update == SettingsUpdate::default() {
            bail_public!(_, "No settings given");
        }

        let mut session = self.session.lock().unwrap();
        if let Err(e) = session.update_settings(update) {
            drop(session);
            bail_public!(_, "{}", e);
        }
        let text = formatting::format_settings(session.settings());
        drop(session);

        self.autosave();
        Ok(format!("Settings updated\n{}", text))
    }
}
