//! Item handlers for the progress MCP server

use crate::TrackerServerHandler;
use crate::formatting;
use crate::tracker::{ItemStatus, ItemUpdate, NewItem, parse_tags};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl TrackerServerHandler {
    /// **Add**: Track a new assignment or task.
    /// **Defaults**: weight 1, no due date, 0 estimated hours, status "Not started".
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_add_item(
        &self,
        name: String,
        weight: Option<f64>,
        due: Option<String>,
        est_hours: Option<f64>,
        tags: Option<String>,
        status: Option<String>,
        done: Option<bool>,
    ) -> McpResult<String> {
        let status = status
            .as_deref()
            .map(validation::parse_status)
            .transpose()?;

        let mut new_item = match NewItem::from_input(
            &name,
            weight,
            due.as_deref(),
            est_hours,
            tags.as_deref(),
        ) {
            Ok(item) => item,
            Err(e) => bail_public!(_, "{}", e),
        };
        if let Some(s) = status {
            new_item = new_item.with_status(s);
        }
        if let Some(d) = done {
            new_item = new_item.with_done(d);
        }

        let mut session = self.session.lock().unwrap();
        let id = match session.add_item(new_item) {
            Ok(id) => id,
            Err(e) => {
                drop(session);
                bail_public!(_, "{}", e);
            }
        };
        let name = session
            .item(id)
            .map(|it| it.name().to_string())
            .unwrap_or_default();
        drop(session);

        info!("Added item {} '{}'", id, name);
        self.autosave();
        Ok(format!("Item {} added: {}", id, name))
    }

    /// **Edit**: Change one or more fields of an item. All changes apply together or not at all.
    /// **Tip**: Use ""(empty string) for `due` to remove the deadline, or for `tags` to clear them.
    /// **Sync**: done=true sets status "Done"; status "Done" sets done; un-doing a "Done" item resets it to "Not started".
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_item(
        &self,
        id: String,
        name: Option<String>,
        done: Option<bool>,
        weight: Option<f64>,
        due: Option<String>,
        est_hours: Option<f64>,
        status: Option<String>,
        tags: Option<String>,
    ) -> McpResult<String> {
        let item_id = validation::parse_item_id(&id)?;

        let mut updates = Vec::new();
        if let Some(n) = name {
            updates.push(ItemUpdate::Name(n));
        }
        if let Some(w) = weight {
            updates.push(ItemUpdate::Weight(w));
        }
        if let Some(d) = due {
            updates.push(ItemUpdate::Due(validation::parse_due(&d)?));
        }
        if let Some(h) = est_hours {
            updates.push(ItemUpdate::EstHours(h));
        }
        if let Some(t) = tags {
            updates.push(ItemUpdate::Tags(parse_tags(&t)));
        }
        // Status before done, so an explicit done flag has the last word
        if let Some(s) = status {
            updates.push(ItemUpdate::Status(validation::parse_status(&s)?));
        }
        if let Some(d) = done {
            updates.push(ItemUpdate::Done(d));
        }
        if updates.is_empty() {
            bail_public!(_, "Nothing to update for item {}", item_id);
        }

        let mut session = self.session.lock().unwrap();
        if let Err(e) = session.update_item(item_id, updates) {
            drop(session);
            bail_public!(_, "{}", e);
        }
        drop(session);

        self.autosave();
        Ok(format!("Item {} updated successfully", item_id))
    }

    /// **Delete**: Remove an item permanently.
    pub async fn handle_remove_item(&self, id: String) -> McpResult<String> {
        let item_id = validation::parse_item_id(&id)?;

        let mut session = self.session.lock().unwrap();
        let removed = match session.remove_item(item_id) {
            Ok(item) => item,
            Err(e) => {
                drop(session);
                bail_public!(_, "{}", e);
            }
        };
        drop(session);

        info!("Removed item {} '{}'", item_id, removed.name());
        self.autosave();
        Ok(format!("Item {} removed: {}", item_id, removed.name()))
    }

    /// **Delete all**: Remove every item. Settings are kept.
    pub async fn handle_clear_items(&self) -> McpResult<String> {
        let mut session = self.session.lock().unwrap();
        let count = session.clear_items();
        drop(session);

        info!("Cleared {} item(s)", count);
        self.autosave();
        Ok(format!("Removed {} item(s)", count))
    }

    /// **Review**: List items in the current sort order.
    /// **Filter**: Only items visible under the active tag filter, unless `all` is true.
    /// Optional `status` narrows the list further.
    pub async fn handle_list_items(
        &self,
        all: Option<bool>,
        status: Option<String>,
    ) -> McpResult<String> {
        let status_filter: Option<ItemStatus> = status
            .as_deref()
            .map(validation::parse_status)
            .transpose()?;

        let session = self.session.lock().unwrap();
        let mut items = if all.unwrap_or(false) {
            session.items().iter().collect()
        } else {
            session.visible_items()
        };
        if let Some(s) = status_filter {
            items.retain(|it| it.status() == s);
        }
        Ok(formatting::format_items(&items))
    }
}
