use super::item::{Item, ItemId, ItemUpdate, NewItem};
use super::progress::{self, ProgressReport};
use super::settings::{MAX_NOTIFY_DAYS, ProgressMode, Settings, SortKey, TagFilter};
use super::store::ItemStore;
use super::tags;
use super::weekly::{self, WeeklyView};
use crate::codec::Document;
use crate::error::{Result, TrackerError, ValidationError};
use crate::notify::{self, Alert};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Partial settings change; `None` leaves a setting as it is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub dark_mode: Option<bool>,
    pub sort_key: Option<SortKey>,
    pub sort_ascending: Option<bool>,
    pub progress_mode: Option<ProgressMode>,
    pub notify_enabled: Option<bool>,
    pub notify_days: Option<u32>,
    pub filter_tag: Option<TagFilter>,
    pub goal_text: Option<String>,
    /// Empty string clears the goal image
    pub goal_image_path: Option<String>,
}

/// All mutable state of one tracking session
///
/// Every mutation goes through a `Session` method, which then re-derives the
/// tag filter, re-sorts the canonical list and bumps `revision`. Callers that
/// persist state (autosave) do so after a successful mutation.
#[derive(Debug, Default)]
pub struct Session {
    settings: Settings,
    store: ItemStore,
    /// Names already alerted this session
    notified: HashSet<String>,
    banner: Option<String>,
    pending_alerts: Vec<Alert>,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn items(&self) -> &[Item] {
        self.store.list()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    /// Incremented on every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Text of the most recent deadline alert, cleared by a quiet scan
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn notified_names(&self) -> &HashSet<String> {
        &self.notified
    }

    fn changed(&mut self) {
        if !tags::filter_in_use(self.store.list(), &self.settings.filter_tag) {
            debug!(
                "Tag filter '{}' no longer in use, resetting to All",
                self.settings.filter_tag
            );
            self.settings.filter_tag = TagFilter::All;
        }
        self.store
            .sort(self.settings.sort_key, self.settings.sort_ascending);
        self.revision += 1;
    }

    pub fn add_item(&mut self, new: NewItem) -> Result<ItemId, ValidationError> {
        let id = self.store.add(new)?;
        self.changed();
        Ok(id)
    }

    /// Apply one or more field changes to an item atomically
    pub fn update_item(&mut self, id: ItemId, updates: Vec<ItemUpdate>) -> Result<()> {
        self.store.update_many(id, updates)?;
        self.changed();
        Ok(())
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<Item> {
        let item = self.store.remove(id).ok_or(TrackerError::ItemNotFound(id))?;
        self.changed();
        Ok(item)
    }

    /// Delete every item; returns how many were removed
    pub fn clear_items(&mut self) -> usize {
        let count = self.store.len();
        self.store.clear();
        self.changed();
        count
    }

    /// Apply a settings change after validating every part of it
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<()> {
        if let Some(filter) = &update.filter_tag
            && !tags::filter_in_use(self.store.list(), filter)
        {
            return Err(TrackerError::UnknownTag(filter.label().to_string()));
        }
        if let Some(path) = &update.goal_image_path
            && !path.is_empty()
            && !Path::new(path).exists()
        {
            return Err(TrackerError::MissingImage(PathBuf::from(path)));
        }

        let s = &mut self.settings;
        if let Some(v) = update.dark_mode {
            s.dark_mode = v;
        }
        if let Some(v) = update.sort_key {
            s.sort_key = v;
        }
        if let Some(v) = update.sort_ascending {
            s.sort_ascending = v;
        }
        if let Some(v) = update.progress_mode {
            s.progress_mode = v;
        }
        if let Some(v) = update.notify_enabled {
            s.notify_enabled = v;
        }
        if let Some(v) = update.notify_days {
            s.notify_days = v;
        }
        if let Some(v) = update.filter_tag {
            s.filter_tag = v;
        }
        if let Some(v) = update.goal_text {
            s.goal_text = v;
        }
        if let Some(v) = update.goal_image_path {
            s.goal_image_path = v;
        }
        self.changed();
        Ok(())
    }

    pub fn filter_options(&self) -> Vec<String> {
        tags::filter_options(self.store.list())
    }

    /// Items passing the active tag filter, in store order
    pub fn visible_items(&self) -> Vec<&Item> {
        self.store
            .list()
            .iter()
            .filter(|it| tags::is_visible(it, &self.settings.filter_tag))
            .collect()
    }

    pub fn progress(&self) -> ProgressReport {
        progress::compute(
            self.store.list(),
            self.settings.progress_mode,
            &self.settings.filter_tag,
        )
    }

    pub fn weekly(&self, today: NaiveDate) -> WeeklyView {
        weekly::bucket_week(self.store.list(), &self.settings.filter_tag, today)
    }

    /// One notification scan
    ///
    /// Does nothing while notifications are disabled. Otherwise a scan with
    /// new deadlines records the alert as banner and pending alert and marks
    /// its names as notified; a quiet scan clears the banner.
    pub fn check_deadlines(&mut self, today: NaiveDate) -> Option<Alert> {
        if !self.settings.notify_enabled {
            return None;
        }
        let alert = notify::scan(
            self.store.list(),
            &self.settings.filter_tag,
            self.settings.notify_days,
            today,
            &self.notified,
        );
        match &alert {
            Some(alert) => {
                self.notified
                    .extend(alert.names().map(str::to_string));
                self.banner = Some(alert.banner());
                self.pending_alerts.push(alert.clone());
            }
            None => self.banner = None,
        }
        alert
    }

    /// Alerts raised since the last call
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.pending_alerts)
    }

    pub fn to_document(&self) -> Document {
        Document::new(&self.settings, self.store.list())
    }

    /// Replace the whole state with a document
    ///
    /// The document is validated into a fresh store first; on error nothing
    /// changes. On success settings and items are replaced (never merged) and
    /// the notification dedup set is cleared.
    pub fn load_document(&mut self, doc: Document) -> Result<usize> {
        let store = doc.build_store()?;
        let mut settings = doc.settings;
        if !settings.goal_image_path.is_empty() && !Path::new(&settings.goal_image_path).exists()
        {
            warn!(
                "Goal image '{}' not found, clearing it",
                settings.goal_image_path
            );
            settings.goal_image_path.clear();
        }
        if settings.notify_days > MAX_NOTIFY_DAYS {
            warn!(
                "Notification horizon of {} days is out of range, using {}",
                settings.notify_days, MAX_NOTIFY_DAYS
            );
            settings.notify_days = MAX_NOTIFY_DAYS;
        }

        self.settings = settings;
        self.store = store;
        self.notified.clear();
        self.banner = None;
        self.pending_alerts.clear();
        self.changed();
        info!("Loaded {} item(s)", self.store.len());
        Ok(self.store.len())
    }

    /// Add already validated items from an import, optionally replacing the
    /// current list. The dedup set is kept.
    pub fn import_items(&mut self, staging: ItemStore, replace: bool) -> usize {
        if replace {
            self.store.clear();
        }
        let count = staging.len();
        self.store.extend_from(staging);
        self.changed();
        count
    }
}
