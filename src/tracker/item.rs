use crate::error::ValidationError;
use chrono::{Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Date format used for due dates everywhere (display, documents, CSV)
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Store handle for an item
///
/// Handles are assigned by the store on add and never reused within a
/// session. They are not persisted; a reload assigns fresh handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .strip_prefix('#')
            .unwrap_or(trimmed)
            .parse::<u64>()
            .map(ItemId)
            .map_err(|_| format!("Invalid item ID '{}'. Use the form '#3' or '3'", s))
    }
}

/// Workflow status of an item
///
/// Variant order is the sort order used by the Status sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemStatus {
    #[default]
    NotStarted,
    InProgress,
    Blocked,
    Done,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::NotStarted,
        ItemStatus::InProgress,
        ItemStatus::Blocked,
        ItemStatus::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemStatus::NotStarted => "Not started",
            ItemStatus::InProgress => "In progress",
            ItemStatus::Blocked => "Blocked",
            ItemStatus::Done => "Done",
        }
    }

    /// Status for imported rows: only exact labels are recognised, anything
    /// else (including a missing value) falls back by completion state.
    pub fn from_import(raw: Option<&str>, done: bool) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(label) => Self::ALL
                .into_iter()
                .find(|s| s.label() == label)
                .unwrap_or_default(),
            None if done => ItemStatus::Done,
            None => ItemStatus::NotStarted,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "not started" => Ok(ItemStatus::NotStarted),
            "in progress" => Ok(ItemStatus::InProgress),
            "blocked" => Ok(ItemStatus::Blocked),
            "done" => Ok(ItemStatus::Done),
            _ => Err(ValidationError::InvalidStatus(s.to_string())),
        }
    }
}

/// Split a comma/semicolon separated tag string into trimmed, non-empty tags
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strict `YYYY-MM-DD` parse for manual entry. Empty text means no deadline.
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FMT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Display-side parse: text that is not a valid date counts as no deadline
pub fn parse_due_lenient(raw: &str) -> Option<NaiveDate> {
    parse_due_date(raw).ok().flatten()
}

/// Amount an item contributes to an aggregate. Negative or non-finite values
/// contribute nothing; the stored value is left alone.
pub(crate) fn effective_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(())
    }
}

fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveWeight(weight))
    }
}

fn validate_hours(hours: f64) -> Result<(), ValidationError> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeHours(hours))
    }
}

/// Field values for an item about to be added to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub done: bool,
    pub weight: f64,
    pub due: Option<NaiveDate>,
    pub est_hours: f64,
    pub status: ItemStatus,
    pub tags: Vec<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            weight: 1.0,
            due: None,
            est_hours: 0.0,
            status: ItemStatus::NotStarted,
            tags: Vec::new(),
        }
    }

    /// Build from manual-entry text, rejecting a malformed due date
    pub fn from_input(
        name: &str,
        weight: Option<f64>,
        due: Option<&str>,
        est_hours: Option<f64>,
        tags: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            name: name.trim().to_string(),
            weight: weight.unwrap_or(1.0),
            due: parse_due_date(due.unwrap_or(""))?,
            est_hours: est_hours.unwrap_or(0.0),
            tags: parse_tags(tags.unwrap_or("")),
            ..Self::new("")
        };
        item.validate()?;
        Ok(item)
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    pub fn with_hours(mut self, est_hours: f64) -> Self {
        self.est_hours = est_hours;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = parse_tags(tags);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_weight(self.weight)?;
        validate_hours(self.est_hours)
    }
}

/// A single-field change to an existing item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUpdate {
    Name(String),
    Done(bool),
    Weight(f64),
    Due(Option<NaiveDate>),
    EstHours(f64),
    Status(ItemStatus),
    Tags(Vec<String>),
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ItemUpdate::Name(name) => validate_name(name),
            ItemUpdate::Weight(weight) => validate_weight(*weight),
            ItemUpdate::EstHours(hours) => validate_hours(*hours),
            ItemUpdate::Done(_)
            | ItemUpdate::Due(_)
            | ItemUpdate::Status(_)
            | ItemUpdate::Tags(_) => Ok(()),
        }
    }
}

/// A tracked assignment or task
///
/// Fields are read through accessors; every change goes through
/// [`ItemStore::update`](super::ItemStore::update) so the done/status pair
/// stays in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    name: String,
    done: bool,
    weight: f64,
    due: Option<NaiveDate>,
    est_hours: f64,
    status: ItemStatus,
    tags: Vec<String>,
}

impl Item {
    pub(crate) fn from_new(id: ItemId, new: NewItem) -> Self {
        // done=true always implies Done, and Done always implies done
        let done = new.done || new.status == ItemStatus::Done;
        let status = if done { ItemStatus::Done } else { new.status };
        Self {
            id,
            name: new.name.trim().to_string(),
            done,
            weight: new.weight,
            due: new.due,
            est_hours: new.est_hours,
            status,
            tags: new.tags,
        }
    }

    /// Apply an already validated update, running the done/status resync
    pub(crate) fn apply(&mut self, update: ItemUpdate) {
        match update {
            ItemUpdate::Name(name) => self.name = name.trim().to_string(),
            ItemUpdate::Done(true) => {
                self.done = true;
                self.status = ItemStatus::Done;
            }
            ItemUpdate::Done(false) => {
                self.done = false;
                if self.status == ItemStatus::Done {
                    self.status = ItemStatus::NotStarted;
                }
            }
            ItemUpdate::Status(status) => {
                self.status = status;
                self.done = status == ItemStatus::Done;
            }
            ItemUpdate::Weight(weight) => self.weight = weight,
            ItemUpdate::Due(due) => self.due = due,
            ItemUpdate::EstHours(hours) => self.est_hours = hours,
            ItemUpdate::Tags(tags) => self.tags = tags,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn due(&self) -> Option<NaiveDate> {
        self.due
    }

    pub fn est_hours(&self) -> f64 {
        self.est_hours
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Due date as stored in documents: `YYYY-MM-DD` or empty
    pub fn due_text(&self) -> String {
        self.due
            .map(|d| d.format(DATE_FMT).to_string())
            .unwrap_or_default()
    }

    /// Tags joined the way they are shown and persisted
    pub fn tags_text(&self) -> String {
        self.tags.join(", ")
    }
}
