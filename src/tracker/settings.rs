//! Session-wide settings
//!
//! Enum-valued settings persist as their display labels. Unknown labels read
//! back from a document fall back to the default instead of failing the load.

use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

macro_rules! serde_as_label {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Ok(raw.parse().unwrap_or_default())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// Lowercase and drop separators so "Hours-weighted", "hours_weighted" and
/// "HoursWeighted" all compare equal
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Weighting policy for the aggregate percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProgressMode {
    #[default]
    Weighted,
    Unweighted,
    HoursWeighted,
}

impl ProgressMode {
    pub fn label(self) -> &'static str {
        match self {
            ProgressMode::Weighted => "Weighted",
            ProgressMode::Unweighted => "Unweighted",
            ProgressMode::HoursWeighted => "Hours-weighted",
        }
    }

    /// Unit shown next to the done/total figures
    pub fn unit(self) -> &'static str {
        match self {
            ProgressMode::Weighted => "weight",
            ProgressMode::Unweighted => "items",
            ProgressMode::HoursWeighted => "hrs",
        }
    }
}

impl FromStr for ProgressMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "weighted" => Ok(ProgressMode::Weighted),
            "unweighted" => Ok(ProgressMode::Unweighted),
            "hoursweighted" | "hours" => Ok(ProgressMode::HoursWeighted),
            _ => Err(ValidationError::InvalidMode(s.to_string())),
        }
    }
}

serde_as_label!(ProgressMode);

/// Key the canonical item list is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    DueDate,
    Name,
    Weight,
    Estimate,
    Done,
    Status,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::DueDate => "Due Date",
            SortKey::Name => "Name",
            SortKey::Weight => "Weight",
            SortKey::Estimate => "Estimate",
            SortKey::Done => "Done",
            SortKey::Status => "Status",
        }
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "duedate" | "due" => Ok(SortKey::DueDate),
            "name" => Ok(SortKey::Name),
            "weight" => Ok(SortKey::Weight),
            "estimate" | "esthours" | "hours" => Ok(SortKey::Estimate),
            "done" => Ok(SortKey::Done),
            "status" => Ok(SortKey::Status),
            _ => Err(ValidationError::InvalidSortKey(s.to_string())),
        }
    }
}

serde_as_label!(SortKey);

/// Active tag filter: the "All" wildcard or one exact tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn label(&self) -> &str {
        match self {
            TagFilter::All => Self::ALL_LABEL,
            TagFilter::Tag(tag) => tag,
        }
    }
}

impl FromStr for TagFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == Self::ALL_LABEL {
            Ok(TagFilter::All)
        } else {
            Ok(TagFilter::Tag(trimmed.to_string()))
        }
    }
}

serde_as_label!(TagFilter);

/// Largest accepted notification horizon in days
pub const MAX_NOTIFY_DAYS: u32 = 365;

/// Persisted preferences, saved and restored together with the item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_mode: bool,
    pub sort_key: SortKey,
    pub sort_ascending: bool,
    pub progress_mode: ProgressMode,
    pub notify_enabled: bool,
    pub notify_days: u32,
    pub filter_tag: TagFilter,
    pub goal_text: String,
    /// Empty when no goal image is set
    pub goal_image_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            sort_key: SortKey::DueDate,
            sort_ascending: true,
            progress_mode: ProgressMode::Weighted,
            notify_enabled: true,
            notify_days: 3,
            filter_tag: TagFilter::All,
            goal_text: String::new(),
            goal_image_path: String::new(),
        }
    }
}
