//! Progress tracking domain
//!
//! This module contains the work item model and everything derived from it.
//! It is split into submodules for better organization:
//! - `item`: Item, status and the entry-time validation rules
//! - `store`: Ordered item collection with stable handles
//! - `settings`: Persisted preferences (sort, mode, filter, goal)
//! - `tags`: Tag derivation and filter visibility
//! - `progress`: Weighted / Unweighted / Hours-weighted completion metrics
//! - `sort`: Stable ordering by the user's sort key
//! - `weekly`: Seven-day due-date buckets
//! - `session`: The single mutable state container

mod item;
mod progress;
mod session;
mod settings;
mod sort;
mod store;
mod tags;
mod weekly;

// Re-export all public types
pub use item::{
    DATE_FMT, Item, ItemId, ItemStatus, ItemUpdate, NewItem, local_date_today, parse_due_date,
    parse_due_lenient, parse_tags,
};
pub use progress::{ProgressReport, compute as compute_progress};
pub use session::{Session, SettingsUpdate};
pub use settings::{MAX_NOTIFY_DAYS, ProgressMode, Settings, SortKey, TagFilter};
pub use sort::sort_items;
pub use store::ItemStore;
pub use tags::{distinct_tags, filter_options, is_visible};
pub use weekly::{DayBucket, Urgency, WEEK_DAYS, WeeklyEntry, WeeklyView, bucket_week};
