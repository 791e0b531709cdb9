use super::item::{Item, ItemId, ItemStatus};
use super::settings::TagFilter;
use super::tags::is_visible;
use chrono::{Days, NaiveDate};
use std::fmt;

/// Number of day buckets: today plus the six following days
pub const WEEK_DAYS: usize = 7;

/// How close a deadline is, derived only from its day offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    Today,
    Tomorrow,
    Soon,
    Later,
}

impl Urgency {
    pub fn from_offset(days_until: i64) -> Self {
        match days_until {
            d if d < 0 => Urgency::Overdue,
            0 => Urgency::Today,
            1 => Urgency::Tomorrow,
            2 | 3 => Urgency::Soon,
            _ => Urgency::Later,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Today => "today",
            Urgency::Tomorrow => "tomorrow",
            Urgency::Soon => "soon",
            Urgency::Later => "later",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyEntry {
    pub id: ItemId,
    pub name: String,
    pub status: ItemStatus,
    pub tags: Vec<String>,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub entries: Vec<WeeklyEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyView {
    pub days: Vec<DayBucket>,
}

impl WeeklyView {
    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}

/// Bucket not-done, filter-visible items due within `[today, today+6]`
///
/// The week stops early at the last representable calendar day.
pub fn bucket_week(items: &[Item], filter: &TagFilter, today: NaiveDate) -> WeeklyView {
    let mut days: Vec<DayBucket> = (0..WEEK_DAYS as u64)
        .map_while(|offset| {
            today
                .checked_add_days(Days::new(offset))
                .map(|date| DayBucket {
                    date,
                    entries: Vec::new(),
                })
        })
        .collect();

    for item in items {
        if item.is_done() || !is_visible(item, filter) {
            continue;
        }
        let Some(due) = item.due() else {
            continue;
        };
        let offset = (due - today).num_days();
        if offset < 0 || offset as usize >= days.len() {
            continue;
        }
        days[offset as usize].entries.push(WeeklyEntry {
            id: item.id(),
            name: item.name().to_string(),
            status: item.status(),
            tags: item.tags().to_vec(),
            urgency: Urgency::from_offset(offset),
        });
    }

    WeeklyView { days }
}
