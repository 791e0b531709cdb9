//! Aggregate completion metrics
//!
//! Weighted mode sums over every item and ignores the tag filter; the other
//! two modes and the hour/deadline figures only see filter-visible items.

use super::item::{DATE_FMT, Item, effective_amount};
use super::settings::{ProgressMode, TagFilter};
use super::tags::is_visible;
use chrono::NaiveDate;
use std::fmt;

/// Full output of one progress computation
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub mode: ProgressMode,
    /// Always within `[0, 100]`; 0 exactly when `total <= 0`
    pub percentage: f64,
    pub done: f64,
    pub total: f64,
    pub unit: &'static str,
    pub total_hours: f64,
    pub remaining_hours: f64,
    pub nearest_due: Option<NaiveDate>,
}

fn percentage(done: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        (done / total * 100.0).clamp(0.0, 100.0)
    }
}

/// `(done, total)` summed over `items` with `amount` as each item's share
fn sum_shares<'a>(
    items: impl Iterator<Item = &'a Item>,
    amount: impl Fn(&Item) -> f64,
) -> (f64, f64) {
    items.fold((0.0, 0.0), |(done, total), it| {
        let share = amount(it);
        (if it.is_done() { done + share } else { done }, total + share)
    })
}

pub fn compute(items: &[Item], mode: ProgressMode, filter: &TagFilter) -> ProgressReport {
    let visible = || items.iter().filter(|it| is_visible(it, filter));

    let (done, total) = match mode {
        ProgressMode::Weighted => sum_shares(items.iter(), |it| effective_amount(it.weight())),
        ProgressMode::Unweighted => sum_shares(visible(), |_| 1.0),
        ProgressMode::HoursWeighted => {
            sum_shares(visible(), |it| effective_amount(it.est_hours()))
        }
    };

    let (finished_hours, total_hours) =
        sum_shares(visible(), |it| effective_amount(it.est_hours()));
    let nearest_due = visible().filter_map(Item::due).min();

    ProgressReport {
        mode,
        percentage: percentage(done, total),
        done,
        total,
        unit: mode.unit(),
        total_hours,
        remaining_hours: total_hours - finished_hours,
        nearest_due,
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nearest = self
            .nearest_due
            .map(|d| d.format(DATE_FMT).to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "{:.1}% ({:.1} / {:.1} {}) | Hours: {:.1} total / {:.1} remaining | Nearest due: {} | Mode: {}",
            self.percentage,
            self.done,
            self.total,
            self.unit,
            self.total_hours,
            self.remaining_hours,
            nearest,
            self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{ItemStore, NewItem};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> ItemStore {
        let mut store = ItemStore::new();
        store
            .add(
                NewItem::new("Essay")
                    .with_weight(2.0)
                    .with_done(true)
                    .with_hours(3.0)
                    .with_tags("english")
                    .with_due(date(2024, 1, 12)),
            )
            .unwrap();
        store
            .add(
                NewItem::new("Quiz")
                    .with_weight(1.0)
                    .with_hours(1.0)
                    .with_tags("math")
                    .with_due(date(2024, 1, 10)),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_weighted_example() {
        let store = sample();
        let report = compute(store.list(), ProgressMode::Weighted, &TagFilter::All);
        assert!((report.percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.done, 2.0);
        assert_eq!(report.total, 3.0);
        assert_eq!(report.unit, "weight");
        assert!(report.to_string().starts_with("66.7% (2.0 / 3.0 weight)"));
    }

    #[test]
    fn test_weighted_ignores_filter() {
        let store = sample();
        let all = compute(store.list(), ProgressMode::Weighted, &TagFilter::All);
        let math = compute(
            store.list(),
            ProgressMode::Weighted,
            &TagFilter::Tag("math".into()),
        );
        assert_eq!(all.percentage, math.percentage);
        assert_eq!(all.total, math.total);
    }

    #[test]
    fn test_unweighted_and_hours_respect_filter() {
        let store = sample();
        let math = TagFilter::Tag("math".into());

        let unweighted_all = compute(store.list(), ProgressMode::Unweighted, &TagFilter::All);
        assert_eq!(unweighted_all.percentage, 50.0);
        let unweighted_math = compute(store.list(), ProgressMode::Unweighted, &math);
        assert_eq!(unweighted_math.percentage, 0.0);
        assert_eq!(unweighted_math.total, 1.0);
        assert_eq!(unweighted_math.unit, "items");

        let hours_all = compute(store.list(), ProgressMode::HoursWeighted, &TagFilter::All);
        assert_eq!(hours_all.percentage, 75.0);
        let hours_english = compute(
            store.list(),
            ProgressMode::HoursWeighted,
            &TagFilter::Tag("english".into()),
        );
        assert_eq!(hours_english.percentage, 100.0);
    }

    #[test]
    fn test_hour_totals_and_nearest_due_use_visible_items() {
        let store = sample();
        let all = compute(store.list(), ProgressMode::Weighted, &TagFilter::All);
        assert_eq!(all.total_hours, 4.0);
        assert_eq!(all.remaining_hours, 1.0);
        assert_eq!(all.nearest_due, Some(date(2024, 1, 10)));

        let english = compute(
            store.list(),
            ProgressMode::Weighted,
            &TagFilter::Tag("english".into()),
        );
        assert_eq!(english.total_hours, 3.0);
        assert_eq!(english.remaining_hours, 0.0);
        // Done items still count for the nearest deadline
        assert_eq!(english.nearest_due, Some(date(2024, 1, 12)));
    }

    #[test]
    fn test_zero_total_gives_zero_percentage() {
        let empty = compute(&[], ProgressMode::Unweighted, &TagFilter::All);
        assert_eq!(empty.percentage, 0.0);
        assert_eq!(empty.total, 0.0);
        assert_eq!(empty.nearest_due, None);

        let mut store = ItemStore::new();
        store.add(NewItem::new("a").with_done(true)).unwrap();
        let hours = compute(store.list(), ProgressMode::HoursWeighted, &TagFilter::All);
        assert_eq!(hours.total, 0.0);
        assert_eq!(hours.percentage, 0.0);
    }

    #[test]
    fn test_filter_with_no_matches() {
        let store = sample();
        let report = compute(
            store.list(),
            ProgressMode::HoursWeighted,
            &TagFilter::Tag("art".into()),
        );
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.total_hours, 0.0);
        assert_eq!(report.nearest_due, None);
        assert!(report.to_string().contains("Nearest due: none"));
    }
}
