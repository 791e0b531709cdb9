//! Deadline notifications
//!
//! A tokio interval task scans the session for newly overdue or soon-due
//! items. Each item name alerts at most once per session: the dedup set is
//! only cleared by a full state load, so an item that keeps slipping further
//! past its deadline is not announced again.

use crate::tracker::{DATE_FMT, Item, Session, TagFilter, is_visible, local_date_today};
use chrono::{Days, NaiveDate};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, warn};

/// Default time between deadline scans
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// One combined deadline alert
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub overdue: Vec<(String, NaiveDate)>,
    pub due_soon: Vec<(String, NaiveDate)>,
}

fn join_entries(entries: &[(String, NaiveDate)]) -> String {
    entries
        .iter()
        .map(|(name, due)| format!("{} ({})", name, due.format(DATE_FMT)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Alert {
    /// One line per non-empty group
    pub fn messages(&self) -> Vec<String> {
        let mut msgs = Vec::new();
        if !self.overdue.is_empty() {
            msgs.push(format!("Overdue: {}", join_entries(&self.overdue)));
        }
        if !self.due_soon.is_empty() {
            msgs.push(format!("Due soon: {}", join_entries(&self.due_soon)));
        }
        msgs
    }

    /// Single-line banner text
    pub fn banner(&self) -> String {
        self.messages().join(" | ")
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.overdue
            .iter()
            .chain(self.due_soon.iter())
            .map(|(name, _)| name.as_str())
    }
}

/// Find not-done, filter-visible items that are overdue or due within
/// `notify_days`, skipping names that were already alerted
pub fn scan(
    items: &[Item],
    filter: &TagFilter,
    notify_days: u32,
    today: NaiveDate,
    already_notified: &HashSet<String>,
) -> Option<Alert> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(notify_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut alert = Alert {
        overdue: Vec::new(),
        due_soon: Vec::new(),
    };

    for item in items {
        if item.is_done() || !is_visible(item, filter) {
            continue;
        }
        let Some(due) = item.due() else {
            continue;
        };
        if already_notified.contains(item.name()) {
            continue;
        }
        if due < today {
            alert.overdue.push((item.name().to_string(), due));
        } else if due <= horizon {
            alert.due_soon.push((item.name().to_string(), due));
        }
    }

    if alert.overdue.is_empty() && alert.due_soon.is_empty() {
        None
    } else {
        Some(alert)
    }
}

/// Receives alerts produced by the scheduler
pub trait AlertSink: Send + Sync + 'static {
    fn deliver(&self, alert: &Alert);
}

/// Logs alerts and optionally rings the terminal bell
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    pub audible: bool,
}

impl AlertSink for LogSink {
    fn deliver(&self, alert: &Alert) {
        for msg in alert.messages() {
            warn!(target: "deadlines", "{}", msg);
        }
        if self.audible {
            // stdout carries the MCP transport, so the bell goes to stderr
            eprint!("\x07");
        }
    }
}

/// Run one scan against the session using today's local date
pub fn tick(session: &Mutex<Session>) -> Option<Alert> {
    let mut session = session.lock().unwrap();
    session.check_deadlines(local_date_today())
}

/// Start the repeating deadline scan. The first scan happens one `period`
/// after start; the task runs until aborted.
pub fn spawn_scheduler<S: AlertSink>(
    session: Arc<Mutex<Session>>,
    period: Duration,
    sink: S,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            match tick(&session) {
                Some(alert) => sink.deliver(&alert),
                None => debug!("Deadline scan found nothing new"),
            }
        }
    })
}
