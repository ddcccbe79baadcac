//! Read-time status derivation and list ordering.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use std::cmp::Ordering;

use super::types::{Item, Status};

/// Derive the status an item is shown with at `now`.
///
/// Rules, first match wins:
/// 1. a positive reminder interval has elapsed since the last update
/// 2. the due date has passed
/// 3. the item was never updated
/// 4. otherwise the user-chosen display status
#[must_use]
pub fn derive_status(item: &Item, now: DateTime<Utc>) -> Status {
    if reminder_due(item, now) {
        Status::Notification
    } else if item.due.is_some_and(|due| due_instant(due) < now) {
        Status::Overdue
    } else if item.last_update.is_none() {
        Status::New
    } else {
        Status::Display(item.display_status)
    }
}

/// A never-updated item with a positive interval counts as due for a reminder.
fn reminder_due(item: &Item, now: DateTime<Utc>) -> bool {
    if item.reminder_interval == 0 {
        return false;
    }
    match item.last_update {
        None => true,
        Some(last) => last
            .checked_add_days(Days::new(u64::from(item.reminder_interval)))
            .is_some_and(|fires_at| fires_at < now),
    }
}

/// Due dates take effect at the start of the day, UTC.
#[must_use]
pub fn due_instant(due: NaiveDate) -> DateTime<Utc> {
    due.and_time(NaiveTime::MIN).and_utc()
}

/// Recompute `status` on every item.
pub fn refresh_statuses(items: &mut [Item], now: DateTime<Utc>) {
    for item in items.iter_mut() {
        item.status = derive_status(item, now);
    }
}

/// List ordering: status rank, then items with a due date (earliest first)
/// ahead of items without one.
#[must_use]
pub fn compare_items(a: &Item, b: &Item) -> Ordering {
    a.status
        .rank()
        .cmp(&b.status.rank())
        .then_with(|| match (a.due, b.due) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Stable sort by [`compare_items`]; undated items of equal status keep their input order.
pub fn sort_items(items: &mut [Item]) {
    items.sort_by(compare_items);
}

/// Recompute statuses at `now` and sort for display.
pub fn update_and_sort(items: &mut [Item], now: DateTime<Utc>) {
    refresh_statuses(items, now);
    sort_items(items);
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
