use super::*;
use crate::item::types::DisplayStatus;
use chrono::{Duration, TimeZone};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn item(id: i64) -> Item {
    Item::new(id, format!("item {id}"))
}

fn updated(id: i64, display_status: DisplayStatus) -> Item {
    Item {
        last_update: Some(now() - Duration::hours(1)),
        display_status,
        ..item(id)
    }
}

#[test]
fn test_untouched_item_is_new() {
    assert_eq!(derive_status(&item(1), now()), Status::New);
}

#[test]
fn test_updated_item_shows_display_status() {
    let it = updated(1, DisplayStatus::InProgress);
    assert_eq!(
        derive_status(&it, now()),
        Status::Display(DisplayStatus::InProgress)
    );
}

#[test]
fn test_past_due_is_overdue_even_when_done() {
    let it = Item {
        due: Some(date(2024, 7, 1)),
        ..updated(1, DisplayStatus::Done)
    };
    assert_eq!(derive_status(&it, now()), Status::Overdue);
}

#[test]
fn test_past_due_beats_new() {
    let it = Item {
        due: Some(date(2024, 1, 1)),
        ..item(1)
    };
    assert_eq!(derive_status(&it, now()), Status::Overdue);
}

#[test]
fn test_due_today_is_overdue_after_midnight_utc() {
    let it = Item {
        due: Some(date(2024, 7, 15)),
        ..updated(1, DisplayStatus::NotStarted)
    };
    assert_eq!(derive_status(&it, now()), Status::Overdue);
}

#[test]
fn test_future_due_is_not_overdue() {
    let it = Item {
        due: Some(date(2024, 7, 16)),
        ..updated(1, DisplayStatus::OnHold)
    };
    assert_eq!(
        derive_status(&it, now()),
        Status::Display(DisplayStatus::OnHold)
    );
}

#[test]
fn test_elapsed_reminder_is_notification() {
    let it = Item {
        reminder_interval: 3,
        last_update: Some(now() - Duration::days(4)),
        ..updated(1, DisplayStatus::InProgress)
    };
    assert_eq!(derive_status(&it, now()), Status::Notification);
}

#[test]
fn test_reminder_beats_overdue() {
    let it = Item {
        reminder_interval: 1,
        last_update: Some(now() - Duration::days(2)),
        due: Some(date(2024, 1, 1)),
        ..item(1)
    };
    assert_eq!(derive_status(&it, now()), Status::Notification);
}

#[test]
fn test_pending_reminder_does_not_fire() {
    let it = Item {
        reminder_interval: 7,
        last_update: Some(now() - Duration::days(6)),
        ..updated(1, DisplayStatus::NotStarted)
    };
    assert_eq!(
        derive_status(&it, now()),
        Status::Display(DisplayStatus::NotStarted)
    );
}

#[test]
fn test_zero_interval_never_notifies() {
    let it = Item {
        reminder_interval: 0,
        last_update: Some(now() - Duration::days(400)),
        ..updated(1, DisplayStatus::Done)
    };
    assert_eq!(
        derive_status(&it, now()),
        Status::Display(DisplayStatus::Done)
    );
}

#[test]
fn test_reminder_on_never_updated_item_fires() {
    let it = Item {
        reminder_interval: 5,
        ..item(1)
    };
    assert_eq!(derive_status(&it, now()), Status::Notification);
}

#[test]
fn test_sort_puts_notification_then_overdue_then_done() {
    let a = Item {
        status: Status::Display(DisplayStatus::Done),
        ..item(1)
    };
    let b = Item {
        status: Status::Overdue,
        due: Some(date(2024, 1, 1)),
        ..item(2)
    };
    let c = Item {
        status: Status::Notification,
        ..item(3)
    };
    let mut items = vec![a, b, c];
    sort_items(&mut items);
    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_sort_orders_equal_status_by_due_date() {
    let later = Item {
        status: Status::Overdue,
        due: Some(date(2024, 6, 1)),
        ..item(1)
    };
    let earlier = Item {
        status: Status::Overdue,
        due: Some(date(2024, 1, 1)),
        ..item(2)
    };
    let mut items = vec![later, earlier];
    sort_items(&mut items);
    assert_eq!(items[0].id, 2);
    assert_eq!(items[1].id, 1);
}

#[test]
fn test_sort_dated_before_undated_and_undated_stable() {
    let status = Status::Display(DisplayStatus::InProgress);
    let undated_first = Item { status, ..item(1) };
    let dated = Item {
        status,
        due: Some(date(2030, 1, 1)),
        ..item(2)
    };
    let undated_second = Item { status, ..item(3) };
    let mut items = vec![undated_first, dated, undated_second];
    sort_items(&mut items);
    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[test]
fn test_update_and_sort_full_rank_order() {
    let done = updated(1, DisplayStatus::Done);
    let not_started = updated(2, DisplayStatus::NotStarted);
    let on_hold = updated(3, DisplayStatus::OnHold);
    let in_progress = updated(4, DisplayStatus::InProgress);
    let fresh = item(5);
    let overdue = Item {
        due: Some(date(2024, 2, 2)),
        ..updated(6, DisplayStatus::InProgress)
    };
    let reminder = Item {
        reminder_interval: 1,
        last_update: Some(now() - Duration::days(3)),
        ..updated(7, DisplayStatus::Done)
    };
    let mut items = vec![done, not_started, on_hold, in_progress, fresh, overdue, reminder];
    update_and_sort(&mut items, now());
    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![7, 6, 5, 4, 3, 2, 1]);
}
