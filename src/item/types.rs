//! Item record and status enums.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

/// Store-assigned item identifier. Valid ids are positive.
pub type ItemId = i64;

/// The lifecycle state a user picks for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayStatus {
    OnHold,
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl DisplayStatus {
    /// Every display status, in storage-code order.
    pub const ALL: [DisplayStatus; 4] = [
        DisplayStatus::OnHold,
        DisplayStatus::NotStarted,
        DisplayStatus::InProgress,
        DisplayStatus::Done,
    ];

    /// Integer code used by the `display_status` column and the edit form.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            DisplayStatus::OnHold => 0,
            DisplayStatus::NotStarted => 1,
            DisplayStatus::InProgress => 2,
            DisplayStatus::Done => 3,
        }
    }

    /// Inverse of [`DisplayStatus::code`]. Unknown codes fall back to not-started.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => DisplayStatus::OnHold,
            2 => DisplayStatus::InProgress,
            3 => DisplayStatus::Done,
            _ => DisplayStatus::NotStarted,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayStatus::OnHold => "on-hold",
            DisplayStatus::NotStarted => "not-started",
            DisplayStatus::InProgress => "in-progress",
            DisplayStatus::Done => "done",
        }
    }

    /// Human-readable label for pages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DisplayStatus::OnHold => "On hold",
            DisplayStatus::NotStarted => "Not started",
            DisplayStatus::InProgress => "In progress",
            DisplayStatus::Done => "Done",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "on-hold" | "0" => Ok(DisplayStatus::OnHold),
            "not-started" | "1" => Ok(DisplayStatus::NotStarted),
            "in-progress" | "2" => Ok(DisplayStatus::InProgress),
            "done" | "3" => Ok(DisplayStatus::Done),
            _ => Err(format!("Unknown display status: {s}")),
        }
    }
}

/// The status an item is shown with, derived on every read.
///
/// Time-based conditions override whatever the user picked; otherwise the
/// display status shows through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// The reminder interval elapsed since the last update.
    Notification,
    /// The due date has passed.
    Overdue,
    /// Never updated since creation.
    #[default]
    New,
    Display(DisplayStatus),
}

impl Status {
    /// Position in the list: lower ranks are shown first.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Status::Notification => 0,
            Status::Overdue => 1,
            Status::New => 2,
            Status::Display(DisplayStatus::InProgress) => 3,
            Status::Display(DisplayStatus::OnHold) => 4,
            Status::Display(DisplayStatus::NotStarted) => 5,
            Status::Display(DisplayStatus::Done) => 6,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Notification => "notification",
            Status::Overdue => "overdue",
            Status::New => "new",
            Status::Display(display) => display.as_str(),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Status::Notification => "Reminder",
            Status::Overdue => "Overdue",
            Status::New => "New",
            Status::Display(display) => display.label(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task on the list.
///
/// `status` is not stored anywhere; storage backends leave it at its default
/// and the store recomputes it on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Markdown source.
    pub description: String,
    pub due: Option<NaiveDate>,
    /// Days after `last_update` before a reminder fires. 0 disables it.
    pub reminder_interval: u32,
    pub last_update: Option<DateTime<Utc>>,
    pub display_status: DisplayStatus,
    pub status: Status,
}

impl Item {
    /// A freshly created item: not started, never updated, no due date or reminder.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            due: None,
            reminder_interval: 0,
            last_update: None,
            display_status: DisplayStatus::NotStarted,
            status: Status::New,
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
