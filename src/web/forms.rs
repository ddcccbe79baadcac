//! Query and form payloads.
//!
//! Every field arrives as a string and is parsed leniently: a malformed
//! number reads as `0`, a malformed date as "no due date", an unknown
//! display status as not-started.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::item::{DisplayStatus, ItemId, ItemUpdate};

/// `?ID=<n>` on the view, edit and delete routes.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: String,
}

impl IdQuery {
    #[must_use]
    pub fn id(&self) -> ItemId {
        parse_id(&self.id)
    }
}

/// Body of `POST /save`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveForm {
    pub id: String,
    pub name: String,
    pub description: String,
    pub due: String,
    pub reminder_interval: String,
    #[serde(alias = "Display_status")]
    pub display_status: String,
}

impl SaveForm {
    #[must_use]
    pub fn id(&self) -> ItemId {
        parse_id(&self.id)
    }

    #[must_use]
    pub fn into_update(self) -> ItemUpdate {
        ItemUpdate {
            due: parse_due(&self.due),
            reminder_interval: parse_interval(&self.reminder_interval),
            display_status: parse_display_status(&self.display_status),
            name: self.name,
            description: self.description,
        }
    }
}

/// Body of `POST /create`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateForm {
    pub name: String,
}

/// Body of the login form. The password field is called `string`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    #[serde(rename = "string")]
    pub password: String,
}

#[must_use]
pub fn parse_id(raw: &str) -> ItemId {
    raw.trim().parse().unwrap_or(0)
}

#[must_use]
pub fn parse_due(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Negative or malformed intervals disable the reminder.
#[must_use]
pub fn parse_interval(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Accepts the numeric code or the name (`on-hold`, `in_progress`, ...).
#[must_use]
pub fn parse_display_status(raw: &str) -> DisplayStatus {
    raw.trim().parse().unwrap_or_default()
}
