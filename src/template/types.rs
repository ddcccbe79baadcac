use serde::Serialize;

use crate::item::{DisplayStatus, Item};

/// The pages the server renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    ViewAll,
    View,
    Edit,
    Login,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::ViewAll, Page::View, Page::Edit, Page::Login];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Page::ViewAll => "view_all",
            Page::View => "view",
            Page::Edit => "edit",
            Page::Login => "login",
        }
    }

    pub(super) fn source(self) -> &'static str {
        match self {
            Page::ViewAll => include_str!("../../templates/view_all.hbs"),
            Page::View => include_str!("../../templates/view.hbs"),
            Page::Edit => include_str!("../../templates/edit.hbs"),
            Page::Login => include_str!("../../templates/login.hbs"),
        }
    }
}

/// An item as the templates see it. Dates are preformatted; empty means unset.
/// Placeholders: {{id}}, {{name}}, {{description}}, {{status}}, {{`status_label`}},
/// {{`display_status`}}, {{`display_status_label`}}, {{due}}, {{`reminder_interval`}}, {{`last_update`}}
#[derive(Debug, Clone, Serialize)]
pub struct ItemContext {
    pub id: i64,
    pub name: String,
    /// Markdown source, for the edit form.
    pub description: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub display_status: i64,
    pub display_status_label: &'static str,
    /// `YYYY-MM-DD`, the format of `<input type="date">`.
    pub due: String,
    pub reminder_interval: u32,
    pub last_update: String,
}

impl From<&Item> for ItemContext {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            status: item.status.as_str(),
            status_label: item.status.label(),
            display_status: item.display_status.code(),
            display_status_label: item.display_status.label(),
            due: item
                .due
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            reminder_interval: item.reminder_interval,
            last_update: item
                .last_update
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// One `<option>` of the display-status select.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOption {
    pub value: i64,
    pub label: &'static str,
    pub selected: bool,
}

impl StatusOption {
    /// All display statuses with `current` preselected.
    #[must_use]
    pub fn all(current: DisplayStatus) -> Vec<Self> {
        DisplayStatus::ALL
            .iter()
            .map(|&status| Self {
                value: status.code(),
                label: status.label(),
                selected: status == current,
            })
            .collect()
    }
}

/// Context for `/`: the sorted list plus the first item's description as HTML.
#[derive(Debug, Clone, Serialize)]
pub struct ListPageContext {
    pub items: Vec<ItemContext>,
    pub description: String,
}

/// Context for `/view`.
#[derive(Debug, Clone, Serialize)]
pub struct ViewPageContext {
    pub title: String,
    pub item: ItemContext,
    pub description: String,
}

/// Context for `/edit`.
#[derive(Debug, Clone, Serialize)]
pub struct EditPageContext {
    pub title: String,
    pub item: ItemContext,
    pub status_options: Vec<StatusOption>,
}

/// Context for the login page.
#[derive(Debug, Clone, Serialize)]
pub struct LoginPageContext {
    pub title: &'static str,
    pub login_path: String,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
