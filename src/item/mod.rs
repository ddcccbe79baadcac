//! Items on the list: the record type, status derivation, ordering, and the
//! store that ties them to persistence.

mod status;
mod store;
mod types;

pub use status::{
    compare_items, derive_status, due_instant, refresh_statuses, sort_items, update_and_sort,
};
pub use store::{Clock, ItemStore, ItemUpdate};
pub use types::{DisplayStatus, Item, ItemId, Status};
