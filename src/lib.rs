//! One List: a single-user task list served as HTML behind a password cookie.

// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

pub mod config;
pub mod item;
pub mod logging;
pub mod markdown;
pub mod metrics;
pub mod storage;
pub mod template;
pub mod web;

// Re-export commonly used types
pub use config::{load_config, AppConfig, AuthConfig, ConfigError};
pub use item::{DisplayStatus, Item, ItemId, ItemStore, ItemUpdate, Status};
pub use storage::{MemoryStorage, SqliteStorage, Storage, StorageError};
pub use template::{TemplateEngine, TemplateError};
pub use web::{router, AppState};
