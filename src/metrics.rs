//! Timing for item store operations and ids for request correlation.

use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::item::ItemId;

/// Store operations slower than this are logged at `warn`.
pub const SLOW_OPERATION: Duration = Duration::from_millis(250);

/// Times one store operation and logs it, with the item it touched or the
/// number of items it returned, when dropped.
///
/// ```ignore
/// let mut timer = OperationTimer::new("list_items");
/// let items = fetch()?;
/// timer.record_count(items.len());
/// ```
pub struct OperationTimer {
    operation: &'static str,
    item_id: Option<ItemId>,
    item_count: Option<usize>,
    start: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            item_id: None,
            item_count: None,
            start: Instant::now(),
        }
    }

    /// Timer for an operation on a single item.
    #[must_use]
    pub fn for_item(operation: &'static str, id: ItemId) -> Self {
        let mut timer = Self::new(operation);
        timer.record_item(id);
        timer
    }

    pub fn record_item(&mut self, id: ItemId) {
        self.item_id = Some(id);
    }

    pub fn record_count(&mut self, count: usize) {
        self.item_count = Some(count);
    }
}

fn is_slow(elapsed: Duration) -> bool {
    elapsed >= SLOW_OPERATION
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if is_slow(elapsed) {
            warn!(
                operation = self.operation,
                item_id = self.item_id,
                item_count = self.item_count,
                duration_ms,
                "Slow store operation"
            );
        } else {
            debug!(
                operation = self.operation,
                item_id = self.item_id,
                item_count = self.item_count,
                duration_ms,
                "Store operation finished"
            );
        }
    }
}

/// Generate a short request ID for correlating log lines.
#[must_use]
pub fn generate_request_id() -> String {
    let uuid_str = uuid::Uuid::new_v4().to_string();
    uuid_str.get(..8).unwrap_or(&uuid_str).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_has_no_item_details() {
        let timer = OperationTimer::new("list_items");
        assert_eq!(timer.operation, "list_items");
        assert_eq!(timer.item_id, None);
        assert_eq!(timer.item_count, None);
    }

    #[test]
    fn test_for_item_records_id() {
        let timer = OperationTimer::for_item("get_item", 7);
        assert_eq!(timer.item_id, Some(7));
    }

    #[test]
    fn test_record_count_keeps_latest() {
        let mut timer = OperationTimer::new("list_items");
        timer.record_count(2);
        timer.record_count(5);
        assert_eq!(timer.item_count, Some(5));
    }

    #[test]
    fn test_slow_threshold() {
        assert!(!is_slow(Duration::from_millis(3)));
        assert!(is_slow(SLOW_OPERATION));
        assert!(is_slow(Duration::from_secs(2)));
    }

    #[test]
    fn test_generate_request_id_format() {
        let id = generate_request_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_request_id_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
