//! Storage Metrics Collector
//!
//! Collects capacity of each storage reported by `/api/v1/storage` (USB drive,
//! internal flash).
//!
//! # Metrics Produced
//! - `prusa_storage_free_bytes` - Free space
//!   - Labels: printer_storage
//! - `prusa_storage_total_bytes` - Total capacity
//!   - Labels: printer_storage

use super::{collect_with_handler, CollectionContext, CollectionStatus};

/// Collects storage capacity metrics
///
/// Storages that are not available (e.g. no USB drive inserted) are skipped.
pub async fn collect_storage_metrics(ctx: &CollectionContext<'_>) -> CollectionStatus {
    let printer = ctx.printer;

    collect_with_handler("storage", printer.address(), printer.storage(), |storage| {
        let m = ctx.metrics;
        for entry in storage.storage_list.iter().filter(|s| s.available) {
            let label = if entry.name.is_empty() {
                entry.path.as_str()
            } else {
                entry.name.as_str()
            };
            ctx.set(&m.storage_free_bytes, &[label], entry.free_space);
            ctx.set(&m.storage_total_bytes, &[label], entry.total_space);
        }
    })
    .await
}
