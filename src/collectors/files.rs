//! File Count Metrics Collector
//!
//! # Metrics Produced
//! - `prusa_files_count` - Number of entries directly under each storage root
//!   - Labels: printer_storage (display name of the storage)

use super::CollectionContext;
use crate::prusalink::types::FilesJson;

pub fn collect_files_metrics(ctx: &CollectionContext<'_>, files: &FilesJson) {
    for storage in &files.files {
        ctx.set(
            &ctx.metrics.files_count,
            &[storage.display.as_str()],
            storage.children.len() as f64,
        );
    }
}
