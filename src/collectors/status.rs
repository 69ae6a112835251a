//! Status Metrics Collector
//!
//! Reads `/api/v1/status` for the fan speeds and flow factor that the legacy printer
//! payload does not carry.
//!
//! # Metrics Produced
//! - `prusa_fan_speed_rpm` - Fan speed
//!   - Labels: fan (hotend, print)
//! - `prusa_print_flow_ratio` - Flow multiplier (1.0 = 100 %)

use super::{collect_with_handler, CollectionContext, CollectionStatus};

/// Collects fan and flow metrics from the status endpoint
///
/// # Returns
///
/// * `CollectionStatus::Success` - Metrics were updated
/// * `CollectionStatus::Failed` - The endpoint failed; the metrics are omitted for this pass
/// * `CollectionStatus::Skipped` - The printer's family has no status endpoint
pub async fn collect_status_metrics(ctx: &CollectionContext<'_>) -> CollectionStatus {
    let printer = ctx.printer;

    collect_with_handler("status", printer.address(), printer.status(), |status| {
        let m = ctx.metrics;
        for fan in &status.fans {
            ctx.set(&m.fan_speed_rpm, &[fan.name], fan.rpm);
        }
        ctx.set(&m.print_flow_ratio, &[], status.flow_ratio);
    })
    .await
}
