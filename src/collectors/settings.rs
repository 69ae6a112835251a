//! Settings Metrics Collector
//!
//! # Metrics Produced
//! - `prusa_farm_mode` - 1 when the printer is in farm mode

use super::{bool_to_float, collect_with_handler, CollectionContext, CollectionStatus};

pub async fn collect_settings_metrics(ctx: &CollectionContext<'_>) -> CollectionStatus {
    let printer = ctx.printer;

    collect_with_handler("settings", printer.address(), printer.settings(), |settings| {
        ctx.set(
            &ctx.metrics.farm_mode,
            &[],
            bool_to_float(settings.printer.farm_mode),
        );
    })
    .await
}
