//! Resin Printer Metrics Collector
//!
//! SL printers report everything in `/api/printer`; no further endpoint is read.
//!
//! # Metrics Produced
//! - `prusa_cover_status` - 1 when the cover is closed, 0 when open
//! - `prusa_ambient_temperature_celsius`, `prusa_cpu_temperature_celsius`,
//!   `prusa_uv_temperature_celsius`
//! - `prusa_chamber_temperature_celsius` (+ target, offset)
//! - `prusa_fan_speed_rpm`
//!   - Labels: fan (blower, rear, uv)

use super::temperature::collect_chamber_metrics;
use super::{bool_to_float, CollectionContext};
use crate::prusalink::snapshot::PrinterTelemetry;

pub fn collect_resin_metrics(ctx: &CollectionContext<'_>, telemetry: &PrinterTelemetry) {
    let m = ctx.metrics;
    let resin = telemetry.resin;

    ctx.set(&m.cover_status, &[], bool_to_float(resin.cover_closed));
    ctx.set(&m.ambient_temperature, &[], resin.ambient_temp);
    ctx.set(&m.cpu_temperature, &[], resin.cpu_temp);
    ctx.set(&m.uv_temperature, &[], resin.uv_temp);

    collect_chamber_metrics(ctx, telemetry);

    for fan in &telemetry.fans {
        ctx.set(&m.fan_speed_rpm, &[fan.name], fan.rpm);
    }
}
