//! Print Progress Metrics Collector
//!
//! Collects job progress and motion metrics for filament printers. Everything here comes
//! from the job and printer payloads already read as required endpoints, so this
//! collector never fails.
//!
//! # Metrics Produced
//! - `prusa_print_speed_ratio` - Speed multiplier (1.0 = 100 %)
//! - `prusa_print_time_seconds` - Elapsed print time
//! - `prusa_printing_time_remaining_seconds` - Estimated time left
//! - `prusa_printing_progress` - Completion in percent
//! - `prusa_material_info` - 1 when filament is loaded, 0 otherwise
//!   - Labels: printer_filament
//! - `prusa_axis` - Axis position
//!   - Labels: printer_axis (x, y, z)

use super::{bool_to_float, CollectionContext};
use crate::prusalink::snapshot::PrinterTelemetry;

pub fn collect_progress_metrics(ctx: &CollectionContext<'_>, telemetry: &PrinterTelemetry) {
    let m = ctx.metrics;
    let job = ctx.job;

    ctx.set(&m.print_speed_ratio, &[], telemetry.print_speed_ratio);
    ctx.set(&m.print_time_seconds, &[], job.time_elapsed);
    ctx.set(
        &m.printing_time_remaining_seconds,
        &[],
        job.time_remaining,
    );
    ctx.set(&m.printing_progress, &[], job.completion);

    ctx.set(
        &m.material_info,
        &[telemetry.material.as_str()],
        bool_to_float(telemetry.material_loaded()),
    );

    let axes = telemetry.axes;
    for (axis, position) in [("x", axes.x), ("y", axes.y), ("z", axes.z)] {
        ctx.set(&m.axis, &[axis], position);
    }
}
