//! Printer State Metrics Collector
//!
//! # Metrics Produced
//! - `prusa_status_info` - Reduced printer state ordinal (see [`StateOrdinal`](crate::prusalink::state::StateOrdinal))
//!   - Labels: printer_state (state text reported by the printer)
//! - `prusa_job_info` - Always 1; identifies the loaded job
//!   - Labels: printer_job_id

use super::CollectionContext;
use crate::prusalink::snapshot::PrinterTelemetry;

pub fn collect_state_metrics(ctx: &CollectionContext<'_>, telemetry: &PrinterTelemetry) {
    let m = ctx.metrics;

    ctx.set(
        &m.status_info,
        &[telemetry.state_text.as_str()],
        telemetry.state().value(),
    );

    let job_id = ctx.job.id.to_string();
    ctx.set(&m.job_info, &[job_id.as_str()], 1.0);
}
