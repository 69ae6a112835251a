//! Temperature Metrics Collector
//!
//! Collects bed and tool temperatures from the printer telemetry. Every family reports
//! these, so they are emitted on each successful pass.
//!
//! # Metrics Produced
//! - `prusa_bed_temperature_celsius`, `prusa_bed_target_temperature_celsius`,
//!   `prusa_bed_offset_temperature_celsius`
//! - `prusa_tool_temperature_celsius`, `prusa_tool_target_temperature_celsius`,
//!   `prusa_tool_offset_temperature_celsius`
//!   - Labels: tool

use super::CollectionContext;
use crate::prusalink::snapshot::PrinterTelemetry;

/// Index label of the only tool head the printers report
const TOOL_INDEX: &str = "0";

/// Collects bed and tool-0 temperature metrics
///
/// # Arguments
///
/// * `ctx` - Collection context for the printer
/// * `telemetry` - Telemetry read from `/api/printer` during this pass
pub fn collect_temperature_metrics(ctx: &CollectionContext<'_>, telemetry: &PrinterTelemetry) {
    let m = ctx.metrics;
    let bed = telemetry.bed;
    let tool = telemetry.tool0;

    ctx.set(&m.bed_temperature, &[], bed.actual);
    ctx.set(&m.bed_target_temperature, &[], bed.target);
    ctx.set(&m.bed_offset_temperature, &[], bed.offset);

    ctx.set(&m.tool_temperature, &[TOOL_INDEX], tool.actual);
    ctx.set(&m.tool_target_temperature, &[TOOL_INDEX], tool.target);
    ctx.set(&m.tool_offset_temperature, &[TOOL_INDEX], tool.offset);
}

/// Chamber readings; only resin printers have a chamber sensor.
pub fn collect_chamber_metrics(ctx: &CollectionContext<'_>, telemetry: &PrinterTelemetry) {
    let m = ctx.metrics;
    let chamber = telemetry.chamber;

    ctx.set(&m.chamber_temperature, &[], chamber.actual);
    ctx.set(&m.chamber_target_temperature, &[], chamber.target);
    ctx.set(&m.chamber_offset_temperature, &[], chamber.offset);
}
