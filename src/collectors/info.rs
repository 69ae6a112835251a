//! Printer Info Metrics Collector
//!
//! Combines `/api/version` (already read) with `/api/v1/info`.
//!
//! # Metrics Produced
//! - `prusa_info` - Always 1; carries descriptive labels
//!   - Labels: api_version, server_version, version_text, prusalink_name,
//!     printer_location, serial_number, printer_hostname
//! - `prusa_nozzle_size_meters` - Nozzle diameter (reported in millimetres)
//! - `prusa_mmu` - 1 when a multi-material unit is enabled (Buddy only)

use super::{bool_to_float, collect_with_handler, CollectionContext, CollectionStatus};
use crate::prusalink::types::VersionJson;
use crate::prusalink::FirmwareFamily;

/// Collects info metrics
///
/// # Arguments
///
/// * `ctx` - Collection context for the printer
/// * `version` - Version payload read earlier in the pass
pub async fn collect_info_metrics(
    ctx: &CollectionContext<'_>,
    version: &VersionJson,
) -> CollectionStatus {
    let printer = ctx.printer;

    collect_with_handler("info", printer.address(), printer.info(), |info| {
        let m = ctx.metrics;

        ctx.set(
            &m.info,
            &[
                version.api.as_str(),
                version.server.as_str(),
                version.text.as_str(),
                info.name.as_str(),
                info.location.as_str(),
                info.serial.as_str(),
                info.hostname.as_str(),
            ],
            1.0,
        );
        ctx.set(&m.nozzle_size_meters, &[], info.nozzle_diameter / 1000.0);

        if printer.family() == FirmwareFamily::BuddyBoard {
            ctx.set(&m.mmu, &[], bool_to_float(info.mmu));
        }
    })
    .await
}
