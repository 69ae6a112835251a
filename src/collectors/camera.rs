//! Camera Metrics Collector
//!
//! # Metrics Produced
//! - `prusa_cameras_info` - 1 when the camera is connected, 0 otherwise
//!   - Labels: camera_id, camera_name, camera_resolution

use super::{bool_to_float, collect_with_handler, CollectionContext, CollectionStatus};

/// Collects one series per camera registered on the printer
///
/// # Returns
///
/// * `CollectionStatus::Success` - Metrics were updated (possibly none, if no cameras)
/// * `CollectionStatus::Failed` - The endpoint failed (non-fatal, logged as warning)
/// * `CollectionStatus::Skipped` - The printer's family has no camera endpoint
pub async fn collect_camera_metrics(ctx: &CollectionContext<'_>) -> CollectionStatus {
    let printer = ctx.printer;

    collect_with_handler("cameras", printer.address(), printer.cameras(), |cameras| {
        for camera in &cameras.camera_list {
            ctx.set(
                &ctx.metrics.cameras_info,
                &[
                    camera.camera_id.as_str(),
                    camera.config.name.as_str(),
                    camera.config.resolution.as_str(),
                ],
                bool_to_float(camera.connected),
            );
        }
    })
    .await
}
