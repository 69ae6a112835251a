//! Prometheus Metrics Definitions
//!
//! This module defines all Prometheus metrics exposed by the Prusa exporter.
//!
//! # Labels
//!
//! Every metric carries the base labels `printer_address`, `printer_model` and
//! `printer_name`. All metrics except `prusa_up` add the job dimension
//! `printer_job_name` and `printer_job_path` (empty strings when idle), followed by any
//! metric-specific labels.
//!
//! # Metric Categories
//!
//! ## Always present
//! - `prusa_up` - whether the last pass could read the printer
//! - Bed and tool-0 temperatures (actual, target, offset)
//! - Status ordinal and job id
//!
//! ## Buddy / Einsy
//! - Print speed, flow, progress and timing
//! - Axis positions, loaded material, fan speeds
//! - Printer info, nozzle size, MMU (Buddy)
//! - Farm mode, cameras, per-storage file counts (Einsy)
//! - Storage capacity (Buddy)
//!
//! ## SL
//! - Cover state, ambient / CPU / UV LED temperatures, chamber temperatures, fans
//!
//! All metrics use the `prusa_` namespace prefix.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use tracing::warn;

const NAMESPACE: &str = "prusa";

/// Labels identifying a printer
pub const BASE_LABELS: [&str; 3] = ["printer_address", "printer_model", "printer_name"];

/// Base labels plus the current job
pub const JOB_LABELS: [&str; 5] = [
    "printer_address",
    "printer_model",
    "printer_name",
    "printer_job_name",
    "printer_job_path",
];

fn job_labels_with(extra: &[&'static str]) -> Vec<&'static str> {
    JOB_LABELS.iter().chain(extra).copied().collect()
}

/// Metrics sink for one collection pass.
///
/// Cloning is cheap and every clone writes into the same registry, so per-printer tasks
/// each hold their own handle.
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    pub up: Arc<GaugeVec>,

    // Temperatures
    pub bed_temperature: Arc<GaugeVec>,
    pub bed_target_temperature: Arc<GaugeVec>,
    pub bed_offset_temperature: Arc<GaugeVec>,
    pub tool_temperature: Arc<GaugeVec>,
    pub tool_target_temperature: Arc<GaugeVec>,
    pub tool_offset_temperature: Arc<GaugeVec>,
    pub chamber_temperature: Arc<GaugeVec>,
    pub chamber_target_temperature: Arc<GaugeVec>,
    pub chamber_offset_temperature: Arc<GaugeVec>,

    // State and job
    pub status_info: Arc<GaugeVec>,
    pub job_info: Arc<GaugeVec>,
    pub print_speed_ratio: Arc<GaugeVec>,
    pub print_flow_ratio: Arc<GaugeVec>,
    pub print_time_seconds: Arc<GaugeVec>,
    pub printing_time_remaining_seconds: Arc<GaugeVec>,
    pub printing_progress: Arc<GaugeVec>,

    // Hardware
    pub material_info: Arc<GaugeVec>,
    pub axis: Arc<GaugeVec>,
    pub fan_speed_rpm: Arc<GaugeVec>,
    pub info: Arc<GaugeVec>,
    pub nozzle_size_meters: Arc<GaugeVec>,
    pub mmu: Arc<GaugeVec>,

    // Einsy extras
    pub farm_mode: Arc<GaugeVec>,
    pub cameras_info: Arc<GaugeVec>,
    pub files_count: Arc<GaugeVec>,

    // Buddy storage
    pub storage_free_bytes: Arc<GaugeVec>,
    pub storage_total_bytes: Arc<GaugeVec>,

    // SL
    pub cover_status: Arc<GaugeVec>,
    pub ambient_temperature: Arc<GaugeVec>,
    pub cpu_temperature: Arc<GaugeVec>,
    pub uv_temperature: Arc<GaugeVec>,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let up = GaugeVec::new(
            Opts::new(
                "up",
                "Return information about online printers. If printer is registered as offline then returned value is 0.",
            )
            .namespace(NAMESPACE),
            &BASE_LABELS,
        )?;

        // Temperatures
        let bed_temperature = GaugeVec::new(
            Opts::new(
                "bed_temperature_celsius",
                "Current temp of printer bed in Celsius",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let bed_target_temperature = GaugeVec::new(
            Opts::new("bed_target_temperature_celsius", "Target bed temp").namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let bed_offset_temperature = GaugeVec::new(
            Opts::new("bed_offset_temperature_celsius", "Offset bed temp").namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let tool_temperature = GaugeVec::new(
            Opts::new(
                "tool_temperature_celsius",
                "Status of the printer tool temp",
            )
            .namespace(NAMESPACE),
            &job_labels_with(&["tool"]),
        )?;

        let tool_target_temperature = GaugeVec::new(
            Opts::new("tool_target_temperature_celsius", "Target tool temp").namespace(NAMESPACE),
            &job_labels_with(&["tool"]),
        )?;

        let tool_offset_temperature = GaugeVec::new(
            Opts::new("tool_offset_temperature_celsius", "Offset tool temp").namespace(NAMESPACE),
            &job_labels_with(&["tool"]),
        )?;

        let chamber_temperature = GaugeVec::new(
            Opts::new(
                "chamber_temperature_celsius",
                "Status of the printer chamber temp",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let chamber_target_temperature = GaugeVec::new(
            Opts::new("chamber_target_temperature_celsius", "Target chamber temp")
                .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let chamber_offset_temperature = GaugeVec::new(
            Opts::new("chamber_offset_temperature_celsius", "Offset chamber temp")
                .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        // State and job
        let status_info = GaugeVec::new(
            Opts::new(
                "status_info",
                "Returns information status of printer (0=unknown, 1=operational, 2=prepared, 3=paused, 4=printing, 5=cancelling, 6=pausing, 7=error, 8=sd ready, 9=closed on error, 10=ready, 11=busy, 12=finished)",
            )
            .namespace(NAMESPACE),
            &job_labels_with(&["printer_state"]),
        )?;

        let job_info = GaugeVec::new(
            Opts::new("job_info", "Returns information about current job.").namespace(NAMESPACE),
            &job_labels_with(&["printer_job_id"]),
        )?;

        let print_speed_ratio = GaugeVec::new(
            Opts::new(
                "print_speed_ratio",
                "Current setting of printer speed in values from 0.0 - 1.0",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let print_flow_ratio = GaugeVec::new(
            Opts::new(
                "print_flow_ratio",
                "Returns information about of filament flow in ratio (0.0 - 1.0).",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let print_time_seconds = GaugeVec::new(
            Opts::new(
                "print_time_seconds",
                "Returns information about current print time.",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let printing_time_remaining_seconds = GaugeVec::new(
            Opts::new(
                "printing_time_remaining_seconds",
                "Returns time that remains for completion of current print",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let printing_progress = GaugeVec::new(
            Opts::new(
                "printing_progress",
                "Returns information about completion of current print in percents",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        // Hardware
        let material_info = GaugeVec::new(
            Opts::new(
                "material_info",
                "Returns information about loaded filament. Returns 0 if there is no loaded filament",
            )
            .namespace(NAMESPACE),
            &job_labels_with(&["printer_filament"]),
        )?;

        let axis = GaugeVec::new(
            Opts::new("axis", "Returns information about position of axis.").namespace(NAMESPACE),
            &job_labels_with(&["printer_axis"]),
        )?;

        let fan_speed_rpm = GaugeVec::new(
            Opts::new("fan_speed_rpm", "Returns information about speed of fans in rpm.")
                .namespace(NAMESPACE),
            &job_labels_with(&["fan"]),
        )?;

        let info = GaugeVec::new(
            Opts::new("info", "Returns information about printer.").namespace(NAMESPACE),
            &job_labels_with(&[
                "api_version",
                "server_version",
                "version_text",
                "prusalink_name",
                "printer_location",
                "serial_number",
                "printer_hostname",
            ]),
        )?;

        let nozzle_size_meters = GaugeVec::new(
            Opts::new(
                "nozzle_size_meters",
                "Returns information about selected nozzle size.",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let mmu = GaugeVec::new(
            Opts::new("mmu", "Returns information if MMU is enabled.").namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        // Einsy extras
        let farm_mode = GaugeVec::new(
            Opts::new("farm_mode", "Return if printer is set to farm mode").namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let cameras_info = GaugeVec::new(
            Opts::new(
                "cameras_info",
                "Return information about cameras (1=connected, 0=disconnected)",
            )
            .namespace(NAMESPACE),
            &job_labels_with(&["camera_id", "camera_name", "camera_resolution"]),
        )?;

        let files_count = GaugeVec::new(
            Opts::new("files_count", "Number of files in storage").namespace(NAMESPACE),
            &job_labels_with(&["printer_storage"]),
        )?;

        // Buddy storage
        let storage_free_bytes = GaugeVec::new(
            Opts::new("storage_free_bytes", "Free space of the printer storage in bytes")
                .namespace(NAMESPACE),
            &job_labels_with(&["printer_storage"]),
        )?;

        let storage_total_bytes = GaugeVec::new(
            Opts::new(
                "storage_total_bytes",
                "Total space of the printer storage in bytes",
            )
            .namespace(NAMESPACE),
            &job_labels_with(&["printer_storage"]),
        )?;

        // SL
        let cover_status = GaugeVec::new(
            Opts::new("cover_status", "Status of the printer - 0 = open, 1 = closed")
                .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let ambient_temperature = GaugeVec::new(
            Opts::new(
                "ambient_temperature_celsius",
                "Status of the printer ambient temp",
            )
            .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let cpu_temperature = GaugeVec::new(
            Opts::new("cpu_temperature_celsius", "Status of the printer cpu temp")
                .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        let uv_temperature = GaugeVec::new(
            Opts::new("uv_temperature_celsius", "Status of the printer uv temp")
                .namespace(NAMESPACE),
            &JOB_LABELS,
        )?;

        // Register all metrics
        for gauge in [
            &up,
            &bed_temperature,
            &bed_target_temperature,
            &bed_offset_temperature,
            &tool_temperature,
            &tool_target_temperature,
            &tool_offset_temperature,
            &chamber_temperature,
            &chamber_target_temperature,
            &chamber_offset_temperature,
            &status_info,
            &job_info,
            &print_speed_ratio,
            &print_flow_ratio,
            &print_time_seconds,
            &printing_time_remaining_seconds,
            &printing_progress,
            &material_info,
            &axis,
            &fan_speed_rpm,
            &info,
            &nozzle_size_meters,
            &mmu,
            &farm_mode,
            &cameras_info,
            &files_count,
            &storage_free_bytes,
            &storage_total_bytes,
            &cover_status,
            &ambient_temperature,
            &cpu_temperature,
            &uv_temperature,
        ] {
            registry.register(Box::new(gauge.clone()))?;
        }

        Ok(Self {
            registry: Arc::new(registry),
            up: Arc::new(up),
            bed_temperature: Arc::new(bed_temperature),
            bed_target_temperature: Arc::new(bed_target_temperature),
            bed_offset_temperature: Arc::new(bed_offset_temperature),
            tool_temperature: Arc::new(tool_temperature),
            tool_target_temperature: Arc::new(tool_target_temperature),
            tool_offset_temperature: Arc::new(tool_offset_temperature),
            chamber_temperature: Arc::new(chamber_temperature),
            chamber_target_temperature: Arc::new(chamber_target_temperature),
            chamber_offset_temperature: Arc::new(chamber_offset_temperature),
            status_info: Arc::new(status_info),
            job_info: Arc::new(job_info),
            print_speed_ratio: Arc::new(print_speed_ratio),
            print_flow_ratio: Arc::new(print_flow_ratio),
            print_time_seconds: Arc::new(print_time_seconds),
            printing_time_remaining_seconds: Arc::new(printing_time_remaining_seconds),
            printing_progress: Arc::new(printing_progress),
            material_info: Arc::new(material_info),
            axis: Arc::new(axis),
            fan_speed_rpm: Arc::new(fan_speed_rpm),
            info: Arc::new(info),
            nozzle_size_meters: Arc::new(nozzle_size_meters),
            mmu: Arc::new(mmu),
            farm_mode: Arc::new(farm_mode),
            cameras_info: Arc::new(cameras_info),
            files_count: Arc::new(files_count),
            storage_free_bytes: Arc::new(storage_free_bytes),
            storage_total_bytes: Arc::new(storage_total_bytes),
            cover_status: Arc::new(cover_status),
            ambient_temperature: Arc::new(ambient_temperature),
            cpu_temperature: Arc::new(cpu_temperature),
            uv_temperature: Arc::new(uv_temperature),
        })
    }

    /// Record one observation. A label-count mismatch is logged and dropped.
    pub fn set_gauge(&self, gauge: &GaugeVec, labels: &[String], value: f64) {
        let values: Vec<&str> = labels.iter().map(String::as_str).collect();
        match gauge.get_metric_with_label_values(values.as_slice()) {
            Ok(metric) => metric.set(value),
            Err(e) => warn!("Dropping observation with labels {:?}: {}", labels, e),
        }
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_sets_are_prefixed_by_job_labels() {
        assert_eq!(
            job_labels_with(&["tool"]),
            [
                "printer_address",
                "printer_model",
                "printer_name",
                "printer_job_name",
                "printer_job_path",
                "tool"
            ]
        );
    }

    #[test]
    fn mismatched_labels_are_dropped_not_panicking() {
        let metrics = MetricsCollector::new().unwrap();
        metrics.set_gauge(&metrics.up, &["only-one".to_string()], 1.0);
        let rendered = metrics.render().unwrap();
        assert!(!rendered.contains("only-one"));
    }
}
