//! Metrics Collectors
//!
//! This module contains the collection pass over all configured printers and the
//! specialized collectors for each metric group.
//!
//! # Architecture
//!
//! [`collect_all`] spawns one task per printer and waits for all of them. Each task:
//!
//! 1. Builds a [`Printer`] façade, classifying the printer if its type is not declared
//! 2. Fetches the required endpoints: job, printer, files, version
//! 3. Runs the family-specific collectors; their endpoints are optional
//! 4. Emits the metrics every family has, then `prusa_up = 1`
//!
//! # Error Handling
//!
//! - Classification or a required endpoint failing ends that printer's pass with only
//!   `prusa_up = 0` (base labels, no job dimension)
//! - An optional endpoint failing is logged as a warning and its metric group is omitted
//! - [`ExporterError::NotSupported`] is a silent skip
//! - A panicking printer task is reported as that printer being down; siblings are not
//!   affected

use crate::config::PrinterConfig;
use crate::error::ExporterError;
use crate::metrics::MetricsCollector;
use crate::prusalink::printer::base_labels;
use crate::prusalink::snapshot::Job;
use crate::prusalink::{EndpointClient, FirmwareFamily, Printer};
use prometheus::GaugeVec;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Shared context passed to all collectors of one printer
///
/// All fields are immutable references, so no invariants can be violated.
#[derive(Clone, Copy)]
pub struct CollectionContext<'a> {
    /// Façade of the printer being collected
    pub printer: &'a Printer<'a>,
    /// Metrics sink for the current pass
    pub metrics: &'a MetricsCollector,
    /// Job loaded on the printer; supplies the job label dimension
    pub job: &'a Job,
}

impl CollectionContext<'_> {
    /// Metric labels of this printer and job followed by `extra`
    pub fn labels(&self, extra: &[&str]) -> Vec<String> {
        self.printer.metric_labels(self.job, extra)
    }

    pub fn set(&self, gauge: &GaugeVec, extra: &[&str], value: f64) {
        self.metrics.set_gauge(gauge, &self.labels(extra), value);
    }
}

/// Status of an optional metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected and updated
    Success,
    /// Collection failed but is non-fatal (already logged as warning)
    Failed,
    /// The printer's family does not have this endpoint
    Skipped,
}

/// Outcome of one printer's pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterOutcome {
    Up,
    Down,
}

/// Aggregate of one pass over all printers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub up: usize,
    pub down: usize,
}

impl PassSummary {
    pub fn record(&mut self, outcome: PrinterOutcome) {
        match outcome {
            PrinterOutcome::Up => self.up += 1,
            PrinterOutcome::Down => self.down += 1,
        }
    }
}

/// Helper to reduce boilerplate in optional collectors
///
/// Wraps an endpoint query with consistent error handling:
/// - On success: processes data, returns `CollectionStatus::Success`
/// - On `NotSupported`: returns `CollectionStatus::Skipped` without logging above debug
/// - On any other error: logs warning, returns `CollectionStatus::Failed` (non-fatal)
///
/// # Arguments
///
/// * `name` - Name of the endpoint being collected (for logging)
/// * `address` - Printer address (for logging)
/// * `query_future` - Async endpoint call that returns data
/// * `process` - Function to process the data and update metrics
pub async fn collect_with_handler<T, F, P>(
    name: &str,
    address: &str,
    query_future: F,
    process: P,
) -> CollectionStatus
where
    F: std::future::Future<Output = Result<T, ExporterError>>,
    P: FnOnce(T),
{
    match query_future.await {
        Ok(data) => {
            process(data);
            debug!("Updated {} metrics for {}", name, address);
            CollectionStatus::Success
        }
        Err(e) if e.is_not_supported() => {
            debug!("Skipping {} for {}: {}", name, address, e);
            CollectionStatus::Skipped
        }
        Err(e) => {
            warn!("Error while scraping {} endpoint at {}: {}", name, address, e);
            CollectionStatus::Failed
        }
    }
}

pub(crate) fn bool_to_float(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Collect every printer concurrently, one task per printer, into `metrics`.
///
/// Returns once every task has finished. There is no pass-level timeout; each HTTP call
/// is bounded by the client's own timeout.
pub async fn collect_all(
    client: Arc<EndpointClient>,
    printers: &[PrinterConfig],
    metrics: &MetricsCollector,
) -> PassSummary {
    let mut tasks = Vec::with_capacity(printers.len());

    for config in printers {
        let task = tokio::spawn({
            let client = client.clone();
            let config = config.clone();
            let metrics = metrics.clone();
            async move { collect_printer(&client, &config, &metrics).await }
        });
        tasks.push((config, task));
    }

    let mut summary = PassSummary::default();
    for (config, task) in tasks {
        summary.record(join_printer(config, task, metrics).await);
    }

    info!(
        "Collection pass finished: {} up, {} down",
        summary.up, summary.down
    );
    summary
}

/// Await one printer's task. A task that panicked or was cancelled counts as that printer
/// being down, reported with its declared type.
pub async fn join_printer(
    config: &PrinterConfig,
    task: JoinHandle<PrinterOutcome>,
    metrics: &MetricsCollector,
) -> PrinterOutcome {
    match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(
                "Collection task for printer at {} failed: {}",
                config.address, e
            );
            metrics.set_gauge(
                &metrics.up,
                &base_labels(config, &config.printer_type),
                0.0,
            );
            PrinterOutcome::Down
        }
    }
}

/// Collect one printer. Never fails; failures are reported through `prusa_up`.
pub async fn collect_printer(
    client: &EndpointClient,
    config: &PrinterConfig,
    metrics: &MetricsCollector,
) -> PrinterOutcome {
    let printer = match Printer::new(client, config).await {
        Ok(printer) => printer,
        Err(e) => {
            error!(
                "Error while creating printer at {} - {}",
                config.address, e
            );
            metrics.set_gauge(
                &metrics.up,
                &base_labels(config, &config.printer_type),
                0.0,
            );
            return PrinterOutcome::Down;
        }
    };

    debug!(
        "Printer scraping at {} ({}, {})",
        printer.address(),
        printer.model(),
        printer.family()
    );

    // Required endpoints: any failure marks the printer down and stops its pass
    macro_rules! required {
        ($name:literal, $fetch:expr) => {
            match $fetch.await {
                Ok(data) => data,
                Err(e) => {
                    error!(
                        "Error while scraping {} endpoint at {} - {}",
                        $name,
                        printer.address(),
                        e
                    );
                    metrics.set_gauge(&metrics.up, &printer.base_labels(), 0.0);
                    return PrinterOutcome::Down;
                }
            }
        };
    }

    let job = required!("job", printer.job());
    let telemetry = required!("printer", printer.telemetry());
    let files = required!("files", printer.files());
    let version = required!("version", printer.version());

    let ctx = CollectionContext {
        printer: &printer,
        metrics,
        job: &job,
    };

    match printer.family() {
        FirmwareFamily::BuddyBoard | FirmwareFamily::EinsyBoard => {
            progress::collect_progress_metrics(&ctx, &telemetry);
            status::collect_status_metrics(&ctx).await;
            info::collect_info_metrics(&ctx, &version).await;

            if printer.family() == FirmwareFamily::EinsyBoard {
                settings::collect_settings_metrics(&ctx).await;
                camera::collect_camera_metrics(&ctx).await;
                files::collect_files_metrics(&ctx, &files);
            } else {
                storage::collect_storage_metrics(&ctx).await;
            }
        }
        FirmwareFamily::SLBoard => {
            resin::collect_resin_metrics(&ctx, &telemetry);
        }
    }

    temperature::collect_temperature_metrics(&ctx, &telemetry);
    state::collect_state_metrics(&ctx, &telemetry);

    metrics.set_gauge(&metrics.up, &printer.base_labels(), 1.0);
    debug!("Scraping done at {}", printer.address());
    PrinterOutcome::Up
}

// Collector modules
pub mod camera;
pub mod files;
pub mod info;
pub mod progress;
pub mod resin;
pub mod settings;
pub mod state;
pub mod status;
pub mod storage;
pub mod temperature;
