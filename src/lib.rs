//! Prusa Printer Prometheus Exporter
//!
//! A Prometheus metrics exporter for Prusa 3D printers running PrusaLink or
//! PrusaConnect-enabled firmware.
//!
//! # Overview
//!
//! The exporter polls every configured printer over its local HTTP API, normalizes the
//! responses of the three firmware families (Buddy, Einsy, SL) and exposes temperatures,
//! job progress, fans, storage and printer state in Prometheus format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    HTTP + API key    ┌──────────────┐
//! │  Printers   │ ◄─────────────────►  │   Exporter   │
//! │ (PrusaLink) │     or digest        │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Client │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Metrics │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`prusalink`] - HTTP client, payload types, model detection and printer façade
//! - [`collectors`] - Per-printer collection pass and metric groups
//! - [`metrics`] - Prometheus metric definitions
//! - [`server`] - HTTP server and collection loop
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use prusa_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod prusalink;
pub mod server;
