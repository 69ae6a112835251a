//! PrusaLink API Type Definitions
//!
//! Rust struct definitions for the JSON payloads served by PrusaLink, PrusaConnect-enabled
//! Buddy firmware and the SL1 web API.
//!
//! # Design Notes
//!
//! - **Defaults everywhere**: printers omit fields freely (an idle printer has no job file,
//!   an SL1 has no fans in `/api/v1/status`), so every struct is `#[serde(default)]`.
//! - **Hyphenated keys**: the legacy `/api/printer` telemetry block uses keys like
//!   `temp-bed`, renamed field by field.
//!
//! # API Endpoints Covered
//!
//! - `/api/version` → [`VersionJson`]
//! - `/api/printer` → [`PrinterJson`], [`Temperatures`], [`Telemetry`], [`PrinterState`]
//! - `/api/job` → [`JobJson`]
//! - `/api/files` → [`FilesJson`]
//! - `/api/settings` → [`SettingsJson`]
//! - `/api/v1/job` → [`JobV1Json`]
//! - `/api/v1/status` → [`StatusJson`]
//! - `/api/v1/info` → [`InfoJson`]
//! - `/api/v1/cameras` → [`CamerasJson`]
//! - `/api/v1/storage` → [`StorageJson`]

use serde::Deserialize;

use super::state::StatusFlags;

/// `/api/version`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct VersionJson {
    pub api: String,
    pub server: String,
    pub text: String,
    pub hostname: String,
    /// Einsy PrusaLink reports e.g. `PrusaLink I3MK3S` here
    pub original: String,
    pub firmware: String,
}

/// `/api/printer`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct PrinterJson {
    pub telemetry: Telemetry,
    pub temperature: Temperatures,
    pub state: PrinterState,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Temperatures {
    pub tool0: TemperatureReading,
    pub bed: TemperatureReading,
    pub chamber: TemperatureReading,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TemperatureReading {
    pub actual: f64,
    pub target: f64,
    pub offset: f64,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Telemetry {
    #[serde(rename = "print-speed")]
    pub print_speed: f64,
    pub material: String,
    #[serde(rename = "axis-x")]
    pub axis_x: f64,
    #[serde(rename = "axis-y")]
    pub axis_y: f64,
    #[serde(rename = "axis-z")]
    pub axis_z: f64,

    // SL1 / SL1S only
    pub cover_closed: bool,
    pub fan_blower: f64,
    pub fan_rear: f64,
    pub fan_uv_led: f64,
    pub temp_ambient: f64,
    pub temp_cpu: f64,
    pub temp_uv_led: f64,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct PrinterState {
    pub text: String,
    pub flags: StatusFlags,
}

/// `/api/job` (Einsy, SL)
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct JobJson {
    pub job: LegacyJob,
    pub progress: LegacyProgress,
    pub state: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LegacyJob {
    pub file: LegacyJobFile,
    /// `null` on SL printers when idle
    #[serde(rename = "estimatedPrintTime")]
    pub estimated_print_time: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LegacyJobFile {
    pub name: String,
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyProgress {
    pub completion: f64,
    pub print_time: f64,
    pub print_time_left: f64,
}

/// `/api/v1/job` (Buddy). Empty body when the printer is idle.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct JobV1Json {
    pub id: i64,
    pub progress: f64,
    pub time_remaining: f64,
    pub time_printing: f64,
    pub file: JobV1File,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct JobV1File {
    pub name: String,
    pub display_name: String,
    pub path: String,
    pub size: u64,
}

/// `/api/files?recursive=true`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct FilesJson {
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct FileEntry {
    pub name: String,
    pub display: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub children: Vec<FileEntry>,
}

/// `/api/v1/status`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct StatusJson {
    pub printer: StatusPrinter,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct StatusPrinter {
    pub state: String,
    pub flow: f64,
    pub fan_hotend: f64,
    pub fan_print: f64,
}

/// `/api/v1/info`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct InfoJson {
    pub mmu: bool,
    pub name: String,
    pub location: String,
    pub nozzle_diameter: f64,
    pub serial: String,
    pub hostname: String,
}

/// `/api/settings`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SettingsJson {
    pub printer: SettingsPrinter,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SettingsPrinter {
    pub farm_mode: bool,
}

/// `/api/v1/cameras`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct CamerasJson {
    pub camera_list: Vec<Camera>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Camera {
    pub camera_id: String,
    pub config: CameraConfig,
    pub connected: bool,
    pub stored: bool,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct CameraConfig {
    pub name: String,
    pub resolution: String,
}

/// `/api/v1/storage`
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct StorageJson {
    pub storage_list: Vec<Storage>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Storage {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub storage_type: String,
    pub available: bool,
    pub free_space: f64,
    pub total_space: f64,
}
