//! Normalized records built from the per-family wire payloads.
//!
//! Every field is set explicitly in the conversions below, so a payload that
//! omits something still yields a complete record with a zero-equivalent value.

use super::family::FirmwareFamily;
use super::state::{reduce, StateOrdinal, StatusFlags};
use super::types::{JobJson, JobV1Json, PrinterJson, StatusJson, TemperatureReading};

/// The job currently loaded on a printer. All fields are empty/zero when idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub file_name: String,
    pub file_path: String,
    /// Only Buddy firmware numbers its jobs; zero elsewhere
    pub id: i64,
    /// Completion as reported by the printer, in percent
    pub completion: f64,
    pub time_elapsed: f64,
    pub time_remaining: f64,
}

impl Job {
    pub fn is_loaded(&self) -> bool {
        *self != Job::default()
    }
}

impl From<JobJson> for Job {
    fn from(json: JobJson) -> Self {
        Self {
            file_name: json.job.file.name,
            file_path: json.job.file.path,
            id: 0,
            completion: json.progress.completion,
            time_elapsed: json.progress.print_time,
            time_remaining: json.progress.print_time_left,
        }
    }
}

impl From<JobV1Json> for Job {
    fn from(json: JobV1Json) -> Self {
        let file_path = if json.file.name.is_empty() {
            json.file.path
        } else {
            format!("{}/{}", json.file.path, json.file.name)
        };

        Self {
            file_name: json.file.display_name,
            file_path,
            id: json.id,
            completion: json.progress,
            time_elapsed: json.time_printing,
            time_remaining: json.time_remaining,
        }
    }
}

/// A named fan and its speed in rpm.
#[derive(Debug, Clone, PartialEq)]
pub struct Fan {
    pub name: &'static str,
    pub rpm: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Temperature {
    pub actual: f64,
    pub target: f64,
    pub offset: f64,
}

impl From<TemperatureReading> for Temperature {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            actual: reading.actual,
            target: reading.target,
            offset: reading.offset,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Resin-printer readings, zero on filament printers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResinTelemetry {
    pub cover_closed: bool,
    pub ambient_temp: f64,
    pub cpu_temp: f64,
    pub uv_temp: f64,
}

/// Normalized view of `/api/printer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrinterTelemetry {
    pub bed: Temperature,
    pub tool0: Temperature,
    pub chamber: Temperature,
    pub axes: Axes,
    /// Print speed as a ratio (1.0 = 100 %)
    pub print_speed_ratio: f64,
    pub material: String,
    pub resin: ResinTelemetry,
    /// Fans reported in the printer payload itself (SL only)
    pub fans: Vec<Fan>,
    pub state_text: String,
    pub flags: StatusFlags,
}

impl PrinterTelemetry {
    pub fn state(&self) -> StateOrdinal {
        reduce(&self.flags)
    }

    /// Filament printers report `-` (or ` - `) when nothing is loaded.
    pub fn material_loaded(&self) -> bool {
        !self.material.contains('-')
    }

    /// Which fans appear in the printer payload depends on the family.
    pub fn from_payload(json: PrinterJson, family: FirmwareFamily) -> Self {
        let t = json.telemetry;
        let fans = match family {
            FirmwareFamily::SLBoard => sl_fans(t.fan_blower, t.fan_rear, t.fan_uv_led),
            FirmwareFamily::BuddyBoard | FirmwareFamily::EinsyBoard => Vec::new(),
        };

        Self {
            bed: json.temperature.bed.into(),
            tool0: json.temperature.tool0.into(),
            chamber: json.temperature.chamber.into(),
            axes: Axes {
                x: t.axis_x,
                y: t.axis_y,
                z: t.axis_z,
            },
            print_speed_ratio: t.print_speed / 100.0,
            material: t.material,
            resin: ResinTelemetry {
                cover_closed: t.cover_closed,
                ambient_temp: t.temp_ambient,
                cpu_temp: t.temp_cpu,
                uv_temp: t.temp_uv_led,
            },
            fans,
            state_text: json.state.text,
            flags: json.state.flags,
        }
    }
}

fn sl_fans(blower: f64, rear: f64, uv: f64) -> Vec<Fan> {
    vec![
        Fan {
            name: "blower",
            rpm: blower,
        },
        Fan {
            name: "rear",
            rpm: rear,
        },
        Fan { name: "uv", rpm: uv },
    ]
}

/// Normalized view of `/api/v1/status`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    pub flow_ratio: f64,
    pub fans: Vec<Fan>,
}

impl From<StatusJson> for StatusSnapshot {
    fn from(json: StatusJson) -> Self {
        let p = json.printer;
        Self {
            flow_ratio: p.flow / 100.0,
            fans: vec![
                Fan {
                    name: "hotend",
                    rpm: p.fan_hotend,
                },
                Fan {
                    name: "print",
                    rpm: p.fan_print,
                },
            ],
        }
    }
}
