//! Printer Firmware Families
//!
//! Prusa printers speak one of three API dialects depending on the board they run on:
//!
//! - **Buddy** (MINI, MK3.5, MK3.9, MK4, XL, iX) - PrusaLink v1 API with a flat job payload
//! - **Einsy** (MK3 / MK2.5 family behind a PrusaLink Raspberry Pi) - legacy OctoPrint-style job payload
//! - **SL** (SL1, SL1S resin printers) - legacy payload plus resin-specific telemetry
//!
//! Both tables below are static and read-only for the life of the process.

use std::fmt;

/// Firmware/board family of a printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirmwareFamily {
    BuddyBoard,
    EinsyBoard,
    SLBoard,
}

/// Endpoints whose availability depends on the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Status,
    Info,
    Settings,
    Cameras,
    Storage,
}

/// Human-readable hostnames reported by printers, mapped to canonical model codes.
const MODEL_ALIASES: &[(&str, &str)] = &[
    ("PrusaMINI", "MINI"),
    // MK3.5 reports itself as an MK4 as well
    ("PrusaMK4", "MK4"),
    ("PrusaXL", "XL"),
    ("PrusaLink I3MK3S", "I3MK3S"),
    ("PrusaLink I3MK3", "I3MK3"),
    ("PrusaLink I3MK25S", "I3MK25S"),
    ("PrusaLink I3MK25", "I3MK25"),
    ("prusa-sl1", "SL1"),
    ("prusa-sl1s", "SL1S"),
    ("Prusa_iX", "IX"),
];

const MODEL_FAMILIES: &[(&str, FirmwareFamily)] = &[
    ("MINI", FirmwareFamily::BuddyBoard),
    ("MK35", FirmwareFamily::BuddyBoard),
    ("MK39", FirmwareFamily::BuddyBoard),
    ("MK4", FirmwareFamily::BuddyBoard),
    ("XL", FirmwareFamily::BuddyBoard),
    ("IX", FirmwareFamily::BuddyBoard),
    ("I3MK3S", FirmwareFamily::EinsyBoard),
    ("I3MK3", FirmwareFamily::EinsyBoard),
    ("I3MK25S", FirmwareFamily::EinsyBoard),
    ("I3MK25", FirmwareFamily::EinsyBoard),
    ("SL1", FirmwareFamily::SLBoard),
    ("SL1S", FirmwareFamily::SLBoard),
];

/// Resolve a reported identity to a model code. Unmatched identities are kept as-is.
pub fn model_for_identity(identity: &str) -> &str {
    MODEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == identity)
        .map(|(_, model)| *model)
        .unwrap_or(identity)
}

pub fn family_for_model(model: &str) -> Option<FirmwareFamily> {
    MODEL_FAMILIES
        .iter()
        .find(|(code, _)| *code == model)
        .map(|(_, family)| *family)
}

impl FirmwareFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirmwareFamily::BuddyBoard => "buddy",
            FirmwareFamily::EinsyBoard => "einsy",
            FirmwareFamily::SLBoard => "sl",
        }
    }

    pub fn supports(&self, endpoint: Endpoint) -> bool {
        use FirmwareFamily::*;
        match endpoint {
            Endpoint::Status | Endpoint::Info => matches!(self, BuddyBoard | EinsyBoard),
            Endpoint::Settings | Endpoint::Cameras => matches!(self, EinsyBoard),
            Endpoint::Storage => matches!(self, BuddyBoard),
        }
    }
}

impl fmt::Display for FirmwareFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Status => "v1/status",
            Endpoint::Info => "v1/info",
            Endpoint::Settings => "settings",
            Endpoint::Cameras => "v1/cameras",
            Endpoint::Storage => "v1/storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_model_codes() {
        assert_eq!(model_for_identity("PrusaMK4"), "MK4");
        assert_eq!(model_for_identity("PrusaLink I3MK3S"), "I3MK3S");
        assert_eq!(model_for_identity("prusa-sl1s"), "SL1S");
        assert_eq!(model_for_identity("Prusa_iX"), "IX");
    }

    #[test]
    fn unmatched_identity_is_kept() {
        assert_eq!(model_for_identity("my-garage-printer"), "my-garage-printer");
        assert_eq!(model_for_identity("MK4"), "MK4");
    }

    #[test]
    fn every_alias_target_has_a_family() {
        for (_, model) in MODEL_ALIASES {
            assert!(family_for_model(model).is_some(), "{} has no family", model);
        }
    }

    #[test]
    fn model_codes_map_to_families() {
        assert_eq!(family_for_model("MK35"), Some(FirmwareFamily::BuddyBoard));
        assert_eq!(family_for_model("I3MK25"), Some(FirmwareFamily::EinsyBoard));
        assert_eq!(family_for_model("SL1"), Some(FirmwareFamily::SLBoard));
        assert_eq!(family_for_model("unknown"), None);
        // Lookup is exact
        assert_eq!(family_for_model("mk4"), None);
    }

    #[test]
    fn capability_matrix() {
        use FirmwareFamily::*;
        assert!(BuddyBoard.supports(Endpoint::Status));
        assert!(BuddyBoard.supports(Endpoint::Storage));
        assert!(!BuddyBoard.supports(Endpoint::Settings));
        assert!(EinsyBoard.supports(Endpoint::Settings));
        assert!(EinsyBoard.supports(Endpoint::Cameras));
        assert!(!EinsyBoard.supports(Endpoint::Storage));
        assert!(!SLBoard.supports(Endpoint::Status));
        assert!(!SLBoard.supports(Endpoint::Info));
    }
}
