//! Printer model detection.
//!
//! A declared `type` in the configuration is authoritative and never probed. Otherwise
//! the identity string is read from `/api/version` (falling back to `/api/v1/info`) and
//! run through the alias and family tables.

use super::client::EndpointClient;
use super::family::{family_for_model, model_for_identity, Endpoint, FirmwareFamily};
use super::types::{InfoJson, VersionJson};
use crate::config::PrinterConfig;
use crate::error::{ExporterError, Result};
use tracing::trace;

/// Identity reported when a printer populates none of its hostname fields.
pub const UNKNOWN_IDENTITY: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Canonical model code, e.g. `MK4`
    pub model: String,
    pub family: FirmwareFamily,
}

pub async fn classify(client: &EndpointClient, target: &PrinterConfig) -> Result<Classification> {
    if let Some(declared) = target.declared_type() {
        return classify_model(declared);
    }

    let version: VersionJson = client.fetch_json("version", target).await?;
    let identity = match version_identity(&version) {
        Some(identity) => identity.to_string(),
        None => {
            let info: InfoJson = client.fetch_json(Endpoint::Info.path(), target).await?;
            info.hostname
        }
    };
    let identity = if identity.is_empty() {
        UNKNOWN_IDENTITY.to_string()
    } else {
        identity
    };

    let classification = classify_model(model_for_identity(&identity))?;
    trace!(
        "{} detected for {} ({})",
        classification.model,
        target.address,
        target.name
    );
    Ok(classification)
}

/// `original` (Einsy PrusaLink) wins over `hostname`; `None` when both are empty.
pub fn version_identity(version: &VersionJson) -> Option<&str> {
    [version.original.as_str(), version.hostname.as_str()]
        .into_iter()
        .find(|identity| !identity.is_empty())
}

pub fn classify_model(model: &str) -> Result<Classification> {
    family_for_model(model)
        .map(|family| Classification {
            model: model.to_string(),
            family,
        })
        .ok_or_else(|| ExporterError::UnknownFamily(model.to_string()))
}
