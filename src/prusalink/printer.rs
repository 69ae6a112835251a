//! Printer Capability Façade
//!
//! [`Printer`] exposes one operation set over the three PrusaLink dialects. The family is
//! resolved once when the façade is built and reused for every call during the pass.
//!
//! Only the job endpoint differs in shape between families: Buddy serves a flat
//! `/api/v1/job`, Einsy and SL serve the nested legacy `/api/job`. Both normalize to
//! [`Job`]. Endpoints a family does not have return [`ExporterError::NotSupported`]
//! without touching the network.

use super::classifier::{classify, Classification};
use super::client::{decode, EndpointClient};
use super::family::{Endpoint, FirmwareFamily};
use super::snapshot::{Job, PrinterTelemetry, StatusSnapshot};
use super::types::{
    CamerasJson, FilesJson, InfoJson, JobJson, JobV1Json, PrinterJson, SettingsJson,
    StorageJson, StatusJson, VersionJson,
};
use crate::config::PrinterConfig;
use crate::error::{ExporterError, Result};
use reqwest::StatusCode;

/// Façade over one printer for the duration of a single collection pass.
pub struct Printer<'a> {
    client: &'a EndpointClient,
    config: &'a PrinterConfig,
    classification: Classification,
}

impl<'a> Printer<'a> {
    /// Classify the printer (probing it unless its type is declared) and build the façade.
    pub async fn new(client: &'a EndpointClient, config: &'a PrinterConfig) -> Result<Self> {
        let classification = classify(client, config).await?;
        Ok(Self::with_classification(client, config, classification))
    }

    pub fn with_classification(
        client: &'a EndpointClient,
        config: &'a PrinterConfig,
        classification: Classification,
    ) -> Self {
        Self {
            client,
            config,
            classification,
        }
    }

    pub fn address(&self) -> &str {
        &self.config.address
    }

    pub fn family(&self) -> FirmwareFamily {
        self.classification.family
    }

    pub fn model(&self) -> &str {
        &self.classification.model
    }

    pub async fn job(&self) -> Result<Job> {
        match self.family() {
            FirmwareFamily::BuddyBoard => {
                let (status, body) = self.client.fetch_with_status("v1/job", self.config).await?;
                if is_idle_job(status, &body) {
                    return Ok(Job::default());
                }
                let job: JobV1Json = decode("v1/job", &body)?;
                Ok(job.into())
            }
            FirmwareFamily::EinsyBoard | FirmwareFamily::SLBoard => {
                let job: JobJson = self.client.fetch_json("job", self.config).await?;
                Ok(job.into())
            }
        }
    }

    pub async fn telemetry(&self) -> Result<PrinterTelemetry> {
        let printer: PrinterJson = self.client.fetch_json("printer", self.config).await?;
        Ok(PrinterTelemetry::from_payload(printer, self.family()))
    }

    pub async fn files(&self) -> Result<FilesJson> {
        self.client
            .fetch_json("files?recursive=true", self.config)
            .await
    }

    pub async fn version(&self) -> Result<VersionJson> {
        self.client.fetch_json("version", self.config).await
    }

    pub async fn status(&self) -> Result<StatusSnapshot> {
        let status: StatusJson = self.fetch_supported(Endpoint::Status).await?;
        Ok(status.into())
    }

    pub async fn info(&self) -> Result<InfoJson> {
        self.fetch_supported(Endpoint::Info).await
    }

    pub async fn settings(&self) -> Result<SettingsJson> {
        self.fetch_supported(Endpoint::Settings).await
    }

    pub async fn cameras(&self) -> Result<CamerasJson> {
        self.fetch_supported(Endpoint::Cameras).await
    }

    pub async fn storage(&self) -> Result<StorageJson> {
        self.fetch_supported(Endpoint::Storage).await
    }

    async fn fetch_supported<T>(&self, endpoint: Endpoint) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if !self.family().supports(endpoint) {
            return Err(ExporterError::NotSupported {
                endpoint: endpoint.path(),
                family: self.family().as_str(),
            });
        }
        self.client.fetch_json(endpoint.path(), self.config).await
    }

    /// `(address, model, name)`
    pub fn base_labels(&self) -> Vec<String> {
        base_labels(self.config, self.model())
    }

    /// Base labels, then the job file name and path (empty when idle), then `extra`.
    pub fn metric_labels(&self, job: &Job, extra: &[&str]) -> Vec<String> {
        let mut labels = self.base_labels();
        labels.reserve(2 + extra.len());
        labels.push(job.file_name.clone());
        labels.push(job.file_path.clone());
        labels.extend(extra.iter().map(|value| value.to_string()));
        labels
    }
}

/// Idle Buddy printers answer `v1/job` with 204 and no body. An empty error response is
/// not idle and must fail decoding.
fn is_idle_job(status: StatusCode, body: &[u8]) -> bool {
    status == StatusCode::NO_CONTENT
        || (status.is_success() && body.iter().all(u8::is_ascii_whitespace))
}

/// Base labels for a printer; also used before classification, with the declared type.
pub fn base_labels(config: &PrinterConfig, model: &str) -> Vec<String> {
    vec![config.address.clone(), model.to_string(), config.name.clone()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prusalink::classifier::classify_model;
    use crate::prusalink::ClientConfig;
    use secrecy::SecretString;
    use std::time::Duration;

    fn config() -> PrinterConfig {
        PrinterConfig {
            // Port 1 is never listened on; nothing here may reach the network
            address: "127.0.0.1:1".to_string(),
            name: "garage".to_string(),
            printer_type: String::new(),
            api_key: Some(SecretString::from("key")),
            username: None,
            password: None,
        }
    }

    fn client() -> EndpointClient {
        EndpointClient::new(ClientConfig {
            timeout: Duration::from_millis(200),
        })
        .unwrap()
    }

    #[test]
    fn labels_for_idle_printer_have_empty_job_dimensions() {
        let (client, config) = (client(), config());
        let printer =
            Printer::with_classification(&client, &config, classify_model("MK4").unwrap());

        assert_eq!(printer.base_labels(), ["127.0.0.1:1", "MK4", "garage"]);
        assert_eq!(
            printer.metric_labels(&Job::default(), &["x"]),
            ["127.0.0.1:1", "MK4", "garage", "", "", "x"]
        );
    }

    #[test]
    fn labels_carry_job_file() {
        let (client, config) = (client(), config());
        let printer =
            Printer::with_classification(&client, &config, classify_model("I3MK3S").unwrap());
        let job = Job {
            file_name: "benchy.gcode".to_string(),
            file_path: "/SD Card/benchy.gcode".to_string(),
            ..Default::default()
        };

        assert_eq!(
            printer.metric_labels(&job, &[]),
            [
                "127.0.0.1:1",
                "I3MK3S",
                "garage",
                "benchy.gcode",
                "/SD Card/benchy.gcode"
            ]
        );
    }

    #[tokio::test]
    async fn unsupported_endpoints_skip_the_network() {
        let (client, config) = (client(), config());
        let printer =
            Printer::with_classification(&client, &config, classify_model("SL1").unwrap());

        let err = printer.status().await.unwrap_err();
        assert!(err.is_not_supported());
        assert!(printer.info().await.unwrap_err().is_not_supported());
        assert!(printer.settings().await.unwrap_err().is_not_supported());
        assert!(printer.storage().await.unwrap_err().is_not_supported());
    }

    #[test]
    fn only_successful_empty_job_responses_are_idle() {
        assert!(is_idle_job(StatusCode::NO_CONTENT, b""));
        assert!(is_idle_job(StatusCode::OK, b"  \n"));
        assert!(!is_idle_job(StatusCode::OK, b"{}"));
        assert!(!is_idle_job(StatusCode::SERVICE_UNAVAILABLE, b""));
        assert!(!is_idle_job(StatusCode::UNAUTHORIZED, b""));
    }
}
