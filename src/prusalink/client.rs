//! PrusaLink HTTP Endpoint Client
//!
//! Performs single authenticated GET requests against a printer's `/api/` tree and hands
//! back the raw body. Decoding is left to the caller.
//!
//! # Authentication
//!
//! - **API key**: sent as the `X-Api-Key` header on every request (Buddy firmware, SL1)
//! - **Digest**: PrusaLink on Einsy boards and newer Buddy firmware answer the first
//!   request with a `401` digest challenge; the request is repeated once with the computed
//!   `Authorization` header
//!
//! The scheme is chosen per printer from its configuration; there is no fallback between
//! the two within one call.
//!
//! # Example
//!
//! ```no_run
//! use prusa_exporter::config::PrinterConfig;
//! use prusa_exporter::prusalink::{ClientConfig, EndpointClient};
//! use secrecy::SecretString;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = EndpointClient::new(ClientConfig {
//!     timeout: Duration::from_millis(1000),
//! })?;
//! let printer = PrinterConfig {
//!     address: "192.168.1.20".to_string(),
//!     name: "mk4".to_string(),
//!     printer_type: "MK4".to_string(),
//!     api_key: Some(SecretString::from("your-api-key")),
//!     username: None,
//!     password: None,
//! };
//! let body = client.fetch("version", &printer).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::{Credentials, PrinterConfig};
use crate::error::{ExporterError, Result};
use reqwest::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::{Response, StatusCode};
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Settings for the HTTP layer, passed in explicitly rather than read from globals.
#[derive(Debug, Clone, Copy)]
pub struct ClientConfig {
    /// Applies to each request as a whole (connect + read)
    pub timeout: Duration,
}

/// Shared HTTP client for all printers.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections internally.
pub struct EndpointClient {
    http: reqwest::Client,
}

/// URL of an API endpoint. `path` may carry a query string.
pub fn endpoint_url(address: &str, path: &str) -> String {
    format!("http://{}/api/{}", address, path)
}

impl EndpointClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExporterError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// GET `http://{address}/api/{path}` and return the body.
    ///
    /// The HTTP status is not interpreted: an error page is returned like any other body
    /// and will normally fail JSON decoding one layer up. Transport failures are returned
    /// as [`ExporterError::Network`] and never retried.
    pub async fn fetch(&self, path: &str, target: &PrinterConfig) -> Result<Vec<u8>> {
        let (_, body) = self.fetch_with_status(path, target).await?;
        Ok(body)
    }

    /// [`fetch`](Self::fetch), keeping the final response status for endpoints where an
    /// empty body is only meaningful on success.
    pub async fn fetch_with_status(
        &self,
        path: &str,
        target: &PrinterConfig,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let url = endpoint_url(&target.address, path);
        debug!("GET {}", url);

        let response = match target.credentials() {
            Credentials::ApiKey(key) => self
                .http
                .get(&url)
                .header(API_KEY_HEADER, key)
                .send()
                .await
                .map_err(|e| network_error(target, e))?,
            Credentials::Digest { username, password } => {
                self.get_with_digest(&url, path, target, username, password)
                    .await?
            }
        };

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| network_error(target, e))?;
        Ok((status, body.to_vec()))
    }

    /// [`fetch`](Self::fetch) followed by JSON decoding.
    pub async fn fetch_json<T>(&self, path: &str, target: &PrinterConfig) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = self.fetch(path, target).await?;
        decode(path, &body)
    }

    async fn get_with_digest(
        &self,
        url: &str,
        path: &str,
        target: &PrinterConfig,
        username: &str,
        password: &str,
    ) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(target, e))?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        let Some(challenge) = response.headers().get(WWW_AUTHENTICATE) else {
            return Ok(response);
        };

        let challenge = challenge.to_str().map_err(|e| auth_error(target, e))?;
        let mut prompt = digest_auth::parse(challenge).map_err(|e| auth_error(target, e))?;
        let uri = format!("/api/{}", path);
        let context = digest_auth::AuthContext::new(username, password, uri.as_str());
        let answer = prompt
            .respond(&context)
            .map_err(|e| auth_error(target, e))?;

        debug!("Answering digest challenge from {}", target.address);
        self.http
            .get(url)
            .header(AUTHORIZATION, answer.to_header_string())
            .send()
            .await
            .map_err(|e| network_error(target, e))
    }
}

pub(crate) fn decode<T>(endpoint: &str, body: &[u8]) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| ExporterError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn network_error(target: &PrinterConfig, source: reqwest::Error) -> ExporterError {
    ExporterError::Network {
        address: target.address.clone(),
        source,
    }
}

fn auth_error(target: &PrinterConfig, reason: impl std::fmt::Display) -> ExporterError {
    ExporterError::Auth {
        address: target.address.clone(),
        reason: reason.to_string(),
    }
}
