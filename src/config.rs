use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ExporterError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub exporter: ExporterConfig,
    #[serde(default)]
    pub printers: Vec<PrinterConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExporterConfig {
    /// Timeout for a single printer API round trip (connect + read)
    #[serde(default = "default_scrape_timeout_ms")]
    pub scrape_timeout_ms: u64,
    #[serde(default = "default_collect_interval")]
    pub collect_interval_seconds: u64,
}

/// One polled printer.
///
/// `printer_type` holds the declared model code (e.g. `MK4`, `I3MK3S`, `SL1`).
/// When empty the model is detected from the printer's version/info endpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct PrinterConfig {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub printer_type: String,
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

/// Authentication scheme for a printer, fixed at configuration time.
#[derive(Clone, Copy)]
pub enum Credentials<'a> {
    ApiKey(&'a str),
    Digest { username: &'a str, password: &'a str },
}

impl PrinterConfig {
    /// Declared model code, if any.
    pub fn declared_type(&self) -> Option<&str> {
        let declared = self.printer_type.trim();
        (!declared.is_empty()).then_some(declared)
    }

    /// API key wins whenever one is configured; there is no fallback to digest.
    pub fn credentials(&self) -> Credentials<'_> {
        match &self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => {
                Credentials::ApiKey(key.expose_secret().trim())
            }
            _ => Credentials::Digest {
                username: self.username.as_deref().unwrap_or_default(),
                password: self
                    .password
                    .as_ref()
                    .map(|p| p.expose_secret())
                    .unwrap_or_default(),
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            scrape_timeout_ms: default_scrape_timeout_ms(),
            collect_interval_seconds: default_collect_interval(),
        }
    }
}

impl ExporterConfig {
    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_millis(self.scrape_timeout_ms)
    }
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10009
}

fn default_scrape_timeout_ms() -> u64 {
    1000
}

fn default_collect_interval() -> u64 {
    30
}

impl Config {
    /// Read the file and environment layers. Call [`Config::validate`] once any command
    /// line overrides have been applied.
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("PRUSA_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn validate(&self) -> std::result::Result<(), ExporterError> {
        if self.exporter.scrape_timeout_ms == 0 {
            return Err(ExporterError::Config(
                "scrape_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.exporter.collect_interval_seconds == 0 {
            return Err(ExporterError::Config(
                "collect_interval_seconds must be greater than zero".to_string(),
            ));
        }

        for (index, printer) in self.printers.iter().enumerate() {
            if printer.address.trim().is_empty() {
                return Err(ExporterError::Config(format!(
                    "printer #{} has an empty address",
                    index
                )));
            }

            let has_key = printer
                .api_key
                .as_ref()
                .is_some_and(|key| !key.expose_secret().trim().is_empty());
            let has_digest = printer.username.as_deref().is_some_and(|u| !u.is_empty())
                && printer.password.is_some();

            if !has_key && !has_digest {
                return Err(ExporterError::Config(format!(
                    "printer {} needs either api_key or username and password",
                    printer.address
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(api_key: Option<&str>, username: Option<&str>, password: Option<&str>) -> PrinterConfig {
        PrinterConfig {
            address: "192.168.1.20".to_string(),
            name: "mk4".to_string(),
            printer_type: String::new(),
            api_key: api_key.map(SecretString::from),
            username: username.map(str::to_string),
            password: password.map(SecretString::from),
        }
    }

    #[test]
    fn api_key_takes_precedence_over_digest() {
        let p = printer(Some("secret"), Some("maker"), Some("pass"));
        assert!(matches!(p.credentials(), Credentials::ApiKey("secret")));
    }

    #[test]
    fn blank_api_key_falls_to_digest() {
        let p = printer(Some("  "), Some("maker"), Some("pass"));
        match p.credentials() {
            Credentials::Digest { username, password } => {
                assert_eq!(username, "maker");
                assert_eq!(password, "pass");
            }
            Credentials::ApiKey(_) => panic!("expected digest credentials"),
        }
    }

    #[test]
    fn declared_type_ignores_whitespace() {
        let mut p = printer(Some("k"), None, None);
        assert_eq!(p.declared_type(), None);
        p.printer_type = "  ".to_string();
        assert_eq!(p.declared_type(), None);
        p.printer_type = "MK4".to_string();
        assert_eq!(p.declared_type(), Some("MK4"));
    }
}
