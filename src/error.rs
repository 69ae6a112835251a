use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Network error at {address}: {source}")]
    Network {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Authentication failed at {address}: {reason}")]
    Auth { address: String, reason: String },

    #[error("Decode error on {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown printer family: {0}")]
    UnknownFamily(String),

    #[error("Endpoint {endpoint} not supported by {family} printers")]
    NotSupported {
        endpoint: &'static str,
        family: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExporterError {
    /// A capability gap rather than a failure; callers skip the metric group silently.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, ExporterError::NotSupported { .. })
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
