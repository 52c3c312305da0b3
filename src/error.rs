use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating installer files
///
/// Every variant is fatal: the run stops at the first one and nothing
/// after the failing stage is written.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Network or TLS failure talking to the director
    #[error("Unable to establish connection to BOSH director: {0}")]
    Transport(#[from] reqwest::Error),

    /// The director rejected the supplied credentials
    #[error("BOSH director rejected credentials ({status}) for {url}")]
    Authentication { url: String, status: u16 },

    /// Any other non-success response
    #[error("Unexpected BOSH director response from {url}: {status}, {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// No deployment carries every required release
    #[error("BOSH director does not have a deployment containing the releases: {}", required.join(", "))]
    DeploymentNotFound { required: Vec<String> },

    /// Text that should have been JSON or YAML was not
    #[error("Failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    /// A required manifest path is absent
    #[error("Manifest is missing required field: {path}")]
    MissingField { path: String },

    /// A manifest path is present but has the wrong shape
    #[error("Manifest field {path} is not {expected}")]
    InvalidField {
        path: String,
        expected: &'static str,
    },

    /// No zoned job is attached to a network using the subnet
    #[error("Failed to find zone for subnet: {subnet}")]
    SubnetZoneNotFound { subnet: String },

    /// Directory creation or file write failure
    #[error("Failed to write {path}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unreadable settings
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GenerateError {
    pub(crate) fn missing(path: impl Into<String>) -> Self {
        GenerateError::MissingField { path: path.into() }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
