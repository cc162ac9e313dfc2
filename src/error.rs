//! Error types for sdscout.
//!
//! Uses `thiserror` for ergonomic error definitions. Each concern gets its own
//! enum; [`CliError`] folds them together at the binary boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the scan configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("cannot parse config: {0}")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while expanding a network range into hosts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid CIDR {cidr}: {reason}")]
    InvalidCidr { cidr: String, reason: String },
}

impl TargetError {
    pub(crate) fn invalid_cidr(cidr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCidr {
            cidr: cidr.into(),
            reason: reason.into(),
        }
    }

    /// The offending range as written in the configuration.
    pub fn cidr(&self) -> &str {
        match self {
            Self::InvalidCidr { cidr, .. } => cidr,
        }
    }
}

/// Why a single probe did not succeed.
///
/// These never leave the prober; they only reach observers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("connection timed out")]
    Timeout,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("host unreachable")]
    HostUnreachable,

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Errors raised while serializing or persisting target groups.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("cannot serialize target groups: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cannot write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("cannot write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

/// Top-level error surfaced by the command line.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for host enumeration.
pub type TargetResult<T> = Result<T, TargetError>;

/// Result type alias for a single probe.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Result type alias for the result writer.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type alias for command execution.
pub type CliResult<T> = Result<T, CliError>;
