//! Scan configuration loaded from a YAML document.
//!
//! ```yaml
//! networks:
//!   - network: 10.0.0.0/24
//!     labels:
//!       - networkname: lab1
//! concurrency: 4
//! filesdpath: /etc/prometheus/file_sd
//! port: [22, 9100]
//! timeout: 2
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::types::Port;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tokio::sync::Semaphore;

/// One label entry attached to a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLabel {
    /// Value emitted as `labels.networkname` in the target group.
    #[serde(rename = "networkname")]
    pub network_name: String,
}

/// A configured range and the labels attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// IPv4 range in CIDR notation.
    #[serde(rename = "network")]
    pub cidr: String,
    /// Label entries; only the first one is used for the target group.
    #[serde(default)]
    pub labels: Vec<NetworkLabel>,
}

impl NetworkSpec {
    /// Create a spec with a single label.
    pub fn new(cidr: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            cidr: cidr.into(),
            labels: vec![NetworkLabel {
                network_name: label.into(),
            }],
        }
    }

    /// The label used for this network's target group.
    ///
    /// Empty only for specs that have not been through [`ScanConfig::validate`].
    pub fn label(&self) -> &str {
        self.labels
            .first()
            .map(|l| l.network_name.as_str())
            .unwrap_or_default()
    }
}

/// Complete scan parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Ranges to scan, in output order.
    pub networks: Vec<NetworkSpec>,
    /// Multiplier applied to the CPU count to size the permit pool.
    #[serde(rename = "concurrency", default = "default_concurrency")]
    pub concurrency_multiplier: usize,
    /// Kept for compatibility with existing config files; not used.
    #[serde(rename = "filesdpath", default)]
    pub filesd_path: Option<String>,
    /// Ports probed on every host.
    #[serde(rename = "port")]
    pub ports: Vec<Port>,
    /// Per-probe connect timeout in seconds. 0 leaves it to the OS.
    #[serde(rename = "timeout", default)]
    pub timeout_secs: u64,
}

fn default_concurrency() -> usize {
    1
}

impl ScanConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse and validate a config document held in memory.
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let mut config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        config.ports.sort_unstable();
        config.ports.dedup();
        config.validate()?;

        Ok(config)
    }

    /// Check semantic constraints serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.networks.is_empty() {
            return Err(ConfigError::Invalid("no networks configured".to_string()));
        }

        for network in &self.networks {
            if network.labels.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "network {} has no labels",
                    network.cidr
                )));
            }
            if network.label().trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "network {} has an empty networkname",
                    network.cidr
                )));
            }
        }

        if self.ports.is_empty() {
            return Err(ConfigError::Invalid("no ports configured".to_string()));
        }

        if self.concurrency_multiplier == 0 {
            return Err(ConfigError::Invalid(
                "concurrency must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Per-probe timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Size of the permit pool: CPU count times the configured multiplier.
    pub fn effective_concurrency(&self) -> usize {
        effective_concurrency(num_cpus::get(), self.concurrency_multiplier)
    }
}

/// `cpus * multiplier`, clamped to what a semaphore can hold and to at least 1.
pub fn effective_concurrency(cpus: usize, multiplier: usize) -> usize {
    cpus.saturating_mul(multiplier)
        .clamp(1, Semaphore::MAX_PERMITS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::assert_err;

    const SAMPLE: &str = r#"
networks:
  - network: 10.0.0.0/24
    labels:
      - networkname: lab1
  - network: 10.0.1.0/28
    labels:
      - networkname: lab2
      - networkname: ignored
concurrency: 4
filesdpath: /etc/prometheus/file_sd
port:
  - 9100
  - 22
  - 22
timeout: 2
"#;

    #[test]
    fn test_parse_sample() {
        let config = ScanConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.networks.len(), 2);
        assert_eq!(config.networks[0].cidr, "10.0.0.0/24");
        assert_eq!(config.networks[0].label(), "lab1");
        assert_eq!(config.networks[1].label(), "lab2");
        assert_eq!(config.concurrency_multiplier, 4);
        assert_eq!(
            config.filesd_path.as_deref(),
            Some("/etc/prometheus/file_sd")
        );
        assert_eq!(
            config.ports,
            vec![Port::new(22).unwrap(), Port::new(9100).unwrap()]
        );
        assert_eq!(config.timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_defaults() {
        let config = ScanConfig::from_yaml_str(
            "networks:\n  - network: 10.0.0.0/30\n    labels:\n      - networkname: a\nport: [22]\n",
        )
        .unwrap();
        assert_eq!(config.concurrency_multiplier, 1);
        assert_eq!(config.timeout_secs, 0);
        assert_eq!(config.timeout(), None);
        assert!(config.filesd_path.is_none());
    }

    #[test]
    fn test_rejects_out_of_range_port() {
        let err = ScanConfig::from_yaml_str(
            "networks:\n  - network: 10.0.0.0/30\n    labels:\n      - networkname: a\nport: [70000]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let err = ScanConfig::from_yaml_str("networks: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_missing_labels() {
        let err = ScanConfig::from_yaml_str(
            "networks:\n  - network: 10.0.0.0/30\nport: [22]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let err = ScanConfig::from_yaml_str(
            "networks:\n  - network: 10.0.0.0/30\n    labels:\n      - networkname: a\nport: [22]\nconcurrency: 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_ports_and_networks() {
        assert_err!(ScanConfig::from_yaml_str(
            "networks:\n  - network: 10.0.0.0/30\n    labels:\n      - networkname: a\nport: []\n"
        ));
        assert_err!(ScanConfig::from_yaml_str("networks: []\nport: [22]\n"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ScanConfig::load(file.path()).unwrap();
        assert_eq!(config.networks.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScanConfig::load(dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn test_effective_concurrency() {
        assert_eq!(effective_concurrency(8, 4), 32);
        assert_eq!(effective_concurrency(0, 4), 1);
        assert_eq!(effective_concurrency(usize::MAX, 2), Semaphore::MAX_PERMITS);
    }
}
