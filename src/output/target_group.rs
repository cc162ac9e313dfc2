//! Prometheus `file_sd` target groups.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddrV4;

/// Labels attached to every target of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLabels {
    #[serde(rename = "networkname")]
    pub network_name: String,
}

/// Reachable endpoints of one configured network.
///
/// Serializes as `{"labels": {"networkname": ...}, "targets": [...]}`.
/// `targets` keeps insertion order and never holds the same endpoint twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    pub labels: TargetLabels,
    pub targets: Vec<String>,
}

impl TargetGroup {
    /// Create an empty group.
    pub fn new(network_name: impl Into<String>) -> Self {
        Self {
            labels: TargetLabels {
                network_name: network_name.into(),
            },
            targets: Vec::new(),
        }
    }

    /// Build a group from prober output, keeping arrival order.
    pub fn from_endpoints(
        network_name: impl Into<String>,
        endpoints: impl IntoIterator<Item = SocketAddrV4>,
    ) -> Self {
        let mut group = Self::new(network_name);
        let mut seen = HashSet::new();
        for endpoint in endpoints {
            if seen.insert(endpoint) {
                group.targets.push(endpoint.to_string());
            }
        }
        group
    }

    pub fn network_name(&self) -> &str {
        &self.labels.network_name
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
