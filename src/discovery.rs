//! Per-network discovery pipeline.
//!
//! Walks the configured networks in order: expand the range, probe every
//! host on every configured port, wrap the survivors in a [`TargetGroup`].
//! A range that fails to expand is logged and skipped; the others still run.

use crate::config::ScanConfig;
use crate::error::TargetError;
use crate::output::TargetGroup;
use crate::scanner::Prober;
use crate::types::expand_cidr;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// One group per network that expanded successfully, in config order.
    pub groups: Vec<TargetGroup>,
    /// Networks that were skipped.
    pub skipped: Vec<TargetError>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

impl DiscoveryReport {
    /// Total reachable endpoints across all groups.
    pub fn target_count(&self) -> usize {
        self.groups.iter().map(TargetGroup::len).sum()
    }
}

/// Run discovery over every network in `config`.
pub async fn discover(config: &ScanConfig, prober: &Prober) -> DiscoveryReport {
    let started = Instant::now();
    let mut groups = Vec::with_capacity(config.networks.len());
    let mut skipped = Vec::new();

    for network in &config.networks {
        let hosts = match expand_cidr(&network.cidr) {
            Ok(hosts) => hosts,
            Err(e) => {
                error!(network = %network.cidr, label = network.label(), "{}", e);
                skipped.push(e);
                continue;
            }
        };

        info!(
            network = %network.cidr,
            label = network.label(),
            "Total number of hosts to discover: {}",
            hosts.len()
        );

        let endpoints = prober.probe(&hosts, &config.ports).await;
        let group = TargetGroup::from_endpoints(network.label(), endpoints);

        info!(
            network = %network.cidr,
            label = network.label(),
            reachable = group.len(),
            "network scanned"
        );
        groups.push(group);
    }

    DiscoveryReport {
        groups,
        skipped,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkSpec;
    use crate::error::{ProbeError, ProbeResult};
    use crate::scanner::Connector;
    use crate::types::Port;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::net::{Ipv4Addr, SocketAddrV4};
    use std::sync::Arc;

    struct OpenSet(HashSet<SocketAddrV4>);

    #[async_trait]
    impl Connector for OpenSet {
        async fn connect(&self, addr: SocketAddrV4, _timeout: Option<Duration>) -> ProbeResult<()> {
            if self.0.contains(&addr) {
                Ok(())
            } else {
                Err(ProbeError::Timeout)
            }
        }
    }

    fn config(networks: Vec<NetworkSpec>, ports: &[u16]) -> ScanConfig {
        ScanConfig {
            networks,
            concurrency_multiplier: 1,
            filesd_path: None,
            ports: ports.iter().map(|&p| Port::new(p).unwrap()).collect(),
            timeout_secs: 1,
        }
    }

    fn prober(open: &[SocketAddrV4]) -> Prober {
        Prober::new(4, Some(Duration::from_secs(1)))
            .with_connector(Arc::new(OpenSet(open.iter().copied().collect())))
    }

    #[tokio::test]
    async fn test_groups_follow_config_order() {
        let open = [
            SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 22),
            SocketAddrV4::new(Ipv4Addr::new(10, 0, 1, 2), 9100),
        ];
        let config = config(
            vec![
                NetworkSpec::new("10.0.0.0/30", "lab1"),
                NetworkSpec::new("10.0.1.0/30", "lab2"),
                NetworkSpec::new("10.0.2.0/30", "lab3"),
            ],
            &[22, 9100],
        );

        let report = discover(&config, &prober(&open)).await;

        assert!(report.skipped.is_empty());
        let labels: Vec<&str> = report.groups.iter().map(|g| g.network_name()).collect();
        assert_eq!(labels, vec!["lab1", "lab2", "lab3"]);
        assert_eq!(report.groups[0].targets, vec!["10.0.0.1:22"]);
        assert_eq!(report.groups[1].targets, vec!["10.0.1.2:9100"]);
        assert!(report.groups[2].is_empty());
        assert_eq!(report.target_count(), 2);
    }

    #[tokio::test]
    async fn test_invalid_network_is_skipped() {
        let open = [SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 2), 22)];
        let config = config(
            vec![
                NetworkSpec::new("not-a-cidr", "broken"),
                NetworkSpec::new("10.0.0.0/31", "tiny"),
                NetworkSpec::new("10.0.0.0/30", "lab1"),
            ],
            &[22],
        );

        let report = discover(&config, &prober(&open)).await;

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].network_name(), "lab1");
        assert_eq!(report.groups[0].targets, vec!["10.0.0.2:22"]);

        let skipped: Vec<&str> = report.skipped.iter().map(|e| e.cidr()).collect();
        assert_eq!(skipped, vec!["not-a-cidr", "10.0.0.0/31"]);
    }
}
