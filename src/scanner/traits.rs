//! Seams of the prober.
//!
//! [`Connector`] abstracts the TCP handshake so tests can substitute fakes,
//! and [`ProbeObserver`] receives one callback per finished probe for
//! diagnostics and progress display.

use crate::error::ProbeResult;
use async_trait::async_trait;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// One unit of work: a single `(host, port)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeTask {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl ProbeTask {
    pub fn new(host: Ipv4Addr, port: u16) -> Self {
        Self { host, port }
    }

    /// The socket address this task connects to.
    pub fn endpoint(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.host, self.port)
    }
}

/// What happened to one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Address that was probed.
    pub endpoint: SocketAddrV4,
    /// `Ok` if the handshake completed.
    pub result: ProbeResult<()>,
    /// Time spent inside the connect call.
    pub elapsed: Duration,
}

impl ProbeOutcome {
    /// Check if the endpoint accepted the connection.
    pub fn is_reachable(&self) -> bool {
        self.result.is_ok()
    }
}

/// Completed/total counter reported with every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// Establishes (and immediately discards) a TCP connection.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt a handshake with `addr`, giving up after `timeout` if set.
    async fn connect(&self, addr: SocketAddrV4, timeout: Option<Duration>) -> ProbeResult<()>;
}

/// Side channel notified as probes finish.
///
/// Observers must not block; they run on the worker that finished the probe.
pub trait ProbeObserver: Send + Sync {
    /// A batch of `total` probes is about to start.
    fn on_start(&self, _total: usize) {}

    /// One probe finished.
    fn on_probe(&self, outcome: &ProbeOutcome, progress: Progress);

    /// Every probe in the batch has finished; `reachable` of them succeeded.
    fn on_finish(&self, _reachable: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;

    #[test]
    fn test_task_endpoint_format() {
        let task = ProbeTask::new(Ipv4Addr::new(10, 0, 0, 1), 22);
        assert_eq!(task.endpoint().to_string(), "10.0.0.1:22");
    }

    #[test]
    fn test_outcome_reachability() {
        let endpoint = SocketAddrV4::new(Ipv4Addr::LOCALHOST, 80);
        let open = ProbeOutcome {
            endpoint,
            result: Ok(()),
            elapsed: Duration::from_millis(3),
        };
        let closed = ProbeOutcome {
            endpoint,
            result: Err(ProbeError::ConnectionRefused),
            elapsed: Duration::from_millis(1),
        };
        assert!(open.is_reachable());
        assert!(!closed.is_reachable());
    }
}
