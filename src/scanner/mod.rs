//! Concurrent reachability prober.
//!
//! Probes every `(host, port)` pair with one tokio task per pair. A shared
//! [`Semaphore`] bounds how many probes are in flight: the spawning loop
//! acquires a permit before each spawn and the permit travels into the task,
//! so spawning stalls while the pool is exhausted and every permit is returned
//! exactly once when its probe ends, whatever the outcome.
//!
//! All tasks live in a [`JoinSet`]. [`Prober::probe`] returns only after the
//! set is empty, and dropping the returned future aborts whatever is still
//! running.

pub mod observer;
pub mod tcp;
pub mod traits;

use crate::config::ScanConfig;
use crate::error::ProbeError;
use crate::types::Port;
use std::borrow::Cow;
use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::warn;

pub use observer::{ProgressObserver, TracingObserver};
pub use tcp::TcpConnector;
pub use traits::{Connector, ProbeObserver, ProbeOutcome, ProbeTask, Progress};

/// Bounded-concurrency TCP prober.
#[derive(Clone)]
pub struct Prober {
    connector: Arc<dyn Connector>,
    concurrency: usize,
    timeout: Option<Duration>,
    observers: Vec<Arc<dyn ProbeObserver>>,
}

impl Prober {
    /// Create a prober using real TCP connections.
    ///
    /// `concurrency` is clamped to at least 1. A `timeout` of `None` leaves
    /// each connect attempt to the operating system's own deadline.
    pub fn new(concurrency: usize, timeout: Option<Duration>) -> Self {
        Self {
            connector: Arc::new(TcpConnector::new()),
            concurrency: concurrency.clamp(1, Semaphore::MAX_PERMITS),
            timeout,
            observers: Vec::new(),
        }
    }

    /// Create a prober sized from the configuration.
    ///
    /// The concurrency limit is computed here, once, and stays fixed for
    /// every batch this prober runs.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.effective_concurrency(), config.timeout())
    }

    /// Replace the connector.
    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = connector;
        self
    }

    /// Register an observer.
    pub fn with_observer(mut self, observer: Arc<dyn ProbeObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Maximum number of probes in flight.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Per-probe timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Probe every `(host, port)` pair and return the reachable endpoints.
    ///
    /// Endpoints come back in completion order. Duplicate hosts or ports in
    /// the input are probed once. Failed probes are not errors; they are
    /// only reported to observers.
    pub async fn probe(&self, hosts: &[Ipv4Addr], ports: &[Port]) -> Vec<SocketAddrV4> {
        let hosts = distinct_hosts(hosts);
        let ports = distinct_ports(ports);
        let total = hosts.len() * ports.len();
        if total == 0 {
            return Vec::new();
        }

        let observers: Arc<[Arc<dyn ProbeObserver>]> = self.observers.clone().into();
        for observer in observers.iter() {
            observer.on_start(total);
        }

        let permits = Arc::new(Semaphore::new(self.concurrency));
        let completed = Arc::new(AtomicUsize::new(0));
        let mut running = JoinSet::new();
        let mut reachable = Vec::new();

        for task in tasks(&hosts, &ports) {
            // The pool is never closed while this function holds it.
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };

            while let Some(joined) = running.try_join_next() {
                collect(joined, &mut reachable);
            }

            let connector = Arc::clone(&self.connector);
            let observers = Arc::clone(&observers);
            let completed = Arc::clone(&completed);
            let timeout = self.timeout;

            running.spawn(async move {
                let _permit = permit;

                let start = Instant::now();
                let attempt = connector.connect(task.endpoint(), timeout);
                let result = match timeout {
                    Some(limit) => tokio::time::timeout(limit, attempt)
                        .await
                        .unwrap_or(Err(ProbeError::Timeout)),
                    None => attempt.await,
                };
                let outcome = ProbeOutcome {
                    endpoint: task.endpoint(),
                    result,
                    elapsed: start.elapsed(),
                };

                let progress = Progress {
                    completed: completed.fetch_add(1, Ordering::SeqCst) + 1,
                    total,
                };
                for observer in observers.iter() {
                    observer.on_probe(&outcome, progress);
                }

                outcome
            });
        }

        while let Some(joined) = running.join_next().await {
            collect(joined, &mut reachable);
        }

        for observer in observers.iter() {
            observer.on_finish(reachable.len());
        }

        reachable
    }
}

/// `hosts` without repeats, in first-seen order.
///
/// Strictly ascending input, which is what [`expand_cidr`] produces, is
/// borrowed as is.
///
/// [`expand_cidr`]: crate::types::expand_cidr
fn distinct_hosts(hosts: &[Ipv4Addr]) -> Cow<'_, [Ipv4Addr]> {
    if hosts.windows(2).all(|w| w[0] < w[1]) {
        return Cow::Borrowed(hosts);
    }

    let mut seen = HashSet::with_capacity(hosts.len());
    Cow::Owned(hosts.iter().copied().filter(|h| seen.insert(*h)).collect())
}

fn distinct_ports(ports: &[Port]) -> Vec<u16> {
    let mut ports: Vec<u16> = ports.iter().map(|p| p.as_u16()).collect();
    ports.sort_unstable();
    ports.dedup();
    ports
}

/// One task per `(host, port)`, grouped by host, yielded on demand.
fn tasks<'a>(hosts: &'a [Ipv4Addr], ports: &'a [u16]) -> impl Iterator<Item = ProbeTask> + 'a {
    hosts
        .iter()
        .flat_map(move |&host| ports.iter().map(move |&port| ProbeTask::new(host, port)))
}

fn collect(joined: Result<ProbeOutcome, JoinError>, reachable: &mut Vec<SocketAddrV4>) {
    match joined {
        Ok(outcome) if outcome.is_reachable() => reachable.push(outcome.endpoint),
        Ok(_) => {}
        Err(e) => warn!("probe task did not complete: {}", e),
    }
}
