//! # sdscout - Service Discovery by TCP Probing
//!
//! sdscout finds live `host:port` endpoints across IPv4 ranges and writes
//! them as a Prometheus `file_sd` target-group document.
//!
//! ## Features
//!
//! - **Bounded Concurrency**: one async probe per `(host, port)` pair, gated
//!   by a permit pool sized from the CPU count
//! - **YAML Configuration**: networks, labels, ports and timeout in one file
//! - **file_sd Output**: JSON target groups, one per configured network
//! - **Pluggable Seams**: swap the connector or attach observers for
//!   diagnostics and progress display
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use sdscout::scanner::Prober;
//! use sdscout::types::{expand_cidr, Port};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let hosts = expand_cidr("192.168.1.0/24").unwrap();
//!     let ports = [Port::new(22).unwrap(), Port::new(9100).unwrap()];
//!
//!     let prober = Prober::new(64, Some(Duration::from_secs(1)));
//!     for endpoint in prober.probe(&hosts, &ports).await {
//!         println!("{}", endpoint);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - YAML scan configuration
//! - [`types`] - Port newtype and CIDR host enumeration
//! - [`scanner`] - The concurrent prober, its connector and observers
//! - [`discovery`] - Per-network pipeline producing target groups
//! - [`output`] - Target groups and the JSON writer
//! - [`error`] - Error types
//! - [`cli`] - Command-line entry point

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use config::{NetworkSpec, ScanConfig};
pub use discovery::{discover, DiscoveryReport};
pub use error::{CliError, ConfigError, OutputError, ProbeError, TargetError};
pub use output::TargetGroup;
pub use scanner::{Connector, ProbeObserver, Prober};
pub use types::{expand_cidr, Port};
