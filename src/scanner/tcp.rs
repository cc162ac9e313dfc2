//! TCP connect probing.
//!
//! Uses the operating system's socket API to complete a full handshake.
//! No data is exchanged; the stream is dropped as soon as it is established.

use crate::error::{ProbeError, ProbeResult};
use crate::scanner::traits::Connector;
use async_trait::async_trait;
use std::io;
use std::net::SocketAddrV4;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Connector backed by real sockets. Does not require elevated privileges.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl TcpConnector {
    pub fn new() -> Self {
        Self
    }
}

/// Map an I/O error from `connect()` onto a probe failure.
fn classify(e: io::Error) -> ProbeError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => return ProbeError::ConnectionRefused,
        io::ErrorKind::TimedOut => return ProbeError::Timeout,
        _ => {}
    }

    let error_str = e.to_string().to_lowercase();
    if error_str.contains("refused") {
        ProbeError::ConnectionRefused
    } else if error_str.contains("unreachable") {
        if error_str.contains("host") {
            ProbeError::HostUnreachable
        } else {
            ProbeError::NetworkUnreachable(e.to_string())
        }
    } else {
        ProbeError::ConnectionFailed(e.to_string())
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, addr: SocketAddrV4, limit: Option<Duration>) -> ProbeResult<()> {
        let attempt = TcpStream::connect(addr);
        let stream = match limit {
            Some(limit) => timeout(limit, attempt)
                .await
                .map_err(|_| ProbeError::Timeout)?,
            None => attempt.await,
        }
        .map_err(classify)?;

        drop(stream);
        Ok(())
    }
}
