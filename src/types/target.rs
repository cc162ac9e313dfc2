//! Host enumeration for IPv4 CIDR ranges.
//!
//! Expands a range such as `10.0.0.0/24` into the usable host addresses it
//! contains. The network and broadcast addresses are never returned.
//!
//! Ranges with fewer than two usable hosts (`/31`, `/32`) are rejected rather
//! than special-cased, as are IPv6 ranges and anything that does not parse.

use crate::error::{TargetError, TargetResult};
use ipnetwork::Ipv4Network;
use std::net::Ipv4Addr;

/// Longest prefix that still leaves two usable hosts.
const MAX_PREFIX: u8 = 30;

/// Parse and validate an IPv4 range.
fn parse_network(cidr: &str) -> TargetResult<Ipv4Network> {
    let trimmed = cidr.trim();
    if !trimmed.contains('/') {
        return Err(TargetError::invalid_cidr(cidr, "missing prefix length"));
    }

    let network: Ipv4Network = trimmed
        .parse()
        .map_err(|e| TargetError::invalid_cidr(cidr, format!("{}", e)))?;

    if network.prefix() > MAX_PREFIX {
        return Err(TargetError::invalid_cidr(
            cidr,
            format!(
                "prefix /{} leaves fewer than 2 usable hosts",
                network.prefix()
            ),
        ));
    }

    Ok(network)
}

/// Expand `cidr` into its usable host addresses in ascending order.
///
/// Host bits in the base address are masked off first, so `10.0.0.2/30`
/// expands exactly like `10.0.0.0/30` and `10.0.0.5/30` like `10.0.0.4/30`.
pub fn expand_cidr(cidr: &str) -> TargetResult<Vec<Ipv4Addr>> {
    let network = parse_network(cidr)?;

    let first = u32::from(network.network());
    let last = u32::from(network.broadcast());

    Ok(((first + 1)..last).map(Ipv4Addr::from).collect())
}
