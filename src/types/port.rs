//! Port type with validation.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535),
//! including when they come out of a YAML document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw integers and ensures
/// port numbers are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Port {
    type Error = PortError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(PortError::OutOfRange(value))
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(i64::from(value)))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(22).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_port_try_from_wide_integer() {
        assert_eq!(Port::try_from(9100_i64).unwrap().as_u16(), 9100);
        assert_eq!(Port::try_from(0_i64), Err(PortError::OutOfRange(0)));
        assert_eq!(Port::try_from(-22_i64), Err(PortError::OutOfRange(-22)));
        assert_eq!(Port::try_from(70000_i64), Err(PortError::OutOfRange(70000)));
    }

    #[test]
    fn test_port_deserialize_rejects_out_of_range() {
        let ports: Vec<Port> = serde_json::from_str("[22, 443]").unwrap();
        assert_eq!(ports, vec![Port::new(22).unwrap(), Port::new(443).unwrap()]);

        let err = serde_json::from_str::<Vec<Port>>("[22, 65536]").unwrap_err();
        assert!(err.to_string().contains("out of valid range"));
    }

    #[test]
    fn test_port_display() {
        assert_eq!(Port::new(8080).unwrap().to_string(), "8080");
    }
}
