//! Core type definitions.
//!
//! Newtypes and pure helpers shared by the config model, the prober and the
//! output stage.

mod port;
mod target;

pub use port::{Port, PortError};
pub use target::expand_cidr;
