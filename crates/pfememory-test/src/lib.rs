//! Integration test infrastructure for the PFE memory check
//!
//! Provides:
//! - String table fixtures modelled on Juniper MX snmpwalk captures
//! - A builder for card rows in host delivery order
//! - Service report verification helpers

pub mod fixtures;
mod verification;

pub use fixtures::*;
pub use verification::*;
