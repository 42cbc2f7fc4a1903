//! # pfememory - Juniper PFE Free Memory Check
//!
//! This crate implements the SNMP check for packet forwarding engine (PFE)
//! memory on Juniper line cards. The monitoring host polls the device and
//! hands over the raw string table; the check reshapes it into one record
//! per FPC and evaluates the free memory readings against fixed levels.
//!
//! ## Data Sources
//! - `JUNIPER-MIB::jnxOperatingDescr`: FPC descriptions
//! - `JUNIPER-PFE-MIB::jnxPfeMemoryForwardingPercentFree`: NH and FW free
//!   memory per PFE, one PFE per MIC
//!
//! ## Poll Cycle
//! 1. [`parse_section`]: raw table to card records, keyed by
//!    `"<description> Free Memory"`
//! 2. [`CheckPlugin::discover`]: one service per card record
//! 3. [`check_pfememory`]: CRIT/WARN/OK results per MIC and channel
//!
//! Nothing is kept between cycles. SNMP transport, scheduling and result
//! rendering belong to the host.

pub mod check;
pub mod config;
pub mod error;
pub mod parser;
pub mod plugin;
pub mod section;
mod tables;
mod types;

pub use check::{check_card, check_pfememory, evaluate_mic};
pub use config::{PfeMemoryConfig, Thresholds};
pub use error::{PfeMemoryError, PfeMemoryResult};
pub use parser::parse_section;
pub use plugin::{worst_state, CheckPlugin, PfeMemoryPlugin};
pub use section::SnmpSection;
pub use tables::*;
pub use types::*;

// Re-export the shared value types for convenience
pub use pfe_types::{MemoryChannel, MicSlot, State};
