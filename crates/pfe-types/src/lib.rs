//! Common types for Juniper PFE memory monitoring.
//!
//! This crate provides type-safe representations of the primitives shared
//! by the PFE memory check and its host integration:
//!
//! - [`MemoryChannel`]: the two tracked PFE memory pools (NH and FW)
//! - [`MicSlot`]: the sub-module slot a reading belongs to (MIC 0 / MIC 1)
//! - [`State`]: monitoring service states with worst-state ordering

mod channel;
mod state;

pub use channel::{MemoryChannel, MicSlot};
pub use state::State;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid memory channel: {0}")]
    InvalidMemoryChannel(String),

    #[error("invalid MIC slot: {0} (must be 0 or 1)")]
    InvalidMicSlot(String),

    #[error("invalid service state: {0}")]
    InvalidState(String),
}
