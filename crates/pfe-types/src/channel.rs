//! PFE memory channel and MIC slot definitions.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PFE memory pool reported by `jnxPfeMemoryForwardingPercentFree`.
///
/// The MIB indexes each reading by `<fpc>.<pfe>.<nh|fw>`; the check only
/// sees the values, so the channel is inferred from position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryChannel {
    /// Next-hop memory.
    Nh,
    /// Forwarding (firewall/filter) memory.
    Fw,
}

impl MemoryChannel {
    /// Both channels in evaluation order.
    pub const ALL: [MemoryChannel; 2] = [MemoryChannel::Nh, MemoryChannel::Fw];

    /// Returns the label used in summaries ("NH" or "FW").
    pub const fn label(&self) -> &'static str {
        match self {
            MemoryChannel::Nh => "NH",
            MemoryChannel::Fw => "FW",
        }
    }
}

impl fmt::Display for MemoryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MemoryChannel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nh" => Ok(MemoryChannel::Nh),
            "fw" => Ok(MemoryChannel::Fw),
            _ => Err(ParseError::InvalidMemoryChannel(s.to_string())),
        }
    }
}

/// Sub-module slot on an FPC.
///
/// # Examples
///
/// ```
/// use pfe_types::MicSlot;
///
/// assert_eq!(MicSlot::Mic1.to_string(), "MIC 1");
/// assert_eq!("MIC 0".parse::<MicSlot>().unwrap(), MicSlot::Mic0);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum MicSlot {
    /// First sub-module, always reported.
    #[default]
    Mic0,
    /// Second sub-module, present on dual-MIC cards.
    Mic1,
}

impl MicSlot {
    /// Returns the slot number.
    pub const fn index(&self) -> u8 {
        match self {
            MicSlot::Mic0 => 0,
            MicSlot::Mic1 => 1,
        }
    }
}

impl fmt::Display for MicSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MIC {}", self.index())
    }
}

impl FromStr for MicSlot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("MIC")
            .or_else(|| trimmed.strip_prefix("mic"))
            .unwrap_or(trimmed)
            .trim();

        match digits {
            "0" => Ok(MicSlot::Mic0),
            "1" => Ok(MicSlot::Mic1),
            _ => Err(ParseError::InvalidMicSlot(s.to_string())),
        }
    }
}
