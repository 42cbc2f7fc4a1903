//! Type definitions for the PFE memory check

use pfe_types::{MemoryChannel, MicSlot, State};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::fields;

/// Raw SNMP rows as delivered by the host, one `Vec` of cells per row
pub type StringTable = Vec<Vec<String>>;

/// Parsed section: card records keyed by item name, in table order
pub type Section = IndexMap<String, CardRecord>;

/// Free memory readings of one FPC
///
/// Readings are kept as the raw strings reported by the device; they are
/// only converted to integers when the record is checked. Absent readings
/// are skipped on serialization rather than written as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// FPC description from jnxOperatingDescr
    pub card: String,

    /// NH free percent on MIC 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nh_free1: Option<String>,

    /// NH free percent on MIC 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nh_free2: Option<String>,

    /// FW free percent on MIC 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw_free1: Option<String>,

    /// FW free percent on MIC 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw_free2: Option<String>,
}

impl CardRecord {
    /// Creates an empty record for a card description
    pub fn new(card: impl Into<String>) -> Self {
        Self {
            card: card.into(),
            ..Self::default()
        }
    }

    /// Returns the record field name holding a channel/slot reading
    pub fn field_name(channel: MemoryChannel, slot: MicSlot) -> &'static str {
        match (channel, slot) {
            (MemoryChannel::Nh, MicSlot::Mic0) => fields::NH_FREE1,
            (MemoryChannel::Nh, MicSlot::Mic1) => fields::NH_FREE2,
            (MemoryChannel::Fw, MicSlot::Mic0) => fields::FW_FREE1,
            (MemoryChannel::Fw, MicSlot::Mic1) => fields::FW_FREE2,
        }
    }

    fn slot_ref(&self, channel: MemoryChannel, slot: MicSlot) -> &Option<String> {
        match (channel, slot) {
            (MemoryChannel::Nh, MicSlot::Mic0) => &self.nh_free1,
            (MemoryChannel::Nh, MicSlot::Mic1) => &self.nh_free2,
            (MemoryChannel::Fw, MicSlot::Mic0) => &self.fw_free1,
            (MemoryChannel::Fw, MicSlot::Mic1) => &self.fw_free2,
        }
    }

    fn slot_mut(&mut self, channel: MemoryChannel, slot: MicSlot) -> &mut Option<String> {
        match (channel, slot) {
            (MemoryChannel::Nh, MicSlot::Mic0) => &mut self.nh_free1,
            (MemoryChannel::Nh, MicSlot::Mic1) => &mut self.nh_free2,
            (MemoryChannel::Fw, MicSlot::Mic0) => &mut self.fw_free1,
            (MemoryChannel::Fw, MicSlot::Mic1) => &mut self.fw_free2,
        }
    }

    /// Gets a reading, if present
    pub fn get(&self, channel: MemoryChannel, slot: MicSlot) -> Option<&str> {
        self.slot_ref(channel, slot).as_deref()
    }

    /// Stores a reading
    pub fn set(&mut self, channel: MemoryChannel, slot: MicSlot, value: impl Into<String>) {
        *self.slot_mut(channel, slot) = Some(value.into());
    }

    /// Number of readings present
    pub fn value_count(&self) -> usize {
        [&self.nh_free1, &self.nh_free2, &self.fw_free1, &self.fw_free2]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }

    /// Checks if both channels are reported for a MIC
    pub fn has_mic(&self, slot: MicSlot) -> bool {
        MemoryChannel::ALL
            .iter()
            .all(|&channel| self.get(channel, slot).is_some())
    }

    /// Checks if at least one but not every channel is reported for a MIC
    pub fn is_partial_mic(&self, slot: MicSlot) -> bool {
        let present = MemoryChannel::ALL
            .iter()
            .filter(|&&channel| self.get(channel, slot).is_some())
            .count();
        present > 0 && present < MemoryChannel::ALL.len()
    }
}

/// A discovered service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Item the check is run for
    pub item: String,
}

impl Service {
    /// Creates a service for an item
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}

/// One result emitted by a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Result state
    pub state: State,

    /// Single-line summary
    pub summary: String,

    /// Long output
    pub details: String,
}

impl CheckResult {
    /// Creates a check result
    pub fn new(state: State, summary: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            state,
            summary: summary.into(),
            details: details.into(),
        }
    }
}

/// Outcome of checking one discovered service in a poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReport {
    /// Check item
    pub item: String,

    /// Rendered service description
    pub service_name: String,

    /// Worst state over all results, UNKNOWN when the check failed
    pub state: State,

    /// Emitted results in order
    pub results: Vec<CheckResult>,

    /// Check failure, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceReport {
    /// Builds a report from the results of a successful check
    pub fn from_results(
        item: impl Into<String>,
        service_name: impl Into<String>,
        results: Vec<CheckResult>,
    ) -> Self {
        let state = State::worst(results.iter().map(|r| r.state));
        Self {
            item: item.into(),
            service_name: service_name.into(),
            state,
            results,
            error: None,
        }
    }

    /// Builds a report for a check that failed
    pub fn failed(
        item: impl Into<String>,
        service_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            service_name: service_name.into(),
            state: State::Unknown,
            results: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Builds a StringTable from rows of cells.
#[macro_export]
macro_rules! string_table {
    ($([$($cell:expr),* $(,)?]),* $(,)?) => {
        vec![
            $(vec![$($cell.to_string()),*],)*
        ]
    };
}
