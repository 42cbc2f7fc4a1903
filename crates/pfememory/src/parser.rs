//! Reshaping of the raw SNMP string table into card records.
//!
//! The two fetched columns are not row-aligned per card: the host delivers
//! the memory readings of a card first and its jnxOperatingDescr cell last.
//! Cells are therefore scanned in table order and readings are attached to
//! the next FPC description that follows them.

use once_cell::sync::Lazy;
use pfe_types::{MemoryChannel, MicSlot};
use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::constants::{FPC_MARKER, ITEM_SUFFIX, MAX_VALUES_PER_CHANNEL};
use crate::error::{PfeMemoryError, PfeMemoryResult};
use crate::types::{CardRecord, Section};

/// Cells made of numeric characters only.
static NUMERIC_CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{N}+$").expect("Invalid regex pattern"));

/// Cells holding an FPC description.
static FPC_CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&regex::escape(FPC_MARKER)).expect("Invalid regex pattern"));

/// Classification of a single table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// A free memory percentage.
    Reading,
    /// An FPC description closing the current card.
    Card,
    /// Anything else; ignored.
    Other,
}

/// Classifies a table cell.
pub fn classify_cell(cell: &str) -> CellKind {
    if NUMERIC_CELL_RE.is_match(cell) {
        CellKind::Reading
    } else if FPC_CELL_RE.is_match(cell) {
        CellKind::Card
    } else {
        CellKind::Other
    }
}

/// An FPC description with the readings collected before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCard<'a> {
    pub card: &'a str,
    pub readings: Vec<&'a str>,
}

/// Groups the cells of a table into cards.
///
/// Readings accumulate across row boundaries until an FPC description is
/// seen. Readings after the last description belong to no card and are
/// dropped.
pub fn collect_cards(table: &[Vec<String>]) -> Vec<RawCard<'_>> {
    let mut cards = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for cell in table.iter().flatten() {
        match classify_cell(cell) {
            CellKind::Reading => pending.push(cell),
            CellKind::Card => cards.push(RawCard {
                card: cell,
                readings: std::mem::take(&mut pending),
            }),
            CellKind::Other => {}
        }
    }

    if !pending.is_empty() {
        debug!(
            "Dropping {} trailing readings without a card description",
            pending.len()
        );
    }

    cards
}

/// Readings of one card split by memory channel.
///
/// Each channel holds at most one value per MIC. Positional values are kept
/// even when they repeat, since two PFEs often report the same reading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelValues {
    pub nh: Vec<String>,
    pub fw: Vec<String>,
}

impl ChannelValues {
    /// Gets the values of a channel
    pub fn values(&self, channel: MemoryChannel) -> &[String] {
        match channel {
            MemoryChannel::Nh => &self.nh,
            MemoryChannel::Fw => &self.fw,
        }
    }

    fn values_mut(&mut self, channel: MemoryChannel) -> &mut Vec<String> {
        match channel {
            MemoryChannel::Nh => &mut self.nh,
            MemoryChannel::Fw => &mut self.fw,
        }
    }

    /// Appends a value unless the channel is full
    pub fn push(&mut self, channel: MemoryChannel, value: &str) {
        let values = self.values_mut(channel);
        if values.len() < MAX_VALUES_PER_CHANNEL {
            values.push(value.to_string());
        }
    }

    /// Appends a shared value to every channel not holding it yet
    pub fn push_shared(&mut self, value: &str) {
        for channel in MemoryChannel::ALL {
            if !self.values(channel).iter().any(|v| v == value) {
                self.push(channel, value);
            }
        }
    }

    /// Checks if a value was already recorded in both channels
    pub fn in_both(&self, value: &str) -> bool {
        MemoryChannel::ALL
            .iter()
            .all(|&channel| self.values(channel).iter().any(|v| v == value))
    }

    /// Checks if no channel holds a value
    pub fn is_empty(&self) -> bool {
        self.nh.is_empty() && self.fw.is_empty()
    }
}

/// Splits the readings of a card into NH and FW values.
///
/// - 2 readings: the first is NH, the second FW. Identical readings are
///   attributed to FW only.
/// - 4 readings: a reading shared between positions 2 and 3, between
///   positions 0 and 1, or between positions 0 and 3 (unless already in both
///   channels) goes once to each channel. Otherwise even positions are NH and
///   odd positions FW, repeated values included.
/// - no readings: both channels stay empty.
///
/// Any other count is rejected.
pub fn split_channels(card: &str, readings: &[&str]) -> PfeMemoryResult<ChannelValues> {
    let mut channels = ChannelValues::default();

    match readings {
        [] => {}
        [first, second] => {
            if first == second {
                channels.push(MemoryChannel::Fw, first);
            } else {
                channels.push(MemoryChannel::Nh, first);
                channels.push(MemoryChannel::Fw, second);
            }
        }
        [m0, m1, m2, m3] => {
            for (pos, &value) in readings.iter().enumerate() {
                let shared = (value == *m2 && value == *m3)
                    || (value == *m0 && value == *m1)
                    || (value == *m0 && value == *m3 && !channels.in_both(value));

                if shared {
                    channels.push_shared(value);
                } else if pos % 2 == 0 {
                    channels.push(MemoryChannel::Nh, value);
                } else {
                    channels.push(MemoryChannel::Fw, value);
                }
            }
        }
        _ => {
            return Err(PfeMemoryError::unsupported_value_count(
                card,
                readings.len(),
            ))
        }
    }

    Ok(channels)
}

/// Builds the item name for a card description.
pub fn item_name(card: &str) -> String {
    format!("{}{}", card, ITEM_SUFFIX)
}

/// Builds a card record from split channel values.
///
/// The n-th value of a channel lands on MIC n.
pub fn build_record(card: &str, channels: &ChannelValues) -> CardRecord {
    let mut record = CardRecord::new(card);
    for channel in MemoryChannel::ALL {
        for (value, slot) in channels
            .values(channel)
            .iter()
            .zip([MicSlot::Mic0, MicSlot::Mic1])
        {
            record.set(channel, slot, value.as_str());
        }
    }
    record
}

/// Parses the raw string table into the section.
///
/// Cards without readings are not represented. Cards whose readings cannot
/// be split are logged and left out; the remaining cards are unaffected.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn parse_section(table: &[Vec<String>]) -> Section {
    let mut section = Section::new();

    for raw in collect_cards(table) {
        let channels = match split_channels(raw.card, &raw.readings) {
            Ok(channels) => channels,
            Err(e) => {
                warn!("Skipping card: {}", e);
                continue;
            }
        };

        if channels.is_empty() {
            debug!("Card '{}' reported no memory readings", raw.card);
            continue;
        }

        let record = build_record(raw.card, &channels);
        debug!(
            "Card '{}': {} readings, NH {:?}, FW {:?}",
            raw.card,
            record.value_count(),
            channels.nh,
            channels.fw
        );

        let item = item_name(raw.card);
        if section.insert(item.clone(), record).is_some() {
            debug!("Duplicate card description, replacing '{}'", item);
        }
    }

    section
}
