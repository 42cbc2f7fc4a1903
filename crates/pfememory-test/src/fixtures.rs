//! Test fixtures for PFE memory string tables
//!
//! The host delivers each card as its memory readings followed by the
//! jnxOperatingDescr cell. Fixtures build rows in that order.

use pfememory::StringTable;
use serde::{Deserialize, Serialize};

/// One card as it appears in the string table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRows {
    /// FPC description
    pub description: String,
    /// Readings in delivery order (NH, FW per PFE)
    pub readings: Vec<String>,
    /// Put the description on its own row
    pub split_rows: bool,
}

impl CardRows {
    /// Create a card without readings
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            readings: Vec::new(),
            split_rows: false,
        }
    }

    /// Add the NH and FW reading of one PFE
    pub fn with_pfe(mut self, nh: impl Into<String>, fw: impl Into<String>) -> Self {
        self.readings.push(nh.into());
        self.readings.push(fw.into());
        self
    }

    /// Add raw readings
    pub fn with_readings<I, V>(mut self, readings: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.readings.extend(readings.into_iter().map(Into::into));
        self
    }

    /// Deliver readings and description on separate rows
    pub fn split(mut self) -> Self {
        self.split_rows = true;
        self
    }

    /// Item name the check discovers for this card
    pub fn item(&self) -> String {
        format!("{}{}", self.description, pfememory::constants::ITEM_SUFFIX)
    }

    /// Rows for this card
    pub fn rows(&self) -> StringTable {
        if self.split_rows {
            vec![self.readings.clone(), vec![self.description.clone()]]
        } else {
            let mut row = self.readings.clone();
            row.push(self.description.clone());
            vec![row]
        }
    }
}

/// Concatenate the rows of several cards
pub fn table_of<'a, I>(cards: I) -> StringTable
where
    I: IntoIterator<Item = &'a CardRows>,
{
    cards.into_iter().flat_map(CardRows::rows).collect()
}

/// Juniper MX chassis fixtures
pub mod mx_fixtures {
    use super::*;

    /// Single-PFE MPC4E
    pub fn mpc4e(slot: u8, nh: &str, fw: &str) -> CardRows {
        CardRows::new(format!("FPC: MPC4E 3D 32XGE @ {}/*/*", slot)).with_pfe(nh, fw)
    }

    /// Dual-PFE MPC7E
    pub fn mpc7e(slot: u8, pfe0: (&str, &str), pfe1: (&str, &str)) -> CardRows {
        CardRows::new(format!(
            "FPC: MPC7E 3D MRATE-12xQSFPP-XGE-XLGE-CGE @ {}/*/*",
            slot
        ))
        .with_pfe(pfe0.0, pfe0.1)
        .with_pfe(pfe1.0, pfe1.1)
    }

    /// Dual-PFE MPC7E whose PFEs report the same FW reading, as seen on the MX960
    pub fn mpc7e_matching_fw(slot: u8, nh: (&str, &str), fw: &str) -> CardRows {
        mpc7e(slot, (nh.0, fw), (nh.1, fw))
    }

    /// Card that reports no PFE memory
    pub fn empty_card(slot: u8) -> CardRows {
        CardRows::new(format!("FPC: MPCE Type 3 3D @ {}/*/*", slot))
    }

    /// A healthy chassis with single and dual PFE cards
    pub fn healthy_chassis() -> Vec<CardRows> {
        vec![
            mpc4e(0, "79", "99"),
            CardRows::new("FPC: MPC3E NG PQ & Flex Q @ 1/*/*").with_pfe("80", "99"),
            mpc7e(5, ("79", "99"), ("80", "98")),
            mpc7e(7, ("78", "97"), ("81", "96")),
        ]
    }

    /// A chassis with a starved PFE on MIC 0 of slot 5
    pub fn starved_chassis() -> Vec<CardRows> {
        vec![
            mpc4e(0, "79", "99"),
            mpc7e(5, ("9", "8"), ("70", "60")),
            mpc4e(11, "14", "99"),
        ]
    }
}

/// Malformed or unusual tables
pub mod edge_fixtures {
    use super::*;

    /// Three readings before the description
    pub fn odd_reading_count(slot: u8) -> CardRows {
        CardRows::new(format!("FPC: MPC7E @ {}/*/*", slot)).with_readings(["80", "99", "79"])
    }

    /// Identical NH and FW readings on a single-PFE card
    pub fn identical_readings(slot: u8, value: &str) -> CardRows {
        mx_fixtures::mpc4e(slot, value, value)
    }

    /// Readings after the last description
    pub fn trailing_readings() -> StringTable {
        vec![vec!["80".to_string(), "99".to_string()]]
    }
}
