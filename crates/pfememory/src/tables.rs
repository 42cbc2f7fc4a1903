//! SNMP and record name constants for the PFE memory check

/// Section and check plugin name
pub const SECTION_NAME: &str = "pfememory";

/// Juniper enterprise subtree all fetched columns live under
pub const SNMP_BASE: &str = ".1.3.6.1.4.1.2636.3";

/// JUNIPER-MIB::jnxOperatingDescr (card descriptions), relative to the base
pub const OID_OPERATING_DESCR: &str = "1.13.1.5.7";

/// JUNIPER-PFE-MIB::jnxPfeMemoryForwardingPercentFree, relative to the base
pub const OID_PFE_MEMORY_PERCENT_FREE: &str = "44.1.2.2.1.3";

/// Service description template, `%s` is replaced by the item
pub const SERVICE_NAME_TEMPLATE: &str = "PFE %s Memory Utilization";

/// Card record field names
pub mod fields {
    pub const NH_FREE1: &str = "nh_free1";
    pub const NH_FREE2: &str = "nh_free2";
    pub const FW_FREE1: &str = "fw_free1";
    pub const FW_FREE2: &str = "fw_free2";
}

/// Special constants
pub mod constants {
    /// Substring marking a card description cell
    pub const FPC_MARKER: &str = "FPC";

    /// Suffix appended to the card description to build the item key
    pub const ITEM_SUFFIX: &str = " Free Memory";

    /// Maximum readings kept per memory channel (one per MIC)
    pub const MAX_VALUES_PER_CHANNEL: usize = 2;

    /// Default WARN cutoff (percent free, inclusive)
    pub const DEFAULT_WARN_LEVEL: i64 = 15;

    /// Default CRIT cutoff (percent free, inclusive)
    pub const DEFAULT_CRIT_LEVEL: i64 = 10;
}
