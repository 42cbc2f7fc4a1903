//! SNMP section descriptor: what the host fetches and when.

use serde::Serialize;

use crate::{OID_OPERATING_DESCR, OID_PFE_MEMORY_PERCENT_FREE, SECTION_NAME, SNMP_BASE};

/// Describes the SNMP columns a check consumes and how to detect devices
/// that provide them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnmpSection {
    /// Section name
    pub name: &'static str,
    /// Subtree the columns are fetched from
    pub base: &'static str,
    /// Fetched columns, relative to `base`, in table column order
    pub oids: &'static [&'static str],
}

impl SnmpSection {
    /// The JUNIPER-MIB / JUNIPER-PFE-MIB section
    pub const fn pfememory() -> Self {
        Self {
            name: SECTION_NAME,
            base: SNMP_BASE,
            oids: &[OID_OPERATING_DESCR, OID_PFE_MEMORY_PERCENT_FREE],
        }
    }

    /// Returns the absolute OIDs of the fetched columns
    pub fn column_oids(&self) -> Vec<String> {
        self.oids
            .iter()
            .map(|oid| format!("{}.{}", self.base, oid))
            .collect()
    }

    /// Checks if a device exposing `oids` provides this section
    ///
    /// A device qualifies as soon as any OID exists below the base.
    pub fn detect<'a, I>(&self, oids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        oids.into_iter().any(|oid| oid_within(oid, self.base))
    }
}

/// Checks if `oid` equals `base` or lies in its subtree, compared on
/// whole components.
pub fn oid_within(oid: &str, base: &str) -> bool {
    let oid = oid.trim().trim_start_matches('.');
    let base = base.trim().trim_start_matches('.');

    match oid.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_oids() {
        let section = SnmpSection::pfememory();
        assert_eq!(section.name, "pfememory");
        assert_eq!(
            section.column_oids(),
            vec![
                ".1.3.6.1.4.1.2636.3.1.13.1.5.7".to_string(),
                ".1.3.6.1.4.1.2636.3.44.1.2.2.1.3".to_string(),
            ]
        );
    }

    #[test]
    fn test_oid_within() {
        assert!(oid_within(".1.3.6.1.4.1.2636.3", ".1.3.6.1.4.1.2636.3"));
        assert!(oid_within("1.3.6.1.4.1.2636.3.1.13.1.5.7.1.0.0", ".1.3.6.1.4.1.2636.3"));
        assert!(!oid_within(".1.3.6.1.4.1.2636.30.1", ".1.3.6.1.4.1.2636.3"));
        assert!(!oid_within(".1.3.6.1.4.1.9.9", ".1.3.6.1.4.1.2636.3"));
    }

    #[test]
    fn test_detect() {
        let section = SnmpSection::pfememory();
        assert!(section.detect([".1.3.6.1.2.1.1.1.0", ".1.3.6.1.4.1.2636.3.1.2.0"]));
        assert!(!section.detect([".1.3.6.1.2.1.1.1.0"]));
        assert!(!section.detect(Vec::<&str>::new()));
    }
}
