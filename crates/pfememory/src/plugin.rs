//! Check plugin abstraction and the PFE memory plugin.

use pfe_types::State;
use tracing::{debug, error, info, instrument, warn};

use crate::check::check_pfememory;
use crate::config::PfeMemoryConfig;
use crate::error::PfeMemoryResult;
use crate::parser::parse_section;
use crate::section::SnmpSection;
use crate::types::{CheckResult, Section, Service, ServiceReport};
use crate::SERVICE_NAME_TEMPLATE;

/// Base trait for SNMP based check plugins.
///
/// A poll cycle parses the raw table once, discovers one service per item,
/// and checks each service against the parsed section.
///
/// # Example
///
/// ```
/// use pfememory::{string_table, CheckPlugin, PfeMemoryPlugin};
///
/// let plugin = PfeMemoryPlugin::default();
/// let table = string_table![["79", "99", "FPC: MPC4E 3D 32XGE @ 0/*/*"]];
///
/// let reports = plugin.run(&table);
/// assert_eq!(reports.len(), 1);
/// assert_eq!(
///     reports[0].service_name,
///     "PFE FPC: MPC4E 3D 32XGE @ 0/*/* Free Memory Memory Utilization"
/// );
/// ```
pub trait CheckPlugin: Send + Sync {
    /// Parsed representation of the raw table.
    type Section;

    /// Returns the plugin name (for logging and registration).
    fn name(&self) -> &str;

    /// Returns the SNMP section this plugin consumes.
    fn snmp_section(&self) -> &SnmpSection;

    /// Renders the service description for an item.
    fn service_name(&self, item: &str) -> String;

    /// Parses the raw string table.
    fn parse(&self, table: &[Vec<String>]) -> Self::Section;

    /// Lists the services found in a parsed section.
    fn discover(&self, section: &Self::Section) -> Vec<Service>;

    /// Checks one item.
    ///
    /// Unknown items return no results. Errors propagate to the caller.
    fn check(&self, item: &str, section: &Self::Section) -> PfeMemoryResult<Vec<CheckResult>>;

    /// Runs a full poll cycle over a raw table.
    ///
    /// Failed checks are reported as UNKNOWN with the error text.
    fn run(&self, table: &[Vec<String>]) -> Vec<ServiceReport> {
        let section = self.parse(table);
        let services = self.discover(&section);
        debug!("{}: discovered {} services", self.name(), services.len());

        services
            .into_iter()
            .map(|service| {
                let service_name = self.service_name(&service.item);
                match self.check(&service.item, &section) {
                    Ok(results) => ServiceReport::from_results(service.item, service_name, results),
                    Err(e) => {
                        if e.is_malformed_data() {
                            warn!("{}: {}", service_name, e);
                        } else {
                            error!("{}: {}", service_name, e);
                        }
                        ServiceReport::failed(service.item, service_name, e.to_string())
                    }
                }
            })
            .collect()
    }
}

/// PFE free memory check for Juniper line cards.
#[derive(Debug, Clone)]
pub struct PfeMemoryPlugin {
    config: PfeMemoryConfig,
    section: SnmpSection,
}

impl PfeMemoryPlugin {
    /// Creates a plugin with the given configuration
    pub fn new(config: PfeMemoryConfig) -> Self {
        info!(
            "PFE memory levels: warn at {}%, crit at {}%",
            config.thresholds.warn, config.thresholds.crit
        );
        Self {
            config,
            section: SnmpSection::pfememory(),
        }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &PfeMemoryConfig {
        &self.config
    }
}

impl Default for PfeMemoryPlugin {
    fn default() -> Self {
        Self::new(PfeMemoryConfig::default())
    }
}

impl CheckPlugin for PfeMemoryPlugin {
    type Section = Section;

    fn name(&self) -> &str {
        self.section.name
    }

    fn snmp_section(&self) -> &SnmpSection {
        &self.section
    }

    fn service_name(&self, item: &str) -> String {
        SERVICE_NAME_TEMPLATE.replace("%s", item)
    }

    fn parse(&self, table: &[Vec<String>]) -> Section {
        parse_section(table)
    }

    fn discover(&self, section: &Section) -> Vec<Service> {
        section.keys().map(Service::new).collect()
    }

    #[instrument(skip(self, section))]
    fn check(&self, item: &str, section: &Section) -> PfeMemoryResult<Vec<CheckResult>> {
        check_pfememory(item, section, &self.config.thresholds)
    }
}

/// Returns the worst state over a set of reports, OK when there are none.
pub fn worst_state(reports: &[ServiceReport]) -> State {
    State::worst(reports.iter().map(|r| r.state))
}
