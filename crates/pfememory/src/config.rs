//! Check configuration.
//!
//! The cutoffs default to the levels the check has always used (WARN at or
//! below 15% free, CRIT at or below 10% free) and can be overridden from a
//! YAML file:
//!
//! ```yaml
//! thresholds:
//!   warn: 20
//!   crit: 10
//! ```

use pfe_types::State;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::{DEFAULT_CRIT_LEVEL, DEFAULT_WARN_LEVEL};
use crate::error::{PfeMemoryError, PfeMemoryResult};

/// Free memory cutoffs in percent, both inclusive.
///
/// The bands overlap: a reading at or below `crit` is also at or below
/// `warn`, so it falls into both the CRIT and the WARN band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// WARN when free memory is at or below this level.
    pub warn: i64,
    /// CRIT when free memory is at or below this level.
    pub crit: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn: DEFAULT_WARN_LEVEL,
            crit: DEFAULT_CRIT_LEVEL,
        }
    }
}

impl Thresholds {
    /// Creates thresholds from explicit levels.
    pub fn new(warn: i64, crit: i64) -> Self {
        Self { warn, crit }
    }

    /// Returns true if `value` falls into the band of `state`.
    ///
    /// UNKNOWN has no band.
    pub fn in_band(&self, state: State, value: i64) -> bool {
        match state {
            State::Crit => value <= self.crit,
            State::Warn => value <= self.warn,
            State::Ok => value > self.warn,
            State::Unknown => false,
        }
    }

    /// Validates the levels.
    pub fn validate(&self) -> PfeMemoryResult<()> {
        if !(0..=100).contains(&self.warn) {
            return Err(PfeMemoryError::invalid_config(
                "thresholds.warn",
                format!("{} is not a percentage", self.warn),
            ));
        }
        if !(0..=100).contains(&self.crit) {
            return Err(PfeMemoryError::invalid_config(
                "thresholds.crit",
                format!("{} is not a percentage", self.crit),
            ));
        }
        if self.crit > self.warn {
            return Err(PfeMemoryError::invalid_config(
                "thresholds",
                format!(
                    "crit level {} must not be above warn level {}",
                    self.crit, self.warn
                ),
            ));
        }
        Ok(())
    }
}

/// Top-level check configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PfeMemoryConfig {
    pub thresholds: Thresholds,
}

impl PfeMemoryConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> PfeMemoryResult<Self> {
        let config: PfeMemoryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> PfeMemoryResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| PfeMemoryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&contents)?;
        debug!(
            "Loaded configuration from {}: warn={} crit={}",
            path.display(),
            config.thresholds.warn,
            config.thresholds.crit
        );
        Ok(config)
    }

    /// Validates all sections.
    pub fn validate(&self) -> PfeMemoryResult<()> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.warn, 15);
        assert_eq!(thresholds.crit, 10);
        assert!(thresholds.validate().is_ok());
    }

    #[test]
    fn test_bands_overlap() {
        let t = Thresholds::default();
        assert!(t.in_band(State::Crit, 10));
        assert!(t.in_band(State::Warn, 10));
        assert!(!t.in_band(State::Ok, 10));

        assert!(!t.in_band(State::Crit, 15));
        assert!(t.in_band(State::Warn, 15));

        assert!(t.in_band(State::Ok, 16));
        assert!(!t.in_band(State::Unknown, 16));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = PfeMemoryConfig::from_yaml_str("thresholds:\n  warn: 25\n").unwrap();
        assert_eq!(config.thresholds, Thresholds::new(25, 10));
    }

    #[test]
    fn test_from_yaml_empty_document_uses_defaults() {
        let config = PfeMemoryConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, PfeMemoryConfig::default());
    }

    #[test]
    fn test_from_yaml_rejects_inverted_levels() {
        let err = PfeMemoryConfig::from_yaml_str("thresholds:\n  warn: 5\n  crit: 10\n")
            .unwrap_err();
        assert!(matches!(err, PfeMemoryError::InvalidConfig { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_out_of_range() {
        let err = Thresholds::new(150, 10).validate().unwrap_err();
        assert!(err.to_string().contains("thresholds.warn"));
    }

    #[test]
    fn test_from_yaml_syntax_error() {
        let err = PfeMemoryConfig::from_yaml_str("thresholds: [").unwrap_err();
        assert!(matches!(err, PfeMemoryError::ConfigParse(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "thresholds:\n  warn: 20\n  crit: 5").unwrap();

        let config = PfeMemoryConfig::load(file.path()).unwrap();
        assert_eq!(config.thresholds, Thresholds::new(20, 5));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PfeMemoryConfig::load("/nonexistent/pfememory.yaml").unwrap_err();
        assert!(matches!(err, PfeMemoryError::ConfigRead { .. }));
    }
}
