//! Verification helpers for service reports
//!
//! Provides assertion helpers to verify the outcome of a poll cycle

use pfememory::{ServiceReport, State};
use thiserror::Error;

/// Verification error types
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Expected service for item '{item}' not found")]
    ServiceNotFound { item: String },

    #[error("Unexpected service for item '{item}'")]
    UnexpectedService { item: String },

    #[error("State mismatch for '{item}': expected {expected}, got {actual}")]
    StateMismatch {
        item: String,
        expected: State,
        actual: State,
    },

    #[error("Expected {expected} results for '{item}', found {actual}")]
    ResultCountMismatch {
        item: String,
        expected: usize,
        actual: usize,
    },

    #[error("No {state} result with summary '{summary}' for '{item}'")]
    ResultNotFound {
        item: String,
        state: State,
        summary: String,
    },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Poll cycle verification helper
pub struct ReportVerifier<'a> {
    reports: &'a [ServiceReport],
}

impl<'a> ReportVerifier<'a> {
    /// Create a new verifier over the reports of one cycle
    pub fn new(reports: &'a [ServiceReport]) -> Self {
        Self { reports }
    }

    /// Find the report of an item
    pub fn report(&self, item: &str) -> VerifyResult<&'a ServiceReport> {
        self.reports
            .iter()
            .find(|r| r.item == item)
            .ok_or_else(|| VerificationError::ServiceNotFound {
                item: item.to_string(),
            })
    }

    /// Verify that no report exists for an item
    pub fn assert_not_discovered(&self, item: &str) -> VerifyResult<()> {
        if self.reports.iter().any(|r| r.item == item) {
            return Err(VerificationError::UnexpectedService {
                item: item.to_string(),
            });
        }
        Ok(())
    }

    /// Verify the aggregated state of a service
    pub fn assert_state(&self, item: &str, expected: State) -> VerifyResult<()> {
        let report = self.report(item)?;
        if report.state != expected {
            return Err(VerificationError::StateMismatch {
                item: item.to_string(),
                expected,
                actual: report.state,
            });
        }
        Ok(())
    }

    /// Verify the number of results of a service
    pub fn assert_result_count(&self, item: &str, expected: usize) -> VerifyResult<()> {
        let report = self.report(item)?;
        if report.results.len() != expected {
            return Err(VerificationError::ResultCountMismatch {
                item: item.to_string(),
                expected,
                actual: report.results.len(),
            });
        }
        Ok(())
    }

    /// Verify that a service emitted a result with the given state and summary
    pub fn assert_result(&self, item: &str, state: State, summary: &str) -> VerifyResult<()> {
        let report = self.report(item)?;
        if !report
            .results
            .iter()
            .any(|r| r.state == state && r.summary == summary)
        {
            return Err(VerificationError::ResultNotFound {
                item: item.to_string(),
                state,
                summary: summary.to_string(),
            });
        }
        Ok(())
    }
}
