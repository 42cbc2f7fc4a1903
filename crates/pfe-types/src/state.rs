//! Monitoring service states.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result state of a check.
///
/// Variants are declared in worst-state order, so `Ord` can be used to
/// aggregate several results: OK < WARN < UNKNOWN < CRIT.
///
/// # Examples
///
/// ```
/// use pfe_types::State;
///
/// let worst = State::worst([State::Ok, State::Crit, State::Warn]);
/// assert_eq!(worst, State::Crit);
/// assert_eq!(worst.exit_code(), 2);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    #[default]
    Ok,
    Warn,
    Unknown,
    Crit,
}

impl State {
    /// Returns the Nagios plugin exit code for this state.
    pub const fn exit_code(&self) -> u8 {
        match self {
            State::Ok => 0,
            State::Warn => 1,
            State::Crit => 2,
            State::Unknown => 3,
        }
    }

    /// Returns the worst state of an iterator, or OK when it is empty.
    pub fn worst<I>(states: I) -> State
    where
        I: IntoIterator<Item = State>,
    {
        states.into_iter().max().unwrap_or_default()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Ok => "OK",
            State::Warn => "WARN",
            State::Unknown => "UNKNOWN",
            State::Crit => "CRIT",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for State {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OK" => Ok(State::Ok),
            "WARN" | "WARNING" => Ok(State::Warn),
            "CRIT" | "CRITICAL" => Ok(State::Crit),
            "UNKNOWN" => Ok(State::Unknown),
            _ => Err(ParseError::InvalidState(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_worst_state_ordering() {
        assert_eq!(State::worst([State::Ok, State::Warn]), State::Warn);
        assert_eq!(State::worst([State::Unknown, State::Warn]), State::Unknown);
        assert_eq!(State::worst([State::Unknown, State::Crit]), State::Crit);
        assert_eq!(State::worst(Vec::new()), State::Ok);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(State::Ok.exit_code(), 0);
        assert_eq!(State::Warn.exit_code(), 1);
        assert_eq!(State::Crit.exit_code(), 2);
        assert_eq!(State::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("critical".parse::<State>().unwrap(), State::Crit);
        assert_eq!("WARNING".parse::<State>().unwrap(), State::Warn);
        assert_eq!(State::Crit.to_string(), "CRIT");
        assert!("degraded".parse::<State>().is_err());
    }
}
