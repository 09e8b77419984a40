// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Call status tracking for phone numbers.
//!
//! A phone number carries the outcome of its most recent call attempt as a
//! `CallStatus`, plus a coarser `GlobalStatus` that survives across
//! campaigns. Statuses are closed enumerations; the string forms are the
//! persisted and wire representations.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of the most recent call attempt for a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    /// Waiting to be dialed.
    InQueue,
    /// Dialed, nobody answered.
    Missed,
    /// Call was answered and completed.
    Connected,
    /// The dialer reported an error.
    Failed,
    /// Callee declined the offer.
    NotInterested,
    /// Callee hung up.
    Hangup,
    /// Call dropped before completion.
    Disconnected,
    /// Line was busy.
    Busy,
    /// Handset unreachable / powered off.
    PowerOff,
    /// Number is blocked by the carrier.
    Banned,
    /// Outcome could not be determined.
    Unknown,
    /// Callee filed a complaint.
    Complained,
}

impl CallStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::InQueue,
        Self::Missed,
        Self::Connected,
        Self::Failed,
        Self::NotInterested,
        Self::Hangup,
        Self::Disconnected,
        Self::Busy,
        Self::PowerOff,
        Self::Banned,
        Self::Unknown,
        Self::Complained,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InQueue => "IN_QUEUE",
            Self::Missed => "MISSED",
            Self::Connected => "CONNECTED",
            Self::Failed => "FAILED",
            Self::NotInterested => "NOT_INTERESTED",
            Self::Hangup => "HANGUP",
            Self::Disconnected => "DISCONNECTED",
            Self::Busy => "BUSY",
            Self::PowerOff => "POWER_OFF",
            Self::Banned => "BANNED",
            Self::Unknown => "UNKNOWN",
            Self::Complained => "COMPLAINED",
        }
    }

    /// Returns true if the number has not yet been successfully resolved.
    ///
    /// Pre-terminal numbers may be re-queued, re-labelled or removed by any
    /// operator. Everything else carries a recorded outcome.
    #[must_use]
    pub const fn is_pre_terminal(&self) -> bool {
        matches!(
            self,
            Self::InQueue | Self::Missed | Self::Busy | Self::PowerOff | Self::Banned
        )
    }

    /// Returns the statuses considered pre-terminal.
    #[must_use]
    pub fn pre_terminal() -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(Self::is_pre_terminal)
            .collect()
    }
}

impl FromStr for CallStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidCallStatus(s.to_string()))
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cross-campaign standing of a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalStatus {
    /// Number can be dialed.
    #[default]
    Active,
    /// Number was last seen powered off.
    PowerOff,
    /// Callee complained; number should not be dialed again.
    Complained,
}

impl GlobalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::PowerOff => "POWER_OFF",
            Self::Complained => "COMPLAINED",
        }
    }

    /// Derives the global status that follows from a call outcome.
    ///
    /// Only `POWER_OFF` and `COMPLAINED` carry over; every other outcome
    /// returns the number to `ACTIVE`.
    #[must_use]
    pub const fn from_call_status(status: CallStatus) -> Self {
        match status {
            CallStatus::PowerOff => Self::PowerOff,
            CallStatus::Complained => Self::Complained,
            _ => Self::Active,
        }
    }
}

impl FromStr for GlobalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "POWER_OFF" => Ok(Self::PowerOff),
            "COMPLAINED" => Ok(Self::Complained),
            _ => Err(DomainError::InvalidGlobalStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for GlobalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in CallStatus::ALL {
            match CallStatus::from_str(status.as_str()) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {}: {e}", status.as_str()),
            }
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(CallStatus::from_str("power_off"), Ok(CallStatus::PowerOff));
        assert_eq!(CallStatus::from_str(" in_queue "), Ok(CallStatus::InQueue));
    }

    #[test]
    fn test_invalid_status_string() {
        assert!(CallStatus::from_str("ringing").is_err());
        assert!(GlobalStatus::from_str("dormant").is_err());
    }

    #[test]
    fn test_pre_terminal_subset() {
        assert_eq!(
            CallStatus::pre_terminal(),
            vec![
                CallStatus::InQueue,
                CallStatus::Missed,
                CallStatus::Busy,
                CallStatus::PowerOff,
                CallStatus::Banned,
            ]
        );
        assert!(!CallStatus::Connected.is_pre_terminal());
        assert!(!CallStatus::Disconnected.is_pre_terminal());
        assert!(!CallStatus::Failed.is_pre_terminal());
    }

    #[test]
    fn test_global_status_follows_power_off() {
        assert_eq!(
            GlobalStatus::from_call_status(CallStatus::PowerOff),
            GlobalStatus::PowerOff
        );
    }

    #[test]
    fn test_global_status_follows_complaint() {
        assert_eq!(
            GlobalStatus::from_call_status(CallStatus::Complained),
            GlobalStatus::Complained
        );
    }

    #[test]
    fn test_global_status_returns_to_active_for_other_outcomes() {
        assert_eq!(
            GlobalStatus::from_call_status(CallStatus::Missed),
            GlobalStatus::Active
        );
        assert_eq!(
            GlobalStatus::from_call_status(CallStatus::Connected),
            GlobalStatus::Active
        );
    }

    #[test]
    fn test_serde_uses_screaming_case() {
        assert_eq!(
            serde_json::to_string(&CallStatus::NotInterested).ok(),
            Some(String::from("\"NOT_INTERESTED\""))
        );
    }
}
