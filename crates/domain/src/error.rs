// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Call status string is not a known status.
    InvalidCallStatus(String),
    /// Global status string is not a known status.
    InvalidGlobalStatus(String),
    /// Sort key is not one of the supported keys.
    InvalidSortKey(String),
    /// Sort direction is neither `asc` nor `desc`.
    InvalidSortDirection(String),
    /// Privilege level string is not recognized.
    InvalidPrivilege(String),
    /// Date range start falls after its end.
    InvalidDateRange {
        /// The requested start date.
        start: time::Date,
        /// The requested end date.
        end: time::Date,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The field the date was supplied for.
        field: String,
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Phone number could not be normalized.
    InvalidPhoneNumber(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCallStatus(status) => write!(f, "Invalid call status: '{status}'"),
            Self::InvalidGlobalStatus(status) => {
                write!(f, "Invalid global status: '{status}'")
            }
            Self::InvalidSortKey(key) => write!(
                f,
                "Invalid sort key: '{key}'. Must be one of created_at, last_attempt_at, status, total_attempts"
            ),
            Self::InvalidSortDirection(direction) => {
                write!(
                    f,
                    "Invalid sort direction: '{direction}'. Must be 'asc' or 'desc'"
                )
            }
            Self::InvalidPrivilege(privilege) => {
                write!(f, "Invalid privilege level: '{privilege}'")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Date range start {start} is after end {end}")
            }
            Self::DateParseError {
                field,
                date_string,
                error,
            } => {
                write!(f, "Failed to parse {field} '{date_string}': {error}")
            }
            Self::InvalidPhoneNumber(raw) => write!(f, "Invalid phone number: '{raw}'"),
        }
    }
}

impl std::error::Error for DomainError {}
