// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use dialer_console::TargetShapeError;
use dialer_console_domain::DomainError;
use dialer_console_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<TargetShapeError> for ApiError {
    fn from(err: TargetShapeError) -> Self {
        Self::InvalidInput {
            field: String::from("target"),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCallStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown call status '{value}'"),
        },
        DomainError::InvalidGlobalStatus(value) => ApiError::InvalidInput {
            field: String::from("global_status"),
            message: format!("Unknown global status '{value}'"),
        },
        DomainError::InvalidSortKey(_) => ApiError::InvalidInput {
            field: String::from("sort_by"),
            message: err.to_string(),
        },
        DomainError::InvalidSortDirection(_) => ApiError::InvalidInput {
            field: String::from("sort_order"),
            message: err.to_string(),
        },
        DomainError::InvalidPrivilege(value) => ApiError::InvalidInput {
            field: String::from("privilege"),
            message: format!("Unknown privilege level '{value}'"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::DomainRuleViolation {
            rule: String::from("ordered_date_range"),
            message: format!("start_date {start} is after end_date {end}"),
        },
        DomainError::DateParseError {
            field, date_string, ..
        } => ApiError::InvalidInput {
            field,
            message: format!("Invalid date '{date_string}'. Expected YYYY-MM-DD"),
        },
        DomainError::InvalidPhoneNumber(raw) => ApiError::InvalidInput {
            field: String::from("phone_number"),
            message: format!("'{raw}' is not a valid mobile number"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures surface as `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UnscopedSelection => ApiError::DomainRuleViolation {
            rule: String::from("scoped_select_all"),
            message: err.to_string(),
        },
        PersistenceError::UnsupportedAction(action) => ApiError::InvalidInput {
            field: String::from("action"),
            message: format!("'{action}' is not a bulk mutation; use the export endpoint"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Phone number"),
            message,
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::InvalidStoredValue { .. }
        | PersistenceError::ExportFailed(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
