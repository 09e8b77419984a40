// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use dialer_console::StoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A stored column holds a value the domain does not recognize.
    InvalidStoredValue { column: &'static str, value: String },
    /// A standard operator asked for a select-all that is not limited to
    /// modifiable statuses.
    UnscopedSelection,
    /// The action cannot be executed as a bulk mutation.
    UnsupportedAction(String),
    /// Rendering the export failed.
    ExportFailed(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::InvalidStoredValue { column, value } => {
                write!(f, "Invalid value '{value}' stored in column {column}")
            }
            Self::UnscopedSelection => write!(
                f,
                "Select-all requires a status filter limited to modifiable statuses"
            ),
            Self::UnsupportedAction(action) => {
                write!(f, "Action '{action}' cannot be applied as a bulk mutation")
            }
            Self::ExportFailed(msg) => write!(f, "Export failed: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(err: csv::Error) -> Self {
        Self::ExportFailed(err.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DatabaseError(_)
            | PersistenceError::DatabaseConnectionFailed(_)
            | PersistenceError::MigrationFailed(_)
            | PersistenceError::QueryFailed(_)
            | PersistenceError::InitializationError(_) => Self::Unavailable(err.to_string()),
            PersistenceError::NotFound(_)
            | PersistenceError::InvalidStoredValue { .. }
            | PersistenceError::UnscopedSelection
            | PersistenceError::UnsupportedAction(_)
            | PersistenceError::ExportFailed(_) => Self::Rejected(err.to_string()),
        }
    }
}
