// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use dialer_console_domain::{CallStatus, GlobalStatus, NumberId, NumberRecord};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::diesel_schema::phone_numbers;
use crate::error::PersistenceError;

/// Stored timestamp layout. Fixed width, always UTC.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::QueryFailed(format!("Failed to format timestamp: {e}")))
}

fn parse_timestamp(column: &'static str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| PersistenceError::InvalidStoredValue {
            column,
            value: value.to_string(),
        })
}

fn parse_optional_timestamp(
    column: &'static str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(|v| parse_timestamp(column, v)).transpose()
}

/// Diesel Queryable struct for phone number rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = phone_numbers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NumberRow {
    pub id: i64,
    pub phone_number: String,
    pub status: Option<String>,
    pub global_status: String,
    pub total_attempts: i32,
    pub last_attempt_at: Option<String>,
    pub last_status_change_at: Option<String>,
    pub assigned_at: Option<String>,
    pub assigned_batch_id: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NumberRow {
    /// Converts a stored row into a domain record.
    ///
    /// # Errors
    ///
    /// Returns an error if any column holds a value the domain rejects.
    pub fn into_record(self) -> Result<NumberRecord, PersistenceError> {
        let status: Option<CallStatus> = self
            .status
            .as_deref()
            .map(|s| {
                CallStatus::from_str(s).map_err(|_| PersistenceError::InvalidStoredValue {
                    column: "status",
                    value: s.to_string(),
                })
            })
            .transpose()?;
        let global_status: GlobalStatus =
            GlobalStatus::from_str(&self.global_status).map_err(|_| {
                PersistenceError::InvalidStoredValue {
                    column: "global_status",
                    value: self.global_status.clone(),
                }
            })?;
        let total_attempts: u32 =
            self.total_attempts
                .to_u32()
                .ok_or_else(|| PersistenceError::InvalidStoredValue {
                    column: "total_attempts",
                    value: self.total_attempts.to_string(),
                })?;

        Ok(NumberRecord {
            id: NumberId::new(self.id),
            phone_number: self.phone_number,
            status,
            global_status,
            total_attempts,
            last_attempt_at: parse_optional_timestamp(
                "last_attempt_at",
                self.last_attempt_at.as_deref(),
            )?,
            last_status_change_at: parse_optional_timestamp(
                "last_status_change_at",
                self.last_status_change_at.as_deref(),
            )?,
            assigned_at: parse_optional_timestamp("assigned_at", self.assigned_at.as_deref())?,
            assigned_batch_id: self.assigned_batch_id,
            note: self.note,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}

/// Diesel Insertable struct for newly imported numbers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = phone_numbers)]
pub struct NewNumberRow {
    pub phone_number: String,
    pub status: String,
    pub global_status: String,
    pub total_attempts: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl NewNumberRow {
    /// A freshly queued number with no attempt history.
    pub fn queued(phone_number: String, now: &str) -> Self {
        Self {
            phone_number,
            status: CallStatus::InQueue.as_str().to_string(),
            global_status: GlobalStatus::Active.as_str().to_string(),
            total_attempts: 0,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

/// Summary of an import batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Numbers added to the table.
    pub inserted: u64,
    /// Numbers already present in the table or repeated within the batch.
    pub duplicates: u64,
    /// Entries that could not be normalized.
    pub invalid: u64,
    /// Up to five of the rejected raw entries.
    pub invalid_samples: Vec<String>,
}

/// One line of the CSV export.
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub phone_number: &'a str,
    pub status: &'a str,
    pub global_status: &'a str,
    pub total_attempts: i32,
    pub last_attempt_at: &'a str,
    pub last_status_change_at: &'a str,
    pub assigned_batch_id: &'a str,
    pub note: &'a str,
    pub created_at: &'a str,
}

impl<'a> From<&'a NumberRow> for ExportRow<'a> {
    fn from(row: &'a NumberRow) -> Self {
        Self {
            phone_number: &row.phone_number,
            status: row.status.as_deref().unwrap_or_default(),
            global_status: &row.global_status,
            total_attempts: row.total_attempts,
            last_attempt_at: row.last_attempt_at.as_deref().unwrap_or_default(),
            last_status_change_at: row.last_status_change_at.as_deref().unwrap_or_default(),
            assigned_batch_id: row.assigned_batch_id.as_deref().unwrap_or_default(),
            note: row.note.as_deref().unwrap_or_default(),
            created_at: &row.created_at,
        }
    }
}
