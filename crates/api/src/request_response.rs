// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use dialer_console::{ActionKind, BulkAction, BulkTarget};
use dialer_console_domain::NumberRecord;
use dialer_console_persistence::ImportReport;
use time::OffsetDateTime;

/// Query parameters shared by the listing and count endpoints.
///
/// Every value arrives as text so that malformed input is reported per
/// field instead of failing extraction as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ListNumbersQuery {
    pub status: Option<String>,
    pub global_status: Option<String>,
    pub search: Option<String>,
    /// ISO date (`YYYY-MM-DD`), inclusive.
    pub start_date: Option<String>,
    /// ISO date (`YYYY-MM-DD`), inclusive.
    pub end_date: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u32>,
    /// One of `created_at`, `last_attempt_at`, `status`, `total_attempts`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
}

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(value))
    }
}

/// What the calling operator may do with one listed number.
///
/// Advisory only. Bulk requests are re-checked when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NumberCapabilities {
    /// Whether the number may be re-labelled or reset.
    pub can_modify: Capability,
    /// Whether the number may be deleted.
    pub can_delete: Capability,
}

/// One phone number as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NumberResponse {
    pub id: i64,
    pub phone_number: String,
    pub status: Option<String>,
    pub global_status: String,
    pub total_attempts: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_attempt_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_status_change_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub assigned_at: Option<OffsetDateTime>,
    pub assigned_batch_id: Option<String>,
    pub note: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub capabilities: NumberCapabilities,
}

impl NumberResponse {
    #[must_use]
    pub fn from_record(record: NumberRecord, capabilities: NumberCapabilities) -> Self {
        Self {
            id: record.id.value(),
            phone_number: record.phone_number,
            status: record.status.map(|s| s.as_str().to_string()),
            global_status: record.global_status.as_str().to_string(),
            total_attempts: record.total_attempts,
            last_attempt_at: record.last_attempt_at,
            last_status_change_at: record.last_status_change_at,
            assigned_at: record.assigned_at,
            assigned_batch_id: record.assigned_batch_id,
            note: record.note,
            created_at: record.created_at,
            updated_at: record.updated_at,
            capabilities,
        }
    }
}

/// API response for one page of the number listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListNumbersResponse {
    /// The numbers in this window, in listing order.
    pub numbers: Vec<NumberResponse>,
    /// Offset the window starts at.
    pub skip: u64,
    /// Window size that was applied.
    pub limit: u32,
}

/// API response for the count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NumberStatsResponse {
    /// Numbers matching the filter.
    pub total: u64,
}

/// API request to apply one mutating action to a target set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkActionRequest {
    pub action: BulkAction,
    pub target: BulkTarget,
}

/// API response for a bulk action.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkActionResponse {
    pub action: ActionKind,
    /// Rows changed or removed.
    pub affected: u64,
    /// A success message.
    pub message: String,
}

/// API request to export a target set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExportNumbersRequest {
    pub target: BulkTarget,
}

/// API request to import raw phone numbers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportNumbersRequest {
    pub phone_numbers: Vec<String>,
}

/// API response for an import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportNumbersResponse {
    pub inserted: u64,
    pub duplicates: u64,
    pub invalid: u64,
    /// Up to five of the rejected raw entries.
    pub invalid_samples: Vec<String>,
}

impl From<ImportReport> for ImportNumbersResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            inserted: report.inserted,
            duplicates: report.duplicates,
            invalid: report.invalid,
            invalid_samples: report.invalid_samples,
        }
    }
}
