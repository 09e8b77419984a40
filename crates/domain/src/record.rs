// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::{CallStatus, GlobalStatus};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Opaque identity of a phone number record.
///
/// Assigned by the storage layer. The console never invents ids; it only
/// carries ids it has observed in fetched pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberId(i64);

impl NumberId {
    /// Wraps a storage-assigned identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for NumberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A phone number as held by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRecord {
    /// Storage identity.
    pub id: NumberId,
    /// The normalized phone number (`09XXXXXXXXX`).
    pub phone_number: String,
    /// Most recent call outcome; `None` when nothing has been recorded.
    pub status: Option<CallStatus>,
    /// Cross-campaign standing.
    pub global_status: GlobalStatus,
    /// Number of dial attempts made so far.
    pub total_attempts: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_attempt_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_status_change_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub assigned_at: Option<OffsetDateTime>,
    /// Dialer batch currently holding this number, if any.
    pub assigned_batch_id: Option<String>,
    /// Free-form operator annotation.
    pub note: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl NumberRecord {
    /// Creates a freshly queued record with no attempt history.
    #[must_use]
    pub fn queued(id: NumberId, phone_number: &str, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            phone_number: phone_number.to_string(),
            status: Some(CallStatus::InQueue),
            global_status: GlobalStatus::Active,
            total_attempts: 0,
            last_attempt_at: None,
            last_status_change_at: None,
            assigned_at: None,
            assigned_batch_id: None,
            note: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns a copy of this record carrying a different status.
    #[must_use]
    pub fn with_status(mut self, status: Option<CallStatus>) -> Self {
        self.status = status;
        self
    }
}
