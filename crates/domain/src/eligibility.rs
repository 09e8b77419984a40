// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk-mutation eligibility.
//!
//! Standard operators may only touch numbers that have not yet been
//! resolved. Elevated operators (tenant super-operators) may touch anything.
//! The predicate is pure and is evaluated against the record as last seen;
//! callers must not cache its result against an id.

use crate::error::DomainError;
use crate::record::NumberRecord;
use crate::status::CallStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Privilege level of the calling operator.
///
/// Supplied by the identity service; never mutated by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privilege {
    /// Regular operator.
    #[default]
    Standard,
    /// Tenant super-operator allowed to correct resolved records.
    Elevated,
}

impl Privilege {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Elevated => "elevated",
        }
    }

    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::Elevated)
    }
}

impl FromStr for Privilege {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "elevated" => Ok(Self::Elevated),
            _ => Err(DomainError::InvalidPrivilege(s.to_string())),
        }
    }
}

/// Returns true if a number carrying `status` may be bulk-mutated at `privilege`.
///
/// A number with no recorded status counts as unresolved.
#[must_use]
pub const fn is_eligible_status(status: Option<CallStatus>, privilege: Privilege) -> bool {
    match (privilege, status) {
        (Privilege::Elevated, _) | (Privilege::Standard, None) => true,
        (Privilege::Standard, Some(status)) => status.is_pre_terminal(),
    }
}

/// Returns true if `record` may be part of a mutating selection at `privilege`.
#[must_use]
pub const fn is_eligible(record: &NumberRecord, privilege: Privilege) -> bool {
    is_eligible_status(record.status, privilege)
}

/// Returns true if a status filter only admits records eligible at `privilege`.
///
/// A missing status filter admits every status, so it is only scoped for
/// elevated callers.
#[must_use]
pub const fn is_scoped_status_filter(filter_status: Option<CallStatus>, privilege: Privilege) -> bool {
    match (privilege, filter_status) {
        (Privilege::Elevated, _) => true,
        (Privilege::Standard, None) => false,
        (Privilege::Standard, Some(status)) => status.is_pre_terminal(),
    }
}
