// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage collaborator contract.
//!
//! Storage owns the records and executes filters and bulk actions. The
//! engine only ever sends it a filter, an offset and a limit, or a single
//! `BulkTarget`.
//!
//! An `AllMatching` target is resolved against the live table when the
//! request arrives, not against the records that matched when the operator
//! pressed "select all". Rows inserted or changed in between may be swept
//! in or left out. `expected_total` is carried so storage can log or
//! reject gross drift, but it is advisory.

use crate::action::BulkAction;
use crate::target::BulkTarget;
use dialer_console_domain::{FilterCriteria, NumberRecord};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Records affected by a mutating bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub affected: u64,
}

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
    pub row_count: u64,
}

/// Failure reported by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Storage could not be reached. Retrying may help.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Storage refused the request.
    #[error("storage rejected the request: {0}")]
    Rejected(String),
    /// The target resolved to nothing.
    #[error("the selection no longer matches any number")]
    StaleSelection,
}

impl StoreError {
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Query and bulk-execution service for phone numbers.
pub trait NumberStore: Send + Sync {
    /// Returns at most `limit` records matching `filter`, in the filter's
    /// order, starting at `offset`.
    fn list(
        &self,
        filter: &FilterCriteria,
        offset: u64,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<NumberRecord>, StoreError>> + Send;

    /// Returns the number of records matching `filter`.
    fn count(&self, filter: &FilterCriteria)
    -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Applies a mutating action to every record of `target`.
    fn bulk_mutate(
        &self,
        action: &BulkAction,
        target: &BulkTarget,
    ) -> impl Future<Output = Result<BulkOutcome, StoreError>> + Send;

    /// Renders every record of `target` into a spreadsheet.
    fn export(
        &self,
        target: &BulkTarget,
    ) -> impl Future<Output = Result<ExportArtifact, StoreError>> + Send;
}
