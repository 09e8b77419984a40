// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use dialer_console::{
    BulkAction, BulkOutcome, BulkTarget, ExportArtifact, NumberStore, StoreError,
};
use dialer_console_domain::{FilterCriteria, NumberRecord, Privilege};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::Persistence;

/// `NumberStore` backed by the SQLite persistence layer.
///
/// Each store is bound to the privilege of the operator it serves, so
/// bulk actions are re-checked against that privilege inside the
/// database transaction.
#[derive(Clone)]
pub struct SqliteNumberStore {
    persistence: Arc<Mutex<Persistence>>,
    privilege: Privilege,
}

impl SqliteNumberStore {
    #[must_use]
    pub const fn new(persistence: Arc<Mutex<Persistence>>, privilege: Privilege) -> Self {
        Self {
            persistence,
            privilege,
        }
    }

    #[must_use]
    pub const fn privilege(&self) -> Privilege {
        self.privilege
    }
}

impl NumberStore for SqliteNumberStore {
    async fn list(
        &self,
        filter: &FilterCriteria,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<NumberRecord>, StoreError> {
        let mut persistence = self.persistence.lock().await;
        Ok(persistence.list_numbers(filter, offset, limit)?)
    }

    async fn count(&self, filter: &FilterCriteria) -> Result<u64, StoreError> {
        let mut persistence = self.persistence.lock().await;
        Ok(persistence.count_numbers(filter)?)
    }

    async fn bulk_mutate(
        &self,
        action: &BulkAction,
        target: &BulkTarget,
    ) -> Result<BulkOutcome, StoreError> {
        let mut persistence = self.persistence.lock().await;
        let affected: u64 = persistence.apply_bulk_action(action, target, self.privilege)?;
        Ok(BulkOutcome { affected })
    }

    async fn export(&self, target: &BulkTarget) -> Result<ExportArtifact, StoreError> {
        let mut persistence = self.persistence.lock().await;
        Ok(persistence.export_numbers(target)?)
    }
}
