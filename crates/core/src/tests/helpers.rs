// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BulkAction, BulkOutcome, BulkTarget, ExportArtifact, NumberStore, StoreError};
use dialer_console_domain::{CallStatus, FilterCriteria, NumberId, NumberRecord};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use time::macros::datetime;

pub fn create_test_record(id: i64, status: Option<CallStatus>) -> NumberRecord {
    NumberRecord::queued(
        NumberId::new(id),
        &format!("0912{id:07}"),
        datetime!(2026-01-01 0:00 UTC),
    )
    .with_status(status)
}

/// Records with ids `first..first + count`, all carrying `status`.
pub fn create_test_records(first: i64, count: i64, status: CallStatus) -> Vec<NumberRecord> {
    (first..first + count)
        .map(|id| create_test_record(id, Some(status)))
        .collect()
}

/// In-memory store that records every call it receives.
///
/// Listing applies `FilterCriteria::matches` in insertion order. Bulk and
/// export answers default to success and can be scripted per call.
#[derive(Default)]
pub struct RecordingStore {
    records: Mutex<Vec<NumberRecord>>,
    count_override: Mutex<Option<u64>>,
    next_bulk: Mutex<Option<Result<BulkOutcome, StoreError>>>,
    next_export: Mutex<Option<Result<ExportArtifact, StoreError>>>,
    read_failure: Mutex<Option<StoreError>>,
    hold_bulk: AtomicBool,
    requests: Mutex<Vec<(BulkAction, BulkTarget)>>,
    list_limits: Mutex<Vec<u32>>,
    list_calls: AtomicUsize,
    count_calls: AtomicUsize,
    bulk_calls: AtomicUsize,
    export_calls: AtomicUsize,
}

impl RecordingStore {
    pub fn with_records(records: Vec<NumberRecord>) -> Self {
        let store: Self = Self::default();
        *store.records.lock().unwrap() = records;
        store
    }

    /// Makes `count` report `total` regardless of the records held.
    pub fn set_count(&self, total: u64) {
        *self.count_override.lock().unwrap() = Some(total);
    }

    pub fn set_status(&self, id: i64, status: Option<CallStatus>) {
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut().filter(|r| r.id == NumberId::new(id)) {
            record.status = status;
        }
    }

    pub fn script_bulk(&self, result: Result<BulkOutcome, StoreError>) {
        *self.next_bulk.lock().unwrap() = Some(result);
    }

    pub fn script_export(&self, result: Result<ExportArtifact, StoreError>) {
        *self.next_export.lock().unwrap() = Some(result);
    }

    /// While set, `bulk_mutate` never answers.
    pub fn hold_bulk(&self, hold: bool) {
        self.hold_bulk.store(hold, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, err: StoreError) {
        *self.read_failure.lock().unwrap() = Some(err);
    }

    pub fn requests(&self) -> Vec<(BulkAction, BulkTarget)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn list_limits(&self) -> Vec<u32> {
        self.list_limits.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    pub fn export_calls(&self) -> usize {
        self.export_calls.load(Ordering::SeqCst)
    }

    /// Calls of any kind that reached the store.
    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.count_calls() + self.bulk_calls() + self.export_calls()
    }

    fn read_failure(&self) -> Option<StoreError> {
        self.read_failure.lock().unwrap().clone()
    }
}

impl NumberStore for RecordingStore {
    async fn list(
        &self,
        filter: &FilterCriteria,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<NumberRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_limits.lock().unwrap().push(limit);
        if let Some(err) = self.read_failure() {
            return Err(err);
        }
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .skip(usize::try_from(offset).unwrap())
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &FilterCriteria) -> Result<u64, StoreError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.read_failure() {
            return Err(err);
        }
        if let Some(total) = *self.count_override.lock().unwrap() {
            return Ok(total);
        }
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|record| filter.matches(record)).count() as u64)
    }

    async fn bulk_mutate(
        &self,
        action: &BulkAction,
        target: &BulkTarget,
    ) -> Result<BulkOutcome, StoreError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((*action, target.clone()));
        if self.hold_bulk.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        self.next_bulk
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(BulkOutcome { affected: 1 }))
    }

    async fn export(&self, target: &BulkTarget) -> Result<ExportArtifact, StoreError> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((BulkAction::Export, target.clone()));
        self.next_export.lock().unwrap().take().unwrap_or_else(|| {
            Ok(ExportArtifact {
                bytes: b"phone_number\n09120000001\n".to_vec(),
                file_name: String::from("numbers_export.csv"),
                content_type: String::from("text/csv"),
                row_count: 1,
            })
        })
    }
}
