// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod import_export_tests;
mod initialization_tests;
mod session_tests;

use dialer_console_domain::{CallStatus, FilterCriteria, NumberId, SortDirection, SortKey};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// Phone number seeded for index `n`.
pub fn test_phone(n: u32) -> String {
    format!("0912{n:07}")
}

/// A fixed attempt time on day `day` of January 2026.
pub fn attempt_at(day: u8) -> OffsetDateTime {
    datetime!(2026-01-01 12:00 UTC)
        .replace_day(day)
        .expect("valid January day")
}

/// Oldest first, so ids come back in insertion order.
pub fn insertion_order() -> FilterCriteria {
    FilterCriteria::new().with_sort(SortKey::CreatedAt, SortDirection::Asc)
}

/// Imports `count` numbers and returns their ids in insertion order.
pub fn seed_numbers(persistence: &mut Persistence, count: u32) -> Vec<NumberId> {
    let raw: Vec<String> = (1..=count).map(test_phone).collect();
    let report = persistence.import_numbers(&raw).unwrap();
    assert_eq!(report.inserted, u64::from(count));

    persistence
        .list_numbers(&insertion_order(), 0, count)
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect()
}

/// Records one attempt with `status` on `id`.
pub fn set_status(persistence: &mut Persistence, id: NumberId, status: CallStatus, day: u8) {
    persistence
        .record_call_attempt(id, status, attempt_at(day))
        .unwrap();
}
