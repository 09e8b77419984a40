// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use dialer_console_domain::{CallStatus, FilterCriteria, NumberId, SortDirection, SortKey};
use dialer_console_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedActor, Role};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin, false)
}

pub fn create_test_agent() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("agent-456"), Role::Agent, false)
}

pub fn create_test_superuser() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("super-789"), Role::Agent, true)
}

/// Ten queued numbers; the first two connected, the third missed.
///
/// Returns the persistence adapter and the ids in insertion order.
pub fn create_seeded_persistence() -> (Persistence, Vec<NumberId>) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let raw: Vec<String> = (1..=10).map(|n| format!("0912{n:07}")).collect();
    persistence.import_numbers(&raw).unwrap();

    let oldest_first: FilterCriteria =
        FilterCriteria::new().with_sort(SortKey::CreatedAt, SortDirection::Asc);
    let ids: Vec<NumberId> = persistence
        .list_numbers(&oldest_first, 0, 10)
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect();

    let at: OffsetDateTime = datetime!(2026-01-10 09:30 UTC);
    persistence
        .record_call_attempt(ids[0], CallStatus::Connected, at)
        .unwrap();
    persistence
        .record_call_attempt(ids[1], CallStatus::Connected, at)
        .unwrap();
    persistence
        .record_call_attempt(ids[2], CallStatus::Missed, at)
        .unwrap();

    (persistence, ids)
}
