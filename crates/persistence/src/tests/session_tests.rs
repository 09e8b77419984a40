// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A console session driven end to end against the `SQLite` store.

use dialer_console::{
    ActionError, ActionKind, ActionOutcome, BulkAction, Confirmation, ConsoleSession, Selection,
    SessionConfig,
};
use dialer_console_domain::{CallStatus, FilterCriteria, NumberId, Privilege};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{create_test_persistence, seed_numbers, set_status};
use crate::{Persistence, SqliteNumberStore};

/// 30 numbers, the first five of them connected.
fn seeded_store(privilege: Privilege) -> (Arc<Mutex<Persistence>>, SqliteNumberStore) {
    let mut persistence: Persistence = create_test_persistence();
    let seeded: Vec<NumberId> = seed_numbers(&mut persistence, 30);
    for id in &seeded[..5] {
        set_status(&mut persistence, *id, CallStatus::Connected, 5);
    }
    let shared: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));
    let store: SqliteNumberStore = SqliteNumberStore::new(Arc::clone(&shared), privilege);
    (shared, store)
}

async fn open_session(store: SqliteNumberStore) -> ConsoleSession<SqliteNumberStore> {
    let privilege: Privilege = store.privilege();
    let mut session: ConsoleSession<SqliteNumberStore> = ConsoleSession::new(
        Arc::new(store),
        privilege,
        SessionConfig::new().with_page_size(10),
    );
    session.refresh().await.unwrap();
    session
}

fn visible_ids(session: &ConsoleSession<SqliteNumberStore>) -> Vec<NumberId> {
    session
        .page()
        .map(|page| page.records.iter().map(|record| record.id).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_select_all_with_exclusion_deletes_through_sqlite() {
    let (shared, store) = seeded_store(Privilege::Standard);
    let mut session: ConsoleSession<SqliteNumberStore> = open_session(store).await;
    assert_eq!(session.total(), Some(30));

    session
        .set_status_filter(Some(CallStatus::InQueue))
        .await
        .unwrap();
    assert_eq!(session.total(), Some(25));

    assert!(session.select_all_matching());
    let kept: NumberId = visible_ids(&session)[0];
    assert!(session.toggle_row(kept));
    assert_eq!(session.selected_count(), 24);

    let outcome: ActionOutcome = session
        .execute(BulkAction::Delete, Confirmation::Confirmed)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Mutated {
            action: ActionKind::Delete,
            affected: 24
        }
    );
    assert_eq!(session.selection(), &Selection::None);
    assert_eq!(session.total(), Some(1));
    assert_eq!(visible_ids(&session), vec![kept]);

    let remaining: u64 = shared
        .lock()
        .await
        .count_numbers(&FilterCriteria::new())
        .unwrap();
    assert_eq!(remaining, 6);
}

#[tokio::test]
async fn test_explicit_set_status_moves_rows_out_of_filter() {
    let (_shared, store) = seeded_store(Privilege::Standard);
    let mut session: ConsoleSession<SqliteNumberStore> = open_session(store).await;
    session
        .set_status_filter(Some(CallStatus::InQueue))
        .await
        .unwrap();

    session.toggle_current_page();
    assert_eq!(session.selected_count(), 10);

    session
        .execute(
            BulkAction::SetStatus {
                status: CallStatus::Missed,
            },
            Confirmation::Unconfirmed,
        )
        .await
        .unwrap();

    assert_eq!(session.total(), Some(15));
    assert!(session.selection().is_none());
}

#[tokio::test]
async fn test_standard_operator_cannot_select_all_unfiltered() {
    let (shared, store) = seeded_store(Privilege::Standard);
    let mut session: ConsoleSession<SqliteNumberStore> = open_session(store).await;

    assert!(session.select_all_matching());
    let result: Result<ActionOutcome, ActionError> =
        session.execute(BulkAction::Reset, Confirmation::Confirmed).await;

    assert_eq!(result, Err(ActionError::UnscopedBulkFilter));
    assert_eq!(session.selected_count(), 30, "a local refusal keeps the selection");
    let connected: FilterCriteria = FilterCriteria::new().with_status(Some(CallStatus::Connected));
    assert_eq!(shared.lock().await.count_numbers(&connected).unwrap(), 5);
}

#[tokio::test]
async fn test_elevated_operator_exports_selection_and_keeps_it() {
    let (_shared, store) = seeded_store(Privilege::Elevated);
    let mut session: ConsoleSession<SqliteNumberStore> = open_session(store).await;

    assert!(session.select_all_matching());
    let outcome: ActionOutcome = session
        .execute(BulkAction::Export, Confirmation::Unconfirmed)
        .await
        .unwrap();

    match outcome {
        ActionOutcome::Exported(artifact) => assert_eq!(artifact.row_count, 30),
        ActionOutcome::Mutated { .. } => panic!("export must not mutate"),
    }
    assert_eq!(session.selected_count(), 30);
}

#[tokio::test]
async fn test_select_all_emptied_underneath_is_stale() {
    let (shared, store) = seeded_store(Privilege::Standard);
    let mut session: ConsoleSession<SqliteNumberStore> = open_session(store).await;
    session
        .set_status_filter(Some(CallStatus::InQueue))
        .await
        .unwrap();
    assert!(session.select_all_matching());

    let everything_queued: Vec<NumberId> = shared
        .lock()
        .await
        .list_numbers(&FilterCriteria::new().with_status(Some(CallStatus::InQueue)), 0, 100)
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect();
    for id in everything_queued {
        set_status(&mut *shared.lock().await, id, CallStatus::Busy, 7);
    }

    let result: Result<ActionOutcome, ActionError> =
        session.execute(BulkAction::Reset, Confirmation::Unconfirmed).await;

    assert_eq!(
        result,
        Err(ActionError::StaleSelection {
            action: ActionKind::Reset
        })
    );
    assert!(session.selection().is_none());
    assert_eq!(session.total(), Some(0));
}
