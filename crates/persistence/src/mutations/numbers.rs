// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use dialer_console::{BulkAction, BulkTarget};
use dialer_console_domain::{
    CallStatus, GlobalStatus, NumberId, NumberRecord, Privilege, normalize_phone,
};
use num_traits::ToPrimitive;
use std::collections::HashSet;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{ImportReport, NewNumberRow, format_timestamp};
use crate::diesel_schema::phone_numbers;
use crate::error::PersistenceError;
use crate::queries::numbers::{
    ID_CHUNK_SIZE, existing_phone_numbers, get_number, resolve_target_ids,
};

/// Rejected raw entries echoed back in an import report.
const INVALID_SAMPLE_LIMIT: usize = 5;

fn to_count(rows: usize) -> Result<u64, PersistenceError> {
    rows.to_u64()
        .ok_or_else(|| PersistenceError::QueryFailed(format!("Row count {rows} out of range")))
}

fn update_chunk(
    conn: &mut SqliteConnection,
    action: &BulkAction,
    chunk: &[i64],
    now: &str,
) -> Result<usize, PersistenceError> {
    let rows = phone_numbers::table.filter(phone_numbers::id.eq_any(chunk.to_vec()));
    let affected: usize = match action {
        BulkAction::SetStatus { status } => diesel::update(rows)
            .set((
                phone_numbers::status.eq(Some(status.as_str())),
                phone_numbers::global_status
                    .eq(GlobalStatus::from_call_status(*status).as_str()),
                phone_numbers::last_status_change_at.eq(Some(now)),
                phone_numbers::updated_at.eq(now),
            ))
            .execute(conn)?,
        BulkAction::Reset => diesel::update(rows)
            .set((
                phone_numbers::status.eq(Some(CallStatus::InQueue.as_str())),
                phone_numbers::global_status.eq(GlobalStatus::Active.as_str()),
                phone_numbers::assigned_at.eq(None::<String>),
                phone_numbers::assigned_batch_id.eq(None::<String>),
                phone_numbers::last_status_change_at.eq(Some(now)),
                phone_numbers::updated_at.eq(now),
            ))
            .execute(conn)?,
        BulkAction::Delete => diesel::delete(rows).execute(conn)?,
        BulkAction::Export => {
            return Err(PersistenceError::UnsupportedAction(
                action.kind().to_string(),
            ));
        }
    };
    Ok(affected)
}

/// Applies a mutating bulk action to every row `target` resolves to.
///
/// Resolution and the writes share one immediate transaction. Rows a
/// standard operator may not modify are never touched.
///
/// # Returns
///
/// The number of rows changed or removed.
///
/// # Errors
///
/// Returns an error if the target is unscoped for `privilege`, the action
/// is not a mutation, or the database fails.
pub fn apply_bulk_action(
    conn: &mut SqliteConnection,
    action: &BulkAction,
    target: &BulkTarget,
    privilege: Privilege,
    now: OffsetDateTime,
) -> Result<u64, PersistenceError> {
    if !action.is_mutating() {
        return Err(PersistenceError::UnsupportedAction(
            action.kind().to_string(),
        ));
    }
    let now: String = format_timestamp(now)?;

    conn.immediate_transaction(|conn| {
        let ids: Vec<i64> = resolve_target_ids(conn, target, privilege)?;
        let mut affected: usize = 0;
        for chunk in ids.chunks(ID_CHUNK_SIZE) {
            affected += update_chunk(conn, action, chunk, &now)?;
        }
        info!(
            action = %action.kind(),
            select_all = target.is_select_all(),
            affected,
            "Applied bulk action"
        );
        to_count(affected)
    })
}

/// Records the outcome of a dial attempt reported by the dialer.
///
/// Increments the attempt counter, stamps the attempt time and syncs the
/// global status with the new call status.
///
/// # Errors
///
/// Returns `NotFound` if no number has `id`, or an error if the database fails.
pub fn record_call_attempt(
    conn: &mut SqliteConnection,
    id: NumberId,
    status: CallStatus,
    at: OffsetDateTime,
) -> Result<NumberRecord, PersistenceError> {
    let at: String = format_timestamp(at)?;

    conn.immediate_transaction(|conn| {
        let updated: usize = diesel::update(phone_numbers::table.find(id.value()))
            .set((
                phone_numbers::status.eq(Some(status.as_str())),
                phone_numbers::global_status
                    .eq(GlobalStatus::from_call_status(status).as_str()),
                phone_numbers::total_attempts.eq(phone_numbers::total_attempts + 1),
                phone_numbers::last_attempt_at.eq(Some(at.as_str())),
                phone_numbers::last_status_change_at.eq(Some(at.as_str())),
                phone_numbers::updated_at.eq(at.as_str()),
            ))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("Phone number {id}")));
        }
        debug!(%id, %status, "Recorded call attempt");
        get_number(conn, id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Phone number {id}")))
    })
}

/// Imports raw phone numbers, queuing every new, valid one.
///
/// Entries are normalized to the canonical mobile form first. Entries that
/// cannot be normalized are counted as invalid; entries already stored, or
/// repeated within the batch, are counted as duplicates.
///
/// # Errors
///
/// Returns an error if the database fails. Nothing is inserted in that case.
pub fn import_numbers(
    conn: &mut SqliteConnection,
    raw_numbers: &[String],
    now: OffsetDateTime,
) -> Result<ImportReport, PersistenceError> {
    let now: String = format_timestamp(now)?;
    let mut report: ImportReport = ImportReport::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates: Vec<String> = Vec::new();

    for raw in raw_numbers {
        match normalize_phone(raw) {
            Some(number) => {
                if seen.insert(number.clone()) {
                    candidates.push(number);
                } else {
                    report.duplicates += 1;
                }
            }
            None => {
                report.invalid += 1;
                if report.invalid_samples.len() < INVALID_SAMPLE_LIMIT {
                    report.invalid_samples.push(raw.clone());
                }
            }
        }
    }

    conn.immediate_transaction(|conn| {
        let existing: HashSet<String> = existing_phone_numbers(conn, &candidates)?;
        let new_rows: Vec<NewNumberRow> = candidates
            .into_iter()
            .filter(|number| !existing.contains(number))
            .map(|number| NewNumberRow::queued(number, &now))
            .collect();
        report.duplicates += to_count(existing.len())?;

        for chunk in new_rows.chunks(ID_CHUNK_SIZE) {
            let inserted: usize = diesel::insert_into(phone_numbers::table)
                .values(chunk)
                .execute(conn)?;
            report.inserted += to_count(inserted)?;
        }
        Ok::<(), PersistenceError>(())
    })?;

    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        invalid = report.invalid,
        "Imported phone numbers"
    );
    Ok(report)
}
