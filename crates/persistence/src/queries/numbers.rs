// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone number queries.
//!
//! Every listing, count and bulk target resolution is built from the same
//! boxed filter so that what the operator saw and what a select-all acts on
//! are the same predicate.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use dialer_console::BulkTarget;
use dialer_console_domain::{
    CallStatus, FilterCriteria, NumberId, NumberRecord, Privilege, SortDirection, SortKey,
};
use num_traits::ToPrimitive;
use std::collections::HashSet;
use time::macros::time;
use time::{Date, PrimitiveDateTime, Time};
use tracing::debug;

use crate::data_models::{NumberRow, format_timestamp};
use crate::diesel_schema::phone_numbers;
use crate::error::PersistenceError;

/// Upper bound on ids bound into a single `IN (...)` clause.
pub const ID_CHUNK_SIZE: usize = 500;

type BoxedNumberQuery<'a> = phone_numbers::BoxedQuery<'a, Sqlite>;

/// Escapes `LIKE` wildcards so the search text matches literally.
fn escape_like(search: &str) -> String {
    let mut escaped: String = String::with_capacity(search.len());
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn day_bound(date: Date, end_of_day: bool) -> Result<String, PersistenceError> {
    let clock: Time = if end_of_day {
        time!(23:59:59)
    } else {
        time!(00:00:00)
    };
    format_timestamp(PrimitiveDateTime::new(date, clock).assume_utc())
}

fn pre_terminal_strings() -> Vec<&'static str> {
    CallStatus::pre_terminal()
        .iter()
        .map(CallStatus::as_str)
        .collect()
}

/// Builds the predicate part of `filter` as a boxed query.
fn filtered(filter: &FilterCriteria) -> Result<BoxedNumberQuery<'static>, PersistenceError> {
    let mut query: BoxedNumberQuery<'static> = phone_numbers::table.into_boxed();

    if let Some(status) = filter.status() {
        query = query.filter(phone_numbers::status.eq(status.as_str()));
    }
    if let Some(global_status) = filter.global_status() {
        query = query.filter(phone_numbers::global_status.eq(global_status.as_str()));
    }
    if let Some(search) = filter.search() {
        let pattern: String = format!("%{}%", escape_like(search));
        query = query.filter(phone_numbers::phone_number.like(pattern).escape('\\'));
    }
    if let Some(range) = filter.date_range() {
        if let Some(start) = range.start() {
            query = query.filter(phone_numbers::last_attempt_at.ge(day_bound(start, false)?));
        }
        if let Some(end) = range.end() {
            query = query.filter(phone_numbers::last_attempt_at.le(day_bound(end, true)?));
        }
    }
    Ok(query)
}

/// Restricts a query to rows a standard operator may modify.
fn eligible_only(query: BoxedNumberQuery<'static>) -> BoxedNumberQuery<'static> {
    query.filter(
        phone_numbers::status
            .is_null()
            .or(phone_numbers::status.eq_any(pre_terminal_strings())),
    )
}

/// Applies the filter's ordering, breaking ties by id.
fn sorted(query: BoxedNumberQuery<'static>, filter: &FilterCriteria) -> BoxedNumberQuery<'static> {
    match (filter.sort_key(), filter.sort_direction()) {
        (SortKey::CreatedAt, SortDirection::Asc) => {
            query.order((phone_numbers::created_at.asc(), phone_numbers::id.asc()))
        }
        (SortKey::CreatedAt, SortDirection::Desc) => {
            query.order((phone_numbers::created_at.desc(), phone_numbers::id.desc()))
        }
        (SortKey::LastAttemptAt, SortDirection::Asc) => {
            query.order((phone_numbers::last_attempt_at.asc(), phone_numbers::id.asc()))
        }
        (SortKey::LastAttemptAt, SortDirection::Desc) => {
            query.order((phone_numbers::last_attempt_at.desc(), phone_numbers::id.desc()))
        }
        (SortKey::Status, SortDirection::Asc) => {
            query.order((phone_numbers::status.asc(), phone_numbers::id.asc()))
        }
        (SortKey::Status, SortDirection::Desc) => {
            query.order((phone_numbers::status.desc(), phone_numbers::id.desc()))
        }
        (SortKey::TotalAttempts, SortDirection::Asc) => {
            query.order((phone_numbers::total_attempts.asc(), phone_numbers::id.asc()))
        }
        (SortKey::TotalAttempts, SortDirection::Desc) => {
            query.order((phone_numbers::total_attempts.desc(), phone_numbers::id.desc()))
        }
    }
}

/// Lists one page of numbers matching `filter`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_numbers(
    conn: &mut SqliteConnection,
    filter: &FilterCriteria,
    offset: u64,
    limit: u32,
) -> Result<Vec<NumberRecord>, PersistenceError> {
    let offset: i64 = offset
        .to_i64()
        .ok_or_else(|| PersistenceError::QueryFailed(format!("Offset {offset} out of range")))?;

    let rows: Vec<NumberRow> = sorted(filtered(filter)?, filter)
        .offset(offset)
        .limit(i64::from(limit))
        .select(NumberRow::as_select())
        .load(conn)?;

    debug!(rows = rows.len(), offset, limit, "Listed phone numbers");
    rows.into_iter().map(NumberRow::into_record).collect()
}

/// Counts numbers matching `filter`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_numbers(
    conn: &mut SqliteConnection,
    filter: &FilterCriteria,
) -> Result<u64, PersistenceError> {
    let count: i64 = filtered(filter)?.count().get_result(conn)?;
    count
        .to_u64()
        .ok_or_else(|| PersistenceError::QueryFailed(format!("Negative count {count}")))
}

/// Retrieves a single number by id.
///
/// # Errors
///
/// Returns an error if the query fails. Returns `Ok(None)` if no such number exists.
pub fn get_number(
    conn: &mut SqliteConnection,
    id: NumberId,
) -> Result<Option<NumberRecord>, PersistenceError> {
    phone_numbers::table
        .filter(phone_numbers::id.eq(id.value()))
        .select(NumberRow::as_select())
        .first(conn)
        .optional()?
        .map(NumberRow::into_record)
        .transpose()
}

/// Resolves a bulk target to the ids it covers right now.
///
/// Standard operators only ever resolve to rows they may modify; anything
/// else is skipped. A standard select-all must carry a status filter that
/// is itself limited to modifiable statuses.
///
/// # Errors
///
/// Returns `UnscopedSelection` for an unscoped standard select-all, or an
/// error if the query fails.
pub fn resolve_target_ids(
    conn: &mut SqliteConnection,
    target: &BulkTarget,
    privilege: Privilege,
) -> Result<Vec<i64>, PersistenceError> {
    let restrict = |query: BoxedNumberQuery<'static>| {
        if privilege.is_elevated() {
            query
        } else {
            eligible_only(query)
        }
    };

    match target {
        BulkTarget::Explicit { ids } => {
            let raw: Vec<i64> = ids.iter().map(NumberId::value).collect();
            let mut resolved: Vec<i64> = Vec::with_capacity(raw.len());
            for chunk in raw.chunks(ID_CHUNK_SIZE) {
                let found: Vec<i64> = restrict(phone_numbers::table.into_boxed())
                    .filter(phone_numbers::id.eq_any(chunk.to_vec()))
                    .select(phone_numbers::id)
                    .load(conn)?;
                resolved.extend(found);
            }
            resolved.sort_unstable();
            resolved.dedup();
            Ok(resolved)
        }
        BulkTarget::AllMatching {
            excluded_ids,
            filter,
            expected_total,
        } => {
            if !dialer_console_domain::is_scoped_status_filter(filter.status(), privilege) {
                return Err(PersistenceError::UnscopedSelection);
            }
            let excluded: HashSet<i64> = excluded_ids.iter().map(NumberId::value).collect();
            let matching: Vec<i64> = restrict(filtered(filter)?)
                .select(phone_numbers::id)
                .order(phone_numbers::id.asc())
                .load(conn)?;
            let resolved: Vec<i64> = matching
                .into_iter()
                .filter(|id| !excluded.contains(id))
                .collect();
            debug!(
                expected_total,
                excluded = excluded.len(),
                resolved = resolved.len(),
                "Resolved select-all target"
            );
            Ok(resolved)
        }
    }
}

/// Loads the rows an export of `target` covers, in listing order.
///
/// Explicit targets are ordered by id; select-all targets follow the
/// snapshot's sort.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn export_rows(
    conn: &mut SqliteConnection,
    target: &BulkTarget,
) -> Result<Vec<NumberRow>, PersistenceError> {
    match target {
        BulkTarget::Explicit { ids } => {
            let raw: Vec<i64> = ids.iter().map(NumberId::value).collect();
            let mut rows: Vec<NumberRow> = Vec::with_capacity(raw.len());
            for chunk in raw.chunks(ID_CHUNK_SIZE) {
                let found: Vec<NumberRow> = phone_numbers::table
                    .filter(phone_numbers::id.eq_any(chunk.to_vec()))
                    .select(NumberRow::as_select())
                    .load(conn)?;
                rows.extend(found);
            }
            rows.sort_by_key(|row| row.id);
            rows.dedup_by_key(|row| row.id);
            Ok(rows)
        }
        BulkTarget::AllMatching {
            excluded_ids,
            filter,
            ..
        } => {
            let excluded: HashSet<i64> = excluded_ids.iter().map(NumberId::value).collect();
            let rows: Vec<NumberRow> = sorted(filtered(filter)?, filter)
                .select(NumberRow::as_select())
                .load(conn)?;
            Ok(rows
                .into_iter()
                .filter(|row| !excluded.contains(&row.id))
                .collect())
        }
    }
}

/// Returns which of `phone_numbers` are already stored.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn existing_phone_numbers(
    conn: &mut SqliteConnection,
    candidates: &[String],
) -> Result<HashSet<String>, PersistenceError> {
    let mut existing: HashSet<String> = HashSet::new();
    for chunk in candidates.chunks(ID_CHUNK_SIZE) {
        let found: Vec<String> = phone_numbers::table
            .filter(phone_numbers::phone_number.eq_any(chunk.to_vec()))
            .select(phone_numbers::phone_number)
            .load(conn)?;
        existing.extend(found);
    }
    Ok(existing)
}
