// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for the number listing and its bulk actions.

use dialer_console::{BulkAction, DEFAULT_PAGE_SIZE, ExportArtifact};
use dialer_console_domain::{
    CallStatus, DateRange, FilterCriteria, GlobalStatus, NumberRecord, SortDirection, SortKey,
};
use dialer_console_persistence::{ImportReport, Persistence};
use std::str::FromStr;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::compute_number_capabilities;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    BulkActionRequest, BulkActionResponse, ExportNumbersRequest, ImportNumbersRequest,
    ImportNumbersResponse, ListNumbersQuery, ListNumbersResponse, NumberCapabilities,
    NumberResponse, NumberStatsResponse,
};

/// Largest page the listing endpoint serves.
pub const MAX_LIST_LIMIT: u32 = 500;

/// Treats blank query values as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses an optional enum-valued query parameter.
fn parse_param<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = dialer_console_domain::DomainError>,
{
    present(value)
        .map(T::from_str)
        .transpose()
        .map_err(translate_domain_error)
}

/// Builds the filter described by listing query parameters.
///
/// # Errors
///
/// Returns an error if any parameter is malformed or the date range is
/// inverted.
pub fn build_filter(query: &ListNumbersQuery) -> Result<FilterCriteria, ApiError> {
    let status: Option<CallStatus> = parse_param(query.status.as_deref())?;
    let global_status: Option<GlobalStatus> = parse_param(query.global_status.as_deref())?;
    let sort_key: SortKey = parse_param(query.sort_by.as_deref())?.unwrap_or_default();
    let sort_direction: SortDirection =
        parse_param(query.sort_order.as_deref())?.unwrap_or_default();
    let date_range: Option<DateRange> =
        DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())
            .map_err(translate_domain_error)?;

    Ok(FilterCriteria::new()
        .with_status(status)
        .with_global_status(global_status)
        .with_search(query.search.as_deref())
        .with_date_range(date_range)
        .with_sort(sort_key, sort_direction))
}

/// Lists one window of numbers matching the query.
///
/// Each number carries the capabilities of `actor` on it.
///
/// # Errors
///
/// Returns an error if:
/// - A query parameter is malformed
/// - `limit` is outside `1..=500`
/// - The database query fails
pub fn list_numbers(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListNumbersQuery,
) -> Result<ListNumbersResponse, ApiError> {
    let filter: FilterCriteria = build_filter(query)?;
    let skip: u64 = query.skip.unwrap_or(0);
    let limit: u32 = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(ApiError::InvalidInput {
            field: String::from("limit"),
            message: format!("limit must be between 1 and {MAX_LIST_LIMIT}, got {limit}"),
        });
    }

    let records: Vec<NumberRecord> = persistence.list_numbers(&filter, skip, limit)?;
    debug!(actor = %actor.id, skip, limit, rows = records.len(), "Listed numbers");

    let numbers: Vec<NumberResponse> = records
        .into_iter()
        .map(|record| {
            let capabilities: NumberCapabilities = compute_number_capabilities(actor, &record);
            NumberResponse::from_record(record, capabilities)
        })
        .collect();

    Ok(ListNumbersResponse {
        numbers,
        skip,
        limit,
    })
}

/// Counts numbers matching the query.
///
/// Paging and sort parameters are validated but do not affect the count.
///
/// # Errors
///
/// Returns an error if a query parameter is malformed or the query fails.
pub fn count_numbers(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    query: &ListNumbersQuery,
) -> Result<NumberStatsResponse, ApiError> {
    let filter: FilterCriteria = build_filter(query)?;
    let total: u64 = persistence.count_numbers(&filter)?;
    debug!(actor = %actor.id, total, "Counted numbers");
    Ok(NumberStatsResponse { total })
}

/// Applies one mutating bulk action.
///
/// The target is resolved when the request executes. For a standard
/// operator, numbers with a recorded outcome are skipped, and a select-all
/// must be filtered to a modifiable status.
///
/// # Errors
///
/// Returns an error if:
/// - The action is an export
/// - A standard operator's select-all is not scoped to a modifiable status
/// - The database operation fails
pub fn bulk_numbers_action(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &BulkActionRequest,
) -> Result<BulkActionResponse, ApiError> {
    let action: BulkAction = request.action;
    if !action.is_mutating() {
        return Err(ApiError::InvalidInput {
            field: String::from("action"),
            message: String::from("export is not a bulk mutation; use the export endpoint"),
        });
    }

    let affected: u64 =
        persistence.apply_bulk_action(&action, &request.target, actor.privilege())?;
    info!(
        actor = %actor.id,
        action = %action.kind(),
        select_all = request.target.is_select_all(),
        affected,
        "Bulk action executed"
    );

    Ok(BulkActionResponse {
        action: action.kind(),
        affected,
        message: format!("{} applied to {affected} numbers", action.kind()),
    })
}

/// Exports the target set as CSV.
///
/// Read-only; every number in the target is included regardless of the
/// operator's privilege.
///
/// # Errors
///
/// Returns an error if the query or rendering fails.
pub fn export_numbers(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ExportNumbersRequest,
) -> Result<ExportArtifact, ApiError> {
    let artifact: ExportArtifact = persistence.export_numbers(&request.target)?;
    info!(
        actor = %actor.id,
        select_all = request.target.is_select_all(),
        rows = artifact.row_count,
        "Numbers exported"
    );
    Ok(artifact)
}

/// Imports raw phone numbers.
///
/// Only Admin actors may import.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The request carries no numbers
/// - The database operation fails
pub fn import_numbers(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &ImportNumbersRequest,
) -> Result<ImportNumbersResponse, ApiError> {
    AuthorizationService::authorize_import_numbers(actor)?;
    if request.phone_numbers.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("phone_numbers"),
            message: String::from("At least one phone number is required"),
        });
    }

    let report: ImportReport = persistence.import_numbers(&request.phone_numbers)?;
    info!(
        actor = %actor.id,
        inserted = report.inserted,
        duplicates = report.duplicates,
        invalid = report.invalid,
        "Numbers imported"
    );
    Ok(ImportNumbersResponse::from(report))
}
