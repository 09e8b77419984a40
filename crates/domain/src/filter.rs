// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filter criteria narrowing the visible and actionable number set.
//!
//! `FilterCriteria` is a value type. Two criteria are the same filter
//! exactly when they compare equal; any difference is a filter transition.

use crate::error::DomainError;
use crate::phone::normalize_digits;
use crate::status::{CallStatus, GlobalStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime, UtcOffset};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Column a number listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Insertion time.
    #[default]
    CreatedAt,
    /// Most recent dial attempt.
    LastAttemptAt,
    /// Call status, lexically.
    Status,
    /// Dial attempt counter.
    TotalAttempts,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::LastAttemptAt => "last_attempt_at",
            Self::Status => "status",
            Self::TotalAttempts => "total_attempts",
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "last_attempt_at" => Ok(Self::LastAttemptAt),
            "status" => Ok(Self::Status),
            "total_attempts" => Ok(Self::TotalAttempts),
            _ => Err(DomainError::InvalidSortKey(s.to_string())),
        }
    }
}

/// Ordering direction for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// Inclusive calendar date range applied to the last-attempt timestamp.
///
/// Either bound may be open. A range with both bounds open is never stored
/// in a `FilterCriteria`; it is collapsed to "no date filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeWire", into = "DateRangeWire")]
pub struct DateRange {
    start: Option<Date>,
    end: Option<Date>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct DateRangeWire {
    #[serde(default, with = "iso_date::option")]
    start: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    end: Option<Date>,
}

impl TryFrom<DateRangeWire> for DateRange {
    type Error = DomainError;

    fn try_from(wire: DateRangeWire) -> Result<Self, Self::Error> {
        Self::new(wire.start, wire.end)
    }
}

impl From<DateRange> for DateRangeWire {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl DateRange {
    /// Creates a new inclusive range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `start` falls after `end`.
    pub fn new(start: Option<Date>, end: Option<Date>) -> Result<Self, DomainError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(DomainError::InvalidDateRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Parses a range from optional ISO date parameters.
    ///
    /// Returns `Ok(None)` when neither bound is supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if either date cannot be parsed or the range is inverted.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>, DomainError> {
        let start: Option<Date> = parse_date_param(start, "start_date")?;
        let end: Option<Date> = parse_date_param(end, "end_date")?;
        if start.is_none() && end.is_none() {
            return Ok(None);
        }
        Self::new(start, end).map(Some)
    }

    #[must_use]
    pub const fn start(&self) -> Option<Date> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<Date> {
        self.end
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns true if the UTC calendar date of `at` lies within the range.
    #[must_use]
    pub fn contains(&self, at: OffsetDateTime) -> bool {
        let date: Date = at.to_offset(UtcOffset::UTC).date();
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Parses an optional ISO date query parameter.
///
/// Persian and Arabic-Indic digits are accepted. A full timestamp is
/// accepted too; only its date part is kept.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the value is not a valid date.
pub fn parse_date_param(value: Option<&str>, field: &str) -> Result<Option<Date>, DomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let normalized: String = normalize_digits(raw.trim());
    if normalized.is_empty() {
        return Ok(None);
    }

    let date_part: &str = normalized
        .split_once(['T', ' '])
        .map_or(normalized.as_str(), |(date, _)| date);

    Date::parse(date_part, time::macros::format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|e| DomainError::DateParseError {
            field: field.to_string(),
            date_string: raw.to_string(),
            error: e.to_string(),
        })
}

/// The predicate and ordering currently narrowing the number listing.
///
/// Deserialized criteria pass through the same setters as built ones, so
/// equal filters compare equal however they arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "FilterCriteriaWire", into = "FilterCriteriaWire")]
pub struct FilterCriteria {
    status: Option<CallStatus>,
    global_status: Option<GlobalStatus>,
    search: Option<String>,
    date_range: Option<DateRange>,
    sort_key: SortKey,
    sort_direction: SortDirection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FilterCriteriaWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<CallStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    global_status: Option<GlobalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_range: Option<DateRange>,
    #[serde(default)]
    sort_key: SortKey,
    #[serde(default)]
    sort_direction: SortDirection,
}

impl From<FilterCriteriaWire> for FilterCriteria {
    fn from(wire: FilterCriteriaWire) -> Self {
        Self::new()
            .with_status(wire.status)
            .with_global_status(wire.global_status)
            .with_search(wire.search.as_deref())
            .with_date_range(wire.date_range)
            .with_sort(wire.sort_key, wire.sort_direction)
    }
}

impl From<FilterCriteria> for FilterCriteriaWire {
    fn from(filter: FilterCriteria) -> Self {
        Self {
            status: filter.status,
            global_status: filter.global_status,
            search: filter.search,
            date_range: filter.date_range,
            sort_key: filter.sort_key,
            sort_direction: filter.sort_direction,
        }
    }
}

impl FilterCriteria {
    /// Creates unfiltered criteria ordered by newest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status(mut self, status: Option<CallStatus>) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_global_status(mut self, global_status: Option<GlobalStatus>) -> Self {
        self.global_status = global_status;
        self
    }

    /// Sets the free-text search.
    ///
    /// The text is trimmed and its digits normalized; blank text clears the search.
    #[must_use]
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(|s| normalize_digits(s.trim()))
            .filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, date_range: Option<DateRange>) -> Self {
        self.date_range = date_range.filter(|range| !range.is_open());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_key: SortKey, sort_direction: SortDirection) -> Self {
        self.sort_key = sort_key;
        self.sort_direction = sort_direction;
        self
    }

    /// Returns the criteria produced by clicking a sortable column header.
    ///
    /// The active column flips direction; a new column starts descending.
    #[must_use]
    pub fn toggled_sort(&self, key: SortKey) -> Self {
        let direction: SortDirection = if self.sort_key == key {
            self.sort_direction.reversed()
        } else {
            SortDirection::Desc
        };
        self.clone().with_sort(key, direction)
    }

    #[must_use]
    pub const fn status(&self) -> Option<CallStatus> {
        self.status
    }

    #[must_use]
    pub const fn global_status(&self) -> Option<GlobalStatus> {
        self.global_status
    }

    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[must_use]
    pub const fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub const fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Returns true if a record with these attributes satisfies the predicate part.
    ///
    /// Ordering fields do not take part in matching.
    #[must_use]
    pub fn matches(&self, record: &crate::NumberRecord) -> bool {
        if self.status.is_some() && record.status != self.status {
            return false;
        }
        if self
            .global_status
            .is_some_and(|global_status| record.global_status != global_status)
        {
            return false;
        }
        if self
            .search
            .as_deref()
            .is_some_and(|search| !record.phone_number.contains(search))
        {
            return false;
        }
        if let Some(range) = &self.date_range {
            return record
                .last_attempt_at
                .is_some_and(|at| range.contains(at));
        }
        true
    }
}
