// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The logical target set of a bulk request.
//!
//! On the wire a target is exactly one of
//! `{"ids": [...]}` or
//! `{"select_all": true, "excluded_ids": [...], "filter": {...}, "expected_total": n}`.

use crate::selection::Selection;
use dialer_console_domain::{FilterCriteria, NumberId};
use serde::{Deserialize, Serialize};

/// Records a bulk request applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BulkTargetWire", into = "BulkTargetWire")]
pub enum BulkTarget {
    /// Exactly these ids.
    Explicit { ids: Vec<NumberId> },
    /// Every record matching `filter` when the request is executed, minus
    /// `excluded_ids`.
    AllMatching {
        excluded_ids: Vec<NumberId>,
        filter: FilterCriteria,
        expected_total: u64,
    },
}

impl BulkTarget {
    /// Describes `selection` as a request target.
    ///
    /// Returns `None` for an empty selection. Select-all is never expanded
    /// into ids.
    #[must_use]
    pub fn from_selection(selection: &Selection) -> Option<Self> {
        match selection {
            Selection::None => None,
            Selection::Explicit(ids) => Some(Self::Explicit {
                ids: ids.iter().copied().collect(),
            }),
            Selection::AllMatching { snapshot, excluded } => Some(Self::AllMatching {
                excluded_ids: excluded.iter().copied().collect(),
                filter: snapshot.filter().clone(),
                expected_total: snapshot.total(),
            }),
        }
    }

    #[must_use]
    pub const fn is_select_all(&self) -> bool {
        matches!(self, Self::AllMatching { .. })
    }
}

/// A request body that is not a valid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TargetShapeError {
    #[error("either ids or select_all must be provided")]
    MissingTarget,
    #[error("ids must not be empty")]
    EmptyIds,
    #[error("ids cannot be combined with select_all")]
    Ambiguous,
    #[error("excluded_ids, filter and expected_total are only valid with select_all")]
    StrayScope,
    #[error("select_all requires a filter")]
    MissingFilter,
    #[error("select_all requires expected_total")]
    MissingExpectedTotal,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BulkTargetWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ids: Option<Vec<NumberId>>,
    #[serde(default, skip_serializing_if = "is_false")]
    select_all: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    excluded_ids: Option<Vec<NumberId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter: Option<FilterCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_total: Option<u64>,
}

impl TryFrom<BulkTargetWire> for BulkTarget {
    type Error = TargetShapeError;

    fn try_from(wire: BulkTargetWire) -> Result<Self, Self::Error> {
        if wire.select_all {
            if wire.ids.is_some() {
                return Err(TargetShapeError::Ambiguous);
            }
            let filter: FilterCriteria = wire.filter.ok_or(TargetShapeError::MissingFilter)?;
            let expected_total: u64 = wire
                .expected_total
                .ok_or(TargetShapeError::MissingExpectedTotal)?;
            return Ok(Self::AllMatching {
                excluded_ids: wire.excluded_ids.unwrap_or_default(),
                filter,
                expected_total,
            });
        }

        if wire.excluded_ids.is_some() || wire.filter.is_some() || wire.expected_total.is_some() {
            return Err(TargetShapeError::StrayScope);
        }
        match wire.ids {
            None => Err(TargetShapeError::MissingTarget),
            Some(ids) if ids.is_empty() => Err(TargetShapeError::EmptyIds),
            Some(ids) => Ok(Self::Explicit { ids }),
        }
    }
}

impl From<BulkTarget> for BulkTargetWire {
    fn from(target: BulkTarget) -> Self {
        match target {
            BulkTarget::Explicit { ids } => Self {
                ids: Some(ids),
                ..Self::default()
            },
            BulkTarget::AllMatching {
                excluded_ids,
                filter,
                expected_total,
            } => Self {
                ids: None,
                select_all: true,
                excluded_ids: Some(excluded_ids),
                filter: Some(filter),
                expected_total: Some(expected_total),
            },
        }
    }
}
