// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Selection state machine.
//!
//! A selection is one of three closed states. Every transition consumes the
//! current value and returns the next one; transitions never fail. An
//! ineligible record is silently ignored by the row and page toggles.

use dialer_console_domain::{FilterCriteria, NumberId, NumberRecord, Privilege, is_eligible};
use std::collections::BTreeSet;

/// Filter criteria frozen at "select all" time, with the total observed then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSnapshot {
    filter: FilterCriteria,
    total: u64,
}

impl FilterSnapshot {
    #[must_use]
    pub const fn new(filter: FilterCriteria, total: u64) -> Self {
        Self { filter, total }
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

/// What the operator currently has selected, independent of the visible page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A hand-picked, non-empty set of ids.
    Explicit(BTreeSet<NumberId>),
    /// Everything matching `snapshot` except the ids in `excluded`.
    AllMatching {
        snapshot: FilterSnapshot,
        excluded: BTreeSet<NumberId>,
    },
}

impl Selection {
    /// Builds an explicit selection, collapsing an empty set to `None`.
    #[must_use]
    pub fn explicit(ids: BTreeSet<NumberId>) -> Self {
        if ids.is_empty() {
            Self::None
        } else {
            Self::Explicit(ids)
        }
    }

    /// Flips one record in or out of the selection.
    ///
    /// Under `AllMatching` this flips the record's membership in the
    /// exclusion set instead.
    #[must_use]
    pub fn toggle_row(self, record: &NumberRecord, privilege: Privilege) -> Self {
        if !is_eligible(record, privilege) {
            return self;
        }
        let id: NumberId = record.id;
        match self {
            Self::None => Self::Explicit(BTreeSet::from([id])),
            Self::Explicit(mut ids) => {
                if !ids.remove(&id) {
                    ids.insert(id);
                }
                Self::explicit(ids)
            }
            Self::AllMatching {
                snapshot,
                mut excluded,
            } => {
                if !excluded.remove(&id) {
                    excluded.insert(id);
                }
                Self::AllMatching { snapshot, excluded }
            }
        }
    }

    /// Selects every record matching the snapshot.
    ///
    /// A snapshot that matched nothing yields `None`.
    #[must_use]
    pub fn select_all_matching(snapshot: FilterSnapshot) -> Self {
        if snapshot.total == 0 {
            return Self::None;
        }
        Self::AllMatching {
            snapshot,
            excluded: BTreeSet::new(),
        }
    }

    /// Selects or deselects every eligible record on the visible page.
    ///
    /// If all eligible visible records are already selected they are all
    /// deselected; otherwise they are all selected. A page with no eligible
    /// record leaves the selection as it was.
    #[must_use]
    pub fn toggle_current_page(self, records: &[NumberRecord], privilege: Privilege) -> Self {
        let eligible: Vec<NumberId> = records
            .iter()
            .filter(|record| is_eligible(record, privilege))
            .map(|record| record.id)
            .collect();
        if eligible.is_empty() {
            return self;
        }

        let all_selected: bool = eligible.iter().all(|id| self.is_selected(*id));
        match self {
            Self::None => Self::explicit(eligible.into_iter().collect()),
            Self::Explicit(mut ids) => {
                for id in eligible {
                    if all_selected {
                        ids.remove(&id);
                    } else {
                        ids.insert(id);
                    }
                }
                Self::explicit(ids)
            }
            Self::AllMatching {
                snapshot,
                mut excluded,
            } => {
                for id in eligible {
                    if all_selected {
                        excluded.insert(id);
                    } else {
                        excluded.remove(&id);
                    }
                }
                Self::AllMatching { snapshot, excluded }
            }
        }
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn clear(self) -> Self {
        Self::None
    }

    /// The selection that survives a filter transition: none.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn on_filter_transition(self) -> Self {
        Self::None
    }

    #[must_use]
    pub fn is_selected(&self, id: NumberId) -> bool {
        match self {
            Self::None => false,
            Self::Explicit(ids) => ids.contains(&id),
            Self::AllMatching { excluded, .. } => !excluded.contains(&id),
        }
    }

    /// Number of records this selection stands for.
    ///
    /// Computed on demand; an exclusion set larger than the snapshot total
    /// yields zero.
    #[must_use]
    pub fn selected_count(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::Explicit(ids) => len_as_u64(ids.len()),
            Self::AllMatching { snapshot, excluded } => {
                snapshot.total.saturating_sub(len_as_u64(excluded.len()))
            }
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

fn len_as_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
