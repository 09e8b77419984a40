// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{BulkOutcome, ExportArtifact, NumberStore, StoreError};
use crate::target::BulkTarget;
use dialer_console_domain::CallStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An operation applied to every record of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BulkAction {
    /// Overwrite the call status.
    SetStatus { status: CallStatus },
    /// Put the numbers back in the queue and release any dialer assignment.
    Reset,
    /// Remove the numbers permanently.
    Delete,
    /// Produce a spreadsheet of the numbers. Read-only.
    Export,
}

impl BulkAction {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::SetStatus { .. } => ActionKind::SetStatus,
            Self::Reset => ActionKind::Reset,
            Self::Delete => ActionKind::Delete,
            Self::Export => ActionKind::Export,
        }
    }

    /// Returns true if the action changes stored records.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Export)
    }

    /// Returns true if the action cannot be undone and needs confirmation.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// Action identity without its parameters. Used for the in-flight guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SetStatus,
    Reset,
    Delete,
    Export,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SetStatus => "set_status",
            Self::Reset => "reset",
            Self::Delete => "delete",
            Self::Export => "export",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the operator explicitly confirmed a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    Unconfirmed,
    Confirmed,
}

impl Confirmation {
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Result of a bulk action accepted by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Records were changed or removed.
    Mutated { action: ActionKind, affected: u64 },
    /// An export artifact was produced.
    Exported(ExportArtifact),
}

/// Action kinds with a submission outstanding.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<Mutex<HashSet<ActionKind>>>);

impl InFlight {
    fn lock(&self) -> MutexGuard<'_, HashSet<ActionKind>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.lock().contains(&kind)
    }

    /// Marks `kind` in flight. Returns `None` if it already is.
    #[must_use]
    pub fn claim(&self, kind: ActionKind) -> Option<InFlightGuard> {
        self.lock().insert(kind).then(|| InFlightGuard {
            kind,
            in_flight: self.clone(),
        })
    }
}

/// Releases its action kind when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    kind: ActionKind,
    in_flight: InFlight,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.kind);
    }
}

/// A validated bulk action waiting to be submitted.
///
/// Produced by `ConsoleSession::begin_action`, which also marks the action
/// kind as in flight. The kind stays in flight until the action is handed
/// back through `ConsoleSession::finish_action` or dropped, so a cancelled
/// submission does not block later ones.
#[derive(Debug)]
pub struct PendingAction {
    action: BulkAction,
    target: BulkTarget,
    guard: InFlightGuard,
}

impl PendingAction {
    pub(crate) const fn new(action: BulkAction, target: BulkTarget, guard: InFlightGuard) -> Self {
        Self {
            action,
            target,
            guard,
        }
    }

    /// Releases the in-flight mark, keeping the target.
    #[must_use]
    pub(crate) fn into_target(self) -> BulkTarget {
        let Self { target, guard, .. } = self;
        drop(guard);
        target
    }

    #[must_use]
    pub const fn action(&self) -> BulkAction {
        self.action
    }

    #[must_use]
    pub const fn target(&self) -> &BulkTarget {
        &self.target
    }

    /// Sends the single request describing this action to storage.
    ///
    /// # Errors
    ///
    /// Returns the storage error unchanged.
    pub async fn submit<S: NumberStore>(&self, store: &S) -> Result<ActionOutcome, StoreError> {
        tracing::info!(
            action = %self.action.kind(),
            select_all = self.target.is_select_all(),
            "Submitting bulk action"
        );
        if self.action.is_mutating() {
            let outcome: BulkOutcome = store.bulk_mutate(&self.action, &self.target).await?;
            Ok(ActionOutcome::Mutated {
                action: self.action.kind(),
                affected: outcome.affected,
            })
        } else {
            let artifact: ExportArtifact = store.export(&self.target).await?;
            Ok(ActionOutcome::Exported(artifact))
        }
    }
}
