// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::action::ActionKind;
use crate::store::StoreError;
use dialer_console_domain::NumberId;

/// Errors returned when executing a bulk action.
///
/// Everything except `TransportFailure` and `StaleSelection` is detected
/// locally, before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Nothing is selected.
    #[error("no numbers are selected")]
    EmptySelection,
    /// Some hand-picked ids may not be modified by this operator.
    #[error("{} selected numbers cannot be modified at this privilege level", ids.len())]
    IneligibleMembers { ids: Vec<NumberId> },
    /// A select-all would reach numbers this operator may not modify.
    #[error("select-all requires a status filter limited to modifiable statuses")]
    UnscopedBulkFilter,
    /// A destructive action was requested without confirmation.
    #[error("{action} must be confirmed before it runs")]
    ConfirmationRequired { action: ActionKind },
    /// The same kind of action is already running.
    #[error("a {action} action is already in progress")]
    AlreadyInFlight { action: ActionKind },
    /// Storage failed. The selection is unchanged.
    #[error("{action} failed: {message}")]
    TransportFailure {
        action: ActionKind,
        recoverable: bool,
        message: String,
    },
    /// The selection matched nothing when executed. It has been cleared.
    #[error("the selection no longer matches any number and has been cleared")]
    StaleSelection { action: ActionKind },
}

impl ActionError {
    /// Returns true if the error was raised without contacting storage.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        !matches!(
            self,
            Self::TransportFailure { .. } | Self::StaleSelection { .. }
        )
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TransportFailure {
                recoverable: true,
                ..
            }
        )
    }

    pub(crate) fn transport(action: ActionKind, err: &StoreError) -> Self {
        Self::TransportFailure {
            action,
            recoverable: err.is_recoverable(),
            message: err.to_string(),
        }
    }
}

/// Errors returned when loading a page or the total count.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("failed to load numbers: {0}")]
    Store(#[from] StoreError),
}
