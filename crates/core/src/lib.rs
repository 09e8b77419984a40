// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! Scoped bulk-selection and bulk-action engine.
//!
//! A [`ConsoleSession`] owns the filter criteria, the visible page, the
//! total count and the [`Selection`] for one operator view. Bulk actions are
//! validated locally and sent to a [`NumberStore`] as a single request that
//! describes the logical target set; the set itself is never expanded on
//! this side.

mod action;
mod error;
mod fetch;
mod selection;
mod session;
mod store;
mod target;

#[cfg(test)]
mod tests;

pub use action::{ActionKind, ActionOutcome, BulkAction, Confirmation, PendingAction};
pub use error::{ActionError, FetchError};
pub use fetch::{DEFAULT_PAGE_SIZE, HasMorePolicy, Page, SessionConfig, fetch_count, fetch_page};
pub use selection::{FilterSnapshot, Selection};
pub use session::{ConsoleSession, CountTicket, PageTicket};
pub use store::{BulkOutcome, ExportArtifact, NumberStore, StoreError};
pub use target::{BulkTarget, TargetShapeError};
