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

mod eligibility;
mod error;
mod filter;
mod phone;
mod record;
mod status;

#[cfg(test)]
mod tests;

// Re-export public types
pub use eligibility::{Privilege, is_eligible, is_eligible_status, is_scoped_status_filter};
pub use error::DomainError;
pub use filter::{DateRange, FilterCriteria, SortDirection, SortKey, parse_date_param};
pub use phone::{normalize_digits, normalize_phone};
pub use record::{NumberId, NumberRecord};
pub use status::{CallStatus, GlobalStatus};
