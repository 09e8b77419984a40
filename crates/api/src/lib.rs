// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the dialer operations console.
//!
//! Handlers here are synchronous and transport-agnostic: they take the
//! persistence adapter, the authenticated operator and a request DTO, and
//! return a response DTO or an [`ApiError`]. The HTTP server decides how
//! those map onto routes and status codes.

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

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use capabilities::compute_number_capabilities;
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    MAX_LIST_LIMIT, build_filter, bulk_numbers_action, count_numbers, export_numbers,
    import_numbers, list_numbers,
};
pub use request_response::{
    BulkActionRequest, BulkActionResponse, Capability, ExportNumbersRequest, ImportNumbersRequest,
    ImportNumbersResponse, ListNumbersQuery, ListNumbersResponse, NumberCapabilities,
    NumberResponse, NumberStatsResponse,
};
