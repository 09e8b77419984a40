// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator identity extraction for the server.
//!
//! The identity service sits in front of this server and forwards the
//! verified operator as request headers. This module turns those headers
//! into an [`AuthenticatedActor`].

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use dialer_console_api::{AuthenticatedActor, authenticate_stub};
use tracing::{debug, warn};

pub const OPERATOR_ID_HEADER: &str = "X-Operator-Id";
pub const OPERATOR_ROLE_HEADER: &str = "X-Operator-Role";
pub const OPERATOR_SUPERUSER_HEADER: &str = "X-Operator-Superuser";

/// Extractor for the calling operator.
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - `X-Operator-Id` or `X-Operator-Role` is missing
/// - A header is not valid ASCII
/// - The role or superuser flag is not recognized
pub struct Operator(pub AuthenticatedActor);

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<Option<&'a str>, OperatorError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                warn!(header = name, "Invalid operator header encoding");
                OperatorError::InvalidHeader(name)
            })
        })
        .transpose()
}

fn required<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, OperatorError> {
    header(headers, name)?.ok_or_else(|| {
        debug!(header = name, "Missing operator header");
        OperatorError::MissingHeader(name)
    })
}

impl<S: Send + Sync> FromRequestParts<S> for Operator {
    type Rejection = OperatorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id: &str = required(&parts.headers, OPERATOR_ID_HEADER)?;
        let role: &str = required(&parts.headers, OPERATOR_ROLE_HEADER)?;
        let superuser: Option<&str> = header(&parts.headers, OPERATOR_SUPERUSER_HEADER)?;

        let actor: AuthenticatedActor = authenticate_stub(id, role, superuser).map_err(|e| {
            warn!(error = %e, "Operator identity rejected");
            OperatorError::Rejected(e.to_string())
        })?;

        debug!(
            operator = %actor.id,
            role = actor.role.as_str(),
            superuser = actor.is_superuser,
            "Operator identified"
        );
        Ok(Self(actor))
    }
}

/// Operator extraction errors.
#[derive(Debug)]
pub enum OperatorError {
    MissingHeader(&'static str),
    InvalidHeader(&'static str),
    Rejected(String),
}

impl IntoResponse for OperatorError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header encoding"),
            Self::Rejected(reason) => reason,
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
