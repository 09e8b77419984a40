// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Credentials are verified by an external identity service. This layer only
//! receives the result: who the operator is, their role, and whether they
//! are a tenant superuser.

use dialer_console_domain::Privilege;
use std::str::FromStr;

use crate::error::AuthError;

/// Operator roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Tenant administrator. May import numbers.
    Admin,
    /// Call-center agent working the number listing.
    Agent,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Agent => "Agent",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "agent" => Ok(Self::Agent),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {s}"),
            }),
        }
    }
}

/// An authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this operator.
    pub id: String,
    /// The role assigned to this operator.
    pub role: Role,
    /// Tenant super-operator flag.
    pub is_superuser: bool,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: String, role: Role, is_superuser: bool) -> Self {
        Self {
            id,
            role,
            is_superuser,
        }
    }

    /// Bulk-action privilege of this operator.
    ///
    /// Only superusers may act on numbers that already have a recorded
    /// outcome. Being an admin alone does not grant that.
    #[must_use]
    pub const fn privilege(&self) -> Privilege {
        if self.is_superuser {
            Privilege::Elevated
        } else {
            Privilege::Standard
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to import numbers.
    ///
    /// Only Admin actors may import numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_import_numbers(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Agent => Err(AuthError::Unauthorized {
                action: String::from("import_numbers"),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// Builds an actor from identity-service assertions.
///
/// Stands in for the identity service: the values are trusted as given,
/// only their shape is checked.
///
/// # Arguments
///
/// * `actor_id` - The operator identifier
/// * `role` - The role name (`Admin` or `Agent`, case-insensitive)
/// * `superuser` - `true`/`false`, `1`/`0`; absent means `false`
///
/// # Errors
///
/// Returns an error if the id is empty or the role or flag is not recognized.
pub fn authenticate_stub(
    actor_id: &str,
    role: &str,
    superuser: Option<&str>,
) -> Result<AuthenticatedActor, AuthError> {
    let actor_id: &str = actor_id.trim();
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    let role: Role = role.parse()?;
    let is_superuser: bool = match superuser.map(|s| s.trim().to_ascii_lowercase()) {
        None => false,
        Some(flag) => match flag.as_str() {
            "true" | "1" => true,
            "false" | "0" | "" => false,
            _ => {
                return Err(AuthError::AuthenticationFailed {
                    reason: format!("Invalid superuser flag: {flag}"),
                });
            }
        },
    };

    Ok(AuthenticatedActor::new(actor_id.to_string(), role, is_superuser))
}
