// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use dialer_console_domain::Privilege;

use super::helpers::{create_test_admin, create_test_agent, create_test_superuser};
use crate::{ApiError, AuthError, AuthenticatedActor, AuthorizationService, Role, authenticate_stub};

#[test]
fn test_only_superusers_are_elevated() {
    assert_eq!(create_test_admin().privilege(), Privilege::Standard);
    assert_eq!(create_test_agent().privilege(), Privilege::Standard);
    assert_eq!(create_test_superuser().privilege(), Privilege::Elevated);
}

#[test]
fn test_only_admins_may_import() {
    assert!(AuthorizationService::authorize_import_numbers(&create_test_admin()).is_ok());

    let err: AuthError =
        AuthorizationService::authorize_import_numbers(&create_test_superuser()).unwrap_err();
    assert_eq!(
        ApiError::from(err),
        ApiError::Unauthorized {
            action: String::from("import_numbers"),
            required_role: String::from("Admin"),
        }
    );
}

#[test]
fn test_authenticate_stub_parses_role_and_superuser_flag() {
    let actor: AuthenticatedActor = authenticate_stub(" op-1 ", "agent", Some("TRUE")).unwrap();
    assert_eq!(actor.id, "op-1");
    assert_eq!(actor.role, Role::Agent);
    assert!(actor.is_superuser);

    let admin: AuthenticatedActor = authenticate_stub("op-2", "Admin", None).unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert!(!admin.is_superuser);

    let flag_zero: AuthenticatedActor = authenticate_stub("op-3", "ADMIN", Some("0")).unwrap();
    assert!(!flag_zero.is_superuser);
}

#[test]
fn test_authenticate_stub_rejects_bad_assertions() {
    assert!(matches!(
        authenticate_stub("  ", "Agent", None),
        Err(AuthError::AuthenticationFailed { .. })
    ));
    assert!(matches!(
        authenticate_stub("op-1", "Supervisor", None),
        Err(AuthError::AuthenticationFailed { .. })
    ));
    assert!(matches!(
        authenticate_stub("op-1", "Agent", Some("maybe")),
        Err(AuthError::AuthenticationFailed { .. })
    ));
}
