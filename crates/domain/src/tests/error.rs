// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;
use time::macros::date;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidCallStatus(String::from("RINGING"));
    assert_eq!(format!("{err}"), "Invalid call status: 'RINGING'");

    let err: DomainError = DomainError::InvalidGlobalStatus(String::from("DORMANT"));
    assert_eq!(format!("{err}"), "Invalid global status: 'DORMANT'");

    let err: DomainError = DomainError::InvalidSortDirection(String::from("up"));
    assert_eq!(
        format!("{err}"),
        "Invalid sort direction: 'up'. Must be 'asc' or 'desc'"
    );

    let err: DomainError = DomainError::InvalidPrivilege(String::from("root"));
    assert_eq!(format!("{err}"), "Invalid privilege level: 'root'");

    let err: DomainError = DomainError::InvalidDateRange {
        start: date!(2026 - 02 - 01),
        end: date!(2026 - 01 - 01),
    };
    assert_eq!(
        format!("{err}"),
        "Date range start 2026-02-01 is after end 2026-01-01"
    );

    let err: DomainError = DomainError::DateParseError {
        field: String::from("start_date"),
        date_string: String::from("yesterday"),
        error: String::from("bad"),
    };
    assert_eq!(
        format!("{err}"),
        "Failed to parse start_date 'yesterday': bad"
    );

    let err: DomainError = DomainError::InvalidPhoneNumber(String::from("123"));
    assert_eq!(format!("{err}"), "Invalid phone number: '123'");
}
