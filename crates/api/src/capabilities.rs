// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities tell the console which row checkboxes and action buttons to
//! enable. They are advisory only and do not replace the eligibility check
//! applied when a bulk action executes.

use dialer_console_domain::{NumberRecord, is_eligible};

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, NumberCapabilities};

/// Computes what `actor` may do with `record`.
#[must_use]
pub const fn compute_number_capabilities(
    actor: &AuthenticatedActor,
    record: &NumberRecord,
) -> NumberCapabilities {
    let eligible: bool = is_eligible(record, actor.privilege());
    NumberCapabilities {
        can_modify: Capability::from_bool(eligible),
        can_delete: Capability::from_bool(eligible),
    }
}
