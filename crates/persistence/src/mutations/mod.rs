// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Each public mutation runs in a single immediate transaction so that
//! target resolution and the write see the same rows.

pub mod numbers;

pub use numbers::{apply_bulk_action, import_numbers, record_call_attempt};
