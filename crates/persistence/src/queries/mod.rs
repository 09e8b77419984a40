// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.

pub mod numbers;

pub use numbers::{
    count_numbers, existing_phone_numbers, export_rows, get_number, list_numbers,
    resolve_target_ids,
};
