// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Phone number and digit normalization.

/// Canonical mobile numbers are `09` followed by nine digits.
const CANONICAL_LENGTH: usize = 11;

/// Converts Persian (`۰`–`۹`) and Arabic-Indic (`٠`–`٩`) digits to ASCII.
///
/// All other characters pass through unchanged.
#[must_use]
pub fn normalize_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => ascii_digit(u32::from(c) - 0x06F0),
            '\u{0660}'..='\u{0669}' => ascii_digit(u32::from(c) - 0x0660),
            _ => c,
        })
        .collect()
}

fn ascii_digit(offset: u32) -> char {
    char::from_digit(offset, 10).unwrap_or('0')
}

/// Normalizes a raw mobile number to the canonical `09XXXXXXXXX` form.
///
/// Accepted inputs include `+98…`, `0098…`, `98…` and a bare `9…` with ten
/// digits. Separators and other non-digit characters are ignored.
///
/// Returns `None` if the input cannot be turned into a canonical number.
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let mut digits: String = normalize_digits(raw)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    if let Some(rest) = digits.strip_prefix("0098") {
        digits = format!("0{rest}");
    } else if let Some(rest) = digits.strip_prefix("98") {
        digits = format!("0{rest}");
    }
    if digits.starts_with('9') && digits.len() == CANONICAL_LENGTH - 1 {
        digits.insert(0, '0');
    }

    let canonical: bool = digits.len() == CANONICAL_LENGTH && digits.starts_with("09");
    canonical.then_some(digits)
}
