// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of exported numbers.

use dialer_console::ExportArtifact;

use crate::data_models::{ExportRow, NumberRow};
use crate::error::PersistenceError;

pub const EXPORT_FILE_NAME: &str = "numbers_export.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Renders rows as a CSV artifact with a header line.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn render_csv(rows: &[NumberRow]) -> Result<ExportArtifact, PersistenceError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(ExportRow::from(row))?;
    }
    // An empty export still carries the header line.
    if rows.is_empty() {
        writer.write_record([
            "phone_number",
            "status",
            "global_status",
            "total_attempts",
            "last_attempt_at",
            "last_status_change_at",
            "assigned_batch_id",
            "note",
            "created_at",
        ])?;
    }
    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| PersistenceError::ExportFailed(e.to_string()))?;

    Ok(ExportArtifact {
        bytes,
        file_name: EXPORT_FILE_NAME.to_string(),
        content_type: EXPORT_CONTENT_TYPE.to_string(),
        row_count: u64::try_from(rows.len()).unwrap_or(u64::MAX),
    })
}
