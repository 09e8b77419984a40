// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use dialer_console::{BulkTarget, ExportArtifact};
use dialer_console_domain::{CallStatus, FilterCriteria, NumberId, SortDirection, SortKey};

use super::{create_test_persistence, seed_numbers, set_status, test_phone};
use crate::data_models::ImportReport;
use crate::export::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use crate::Persistence;

const EXPORT_HEADER: &str = "phone_number,status,global_status,total_attempts,last_attempt_at,last_status_change_at,assigned_batch_id,note,created_at";

fn lines(artifact: &ExportArtifact) -> Vec<String> {
    String::from_utf8(artifact.bytes.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn phone_column(artifact: &ExportArtifact) -> Vec<String> {
    lines(artifact)
        .iter()
        .skip(1)
        .map(|line| line.split(',').next().unwrap().to_string())
        .collect()
}

#[test]
fn test_import_normalizes_and_reports_duplicates_and_invalid_entries() {
    let mut persistence: Persistence = create_test_persistence();
    let raw: Vec<String> = vec![
        String::from("09121234567"),
        String::from("+98 912 123 4567"),
        String::from("123"),
        String::from("۰۹۱۲۷۶۵۴۳۲۱"),
    ];

    let report: ImportReport = persistence.import_numbers(&raw).unwrap();
    assert_eq!(
        report,
        ImportReport {
            inserted: 2,
            duplicates: 1,
            invalid: 1,
            invalid_samples: vec![String::from("123")],
        }
    );

    let again: ImportReport = persistence
        .import_numbers(&[String::from("9121234567")])
        .unwrap();
    assert_eq!(again.inserted, 0);
    assert_eq!(again.duplicates, 1);
    assert_eq!(persistence.count_numbers(&FilterCriteria::new()).unwrap(), 2);
}

#[test]
fn test_import_caps_invalid_samples() {
    let mut persistence: Persistence = create_test_persistence();
    let raw: Vec<String> = (0..7).map(|n| format!("bad-{n}")).collect();

    let report: ImportReport = persistence.import_numbers(&raw).unwrap();
    assert_eq!(report.invalid, 7);
    assert_eq!(report.invalid_samples.len(), 5);
    assert_eq!(report.inserted, 0);
}

#[test]
fn test_export_explicit_rows_in_id_order_with_header() {
    let mut persistence: Persistence = create_test_persistence();
    let seeded: Vec<NumberId> = seed_numbers(&mut persistence, 3);

    let artifact: ExportArtifact = persistence
        .export_numbers(&BulkTarget::Explicit {
            ids: vec![seeded[2], seeded[0]],
        })
        .unwrap();

    assert_eq!(artifact.row_count, 2);
    assert_eq!(artifact.file_name, EXPORT_FILE_NAME);
    assert_eq!(artifact.content_type, EXPORT_CONTENT_TYPE);
    assert_eq!(lines(&artifact)[0], EXPORT_HEADER);
    assert_eq!(phone_column(&artifact), vec![test_phone(1), test_phone(3)]);
}

#[test]
fn test_export_of_nothing_is_header_only() {
    let mut persistence: Persistence = create_test_persistence();

    let artifact: ExportArtifact = persistence
        .export_numbers(&BulkTarget::Explicit {
            ids: vec![NumberId::new(5)],
        })
        .unwrap();

    assert_eq!(artifact.row_count, 0);
    assert_eq!(lines(&artifact), vec![String::from(EXPORT_HEADER)]);
}

#[test]
fn test_export_select_all_follows_sort_and_includes_resolved_rows() {
    let mut persistence: Persistence = create_test_persistence();
    let seeded: Vec<NumberId> = seed_numbers(&mut persistence, 4);
    set_status(&mut persistence, seeded[0], CallStatus::Connected, 5);

    let filter: FilterCriteria =
        FilterCriteria::new().with_sort(SortKey::CreatedAt, SortDirection::Desc);
    let artifact: ExportArtifact = persistence
        .export_numbers(&BulkTarget::AllMatching {
            excluded_ids: vec![seeded[2]],
            filter,
            expected_total: 3,
        })
        .unwrap();

    assert_eq!(artifact.row_count, 3);
    assert_eq!(
        phone_column(&artifact),
        vec![test_phone(4), test_phone(2), test_phone(1)]
    );
    assert!(lines(&artifact)[3].contains("CONNECTED"));
}
