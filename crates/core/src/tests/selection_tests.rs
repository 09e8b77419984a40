// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_record, create_test_records};
use crate::{FilterSnapshot, Selection};
use dialer_console_domain::{CallStatus, FilterCriteria, NumberId, NumberRecord, Privilege};
use std::collections::BTreeSet;

fn queued_snapshot(total: u64) -> FilterSnapshot {
    FilterSnapshot::new(
        FilterCriteria::new().with_status(Some(CallStatus::InQueue)),
        total,
    )
}

#[test]
fn test_selected_count_tracks_odd_toggles() {
    let records: Vec<NumberRecord> = create_test_records(1, 5, CallStatus::InQueue);
    let toggles: [usize; 7] = [0, 1, 1, 2, 3, 3, 3];

    let mut selection: Selection = Selection::None;
    for index in toggles {
        selection = selection.toggle_row(&records[index], Privilege::Standard);
    }

    // 0 once, 1 twice, 2 once, 3 three times
    assert_eq!(selection.selected_count(), 3);
    assert!(selection.is_selected(NumberId::new(1)));
    assert!(!selection.is_selected(NumberId::new(2)));
    assert!(selection.is_selected(NumberId::new(3)));
    assert!(selection.is_selected(NumberId::new(4)));
}

#[test]
fn test_toggling_last_row_off_collapses_to_none() {
    let record: NumberRecord = create_test_record(1, None);
    let selection: Selection = Selection::None
        .toggle_row(&record, Privilege::Standard)
        .toggle_row(&record, Privilege::Standard);
    assert_eq!(selection, Selection::None);
    assert_eq!(Selection::explicit(BTreeSet::new()), Selection::None);
}

#[test]
fn test_ineligible_row_toggle_is_ignored() {
    let connected: NumberRecord = create_test_record(9, Some(CallStatus::Connected));

    let selection: Selection = Selection::None.toggle_row(&connected, Privilege::Standard);
    assert_eq!(selection, Selection::None);

    let selection: Selection = Selection::None.toggle_row(&connected, Privilege::Elevated);
    assert_eq!(selection.selected_count(), 1);
}

#[test]
fn test_select_all_then_clear_is_none() {
    let selection: Selection = Selection::select_all_matching(queued_snapshot(10_000));
    assert_eq!(selection.selected_count(), 10_000);

    let selection: Selection = selection.clear();
    assert_eq!(selection, Selection::None);
    assert_eq!(selection.selected_count(), 0);
}

#[test]
fn test_select_all_with_zero_total_is_none() {
    let selection: Selection = Selection::select_all_matching(queued_snapshot(0));
    assert!(selection.is_none());
}

#[test]
fn test_row_toggle_under_select_all_edits_exclusions() {
    let records: Vec<NumberRecord> = create_test_records(1, 3, CallStatus::InQueue);
    let selection: Selection = Selection::select_all_matching(queued_snapshot(100))
        .toggle_row(&records[2], Privilege::Standard);

    assert_eq!(selection.selected_count(), 99);
    assert!(!selection.is_selected(NumberId::new(3)));
    assert!(selection.is_selected(NumberId::new(1)));

    let selection: Selection = selection.toggle_row(&records[2], Privilege::Standard);
    assert_eq!(selection.selected_count(), 100);
}

#[test]
fn test_select_all_count_never_goes_negative() {
    let records: Vec<NumberRecord> = create_test_records(1, 3, CallStatus::Missed);
    let mut selection: Selection = Selection::select_all_matching(queued_snapshot(2));
    for record in &records {
        selection = selection.toggle_row(record, Privilege::Standard);
    }
    assert_eq!(selection.selected_count(), 0);
    assert!(matches!(selection, Selection::AllMatching { .. }));
}

#[test]
fn test_toggle_page_selects_then_deselects_eligible_rows() {
    let mut records: Vec<NumberRecord> = create_test_records(1, 3, CallStatus::InQueue);
    records.push(create_test_record(4, Some(CallStatus::Connected)));

    let selection: Selection =
        Selection::None.toggle_current_page(&records, Privilege::Standard);
    assert_eq!(selection.selected_count(), 3);
    assert!(!selection.is_selected(NumberId::new(4)));

    let selection: Selection = selection.toggle_current_page(&records, Privilege::Standard);
    assert_eq!(selection, Selection::None);
}

#[test]
fn test_toggle_page_completes_partial_selection() {
    let records: Vec<NumberRecord> = create_test_records(1, 3, CallStatus::Busy);
    let selection: Selection = Selection::None
        .toggle_row(&records[0], Privilege::Standard)
        .toggle_current_page(&records, Privilege::Standard);
    assert_eq!(selection.selected_count(), 3);
}

#[test]
fn test_toggle_page_under_select_all_excludes_and_restores() {
    let records: Vec<NumberRecord> = create_test_records(1, 3, CallStatus::InQueue);
    let selection: Selection = Selection::select_all_matching(queued_snapshot(50))
        .toggle_current_page(&records, Privilege::Standard);
    assert_eq!(selection.selected_count(), 47);

    let selection: Selection = selection.toggle_current_page(&records, Privilege::Standard);
    assert_eq!(selection.selected_count(), 50);
}

#[test]
fn test_toggle_page_without_eligible_rows_changes_nothing() {
    let records: Vec<NumberRecord> = create_test_records(1, 3, CallStatus::Complained);
    let before: Selection = Selection::select_all_matching(queued_snapshot(10));
    let after: Selection = before
        .clone()
        .toggle_current_page(&records, Privilege::Standard);
    assert_eq!(before, after);
}

#[test]
fn test_filter_transition_always_yields_none() {
    let record: NumberRecord = create_test_record(1, None);
    let explicit: Selection = Selection::None.toggle_row(&record, Privilege::Standard);
    let all: Selection = Selection::select_all_matching(queued_snapshot(5));

    assert_eq!(explicit.on_filter_transition(), Selection::None);
    assert_eq!(all.on_filter_transition(), Selection::None);
    assert_eq!(Selection::None.on_filter_transition(), Selection::None);
}
