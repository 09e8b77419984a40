// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-operator view session.
//!
//! The session owns the filter criteria, the visible page, the total count,
//! the records it has seen and the selection. Reads are ticketed with the
//! filter epoch so that a response belonging to a superseded filter or page
//! is dropped on arrival rather than applied.

use crate::action::{
    ActionKind, ActionOutcome, BulkAction, Confirmation, InFlight, InFlightGuard, PendingAction,
};
use crate::error::{ActionError, FetchError};
use crate::fetch::{Page, SessionConfig, fetch_count, fetch_page};
use crate::selection::{FilterSnapshot, Selection};
use crate::store::{NumberStore, StoreError};
use crate::target::BulkTarget;
use dialer_console_domain::{
    CallStatus, DateRange, FilterCriteria, GlobalStatus, NumberId, NumberRecord, Privilege,
    SortKey, is_eligible, is_scoped_status_filter,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifies the filter epoch and offset a page request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    epoch: u64,
    offset: u64,
}

/// Identifies the filter epoch a count request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountTicket {
    epoch: u64,
}

/// One operator's view over the number listing.
#[derive(Debug)]
pub struct ConsoleSession<S> {
    store: Arc<S>,
    config: SessionConfig,
    privilege: Privilege,
    filter: FilterCriteria,
    epoch: u64,
    page_index: u64,
    page: Option<Page>,
    total: Option<u64>,
    known: HashMap<NumberId, NumberRecord>,
    selection: Selection,
    in_flight: InFlight,
}

impl<S: NumberStore> ConsoleSession<S> {
    /// Creates an unloaded session with default filter criteria.
    ///
    /// Call [`ConsoleSession::refresh`] to load the first page.
    #[must_use]
    pub fn new(store: Arc<S>, privilege: Privilege, config: SessionConfig) -> Self {
        Self {
            store,
            config,
            privilege,
            filter: FilterCriteria::default(),
            epoch: 0,
            page_index: 0,
            page: None,
            total: None,
            known: HashMap::new(),
            selection: Selection::None,
            in_flight: InFlight::default(),
        }
    }

    #[must_use]
    pub const fn privilege(&self) -> Privilege {
        self.privilege
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    #[must_use]
    pub const fn page_index(&self) -> u64 {
        self.page_index
    }

    /// Total matching records, once a count has been applied.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    #[must_use]
    pub fn selected_count(&self) -> u64 {
        self.selection.selected_count()
    }

    #[must_use]
    pub fn is_selected(&self, id: NumberId) -> bool {
        self.selection.is_selected(id)
    }

    #[must_use]
    pub fn is_in_flight(&self, kind: ActionKind) -> bool {
        self.in_flight.contains(kind)
    }

    fn current_offset(&self) -> u64 {
        self.page_index
            .saturating_mul(u64::from(self.config.page_size()))
    }

    fn visible_records(&self) -> &[NumberRecord] {
        self.page
            .as_ref()
            .map(|page| page.records.as_slice())
            .unwrap_or_default()
    }

    /// Keeps only the records behind the visible page and explicitly
    /// selected ids.
    fn prune_known(&mut self) {
        let visible: HashSet<NumberId> = self
            .visible_records()
            .iter()
            .map(|record| record.id)
            .collect();
        let selection: &Selection = &self.selection;
        self.known.retain(|id, _| {
            visible.contains(id) || matches!(selection, Selection::Explicit(ids) if ids.contains(id))
        });
    }

    /// Number of records kept for validating explicit selections.
    #[cfg(test)]
    pub(crate) fn known_count(&self) -> usize {
        self.known.len()
    }

    // Fetching

    /// Ticket for a page request under the current filter and page.
    #[must_use]
    pub fn page_ticket(&self) -> PageTicket {
        PageTicket {
            epoch: self.epoch,
            offset: self.current_offset(),
        }
    }

    /// Ticket for a count request under the current filter.
    #[must_use]
    pub const fn count_ticket(&self) -> CountTicket {
        CountTicket { epoch: self.epoch }
    }

    /// Applies a page response. Returns false if the ticket is stale.
    pub fn apply_page(&mut self, ticket: PageTicket, page: Page) -> bool {
        if ticket != self.page_ticket() {
            debug!(
                ticket_epoch = ticket.epoch,
                ticket_offset = ticket.offset,
                epoch = self.epoch,
                "Discarding superseded page response"
            );
            return false;
        }
        for record in &page.records {
            self.known.insert(record.id, record.clone());
        }
        self.page = Some(page);
        self.prune_known();
        true
    }

    /// Applies a count response. Returns false if the ticket is stale.
    pub fn apply_count(&mut self, ticket: CountTicket, total: u64) -> bool {
        if ticket.epoch != self.epoch {
            debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "Discarding superseded count response"
            );
            return false;
        }
        self.total = Some(total);
        true
    }

    /// Reloads the visible page and the total count concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error. A successful half is still applied.
    pub async fn refresh(&mut self) -> Result<(), FetchError> {
        let page_ticket: PageTicket = self.page_ticket();
        let count_ticket: CountTicket = self.count_ticket();
        let store: Arc<S> = Arc::clone(&self.store);
        let filter: FilterCriteria = self.filter.clone();

        let (page, count) = futures::future::join(
            fetch_page(
                store.as_ref(),
                &filter,
                page_ticket.offset,
                self.config.page_size(),
                self.config.has_more_policy(),
            ),
            fetch_count(store.as_ref(), &filter),
        )
        .await;

        let mut first_error: Option<FetchError> = None;
        match page {
            Ok(page) => {
                self.apply_page(page_ticket, page);
            }
            Err(err) => first_error = Some(err),
        }
        match count {
            Ok(total) => {
                self.apply_count(count_ticket, total);
            }
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn refresh_page(&mut self) -> Result<(), FetchError> {
        let ticket: PageTicket = self.page_ticket();
        let store: Arc<S> = Arc::clone(&self.store);
        let page: Page = fetch_page(
            store.as_ref(),
            &self.filter,
            ticket.offset,
            self.config.page_size(),
            self.config.has_more_policy(),
        )
        .await?;
        self.apply_page(ticket, page);
        Ok(())
    }

    // Navigation

    /// Moves to the next page if the current one reports more.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be loaded.
    pub async fn next_page(&mut self) -> Result<bool, FetchError> {
        if !self.page.as_ref().is_some_and(|page| page.has_more) {
            return Ok(false);
        }
        self.go_to_page(self.page_index.saturating_add(1)).await?;
        Ok(true)
    }

    /// Moves to the previous page, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be loaded.
    pub async fn previous_page(&mut self) -> Result<bool, FetchError> {
        if self.page_index == 0 {
            return Ok(false);
        }
        self.go_to_page(self.page_index - 1).await?;
        Ok(true)
    }

    /// Jumps to a zero-based page. The selection is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be loaded.
    pub async fn go_to_page(&mut self, index: u64) -> Result<(), FetchError> {
        self.page_index = index;
        self.refresh_page().await
    }

    // Filter transitions

    /// Replaces the filter criteria.
    ///
    /// A changed filter starts a new epoch, clears the selection, returns to
    /// the first page and reloads. Setting an equal filter does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails. The transition itself has
    /// already happened.
    pub async fn set_filter(&mut self, filter: FilterCriteria) -> Result<(), FetchError> {
        if filter == self.filter {
            return Ok(());
        }
        self.epoch = self.epoch.wrapping_add(1);
        debug!(epoch = self.epoch, ?filter, "Filter transition");
        self.filter = filter;
        self.selection = std::mem::take(&mut self.selection).on_filter_transition();
        self.page_index = 0;
        self.page = None;
        self.total = None;
        self.known.clear();
        self.refresh().await
    }

    /// Sets the call status filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails.
    pub async fn set_status_filter(&mut self, status: Option<CallStatus>) -> Result<(), FetchError> {
        let filter: FilterCriteria = self.filter.clone().with_status(status);
        self.set_filter(filter).await
    }

    /// Sets the global status filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails.
    pub async fn set_global_status_filter(
        &mut self,
        global_status: Option<GlobalStatus>,
    ) -> Result<(), FetchError> {
        let filter: FilterCriteria = self.filter.clone().with_global_status(global_status);
        self.set_filter(filter).await
    }

    /// Sets the free-text search.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails.
    pub async fn set_search(&mut self, search: Option<&str>) -> Result<(), FetchError> {
        let filter: FilterCriteria = self.filter.clone().with_search(search);
        self.set_filter(filter).await
    }

    /// Sets the last-attempt date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails.
    pub async fn set_date_range(&mut self, range: Option<DateRange>) -> Result<(), FetchError> {
        let filter: FilterCriteria = self.filter.clone().with_date_range(range);
        self.set_filter(filter).await
    }

    /// Applies a click on a sortable column header.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails.
    pub async fn toggle_sort(&mut self, key: SortKey) -> Result<(), FetchError> {
        let filter: FilterCriteria = self.filter.toggled_sort(key);
        self.set_filter(filter).await
    }

    // Selection

    /// Toggles a row of the visible page. Returns false if `id` is not visible.
    pub fn toggle_row(&mut self, id: NumberId) -> bool {
        let Some(record) = self
            .visible_records()
            .iter()
            .find(|record| record.id == id)
            .cloned()
        else {
            return false;
        };
        self.selection = std::mem::take(&mut self.selection).toggle_row(&record, self.privilege);
        true
    }

    /// Toggles every eligible row of the visible page.
    pub fn toggle_current_page(&mut self) {
        let records: Vec<NumberRecord> = self.visible_records().to_vec();
        self.selection =
            std::mem::take(&mut self.selection).toggle_current_page(&records, self.privilege);
    }

    /// Selects every record matching the current filter.
    ///
    /// Returns false, changing nothing, while the total is not yet known.
    pub fn select_all_matching(&mut self) -> bool {
        let Some(total) = self.total else {
            return false;
        };
        let snapshot: FilterSnapshot = FilterSnapshot::new(self.filter.clone(), total);
        self.selection = Selection::select_all_matching(snapshot);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = std::mem::take(&mut self.selection).clear();
        self.prune_known();
    }

    // Bulk actions

    /// Validates `action` against the selection and marks it in flight.
    ///
    /// Nothing is sent. The returned action is passed to
    /// [`ConsoleSession::finish_action`] once storage has answered; dropping
    /// it instead releases the in-flight mark without touching the view.
    ///
    /// # Errors
    ///
    /// Returns the first local validation failure.
    pub fn begin_action(
        &mut self,
        action: BulkAction,
        confirmation: Confirmation,
    ) -> Result<PendingAction, ActionError> {
        let kind: ActionKind = action.kind();
        if self.in_flight.contains(kind) {
            return Err(ActionError::AlreadyInFlight { action: kind });
        }
        if self.selection.selected_count() == 0 {
            return Err(ActionError::EmptySelection);
        }

        match &self.selection {
            Selection::None => return Err(ActionError::EmptySelection),
            Selection::Explicit(ids) => {
                let ineligible: Vec<NumberId> = ids
                    .iter()
                    .copied()
                    .filter(|id| {
                        !self
                            .known
                            .get(id)
                            .is_some_and(|record| is_eligible(record, self.privilege))
                    })
                    .collect();
                if !ineligible.is_empty() {
                    return Err(ActionError::IneligibleMembers { ids: ineligible });
                }
            }
            Selection::AllMatching { snapshot, .. } => {
                if !is_scoped_status_filter(snapshot.filter().status(), self.privilege) {
                    return Err(ActionError::UnscopedBulkFilter);
                }
            }
        }

        if action.is_destructive() && !confirmation.is_confirmed() {
            return Err(ActionError::ConfirmationRequired { action: kind });
        }

        let target: BulkTarget =
            BulkTarget::from_selection(&self.selection).ok_or(ActionError::EmptySelection)?;
        let guard: InFlightGuard = self
            .in_flight
            .claim(kind)
            .ok_or(ActionError::AlreadyInFlight { action: kind })?;
        Ok(PendingAction::new(action, target, guard))
    }

    /// Reconciles local state with storage's answer to `pending`.
    ///
    /// # Errors
    ///
    /// Returns `TransportFailure` if storage failed, leaving the selection
    /// alone, or `StaleSelection` if the target matched nothing, clearing
    /// the selection and reloading.
    pub async fn finish_action(
        &mut self,
        pending: PendingAction,
        result: Result<ActionOutcome, StoreError>,
    ) -> Result<ActionOutcome, ActionError> {
        let kind: ActionKind = pending.action().kind();
        let target: BulkTarget = pending.into_target();

        let outcome: ActionOutcome = match result {
            Ok(outcome) => outcome,
            Err(StoreError::StaleSelection) => return Err(self.stale(kind).await),
            Err(err) => {
                warn!(action = %kind, error = %err, "Bulk action failed");
                return Err(ActionError::transport(kind, &err));
            }
        };

        let matched_nothing: bool = match &outcome {
            ActionOutcome::Mutated { affected, .. } => *affected == 0,
            ActionOutcome::Exported(artifact) => artifact.row_count == 0,
        };
        if matched_nothing && target.is_select_all() {
            return Err(self.stale(kind).await);
        }

        match &outcome {
            ActionOutcome::Mutated { affected, .. } => {
                info!(action = %kind, affected, "Bulk action applied");
                self.selection = std::mem::take(&mut self.selection).clear();
                self.prune_known();
                self.refresh_after_action(kind).await;
            }
            ActionOutcome::Exported(artifact) => {
                info!(rows = artifact.row_count, "Export produced");
            }
        }
        Ok(outcome)
    }

    /// Validates, submits and reconciles `action` in one step.
    ///
    /// # Errors
    ///
    /// See [`ConsoleSession::begin_action`] and
    /// [`ConsoleSession::finish_action`].
    pub async fn execute(
        &mut self,
        action: BulkAction,
        confirmation: Confirmation,
    ) -> Result<ActionOutcome, ActionError> {
        let pending: PendingAction = self.begin_action(action, confirmation)?;
        let store: Arc<S> = Arc::clone(&self.store);
        let result: Result<ActionOutcome, StoreError> = pending.submit(store.as_ref()).await;
        self.finish_action(pending, result).await
    }

    async fn stale(&mut self, kind: ActionKind) -> ActionError {
        info!(action = %kind, "Selection matched nothing; clearing it");
        self.selection = std::mem::take(&mut self.selection).clear();
        self.prune_known();
        self.refresh_after_action(kind).await;
        ActionError::StaleSelection { action: kind }
    }

    async fn refresh_after_action(&mut self, kind: ActionKind) {
        if let Err(err) = self.refresh().await {
            warn!(action = %kind, error = %err, "Reload after bulk action failed");
        }
    }
}
