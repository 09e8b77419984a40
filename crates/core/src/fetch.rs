// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::FetchError;
use crate::store::NumberStore;
use dialer_console_domain::{FilterCriteria, NumberRecord};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// How a page decides whether another page follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HasMorePolicy {
    /// A full page implies more. Wrong when the total is an exact multiple
    /// of the page size; the next page then comes back empty.
    #[default]
    PageLength,
    /// Fetch one extra row and drop it. Exact.
    Probe,
}

/// Tunables for a console session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    page_size: u32,
    has_more: HasMorePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            has_more: HasMorePolicy::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size. Zero is raised to one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub const fn with_has_more(mut self, has_more: HasMorePolicy) -> Self {
        self.has_more = has_more;
        self
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn has_more_policy(&self) -> HasMorePolicy {
        self.has_more
    }
}

/// One window of the filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<NumberRecord>,
    pub offset: u64,
    pub limit: u32,
    pub has_more: bool,
}

/// Loads one page of records matching `filter`.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn fetch_page<S: NumberStore>(
    store: &S,
    filter: &FilterCriteria,
    offset: u64,
    limit: u32,
    policy: HasMorePolicy,
) -> Result<Page, FetchError> {
    let (mut records, has_more): (Vec<NumberRecord>, bool) = match policy {
        HasMorePolicy::PageLength => {
            let records: Vec<NumberRecord> = store.list(filter, offset, limit).await?;
            let full: bool = limit > 0 && records.len() == limit as usize;
            (records, full)
        }
        HasMorePolicy::Probe => {
            let records: Vec<NumberRecord> = store
                .list(filter, offset, limit.saturating_add(1))
                .await?;
            let over: bool = records.len() > limit as usize;
            (records, over)
        }
    };
    records.truncate(limit as usize);

    Ok(Page {
        records,
        offset,
        limit,
        has_more,
    })
}

/// Loads the number of records matching `filter`.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn fetch_count<S: NumberStore>(
    store: &S,
    filter: &FilterCriteria,
) -> Result<u64, FetchError> {
    Ok(store.count(filter).await?)
}
