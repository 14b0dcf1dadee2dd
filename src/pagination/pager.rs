//! Page cursor state machine
//!
//! `AWAITING_REQUEST(n) -> AWAITING_RESPONSE(n) -> ADVANCE(n + 1, T)`.
//! After the response for page `n` reports `T` total pages the cursor moves
//! to `n + 1`; once it passes `T` the extract is done. A missing or zero
//! `T` ends the extract after the first page. A `T` above the page cap can
//! never be finished, so it stops the extract as soon as it is reported.

use super::types::{NextPage, PageState};
use crate::config::DEFAULT_MAX_PAGES;
use tracing::warn;

/// Drives the page cursor for a page-numbered SOAP operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    max_pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

impl Pager {
    /// Create a pager that refuses to go past `max_pages`
    pub fn new(max_pages: u32) -> Self {
        Self {
            max_pages: max_pages.max(1),
        }
    }

    /// Safety cap on the page cursor
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Initial state for an extract
    pub fn start(&self) -> PageState {
        PageState::new()
    }

    /// Record the response for `state.page` and decide what comes next
    ///
    /// `total_pages` is the value read from the response just processed; the
    /// most recent value always wins.
    pub fn advance(&self, state: PageState, total_pages: Option<u64>) -> (PageState, NextPage) {
        if let (Some(previous), Some(current)) = (state.total_pages, total_pages) {
            if previous != current {
                warn!(
                    "Total pages changed from {} to {} at page {}",
                    previous, current, state.page
                );
            }
        }

        let next = PageState {
            page: state.page.saturating_add(1),
            total_pages: total_pages.or(state.total_pages),
            pages_fetched: state.pages_fetched.saturating_add(1),
        };
        let total = total_pages.unwrap_or(0);

        let step = if u64::from(next.page) > total {
            NextPage::Done
        } else if total > u64::from(self.max_pages) {
            NextPage::LimitReached {
                limit: self.max_pages,
                total_pages: total,
            }
        } else {
            NextPage::Continue(next.page)
        };

        (next, step)
    }
}
