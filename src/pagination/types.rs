//! Pagination types
//!
//! The page cursor is carried as an explicit [`PageState`] value that the
//! pager consumes and returns, so every transition is visible to the caller.

/// First page requested by every extract
pub const FIRST_PAGE: u32 = 1;

/// Result of advancing the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request this page next
    Continue(u32),
    /// Every page has been fetched
    Done,
    /// The reported total exceeds the configured safety cap
    LimitReached {
        /// Configured cap
        limit: u32,
        /// Total pages reported by the service
        total_pages: u64,
    },
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    /// Page to request next, if any
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Continue(page) => Some(*page),
            _ => None,
        }
    }
}

/// Tracks pagination state during an extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Page currently being requested (>= 1)
    pub page: u32,
    /// Total pages from the most recent response; `None` until one is parsed
    pub total_pages: Option<u64>,
    /// Responses processed so far
    pub pages_fetched: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageState {
    /// Initial state: page 1, total unknown
    pub fn new() -> Self {
        Self {
            page: FIRST_PAGE,
            total_pages: None,
            pages_fetched: 0,
        }
    }

    /// Create state starting at a given page
    pub fn with_page(page: u32) -> Self {
        Self {
            page: page.max(FIRST_PAGE),
            ..Self::new()
        }
    }

    /// Total pages, treating unknown as zero
    pub fn total(&self) -> u64 {
        self.total_pages.unwrap_or(0)
    }
}
