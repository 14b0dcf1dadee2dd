//! Pagination module
//!
//! # Overview
//!
//! Workday pages are addressed by number. The [`Pager`] owns the cursor: it
//! takes the current [`PageState`] plus the `Total_Pages` value read from the
//! latest response and returns the next state together with a [`NextPage`]
//! decision.

mod pager;
mod types;

pub use pager::Pager;
pub use types::{NextPage, PageState, FIRST_PAGE};
