//! State module for tracking scrape progress
//!
//! # Components
//!
//! - `PageState`: Final outcome of each attempted page (scraped, empty, no table, transport failure)

mod page_state;

pub use page_state::PageState;
