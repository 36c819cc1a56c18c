//! Crawler module for fetching and walking the documentation pages
//!
//! This module contains the page-level pipeline, including:
//! - HTTP fetching with error classification
//! - Document loading with frame indirection
//! - "Further Information" link discovery
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod links;
mod parser;

pub use coordinator::{run_scrape, scrape_page, Coordinator, RunReport};
pub use fetcher::{build_http_client, fetch_page};
pub use links::discover_links;
pub use parser::{frame_source, load_page, page_title, parse_document, LoadedPage, DEFAULT_PAGE_TITLE};
