//! Run statistics
//!
//! Counters collected while a scrape run progresses, logged at the end of
//! every run and printable as a summary.

use crate::state::PageState;
use std::collections::BTreeMap;

/// Statistics for one scrape run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Pages selected for scraping (discovered links or the entry fallback)
    pub pages_discovered: u64,

    /// Count of pages by final state
    pub pages_by_state: BTreeMap<PageState, u64>,

    /// Tables skipped for lacking a header row
    pub tables_skipped: u64,

    /// Rows extracted across all pages
    pub rows_extracted: u64,

    /// Rows kept with a placeholder seed after a markup failure
    pub malformed_rows: u64,

    /// Records emitted after identifier resolution
    pub records: u64,

    /// Records that kept their base identifier
    pub unique_identifiers: u64,

    /// Records that received a numeric suffix
    pub suffixed_identifiers: u64,

    /// Rows dropped because no identifier could be derived
    pub rows_dropped: u64,

    /// Artifacts written successfully
    pub artifacts_written: u64,

    /// Artifacts that failed to write
    pub artifacts_failed: u64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the final state of one page
    pub fn record_page(&mut self, state: PageState) {
        *self.pages_by_state.entry(state).or_insert(0) += 1;
    }

    /// Number of pages that ended in the given state
    pub fn pages_in(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Number of pages attempted
    pub fn pages_attempted(&self) -> u64 {
        self.pages_by_state.values().sum()
    }

    /// Number of pages that failed to fetch or had no table
    pub fn pages_failed(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Logs a one-line summary of the run
    pub fn log_summary(&self) {
        tracing::info!(
            "Run finished: {} pages attempted ({} failed), {} rows extracted, {} records ({} unique, {} suffixed, {} dropped), {} artifacts written, {} failed",
            self.pages_attempted(),
            self.pages_failed(),
            self.rows_extracted,
            self.records,
            self.unique_identifiers,
            self.suffixed_identifiers,
            self.rows_dropped,
            self.artifacts_written,
            self.artifacts_failed
        );
    }
}

/// Renders statistics as the human-readable summary
///
/// Every page state is listed, including those no page ended in.
pub fn format_statistics(stats: &RunStatistics) -> String {
    let mut out = String::from("=== Scrape Statistics ===\n\n");

    out.push_str("Pages:\n");
    out.push_str(&format!("  Discovered: {}\n", stats.pages_discovered));
    out.push_str(&format!("  Attempted: {}\n", stats.pages_attempted()));
    for state in PageState::all_states() {
        out.push_str(&format!("  {}: {}\n", state, stats.pages_in(state)));
    }
    out.push('\n');

    out.push_str("Rows:\n");
    out.push_str(&format!("  Extracted: {}\n", stats.rows_extracted));
    out.push_str(&format!(
        "  Kept with placeholder identifier: {}\n",
        stats.malformed_rows
    ));
    out.push_str(&format!("  Dropped (no identifier): {}\n", stats.rows_dropped));
    out.push_str(&format!(
        "  Tables skipped (no headers): {}\n",
        stats.tables_skipped
    ));
    out.push('\n');

    out.push_str("Records:\n");
    out.push_str(&format!("  Total: {}\n", stats.records));
    out.push_str(&format!("  Unique identifiers: {}\n", stats.unique_identifiers));
    out.push_str(&format!(
        "  Identifiers with suffix: {}\n",
        stats.suffixed_identifiers
    ));
    out.push('\n');

    out.push_str(&format!(
        "Artifacts: {} written, {} failed\n",
        stats.artifacts_written, stats.artifacts_failed
    ));
    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    print!("{}", format_statistics(stats));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_page() {
        let mut stats = RunStatistics::new();
        stats.record_page(PageState::Scraped);
        stats.record_page(PageState::Scraped);
        stats.record_page(PageState::NoTable);

        assert_eq!(stats.pages_in(PageState::Scraped), 2);
        assert_eq!(stats.pages_in(PageState::NoTable), 1);
        assert_eq!(stats.pages_in(PageState::Failed), 0);
        assert_eq!(stats.pages_attempted(), 3);
    }

    #[test]
    fn test_pages_failed() {
        let mut stats = RunStatistics::new();
        stats.record_page(PageState::Scraped);
        stats.record_page(PageState::Empty);
        stats.record_page(PageState::HttpError);
        stats.record_page(PageState::Unreachable);

        assert_eq!(stats.pages_failed(), 2);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = RunStatistics::new();
        assert_eq!(stats.pages_attempted(), 0);
        assert_eq!(stats.pages_failed(), 0);
    }

    #[test]
    fn test_format_lists_every_state() {
        let mut stats = RunStatistics::new();
        stats.pages_discovered = 2;
        stats.record_page(PageState::Scraped);
        stats.record_page(PageState::HttpError);

        let out = format_statistics(&stats);
        assert!(out.contains("  Discovered: 2\n"));
        for state in PageState::all_states() {
            assert!(out.contains(&format!("  {}: ", state)));
        }
        assert!(out.contains(&format!("  {}: 1\n", PageState::Scraped)));
        assert!(out.contains(&format!("  {}: 0\n", PageState::Failed)));
    }
}
