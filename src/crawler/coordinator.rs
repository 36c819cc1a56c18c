//! Scrape coordinator - main pipeline orchestration
//!
//! This module runs one complete scrape:
//! - Loading the entry page and discovering the pages to scrape
//! - Fetching and extracting every page, one at a time
//! - Resolving identifiers over all rows of the run
//! - Writing the CSV and PLC artifacts
//!
//! A page that fails to fetch or has no usable table is logged and skipped;
//! only a failure to load the entry page ends the run early.

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::links::discover_links;
use crate::crawler::parser::{load_page, page_title, LoadedPage};
use crate::extract::{
    extract_tables, resolve_identifiers, ErrorRecord, PageContext, ScrapedRow, TableExtraction,
};
use crate::output::{artifact_writers, write_artifacts, ArtifactReport, RunStatistics};
use crate::state::PageState;
use crate::ScrapeError;
use reqwest::Client;

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunReport {
    /// Final records, in scrape order
    pub records: Vec<ErrorRecord>,

    /// Counters collected during the run
    pub stats: RunStatistics,

    /// Which artifacts were written
    pub artifacts: ArtifactReport,
}

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    stats: RunStatistics,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Failed to build the HTTP client
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.http)?;

        Ok(Self {
            config,
            client,
            stats: RunStatistics::new(),
        })
    }

    /// Runs the scrape pipeline
    ///
    /// 1. Loads the entry page and discovers linked pages
    /// 2. Extracts rows from every page, skipping pages that fail
    /// 3. Resolves identifiers over the combined rows
    /// 4. Writes all artifacts
    ///
    /// # Errors
    ///
    /// Only a failure to fetch the entry page is returned; every later
    /// failure is logged and contained.
    pub async fn run(mut self) -> Result<RunReport, ScrapeError> {
        let entry_url = self.config.source.entry_url.clone();
        tracing::info!("Loading entry page {}", entry_url);

        let entry = load_page(&self.client, &entry_url).await?;
        let links = discover_links(&entry.document, &self.config.source.base_url);

        let mut rows: Vec<ScrapedRow> = Vec::new();

        if links.is_empty() {
            tracing::info!("No links found, scraping current page only");
            self.stats.pages_discovered = 1;
            self.collect_page(&entry_url, Ok(entry), &mut rows);
        } else {
            tracing::info!("Processing {} unique links", links.len());
            self.stats.pages_discovered = links.len() as u64;

            for link in &links {
                tracing::info!("Collecting data from {}", link);
                let page = load_page(&self.client, link).await;
                self.collect_page(link, page, &mut rows);
            }
        }

        let resolution = resolve_identifiers(&rows);
        self.stats.records = resolution.records.len() as u64;
        self.stats.unique_identifiers = resolution.unique_count as u64;
        self.stats.suffixed_identifiers = resolution.suffixed_count as u64;
        self.stats.rows_dropped = resolution.dropped.len() as u64;

        let writers = artifact_writers(&self.config);
        let artifacts = write_artifacts(&writers, &resolution.records);
        self.stats.artifacts_written = artifacts.written.len() as u64;
        self.stats.artifacts_failed = artifacts.failed.len() as u64;

        self.stats.log_summary();

        Ok(RunReport {
            records: resolution.records,
            stats: self.stats,
            artifacts,
        })
    }

    /// Extracts one loaded page into `rows`, recording its final state
    ///
    /// Failures are logged with the page URL and never propagate.
    fn collect_page(
        &mut self,
        url: &str,
        page: Result<LoadedPage, ScrapeError>,
        rows: &mut Vec<ScrapedRow>,
    ) {
        let state = match page.and_then(|page| scrape_page(url, &page)) {
            Ok((context, extraction)) => {
                self.stats.tables_skipped += extraction.tables_skipped as u64;
                self.stats.malformed_rows += extraction.malformed_rows as u64;
                self.stats.rows_extracted += extraction.rows.len() as u64;

                if extraction.rows.is_empty() {
                    tracing::warn!("No rows found in table at {}", url);
                    PageState::Empty
                } else {
                    tracing::info!(
                        "Collected {} rows from {} (namespace {})",
                        extraction.rows.len(),
                        url,
                        context.title
                    );
                    rows.extend(
                        extraction
                            .rows
                            .into_iter()
                            .map(|row| ScrapedRow::new(context.title.as_str(), row)),
                    );
                    PageState::Scraped
                }
            }
            Err(e) => {
                let state = PageState::from_error(&e);
                if state == PageState::NoTable {
                    tracing::warn!("Table extraction issue: {}", e);
                } else {
                    tracing::error!("Error processing link {}: {}", url, e);
                }
                state
            }
        };

        self.stats.record_page(state);
    }
}

/// Extracts the page context and table rows from a loaded page
pub fn scrape_page(
    url: &str,
    page: &LoadedPage,
) -> Result<(PageContext, TableExtraction), ScrapeError> {
    let title = page_title(&page.document);
    let extraction = extract_tables(&page.document).map_err(|source| ScrapeError::Extract {
        url: url.to_string(),
        source,
    })?;

    let context = PageContext {
        title,
        symbol_column: extraction.symbol_column,
    };
    Ok((context, extraction))
}

/// Runs a complete scrape with the given configuration
///
/// # Example
///
/// ```no_run
/// use tc_errcode_scraper::config::Config;
/// use tc_errcode_scraper::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_scrape(Config::default()).await?;
/// println!("{} error codes", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<RunReport, ScrapeError> {
    Coordinator::new(config)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::parser::parse_document;
    use crate::ExtractError;

    fn loaded(html: &str) -> LoadedPage {
        LoadedPage {
            url: "https://docs.example.com/nc/page.htm".to_string(),
            document: parse_document(html.as_bytes()),
        }
    }

    #[test]
    fn test_coordinator_creation() {
        assert!(Coordinator::new(Config::default()).is_ok());
    }

    #[test]
    fn test_scrape_page_builds_context() {
        let page = loaded(
            r#"<html><head><title>NC</title></head><body><table>
                <tr><th>Error(Dec)</th><th>Symbol</th><th>Description</th></tr>
                <tr><td>100</td><td>DRIVE</td><td><strong>Drive fault</strong></td></tr>
            </table></body></html>"#,
        );

        let (context, extraction) = scrape_page(&page.url, &page).unwrap();
        assert_eq!(context.title, "NC");
        assert_eq!(context.symbol_column, Some(1));
        assert_eq!(extraction.rows.len(), 1);
    }

    #[test]
    fn test_scrape_page_without_table() {
        let page = loaded("<html><head><title>NC</title></head><body><p>x</p></body></html>");

        let err = scrape_page(&page.url, &page).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::Extract {
                source: ExtractError::NoTable,
                ..
            }
        ));
    }

    #[test]
    fn test_collect_page_contains_failures() {
        let mut coordinator = Coordinator::new(Config::default()).unwrap();
        let mut rows = Vec::new();

        coordinator.collect_page(
            "https://docs.example.com/missing.htm",
            Err(ScrapeError::Status {
                url: "https://docs.example.com/missing.htm".to_string(),
                status: 404,
            }),
            &mut rows,
        );
        coordinator.collect_page(
            "https://docs.example.com/empty.htm",
            Ok(loaded("<html><body>no tables</body></html>")),
            &mut rows,
        );
        coordinator.collect_page(
            "https://docs.example.com/ok.htm",
            Ok(loaded(
                r#"<html><head><title>NC</title></head><body><table>
                    <tr><th>Error(Dec)</th><th>Description</th></tr>
                    <tr><td>100</td><td><strong>Drive fault</strong></td></tr>
                </table></body></html>"#,
            )),
            &mut rows,
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].page_title, "NC");
        assert_eq!(coordinator.stats.pages_in(PageState::HttpError), 1);
        assert_eq!(coordinator.stats.pages_in(PageState::NoTable), 1);
        assert_eq!(coordinator.stats.pages_in(PageState::Scraped), 1);
        assert_eq!(coordinator.stats.rows_extracted, 1);
    }
}
