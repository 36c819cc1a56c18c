//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests returning the raw page body
//! - Error classification (timeout, connection failure, HTTP status)
//!
//! There is no retry policy; a failed fetch skips the page for this run.

use crate::config::HttpConfig;
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use tc_errcode_scraper::config::HttpConfig;
/// use tc_errcode_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches raw page content
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `ScrapeError::Timeout` |
/// | Connection refused / DNS | `ScrapeError::Unreachable` |
/// | Non-2xx status | `ScrapeError::Status` |
/// | Anything else (body read, redirect) | `ScrapeError::Http` |
pub async fn fetch_page(client: &Client, url: &str) -> Result<Vec<u8>, ScrapeError> {
    tracing::debug!("Fetching {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;

    tracing::debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}

/// Maps a reqwest error onto the scraper's transport error variants
fn classify_error(url: &str, error: reqwest::Error) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        ScrapeError::Unreachable {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        ScrapeError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
