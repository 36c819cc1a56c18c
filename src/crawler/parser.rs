//! Document loading for documentation pages
//!
//! Beckhoff help pages are often thin shells around an `<iframe>` that holds
//! the real content. Loading a page follows at most one such frame.

use crate::crawler::fetcher::fetch_page;
use crate::extract::format_identifier;
use crate::ScrapeError;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Namespace used when a page has no usable `<title>`
pub const DEFAULT_PAGE_TITLE: &str = "NC";

/// A fetched and parsed page
#[derive(Debug)]
pub struct LoadedPage {
    /// URL the content was actually read from (the frame source, if followed)
    pub url: String,

    /// Parsed document
    pub document: Html,
}

/// Parses raw page bytes into a document
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn parse_document(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

/// Returns the absolute source URL of the first frame on the page, if any
///
/// Relative sources are resolved against `page_url`.
pub fn frame_source(document: &Html, page_url: &str) -> Option<String> {
    let selector = Selector::parse("iframe[src], frame[src]").ok()?;
    let src = document
        .select(&selector)
        .next()?
        .value()
        .attr("src")?
        .trim();

    if src.is_empty() {
        return None;
    }

    match Url::parse(page_url).and_then(|base| base.join(src)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(_) => Some(src.to_string()),
    }
}

/// Fetches and parses a page, following one level of frame indirection
///
/// # Errors
///
/// Any transport error for the page or its frame source.
pub async fn load_page(client: &Client, url: &str) -> Result<LoadedPage, ScrapeError> {
    let body = fetch_page(client, url).await?;
    let document = parse_document(&body);

    let Some(src) = frame_source(&document, url) else {
        return Ok(LoadedPage {
            url: url.to_string(),
            document,
        });
    };

    tracing::debug!("Following frame of {} to {}", url, src);
    let inner_body = fetch_page(client, &src).await?;
    let inner = parse_document(&inner_body);

    if let Some(nested) = frame_source(&inner, &src) {
        tracing::warn!(
            "Frame content of {} embeds another frame ({}); not following",
            url,
            nested
        );
    }

    Ok(LoadedPage {
        url: src,
        document: inner,
    })
}

/// Returns the identifier namespace for a page
///
/// The `<title>` text is formatted like any other identifier; pages without
/// a title, or whose title formats to nothing, use [`DEFAULT_PAGE_TITLE`].
pub fn page_title(document: &Html) -> String {
    Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| format_identifier(element.text().collect::<String>().trim()))
        })
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string())
}
