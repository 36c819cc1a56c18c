//! "Further Information" link discovery
//!
//! The NC error code entry page lists its sub-pages under a "Further
//! Information" heading. Only that list is followed; other links on the
//! page are ignored.

use scraper::{Html, Selector};
use std::collections::HashSet;

const SECTION_MARKER: &str = "Further Information";

/// Finds the links listed under the "Further Information" section
///
/// The first `h2`/`h3`/`h4`/`div` whose text contains the marker selects
/// the section; the first `ul`/`ol` following it in document order holds
/// the links. Each list item contributes its first anchor's `href`. Targets
/// not starting with `http` are prefixed with `base_url`.
///
/// Returns an empty list when the section is missing. Duplicates are removed,
/// keeping the first occurrence.
pub fn discover_links(document: &Html, base_url: &str) -> Vec<String> {
    let (Ok(scan_selector), Ok(li_selector), Ok(a_selector)) = (
        Selector::parse("h2, h3, h4, div, ul, ol"),
        Selector::parse("li"),
        Selector::parse("a"),
    ) else {
        return Vec::new();
    };

    let mut section_found = false;
    let mut list = None;

    for element in document.select(&scan_selector) {
        let name = element.value().name();
        if !section_found {
            if matches!(name, "h2" | "h3" | "h4" | "div")
                && element.text().collect::<String>().contains(SECTION_MARKER)
            {
                section_found = true;
            }
            continue;
        }
        if matches!(name, "ul" | "ol") {
            list = Some(element);
            break;
        }
    }

    let Some(list) = list else {
        if section_found {
            tracing::warn!("'{}' section has no link list", SECTION_MARKER);
        }
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for item in list.select(&li_selector) {
        let Some(href) = item
            .select(&a_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            continue;
        };

        let href = href.trim();
        let absolute = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", base_url, href)
        };

        if seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}
