//! Error-code table extraction
//!
//! Documentation pages hold one or more tables whose column order differs
//! from page to page. Columns are located by header label, and every data
//! row is normalized into a [`RawRow`].

use super::description::{normalize_description, text_strip};
use super::{IdentifierSeed, RawRow};
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html, Selector};

/// Header labels of the error code column (compared lowercase)
const CODE_LABELS: &[&str] = &["error(dec)", "error code", "error", "code (dec)"];

/// Header labels of the description column (compared lowercase)
const DESCRIPTION_LABELS: &[&str] = &["description", "text"];

const SYMBOL_LABEL: &str = "symbol";

/// Rows extracted from every usable table of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableExtraction {
    /// Symbol column index declared for the page, if any
    pub symbol_column: Option<usize>,

    /// Normalized rows in document order
    pub rows: Vec<RawRow>,

    /// Number of table elements on the page
    pub tables_found: usize,

    /// Tables skipped for lacking a header row
    pub tables_skipped: usize,

    /// Rows kept with a placeholder seed because their description markup
    /// could not be normalized
    pub malformed_rows: usize,
}

/// Column positions detected from one table's header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    code: usize,
    description: usize,
    symbol: Option<usize>,
}

impl ColumnLayout {
    fn detect(headers: &[String]) -> Self {
        let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let position = |labels: &[&str]| lowered.iter().position(|h| labels.contains(&h.as_str()));

        Self {
            code: position(CODE_LABELS).unwrap_or(0),
            description: position(DESCRIPTION_LABELS).unwrap_or(1),
            symbol: lowered.iter().position(|h| h == SYMBOL_LABEL),
        }
    }
}

/// Extracts error-code rows from every table on a parsed page
///
/// Tables without a header row are skipped with a warning. Within each
/// usable table the first row is the header; data rows need at least two
/// `td` cells and a non-empty code and description, anything else is
/// skipped.
///
/// # Errors
///
/// Returns [`ExtractError::NoTable`] if the page has no table with a
/// header row.
pub fn extract_tables(document: &Html) -> ExtractResult<TableExtraction> {
    let (Ok(table_selector), Ok(th_selector), Ok(tr_selector), Ok(td_selector)) = (
        Selector::parse("table"),
        Selector::parse("th"),
        Selector::parse("tr"),
        Selector::parse("td"),
    ) else {
        return Err(ExtractError::NoTable);
    };

    let mut extraction = TableExtraction::default();
    let mut first_headers: Option<Vec<String>> = None;

    for (table_idx, table) in document.select(&table_selector).enumerate() {
        let table_no = table_idx + 1;
        extraction.tables_found += 1;

        let headers: Vec<String> = table.select(&th_selector).map(text_strip).collect();
        if headers.is_empty() {
            tracing::warn!("Table #{} has no headers, skipping", table_no);
            extraction.tables_skipped += 1;
            continue;
        }

        tracing::info!("Processing table #{} with headers: {:?}", table_no, headers);
        let layout = ColumnLayout::detect(&headers);

        match &first_headers {
            None => {
                if let Some(idx) = layout.symbol {
                    tracing::info!("Found Symbol column at index {}", idx);
                    extraction.symbol_column = Some(idx);
                }
                first_headers = Some(headers);
            }
            Some(first) if *first != headers => {
                tracing::info!(
                    "Found table with different headers: {:?} vs {:?}",
                    headers,
                    first
                );
                if let Some(idx) = layout.symbol {
                    tracing::info!("Found Symbol column at index {} in secondary table", idx);
                    extraction.symbol_column = Some(idx);
                }
            }
            Some(_) => {}
        }

        for tr in table.select(&tr_selector).skip(1) {
            // Every descendant cell counts, including cells of nested tables
            let cells: Vec<ElementRef<'_>> = tr.select(&td_selector).collect();

            if cells.len() < 2 {
                continue;
            }

            let code = cells
                .get(layout.code)
                .map(|cell| text_strip(*cell))
                .unwrap_or_default();
            let markup = cells
                .get(layout.description)
                .map(|cell| cell.inner_html())
                .unwrap_or_default();

            if code.is_empty() || markup.trim().is_empty() {
                tracing::debug!(
                    "Table #{}: skipping row without code or description (code {:?})",
                    table_no,
                    code
                );
                continue;
            }

            let symbol = layout
                .symbol
                .and_then(|idx| cells.get(idx))
                .map(|cell| text_strip(*cell))
                .filter(|text| !text.is_empty());

            if layout.symbol.is_some() && symbol.is_none() {
                tracing::debug!(
                    "Table #{}: empty Symbol cell for code {}, using bold lead-in",
                    table_no,
                    code
                );
            }

            match normalize_description(&markup) {
                Ok(description) => {
                    let seed = match (symbol, description.lead_in) {
                        (Some(symbol), _) => IdentifierSeed::Explicit(symbol),
                        (None, Some(lead_in)) => IdentifierSeed::Derived(lead_in),
                        (None, None) => {
                            tracing::debug!(
                                "Table #{}: no bold lead-in for code {}, using placeholder seed",
                                table_no,
                                code
                            );
                            IdentifierSeed::Placeholder
                        }
                    };

                    extraction.rows.push(RawRow {
                        code,
                        description: description.text,
                        seed,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not process row in table #{} (code {}, markup {:?}): {}",
                        table_no,
                        code,
                        markup.trim(),
                        e
                    );
                    extraction.malformed_rows += 1;
                    extraction.rows.push(RawRow {
                        code,
                        description: String::new(),
                        seed: symbol
                            .map(IdentifierSeed::Explicit)
                            .unwrap_or(IdentifierSeed::Placeholder),
                    });
                }
            }
        }
    }

    if extraction.tables_found == extraction.tables_skipped {
        return Err(ExtractError::NoTable);
    }

    tracing::info!(
        "Processed {} tables with a total of {} rows",
        extraction.tables_found,
        extraction.rows.len()
    );
    tracing::info!(
        "Symbol column found: {}",
        if extraction.symbol_column.is_some() { "Yes" } else { "No" }
    );

    Ok(extraction)
}
