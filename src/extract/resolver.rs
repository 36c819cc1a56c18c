//! Global identifier resolution
//!
//! Identifiers are `<PAGE_TITLE>_<FORMATTED_SEED>`. Whether a base identifier
//! needs a `_<n>` suffix depends on every row of the run, so resolution runs
//! in two passes: count all base identifiers, then assign final names in
//! source order.

use super::identifier::format_identifier;
use super::{ErrorRecord, IdentifierSeed, ScrapedRow};
use std::collections::{HashMap, HashSet};

/// A row that could not be given an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub page_title: String,
    pub code: String,
    pub seed: String,
}

/// Output of [`resolve_identifiers`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Final records, in the order the rows were scraped
    pub records: Vec<ErrorRecord>,

    /// Rows whose seed formatted to an empty identifier
    pub dropped: Vec<DroppedRow>,

    /// Records that kept their base identifier
    pub unique_count: usize,

    /// Records that received a numeric suffix
    pub suffixed_count: usize,
}

/// Builds the page-namespaced identifier for a seed
///
/// Returns `None` when the seed formats to an empty fragment.
pub fn base_identifier(page_title: &str, seed: &IdentifierSeed) -> Option<String> {
    let fragment = format_identifier(seed.text());
    if fragment.is_empty() {
        return None;
    }
    Some(format!("{}_{}", page_title, fragment))
}

/// Assigns a run-unique identifier to every row
///
/// A base identifier occurring once is used unchanged. Every occurrence of
/// a repeated base identifier is suffixed `_1`, `_2`, ... in source order,
/// so no duplicate keeps the bare name. A suffix that would clash with an
/// identifier already taken is skipped. Rows without a computable base
/// identifier are dropped and logged.
pub fn resolve_identifiers(rows: &[ScrapedRow]) -> Resolution {
    let bases: Vec<Option<String>> = rows
        .iter()
        .map(|scraped| base_identifier(&scraped.page_title, &scraped.row.seed))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for base in bases.iter().flatten() {
        *counts.entry(base.as_str()).or_insert(0) += 1;
    }

    let mut taken: HashSet<String> = counts
        .iter()
        .filter(|(_, count)| **count == 1)
        .map(|(base, _)| base.to_string())
        .collect();
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let mut resolution = Resolution::default();

    for (scraped, base) in rows.iter().zip(&bases) {
        let Some(base) = base else {
            tracing::warn!(
                "Dropping row {} on page {}: no identifier derivable from {:?}",
                scraped.row.code,
                scraped.page_title,
                scraped.row.seed.text()
            );
            resolution.dropped.push(DroppedRow {
                page_title: scraped.page_title.clone(),
                code: scraped.row.code.clone(),
                seed: scraped.row.seed.text().to_string(),
            });
            continue;
        };

        let identifier = if counts.get(base.as_str()).copied().unwrap_or(0) > 1 {
            let counter = counters.entry(base.as_str()).or_insert(0);
            let candidate = loop {
                *counter += 1;
                let candidate = format!("{}_{}", base, counter);
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(candidate.clone());
            resolution.suffixed_count += 1;
            candidate
        } else {
            resolution.unique_count += 1;
            base.clone()
        };

        resolution.records.push(ErrorRecord {
            code: scraped.row.code.clone(),
            description: scraped.row.description.clone(),
            identifier,
        });
    }

    tracing::info!("Processed error codes: {} total", resolution.records.len());
    tracing::info!(
        "Unique identifiers: {}, Identifiers with suffix: {}",
        resolution.unique_count,
        resolution.suffixed_count
    );

    resolution
}
