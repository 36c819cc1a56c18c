//! Error-code extraction and identifier derivation
//!
//! This module turns parsed documentation pages into [`ErrorRecord`]s:
//! - Locating error-code tables and normalizing their rows
//! - Separating the bold lead-in of a description from its body
//! - Formatting free text into symbolic identifier fragments
//! - Resolving globally unique identifiers across every scraped page

mod description;
mod identifier;
mod resolver;
mod table;

pub use description::{normalize_description, NormalizedDescription};
pub use identifier::format_identifier;
pub use resolver::{base_identifier, resolve_identifiers, DroppedRow, Resolution};
pub use table::{extract_tables, TableExtraction};

/// Seed used when a row offers neither a symbol cell nor a bold lead-in
pub const UNKNOWN_IDENTIFIER: &str = "UNKNOWN_IDENTIFIER";

/// One error code with its final, run-unique identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Numeric code or `start-end` range, e.g. `17693` or `100-199`
    pub code: String,

    /// Description text with markup stripped
    pub description: String,

    /// Uppercase identifier, unique across the whole run
    pub identifier: String,
}

/// Where a row's identifier seed came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierSeed {
    /// Text of the table's "Symbol" column
    Explicit(String),

    /// Bold lead-in phrase of the description cell
    Derived(String),

    /// Neither source was available
    Placeholder,
}

impl IdentifierSeed {
    /// Returns the unformatted seed text
    pub fn text(&self) -> &str {
        match self {
            Self::Explicit(text) | Self::Derived(text) => text,
            Self::Placeholder => UNKNOWN_IDENTIFIER,
        }
    }
}

/// A table row after extraction, before identifier resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub code: String,
    pub description: String,
    pub seed: IdentifierSeed,
}

/// Per-page bookkeeping carried alongside the extracted rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Formatted page title, used as the identifier namespace
    pub title: String,

    /// Index of the Symbol column, if any table on the page declared one
    pub symbol_column: Option<usize>,
}

/// A row tagged with the namespace of the page it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRow {
    pub page_title: String,
    pub row: RawRow,
}

impl ScrapedRow {
    pub fn new(page_title: impl Into<String>, row: RawRow) -> Self {
        Self {
            page_title: page_title.into(),
            row,
        }
    }
}
