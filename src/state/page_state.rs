/// Page state definitions for tracking scrape progress
///
/// Every page attempted during a run ends in exactly one of these states.
use crate::{ExtractError, ScrapeError};
use std::fmt;

/// Final outcome of one page attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageState {
    // ===== Success States =====
    /// Page yielded at least one row
    Scraped,

    /// Page had usable tables but no data rows
    Empty,

    // ===== Structural Error States =====
    /// Page had no table with a header row
    NoTable,

    // ===== Transport Error States =====
    /// Page returned a non-success HTTP status
    HttpError,

    /// Page could not be reached (connection refused, DNS failure, timeout)
    Unreachable,

    /// Page fetch failed for other reasons (body read, redirect, etc.)
    Failed,
}

impl PageState {
    /// Classifies the error that ended a page attempt
    pub fn from_error(error: &ScrapeError) -> Self {
        match error {
            ScrapeError::Extract {
                source: ExtractError::NoTable,
                ..
            } => Self::NoTable,
            ScrapeError::Status { .. } => Self::HttpError,
            ScrapeError::Timeout { .. } | ScrapeError::Unreachable { .. } => Self::Unreachable,
            _ => Self::Failed,
        }
    }

    /// Returns true if the page was fetched and parsed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Scraped | Self::Empty)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Returns the snake_case name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scraped => "scraped",
            Self::Empty => "empty",
            Self::NoTable => "no_table",
            Self::HttpError => "http_error",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Scraped,
            Self::Empty,
            Self::NoTable,
            Self::HttpError,
            Self::Unreachable,
            Self::Failed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
