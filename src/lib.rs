//! TC Error Code Scraper: TwinCAT NC error tables to CSV and PLC source
//!
//! This crate scrapes the error-code tables of the Beckhoff NC documentation,
//! derives stable symbolic identifiers for every code, and emits the result as
//! a CSV file plus three TwinCAT PLC artifacts (enum type, description lookup,
//! numeric converter).

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Extraction failed for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while pulling error-code rows out of a parsed page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("No table with a header row found on the page")]
    NoTable,

    #[error("Malformed description markup: {0}")]
    MalformedMarkup(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{format_identifier, resolve_identifiers, ErrorRecord};
pub use state::PageState;
