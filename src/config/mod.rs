//! Configuration module for the scraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file
//! scrapes the Beckhoff NC error code pages into the working directory.
//!
//! # Example
//!
//! ```no_run
//! use tc_errcode_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("CSV will be written to: {}", config.output.csv_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, OutputConfig, SourceConfig, DEFAULT_BASE_URL, DEFAULT_ENTRY_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
