use crate::config::types::{Config, HttpConfig, OutputConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the documentation source URLs
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("entry_url", &config.entry_url)?;
    validate_http_url("base_url", &config.base_url)?;
    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 600, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if config.plc_dir.is_empty() {
        return Err(ConfigError::Validation(
            "plc_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that `value` parses as an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}
