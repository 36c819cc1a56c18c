use serde::Deserialize;

pub const DEFAULT_ENTRY_URL: &str =
    "https://infosys.beckhoff.com/content/1033/tc3ncerrcode/1521556875.html";
pub const DEFAULT_BASE_URL: &str = "https://infosys.beckhoff.com/content/1033/tc3ncerrcode/";

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the documentation lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Page holding the "Further Information" link list (or the table itself)
    #[serde(rename = "entry-url")]
    pub entry_url: String,

    /// Prefix prepended to relative link targets
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            entry_url: DEFAULT_ENTRY_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("tc-errcode-scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Directory receiving the three PLC artifacts
    #[serde(rename = "plc-dir")]
    pub plc_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "tc3ncerrcode.csv".to_string(),
            plc_dir: "TcError/TcError/NC".to_string(),
        }
    }
}
