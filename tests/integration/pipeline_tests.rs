//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to serve documentation pages and run the full
//! discover → extract → resolve → write cycle end-to-end.

use std::path::Path;
use tc_errcode_scraper::config::Config;
use tc_errcode_scraper::crawler::run_scrape;
use tc_errcode_scraper::output::{CONVERTER_FILE_NAME, DESCRIPTION_FILE_NAME, ENUM_FILE_NAME};
use tc_errcode_scraper::{ErrorRecord, PageState, ScrapeError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server and a temp dir
fn create_test_config(server: &MockServer, entry_path: &str, out_dir: &Path) -> Config {
    let mut config = Config::default();
    config.source.entry_url = format!("{}{}", server.uri(), entry_path);
    config.source.base_url = format!("{}/", server.uri());
    config.http.timeout_secs = 5;
    config.output.csv_path = out_dir.join("codes.csv").to_string_lossy().into_owned();
    config.output.plc_dir = out_dir.join("plc").to_string_lossy().into_owned();
    config
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn record(code: &str, description: &str, identifier: &str) -> ErrorRecord {
    ErrorRecord {
        code: code.to_string(),
        description: description.to_string(),
        identifier: identifier.to_string(),
    }
}

const ENTRY_PAGE: &str = r#"<html><head><title>NC Error Codes</title></head><body>
    <h1>NC Error Codes</h1>
    <p>Overview of the NC error codes.</p>
    <h2>Further Information</h2>
    <ul>
        <li><a href="general.htm">General errors</a></li>
        <li><a href="missing.htm">Removed page</a></li>
        <li><a href="overview.htm">Overview</a></li>
        <li><a href="axis.htm">Axis errors</a></li>
        <li><a href="general.htm">General errors (again)</a></li>
    </ul>
</body></html>"#;

const GENERAL_PAGE: &str = r#"<html><head><title>NC</title></head><body>
    <table>
        <tr><th>Error(Dec)</th><th>Description</th></tr>
        <tr><td>100</td><td><strong>Drive fault</strong></td></tr>
        <tr><td>200-299</td><td><strong>Reserved:</strong> internal use</td></tr>
        <tr><td>17693</td><td><strong>Lag error:</strong> velocity exceeded limit</td></tr>
        <tr><td>17694</td><td><strong>Lag error:</strong> position exceeded limit</td></tr>
    </table>
</body></html>"#;

const OVERVIEW_PAGE: &str = r#"<html><head><title>Overview</title></head><body>
    <p>This page intentionally has no table.</p>
</body></html>"#;

const AXIS_SHELL: &str = r#"<html><head><title>Shell</title></head><body>
    <iframe src="/content/axis_content.htm"></iframe>
</body></html>"#;

const AXIS_CONTENT: &str = r#"<html><head><title>Axis</title></head><body>
    <table>
        <tr><th>Error code</th><th>Symbol</th><th>Description</th></tr>
        <tr><td>4096</td><td>ERR_AXIS_DISABLED</td><td><strong>Axis:</strong> disabled</td></tr>
        <tr><td>4097</td><td></td><td><strong>Encoder fault</strong></td></tr>
    </table>
</body></html>"#;

#[tokio::test]
async fn test_full_scrape_multiple_pages() {
    let server = MockServer::start().await;
    mount_html(&server, "/index.htm", ENTRY_PAGE).await;
    mount_html(&server, "/general.htm", GENERAL_PAGE).await;
    mount_html(&server, "/overview.htm", OVERVIEW_PAGE).await;
    mount_html(&server, "/axis.htm", AXIS_SHELL).await;
    mount_html(&server, "/content/axis_content.htm", AXIS_CONTENT).await;
    // missing.htm is not mounted and answers 404

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, "/index.htm", out_dir.path());

    let report = run_scrape(config).await.expect("run should complete");

    assert_eq!(
        report.records,
        vec![
            record("100", "Drive fault", "NC_DRIVE_FAULT"),
            record("200-299", "internal use", "NC_RESERVED"),
            record("17693", "velocity exceeded limit", "NC_LAG_ERROR_1"),
            record("17694", "position exceeded limit", "NC_LAG_ERROR_2"),
            record("4096", "disabled", "AXIS_ERR_AXIS_DISABLED"),
            record("4097", "Encoder fault", "AXIS_ENCODER_FAULT"),
        ]
    );

    let stats = &report.stats;
    assert_eq!(stats.pages_discovered, 4);
    assert_eq!(stats.pages_in(PageState::Scraped), 2);
    assert_eq!(stats.pages_in(PageState::HttpError), 1);
    assert_eq!(stats.pages_in(PageState::NoTable), 1);
    assert_eq!(stats.rows_extracted, 6);
    assert_eq!(stats.unique_identifiers, 4);
    assert_eq!(stats.suffixed_identifiers, 2);
    assert_eq!(stats.rows_dropped, 0);
    assert_eq!(stats.artifacts_written, 4);
    assert_eq!(stats.artifacts_failed, 0);

    let csv = std::fs::read_to_string(out_dir.path().join("codes.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Error(Dec),Description,Identifier");
    assert_eq!(lines[1], "100,Drive fault,NC_DRIVE_FAULT");
    assert_eq!(lines.len(), 7);

    let plc_dir = out_dir.path().join("plc");
    let enum_file = std::fs::read_to_string(plc_dir.join(ENUM_FILE_NAME)).unwrap();
    assert!(enum_file.contains("    NO_ERROR := 0,\n    NC_DRIVE_FAULT := 100,\n    NC_RESERVED := 200,\n"));
    assert!(enum_file.contains("    AXIS_ERR_AXIS_DISABLED := 4096,\n"));
    assert!(enum_file.contains("    NC_LAG_ERROR_2 := 17694,\n    ERR_UNKNOWN := 65535\n"));

    let converter = std::fs::read_to_string(plc_dir.join(CONVERTER_FILE_NAME)).unwrap();
    assert!(converter.contains("    200..299:\n        ToNcErrorCode := NcErrorCodes.NC_RESERVED;\n"));

    let description = std::fs::read_to_string(plc_dir.join(DESCRIPTION_FILE_NAME)).unwrap();
    assert!(description.contains(
        "    NcErrorCodes.NC_LAG_ERROR_1:\n        NcErrorCodeDescription := 'velocity exceeded limit';\n"
    ));
    assert!(description.contains(&format!("## Source\n{}/index.htm\n", server.uri())));
}

#[tokio::test]
async fn test_entry_page_without_links_is_scraped_itself() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/single.htm",
        r#"<html><head><title>NC</title></head><body>
            <table>
                <tr><th>Error(Dec)</th><th>Description</th></tr>
                <tr><td>100</td><td><strong>Drive fault</strong></td></tr>
            </table>
        </body></html>"#,
    )
    .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, "/single.htm", out_dir.path());

    let report = run_scrape(config).await.unwrap();

    assert_eq!(
        report.records,
        vec![record("100", "Drive fault", "NC_DRIVE_FAULT")]
    );
    assert_eq!(report.stats.pages_discovered, 1);
    assert_eq!(report.stats.pages_in(PageState::Scraped), 1);
}

#[tokio::test]
async fn test_entry_page_behind_frame() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/shell.htm",
        r#"<html><body><iframe src="entry_content.htm"></iframe></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/entry_content.htm",
        r#"<html><body>
            <h3>Further Information</h3>
            <ul><li><a href="page.htm">Page</a></li></ul>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/page.htm",
        r#"<html><head><title>PLC</title></head><body>
            <table>
                <tr><th>Code (dec)</th><th>Text</th></tr>
                <tr><td>1</td><td><b>Busy</b></td></tr>
            </table>
        </body></html>"#,
    )
    .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, "/shell.htm", out_dir.path());

    let report = run_scrape(config).await.unwrap();

    assert_eq!(report.records, vec![record("1", "Busy", "PLC_BUSY")]);
}

#[tokio::test]
async fn test_unreachable_entry_page_aborts_run() {
    let server = MockServer::start().await;
    // Nothing mounted: every request answers 404

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, "/index.htm", out_dir.path());

    let result = run_scrape(config).await;

    assert!(matches!(result, Err(ScrapeError::Status { status: 404, .. })));
    assert!(!out_dir.path().join("codes.csv").exists());
}

#[tokio::test]
async fn test_all_pages_failing_still_writes_artifacts() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/index.htm",
        r#"<html><body>
            <h2>Further Information</h2>
            <ul><li><a href="gone.htm">Gone</a></li></ul>
        </body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gone.htm"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(&server, "/index.htm", out_dir.path());

    let report = run_scrape(config).await.unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.stats.pages_in(PageState::HttpError), 1);
    assert_eq!(report.stats.artifacts_written, 4);

    let csv = std::fs::read_to_string(out_dir.path().join("codes.csv")).unwrap();
    assert_eq!(csv, "Error(Dec),Description,Identifier\r\n");
}
