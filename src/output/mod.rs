//! Output module for writing the scraped error codes
//!
//! This module handles:
//! - The CSV export
//! - The three TwinCAT PLC artifacts
//! - Run statistics
//!
//! Every artifact is written independently: a failure is logged and the
//! remaining artifacts are still attempted.

mod csv;
mod plc;
pub mod stats;
mod traits;

pub use csv::{CsvWriter, CSV_HEADER};
pub use plc::{
    case_label, code_sort_key, enum_value, escape_description, sorted_by_code, ConverterFunction,
    DescriptionFunction, EnumDefinition, CONVERTER_FILE_NAME, DESCRIPTION_FILE_NAME,
    ENUM_FILE_NAME,
};
pub use stats::{format_statistics, print_statistics, RunStatistics};
pub use traits::{ArtifactWriter, OutputError, OutputResult};

use crate::config::Config;
use crate::extract::ErrorRecord;
use std::path::{Path, PathBuf};

/// Outcome of writing all artifacts
#[derive(Debug, Default)]
pub struct ArtifactReport {
    /// Paths written successfully
    pub written: Vec<PathBuf>,

    /// Paths that failed, with the error
    pub failed: Vec<(PathBuf, OutputError)>,
}

/// Builds the four artifact writers for a configuration
pub fn artifact_writers(config: &Config) -> Vec<Box<dyn ArtifactWriter>> {
    let plc_dir = Path::new(&config.output.plc_dir);
    let source_url = config.source.entry_url.as_str();

    vec![
        Box::new(CsvWriter::new(&config.output.csv_path)),
        Box::new(EnumDefinition::new(plc_dir, source_url)),
        Box::new(DescriptionFunction::new(plc_dir, source_url)),
        Box::new(ConverterFunction::new(plc_dir, source_url)),
    ]
}

/// Writes every artifact, continuing past individual failures
pub fn write_artifacts(
    writers: &[Box<dyn ArtifactWriter>],
    records: &[ErrorRecord],
) -> ArtifactReport {
    let mut report = ArtifactReport::default();

    for writer in writers {
        match writer.write(records) {
            Ok(()) => {
                tracing::info!(
                    "Successfully wrote {} ({} records) to {}",
                    writer.name(),
                    records.len(),
                    writer.path().display()
                );
                report.written.push(writer.path().to_path_buf());
            }
            Err(e) => {
                tracing::error!("Failed to write {}: {}", writer.name(), e);
                report.failed.push((writer.path().to_path_buf(), e));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn records() -> Vec<ErrorRecord> {
        vec![ErrorRecord {
            code: "100".to_string(),
            description: "Drive fault".to_string(),
            identifier: "NC_DRIVE_FAULT".to_string(),
        }]
    }

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.output.csv_path = dir.join("out/codes.csv").to_string_lossy().into_owned();
        config.output.plc_dir = dir.join("TcError/NC").to_string_lossy().into_owned();
        config
    }

    #[test]
    fn test_writes_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());

        let report = write_artifacts(&artifact_writers(&config), &records());

        assert_eq!(report.written.len(), 4);
        assert!(report.failed.is_empty());

        let csv = std::fs::read_to_string(dir.path().join("out/codes.csv")).unwrap();
        assert!(csv.contains("100,Drive fault,NC_DRIVE_FAULT"));
        assert!(dir.path().join("TcError/NC").join(ENUM_FILE_NAME).exists());
        assert!(dir.path().join("TcError/NC").join(DESCRIPTION_FILE_NAME).exists());
        assert!(dir.path().join("TcError/NC").join(CONVERTER_FILE_NAME).exists());
    }

    #[test]
    fn test_failure_does_not_stop_other_artifacts() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());

        // A regular file where the PLC directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        config.output.plc_dir = blocker.join("NC").to_string_lossy().into_owned();

        let report = write_artifacts(&artifact_writers(&config), &records());

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.failed.len(), 3);
        assert!(dir.path().join("out/codes.csv").exists());
        assert!(matches!(report.failed[0].1, OutputError::CreateDir { .. }));
    }
}
