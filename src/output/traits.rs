//! Artifact writer trait and output errors
//!
//! Each output artifact renders the full record set into a string and is
//! written on its own, so a failure in one does not stop the others.

use crate::extract::ErrorRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A file generated from the resolved error records
pub trait ArtifactWriter {
    /// Short human-readable name used in log messages
    fn name(&self) -> &'static str;

    /// Destination path
    fn path(&self) -> &Path;

    /// Renders the artifact content
    fn render(&self, records: &[ErrorRecord]) -> String;

    /// Renders and writes the artifact, creating the parent directory if needed
    fn write(&self, records: &[ErrorRecord]) -> OutputResult<()> {
        let path = self.path();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, self.render(records)).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
