//! CSV export of the resolved error records

use crate::extract::ErrorRecord;
use crate::output::traits::ArtifactWriter;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 3] = ["Error(Dec)", "Description", "Identifier"];

/// Writes one record per line with the `Error(Dec),Description,Identifier` header
#[derive(Debug, Clone)]
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArtifactWriter for CsvWriter {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, records: &[ErrorRecord]) -> String {
        let mut out = String::new();
        push_row(&mut out, &CSV_HEADER);
        for record in records {
            push_row(
                &mut out,
                &[
                    record.code.as_str(),
                    record.description.as_str(),
                    record.identifier.as_str(),
                ],
            );
        }
        out
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Appends one CRLF-terminated row, quoting fields as needed
fn push_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_quotes(field) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}
