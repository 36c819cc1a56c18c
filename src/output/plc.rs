//! TwinCAT PLC artifacts
//!
//! Three `TcPlcObject` XML files with Structured Text in CDATA sections:
//! - `NcErrorCodes.TcDUT`: enumeration of every identifier with its code
//! - `NcErrorCodeDescription.TcPOU`: enum value to description lookup
//! - `ToNcErrorCode.TcPOU`: raw UDINT code to enum value converter
//!
//! All three list records in ascending numeric code order.

use crate::extract::ErrorRecord;
use crate::output::traits::ArtifactWriter;
use std::path::{Path, PathBuf};

pub const ENUM_FILE_NAME: &str = "NcErrorCodes.TcDUT";
pub const DESCRIPTION_FILE_NAME: &str = "NcErrorCodeDescription.TcPOU";
pub const CONVERTER_FILE_NAME: &str = "ToNcErrorCode.TcPOU";

const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<TcPlcObject Version=\"1.1.0.1\">\n";
const NIL_GUID: &str = "{00000000-0000-0000-0000-000000000000}";

/// Sort key of a code: its leading number, or 0 when not numeric
pub fn code_sort_key(code: &str) -> u64 {
    let start = code.split('-').next().unwrap_or("");
    if !start.is_empty() && start.chars().all(|c| c.is_ascii_digit()) {
        start.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Records sorted by [`code_sort_key`], stable for equal keys
pub fn sorted_by_code(records: &[ErrorRecord]) -> Vec<&ErrorRecord> {
    let mut sorted: Vec<&ErrorRecord> = records.iter().collect();
    sorted.sort_by_key(|record| code_sort_key(&record.code));
    sorted
}

/// Value assigned to a code in the enumeration: the first number of a range
pub fn enum_value(code: &str) -> &str {
    match code.split_once('-') {
        Some((start, _)) => start.trim(),
        None => code,
    }
}

/// Case label for a code: `start..end` for ranges
pub fn case_label(code: &str) -> String {
    match code.split_once('-') {
        Some((start, end)) => format!("{}..{}", start.trim(), end.trim()),
        None => code.to_string(),
    }
}

/// Makes description text safe inside an ST string literal
pub fn escape_description(description: &str) -> String {
    description
        .replace('\'', "\"")
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}

fn is_emittable(record: &ErrorRecord) -> bool {
    !record.code.is_empty() && !record.identifier.is_empty()
}

/// `NcErrorCodes.TcDUT`: the enumeration type
#[derive(Debug, Clone)]
pub struct EnumDefinition {
    path: PathBuf,
    source_url: String,
}

impl EnumDefinition {
    pub fn new(dir: &Path, source_url: impl Into<String>) -> Self {
        Self {
            path: dir.join(ENUM_FILE_NAME),
            source_url: source_url.into(),
        }
    }
}

impl ArtifactWriter for EnumDefinition {
    fn name(&self) -> &'static str {
        "Enum definition"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, records: &[ErrorRecord]) -> String {
        let mut out = String::from(XML_PROLOG);
        out.push_str(&format!("  <DUT Name=\"NcErrorCodes\" Id=\"{}\">\n", NIL_GUID));
        out.push_str("    <Declaration><![CDATA[{attribute 'qualified_only'}\n");
        out.push_str("{attribute 'strict'}\n");
        out.push_str("(*\n");
        out.push_str("NC Error codes\n\n");
        out.push_str(&format!("Source: {}\n", self.source_url));
        out.push_str("*)\n");
        out.push_str("TYPE NcErrorCodes : (\n");
        out.push_str("    NO_ERROR := 0,\n");

        for record in sorted_by_code(records).into_iter().filter(|r| is_emittable(r)) {
            out.push_str(&format!(
                "    {} := {},\n",
                record.identifier,
                enum_value(&record.code)
            ));
        }

        out.push_str("    ERR_UNKNOWN := 65535\n");
        out.push_str(");\n");
        out.push_str("END_TYPE\n");
        out.push_str("]]></Declaration>\n");
        out.push_str("  </DUT>\n");
        out.push_str("</TcPlcObject>");
        out
    }
}

/// `NcErrorCodeDescription.TcPOU`: enum value to description text
#[derive(Debug, Clone)]
pub struct DescriptionFunction {
    path: PathBuf,
    source_url: String,
}

impl DescriptionFunction {
    pub fn new(dir: &Path, source_url: impl Into<String>) -> Self {
        Self {
            path: dir.join(DESCRIPTION_FILE_NAME),
            source_url: source_url.into(),
        }
    }
}

impl ArtifactWriter for DescriptionFunction {
    fn name(&self) -> &'static str {
        "Description function"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, records: &[ErrorRecord]) -> String {
        let mut out = String::from(XML_PROLOG);
        out.push_str(&format!(
            "  <POU Name=\"NcErrorCodeDescription\" Id=\"{}\" SpecialFunc=\"None\">\n",
            NIL_GUID
        ));
        out.push_str("    <Declaration><![CDATA[(*\n");
        out.push_str("Returns a description of the error from the NcErrorCodes datatype.\n\n");
        out.push_str("## Example\n");
        out.push_str("```\n");
        out.push_str(
            "ncErrorCode := NcErrorCodes.CONTROLLER_ERROR_LAG_ERROR_WINDOW_VELOCITY_NOT_ALLOWED;\n",
        );
        out.push_str("errorDescription := NcErrorCodeDescription(ncErrorCode);\n");
        out.push_str("```\n\n");
        out.push_str(&format!("## Source\n{}\n", self.source_url));
        out.push_str("*)\n");
        out.push_str("FUNCTION NcErrorCodeDescription : T_MaxString\n");
        out.push_str("VAR_INPUT\n");
        out.push_str("    ncErrorCode : NcErrorCodes;\n");
        out.push_str("END_VAR\n");
        out.push_str("]]></Declaration>\n");
        out.push_str("    <Implementation>\n");
        out.push_str("      <ST><![CDATA[CASE ncErrorCode OF\n");

        for record in sorted_by_code(records)
            .into_iter()
            .filter(|r| is_emittable(r) && !r.description.is_empty())
        {
            out.push_str(&format!("    NcErrorCodes.{}:\n", record.identifier));
            out.push_str(&format!(
                "        NcErrorCodeDescription := '{}';\n\n",
                escape_description(&record.description)
            ));
        }

        out.push_str("    NcErrorCodes.ERR_UNKNOWN:\n");
        out.push_str("        NcErrorCodeDescription := 'Unknown NC error code.';\n\n");
        out.push_str("ELSE\n");
        out.push_str("    NcErrorCodeDescription := 'Error code not recognized';\n");
        out.push_str("END_CASE\n");
        out.push_str("]]></ST>\n");
        out.push_str("    </Implementation>\n");
        out.push_str("  </POU>\n");
        out.push_str("</TcPlcObject>");
        out
    }
}

/// `ToNcErrorCode.TcPOU`: raw code to enum value
#[derive(Debug, Clone)]
pub struct ConverterFunction {
    path: PathBuf,
    source_url: String,
}

impl ConverterFunction {
    pub fn new(dir: &Path, source_url: impl Into<String>) -> Self {
        Self {
            path: dir.join(CONVERTER_FILE_NAME),
            source_url: source_url.into(),
        }
    }
}

impl ArtifactWriter for ConverterFunction {
    fn name(&self) -> &'static str {
        "Converter function"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn render(&self, records: &[ErrorRecord]) -> String {
        let mut out = String::from(XML_PROLOG);
        out.push_str(&format!(
            "  <POU Name=\"ToNcErrorCode\" Id=\"{}\" SpecialFunc=\"None\">\n",
            NIL_GUID
        ));
        out.push_str("    <Declaration><![CDATA[(*\n");
        out.push_str("Convert a NC error code of type UDINT to the NcErrorCodes datatype.\n\n");
        out.push_str("## Example\n");
        out.push_str("```\n");
        out.push_str("ncErrorId := 17693;\n");
        out.push_str("ncErrorCode := ToNcErrorCode(ncErrorId);\n");
        out.push_str("```\n\n");
        out.push_str(&format!("## Source\n{}\n", self.source_url));
        out.push_str("*)\n");
        out.push_str("FUNCTION ToNcErrorCode : NcErrorCodes\n");
        out.push_str("VAR_INPUT\n");
        out.push_str("    errorCode : UDINT;\n");
        out.push_str("END_VAR\n");
        out.push_str("]]></Declaration>\n");
        out.push_str("    <Implementation>\n");
        out.push_str("      <ST><![CDATA[CASE errorCode OF\n");

        for record in sorted_by_code(records).into_iter().filter(|r| is_emittable(r)) {
            out.push_str(&format!("    {}:\n", case_label(&record.code)));
            out.push_str(&format!(
                "        ToNcErrorCode := NcErrorCodes.{};\n\n",
                record.identifier
            ));
        }

        out.push_str("ELSE\n");
        out.push_str("    ToNcErrorCode := NcErrorCodes.ERR_UNKNOWN;\n");
        out.push_str("END_CASE\n");
        out.push_str("]]></ST>\n");
        out.push_str("    </Implementation>\n");
        out.push_str("  </POU>\n");
        out.push_str("</TcPlcObject>");
        out
    }
}
