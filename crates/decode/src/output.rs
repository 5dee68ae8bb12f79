//! Response types for CLI output.
//!
//! Every command produces one response value. With `--format json` it is
//! emitted as pretty-printed JSON on stdout; with `--format text` it renders
//! itself through [`TextOutput`]. Responses carry `status` and
//! `schema_version` fields so consumers can check compatibility.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use decode_core::comment::Node;
use decode_core::coverage::{CoverageReport, MissingDefinition};
use decode_core::definition::{Definition, Kind};
use decode_core::types::{Location, Visibility};

use crate::error::{CliError, OutputErrorCode};

/// Version of the JSON output schema.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Shared Types
// ============================================================================

/// Summary of one published definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionInfo {
    /// Arena identifier, e.g. `def_3`.
    pub id: String,
    pub qualified_name: String,
    pub kind: Kind,
    pub language: String,
    pub visibility: Visibility,
    pub documented: bool,
    /// Qualified long form, e.g. `def Foo#bar(x)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl DefinitionInfo {
    pub fn from_definition(definition: &Definition) -> Self {
        DefinitionInfo {
            id: definition
                .id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            qualified_name: definition.qualified_name().to_string(),
            kind: definition.kind.kind(),
            language: definition.language.clone(),
            visibility: definition.visibility,
            documented: definition.is_documented(),
            form: definition.qualified_form(),
            location: definition.location.clone(),
        }
    }

    fn text_line(&self) -> String {
        let form = self.form.as_deref().unwrap_or(&self.qualified_name);
        match &self.location {
            Some(location) => format!("{}  ({})", form, location),
            None => form.to_string(),
        }
    }
}

/// Human-readable rendering of a response.
pub trait TextOutput {
    fn write_text(&self, writer: &mut impl Write) -> io::Result<()>;
}

// ============================================================================
// Command Responses
// ============================================================================

/// Response for `decode coverage`.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageResponse {
    pub status: String,
    pub schema_version: String,
    pub documented: usize,
    pub total: usize,
    pub percentage: f64,
    pub threshold: f64,
    pub missing: Vec<MissingDefinition>,
}

impl CoverageResponse {
    /// Status is `ok` when the report meets `threshold`, `insufficient`
    /// otherwise.
    pub fn new(report: CoverageReport, threshold: f64) -> Self {
        let status = if report.meets(threshold) { "ok" } else { "insufficient" };
        CoverageResponse {
            status: status.to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            documented: report.documented,
            total: report.total,
            percentage: report.percentage,
            threshold,
            missing: report.missing,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == "ok"
    }
}

impl TextOutput for CoverageResponse {
    fn write_text(&self, writer: &mut impl Write) -> io::Result<()> {
        for missing in &self.missing {
            if let Some(location) = &missing.location {
                write!(writer, "{}: ", location)?;
            }
            writeln!(
                writer,
                "missing documentation for {} {}",
                missing.kind, missing.qualified_name
            )?;
        }
        writeln!(
            writer,
            "{}/{} definitions documented ({:.1}%)",
            self.documented, self.total, self.percentage
        )
    }
}

/// Response for `decode lookup`.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub status: String,
    pub schema_version: String,
    pub reference: String,
    pub definition: DefinitionInfo,
}

impl LookupResponse {
    pub fn new(reference: impl Into<String>, definition: &Definition) -> Self {
        LookupResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            reference: reference.into(),
            definition: DefinitionInfo::from_definition(definition),
        }
    }
}

impl TextOutput for LookupResponse {
    fn write_text(&self, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "{}", self.definition.text_line())
    }
}

/// Response for `decode list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub status: String,
    pub schema_version: String,
    pub definitions: Vec<DefinitionInfo>,
}

impl ListResponse {
    pub fn new(definitions: Vec<DefinitionInfo>) -> Self {
        ListResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            definitions,
        }
    }
}

impl TextOutput for ListResponse {
    fn write_text(&self, writer: &mut impl Write) -> io::Result<()> {
        for definition in &self.definitions {
            writeln!(writer, "{}", definition.text_line())?;
        }
        Ok(())
    }
}

/// A `{Reference}` link found in documentation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkInfo {
    pub reference: String,
    /// Qualified name of the target, when the link resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Response for `decode docs`.
#[derive(Debug, Clone, Serialize)]
pub struct DocsResponse {
    pub status: String,
    pub schema_version: String,
    pub definition: DefinitionInfo,
    /// Prose with links replaced by their targets' qualified names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub links: Vec<LinkInfo>,
    /// The parsed comment tree.
    pub children: Vec<Node>,
}

impl DocsResponse {
    pub fn new(
        definition: &Definition,
        text: Option<String>,
        links: Vec<LinkInfo>,
        children: Vec<Node>,
    ) -> Self {
        DocsResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            definition: DefinitionInfo::from_definition(definition),
            text,
            links,
            children,
        }
    }
}

impl TextOutput for DocsResponse {
    fn write_text(&self, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "{}", self.definition.text_line())?;
        if let Some(text) = &self.text {
            writeln!(writer)?;
            writeln!(writer, "{}", text)?;
        }
        let tags: Vec<String> = decode_core::comment::to_lines(&self.children)
            .into_iter()
            .filter(|line| line.trim_start().starts_with('@'))
            .collect();
        if !tags.is_empty() {
            writeln!(writer)?;
            for line in tags {
                writeln!(writer, "{}", line)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error details in a JSON error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Numeric error code, also the exit status.
    pub code: u8,
    pub message: String,
}

impl ErrorInfo {
    pub fn from_error(err: &CliError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
        }
    }
}

/// Response emitted when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn new(err: &CliError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Output format selected with `--format`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Emit a response in the requested format.
pub fn emit<T: Serialize + TextOutput>(
    response: &T,
    format: OutputFormat,
    writer: &mut impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => response.write_text(writer),
        OutputFormat::Json => emit_response(response, writer),
    }
}

// ============================================================================
// Tests
// ============================================================================
