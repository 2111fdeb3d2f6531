//! Error types for format sheets and export

use thiserror::Error;

use crate::export::diagnostic::Diagnostic;

/// Error raised while reading a format attribute chain.
///
/// Carries the tag being read and, when known, the position in the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", location_suffix(.tag, .position))]
pub struct XmlError {
    pub message: String,
    pub tag: Option<String>,
    pub position: Option<(u32, u32)>,
}

fn location_suffix(tag: &Option<String>, position: &Option<(u32, u32)>) -> String {
    match (tag, position) {
        (Some(tag), Some((row, col))) => format!(" (tag \"{tag}\", line {row}, column {col})"),
        (Some(tag), None) => format!(" (tag \"{tag}\")"),
        (None, Some((row, col))) => format!(" (line {row}, column {col})"),
        (None, None) => String::new(),
    }
}

/// Errors that can occur while loading or writing format sheets
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The XML itself could not be parsed
    #[error("XML parsing error: {0}")]
    Syntax(String),
    /// A format's attribute chain rejected its input
    #[error("{0}")]
    Xml(#[from] XmlError),
    /// Sheet-level structure error (wrong root, duplicate identifiers, ...)
    #[error("Invalid format sheet: {0}")]
    Sheet(String),
    /// Writing the sheet failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors that can occur during export
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Exporter not found in registry
    #[error("Exporter '{0}' not found")]
    ExporterNotFound(String),
    /// A fatal diagnostic stopped the translation
    #[error("{0}")]
    Fatal(Diagnostic),
    /// Error while producing the output text
    #[error("Serialization error: {0}")]
    Serialization(String),
}
