//! Export of formatted documents
//!
//! Every back-end implements [`Exporter`] and is discovered through the
//! [`ExporterRegistry`]. Back-ends share two pieces of machinery:
//!
//! - [`layout`] regroups the flat paragraph sequence into lists and items.
//! - [`classes::FormatClasses`] names each distinct format, so the HTML body
//!   and the stylesheet agree on class names.
//!
//! Problems found while exporting are reported through [`diagnostic::Diagnostics`];
//! a fatal diagnostic aborts the run with [`ExportError::Fatal`].

pub mod classes;
pub mod css;
pub mod diagnostic;
pub mod html;
pub mod latex;
pub mod layout;
pub mod registry;

use std::collections::HashMap;

use crate::element::Document;
use crate::error::ExportError;

pub use classes::FormatClasses;
pub use css::CssExporter;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use html::{HtmlExporter, HtmlStyle};
pub use latex::LatexExporter;
pub use registry::ExporterRegistry;

/// A document export back-end.
pub trait Exporter: Send + Sync {
    /// The name of this exporter (e.g., "html", "latex")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used to pick an exporter
    /// from an output filename.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn export(&self, document: &Document) -> Result<String, ExportError> {
        self.export_with_options(document, &HashMap::new())
    }

    /// Export with back-end specific options (`--extra-<key>` on the command line).
    fn export_with_options(
        &self,
        document: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, ExportError>;
}
