//! Exporter registry for discovery and selection

use std::collections::HashMap;

use crate::element::Document;
use crate::error::ExportError;
use crate::export::Exporter;

/// Registry of export back-ends, keyed by name.
pub struct ExporterRegistry {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ExporterRegistry {
            exporters: HashMap::new(),
        }
    }

    /// Register an exporter, replacing any with the same name.
    pub fn register<E: Exporter + 'static>(&mut self, exporter: E) {
        self.exporters
            .insert(exporter.name().to_string(), Box::new(exporter));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Exporter, ExportError> {
        self.exporters
            .get(name)
            .map(|e| e.as_ref())
            .ok_or_else(|| ExportError::ExporterNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.exporters.contains_key(name)
    }

    /// List all exporter names (sorted)
    pub fn list_exporters(&self) -> Vec<String> {
        let mut names: Vec<_> = self.exporters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name of the exporter handling the extension of `filename`, if any.
    pub fn detect_exporter_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        let mut names = self.list_exporters();
        names.retain(|name| {
            self.exporters
                .get(name)
                .is_some_and(|exporter| exporter.file_extensions().contains(&extension))
        });
        names.into_iter().next()
    }

    pub fn export(&self, document: &Document, exporter: &str) -> Result<String, ExportError> {
        self.get(exporter)?.export(document)
    }

    pub fn export_with_options(
        &self,
        document: &Document,
        exporter: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, ExportError> {
        self.get(exporter)?.export_with_options(document, options)
    }

    /// Create a registry with the built-in exporters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::export::html::HtmlExporter::default());
        registry.register(crate::export::latex::LatexExporter::default());
        registry.register(crate::export::css::CssExporter);
        registry
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainExporter;

    impl Exporter for PlainExporter {
        fn name(&self) -> &str {
            "plain"
        }

        fn file_extensions(&self) -> &[&str] {
            &["txt"]
        }

        fn export_with_options(
            &self,
            document: &Document,
            _options: &HashMap<String, String>,
        ) -> Result<String, ExportError> {
            Ok(document
                .paragraphs()
                .iter()
                .map(|paragraph| paragraph.text() + "\n")
                .collect())
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = ExporterRegistry::new();
        assert!(registry.list_exporters().is_empty());
    }

    #[test]
    fn test_registry_register_and_export() {
        let mut registry = ExporterRegistry::new();
        registry.register(PlainExporter);

        let document = Document::new();
        document.add_paragraph("first", None);
        document.add_paragraph("second", None);

        assert!(registry.has("plain"));
        assert_eq!(registry.export(&document, "plain").unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = ExporterRegistry::new();
        match registry.get("rtf") {
            Err(ExportError::ExporterNotFound(name)) => assert_eq!(name, "rtf"),
            _ => panic!("Expected ExporterNotFound error"),
        }
    }

    #[test]
    fn test_defaults() {
        let registry = ExporterRegistry::default();
        assert_eq!(registry.list_exporters(), vec!["css", "html", "latex"]);
    }

    #[test]
    fn test_detect_exporter_from_filename() {
        let registry = ExporterRegistry::default();
        assert_eq!(
            registry.detect_exporter_from_filename("out/page.htm"),
            Some("html".to_string())
        );
        assert_eq!(
            registry.detect_exporter_from_filename("paper.tex"),
            Some("latex".to_string())
        );
        assert_eq!(
            registry.detect_exporter_from_filename("styles.css"),
            Some("css".to_string())
        );
        assert_eq!(registry.detect_exporter_from_filename("notes.rtf"), None);
        assert_eq!(registry.detect_exporter_from_filename("README"), None);
    }

    #[test]
    fn test_html_style_option_is_fatal_when_unknown() {
        let registry = ExporterRegistry::default();
        let options: HashMap<String, String> =
            [("style".to_string(), "xhtml".to_string())].into();
        let result = registry.export_with_options(&Document::new(), "html", &options);
        assert!(matches!(result, Err(ExportError::Fatal(diagnostic)) if diagnostic.is_fatal()));
    }
}
