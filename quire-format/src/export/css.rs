//! Stylesheet export
//!
//! One rule (or rule group, for bulleted items) per distinct format, keyed by
//! the class names of [`FormatClasses`]. The HTML5 back-end embeds the same
//! stylesheet.

use std::collections::HashMap;

use crate::element::Document;
use crate::error::ExportError;
use crate::export::classes::{element_tag, FormatClasses};
use crate::export::Exporter;

/// Rules for every class in `classes`.
pub fn stylesheet(classes: &FormatClasses) -> String {
    let mut css = String::new();
    for (class, format) in classes.iter() {
        let format = format.borrow();
        css.push_str(&format.to_css_entry(class, element_tag(&*format), ""));
    }
    css
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CssExporter;

impl Exporter for CssExporter {
    fn name(&self) -> &str {
        "css"
    }

    fn description(&self) -> &str {
        "CSS stylesheet of the document's formats"
    }

    fn file_extensions(&self) -> &[&str] {
        &["css"]
    }

    fn export_with_options(
        &self,
        document: &Document,
        _options: &HashMap<String, String>,
    ) -> Result<String, ExportError> {
        Ok(stylesheet(&FormatClasses::from_document(document)))
    }
}
