//! HTML export
//!
//! Two styles are supported:
//!
//! | Style               | Paragraph formats                   | Lists                                           |
//! |---------------------|-------------------------------------|-------------------------------------------------|
//! | `html5` (default)   | `class` attributes + `<style>` sheet | `<ol start>`/`<ul>`, `<li class>`, `_no_bullet` |
//! | `html4`             | inline `align` attributes           | `<ol type>`/`<ul type>`, `<li value>`           |
//!
//! Options: `style` (`html5` or `html4`) and `title`. Any other style is a
//! fatal diagnostic that stops the export.
//!
//! Continuation paragraphs of a bulleted item render as `<li>` with the
//! item's `_no_bullet` class in HTML5, and as nested `<p>` otherwise.
//!
//! The DOM is built with `markup5ever_rcdom` and serialized with `html5ever`.

mod serializer;

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::element::Document;
use crate::error::ExportError;
use crate::export::diagnostic::{Diagnostic, Diagnostics};
use crate::export::Exporter;

pub use serializer::{serialize_document, HtmlOptions};

pub const DEFAULT_TITLE: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlStyle {
    #[default]
    Html5WithCss,
    Html4WithoutCss,
}

impl HtmlStyle {
    pub fn token(self) -> &'static str {
        match self {
            HtmlStyle::Html5WithCss => "html5",
            HtmlStyle::Html4WithoutCss => "html4",
        }
    }
}

impl Display for HtmlStyle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for HtmlStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html5" => Ok(HtmlStyle::Html5WithCss),
            "html4" => Ok(HtmlStyle::Html4WithoutCss),
            _ => Err(format!("Unsupported HTML style \"{s}\"")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    style: HtmlStyle,
    title: Option<String>,
}

impl HtmlExporter {
    pub fn new(style: HtmlStyle) -> Self {
        Self { style, title: None }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    fn options(
        &self,
        options: &HashMap<String, String>,
        diagnostics: &mut Diagnostics,
    ) -> Result<HtmlOptions, ExportError> {
        let style = match options.get("style") {
            Some(value) => match value.parse::<HtmlStyle>() {
                Ok(style) => style,
                Err(message) => {
                    diagnostics.report(Diagnostic::fatal(message))?;
                    self.style
                }
            },
            None => self.style,
        };
        let title = options
            .get("title")
            .cloned()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        Ok(HtmlOptions { style, title })
    }
}

impl Exporter for HtmlExporter {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 with an embedded stylesheet, or HTML 4 without CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn export_with_options(
        &self,
        document: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, ExportError> {
        let mut diagnostics = Diagnostics::new();
        let options = self.options(options, &mut diagnostics)?;
        serialize_document(document, &options)
    }
}
