//! Subcommand handlers
//!
//! Each handler returns the text to print so `main` stays in charge of the
//! process (stdout, exit codes).

use std::collections::HashMap;
use std::fs;

use quire_config::QuireConfig;
use quire_format::element::{Element, ElementKind, ElementPointer};
use quire_format::export::ExporterRegistry;
use quire_format::format::bullets;
use quire_format::{AggregationsByCapability, Document, ExportError, FormatError, FormatOrganizer};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Error reading file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Error writing file '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Sheet { path: String, source: FormatError },
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Could not detect exporter from filename '{0}', use --to")]
    UnknownTarget(String),
    #[error("Missing export target, use --to or -o <file>")]
    MissingTarget,
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read and parse the sheet at `path`.
pub fn load_sheet(path: &str) -> Result<FormatOrganizer, CommandError> {
    let text = fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_string(),
        source,
    })?;
    FormatOrganizer::read(&text).map_err(|source| CommandError::Sheet {
        path: path.to_string(),
        source,
    })
}

/// Which parts of each format `inspect` prints.
#[derive(Debug, Clone, Copy)]
pub struct InspectOptions {
    pub show_css: bool,
    pub show_string: bool,
}

impl From<&QuireConfig> for InspectOptions {
    fn from(config: &QuireConfig) -> Self {
        Self {
            show_css: config.inspect.show_css,
            show_string: config.inspect.show_string,
        }
    }
}

pub fn inspect(organizer: &FormatOrganizer, options: InspectOptions) -> String {
    let mut output = String::new();
    for (identifier, format) in organizer.formats() {
        let format = format.borrow();
        output.push_str(&format!("{identifier}: {}\n", format.type_name()));
        output.push_str(&format!("  capabilities: {}\n", format.capabilities()));
        output.push_str(&format!(
            "  valid: {}\n",
            if format.is_valid() { "yes" } else { "no" }
        ));
        if options.show_string {
            output.push_str(&format!("  string: {}\n", format.to_format_string()));
        }
        if options.show_css {
            output.push_str(&format!("  css: {}\n", format.to_css()));
        }
    }
    output
}

/// The sheet re-read and re-written in canonical form.
pub fn normalize(organizer: &FormatOrganizer) -> String {
    let mut text = organizer.write();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn aggregations(organizer: &FormatOrganizer) -> AggregationsByCapability {
    let mut aggregations = AggregationsByCapability::new();
    for (_, format) in organizer.formats() {
        aggregations.add_format(format, None, true);
    }
    aggregations
}

pub fn aggregate(organizer: &FormatOrganizer) -> String {
    let mut output = String::new();
    for (capability, aggregation) in aggregations(organizer).iter() {
        output.push_str(&format!(
            "{capability} ({} formats)\n",
            aggregation.number_formats()
        ));
        for (property, values) in aggregation.summary() {
            output.push_str(&format!("  {property}: {values}\n"));
        }
    }
    output
}

pub fn aggregate_json(organizer: &FormatOrganizer) -> Result<String, CommandError> {
    let entries: Vec<serde_json::Value> = aggregations(organizer)
        .iter()
        .map(|(capability, aggregation)| {
            let summary: serde_json::Map<String, serde_json::Value> = aggregation
                .summary()
                .into_iter()
                .map(|(property, values)| (property, serde_json::Value::String(values)))
                .collect();
            json!({
                "capability": capability,
                "formats": aggregation.number_formats(),
                "summary": summary,
            })
        })
        .collect();
    let mut text = serde_json::to_string_pretty(&entries)?;
    text.push('\n');
    Ok(text)
}

/// A document showing every format of the sheet: one sample paragraph per
/// paragraph format, and one run per character-level format.
pub fn specimen_document(organizer: &FormatOrganizer) -> Document {
    let document = Document::new();
    let mut inline: Option<ElementPointer> = None;
    for (identifier, format) in organizer.formats() {
        let (type_name, is_paragraph) = {
            let format = format.borrow();
            (format.type_name(), format.as_text_block().is_some())
        };
        if is_paragraph {
            document.add_paragraph(
                &format!("{identifier} ({type_name}): The quick brown fox jumps over the lazy dog."),
                Some(format.clone()),
            );
        } else {
            let paragraph =
                inline.get_or_insert_with(|| document.add_paragraph("Inline formats: ", None));
            let run = Element::new(ElementKind::Text);
            run.set_text(&format!("{identifier} "));
            run.set_format(Some(format.clone()));
            paragraph.append_child(run);
        }
    }
    document
}

/// Export the specimen document of `organizer`.
///
/// `to` wins over the extension of `output`. Options come from the
/// configuration, then `extra` overrides them key by key.
pub fn export(
    organizer: &FormatOrganizer,
    to: Option<&str>,
    output: Option<&str>,
    config: &QuireConfig,
    extra: &HashMap<String, String>,
) -> Result<Option<String>, CommandError> {
    let registry = ExporterRegistry::default();
    let target = match (to, output) {
        (Some(to), _) => to.to_string(),
        (None, Some(path)) => registry
            .detect_exporter_from_filename(path)
            .ok_or_else(|| CommandError::UnknownTarget(path.to_string()))?,
        (None, None) => return Err(CommandError::MissingTarget),
    };

    let mut options = config.export.options(&target);
    for (key, value) in extra {
        options.insert(key.clone(), value.clone());
    }

    let document = specimen_document(organizer);
    let text = registry.export_with_options(&document, &target, &options)?;
    tracing::info!(exporter = %target, bytes = text.len(), "exported specimen document");

    match output {
        Some(path) => {
            fs::write(path, text).map_err(|source| CommandError::Write {
                path: path.to_string(),
                source,
            })?;
            Ok(None)
        }
        None => Ok(Some(text)),
    }
}

pub fn bullets() -> String {
    let mut output = String::new();
    for bullet in bullets::standard_bullets() {
        let c = bullet.bullet();
        output.push_str(&format!(
            "{c}  U+{:04X}  {:<18} {:<7} {}\n",
            u32::from(c),
            bullet.category().to_string(),
            bullet.html_category().keyword(),
            bullet.description()
        ));
    }
    output
}

pub fn list_exporters() -> String {
    let registry = ExporterRegistry::default();
    let mut output = String::from("Available exporters:\n");
    for name in registry.list_exporters() {
        let Ok(exporter) = registry.get(&name) else {
            continue;
        };
        let extensions: Vec<String> = exporter
            .file_extensions()
            .iter()
            .map(|extension| format!(".{extension}"))
            .collect();
        output.push_str(&format!(
            "  {name:<6} {} ({})\n",
            exporter.description(),
            extensions.join(", ")
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_format::format::character::CharacterFormat;
    use quire_format::format::paragraph::ParagraphFormat;
    use quire_format::format::Format;

    fn organizer() -> FormatOrganizer {
        let mut organizer = FormatOrganizer::new();
        organizer.add_format(&ParagraphFormat::new().into_pointer());
        organizer.add_format(&CharacterFormat::new().into_pointer());
        organizer
    }

    #[test]
    fn specimen_has_a_paragraph_per_paragraph_format() {
        let document = specimen_document(&organizer());
        let paragraphs = document.paragraphs();
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs[0].text().starts_with("f1 (ParagraphFormat): "));
        assert_eq!(paragraphs[1].text(), "Inline formats: ");
        assert_eq!(paragraphs[1].children().len(), 1);
    }

    #[test]
    fn inspect_honors_options() {
        let text = inspect(
            &organizer(),
            InspectOptions {
                show_css: false,
                show_string: true,
            },
        );
        assert!(text.contains("f1: ParagraphFormat\n"));
        assert!(text.contains("  valid: yes\n"));
        assert!(text.contains("  string: ParagraphFormat"));
        assert!(!text.contains("  css:"));
    }

    #[test]
    fn aggregate_lists_every_capability() {
        quire_format::register_all();
        let text = aggregate(&organizer());
        assert!(text.contains("Format (2 formats)\n"));
        assert!(text.contains("BlockFormat (1 formats)\n"));
        assert!(text.contains("CharacterFormat (1 formats)\n"));
    }

    #[test]
    fn export_requires_a_target() {
        let config = quire_config::load_defaults().expect("defaults");
        let result = export(&organizer(), None, None, &config, &HashMap::new());
        assert!(matches!(result, Err(CommandError::MissingTarget)));
        let result = export(&organizer(), None, Some("out.rtf"), &config, &HashMap::new());
        assert!(matches!(result, Err(CommandError::UnknownTarget(_))));
    }

    #[test]
    fn bullets_table_has_the_default_bullet() {
        assert!(bullets().lines().any(|line| line.starts_with("\u{2022}  U+2022")));
    }
}
