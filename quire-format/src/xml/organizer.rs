//! Format sheets
//!
//! A format sheet is the persisted list of the distinct formats a document
//! uses:
//!
//! ```xml
//! <Formats>
//!   <ParagraphFormat identifier="f1" top="0"/>
//!   <OrderedListParagraphFormat identifier="f2" style="ROMAN_UPPER_CASE"/>
//! </Formats>
//! ```
//!
//! Every child tag is a registered format type name. Besides the
//! `identifier` it carries the format's full attribute chain.

use std::collections::HashMap;

use crate::element::Document;
use crate::error::FormatError;
use crate::format::FormatPointer;
use crate::registry;
use crate::xml::{XmlAttributes, XmlReader, XmlWriter};

pub const ROOT_TAG: &str = "Formats";

pub const IDENTIFIER_ATTRIBUTE: &str = "identifier";

/// Collects formats, merging structurally identical ones, and assigns each
/// distinct format an identifier.
#[derive(Debug, Default)]
pub struct FormatOrganizer {
    entries: Vec<(String, FormatPointer)>,
    by_description: HashMap<String, usize>,
}

impl FormatOrganizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a format and return its identifier.
    ///
    /// A format equal to one already added (same `to_format_string`) gets
    /// the identifier of the earlier one. Formats are compared by their
    /// current description, so a shared format edited in place is looked up
    /// afresh.
    pub fn add_format(&mut self, format: &FormatPointer) -> String {
        let description = format.borrow().to_format_string();
        let index = match self.by_description.get(&description) {
            Some(&index) => index,
            None => {
                let identifier = self.next_identifier();
                self.insert(identifier, format.clone(), description)
            }
        };
        self.entries[index].0.clone()
    }

    /// Add every format referenced by `document`.
    pub fn add_document(&mut self, document: &Document) {
        for format in document.formats() {
            self.add_format(&format);
        }
    }

    pub fn identifier(&self, format: &FormatPointer) -> Option<&str> {
        let description = format.borrow().to_format_string();
        self.by_description
            .get(&description)
            .map(|&index| self.entries[index].0.as_str())
    }

    /// The canonical format stored under `identifier`.
    pub fn format(&self, identifier: &str) -> Option<FormatPointer> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == identifier)
            .map(|(_, format)| format.clone())
    }

    /// `(identifier, format)` pairs in insertion order.
    pub fn formats(&self) -> impl Iterator<Item = (&str, &FormatPointer)> {
        self.entries
            .iter()
            .map(|(identifier, format)| (identifier.as_str(), format))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the sheet.
    pub fn write(&self) -> String {
        let mut writer = XmlWriter::new();
        writer.start_element(ROOT_TAG);
        for (identifier, format) in &self.entries {
            let format = format.borrow();
            let mut attributes = XmlAttributes::new();
            attributes.append(IDENTIFIER_ATTRIBUTE, identifier);
            format.write_add_attributes(&mut attributes);
            writer.write_empty_element(format.type_name(), &attributes);
        }
        writer.end_element();
        writer.end_document()
    }

    /// Parse a sheet. Format types must be registered beforehand, see
    /// [`registry::register_all`].
    pub fn read(text: &str) -> Result<Self, FormatError> {
        let document =
            roxmltree::Document::parse(text).map_err(|err| FormatError::Syntax(err.to_string()))?;
        let root = document.root_element();
        if root.tag_name().name() != ROOT_TAG {
            return Err(FormatError::Sheet(format!(
                "expected root tag \"{ROOT_TAG}\", found \"{}\"",
                root.tag_name().name()
            )));
        }

        let mut organizer = Self::new();
        let mut reader = XmlReader::new();
        for node in root.children().filter(|node| node.is_element()) {
            let tag = node.tag_name().name();
            let position = document.text_pos_at(node.range().start);
            reader.set_context(tag, Some((position.row, position.col)));

            let Some(format) = registry::create_format(tag) else {
                reader.raise_error(format!("Unknown format type \"{tag}\""));
                reader.finish()?;
                continue;
            };

            let Some(identifier) = node.attribute(IDENTIFIER_ATTRIBUTE) else {
                reader.raise_error(format!("Missing attribute \"{IDENTIFIER_ATTRIBUTE}\""));
                reader.finish()?;
                continue;
            };
            if organizer.format(identifier).is_some() {
                return Err(FormatError::Sheet(format!(
                    "duplicate identifier \"{identifier}\""
                )));
            }

            let attributes: XmlAttributes = node
                .attributes()
                .filter(|attribute| attribute.name() != IDENTIFIER_ATTRIBUTE)
                .map(|attribute| (attribute.name(), attribute.value()))
                .collect();
            format.borrow_mut().read_attributes(&mut reader, &attributes);
            reader.finish()?;

            let description = format.borrow().to_format_string();
            organizer.insert(identifier.to_string(), format, description);
        }

        tracing::debug!(formats = organizer.len(), "read format sheet");
        Ok(organizer)
    }

    fn insert(&mut self, identifier: String, format: FormatPointer, description: String) -> usize {
        let index = self.entries.len();
        self.entries.push((identifier, format));
        self.by_description.entry(description).or_insert(index);
        index
    }

    fn next_identifier(&self) -> String {
        let mut number = self.entries.len() + 1;
        loop {
            let identifier = format!("f{number}");
            if self.format(&identifier).is_none() {
                return identifier;
            }
            number += 1;
        }
    }
}
