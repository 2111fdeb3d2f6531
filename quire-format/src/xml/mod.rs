//! XML attribute plumbing shared by every format
//!
//! Formats never touch the XML document directly. Writing appends to an
//! ordered [`XmlAttributes`] list that the [`XmlWriter`] later emits on one
//! tag; reading consumes an [`XmlAttributes`] collected from a parsed tag and
//! reports problems through the [`XmlReader`] error flag, which is shared by
//! every step of a read chain. The first raised error wins.

pub mod organizer;

use std::fmt::Display;
use std::str::FromStr;

use crate::error::XmlError;

pub use organizer::FormatOrganizer;

/// Ordered name/value attribute list of one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlAttributes {
    entries: Vec<(String, String)>,
}

impl XmlAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute. An existing attribute of the same name is
    /// replaced in place so its position is kept.
    pub fn append(&mut self, name: &str, value: impl Display) {
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse an attribute value.
    ///
    /// Returns `None` when the attribute is absent or malformed; a malformed
    /// value also raises an error on `reader`.
    pub fn parse_value<T: FromStr>(&self, reader: &mut XmlReader, name: &str) -> Option<T> {
        let raw = self.value(name)?;
        match raw.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                reader.raise_error(format!("Invalid value \"{raw}\" for attribute \"{name}\""));
                None
            }
        }
    }

    /// Parse an attribute value, falling back to `default` when it is absent
    /// or malformed.
    pub fn parse_or<T: FromStr>(&self, reader: &mut XmlReader, name: &str, default: T) -> T {
        self.parse_value(reader, name).unwrap_or(default)
    }

    /// Parse a non-negative length in points.
    pub fn parse_length(&self, reader: &mut XmlReader, name: &str, default: f32) -> f32 {
        let value = self.parse_or(reader, name, default);
        if value < 0.0 || !value.is_finite() {
            reader.raise_error(format!(
                "Invalid value \"{value}\" for attribute \"{name}\", expected a non-negative length"
            ));
            return default;
        }
        value
    }

    /// Parse a `true`/`false` flag, also accepting `1`/`0`.
    pub fn parse_bool(&self, reader: &mut XmlReader, name: &str, default: bool) -> bool {
        match self.value(name) {
            None => default,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(raw) => {
                reader.raise_error(format!("Invalid value \"{raw}\" for attribute \"{name}\""));
                default
            }
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for XmlAttributes {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.append(name, value);
        }
        attributes
    }
}

/// Error sink of a read chain.
///
/// The reader remembers which tag is being read and where it sits in the
/// source so raised errors can point at it.
#[derive(Debug, Default)]
pub struct XmlReader {
    error: Option<XmlError>,
    tag: Option<String>,
    position: Option<(u32, u32)>,
}

impl XmlReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the tag about to be read.
    pub fn set_context(&mut self, tag: &str, position: Option<(u32, u32)>) {
        self.tag = Some(tag.to_string());
        self.position = position;
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Raise an error. Ignored when an error was already raised.
    pub fn raise_error(&mut self, message: impl Into<String>) {
        if self.error.is_some() {
            return;
        }
        let error = XmlError {
            message: message.into(),
            tag: self.tag.clone(),
            position: self.position,
        };
        tracing::debug!(%error, "format attribute read failed");
        self.error = Some(error);
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&XmlError> {
        self.error.as_ref()
    }

    /// Take the raised error, leaving the reader clean.
    pub fn take_error(&mut self) -> Option<XmlError> {
        self.error.take()
    }

    /// Convert the error flag into a `Result`.
    pub fn finish(&mut self) -> Result<(), XmlError> {
        match self.take_error() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Indented XML output built on [`xmlwriter`].
pub struct XmlWriter {
    inner: xmlwriter::XmlWriter,
}

impl XmlWriter {
    pub fn new() -> Self {
        let options = xmlwriter::Options {
            use_single_quote: false,
            indent: xmlwriter::Indent::Spaces(2),
            attributes_indent: xmlwriter::Indent::None,
        };
        let mut inner = xmlwriter::XmlWriter::new(options);
        inner.write_declaration();
        Self { inner }
    }

    pub fn start_element(&mut self, tag: &str) {
        self.inner.start_element(tag);
    }

    pub fn write_attributes(&mut self, attributes: &XmlAttributes) {
        for (name, value) in attributes.iter() {
            self.inner.write_attribute(name, value);
        }
    }

    /// Write an empty element carrying `attributes`.
    pub fn write_empty_element(&mut self, tag: &str, attributes: &XmlAttributes) {
        self.start_element(tag);
        self.write_attributes(attributes);
        self.end_element();
    }

    pub fn end_element(&mut self) {
        self.inner.end_element();
    }

    pub fn end_document(self) -> String {
        self.inner.end_document()
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_replaces_existing_in_place() {
        let mut attributes = XmlAttributes::new();
        attributes.append("left", 1);
        attributes.append("right", 2);
        attributes.append("left", 3);

        let names: Vec<&str> = attributes.names().collect();
        assert_eq!(names, vec!["left", "right"]);
        assert_eq!(attributes.value("left"), Some("3"));
    }

    #[test]
    fn first_error_wins() {
        let mut reader = XmlReader::new();
        reader.set_context("BlockFormat", Some((2, 3)));
        reader.raise_error("first");
        reader.raise_error("second");

        let error = reader.error().expect("error raised");
        assert_eq!(error.message, "first");
        assert_eq!(error.tag.as_deref(), Some("BlockFormat"));
    }

    #[test]
    fn malformed_values_raise_errors() {
        let attributes: XmlAttributes = [("left", "wide")].into_iter().collect();
        let mut reader = XmlReader::new();

        assert_eq!(attributes.parse_or(&mut reader, "left", 0.0f32), 0.0);
        assert!(reader.has_error());
        assert!(reader
            .error()
            .map(|error| error.message.contains("\"left\""))
            .unwrap_or(false));
    }

    #[test]
    fn negative_lengths_are_rejected() {
        let attributes: XmlAttributes = [("top", "-3")].into_iter().collect();
        let mut reader = XmlReader::new();

        assert_eq!(attributes.parse_length(&mut reader, "top", 6.0), 6.0);
        assert!(reader.has_error());
    }

    #[test]
    fn absent_values_use_defaults_silently() {
        let attributes = XmlAttributes::new();
        let mut reader = XmlReader::new();

        assert_eq!(attributes.parse_length(&mut reader, "top", 6.0), 6.0);
        assert!(attributes.parse_bool(&mut reader, "italic", true));
        assert!(!reader.has_error());
    }

    #[test]
    fn writer_emits_attributes_in_order() {
        let mut attributes = XmlAttributes::new();
        attributes.append("identifier", 1);
        attributes.append("left", 10);

        let mut writer = XmlWriter::new();
        writer.start_element("Formats");
        writer.write_empty_element("BlockFormat", &attributes);
        writer.end_element();
        let xml = writer.end_document();

        assert!(xml.contains("<BlockFormat identifier=\"1\" left=\"10\"/>"));
    }
}
