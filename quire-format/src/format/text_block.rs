//! Text blocks: justified blocks of text with a font, first line indentation
//! and line spacing

use std::any::Any;
use std::collections::BTreeSet;

use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::font::{self, FontFormat};
use crate::format::justified_block::{self, JustifiedBlockFormat};
use crate::format::{Capabilities, FormatPointer};
use crate::scalar::{points, Scalar};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "TextBlockFormat";

pub const DEFAULT_LINE_SPACING: f32 = 1.0;

pub fn capabilities() -> Capabilities {
    justified_block::capabilities()
        .merge(font::capabilities())
        .with(NAME)
}

/// First line indentation and line spacing.
///
/// A missing first line indentation means the first line starts at the
/// block's left indentation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlockProps {
    pub first_line_left_indentation: Option<f32>,
    pub line_spacing: f32,
}

impl Default for TextBlockProps {
    fn default() -> Self {
        Self {
            first_line_left_indentation: None,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }
}

impl TextBlockProps {
    pub fn is_valid(&self) -> bool {
        let first_line_valid = self
            .first_line_left_indentation
            .map_or(true, |value| value.is_finite() && value >= 0.0);
        first_line_valid && self.line_spacing.is_finite() && self.line_spacing > 0.0
    }

    pub fn string_fields(&self) -> Vec<String> {
        vec![
            self.first_line_left_indentation
                .map(points)
                .unwrap_or_default(),
            points(self.line_spacing),
        ]
    }

    /// CSS declarations; `left_indentation` is needed to express the first
    /// line as a relative `text-indent`.
    pub fn to_css(&self, left_indentation: f32) -> String {
        let mut css = String::new();
        if let Some(first_line) = self.first_line_left_indentation {
            css.push_str(&format!(
                "text-indent: {}pt; ",
                points(first_line - left_indentation)
            ));
        }
        if self.line_spacing != DEFAULT_LINE_SPACING {
            css.push_str(&format!("line-height: {}; ", points(self.line_spacing)));
        }
        css
    }

    pub fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if let Some(first_line) = self.first_line_left_indentation {
            attributes.append("hanging", points(first_line));
        }
        if self.line_spacing != DEFAULT_LINE_SPACING {
            attributes.append("spacing", points(self.line_spacing));
        }
    }

    pub fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let first_line = if attributes.is_defined("hanging") {
            Some(attributes.parse_length(reader, "hanging", 0.0))
        } else {
            None
        };
        let line_spacing = attributes.parse_or(reader, "spacing", DEFAULT_LINE_SPACING);
        if !reader.has_error() && !(line_spacing > 0.0 && line_spacing.is_finite()) {
            reader.raise_error(format!(
                "Invalid value \"{line_spacing}\" for attribute \"spacing\", expected a positive factor"
            ));
        }

        if !reader.has_error() {
            self.first_line_left_indentation = first_line;
            self.line_spacing = line_spacing;
        }
    }
}

/// Justified blocks of text carrying a font.
pub trait TextBlockFormat: JustifiedBlockFormat + FontFormat {
    fn text_block(&self) -> &TextBlockProps;

    fn text_block_mut(&mut self) -> &mut TextBlockProps;

    /// Left indentation of the first line.
    fn first_line_left_indentation(&self) -> f32 {
        self.text_block()
            .first_line_left_indentation
            .unwrap_or_else(|| self.left_indentation())
    }

    /// Set the first line indentation; `None` follows the left indentation.
    fn set_first_line_left_indentation(&mut self, value: Option<f32>) {
        self.text_block_mut().first_line_left_indentation = value;
    }

    fn line_spacing(&self) -> f32 {
        self.text_block().line_spacing
    }

    fn set_line_spacing(&mut self, value: f32) {
        self.text_block_mut().line_spacing = value;
    }
}

/// Justified block summary plus fonts, first line indentations and line
/// spacings.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    justified: justified_block::Aggregation,
    fonts: font::Summary,
    first_line_left_indentations: BTreeSet<Scalar>,
    line_spacings: BTreeSet<Scalar>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn justified(&self) -> &justified_block::Aggregation {
        &self.justified
    }

    pub fn fonts(&self) -> &font::Summary {
        &self.fonts
    }

    /// Effective first line indentations, already resolved against the left
    /// indentation.
    pub fn first_line_left_indentations(&self) -> &BTreeSet<Scalar> {
        &self.first_line_left_indentations
    }

    pub fn line_spacings(&self) -> &BTreeSet<Scalar> {
        &self.line_spacings
    }
}

impl aggregation::Aggregation for Aggregation {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn base(&self) -> &AggregationBase {
        self.justified.base()
    }

    fn base_mut(&mut self) -> &mut AggregationBase {
        self.justified.base_mut()
    }

    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        let format_ref = format.borrow();
        let Some(text_block) = format_ref.as_text_block() else {
            return false;
        };
        if !self.justified.add_format(format, include_existing) {
            return false;
        }

        self.fonts.include(text_block.font());
        self.first_line_left_indentations
            .insert(Scalar::new(text_block.first_line_left_indentation()));
        self.line_spacings
            .insert(Scalar::new(text_block.line_spacing()));
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let mut summary = self.justified.summary();
        summary.push((
            "first line".to_string(),
            aggregation::describe_lengths(&self.first_line_left_indentations),
        ));
        summary.push((
            "line spacing".to_string(),
            aggregation::describe_lengths(&self.line_spacings),
        ));
        summary.extend(self.fonts.describe());
        summary
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::aggregation::Aggregation as _;
    use crate::format::block::BlockFormat;
    use crate::format::paragraph::ParagraphFormat;
    use crate::format::Format;

    #[test]
    fn first_line_follows_left_indentation_when_unset() {
        let mut format = ParagraphFormat::new();
        format.set_left_indentation(20.0);
        assert_eq!(format.first_line_left_indentation(), 20.0);

        format.set_first_line_left_indentation(Some(36.0));
        assert_eq!(format.first_line_left_indentation(), 36.0);
    }

    #[test]
    fn hanging_attribute_is_written_only_when_set() {
        let mut attributes = XmlAttributes::new();
        TextBlockProps::default().write_add_immediate_attributes(&mut attributes);
        assert!(attributes.is_empty());

        let props = TextBlockProps {
            first_line_left_indentation: Some(0.0),
            line_spacing: 1.5,
        };
        props.write_add_immediate_attributes(&mut attributes);
        assert_eq!(attributes.value("hanging"), Some("0"));
        assert_eq!(attributes.value("spacing"), Some("1.5"));

        let mut reader = XmlReader::new();
        let mut read_back = TextBlockProps::default();
        read_back.read_immediate_attributes(&mut reader, &attributes);
        assert_eq!(read_back, props);
    }

    #[test]
    fn zero_line_spacing_is_rejected() {
        let attributes: XmlAttributes = [("spacing", "0")].into_iter().collect();
        let mut reader = XmlReader::new();
        let mut props = TextBlockProps::default();
        props.read_immediate_attributes(&mut reader, &attributes);
        assert!(reader.has_error());
        assert_eq!(props, TextBlockProps::default());
    }

    #[test]
    fn aggregation_resolves_first_line() {
        let mut indented = ParagraphFormat::new();
        indented.set_left_indentation(10.0);
        let mut hanging = ParagraphFormat::new();
        hanging.set_first_line_left_indentation(Some(0.0));

        let mut aggregation = Aggregation::new();
        aggregation.add_format(&indented.into_pointer(), true);
        aggregation.add_format(&hanging.into_pointer(), true);

        let values: Vec<f32> = aggregation
            .first_line_left_indentations()
            .iter()
            .map(|value| value.get())
            .collect();
        assert_eq!(values, vec![0.0, 10.0]);
        assert_eq!(aggregation.fonts().families().len(), 1);
        assert_eq!(aggregation.justified().block().left_indentations().len(), 2);
    }
}
