//! Common base of list item paragraphs

use std::any::Any;
use std::collections::BTreeSet;

use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::list_additional::ListAdditionalParagraphFormat;
use crate::format::paragraph;
use crate::format::text_block::TextBlockFormat;
use crate::format::{Capabilities, Format, FormatPointer};
use crate::scalar::{points, Scalar};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "ListParagraphFormatBase";

pub const DEFAULT_LIST_INDENTATION: f32 = 18.0;

pub fn capabilities() -> Capabilities {
    paragraph::capabilities().with(NAME)
}

/// Indentation of the item text relative to the label.
#[derive(Debug, Clone, PartialEq)]
pub struct ListProps {
    pub list_indentation: f32,
}

impl Default for ListProps {
    fn default() -> Self {
        Self {
            list_indentation: DEFAULT_LIST_INDENTATION,
        }
    }
}

impl ListProps {
    pub fn is_valid(&self) -> bool {
        self.list_indentation.is_finite() && self.list_indentation >= 0.0
    }

    pub fn string_fields(&self) -> Vec<String> {
        vec![points(self.list_indentation)]
    }

    pub fn to_css(&self) -> String {
        format!("padding-left: {}pt; ", points(self.list_indentation))
    }

    pub fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.list_indentation != DEFAULT_LIST_INDENTATION {
            attributes.append("list_indentation", points(self.list_indentation));
        }
    }

    pub fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let list_indentation =
            attributes.parse_length(reader, "list_indentation", DEFAULT_LIST_INDENTATION);
        if !reader.has_error() {
            self.list_indentation = list_indentation;
        }
    }
}

/// Paragraphs that start a list item.
pub trait ListParagraphFormatBase: TextBlockFormat {
    fn list(&self) -> &ListProps;

    fn list_mut(&mut self) -> &mut ListProps;

    fn list_indentation(&self) -> f32 {
        self.list().list_indentation
    }

    fn set_list_indentation(&mut self, value: f32) {
        self.list_mut().list_indentation = value;
    }
}

/// Paragraph chain followed by the list base attributes.
pub(crate) fn write_chain<F: ListParagraphFormatBase + ?Sized>(format: &F, attributes: &mut XmlAttributes) {
    paragraph::write_chain(format, attributes);
    format.list().write_add_immediate_attributes(attributes);
}

pub(crate) fn read_chain<F: ListParagraphFormatBase + ?Sized>(
    format: &mut F,
    reader: &mut XmlReader,
    attributes: &XmlAttributes,
) {
    paragraph::read_chain(format, reader, attributes);
    if !reader.has_error() {
        format.list_mut().read_immediate_attributes(reader, attributes);
    }
}

pub(crate) fn string_fields<F: ListParagraphFormatBase + ?Sized>(format: &F) -> Vec<String> {
    let mut fields = paragraph::string_fields(format);
    fields.extend(format.list().string_fields());
    fields
}

pub(crate) fn css<F: ListParagraphFormatBase + ?Sized>(format: &F) -> String {
    let mut css = paragraph::css(format);
    css.push_str(&format.list().to_css());
    css
}

pub(crate) fn is_valid<F: ListParagraphFormatBase + ?Sized>(format: &F) -> bool {
    paragraph::is_valid(format) && format.list().is_valid()
}

/// Format for the right half of a split list item: a continuation paragraph
/// of the same item.
pub(crate) fn format_for_split() -> Option<FormatPointer> {
    Some(ListAdditionalParagraphFormat::new().into_pointer())
}

/// Paragraph summary plus list indentations.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    paragraph: paragraph::Aggregation,
    list_indentations: BTreeSet<Scalar>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(&self) -> &paragraph::Aggregation {
        &self.paragraph
    }

    pub fn list_indentations(&self) -> &BTreeSet<Scalar> {
        &self.list_indentations
    }
}

impl aggregation::Aggregation for Aggregation {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn base(&self) -> &AggregationBase {
        self.paragraph.base()
    }

    fn base_mut(&mut self) -> &mut AggregationBase {
        self.paragraph.base_mut()
    }

    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        let format_ref = format.borrow();
        let Some(list) = format_ref.as_list_paragraph() else {
            return false;
        };
        if !self.paragraph.add_format(format, include_existing) {
            return false;
        }
        self.list_indentations
            .insert(Scalar::new(list.list_indentation()));
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let mut summary = self.paragraph.summary();
        summary.push((
            "list indentation".to_string(),
            aggregation::describe_lengths(&self.list_indentations),
        ));
        summary
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
