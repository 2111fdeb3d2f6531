//! Plain paragraphs
//!
//! Besides the `ParagraphFormat` leaf this module holds the attribute,
//! string and CSS chains shared by every paragraph-like leaf (list items and
//! list continuation paragraphs compose the same components).

use std::any::Any;

use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::block::BlockProps;
use crate::format::font::FontProps;
use crate::format::justified_block::{JustifiedProps, Justifications};
use crate::format::text_block::{self, TextBlockFormat, TextBlockProps};
use crate::format::{join_fields, Capabilities, Format, FormatBase, FormatPointer};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "ParagraphFormat";

pub fn capabilities() -> Capabilities {
    text_block::capabilities().with(NAME)
}

/// Append the attribute chain Block → JustifiedBlock → TextBlock → Font.
pub(crate) fn write_chain<F: TextBlockFormat + ?Sized>(format: &F, attributes: &mut XmlAttributes) {
    format.block().write_add_immediate_attributes(attributes);
    format.justified().write_add_immediate_attributes(attributes);
    format.text_block().write_add_immediate_attributes(attributes);
    format.font().write_add_immediate_attributes(attributes);
}

/// Read the attribute chain Block → JustifiedBlock → TextBlock → Font,
/// stopping at the first error.
pub(crate) fn read_chain<F: TextBlockFormat + ?Sized>(
    format: &mut F,
    reader: &mut XmlReader,
    attributes: &XmlAttributes,
) {
    format.block_mut().read_immediate_attributes(reader, attributes);
    if reader.has_error() {
        return;
    }
    format.justified_mut().read_immediate_attributes(reader, attributes);
    if reader.has_error() {
        return;
    }
    format.text_block_mut().read_immediate_attributes(reader, attributes);
    if reader.has_error() {
        return;
    }
    format.font_mut().read_immediate_attributes(reader, attributes);
}

/// Type name followed by the fields of every text block component.
pub(crate) fn string_fields<F: TextBlockFormat + ?Sized>(format: &F) -> Vec<String> {
    let mut fields = vec![format.type_name().to_string()];
    fields.extend(format.block().string_fields());
    fields.extend(format.justified().string_fields());
    fields.extend(format.text_block().string_fields());
    fields.extend(format.font().string_fields());
    fields
}

pub(crate) fn css<F: TextBlockFormat + ?Sized>(format: &F) -> String {
    let mut css = format.block().to_css();
    css.push_str(&format.justified().to_css());
    css.push_str(&format.text_block().to_css(format.left_indentation()));
    css.push_str(&format.font().to_css());
    css
}

pub(crate) fn is_valid<F: TextBlockFormat + ?Sized>(format: &F) -> bool {
    format.block().is_valid()
        && format.justified().is_valid()
        && format.text_block().is_valid()
        && format.font().is_valid()
}

/// Format of a plain paragraph.
#[derive(Debug, Clone)]
pub struct ParagraphFormat {
    base: FormatBase,
    block: BlockProps,
    justified: JustifiedProps,
    text_block: TextBlockProps,
    font: FontProps,
}

impl ParagraphFormat {
    pub fn new() -> Self {
        Self::with_supported_justifications(Justifications::all())
    }

    /// A paragraph format that only allows `supported` justification modes.
    pub fn with_supported_justifications(supported: Justifications) -> Self {
        Self {
            base: FormatBase::default(),
            block: BlockProps::default(),
            justified: JustifiedProps::new(supported),
            text_block: TextBlockProps::default(),
            font: FontProps::default(),
        }
    }

    pub fn creator() -> FormatPointer {
        Self::new().into_pointer()
    }
}

impl Default for ParagraphFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl_text_block_traits!(ParagraphFormat);

impl Format for ParagraphFormat {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        capabilities()
    }

    fn is_valid(&self) -> bool {
        is_valid(self)
    }

    fn to_format_string(&self) -> String {
        join_fields(&string_fields(self))
    }

    fn to_css(&self) -> String {
        css(self).trim_end().to_string()
    }

    fn write_add_immediate_attributes(&self, _attributes: &mut XmlAttributes) {}

    fn read_immediate_attributes(&mut self, _reader: &mut XmlReader, _attributes: &XmlAttributes) {}

    fn write_add_attributes(&self, attributes: &mut XmlAttributes) {
        write_chain(self, attributes);
        self.write_add_immediate_attributes(attributes);
    }

    fn read_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        read_chain(self, reader, attributes);
        if !reader.has_error() {
            self.read_immediate_attributes(reader, attributes);
        }
    }

    format_accessors!();
    text_block_accessors!();
}

/// Aggregation of paragraph-capable formats.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    text_block: text_block::Aggregation,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_block(&self) -> &text_block::Aggregation {
        &self.text_block
    }
}

impl aggregation::Aggregation for Aggregation {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn base(&self) -> &AggregationBase {
        self.text_block.base()
    }

    fn base_mut(&mut self) -> &mut AggregationBase {
        self.text_block.base_mut()
    }

    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        if !format.borrow().capabilities().contains(NAME) {
            return false;
        }
        self.text_block.add_format(format, include_existing)
    }

    fn clear(&mut self) {
        self.text_block.clear();
    }

    fn summary(&self) -> Vec<(String, String)> {
        self.text_block.summary()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::aggregation::Aggregation as _;
    use crate::element::Element;
    use crate::format::block::BlockFormat;
    use crate::format::font::FontFormat;
    use crate::format::justified_block::{Justification, JustifiedBlockFormat};
    use crate::format::character::CharacterFormat;

    #[test]
    fn capabilities_follow_the_composition_chain() {
        let format = ParagraphFormat::new();
        assert_eq!(
            format.capabilities().as_slice(),
            &[
                "Format",
                "BlockFormat",
                "JustifiedBlockFormat",
                "FontFormat",
                "TextBlockFormat",
                "ParagraphFormat"
            ]
        );
    }

    #[test]
    fn string_starts_with_type_name() {
        let format = ParagraphFormat::new();
        assert!(format.to_format_string().starts_with("ParagraphFormat,0,0,6,6,left,"));
    }

    #[test]
    fn clone_matches_but_starts_detached() {
        let mut original = ParagraphFormat::new();
        original.set_left_indentation(24.0);
        original.set_justification(Justification::Center);
        original.set_underline(true);
        let original = original.into_pointer();
        let _owner = Element::paragraph("owned", Some(original.clone()));

        let copy = original.borrow().clone_format();
        assert_eq!(
            copy.borrow().to_format_string(),
            original.borrow().to_format_string()
        );
        assert_eq!(original.borrow().elements().len(), 1);
        assert!(copy.borrow().elements().is_empty());
    }

    #[test]
    fn attributes_round_trip_through_the_chain() {
        let mut format = ParagraphFormat::new();
        format.set_right_indentation(12.0);
        format.set_justification(Justification::Justify);
        format.set_line_spacing(2.0);
        format.set_font_size(14.0);

        let mut attributes = XmlAttributes::new();
        format.write_add_attributes(&mut attributes);
        let names: Vec<&str> = attributes.names().collect();
        assert_eq!(names, vec!["right", "justification", "spacing", "size"]);

        let mut reader = XmlReader::new();
        let mut read_back = ParagraphFormat::new();
        read_back.read_attributes(&mut reader, &attributes);
        assert!(!reader.has_error());
        assert_eq!(read_back.to_format_string(), format.to_format_string());
    }

    #[test]
    fn read_chain_stops_at_first_error() {
        let attributes: XmlAttributes = [("left", "oops"), ("size", "30")].into_iter().collect();
        let mut reader = XmlReader::new();
        let mut format = ParagraphFormat::new();
        format.read_attributes(&mut reader, &attributes);

        assert!(reader.has_error());
        assert_eq!(format.font_size(), 12.0);
    }

    #[test]
    fn css_is_a_single_line_of_declarations() {
        let mut format = ParagraphFormat::new();
        format.set_justification(Justification::Center);
        let css = format.to_css();
        assert!(!css.contains('\n'));
        assert!(!css.contains('{'));
        assert!(css.ends_with(';'));
        assert!(css.contains("text-align: center;"));
    }

    #[test]
    fn aggregation_requires_paragraph_capability() {
        let mut aggregation = Aggregation::new();
        assert!(!aggregation.add_format(&CharacterFormat::new().into_pointer(), true));
        assert!(aggregation.add_format(&ParagraphFormat::new().into_pointer(), true));
        assert_eq!(aggregation.number_formats(), 1);
    }
}
