//! Continuation paragraphs inside a list item

use std::any::Any;

use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::block::BlockProps;
use crate::format::boolean::BooleanAggregation;
use crate::format::font::FontProps;
use crate::format::justified_block::JustifiedProps;
use crate::format::paragraph;
use crate::format::text_block::TextBlockProps;
use crate::format::{join_fields, Capabilities, Format, FormatBase, FormatPointer};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "ListAdditionalParagraphFormat";

pub const DEFAULT_SHOW_BULLET: bool = false;

pub fn capabilities() -> Capabilities {
    paragraph::capabilities().with(NAME)
}

/// A paragraph that continues the preceding list item, optionally showing
/// the item's bullet or number again.
#[derive(Debug, Clone)]
pub struct ListAdditionalParagraphFormat {
    base: FormatBase,
    block: BlockProps,
    justified: JustifiedProps,
    text_block: TextBlockProps,
    font: FontProps,
    show_bullet: bool,
}

impl ListAdditionalParagraphFormat {
    pub fn new() -> Self {
        Self {
            base: FormatBase::default(),
            block: BlockProps::default(),
            justified: JustifiedProps::default(),
            text_block: TextBlockProps::default(),
            font: FontProps::default(),
            show_bullet: DEFAULT_SHOW_BULLET,
        }
    }

    pub fn creator() -> FormatPointer {
        Self::new().into_pointer()
    }

    pub fn show_bullet(&self) -> bool {
        self.show_bullet
    }

    pub fn set_show_bullet(&mut self, show_bullet: bool) {
        self.show_bullet = show_bullet;
    }
}

impl Default for ListAdditionalParagraphFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl_text_block_traits!(ListAdditionalParagraphFormat);

impl Format for ListAdditionalParagraphFormat {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        capabilities()
    }

    fn is_valid(&self) -> bool {
        paragraph::is_valid(self)
    }

    fn to_format_string(&self) -> String {
        let mut fields = paragraph::string_fields(self);
        fields.push(self.show_bullet.to_string());
        join_fields(&fields)
    }

    fn to_css(&self) -> String {
        paragraph::css(self).trim_end().to_string()
    }

    fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.show_bullet != DEFAULT_SHOW_BULLET {
            attributes.append("show_bullet", self.show_bullet);
        }
    }

    fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let show_bullet = attributes.parse_bool(reader, "show_bullet", DEFAULT_SHOW_BULLET);
        if !reader.has_error() {
            self.show_bullet = show_bullet;
        }
    }

    fn write_add_attributes(&self, attributes: &mut XmlAttributes) {
        paragraph::write_chain(self, attributes);
        self.write_add_immediate_attributes(attributes);
    }

    fn read_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        paragraph::read_chain(self, reader, attributes);
        if !reader.has_error() {
            self.read_immediate_attributes(reader, attributes);
        }
    }

    format_accessors!();
    text_block_accessors!();
}

/// Paragraph summary plus whether bullets are shown.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    paragraph: paragraph::Aggregation,
    show_bullet: BooleanAggregation,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(&self) -> &paragraph::Aggregation {
        &self.paragraph
    }

    pub fn show_bullet(&self) -> BooleanAggregation {
        self.show_bullet
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
        let Some(additional) = format_ref.downcast_ref::<ListAdditionalParagraphFormat>() else {
            return false;
        };
        if !self.paragraph.add_format(format, include_existing) {
            return false;
        }
        self.show_bullet.include(additional.show_bullet());
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let mut summary = self.paragraph.summary();
        summary.push(("show bullet".to_string(), self.show_bullet.to_string()));
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

    #[test]
    fn show_bullet_is_the_last_attribute() {
        let mut format = ListAdditionalParagraphFormat::new();
        format.set_show_bullet(true);
        let mut attributes = XmlAttributes::new();
        format.write_add_attributes(&mut attributes);
        assert_eq!(attributes.names().last(), Some("show_bullet"));

        let mut reader = XmlReader::new();
        let mut read_back = ListAdditionalParagraphFormat::new();
        read_back.read_attributes(&mut reader, &attributes);
        assert!(read_back.show_bullet());
    }

    #[test]
    fn capabilities_end_with_own_name() {
        let capabilities = ListAdditionalParagraphFormat::new().capabilities();
        assert!(capabilities.contains(paragraph::NAME));
        assert_eq!(capabilities.as_slice().last(), Some(&NAME));
    }

    #[test]
    fn aggregation_tracks_show_bullet() {
        let mut shown = ListAdditionalParagraphFormat::new();
        shown.set_show_bullet(true);
        let hidden = ListAdditionalParagraphFormat::new();

        let mut aggregation = Aggregation::new();
        aggregation.add_format(&shown.into_pointer(), true);
        assert!(aggregation.show_bullet().all_true());
        aggregation.add_format(&hidden.into_pointer(), true);
        assert!(aggregation.show_bullet().both());
    }
}
