//! Block spacing: left/right indentation and top/bottom spacing

use std::any::Any;
use std::collections::BTreeSet;

use crate::format::aggregation::{self, AggregationBase};
use crate::format::{self as format_base, Capabilities, Format, FormatPointer};
use crate::scalar::{points, Scalar};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "BlockFormat";

pub const DEFAULT_LEFT_INDENTATION: f32 = 0.0;
pub const DEFAULT_RIGHT_INDENTATION: f32 = 0.0;
pub const DEFAULT_TOP_SPACING: f32 = 6.0;
pub const DEFAULT_BOTTOM_SPACING: f32 = 6.0;

pub fn capabilities() -> Capabilities {
    format_base::capabilities().with(NAME)
}

/// Block spacing properties, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockProps {
    pub left_indentation: f32,
    pub right_indentation: f32,
    pub top_spacing: f32,
    pub bottom_spacing: f32,
}

impl Default for BlockProps {
    fn default() -> Self {
        Self {
            left_indentation: DEFAULT_LEFT_INDENTATION,
            right_indentation: DEFAULT_RIGHT_INDENTATION,
            top_spacing: DEFAULT_TOP_SPACING,
            bottom_spacing: DEFAULT_BOTTOM_SPACING,
        }
    }
}

impl BlockProps {
    pub fn is_valid(&self) -> bool {
        [
            self.left_indentation,
            self.right_indentation,
            self.top_spacing,
            self.bottom_spacing,
        ]
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0)
    }

    pub fn string_fields(&self) -> Vec<String> {
        vec![
            points(self.left_indentation),
            points(self.right_indentation),
            points(self.top_spacing),
            points(self.bottom_spacing),
        ]
    }

    pub fn to_css(&self) -> String {
        format!(
            "margin-left: {}pt; margin-right: {}pt; margin-top: {}pt; margin-bottom: {}pt; ",
            points(self.left_indentation),
            points(self.right_indentation),
            points(self.top_spacing),
            points(self.bottom_spacing)
        )
    }

    pub fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.left_indentation != DEFAULT_LEFT_INDENTATION {
            attributes.append("left", points(self.left_indentation));
        }
        if self.right_indentation != DEFAULT_RIGHT_INDENTATION {
            attributes.append("right", points(self.right_indentation));
        }
        if self.top_spacing != DEFAULT_TOP_SPACING {
            attributes.append("top", points(self.top_spacing));
        }
        if self.bottom_spacing != DEFAULT_BOTTOM_SPACING {
            attributes.append("bottom", points(self.bottom_spacing));
        }
    }

    pub fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let left = attributes.parse_length(reader, "left", DEFAULT_LEFT_INDENTATION);
        let right = attributes.parse_length(reader, "right", DEFAULT_RIGHT_INDENTATION);
        let top = attributes.parse_length(reader, "top", DEFAULT_TOP_SPACING);
        let bottom = attributes.parse_length(reader, "bottom", DEFAULT_BOTTOM_SPACING);

        if !reader.has_error() {
            self.left_indentation = left;
            self.right_indentation = right;
            self.top_spacing = top;
            self.bottom_spacing = bottom;
        }
    }
}

/// Formats that carry block spacing.
pub trait BlockFormat: Format {
    fn block(&self) -> &BlockProps;

    fn block_mut(&mut self) -> &mut BlockProps;

    fn left_indentation(&self) -> f32 {
        self.block().left_indentation
    }

    fn set_left_indentation(&mut self, value: f32) {
        self.block_mut().left_indentation = value;
    }

    fn right_indentation(&self) -> f32 {
        self.block().right_indentation
    }

    fn set_right_indentation(&mut self, value: f32) {
        self.block_mut().right_indentation = value;
    }

    fn top_spacing(&self) -> f32 {
        self.block().top_spacing
    }

    fn set_top_spacing(&mut self, value: f32) {
        self.block_mut().top_spacing = value;
    }

    fn bottom_spacing(&self) -> f32 {
        self.block().bottom_spacing
    }

    fn set_bottom_spacing(&mut self, value: f32) {
        self.block_mut().bottom_spacing = value;
    }
}

/// Distinct block spacing values across a set of formats.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    base: AggregationBase,
    left_indentations: BTreeSet<Scalar>,
    right_indentations: BTreeSet<Scalar>,
    top_spacings: BTreeSet<Scalar>,
    bottom_spacings: BTreeSet<Scalar>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left_indentations(&self) -> &BTreeSet<Scalar> {
        &self.left_indentations
    }

    pub fn right_indentations(&self) -> &BTreeSet<Scalar> {
        &self.right_indentations
    }

    pub fn top_spacings(&self) -> &BTreeSet<Scalar> {
        &self.top_spacings
    }

    pub fn bottom_spacings(&self) -> &BTreeSet<Scalar> {
        &self.bottom_spacings
    }
}

impl aggregation::Aggregation for Aggregation {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn base(&self) -> &AggregationBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AggregationBase {
        &mut self.base
    }

    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        let format_ref = format.borrow();
        let Some(block) = format_ref.as_block() else {
            return false;
        };
        if !self.base.add_format(format, include_existing) {
            return false;
        }

        let props = block.block();
        self.left_indentations.insert(Scalar::new(props.left_indentation));
        self.right_indentations.insert(Scalar::new(props.right_indentation));
        self.top_spacings.insert(Scalar::new(props.top_spacing));
        self.bottom_spacings.insert(Scalar::new(props.bottom_spacing));
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("left".to_string(), aggregation::describe_lengths(&self.left_indentations)),
            ("right".to_string(), aggregation::describe_lengths(&self.right_indentations)),
            ("top".to_string(), aggregation::describe_lengths(&self.top_spacings)),
            ("bottom".to_string(), aggregation::describe_lengths(&self.bottom_spacings)),
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
