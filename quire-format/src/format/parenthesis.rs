//! Parenthesis glyph format

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::font::{self, FontProps};
use crate::format::{join_fields, Capabilities, Format, FormatBase, FormatPointer};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "ParenthesisFormat";

pub const DEFAULT_STYLE: ParenthesisStyle = ParenthesisStyle::Default;

pub fn capabilities() -> Capabilities {
    font::capabilities().with(NAME)
}

/// Delimiter pair drawn around a grouped expression.
///
/// `Default` leaves the choice to the operator being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParenthesisStyle {
    Default,
    Parenthesis,
    Brackets,
    Braces,
    None,
}

impl ParenthesisStyle {
    pub const ALL: [ParenthesisStyle; 5] = [
        ParenthesisStyle::Default,
        ParenthesisStyle::Parenthesis,
        ParenthesisStyle::Brackets,
        ParenthesisStyle::Braces,
        ParenthesisStyle::None,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ParenthesisStyle::Default => "default",
            ParenthesisStyle::Parenthesis => "parenthesis",
            ParenthesisStyle::Brackets => "brackets",
            ParenthesisStyle::Braces => "braces",
            ParenthesisStyle::None => "none",
        }
    }

    /// Opening and closing glyphs, `None` for [`ParenthesisStyle::Default`].
    pub fn delimiters(self) -> Option<(&'static str, &'static str)> {
        match self {
            ParenthesisStyle::Default => None,
            ParenthesisStyle::Parenthesis => Some(("(", ")")),
            ParenthesisStyle::Brackets => Some(("[", "]")),
            ParenthesisStyle::Braces => Some(("{", "}")),
            ParenthesisStyle::None => Some(("", "")),
        }
    }
}

impl Display for ParenthesisStyle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ParenthesisStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.token() == s)
            .ok_or_else(|| format!("unknown parenthesis style \"{s}\""))
    }
}

/// Format of a parenthesis pair.
#[derive(Debug, Clone)]
pub struct ParenthesisFormat {
    base: FormatBase,
    font: FontProps,
    style: ParenthesisStyle,
}

impl ParenthesisFormat {
    pub fn new() -> Self {
        Self {
            base: FormatBase::default(),
            font: FontProps::from_font(&font::default_math_font()),
            style: DEFAULT_STYLE,
        }
    }

    pub fn creator() -> FormatPointer {
        Self::new().into_pointer()
    }

    pub fn style(&self) -> ParenthesisStyle {
        self.style
    }

    pub fn set_style(&mut self, style: ParenthesisStyle) {
        self.style = style;
    }
}

impl Default for ParenthesisFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl_font_trait!(ParenthesisFormat);

impl Format for ParenthesisFormat {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        capabilities()
    }

    fn is_valid(&self) -> bool {
        self.font.is_valid()
    }

    fn to_format_string(&self) -> String {
        let mut fields = vec![NAME.to_string()];
        fields.extend(self.font.string_fields());
        fields.push(self.style.token().to_string());
        join_fields(&fields)
    }

    fn to_css(&self) -> String {
        self.font.to_css().trim_end().to_string()
    }

    fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.style != DEFAULT_STYLE {
            attributes.append("parenthesis", self.style);
        }
    }

    fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let style = attributes.parse_or(reader, "parenthesis", DEFAULT_STYLE);
        if !reader.has_error() {
            self.style = style;
        }
    }

    fn write_add_attributes(&self, attributes: &mut XmlAttributes) {
        self.font.write_add_immediate_attributes(attributes);
        self.write_add_immediate_attributes(attributes);
    }

    fn read_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        self.font.read_immediate_attributes(reader, attributes);
        if !reader.has_error() {
            self.read_immediate_attributes(reader, attributes);
        }
    }

    format_accessors!();
    font_accessors!();
}

#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    font: font::Aggregation,
    styles: BTreeSet<ParenthesisStyle>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(&self) -> &font::Aggregation {
        &self.font
    }

    pub fn styles(&self) -> &BTreeSet<ParenthesisStyle> {
        &self.styles
    }
}

impl aggregation::Aggregation for Aggregation {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn base(&self) -> &AggregationBase {
        self.font.base()
    }

    fn base_mut(&mut self) -> &mut AggregationBase {
        self.font.base_mut()
    }

    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        let format_ref = format.borrow();
        let Some(parenthesis) = format_ref.downcast_ref::<ParenthesisFormat>() else {
            return false;
        };
        if !self.font.add_format(format, include_existing) {
            return false;
        }
        self.styles.insert(parenthesis.style());
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let mut summary = self.font.summary();
        summary.push(("parenthesis".to_string(), aggregation::describe_values(&self.styles)));
        summary
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
