//! Numbered list items

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::element::ElementPointer;
use crate::export::latex;
use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::block::BlockProps;
use crate::format::font::FontProps;
use crate::format::justified_block::JustifiedProps;
use crate::format::list_base::{self, ListParagraphFormatBase, ListProps};
use crate::format::text_block::TextBlockProps;
use crate::format::{join_fields, Capabilities, Format, FormatBase, FormatPointer};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "OrderedListParagraphFormat";

pub const DEFAULT_STYLE: Style = Style::Number;
pub const DEFAULT_STARTING_NUMBER: u32 = 1;
pub const DEFAULT_PREFIX: &str = "";
pub const DEFAULT_SUFFIX: &str = ".";

pub fn capabilities() -> Capabilities {
    list_base::capabilities().with(NAME)
}

/// Numbering style of an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Style {
    Number,
    LowerCase,
    UpperCase,
    RomanUpperCase,
    RomanLowerCase,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Number,
        Style::LowerCase,
        Style::UpperCase,
        Style::RomanUpperCase,
        Style::RomanLowerCase,
    ];

    /// Attribute token.
    pub fn token(self) -> &'static str {
        match self {
            Style::Number => "NUMBER",
            Style::LowerCase => "LOWER_CASE",
            Style::UpperCase => "UPPER_CASE",
            Style::RomanUpperCase => "ROMAN_UPPER_CASE",
            Style::RomanLowerCase => "ROMAN_LOWER_CASE",
        }
    }

    /// CSS `list-style-type` value.
    pub fn css_list_style(self) -> &'static str {
        match self {
            Style::Number => "decimal",
            Style::LowerCase => "lower-alpha",
            Style::UpperCase => "upper-alpha",
            Style::RomanUpperCase => "upper-roman",
            Style::RomanLowerCase => "lower-roman",
        }
    }

    /// `enumitem` counter command.
    pub fn latex_counter(self) -> &'static str {
        match self {
            Style::Number => "\\arabic*",
            Style::LowerCase => "\\alph*",
            Style::UpperCase => "\\Alph*",
            Style::RomanUpperCase => "\\Roman*",
            Style::RomanLowerCase => "\\roman*",
        }
    }

    /// HTML 4 `<ol type>` value.
    pub fn html_type(self) -> &'static str {
        match self {
            Style::Number => "1",
            Style::LowerCase => "a",
            Style::UpperCase => "A",
            Style::RomanUpperCase => "I",
            Style::RomanLowerCase => "i",
        }
    }

    /// Render `number` in this style.
    pub fn numeral(self, number: u32) -> String {
        match self {
            Style::Number => number.to_string(),
            Style::LowerCase => alphabetic(number, b'a'),
            Style::UpperCase => alphabetic(number, b'A'),
            Style::RomanUpperCase => roman_numeral(number),
            Style::RomanLowerCase => roman_numeral(number).to_lowercase(),
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|style| style.token() == s)
            .ok_or_else(|| format!("unknown numbering style \"{s}\""))
    }
}

/// Bijective base-26 letters: a, b, ..., z, aa, ab, ...
fn alphabetic(mut number: u32, first: u8) -> String {
    let mut letters = Vec::new();
    while number != 0 {
        number -= 1;
        letters.push(char::from(first + (number % 26) as u8));
        number /= 26;
    }
    letters.iter().rev().collect()
}

fn roman_numeral(mut number: u32) -> String {
    if number == 0 {
        return "N".to_string();
    }

    let mut numeral = String::new();
    for &(name, value) in &[
        ("M", 1000),
        ("CM", 900),
        ("D", 500),
        ("CD", 400),
        ("C", 100),
        ("XC", 90),
        ("L", 50),
        ("XL", 40),
        ("X", 10),
        ("IX", 9),
        ("V", 5),
        ("IV", 4),
        ("I", 1),
    ] {
        while number >= value {
            number -= value;
            numeral.push_str(name);
        }
    }
    numeral
}

/// Format of a numbered list item.
#[derive(Debug, Clone)]
pub struct OrderedListParagraphFormat {
    base: FormatBase,
    block: BlockProps,
    justified: JustifiedProps,
    text_block: TextBlockProps,
    font: FontProps,
    list: ListProps,
    style: Style,
    starting_number: u32,
    prefix: String,
    suffix: String,
}

impl OrderedListParagraphFormat {
    pub fn new() -> Self {
        Self {
            base: FormatBase::default(),
            block: BlockProps::default(),
            justified: JustifiedProps::default(),
            text_block: TextBlockProps::default(),
            font: FontProps::default(),
            list: ListProps::default(),
            style: DEFAULT_STYLE,
            starting_number: DEFAULT_STARTING_NUMBER,
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }

    pub fn creator() -> FormatPointer {
        Self::new().into_pointer()
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn starting_number(&self) -> u32 {
        self.starting_number
    }

    /// Set the number of the first item. Zero makes the format invalid.
    pub fn set_starting_number(&mut self, number: u32) {
        self.starting_number = number;
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn set_suffix(&mut self, suffix: &str) {
        self.suffix = suffix.to_string();
    }

    /// Label of the item numbered `number`, prefix and suffix included.
    pub fn label(&self, number: u32) -> String {
        format!("{}{}{}", self.prefix, self.style.numeral(number), self.suffix)
    }

    /// Label pattern for the `enumitem` `label` option.
    pub fn latex_label(&self) -> String {
        format!(
            "{}{}{}",
            latex::escape(&self.prefix),
            self.style.latex_counter(),
            latex::escape(&self.suffix)
        )
    }
}

impl Default for OrderedListParagraphFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl_text_block_traits!(OrderedListParagraphFormat);

impl ListParagraphFormatBase for OrderedListParagraphFormat {
    fn list(&self) -> &ListProps {
        &self.list
    }

    fn list_mut(&mut self) -> &mut ListProps {
        &mut self.list
    }
}

impl Format for OrderedListParagraphFormat {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        capabilities()
    }

    fn is_valid(&self) -> bool {
        list_base::is_valid(self) && self.starting_number > 0
    }

    fn to_format_string(&self) -> String {
        let mut fields = list_base::string_fields(self);
        fields.push(self.style.token().to_string());
        fields.push(self.starting_number.to_string());
        fields.push(self.prefix.clone());
        fields.push(self.suffix.clone());
        join_fields(&fields)
    }

    fn to_css(&self) -> String {
        let mut css = list_base::css(self);
        css.push_str(&format!("list-style-type: {};", self.style.css_list_style()));
        css
    }

    fn format_for_split(&self, _element: &ElementPointer) -> Option<FormatPointer> {
        list_base::format_for_split()
    }

    fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.style != DEFAULT_STYLE {
            attributes.append("style", self.style.token());
        }
        // 0 is the unset marker and reads back as the default.
        if self.starting_number != DEFAULT_STARTING_NUMBER && self.starting_number != 0 {
            attributes.append("starting_value", self.starting_number);
        }
        if self.prefix != DEFAULT_PREFIX {
            attributes.append("prefix", &self.prefix);
        }
        if self.suffix != DEFAULT_SUFFIX {
            attributes.append("suffix", &self.suffix);
        }
    }

    fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let style = attributes.parse_or(reader, "style", DEFAULT_STYLE);
        let starting_number =
            attributes.parse_or(reader, "starting_value", DEFAULT_STARTING_NUMBER);
        if !reader.has_error() && starting_number == 0 {
            reader.raise_error("Invalid value \"0\" for attribute \"starting_value\", numbering starts at 1");
        }
        if reader.has_error() {
            return;
        }

        self.style = style;
        self.starting_number = starting_number;
        self.prefix = attributes.value("prefix").unwrap_or(DEFAULT_PREFIX).to_string();
        self.suffix = attributes.value("suffix").unwrap_or(DEFAULT_SUFFIX).to_string();
    }

    fn write_add_attributes(&self, attributes: &mut XmlAttributes) {
        list_base::write_chain(self, attributes);
        self.write_add_immediate_attributes(attributes);
    }

    fn read_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        list_base::read_chain(self, reader, attributes);
        if !reader.has_error() {
            self.read_immediate_attributes(reader, attributes);
        }
    }

    fn as_list_paragraph(&self) -> Option<&dyn ListParagraphFormatBase> {
        Some(self)
    }

    fn as_list_paragraph_mut(&mut self) -> Option<&mut dyn ListParagraphFormatBase> {
        Some(self)
    }

    format_accessors!();
    text_block_accessors!();
}

/// List summary plus numbering styles, starting numbers and affixes.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    list: list_base::Aggregation,
    styles: BTreeSet<Style>,
    starting_numbers: BTreeSet<u32>,
    prefixes: BTreeSet<String>,
    suffixes: BTreeSet<String>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &list_base::Aggregation {
        &self.list
    }

    pub fn styles(&self) -> &BTreeSet<Style> {
        &self.styles
    }

    pub fn starting_numbers(&self) -> &BTreeSet<u32> {
        &self.starting_numbers
    }

    pub fn prefixes(&self) -> &BTreeSet<String> {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &BTreeSet<String> {
        &self.suffixes
    }
}

impl aggregation::Aggregation for Aggregation {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn base(&self) -> &AggregationBase {
        self.list.base()
    }

    fn base_mut(&mut self) -> &mut AggregationBase {
        self.list.base_mut()
    }

    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        let format_ref = format.borrow();
        let Some(ordered) = format_ref.downcast_ref::<OrderedListParagraphFormat>() else {
            return false;
        };
        if !self.list.add_format(format, include_existing) {
            return false;
        }

        self.styles.insert(ordered.style());
        self.starting_numbers.insert(ordered.starting_number());
        self.prefixes.insert(ordered.prefix().to_string());
        self.suffixes.insert(ordered.suffix().to_string());
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let quoted = |values: &BTreeSet<String>| {
            aggregation::describe_values(values.iter().map(|value| format!("\"{value}\"")))
        };
        let mut summary = self.list.summary();
        summary.push(("style".to_string(), aggregation::describe_values(&self.styles)));
        summary.push((
            "starting number".to_string(),
            aggregation::describe_values(&self.starting_numbers),
        ));
        summary.push(("prefix".to_string(), quoted(&self.prefixes)));
        summary.push(("suffix".to_string(), quoted(&self.suffixes)));
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
    fn starting_number_round_trips() {
        let mut format = OrderedListParagraphFormat::new();
        format.set_starting_number(5);
        assert_eq!(format.starting_number(), 5);
        assert!(format.is_valid());
    }

    #[test]
    fn zero_starting_number_is_invalid() {
        let mut format = OrderedListParagraphFormat::new();
        format.set_starting_number(0);
        assert!(format.is_invalid());
    }

    #[test]
    fn css_maps_roman_style() {
        let mut format = OrderedListParagraphFormat::new();
        format.set_style(Style::RomanUpperCase);
        assert!(format.to_css().contains("upper-roman"));
        assert!(format.to_css().ends_with(';'));
    }

    #[test]
    fn labels_for_every_style() {
        let mut format = OrderedListParagraphFormat::new();
        format.set_prefix("(");
        format.set_suffix(")");
        assert_eq!(format.label(4), "(4)");

        format.set_style(Style::LowerCase);
        assert_eq!(format.label(1), "(a)");
        assert_eq!(format.label(27), "(aa)");

        format.set_style(Style::UpperCase);
        assert_eq!(format.label(26), "(Z)");

        format.set_style(Style::RomanUpperCase);
        assert_eq!(format.label(1994), "(MCMXCIV)");

        format.set_style(Style::RomanLowerCase);
        assert_eq!(format.label(14), "(xiv)");
    }

    #[test]
    fn latex_label_uses_enumitem_counters() {
        let mut format = OrderedListParagraphFormat::new();
        assert_eq!(format.latex_label(), "\\arabic*.");
        format.set_style(Style::LowerCase);
        format.set_suffix(")");
        assert_eq!(format.latex_label(), "\\alph*)");
    }

    #[test]
    fn defaults_are_omitted_and_explicit_values_round_trip() {
        let mut attributes = XmlAttributes::new();
        OrderedListParagraphFormat::new().write_add_immediate_attributes(&mut attributes);
        assert!(attributes.is_empty());

        let mut format = OrderedListParagraphFormat::new();
        format.set_style(Style::RomanLowerCase);
        format.set_starting_number(3);
        format.set_prefix("[");
        format.set_suffix("]");
        format.set_list_indentation(24.0);
        format.write_add_attributes(&mut attributes);

        let names: Vec<&str> = attributes.names().collect();
        assert_eq!(
            names,
            vec!["list_indentation", "style", "starting_value", "prefix", "suffix"]
        );

        let mut reader = XmlReader::new();
        let mut read_back = OrderedListParagraphFormat::new();
        read_back.read_attributes(&mut reader, &attributes);
        assert!(!reader.has_error());
        assert_eq!(read_back.to_format_string(), format.to_format_string());
    }

    #[test]
    fn unset_starting_number_is_not_written() {
        let mut format = OrderedListParagraphFormat::new();
        format.set_style(Style::UpperCase);
        format.set_starting_number(0);

        let mut attributes = XmlAttributes::new();
        format.write_add_attributes(&mut attributes);
        assert_eq!(attributes.value("starting_value"), None);

        let mut reader = XmlReader::new();
        let mut read_back = OrderedListParagraphFormat::new();
        read_back.read_attributes(&mut reader, &attributes);
        assert!(!reader.has_error());
        assert_eq!(read_back.style(), Style::UpperCase);
        assert_eq!(read_back.starting_number(), DEFAULT_STARTING_NUMBER);
        assert!(read_back.is_valid());
    }

    #[test]
    fn explicit_zero_starting_value_is_rejected() {
        let attributes: XmlAttributes = [("starting_value", "0")].into_iter().collect();
        let mut reader = XmlReader::new();
        let mut format = OrderedListParagraphFormat::new();
        format.read_attributes(&mut reader, &attributes);

        assert!(reader.has_error());
        assert_eq!(format.starting_number(), DEFAULT_STARTING_NUMBER);
    }

    #[test]
    fn unknown_style_is_rejected() {
        let attributes: XmlAttributes = [("style", "GREEK")].into_iter().collect();
        let mut reader = XmlReader::new();
        let mut format = OrderedListParagraphFormat::new();
        format.read_attributes(&mut reader, &attributes);
        assert!(reader.has_error());
        assert_eq!(format.style(), Style::Number);
    }

    #[test]
    fn aggregation_collects_styles() {
        let mut roman = OrderedListParagraphFormat::new();
        roman.set_style(Style::RomanUpperCase);

        let mut aggregation = Aggregation::new();
        aggregation.add_format(&OrderedListParagraphFormat::new().into_pointer(), true);
        aggregation.add_format(&roman.into_pointer(), true);

        assert_eq!(aggregation.styles().len(), 2);
        assert_eq!(aggregation.starting_numbers().len(), 1);
        assert_eq!(aggregation.list().list_indentations().len(), 1);
    }
}
