//! Bulleted list items

use std::any::Any;
use std::collections::BTreeSet;

use crate::element::ElementPointer;
use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::block::BlockProps;
use crate::format::bullets::{self, HtmlCategory, StandardBullet};
use crate::format::font::FontProps;
use crate::format::justified_block::JustifiedProps;
use crate::format::list_base::{self, ListParagraphFormatBase, ListProps};
use crate::format::text_block::TextBlockProps;
use crate::format::{
    css_rule, css_selector, join_fields, Capabilities, Format, FormatBase, FormatPointer,
};
use crate::scalar::points;
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "UnorderedListParagraphFormat";

pub const DEFAULT_BULLET: &str = "\u{2022}";

/// Bullet used where the chosen one cannot be represented.
pub const FALLBACK_BULLET: &str = "*";

/// Placeholder rendered by continuation paragraphs of a bulleted item.
pub const NO_BULLET_PLACEHOLDER: char = '\u{200C}';

/// Suffix of the class used by continuation paragraphs.
pub const NO_BULLET_CLASS_SUFFIX: &str = "_no_bullet";

pub fn capabilities() -> Capabilities {
    list_base::capabilities().with(NAME)
}

/// Format of a bulleted list item.
#[derive(Debug, Clone)]
pub struct UnorderedListParagraphFormat {
    base: FormatBase,
    block: BlockProps,
    justified: JustifiedProps,
    text_block: TextBlockProps,
    font: FontProps,
    list: ListProps,
    bullet: String,
}

impl UnorderedListParagraphFormat {
    pub fn new() -> Self {
        Self {
            base: FormatBase::default(),
            block: BlockProps::default(),
            justified: JustifiedProps::default(),
            text_block: TextBlockProps::default(),
            font: FontProps::default(),
            list: ListProps::default(),
            bullet: DEFAULT_BULLET.to_string(),
        }
    }

    pub fn creator() -> FormatPointer {
        Self::new().into_pointer()
    }

    pub fn bullet(&self) -> &str {
        &self.bullet
    }

    /// Change the bullet. Returns false, leaving it unchanged, unless
    /// `bullet` is exactly one character.
    pub fn set_bullet(&mut self, bullet: &str) -> bool {
        if bullet.chars().count() != 1 {
            return false;
        }
        self.bullet = bullet.to_string();
        true
    }

    /// The standard table entry of the current bullet.
    pub fn standard_bullet(&self) -> Option<&'static StandardBullet> {
        bullets::find(&self.bullet)
    }

    /// Closest HTML 4 bullet type, `disc` for non-standard bullets.
    pub fn html_category(&self) -> HtmlCategory {
        self.standard_bullet()
            .map(StandardBullet::html_category)
            .unwrap_or(HtmlCategory::Disc)
    }

    /// Bullet for the `enumitem` `label` option.
    pub fn latex_label(&self) -> String {
        match self.bullet.as_str() {
            "\u{2022}" => "\\textbullet".to_string(),
            "\u{25E6}" => "\\textopenbullet".to_string(),
            "\u{2013}" => "\\textendash".to_string(),
            "\u{2605}" => "$\\bigstar$".to_string(),
            "\u{25A0}" | "\u{25AA}" => "$\\blacksquare$".to_string(),
            "\u{25A1}" | "\u{25AB}" => "$\\square$".to_string(),
            "\u{25C6}" | "\u{2666}" => "$\\blacklozenge$".to_string(),
            "\u{25C7}" => "$\\lozenge$".to_string(),
            "\u{25B8}" | "\u{25B6}" => "$\\blacktriangleright$".to_string(),
            "\u{25B9}" | "\u{25B7}" => "$\\triangleright$".to_string(),
            "\u{2713}" | "\u{2714}" => "\\checkmark".to_string(),
            "-" | "*" => self.bullet.clone(),
            _ => FALLBACK_BULLET.to_string(),
        }
    }

    fn bullet_char(&self) -> char {
        self.bullet
            .chars()
            .next()
            .or_else(|| FALLBACK_BULLET.chars().next())
            .unwrap_or('*')
    }
}

impl Default for UnorderedListParagraphFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl_text_block_traits!(UnorderedListParagraphFormat);

impl ListParagraphFormatBase for UnorderedListParagraphFormat {
    fn list(&self) -> &ListProps {
        &self.list
    }

    fn list_mut(&mut self) -> &mut ListProps {
        &mut self.list
    }
}

impl Format for UnorderedListParagraphFormat {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        capabilities()
    }

    fn is_valid(&self) -> bool {
        list_base::is_valid(self) && self.bullet.chars().count() == 1
    }

    fn to_format_string(&self) -> String {
        let mut fields = list_base::string_fields(self);
        fields.push(self.bullet.clone());
        join_fields(&fields)
    }

    fn to_css(&self) -> String {
        let mut css = list_base::css(self);
        css.push_str("list-style-type: none;");
        css
    }

    /// The item rule, a `:before` rule rendering the bullet and the matching
    /// pair for continuation paragraphs, which render a zero-width
    /// placeholder instead of the bullet.
    fn to_css_entry(&self, class_name: &str, tag: &str, id: &str) -> String {
        let no_bullet_class = format!("{class_name}{NO_BULLET_CLASS_SUFFIX}");
        let marker = |content: char| {
            format!(
                "content: '{}'; display: inline-block; width: {}pt; margin-left: -{}pt;",
                bullets::css_escape(content),
                points(self.list.list_indentation),
                points(self.list.list_indentation)
            )
        };

        let mut entry = css_rule(&css_selector(tag, class_name, id, ""), &self.to_css());
        entry.push_str(&css_rule(
            &css_selector(tag, class_name, id, "before"),
            &marker(self.bullet_char()),
        ));
        entry.push_str(&css_rule(
            &css_selector(tag, &no_bullet_class, id, ""),
            &self.to_css(),
        ));
        entry.push_str(&css_rule(
            &css_selector(tag, &no_bullet_class, id, "before"),
            &marker(NO_BULLET_PLACEHOLDER),
        ));
        entry
    }

    fn format_for_split(&self, _element: &ElementPointer) -> Option<FormatPointer> {
        list_base::format_for_split()
    }

    fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.bullet != DEFAULT_BULLET {
            attributes.append("bullet", &self.bullet);
        }
    }

    fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let bullet = attributes.value("bullet").unwrap_or(DEFAULT_BULLET);
        if !self.set_bullet(bullet) {
            reader.raise_error(format!(
                "Invalid value \"{bullet}\" for attribute \"bullet\", expected a single character"
            ));
        }
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

/// List summary plus the bullets in use.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    list: list_base::Aggregation,
    bullets: BTreeSet<String>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &list_base::Aggregation {
        &self.list
    }

    pub fn bullets(&self) -> &BTreeSet<String> {
        &self.bullets
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
        let Some(unordered) = format_ref.downcast_ref::<UnorderedListParagraphFormat>() else {
            return false;
        };
        if !self.list.add_format(format, include_existing) {
            return false;
        }
        self.bullets.insert(unordered.bullet().to_string());
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let mut summary = self.list.summary();
        summary.push(("bullet".to_string(), aggregation::describe_values(&self.bullets)));
        summary
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
