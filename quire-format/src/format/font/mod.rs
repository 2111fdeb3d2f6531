//! Font properties of text-carrying formats

pub mod intern;

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::format::aggregation::{self, AggregationBase};
use crate::format::boolean::BooleanAggregation;
use crate::format::{self as format_base, Capabilities, Format, FormatPointer};
use crate::scalar::{points, Scalar};
use crate::xml::{XmlAttributes, XmlReader};

pub use intern::{FontFace, FontInterner, Typeface};

pub const NAME: &str = "FontFormat";

pub const DEFAULT_LETTER_SPACING: f32 = 0.0;

pub fn capabilities() -> Capabilities {
    format_base::capabilities().with(NAME)
}

/// The weight of a font, between 100 and 900.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontWeight(u16);

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const EXTRALIGHT: Self = Self(200);
    pub const LIGHT: Self = Self(300);
    pub const REGULAR: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const EXTRABOLD: Self = Self(800);
    pub const BLACK: Self = Self(900);

    const MIN: u16 = 100;
    const MAX: u16 = 900;

    const NAMES: [(&'static str, FontWeight); 10] = [
        ("thin", Self::THIN),
        ("extralight", Self::EXTRALIGHT),
        ("light", Self::LIGHT),
        ("regular", Self::REGULAR),
        ("normal", Self::REGULAR),
        ("medium", Self::MEDIUM),
        ("semibold", Self::SEMIBOLD),
        ("bold", Self::BOLD),
        ("extrabold", Self::EXTRABOLD),
        ("black", Self::BLACK),
    ];

    /// Create a font weight from a number, clamping it to 100..=900.
    #[must_use]
    pub fn from_number(weight: u16) -> Self {
        Self(weight.clamp(Self::MIN, Self::MAX))
    }

    #[must_use]
    pub fn to_number(self) -> u16 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    /// Whether this weight reads as bold.
    pub fn is_bold(self) -> bool {
        self.0 >= Self::SEMIBOLD.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl Debug for FontWeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for FontWeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(number) = s.parse::<u16>() {
            return if (Self::MIN..=Self::MAX).contains(&number) {
                Ok(Self(number))
            } else {
                Err(format!("font weight {number} is outside 100..=900"))
            };
        }
        Self::NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, weight)| *weight)
            .ok_or_else(|| format!("unknown font weight \"{s}\""))
    }
}

/// A complete font description, as used for the process defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub italic: bool,
}

impl Font {
    pub fn new(family: &str, size: f32, weight: FontWeight, italic: bool) -> Self {
        Self {
            family: family.to_string(),
            size,
            weight,
            italic,
        }
    }

    fn face(&self) -> FontFace {
        FontFace {
            family: self.family.clone(),
            size: self.size,
            weight: self.weight,
            italic: self.italic,
        }
    }
}

/// Roles with a settable default font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Text,
    Math,
    MathIdentifier,
    MathFunction,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::Text,
        FontRole::Math,
        FontRole::MathIdentifier,
        FontRole::MathFunction,
    ];

    fn builtin(self) -> Font {
        match self {
            FontRole::Text => Font::new("Times New Roman", 12.0, FontWeight::REGULAR, false),
            FontRole::Math => Font::new("Times New Roman", 12.0, FontWeight::REGULAR, false),
            FontRole::MathIdentifier => Font::new("Times New Roman", 12.0, FontWeight::REGULAR, true),
            FontRole::MathFunction => Font::new("Times New Roman", 12.0, FontWeight::REGULAR, false),
        }
    }
}

#[derive(Debug)]
struct DefaultFonts([Font; 4]);

impl DefaultFonts {
    fn builtin() -> Self {
        Self(FontRole::ALL.map(FontRole::builtin))
    }

    fn index(role: FontRole) -> usize {
        match role {
            FontRole::Text => 0,
            FontRole::Math => 1,
            FontRole::MathIdentifier => 2,
            FontRole::MathFunction => 3,
        }
    }
}

thread_local! {
    static DEFAULT_FONTS: RefCell<DefaultFonts> = RefCell::new(DefaultFonts::builtin());
}

/// The current default font for `role` on this thread.
pub fn default_font(role: FontRole) -> Font {
    DEFAULT_FONTS.with(|fonts| fonts.borrow().0[DefaultFonts::index(role)].clone())
}

/// Replace the default font for `role` on this thread.
pub fn set_default_font(role: FontRole, font: Font) {
    tracing::debug!(?role, family = %font.family, size = font.size, "setting default font");
    DEFAULT_FONTS.with(|fonts| fonts.borrow_mut().0[DefaultFonts::index(role)] = font);
}

/// Restore the built-in default fonts on this thread.
pub fn reset_default_fonts() {
    DEFAULT_FONTS.with(|fonts| *fonts.borrow_mut() = DefaultFonts::builtin());
}

pub fn default_text_font() -> Font {
    default_font(FontRole::Text)
}

pub fn default_math_font() -> Font {
    default_font(FontRole::Math)
}

pub fn default_math_identifier_font() -> Font {
    default_font(FontRole::MathIdentifier)
}

pub fn default_math_function_font() -> Font {
    default_font(FontRole::MathFunction)
}

/// Font face plus decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct FontProps {
    typeface: Typeface,
    underline: bool,
    overline: bool,
    strikeout: bool,
    letter_spacing: f32,
    color: Option<Color>,
    background_color: Option<Color>,
}

impl Default for FontProps {
    fn default() -> Self {
        Self::from_font(&default_text_font())
    }
}

impl FontProps {
    pub fn from_font(font: &Font) -> Self {
        Self {
            typeface: intern::intern(font.face()),
            underline: false,
            overline: false,
            strikeout: false,
            letter_spacing: DEFAULT_LETTER_SPACING,
            color: None,
            background_color: None,
        }
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    pub fn family(&self) -> &str {
        &self.typeface.family
    }

    pub fn size(&self) -> f32 {
        self.typeface.size
    }

    pub fn weight(&self) -> FontWeight {
        self.typeface.weight
    }

    pub fn italic(&self) -> bool {
        self.typeface.italic
    }

    pub fn set_family(&mut self, family: &str) {
        self.reintern(|face| face.family = family.to_string());
    }

    pub fn set_size(&mut self, size: f32) {
        self.reintern(|face| face.size = size);
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.reintern(|face| face.weight = weight);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.reintern(|face| face.italic = italic);
    }

    fn reintern(&mut self, change: impl FnOnce(&mut FontFace)) {
        let mut face = FontFace::clone(&self.typeface);
        change(&mut face);
        self.typeface = intern::intern(face);
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn set_underline(&mut self, value: bool) {
        self.underline = value;
    }

    pub fn overline(&self) -> bool {
        self.overline
    }

    pub fn set_overline(&mut self, value: bool) {
        self.overline = value;
    }

    pub fn strikeout(&self) -> bool {
        self.strikeout
    }

    pub fn set_strikeout(&mut self, value: bool) {
        self.strikeout = value;
    }

    pub fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }

    pub fn set_letter_spacing(&mut self, value: f32) {
        self.letter_spacing = value;
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    pub fn is_valid(&self) -> bool {
        !self.family().is_empty()
            && self.size().is_finite()
            && self.size() > 0.0
            && self.weight().is_valid()
            && self.letter_spacing.is_finite()
    }

    pub fn string_fields(&self) -> Vec<String> {
        let color = |color: Option<Color>| color.map(|c| c.to_string()).unwrap_or_default();
        vec![
            self.family().to_string(),
            points(self.size()),
            self.weight().to_string(),
            self.italic().to_string(),
            self.underline.to_string(),
            self.overline.to_string(),
            self.strikeout.to_string(),
            points(self.letter_spacing),
            color(self.color),
            color(self.background_color),
        ]
    }

    pub fn to_css(&self) -> String {
        let mut css = format!(
            "font-family: '{}'; font-size: {}pt; font-weight: {}; font-style: {}; ",
            self.family(),
            points(self.size()),
            self.weight(),
            if self.italic() { "italic" } else { "normal" }
        );

        let decorations: Vec<&str> = [
            (self.underline, "underline"),
            (self.overline, "overline"),
            (self.strikeout, "line-through"),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, name)| name)
        .collect();
        if !decorations.is_empty() {
            css.push_str(&format!("text-decoration: {}; ", decorations.join(" ")));
        }

        if self.letter_spacing != DEFAULT_LETTER_SPACING {
            css.push_str(&format!("letter-spacing: {}pt; ", points(self.letter_spacing)));
        }
        if let Some(color) = self.color {
            css.push_str(&format!("color: {}; ", color.to_css()));
        }
        if let Some(color) = self.background_color {
            css.push_str(&format!("background-color: {}; ", color.to_css()));
        }
        css
    }

    pub fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        let default = default_text_font();
        if self.family() != default.family {
            attributes.append("family", self.family());
        }
        if self.size() != default.size {
            attributes.append("size", points(self.size()));
        }
        if self.weight() != default.weight {
            attributes.append("weight", self.weight());
        }
        if self.italic() != default.italic {
            attributes.append("italic", self.italic());
        }
        if self.underline {
            attributes.append("underline", true);
        }
        if self.overline {
            attributes.append("overline", true);
        }
        if self.strikeout {
            attributes.append("strikeout", true);
        }
        if self.letter_spacing != DEFAULT_LETTER_SPACING {
            attributes.append("letter_spacing", points(self.letter_spacing));
        }
        if let Some(color) = self.color {
            attributes.append("color", color);
        }
        if let Some(color) = self.background_color {
            attributes.append("background_color", color);
        }
    }

    pub fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let default = default_text_font();
        let family = attributes
            .value("family")
            .map(str::to_string)
            .unwrap_or_else(|| default.family.clone());
        let size = attributes.parse_length(reader, "size", default.size);
        let weight = attributes.parse_or(reader, "weight", default.weight);
        let italic = attributes.parse_bool(reader, "italic", default.italic);
        let underline = attributes.parse_bool(reader, "underline", false);
        let overline = attributes.parse_bool(reader, "overline", false);
        let strikeout = attributes.parse_bool(reader, "strikeout", false);
        let letter_spacing = attributes.parse_or(reader, "letter_spacing", DEFAULT_LETTER_SPACING);
        let color = attributes.parse_value::<Color>(reader, "color");
        let background_color = attributes.parse_value::<Color>(reader, "background_color");

        if family.is_empty() {
            reader.raise_error("Font family must not be empty");
        }
        if reader.has_error() {
            return;
        }

        self.typeface = intern::intern(FontFace {
            family,
            size,
            weight,
            italic,
        });
        self.underline = underline;
        self.overline = overline;
        self.strikeout = strikeout;
        self.letter_spacing = letter_spacing;
        self.color = color;
        self.background_color = background_color;
    }
}

/// Formats that carry a font.
pub trait FontFormat: Format {
    fn font(&self) -> &FontProps;

    fn font_mut(&mut self) -> &mut FontProps;

    fn family(&self) -> &str {
        self.font().family()
    }

    fn set_family(&mut self, family: &str) {
        self.font_mut().set_family(family);
    }

    fn font_size(&self) -> f32 {
        self.font().size()
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_mut().set_size(size);
    }

    fn font_weight(&self) -> FontWeight {
        self.font().weight()
    }

    fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_mut().set_weight(weight);
    }

    fn italic(&self) -> bool {
        self.font().italic()
    }

    fn set_italic(&mut self, italic: bool) {
        self.font_mut().set_italic(italic);
    }

    fn underline(&self) -> bool {
        self.font().underline()
    }

    fn set_underline(&mut self, value: bool) {
        self.font_mut().set_underline(value);
    }

    fn overline(&self) -> bool {
        self.font().overline()
    }

    fn set_overline(&mut self, value: bool) {
        self.font_mut().set_overline(value);
    }

    fn strikeout(&self) -> bool {
        self.font().strikeout()
    }

    fn set_strikeout(&mut self, value: bool) {
        self.font_mut().set_strikeout(value);
    }

    fn letter_spacing(&self) -> f32 {
        self.font().letter_spacing()
    }

    fn set_letter_spacing(&mut self, value: f32) {
        self.font_mut().set_letter_spacing(value);
    }

    fn font_color(&self) -> Option<Color> {
        self.font().color()
    }

    fn set_font_color(&mut self, color: Option<Color>) {
        self.font_mut().set_color(color);
    }

    fn font_background_color(&self) -> Option<Color> {
        self.font().background_color()
    }

    fn set_font_background_color(&mut self, color: Option<Color>) {
        self.font_mut().set_background_color(color);
    }
}

/// Distinct font properties across a set of formats.
///
/// Shared by the `FontFormat` aggregation and the text block aggregation.
#[derive(Debug, Default, Clone)]
pub struct Summary {
    families: BTreeSet<String>,
    sizes: BTreeSet<Scalar>,
    weights: BTreeSet<FontWeight>,
    italic: BooleanAggregation,
    underline: BooleanAggregation,
    overline: BooleanAggregation,
    strikeout: BooleanAggregation,
    letter_spacings: BTreeSet<Scalar>,
    colors: BTreeSet<Option<Color>>,
    background_colors: BTreeSet<Option<Color>>,
}

impl Summary {
    pub fn include(&mut self, font: &FontProps) {
        self.families.insert(font.family().to_string());
        self.sizes.insert(Scalar::new(font.size()));
        self.weights.insert(font.weight());
        self.italic.include(font.italic());
        self.underline.include(font.underline());
        self.overline.include(font.overline());
        self.strikeout.include(font.strikeout());
        self.letter_spacings.insert(Scalar::new(font.letter_spacing()));
        self.colors.insert(font.color());
        self.background_colors.insert(font.background_color());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn families(&self) -> &BTreeSet<String> {
        &self.families
    }

    pub fn sizes(&self) -> &BTreeSet<Scalar> {
        &self.sizes
    }

    pub fn weights(&self) -> &BTreeSet<FontWeight> {
        &self.weights
    }

    pub fn italic(&self) -> BooleanAggregation {
        self.italic
    }

    pub fn underline(&self) -> BooleanAggregation {
        self.underline
    }

    pub fn overline(&self) -> BooleanAggregation {
        self.overline
    }

    pub fn strikeout(&self) -> BooleanAggregation {
        self.strikeout
    }

    pub fn letter_spacings(&self) -> &BTreeSet<Scalar> {
        &self.letter_spacings
    }

    /// Font colors in use; `None` stands for the default color.
    pub fn colors(&self) -> &BTreeSet<Option<Color>> {
        &self.colors
    }

    pub fn background_colors(&self) -> &BTreeSet<Option<Color>> {
        &self.background_colors
    }

    pub fn describe(&self) -> Vec<(String, String)> {
        let colors = |set: &BTreeSet<Option<Color>>| {
            aggregation::describe_values(set.iter().map(|color| match color {
                Some(color) => color.to_string(),
                None => "default".to_string(),
            }))
        };
        vec![
            ("family".to_string(), aggregation::describe_values(&self.families)),
            ("size".to_string(), aggregation::describe_lengths(&self.sizes)),
            ("weight".to_string(), aggregation::describe_values(&self.weights)),
            ("italic".to_string(), self.italic.to_string()),
            ("underline".to_string(), self.underline.to_string()),
            ("overline".to_string(), self.overline.to_string()),
            ("strikeout".to_string(), self.strikeout.to_string()),
            ("letter spacing".to_string(), aggregation::describe_lengths(&self.letter_spacings)),
            ("color".to_string(), colors(&self.colors)),
            ("background color".to_string(), colors(&self.background_colors)),
        ]
    }
}

#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    base: AggregationBase,
    summary: Summary,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fonts(&self) -> &Summary {
        &self.summary
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
        let Some(font) = format_ref.as_font() else {
            return false;
        };
        if !self.base.add_format(format, include_existing) {
            return false;
        }
        self.summary.include(font.font());
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        self.summary.describe()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::aggregation::Aggregation as _;
    use crate::format::character::CharacterFormat;
    use std::rc::Rc;

    #[test]
    fn weights_parse_numbers_and_names() {
        assert_eq!("700".parse::<FontWeight>(), Ok(FontWeight::BOLD));
        assert_eq!("Bold".parse::<FontWeight>(), Ok(FontWeight::BOLD));
        assert_eq!("normal".parse::<FontWeight>(), Ok(FontWeight::REGULAR));
        assert!("950".parse::<FontWeight>().is_err());
        assert!("heavy-ish".parse::<FontWeight>().is_err());
        assert_eq!(FontWeight::from_number(1000), FontWeight::BLACK);
    }

    #[test]
    fn equal_faces_are_interned_once() {
        let mut first = FontProps::default();
        let mut second = FontProps::default();
        first.set_family("Helvetica");
        second.set_family("Helvetica");
        assert!(Rc::ptr_eq(first.typeface(), second.typeface()));

        second.set_underline(true);
        assert!(Rc::ptr_eq(first.typeface(), second.typeface()));
        assert_ne!(first, second);
    }

    #[test]
    fn default_props_write_no_attributes() {
        let mut attributes = XmlAttributes::new();
        FontProps::default().write_add_immediate_attributes(&mut attributes);
        assert!(attributes.is_empty());
    }

    #[test]
    fn attributes_round_trip() {
        let mut props = FontProps::default();
        props.set_family("Courier New");
        props.set_size(10.5);
        props.set_weight(FontWeight::BOLD);
        props.set_italic(true);
        props.set_strikeout(true);
        props.set_letter_spacing(0.5);
        props.set_color(Some(Color::rgb(255, 0, 0)));
        props.set_background_color(Some(Color::rgba(0, 0, 255, 128)));

        let mut attributes = XmlAttributes::new();
        props.write_add_immediate_attributes(&mut attributes);
        assert_eq!(attributes.value("weight"), Some("700"));
        assert_eq!(attributes.value("background_color"), Some("#0000ff80"));

        let mut reader = XmlReader::new();
        let mut read_back = FontProps::default();
        read_back.read_immediate_attributes(&mut reader, &attributes);
        assert!(!reader.has_error());
        assert_eq!(read_back, props);
    }

    #[test]
    fn malformed_color_raises_error() {
        let attributes: XmlAttributes = [("color", "red")].into_iter().collect();
        let mut reader = XmlReader::new();
        let mut props = FontProps::default();
        props.read_immediate_attributes(&mut reader, &attributes);
        assert!(reader.has_error());
        assert_eq!(props.color(), None);
    }

    #[test]
    fn css_lists_decorations() {
        let mut props = FontProps::default();
        props.set_underline(true);
        props.set_strikeout(true);
        let css = props.to_css();
        assert!(css.contains("text-decoration: underline line-through;"));
        assert!(css.contains("font-family: 'Times New Roman';"));
    }

    #[test]
    fn default_fonts_are_settable_per_role() {
        let custom = Font::new("STIX Two Math", 11.0, FontWeight::REGULAR, false);
        set_default_font(FontRole::Math, custom.clone());
        assert_eq!(default_math_font(), custom);
        assert_eq!(default_text_font().family, "Times New Roman");
        assert!(default_math_identifier_font().italic);

        reset_default_fonts();
        assert_eq!(default_math_font().family, "Times New Roman");
    }

    #[test]
    fn aggregation_summarizes_fonts() {
        let mut regular = CharacterFormat::new();
        regular.set_italic(false);
        let mut italic = CharacterFormat::new();
        italic.set_italic(true);
        italic.set_family("Helvetica");

        let mut aggregation = Aggregation::new();
        aggregation.add_format(&regular.into_pointer(), true);
        aggregation.add_format(&italic.into_pointer(), true);

        assert_eq!(aggregation.fonts().families().len(), 2);
        assert!(aggregation.fonts().italic().both());
        assert!(aggregation.fonts().underline().all_false());
    }
}
