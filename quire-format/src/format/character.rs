//! Character runs: a font plus a baseline position

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::font::{self, FontProps};
use crate::format::{join_fields, Capabilities, Format, FormatBase, FormatPointer};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "CharacterFormat";

pub const DEFAULT_POSITION: Position = Position::Normal;

pub fn capabilities() -> Capabilities {
    font::capabilities().with(NAME)
}

/// Vertical position of a character run relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Normal,
    Subscript,
    Superscript,
}

impl Position {
    pub fn token(self) -> &'static str {
        match self {
            Position::Normal => "normal",
            Position::Subscript => "subscript",
            Position::Superscript => "superscript",
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Position::Normal),
            "subscript" => Ok(Position::Subscript),
            "superscript" => Ok(Position::Superscript),
            _ => Err(format!("unknown position \"{s}\"")),
        }
    }
}

/// Format of a run of characters.
#[derive(Debug, Clone)]
pub struct CharacterFormat {
    base: FormatBase,
    font: FontProps,
    position: Position,
}

impl CharacterFormat {
    pub fn new() -> Self {
        Self {
            base: FormatBase::default(),
            font: FontProps::default(),
            position: DEFAULT_POSITION,
        }
    }

    pub fn creator() -> FormatPointer {
        Self::new().into_pointer()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Default for CharacterFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl_font_trait!(CharacterFormat);

impl Format for CharacterFormat {
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
        fields.push(self.position.token().to_string());
        join_fields(&fields)
    }

    fn to_css(&self) -> String {
        let mut css = self.font.to_css();
        match self.position {
            Position::Normal => {}
            Position::Subscript => css.push_str("vertical-align: sub; "),
            Position::Superscript => css.push_str("vertical-align: super; "),
        }
        css.trim_end().to_string()
    }

    fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.position != DEFAULT_POSITION {
            attributes.append("position", self.position);
        }
    }

    fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let position = attributes.parse_or(reader, "position", DEFAULT_POSITION);
        if !reader.has_error() {
            self.position = position;
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

/// Font summary plus positions in use.
#[derive(Debug, Default, Clone)]
pub struct Aggregation {
    font: font::Aggregation,
    positions: BTreeSet<Position>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(&self) -> &font::Aggregation {
        &self.font
    }

    pub fn positions(&self) -> &BTreeSet<Position> {
        &self.positions
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
        let Some(character) = format_ref.downcast_ref::<CharacterFormat>() else {
            return false;
        };
        if !self.font.add_format(format, include_existing) {
            return false;
        }
        self.positions.insert(character.position());
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let mut summary = self.font.summary();
        summary.push(("position".to_string(), aggregation::describe_values(&self.positions)));
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
    use crate::format::font::{FontFormat, FontWeight};

    #[test]
    fn capabilities_skip_block_traits() {
        assert_eq!(
            CharacterFormat::new().capabilities().as_slice(),
            &["Format", "FontFormat", "CharacterFormat"]
        );
        assert!(CharacterFormat::new().as_block().is_none());
    }

    #[test]
    fn attributes_follow_font_then_position() {
        let mut format = CharacterFormat::new();
        format.set_font_weight(FontWeight::BOLD);
        format.set_position(Position::Superscript);

        let mut attributes = XmlAttributes::new();
        format.write_add_attributes(&mut attributes);
        let names: Vec<&str> = attributes.names().collect();
        assert_eq!(names, vec!["weight", "position"]);

        let mut reader = XmlReader::new();
        let mut read_back = CharacterFormat::new();
        read_back.read_attributes(&mut reader, &attributes);
        assert_eq!(read_back.to_format_string(), format.to_format_string());
    }

    #[test]
    fn css_positions_the_baseline() {
        let mut format = CharacterFormat::new();
        format.set_position(Position::Subscript);
        assert!(format.to_css().ends_with("vertical-align: sub;"));
    }

    #[test]
    fn aggregation_tracks_positions() {
        let mut sub = CharacterFormat::new();
        sub.set_position(Position::Subscript);

        let mut aggregation = Aggregation::new();
        aggregation.add_format(&sub.into_pointer(), true);
        aggregation.add_format(&CharacterFormat::new().into_pointer(), true);

        let positions: Vec<Position> = aggregation.positions().iter().copied().collect();
        assert_eq!(positions, vec![Position::Normal, Position::Subscript]);
        assert_eq!(aggregation.font().fonts().families().len(), 1);
    }
}
