//! Justification of block formats

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use bitflags::bitflags;

use crate::format::aggregation::{self, Aggregation as _, AggregationBase};
use crate::format::block::{self, BlockFormat};
use crate::format::{Capabilities, FormatPointer};
use crate::xml::{XmlAttributes, XmlReader};

pub const NAME: &str = "JustifiedBlockFormat";

pub const DEFAULT_JUSTIFICATION: Justification = Justification::Left;

pub fn capabilities() -> Capabilities {
    block::capabilities().with(NAME)
}

bitflags! {
    /// Set of justification modes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Justifications: u8 {
        const LEFT = 1;
        const RIGHT = 2;
        const CENTER = 4;
        const JUSTIFY = 8;
    }
}

impl Display for Justifications {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let names: Vec<&str> = Justification::ALL
            .iter()
            .filter(|mode| **mode != Justification::None && self.contains(mode.bits()))
            .map(|mode| mode.token())
            .collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// How lines of a block are aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Justification {
    None,
    Left,
    Right,
    Center,
    Justify,
}

impl Justification {
    pub const ALL: [Justification; 5] = [
        Justification::None,
        Justification::Left,
        Justification::Right,
        Justification::Center,
        Justification::Justify,
    ];

    /// Mask bit of this mode. `None` has no bit and is always supported.
    pub fn bits(self) -> Justifications {
        match self {
            Justification::None => Justifications::empty(),
            Justification::Left => Justifications::LEFT,
            Justification::Right => Justifications::RIGHT,
            Justification::Center => Justifications::CENTER,
            Justification::Justify => Justifications::JUSTIFY,
        }
    }

    /// Attribute token. Full justification is written as `filled`.
    pub fn token(self) -> &'static str {
        match self {
            Justification::None => "none",
            Justification::Left => "left",
            Justification::Right => "right",
            Justification::Center => "centered",
            Justification::Justify => "filled",
        }
    }

    /// CSS `text-align` value, if any.
    pub fn css_value(self) -> Option<&'static str> {
        match self {
            Justification::None => None,
            Justification::Left => Some("left"),
            Justification::Right => Some("right"),
            Justification::Center => Some("center"),
            Justification::Justify => Some("justify"),
        }
    }
}

impl Display for Justification {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Justification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Justification::ALL
            .into_iter()
            .find(|mode| mode.token() == s)
            .ok_or_else(|| format!("unknown justification \"{s}\""))
    }
}

/// Current justification plus the modes the owning format supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JustifiedProps {
    justification: Justification,
    supported: Justifications,
}

impl Default for JustifiedProps {
    fn default() -> Self {
        Self::new(Justifications::all())
    }
}

impl JustifiedProps {
    /// Props supporting `supported`, starting at the default justification
    /// when supported and at `None` otherwise.
    pub fn new(supported: Justifications) -> Self {
        let justification = if supported.contains(DEFAULT_JUSTIFICATION.bits()) {
            DEFAULT_JUSTIFICATION
        } else {
            Justification::None
        };
        Self {
            justification,
            supported,
        }
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    pub fn supported(&self) -> Justifications {
        self.supported
    }

    pub fn supports(&self, mode: Justification) -> bool {
        self.supported.contains(mode.bits())
    }

    /// Change the justification. Returns false, leaving it unchanged, when
    /// `mode` is not supported.
    pub fn set_justification(&mut self, mode: Justification) -> bool {
        if !self.supports(mode) {
            return false;
        }
        self.justification = mode;
        true
    }

    pub fn is_valid(&self) -> bool {
        self.supports(self.justification)
    }

    pub fn string_fields(&self) -> Vec<String> {
        vec![self.justification.token().to_string()]
    }

    pub fn to_css(&self) -> String {
        match self.justification.css_value() {
            Some(value) => format!("text-align: {value}; "),
            None => String::new(),
        }
    }

    pub fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes) {
        if self.justification != DEFAULT_JUSTIFICATION {
            attributes.append("justification", self.justification.token());
        }
    }

    pub fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes) {
        let mode = attributes.parse_or(reader, "justification", DEFAULT_JUSTIFICATION);
        if reader.has_error() {
            return;
        }
        if !self.set_justification(mode) {
            reader.raise_error(format!("Unsupported justification \"{mode}\""));
        }
    }
}

/// Block formats with a selectable justification.
pub trait JustifiedBlockFormat: BlockFormat {
    fn justified(&self) -> &JustifiedProps;

    fn justified_mut(&mut self) -> &mut JustifiedProps;

    fn justification(&self) -> Justification {
        self.justified().justification()
    }

    fn supported_justifications(&self) -> Justifications {
        self.justified().supported()
    }

    fn supports_justification_mode(&self, mode: Justification) -> bool {
        self.justified().supports(mode)
    }

    fn set_justification(&mut self, mode: Justification) -> bool {
        self.justified_mut().set_justification(mode)
    }
}

/// Justifications in use and supported across a set of formats.
#[derive(Debug, Clone)]
pub struct Aggregation {
    block: block::Aggregation,
    justifications: BTreeSet<Justification>,
    supported: Justifications,
    fully_supported: Justifications,
}

impl Default for Aggregation {
    fn default() -> Self {
        Self {
            block: block::Aggregation::default(),
            justifications: BTreeSet::new(),
            supported: Justifications::empty(),
            fully_supported: Justifications::all(),
        }
    }
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self) -> &block::Aggregation {
        &self.block
    }

    /// Justifications currently used by the aggregated formats.
    pub fn justifications(&self) -> &BTreeSet<Justification> {
        &self.justifications
    }

    /// Modes supported by at least one aggregated format.
    pub fn supported_justifications(&self) -> Justifications {
        self.supported
    }

    /// Modes supported by every aggregated format; empty when nothing was
    /// aggregated.
    pub fn fully_supported_justifications(&self) -> Justifications {
        if self.number_formats() == 0 {
            Justifications::empty()
        } else {
            self.fully_supported
        }
    }
}

impl aggregation::Aggregation for Aggregation {
    fn type_name(&self) -> &'static str {
        NAME
    }

    fn base(&self) -> &AggregationBase {
        self.block.base()
    }

    fn base_mut(&mut self) -> &mut AggregationBase {
        self.block.base_mut()
    }

    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        let format_ref = format.borrow();
        let Some(justified) = format_ref.as_justified_block() else {
            return false;
        };
        if !self.block.add_format(format, include_existing) {
            return false;
        }

        let props = justified.justified();
        self.justifications.insert(props.justification());
        self.supported |= props.supported();
        self.fully_supported &= props.supported();
        true
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn summary(&self) -> Vec<(String, String)> {
        let mut summary = self.block.summary();
        summary.push((
            "justification".to_string(),
            aggregation::describe_values(&self.justifications),
        ));
        summary.push((
            "supported".to_string(),
            self.supported_justifications().to_string(),
        ));
        summary.push((
            "fully supported".to_string(),
            self.fully_supported_justifications().to_string(),
        ));
        summary
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
