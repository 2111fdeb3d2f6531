//! The Format object model
//!
//!     A format is a shared value object describing one visual property group
//!     (spacing, justification, font, list numbering...). Elements hold formats
//!     through a [`FormatPointer`]; several elements may share one format.
//!     Each format keeps a weak set of the elements that use it.
//!
//! Trait mixins
//!
//!     Property groups are modelled as components (`BlockProps`, `FontProps`,
//!     ...) plus a trait exposing the component (`BlockFormat`, `FontFormat`,
//!     ...). Leaf formats own one component per trait they satisfy and
//!     implement the traits by delegation:
//!
//!     | Leaf                              | Block | Justified | TextBlock | Font | List |
//!     |-----------------------------------|-------|-----------|-----------|------|------|
//!     | `ParagraphFormat`                 |   x   |     x     |     x     |  x   |      |
//!     | `ListAdditionalParagraphFormat`   |   x   |     x     |     x     |  x   |      |
//!     | `OrderedListParagraphFormat`      |   x   |     x     |     x     |  x   |  x   |
//!     | `UnorderedListParagraphFormat`    |   x   |     x     |     x     |  x   |  x   |
//!     | `CharacterFormat`                 |       |           |           |  x   |      |
//!     | `ParenthesisFormat`               |       |           |           |  x   |      |
//!
//!     The capability chain of each leaf is spelled out explicitly through the
//!     `capabilities()` function of every trait module, ancestors first.
//!
//! Attribute chains
//!
//!     Every component reads and writes only its own ("immediate") attributes.
//!     A leaf's `write_add_attributes`/`read_attributes` call the components
//!     in the fixed order Block → JustifiedBlock → TextBlock → Paragraph →
//!     Font → ListBase → leaf. Reading stops at the first step that raises an
//!     error on the reader.

#[macro_use]
mod macros;

pub mod aggregation;
pub mod block;
pub mod boolean;
pub mod bullets;
pub mod character;
pub mod font;
pub mod justified_block;
pub mod list_additional;
pub mod list_base;
pub mod ordered_list;
pub mod paragraph;
pub mod parenthesis;
pub mod text_block;
pub mod unordered_list;

use std::any::Any;
use std::cell::RefCell;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

use crate::element::{ElementPointer, WeakElementSet};
use crate::xml::{XmlAttributes, XmlReader};

pub use aggregation::{Aggregation, AggregationBase, FormatAggregation};
pub use block::BlockFormat;
pub use boolean::BooleanAggregation;
pub use font::FontFormat;
pub use justified_block::JustifiedBlockFormat;
pub use list_base::ListParagraphFormatBase;
pub use text_block::TextBlockFormat;

/// Shared, reference-counted pointer to a format.
pub type FormatPointer = Rc<RefCell<dyn Format>>;

/// Generic capability every format satisfies.
pub const NAME: &str = "Format";

/// Ordered list of the capability names a format satisfies.
///
/// Ancestor capabilities come first and the concrete leaf's own name last.
/// Pushing a name that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities(Vec<&'static str>);

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless it is already present.
    pub fn with(mut self, name: &'static str) -> Self {
        if !self.contains(name) {
            self.0.push(name);
        }
        self
    }

    /// Append every name of `other` that is not yet present, keeping order.
    pub fn merge(mut self, other: Capabilities) -> Self {
        for name in other.0 {
            self = self.with(name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|candidate| *candidate == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Capabilities {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl<'a> IntoIterator for &'a Capabilities {
    type Item = &'static str;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, &'static str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

/// Capabilities of the generic base format.
pub fn capabilities() -> Capabilities {
    Capabilities::new().with(NAME)
}

/// State every format carries regardless of its traits.
///
/// Cloning yields an empty owner set: a copied format starts detached from
/// the elements that referenced the original.
#[derive(Debug, Default)]
pub struct FormatBase {
    owners: WeakElementSet,
}

impl FormatBase {
    pub fn owners(&self) -> &WeakElementSet {
        &self.owners
    }

    pub fn owners_mut(&mut self) -> &mut WeakElementSet {
        &mut self.owners
    }
}

impl Clone for FormatBase {
    fn clone(&self) -> Self {
        Self::default()
    }
}

/// A serializable, cloneable visual format.
pub trait Format: Debug + Any {
    /// Stable type name, also used as the XML tag and factory key.
    fn type_name(&self) -> &'static str;

    /// The capability chain of this format, ancestors first.
    fn capabilities(&self) -> Capabilities;

    /// Deep copy of every property. The copy has no owning elements.
    fn clone_format(&self) -> FormatPointer;

    fn is_valid(&self) -> bool;

    fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Canonical comma-delimited description; the first field is the type name.
    fn to_format_string(&self) -> String;

    /// Single-line CSS declarations, without selector or braces.
    fn to_css(&self) -> String;

    /// A complete CSS rule for this format.
    fn to_css_entry(&self, class_name: &str, tag: &str, id: &str) -> String {
        css_rule(&css_selector(tag, class_name, id, ""), &self.to_css())
    }

    /// Format to use for the right half when `element` is split in two.
    ///
    /// `None` means both halves share this format.
    fn format_for_split(&self, _element: &ElementPointer) -> Option<FormatPointer> {
        None
    }

    fn owners(&self) -> &WeakElementSet;

    fn owners_mut(&mut self) -> &mut WeakElementSet;

    /// Strong references to the elements still using this format.
    fn elements(&self) -> Vec<ElementPointer> {
        self.owners().elements()
    }

    /// Append the attributes owned by the leaf type itself.
    fn write_add_immediate_attributes(&self, attributes: &mut XmlAttributes);

    /// Read the attributes owned by the leaf type itself.
    fn read_immediate_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes);

    /// Append the full attribute chain.
    fn write_add_attributes(&self, attributes: &mut XmlAttributes);

    /// Read the full attribute chain, stopping at the first error.
    fn read_attributes(&mut self, reader: &mut XmlReader, attributes: &XmlAttributes);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_block(&self) -> Option<&dyn BlockFormat> {
        None
    }

    fn as_block_mut(&mut self) -> Option<&mut dyn BlockFormat> {
        None
    }

    fn as_justified_block(&self) -> Option<&dyn JustifiedBlockFormat> {
        None
    }

    fn as_justified_block_mut(&mut self) -> Option<&mut dyn JustifiedBlockFormat> {
        None
    }

    fn as_text_block(&self) -> Option<&dyn TextBlockFormat> {
        None
    }

    fn as_text_block_mut(&mut self) -> Option<&mut dyn TextBlockFormat> {
        None
    }

    fn as_font(&self) -> Option<&dyn FontFormat> {
        None
    }

    fn as_font_mut(&mut self) -> Option<&mut dyn FontFormat> {
        None
    }

    fn as_list_paragraph(&self) -> Option<&dyn ListParagraphFormatBase> {
        None
    }

    fn as_list_paragraph_mut(&mut self) -> Option<&mut dyn ListParagraphFormatBase> {
        None
    }

    /// Wrap this format into a shared pointer.
    fn into_pointer(self) -> FormatPointer
    where
        Self: Sized,
    {
        Rc::new(RefCell::new(self))
    }
}

impl Display for dyn Format {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.to_format_string())
    }
}

impl dyn Format {
    /// Downcast to a concrete format type.
    pub fn downcast_ref<T: Format>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Format>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities().contains(name)
    }
}

/// Build a CSS selector from an optional tag, class, id and pseudo element.
pub fn css_selector(tag: &str, class_name: &str, id: &str, pseudo: &str) -> String {
    let mut selector = tag.to_string();
    if !class_name.is_empty() {
        selector.push('.');
        selector.push_str(class_name);
    }
    if !id.is_empty() {
        selector.push('#');
        selector.push_str(id);
    }
    if selector.is_empty() {
        selector.push('*');
    }
    if !pseudo.is_empty() {
        selector.push(':');
        selector.push_str(pseudo);
    }
    selector
}

/// Wrap declarations into a one-line CSS rule.
pub fn css_rule(selector: &str, declarations: &str) -> String {
    format!("{selector} {{ {declarations} }}\n")
}

/// Join comma-delimited fields, escaping commas and backslashes in each.
pub(crate) fn join_fields(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| field.replace('\\', "\\\\").replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_deduplicate_and_keep_order() {
        let caps = capabilities()
            .with("BlockFormat")
            .merge(capabilities().with("FontFormat"))
            .with("BlockFormat");
        assert_eq!(caps.as_slice(), &["Format", "BlockFormat", "FontFormat"]);
        assert!(caps.contains("FontFormat"));
        assert!(!caps.contains("ParagraphFormat"));
    }

    #[test]
    fn selectors_combine_parts() {
        assert_eq!(css_selector("p", "body_1", "", ""), "p.body_1");
        assert_eq!(css_selector("", "body_1", "", ""), ".body_1");
        assert_eq!(css_selector("li", "item", "x", "before"), "li.item#x:before");
        assert_eq!(css_selector("", "", "", ""), "*");
    }

    #[test]
    fn fields_escape_commas() {
        let fields = vec!["Format".to_string(), "Times, Roman".to_string()];
        assert_eq!(join_fields(&fields), "Format,Times\\, Roman");
    }
}
