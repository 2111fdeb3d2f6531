//! Factory registries for formats and aggregations
//!
//! Two registries map a capability name to a zero-argument creator: one
//! builds formats (used when reading format sheets), the other builds
//! aggregations (used by [`AggregationsByCapability`]). Both share the same
//! key space. Nothing registers itself implicitly; call [`register_all`]
//! once before using either factory.
//!
//! [`AggregationsByCapability`]: crate::aggregations::AggregationsByCapability

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::format::aggregation::{Aggregation, FormatAggregation};
use crate::format::{
    self, block, character, font, justified_block, list_additional, list_base, ordered_list,
    paragraph, parenthesis, text_block, unordered_list, FormatPointer,
};

/// Builds a fresh format.
pub type FormatCreator = fn() -> FormatPointer;

/// Builds a fresh, empty aggregation.
pub type AggregationCreator = fn() -> Box<dyn Aggregation>;

/// Name to creator map where the first registration of a name wins.
#[derive(Debug)]
pub struct CreatorRegistry<C: Copy> {
    creators: HashMap<String, C>,
}

impl<C: Copy> CreatorRegistry<C> {
    pub fn new() -> Self {
        Self {
            creators: HashMap::new(),
        }
    }

    /// Register a creator. Returns false, keeping the existing creator, when
    /// `name` is already registered.
    pub fn register_creator(&mut self, name: &str, creator: C) -> bool {
        if self.creators.contains_key(name) {
            return false;
        }
        self.creators.insert(name.to_string(), creator);
        true
    }

    pub fn creator(&self, name: &str) -> Option<C> {
        self.creators.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.creators.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

impl<C: Copy> Default for CreatorRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

static FORMAT_CREATORS: Lazy<RwLock<CreatorRegistry<FormatCreator>>> =
    Lazy::new(|| RwLock::new(CreatorRegistry::new()));

static AGGREGATION_CREATORS: Lazy<RwLock<CreatorRegistry<AggregationCreator>>> =
    Lazy::new(|| RwLock::new(CreatorRegistry::new()));

pub fn register_format_creator(name: &str, creator: FormatCreator) -> bool {
    let registered = FORMAT_CREATORS.write().register_creator(name, creator);
    if !registered {
        tracing::trace!(name, "format creator already registered");
    }
    registered
}

/// Create a format by type name. `None` when the name is not registered.
pub fn create_format(name: &str) -> Option<FormatPointer> {
    let creator = FORMAT_CREATORS.read().creator(name);
    if creator.is_none() {
        tracing::debug!(name, "no format creator registered");
    }
    creator.map(|create| create())
}

pub fn format_names() -> Vec<String> {
    FORMAT_CREATORS.read().names()
}

pub fn register_aggregation_creator(name: &str, creator: AggregationCreator) -> bool {
    let registered = AGGREGATION_CREATORS.write().register_creator(name, creator);
    if !registered {
        tracing::trace!(name, "aggregation creator already registered");
    }
    registered
}

/// Create an empty aggregation for a capability. `None` when the capability
/// is not registered.
pub fn create_aggregation(name: &str) -> Option<Box<dyn Aggregation>> {
    let creator = AGGREGATION_CREATORS.read().creator(name);
    if creator.is_none() {
        tracing::debug!(name, "no aggregation creator registered");
    }
    creator.map(|create| create())
}

pub fn aggregation_names() -> Vec<String> {
    AGGREGATION_CREATORS.read().names()
}

/// Register every built-in format and aggregation. Safe to call repeatedly.
pub fn register_all() {
    let formats: [(&str, FormatCreator); 6] = [
        (paragraph::NAME, paragraph::ParagraphFormat::creator),
        (list_additional::NAME, list_additional::ListAdditionalParagraphFormat::creator),
        (ordered_list::NAME, ordered_list::OrderedListParagraphFormat::creator),
        (unordered_list::NAME, unordered_list::UnorderedListParagraphFormat::creator),
        (character::NAME, character::CharacterFormat::creator),
        (parenthesis::NAME, parenthesis::ParenthesisFormat::creator),
    ];

    let aggregations: [(&str, AggregationCreator); 12] = [
        (format::NAME, || Box::new(FormatAggregation::new())),
        (block::NAME, || Box::new(block::Aggregation::default())),
        (justified_block::NAME, || Box::new(justified_block::Aggregation::default())),
        (font::NAME, || Box::new(font::Aggregation::default())),
        (text_block::NAME, || Box::new(text_block::Aggregation::default())),
        (paragraph::NAME, || Box::new(paragraph::Aggregation::default())),
        (list_base::NAME, || Box::new(list_base::Aggregation::default())),
        (list_additional::NAME, || Box::new(list_additional::Aggregation::default())),
        (ordered_list::NAME, || Box::new(ordered_list::Aggregation::default())),
        (unordered_list::NAME, || Box::new(unordered_list::Aggregation::default())),
        (character::NAME, || Box::new(character::Aggregation::default())),
        (parenthesis::NAME, || Box::new(parenthesis::Aggregation::default())),
    ];

    let mut added = 0;
    for (name, creator) in formats {
        added += usize::from(register_format_creator(name, creator));
    }
    for (name, creator) in aggregations {
        added += usize::from(register_aggregation_creator(name, creator));
    }
    if added > 0 {
        tracing::debug!(added, "registered built-in formats and aggregations");
    }
}
