//! Per-capability aggregations over a selection
//!
//! [`AggregationsByCapability`] answers two questions about a set of
//! elements: which capabilities their formats have in common, and which
//! elements carry a given capability. Every format fed in is walked along its
//! capability chain and folded into one aggregation per capability name.
//!
//! Copies are cheap: clones share the backing map until one side is mutated,
//! at which point the mutated side detaches by duplicating every aggregation
//! (replaying formats and elements into fresh ones from the registry).

use std::collections::HashMap;
use std::rc::Rc;

use crate::element::ElementPointer;
use crate::format::aggregation::Aggregation;
use crate::format::FormatPointer;
use crate::registry;

#[derive(Debug, Default)]
struct AggregationMap {
    order: Vec<String>,
    aggregations: HashMap<String, Box<dyn Aggregation>>,
}

impl AggregationMap {
    fn get(&self, name: &str) -> Option<&(dyn Aggregation + 'static)> {
        self.aggregations.get(name).map(|aggregation| aggregation.as_ref())
    }

    fn get_or_create(&mut self, name: &str) -> Option<&mut Box<dyn Aggregation>> {
        if !self.aggregations.contains_key(name) {
            let aggregation = registry::create_aggregation(name)?;
            self.order.push(name.to_string());
            self.aggregations.insert(name.to_string(), aggregation);
        }
        self.aggregations.get_mut(name)
    }
}

impl Clone for AggregationMap {
    fn clone(&self) -> Self {
        let mut copy = AggregationMap::default();
        for name in &self.order {
            let Some(duplicate) = self.get(name).and_then(|aggregation| aggregation.duplicate())
            else {
                tracing::warn!(capability = %name, "aggregation could not be duplicated");
                continue;
            };
            copy.order.push(name.clone());
            copy.aggregations.insert(name.clone(), duplicate);
        }
        copy
    }
}

/// Map from capability name to the aggregation of that capability.
#[derive(Debug, Default, Clone)]
pub struct AggregationsByCapability {
    map: Rc<AggregationMap>,
}

impl AggregationsByCapability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate the formats of `elements`; elements without a format are
    /// skipped.
    pub fn from_elements<'a>(elements: impl IntoIterator<Item = &'a ElementPointer>) -> Self {
        let mut aggregations = Self::new();
        for element in elements {
            aggregations.add_element(element);
        }
        aggregations
    }

    /// Fold `format` into the aggregation of each of its capabilities,
    /// recording `element` as an owner when given.
    ///
    /// Returns true when at least one aggregation accepted the format.
    /// Capabilities without a registered aggregation are skipped.
    pub fn add_format(
        &mut self,
        format: &FormatPointer,
        element: Option<&ElementPointer>,
        include_existing: bool,
    ) -> bool {
        let capabilities = format.borrow().capabilities();
        let map = self.detach();

        let mut accepted = false;
        for name in capabilities.iter() {
            let Some(aggregation) = map.get_or_create(name) else {
                continue;
            };
            if aggregation.add_format(format, include_existing) {
                accepted = true;
            }
            if let Some(element) = element {
                aggregation.add_element(element);
            }
        }
        accepted
    }

    /// Fold the format of `element`. Returns false when it has none.
    pub fn add_element(&mut self, element: &ElementPointer) -> bool {
        match element.format() {
            Some(format) => self.add_format(&format, Some(element), true),
            None => false,
        }
    }

    /// Capability names present, in the order they were first seen.
    pub fn capabilities(&self) -> Vec<String> {
        self.map.order.clone()
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.map.aggregations.contains_key(name)
    }

    pub fn aggregation(&self, name: &str) -> Option<&(dyn Aggregation + 'static)> {
        self.map.get(name)
    }

    /// The aggregation of `name` as its concrete type.
    pub fn get<T: Aggregation>(&self, name: &str) -> Option<&T> {
        self.aggregation(name)?.downcast_ref::<T>()
    }

    /// Live elements recorded for a capability.
    pub fn elements(&self, name: &str) -> Vec<ElementPointer> {
        self.aggregation(name)
            .map(|aggregation| aggregation.elements())
            .unwrap_or_default()
    }

    pub fn formats(&self, name: &str) -> Vec<FormatPointer> {
        self.aggregation(name)
            .map(|aggregation| aggregation.formats())
            .unwrap_or_default()
    }

    /// `(capability, aggregation)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Aggregation)> {
        self.map
            .order
            .iter()
            .filter_map(|name| Some((name.as_str(), self.map.get(name)?)))
    }

    pub fn len(&self) -> usize {
        self.map.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.order.is_empty()
    }

    /// Whether the backing map is currently shared with a copy.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.map) > 1
    }

    /// Drop every aggregation. Never copies the shared map.
    pub fn clear(&mut self) {
        self.map = Rc::new(AggregationMap::default());
    }

    fn detach(&mut self) -> &mut AggregationMap {
        if self.is_shared() {
            tracing::debug!(
                capabilities = self.map.order.len(),
                "detaching shared aggregations before mutation"
            );
        }
        Rc::make_mut(&mut self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::format::character::CharacterFormat;
    use crate::format::justified_block::{self, Justification};
    use crate::format::paragraph::ParagraphFormat;
    use crate::format::{block, Format, JustifiedBlockFormat};

    fn names(elements: &[ElementPointer]) -> Vec<String> {
        let mut names: Vec<String> = elements.iter().map(|element| element.text()).collect();
        names.sort();
        names
    }

    #[test]
    fn shared_paragraph_format_reaches_every_capability() {
        registry::register_all();

        let format = ParagraphFormat::new().into_pointer();
        let first = Element::paragraph("E1", Some(format.clone()));
        let second = Element::paragraph("E2", Some(format.clone()));

        let mut aggregations = AggregationsByCapability::new();
        aggregations.add_format(&format, Some(&first), true);
        aggregations.add_format(&format, Some(&second), true);

        let capabilities = aggregations.capabilities();
        for expected in ["ParagraphFormat", "BlockFormat", "JustifiedBlockFormat", "TextBlockFormat"] {
            assert!(capabilities.iter().any(|name| name == expected), "{expected}");
        }
        assert_eq!(names(&aggregations.elements("BlockFormat")), vec!["E1", "E2"]);
        assert_eq!(aggregations.formats("BlockFormat").len(), 1);
    }

    #[test]
    fn copies_share_until_mutated() {
        registry::register_all();

        let paragraph = ParagraphFormat::new().into_pointer();
        let character = CharacterFormat::new().into_pointer();
        let p = Element::paragraph("p", Some(paragraph.clone()));
        let c = Element::paragraph("c", Some(character.clone()));

        let mut original = AggregationsByCapability::new();
        original.add_element(&p);
        original.add_element(&c);

        let mut copy = original.clone();
        assert!(original.is_shared());
        assert_eq!(copy.capabilities(), original.capabilities());
        assert_eq!(names(&copy.elements("FontFormat")), names(&original.elements("FontFormat")));

        let mut centered = ParagraphFormat::new();
        centered.set_justification(Justification::Center);
        let extra = Element::paragraph("extra", Some(centered.into_pointer()));
        copy.add_element(&extra);

        assert!(!original.is_shared());
        assert_eq!(names(&original.elements("BlockFormat")), vec!["p"]);
        assert_eq!(names(&copy.elements("BlockFormat")), vec!["extra", "p"]);
        assert!(!original.has_capability("NoSuchCapability"));

        let original_modes = original
            .get::<justified_block::Aggregation>(justified_block::NAME)
            .expect("justified aggregation")
            .justifications()
            .len();
        assert_eq!(original_modes, 1);
    }

    #[test]
    fn clear_does_not_touch_copies() {
        registry::register_all();

        let element = Element::paragraph("p", Some(ParagraphFormat::new().into_pointer()));
        let mut original = AggregationsByCapability::from_elements([&element]);
        let copy = original.clone();

        original.clear();
        assert!(original.is_empty());
        assert!(!copy.is_shared());
        assert_eq!(copy.elements(block::NAME).len(), 1);
    }

    #[test]
    fn elements_without_format_are_skipped() {
        registry::register_all();

        let bare = Element::paragraph("bare", None);
        let mut aggregations = AggregationsByCapability::new();
        assert!(!aggregations.add_element(&bare));
        assert!(aggregations.is_empty());
    }

    #[test]
    fn character_formats_stop_at_the_font_chain() {
        registry::register_all();

        let element = Element::paragraph("c", Some(CharacterFormat::new().into_pointer()));
        let aggregations = AggregationsByCapability::from_elements([&element]);
        assert_eq!(
            aggregations.capabilities(),
            vec!["Format", "FontFormat", "CharacterFormat"]
        );
        assert!(aggregations.aggregation(block::NAME).is_none());
        assert!(element.format().map_or(false, |format| format.borrow().is_valid()));
    }
}
