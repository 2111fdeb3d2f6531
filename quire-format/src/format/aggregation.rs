//! Aggregations summarize one capability across many formats
//!
//! An aggregation is created per capability name (through the aggregation
//! registry), fed formats with [`Aggregation::add_format`] and discarded once
//! the query it answers is done. Besides its summary it tracks the formats it
//! has seen and a weak set of the elements they belong to.
//!
//! Each trait module defines its own `Aggregation` struct that contains the
//! aggregation of its ancestor trait and extends it:
//!
//!     Format ─ BlockFormat ─ JustifiedBlockFormat ─ TextBlockFormat ─ ParagraphFormat
//!                                                                      ├─ ListParagraphFormatBase
//!                                                                      │    ├─ OrderedListParagraphFormat
//!                                                                      │    └─ UnorderedListParagraphFormat
//!                                                                      └─ ListAdditionalParagraphFormat
//!     Format ─ FontFormat ─ CharacterFormat / ParenthesisFormat
//!
//! `TextBlockFormat` also folds font properties through [`font::Summary`],
//! which is shared with the `FontFormat` aggregation.
//!
//! [`font::Summary`]: crate::format::font::Summary

use std::any::Any;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::element::{ElementPointer, WeakElementSet};
use crate::format::{FormatPointer, NAME};
use crate::registry;
use crate::scalar::{points, Scalar};

/// Summary of one capability across a set of formats.
pub trait Aggregation: Debug + Any {
    /// Capability name this aggregation summarizes.
    fn type_name(&self) -> &'static str;

    fn base(&self) -> &AggregationBase;

    fn base_mut(&mut self) -> &mut AggregationBase;

    /// Fold a format into the summary.
    ///
    /// Returns false, without changing anything, when the format lacks this
    /// capability or when it was already added and `include_existing` is
    /// false.
    fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool;

    /// Reset to the empty state.
    fn clear(&mut self);

    fn as_any(&self) -> &dyn Any;

    /// Human readable `(property, values)` pairs describing the summary.
    fn summary(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Remove a format by rebuilding from the remaining ones.
    ///
    /// Summaries such as supported-mode intersections cannot be decremented,
    /// so removal clears the aggregation and replays every other format and
    /// every element not using the removed format.
    fn remove_format(&mut self, format: &FormatPointer) -> bool {
        if !self.base().contains_format(format) {
            return false;
        }

        let remaining: Vec<FormatPointer> = self
            .base()
            .formats()
            .iter()
            .filter(|candidate| !Rc::ptr_eq(candidate, format))
            .cloned()
            .collect();
        let elements: Vec<ElementPointer> = self
            .base()
            .elements()
            .into_iter()
            .filter(|element| {
                element
                    .format()
                    .map_or(true, |owned| !Rc::ptr_eq(&owned, format))
            })
            .collect();

        tracing::debug!(
            capability = self.type_name(),
            remaining = remaining.len(),
            "rebuilding aggregation after removal"
        );

        self.clear();
        for candidate in &remaining {
            self.add_format(candidate, true);
        }
        for element in &elements {
            self.add_element(element);
        }
        true
    }

    fn formats(&self) -> Vec<FormatPointer> {
        self.base().formats().to_vec()
    }

    fn number_formats(&self) -> usize {
        self.base().formats().len()
    }

    fn elements(&self) -> Vec<ElementPointer> {
        self.base().elements()
    }

    fn add_element(&mut self, element: &ElementPointer) -> bool {
        self.base_mut().add_element(element)
    }

    /// Fresh aggregation of the same capability holding the same formats and
    /// elements. `None` when the capability has no registered creator.
    fn duplicate(&self) -> Option<Box<dyn Aggregation>> {
        let mut copy = registry::create_aggregation(self.type_name())?;
        for format in self.formats() {
            copy.add_format(&format, true);
        }
        for element in self.elements() {
            copy.add_element(&element);
        }
        Some(copy)
    }
}

impl dyn Aggregation {
    pub fn downcast_ref<T: Aggregation>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Bookkeeping shared by every aggregation: the formats seen so far and the
/// elements they apply to.
#[derive(Debug, Default, Clone)]
pub struct AggregationBase {
    formats: Vec<FormatPointer>,
    seen: HashSet<*const ()>,
    elements: WeakElementSet,
}

impl AggregationBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a format. Returns `include_existing` when it is already tracked.
    pub fn add_format(&mut self, format: &FormatPointer, include_existing: bool) -> bool {
        if self.seen.insert(key(format)) {
            self.formats.push(format.clone());
            true
        } else {
            include_existing
        }
    }

    pub fn contains_format(&self, format: &FormatPointer) -> bool {
        self.seen.contains(&key(format))
    }

    pub fn formats(&self) -> &[FormatPointer] {
        &self.formats
    }

    pub fn add_element(&mut self, element: &ElementPointer) -> bool {
        self.elements.insert(element)
    }

    pub fn elements(&self) -> Vec<ElementPointer> {
        self.elements.elements()
    }

    pub fn element_set(&self) -> &WeakElementSet {
        &self.elements
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn key(format: &FormatPointer) -> *const () {
    Rc::as_ptr(format) as *const ()
}

/// Aggregation of the generic `Format` capability; tracks formats and
/// elements only.
#[derive(Debug, Default, Clone)]
pub struct FormatAggregation {
    base: AggregationBase,
}

impl FormatAggregation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aggregation for FormatAggregation {
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
        self.base.add_format(format, include_existing)
    }

    fn clear(&mut self) {
        self.base.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `a, b, c` rendering of a set of lengths.
pub fn describe_lengths(values: &BTreeSet<Scalar>) -> String {
    values
        .iter()
        .map(|value| points(value.get()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `a, b, c` rendering of any displayable set.
pub fn describe_values<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
