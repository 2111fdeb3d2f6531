//! Order independence and removal laws of the aggregations

use std::collections::BTreeSet;

use proptest::prelude::*;
use quire_format::element::Element;
use quire_format::format::aggregation::Aggregation as _;
use quire_format::format::block;
use quire_format::format::paragraph::ParagraphFormat;
use quire_format::format::{BlockFormat, BooleanAggregation, Format, FormatPointer};
use quire_format::scalar::Scalar;
use quire_format::{register_all, AggregationsByCapability};

fn indented(left: u8) -> FormatPointer {
    let mut format = ParagraphFormat::new();
    format.set_left_indentation(f32::from(left));
    format.into_pointer()
}

fn left_indentations(aggregation: &block::Aggregation) -> Vec<f32> {
    aggregation
        .left_indentations()
        .iter()
        .map(|value| value.get())
        .collect()
}

proptest! {
    #[test]
    fn boolean_aggregation_ignores_order(values in prop::collection::vec(any::<bool>(), 0..16)) {
        let forward: BooleanAggregation = values.iter().copied().collect();
        let backward: BooleanAggregation = values.iter().rev().copied().collect();
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward.is_valid(), !values.is_empty());
        prop_assert_eq!(forward.both(), values.contains(&true) && values.contains(&false));
    }

    #[test]
    fn boolean_aggregation_is_idempotent(values in prop::collection::vec(any::<bool>(), 1..16)) {
        let once: BooleanAggregation = values.iter().copied().collect();
        let twice: BooleanAggregation = values.iter().chain(values.iter()).copied().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn block_summary_is_the_set_of_inputs(lefts in prop::collection::vec(0u8..72, 1..12)) {
        let formats: Vec<FormatPointer> = lefts.iter().copied().map(indented).collect();

        let mut forward = block::Aggregation::new();
        for format in &formats {
            forward.add_format(format, true);
        }
        let mut backward = block::Aggregation::new();
        for format in formats.iter().rev() {
            backward.add_format(format, true);
        }

        let expected: BTreeSet<Scalar> = lefts.iter().map(|left| Scalar::new(f32::from(*left))).collect();
        prop_assert_eq!(forward.left_indentations(), &expected);
        prop_assert_eq!(left_indentations(&forward), left_indentations(&backward));
        prop_assert_eq!(forward.number_formats(), formats.len());
    }

    #[test]
    fn removal_matches_rebuilding(lefts in prop::collection::vec(0u8..72, 2..10), pick in any::<prop::sample::Index>()) {
        let formats: Vec<FormatPointer> = lefts.iter().copied().map(indented).collect();
        let removed = pick.index(formats.len());

        let mut aggregation = block::Aggregation::new();
        for format in &formats {
            aggregation.add_format(format, true);
        }
        prop_assert!(aggregation.remove_format(&formats[removed]));

        let mut rebuilt = block::Aggregation::new();
        for (index, format) in formats.iter().enumerate() {
            if index != removed {
                rebuilt.add_format(format, true);
            }
        }
        prop_assert_eq!(left_indentations(&aggregation), left_indentations(&rebuilt));
        prop_assert_eq!(aggregation.number_formats(), formats.len() - 1);
    }

    #[test]
    fn copies_are_unaffected_by_later_additions(lefts in prop::collection::vec(0u8..72, 1..8), extra in 100u8..120) {
        register_all();

        let elements: Vec<_> = lefts
            .iter()
            .map(|left| Element::paragraph("p", Some(indented(*left))))
            .collect();
        let original = AggregationsByCapability::from_elements(&elements);
        let mut copy = original.clone();
        copy.add_element(&Element::paragraph("extra", Some(indented(extra))));

        let before = original
            .get::<block::Aggregation>(block::NAME)
            .map(left_indentations)
            .unwrap_or_default();
        prop_assert!(!before.contains(&f32::from(extra)));
        prop_assert_eq!(copy.elements(block::NAME).len(), original.elements(block::NAME).len() + 1);
    }
}

#[test]
fn capabilities_are_reported_in_first_seen_order() {
    register_all();

    let paragraph = Element::paragraph("p", Some(ParagraphFormat::new().into_pointer()));
    let aggregations = AggregationsByCapability::from_elements([&paragraph]);
    insta::assert_snapshot!(
        aggregations.capabilities().join(" > "),
        @"Format > BlockFormat > JustifiedBlockFormat > FontFormat > TextBlockFormat > ParagraphFormat"
    );
}
