//! Stable CSS class names for the formats of a document

use std::collections::HashMap;

use crate::element::Document;
use crate::format::{Format, FormatPointer};

/// Assigns each distinct format a class named `<type name lowercased>_<n>`,
/// numbered per type in order of first appearance.
///
/// Structurally identical formats share a class.
#[derive(Debug, Default)]
pub struct FormatClasses {
    entries: Vec<(String, FormatPointer)>,
    by_description: HashMap<String, usize>,
    per_type: HashMap<&'static str, usize>,
}

impl FormatClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classes for every format of `document`, in document order.
    pub fn from_document(document: &Document) -> Self {
        let mut classes = Self::new();
        for format in document.formats() {
            classes.class_name(&format);
        }
        classes
    }

    /// Class of `format`, assigning one on first sight.
    pub fn class_name(&mut self, format: &FormatPointer) -> String {
        let (description, type_name) = {
            let format = format.borrow();
            (format.to_format_string(), format.type_name())
        };
        let index = match self.by_description.get(&description) {
            Some(&index) => index,
            None => {
                let counter = self.per_type.entry(type_name).or_insert(0);
                *counter += 1;
                let class = format!("{}_{}", type_name.to_lowercase(), counter);
                self.entries.push((class, format.clone()));
                let index = self.entries.len() - 1;
                self.by_description.insert(description, index);
                index
            }
        };
        self.entries[index].0.clone()
    }

    /// Class of an already known format.
    pub fn get(&self, format: &FormatPointer) -> Option<&str> {
        let description = format.borrow().to_format_string();
        self.by_description
            .get(&description)
            .map(|&index| self.entries[index].0.as_str())
    }

    /// `(class, format)` pairs, one per distinct format.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatPointer)> {
        self.entries
            .iter()
            .map(|(class, format)| (class.as_str(), format))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// HTML tag a format is rendered with.
pub fn element_tag(format: &dyn Format) -> &'static str {
    if format.as_list_paragraph().is_some() {
        "li"
    } else if format.as_text_block().is_some() {
        "p"
    } else {
        "span"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::character::CharacterFormat;
    use crate::format::ordered_list::OrderedListParagraphFormat;
    use crate::format::paragraph::ParagraphFormat;
    use crate::format::BlockFormat;

    #[test]
    fn classes_are_numbered_per_type() {
        let document = Document::new();
        let mut indented = ParagraphFormat::new();
        indented.set_left_indentation(20.0);

        document.add_paragraph("a", Some(ParagraphFormat::new().into_pointer()));
        document.add_paragraph("b", Some(OrderedListParagraphFormat::new().into_pointer()));
        document.add_paragraph("c", Some(indented.into_pointer()));
        document.add_paragraph("d", Some(ParagraphFormat::new().into_pointer()));

        let classes = FormatClasses::from_document(&document);
        let names: Vec<&str> = classes.iter().map(|(class, _)| class).collect();
        assert_eq!(
            names,
            vec![
                "paragraphformat_1",
                "orderedlistparagraphformat_1",
                "paragraphformat_2"
            ]
        );

        let last = document.paragraphs()[3].format().expect("format");
        assert_eq!(classes.get(&last), Some("paragraphformat_1"));
    }

    #[test]
    fn dropped_formats_do_not_shadow_later_ones() {
        let mut classes = FormatClasses::new();
        let plain = classes.class_name(&ParagraphFormat::new().into_pointer());

        for _ in 0..50 {
            let duplicate = ParagraphFormat::new().into_pointer();
            assert_eq!(classes.class_name(&duplicate), plain);
            drop(duplicate);

            let mut indented = ParagraphFormat::new();
            indented.set_left_indentation(36.0);
            assert_eq!(classes.class_name(&indented.into_pointer()), "paragraphformat_2");
        }
        assert_eq!(classes.len(), 2);
    }

    #[test]
    fn tags_follow_capabilities() {
        assert_eq!(element_tag(&ParagraphFormat::new()), "p");
        assert_eq!(element_tag(&OrderedListParagraphFormat::new()), "li");
        assert_eq!(element_tag(&CharacterFormat::new()), "span");
    }
}
