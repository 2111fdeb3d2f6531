//! Grouping of flat paragraphs into blocks and lists
//!
//! A document stores list items as sibling paragraphs. Back-ends need the
//! nested shape: consecutive list items of the same kind form one list, and
//! continuation paragraphs attach to the item before them. A continuation
//! that shows the bullet opens a new item rendered with the previous item's
//! format.

use crate::element::{Document, ElementKind, ElementPointer};
use crate::format::list_additional::ListAdditionalParagraphFormat;
use crate::format::ordered_list::OrderedListParagraphFormat;
use crate::format::unordered_list::UnorderedListParagraphFormat;
use crate::format::FormatPointer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug)]
pub enum Block {
    Paragraph(ElementPointer),
    List(List),
}

#[derive(Debug)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

impl List {
    /// Format of the first item, which decides list-level attributes.
    pub fn format(&self) -> Option<&FormatPointer> {
        self.items.first().map(|item| &item.format)
    }
}

#[derive(Debug)]
pub struct ListItem {
    pub element: ElementPointer,
    /// The list format the item is rendered with.
    pub format: FormatPointer,
    /// Continuation paragraphs that do not show the bullet.
    pub continuations: Vec<ElementPointer>,
}

/// One piece of paragraph content: the paragraph's own text or a text child.
#[derive(Debug)]
pub struct Run {
    pub text: String,
    pub format: Option<FormatPointer>,
}

fn list_kind(format: &FormatPointer) -> Option<ListKind> {
    let format = format.borrow();
    if format.downcast_ref::<OrderedListParagraphFormat>().is_some() {
        Some(ListKind::Ordered)
    } else if format.downcast_ref::<UnorderedListParagraphFormat>().is_some() {
        Some(ListKind::Unordered)
    } else {
        None
    }
}

/// `Some(show_bullet)` for continuation paragraphs.
fn continuation(format: &FormatPointer) -> Option<bool> {
    format
        .borrow()
        .downcast_ref::<ListAdditionalParagraphFormat>()
        .map(ListAdditionalParagraphFormat::show_bullet)
}

/// Group the paragraphs of `document`.
pub fn blocks(document: &Document) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for paragraph in document.paragraphs() {
        let Some(format) = paragraph.format() else {
            blocks.push(Block::Paragraph(paragraph));
            continue;
        };

        if let Some(kind) = list_kind(&format) {
            let item = ListItem {
                element: paragraph,
                format,
                continuations: Vec::new(),
            };
            match blocks.last_mut() {
                Some(Block::List(list)) if list.kind == kind => list.items.push(item),
                _ => blocks.push(Block::List(List {
                    kind,
                    items: vec![item],
                })),
            }
            continue;
        }

        if let Some(show_bullet) = continuation(&format) {
            if let Some(Block::List(list)) = blocks.last_mut() {
                if let Some(last) = list.items.last_mut() {
                    if show_bullet {
                        let format = last.format.clone();
                        list.items.push(ListItem {
                            element: paragraph,
                            format,
                            continuations: Vec::new(),
                        });
                    } else {
                        last.continuations.push(paragraph);
                    }
                    continue;
                }
            }
        }

        blocks.push(Block::Paragraph(paragraph));
    }

    blocks
}

/// The runs of a paragraph: its own text, then each text child.
pub fn runs(paragraph: &ElementPointer) -> Vec<Run> {
    let mut runs = Vec::new();
    let text = paragraph.text();
    if !text.is_empty() {
        runs.push(Run { text, format: None });
    }
    for child in paragraph.children() {
        if child.kind() == ElementKind::Text {
            runs.push(Run {
                text: child.text(),
                format: child.format(),
            });
        }
    }
    runs
}
