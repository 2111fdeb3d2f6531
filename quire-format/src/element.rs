//! The narrow element model formats attach to
//!
//! Elements own their format through a shared [`FormatPointer`]; the format
//! only keeps weak references back to the elements that use it, so
//! `Element → Format → Element` never forms a strong cycle.
//!
//! The tree here is deliberately small: a root holding paragraphs, paragraphs
//! holding text. It is what the export back-ends walk and what the
//! multi-selection aggregation is keyed by.

use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::rc::{Rc, Weak};

use crate::format::FormatPointer;

pub type ElementPointer = Rc<Element>;
pub type ElementWeakPointer = Weak<Element>;

/// What an element represents in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Root,
    Paragraph,
    Text,
}

/// A node of the document tree.
pub struct Element {
    kind: ElementKind,
    text: RefCell<String>,
    format: RefCell<Option<FormatPointer>>,
    parent: RefCell<ElementWeakPointer>,
    children: RefCell<Vec<ElementPointer>>,
    weak_self: ElementWeakPointer,
}

impl Element {
    /// Create a detached element of the given kind.
    pub fn new(kind: ElementKind) -> ElementPointer {
        Rc::new_cyclic(|weak_self| Element {
            kind,
            text: RefCell::new(String::new()),
            format: RefCell::new(None),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            weak_self: weak_self.clone(),
        })
    }

    /// Create a paragraph holding `text`, optionally attached to `format`.
    pub fn paragraph(text: &str, format: Option<FormatPointer>) -> ElementPointer {
        let element = Self::new(ElementKind::Paragraph);
        element.set_text(text);
        element.set_format(format);
        element
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    /// A strong pointer to this element, if it is still alive.
    pub fn pointer(&self) -> Option<ElementPointer> {
        self.weak_self.upgrade()
    }

    pub fn weak_pointer(&self) -> ElementWeakPointer {
        self.weak_self.clone()
    }

    pub fn format(&self) -> Option<FormatPointer> {
        self.format.borrow().clone()
    }

    /// Attach a new format, moving this element's back-reference from the old
    /// format's owner set to the new one.
    pub fn set_format(&self, format: Option<FormatPointer>) {
        let previous = self.format.replace(format.clone());

        if let Some(previous) = previous {
            previous.borrow_mut().owners_mut().remove_weak(&self.weak_self);
        }
        if let Some(format) = format {
            format.borrow_mut().owners_mut().insert_weak(self.weak_self.clone());
        }
    }

    pub fn parent(&self) -> Option<ElementPointer> {
        self.parent.borrow().upgrade()
    }

    pub fn children(&self) -> Vec<ElementPointer> {
        self.children.borrow().clone()
    }

    pub fn number_children(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn child_index(&self, child: &ElementPointer) -> Option<usize> {
        self.children
            .borrow()
            .iter()
            .position(|candidate| Rc::ptr_eq(candidate, child))
    }

    pub fn append_child(&self, child: ElementPointer) {
        *child.parent.borrow_mut() = self.weak_self.clone();
        self.children.borrow_mut().push(child);
    }

    pub fn insert_child(&self, index: usize, child: ElementPointer) {
        *child.parent.borrow_mut() = self.weak_self.clone();
        let mut children = self.children.borrow_mut();
        let index = index.min(children.len());
        children.insert(index, child);
    }

    /// Split a paragraph at the character offset `at`.
    ///
    /// This element keeps the text before `at`; the returned element holds the
    /// rest and is inserted right after this one when the element has a
    /// parent. The right half's format comes from
    /// [`Format::format_for_split`](crate::format::Format::format_for_split),
    /// falling back to sharing this element's format.
    pub fn split(&self, at: usize) -> Option<ElementPointer> {
        if self.kind != ElementKind::Paragraph {
            return None;
        }

        let this = self.pointer()?;
        let text = self.text();
        let split_byte = match text.char_indices().nth(at) {
            Some((byte, _)) => byte,
            None if text.chars().count() == at => text.len(),
            None => return None,
        };

        let (left, right) = text.split_at(split_byte);
        let right_format = self.format().map(|format| {
            let split_format = format.borrow().format_for_split(&this);
            split_format.unwrap_or(format)
        });

        let right_element = Element::paragraph(right, right_format);
        self.set_text(left);

        if let Some(parent) = self.parent() {
            if let Some(index) = parent.child_index(&this) {
                parent.insert_child(index + 1, right_element.clone());
            }
        }

        Some(right_element)
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let format_name = self.format.borrow().as_ref().map(|format| format.borrow().type_name());
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("text", &self.text.borrow())
            .field("format", &format_name)
            .field("children", &self.children.borrow())
            .finish()
    }
}

/// A set of weakly held elements.
///
/// Used both as a format's owner set and as the element set every
/// aggregation carries. Elements that have been dropped are skipped.
#[derive(Debug, Default, Clone)]
pub struct WeakElementSet {
    members: Vec<ElementWeakPointer>,
}

impl WeakElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element. Returns false if it was already a member.
    pub fn insert(&mut self, element: &ElementPointer) -> bool {
        self.insert_weak(Rc::downgrade(element))
    }

    pub fn insert_weak(&mut self, element: ElementWeakPointer) -> bool {
        self.prune();
        if element.strong_count() == 0 || self.contains_weak(&element) {
            return false;
        }
        self.members.push(element);
        true
    }

    pub fn remove(&mut self, element: &ElementPointer) -> bool {
        self.remove_weak(&Rc::downgrade(element))
    }

    pub fn remove_weak(&mut self, element: &ElementWeakPointer) -> bool {
        let before = self.members.len();
        self.members.retain(|member| !Weak::ptr_eq(member, element));
        before != self.members.len()
    }

    pub fn contains(&self, element: &ElementPointer) -> bool {
        self.contains_weak(&Rc::downgrade(element))
    }

    fn contains_weak(&self, element: &ElementWeakPointer) -> bool {
        self.members.iter().any(|member| Weak::ptr_eq(member, element))
    }

    /// Strong references to every member that is still alive.
    pub fn elements(&self) -> Vec<ElementPointer> {
        self.members.iter().filter_map(Weak::upgrade).collect()
    }

    /// Number of members that are still alive.
    pub fn len(&self) -> usize {
        self.members
            .iter()
            .filter(|member| member.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    fn prune(&mut self) {
        self.members.retain(|member| member.strong_count() > 0);
    }
}

/// A document: a root element whose children are paragraphs.
#[derive(Debug)]
pub struct Document {
    root: ElementPointer,
}

impl Document {
    pub fn new() -> Self {
        Self {
            root: Element::new(ElementKind::Root),
        }
    }

    pub fn root(&self) -> &ElementPointer {
        &self.root
    }

    /// Append a paragraph to the document and return it.
    pub fn add_paragraph(&self, text: &str, format: Option<FormatPointer>) -> ElementPointer {
        let paragraph = Element::paragraph(text, format);
        self.root.append_child(paragraph.clone());
        paragraph
    }

    pub fn paragraphs(&self) -> Vec<ElementPointer> {
        self.root.children()
    }

    /// Every distinct format referenced by the document, in document order.
    pub fn formats(&self) -> Vec<FormatPointer> {
        let mut formats: Vec<FormatPointer> = Vec::new();
        for paragraph in self.paragraphs() {
            let mut pending = vec![paragraph];
            while let Some(element) = pending.pop() {
                if let Some(format) = element.format() {
                    if !formats.iter().any(|known| Rc::ptr_eq(known, &format)) {
                        formats.push(format);
                    }
                }
                pending.extend(element.children().into_iter().rev());
            }
        }
        formats
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
