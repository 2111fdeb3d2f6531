//! Interning of font descriptions
//!
//! Fonts split into an immutable part (family, size, weight, italic) that
//! identifies the face, and per-format decorations. Structurally identical
//! faces created independently resolve to one shared [`Typeface`]; the
//! interner only holds weak entries so faces disappear with their last user.
//!
//! The process interner is thread local: formats are `Rc` based and never
//! cross threads, and tests get an isolated table per test thread.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::FontWeight;
use crate::scalar::Scalar;

/// Shared handle on an interned face.
pub type Typeface = Rc<FontFace>;

/// Immutable description of a face.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub italic: bool,
}

impl FontFace {
    fn key(&self) -> FaceKey {
        FaceKey {
            family: self.family.clone(),
            size: Scalar::new(self.size),
            weight: self.weight,
            italic: self.italic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    size: Scalar,
    weight: FontWeight,
    italic: bool,
}

/// Table of live faces keyed by their immutable description.
#[derive(Debug, Default)]
pub struct FontInterner {
    faces: HashMap<FaceKey, Weak<FontFace>>,
}

impl FontInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared face matching `face`, creating it when no live one exists.
    pub fn intern(&mut self, face: FontFace) -> Typeface {
        let key = face.key();
        if let Some(existing) = self.faces.get(&key).and_then(Weak::upgrade) {
            return existing;
        }

        self.faces.retain(|_, weak| weak.strong_count() > 0);
        let typeface = Rc::new(face);
        self.faces.insert(key, Rc::downgrade(&typeface));
        typeface
    }

    /// Number of faces still referenced somewhere.
    pub fn len(&self) -> usize {
        self.faces
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.faces.clear();
    }
}

thread_local! {
    static INTERNER: RefCell<FontInterner> = RefCell::new(FontInterner::new());
}

/// Intern `face` in this thread's table.
pub fn intern(face: FontFace) -> Typeface {
    INTERNER.with(|interner| interner.borrow_mut().intern(face))
}

/// Number of live faces in this thread's table.
pub fn interned_faces() -> usize {
    INTERNER.with(|interner| interner.borrow().len())
}

/// Number of holders of a face, the interner excluded.
pub fn usage_count(typeface: &Typeface) -> usize {
    Rc::strong_count(typeface)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(family: &str, size: f32) -> FontFace {
        FontFace {
            family: family.to_string(),
            size,
            weight: FontWeight::REGULAR,
            italic: false,
        }
    }

    #[test]
    fn identical_faces_share_one_entry() {
        let mut interner = FontInterner::new();
        let first = interner.intern(face("Helvetica", 12.0));
        let second = interner.intern(face("Helvetica", 12.0));
        let other = interner.intern(face("Helvetica", 14.0));

        assert!(Rc::ptr_eq(&first, &second));
        assert!(!Rc::ptr_eq(&first, &other));
        assert_eq!(interner.len(), 2);
        assert_eq!(usage_count(&first), 2);
    }

    #[test]
    fn dropped_faces_are_forgotten() {
        let mut interner = FontInterner::new();
        {
            let _face = interner.intern(face("Courier", 10.0));
            assert_eq!(interner.len(), 1);
        }
        assert!(interner.is_empty());

        let again = interner.intern(face("Courier", 10.0));
        assert_eq!(again.family, "Courier");
        assert_eq!(interner.len(), 1);
    }
}
