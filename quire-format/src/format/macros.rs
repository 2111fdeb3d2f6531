//! Delegation boilerplate shared by the leaf formats
//!
//! Leaves store their trait components in fields named after the trait
//! (`base`, `block`, `justified`, `text_block`, `font`, `list`).

/// Items of [`Format`](crate::format::Format) that only forward to the
/// leaf's fields.
macro_rules! format_accessors {
    () => {
        fn clone_format(&self) -> $crate::format::FormatPointer {
            ::std::rc::Rc::new(::std::cell::RefCell::new(self.clone()))
        }

        fn owners(&self) -> &$crate::element::WeakElementSet {
            self.base.owners()
        }

        fn owners_mut(&mut self) -> &mut $crate::element::WeakElementSet {
            self.base.owners_mut()
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}

/// Capability accessors of a leaf composing the text block traits.
macro_rules! text_block_accessors {
    () => {
        fn as_block(&self) -> Option<&dyn $crate::format::BlockFormat> {
            Some(self)
        }

        fn as_block_mut(&mut self) -> Option<&mut dyn $crate::format::BlockFormat> {
            Some(self)
        }

        fn as_justified_block(&self) -> Option<&dyn $crate::format::JustifiedBlockFormat> {
            Some(self)
        }

        fn as_justified_block_mut(
            &mut self,
        ) -> Option<&mut dyn $crate::format::JustifiedBlockFormat> {
            Some(self)
        }

        fn as_text_block(&self) -> Option<&dyn $crate::format::TextBlockFormat> {
            Some(self)
        }

        fn as_text_block_mut(&mut self) -> Option<&mut dyn $crate::format::TextBlockFormat> {
            Some(self)
        }

        fn as_font(&self) -> Option<&dyn $crate::format::FontFormat> {
            Some(self)
        }

        fn as_font_mut(&mut self) -> Option<&mut dyn $crate::format::FontFormat> {
            Some(self)
        }
    };
}

/// Capability accessors of a leaf composing only the font trait.
macro_rules! font_accessors {
    () => {
        fn as_font(&self) -> Option<&dyn $crate::format::FontFormat> {
            Some(self)
        }

        fn as_font_mut(&mut self) -> Option<&mut dyn $crate::format::FontFormat> {
            Some(self)
        }
    };
}

/// Implement the text block trait family by delegating to the leaf's
/// `block`, `justified`, `text_block` and `font` fields.
macro_rules! impl_text_block_traits {
    ($leaf:ty) => {
        impl $crate::format::BlockFormat for $leaf {
            fn block(&self) -> &$crate::format::block::BlockProps {
                &self.block
            }

            fn block_mut(&mut self) -> &mut $crate::format::block::BlockProps {
                &mut self.block
            }
        }

        impl $crate::format::JustifiedBlockFormat for $leaf {
            fn justified(&self) -> &$crate::format::justified_block::JustifiedProps {
                &self.justified
            }

            fn justified_mut(&mut self) -> &mut $crate::format::justified_block::JustifiedProps {
                &mut self.justified
            }
        }

        impl $crate::format::TextBlockFormat for $leaf {
            fn text_block(&self) -> &$crate::format::text_block::TextBlockProps {
                &self.text_block
            }

            fn text_block_mut(&mut self) -> &mut $crate::format::text_block::TextBlockProps {
                &mut self.text_block
            }
        }

        impl_font_trait!($leaf);
    };
}

/// Implement the font trait by delegating to the leaf's `font` field.
macro_rules! impl_font_trait {
    ($leaf:ty) => {
        impl $crate::format::FontFormat for $leaf {
            fn font(&self) -> &$crate::format::font::FontProps {
                &self.font
            }

            fn font_mut(&mut self) -> &mut $crate::format::font::FontProps {
                &mut self.font
            }
        }
    };
}
