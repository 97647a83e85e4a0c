//! Appearance dispatch for command and submenu slots.
//!
//! A button's appearance is classified the same way an item's kind is:
//! from a fresh minimal read on every dispatch, never from a cached tag.

use crate::error::MenuError;
use crate::props::{BitmapRef, PropMask, SlotProps, TypeFlags};
use crate::slot::Slot;

/// The appearance a command or submenu slot currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// A caption, the all-zero appearance.
    Text,
    /// An image.
    Bitmap,
    /// Drawn by the application.
    OwnerDrawn,
}

/// Classifies the appearance bits of a freshly read snapshot.
///
/// Text has no flag of its own and is detected purely by elimination, so
/// any future appearance kind must be given an explicit flag and checked
/// *before* the final arm, never after it.
pub fn classify_button(kind: TypeFlags) -> ButtonKind {
    if kind.contains(TypeFlags::BITMAP) {
        ButtonKind::Bitmap
    } else if kind.contains(TypeFlags::OWNER_DRAWN) {
        ButtonKind::OwnerDrawn
    } else {
        ButtonKind::Text
    }
}

pub(crate) fn kind(slot: &Slot) -> Result<ButtonKind, MenuError> {
    Ok(classify_button(slot.read(PropMask::KIND)?.kind))
}

pub(crate) fn dispatch<V: ButtonVisitor>(slot: &Slot, visitor: &mut V) -> Result<V::Output, MenuError> {
    Ok(match kind(slot)? {
        ButtonKind::Text => visitor.text(TextButtonView { slot }),
        ButtonKind::Bitmap => visitor.bitmap(BitmapButtonView { slot }),
        ButtonKind::OwnerDrawn => visitor.owner_drawn(OwnerDrawnButtonView { slot }),
    })
}

pub(crate) fn dispatch_mut<V: ButtonVisitorMut>(
    slot: &Slot,
    visitor: &mut V,
) -> Result<V::Output, MenuError> {
    Ok(match kind(slot)? {
        ButtonKind::Text => visitor.text(TextButtonViewMut { slot }),
        ButtonKind::Bitmap => visitor.bitmap(BitmapButtonViewMut { slot }),
        ButtonKind::OwnerDrawn => visitor.owner_drawn(OwnerDrawnButtonViewMut { slot }),
    })
}

/// Read-only view of a caption button.
#[derive(Debug)]
pub struct TextButtonView<'a> {
    slot: &'a Slot,
}

impl TextButtonView<'_> {
    /// The caption, fetched through the measure-then-fetch protocol.
    pub fn caption(&self) -> Result<String, MenuError> {
        self.slot.caption()
    }
}

/// Mutable view of a caption button.
#[derive(Debug)]
pub struct TextButtonViewMut<'a> {
    slot: &'a Slot,
}

impl TextButtonViewMut<'_> {
    pub fn caption(&self) -> Result<String, MenuError> {
        self.slot.caption()
    }

    pub fn set_caption(&mut self, caption: &str) -> Result<(), MenuError> {
        self.slot.set_caption(caption)
    }
}

/// Read-only view of a bitmap button.
#[derive(Debug)]
pub struct BitmapButtonView<'a> {
    slot: &'a Slot,
}

impl BitmapButtonView<'_> {
    /// The opaque image reference, if one is currently set.
    pub fn image(&self) -> Result<Option<BitmapRef>, MenuError> {
        Ok(self.slot.read(PropMask::BITMAP)?.bitmap)
    }
}

/// Mutable view of a bitmap button.
#[derive(Debug)]
pub struct BitmapButtonViewMut<'a> {
    slot: &'a Slot,
}

impl BitmapButtonViewMut<'_> {
    pub fn image(&self) -> Result<Option<BitmapRef>, MenuError> {
        Ok(self.slot.read(PropMask::BITMAP)?.bitmap)
    }

    pub fn set_image(&mut self, image: BitmapRef) -> Result<(), MenuError> {
        let mut props = SlotProps::request(PropMask::BITMAP);
        props.bitmap = Some(image);
        self.slot.write(&props)
    }
}

/// Read-only view of an owner-drawn button.
#[derive(Debug)]
pub struct OwnerDrawnButtonView<'a> {
    slot: &'a Slot,
}

impl OwnerDrawnButtonView<'_> {
    /// The opaque user data the application draws from.
    pub fn data(&self) -> Result<usize, MenuError> {
        Ok(self.slot.read(PropMask::DATA)?.data)
    }
}

/// Mutable view of an owner-drawn button.
#[derive(Debug)]
pub struct OwnerDrawnButtonViewMut<'a> {
    slot: &'a Slot,
}

impl OwnerDrawnButtonViewMut<'_> {
    pub fn data(&self) -> Result<usize, MenuError> {
        Ok(self.slot.read(PropMask::DATA)?.data)
    }

    pub fn set_data(&mut self, data: usize) -> Result<(), MenuError> {
        let mut props = SlotProps::request(PropMask::DATA);
        props.data = data;
        self.slot.write(&props)
    }
}

/// Any read-only button view.
#[derive(Debug)]
pub enum AnyButtonView<'a> {
    Text(TextButtonView<'a>),
    Bitmap(BitmapButtonView<'a>),
    OwnerDrawn(OwnerDrawnButtonView<'a>),
}

/// Any mutable button view.
#[derive(Debug)]
pub enum AnyButtonViewMut<'a> {
    Text(TextButtonViewMut<'a>),
    Bitmap(BitmapButtonViewMut<'a>),
    OwnerDrawn(OwnerDrawnButtonViewMut<'a>),
}

/// Visitor for read-only button dispatch.
///
/// Per-appearance handlers default to the required
/// [`fallback`](ButtonVisitor::fallback).
pub trait ButtonVisitor {
    type Output;

    fn text(&mut self, view: TextButtonView<'_>) -> Self::Output {
        self.fallback(AnyButtonView::Text(view))
    }

    fn bitmap(&mut self, view: BitmapButtonView<'_>) -> Self::Output {
        self.fallback(AnyButtonView::Bitmap(view))
    }

    fn owner_drawn(&mut self, view: OwnerDrawnButtonView<'_>) -> Self::Output {
        self.fallback(AnyButtonView::OwnerDrawn(view))
    }

    fn fallback(&mut self, view: AnyButtonView<'_>) -> Self::Output;
}

/// Visitor for mutable button dispatch.
pub trait ButtonVisitorMut {
    type Output;

    fn text(&mut self, view: TextButtonViewMut<'_>) -> Self::Output {
        self.fallback(AnyButtonViewMut::Text(view))
    }

    fn bitmap(&mut self, view: BitmapButtonViewMut<'_>) -> Self::Output {
        self.fallback(AnyButtonViewMut::Bitmap(view))
    }

    fn owner_drawn(&mut self, view: OwnerDrawnButtonViewMut<'_>) -> Self::Output {
        self.fallback(AnyButtonViewMut::OwnerDrawn(view))
    }

    fn fallback(&mut self, view: AnyButtonViewMut<'_>) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_flag_wins() {
        assert_eq!(classify_button(TypeFlags::BITMAP), ButtonKind::Bitmap);
        assert_eq!(
            classify_button(TypeFlags::BITMAP | TypeFlags::OWNER_DRAWN),
            ButtonKind::Bitmap,
        );
    }

    #[test]
    fn owner_drawn_comes_second() {
        assert_eq!(classify_button(TypeFlags::OWNER_DRAWN), ButtonKind::OwnerDrawn);
    }

    #[test]
    fn text_is_the_all_zero_case() {
        assert_eq!(classify_button(TypeFlags::empty()), ButtonKind::Text);
    }
}
