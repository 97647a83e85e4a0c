//! Raw slot properties and the masks that select them.

use bitflags::bitflags;

use crate::backend::RawMenu;

bitflags! {
    /// Selects which [`SlotProps`] fields a read or write touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PropMask: u32 {
        /// The [`TypeFlags`] of the slot.
        const KIND = 1 << 0;
        /// The numeric command id.
        const ID = 1 << 1;
        /// The [`StateFlags`] of the slot.
        const STATE = 1 << 2;
        /// The attached submenu handle, if any.
        const SUBMENU = 1 << 3;
        /// The caption text (two-phase, see [`SlotProps`]).
        const TEXT = 1 << 4;
        /// The bitmap reference of a bitmap-appearance slot.
        const BITMAP = 1 << 5;
        /// The user data of an owner-drawn slot.
        const DATA = 1 << 6;
    }
}

bitflags! {
    /// Structural nature of a slot.
    ///
    /// The text appearance has no flag of its own: a slot with neither
    /// `BITMAP` nor `OWNER_DRAWN` set carries a caption. Any future
    /// appearance kind must get an explicit flag checked before that
    /// elimination case.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeFlags: u32 {
        /// The slot is a separator.
        const SEPARATOR = 1 << 0;
        /// The slot is drawn from a bitmap.
        const BITMAP = 1 << 1;
        /// The slot is drawn by the application.
        const OWNER_DRAWN = 1 << 2;
    }
}

bitflags! {
    /// Interaction state of a slot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StateFlags: u32 {
        /// The slot cannot be selected.
        const DISABLED = 1 << 0;
        /// The slot carries a check mark.
        const CHECKED = 1 << 1;
        /// The slot is the menu's default item.
        const DEFAULT = 1 << 2;
    }
}

/// An opaque reference to a native image used by bitmap-appearance slots.
///
/// On Win32 this wraps the `HBITMAP` value. The model never dereferences
/// it, only stores and returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapRef(isize);

impl BitmapRef {
    pub const fn from_raw(raw: isize) -> BitmapRef {
        BitmapRef(raw)
    }

    pub const fn into_raw(self) -> isize {
        self.0
    }
}

/// One slot's raw properties, paired with the mask that says which fields
/// are meaningful.
///
/// Captions use a two-phase measure/fetch protocol, mirroring how native
/// menu APIs return variable-length text: a read with [`PropMask::TEXT`]
/// and `text_capacity == 0` fills only `text_len` with the caption's
/// length; a second read with `text_capacity >= text_len` fetches the text
/// itself (truncated to `text_capacity` characters otherwise).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotProps {
    /// Which of the remaining fields are requested or being written.
    pub mask: PropMask,
    /// Structural nature of the slot.
    pub kind: TypeFlags,
    /// Interaction state of the slot.
    pub state: StateFlags,
    /// The numeric command id.
    pub id: u32,
    /// The attached submenu resource, if any.
    pub submenu: Option<RawMenu>,
    /// The image of a bitmap-appearance slot.
    pub bitmap: Option<BitmapRef>,
    /// The user data of an owner-drawn slot.
    pub data: usize,
    /// Caption text; filled by a fetch-phase read, consumed by writes.
    pub text: String,
    /// Caption length in characters, filled by any [`PropMask::TEXT`] read.
    pub text_len: usize,
    /// How many characters of caption a read may fetch; `0` means measure
    /// only.
    pub text_capacity: usize,
}

impl SlotProps {
    /// An empty property block requesting the fields in `mask`.
    pub fn request(mask: PropMask) -> SlotProps {
        SlotProps { mask, ..SlotProps::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_starts_empty() {
        let props = SlotProps::request(PropMask::KIND | PropMask::SUBMENU);
        assert_eq!(props.mask, PropMask::KIND | PropMask::SUBMENU);
        assert_eq!(props.kind, TypeFlags::empty());
        assert_eq!(props.submenu, None);
        assert_eq!(props.text_capacity, 0);
    }

    #[test]
    fn text_has_no_type_flag() {
        // Text appearance is the all-zero case; only the other two natures
        // have flags.
        assert_eq!(TypeFlags::all(), TypeFlags::SEPARATOR | TypeFlags::BITMAP | TypeFlags::OWNER_DRAWN);
    }
}
