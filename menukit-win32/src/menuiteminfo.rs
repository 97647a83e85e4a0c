//! Conversion between [`SlotProps`] and `MENUITEMINFOW`.
//!
//! The bitmap nature is carried by `hbmpItem` (`MIIM_BITMAP`); the legacy
//! `MFT_BITMAP`/`dwTypeData` encoding is honored on read only, never
//! written.

use std::mem;
use std::ptr;

use menukit_core::backend::RawMenu;
use menukit_core::props::{BitmapRef, PropMask, SlotProps, StateFlags, TypeFlags};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    MENUITEMINFOW, MFS_CHECKED, MFS_DEFAULT, MFS_DISABLED, MFT_BITMAP, MFT_OWNERDRAW,
    MFT_SEPARATOR, MIIM_BITMAP, MIIM_DATA, MIIM_FTYPE, MIIM_ID, MIIM_STATE, MIIM_STRING,
    MIIM_SUBMENU,
};

fn zeroed() -> MENUITEMINFOW {
    let mut info: MENUITEMINFOW = unsafe { mem::zeroed() };
    info.cbSize = mem::size_of::<MENUITEMINFOW>() as u32;
    info
}

// On read, KIND also pulls in MIIM_BITMAP: the bitmap appearance of a
// modern item lives in hbmpItem, and classification has to see it.
fn read_mask(mask: PropMask) -> u32 {
    let mut native = 0;
    if mask.contains(PropMask::KIND) {
        native |= MIIM_FTYPE | MIIM_BITMAP;
    }
    native | common_mask(mask)
}

fn write_mask(mask: PropMask) -> u32 {
    let mut native = 0;
    if mask.contains(PropMask::KIND) {
        native |= MIIM_FTYPE;
    }
    native | common_mask(mask)
}

fn common_mask(mask: PropMask) -> u32 {
    let mut native = 0;
    if mask.contains(PropMask::ID) {
        native |= MIIM_ID;
    }
    if mask.contains(PropMask::STATE) {
        native |= MIIM_STATE;
    }
    if mask.contains(PropMask::SUBMENU) {
        native |= MIIM_SUBMENU;
    }
    if mask.contains(PropMask::TEXT) {
        native |= MIIM_STRING;
    }
    if mask.contains(PropMask::BITMAP) {
        native |= MIIM_BITMAP;
    }
    if mask.contains(PropMask::DATA) {
        native |= MIIM_DATA;
    }
    native
}

fn encode_state(state: StateFlags) -> u32 {
    let mut native = 0;
    if state.contains(StateFlags::DISABLED) {
        native |= MFS_DISABLED;
    }
    if state.contains(StateFlags::CHECKED) {
        native |= MFS_CHECKED;
    }
    if state.contains(StateFlags::DEFAULT) {
        native |= MFS_DEFAULT;
    }
    native
}

fn decode_state(native: u32) -> StateFlags {
    let mut state = StateFlags::empty();
    state.set(StateFlags::DISABLED, native & MFS_DISABLED != 0);
    state.set(StateFlags::CHECKED, native & MFS_CHECKED != 0);
    state.set(StateFlags::DEFAULT, native & MFS_DEFAULT != 0);
    state
}

/// An info block requesting the fields in `props.mask` for a read.
///
/// The text buffer, when one is needed, is wired up by the caller; the
/// block starts out in measure mode (`dwTypeData` null).
pub(crate) fn request(props: &SlotProps) -> MENUITEMINFOW {
    let mut info = zeroed();
    info.fMask = read_mask(props.mask);
    info
}

/// Fills `props` from a read-back info block.
///
/// `text` is the caller's fetch buffer, if the read ran in fetch mode.
pub(crate) fn decode(info: &MENUITEMINFOW, text: Option<&[u16]>, props: &mut SlotProps) {
    if props.mask.contains(PropMask::KIND) {
        let mut kind = TypeFlags::empty();
        kind.set(TypeFlags::SEPARATOR, info.fType & MFT_SEPARATOR != 0);
        kind.set(TypeFlags::OWNER_DRAWN, info.fType & MFT_OWNERDRAW != 0);
        kind.set(TypeFlags::BITMAP, info.fType & MFT_BITMAP != 0 || !info.hbmpItem.is_null());
        props.kind = kind;
    }
    if props.mask.contains(PropMask::STATE) {
        props.state = decode_state(info.fState);
    }
    if props.mask.contains(PropMask::ID) {
        props.id = info.wID;
    }
    if props.mask.contains(PropMask::SUBMENU) {
        props.submenu = if info.hSubMenu.is_null() {
            None
        } else {
            Some(RawMenu::from_raw(info.hSubMenu as isize))
        };
    }
    if props.mask.contains(PropMask::BITMAP) {
        props.bitmap = if info.hbmpItem.is_null() {
            None
        } else {
            Some(BitmapRef::from_raw(info.hbmpItem as isize))
        };
    }
    if props.mask.contains(PropMask::DATA) {
        props.data = info.dwItemData;
    }
    if props.mask.contains(PropMask::TEXT) {
        match text {
            // Fetch mode: the buffer holds up to `text_capacity` units of
            // caption plus the terminator.
            Some(buffer) => {
                props.text = super::util::decode_wide(buffer);
                props.text_len = props.text.encode_utf16().count();
            },
            // Measure mode: the native call reported the length in cch.
            None => props.text_len = info.cch as usize,
        }
    }
}

/// An info block carrying the fields in `props.mask` for a write or an
/// insert. `text` must outlive the native call.
pub(crate) fn encode(props: &SlotProps, text: Option<&mut [u16]>) -> MENUITEMINFOW {
    let mut info = zeroed();
    info.fMask = write_mask(props.mask);
    if props.mask.contains(PropMask::KIND) {
        let mut ftype = 0;
        if props.kind.contains(TypeFlags::SEPARATOR) {
            ftype |= MFT_SEPARATOR;
        }
        if props.kind.contains(TypeFlags::OWNER_DRAWN) {
            ftype |= MFT_OWNERDRAW;
        }
        info.fType = ftype;
    }
    if props.mask.contains(PropMask::STATE) {
        info.fState = encode_state(props.state);
    }
    if props.mask.contains(PropMask::ID) {
        info.wID = props.id;
    }
    if props.mask.contains(PropMask::SUBMENU) {
        info.hSubMenu = match props.submenu {
            Some(raw) => raw.into_raw() as _,
            None => ptr::null_mut(),
        };
    }
    if props.mask.contains(PropMask::BITMAP) {
        info.hbmpItem = match props.bitmap {
            Some(image) => image.into_raw() as _,
            None => ptr::null_mut(),
        };
    }
    if props.mask.contains(PropMask::DATA) {
        info.dwItemData = props.data;
    }
    if let Some(text) = text {
        info.dwTypeData = text.as_mut_ptr();
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_reads_include_the_bitmap_field() {
        assert_eq!(read_mask(PropMask::KIND), MIIM_FTYPE | MIIM_BITMAP);
        assert_eq!(write_mask(PropMask::KIND), MIIM_FTYPE);
    }

    #[test]
    fn state_round_trips() {
        let state = StateFlags::DISABLED | StateFlags::DEFAULT;
        assert_eq!(decode_state(encode_state(state)), state);
    }

    #[test]
    fn hbmp_item_marks_the_bitmap_nature() {
        let mut info = zeroed();
        info.hbmpItem = 0x1bad_b002 as _;
        let mut props = SlotProps::request(PropMask::KIND);
        decode(&info, None, &mut props);
        assert!(props.kind.contains(TypeFlags::BITMAP));
    }
}
