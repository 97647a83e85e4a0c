//! # Menukit's Win32 backend.
//!
//! Implements [`MenuApi`] over the `HMENU` family of user32 calls. The
//! caller owns the threading discipline: menus must only be touched from
//! the thread that owns their window, which is the single-threaded-owner
//! contract the core model states.

#![cfg(windows)]

mod menuiteminfo;
mod util;

use std::ptr;

use menukit_core::backend::{MenuApi, MenuKind, RawMenu};
use menukit_core::error::MenuError;
use menukit_core::props::{PropMask, SlotProps};
use windows_sys::Win32::Foundation::TRUE;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateMenu, CreatePopupMenu, DestroyMenu, GetMenuDefaultItem, GetMenuItemCount,
    GetMenuItemInfoW, InsertMenuItemW, IsMenu, SetMenuDefaultItem, SetMenuItemInfoW,
    GMDI_USEDISABLED, HMENU,
};

use crate::util::{last_error, win_to_err};

fn hmenu(raw: RawMenu) -> HMENU {
    raw.into_raw() as HMENU
}

/// The Win32 implementation of [`MenuApi`].
#[derive(Debug, Default)]
pub struct Win32MenuApi {
    _priv: (),
}

impl Win32MenuApi {
    pub fn new() -> Win32MenuApi {
        Win32MenuApi::default()
    }

    fn check_index(&self, menu: RawMenu, index: usize) -> Result<(), MenuError> {
        let len = self.item_count(menu)?;
        if index >= len {
            return Err(MenuError::OutOfRange { index, len });
        }
        Ok(())
    }
}

impl MenuApi for Win32MenuApi {
    fn create(&self, kind: MenuKind) -> Result<RawMenu, MenuError> {
        let handle = match kind {
            MenuKind::Bar => unsafe { CreateMenu() },
            MenuKind::Popup => unsafe { CreatePopupMenu() },
        };
        if handle.is_null() {
            return Err(last_error("create"));
        }
        let raw = RawMenu::from_raw(handle as isize);
        tracing::trace!("created {kind:?} menu {raw:?}");
        Ok(raw)
    }

    fn destroy(&self, menu: RawMenu) -> Result<(), MenuError> {
        win_to_err(unsafe { DestroyMenu(hmenu(menu)) }, "destroy")
    }

    fn is_valid(&self, menu: RawMenu) -> bool {
        unsafe { IsMenu(hmenu(menu)) != 0 }
    }

    fn item_count(&self, menu: RawMenu) -> Result<usize, MenuError> {
        let count = unsafe { GetMenuItemCount(hmenu(menu)) };
        if count < 0 {
            return Err(last_error("item_count"));
        }
        Ok(count as usize)
    }

    fn read_item(
        &self,
        menu: RawMenu,
        index: usize,
        props: &mut SlotProps,
    ) -> Result<(), MenuError> {
        self.check_index(menu, index)?;

        let mut info = menuiteminfo::request(props);
        let mut buffer = None;
        if props.mask.contains(PropMask::TEXT) {
            if props.text_capacity == 0 {
                // Measure mode: a null pointer makes the call report the
                // caption length in cch.
                info.dwTypeData = ptr::null_mut();
                info.cch = 0;
            } else {
                let fetch = buffer.insert(vec![0u16; props.text_capacity + 1]);
                info.cch = fetch.len() as u32;
                info.dwTypeData = fetch.as_mut_ptr();
            }
        }

        win_to_err(
            unsafe { GetMenuItemInfoW(hmenu(menu), index as u32, TRUE, &mut info) },
            "read_item",
        )?;
        menuiteminfo::decode(&info, buffer.as_deref(), props);
        Ok(())
    }

    fn write_item(&self, menu: RawMenu, index: usize, props: &SlotProps) -> Result<(), MenuError> {
        self.check_index(menu, index)?;

        let mut text = props
            .mask
            .contains(PropMask::TEXT)
            .then(|| util::encode_wide(&props.text));
        let info = menuiteminfo::encode(props, text.as_deref_mut());
        win_to_err(
            unsafe { SetMenuItemInfoW(hmenu(menu), index as u32, TRUE, &info) },
            "write_item",
        )
    }

    fn insert_item(
        &self,
        menu: RawMenu,
        index: Option<usize>,
        props: &SlotProps,
    ) -> Result<(), MenuError> {
        let at = match index {
            Some(index) => {
                let len = self.item_count(menu)?;
                if index > len {
                    return Err(MenuError::OutOfRange { index, len });
                }
                index as u32
            },
            // By-position -1 appends.
            None => u32::MAX,
        };

        let mut text = props
            .mask
            .contains(PropMask::TEXT)
            .then(|| util::encode_wide(&props.text));
        let info = menuiteminfo::encode(props, text.as_deref_mut());
        win_to_err(unsafe { InsertMenuItemW(hmenu(menu), at, TRUE, &info) }, "insert_item")
    }

    fn default_item(&self, menu: RawMenu) -> Result<Option<usize>, MenuError> {
        // -1 is the "no default" sentinel; it is also what a failed call
        // returns, and the two are indistinguishable here, so both map to
        // None.
        let position = unsafe { GetMenuDefaultItem(hmenu(menu), 1, GMDI_USEDISABLED) };
        if position == u32::MAX {
            return Ok(None);
        }
        Ok(Some(position as usize))
    }

    fn set_default_item(&self, menu: RawMenu, index: Option<usize>) -> Result<(), MenuError> {
        let position = match index {
            Some(index) => {
                self.check_index(menu, index)?;
                index as u32
            },
            None => u32::MAX,
        };
        win_to_err(unsafe { SetMenuDefaultItem(hmenu(menu), position, 1) }, "set_default_item")
    }
}
