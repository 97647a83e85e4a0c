//! Safe model of externally-owned native menu resources.
//!
//! A native menu is a mutable, ordered collection owned by the windowing
//! system: its size and the concrete kind of every slot can change through
//! channels outside this library, and attaching a submenu to a parent
//! silently moves responsibility for destroying the child. `menukit` wraps
//! that machinery without pretending otherwise:
//!
//! - [`handle::HandleBox`] shares one resource between wrapper values and
//!   tracks which ownership chain destroys it.
//! - [`menu::Menu`] / [`menu::MenuBar`] expose the resource as a sequence,
//!   queried live on every call.
//! - [`item`] and [`button`] re-derive each slot's concrete kind from a
//!   fresh read on every typed access.
//! - [`desc`] builds item descriptions; inserting a submenu description
//!   transfers ownership of the child to the parent, and only once the
//!   native insert has succeeded.
//!
//! The model talks to the platform through [`backend::MenuApi`]. On
//! Windows [`native_api`] hands out the Win32 backend; elsewhere it falls
//! back to the in-memory [`headless`] backend, which is also what the test
//! suite runs against.
//!
//! ```
//! use menukit::desc::{CommandDesc, SeparatorDesc};
//! use menukit::menu::Menu;
//!
//! let mut menu = Menu::new(menukit::native_api())?;
//! menu.push(CommandDesc::new(1, "Open"))?;
//! menu.push(SeparatorDesc::new())?;
//! menu.push(CommandDesc::new(2, "Quit").with_enabled(false))?;
//! assert_eq!(menu.len()?, 3);
//! # Ok::<(), menukit::error::MenuError>(())
//! ```

use std::rc::Rc;

pub use menukit_core::{
    backend, button, cursor, desc, error, handle, headless, item, menu, props, slot,
};
#[cfg(target_os = "windows")]
pub use menukit_win32 as win32;

use crate::backend::MenuApi;

/// The menu backend native to the current platform.
///
/// Falls back to the in-memory headless backend on platforms without a
/// native menu system.
pub fn native_api() -> Rc<dyn MenuApi> {
    #[cfg(target_os = "windows")]
    {
        Rc::new(win32::Win32MenuApi::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Rc::new(headless::HeadlessMenuApi::new())
    }
}
