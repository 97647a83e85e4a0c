//! The seam between the menu model and the platform.
//!
//! Everything the model does against a native menu goes through [`MenuApi`],
//! so the whole model can be exercised against the in-memory backend in
//! [`headless`](crate::headless) and plugged onto a real windowing system by
//! a platform crate.

use std::fmt;

use crate::error::MenuError;
use crate::props::SlotProps;

/// An opaque identifier for one native menu resource.
///
/// On Win32 this is the `HMENU` value; the headless backend allocates its
/// own ids. `RawMenu` carries no ownership: see
/// [`HandleBox`](crate::handle::HandleBox) for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawMenu(isize);

impl RawMenu {
    pub const fn from_raw(raw: isize) -> RawMenu {
        RawMenu(raw)
    }

    pub const fn into_raw(self) -> isize {
        self.0
    }
}

/// The two flavors of native menu resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// A horizontal bar attached to a window frame.
    Bar,
    /// A popup list, used both for context menus and for submenus.
    Popup,
}

/// The resource primitives a menu backend must provide.
///
/// The model is single-threaded by contract: the calling thread is assumed
/// to be the one that legitimately owns the underlying resource, so
/// backends are shared as `Rc<dyn MenuApi>` and need no internal locking.
///
/// Every method may fail with
/// [`NativeOperationFailed`](MenuError::NativeOperationFailed) carrying the
/// failing primitive's name and a backend-defined status code.
pub trait MenuApi: fmt::Debug {
    /// Creates a brand-new, empty menu resource.
    fn create(&self, kind: MenuKind) -> Result<RawMenu, MenuError>;

    /// Destroys a menu resource, including any attached submenus.
    fn destroy(&self, menu: RawMenu) -> Result<(), MenuError>;

    /// Whether `menu` still designates a live resource.
    ///
    /// A resource can die through channels outside this model (for example
    /// its containing window being destroyed), so `false` is an expected
    /// answer even for an owned handle.
    fn is_valid(&self, menu: RawMenu) -> bool;

    /// The current number of slots in the resource.
    fn item_count(&self, menu: RawMenu) -> Result<usize, MenuError>;

    /// Reads the fields selected by `props.mask` into `props`.
    ///
    /// Fails with [`OutOfRange`](MenuError::OutOfRange) if `index` is past
    /// the live item count. Text follows the two-phase protocol described
    /// on [`SlotProps`]: with `text_capacity == 0` only `text_len` is
    /// filled in (measure), otherwise up to `text_capacity` characters of
    /// the caption are fetched.
    fn read_item(&self, menu: RawMenu, index: usize, props: &mut SlotProps)
        -> Result<(), MenuError>;

    /// Writes the fields selected by `props.mask`, fully replacing them.
    fn write_item(&self, menu: RawMenu, index: usize, props: &SlotProps) -> Result<(), MenuError>;

    /// Inserts a new slot before `index`; slots at `index..` shift right by
    /// one. `None` appends.
    fn insert_item(
        &self,
        menu: RawMenu,
        index: Option<usize>,
        props: &SlotProps,
    ) -> Result<(), MenuError>;

    /// The position of the default item, if one is set.
    fn default_item(&self, menu: RawMenu) -> Result<Option<usize>, MenuError>;

    /// Marks the item at `index` as the default, or clears the default with
    /// `None`.
    fn set_default_item(&self, menu: RawMenu, index: Option<usize>) -> Result<(), MenuError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_menu_round_trips() {
        let raw = RawMenu::from_raw(0x51f0);
        assert_eq!(raw.into_raw(), 0x51f0);
        assert_eq!(raw, RawMenu::from_raw(0x51f0));
        assert_ne!(raw, RawMenu::from_raw(0x51f1));
    }
}
