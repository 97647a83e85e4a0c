//! Menu containers: the sequence abstraction over a menu resource.

use std::rc::Rc;

use crate::backend::{MenuApi, MenuKind, RawMenu};
use crate::cursor::{Cursor, Items};
use crate::desc::ItemDesc;
use crate::error::MenuError;
use crate::handle::HandleBox;
use crate::item::Item;
use crate::slot::Slot;

/// Where an insertion lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before the item currently at this index; items at `index..` shift
    /// right by one.
    At(usize),
    /// After the last item.
    End,
}

// The mechanics shared by both container flavors. The flavors differ only
// in which descriptions they accept.
#[derive(Debug, Clone)]
pub(crate) struct Head {
    handle: HandleBox,
}

impl Head {
    fn create(api: Rc<dyn MenuApi>, kind: MenuKind) -> Result<Head, MenuError> {
        Ok(Head { handle: HandleBox::create(api, kind)? })
    }

    pub(crate) fn handle(&self) -> &HandleBox {
        &self.handle
    }

    pub(crate) fn len(&self) -> Result<usize, MenuError> {
        self.handle.api().item_count(self.handle.raw())
    }

    pub(crate) fn item(&self, index: usize) -> Result<Item, MenuError> {
        let len = self.len()?;
        if index >= len {
            return Err(MenuError::OutOfRange { index, len });
        }
        Ok(Item::new(Slot::new(self.handle.clone(), index)))
    }

    fn insert(&self, desc: ItemDesc, position: Position) -> Result<(), MenuError> {
        let index = match position {
            Position::At(index) => Some(index),
            Position::End => None,
        };
        let props = desc.props();
        self.handle.api().insert_item(self.handle.raw(), index, &props)?;

        // Ownership of an attached child transfers to the parent resource,
        // and only once the native insert has succeeded. On failure the
        // child's chain keeps owning its resource; when the last reference
        // (possibly the consumed description) drops, the child is
        // destroyed rather than leaked.
        if let ItemDesc::SubMenu(sub) = &desc {
            sub.menu().handle().release();
            tracing::trace!(
                "menu {:?} took ownership of submenu {:?}",
                self.handle.raw(),
                sub.menu().raw(),
            );
        }
        Ok(())
    }
}

/// A general menu: a popup usable standalone, as a context menu, or as a
/// submenu of another container.
///
/// A `Menu` is a value wrapper around a shared [`HandleBox`]; cloning it
/// clones the handle, not the resource. Nothing about the underlying
/// resource is cached: size, item kinds, and contents are read live on
/// every call, because the resource is mutable through channels outside
/// this wrapper.
#[derive(Debug, Clone)]
pub struct Menu {
    head: Head,
}

impl Menu {
    /// Creates a brand-new, empty popup resource owned by the returned
    /// container.
    pub fn new(api: Rc<dyn MenuApi>) -> Result<Menu, MenuError> {
        Ok(Menu { head: Head::create(api, MenuKind::Popup)? })
    }

    /// Wraps a pre-existing resource and takes ownership of it.
    pub fn adopt(api: Rc<dyn MenuApi>, raw: RawMenu) -> Menu {
        Menu::from_handle(HandleBox::adopt(api, raw))
    }

    /// Wraps a pre-existing resource without taking ownership.
    pub fn foster(api: Rc<dyn MenuApi>, raw: RawMenu) -> Menu {
        Menu::from_handle(HandleBox::foster(api, raw))
    }

    /// Wraps an existing handle box.
    pub fn from_handle(handle: HandleBox) -> Menu {
        Menu { head: Head { handle } }
    }

    /// Read-only access to the underlying handle, for collaborators that
    /// attach the container elsewhere (a window frame, a tracking call).
    pub fn handle(&self) -> &HandleBox {
        self.head.handle()
    }

    /// The raw resource handle.
    pub fn raw(&self) -> RawMenu {
        self.head.handle().raw()
    }

    /// Whether the handle still designates a live resource.
    pub fn valid(&self) -> bool {
        self.head.handle().valid()
    }

    /// The current number of items, queried live.
    pub fn len(&self) -> Result<usize, MenuError> {
        self.head.len()
    }

    pub fn is_empty(&self) -> Result<bool, MenuError> {
        Ok(self.len()? == 0)
    }

    /// The item at `index`.
    ///
    /// No classification happens here; the returned [`Item`] re-derives
    /// its kind on each access.
    pub fn item(&self, index: usize) -> Result<Item, MenuError> {
        self.head.item(index)
    }

    /// Inserts the described item at `position`.
    ///
    /// The description is consumed. For a
    /// [`SubMenuDesc`](crate::desc::SubMenuDesc) this call also transfers
    /// ownership of the child resource to this container's resource: the
    /// child's [`HandleBox`] is released immediately after the native
    /// insert succeeds. If the insert fails, no transfer happens: the
    /// child's chain keeps ownership, and the child is destroyed when its
    /// last reference (possibly the consumed description) drops.
    pub fn insert(&mut self, desc: impl Into<ItemDesc>, position: Position) -> Result<(), MenuError> {
        self.head.insert(desc.into(), position)
    }

    /// Appends the described item.
    pub fn push(&mut self, desc: impl Into<ItemDesc>) -> Result<(), MenuError> {
        self.head.insert(desc.into(), Position::End)
    }

    /// The default item, or `None` when the resource has none.
    pub fn default_item(&self) -> Result<Option<Item>, MenuError> {
        match self.head.handle().api().default_item(self.raw())? {
            Some(index) => Ok(Some(self.head.item(index)?)),
            None => Ok(None),
        }
    }

    /// Marks the item at `index` as the default; `None` clears it.
    pub fn set_default_item(&mut self, index: Option<usize>) -> Result<(), MenuError> {
        self.head.handle().api().set_default_item(self.raw(), index)
    }

    /// A cursor at position 0.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.head.clone(), 0)
    }

    /// A cursor at the position equal to `len()` at this moment.
    ///
    /// Because the resource can grow or shrink underneath the wrapper, an
    /// end cursor obtained earlier is not guaranteed to still be the end
    /// later; cursors must not be held across mutations of the container.
    pub fn cursor_end(&self) -> Result<Cursor, MenuError> {
        Ok(Cursor::new(self.head.clone(), self.len()?))
    }

    /// Iterates the container's items front to back, re-checking the live
    /// length at every step.
    pub fn items(&self) -> Items {
        Items::new(self.head.clone())
    }
}

/// Identity comparison of the underlying resource handle.
impl PartialEq for Menu {
    fn eq(&self, other: &Self) -> bool {
        self.head.handle() == other.head.handle()
    }
}

impl Eq for Menu {}

/// A menu bar: the horizontal container attached to a window frame.
///
/// Same mechanics as [`Menu`], restricted in what it accepts: a bar has no
/// separators, and a submenu entry must remain selectable. A bar also has
/// no default item.
#[derive(Debug, Clone)]
pub struct MenuBar {
    head: Head,
}

impl MenuBar {
    /// Creates a brand-new, empty bar resource owned by the returned
    /// container.
    pub fn new(api: Rc<dyn MenuApi>) -> Result<MenuBar, MenuError> {
        Ok(MenuBar { head: Head::create(api, MenuKind::Bar)? })
    }

    /// Wraps a pre-existing resource and takes ownership of it.
    pub fn adopt(api: Rc<dyn MenuApi>, raw: RawMenu) -> MenuBar {
        MenuBar::from_handle(HandleBox::adopt(api, raw))
    }

    /// Wraps a pre-existing resource without taking ownership.
    pub fn foster(api: Rc<dyn MenuApi>, raw: RawMenu) -> MenuBar {
        MenuBar::from_handle(HandleBox::foster(api, raw))
    }

    /// Wraps an existing handle box.
    pub fn from_handle(handle: HandleBox) -> MenuBar {
        MenuBar { head: Head { handle } }
    }

    /// Read-only access to the underlying handle, for the collaborator
    /// that attaches the bar to a window.
    pub fn handle(&self) -> &HandleBox {
        self.head.handle()
    }

    /// The raw resource handle.
    pub fn raw(&self) -> RawMenu {
        self.head.handle().raw()
    }

    /// Whether the handle still designates a live resource.
    pub fn valid(&self) -> bool {
        self.head.handle().valid()
    }

    /// The current number of items, queried live.
    pub fn len(&self) -> Result<usize, MenuError> {
        self.head.len()
    }

    pub fn is_empty(&self) -> Result<bool, MenuError> {
        Ok(self.len()? == 0)
    }

    /// The item at `index`.
    pub fn item(&self, index: usize) -> Result<Item, MenuError> {
        self.head.item(index)
    }

    /// Inserts the described item at `position`; ownership transfer for
    /// submenus follows the same contract as [`Menu::insert`].
    ///
    /// # Panics
    ///
    /// Inserting a separator, or a submenu whose selectability override
    /// disables it, is a contract violation and panics.
    pub fn insert(&mut self, desc: impl Into<ItemDesc>, position: Position) -> Result<(), MenuError> {
        let desc = desc.into();
        match &desc {
            ItemDesc::Separator(_) => {
                panic!("a menu bar cannot contain separators");
            },
            ItemDesc::SubMenu(sub) if !sub.is_selectable() => {
                panic!("a menu bar submenu must remain selectable");
            },
            _ => {},
        }
        self.head.insert(desc, position)
    }

    /// Appends the described item; same contract as
    /// [`insert`](MenuBar::insert).
    ///
    /// # Panics
    ///
    /// Same contract violations as [`insert`](MenuBar::insert).
    pub fn push(&mut self, desc: impl Into<ItemDesc>) -> Result<(), MenuError> {
        self.insert(desc, Position::End)
    }

    /// A cursor at position 0.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.head.clone(), 0)
    }

    /// A cursor at the position equal to `len()` at this moment.
    pub fn cursor_end(&self) -> Result<Cursor, MenuError> {
        Ok(Cursor::new(self.head.clone(), self.len()?))
    }

    /// Iterates the bar's items front to back.
    pub fn items(&self) -> Items {
        Items::new(self.head.clone())
    }
}

/// Identity comparison of the underlying resource handle.
impl PartialEq for MenuBar {
    fn eq(&self, other: &Self) -> bool {
        self.head.handle() == other.head.handle()
    }
}

impl Eq for MenuBar {}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::desc::{CommandDesc, SeparatorDesc, SubMenuDesc};
    use crate::headless::HeadlessMenuApi;
    use crate::item::ItemKind;

    fn api() -> Rc<HeadlessMenuApi> {
        Rc::new(HeadlessMenuApi::new())
    }

    #[test]
    fn insert_grows_by_one() {
        let mut menu = Menu::new(api()).unwrap();
        assert_eq!(menu.len().unwrap(), 0);
        menu.push(SeparatorDesc::new()).unwrap();
        assert_eq!(menu.len().unwrap(), 1);
        menu.push(CommandDesc::new(1, "One")).unwrap();
        assert_eq!(menu.len().unwrap(), 2);
    }

    #[test]
    fn insert_at_shifts_right() {
        let mut menu = Menu::new(api()).unwrap();
        menu.push(CommandDesc::new(1, "First")).unwrap();
        menu.push(CommandDesc::new(2, "Last")).unwrap();
        menu.insert(SeparatorDesc::new(), Position::At(1)).unwrap();

        assert_eq!(menu.len().unwrap(), 3);
        assert_eq!(menu.item(1).unwrap().kind().unwrap(), ItemKind::Separator);
        assert_eq!(menu.item(2).unwrap().kind().unwrap(), ItemKind::Command);
    }

    #[test]
    fn index_is_bounds_checked() {
        let mut menu = Menu::new(api()).unwrap();
        menu.push(SeparatorDesc::new()).unwrap();
        assert!(menu.item(0).is_ok());
        assert_eq!(
            menu.item(1).unwrap_err(),
            MenuError::OutOfRange { index: 1, len: 1 },
        );
    }

    #[test]
    fn equality_is_resource_identity() {
        let api = api();
        let menu = Menu::new(api.clone()).unwrap();
        let other = Menu::new(api.clone()).unwrap();
        assert_eq!(menu, menu.clone());
        assert_eq!(menu, Menu::foster(api, menu.raw()));
        assert_ne!(menu, other);
    }

    #[test]
    fn default_item_round_trips() {
        let mut menu = Menu::new(api()).unwrap();
        menu.push(CommandDesc::new(1, "One")).unwrap();
        menu.push(CommandDesc::new(2, "Two")).unwrap();

        assert!(menu.default_item().unwrap().is_none());
        menu.set_default_item(Some(1)).unwrap();
        assert_eq!(menu.default_item().unwrap().unwrap().position(), 1);
        menu.set_default_item(None).unwrap();
        assert!(menu.default_item().unwrap().is_none());
    }

    #[test]
    #[should_panic = "cannot contain separators"]
    fn bar_rejects_separators() {
        let mut bar = MenuBar::new(api()).unwrap();
        let _ = bar.push(SeparatorDesc::new());
    }

    #[test]
    #[should_panic = "must remain selectable"]
    fn bar_rejects_unselectable_submenus() {
        let api = api();
        let mut bar = MenuBar::new(api.clone()).unwrap();
        let file = Menu::new(api).unwrap();
        let _ = bar.push(SubMenuDesc::new(file, "File").with_enabled(false));
    }

    #[test]
    fn bar_accepts_commands_and_submenus() {
        let api = api();
        let mut bar = MenuBar::new(api.clone()).unwrap();
        let file = Menu::new(api).unwrap();
        bar.push(SubMenuDesc::new(file, "File")).unwrap();
        bar.push(CommandDesc::new(7, "Help")).unwrap();
        assert_eq!(bar.len().unwrap(), 2);
        assert_eq!(bar.item(0).unwrap().kind().unwrap(), ItemKind::SubMenu);
    }
}
