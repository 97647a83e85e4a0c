//! An in-memory menu backend.
//!
//! Implements [`MenuApi`] against plain vectors, with the same observable
//! contract as a native backend: live item counts, masked reads and
//! writes, two-phase caption reads, recursive destruction of attached
//! submenus, and the same error taxonomy. This is the backend the test
//! suite runs against, and the fallback on platforms without a native
//! menu system.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::backend::{MenuApi, MenuKind, RawMenu};
use crate::error::MenuError;
use crate::props::{BitmapRef, PropMask, SlotProps, StateFlags, TypeFlags};

/// The status code carried by [`MenuError::NativeOperationFailed`] when an
/// operation names a handle this backend does not know.
pub const BAD_HANDLE_CODE: i32 = 6;

#[derive(Debug, Clone, Default)]
struct StoredItem {
    kind: TypeFlags,
    state: StateFlags,
    id: u32,
    submenu: Option<RawMenu>,
    bitmap: Option<BitmapRef>,
    data: usize,
    text: String,
}

impl StoredItem {
    fn apply(&mut self, props: &SlotProps) {
        if props.mask.contains(PropMask::KIND) {
            self.kind = props.kind;
        }
        if props.mask.contains(PropMask::STATE) {
            self.state = props.state;
        }
        if props.mask.contains(PropMask::ID) {
            self.id = props.id;
        }
        if props.mask.contains(PropMask::SUBMENU) {
            self.submenu = props.submenu;
        }
        if props.mask.contains(PropMask::BITMAP) {
            self.bitmap = props.bitmap;
        }
        if props.mask.contains(PropMask::DATA) {
            self.data = props.data;
        }
        if props.mask.contains(PropMask::TEXT) {
            self.text = props.text.clone();
        }
    }
}

#[derive(Debug)]
struct MenuRecord {
    #[allow(dead_code)] // kept for Debug output; both kinds share mechanics
    kind: MenuKind,
    items: Vec<StoredItem>,
}

#[derive(Debug, Default)]
struct Registry {
    next_raw: isize,
    menus: HashMap<RawMenu, MenuRecord>,
}

impl Registry {
    fn record(&self, menu: RawMenu, operation: &'static str) -> Result<&MenuRecord, MenuError> {
        self.menus.get(&menu).ok_or(MenuError::native(operation, BAD_HANDLE_CODE))
    }

    fn record_mut(
        &mut self,
        menu: RawMenu,
        operation: &'static str,
    ) -> Result<&mut MenuRecord, MenuError> {
        self.menus.get_mut(&menu).ok_or(MenuError::native(operation, BAD_HANDLE_CODE))
    }

    fn destroy_recursive(&mut self, menu: RawMenu) {
        if let Some(record) = self.menus.remove(&menu) {
            for item in record.items {
                if let Some(child) = item.submenu {
                    self.destroy_recursive(child);
                }
            }
        }
    }
}

/// The in-memory [`MenuApi`] implementation.
#[derive(Debug, Default)]
pub struct HeadlessMenuApi {
    registry: RefCell<Registry>,
}

impl HeadlessMenuApi {
    pub fn new() -> HeadlessMenuApi {
        HeadlessMenuApi::default()
    }

    /// How many menu resources are currently alive. A test helper.
    pub fn live_count(&self) -> usize {
        self.registry.borrow().menus.len()
    }
}

impl MenuApi for HeadlessMenuApi {
    fn create(&self, kind: MenuKind) -> Result<RawMenu, MenuError> {
        let mut registry = self.registry.borrow_mut();
        registry.next_raw += 1;
        let raw = RawMenu::from_raw(registry.next_raw);
        registry.menus.insert(raw, MenuRecord { kind, items: Vec::new() });
        Ok(raw)
    }

    fn destroy(&self, menu: RawMenu) -> Result<(), MenuError> {
        let mut registry = self.registry.borrow_mut();
        if !registry.menus.contains_key(&menu) {
            return Err(MenuError::native("destroy", BAD_HANDLE_CODE));
        }
        // Destroying a menu takes its attached submenus down with it,
        // matching native behavior.
        registry.destroy_recursive(menu);
        Ok(())
    }

    fn is_valid(&self, menu: RawMenu) -> bool {
        self.registry.borrow().menus.contains_key(&menu)
    }

    fn item_count(&self, menu: RawMenu) -> Result<usize, MenuError> {
        Ok(self.registry.borrow().record(menu, "item_count")?.items.len())
    }

    fn read_item(
        &self,
        menu: RawMenu,
        index: usize,
        props: &mut SlotProps,
    ) -> Result<(), MenuError> {
        let registry = self.registry.borrow();
        let record = registry.record(menu, "read_item")?;
        let item = record
            .items
            .get(index)
            .ok_or(MenuError::OutOfRange { index, len: record.items.len() })?;

        if props.mask.contains(PropMask::KIND) {
            props.kind = item.kind;
        }
        if props.mask.contains(PropMask::STATE) {
            props.state = item.state;
        }
        if props.mask.contains(PropMask::ID) {
            props.id = item.id;
        }
        if props.mask.contains(PropMask::SUBMENU) {
            props.submenu = item.submenu;
        }
        if props.mask.contains(PropMask::BITMAP) {
            props.bitmap = item.bitmap;
        }
        if props.mask.contains(PropMask::DATA) {
            props.data = item.data;
        }
        if props.mask.contains(PropMask::TEXT) {
            props.text_len = item.text.chars().count();
            if props.text_capacity > 0 {
                props.text = item.text.chars().take(props.text_capacity).collect();
            }
        }
        Ok(())
    }

    fn write_item(&self, menu: RawMenu, index: usize, props: &SlotProps) -> Result<(), MenuError> {
        let mut registry = self.registry.borrow_mut();
        let record = registry.record_mut(menu, "write_item")?;
        let len = record.items.len();
        let item =
            record.items.get_mut(index).ok_or(MenuError::OutOfRange { index, len })?;
        item.apply(props);
        Ok(())
    }

    fn insert_item(
        &self,
        menu: RawMenu,
        index: Option<usize>,
        props: &SlotProps,
    ) -> Result<(), MenuError> {
        // An attached submenu must itself be a live resource; insisting on
        // that here keeps the ownership tests honest about dangling
        // children.
        if props.mask.contains(PropMask::SUBMENU) {
            if let Some(child) = props.submenu {
                if !self.is_valid(child) {
                    return Err(MenuError::native("insert_item", BAD_HANDLE_CODE));
                }
            }
        }

        let mut registry = self.registry.borrow_mut();
        let record = registry.record_mut(menu, "insert_item")?;
        let len = record.items.len();
        let at = match index {
            Some(index) if index > len => {
                return Err(MenuError::OutOfRange { index, len });
            },
            Some(index) => index,
            None => len,
        };
        let mut item = StoredItem::default();
        item.apply(props);
        record.items.insert(at, item);
        Ok(())
    }

    fn default_item(&self, menu: RawMenu) -> Result<Option<usize>, MenuError> {
        let registry = self.registry.borrow();
        let record = registry.record(menu, "default_item")?;
        Ok(record.items.iter().position(|item| item.state.contains(StateFlags::DEFAULT)))
    }

    fn set_default_item(&self, menu: RawMenu, index: Option<usize>) -> Result<(), MenuError> {
        let mut registry = self.registry.borrow_mut();
        let record = registry.record_mut(menu, "set_default_item")?;
        let len = record.items.len();
        if let Some(index) = index {
            if index >= len {
                return Err(MenuError::OutOfRange { index, len });
            }
        }
        for (position, item) in record.items.iter_mut().enumerate() {
            item.state.set(StateFlags::DEFAULT, Some(position) == index);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let api = HeadlessMenuApi::new();
        let menu = api.create(MenuKind::Popup).unwrap();
        assert!(api.is_valid(menu));
        assert_eq!(api.live_count(), 1);

        api.destroy(menu).unwrap();
        assert!(!api.is_valid(menu));
        assert_eq!(api.live_count(), 0);
        assert_eq!(api.destroy(menu), Err(MenuError::native("destroy", BAD_HANDLE_CODE)));
    }

    #[test]
    fn destroy_takes_attached_submenus_down() {
        let api = HeadlessMenuApi::new();
        let parent = api.create(MenuKind::Popup).unwrap();
        let child = api.create(MenuKind::Popup).unwrap();

        let mut props = SlotProps::request(PropMask::SUBMENU);
        props.submenu = Some(child);
        api.insert_item(parent, None, &props).unwrap();

        api.destroy(parent).unwrap();
        assert!(!api.is_valid(child));
    }

    #[test]
    fn masked_read_leaves_other_fields_alone() {
        let api = HeadlessMenuApi::new();
        let menu = api.create(MenuKind::Popup).unwrap();

        let mut write = SlotProps::request(PropMask::ID | PropMask::DATA);
        write.id = 11;
        write.data = 0xfeed;
        api.insert_item(menu, None, &write).unwrap();

        let mut read = SlotProps::request(PropMask::ID);
        read.data = 0x1234;
        api.read_item(menu, 0, &mut read).unwrap();
        assert_eq!(read.id, 11);
        // DATA was not requested, so the caller's value stays.
        assert_eq!(read.data, 0x1234);
    }

    #[test]
    fn two_phase_text_measures_then_fetches() {
        let api = HeadlessMenuApi::new();
        let menu = api.create(MenuKind::Popup).unwrap();

        let mut write = SlotProps::request(PropMask::TEXT);
        write.text = "Example".to_owned();
        api.insert_item(menu, None, &write).unwrap();

        let mut measure = SlotProps::request(PropMask::TEXT);
        api.read_item(menu, 0, &mut measure).unwrap();
        assert_eq!(measure.text_len, 7);
        assert_eq!(measure.text, "", "a measuring read must not fetch");

        measure.text_capacity = 4;
        api.read_item(menu, 0, &mut measure).unwrap();
        assert_eq!(measure.text, "Exam", "a short buffer truncates");

        measure.text_capacity = measure.text_len;
        api.read_item(menu, 0, &mut measure).unwrap();
        assert_eq!(measure.text, "Example");
    }

    #[test]
    fn insert_past_end_is_out_of_range() {
        let api = HeadlessMenuApi::new();
        let menu = api.create(MenuKind::Popup).unwrap();
        let props = SlotProps::request(PropMask::KIND);
        assert_eq!(
            api.insert_item(menu, Some(1), &props),
            Err(MenuError::OutOfRange { index: 1, len: 0 }),
        );
        // Inserting exactly at the length appends.
        api.insert_item(menu, Some(0), &props).unwrap();
        api.insert_item(menu, Some(1), &props).unwrap();
        assert_eq!(api.item_count(menu).unwrap(), 2);
    }

    #[test]
    fn inserting_a_dead_submenu_fails() {
        let api = HeadlessMenuApi::new();
        let parent = api.create(MenuKind::Popup).unwrap();
        let child = api.create(MenuKind::Popup).unwrap();
        api.destroy(child).unwrap();

        let mut props = SlotProps::request(PropMask::SUBMENU);
        props.submenu = Some(child);
        assert_eq!(
            api.insert_item(parent, None, &props),
            Err(MenuError::native("insert_item", BAD_HANDLE_CODE)),
        );
    }

    #[test]
    fn default_item_is_exclusive() {
        let api = HeadlessMenuApi::new();
        let menu = api.create(MenuKind::Popup).unwrap();
        let props = SlotProps::request(PropMask::KIND);
        api.insert_item(menu, None, &props).unwrap();
        api.insert_item(menu, None, &props).unwrap();

        api.set_default_item(menu, Some(0)).unwrap();
        api.set_default_item(menu, Some(1)).unwrap();
        assert_eq!(api.default_item(menu).unwrap(), Some(1));

        api.set_default_item(menu, None).unwrap();
        assert_eq!(api.default_item(menu).unwrap(), None);

        assert_eq!(
            api.set_default_item(menu, Some(5)),
            Err(MenuError::OutOfRange { index: 5, len: 2 }),
        );
    }
}
