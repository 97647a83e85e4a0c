//! Position-indexed iteration over a menu container.
//!
//! The cursor is deliberately lazy: it holds a position, never a snapshot
//! of the item behind it, and re-derives everything at call time. Holding
//! a cursor across mutations of its container is unsupported; the resource
//! can grow or shrink underneath it.

use crate::error::MenuError;
use crate::item::Item;
use crate::menu::Head;

/// A random-access cursor over a menu container.
///
/// Movement is bounds-checked with the strong guarantee: a failed
/// [`advance`](Cursor::advance) or [`retreat`](Cursor::retreat) leaves the
/// position unchanged. Two cursors are equal iff they reference the same
/// container resource and the same position.
#[derive(Debug, Clone)]
pub struct Cursor {
    head: Head,
    position: usize,
}

impl Cursor {
    pub(crate) fn new(head: Head, position: usize) -> Cursor {
        Cursor { head, position }
    }

    /// The position the cursor currently addresses.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The item at the current position, derived at call time.
    ///
    /// Fails with [`MenuError::OutOfRange`] when the position is at or
    /// past the live length, which includes an end cursor.
    pub fn item(&self) -> Result<Item, MenuError> {
        self.head.item(self.position)
    }

    /// Moves one position forward.
    ///
    /// The cursor may come to rest at the end position (one past the last
    /// item); moving forward from there fails with
    /// [`MenuError::OutOfRange`] and leaves the cursor where it was.
    pub fn advance(&mut self) -> Result<(), MenuError> {
        let len = self.head.len()?;
        if self.position >= len {
            return Err(MenuError::OutOfRange { index: self.position + 1, len });
        }
        self.position += 1;
        Ok(())
    }

    /// Moves one position backward; fails with [`MenuError::OutOfRange`]
    /// at position 0 and leaves the cursor unchanged.
    pub fn retreat(&mut self) -> Result<(), MenuError> {
        if self.position == 0 {
            return Err(MenuError::OutOfRange { index: 0, len: self.head.len()? });
        }
        self.position -= 1;
        Ok(())
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.head.handle() == other.head.handle() && self.position == other.position
    }
}

impl Eq for Cursor {}

/// A `for`-loop adapter over a container's items.
///
/// Re-checks the live length before every step and ends as soon as the
/// container no longer has the next position, so it stays well-behaved
/// when the resource shrinks mid-iteration.
#[derive(Debug)]
pub struct Items {
    head: Head,
    position: usize,
}

impl Items {
    pub(crate) fn new(head: Head) -> Items {
        Items { head, position: 0 }
    }
}

impl Iterator for Items {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        let len = self.head.len().ok()?;
        if self.position >= len {
            return None;
        }
        let item = self.head.item(self.position).ok()?;
        self.position += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::desc::{CommandDesc, SeparatorDesc};
    use crate::headless::HeadlessMenuApi;
    use crate::item::ItemKind;
    use crate::menu::Menu;

    fn menu_with(n: u32) -> Menu {
        let mut menu = Menu::new(Rc::new(HeadlessMenuApi::new())).unwrap();
        for id in 1..=n {
            menu.push(CommandDesc::new(id, format!("Item {id}"))).unwrap();
        }
        menu
    }

    #[test]
    fn begin_equals_end_when_empty() {
        let menu = menu_with(0);
        assert_eq!(menu.cursor(), menu.cursor_end().unwrap());
    }

    #[test]
    fn advancing_len_times_reaches_end() {
        let menu = menu_with(3);
        let mut cursor = menu.cursor();
        for _ in 0..3 {
            cursor.advance().unwrap();
        }
        assert_eq!(cursor, menu.cursor_end().unwrap());

        // One step further fails and the cursor stays equal to end.
        assert_eq!(
            cursor.advance().unwrap_err(),
            MenuError::OutOfRange { index: 4, len: 3 },
        );
        assert_eq!(cursor, menu.cursor_end().unwrap());
    }

    #[test]
    fn retreat_is_bounds_checked() {
        let menu = menu_with(1);
        let mut cursor = menu.cursor();
        assert!(cursor.retreat().is_err());
        assert_eq!(cursor.position(), 0);

        cursor.advance().unwrap();
        cursor.retreat().unwrap();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn item_is_derived_lazily() {
        let menu = menu_with(1);
        let cursor = menu.cursor();

        // The slot the cursor points at changes type after an insertion in
        // front of it; the cursor must observe the new item, not a
        // snapshot from construction time.
        assert_eq!(cursor.item().unwrap().kind().unwrap(), ItemKind::Command);
        let mut mutator = menu.clone();
        mutator.insert(SeparatorDesc::new(), crate::menu::Position::At(0)).unwrap();
        assert_eq!(cursor.item().unwrap().kind().unwrap(), ItemKind::Separator);
    }

    #[test]
    fn end_cursor_item_is_out_of_range() {
        let menu = menu_with(2);
        let end = menu.cursor_end().unwrap();
        assert_eq!(end.item().unwrap_err(), MenuError::OutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn equality_needs_same_container() {
        let a = menu_with(1);
        let b = menu_with(1);
        assert_ne!(a.cursor(), b.cursor());
        assert_eq!(a.cursor(), a.clone().cursor());
    }

    #[test]
    fn items_yields_each_position() {
        let menu = menu_with(3);
        let ids: Vec<usize> = menu.items().map(|item| item.position()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
