//! Value descriptions of not-yet-inserted menu items.
//!
//! A description is an immutable value assembled by application code and
//! consumed exactly once by a container's `insert`. The hierarchy is a
//! closed sum type with ordinary value semantics; copies are structural.

use crate::menu::Menu;
use crate::props::{BitmapRef, PropMask, SlotProps, StateFlags, TypeFlags};

/// The appearance a described item's button should have.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonDesc {
    /// A caption.
    Text(String),
    /// An opaque image reference.
    Bitmap(BitmapRef),
    /// Drawn by the application from opaque user data.
    OwnerDrawn(usize),
}

impl From<&str> for ButtonDesc {
    fn from(caption: &str) -> ButtonDesc {
        ButtonDesc::Text(caption.to_owned())
    }
}

impl From<String> for ButtonDesc {
    fn from(caption: String) -> ButtonDesc {
        ButtonDesc::Text(caption)
    }
}

impl From<BitmapRef> for ButtonDesc {
    fn from(image: BitmapRef) -> ButtonDesc {
        ButtonDesc::Bitmap(image)
    }
}

impl ButtonDesc {
    fn apply(&self, props: &mut SlotProps) {
        match self {
            ButtonDesc::Text(caption) => {
                props.mask |= PropMask::TEXT;
                props.text = caption.clone();
            },
            ButtonDesc::Bitmap(image) => {
                props.mask |= PropMask::KIND | PropMask::BITMAP;
                props.kind |= TypeFlags::BITMAP;
                props.bitmap = Some(*image);
            },
            ButtonDesc::OwnerDrawn(data) => {
                props.mask |= PropMask::KIND | PropMask::DATA;
                props.kind |= TypeFlags::OWNER_DRAWN;
                props.data = *data;
            },
        }
    }
}

/// Describes a separator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeparatorDesc {
    id: Option<u32>,
}

impl SeparatorDesc {
    pub fn new() -> SeparatorDesc {
        SeparatorDesc::default()
    }

    /// Assigns a numeric id to the separator.
    pub fn with_id(mut self, id: u32) -> SeparatorDesc {
        self.id = Some(id);
        self
    }
}

/// Describes a command item.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDesc {
    button: ButtonDesc,
    id: u32,
    enabled: Option<bool>,
    checked: Option<bool>,
}

impl CommandDesc {
    pub fn new(id: u32, button: impl Into<ButtonDesc>) -> CommandDesc {
        CommandDesc { button: button.into(), id, enabled: None, checked: None }
    }

    /// Overrides the default selectability.
    pub fn with_enabled(mut self, enabled: bool) -> CommandDesc {
        self.enabled = Some(enabled);
        self
    }

    /// Overrides the default (unchecked) check state.
    pub fn with_checked(mut self, checked: bool) -> CommandDesc {
        self.checked = Some(checked);
        self
    }
}

/// Describes an item with an attached child menu.
///
/// Inserting this description transfers ownership of the child resource to
/// the parent; see `Menu::insert`.
#[derive(Debug, Clone)]
pub struct SubMenuDesc {
    button: ButtonDesc,
    menu: Menu,
    id: Option<u32>,
    enabled: Option<bool>,
    checked: Option<bool>,
}

impl SubMenuDesc {
    pub fn new(menu: Menu, button: impl Into<ButtonDesc>) -> SubMenuDesc {
        SubMenuDesc { button: button.into(), menu, id: None, enabled: None, checked: None }
    }

    pub fn with_id(mut self, id: u32) -> SubMenuDesc {
        self.id = Some(id);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> SubMenuDesc {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_checked(mut self, checked: bool) -> SubMenuDesc {
        self.checked = Some(checked);
        self
    }

    /// The child menu this description would attach.
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub(crate) fn is_selectable(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// A description of a future menu item: the closed set of things a
/// container can accept.
#[derive(Debug, Clone)]
pub enum ItemDesc {
    Separator(SeparatorDesc),
    Command(CommandDesc),
    SubMenu(SubMenuDesc),
}

impl From<SeparatorDesc> for ItemDesc {
    fn from(desc: SeparatorDesc) -> ItemDesc {
        ItemDesc::Separator(desc)
    }
}

impl From<CommandDesc> for ItemDesc {
    fn from(desc: CommandDesc) -> ItemDesc {
        ItemDesc::Command(desc)
    }
}

impl From<SubMenuDesc> for ItemDesc {
    fn from(desc: SubMenuDesc) -> ItemDesc {
        ItemDesc::SubMenu(desc)
    }
}

fn apply_state(props: &mut SlotProps, enabled: Option<bool>, checked: Option<bool>) {
    // State is only written when an override departs from the defaults;
    // a write then replaces the whole state field, so both flags are
    // resolved together.
    if enabled.is_some() || checked.is_some() {
        props.mask |= PropMask::STATE;
        props.state.set(StateFlags::DISABLED, enabled == Some(false));
        props.state.set(StateFlags::CHECKED, checked == Some(true));
    }
}

impl ItemDesc {
    /// The native slot representation this description inserts as.
    pub(crate) fn props(&self) -> SlotProps {
        let mut props = SlotProps::default();
        match self {
            ItemDesc::Separator(sep) => {
                props.mask |= PropMask::KIND;
                props.kind |= TypeFlags::SEPARATOR;
                if let Some(id) = sep.id {
                    props.mask |= PropMask::ID;
                    props.id = id;
                }
            },
            ItemDesc::Command(cmd) => {
                props.mask |= PropMask::KIND | PropMask::ID;
                props.id = cmd.id;
                cmd.button.apply(&mut props);
                apply_state(&mut props, cmd.enabled, cmd.checked);
            },
            ItemDesc::SubMenu(sub) => {
                props.mask |= PropMask::KIND | PropMask::SUBMENU;
                props.submenu = Some(sub.menu.raw());
                if let Some(id) = sub.id {
                    props.mask |= PropMask::ID;
                    props.id = id;
                }
                sub.button.apply(&mut props);
                apply_state(&mut props, sub.enabled, sub.checked);
            },
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_representation() {
        let props = ItemDesc::from(SeparatorDesc::new()).props();
        assert_eq!(props.mask, PropMask::KIND);
        assert!(props.kind.contains(TypeFlags::SEPARATOR));

        let props = ItemDesc::from(SeparatorDesc::new().with_id(9)).props();
        assert!(props.mask.contains(PropMask::ID));
        assert_eq!(props.id, 9);
    }

    #[test]
    fn command_merges_button_id_and_state() {
        let desc = CommandDesc::new(42, "Open").with_checked(true);
        let props = ItemDesc::from(desc).props();
        assert_eq!(props.mask, PropMask::KIND | PropMask::ID | PropMask::TEXT | PropMask::STATE);
        assert_eq!(props.id, 42);
        assert_eq!(props.text, "Open");
        assert_eq!(props.state, StateFlags::CHECKED);
    }

    #[test]
    fn default_state_is_not_written() {
        let props = ItemDesc::from(CommandDesc::new(1, "Plain")).props();
        assert!(!props.mask.contains(PropMask::STATE));
    }

    #[test]
    fn disabled_override_sets_the_flag() {
        let props = ItemDesc::from(CommandDesc::new(1, "Off").with_enabled(false)).props();
        assert!(props.mask.contains(PropMask::STATE));
        assert_eq!(props.state, StateFlags::DISABLED);
    }

    #[test]
    fn bitmap_and_owner_drawn_natures() {
        let image = BitmapRef::from_raw(0xb17);
        let props = ItemDesc::from(CommandDesc::new(2, image)).props();
        assert!(props.kind.contains(TypeFlags::BITMAP));
        assert_eq!(props.bitmap, Some(image));

        let props = ItemDesc::from(CommandDesc::new(3, ButtonDesc::OwnerDrawn(0xda7a))).props();
        assert!(props.kind.contains(TypeFlags::OWNER_DRAWN));
        assert_eq!(props.data, 0xda7a);
    }
}
