//! Typed, transient views over one menu slot.
//!
//! A slot's concrete kind belongs to the external resource, not to this
//! model: it can change between any two calls through channels the model
//! does not see. Classification is therefore a pure function of a fresh
//! minimal read and is re-derived on every dispatch; nothing here caches a
//! kind across calls. The typed views borrow the [`Item`] they were derived
//! from, so the borrow checker keeps callers from retaining one past the
//! dispatch that produced it.

use crate::button::{self, ButtonKind, ButtonVisitor, ButtonVisitorMut};
use crate::error::MenuError;
use crate::handle::HandleBox;
use crate::menu::Menu;
use crate::props::{PropMask, SlotProps, StateFlags, TypeFlags};
use crate::slot::Slot;

/// The three concrete kinds a slot can currently have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Separator,
    Command,
    SubMenu,
}

/// Classifies a freshly read property snapshot.
///
/// The snapshot must cover [`PropMask::KIND`] and [`PropMask::SUBMENU`].
/// The cases are checked in priority order and are mutually exclusive for
/// any snapshot a backend can produce: a separator flag wins, an attached
/// submenu comes next, and everything else is a command.
pub fn classify(props: &SlotProps) -> ItemKind {
    if props.kind.contains(TypeFlags::SEPARATOR) {
        ItemKind::Separator
    } else if props.submenu.is_some() {
        ItemKind::SubMenu
    } else {
        ItemKind::Command
    }
}

const CLASSIFY_MASK: PropMask = PropMask::KIND.union(PropMask::SUBMENU);

/// One addressable item of a menu container.
///
/// An `Item` is positional, like the [`Slot`] it wraps: it does not pin
/// down a logical item across structural mutation of the resource, and it
/// stores no classification.
#[derive(Debug, Clone)]
pub struct Item {
    slot: Slot,
}

impl Item {
    pub(crate) fn new(slot: Slot) -> Item {
        Item { slot }
    }

    /// The position this item addresses.
    pub fn position(&self) -> usize {
        self.slot.index()
    }

    /// The underlying slot locator.
    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Reads and classifies the slot's current kind.
    ///
    /// Re-derived on every call; two calls may disagree if the resource
    /// was mutated in between.
    pub fn kind(&self) -> Result<ItemKind, MenuError> {
        Ok(classify(&self.slot.read(CLASSIFY_MASK)?))
    }

    /// Classifies the slot and hands the matching read-only view to
    /// `visitor`. Exactly one handler is invoked.
    pub fn accept<V: ItemVisitor>(&self, visitor: &mut V) -> Result<V::Output, MenuError> {
        let props = self.slot.read(CLASSIFY_MASK)?;
        Ok(match classify(&props) {
            ItemKind::Separator => visitor.separator(SeparatorView { slot: &self.slot }),
            ItemKind::SubMenu => {
                // `classify` only answers SubMenu when the handle is there.
                let child = props.submenu.unwrap();
                visitor.submenu(SubMenuView { slot: &self.slot, child: ChildHandle(child) })
            },
            ItemKind::Command => visitor.command(CommandView { slot: &self.slot }),
        })
    }

    /// Classifies the slot and hands the matching mutable view to
    /// `visitor`. Classification is identical to [`accept`](Item::accept)
    /// for the same slot contents.
    pub fn accept_mut<V: ItemVisitorMut>(&mut self, visitor: &mut V) -> Result<V::Output, MenuError> {
        let props = self.slot.read(CLASSIFY_MASK)?;
        Ok(match classify(&props) {
            ItemKind::Separator => visitor.separator(SeparatorViewMut { slot: &self.slot }),
            ItemKind::SubMenu => {
                // Same invariant as in `accept`.
                let child = props.submenu.unwrap();
                visitor.submenu(SubMenuViewMut { slot: &self.slot, child: ChildHandle(child) })
            },
            ItemKind::Command => visitor.command(CommandViewMut { slot: &self.slot }),
        })
    }
}

// Shared accessors over a slot, used by both the const and mut views so
// the two dispatch paths cannot drift apart.
fn read_id(slot: &Slot) -> Result<u32, MenuError> {
    Ok(slot.read(PropMask::ID)?.id)
}

fn read_state(slot: &Slot) -> Result<StateFlags, MenuError> {
    Ok(slot.read(PropMask::STATE)?.state)
}

fn write_id(slot: &Slot, id: u32) -> Result<(), MenuError> {
    let mut props = SlotProps::request(PropMask::ID);
    props.id = id;
    slot.write(&props)
}

fn toggle_state(slot: &Slot, flag: StateFlags, set: bool) -> Result<(), MenuError> {
    let mut props = SlotProps::request(PropMask::STATE);
    props.state = read_state(slot)?;
    props.state.set(flag, set);
    slot.write(&props)
}

// The raw handle of an attached submenu, captured by the classification
// read that proved it present.
#[derive(Debug, Clone, Copy)]
struct ChildHandle(crate::backend::RawMenu);

fn foster_child(slot: &Slot, child: ChildHandle) -> Menu {
    // The parent resource owns the child; hand out a non-owning wrapper.
    Menu::from_handle(HandleBox::foster(slot.handle().api().clone(), child.0))
}

/// Read-only view of a separator slot.
#[derive(Debug)]
pub struct SeparatorView<'a> {
    slot: &'a Slot,
}

impl SeparatorView<'_> {
    /// The separator's numeric id; `0` unless one was assigned.
    pub fn id(&self) -> Result<u32, MenuError> {
        read_id(self.slot)
    }
}

/// Mutable view of a separator slot.
#[derive(Debug)]
pub struct SeparatorViewMut<'a> {
    slot: &'a Slot,
}

impl SeparatorViewMut<'_> {
    pub fn id(&self) -> Result<u32, MenuError> {
        read_id(self.slot)
    }

    pub fn set_id(&mut self, id: u32) -> Result<(), MenuError> {
        write_id(self.slot, id)
    }
}

/// Read-only view of a command slot.
#[derive(Debug)]
pub struct CommandView<'a> {
    slot: &'a Slot,
}

impl CommandView<'_> {
    /// The command id delivered when the item is chosen.
    pub fn id(&self) -> Result<u32, MenuError> {
        read_id(self.slot)
    }

    /// Whether the item can currently be selected.
    pub fn enabled(&self) -> Result<bool, MenuError> {
        Ok(!read_state(self.slot)?.contains(StateFlags::DISABLED))
    }

    /// Whether the item carries a check mark.
    pub fn checked(&self) -> Result<bool, MenuError> {
        Ok(read_state(self.slot)?.contains(StateFlags::CHECKED))
    }

    /// The current appearance of the item's button.
    pub fn button_kind(&self) -> Result<ButtonKind, MenuError> {
        button::kind(self.slot)
    }

    /// Classifies the button's appearance and hands the matching read-only
    /// view to `visitor`.
    pub fn accept_button<V: ButtonVisitor>(&self, visitor: &mut V) -> Result<V::Output, MenuError> {
        button::dispatch(self.slot, visitor)
    }
}

/// Mutable view of a command slot.
#[derive(Debug)]
pub struct CommandViewMut<'a> {
    slot: &'a Slot,
}

impl CommandViewMut<'_> {
    pub fn id(&self) -> Result<u32, MenuError> {
        read_id(self.slot)
    }

    pub fn set_id(&mut self, id: u32) -> Result<(), MenuError> {
        write_id(self.slot, id)
    }

    pub fn enabled(&self) -> Result<bool, MenuError> {
        Ok(!read_state(self.slot)?.contains(StateFlags::DISABLED))
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), MenuError> {
        toggle_state(self.slot, StateFlags::DISABLED, !enabled)
    }

    pub fn checked(&self) -> Result<bool, MenuError> {
        Ok(read_state(self.slot)?.contains(StateFlags::CHECKED))
    }

    pub fn set_checked(&mut self, checked: bool) -> Result<(), MenuError> {
        toggle_state(self.slot, StateFlags::CHECKED, checked)
    }

    pub fn button_kind(&self) -> Result<ButtonKind, MenuError> {
        button::kind(self.slot)
    }

    pub fn accept_button<V: ButtonVisitor>(&self, visitor: &mut V) -> Result<V::Output, MenuError> {
        button::dispatch(self.slot, visitor)
    }

    /// Classifies the button's appearance and hands the matching mutable
    /// view to `visitor`.
    pub fn accept_button_mut<V: ButtonVisitorMut>(
        &mut self,
        visitor: &mut V,
    ) -> Result<V::Output, MenuError> {
        button::dispatch_mut(self.slot, visitor)
    }
}

/// Read-only view of a slot with an attached submenu.
#[derive(Debug)]
pub struct SubMenuView<'a> {
    slot: &'a Slot,
    child: ChildHandle,
}

impl SubMenuView<'_> {
    /// A non-owning wrapper around the attached child menu.
    pub fn menu(&self) -> Menu {
        foster_child(self.slot, self.child)
    }

    pub fn id(&self) -> Result<u32, MenuError> {
        read_id(self.slot)
    }

    pub fn enabled(&self) -> Result<bool, MenuError> {
        Ok(!read_state(self.slot)?.contains(StateFlags::DISABLED))
    }

    pub fn button_kind(&self) -> Result<ButtonKind, MenuError> {
        button::kind(self.slot)
    }

    pub fn accept_button<V: ButtonVisitor>(&self, visitor: &mut V) -> Result<V::Output, MenuError> {
        button::dispatch(self.slot, visitor)
    }
}

/// Mutable view of a slot with an attached submenu.
#[derive(Debug)]
pub struct SubMenuViewMut<'a> {
    slot: &'a Slot,
    child: ChildHandle,
}

impl SubMenuViewMut<'_> {
    pub fn menu(&self) -> Menu {
        foster_child(self.slot, self.child)
    }

    pub fn id(&self) -> Result<u32, MenuError> {
        read_id(self.slot)
    }

    pub fn enabled(&self) -> Result<bool, MenuError> {
        Ok(!read_state(self.slot)?.contains(StateFlags::DISABLED))
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), MenuError> {
        toggle_state(self.slot, StateFlags::DISABLED, !enabled)
    }

    pub fn button_kind(&self) -> Result<ButtonKind, MenuError> {
        button::kind(self.slot)
    }

    pub fn accept_button<V: ButtonVisitor>(&self, visitor: &mut V) -> Result<V::Output, MenuError> {
        button::dispatch(self.slot, visitor)
    }

    pub fn accept_button_mut<V: ButtonVisitorMut>(
        &mut self,
        visitor: &mut V,
    ) -> Result<V::Output, MenuError> {
        button::dispatch_mut(self.slot, visitor)
    }
}

/// Any read-only item view, for visitors that handle all kinds uniformly.
#[derive(Debug)]
pub enum AnyItemView<'a> {
    Separator(SeparatorView<'a>),
    Command(CommandView<'a>),
    SubMenu(SubMenuView<'a>),
}

/// Any mutable item view.
#[derive(Debug)]
pub enum AnyItemViewMut<'a> {
    Separator(SeparatorViewMut<'a>),
    Command(CommandViewMut<'a>),
    SubMenu(SubMenuViewMut<'a>),
}

/// Visitor for read-only item dispatch.
///
/// Per-kind handlers default to [`fallback`](ItemVisitor::fallback), so an
/// implementation may supply any subset of the specific handlers, or only
/// the generic one.
pub trait ItemVisitor {
    type Output;

    fn separator(&mut self, view: SeparatorView<'_>) -> Self::Output {
        self.fallback(AnyItemView::Separator(view))
    }

    fn command(&mut self, view: CommandView<'_>) -> Self::Output {
        self.fallback(AnyItemView::Command(view))
    }

    fn submenu(&mut self, view: SubMenuView<'_>) -> Self::Output {
        self.fallback(AnyItemView::SubMenu(view))
    }

    fn fallback(&mut self, view: AnyItemView<'_>) -> Self::Output;
}

/// Visitor for mutable item dispatch.
pub trait ItemVisitorMut {
    type Output;

    fn separator(&mut self, view: SeparatorViewMut<'_>) -> Self::Output {
        self.fallback(AnyItemViewMut::Separator(view))
    }

    fn command(&mut self, view: CommandViewMut<'_>) -> Self::Output {
        self.fallback(AnyItemViewMut::Command(view))
    }

    fn submenu(&mut self, view: SubMenuViewMut<'_>) -> Self::Output {
        self.fallback(AnyItemViewMut::SubMenu(view))
    }

    fn fallback(&mut self, view: AnyItemViewMut<'_>) -> Self::Output;
}
