//! Addressing one position inside a menu resource.

use crate::error::MenuError;
use crate::handle::HandleBox;
use crate::props::{PropMask, SlotProps};

/// A locator for one slot of a menu resource.
///
/// A `Slot` is purely positional: it has no identity of its own, and after
/// the resource is structurally mutated (an insertion or removal) the same
/// index may refer to a different logical item. Reads are therefore always
/// performed live against the resource, never answered from a cache.
#[derive(Debug, Clone)]
pub struct Slot {
    handle: HandleBox,
    index: usize,
}

impl Slot {
    pub(crate) fn new(handle: HandleBox, index: usize) -> Slot {
        Slot { handle, index }
    }

    /// The position this slot addresses.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The handle of the resource this slot belongs to.
    pub fn handle(&self) -> &HandleBox {
        &self.handle
    }

    fn len(&self) -> Result<usize, MenuError> {
        self.handle.api().item_count(self.handle.raw())
    }

    /// Reads the fields selected by `mask`.
    ///
    /// Fails with [`MenuError::OutOfRange`] if the index is past the
    /// resource's live item count.
    pub fn read(&self, mask: PropMask) -> Result<SlotProps, MenuError> {
        let mut props = SlotProps::request(mask);
        self.read_into(&mut props)?;
        Ok(props)
    }

    /// Reads into a caller-prepared property block, preserving its
    /// `text_capacity`. This is the fetch half of the two-phase caption
    /// protocol; [`read`](Slot::read) covers everything else.
    pub fn read_into(&self, props: &mut SlotProps) -> Result<(), MenuError> {
        let len = self.len()?;
        if self.index >= len {
            return Err(MenuError::OutOfRange { index: self.index, len });
        }
        self.handle.api().read_item(self.handle.raw(), self.index, props)
    }

    /// Writes the fields selected by `props.mask`, fully replacing them.
    pub(crate) fn write(&self, props: &SlotProps) -> Result<(), MenuError> {
        self.handle.api().write_item(self.handle.raw(), self.index, props)
    }

    /// Reads the caption through the measure-then-fetch protocol.
    pub(crate) fn caption(&self) -> Result<String, MenuError> {
        let mut props = SlotProps::request(PropMask::TEXT);
        self.read_into(&mut props)?;
        if props.text_len == 0 {
            return Ok(String::new());
        }
        props.text_capacity = props.text_len;
        self.read_into(&mut props)?;
        Ok(props.text)
    }

    pub(crate) fn set_caption(&self, caption: &str) -> Result<(), MenuError> {
        let mut props = SlotProps::request(PropMask::TEXT);
        props.text = caption.to_owned();
        self.write(&props)
    }
}
