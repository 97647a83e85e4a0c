//! Shared ownership of one native menu resource.

use std::cell::Cell;
use std::rc::Rc;

use crate::backend::{MenuApi, MenuKind, RawMenu};
use crate::error::MenuError;

/// A shared-ownership wrapper around one native menu resource.
///
/// Clones of a `HandleBox` share a single ownership chain: the raw handle,
/// the backend that created it, and one `owns` flag. When the last clone of
/// an owning chain is dropped the resource is destroyed exactly once.
///
/// The `owns` flag lives behind the same indirection as the reference
/// count, so [`release`](HandleBox::release) downgrades the whole chain at
/// once, not just the local clone. It can only ever go from `true` to
/// `false`; there is no way to re-adopt a released resource through the
/// same chain.
#[derive(Debug, Clone)]
pub struct HandleBox {
    shared: Rc<Shared>,
}

#[derive(Debug)]
struct Shared {
    api: Rc<dyn MenuApi>,
    raw: RawMenu,
    owns: Cell<bool>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if self.owns.get() {
            // The resource may already be gone if something outside the
            // model destroyed it (its window going away, for instance).
            // Drop cannot surface an error, so log and move on.
            if let Err(err) = self.api.destroy(self.raw) {
                tracing::warn!("failed to destroy menu {:?}: {err}", self.raw);
            }
        }
    }
}

impl HandleBox {
    /// Creates a brand-new resource and takes ownership of it.
    pub fn create(api: Rc<dyn MenuApi>, kind: MenuKind) -> Result<HandleBox, MenuError> {
        let raw = api.create(kind)?;
        Ok(HandleBox::adopt(api, raw))
    }

    /// Wraps a pre-existing handle and takes responsibility for destroying
    /// it.
    pub fn adopt(api: Rc<dyn MenuApi>, raw: RawMenu) -> HandleBox {
        HandleBox { shared: Rc::new(Shared { api, raw, owns: Cell::new(true) }) }
    }

    /// Wraps a pre-existing handle without taking ownership; no destructor
    /// action is ever taken for a fostered handle.
    pub fn foster(api: Rc<dyn MenuApi>, raw: RawMenu) -> HandleBox {
        HandleBox { shared: Rc::new(Shared { api, raw, owns: Cell::new(false) }) }
    }

    /// The raw handle value.
    pub fn raw(&self) -> RawMenu {
        self.shared.raw
    }

    /// Whether this ownership chain is responsible for destroying the
    /// resource.
    pub fn owns(&self) -> bool {
        self.shared.owns.get()
    }

    /// Gives up ownership for the entire chain and returns the raw handle.
    ///
    /// Used when another resource takes over responsibility for this one,
    /// which happens when a submenu is attached to a parent menu. Calling
    /// `release` on an already non-owning chain is a no-op.
    pub fn release(&self) -> RawMenu {
        if self.shared.owns.replace(false) {
            tracing::trace!("released ownership of menu {:?}", self.shared.raw);
        }
        self.shared.raw
    }

    /// Asks the backend whether the handle still designates a live
    /// resource.
    ///
    /// May be `false` even for an owning box: the resource can be destroyed
    /// by code outside this model.
    pub fn valid(&self) -> bool {
        self.shared.api.is_valid(self.shared.raw)
    }

    /// The backend this handle was created against.
    pub fn api(&self) -> &Rc<dyn MenuApi> {
        &self.shared.api
    }
}

/// Identity comparison of the underlying resource handle.
impl PartialEq for HandleBox {
    fn eq(&self, other: &Self) -> bool {
        self.shared.raw == other.shared.raw
    }
}

impl Eq for HandleBox {}
