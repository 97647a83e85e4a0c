//! Common error types.

use std::{error, fmt};

/// The error type for operations on a menu resource.
///
/// Contract violations (inserting a separator into a menu bar, requesting a
/// caption from a view that cannot carry one) are not represented here; they
/// are programming defects and panic instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// An index or cursor position was outside `[0, len)`.
    ///
    /// The operation had no effect.
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The live item count at the time of the call.
        len: usize,
    },
    /// A native resource primitive failed.
    NativeOperationFailed {
        /// The name of the failing primitive.
        operation: &'static str,
        /// The backend-defined status code.
        code: i32,
    },
    /// The handle no longer designates a live resource.
    ///
    /// This is advisory: callers are expected to check
    /// [`valid`](crate::handle::HandleBox::valid) proactively rather than
    /// rely on every operation detecting a dead resource.
    ResourceInvalid,
}

impl MenuError {
    /// Shorthand for a [`MenuError::NativeOperationFailed`] value.
    pub fn native(operation: &'static str, code: i32) -> MenuError {
        MenuError::NativeOperationFailed { operation, code }
    }
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::OutOfRange { index, len } => {
                write!(f, "position {index} is out of range for a menu with {len} item(s)")
            },
            MenuError::NativeOperationFailed { operation, code } => {
                write!(f, "native menu operation `{operation}` failed with code {code}")
            },
            MenuError::ResourceInvalid => {
                write!(f, "the handle no longer designates a live menu resource")
            },
        }
    }
}

impl error::Error for MenuError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_fmt_does_not_panic() {
        let _ = format!(
            "{:?}, {}, {}, {}",
            MenuError::OutOfRange { index: 3, len: 1 },
            MenuError::OutOfRange { index: 3, len: 1 },
            MenuError::native("insert_item", 6),
            MenuError::ResourceInvalid,
        );
    }
}
