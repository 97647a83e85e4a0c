//! Core model of an externally-owned native menu resource.
//!
//! A menu resource is a mutable, ordered collection of slots that lives
//! outside the process's control: other code can resize it, retype its
//! slots, or destroy it outright at any time. This crate models that
//! honestly:
//!
//! - [`handle::HandleBox`] shares ownership of one resource across wrapper
//!   values and tracks whether the chain is responsible for destroying it.
//! - [`menu::Menu`] and [`menu::MenuBar`] are sequence abstractions that
//!   never cache size or contents.
//! - [`item`] and [`button`] hand out short-lived typed views, re-deriving
//!   a slot's concrete kind from a fresh read on every dispatch.
//! - [`desc`] describes not-yet-inserted items; inserting a submenu
//!   description transfers ownership of the child resource to the parent.
//!
//! All native access goes through the [`backend::MenuApi`] trait;
//! [`headless`] provides the in-memory implementation used for testing,
//! and platform crates provide the real ones.

pub mod backend;
pub mod button;
pub mod cursor;
pub mod desc;
pub mod error;
pub mod handle;
pub mod headless;
pub mod item;
pub mod menu;
pub mod props;
pub mod slot;
