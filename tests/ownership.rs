//! Ownership hand-off between peer menu resources.

use std::rc::Rc;

use menukit::backend::{MenuApi, RawMenu};
use menukit::desc::{SeparatorDesc, SubMenuDesc};
use menukit::error::MenuError;
use menukit::headless::{HeadlessMenuApi, BAD_HANDLE_CODE};
use menukit::item::{AnyItemView, ItemKind, ItemVisitor, SubMenuView};
use menukit::menu::Menu;

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

fn api() -> Rc<HeadlessMenuApi> {
    init_logging();
    Rc::new(HeadlessMenuApi::new())
}

// Hands back the attached child menu, or None for other kinds.
struct ChildOf;

impl ItemVisitor for ChildOf {
    type Output = Option<Menu>;

    fn submenu(&mut self, view: SubMenuView<'_>) -> Self::Output {
        Some(view.menu())
    }

    fn fallback(&mut self, _: AnyItemView<'_>) -> Self::Output {
        None
    }
}

#[test]
fn submenu_insertion_transfers_ownership() {
    let api = api();
    let mut sub = Menu::new(api.clone()).unwrap();
    sub.push(SeparatorDesc::new()).unwrap();
    let sub_raw = sub.raw();
    assert!(sub.handle().owns());

    let mut top = Menu::new(api.clone()).unwrap();
    top.push(SubMenuDesc::new(sub.clone(), "Nested")).unwrap();

    // The child's whole ownership chain is downgraded the moment the
    // insert succeeds.
    assert!(!sub.handle().owns());
    assert_eq!(top.len().unwrap(), 1);

    let child = top.item(0).unwrap().accept(&mut ChildOf).unwrap().expect("a submenu slot");
    assert_eq!(child.raw(), sub_raw);
    assert!(!child.handle().owns(), "views hand out fostered child handles");
    assert_eq!(child.len().unwrap(), 1);
    assert_eq!(child.item(0).unwrap().kind().unwrap(), ItemKind::Separator);
}

#[test]
fn destroying_the_parent_takes_the_child_down() {
    let api = api();
    let sub = Menu::new(api.clone()).unwrap();
    let sub_raw = sub.raw();
    let mut top = Menu::new(api.clone()).unwrap();
    top.push(SubMenuDesc::new(sub.clone(), "Nested")).unwrap();

    drop(top);
    assert!(!api.is_valid(sub_raw), "the parent owns the child now");
    assert!(!sub.valid());
    assert_eq!(api.live_count(), 0);

    // Dropping the stale child wrapper must not double-destroy anything.
    drop(sub);
    assert_eq!(api.live_count(), 0);
}

#[test]
fn failed_insertion_does_not_transfer_ownership() {
    let api = api();
    let sub = Menu::new(api.clone()).unwrap();
    let sub_raw = sub.raw();

    // A parent wrapper over a handle the backend never issued: the native
    // insert is guaranteed to fail.
    let mut bogus = Menu::foster(api.clone(), RawMenu::from_raw(0xdead));
    let err = bogus.push(SubMenuDesc::new(sub.clone(), "Nested")).unwrap_err();
    assert_eq!(err, MenuError::native("insert_item", BAD_HANDLE_CODE));

    // No transfer happened; the child chain still owns its resource.
    assert!(sub.handle().owns());
    assert!(api.is_valid(sub_raw));

    // The last owner dropping destroys the child normally.
    drop(sub);
    assert!(!api.is_valid(sub_raw));
}

#[test]
fn external_destruction_is_survivable() {
    let api = api();
    let menu = Menu::new(api.clone()).unwrap();
    assert!(menu.valid());

    // The resource dies through a channel the model does not see.
    api.destroy(menu.raw()).unwrap();
    assert!(!menu.valid());
    assert_eq!(
        menu.len().unwrap_err(),
        MenuError::native("item_count", BAD_HANDLE_CODE),
    );

    // Dropping the now-dangling owner logs instead of panicking.
    drop(menu);
}

#[test]
fn release_through_the_container_is_idempotent() {
    let api = api();
    let menu = Menu::new(api.clone()).unwrap();
    let raw = menu.raw();

    assert_eq!(menu.handle().release(), raw);
    assert_eq!(menu.handle().release(), raw);
    assert!(!menu.handle().owns());

    drop(menu);
    assert!(api.is_valid(raw), "a released chain never destroys");
    api.destroy(raw).unwrap();
}
