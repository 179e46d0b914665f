//! Volatile popup lifecycle, the dialog stack, and context-menu resolution.

use std::rc::Rc;

use scrim_testing::{EventLog, TestMenu, TestSurface};
use scrim_ui::{
    Hud, MouseButton, PickFlags, PickMeta, PickReason, Point, Rect, Size, Surface, Theme,
    VOLATILE_POPUP_Z,
};

fn hud() -> Hud {
    Hud::new(Size::new(800.0, 600.0), Theme::minimal())
}

fn click(hud: &mut Hud, button: MouseButton, x: f32, y: f32, when: u64) {
    hud.pick(
        Point::new(x, y),
        PickReason::ButtonPressed,
        button,
        when,
        PickMeta::default(),
        PickFlags::NONE,
    );
    hud.pick(
        Point::new(x, y),
        PickReason::ButtonReleased,
        button,
        when + 1,
        PickMeta::default(),
        PickFlags::NONE,
    );
}

fn press(hud: &mut Hud, button: MouseButton, x: f32, y: f32, when: u64) {
    hud.pick(
        Point::new(x, y),
        PickReason::ButtonPressed,
        button,
        when,
        PickMeta::default(),
        PickFlags::NONE,
    );
}

#[test]
fn press_outside_popup_and_assembly_closes_it() {
    let log = EventLog::new();
    let mut hud = hud();

    let assembly = TestSurface::builder("assembly", &log)
        .frame(Rect::new(10.0, 10.0, 60.0, 20.0))
        .build();
    hud.add_window(assembly.handle());

    let popup = TestSurface::builder("popup", &log)
        .frame(Rect::new(10.0, 30.0, 60.0, 80.0))
        .heavyweight()
        .build();
    hud.open_volatile_popup(popup.handle(), assembly.handle(), Point::new(10.0, 30.0));
    assert!(hud.current_volatile_popup().is_some());

    // Outside both: closed.
    press(&mut hud, MouseButton::Primary, 300.0, 300.0, 1);
    assert!(hud.current_volatile_popup().is_none());
    assert!(!popup.is_attached());

    // Reopen, press inside the popup: stays open.
    hud.open_volatile_popup(popup.handle(), assembly.handle(), Point::new(10.0, 30.0));
    press(&mut hud, MouseButton::Primary, 40.0, 60.0, 2);
    assert!(hud.current_volatile_popup().is_some());

    // Press on the owning assembly: stays open too.
    press(&mut hud, MouseButton::Primary, 40.0, 15.0, 3);
    assert!(hud.current_volatile_popup().is_some());
}

#[test]
fn opening_a_popup_replaces_the_previous_one() {
    let log = EventLog::new();
    let mut hud = hud();

    let assembly = TestSurface::named("assembly", &log);
    let first = TestSurface::builder("first", &log).heavyweight().build();
    let second = TestSurface::builder("second", &log).heavyweight().build();

    hud.open_volatile_popup(first.handle(), assembly.handle(), Point::new(0.0, 0.0));
    hud.open_volatile_popup(second.handle(), assembly.handle(), Point::new(0.0, 0.0));

    assert!(!first.is_attached());
    assert!(second.is_attached());
    assert_eq!(
        hud.current_volatile_popup().map(|popup| popup.id()),
        Some(second.id())
    );

    // Closing twice is a no-op.
    hud.close_volatile_popup();
    hud.close_volatile_popup();
    assert!(hud.current_volatile_popup().is_none());
}

#[test]
#[should_panic(expected = "must be heavyweight")]
fn lightweight_popup_is_a_contract_breach() {
    let log = EventLog::new();
    let mut hud = hud();
    let assembly = TestSurface::named("assembly", &log);
    let popup = TestSurface::named("popup", &log);
    hud.open_volatile_popup(popup.handle(), assembly.handle(), Point::ZERO);
}

#[test]
fn shadow_factory_decorates_volatile_popups() {
    let log = EventLog::new();
    let mut hud = hud();

    let shadow = TestSurface::named("shadow", &log);
    let built = shadow.clone();
    hud.set_shadow_factory(Some(Rc::new(move |_popup| built.handle())));

    let assembly = TestSurface::named("assembly", &log);
    let popup = TestSurface::builder("popup", &log).heavyweight().build();
    hud.open_volatile_popup(popup.handle(), assembly.handle(), Point::new(40.0, 40.0));

    assert!(shadow.is_attached());
    assert_eq!(popup.z_index(), VOLATILE_POPUP_Z);
    assert_eq!(shadow.z_index(), VOLATILE_POPUP_Z - 1);

    hud.close_volatile_popup();
    assert!(!shadow.is_attached());
    assert!(!popup.is_attached());
}

#[test]
fn dialog_stack_tracks_the_topmost_visible_entry() {
    let log = EventLog::new();
    let mut hud = hud();

    let first = TestSurface::builder("first", &log).dialog().build();
    let second = TestSurface::builder("second", &log).dialog().build();
    hud.add_window(first.handle());
    hud.add_window(second.handle());

    assert_eq!(hud.current_dialog().map(|d| d.id()), Some(second.id()));

    second.set_visible(false);
    assert_eq!(hud.current_dialog().map(|d| d.id()), Some(first.id()));

    hud.remove_window(&first.handle());
    assert!(hud.current_dialog().is_none());

    second.set_visible(true);
    assert_eq!(hud.current_dialog().map(|d| d.id()), Some(second.id()));
}

#[test]
fn right_release_over_a_widget_opens_its_menu() {
    let log = EventLog::new();
    let mut hud = hud();

    let window = TestSurface::builder("window", &log)
        .frame(Rect::new(0.0, 0.0, 200.0, 200.0))
        .build();
    hud.add_window(window.handle());

    let items = TestSurface::builder("items", &log)
        .frame(Rect::new(300.0, 50.0, 80.0, 120.0))
        .build();
    let menu = TestMenu::new("menu", items.clone());
    hud.add_window(items.handle());
    window.set_context_menu(Some(menu.menu_handle()));

    // A right press alone does not open the menu.
    press(&mut hud, MouseButton::Secondary, 50.0, 50.0, 1);
    assert!(!menu.is_showing());

    click(&mut hud, MouseButton::Secondary, 50.0, 50.0, 2);
    assert!(menu.is_showing());
    assert_eq!(menu.shown_at(), vec![Point::new(50.0, 50.0)]);
    assert_eq!(
        hud.displayed_context_menu().map(|m| m.id()),
        Some(menu.id())
    );
}

#[test]
fn press_outside_dismisses_menu_but_clicks_inside_do_not() {
    let log = EventLog::new();
    let mut hud = hud();

    let window = TestSurface::builder("window", &log)
        .frame(Rect::new(0.0, 0.0, 200.0, 200.0))
        .build();
    hud.add_window(window.handle());

    let items = TestSurface::builder("items", &log)
        .frame(Rect::new(300.0, 50.0, 80.0, 120.0))
        .build();
    let menu = TestMenu::new("menu", items.clone());
    hud.add_window(items.handle());
    window.set_context_menu(Some(menu.menu_handle()));

    click(&mut hud, MouseButton::Secondary, 50.0, 50.0, 1);
    assert!(menu.is_showing());

    // Left click inside the menu's item container: stays open.
    click(&mut hud, MouseButton::Primary, 320.0, 100.0, 3);
    assert!(menu.is_showing());
    assert_eq!(menu.hide_count(), 0);

    // Mouse moves never dismiss a menu.
    hud.pick(
        Point::new(60.0, 60.0),
        PickReason::MouseMoved,
        MouseButton::Primary,
        5,
        PickMeta::default(),
        PickFlags::NONE,
    );
    assert!(menu.is_showing());

    // Left press over the window: dismissed.
    press(&mut hud, MouseButton::Primary, 50.0, 50.0, 6);
    assert!(!menu.is_showing());
    assert_eq!(menu.hide_count(), 1);
    assert!(hud.displayed_context_menu().is_none());
}

#[test]
fn switching_widgets_swaps_the_displayed_menu() {
    let log = EventLog::new();
    let mut hud = hud();

    let first = TestSurface::builder("first", &log)
        .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
        .build();
    let second = TestSurface::builder("second", &log)
        .frame(Rect::new(150.0, 0.0, 100.0, 100.0))
        .build();
    hud.add_window(first.handle());
    hud.add_window(second.handle());

    let first_items = TestSurface::builder("first_items", &log)
        .frame(Rect::new(300.0, 50.0, 80.0, 120.0))
        .build();
    let first_menu = TestMenu::new("first_menu", first_items.clone());
    hud.add_window(first_items.handle());
    first.set_context_menu(Some(first_menu.menu_handle()));

    let second_items = TestSurface::builder("second_items", &log)
        .frame(Rect::new(400.0, 50.0, 80.0, 120.0))
        .build();
    let second_menu = TestMenu::new("second_menu", second_items.clone());
    hud.add_window(second_items.handle());
    second.set_context_menu(Some(second_menu.menu_handle()));

    click(&mut hud, MouseButton::Secondary, 50.0, 50.0, 1);
    assert!(first_menu.is_showing());

    click(&mut hud, MouseButton::Secondary, 160.0, 50.0, 3);
    assert!(!first_menu.is_showing());
    assert!(second_menu.is_showing());
    assert_eq!(second_menu.shown_at(), vec![Point::new(160.0, 50.0)]);
}

#[test]
fn void_menu_opens_over_empty_space_only_when_enabled() {
    let log = EventLog::new();
    let mut hud = hud();

    let items = TestSurface::builder("items", &log)
        .frame(Rect::new(300.0, 50.0, 80.0, 120.0))
        .build();
    let menu = TestMenu::new("menu", items.clone());
    hud.add_window(items.handle());
    hud.set_default_context_menu(Some(menu.menu_handle()));

    click(&mut hud, MouseButton::Secondary, 500.0, 400.0, 1);
    assert!(!menu.is_showing());

    hud.set_void_menu_enabled(true);
    click(&mut hud, MouseButton::Secondary, 500.0, 400.0, 3);
    assert!(menu.is_showing());
}

#[test]
fn default_menu_serves_widgets_without_their_own() {
    let log = EventLog::new();
    let mut hud = hud();

    let window = TestSurface::builder("window", &log)
        .frame(Rect::new(0.0, 0.0, 200.0, 200.0))
        .build();
    hud.add_window(window.handle());

    let items = TestSurface::builder("items", &log)
        .frame(Rect::new(300.0, 50.0, 80.0, 120.0))
        .build();
    let menu = TestMenu::new("default_menu", items.clone());
    hud.add_window(items.handle());
    hud.set_default_context_menu(Some(menu.menu_handle()));

    click(&mut hud, MouseButton::Secondary, 50.0, 50.0, 1);
    assert!(menu.is_showing());
}
