//! Tooltip lifecycle, cursor resolution, pick-missed notification, and
//! probe (just-test) pick semantics.

use std::cell::Cell;
use std::rc::Rc;

use scrim_testing::{
    CollectingAttachListener, CollectingInputListener, CollectingPickMissed, EventLog, TestSurface,
};
use scrim_ui::{
    CursorKind, CursorSink, CursorVisual, Hud, MouseButton, PickFlags, PickMeta, PickReason,
    Point, Rect, Size, Surface, Theme,
};

fn hud() -> Hud {
    Hud::new(Size::new(800.0, 600.0), Theme::minimal())
}

fn move_to(hud: &mut Hud, x: f32, y: f32, when: u64) {
    hud.pick(
        Point::new(x, y),
        PickReason::MouseMoved,
        MouseButton::Primary,
        when,
        PickMeta::default(),
        PickFlags::NONE,
    );
}

fn stop_at(hud: &mut Hud, x: f32, y: f32, when: u64) {
    hud.pick(
        Point::new(x, y),
        PickReason::MouseStopped,
        MouseButton::Primary,
        when,
        PickMeta::default(),
        PickFlags::NONE,
    );
}

struct CountingSink {
    calls: Cell<usize>,
}

impl CursorSink for CountingSink {
    fn show_cursor(&self, _kind: CursorKind, _visual: &CursorVisual) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn tooltip_factory(log: &EventLog, built: Rc<Cell<usize>>) -> Rc<dyn Fn(&scrim_ui::SurfaceHandle) -> scrim_ui::SurfaceHandle> {
    let log = log.clone();
    Rc::new(move |_source| {
        built.set(built.get() + 1);
        TestSurface::builder(format!("tooltip{}", built.get()), &log)
            .heavyweight()
            .build()
            .handle()
    })
}

#[test]
fn stop_displays_tooltip_and_caches_per_source() {
    let log = EventLog::new();
    let mut hud = hud();

    let widget = TestSurface::builder("widget", &log)
        .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
        .tooltip("hint")
        .build();
    hud.add_window(widget.handle());

    let built = Rc::new(Cell::new(0));
    hud.set_tooltip_factory(Some(tooltip_factory(&log, built.clone())));

    stop_at(&mut hud, 50.0, 50.0, 1);
    assert!(hud.displayed_tooltip().is_some());
    assert_eq!(built.get(), 1);

    // Stopping again over the same widget is a no-op.
    stop_at(&mut hud, 55.0, 50.0, 2);
    assert_eq!(built.get(), 1);

    // Move far away: disposed. 800/16 = 50 horizontally.
    move_to(&mut hud, 150.0, 50.0, 3);
    assert!(hud.displayed_tooltip().is_none());

    // A new stop reuses the cached tooltip surface.
    stop_at(&mut hud, 50.0, 50.0, 4);
    assert!(hud.displayed_tooltip().is_some());
    assert_eq!(built.get(), 1);
}

#[test]
fn tooltip_survives_small_movements_and_its_own_widget() {
    let log = EventLog::new();
    let mut hud = hud();

    let widget = TestSurface::builder("widget", &log)
        .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
        .tooltip("hint")
        .build();
    hud.add_window(widget.handle());

    let built = Rc::new(Cell::new(0));
    hud.set_tooltip_factory(Some(tooltip_factory(&log, built.clone())));

    stop_at(&mut hud, 95.0, 50.0, 1);
    assert!(hud.displayed_tooltip().is_some());

    // Off the widget but within the movement slack: stays.
    move_to(&mut hud, 105.0, 50.0, 2);
    assert!(hud.displayed_tooltip().is_some());

    // Large movement while still over the source widget: stays.
    move_to(&mut hud, 5.0, 50.0, 3);
    assert!(hud.displayed_tooltip().is_some());

    // Off the widget and beyond the slack: disposed.
    move_to(&mut hud, 160.0, 50.0, 4);
    assert!(hud.displayed_tooltip().is_none());
}

#[test]
fn widgets_without_content_or_factory_get_no_tooltip() {
    let log = EventLog::new();
    let mut hud = hud();

    let silent = TestSurface::builder("silent", &log)
        .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
        .build();
    let chatty = TestSurface::builder("chatty", &log)
        .frame(Rect::new(150.0, 0.0, 100.0, 100.0))
        .tooltip("hint")
        .build();
    hud.add_window(silent.handle());
    hud.add_window(chatty.handle());

    // Content but no factory.
    stop_at(&mut hud, 160.0, 50.0, 1);
    assert!(hud.displayed_tooltip().is_none());

    let built = Rc::new(Cell::new(0));
    hud.set_tooltip_factory(Some(tooltip_factory(&log, built.clone())));

    // Factory but no content.
    stop_at(&mut hud, 50.0, 50.0, 2);
    assert!(hud.displayed_tooltip().is_none());
    assert_eq!(built.get(), 0);
}

#[test]
#[should_panic(expected = "heavyweight")]
fn lightweight_tooltip_factory_result_is_fatal() {
    let log = EventLog::new();
    let mut hud = hud();

    let widget = TestSurface::builder("widget", &log)
        .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
        .tooltip("hint")
        .build();
    hud.add_window(widget.handle());

    let inner = log.clone();
    hud.set_tooltip_factory(Some(Rc::new(move |_source| {
        TestSurface::named("flimsy", &inner).handle()
    })));

    stop_at(&mut hud, 50.0, 50.0, 1);
}

#[test]
fn cursor_kind_is_inherited_and_resets_over_empty_space() {
    let log = EventLog::new();
    let mut hud = hud();

    let window = TestSurface::builder("window", &log)
        .frame(Rect::new(0.0, 0.0, 200.0, 200.0))
        .cursor(CursorKind::Hand)
        .build();
    let child = TestSurface::builder("child", &log)
        .frame(Rect::new(50.0, 50.0, 50.0, 50.0))
        .build();
    window.set_child(child.clone());
    child.set_attached(true);
    hud.add_window(window.handle());

    // The child declares nothing; it inherits the window's hand cursor.
    move_to(&mut hud, 75.0, 75.0, 1);
    assert_eq!(hud.current_cursor(), CursorKind::Hand);

    // Its own declaration wins once set.
    child.set_cursor_kind(Some(CursorKind::Text));
    move_to(&mut hud, 76.0, 75.0, 2);
    assert_eq!(hud.current_cursor(), CursorKind::Text);

    // Empty space resets to the pointer.
    move_to(&mut hud, 500.0, 500.0, 3);
    assert_eq!(hud.current_cursor(), CursorKind::Pointer);
}

#[test]
fn probe_picks_disturb_nothing_visible() {
    let log = EventLog::new();
    let mut hud = hud();

    let sink = Rc::new(CountingSink { calls: Cell::new(0) });
    hud.set_cursor_sink(Some(sink.clone()));

    let window = TestSurface::builder("window", &log)
        .frame(Rect::new(0.0, 0.0, 200.0, 200.0))
        .cursor(CursorKind::Hand)
        .focusable()
        .build();
    hud.add_window(window.handle());

    let missed = Rc::new(CollectingPickMissed::new());
    hud.add_pick_missed_listener(PickReason::ALL_MASK, missed.clone());
    let inputs = Rc::new(CollectingInputListener::new());
    hud.add_input_listener(inputs.clone());

    // A probe over the window: no callbacks, no focus, no cursor change.
    let result = hud.pick(
        Point::new(50.0, 50.0),
        PickReason::MouseMoved,
        MouseButton::Primary,
        1,
        PickMeta::default(),
        PickFlags::probe(),
    );
    assert_eq!(result.map(|r| r.surface().id()), Some(window.id()));
    assert!(log.is_empty());
    assert!(hud.current_focused(false).is_none());
    assert!(hud.hovered().is_none());
    assert_eq!(sink.calls.get(), 0);
    assert!(inputs.events().is_empty());

    // A probe over empty space: pick-missed stays silent too.
    hud.pick(
        Point::new(500.0, 500.0),
        PickReason::MouseMoved,
        MouseButton::Primary,
        2,
        PickMeta::default(),
        PickFlags::probe(),
    );
    assert_eq!(missed.count(), 0);
}

#[test]
fn pick_missed_respects_masks_and_modal_dialogs() {
    let log = EventLog::new();
    let mut hud = hud();

    let window = TestSurface::builder("window", &log)
        .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
        .build();
    hud.add_window(window.handle());

    let press_only = Rc::new(CollectingPickMissed::new());
    hud.add_pick_missed_listener(PickReason::ButtonPressed.mask(), press_only.clone());
    let move_only = Rc::new(CollectingPickMissed::new());
    hud.add_pick_missed_listener(PickReason::MouseMoved.mask(), move_only.clone());

    // Miss with a press: only the press-masked listener fires.
    hud.pick(
        Point::new(500.0, 500.0),
        PickReason::ButtonPressed,
        MouseButton::Primary,
        1,
        PickMeta::default(),
        PickFlags::NONE,
    );
    assert_eq!(press_only.count(), 1);
    assert_eq!(move_only.count(), 0);

    // A hit fires nobody.
    hud.pick(
        Point::new(50.0, 50.0),
        PickReason::ButtonPressed,
        MouseButton::Primary,
        2,
        PickMeta::default(),
        PickFlags::NONE,
    );
    assert_eq!(press_only.count(), 1);

    // With a modal dialog active, misses are suppressed entirely.
    let dialog = TestSurface::builder("dialog", &log)
        .frame(Rect::new(300.0, 300.0, 100.0, 100.0))
        .dialog()
        .build();
    hud.add_window(dialog.handle());
    hud.pick(
        Point::new(500.0, 500.0),
        PickReason::ButtonPressed,
        MouseButton::Primary,
        3,
        PickMeta::default(),
        PickFlags::NONE,
    );
    assert_eq!(press_only.count(), 1);

    // Removing an unknown listener id is a silent no-op.
    hud.remove_pick_missed_listener(9_999);
}

#[test]
fn input_listeners_hear_every_dispatched_callback() {
    let log = EventLog::new();
    let mut hud = hud();

    let a = TestSurface::builder("a", &log)
        .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
        .build();
    let b = TestSurface::builder("b", &log)
        .frame(Rect::new(150.0, 0.0, 100.0, 100.0))
        .build();
    hud.add_window(a.handle());
    hud.add_window(b.handle());

    let inputs = Rc::new(CollectingInputListener::new());
    let id = hud.add_input_listener(inputs.clone());

    move_to(&mut hud, 50.0, 50.0, 1);
    move_to(&mut hud, 160.0, 50.0, 2);

    // Per-surface order: the enter notification is forwarded before the
    // moved event itself; the divergence exit precedes both for the next
    // surface.
    assert_eq!(
        inputs.events(),
        vec![
            (a.id(), "entered"),
            (a.id(), "moved"),
            (a.id(), "exited"),
            (b.id(), "entered"),
            (b.id(), "moved"),
        ]
    );

    // After removal the listener goes quiet.
    hud.remove_input_listener(id);
    move_to(&mut hud, 50.0, 50.0, 3);
    assert_eq!(inputs.events().len(), 5);
}

#[test]
fn attach_listeners_observe_windows_and_popups() {
    let log = EventLog::new();
    let mut hud = hud();

    let listener = Rc::new(CollectingAttachListener::new());
    hud.add_attach_listener(listener.clone());

    let window = TestSurface::named("window", &log);
    hud.add_window(window.handle());
    assert_eq!(listener.attached(), vec![window.id()]);

    let assembly = TestSurface::named("assembly", &log);
    let popup = TestSurface::builder("popup", &log).heavyweight().build();
    hud.open_volatile_popup(popup.handle(), assembly.handle(), Point::ZERO);
    assert_eq!(listener.attached(), vec![window.id(), popup.id()]);

    hud.close_volatile_popup();
    assert_eq!(listener.detached(), vec![popup.id()]);

    hud.remove_window(&window.handle());
    assert_eq!(listener.detached(), vec![popup.id(), window.id()]);
}
