//! The scripted `Surface` implementation tests drive the engine with.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use scrim_foundation::{
    next_surface_id, Container, CursorKind, DeviceComponent, FocusDirection, KeyEvent, MenuHandle,
    MouseButton, MouseButtons, PickFlags, PickReason, PickResult, Surface, SurfaceHandle,
    SurfaceId,
};
use scrim_ui_graphics::{Point, Rect};

use crate::event_log::{EventLog, TestEvent};

/// A rectangle implementing the full `Surface` contract. Every callback is
/// recorded into the shared [`EventLog`] under the surface's name. Hit
/// tests succeed when the point is inside the frame; the pick result's leaf
/// is the configured child when the point also lands inside it.
///
/// Child frames are expressed in absolute HUD coordinates.
pub struct TestSurface {
    id: SurfaceId,
    name: String,
    log: EventLog,
    weak_self: Weak<TestSurface>,
    frame: Cell<Rect>,
    z: Cell<i32>,
    visible: Cell<bool>,
    pickable: Cell<bool>,
    focusable: bool,
    heavyweight: bool,
    dialog: bool,
    container: bool,
    consume_keys: bool,
    attached: Cell<bool>,
    cursor: Cell<Option<CursorKind>>,
    tooltip: RefCell<Option<String>>,
    parent: RefCell<Option<Weak<TestSurface>>>,
    child: RefCell<Option<Rc<TestSurface>>>,
    context_menu: RefCell<Option<MenuHandle>>,
    content_pane_window: RefCell<Option<Weak<TestSurface>>>,
    focused_child: RefCell<Option<SurfaceHandle>>,
    blocked_components: RefCell<Vec<DeviceComponent>>,
    focus_moves: RefCell<Vec<FocusDirection>>,
}

pub struct TestSurfaceBuilder {
    name: String,
    log: EventLog,
    frame: Rect,
    visible: bool,
    pickable: bool,
    focusable: bool,
    heavyweight: bool,
    dialog: bool,
    container: bool,
    consume_keys: bool,
    cursor: Option<CursorKind>,
    tooltip: Option<String>,
}

impl TestSurfaceBuilder {
    pub fn new(name: impl Into<String>, log: &EventLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            frame: Rect::new(0.0, 0.0, 100.0, 100.0),
            visible: true,
            pickable: true,
            focusable: false,
            heavyweight: false,
            dialog: false,
            container: false,
            consume_keys: false,
            cursor: None,
            tooltip: None,
        }
    }

    pub fn frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub fn heavyweight(mut self) -> Self {
        self.heavyweight = true;
        self
    }

    pub fn dialog(mut self) -> Self {
        self.dialog = true;
        self
    }

    pub fn container(mut self) -> Self {
        self.container = true;
        self
    }

    /// The surface consumes every key press offered to it.
    pub fn consume_keys(mut self) -> Self {
        self.consume_keys = true;
        self
    }

    pub fn cursor(mut self, kind: CursorKind) -> Self {
        self.cursor = Some(kind);
        self
    }

    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn build(self) -> Rc<TestSurface> {
        Rc::new_cyclic(|weak| TestSurface {
            id: next_surface_id(),
            name: self.name,
            log: self.log,
            weak_self: weak.clone(),
            frame: Cell::new(self.frame),
            z: Cell::new(0),
            visible: Cell::new(self.visible),
            pickable: Cell::new(self.pickable),
            focusable: self.focusable,
            heavyweight: self.heavyweight,
            dialog: self.dialog,
            container: self.container,
            consume_keys: self.consume_keys,
            attached: Cell::new(false),
            cursor: Cell::new(self.cursor),
            tooltip: RefCell::new(self.tooltip),
            parent: RefCell::new(None),
            child: RefCell::new(None),
            context_menu: RefCell::new(None),
            content_pane_window: RefCell::new(None),
            focused_child: RefCell::new(None),
            blocked_components: RefCell::new(Vec::new()),
            focus_moves: RefCell::new(Vec::new()),
        })
    }
}

impl TestSurface {
    pub fn builder(name: impl Into<String>, log: &EventLog) -> TestSurfaceBuilder {
        TestSurfaceBuilder::new(name, log)
    }

    /// A visible, pickable 100x100 surface at the origin.
    pub fn named(name: impl Into<String>, log: &EventLog) -> Rc<TestSurface> {
        TestSurfaceBuilder::new(name, log).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> SurfaceHandle {
        self.weak_self.upgrade().expect("test surface dropped")
    }

    pub fn set_frame(&self, frame: Rect) {
        self.frame.set(frame);
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn set_pickable(&self, pickable: bool) {
        self.pickable.set(pickable);
    }

    pub fn set_cursor_kind(&self, cursor: Option<CursorKind>) {
        self.cursor.set(cursor);
    }

    pub fn set_tooltip_text(&self, text: Option<String>) {
        *self.tooltip.borrow_mut() = text;
    }

    pub fn set_context_menu(&self, menu: Option<MenuHandle>) {
        *self.context_menu.borrow_mut() = menu;
    }

    /// Installs `child` as this surface's (sole) descendant; picks landing
    /// inside the child's frame resolve it as the leaf.
    pub fn set_child(self: &Rc<Self>, child: Rc<TestSurface>) {
        *child.parent.borrow_mut() = Some(Rc::downgrade(self));
        *self.child.borrow_mut() = Some(child);
    }

    /// Marks this surface as the content pane of `window`.
    pub fn set_content_pane_window(&self, window: &Rc<TestSurface>) {
        *self.content_pane_window.borrow_mut() = Some(Rc::downgrade(window));
    }

    pub fn set_focused_child(&self, child: Option<SurfaceHandle>) {
        *self.focused_child.borrow_mut() = child;
    }

    pub fn block_component(&self, component: DeviceComponent) {
        self.blocked_components.borrow_mut().push(component);
    }

    /// Directions `move_focus` has been asked for, in order.
    pub fn focus_moves(&self) -> Vec<FocusDirection> {
        self.focus_moves.borrow().clone()
    }

    fn record(&self, event: TestEvent) {
        self.log.record(&self.name, event);
    }
}

impl Surface for TestSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn frame(&self) -> Rect {
        self.frame.get()
    }

    fn set_origin(&self, origin: Point) {
        let frame = self.frame.get();
        self.frame
            .set(Rect::from_origin_size(origin, frame.size()));
    }

    fn z_index(&self) -> i32 {
        self.z.get()
    }

    fn set_z_index(&self, z: i32) {
        self.z.set(z);
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn is_pickable(&self) -> bool {
        self.pickable.get()
    }

    fn is_focusable(&self) -> bool {
        self.focusable
    }

    fn is_heavyweight(&self) -> bool {
        self.heavyweight
    }

    fn is_dialog(&self) -> bool {
        self.dialog
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    fn parent(&self) -> Option<SurfaceHandle> {
        self.parent
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade())
            .map(|parent| parent as SurfaceHandle)
    }

    fn cursor(&self) -> Option<CursorKind> {
        self.cursor.get()
    }

    fn window_for_content_pane(&self) -> Option<SurfaceHandle> {
        self.content_pane_window
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade())
            .map(|window| window as SurfaceHandle)
    }

    fn context_menu(&self) -> Option<MenuHandle> {
        self.context_menu.borrow().clone()
    }

    fn tooltip_text(&self) -> Option<String> {
        self.tooltip.borrow().clone()
    }

    fn as_container(&self) -> Option<&dyn Container> {
        if self.container {
            Some(self)
        } else {
            None
        }
    }

    fn pick(
        &self,
        x: f32,
        y: f32,
        reason: PickReason,
        _button: MouseButton,
        _when: u64,
        flags: PickFlags,
    ) -> Option<PickResult> {
        if !self.visible.get() || !self.pickable.get() || !self.frame.get().contains(x, y) {
            return None;
        }
        let surface = self.handle();
        let leaf = self
            .child
            .borrow()
            .as_ref()
            .filter(|child| child.is_visible() && child.frame().contains(x, y))
            .map(|child| child.handle())
            .unwrap_or_else(|| surface.clone());
        Some(PickResult::new(surface, leaf, self.z.get(), reason, flags))
    }

    fn on_mouse_button_pressed(
        &self,
        button: MouseButton,
        local: Point,
        _when: u64,
        _last_when: u64,
        top_most: bool,
        has_focus: bool,
    ) {
        self.record(TestEvent::Pressed {
            button,
            local,
            top_most,
            has_focus,
        });
    }

    fn on_mouse_button_released(
        &self,
        button: MouseButton,
        local: Point,
        _when: u64,
        _last_when: u64,
        top_most: bool,
        has_focus: bool,
    ) {
        self.record(TestEvent::Released {
            button,
            local,
            top_most,
            has_focus,
        });
    }

    fn on_mouse_moved(
        &self,
        local: Point,
        _buttons: MouseButtons,
        _when: u64,
        top_most: bool,
        has_focus: bool,
    ) {
        self.record(TestEvent::Moved {
            local,
            top_most,
            has_focus,
        });
    }

    fn on_mouse_entered(&self, top_most: bool, has_focus: bool) {
        self.record(TestEvent::Entered {
            top_most,
            has_focus,
        });
    }

    fn on_mouse_exited(&self, top_most: bool, has_focus: bool) {
        self.record(TestEvent::Exited {
            top_most,
            has_focus,
        });
    }

    fn on_mouse_wheel_moved(
        &self,
        direction: i32,
        page_move: bool,
        _local: Point,
        _when: u64,
        top_most: bool,
    ) {
        self.record(TestEvent::Wheel {
            direction,
            page_move,
            top_most,
        });
    }

    fn on_key_pressed(&self, event: &KeyEvent) -> bool {
        self.record(TestEvent::KeyPressed(event.key_code));
        self.consume_keys
    }

    fn on_key_released(&self, event: &KeyEvent) -> bool {
        self.record(TestEvent::KeyReleased(event.key_code));
        self.consume_keys
    }

    fn on_key_typed(&self, ch: char, _when: u64) -> bool {
        self.record(TestEvent::KeyTyped(ch));
        self.consume_keys
    }

    fn on_controller_button_pressed(&self, button: u16, _when: u64) {
        self.record(TestEvent::ControllerButtonPressed(button));
    }

    fn on_controller_button_released(&self, button: u16, _when: u64) {
        self.record(TestEvent::ControllerButtonReleased(button));
    }

    fn on_controller_axis_changed(&self, axis: u16, _value: f32, _when: u64) {
        self.record(TestEvent::ControllerAxisChanged(axis));
    }

    fn on_focus_gained(&self) {
        self.record(TestEvent::FocusGained);
    }

    fn on_focus_lost(&self) {
        self.record(TestEvent::FocusLost);
    }
}

impl Container for TestSurface {
    fn focused_child(&self, _leaf: bool) -> Option<SurfaceHandle> {
        self.focused_child.borrow().clone()
    }

    fn blocks_focus_component(&self, component: &DeviceComponent) -> bool {
        self.blocked_components.borrow().contains(component)
    }

    fn move_focus(&self, direction: FocusDirection) -> bool {
        self.focus_moves.borrow_mut().push(direction);
        true
    }
}
