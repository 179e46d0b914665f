//! Scripted context-menu fixture.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scrim_foundation::{
    next_surface_id, MenuSurface, MouseButton, PickFlags, PickReason, PickResult, Surface,
    SurfaceHandle, SurfaceId,
};
use scrim_ui_graphics::{Point, Rect};

use crate::surface::TestSurface;

/// A `MenuSurface` whose item container is a [`TestSurface`]. Showing the
/// menu makes the item container visible (tests attach it to the HUD as a
/// window so picks can land inside the open menu); hiding reverses that.
pub struct TestMenu {
    id: SurfaceId,
    name: String,
    items: Rc<TestSurface>,
    origin: Cell<Point>,
    z: Cell<i32>,
    visible: Cell<bool>,
    attached: Cell<bool>,
    shown_at: RefCell<Vec<Point>>,
    hide_count: Cell<usize>,
}

impl TestMenu {
    pub fn new(name: impl Into<String>, items: Rc<TestSurface>) -> Rc<Self> {
        items.set_visible(false);
        Rc::new(Self {
            id: next_surface_id(),
            name: name.into(),
            items,
            origin: Cell::new(Point::ZERO),
            z: Cell::new(0),
            visible: Cell::new(false),
            attached: Cell::new(false),
            shown_at: RefCell::new(Vec::new()),
            hide_count: Cell::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &Rc<TestSurface> {
        &self.items
    }

    pub fn is_showing(&self) -> bool {
        self.visible.get()
    }

    /// Positions this menu has been shown at, in order.
    pub fn shown_at(&self) -> Vec<Point> {
        self.shown_at.borrow().clone()
    }

    pub fn hide_count(&self) -> usize {
        self.hide_count.get()
    }

    pub fn menu_handle(self: &Rc<Self>) -> Rc<dyn MenuSurface> {
        self.clone()
    }
}

impl Surface for TestMenu {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn frame(&self) -> Rect {
        self.items.frame()
    }

    fn set_origin(&self, origin: Point) {
        self.origin.set(origin);
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
        self.visible.get()
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    fn pick(
        &self,
        _x: f32,
        _y: f32,
        _reason: PickReason,
        _button: MouseButton,
        _when: u64,
        _flags: PickFlags,
    ) -> Option<PickResult> {
        // Picks land on the item container, which joins the pick chain as
        // its own surface.
        None
    }
}

impl MenuSurface for TestMenu {
    fn item_container(&self) -> SurfaceHandle {
        self.items.handle()
    }

    fn show_at(&self, position: Point) {
        self.shown_at.borrow_mut().push(position);
        self.origin.set(position);
        self.visible.set(true);
        self.items.set_visible(true);
    }

    fn hide(&self) {
        self.hide_count.set(self.hide_count.get() + 1);
        self.visible.set(false);
        self.items.set_visible(false);
    }
}
