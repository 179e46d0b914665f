//! Collecting implementations of the HUD listener contracts.

use std::cell::RefCell;

use scrim_foundation::{
    InputListener, MouseButton, MouseButtons, PickMissedListener, PickReason, Surface,
    SurfaceHandle, SurfaceId,
};
use scrim_ui_graphics::Point;

/// Records every pick-missed notification.
#[derive(Default)]
pub struct CollectingPickMissed {
    calls: RefCell<Vec<(PickReason, Point, u64)>>,
}

impl CollectingPickMissed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(PickReason, Point, u64)> {
        self.calls.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl PickMissedListener for CollectingPickMissed {
    fn pick_missed(&self, reason: PickReason, position: Point, when: u64) {
        self.calls.borrow_mut().push((reason, position, when));
    }
}

/// Records `(target id, callback tag)` for every forwarded input callback.
#[derive(Default)]
pub struct CollectingInputListener {
    events: RefCell<Vec<(SurfaceId, &'static str)>>,
}

impl CollectingInputListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(SurfaceId, &'static str)> {
        self.events.borrow().clone()
    }

    pub fn count(&self, tag: &str) -> usize {
        self.events.borrow().iter().filter(|(_, t)| *t == tag).count()
    }

    fn record(&self, target: &SurfaceHandle, tag: &'static str) {
        self.events.borrow_mut().push((target.id(), tag));
    }
}

impl InputListener for CollectingInputListener {
    fn mouse_button_pressed(
        &self,
        target: &SurfaceHandle,
        _button: MouseButton,
        _local: Point,
        _when: u64,
    ) {
        self.record(target, "pressed");
    }

    fn mouse_button_released(
        &self,
        target: &SurfaceHandle,
        _button: MouseButton,
        _local: Point,
        _when: u64,
    ) {
        self.record(target, "released");
    }

    fn mouse_moved(
        &self,
        target: &SurfaceHandle,
        _local: Point,
        _buttons: MouseButtons,
        _when: u64,
    ) {
        self.record(target, "moved");
    }

    fn mouse_entered(&self, target: &SurfaceHandle) {
        self.record(target, "entered");
    }

    fn mouse_exited(&self, target: &SurfaceHandle) {
        self.record(target, "exited");
    }

    fn mouse_wheel_moved(
        &self,
        target: &SurfaceHandle,
        _direction: i32,
        _page_move: bool,
        _when: u64,
    ) {
        self.record(target, "wheel");
    }
}

/// Records HUD-level attach and detach notifications.
#[derive(Default)]
pub struct CollectingAttachListener {
    attached: RefCell<Vec<SurfaceId>>,
    detached: RefCell<Vec<SurfaceId>>,
}

impl CollectingAttachListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> Vec<SurfaceId> {
        self.attached.borrow().clone()
    }

    pub fn detached(&self) -> Vec<SurfaceId> {
        self.detached.borrow().clone()
    }
}

impl scrim_foundation::AttachListener for CollectingAttachListener {
    fn surface_attached(&self, surface: &SurfaceHandle) {
        self.attached.borrow_mut().push(surface.id());
    }

    fn surface_detached(&self, surface: &SurfaceHandle) {
        self.detached.borrow_mut().push(surface.id());
    }
}
