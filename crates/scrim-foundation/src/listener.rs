//! HUD-level listener contracts.
//!
//! Listeners are registered on the HUD and keyed by a [`ListenerId`] so they
//! can be removed later; removing an id that was never registered is a
//! silent no-op.

use scrim_ui_graphics::Point;

use crate::input::{MouseButton, MouseButtons, PickReason};
use crate::surface::SurfaceHandle;

/// Identity of a registered listener.
pub type ListenerId = usize;

/// Notified when a pick hits nothing at all. Each registration carries a
/// reason bitmask (see [`PickReason::mask`]); only matching reasons fire.
pub trait PickMissedListener {
    fn pick_missed(&self, reason: PickReason, position: Point, when: u64);
}

/// Receives every input callback the engine dispatches to any surface,
/// regardless of target. Default implementations ignore everything so
/// listeners implement only what they care about.
pub trait InputListener {
    fn mouse_button_pressed(
        &self,
        _target: &SurfaceHandle,
        _button: MouseButton,
        _local: Point,
        _when: u64,
    ) {
    }

    fn mouse_button_released(
        &self,
        _target: &SurfaceHandle,
        _button: MouseButton,
        _local: Point,
        _when: u64,
    ) {
    }

    fn mouse_moved(&self, _target: &SurfaceHandle, _local: Point, _buttons: MouseButtons, _when: u64) {
    }

    fn mouse_entered(&self, _target: &SurfaceHandle) {}

    fn mouse_exited(&self, _target: &SurfaceHandle) {}

    fn mouse_wheel_moved(&self, _target: &SurfaceHandle, _direction: i32, _page_move: bool, _when: u64) {
    }
}

/// Notified when surfaces are attached to or detached from the HUD.
pub trait AttachListener {
    fn surface_attached(&self, _surface: &SurfaceHandle) {}

    fn surface_detached(&self, _surface: &SurfaceHandle) {}
}
