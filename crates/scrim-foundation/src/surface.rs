//! The `Surface` capability contract.
//!
//! A surface is any pickable, z-ordered rectangular region participating in
//! the pick hierarchy: a window, a dialog, a volatile popup, a tooltip, the
//! content pane, or any widget inside them. The dispatch engine only ever
//! talks to widgets through these traits; widget visuals are someone else's
//! problem.
//!
//! Surfaces are single-threaded shared handles (`Rc<dyn Surface>`). All
//! callbacks take `&self`; implementations keep their mutable state behind
//! `Cell`/`RefCell`. Identity is the stable [`SurfaceId`], never pointer
//! equality on the fat handle.

use std::cell::Cell;
use std::rc::Rc;

use scrim_ui_graphics::{Point, Rect};

use crate::input::{DeviceComponent, FocusDirection, MouseButton, MouseButtons, PickFlags, PickReason};
use crate::key_event::KeyEvent;
use crate::pick::PickResult;

/// Stable, process-unique surface identity.
pub type SurfaceId = usize;

thread_local! {
    static NEXT_SURFACE_ID: Cell<SurfaceId> = const { Cell::new(1) };
}

/// Allocates the next surface id. Ids are never reused within a process.
pub fn next_surface_id() -> SurfaceId {
    NEXT_SURFACE_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    })
}

pub type SurfaceHandle = Rc<dyn Surface>;
pub type MenuHandle = Rc<dyn MenuSurface>;

/// Cursor shapes a surface may request. The visual for each kind comes from
/// the theme; an unconfigured kind falls back to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CursorKind {
    #[default]
    Pointer,
    Text,
    Hand,
    Move,
    Crosshair,
    ResizeHorizontal,
    ResizeVertical,
}

/// Capability contract every pickable region implements.
///
/// Every input callback receives a `top_most` flag: whether this surface was
/// judged the topmost hit of the pick that produced the callback. Non-topmost
/// surfaces in the recorded hit set still hear about presses, releases, moves
/// and wheel events, distinguished by that flag.
pub trait Surface {
    fn id(&self) -> SurfaceId;

    /// Bounding rectangle in HUD space.
    fn frame(&self) -> Rect;

    /// Moves the surface; used when attaching popups, menus and tooltips.
    fn set_origin(&self, origin: Point);

    fn z_index(&self) -> i32;

    /// Assigned by the HUD when the surface is attached to a z band.
    fn set_z_index(&self, z: i32);

    fn is_visible(&self) -> bool;

    fn is_pickable(&self) -> bool;

    fn is_focusable(&self) -> bool {
        false
    }

    /// Whether this surface can exist as an independent top-level overlay
    /// (required of volatile popups and tooltips).
    fn is_heavyweight(&self) -> bool {
        false
    }

    /// Dialog-type windows join the modal stack when attached.
    fn is_dialog(&self) -> bool {
        false
    }

    fn is_attached(&self) -> bool;

    /// Maintained by the HUD across attach/detach; widgets must store it.
    fn set_attached(&self, attached: bool);

    fn parent(&self) -> Option<SurfaceHandle> {
        None
    }

    /// Cursor kind declared directly on this surface, if any.
    fn cursor(&self) -> Option<CursorKind> {
        None
    }

    /// Cursor kind in effect for this surface: its own declaration, or the
    /// nearest ancestor's.
    fn inherited_cursor(&self) -> Option<CursorKind> {
        self.cursor()
            .or_else(|| self.parent().and_then(|p| p.inherited_cursor()))
    }

    /// When this surface is the content pane of a window, the window that
    /// owns it. Focus requests targeting a content pane are redirected there.
    fn window_for_content_pane(&self) -> Option<SurfaceHandle> {
        None
    }

    /// Per-widget context menu, overriding the HUD default.
    fn context_menu(&self) -> Option<MenuHandle> {
        None
    }

    /// Tooltip content declared by the widget; `None` means no tooltip.
    fn tooltip_text(&self) -> Option<String> {
        None
    }

    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    /// Hit test at a point in HUD space. Returns the surface's pick result
    /// (root surface, deepest leaf under the point, rank) or `None` when the
    /// point misses or the surface is not hittable.
    fn pick(
        &self,
        x: f32,
        y: f32,
        reason: PickReason,
        button: MouseButton,
        when: u64,
        flags: PickFlags,
    ) -> Option<PickResult>;

    fn on_mouse_button_pressed(
        &self,
        _button: MouseButton,
        _local: Point,
        _when: u64,
        _last_when: u64,
        _top_most: bool,
        _has_focus: bool,
    ) {
    }

    fn on_mouse_button_released(
        &self,
        _button: MouseButton,
        _local: Point,
        _when: u64,
        _last_when: u64,
        _top_most: bool,
        _has_focus: bool,
    ) {
    }

    fn on_mouse_moved(
        &self,
        _local: Point,
        _buttons: MouseButtons,
        _when: u64,
        _top_most: bool,
        _has_focus: bool,
    ) {
    }

    fn on_mouse_entered(&self, _top_most: bool, _has_focus: bool) {}

    fn on_mouse_exited(&self, _top_most: bool, _has_focus: bool) {}

    fn on_mouse_wheel_moved(
        &self,
        _direction: i32,
        _page_move: bool,
        _local: Point,
        _when: u64,
        _top_most: bool,
    ) {
    }

    /// Returns true when the event was consumed.
    fn on_key_pressed(&self, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_released(&self, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_typed(&self, _ch: char, _when: u64) -> bool {
        false
    }

    fn on_controller_button_pressed(&self, _button: u16, _when: u64) {}

    fn on_controller_button_released(&self, _button: u16, _when: u64) {}

    fn on_controller_axis_changed(&self, _axis: u16, _value: f32, _when: u64) {}

    fn on_focus_gained(&self) {}

    fn on_focus_lost(&self) {}
}

/// Additional capability of surfaces that own children and participate in
/// focus traversal.
pub trait Container: Surface {
    /// The currently focused child, if any. With `leaf` set, resolves
    /// recursively to the deepest focused descendant.
    fn focused_child(&self, leaf: bool) -> Option<SurfaceHandle>;

    /// Containers such as text fields or lists claim specific device
    /// components (e.g. arrow keys) for internal navigation; a claimed
    /// component never triggers HUD-level focus movement.
    fn blocks_focus_component(&self, _component: &DeviceComponent) -> bool {
        false
    }

    /// Moves focus among this container's children. Returns true when focus
    /// actually moved.
    fn move_focus(&self, direction: FocusDirection) -> bool;
}

/// Capability of context-menu surfaces.
pub trait MenuSurface: Surface {
    /// The container holding the menu's items; picks landing inside it are
    /// "inside the menu" for dismissal purposes.
    fn item_container(&self) -> SurfaceHandle;

    /// Shows the menu at a position in HUD space.
    fn show_at(&self, position: Point);

    fn hide(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_ids_are_unique_and_increasing() {
        let a = next_surface_id();
        let b = next_surface_id();
        let c = next_surface_id();
        assert!(a < b && b < c);
    }
}
