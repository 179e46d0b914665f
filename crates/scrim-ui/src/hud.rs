//! The HUD: surface stack ownership and the pick pipeline.
//!
//! A pick resolves which surface sits under a screen coordinate, dispatches
//! the appropriate callbacks to every surface that reported a hit, and
//! updates focus, hover, popup, tooltip, and cursor state as side effects.
//! Precedence: an open volatile popup is tested exclusively; otherwise the
//! top visible dialog shadows everything; otherwise windows compete by rank
//! with the content pane as the fallback.

use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use scrim_foundation::{
    AttachListener, CursorKind, DeviceComponent, InputListener, KeyEvent, ListenerId, MenuHandle,
    MouseButton, PickFlags, PickMeta, PickMissedListener, PickReason, PickResult, Surface,
    SurfaceHandle,
};
use scrim_ui_graphics::{CoordinateConverter, Point, Size};

use crate::cursor::{CursorSink, CursorState};
use crate::focus::{FocusBindings, FocusManager};
use crate::hover::HoverTracker;
use crate::popup::PopupCoordinator;
use crate::theme::Theme;
use crate::tooltip::{ToolTipController, TooltipFactory};

// Z bands surfaces are attached into. Windows stack above the content pane
// in insertion order; a volatile popup sits above any window or dialog;
// tooltips above everything.
pub const CONTENT_PANE_Z: i32 = 0;
pub const WINDOW_BASE_Z: i32 = 10;
pub const VOLATILE_POPUP_Z: i32 = 1_000;
pub const TOOLTIP_Z: i32 = 2_000;

/// Builds a drop-shadow surface for a popup about to be attached.
pub type ShadowFactory = Rc<dyn Fn(&SurfaceHandle) -> SurfaceHandle>;

type RecordedHits = SmallVec<[PickResult; 4]>;

pub struct Hud {
    canvas: Size,
    resolution: Option<Size>,
    theme: Theme,
    content_pane: Option<SurfaceHandle>,
    windows: Vec<SurfaceHandle>,
    focus: FocusManager,
    hover: HoverTracker,
    popups: PopupCoordinator,
    tooltips: ToolTipController,
    cursor: CursorState,
    shadow_factory: Option<ShadowFactory>,
    pick_missed: IndexMap<ListenerId, (u8, Rc<dyn PickMissedListener>)>,
    input_listeners: IndexMap<ListenerId, Rc<dyn InputListener>>,
    attach_listeners: IndexMap<ListenerId, Rc<dyn AttachListener>>,
    next_listener: ListenerId,
    structural_change: bool,
}

impl Hud {
    pub fn new(canvas: Size, theme: Theme) -> Self {
        Self {
            canvas,
            resolution: None,
            theme,
            content_pane: None,
            windows: Vec::new(),
            focus: FocusManager::new(),
            hover: HoverTracker::new(),
            popups: PopupCoordinator::new(),
            tooltips: ToolTipController::new(),
            cursor: CursorState::new(),
            shadow_factory: None,
            pick_missed: IndexMap::new(),
            input_listeners: IndexMap::new(),
            attach_listeners: IndexMap::new(),
            next_listener: 1,
            structural_change: false,
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn set_canvas_size(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    /// Declares the virtual resolution widgets are laid out in. `None`
    /// makes HUD space coincide with pixel space.
    pub fn set_resolution(&mut self, resolution: Option<Size>) {
        self.resolution = resolution;
    }

    pub fn converter(&self) -> CoordinateConverter {
        CoordinateConverter::new(self.canvas, self.resolution)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_cursor_sink(&mut self, sink: Option<Rc<dyn CursorSink>>) {
        self.cursor.set_sink(sink);
    }

    pub fn set_tooltip_factory(&mut self, factory: Option<TooltipFactory>) {
        self.tooltips.set_factory(factory);
    }

    pub fn set_shadow_factory(&mut self, factory: Option<ShadowFactory>) {
        self.shadow_factory = factory;
    }

    pub fn set_default_context_menu(&mut self, menu: Option<MenuHandle>) {
        self.popups.set_default_menu(menu);
    }

    /// Enables the context menu over empty space.
    pub fn set_void_menu_enabled(&mut self, enabled: bool) {
        self.popups.set_void_menu_enabled(enabled);
    }

    pub fn focus_bindings_mut(&mut self) -> &mut FocusBindings {
        self.focus.bindings_mut()
    }

    // ------------------------------------------------------------------
    // Surface stack
    // ------------------------------------------------------------------

    pub fn set_content_pane(&mut self, pane: Option<SurfaceHandle>) {
        if let Some(pane) = &pane {
            pane.set_z_index(CONTENT_PANE_Z);
            pane.set_attached(true);
        }
        if let Some(old) = self.content_pane.take() {
            old.set_attached(false);
        }
        self.content_pane = pane;
    }

    pub fn content_pane(&self) -> Option<&SurfaceHandle> {
        self.content_pane.as_ref()
    }

    /// Attaches a top-level window. Its z index derives from insertion
    /// order, so later windows stack (and win rank ties) above earlier ones.
    /// Dialog-type windows additionally join the modal stack.
    pub fn add_window(&mut self, window: SurfaceHandle) {
        assert!(
            !window.is_attached(),
            "surface #{} is already attached",
            window.id()
        );
        window.set_z_index(WINDOW_BASE_Z + self.windows.len() as i32 + 1);
        window.set_attached(true);
        self.windows.push(window.clone());
        if window.is_dialog() {
            self.popups.push_dialog(window.clone());
        }
        log::debug!("window #{} attached at z {}", window.id(), window.z_index());
        for listener in self.attach_listeners.values() {
            listener.surface_attached(&window);
        }
        self.structural_change = true;
    }

    /// Detaches a window previously added to this HUD. Removing a window
    /// the HUD does not own is a caller contract breach.
    pub fn remove_window(&mut self, window: &SurfaceHandle) {
        let index = self
            .windows
            .iter()
            .position(|w| w.id() == window.id())
            .unwrap_or_else(|| panic!("surface #{} is not a window of this HUD", window.id()));
        let window = self.windows.remove(index);
        if self.focus.is_current(window.id()) {
            self.focus.focus(None);
        }
        self.popups.remove_dialog(window.id());
        if let Some(closed) = self.popups.close_volatile_if_owned(window.id()) {
            self.notify_detached(&closed);
        }
        window.set_attached(false);
        log::debug!("window #{} detached", window.id());
        self.notify_detached(&window);
        self.structural_change = true;
    }

    pub fn windows(&self) -> &[SurfaceHandle] {
        &self.windows
    }

    // ------------------------------------------------------------------
    // Popups and dialogs
    // ------------------------------------------------------------------

    /// Opens a volatile popup (e.g. a combo-box drop-down) owned by
    /// `assembly`, replacing any popup already open. The popup must be
    /// heavyweight.
    pub fn open_volatile_popup(
        &mut self,
        popup: SurfaceHandle,
        assembly: SurfaceHandle,
        position: Point,
    ) {
        let shadow = self.shadow_factory.as_ref().map(|factory| factory(&popup));
        let replaced = self
            .popups
            .open_volatile(popup.clone(), assembly, position, shadow);
        if let Some(replaced) = replaced {
            self.notify_detached(&replaced);
        }
        for listener in self.attach_listeners.values() {
            listener.surface_attached(&popup);
        }
        self.structural_change = true;
    }

    pub fn close_volatile_popup(&mut self) {
        if let Some(closed) = self.popups.close_volatile() {
            self.notify_detached(&closed);
            self.structural_change = true;
        }
    }

    pub fn current_volatile_popup(&self) -> Option<&SurfaceHandle> {
        self.popups.volatile_popup()
    }

    pub fn current_dialog(&self) -> Option<SurfaceHandle> {
        self.popups.current_dialog()
    }

    pub fn displayed_context_menu(&self) -> Option<&MenuHandle> {
        self.popups.displayed_menu()
    }

    pub fn displayed_tooltip(&self) -> Option<&SurfaceHandle> {
        self.tooltips.displayed_tooltip()
    }

    /// Cursor kind currently displayed.
    pub fn current_cursor(&self) -> CursorKind {
        self.cursor.current()
    }

    // ------------------------------------------------------------------
    // Focus and hover
    // ------------------------------------------------------------------

    /// Transfers focus; see [`FocusManager::focus`].
    pub fn focus(&mut self, target: Option<SurfaceHandle>) -> Option<SurfaceHandle> {
        self.focus.focus(target)
    }

    pub fn current_focused(&self, leaf: bool) -> Option<SurfaceHandle> {
        self.focus.current_focused(leaf)
    }

    pub fn hovered(&self) -> Option<&SurfaceHandle> {
        self.hover.current()
    }

    /// Routes a device-component state change into focus movement.
    pub fn component_changed(&mut self, component: &DeviceComponent, delta: f32) -> bool {
        self.focus.component_changed(component, delta)
    }

    // ------------------------------------------------------------------
    // Keyboard / controller routing
    // ------------------------------------------------------------------

    /// Offers a key press to the focused leaf; when unconsumed, attempts
    /// focus movement through the bindings.
    pub fn dispatch_key_pressed(&mut self, event: &KeyEvent) -> bool {
        if let Some(leaf) = self.focus.current_focused(true) {
            if leaf.on_key_pressed(event) {
                return true;
            }
        }
        self.component_changed(&DeviceComponent::Key(event.key_code), 1.0)
    }

    pub fn dispatch_key_released(&mut self, event: &KeyEvent) -> bool {
        self.focus
            .current_focused(true)
            .map(|leaf| leaf.on_key_released(event))
            .unwrap_or(false)
    }

    pub fn dispatch_key_typed(&mut self, ch: char, when: u64) -> bool {
        self.focus
            .current_focused(true)
            .map(|leaf| leaf.on_key_typed(ch, when))
            .unwrap_or(false)
    }

    pub fn dispatch_controller_button_pressed(&mut self, button: u16, when: u64) {
        if let Some(leaf) = self.focus.current_focused(true) {
            leaf.on_controller_button_pressed(button, when);
        }
        self.component_changed(&DeviceComponent::ControllerButton(button), 1.0);
    }

    pub fn dispatch_controller_button_released(&mut self, button: u16, when: u64) {
        if let Some(leaf) = self.focus.current_focused(true) {
            leaf.on_controller_button_released(button, when);
        }
    }

    pub fn dispatch_controller_axis_changed(&mut self, axis: u16, value: f32, when: u64) {
        if let Some(leaf) = self.focus.current_focused(true) {
            leaf.on_controller_axis_changed(axis, value, when);
        }
        // Analog components never move focus; this is a no-op by contract.
        self.component_changed(&DeviceComponent::ControllerAxis(axis), value);
    }

    // ------------------------------------------------------------------
    // Listener registration
    // ------------------------------------------------------------------

    fn next_listener_id(&mut self) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        id
    }

    /// Registers a pick-missed listener with a reason bitmask (see
    /// [`PickReason::mask`]).
    pub fn add_pick_missed_listener(
        &mut self,
        reason_mask: u8,
        listener: Rc<dyn PickMissedListener>,
    ) -> ListenerId {
        let id = self.next_listener_id();
        self.pick_missed.insert(id, (reason_mask, listener));
        id
    }

    pub fn remove_pick_missed_listener(&mut self, id: ListenerId) {
        if self.pick_missed.shift_remove(&id).is_none() {
            log::debug!("pick-missed listener {id} was not registered");
        }
    }

    pub fn add_input_listener(&mut self, listener: Rc<dyn InputListener>) -> ListenerId {
        let id = self.next_listener_id();
        self.input_listeners.insert(id, listener);
        id
    }

    pub fn remove_input_listener(&mut self, id: ListenerId) {
        if self.input_listeners.shift_remove(&id).is_none() {
            log::debug!("input listener {id} was not registered");
        }
    }

    pub fn add_attach_listener(&mut self, listener: Rc<dyn AttachListener>) -> ListenerId {
        let id = self.next_listener_id();
        self.attach_listeners.insert(id, listener);
        id
    }

    pub fn remove_attach_listener(&mut self, id: ListenerId) {
        if self.attach_listeners.shift_remove(&id).is_none() {
            log::debug!("attach listener {id} was not registered");
        }
    }

    // ------------------------------------------------------------------
    // Transient state
    // ------------------------------------------------------------------

    /// True once since the last call when windows or popups were attached
    /// or detached. The shell samples this to arm its input cooldown.
    pub fn take_structural_change(&mut self) -> bool {
        std::mem::replace(&mut self.structural_change, false)
    }

    /// Drops hover (with an exit notification), the displayed tooltip, the
    /// volatile popup, and the displayed context menu. Used when the HUD
    /// loses visibility.
    pub fn reset_transient_state(&mut self) {
        if let Some(exited) = self.hover.diverge(None, self.focus.current_id()) {
            for listener in self.input_listeners.values() {
                listener.mouse_exited(&exited);
            }
        }
        self.tooltips.dispose();
        if let Some(closed) = self.popups.close_volatile() {
            self.notify_detached(&closed);
        }
        self.popups.close_displayed_menu();
    }

    fn notify_detached(&self, surface: &SurfaceHandle) {
        for listener in self.attach_listeners.values() {
            listener.surface_detached(surface);
        }
    }

    // ------------------------------------------------------------------
    // The pick pipeline
    // ------------------------------------------------------------------

    /// Resolves and dispatches a pick at a screen (pixel) coordinate.
    /// Returns the topmost result, or `None` when nothing was hit.
    pub fn pick(
        &mut self,
        screen: Point,
        reason: PickReason,
        button: MouseButton,
        when: u64,
        meta: PickMeta,
        flags: PickFlags,
    ) -> Option<PickResult> {
        let point = self.converter().pixel_to_hud(screen);
        let (recorded, top_index) = self.hit_test(point, reason, button, when, flags);

        // Hover divergence runs before any local-coordinate dispatch, and
        // also for just-test picks: the exit notification is the
        // bookkeeping that keeps the exactly-once invariant true.
        let new_leaf = top_index.map(|index| recorded[index].leaf().clone());
        if let Some(exited) = self.hover.diverge(new_leaf.as_ref(), self.focus.current_id()) {
            if !flags.internal {
                for listener in self.input_listeners.values() {
                    listener.mouse_exited(&exited);
                }
            }
        }

        let dispatch = !flags.just_test && !flags.suppressed;
        if dispatch {
            self.dispatch_recorded(&recorded, top_index, point, reason, button, when, meta, flags);
        }

        // Pick-missed fires only for empty recorded sets, outside modal
        // dialogs, and never for suppressed or probe picks.
        if recorded.is_empty() && dispatch && self.popups.current_dialog().is_none() {
            for (mask, listener) in self.pick_missed.values() {
                if mask & reason.mask() != 0 {
                    listener.pick_missed(reason, point, when);
                }
            }
        }

        let top = top_index.map(|index| &recorded[index]);
        if !flags.just_test {
            if !flags.suppressed {
                self.popups.context_menu_check(top, button, point, reason);
            }

            // Cursor follows the topmost leaf's inherited kind. Probe picks
            // never reach this point, so tooltip probing cannot flicker the
            // cursor.
            let kind = top.and_then(|result| result.leaf().inherited_cursor());
            self.cursor.apply(kind, &self.theme);

            if reason == PickReason::ButtonPressed {
                if let Some(closed) = self.popups.dismiss_volatile_if_outside(top, point) {
                    self.notify_detached(&closed);
                    self.structural_change = true;
                }
            }
        }

        let top = top.cloned();

        // A displayed tooltip re-checks what is under the moving cursor via
        // a suppressed just-test pick, then applies the movement threshold.
        if reason == PickReason::MouseMoved
            && !flags.just_test
            && self.tooltips.displayed_tooltip().is_some()
        {
            let probe = self.pick(screen, PickReason::MouseMoved, button, when, meta, PickFlags::probe());
            let under = probe.map(|result| result.leaf().id());
            self.tooltips
                .handle_motion(under, point, self.converter().hud_space());
        }

        top
    }

    /// Hit tests the surface stack in precedence order, recording every
    /// non-null per-surface result and the index of the topmost one.
    fn hit_test(
        &self,
        point: Point,
        reason: PickReason,
        button: MouseButton,
        when: u64,
        flags: PickFlags,
    ) -> (RecordedHits, Option<usize>) {
        let mut recorded = RecordedHits::new();
        let mut top = None;

        if let Some(popup) = self.popups.volatile_popup() {
            // An open volatile popup is tested exclusively; it overrides
            // dialogs and windows while open.
            if let Some(result) = test_surface(popup, point, reason, button, when, flags) {
                recorded.push(result);
                top = Some(0);
            }
        } else if let Some(dialog) = self
            .popups
            .current_dialog()
            .filter(|dialog| dialog.is_pickable())
        {
            // The current modal dialog shadows windows and the content pane.
            if let Some(result) = test_surface(&dialog, point, reason, button, when, flags) {
                recorded.push(result);
                top = Some(0);
            }
        } else {
            for window in &self.windows {
                if let Some(result) = test_surface(window, point, reason, button, when, flags) {
                    let index = recorded.len();
                    // Later windows win rank ties: most-recently-added is
                    // topmost among equals.
                    match top {
                        Some(t) if recorded[t].rank() > result.rank() => {}
                        _ => top = Some(index),
                    }
                    recorded.push(result);
                }
            }
            if recorded.is_empty() {
                if let Some(pane) = &self.content_pane {
                    if let Some(result) = test_surface(pane, point, reason, button, when, flags) {
                        recorded.push(result);
                        top = Some(0);
                    }
                }
            }
        }

        (recorded, top)
    }

    /// Per-recorded-surface dispatch: every surface that reported a hit is
    /// notified, with `top_most` distinguishing the winner.
    #[allow(clippy::too_many_arguments)]
    fn dispatch_recorded(
        &mut self,
        recorded: &RecordedHits,
        top_index: Option<usize>,
        point: Point,
        reason: PickReason,
        button: MouseButton,
        when: u64,
        meta: PickMeta,
        flags: PickFlags,
    ) {
        for (index, result) in recorded.iter().enumerate() {
            let top_most = Some(index) == top_index;
            let surface = result.surface();
            let local = point - surface.frame().origin();
            match reason {
                PickReason::ButtonPressed => {
                    // Transfer focus first so the press callback observes
                    // the updated focus state.
                    if top_most && !self.focus.is_current(surface.id()) {
                        self.focus.focus(Some(surface.clone()));
                    }
                    let has_focus = self.focus.is_current(surface.id());
                    surface.on_mouse_button_pressed(
                        button,
                        local,
                        when,
                        meta.last_when,
                        top_most,
                        has_focus,
                    );
                    self.forward(flags, |listener| {
                        listener.mouse_button_pressed(surface, button, local, when);
                    });
                }
                PickReason::ButtonReleased => {
                    let has_focus = self.focus.is_current(surface.id());
                    surface.on_mouse_button_released(
                        button,
                        local,
                        when,
                        meta.last_when,
                        top_most,
                        has_focus,
                    );
                    self.forward(flags, |listener| {
                        listener.mouse_button_released(surface, button, local, when);
                    });
                }
                PickReason::MouseMoved => {
                    let has_focus = self.focus.is_current(surface.id());
                    surface.on_mouse_moved(local, meta.buttons, when, top_most, has_focus);
                    if top_most && self.hover.current().is_none() {
                        let leaf = result.leaf().clone();
                        let leaf_focus = self.focus.is_current(leaf.id());
                        self.hover.set(leaf.clone());
                        leaf.on_mouse_entered(true, leaf_focus);
                        self.forward(flags, |listener| listener.mouse_entered(&leaf));
                    }
                    self.forward(flags, |listener| {
                        listener.mouse_moved(surface, local, meta.buttons, when);
                    });
                }
                PickReason::MouseStopped => {
                    if top_most {
                        self.tooltips.evaluate(result.leaf(), point);
                    }
                }
                PickReason::WheelUp | PickReason::WheelDown => {
                    let direction = reason.wheel_direction();
                    surface.on_mouse_wheel_moved(direction, meta.page_move, local, when, top_most);
                    self.forward(flags, |listener| {
                        listener.mouse_wheel_moved(surface, direction, meta.page_move, when);
                    });
                }
            }
        }
    }

    /// Forwards a dispatched callback to global input listeners. Internal
    /// picks notify widgets but not listeners.
    fn forward(&self, flags: PickFlags, notify: impl Fn(&dyn InputListener)) {
        if flags.internal {
            return;
        }
        for listener in self.input_listeners.values() {
            notify(listener.as_ref());
        }
    }
}

fn test_surface(
    surface: &SurfaceHandle,
    point: Point,
    reason: PickReason,
    button: MouseButton,
    when: u64,
    flags: PickFlags,
) -> Option<PickResult> {
    if !surface.is_visible() || !surface.is_pickable() {
        return None;
    }
    surface.pick(point.x, point.y, reason, button, when, flags)
}
