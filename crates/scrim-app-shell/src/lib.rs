//! The Scrim application shell: translates raw platform input into HUD
//! picks and focus/key routing.
//!
//! The shell owns the gating the engine itself does not do: everything is
//! dropped while the HUD is invisible, mouse events are held back for a
//! short cooldown after structural changes (a window attached, a popup
//! closed) to avoid stray click-through, a fixed Y correction is applied to
//! raw mouse coordinates, and `MouseStopped` picks are synthesized when the
//! cursor has rested long enough.

use web_time::Instant;

use scrim_foundation::{DeviceComponent, KeyEvent, MouseButton, MouseButtons, PickFlags, PickMeta, PickReason};
use scrim_ui::Hud;
use scrim_ui_graphics::Point;

/// Correction applied to raw mouse Y before any conversion: the platform
/// reports mouse coordinates one pixel below the canvas origin.
pub const MOUSE_Y_CORRECTION: f32 = -1.0;

/// How long mouse input stays ignored after a structural change.
pub const INPUT_COOLDOWN_MS: u64 = 200;

/// Default rest time before a `MouseStopped` pick is synthesized.
pub const DEFAULT_STOP_DELAY_MS: u64 = 500;

const BUTTON_COUNT: usize = 5;

pub struct HudShell {
    hud: Hud,
    visible: bool,
    cursor: Point,
    buttons: MouseButtons,
    /// Previous press time per button, passed to widgets as `last_when`.
    last_press: [u64; BUTTON_COUNT],
    last_move_at: Option<u64>,
    stop_fired: bool,
    hold_until: Option<u64>,
    stop_delay: u64,
    started: Instant,
}

impl HudShell {
    pub fn new(hud: Hud) -> Self {
        Self {
            hud,
            visible: true,
            cursor: Point::ZERO,
            buttons: MouseButtons::NONE,
            last_press: [0; BUTTON_COUNT],
            last_move_at: None,
            stop_fired: false,
            hold_until: None,
            stop_delay: DEFAULT_STOP_DELAY_MS,
            started: Instant::now(),
        }
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hiding the HUD drops its transient interaction state (hover,
    /// tooltip, volatile popup, context menu) so nothing lingers when it
    /// comes back.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible {
            self.hud.reset_transient_state();
            self.buttons = MouseButtons::NONE;
        }
    }

    pub fn set_stop_delay_ms(&mut self, delay: u64) {
        self.stop_delay = delay;
    }

    /// Milliseconds since the shell was created; convenience timestamp for
    /// hosts that do not carry their own clock.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    // ------------------------------------------------------------------
    // Mouse entry points
    // ------------------------------------------------------------------

    pub fn mouse_moved(&mut self, x: f32, y: f32, when: u64) -> bool {
        if !self.mouse_gate(when) {
            return false;
        }
        let position = correct(x, y);
        self.cursor = position;
        self.last_move_at = Some(when);
        self.stop_fired = false;
        let meta = PickMeta {
            buttons: self.buttons,
            ..PickMeta::default()
        };
        let hit = self
            .hud
            .pick(
                position,
                PickReason::MouseMoved,
                MouseButton::Primary,
                when,
                meta,
                PickFlags::NONE,
            )
            .is_some();
        self.sample_structural_change(when);
        hit
    }

    pub fn mouse_pressed(&mut self, button: MouseButton, x: f32, y: f32, when: u64) -> bool {
        if !self.mouse_gate(when) {
            return false;
        }
        let position = correct(x, y);
        self.cursor = position;
        self.buttons.insert(button);
        let slot = button as usize;
        let last_when = std::mem::replace(&mut self.last_press[slot], when);
        let meta = PickMeta {
            last_when,
            buttons: self.buttons,
            page_move: false,
        };
        let hit = self
            .hud
            .pick(position, PickReason::ButtonPressed, button, when, meta, PickFlags::NONE)
            .is_some();
        self.sample_structural_change(when);
        hit
    }

    pub fn mouse_released(&mut self, button: MouseButton, x: f32, y: f32, when: u64) -> bool {
        if !self.mouse_gate(when) {
            return false;
        }
        let position = correct(x, y);
        self.cursor = position;
        // Release events report buttons as currently pressed, i.e. with
        // this one already gone.
        self.buttons.remove(button);
        let meta = PickMeta {
            last_when: self.last_press[button as usize],
            buttons: self.buttons,
            page_move: false,
        };
        let hit = self
            .hud
            .pick(position, PickReason::ButtonReleased, button, when, meta, PickFlags::NONE)
            .is_some();
        self.sample_structural_change(when);
        hit
    }

    /// Positive deltas scroll up. `page_move` asks widgets to scroll by
    /// pages instead of lines.
    pub fn mouse_wheel(&mut self, delta: i32, page_move: bool, x: f32, y: f32, when: u64) -> bool {
        if !self.mouse_gate(when) {
            return false;
        }
        let position = correct(x, y);
        self.cursor = position;
        let reason = if delta >= 0 {
            PickReason::WheelUp
        } else {
            PickReason::WheelDown
        };
        let meta = PickMeta {
            buttons: self.buttons,
            page_move,
            ..PickMeta::default()
        };
        let hit = self
            .hud
            .pick(position, reason, MouseButton::Primary, when, meta, PickFlags::NONE)
            .is_some();
        self.sample_structural_change(when);
        hit
    }

    /// Explicit platform stop event. Stops are also synthesized from
    /// [`HudShell::update`] when the platform does not deliver them.
    pub fn mouse_stopped(&mut self, x: f32, y: f32, when: u64) -> bool {
        if !self.mouse_gate(when) {
            return false;
        }
        let position = correct(x, y);
        self.cursor = position;
        self.stop_fired = true;
        self.pick_stopped(position, when)
    }

    // ------------------------------------------------------------------
    // Keyboard / controller entry points
    // ------------------------------------------------------------------

    pub fn key_pressed(&mut self, event: &KeyEvent) -> bool {
        if !self.visible {
            return false;
        }
        self.hud.dispatch_key_pressed(event)
    }

    pub fn key_released(&mut self, event: &KeyEvent) -> bool {
        if !self.visible {
            return false;
        }
        self.hud.dispatch_key_released(event)
    }

    pub fn key_typed(&mut self, ch: char, when: u64) -> bool {
        if !self.visible {
            return false;
        }
        self.hud.dispatch_key_typed(ch, when)
    }

    pub fn controller_button_pressed(&mut self, button: u16, when: u64) {
        if !self.visible {
            return;
        }
        self.hud.dispatch_controller_button_pressed(button, when);
    }

    pub fn controller_button_released(&mut self, button: u16, when: u64) {
        if !self.visible {
            return;
        }
        self.hud.dispatch_controller_button_released(button, when);
    }

    pub fn controller_axis_changed(&mut self, axis: u16, value: f32, when: u64) {
        if !self.visible {
            return;
        }
        self.hud.dispatch_controller_axis_changed(axis, value, when);
    }

    /// Generic device-component state change; drives focus movement.
    pub fn component_changed(&mut self, component: &DeviceComponent, delta: f32) -> bool {
        if !self.visible {
            return false;
        }
        self.hud.component_changed(component, delta)
    }

    // ------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------

    /// Per-frame update: samples structural changes (arming the input
    /// cooldown) and synthesizes a `MouseStopped` pick once the cursor has
    /// rested for the configured delay.
    pub fn update(&mut self, now: u64) {
        self.sample_structural_change(now);
        if !self.visible || self.stop_fired {
            return;
        }
        let Some(moved_at) = self.last_move_at else {
            return;
        };
        if now.saturating_sub(moved_at) < self.stop_delay {
            return;
        }
        self.stop_fired = true;
        let position = self.cursor;
        self.pick_stopped(position, now);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn pick_stopped(&mut self, position: Point, when: u64) -> bool {
        let meta = PickMeta {
            buttons: self.buttons,
            ..PickMeta::default()
        };
        self.hud
            .pick(
                position,
                PickReason::MouseStopped,
                MouseButton::Primary,
                when,
                meta,
                PickFlags::NONE,
            )
            .is_some()
    }

    fn mouse_gate(&mut self, when: u64) -> bool {
        if !self.visible {
            return false;
        }
        if let Some(hold_until) = self.hold_until {
            if when < hold_until {
                log::trace!("mouse event at {when} dropped, cooldown until {hold_until}");
                return false;
            }
            self.hold_until = None;
        }
        true
    }

    fn sample_structural_change(&mut self, when: u64) {
        if self.hud.take_structural_change() {
            self.hold_until = Some(when + INPUT_COOLDOWN_MS);
            log::trace!("structural change, mouse input held until {}", when + INPUT_COOLDOWN_MS);
        }
    }
}

fn correct(x: f32, y: f32) -> Point {
    Point::new(x, y + MOUSE_Y_CORRECTION)
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
