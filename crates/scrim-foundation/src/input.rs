//! Input primitives shared by the pick engine and the platform shell.

use crate::key_event::KeyCode;

/// Why a pick is being performed. Each reason selects a different dispatch
/// branch in the engine and a different bit in listener reason masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickReason {
    ButtonPressed,
    ButtonReleased,
    MouseMoved,
    /// The cursor has rested in place long enough; drives tooltips.
    MouseStopped,
    WheelUp,
    WheelDown,
}

impl PickReason {
    /// Bit used by pick-missed listener masks.
    pub const fn mask(self) -> u8 {
        match self {
            PickReason::ButtonPressed => 1 << 0,
            PickReason::ButtonReleased => 1 << 1,
            PickReason::MouseMoved => 1 << 2,
            PickReason::MouseStopped => 1 << 3,
            PickReason::WheelUp => 1 << 4,
            PickReason::WheelDown => 1 << 5,
        }
    }

    /// Mask covering every reason.
    pub const ALL_MASK: u8 = 0b0011_1111;

    /// Signed wheel direction: +1 for up, -1 for down, 0 otherwise.
    pub const fn wheel_direction(self) -> i32 {
        match self {
            PickReason::WheelUp => 1,
            PickReason::WheelDown => -1,
            _ => 0,
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

/// Bit set of currently pressed mouse buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseButtons(u8);

impl MouseButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: MouseButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for MouseButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// Flags carried through a pick call and stamped onto its results.
///
/// - `internal`: the pick was generated by the engine itself; widgets are
///   notified but global input listeners are not.
/// - `suppressed`: hit testing runs, per-surface dispatch and pick-missed
///   notification do not.
/// - `just_test`: probe only. Hit testing and hover-divergence bookkeeping
///   run; callbacks, focus transfer, cursor updates, and popup/menu state
///   changes do not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickFlags {
    pub internal: bool,
    pub suppressed: bool,
    pub just_test: bool,
}

impl PickFlags {
    pub const NONE: Self = Self {
        internal: false,
        suppressed: false,
        just_test: false,
    };

    /// A suppressed just-test pick: what the tooltip controller uses to ask
    /// "what is under the cursor" without disturbing visible state.
    pub const fn probe() -> Self {
        Self {
            internal: true,
            suppressed: true,
            just_test: true,
        }
    }
}

/// Per-call metadata that rides alongside a pick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PickMeta {
    /// Timestamp of the previous press of the same button, for click-count
    /// detection in widget callbacks.
    pub last_when: u64,
    /// Buttons held at the time of the event.
    pub buttons: MouseButtons,
    /// Whether a wheel event should scroll by pages instead of lines.
    pub page_move: bool,
}

/// A single component of some input device: a keyboard key, a controller
/// button, or a controller axis. Focus-movement bindings are expressed in
/// these terms so any device can drive focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceComponent {
    Key(KeyCode),
    ControllerButton(u16),
    ControllerAxis(u16),
}

impl DeviceComponent {
    /// Analog components report continuous values and never trigger focus
    /// movement.
    pub fn is_analog(&self) -> bool {
        matches!(self, DeviceComponent::ControllerAxis(_))
    }
}

/// Direction of a focus-movement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    Up,
    Down,
    Left,
    Right,
    /// Traversal-order movement (Tab).
    Next,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_masks_are_distinct() {
        let reasons = [
            PickReason::ButtonPressed,
            PickReason::ButtonReleased,
            PickReason::MouseMoved,
            PickReason::MouseStopped,
            PickReason::WheelUp,
            PickReason::WheelDown,
        ];
        let mut seen = 0u8;
        for reason in reasons {
            assert_eq!(seen & reason.mask(), 0);
            seen |= reason.mask();
        }
        assert_eq!(seen, PickReason::ALL_MASK);
    }

    #[test]
    fn button_set_insert_remove() {
        let mut buttons = MouseButtons::NONE;
        buttons.insert(MouseButton::Primary);
        buttons.insert(MouseButton::Secondary);
        assert!(buttons.contains(MouseButton::Primary));
        buttons.remove(MouseButton::Primary);
        assert!(!buttons.contains(MouseButton::Primary));
        assert!(buttons.contains(MouseButton::Secondary));
        assert!(!buttons.is_empty());
    }

    #[test]
    fn analog_components() {
        assert!(DeviceComponent::ControllerAxis(0).is_analog());
        assert!(!DeviceComponent::ControllerButton(0).is_analog());
        assert!(!DeviceComponent::Key(KeyCode::Tab).is_analog());
    }
}
