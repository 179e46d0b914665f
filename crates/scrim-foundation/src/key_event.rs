//! Keyboard input event types for Scrim.
//!
//! Platform-independent keyboard events, routed by the shell to the focused
//! surface and consulted by the focus-movement bindings.

/// Type of keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    /// Key was pressed down.
    KeyDown,
    /// Key was released.
    KeyUp,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Returns true if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Physical key codes, independent of the character a key produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Enter,
    Tab,
    Space,
    Escape,

    /// Key not recognized or not mapped.
    Unknown,
}

/// A keyboard input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The physical key that was pressed.
    pub key_code: KeyCode,
    /// The text produced by this key press (may be empty for non-character
    /// keys). Accounts for keyboard layout and modifiers.
    pub text: String,
    /// Current state of modifier keys.
    pub modifiers: Modifiers,
    /// Type of event (down or up).
    pub event_type: KeyEventType,
    /// Platform timestamp of the event.
    pub when: u64,
}

impl KeyEvent {
    pub fn new(
        key_code: KeyCode,
        text: impl Into<String>,
        modifiers: Modifiers,
        event_type: KeyEventType,
        when: u64,
    ) -> Self {
        Self {
            key_code,
            text: text.into(),
            modifiers,
            event_type,
            when,
        }
    }

    /// Creates a key down event with the given key code and no text.
    pub fn key_down(key_code: KeyCode, when: u64) -> Self {
        Self::new(key_code, "", Modifiers::NONE, KeyEventType::KeyDown, when)
    }

    /// Creates a key up event with the given key code and no text.
    pub fn key_up(key_code: KeyCode, when: u64) -> Self {
        Self::new(key_code, "", Modifiers::NONE, KeyEventType::KeyUp, when)
    }
}
