//! Shared event log the scripted surfaces record into.

use std::cell::RefCell;
use std::rc::Rc;

use scrim_foundation::{KeyCode, MouseButton};
use scrim_ui_graphics::Point;

/// One callback observed by a [`crate::TestSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum TestEvent {
    Pressed {
        button: MouseButton,
        local: Point,
        top_most: bool,
        has_focus: bool,
    },
    Released {
        button: MouseButton,
        local: Point,
        top_most: bool,
        has_focus: bool,
    },
    Moved {
        local: Point,
        top_most: bool,
        has_focus: bool,
    },
    Entered {
        top_most: bool,
        has_focus: bool,
    },
    Exited {
        top_most: bool,
        has_focus: bool,
    },
    Wheel {
        direction: i32,
        page_move: bool,
        top_most: bool,
    },
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    KeyTyped(char),
    ControllerButtonPressed(u16),
    ControllerButtonReleased(u16),
    ControllerAxisChanged(u16),
    FocusGained,
    FocusLost,
}

impl TestEvent {
    /// Short tag for order-of-events assertions.
    pub fn tag(&self) -> &'static str {
        match self {
            TestEvent::Pressed { .. } => "pressed",
            TestEvent::Released { .. } => "released",
            TestEvent::Moved { .. } => "moved",
            TestEvent::Entered { .. } => "entered",
            TestEvent::Exited { .. } => "exited",
            TestEvent::Wheel { .. } => "wheel",
            TestEvent::KeyPressed(_) => "key_pressed",
            TestEvent::KeyReleased(_) => "key_released",
            TestEvent::KeyTyped(_) => "key_typed",
            TestEvent::ControllerButtonPressed(_) => "controller_pressed",
            TestEvent::ControllerButtonReleased(_) => "controller_released",
            TestEvent::ControllerAxisChanged(_) => "controller_axis",
            TestEvent::FocusGained => "focus_gained",
            TestEvent::FocusLost => "focus_lost",
        }
    }
}

/// Shared, cloneable recording of `(surface name, event)` pairs in the
/// order they were dispatched.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<(String, TestEvent)>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str, event: TestEvent) {
        self.events.borrow_mut().push((name.to_string(), event));
    }

    /// All recorded events, in dispatch order.
    pub fn events(&self) -> Vec<(String, TestEvent)> {
        self.events.borrow().clone()
    }

    /// Events recorded for one surface, in dispatch order.
    pub fn events_for(&self, name: &str) -> Vec<TestEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// `(name, tag)` pairs, for compact order assertions.
    pub fn tags(&self) -> Vec<(String, &'static str)> {
        self.events
            .borrow()
            .iter()
            .map(|(n, e)| (n.clone(), e.tag()))
            .collect()
    }

    /// Number of events for `name` whose tag matches.
    pub fn count(&self, name: &str, tag: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|(n, e)| n == name && e.tag() == tag)
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
