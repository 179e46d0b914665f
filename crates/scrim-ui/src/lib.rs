//! The Scrim dispatch engine.
//!
//! [`Hud`] owns a z-ordered stack of interactive surfaces (content pane,
//! windows, dialogs, volatile popups) and runs the pick pipeline: hit
//! testing, per-widget callback dispatch, and the focus/hover/popup/tooltip
//! state machines the pipeline drives as side effects.

mod cursor;
mod focus;
mod hover;
mod hud;
mod popup;
mod theme;
mod tooltip;

pub use cursor::{CursorSink, CursorState};
pub use focus::{FocusBindings, FocusManager};
pub use hover::HoverTracker;
pub use hud::{
    Hud, ShadowFactory, CONTENT_PANE_Z, TOOLTIP_Z, VOLATILE_POPUP_Z, WINDOW_BASE_Z,
};
pub use popup::PopupCoordinator;
pub use theme::{CursorVisual, Theme};
pub use tooltip::{ToolTipController, TooltipFactory};

// Re-export the contract types callers interact with constantly.
pub use scrim_foundation::{
    AttachListener, Container, CursorKind, DeviceComponent, FocusDirection, InputListener,
    KeyCode, KeyEvent, KeyEventType, ListenerId, MenuHandle, MenuSurface, Modifiers, MouseButton,
    MouseButtons, PickFlags, PickMeta, PickMissedListener, PickReason, PickResult, Surface,
    SurfaceHandle, SurfaceId,
};
pub use scrim_ui_graphics::{CoordinateConverter, Point, Rect, Size};
