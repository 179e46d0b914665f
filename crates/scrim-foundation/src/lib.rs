//! Foundation contracts for Scrim: the capability traits the dispatch engine
//! consumes from widgets (`Surface`, `Container`, `MenuSurface`), pick
//! results, and platform-independent input primitives.
//!
//! Widget internals (drawing, layout, text) live outside this workspace;
//! only the pick and callback contracts defined here matter to dispatch.

mod input;
mod key_event;
mod listener;
mod pick;
mod surface;

pub use input::{
    DeviceComponent, FocusDirection, MouseButton, MouseButtons, PickFlags, PickMeta, PickReason,
};
pub use key_event::{KeyCode, KeyEvent, KeyEventType, Modifiers};
pub use listener::{AttachListener, InputListener, ListenerId, PickMissedListener};
pub use pick::PickResult;
pub use surface::{
    next_surface_id, Container, CursorKind, MenuHandle, MenuSurface, Surface, SurfaceHandle,
    SurfaceId,
};
