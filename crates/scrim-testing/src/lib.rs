//! Test fixtures for the Scrim dispatch engine.
//!
//! [`TestSurface`] is a scripted implementation of the `Surface` contract:
//! a rectangle that records every callback it receives into a shared
//! [`EventLog`], with builder knobs for every capability the engine cares
//! about (focusable, heavyweight, dialog, cursor, tooltip, container
//! behavior). [`TestMenu`] is the matching `MenuSurface` fixture, and the
//! collecting listeners capture HUD-level notifications.

mod event_log;
mod listeners;
mod menu;
mod surface;

pub use event_log::{EventLog, TestEvent};
pub use listeners::{CollectingAttachListener, CollectingInputListener, CollectingPickMissed};
pub use menu::TestMenu;
pub use surface::{TestSurface, TestSurfaceBuilder};
